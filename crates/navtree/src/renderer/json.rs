use serde::Serialize;

use crate::container::ItemContainer;
use crate::context::RequestContext;
use crate::error::NavigationError;
use crate::item::Attributes;

use super::{RenderOptions, RenderOutput, Renderer};

/// Every item as `{name, url, selected, options, items}`.
///
/// Unlike the markup renderers, all sub-navigations allowed by the level
/// setting are serialized, selected or not. `items` is `null` for items
/// without a non-empty sub-navigation. Returns a JSON string, or the value
/// itself when `as_tree` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct Json;

#[derive(Debug, Serialize)]
struct JsonItem {
    name: String,
    url: Option<String>,
    selected: bool,
    options: Attributes,
    items: Option<Vec<JsonItem>>,
}

impl Json {
    fn items(
        container: &ItemContainer,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
    ) -> Result<Vec<JsonItem>, NavigationError> {
        container
            .items()
            .iter()
            .map(|item| {
                let items = match item.sub_navigation() {
                    Some(sub) if options.consider_sub_navigation(item) && !sub.is_empty() => {
                        Some(Self::items(sub, ctx, options)?)
                    }
                    _ => None,
                };
                Ok::<_, NavigationError>(JsonItem {
                    name: item.name(ctx, true),
                    url: item.url().map(str::to_owned),
                    selected: item.selected(ctx, container)?,
                    options: item.html_options(ctx, container)?,
                    items,
                })
            })
            .collect()
    }
}

impl Renderer for Json {
    fn render(
        &self,
        container: &ItemContainer,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
    ) -> Result<RenderOutput, NavigationError> {
        let items = Self::items(container, ctx, options)?;
        if options.as_tree {
            Ok(RenderOutput::Tree(serde_json::to_value(items)?))
        } else {
            Ok(RenderOutput::Markup(serde_json::to_string(&items)?))
        }
    }
}
