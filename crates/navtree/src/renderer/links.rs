use crate::container::ItemContainer;
use crate::context::RequestContext;
use crate::error::NavigationError;
use crate::item::Attributes;

use super::{RenderOptions, RenderOutput, Renderer, tag_for};

/// Flat `<div>` of links for a single level.
///
/// Sub-navigations are never rendered, so this is not suitable for
/// multi-level trees. Item attributes go on the links themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct Links;

impl Renderer for Links {
    fn render(
        &self,
        container: &ItemContainer,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
    ) -> Result<RenderOutput, NavigationError> {
        let tags = container
            .items()
            .iter()
            .map(|item| {
                let mut attributes = Attributes::new();
                if let Some(method) = item.method() {
                    attributes.insert("method".to_owned(), method.to_owned());
                }
                attributes.extend(item.html_options(ctx, container)?);
                Ok::<_, NavigationError>(tag_for(ctx, item, attributes, false))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let join_with = options.join_with.as_deref().unwrap_or("");
        Ok(RenderOutput::Markup(ctx.adapter().content_tag(
            "div",
            &tags.join(join_with),
            &container.dom_attributes(),
        )))
    }
}
