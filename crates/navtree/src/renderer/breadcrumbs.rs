use crate::container::ItemContainer;
use crate::context::RequestContext;
use crate::error::NavigationError;
use crate::item::{Attributes, Item};

use super::{RenderOptions, RenderOutput, Renderer, link_options, tag_for};

/// Links along the selected path, root first.
///
/// Links carry the item's link and declared attributes. Classes and ids are
/// stripped unless `allow_classes_and_ids` is set, in which case link ids
/// are prefixed with `breadcrumb_`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Breadcrumbs;

impl Breadcrumbs {
    fn collect(
        container: &ItemContainer,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
        out: &mut Vec<String>,
    ) -> Result<(), NavigationError> {
        for item in container.items() {
            if !item.selected(ctx, container)? {
                continue;
            }
            let attributes = Self::link_attributes(ctx, item, container, options)?;
            let as_span = options.static_leaf && item.active_leaf_class(ctx, container)?.is_some();
            out.push(tag_for(ctx, item, attributes, as_span));

            if options.include_sub_navigation(ctx, item, container)?
                && let Some(sub) = item.sub_navigation()
            {
                Self::collect(sub, ctx, options, out)?;
            }
        }
        Ok(())
    }

    fn link_attributes(
        ctx: &RequestContext<'_>,
        item: &Item,
        parent: &ItemContainer,
        options: &RenderOptions,
    ) -> Result<Attributes, NavigationError> {
        if options.allow_classes_and_ids {
            let mut attributes = link_options(ctx, item, parent)?;
            if let Some(id) = attributes.get_mut("id") {
                *id = format!("breadcrumb_{id}");
            }
            return Ok(attributes);
        }

        let mut attributes = link_options(ctx, item, parent)?;
        for (name, value) in item.html_attributes() {
            if !attributes.contains_key(name) {
                attributes.insert(name.clone(), value.clone());
            }
        }
        attributes.shift_remove("class");
        attributes.shift_remove("id");
        Ok(attributes)
    }
}

impl Renderer for Breadcrumbs {
    fn render(
        &self,
        container: &ItemContainer,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
    ) -> Result<RenderOutput, NavigationError> {
        let mut crumbs = Vec::new();
        Self::collect(container, ctx, options, &mut crumbs)?;

        let mut content = crumbs.join(options.join_with.as_deref().unwrap_or(" "));
        if !content.is_empty()
            && let Some(prefix) = &options.prefix
        {
            content.insert_str(0, prefix);
        }

        Ok(RenderOutput::Markup(ctx.adapter().content_tag(
            "div",
            &content,
            &container.dom_attributes(),
        )))
    }
}
