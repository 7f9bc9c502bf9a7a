use crate::container::ItemContainer;
use crate::context::RequestContext;
use crate::error::NavigationError;

use super::{RenderOptions, RenderOutput, Renderer, link_options, tag_for};

/// Nested list, one `<li>` per item.
///
/// Sub-navigations are rendered inside the owning `<li>` when they are
/// included for the request.
#[derive(Clone, Copy, Debug, Default)]
pub struct List;

impl Renderer for List {
    fn render(
        &self,
        container: &ItemContainer,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
    ) -> Result<RenderOutput, NavigationError> {
        if options.skip_if_empty && container.is_empty() {
            return Ok(RenderOutput::empty());
        }

        let adapter = ctx.adapter();
        let mut content = String::new();
        for item in container.items() {
            let mut li = tag_for(ctx, item, link_options(ctx, item, container)?, false);
            if options.include_sub_navigation(ctx, item, container)?
                && let Some(sub) = item.sub_navigation()
            {
                li.push_str(&sub.render(ctx, options)?.into_string()?);
            }
            content.push_str(&adapter.content_tag("li", &li, &item.html_options(ctx, container)?));
        }

        let tag = if options.ordered { "ol" } else { "ul" };
        Ok(RenderOutput::Markup(adapter.content_tag(
            tag,
            &content,
            &container.dom_attributes(),
        )))
    }
}
