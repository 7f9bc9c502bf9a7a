use crate::container::ItemContainer;
use crate::context::RequestContext;
use crate::error::NavigationError;

use super::{RenderOptions, RenderOutput, Renderer};

/// Plain names along the selected path, without the name generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Text;

/// Names of the selected items, root first.
pub(super) fn selected_names(
    container: &ItemContainer,
    ctx: &RequestContext<'_>,
    options: &RenderOptions,
    apply_generator: bool,
    out: &mut Vec<String>,
) -> Result<(), NavigationError> {
    for item in container.items() {
        if !item.selected(ctx, container)? {
            continue;
        }
        out.push(item.name(ctx, apply_generator));
        if options.include_sub_navigation(ctx, item, container)?
            && let Some(sub) = item.sub_navigation()
        {
            selected_names(sub, ctx, options, apply_generator, out)?;
        }
    }
    Ok(())
}

impl Renderer for Text {
    fn render(
        &self,
        container: &ItemContainer,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
    ) -> Result<RenderOutput, NavigationError> {
        let mut names = Vec::new();
        selected_names(container, ctx, options, false, &mut names)?;
        Ok(RenderOutput::Markup(
            names.join(options.join_with.as_deref().unwrap_or(" ")),
        ))
    }
}
