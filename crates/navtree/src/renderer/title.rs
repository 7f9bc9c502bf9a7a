use crate::container::ItemContainer;
use crate::context::RequestContext;
use crate::error::NavigationError;

use super::text::selected_names;
use super::{RenderOptions, RenderOutput, Renderer};

/// Page title: the site name followed by the generated names along the
/// selected path, joined with ` | ` by default.
#[derive(Clone, Copy, Debug, Default)]
pub struct Title;

impl Renderer for Title {
    fn render(
        &self,
        container: &ItemContainer,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
    ) -> Result<RenderOutput, NavigationError> {
        let mut parts: Vec<String> = options.site_name.iter().cloned().collect();
        selected_names(container, ctx, options, true, &mut parts)?;
        Ok(RenderOutput::Markup(
            parts.join(options.join_with.as_deref().unwrap_or(" | ")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StaticAdapter;
    use crate::renderer::RendererKind;
    use crate::renderer::test_support::configured;

    #[test]
    fn test_site_name_prefix() {
        let config = configured();
        let adapter = StaticAdapter::new("/users/new");
        let ctx = config.request(&adapter);
        let options = RenderOptions {
            site_name: Some("Acme".to_owned()),
            ..Default::default()
        }
        .with_renderer(RendererKind::Title);

        let title = config.render_navigation(&ctx, &options).unwrap().to_string();

        assert_eq!(title, "Acme | Users | New user");
    }

    #[test]
    fn test_applies_name_generator() {
        let mut config = configured();
        config.set_name_generator(|name, item| format!("{name} ({})", item.key()));
        let adapter = StaticAdapter::new("/about");
        let ctx = config.request(&adapter);
        let options = RenderOptions::default().with_renderer(RendererKind::Title);

        let title = config.render_navigation(&ctx, &options).unwrap().to_string();

        assert_eq!(title, "About (about)");
    }

    #[test]
    fn test_only_site_name_when_nothing_selected() {
        let config = configured();
        let adapter = StaticAdapter::new("/nowhere");
        let ctx = config.request(&adapter);
        let options = RenderOptions {
            site_name: Some("Acme".to_owned()),
            ..Default::default()
        }
        .with_renderer(RendererKind::Title);

        let title = config.render_navigation(&ctx, &options).unwrap().to_string();

        assert_eq!(title, "Acme");
    }
}
