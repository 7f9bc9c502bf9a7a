//! Navigation configuration.
//!
//! A [`Configuration`] holds rendering defaults, generators, the renderer
//! registry and the primary navigation tree. It is an ordinary value: build
//! it once, share it (it is `Send + Sync`), and create a
//! [`RequestContext`] from it for every request.
//!
//! # Example
//!
//! ```
//! use navtree::{Configuration, ItemOptions, RenderLevel, StaticAdapter};
//!
//! let mut config = Configuration::default();
//! config.set_selected_class("active");
//! config.build(|primary| {
//!     primary.item_with("users", "Users", "/users", ItemOptions::new(), |sub| {
//!         sub.item("new", "New user", "/users/new", ItemOptions::new())
//!     })
//! })?;
//!
//! let adapter = StaticAdapter::new("/users/new");
//! let ctx = config.request(&adapter);
//! assert_eq!(config.active_navigation_item_key(&ctx, RenderLevel::All)?, Some("new"));
//! assert_eq!(config.active_navigation_item_name(&ctx, RenderLevel::Exact(1))?, "Users");
//! # Ok::<(), navtree::NavigationError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::container::ItemContainer;
use crate::context::{Adapter, RequestContext};
use crate::error::NavigationError;
use crate::item::{Item, SubNavigationBuilder};
use crate::record::ItemProvider;
use crate::renderer::{
    RenderLevel, RenderOptions, RenderOutput, Renderer, RendererKind, RendererRef, RendererRegistry,
};

/// Maps an item key to the autogenerated element id.
pub type IdGenerator = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Maps an item label to its displayed name.
pub type NameGenerator = Arc<dyn Fn(&str, &Item) -> String + Send + Sync>;

/// Default class for selected items.
pub const DEFAULT_SELECTED_CLASS: &str = "selected";

/// Default class for the selected leaf item.
pub const DEFAULT_ACTIVE_LEAF_CLASS: &str = "simple-navigation-active-leaf";

/// Rendering defaults and the primary navigation tree.
pub struct Configuration {
    renderer: RendererRef,
    selected_class: String,
    active_leaf_class: String,
    autogenerate_item_ids: bool,
    id_generator: IdGenerator,
    name_generator: NameGenerator,
    auto_highlight: bool,
    highlight_on_subpath: bool,
    ignore_query_params_on_auto_highlight: bool,
    ignore_anchors_on_auto_highlight: bool,
    consider_item_names_as_safe: bool,
    renderers: RendererRegistry,
    primary_navigation: Option<ItemContainer>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            renderer: RendererRef::Builtin(RendererKind::List),
            selected_class: DEFAULT_SELECTED_CLASS.to_owned(),
            active_leaf_class: DEFAULT_ACTIVE_LEAF_CLASS.to_owned(),
            autogenerate_item_ids: true,
            id_generator: Arc::new(str::to_owned),
            name_generator: Arc::new(|name: &str, _item: &Item| name.to_owned()),
            auto_highlight: true,
            highlight_on_subpath: false,
            ignore_query_params_on_auto_highlight: true,
            ignore_anchors_on_auto_highlight: true,
            consider_item_names_as_safe: false,
            renderers: RendererRegistry::default(),
            primary_navigation: None,
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("renderer", &self.renderer)
            .field("selected_class", &self.selected_class)
            .field("active_leaf_class", &self.active_leaf_class)
            .field("autogenerate_item_ids", &self.autogenerate_item_ids)
            .field("auto_highlight", &self.auto_highlight)
            .field("highlight_on_subpath", &self.highlight_on_subpath)
            .field(
                "ignore_query_params_on_auto_highlight",
                &self.ignore_query_params_on_auto_highlight,
            )
            .field(
                "ignore_anchors_on_auto_highlight",
                &self.ignore_anchors_on_auto_highlight,
            )
            .field("consider_item_names_as_safe", &self.consider_item_names_as_safe)
            .field("renderers", &self.renderers)
            .field("primary_navigation", &self.primary_navigation)
            .finish_non_exhaustive()
    }
}

impl Configuration {
    /// Apply `f` to this configuration.
    pub fn run<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        f(self)
    }

    /// Replace the primary navigation.
    ///
    /// Exactly one of `provider` and `builder` must be given. The new root is
    /// a fresh level-1 container; on error the previous tree is kept.
    pub fn items(
        &mut self,
        provider: Option<&dyn ItemProvider>,
        builder: Option<SubNavigationBuilder<'_>>,
    ) -> Result<(), NavigationError> {
        let mut root = ItemContainer::new(1);
        match (provider, builder) {
            (Some(provider), None) => root.adapt(&provider.item_definitions())?,
            (None, Some(builder)) => builder(&mut root)?,
            _ => return Err(NavigationError::AmbiguousItemsSource),
        }
        tracing::debug!(items = root.len(), "Primary navigation loaded");
        self.primary_navigation = Some(root);
        Ok(())
    }

    /// Build the primary navigation with a closure.
    pub fn build<F>(&mut self, builder: F) -> Result<(), NavigationError>
    where
        F: FnOnce(&mut ItemContainer) -> Result<(), NavigationError>,
    {
        self.items(None, Some(Box::new(builder)))
    }

    /// Load the primary navigation from external definitions.
    pub fn load_items(&mut self, provider: &dyn ItemProvider) -> Result<(), NavigationError> {
        self.items(Some(provider), None)
    }

    /// Whether the primary navigation is set.
    #[must_use]
    pub fn loaded(&self) -> bool {
        self.primary_navigation.is_some()
    }

    /// Root container.
    #[must_use]
    pub fn primary_navigation(&self) -> Option<&ItemContainer> {
        self.primary_navigation.as_ref()
    }

    /// Mutable root container.
    pub fn primary_navigation_mut(&mut self) -> Option<&mut ItemContainer> {
        self.primary_navigation.as_mut()
    }

    /// Context for one request.
    #[must_use]
    pub fn request<'a>(&'a self, adapter: &'a dyn Adapter) -> RequestContext<'a> {
        RequestContext::new(self, adapter)
    }

    /// Container addressed by `level`.
    ///
    /// `All` is the root, `Exact(n)` the active container at level `n` and
    /// `Range(a, b)` the active container at level `a`. `None` when no
    /// container is active at that level.
    pub fn active_navigation_item_container(
        &self,
        ctx: &RequestContext<'_>,
        level: RenderLevel,
    ) -> Result<Option<&ItemContainer>, NavigationError> {
        level.validate()?;
        let primary = self
            .primary_navigation
            .as_ref()
            .ok_or(NavigationError::MissingNavigationTree)?;
        match level {
            RenderLevel::All => Ok(Some(primary)),
            RenderLevel::Exact(level) | RenderLevel::Range(level, _) => {
                primary.active_item_container_for(ctx, level)
            }
        }
    }

    /// Render the container addressed by `options.level`.
    ///
    /// Renders nothing when no container is active at that level.
    pub fn render_navigation(
        &self,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
    ) -> Result<RenderOutput, NavigationError> {
        match self.active_navigation_item_container(ctx, options.level)? {
            Some(container) => container.render(ctx, options),
            None => Ok(RenderOutput::empty()),
        }
    }

    /// Render with the breadcrumbs renderer.
    pub fn render_breadcrumbs(
        &self,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
    ) -> Result<RenderOutput, NavigationError> {
        let options = options.clone().with_renderer(RendererKind::Breadcrumbs);
        self.render_navigation(ctx, &options)
    }

    /// Selected item at `level`; `All` means the deepest selected item.
    pub fn active_navigation_item(
        &self,
        ctx: &RequestContext<'_>,
        level: RenderLevel,
    ) -> Result<Option<&Item>, NavigationError> {
        let container = if level == RenderLevel::All {
            let primary = self
                .primary_navigation
                .as_ref()
                .ok_or(NavigationError::MissingNavigationTree)?;
            Some(primary.active_leaf_container(ctx)?)
        } else {
            self.active_navigation_item_container(ctx, level)?
        };
        match container {
            Some(container) => container.selected_item(ctx),
            None => Ok(None),
        }
    }

    /// Undecorated name of the active item, or an empty string.
    pub fn active_navigation_item_name(
        &self,
        ctx: &RequestContext<'_>,
        level: RenderLevel,
    ) -> Result<String, NavigationError> {
        Ok(self
            .active_navigation_item(ctx, level)?
            .map(|item| item.name(ctx, false))
            .unwrap_or_default())
    }

    /// Key of the active item.
    pub fn active_navigation_item_key(
        &self,
        ctx: &RequestContext<'_>,
        level: RenderLevel,
    ) -> Result<Option<&str>, NavigationError> {
        Ok(self.active_navigation_item(ctx, level)?.map(Item::key))
    }

    /// Default renderer.
    #[must_use]
    pub fn renderer(&self) -> &RendererRef {
        &self.renderer
    }

    /// Set the default renderer.
    pub fn set_renderer(&mut self, renderer: impl Into<RendererRef>) {
        self.renderer = renderer.into();
    }

    /// Renderer registry.
    #[must_use]
    pub fn renderers(&self) -> &RendererRegistry {
        &self.renderers
    }

    /// Register a named renderer.
    pub fn register_renderer(&mut self, name: impl Into<String>, renderer: Arc<dyn Renderer>) {
        self.renderers.register(name, renderer);
    }

    #[must_use]
    pub fn selected_class(&self) -> &str {
        &self.selected_class
    }

    pub fn set_selected_class(&mut self, class: impl Into<String>) {
        self.selected_class = class.into();
    }

    #[must_use]
    pub fn active_leaf_class(&self) -> &str {
        &self.active_leaf_class
    }

    pub fn set_active_leaf_class(&mut self, class: impl Into<String>) {
        self.active_leaf_class = class.into();
    }

    #[must_use]
    pub fn autogenerate_item_ids(&self) -> bool {
        self.autogenerate_item_ids
    }

    pub fn set_autogenerate_item_ids(&mut self, enabled: bool) {
        self.autogenerate_item_ids = enabled;
    }

    /// Element id for an item key.
    #[must_use]
    pub fn generate_id(&self, key: &str) -> String {
        (self.id_generator)(key)
    }

    pub fn set_id_generator<F>(&mut self, generator: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.id_generator = Arc::new(generator);
    }

    /// Displayed name for an item label.
    #[must_use]
    pub fn generate_name(&self, name: &str, item: &Item) -> String {
        (self.name_generator)(name, item)
    }

    pub fn set_name_generator<F>(&mut self, generator: F)
    where
        F: Fn(&str, &Item) -> String + Send + Sync + 'static,
    {
        self.name_generator = Arc::new(generator);
    }

    #[must_use]
    pub fn auto_highlight(&self) -> bool {
        self.auto_highlight
    }

    pub fn set_auto_highlight(&mut self, enabled: bool) {
        self.auto_highlight = enabled;
    }

    #[must_use]
    pub fn highlight_on_subpath(&self) -> bool {
        self.highlight_on_subpath
    }

    pub fn set_highlight_on_subpath(&mut self, enabled: bool) {
        self.highlight_on_subpath = enabled;
    }

    #[must_use]
    pub fn ignore_query_params_on_auto_highlight(&self) -> bool {
        self.ignore_query_params_on_auto_highlight
    }

    pub fn set_ignore_query_params_on_auto_highlight(&mut self, enabled: bool) {
        self.ignore_query_params_on_auto_highlight = enabled;
    }

    #[must_use]
    pub fn ignore_anchors_on_auto_highlight(&self) -> bool {
        self.ignore_anchors_on_auto_highlight
    }

    pub fn set_ignore_anchors_on_auto_highlight(&mut self, enabled: bool) {
        self.ignore_anchors_on_auto_highlight = enabled;
    }

    /// Whether item names are trusted HTML.
    #[must_use]
    pub fn consider_item_names_as_safe(&self) -> bool {
        self.consider_item_names_as_safe
    }

    pub fn set_consider_item_names_as_safe(&mut self, enabled: bool) {
        self.consider_item_names_as_safe = enabled;
    }
}
