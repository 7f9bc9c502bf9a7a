//! Item containers.
//!
//! An [`ItemContainer`] is the ordered list of sibling items at one level
//! of the navigation tree. It resolves selection among its items, descends
//! into selected sub-navigations and dispatches rendering.
//!
//! # Example
//!
//! ```
//! use navtree::{ItemContainer, ItemOptions};
//!
//! let mut primary = ItemContainer::new(1);
//! primary.item("home", "Home", "/", ItemOptions::new())?;
//! primary.item_with("users", "Users", "/users", ItemOptions::new(), |sub| {
//!     sub.item("new", "New user", "/users/new", ItemOptions::new())
//! })?;
//!
//! assert_eq!(primary.level_for_item("new"), Some(2));
//! assert_eq!(primary.level_for_item("missing"), None);
//! # Ok::<(), navtree::NavigationError>(())
//! ```

use crate::context::RequestContext;
use crate::error::NavigationError;
use crate::item::{Attributes, Item, ItemOptions, SubNavigationBuilder, UrlSource};
use crate::record::ItemDefinition;
use crate::renderer::{RenderOptions, RenderOutput, RendererRef};

/// Ordered sibling items at one tree level.
#[derive(Debug)]
pub struct ItemContainer {
    level: u32,
    items: Vec<Item>,
    renderer: Option<RendererRef>,
    dom_id: Option<String>,
    dom_class: Option<String>,
    dom_attributes: Attributes,
    selected_class: Option<String>,
    auto_highlight: bool,
}

impl Default for ItemContainer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ItemContainer {
    /// Create an empty container at `level` (root is 1).
    #[must_use]
    pub fn new(level: u32) -> Self {
        Self {
            level,
            items: Vec::new(),
            renderer: None,
            dom_id: None,
            dom_class: None,
            dom_attributes: Attributes::new(),
            selected_class: None,
            auto_highlight: true,
        }
    }

    /// Add an item unless its `if` / `unless` options reject it.
    pub fn item(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<UrlSource>,
        options: ItemOptions,
    ) -> Result<(), NavigationError> {
        self.add_item(key, name, url, options, None)
    }

    /// Add an item whose sub-navigation is populated by `builder`.
    ///
    /// Nothing is built, and `builder` is not called, when the item's
    /// conditions reject it.
    pub fn item_with<F>(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<UrlSource>,
        options: ItemOptions,
        builder: F,
    ) -> Result<(), NavigationError>
    where
        F: FnOnce(&mut ItemContainer) -> Result<(), NavigationError>,
    {
        self.add_item(key, name, url, options, Some(Box::new(builder)))
    }

    fn add_item(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<UrlSource>,
        options: ItemOptions,
        builder: Option<SubNavigationBuilder<'_>>,
    ) -> Result<(), NavigationError> {
        if !options.passes_conditions() {
            return Ok(());
        }
        let item = Item::new(self.level, key, name, url, options, None, builder)?;
        self.push(item);
        Ok(())
    }

    /// Replace the items with adapted external definitions.
    ///
    /// Each definition's conditions are checked the same way as in
    /// [`ItemContainer::item`].
    pub fn set_items<D: ItemDefinition>(&mut self, items: &[D]) -> Result<(), NavigationError> {
        let definitions: Vec<&dyn ItemDefinition> =
            items.iter().map(|item| item as &dyn ItemDefinition).collect();
        self.items.clear();
        self.adapt(&definitions)
    }

    /// Append adapted definitions.
    pub(crate) fn adapt(&mut self, definitions: &[&dyn ItemDefinition]) -> Result<(), NavigationError> {
        for definition in definitions {
            let options = definition.options()?;
            if !options.passes_conditions() {
                continue;
            }
            let item = Item::new(
                self.level,
                definition.key(),
                definition.name(),
                definition.url(),
                options,
                definition.items(),
                None,
            )?;
            self.push(item);
        }
        Ok(())
    }

    fn push(&mut self, item: Item) {
        if self.lookup(item.key()).is_some() {
            tracing::warn!(
                key = item.key(),
                level = self.level,
                "Duplicate navigation key, lookups return the first item"
            );
        }
        self.items.push(item);
    }

    /// Container level.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Items in render order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the container has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item with `key`.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Level of the container holding `key`, searching depth-first.
    #[must_use]
    pub fn level_for_item(&self, key: &str) -> Option<u32> {
        if self.lookup(key).is_some() {
            return Some(self.level);
        }
        self.items
            .iter()
            .filter_map(Item::sub_navigation)
            .find_map(|sub| sub.level_for_item(key))
    }

    /// Whether any direct item is selected.
    pub fn selected(&self, ctx: &RequestContext<'_>) -> Result<bool, NavigationError> {
        for item in &self.items {
            if item.selected(ctx, self)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Selected item at this level.
    ///
    /// An explicit selection for this level takes precedence; otherwise the
    /// first selected item in declaration order.
    pub fn selected_item(&self, ctx: &RequestContext<'_>) -> Result<Option<&Item>, NavigationError> {
        if let Some(key) = ctx.explicit_key_for(self.level)
            && let Some(item) = self.lookup(key)
        {
            return Ok(Some(item));
        }
        for item in &self.items {
            if item.selected(ctx, self)? {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    /// Sub-navigation of the selected item, if there is one.
    fn selected_sub_navigation(
        &self,
        ctx: &RequestContext<'_>,
    ) -> Result<Option<&ItemContainer>, NavigationError> {
        Ok(self
            .selected_item(ctx)?
            .and_then(Item::sub_navigation))
    }

    /// Active container at `desired_level`, descending through selections.
    pub fn active_item_container_for(
        &self,
        ctx: &RequestContext<'_>,
        desired_level: u32,
    ) -> Result<Option<&ItemContainer>, NavigationError> {
        if self.level == desired_level {
            return Ok(Some(self));
        }
        match self.selected_sub_navigation(ctx)? {
            Some(sub) => sub.active_item_container_for(ctx, desired_level),
            None => Ok(None),
        }
    }

    /// Deepest container reachable through selected items.
    pub fn active_leaf_container(
        &self,
        ctx: &RequestContext<'_>,
    ) -> Result<&ItemContainer, NavigationError> {
        match self.selected_sub_navigation(ctx)? {
            Some(sub) => sub.active_leaf_container(ctx),
            None => Ok(self),
        }
    }

    /// Render with the renderer chosen by `options`, this container or the
    /// configuration, in that order.
    pub fn render(
        &self,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
    ) -> Result<RenderOutput, NavigationError> {
        options.level.validate()?;
        let reference = options
            .renderer
            .as_ref()
            .or(self.renderer.as_ref())
            .unwrap_or_else(|| ctx.config().renderer());
        let renderer = ctx.config().renderers().resolve(reference)?;
        tracing::debug!(level = self.level, renderer = ?reference, "Rendering navigation");
        renderer.render(self, ctx, options)
    }

    /// Attributes for the container element: `dom_attributes` plus id and class.
    #[must_use]
    pub fn dom_attributes(&self) -> Attributes {
        let mut attributes = self.dom_attributes.clone();
        if let Some(id) = &self.dom_id {
            attributes.insert("id".to_owned(), id.clone());
        }
        if let Some(class) = &self.dom_class {
            attributes.insert("class".to_owned(), class.clone());
        }
        attributes
    }

    /// Container element id.
    #[must_use]
    pub fn dom_id(&self) -> Option<&str> {
        self.dom_id.as_deref()
    }

    /// Set the container element id.
    pub fn set_dom_id(&mut self, id: impl Into<String>) {
        self.dom_id = Some(id.into());
    }

    /// Container element class.
    #[must_use]
    pub fn dom_class(&self) -> Option<&str> {
        self.dom_class.as_deref()
    }

    /// Set the container element class.
    pub fn set_dom_class(&mut self, class: impl Into<String>) {
        self.dom_class = Some(class.into());
    }

    /// Replace extra container attributes.
    pub fn set_dom_attributes(&mut self, attributes: Attributes) {
        self.dom_attributes = attributes;
    }

    /// Selected class override for this level.
    #[must_use]
    pub fn selected_class(&self) -> Option<&str> {
        self.selected_class.as_deref()
    }

    /// Override the selected class for this level.
    pub fn set_selected_class(&mut self, class: impl Into<String>) {
        self.selected_class = Some(class.into());
    }

    /// Whether auto-highlight is enabled at this level.
    #[must_use]
    pub fn auto_highlight(&self) -> bool {
        self.auto_highlight
    }

    /// Enable or disable auto-highlight at this level.
    pub fn set_auto_highlight(&mut self, enabled: bool) {
        self.auto_highlight = enabled;
    }

    /// Renderer override for this container.
    #[must_use]
    pub fn renderer(&self) -> Option<&RendererRef> {
        self.renderer.as_ref()
    }

    /// Override the renderer for this container.
    pub fn set_renderer(&mut self, renderer: impl Into<RendererRef>) {
        self.renderer = Some(renderer.into());
    }
}
