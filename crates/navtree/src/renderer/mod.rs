//! Renderer family.
//!
//! A [`Renderer`] walks an [`ItemContainer`] for one request and produces a
//! [`RenderOutput`]. Built-in strategies are listed in [`RendererKind`];
//! custom strategies are registered by name in a [`RendererRegistry`] or
//! attached directly as [`RendererRef::Custom`].
//!
//! # Example
//!
//! ```
//! use navtree::{Configuration, ItemOptions, RenderOptions, RendererKind, StaticAdapter};
//!
//! let mut config = Configuration::default();
//! config.build(|primary| {
//!     primary.item("home", "Home", "/", ItemOptions::new())?;
//!     primary.item("docs", "Docs", "/docs", ItemOptions::new())
//! })?;
//!
//! let adapter = StaticAdapter::new("/docs");
//! let ctx = config.request(&adapter);
//! let options = RenderOptions::default().with_renderer(RendererKind::Text);
//! assert_eq!(config.render_navigation(&ctx, &options)?.to_string(), "Docs");
//! # Ok::<(), navtree::NavigationError>(())
//! ```

mod breadcrumbs;
mod json;
mod links;
mod list;
mod options;
mod text;
mod title;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

pub use breadcrumbs::Breadcrumbs;
pub use json::Json;
pub use links::Links;
pub use list::List;
pub use options::{RenderLevel, RenderOptions};
pub use text::Text;
pub use title::Title;

use crate::container::ItemContainer;
use crate::context::RequestContext;
use crate::error::NavigationError;
use crate::html::escape_html;
use crate::item::{Attributes, Item, join_classes};

/// Rendering strategy.
pub trait Renderer: Send + Sync {
    /// Render `container` for the request in `ctx`.
    fn render(
        &self,
        container: &ItemContainer,
        ctx: &RequestContext<'_>,
        options: &RenderOptions,
    ) -> Result<RenderOutput, NavigationError>;
}

/// Result of a render.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutput {
    /// HTML or plain text.
    Markup(String),
    /// Structured tree (json renderer with `as_tree`).
    Tree(Value),
}

impl RenderOutput {
    pub(crate) fn empty() -> Self {
        Self::Markup(String::new())
    }

    /// Markup, if this is markup.
    #[must_use]
    pub fn as_markup(&self) -> Option<&str> {
        match self {
            Self::Markup(markup) => Some(markup),
            Self::Tree(_) => None,
        }
    }

    /// Tree, if this is a tree.
    #[must_use]
    pub fn as_tree(&self) -> Option<&Value> {
        match self {
            Self::Markup(_) => None,
            Self::Tree(tree) => Some(tree),
        }
    }

    /// Markup as is, or the tree serialized to JSON.
    pub fn into_string(self) -> Result<String, NavigationError> {
        match self {
            Self::Markup(markup) => Ok(markup),
            Self::Tree(tree) => Ok(serde_json::to_string(&tree)?),
        }
    }
}

impl fmt::Display for RenderOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markup(markup) => f.write_str(markup),
            Self::Tree(tree) => write!(f, "{tree}"),
        }
    }
}

/// Built-in renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RendererKind {
    /// Nested `<ul>` / `<ol>`.
    List,
    /// Flat `<div>` of links.
    Links,
    /// Links along the selected path.
    Breadcrumbs,
    /// Names along the selected path.
    Text,
    /// Page title from the selected path.
    Title,
    /// JSON tree of every item.
    Json,
}

impl RendererKind {
    /// Every built-in renderer.
    pub const ALL: [Self; 6] = [
        Self::List,
        Self::Links,
        Self::Breadcrumbs,
        Self::Text,
        Self::Title,
        Self::Json,
    ];

    /// Registry name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Links => "links",
            Self::Breadcrumbs => "breadcrumbs",
            Self::Text => "text",
            Self::Title => "title",
            Self::Json => "json",
        }
    }

    /// Look up a built-in by registry name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Strategy instance.
    #[must_use]
    pub fn instance(self) -> Arc<dyn Renderer> {
        match self {
            Self::List => Arc::new(List),
            Self::Links => Arc::new(Links),
            Self::Breadcrumbs => Arc::new(Breadcrumbs),
            Self::Text => Arc::new(Text),
            Self::Title => Arc::new(Title),
            Self::Json => Arc::new(Json),
        }
    }
}

/// Reference to a renderer, resolved at render time.
#[derive(Clone)]
pub enum RendererRef {
    /// Built-in renderer.
    Builtin(RendererKind),
    /// Name looked up in the configuration's registry.
    Named(String),
    /// Renderer instance.
    Custom(Arc<dyn Renderer>),
}

impl Default for RendererRef {
    fn default() -> Self {
        Self::Builtin(RendererKind::List)
    }
}

impl fmt::Debug for RendererRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(kind) => f.debug_tuple("Builtin").field(kind).finish(),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<RendererKind> for RendererRef {
    fn from(kind: RendererKind) -> Self {
        Self::Builtin(kind)
    }
}

impl From<&str> for RendererRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for RendererRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Arc<dyn Renderer>> for RendererRef {
    fn from(renderer: Arc<dyn Renderer>) -> Self {
        Self::Custom(renderer)
    }
}

/// Name to renderer mapping.
#[derive(Clone)]
pub struct RendererRegistry {
    renderers: HashMap<String, Arc<dyn Renderer>>,
}

impl Default for RendererRegistry {
    /// Registry holding every built-in under its name.
    fn default() -> Self {
        let renderers = RendererKind::ALL
            .into_iter()
            .map(|kind| (kind.name().to_owned(), kind.instance()))
            .collect();
        Self { renderers }
    }
}

impl RendererRegistry {
    /// Register or replace a renderer.
    pub fn register(&mut self, name: impl Into<String>, renderer: Arc<dyn Renderer>) {
        let name = name.into();
        if self.renderers.insert(name.clone(), renderer).is_some() {
            tracing::debug!(name, "Replaced registered renderer");
        }
    }

    /// Renderer registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Renderer>> {
        self.renderers.get(name).cloned()
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.renderers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve a reference to an instance.
    ///
    /// Built-ins resolve through the registry so that re-registering their
    /// name replaces them.
    pub fn resolve(&self, reference: &RendererRef) -> Result<Arc<dyn Renderer>, NavigationError> {
        match reference {
            RendererRef::Builtin(kind) => Ok(self.get(kind.name()).unwrap_or_else(|| kind.instance())),
            RendererRef::Named(name) => self
                .get(name)
                .ok_or_else(|| NavigationError::UnknownRenderer(name.clone())),
            RendererRef::Custom(renderer) => Ok(Arc::clone(renderer)),
        }
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("renderers", &self.names())
            .finish()
    }
}

/// Item name as HTML.
pub(crate) fn item_name_html(ctx: &RequestContext<'_>, item: &Item) -> String {
    let name = item.name(ctx, true);
    if ctx.config().consider_item_names_as_safe() {
        name
    } else {
        escape_html(&name)
    }
}

/// Link attributes: method hint and selected class, merged with the item's
/// link attributes. Class lists are concatenated.
pub(crate) fn link_options(
    ctx: &RequestContext<'_>,
    item: &Item,
    parent: &ItemContainer,
) -> Result<Attributes, NavigationError> {
    let selected_class = item.selected_class(ctx, parent)?;
    let mut options = Attributes::new();
    if let Some(method) = item.method() {
        options.insert("method".to_owned(), method.to_owned());
    }
    if let Some(class) = &selected_class {
        options.insert("class".to_owned(), class.clone());
    }

    let link = item.link_attributes();
    if link.is_empty() {
        return Ok(options);
    }
    for (name, value) in link {
        if name != "class" {
            options.insert(name.clone(), value.clone());
        }
    }
    let classes = join_classes([link.get("class").cloned(), selected_class]);
    if classes.is_empty() {
        options.shift_remove("class");
    } else {
        options.insert("class".to_owned(), classes);
    }
    Ok(options)
}

/// Link for the item, or a span when it has no URL or `as_span` is set.
pub(crate) fn tag_for(
    ctx: &RequestContext<'_>,
    item: &Item,
    mut attributes: Attributes,
    as_span: bool,
) -> String {
    let name = item_name_html(ctx, item);
    match item.url() {
        Some(url) if !as_span => ctx.adapter().link_to(&name, url, &attributes),
        _ => {
            attributes.shift_remove("method");
            ctx.adapter().content_tag("span", &name, &attributes)
        }
    }
}
