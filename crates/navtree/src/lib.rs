//! Hierarchical navigation menus for server-rendered web applications.
//!
//! This crate provides:
//! - [`Configuration`]: rendering defaults and the primary navigation tree
//! - [`ItemContainer`] / [`Item`]: the navigation tree and its selection rules
//! - [`RequestContext`]: per-request state reached through an [`Adapter`]
//! - [`Renderer`]: list, links, breadcrumbs, text, title and JSON output
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), navtree::NavigationError> {
//! use navtree::{Configuration, HighlightRule, ItemOptions, RenderOptions, StaticAdapter};
//!
//! let mut config = Configuration::default();
//! config.build(|primary| {
//!     primary.item("home", "Home", "/", ItemOptions::new())?;
//!     primary.item_with(
//!         "docs",
//!         "Docs",
//!         "/docs",
//!         ItemOptions::new().highlights_on(HighlightRule::Subpath),
//!         |sub| sub.item("guide", "Guide", "/docs/guide", ItemOptions::new()),
//!     )
//! })?;
//!
//! // Evaluate against the current request
//! let adapter = StaticAdapter::new("/docs/guide");
//! let ctx = config.request(&adapter);
//!
//! let menu = config.render_navigation(&ctx, &RenderOptions::default())?;
//! assert!(menu.to_string().contains(r#"<li id="guide" class="selected simple-navigation-active-leaf">"#));
//!
//! let crumbs = config.render_breadcrumbs(&ctx, &RenderOptions::default())?;
//! assert_eq!(
//!     crumbs.to_string(),
//!     r#"<div><a href="/docs">Docs</a> <a href="/docs/guide">Guide</a></div>"#
//! );
//! # Ok(())
//! # }
//! ```

mod config;
mod container;
mod context;
mod error;
mod html;
mod item;
mod record;
pub mod renderer;

pub use config::{
    Configuration, DEFAULT_ACTIVE_LEAF_CLASS, DEFAULT_SELECTED_CLASS, IdGenerator, NameGenerator,
};
pub use container::ItemContainer;
pub use context::{Adapter, RequestContext, StaticAdapter};
pub use error::NavigationError;
pub use html::escape_html;
pub use item::{
    Attributes, Condition, HighlightRule, Item, ItemOptions, Predicate, SubNavigationBuilder,
    UrlSource,
};
pub use record::{ItemDefinition, ItemProvider, ItemRecord};
pub use renderer::{
    RenderLevel, RenderOptions, RenderOutput, Renderer, RendererKind, RendererRef,
    RendererRegistry,
};
