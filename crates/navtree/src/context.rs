//! Request context for selection and rendering.
//!
//! The host web framework is reached only through the [`Adapter`] trait.
//! A [`RequestContext`] bundles the adapter with the [`Configuration`] and
//! any explicitly forced selection for one request, and is passed to every
//! selection-evaluating call.
//!
//! # Example
//!
//! ```
//! use navtree::{Configuration, ItemOptions, StaticAdapter};
//!
//! let mut config = Configuration::default();
//! config.build(|primary| {
//!     primary.item("home", "Home", "/", ItemOptions::new())?;
//!     primary.item("docs", "Docs", "/docs", ItemOptions::new())
//! })?;
//!
//! let adapter = StaticAdapter::new("/docs?page=2");
//! let ctx = config.request(&adapter);
//! let nav = config.primary_navigation().unwrap();
//! assert_eq!(nav.selected_item(&ctx)?.map(|item| item.key()), Some("docs"));
//! # Ok::<(), navtree::NavigationError>(())
//! ```

use percent_encoding::percent_decode_str;

use crate::config::Configuration;
use crate::html::{escape_html, render_attributes};
use crate::item::Attributes;

/// Web-framework collaborator.
///
/// Provides the current request and markup primitives. Link names and tag
/// content are passed as HTML; attribute values are raw and must be escaped
/// by the implementation.
pub trait Adapter {
    /// Full request path including the query string.
    fn request_uri(&self) -> &str;
    /// Request path without the query string.
    fn request_path(&self) -> &str;
    /// Whether `url` points to the page being served.
    fn is_current_page(&self, url: &str) -> bool;
    /// Render a link element.
    fn link_to(&self, name: &str, url: &str, attributes: &Attributes) -> String;
    /// Render an element wrapping `content`.
    fn content_tag(&self, tag: &str, content: &str, attributes: &Attributes) -> String;
}

/// Self-contained [`Adapter`] built from a request URI.
///
/// Produces plain HTML5. Suitable for frameworks without their own link
/// helpers and for tests.
#[derive(Clone, Debug)]
pub struct StaticAdapter {
    uri: String,
    path: String,
    base_url: Option<String>,
}

impl StaticAdapter {
    /// Create an adapter for a request URI such as `/users?page=2`.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let path = strip_query(strip_anchor(&uri)).to_owned();
        Self {
            uri,
            path,
            base_url: None,
        }
    }

    /// Set `scheme://host[:port]` so absolute item URLs can match.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = Some(base_url.trim_end_matches('/').to_owned());
        self
    }
}

impl Adapter for StaticAdapter {
    fn request_uri(&self) -> &str {
        &self.uri
    }

    fn request_path(&self) -> &str {
        &self.path
    }

    fn is_current_page(&self, url: &str) -> bool {
        let url = percent_decode_str(url).decode_utf8_lossy();
        // Only compare against the query string when the url carries one
        let current = if url.contains('?') {
            &self.uri
        } else {
            &self.path
        };
        let current = percent_decode_str(current).decode_utf8_lossy();

        if has_scheme(&url) {
            self.base_url
                .as_ref()
                .is_some_and(|base| *url == format!("{base}{current}"))
        } else {
            url == current
        }
    }

    fn link_to(&self, name: &str, url: &str, attributes: &Attributes) -> String {
        format!(
            r#"<a href="{}"{}>{name}</a>"#,
            escape_html(url),
            render_attributes(attributes)
        )
    }

    fn content_tag(&self, tag: &str, content: &str, attributes: &Attributes) -> String {
        format!("<{tag}{}>{content}</{tag}>", render_attributes(attributes))
    }
}

/// Per-request evaluation context.
///
/// Holds the configuration, the framework adapter and explicitly forced
/// selections as `(level, key)` pairs.
pub struct RequestContext<'a> {
    config: &'a Configuration,
    adapter: &'a dyn Adapter,
    explicit: Vec<(u32, String)>,
}

impl<'a> RequestContext<'a> {
    /// Create a context without explicit selections.
    #[must_use]
    pub fn new(config: &'a Configuration, adapter: &'a dyn Adapter) -> Self {
        Self {
            config,
            adapter,
            explicit: Vec::new(),
        }
    }

    /// Force the item with `key` to be selected.
    ///
    /// The level is resolved by searching the primary navigation. Unknown
    /// keys are ignored with a warning.
    #[must_use]
    pub fn with_current_navigation(self, key: &str) -> Self {
        let level = self
            .config
            .primary_navigation()
            .and_then(|nav| nav.level_for_item(key));
        match level {
            Some(level) => self.with_current_navigation_at(level, key),
            None => {
                tracing::warn!(key, "Explicit navigation key not found in navigation tree");
                self
            }
        }
    }

    /// Force the item with `key` at `level` to be selected.
    #[must_use]
    pub fn with_current_navigation_at(mut self, level: u32, key: &str) -> Self {
        tracing::debug!(level, key, "Explicit navigation selected");
        self.explicit.retain(|(l, _)| *l != level);
        self.explicit.push((level, key.to_owned()));
        self
    }

    /// Configuration in effect for this request.
    #[must_use]
    pub fn config(&self) -> &'a Configuration {
        self.config
    }

    /// Framework adapter for this request.
    #[must_use]
    pub fn adapter(&self) -> &'a dyn Adapter {
        self.adapter
    }

    /// Full request path including the query string.
    #[must_use]
    pub fn request_uri(&self) -> &'a str {
        self.adapter.request_uri()
    }

    /// Request path without the query string.
    #[must_use]
    pub fn request_path(&self) -> &'a str {
        self.adapter.request_path()
    }

    /// Explicitly selected key for a level, if any.
    #[must_use]
    pub fn explicit_key_for(&self, level: u32) -> Option<&str> {
        self.explicit
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, key)| key.as_str())
    }

    /// Whether the item `key` at `level` was explicitly selected.
    #[must_use]
    pub fn is_explicitly_selected(&self, level: u32, key: &str) -> bool {
        self.explicit_key_for(level) == Some(key)
    }
}

/// Drop a `#fragment` suffix.
pub(crate) fn strip_anchor(url: &str) -> &str {
    url.split_once('#').map_or(url, |(head, _)| head)
}

/// Drop a `?query` suffix.
pub(crate) fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(head, _)| head)
}

/// Whether `url` starts with `scheme://`.
fn has_scheme(url: &str) -> bool {
    url.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}
