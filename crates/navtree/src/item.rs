//! Navigation items.
//!
//! An [`Item`] is a single navigation entry. It is built once from an
//! [`ItemOptions`] set, owns its optional sub-navigation, and computes its
//! selection state and render attributes fresh for every
//! [`RequestContext`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};

use crate::container::ItemContainer;
use crate::context::{RequestContext, strip_anchor, strip_query};
use crate::error::NavigationError;
use crate::record::ItemDefinition;

/// Insertion-ordered rendering attributes.
pub type Attributes = IndexMap<String, String>;

/// Build-time visibility predicate for `if` / `unless`.
pub type Condition = Arc<dyn Fn() -> bool + Send + Sync>;

/// Selection predicate evaluated against a request.
pub type Predicate = Arc<dyn Fn(&RequestContext<'_>) -> bool + Send + Sync>;

/// Callback populating a sub-navigation.
pub type SubNavigationBuilder<'a> =
    Box<dyn FnOnce(&mut ItemContainer) -> Result<(), NavigationError> + 'a>;

/// Explicit selection rule overriding auto-highlight.
#[derive(Clone)]
pub enum HighlightRule {
    /// Match against the request URI, query string included.
    Pattern(Regex),
    /// Arbitrary predicate.
    Predicate(Predicate),
    /// Selected on the item URL and every path below it.
    Subpath,
    /// Unrecognized rule from an external record.
    Invalid(String),
}

impl HighlightRule {
    /// Wrap a closure as a [`HighlightRule::Predicate`].
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&RequestContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Parse a rule from a record value.
    ///
    /// Accepts `"subpath"` or `{ pattern = "..." }`. Anything else is kept as
    /// [`HighlightRule::Invalid`] and rejected when selection is evaluated.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) if s == "subpath" => Self::Subpath,
            Value::Object(map) => match map.get("pattern") {
                Some(Value::String(pattern)) => match Regex::new(pattern) {
                    Ok(re) => Self::Pattern(re),
                    Err(e) => Self::Invalid(format!("invalid pattern {pattern:?}: {e}")),
                },
                _ => Self::Invalid(value.to_string()),
            },
            _ => Self::Invalid(value.to_string()),
        }
    }
}

impl fmt::Debug for HighlightRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Subpath => f.write_str("Subpath"),
            Self::Invalid(raw) => f.debug_tuple("Invalid").field(raw).finish(),
        }
    }
}

impl From<Regex> for HighlightRule {
    fn from(re: Regex) -> Self {
        Self::Pattern(re)
    }
}

/// Item URL as supplied at construction.
///
/// Deferred URLs are evaluated exactly once, when the item is built.
pub enum UrlSource {
    /// No URL; the item renders as a plain label.
    Absent,
    /// Fixed URL.
    Static(String),
    /// URL produced on construction.
    Deferred(Box<dyn FnOnce() -> Option<String>>),
}

impl UrlSource {
    /// Defer URL generation until the item is constructed.
    pub fn deferred<F>(f: F) -> Self
    where
        F: FnOnce() -> Option<String> + 'static,
    {
        Self::Deferred(Box::new(f))
    }

    fn resolve(self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Static(url) => Some(url),
            Self::Deferred(f) => f(),
        }
    }
}

impl From<&str> for UrlSource {
    fn from(url: &str) -> Self {
        Self::Static(url.to_owned())
    }
}

impl From<String> for UrlSource {
    fn from(url: String) -> Self {
        Self::Static(url)
    }
}

impl From<Option<String>> for UrlSource {
    fn from(url: Option<String>) -> Self {
        url.map_or(Self::Absent, Self::Static)
    }
}

impl From<Option<&str>> for UrlSource {
    fn from(url: Option<&str>) -> Self {
        url.map_or(Self::Absent, |url| Self::Static(url.to_owned()))
    }
}

/// Options for a single item.
///
/// Recognized keys are kept apart from the generic attributes that end up
/// on the rendered element. Container options (`container_*`,
/// `selected_class`) apply to the item's sub-navigation.
#[derive(Clone, Default)]
pub struct ItemOptions {
    html: Attributes,
    link_html: Attributes,
    method: Option<String>,
    highlights_on: Option<HighlightRule>,
    container_class: Option<String>,
    container_id: Option<String>,
    container_attributes: Attributes,
    selected_class: Option<String>,
    if_condition: Option<Condition>,
    unless_condition: Option<Condition>,
}

impl ItemOptions {
    /// Empty option set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a rendering attribute on the item element.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.html.insert(name.into(), value.into());
        self
    }

    /// Set the `class` attribute.
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Set an attribute on the link element only.
    #[must_use]
    pub fn link_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.link_html.insert(name.into(), value.into());
        self
    }

    /// HTTP method hint for the link.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Explicit selection rule.
    #[must_use]
    pub fn highlights_on(mut self, rule: impl Into<HighlightRule>) -> Self {
        self.highlights_on = Some(rule.into());
        self
    }

    /// `class` of the sub-navigation container.
    #[must_use]
    pub fn container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = Some(class.into());
        self
    }

    /// `id` of the sub-navigation container.
    #[must_use]
    pub fn container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = Some(id.into());
        self
    }

    /// Extra attribute on the sub-navigation container.
    #[must_use]
    pub fn container_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.container_attributes.insert(name.into(), value.into());
        self
    }

    /// Selected class used by the sub-navigation container.
    #[must_use]
    pub fn selected_class(mut self, class: impl Into<String>) -> Self {
        self.selected_class = Some(class.into());
        self
    }

    /// Only add the item when `condition` returns true.
    #[must_use]
    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.if_condition = Some(Arc::new(condition));
        self
    }

    /// Skip the item when `condition` returns true.
    #[must_use]
    pub fn unless<F>(mut self, condition: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.unless_condition = Some(Arc::new(condition));
        self
    }

    /// Build options from an untyped record map.
    ///
    /// Records cannot carry predicates, so `if` and `unless` fail with
    /// [`NavigationError::InvalidConditionType`].
    pub fn from_map(key: &str, map: &Map<String, Value>) -> Result<Self, NavigationError> {
        let mut options = Self::new();
        for (name, value) in map {
            match name.as_str() {
                "if" | "unless" => {
                    return Err(NavigationError::InvalidConditionType {
                        key: key.to_owned(),
                        option: name.clone(),
                    });
                }
                "method" => options.method = Some(value_to_string(value)),
                "highlights_on" => options.highlights_on = Some(HighlightRule::from_value(value)),
                "container_class" => options.container_class = Some(value_to_string(value)),
                "container_id" => options.container_id = Some(value_to_string(value)),
                "selected_class" => options.selected_class = Some(value_to_string(value)),
                "container_attributes" => options.container_attributes = value_to_attributes(value),
                "link_html" | "link" => options.link_html = value_to_attributes(value),
                _ => {
                    options.html.insert(name.clone(), value_to_string(value));
                }
            }
        }
        Ok(options)
    }

    /// Evaluate `if` / `unless`. Both default to passing.
    pub(crate) fn passes_conditions(&self) -> bool {
        let if_ok = self.if_condition.as_ref().is_none_or(|f| f());
        let unless_ok = self.unless_condition.as_ref().is_none_or(|f| !f());
        if_ok && unless_ok
    }

    fn configure_container(&self, container: &mut ItemContainer) {
        if let Some(class) = &self.container_class {
            container.set_dom_class(class.clone());
        }
        if let Some(id) = &self.container_id {
            container.set_dom_id(id.clone());
        }
        if !self.container_attributes.is_empty() {
            container.set_dom_attributes(self.container_attributes.clone());
        }
        if let Some(class) = &self.selected_class {
            container.set_selected_class(class.clone());
        }
    }
}

impl fmt::Debug for ItemOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemOptions")
            .field("html", &self.html)
            .field("link_html", &self.link_html)
            .field("method", &self.method)
            .field("highlights_on", &self.highlights_on)
            .field("container_class", &self.container_class)
            .field("container_id", &self.container_id)
            .field("selected_class", &self.selected_class)
            .finish_non_exhaustive()
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_to_attributes(value: &Value) -> Attributes {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), value_to_string(v)))
            .collect(),
        _ => Attributes::new(),
    }
}

/// A single navigation entry.
#[derive(Debug)]
pub struct Item {
    key: String,
    name: String,
    url: Option<String>,
    level: u32,
    html_attributes: Attributes,
    link_attributes: Attributes,
    method: Option<String>,
    highlights_on: Option<HighlightRule>,
    sub_navigation: Option<ItemContainer>,
}

impl Item {
    /// Build an item for a container at `level`.
    ///
    /// The sub-navigation is populated from `builder` or, when no builder is
    /// given, from external `items`. If both are given the builder wins.
    /// `if` / `unless` options are not evaluated here; see
    /// [`ItemContainer::item`].
    pub fn new(
        level: u32,
        key: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<UrlSource>,
        options: ItemOptions,
        items: Option<Vec<&dyn ItemDefinition>>,
        builder: Option<SubNavigationBuilder<'_>>,
    ) -> Result<Self, NavigationError> {
        let key = key.into();

        let sub_navigation = match (builder, items) {
            (Some(builder), items) => {
                if items.is_some() {
                    tracing::debug!(key, "Builder and sub-items both given, using builder");
                }
                let mut sub = ItemContainer::new(level + 1);
                options.configure_container(&mut sub);
                builder(&mut sub)?;
                Some(sub)
            }
            (None, Some(items)) => {
                let mut sub = ItemContainer::new(level + 1);
                options.configure_container(&mut sub);
                sub.adapt(&items)?;
                Some(sub)
            }
            (None, None) => None,
        };

        Ok(Self {
            key,
            name: name.into(),
            url: url.into().resolve(),
            level,
            html_attributes: options.html,
            link_attributes: options.link_html,
            method: options.method,
            highlights_on: options.highlights_on,
            sub_navigation,
        })
    }

    /// Item key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Label as declared, before the name generator.
    #[must_use]
    pub fn raw_name(&self) -> &str {
        &self.name
    }

    /// Display name, optionally passed through the configured generator.
    #[must_use]
    pub fn name(&self, ctx: &RequestContext<'_>, apply_generator: bool) -> String {
        if apply_generator {
            ctx.config().generate_name(&self.name, self)
        } else {
            self.name.clone()
        }
    }

    /// Target URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Level of the owning container.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// HTTP method hint.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Declared attributes for the item element.
    #[must_use]
    pub fn html_attributes(&self) -> &Attributes {
        &self.html_attributes
    }

    /// Declared attributes for the link element.
    #[must_use]
    pub fn link_attributes(&self) -> &Attributes {
        &self.link_attributes
    }

    /// Explicit selection rule.
    #[must_use]
    pub fn highlights_on(&self) -> Option<&HighlightRule> {
        self.highlights_on.as_ref()
    }

    /// Nested container one level deeper.
    #[must_use]
    pub fn sub_navigation(&self) -> Option<&ItemContainer> {
        self.sub_navigation.as_ref()
    }

    /// Whether the item is selected for this request.
    ///
    /// An explicit selection wins outright; otherwise the item is selected
    /// when a descendant is selected or its own condition holds. `parent`
    /// must be the container owning this item.
    pub fn selected(
        &self,
        ctx: &RequestContext<'_>,
        parent: &ItemContainer,
    ) -> Result<bool, NavigationError> {
        if self.selected_by_config(ctx) {
            return Ok(true);
        }
        if self.selected_by_sub_navigation(ctx)? {
            return Ok(true);
        }
        self.selected_by_condition(ctx, parent)
    }

    /// Whether the item was explicitly selected for this request.
    #[must_use]
    pub fn selected_by_config(&self, ctx: &RequestContext<'_>) -> bool {
        ctx.is_explicitly_selected(self.level, &self.key)
    }

    /// Whether any item in the sub-navigation is selected.
    pub fn selected_by_sub_navigation(
        &self,
        ctx: &RequestContext<'_>,
    ) -> Result<bool, NavigationError> {
        match &self.sub_navigation {
            Some(sub) => sub.selected(ctx),
            None => Ok(false),
        }
    }

    /// Whether the item's own rule selects it.
    pub fn selected_by_condition(
        &self,
        ctx: &RequestContext<'_>,
        parent: &ItemContainer,
    ) -> Result<bool, NavigationError> {
        match &self.highlights_on {
            Some(HighlightRule::Pattern(re)) => Ok(re.is_match(ctx.request_uri())),
            Some(HighlightRule::Predicate(predicate)) => Ok(predicate(ctx)),
            Some(HighlightRule::Subpath) => Ok(self.selected_by_subpath(ctx)),
            Some(HighlightRule::Invalid(rule)) => Err(NavigationError::InvalidHighlightRule {
                key: self.key.clone(),
                rule: rule.clone(),
            }),
            None if ctx.config().highlight_on_subpath() => Ok(self.selected_by_subpath(ctx)),
            None => Ok(self.auto_highlighted(ctx, parent)),
        }
    }

    /// Request path equals the item URL or lies below it.
    ///
    /// `/path` matches `/path`, `/path/sub` and `/path?x`, never `/path_group`.
    fn selected_by_subpath(&self, ctx: &RequestContext<'_>) -> bool {
        let Some(url) = self.url.as_deref() else {
            return false;
        };
        let base = strip_anchor(url).to_lowercase();
        let current = strip_query(ctx.request_uri()).to_lowercase();

        current
            .strip_prefix(&base)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
    }

    fn auto_highlighted(&self, ctx: &RequestContext<'_>, parent: &ItemContainer) -> bool {
        let config = ctx.config();
        if !config.auto_highlight() || !parent.auto_highlight() {
            return false;
        }
        let Some(url) = self.url.as_deref() else {
            return false;
        };

        let mut candidate = url;
        if config.ignore_anchors_on_auto_highlight() {
            candidate = strip_anchor(candidate);
        }
        if config.ignore_query_params_on_auto_highlight() {
            candidate = strip_query(candidate);
        }

        (url == "/" && ctx.request_path() == "/") || ctx.adapter().is_current_page(candidate)
    }

    /// Selected class for this item, if selected.
    ///
    /// Looked up on the owning container first, then on the configuration.
    pub fn selected_class(
        &self,
        ctx: &RequestContext<'_>,
        parent: &ItemContainer,
    ) -> Result<Option<String>, NavigationError> {
        if !self.selected(ctx, parent)? {
            return Ok(None);
        }
        let class = parent
            .selected_class()
            .unwrap_or_else(|| ctx.config().selected_class());
        Ok(Some(class.to_owned()))
    }

    /// Active-leaf class, only when the item itself matches and no
    /// descendant is selected.
    pub fn active_leaf_class(
        &self,
        ctx: &RequestContext<'_>,
        parent: &ItemContainer,
    ) -> Result<Option<String>, NavigationError> {
        if self.selected_by_sub_navigation(ctx)? || !self.selected_by_condition(ctx, parent)? {
            return Ok(None);
        }
        Ok(Some(ctx.config().active_leaf_class().to_owned()))
    }

    /// Attributes for the rendered item element.
    ///
    /// Adds the autogenerated id when enabled and not declared, and appends
    /// the selected and active-leaf classes. `class` is omitted when empty.
    pub fn html_options(
        &self,
        ctx: &RequestContext<'_>,
        parent: &ItemContainer,
    ) -> Result<Attributes, NavigationError> {
        let config = ctx.config();
        let mut options = self.html_attributes.clone();

        if config.autogenerate_item_ids() && !options.contains_key("id") {
            options.insert("id".to_owned(), config.generate_id(&self.key));
        }

        let classes = join_classes([
            self.html_attributes.get("class").cloned(),
            self.selected_class(ctx, parent)?,
            self.active_leaf_class(ctx, parent)?,
        ]);
        if classes.is_empty() {
            options.shift_remove("class");
        } else {
            options.insert("class".to_owned(), classes);
        }

        Ok(options)
    }
}

/// Space-join class lists, skipping blanks.
pub(crate) fn join_classes<I>(classes: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    classes
        .into_iter()
        .flatten()
        .filter(|class| !class.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;
    use crate::config::Configuration;
    use crate::context::{Adapter, StaticAdapter};

    fn container_with(url: &str, options: ItemOptions) -> ItemContainer {
        let mut container = ItemContainer::new(1);
        container.item("users", "Users", url, options).unwrap();
        container
    }

    fn is_selected(config: &Configuration, container: &ItemContainer, uri: &str) -> bool {
        let adapter = StaticAdapter::new(uri);
        let ctx = config.request(&adapter);
        container.items()[0].selected(&ctx, container).unwrap()
    }

    #[test]
    fn test_new_stores_fields() {
        let item = Item::new(
            2,
            "users",
            "Users",
            "/users",
            ItemOptions::new().class("nav").method("post"),
            None,
            None,
        )
        .unwrap();

        assert_eq!(item.key(), "users");
        assert_eq!(item.raw_name(), "Users");
        assert_eq!(item.url(), Some("/users"));
        assert_eq!(item.level(), 2);
        assert_eq!(item.method(), Some("post"));
        assert_eq!(item.html_attributes().get("class").map(String::as_str), Some("nav"));
        assert!(item.sub_navigation().is_none());
    }

    #[test]
    fn test_deferred_url_evaluated_once_at_construction() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let url = UrlSource::deferred(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some("/lazy".to_owned())
        });

        let mut container = ItemContainer::new(1);
        container.item("lazy", "Lazy", url, ItemOptions::new()).unwrap();
        let config = Configuration::default();
        is_selected(&config, &container, "/lazy");
        is_selected(&config, &container, "/other");

        assert_eq!(container.items()[0].url(), Some("/lazy"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_absent_url() {
        let item = Item::new(1, "label", "Label", UrlSource::Absent, ItemOptions::new(), None, None)
            .unwrap();

        assert_eq!(item.url(), None);
    }

    #[test]
    fn test_builder_wins_over_items() {
        let records = [crate::record::ItemRecord::new("from_items", "From items", "/x")];
        let defs: Vec<&dyn ItemDefinition> =
            records.iter().map(|r| r as &dyn ItemDefinition).collect();
        let builder: SubNavigationBuilder<'_> = Box::new(|sub: &mut ItemContainer| {
            sub.item("from_builder", "From builder", "/y", ItemOptions::new())
        });

        let item = Item::new(
            1,
            "parent",
            "Parent",
            "/parent",
            ItemOptions::new(),
            Some(defs),
            Some(builder),
        )
        .unwrap();

        let sub = item.sub_navigation().unwrap();
        assert_eq!(sub.len(), 1);
        assert!(sub.lookup("from_builder").is_some());
        assert!(sub.lookup("from_items").is_none());
    }

    #[test]
    fn test_container_options_apply_to_sub_navigation() {
        let mut container = ItemContainer::new(1);
        container
            .item_with(
                "users",
                "Users",
                "/users",
                ItemOptions::new()
                    .container_class("sub")
                    .container_id("users_nav")
                    .selected_class("current"),
                |sub| sub.item("new", "New", "/users/new", ItemOptions::new()),
            )
            .unwrap();

        let sub = container.items()[0].sub_navigation().unwrap();
        assert_eq!(sub.level(), 2);
        assert_eq!(sub.dom_class(), Some("sub"));
        assert_eq!(sub.dom_id(), Some("users_nav"));
        assert_eq!(sub.selected_class(), Some("current"));
        // Not leaked onto the item itself
        assert!(container.items()[0].html_attributes().is_empty());
    }

    #[test]
    fn test_auto_highlight_matches_current_page() {
        let config = Configuration::default();
        let container = container_with("/users", ItemOptions::new());

        assert!(is_selected(&config, &container, "/users"));
        assert!(is_selected(&config, &container, "/users?page=2"));
        assert!(!is_selected(&config, &container, "/users/1"));
    }

    #[test]
    fn test_auto_highlight_root_url() {
        let config = Configuration::default();
        let container = container_with("/", ItemOptions::new());

        assert!(is_selected(&config, &container, "/"));
        assert!(!is_selected(&config, &container, "/users"));
    }

    /// Adapter whose page-match predicate never matches.
    struct NoPageMatch(StaticAdapter);

    impl Adapter for NoPageMatch {
        fn request_uri(&self) -> &str {
            self.0.request_uri()
        }

        fn request_path(&self) -> &str {
            self.0.request_path()
        }

        fn is_current_page(&self, _url: &str) -> bool {
            false
        }

        fn link_to(&self, name: &str, url: &str, attributes: &Attributes) -> String {
            self.0.link_to(name, url, attributes)
        }

        fn content_tag(&self, tag: &str, content: &str, attributes: &Attributes) -> String {
            self.0.content_tag(tag, content, attributes)
        }
    }

    #[test]
    fn test_root_rule_requires_exact_root_url() {
        let config = Configuration::default();
        let adapter = NoPageMatch(StaticAdapter::new("/?page=2"));
        let ctx = config.request(&adapter);

        let root = container_with("/", ItemOptions::new());
        let anchored = container_with("/#top", ItemOptions::new());

        assert!(root.items()[0].selected(&ctx, &root).unwrap());
        assert!(!anchored.items()[0].selected(&ctx, &anchored).unwrap());
    }

    #[test]
    fn test_auto_highlight_strips_anchor() {
        let config = Configuration::default();
        let container = container_with("/users#top", ItemOptions::new());

        assert!(is_selected(&config, &container, "/users"));
    }

    #[test]
    fn test_auto_highlight_keeps_anchor_when_configured() {
        let mut config = Configuration::default();
        config.set_ignore_anchors_on_auto_highlight(false);
        let container = container_with("/users#top", ItemOptions::new());

        assert!(!is_selected(&config, &container, "/users"));
    }

    #[test]
    fn test_auto_highlight_query_params_respected_when_configured() {
        let mut config = Configuration::default();
        config.set_ignore_query_params_on_auto_highlight(false);
        let container = container_with("/users?page=2", ItemOptions::new());

        assert!(is_selected(&config, &container, "/users?page=2"));
        assert!(!is_selected(&config, &container, "/users?page=3"));
    }

    #[test]
    fn test_auto_highlight_disabled_globally() {
        let mut config = Configuration::default();
        config.set_auto_highlight(false);
        let container = container_with("/users", ItemOptions::new());

        assert!(!is_selected(&config, &container, "/users"));
    }

    #[test]
    fn test_auto_highlight_disabled_on_container() {
        let config = Configuration::default();
        let mut container = container_with("/users", ItemOptions::new());
        container.set_auto_highlight(false);

        assert!(!is_selected(&config, &container, "/users"));
    }

    #[test]
    fn test_auto_highlight_without_url_is_false() {
        let config = Configuration::default();
        let mut container = ItemContainer::new(1);
        container
            .item("label", "Label", UrlSource::Absent, ItemOptions::new())
            .unwrap();

        assert!(!is_selected(&config, &container, "/"));
    }

    #[test]
    fn test_highlights_on_pattern_matches_uri_with_query() {
        let config = Configuration::default();
        let rule = Regex::new(r"page=\d+").unwrap();
        let container = container_with("/users", ItemOptions::new().highlights_on(rule));

        assert!(is_selected(&config, &container, "/anything?page=4"));
        assert!(!is_selected(&config, &container, "/users"));
    }

    #[test]
    fn test_highlights_on_predicate() {
        let config = Configuration::default();
        let rule = HighlightRule::predicate(|ctx| ctx.request_path().starts_with("/admin"));
        let container = container_with("/users", ItemOptions::new().highlights_on(rule));

        assert!(is_selected(&config, &container, "/admin/users"));
        assert!(!is_selected(&config, &container, "/users"));
    }

    #[test]
    fn test_highlights_on_subpath() {
        let config = Configuration::default();
        let container = container_with("/path", ItemOptions::new().highlights_on(HighlightRule::Subpath));

        assert!(is_selected(&config, &container, "/path"));
        assert!(is_selected(&config, &container, "/path/sub-path"));
        assert!(is_selected(&config, &container, "/PATH/Sub"));
        assert!(is_selected(&config, &container, "/path?x=1"));
        assert!(!is_selected(&config, &container, "/path_group/id"));
        assert!(!is_selected(&config, &container, "/other_path/id"));
    }

    #[test]
    fn test_highlight_on_subpath_config_applies_without_rule() {
        let mut config = Configuration::default();
        config.set_highlight_on_subpath(true);
        let container = container_with("/path", ItemOptions::new());

        assert!(is_selected(&config, &container, "/path/sub-path"));
        assert!(!is_selected(&config, &container, "/path_group"));
    }

    #[test]
    fn test_invalid_highlight_rule_fails_on_selection() {
        let config = Configuration::default();
        let rule = HighlightRule::from_value(&json!("sometimes"));
        let container = container_with("/users", ItemOptions::new().highlights_on(rule));
        let adapter = StaticAdapter::new("/users");
        let ctx = config.request(&adapter);

        let result = container.items()[0].selected(&ctx, &container);

        assert!(matches!(
            result,
            Err(NavigationError::InvalidHighlightRule { ref key, .. }) if key == "users"
        ));
    }

    #[test]
    fn test_highlight_rule_from_value() {
        assert!(matches!(HighlightRule::from_value(&json!("subpath")), HighlightRule::Subpath));
        assert!(matches!(
            HighlightRule::from_value(&json!({"pattern": "^/users"})),
            HighlightRule::Pattern(_)
        ));
        assert!(matches!(
            HighlightRule::from_value(&json!({"pattern": "("})),
            HighlightRule::Invalid(_)
        ));
        assert!(matches!(HighlightRule::from_value(&json!(true)), HighlightRule::Invalid(_)));
    }

    #[test]
    fn test_selected_by_sub_navigation() {
        let config = Configuration::default();
        let mut container = ItemContainer::new(1);
        container
            .item_with("users", "Users", "/users", ItemOptions::new(), |sub| {
                sub.item("new", "New", "/users/new", ItemOptions::new())
            })
            .unwrap();
        let adapter = StaticAdapter::new("/users/new");
        let ctx = config.request(&adapter);
        let item = &container.items()[0];

        assert!(item.selected_by_sub_navigation(&ctx).unwrap());
        assert!(!item.selected_by_condition(&ctx, &container).unwrap());
        assert!(item.selected(&ctx, &container).unwrap());
    }

    #[test]
    fn test_explicit_selection_short_circuits() {
        let config = Configuration::default();
        // An invalid rule would fail if evaluated
        let rule = HighlightRule::Invalid("never evaluated".to_owned());
        let container = container_with("/users", ItemOptions::new().highlights_on(rule));
        let adapter = StaticAdapter::new("/");
        let ctx = config.request(&adapter).with_current_navigation_at(1, "users");

        assert!(container.items()[0].selected(&ctx, &container).unwrap());
        assert!(container.items()[0].selected_by_config(&ctx));
    }

    #[test]
    fn test_html_options_selected_leaf() {
        let config = Configuration::default();
        let container = container_with("/users", ItemOptions::new().class("nav").attr("style", "x"));
        let adapter = StaticAdapter::new("/users");
        let ctx = config.request(&adapter);

        let options = container.items()[0].html_options(&ctx, &container).unwrap();

        let pairs: Vec<_> = options.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("class", "nav selected simple-navigation-active-leaf"),
                ("style", "x"),
                ("id", "users"),
            ]
        );
    }

    #[test]
    fn test_html_options_unselected_omits_class() {
        let config = Configuration::default();
        let container = container_with("/users", ItemOptions::new());
        let adapter = StaticAdapter::new("/other");
        let ctx = config.request(&adapter);

        let options = container.items()[0].html_options(&ctx, &container).unwrap();

        assert!(!options.contains_key("class"));
        assert_eq!(options.get("id").map(String::as_str), Some("users"));
    }

    #[test]
    fn test_html_options_keeps_declared_id() {
        let config = Configuration::default();
        let container = container_with("/users", ItemOptions::new().id("custom"));
        let adapter = StaticAdapter::new("/other");
        let ctx = config.request(&adapter);

        let options = container.items()[0].html_options(&ctx, &container).unwrap();

        assert_eq!(options.get("id").map(String::as_str), Some("custom"));
    }

    #[test]
    fn test_html_options_without_autogenerated_ids() {
        let mut config = Configuration::default();
        config.set_autogenerate_item_ids(false);
        let container = container_with("/users", ItemOptions::new());
        let adapter = StaticAdapter::new("/other");
        let ctx = config.request(&adapter);

        let options = container.items()[0].html_options(&ctx, &container).unwrap();

        assert!(options.is_empty());
    }

    #[test]
    fn test_html_options_custom_id_generator() {
        let mut config = Configuration::default();
        config.set_id_generator(|key| format!("nav_{key}"));
        let container = container_with("/users", ItemOptions::new());
        let adapter = StaticAdapter::new("/other");
        let ctx = config.request(&adapter);

        let options = container.items()[0].html_options(&ctx, &container).unwrap();

        assert_eq!(options.get("id").map(String::as_str), Some("nav_users"));
    }

    #[test]
    fn test_selected_class_prefers_container() {
        let config = Configuration::default();
        let mut container = container_with("/users", ItemOptions::new());
        let adapter = StaticAdapter::new("/users");
        let ctx = config.request(&adapter);

        assert_eq!(
            container.items()[0].selected_class(&ctx, &container).unwrap().as_deref(),
            Some("selected")
        );

        container.set_selected_class("current");
        assert_eq!(
            container.items()[0].selected_class(&ctx, &container).unwrap().as_deref(),
            Some("current")
        );
    }

    #[test]
    fn test_active_leaf_class_only_on_leaf() {
        let config = Configuration::default();
        let mut container = ItemContainer::new(1);
        container
            .item_with(
                "users",
                "Users",
                "/users",
                ItemOptions::new().highlights_on(HighlightRule::Subpath),
                |sub| sub.item("new", "New", "/users/new", ItemOptions::new()),
            )
            .unwrap();
        let adapter = StaticAdapter::new("/users/new");
        let ctx = config.request(&adapter);
        let parent = &container.items()[0];
        let sub = parent.sub_navigation().unwrap();

        assert_eq!(parent.active_leaf_class(&ctx, &container).unwrap(), None);
        assert_eq!(
            sub.items()[0].active_leaf_class(&ctx, sub).unwrap().as_deref(),
            Some("simple-navigation-active-leaf")
        );
    }

    #[test]
    fn test_name_generator_applied_on_request() {
        let mut config = Configuration::default();
        config.set_name_generator(|name, _item| format!("<span>{name}</span>"));
        let container = container_with("/users", ItemOptions::new());
        let adapter = StaticAdapter::new("/");
        let ctx = config.request(&adapter);
        let item = &container.items()[0];

        assert_eq!(item.name(&ctx, true), "<span>Users</span>");
        assert_eq!(item.name(&ctx, false), "Users");
    }

    #[test]
    fn test_options_from_map_extracts_recognized_keys() {
        let map = json!({
            "class": "nav",
            "method": "delete",
            "highlights_on": "subpath",
            "container_class": "sub",
            "container_id": "sub_nav",
            "container_attributes": {"role": "menu"},
            "selected_class": "current",
            "link_html": {"class": "link", "target": "_blank"},
            "data-count": 3
        });
        let options = ItemOptions::from_map("users", map.as_object().unwrap()).unwrap();

        assert_eq!(options.html.get("class").map(String::as_str), Some("nav"));
        assert_eq!(options.html.get("data-count").map(String::as_str), Some("3"));
        assert_eq!(options.html.len(), 2);
        assert_eq!(options.method.as_deref(), Some("delete"));
        assert!(matches!(options.highlights_on, Some(HighlightRule::Subpath)));
        assert_eq!(options.container_class.as_deref(), Some("sub"));
        assert_eq!(options.container_id.as_deref(), Some("sub_nav"));
        assert_eq!(options.container_attributes.get("role").map(String::as_str), Some("menu"));
        assert_eq!(options.selected_class.as_deref(), Some("current"));
        assert_eq!(options.link_html.get("target").map(String::as_str), Some("_blank"));
    }

    #[test]
    fn test_options_from_map_rejects_conditions() {
        for option in ["if", "unless"] {
            let mut map = Map::new();
            map.insert(option.to_owned(), json!(true));

            let result = ItemOptions::from_map("users", &map);

            assert!(matches!(
                result,
                Err(NavigationError::InvalidConditionType { option: ref o, .. }) if o == option
            ));
        }
    }

    #[test]
    fn test_join_classes_skips_blanks() {
        assert_eq!(
            join_classes([Some("a".to_owned()), None, Some(" ".to_owned()), Some("b".to_owned())]),
            "a b"
        );
        assert_eq!(join_classes([None, Some(String::new())]), "");
    }
}
