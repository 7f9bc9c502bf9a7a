//! Navigation files for navtree.
//!
//! Parses `navigation.toml` files with serde and provides auto-discovery of
//! the file in parent directories. A file holds rendering defaults in a
//! `[navigation]` table and the item tree as `[[items]]` records.
//!
//! ```toml
//! [navigation]
//! selected_class = "active"
//!
//! [[items]]
//! key = "docs"
//! name = "Docs"
//! url = "${DOCS_BASE:-}/docs"
//! highlights_on = "subpath"
//!
//! [[items.items]]
//! key = "guide"
//! name = "Guide"
//! url = "/docs/guide"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! Item URLs support `${VAR}` (error if unset) and `${VAR:-default}`.

mod expand;

use std::path::{Path, PathBuf};

use navtree::{Configuration, HighlightRule, ItemRecord, NavigationError};
use serde::Deserialize;

/// Navigation filename to search for.
const NAVIGATION_FILENAME: &str = "navigation.toml";

/// Contents of a navigation file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavigationFile {
    /// Rendering defaults.
    pub navigation: NavigationSettings,
    /// Top-level item records.
    pub items: Vec<ItemRecord>,
    /// Path to the file (set after loading).
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

/// `[navigation]` table.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Registry name of the default renderer.
    pub renderer: String,
    /// Class for selected items.
    pub selected_class: String,
    /// Class for the selected leaf.
    pub active_leaf_class: String,
    /// Give items an `id` derived from their key.
    pub autogenerate_item_ids: bool,
    /// Select items whose URL is the current page.
    pub auto_highlight: bool,
    /// Select items on their URL and every path below it.
    pub highlight_on_subpath: bool,
    /// Drop the query string from item URLs before auto-highlighting.
    pub ignore_query_params_on_auto_highlight: bool,
    /// Drop the anchor from item URLs before auto-highlighting.
    pub ignore_anchors_on_auto_highlight: bool,
    /// Render item names without escaping.
    pub consider_item_names_as_safe: bool,
    /// Prepended to item keys to form element ids.
    pub id_prefix: Option<String>,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            renderer: "list".to_owned(),
            selected_class: navtree::DEFAULT_SELECTED_CLASS.to_owned(),
            active_leaf_class: navtree::DEFAULT_ACTIVE_LEAF_CLASS.to_owned(),
            autogenerate_item_ids: true,
            auto_highlight: true,
            highlight_on_subpath: false,
            ignore_query_params_on_auto_highlight: true,
            ignore_anchors_on_auto_highlight: true,
            consider_item_names_as_safe: false,
            id_prefix: None,
        }
    }
}

/// Navigation file error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Navigation file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Navigation file error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Field path (e.g., "`items.docs.url`").
        field: String,
        /// Error message (e.g., "${`DOCS_BASE`} not set").
        message: String,
    },
    /// Item tree could not be built.
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl NavigationFile {
    /// Load a navigation file.
    ///
    /// If `path` is provided, loads from that file. Otherwise, searches for
    /// `navigation.toml` in the current directory and its parents, and falls
    /// back to an empty navigation when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `path` doesn't exist, or reading,
    /// parsing, expansion or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_from(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No {NAVIGATION_FILENAME} found, using empty navigation");
                Ok(Self::default())
            }
        }
    }

    /// Parse, expand and validate navigation file contents.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut file: Self = toml::from_str(content)?;
        file.expand_env_vars()?;
        file.validate()?;
        Ok(file)
    }

    /// Load from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading navigation file");
        let content = std::fs::read_to_string(path)?;
        let mut file = Self::from_toml_str(&content)?;
        file.path = Some(path.to_path_buf());
        Ok(file)
    }

    /// Validate settings and item records.
    ///
    /// Renderer names are checked later by [`NavigationFile::apply`], since
    /// the host may register custom renderers first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let settings = &self.navigation;
        require_non_empty(&settings.renderer, "navigation.renderer")?;
        require_non_empty(&settings.selected_class, "navigation.selected_class")?;
        require_non_empty(&settings.active_leaf_class, "navigation.active_leaf_class")?;
        validate_records(&self.items, "items")
    }

    /// Expand environment variable references in item URLs.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand_records(&mut self.items, "items")
    }

    /// Apply settings and load the items into `config`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the renderer is not registered in
    /// `config`, or `ConfigError::Navigation` if the item tree cannot be built.
    pub fn apply(&self, config: &mut Configuration) -> Result<(), ConfigError> {
        let settings = &self.navigation;
        if !config.renderers().contains(&settings.renderer) {
            return Err(ConfigError::Validation(format!(
                "navigation.renderer: unknown renderer '{}' (registered: {})",
                settings.renderer,
                config.renderers().names().join(", ")
            )));
        }

        config.set_renderer(settings.renderer.as_str());
        config.set_selected_class(settings.selected_class.as_str());
        config.set_active_leaf_class(settings.active_leaf_class.as_str());
        config.set_autogenerate_item_ids(settings.autogenerate_item_ids);
        config.set_auto_highlight(settings.auto_highlight);
        config.set_highlight_on_subpath(settings.highlight_on_subpath);
        config.set_ignore_query_params_on_auto_highlight(
            settings.ignore_query_params_on_auto_highlight,
        );
        config.set_ignore_anchors_on_auto_highlight(settings.ignore_anchors_on_auto_highlight);
        config.set_consider_item_names_as_safe(settings.consider_item_names_as_safe);
        if let Some(prefix) = settings.id_prefix.clone().filter(|p| !p.is_empty()) {
            config.set_id_generator(move |key| format!("{prefix}{key}"));
        }

        config.load_items(&self.items)?;
        Ok(())
    }

    /// Build a fresh [`Configuration`] from this file.
    ///
    /// # Errors
    ///
    /// See [`NavigationFile::apply`].
    pub fn into_configuration(self) -> Result<Configuration, ConfigError> {
        let mut config = Configuration::default();
        self.apply(&mut config)?;
        Ok(config)
    }
}

/// Search for the navigation file in `start` and its parents.
fn discover_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(NAVIGATION_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

fn validate_records(records: &[ItemRecord], path: &str) -> Result<(), ConfigError> {
    for (index, record) in records.iter().enumerate() {
        let field = format!("{path}[{index}]");
        require_non_empty(&record.key, &format!("{field}.key"))?;
        require_non_empty(&record.name, &format!("{field}.name"))?;

        for condition in ["if", "unless"] {
            if record.options.contains_key(condition) {
                return Err(ConfigError::Validation(format!(
                    "{field}.{condition}: conditions cannot be declared in a navigation file"
                )));
            }
        }
        if let Some(rule) = record.options.get("highlights_on")
            && let HighlightRule::Invalid(reason) = HighlightRule::from_value(rule)
        {
            return Err(ConfigError::Validation(format!(
                "{field}.highlights_on: expected \"subpath\" or {{ pattern = \"...\" }}, got {reason}"
            )));
        }

        if let Some(children) = &record.items {
            validate_records(children, &format!("{field}.items"))?;
        }
    }
    Ok(())
}

fn expand_records(records: &mut [ItemRecord], path: &str) -> Result<(), ConfigError> {
    for record in records {
        let field = format!("{path}.{}", record.key);
        if let Some(url) = &record.url {
            record.url = Some(expand::expand_env(url, &format!("{field}.url"))?);
        }
        if let Some(children) = &mut record.items {
            expand_records(children, &format!("{field}.items"))?;
        }
    }
    Ok(())
}
