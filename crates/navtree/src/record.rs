//! External item sources.
//!
//! Items can be supplied from outside the builder API: any type
//! implementing [`ItemDefinition`] can be adapted into a container, and
//! [`ItemRecord`] is the serde-friendly key-value form used by
//! configuration files.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::NavigationError;
use crate::item::ItemOptions;

/// Something that describes a navigation item.
pub trait ItemDefinition {
    /// Item key.
    fn key(&self) -> String;
    /// Display label.
    fn name(&self) -> String;
    /// Target URL.
    fn url(&self) -> Option<String>;
    /// Item options.
    fn options(&self) -> Result<ItemOptions, NavigationError>;
    /// Nested items, if the item has a sub-navigation.
    fn items(&self) -> Option<Vec<&dyn ItemDefinition>> {
        None
    }
}

impl<T: ItemDefinition + ?Sized> ItemDefinition for Box<T> {
    fn key(&self) -> String {
        (**self).key()
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn url(&self) -> Option<String> {
        (**self).url()
    }

    fn options(&self) -> Result<ItemOptions, NavigationError> {
        (**self).options()
    }

    fn items(&self) -> Option<Vec<&dyn ItemDefinition>> {
        (**self).items()
    }
}

/// Key-value item record.
///
/// Unrecognized fields are collected into `options` and become rendering
/// attributes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Item key.
    pub key: String,
    /// Display label.
    pub name: String,
    /// Target URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Nested records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemRecord>>,
    /// Options and rendering attributes.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl ItemRecord {
    /// Record without options.
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            url: Some(url.into()),
            items: None,
            options: Map::new(),
        }
    }

    /// Add an option or attribute.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Set nested records.
    #[must_use]
    pub fn with_items(mut self, items: Vec<ItemRecord>) -> Self {
        self.items = Some(items);
        self
    }
}

impl ItemDefinition for ItemRecord {
    fn key(&self) -> String {
        self.key.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn url(&self) -> Option<String> {
        self.url.clone()
    }

    fn options(&self) -> Result<ItemOptions, NavigationError> {
        ItemOptions::from_map(&self.key, &self.options)
    }

    fn items(&self) -> Option<Vec<&dyn ItemDefinition>> {
        self.items
            .as_ref()
            .map(|items| items.iter().map(|item| item as &dyn ItemDefinition).collect())
    }
}

/// Source of top-level items for
/// [`Configuration::items`](crate::Configuration::items).
pub trait ItemProvider {
    /// Items to adapt into the primary navigation.
    fn item_definitions(&self) -> Vec<&dyn ItemDefinition>;
}

impl<D: ItemDefinition> ItemProvider for Vec<D> {
    fn item_definitions(&self) -> Vec<&dyn ItemDefinition> {
        self.iter().map(|item| item as &dyn ItemDefinition).collect()
    }
}

impl ItemProvider for ItemRecord {
    fn item_definitions(&self) -> Vec<&dyn ItemDefinition> {
        ItemDefinition::items(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_record_deserializes_with_flattened_options() {
        let record: ItemRecord = serde_json::from_value(json!({
            "key": "users",
            "name": "Users",
            "url": "/users",
            "class": "nav",
            "items": [{"key": "new", "name": "New"}]
        }))
        .unwrap();

        assert_eq!(record.key, "users");
        assert_eq!(record.url.as_deref(), Some("/users"));
        assert_eq!(record.options.get("class"), Some(&json!("nav")));
        assert!(!record.options.contains_key("items"));

        let children = record.items.as_ref().unwrap();
        assert_eq!(children[0].key, "new");
        assert_eq!(children[0].url, None);
    }

    #[test]
    fn test_record_definition_exposes_children() {
        let record = ItemRecord::new("users", "Users", "/users")
            .with_items(vec![ItemRecord::new("new", "New", "/users/new")]);

        let children = ItemDefinition::items(&record).unwrap();

        assert_eq!(children.len(), 1);
        assert_eq!(children[0].key(), "new");
    }

    #[test]
    fn test_record_options_parsed() {
        let record = ItemRecord::new("users", "Users", "/users").with_option("method", "delete");

        let options = record.options().unwrap();

        assert!(format!("{options:?}").contains("delete"));
    }

    #[test]
    fn test_vec_provider_lists_items() {
        let records = vec![
            ItemRecord::new("a", "A", "/a"),
            ItemRecord::new("b", "B", "/b"),
        ];

        let keys: Vec<_> = records
            .item_definitions()
            .iter()
            .map(|item| item.key())
            .collect();

        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_record_provider_exposes_children() {
        let root = ItemRecord::default().with_items(vec![ItemRecord::new("a", "A", "/a")]);

        assert_eq!(root.item_definitions().len(), 1);
    }
}
