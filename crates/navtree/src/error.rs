//! Navigation error types.

/// Error returned when building, evaluating or rendering a navigation tree.
///
/// Every variant is a programmer or configuration error and is surfaced to
/// the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// `highlights_on` is neither a pattern, a predicate nor `subpath`.
    #[error("Invalid highlights_on rule for item '{key}': {rule}")]
    InvalidHighlightRule {
        /// Key of the offending item.
        key: String,
        /// Description of the rejected rule.
        rule: String,
    },
    /// `if` / `unless` value is not a predicate.
    #[error("Invalid condition for item '{key}': '{option}' must be a predicate")]
    InvalidConditionType {
        /// Key of the offending item.
        key: String,
        /// Option name (`if` or `unless`).
        option: String,
    },
    /// Both or neither of provider and builder were given.
    #[error("Navigation items require exactly one of a provider or a builder")]
    AmbiguousItemsSource,
    /// Render level is not `all`, a level number or a level range.
    #[error("Unknown render level: {0}")]
    UnknownRenderLevel(String),
    /// Render attempted before the primary navigation was built.
    #[error("Navigation tree is not loaded")]
    MissingNavigationTree,
    /// Renderer name is not present in the registry.
    #[error("Unknown renderer: {0}")]
    UnknownRenderer(String),
    /// JSON serialization failed.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
