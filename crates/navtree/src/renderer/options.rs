//! Render options and level semantics shared by every renderer.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::container::ItemContainer;
use crate::context::RequestContext;
use crate::error::NavigationError;
use crate::item::Item;
use crate::renderer::RendererRef;

/// Which levels a render covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderLevel {
    /// Whole tree.
    #[default]
    All,
    /// A single level; sub-navigations are never descended into.
    Exact(u32),
    /// Inclusive range of levels.
    Range(u32, u32),
}

impl RenderLevel {
    /// Reject level 0 and inverted ranges.
    pub fn validate(self) -> Result<(), NavigationError> {
        match self {
            Self::All => Ok(()),
            Self::Exact(level) if level > 0 => Ok(()),
            Self::Range(min, max) if min > 0 && min <= max => Ok(()),
            other => Err(NavigationError::UnknownRenderLevel(other.to_string())),
        }
    }

    /// Upper bound of a range, if this is one.
    #[must_use]
    pub fn max_level(self) -> Option<u32> {
        match self {
            Self::Range(_, max) => Some(max),
            _ => None,
        }
    }
}

impl fmt::Display for RenderLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Exact(level) => write!(f, "{level}"),
            Self::Range(min, max) => write!(f, "{min}..{max}"),
        }
    }
}

impl FromStr for RenderLevel {
    type Err = NavigationError;

    /// Parse `all`, `2`, `1..3` / `1..=3` (inclusive) or `1...3` (exclusive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || NavigationError::UnknownRenderLevel(s.to_owned());
        let trimmed = s.trim();

        let level = if trimmed == "all" || trimmed == ":all" {
            Self::All
        } else if let Ok(level) = trimmed.parse::<u32>() {
            Self::Exact(level)
        } else if let Some((min, max)) = trimmed.split_once("..=") {
            Self::Range(min.parse().map_err(|_| unknown())?, max.parse().map_err(|_| unknown())?)
        } else if let Some((min, max)) = trimmed.split_once("...") {
            let max: u32 = max.parse().map_err(|_| unknown())?;
            Self::Range(
                min.parse().map_err(|_| unknown())?,
                max.checked_sub(1).ok_or_else(unknown)?,
            )
        } else if let Some((min, max)) = trimmed.split_once("..") {
            Self::Range(min.parse().map_err(|_| unknown())?, max.parse().map_err(|_| unknown())?)
        } else {
            return Err(unknown());
        };

        level.validate().map_err(|_| unknown())?;
        Ok(level)
    }
}

impl From<u32> for RenderLevel {
    fn from(level: u32) -> Self {
        Self::Exact(level)
    }
}

impl From<RangeInclusive<u32>> for RenderLevel {
    fn from(range: RangeInclusive<u32>) -> Self {
        Self::Range(*range.start(), *range.end())
    }
}

/// Options passed to a renderer.
///
/// The first three fields form the contract every renderer honors; the
/// rest are read by individual renderers and ignored by the others.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Levels to render.
    pub level: RenderLevel,
    /// Expand every sub-navigation, not only the selected ones.
    pub expand_all: bool,
    /// Emit nothing for an empty container (list renderer).
    pub skip_if_empty: bool,
    /// Renderer to use instead of the container's or configuration's.
    pub renderer: Option<RendererRef>,
    /// Separator for flat renderers (links, breadcrumbs, text, title).
    pub join_with: Option<String>,
    /// Markup placed before non-empty breadcrumbs.
    pub prefix: Option<String>,
    /// Render the active leaf of breadcrumbs as a span.
    pub static_leaf: bool,
    /// Use `<ol>` instead of `<ul>` (list renderer).
    pub ordered: bool,
    /// Keep link classes and ids in breadcrumbs.
    pub allow_classes_and_ids: bool,
    /// Return a JSON value instead of a string (json renderer).
    pub as_tree: bool,
    /// Leading segment of the title renderer.
    pub site_name: Option<String>,
}

impl RenderOptions {
    /// Options selecting a renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Into<RendererRef>) -> Self {
        self.renderer = Some(renderer.into());
        self
    }

    /// Options for a level or level range.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<RenderLevel>) -> Self {
        self.level = level.into();
        self
    }

    /// Whether the level setting allows descending into the item's
    /// sub-navigation.
    #[must_use]
    pub fn consider_sub_navigation(&self, item: &Item) -> bool {
        let Some(sub) = item.sub_navigation() else {
            return false;
        };
        match self.level {
            RenderLevel::All => true,
            RenderLevel::Exact(_) => false,
            RenderLevel::Range(_, max) => sub.level() <= max,
        }
    }

    /// Whether the item's sub-navigation should be rendered.
    pub fn include_sub_navigation(
        &self,
        ctx: &RequestContext<'_>,
        item: &Item,
        parent: &ItemContainer,
    ) -> Result<bool, NavigationError> {
        if !self.consider_sub_navigation(item) {
            return Ok(false);
        }
        Ok(self.expand_all || item.selected(ctx, parent)?)
    }
}
