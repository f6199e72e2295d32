//! Shared selection state
//!
//! One [`SelectionState`] is created by the application root and handed to
//! every view. Views never talk to each other directly: a click in one view
//! mutates the state, the state emits a [`SelectionEvent`], and every
//! subscribed view redraws its highlight layer.

use std::collections::BTreeSet;
use std::fmt;

use crate::{ViewFields, ViewId};

mod store;
mod subscriber;

pub use store::SelectionState;
pub use subscriber::{SelectionSubscriber, ViewInvalidation};

/// Unique identifier of a country record
///
/// Holds the ISO alpha-3 code when one is known, otherwise the normalized
/// country name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryId(String);

impl CountryId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What is currently selected across all views
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    /// A single country picked by click
    Country(CountryId),
    /// Several countries picked by a brush region
    Brushed(BTreeSet<CountryId>),
}

impl Selection {
    /// Normalize a set of ids: empty is no selection, one id is a single country
    pub fn from_ids(ids: impl IntoIterator<Item = CountryId>) -> Self {
        let mut ids: BTreeSet<CountryId> = ids.into_iter().collect();
        match ids.len() {
            0 => Selection::None,
            1 => ids.pop_first().map(Selection::Country).unwrap_or_default(),
            _ => Selection::Brushed(ids),
        }
    }

    /// The single selected country, if exactly one is selected by click
    pub fn current(&self) -> Option<&CountryId> {
        match self {
            Selection::Country(id) => Some(id),
            _ => None,
        }
    }

    pub fn contains(&self, id: &CountryId) -> bool {
        match self {
            Selection::None => false,
            Selection::Country(selected) => selected == id,
            Selection::Brushed(ids) => ids.contains(id),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::None => 0,
            Selection::Country(_) => 1,
            Selection::Brushed(ids) => ids.len(),
        }
    }
}

/// Change notification delivered to subscribed views
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// The shared selection changed; every subscriber receives this
    SelectionChanged(Selection),
    /// A view's field choices changed; only that view's subscribers receive this
    FieldsChanged { view: ViewId, fields: ViewFields },
}
