//! Core functionality for the happiness report explorer
//! 
//! This crate provides the field schema, view identifiers and the shared
//! selection state that links the map and chart views together.

pub mod fields;
pub mod selection;
pub mod state;

// Re-export commonly used types
pub use fields::{AxisKind, Field, UnknownFieldError, ViewFields};
pub use selection::{
    CountryId, Selection, SelectionEvent, SelectionState, SelectionSubscriber,
    ViewInvalidation,
};
pub use state::{AppSettings, FieldChoice, SettingsError, ViewFieldSettings};

use serde::{Deserialize, Serialize};

/// Identifies one mounted view instance
///
/// Field choices are stored per view instance, so the two panels of the
/// linked brushing view get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    Map,
    Bubble,
    BrushLeft,
    BrushRight,
}

impl ViewId {
    pub const ALL: [ViewId; 4] = [ViewId::Map, ViewId::Bubble, ViewId::BrushLeft, ViewId::BrushRight];

    /// Default field choices for this view
    pub fn default_fields(self) -> ViewFields {
        match self {
            ViewId::Map => ViewFields::default(),
            ViewId::Bubble => ViewFields {
                x: Field::LoggedGdpPerCapita,
                ..ViewFields::default()
            },
            ViewId::BrushLeft => ViewFields {
                x: Field::LoggedGdpPerCapita,
                y: Field::LadderScore,
                size: Field::Population,
                color: Field::LadderScore,
            },
            ViewId::BrushRight => ViewFields {
                x: Field::SocialSupport,
                y: Field::HealthyLifeExpectancy,
                size: Field::Population,
                color: Field::FreedomToMakeLifeChoices,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewId::Map => "Map",
            ViewId::Bubble => "Bubble Chart",
            ViewId::BrushLeft => "Graph 1",
            ViewId::BrushRight => "Graph 2",
        }
    }
}

/// Which top-level view the shell has mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Map,
    Bubble,
    LinkedBrushing,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Bubble, ViewMode::LinkedBrushing, ViewMode::Map];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Map => "Map View",
            ViewMode::Bubble => "Bubble Chart",
            ViewMode::LinkedBrushing => "Brushing Chart",
        }
    }
}
