//! Module registry
//!
//! The closed set of module types a frame can host. The mapping from a type
//! to its view lives in `modules::ModuleView::for_type`, which matches every
//! variant exhaustively.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModuleType {
    #[default]
    Chat,
    Email,
    Agenda,
    Todo,
    RoutePlanner,
    Trading,
    Stats,
    HomeAssistant,
    Browser,
    News,
    Blockchain,
    Scanner,
    Coding,
}

impl ModuleType {
    /// All registered types in selector order.
    pub fn all() -> Vec<ModuleType> {
        ModuleType::iter().collect()
    }

    /// Display label: the type identifier with its first letter upper-cased.
    pub fn title(&self) -> String {
        let name: &'static str = (*self).into();
        capitalize(name)
    }

    /// Parse a user-supplied identifier.
    pub fn parse(name: &str) -> Result<Self, ValidationError> {
        ModuleType::from_str(name.trim())
            .map_err(|_| ValidationError::UnknownModuleType(name.trim().to_string()))
    }

    /// The type after this one in selector order, wrapping around.
    pub fn next(&self) -> Self {
        let all = Self::all();
        let index = all.iter().position(|t| t == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }

    /// The type before this one in selector order, wrapping around.
    pub fn previous(&self) -> Self {
        let all = Self::all();
        let index = all.iter().position(|t| t == self).unwrap_or(0);
        all[(index + all.len() - 1) % all.len()]
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
