//! Campaign Domain Types
//!
//! The slice of the campaign model the built-in wizards operate on:
//! - [`LibraryRef`]: a creature/trap library the map builder can draw from
//! - [`MapBuildType`]: layout mode for automatic map construction
//! - [`CreatureSummary`], [`CreatureTemplate`], [`RoleType`]: inputs to
//!   creature variant derivation
//! - [`CreatureVariant`]: the derived creature
//!
//! Lookup across overlapping libraries happens elsewhere; wizards receive
//! already-resolved candidate lists.

use serde::{Deserialize, Serialize};

/// Generate a default UUID for records created without one
fn default_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ============================================================================
// Libraries and Maps
// ============================================================================

/// Reference to a library available to the current campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryRef {
    #[serde(default = "default_uuid")]
    pub id: String,
    pub name: String,
}

impl LibraryRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: default_uuid(),
            name: name.into(),
        }
    }
}

/// Layout mode for automatic map construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MapBuildType {
    /// Rooms joined by corridors; area count is configurable
    #[default]
    Warren,
    /// A single area filled edge to edge
    FilledArea,
    /// Tiles placed without a room structure
    Freeform,
}

impl MapBuildType {
    pub const ALL: [MapBuildType; 3] = [
        MapBuildType::Warren,
        MapBuildType::FilledArea,
        MapBuildType::Freeform,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MapBuildType::Warren => "Warren",
            MapBuildType::FilledArea => "Filled Area",
            MapBuildType::Freeform => "Freeform",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MapBuildType::Warren => "Rooms connected by corridors",
            MapBuildType::FilledArea => "One open area filling the map",
            MapBuildType::Freeform => "Tiles scattered without rooms",
        }
    }
}

// ============================================================================
// Creatures
// ============================================================================

/// Combat role of a creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Artillery,
    Brute,
    Controller,
    Lurker,
    Skirmisher,
    Soldier,
}

impl RoleType {
    pub fn label(self) -> &'static str {
        match self {
            RoleType::Artillery => "Artillery",
            RoleType::Brute => "Brute",
            RoleType::Controller => "Controller",
            RoleType::Lurker => "Lurker",
            RoleType::Skirmisher => "Skirmisher",
            RoleType::Soldier => "Soldier",
        }
    }
}

/// Summary of a creature usable as the base of a variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSummary {
    #[serde(default = "default_uuid")]
    pub id: String,
    pub name: String,
    pub level: u8,
    pub role: RoleType,
    /// Minions cannot take templates
    #[serde(default)]
    pub is_minion: bool,
}

impl CreatureSummary {
    pub fn new(name: impl Into<String>, level: u8, role: RoleType) -> Self {
        Self {
            id: default_uuid(),
            name: name.into(),
            level,
            role,
            is_minion: false,
        }
    }

    pub fn minion(mut self) -> Self {
        self.is_minion = true;
        self
    }
}

/// A template applied on top of a base creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureTemplate {
    #[serde(default = "default_uuid")]
    pub id: String,
    pub name: String,
    /// Role the template pushes the creature towards
    pub role: RoleType,
}

impl CreatureTemplate {
    pub fn new(name: impl Into<String>, role: RoleType) -> Self {
        Self {
            id: default_uuid(),
            name: name.into(),
            role,
        }
    }
}

/// A creature derived from a base creature plus templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureVariant {
    pub id: String,
    pub name: String,
    pub base_id: String,
    pub level: u8,
    pub role: RoleType,
    pub is_minion: bool,
    pub template_ids: Vec<String>,
}

impl CreatureVariant {
    pub(crate) fn new_id() -> String {
        default_uuid()
    }
}
