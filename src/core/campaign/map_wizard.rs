//! Map Builder Wizard
//!
//! Collects the parameters for automatic map construction:
//! 0. Build type
//! 1. Libraries to draw tiles from
//! 2. Area count range (Warren maps only)
//! 3. Map size
//!
//! From the libraries page the wizard skips the area step unless the build
//! type is [`MapBuildType::Warren`]. Back from either the area or the size
//! page always lands on the libraries page.

use serde::{Deserialize, Serialize};

use super::types::{LibraryRef, MapBuildType};
use crate::core::wizard::{
    row_marker, step_cursor, HookResult, PageError, PageInput, WizardDefinition, WizardPage,
};

pub const BUILD_TYPE_PAGE: usize = 0;
pub const LIBRARIES_PAGE: usize = 1;
pub const AREAS_PAGE: usize = 2;
pub const SIZE_PAGE: usize = 3;

const MAX_AREAS: u32 = 50;
const MIN_SIZE: u32 = 8;
const MAX_SIZE: u32 = 128;

// ============================================================================
// Context
// ============================================================================

/// Accumulated map build parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapBuildData {
    pub build_type: MapBuildType,
    /// Selected library IDs
    pub libraries: Vec<String>,
    pub min_areas: u32,
    pub max_areas: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for MapBuildData {
    fn default() -> Self {
        Self {
            build_type: MapBuildType::Warren,
            libraries: Vec::new(),
            min_areas: 4,
            max_areas: 8,
            width: 24,
            height: 24,
        }
    }
}

impl MapBuildData {
    /// Whether the area count step applies to this build type
    pub fn uses_areas(&self) -> bool {
        self.build_type == MapBuildType::Warren
    }
}

// ============================================================================
// Transitions
// ============================================================================

/// Forward override: skip the area step for non-Warren maps.
pub fn next_page(index: usize, data: &MapBuildData) -> Option<usize> {
    match index {
        LIBRARIES_PAGE if data.uses_areas() => Some(AREAS_PAGE),
        LIBRARIES_PAGE => Some(SIZE_PAGE),
        _ => None,
    }
}

/// Backward override: both the area and size pages return to libraries.
pub fn back_page(index: usize, _data: &MapBuildData) -> Option<usize> {
    match index {
        AREAS_PAGE | SIZE_PAGE => Some(LIBRARIES_PAGE),
        _ => None,
    }
}

/// Build the map builder wizard over the given context and library list.
pub fn definition(
    data: MapBuildData,
    libraries: Vec<LibraryRef>,
) -> WizardDefinition<MapBuildData> {
    WizardDefinition::new("Map Builder", data)
        .with_page(BuildTypePage::new())
        .with_page(LibrariesPage::new(libraries))
        .with_page(AreasPage::new())
        .with_page(SizePage::new())
        .with_next(next_page)
        .with_back(back_page)
        .on_finish(|data: &mut MapBuildData| {
            tracing::info!(
                build_type = data.build_type.label(),
                libraries = data.libraries.len(),
                width = data.width,
                height = data.height,
                "Map build parameters collected"
            );
        })
}

// ============================================================================
// Pages
// ============================================================================

/// Bounded integer edited with Left/Right.
#[derive(Debug, Clone, Copy)]
struct NumberField {
    label: &'static str,
    value: u32,
    min: u32,
    max: u32,
}

impl NumberField {
    fn new(label: &'static str, min: u32, max: u32) -> Self {
        Self {
            label,
            value: min,
            min,
            max,
        }
    }

    fn adjust(&mut self, input: PageInput) -> bool {
        match input {
            PageInput::Left => self.value = self.value.saturating_sub(1).max(self.min),
            PageInput::Right => self.value = (self.value + 1).min(self.max),
            _ => return false,
        }
        true
    }

    fn line(&self, focused: bool) -> String {
        format!("{}{}: < {} >", row_marker(focused, None), self.label, self.value)
    }
}

pub struct BuildTypePage {
    cursor: usize,
}

impl BuildTypePage {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    fn selected(&self) -> MapBuildType {
        MapBuildType::ALL[self.cursor]
    }
}

impl Default for BuildTypePage {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardPage<MapBuildData> for BuildTypePage {
    fn title(&self) -> &str {
        "Build Type"
    }

    fn allow_next(&self, _ctx: &MapBuildData) -> bool {
        true
    }

    fn allow_back(&self, _ctx: &MapBuildData) -> bool {
        false
    }

    fn on_shown(&mut self, ctx: &MapBuildData) {
        self.cursor = MapBuildType::ALL
            .iter()
            .position(|t| *t == ctx.build_type)
            .unwrap_or(0);
    }

    fn on_next(&mut self, ctx: &mut MapBuildData) -> HookResult {
        ctx.build_type = self.selected();
        Ok(true)
    }

    fn body(&self, _ctx: &MapBuildData) -> Vec<String> {
        MapBuildType::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| {
                format!(
                    "{}{:<12} {}",
                    row_marker(i == self.cursor, None),
                    t.label(),
                    t.description()
                )
            })
            .collect()
    }

    fn handle_input(&mut self, input: PageInput, _ctx: &MapBuildData) -> bool {
        let cursor = step_cursor(self.cursor, MapBuildType::ALL.len(), input);
        let moved = cursor != self.cursor;
        self.cursor = cursor;
        moved
    }
}

pub struct LibrariesPage {
    libraries: Vec<LibraryRef>,
    selected: Vec<bool>,
    cursor: usize,
}

impl LibrariesPage {
    pub fn new(libraries: Vec<LibraryRef>) -> Self {
        let selected = vec![false; libraries.len()];
        Self {
            libraries,
            selected,
            cursor: 0,
        }
    }

    fn selected_ids(&self) -> Vec<String> {
        self.libraries
            .iter()
            .zip(&self.selected)
            .filter(|(_, on)| **on)
            .map(|(lib, _)| lib.id.clone())
            .collect()
    }
}

impl WizardPage<MapBuildData> for LibrariesPage {
    fn title(&self) -> &str {
        "Libraries"
    }

    fn allow_next(&self, _ctx: &MapBuildData) -> bool {
        self.selected.iter().any(|on| *on)
    }

    fn on_shown(&mut self, ctx: &MapBuildData) {
        self.selected = self
            .libraries
            .iter()
            .map(|lib| ctx.libraries.contains(&lib.id))
            .collect();
        self.cursor = self.cursor.min(self.libraries.len().saturating_sub(1));
    }

    fn on_next(&mut self, ctx: &mut MapBuildData) -> HookResult {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return Err(PageError::Validation(
                "At least one library must be selected".to_string(),
            ));
        }
        ctx.libraries = ids;
        Ok(true)
    }

    fn body(&self, _ctx: &MapBuildData) -> Vec<String> {
        if self.libraries.is_empty() {
            return vec!["No libraries available".to_string()];
        }
        self.libraries
            .iter()
            .zip(&self.selected)
            .enumerate()
            .map(|(i, (lib, on))| format!("{}{}", row_marker(i == self.cursor, Some(*on)), lib.name))
            .collect()
    }

    fn handle_input(&mut self, input: PageInput, _ctx: &MapBuildData) -> bool {
        match input {
            PageInput::Select => match self.selected.get_mut(self.cursor) {
                Some(on) => {
                    *on = !*on;
                    true
                }
                None => false,
            },
            PageInput::Up | PageInput::Down => {
                self.cursor = step_cursor(self.cursor, self.libraries.len(), input);
                true
            }
            _ => false,
        }
    }
}

pub struct AreasPage {
    fields: [NumberField; 2],
    focus: usize,
}

impl AreasPage {
    pub fn new() -> Self {
        Self {
            fields: [
                NumberField::new("Minimum areas", 1, MAX_AREAS),
                NumberField::new("Maximum areas", 1, MAX_AREAS),
            ],
            focus: 0,
        }
    }
}

impl Default for AreasPage {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardPage<MapBuildData> for AreasPage {
    fn title(&self) -> &str {
        "Areas"
    }

    fn allow_next(&self, _ctx: &MapBuildData) -> bool {
        let [min, max] = self.fields;
        min.value >= 1 && min.value <= max.value
    }

    fn on_shown(&mut self, ctx: &MapBuildData) {
        self.fields[0].value = ctx.min_areas.clamp(1, MAX_AREAS);
        self.fields[1].value = ctx.max_areas.clamp(1, MAX_AREAS);
    }

    fn on_next(&mut self, ctx: &mut MapBuildData) -> HookResult {
        if !self.allow_next(ctx) {
            return Ok(false);
        }
        ctx.min_areas = self.fields[0].value;
        ctx.max_areas = self.fields[1].value;
        Ok(true)
    }

    fn body(&self, _ctx: &MapBuildData) -> Vec<String> {
        let mut lines: Vec<String> = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| f.line(i == self.focus))
            .collect();
        if self.fields[0].value > self.fields[1].value {
            lines.push("Minimum cannot exceed maximum".to_string());
        }
        lines
    }

    fn handle_input(&mut self, input: PageInput, _ctx: &MapBuildData) -> bool {
        match input {
            PageInput::Up | PageInput::Down => {
                self.focus = step_cursor(self.focus, self.fields.len(), input);
                true
            }
            _ => self.fields[self.focus].adjust(input),
        }
    }
}

pub struct SizePage {
    fields: [NumberField; 2],
    focus: usize,
}

impl SizePage {
    pub fn new() -> Self {
        Self {
            fields: [
                NumberField::new("Width", MIN_SIZE, MAX_SIZE),
                NumberField::new("Height", MIN_SIZE, MAX_SIZE),
            ],
            focus: 0,
        }
    }
}

impl Default for SizePage {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardPage<MapBuildData> for SizePage {
    fn title(&self) -> &str {
        "Size"
    }

    fn allow_next(&self, _ctx: &MapBuildData) -> bool {
        false
    }

    fn allow_finish(&self, _ctx: &MapBuildData) -> bool {
        self.fields
            .iter()
            .all(|f| (MIN_SIZE..=MAX_SIZE).contains(&f.value))
    }

    fn on_shown(&mut self, ctx: &MapBuildData) {
        self.fields[0].value = ctx.width.clamp(MIN_SIZE, MAX_SIZE);
        self.fields[1].value = ctx.height.clamp(MIN_SIZE, MAX_SIZE);
    }

    fn on_next(&mut self, _ctx: &mut MapBuildData) -> HookResult {
        Ok(false)
    }

    fn on_finish(&mut self, ctx: &mut MapBuildData) -> HookResult {
        ctx.width = self.fields[0].value;
        ctx.height = self.fields[1].value;
        Ok(true)
    }

    fn body(&self, ctx: &MapBuildData) -> Vec<String> {
        let mut lines: Vec<String> = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| f.line(i == self.focus))
            .collect();
        lines.push(String::new());
        lines.push(format!("Build type: {}", ctx.build_type.label()));
        if ctx.uses_areas() {
            lines.push(format!("Areas: {}-{}", ctx.min_areas, ctx.max_areas));
        }
        lines
    }

    fn handle_input(&mut self, input: PageInput, _ctx: &MapBuildData) -> bool {
        match input {
            PageInput::Up | PageInput::Down => {
                self.focus = step_cursor(self.focus, self.fields.len(), input);
                true
            }
            _ => self.fields[self.focus].adjust(input),
        }
    }
}
