//! Creature Variant Wizard
//!
//! Derives a new creature from a base creature:
//! 0. Base creature
//! 1. Templates
//! 2. Role (only when templates leave the role ambiguous)
//! 3. Name and confirmation
//!
//! Minions skip straight from the base page to the last page since they
//! cannot take templates. When the base and its templates imply exactly one
//! role, the role page is skipped too. Back from the last page re-derives its
//! target from the same predicates rather than remembering how it got there.

use serde::{Deserialize, Serialize};

use super::types::{CreatureSummary, CreatureTemplate, CreatureVariant, RoleType};
use crate::core::wizard::{
    row_marker, step_cursor, HookResult, PageInput, WizardDefinition, WizardPage,
};

pub const BASE_PAGE: usize = 0;
pub const TEMPLATES_PAGE: usize = 1;
pub const ROLE_PAGE: usize = 2;
pub const FINISH_PAGE: usize = 3;

// ============================================================================
// Context
// ============================================================================

/// Accumulated variant draft
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantData {
    pub base: Option<CreatureSummary>,
    pub templates: Vec<CreatureTemplate>,
    /// Role picked on the role page
    pub role: Option<RoleType>,
    pub name: String,
}

impl VariantData {
    pub fn is_minion(&self) -> bool {
        self.base.as_ref().is_some_and(|b| b.is_minion)
    }

    /// Distinct roles implied by the base creature and selected templates,
    /// in first-seen order.
    pub fn roles(&self) -> Vec<RoleType> {
        let mut roles = Vec::new();
        let implied = self
            .base
            .iter()
            .map(|b| b.role)
            .chain(self.templates.iter().map(|t| t.role));
        for role in implied {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        roles
    }

    /// The role the variant will take: the picked role if still valid,
    /// otherwise the only implied role.
    pub fn resolved_role(&self) -> Option<RoleType> {
        let roles = self.roles();
        match self.role {
            Some(role) if roles.contains(&role) => Some(role),
            _ if roles.len() == 1 => Some(roles[0]),
            _ => None,
        }
    }

    /// Suggested name derived from base and template names.
    pub fn default_name(&self) -> String {
        let Some(base) = &self.base else {
            return String::new();
        };
        if self.templates.is_empty() {
            return format!("{} Variant", base.name);
        }
        let templates: Vec<&str> = self.templates.iter().map(|t| t.name.as_str()).collect();
        format!("{} {}", templates.join(" "), base.name)
    }

    /// Build the final variant, if the draft is complete.
    pub fn to_variant(&self) -> Option<CreatureVariant> {
        let base = self.base.as_ref()?;
        let role = self.resolved_role()?;
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(CreatureVariant {
            id: CreatureVariant::new_id(),
            name: name.to_string(),
            base_id: base.id.clone(),
            level: base.level,
            role,
            is_minion: base.is_minion,
            template_ids: self.templates.iter().map(|t| t.id.clone()).collect(),
        })
    }
}

// ============================================================================
// Transitions
// ============================================================================

/// Forward override: minions and single-role drafts jump to the last page.
pub fn next_page(index: usize, data: &VariantData) -> Option<usize> {
    match index {
        BASE_PAGE if data.is_minion() => Some(FINISH_PAGE),
        BASE_PAGE => Some(TEMPLATES_PAGE),
        TEMPLATES_PAGE if data.roles().len() == 1 => Some(FINISH_PAGE),
        TEMPLATES_PAGE => Some(ROLE_PAGE),
        _ => None,
    }
}

/// Backward override: the last page recomputes which page precedes it.
pub fn back_page(index: usize, data: &VariantData) -> Option<usize> {
    match index {
        FINISH_PAGE if data.is_minion() => Some(BASE_PAGE),
        FINISH_PAGE if data.roles().len() == 1 => Some(TEMPLATES_PAGE),
        FINISH_PAGE => Some(ROLE_PAGE),
        _ => None,
    }
}

/// Build the variant wizard over the given candidates.
pub fn definition(
    data: VariantData,
    creatures: Vec<CreatureSummary>,
    templates: Vec<CreatureTemplate>,
) -> WizardDefinition<VariantData> {
    WizardDefinition::new("Creature Variant", data)
        .with_page(BasePage::new(creatures))
        .with_page(TemplatesPage::new(templates))
        .with_page(RolePage::new())
        .with_page(FinishPage::new())
        .with_next(next_page)
        .with_back(back_page)
        .on_finish(|data: &mut VariantData| {
            tracing::info!(
                name = %data.name,
                templates = data.templates.len(),
                role = ?data.role,
                "Creature variant drafted"
            );
        })
}

// ============================================================================
// Pages
// ============================================================================

pub struct BasePage {
    creatures: Vec<CreatureSummary>,
    cursor: usize,
}

impl BasePage {
    pub fn new(creatures: Vec<CreatureSummary>) -> Self {
        Self { creatures, cursor: 0 }
    }
}

impl WizardPage<VariantData> for BasePage {
    fn title(&self) -> &str {
        "Base Creature"
    }

    fn allow_next(&self, _ctx: &VariantData) -> bool {
        !self.creatures.is_empty()
    }

    fn allow_back(&self, _ctx: &VariantData) -> bool {
        false
    }

    fn on_shown(&mut self, ctx: &VariantData) {
        self.cursor = ctx
            .base
            .as_ref()
            .and_then(|base| self.creatures.iter().position(|c| c.id == base.id))
            .unwrap_or(0);
    }

    fn on_next(&mut self, ctx: &mut VariantData) -> HookResult {
        let Some(chosen) = self.creatures.get(self.cursor) else {
            return Ok(false);
        };

        let changed = ctx.base.as_ref().map(|b| &b.id) != Some(&chosen.id);
        if changed {
            // Templates, role and name were chosen for the previous base
            ctx.templates.clear();
            ctx.role = None;
            ctx.name.clear();
        }
        if chosen.is_minion {
            ctx.templates.clear();
        }
        ctx.base = Some(chosen.clone());
        Ok(true)
    }

    fn body(&self, _ctx: &VariantData) -> Vec<String> {
        self.creatures
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let minion = if c.is_minion { " (minion)" } else { "" };
                format!(
                    "{}{} - level {} {}{}",
                    row_marker(i == self.cursor, None),
                    c.name,
                    c.level,
                    c.role.label(),
                    minion
                )
            })
            .collect()
    }

    fn handle_input(&mut self, input: PageInput, _ctx: &VariantData) -> bool {
        let cursor = step_cursor(self.cursor, self.creatures.len(), input);
        let moved = cursor != self.cursor;
        self.cursor = cursor;
        moved
    }
}

pub struct TemplatesPage {
    templates: Vec<CreatureTemplate>,
    selected: Vec<bool>,
    cursor: usize,
}

impl TemplatesPage {
    pub fn new(templates: Vec<CreatureTemplate>) -> Self {
        let selected = vec![false; templates.len()];
        Self {
            templates,
            selected,
            cursor: 0,
        }
    }
}

impl WizardPage<VariantData> for TemplatesPage {
    fn title(&self) -> &str {
        "Templates"
    }

    fn allow_next(&self, _ctx: &VariantData) -> bool {
        true
    }

    fn on_shown(&mut self, ctx: &VariantData) {
        self.selected = self
            .templates
            .iter()
            .map(|t| ctx.templates.iter().any(|chosen| chosen.id == t.id))
            .collect();
    }

    fn on_next(&mut self, ctx: &mut VariantData) -> HookResult {
        ctx.templates = self
            .templates
            .iter()
            .zip(&self.selected)
            .filter(|(_, on)| **on)
            .map(|(t, _)| t.clone())
            .collect();
        if ctx.role.is_some_and(|role| !ctx.roles().contains(&role)) {
            ctx.role = None;
        }
        Ok(true)
    }

    fn body(&self, _ctx: &VariantData) -> Vec<String> {
        if self.templates.is_empty() {
            return vec!["No templates available".to_string()];
        }
        self.templates
            .iter()
            .zip(&self.selected)
            .enumerate()
            .map(|(i, (t, on))| {
                format!(
                    "{}{} ({})",
                    row_marker(i == self.cursor, Some(*on)),
                    t.name,
                    t.role.label()
                )
            })
            .collect()
    }

    fn handle_input(&mut self, input: PageInput, _ctx: &VariantData) -> bool {
        match input {
            PageInput::Select => match self.selected.get_mut(self.cursor) {
                Some(on) => {
                    *on = !*on;
                    true
                }
                None => false,
            },
            PageInput::Up | PageInput::Down => {
                self.cursor = step_cursor(self.cursor, self.templates.len(), input);
                true
            }
            _ => false,
        }
    }
}

#[derive(Default)]
pub struct RolePage {
    roles: Vec<RoleType>,
    cursor: usize,
}

impl RolePage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WizardPage<VariantData> for RolePage {
    fn title(&self) -> &str {
        "Role"
    }

    fn allow_next(&self, _ctx: &VariantData) -> bool {
        self.cursor < self.roles.len()
    }

    fn on_shown(&mut self, ctx: &VariantData) {
        self.roles = ctx.roles();
        self.cursor = ctx
            .role
            .and_then(|role| self.roles.iter().position(|r| *r == role))
            .unwrap_or(0);
    }

    fn on_next(&mut self, ctx: &mut VariantData) -> HookResult {
        match self.roles.get(self.cursor) {
            Some(role) => {
                ctx.role = Some(*role);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn body(&self, _ctx: &VariantData) -> Vec<String> {
        self.roles
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{}{}", row_marker(i == self.cursor, None), r.label()))
            .collect()
    }

    fn handle_input(&mut self, input: PageInput, _ctx: &VariantData) -> bool {
        let cursor = step_cursor(self.cursor, self.roles.len(), input);
        let moved = cursor != self.cursor;
        self.cursor = cursor;
        moved
    }
}

#[derive(Default)]
pub struct FinishPage {
    name: String,
}

impl FinishPage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WizardPage<VariantData> for FinishPage {
    fn title(&self) -> &str {
        "Name"
    }

    fn allow_next(&self, _ctx: &VariantData) -> bool {
        false
    }

    fn allow_finish(&self, ctx: &VariantData) -> bool {
        !self.name.trim().is_empty() && ctx.base.is_some() && ctx.resolved_role().is_some()
    }

    fn on_shown(&mut self, ctx: &VariantData) {
        self.name = if ctx.name.trim().is_empty() {
            ctx.default_name()
        } else {
            ctx.name.clone()
        };
    }

    fn on_next(&mut self, _ctx: &mut VariantData) -> HookResult {
        Ok(false)
    }

    fn on_finish(&mut self, ctx: &mut VariantData) -> HookResult {
        let Some(role) = ctx.resolved_role() else {
            return Ok(false);
        };
        ctx.role = Some(role);
        ctx.name = self.name.trim().to_string();
        Ok(true)
    }

    fn body(&self, ctx: &VariantData) -> Vec<String> {
        let mut lines = vec![format!("Name: {}_", self.name), String::new()];
        if let Some(base) = &ctx.base {
            lines.push(format!("Base: {} (level {})", base.name, base.level));
        }
        if !ctx.templates.is_empty() {
            let names: Vec<&str> = ctx.templates.iter().map(|t| t.name.as_str()).collect();
            lines.push(format!("Templates: {}", names.join(", ")));
        }
        match ctx.resolved_role() {
            Some(role) => lines.push(format!("Role: {}", role.label())),
            None => lines.push("Role: undecided".to_string()),
        }
        lines
    }

    fn handle_input(&mut self, input: PageInput, _ctx: &VariantData) -> bool {
        match input {
            PageInput::Char(c) => {
                self.name.push(c);
                true
            }
            PageInput::Backspace => self.name.pop().is_some(),
            _ => false,
        }
    }
}
