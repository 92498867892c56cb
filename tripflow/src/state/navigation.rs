//! Step and section navigation for the add-trip-point form.
//!
//! The wizard variant walks a fixed step sequence with per-step gating;
//! the accordion variant shows every section at once and only gates at
//! submission.

use std::collections::HashSet;

use crate::settings::FlowVariant;
use crate::state::form::TripPointDraft;
use crate::state::validators;

/// Logical grouping of form fields, shared by both flow variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Place,
    Basic,
    Address,
    Cost,
    Notes,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Place => "Place",
            Section::Basic => "Basics",
            Section::Address => "Address",
            Section::Cost => "Cost",
            Section::Notes => "Notes",
        }
    }
}

/// Ordered wizard steps. `Summary` exists only in the wizard variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Place,
    Basic,
    Address,
    Cost,
    Notes,
    Summary,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Place,
        WizardStep::Basic,
        WizardStep::Address,
        WizardStep::Cost,
        WizardStep::Notes,
        WizardStep::Summary,
    ];

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Summary => "Summary",
            WizardStep::Place => Section::Place.title(),
            WizardStep::Basic => Section::Basic.title(),
            WizardStep::Address => Section::Address.title(),
            WizardStep::Cost => Section::Cost.title(),
            WizardStep::Notes => Section::Notes.title(),
        }
    }

    pub fn section(self) -> Option<Section> {
        match self {
            WizardStep::Place => Some(Section::Place),
            WizardStep::Basic => Some(Section::Basic),
            WizardStep::Address => Some(Section::Address),
            WizardStep::Cost => Some(Section::Cost),
            WizardStep::Notes => Some(Section::Notes),
            WizardStep::Summary => None,
        }
    }
}

/// Position within the form, per flow variant.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationState {
    /// Wizard: index into [`WizardStep::ALL`].
    Step(usize),
    /// Accordion: the set of expanded sections.
    Sections(HashSet<Section>),
}

impl NavigationState {
    pub fn for_variant(variant: FlowVariant) -> Self {
        match variant {
            FlowVariant::Wizard => NavigationState::Step(0),
            FlowVariant::Accordion => {
                let mut expanded = HashSet::new();
                expanded.insert(Section::Place);
                NavigationState::Sections(expanded)
            }
        }
    }

    pub fn current_step(&self) -> Option<WizardStep> {
        match self {
            NavigationState::Step(index) => WizardStep::ALL.get(*index).copied(),
            NavigationState::Sections(..) => None,
        }
    }

    pub fn step_index(&self) -> Option<usize> {
        match self {
            NavigationState::Step(index) => Some(*index),
            NavigationState::Sections(..) => None,
        }
    }

    pub fn is_expanded(&self, section: Section) -> bool {
        match self {
            NavigationState::Step(..) => self
                .current_step()
                .and_then(WizardStep::section)
                .is_some_and(|current| current == section),
            NavigationState::Sections(expanded) => expanded.contains(&section),
        }
    }

    /// Accordion only. No-op in the wizard variant.
    pub fn toggle(&mut self, section: Section) {
        if let NavigationState::Sections(expanded) = self {
            if !expanded.remove(&section) {
                expanded.insert(section);
            }
        }
    }

    /// Expand a section without collapsing the rest.
    pub fn expand(&mut self, section: Section) {
        match self {
            NavigationState::Sections(expanded) => {
                expanded.insert(section);
            }
            NavigationState::Step(index) => {
                if let Some(position) = WizardStep::ALL
                    .iter()
                    .position(|step| step.section() == Some(section))
                {
                    *index = position;
                }
            }
        }
    }
}

/// What blocks advancing out of a wizard step, if anything.
pub fn step_gate(draft: &TripPointDraft, step: WizardStep) -> Result<(), String> {
    match step {
        WizardStep::Basic => {
            validators::validate_name(&draft.name.value)?;
            if let Some(error) = &draft.time_error {
                return Err(error.clone());
            }
            Ok(())
        }
        WizardStep::Cost => validators::validate_cost(&draft.cost_input.value),
        WizardStep::Place
        | WizardStep::Address
        | WizardStep::Notes
        | WizardStep::Summary => Ok(()),
    }
}

/// First section holding an invalid value, used by the accordion to
/// expand the offending section at submission.
pub fn first_invalid_section(draft: &TripPointDraft) -> Option<(Section, String)> {
    if let Err(error) = validators::validate_name(&draft.name.value) {
        return Some((Section::Basic, error));
    }
    if let Some(error) = &draft.time_error {
        return Some((Section::Basic, error.clone()));
    }
    if let Err(error) = validators::validate_cost(&draft.cost_input.value) {
        return Some((Section::Cost, error));
    }
    None
}
