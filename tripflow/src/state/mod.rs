pub mod autocomplete;
pub mod form;
pub mod navigation;
pub mod reducer;
pub mod validators;

use crate::refresh::RefreshRegistry;
use crate::settings::FlowVariant;
use crate::ui::screens::Screen;
use itertools::Itertools;
use ratatui::widgets::TableState;
use std::cell::RefCell;
use throbber_widgets_tui::ThrobberState;
use traveler_api::endpoints::{
    categories::Category,
    places::PlaceSummary,
    trip_days::TripDayDetails,
    trip_points::TripPointDetails,
    trips::{TripDetails, TripSummary},
    ProviderId, TripDayId, TripId,
};

use chrono::NaiveDate;
use form::TripPointDraft;
use navigation::{NavigationState, Section, WizardStep};

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

/// Focusable fields of the add-trip-point form, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Category,
    StartTime,
    EndTime,
    Country,
    StateRegion,
    City,
    Street,
    HouseNumber,
    Cost,
    CostKind,
    Comment,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Category => "Category",
            FormField::StartTime => "Start",
            FormField::EndTime => "End",
            FormField::Country => "Country",
            FormField::StateRegion => "State/Region",
            FormField::City => "City",
            FormField::Street => "Street",
            FormField::HouseNumber => "House no.",
            FormField::Cost => "Cost",
            FormField::CostKind => "Cost type",
            FormField::Comment => "Notes",
        }
    }
}

/// Fields belonging to a form section, in focus order.
pub fn section_fields(section: Section) -> &'static [FormField] {
    match section {
        Section::Place => &[],
        Section::Basic => &[
            FormField::Name,
            FormField::Category,
            FormField::StartTime,
            FormField::EndTime,
        ],
        Section::Address => &[
            FormField::Country,
            FormField::StateRegion,
            FormField::City,
            FormField::Street,
            FormField::HouseNumber,
        ],
        Section::Cost => &[FormField::Cost, FormField::CostKind],
        Section::Notes => &[FormField::Comment],
    }
}

/// Transient status line shown above the help bar, expired by ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub ticks_remaining: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl Notice {
    // At the 100ms tick rate these are roughly 5s and 8s.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Success,
            ticks_remaining: 50,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
            ticks_remaining: 80,
        }
    }
}

pub struct AppState {
    pub history: Vec<Screen>,

    // Navigation state
    pub current_trip_id: Option<TripId>,
    pub current_trip: Option<TripDetails>,
    pub current_day_id: Option<TripDayId>,

    // Shared data
    pub categories: Vec<Category>,

    // Cross-screen refresh coordination
    pub refresh: RefreshRegistry,

    // Deep-link attraction waiting for its day to finish loading
    pub pending_attraction: Option<ProviderId>,

    // Which add-trip-point flow variant new forms open with
    pub flow_variant: FlowVariant,

    // UI state
    pub help_visible: bool,
    pub pending_key: Option<char>,
    pub notice: Option<Notice>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_variant(FlowVariant::default())
    }

    pub fn with_variant(flow_variant: FlowVariant) -> Self {
        Self {
            history: vec![Screen::Trips(TripsState::default())],

            current_trip_id: None,
            current_trip: None,
            current_day_id: None,

            categories: Vec::new(),

            refresh: RefreshRegistry::new(),

            pending_attraction: None,

            flow_variant,

            help_visible: false,
            pending_key: None,
            notice: None,

            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("Navigation stack should never be empty")
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            tracing::debug!(
                "Navigating back, stack depth: {} -> {}",
                self.history.len(),
                self.history.len() - 1
            );
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        match self.current_screen_mut() {
            Screen::Trips(state) => {
                if let LoadingState::Loading(ref mut throbber_state) = state.trips_loading {
                    return Some(throbber_state);
                }
            }
            Screen::Trip(state) => {
                if let LoadingState::Loading(ref mut throbber_state) = state.trip_loading {
                    return Some(throbber_state);
                }
            }
            Screen::TripDay(state) => {
                if let LoadingState::Loading(ref mut throbber_state) = state.day_loading {
                    return Some(throbber_state);
                }
            }
            Screen::AddTripPoint(state) => {
                if let LoadingState::Loading(ref mut throbber_state) = state.place_resolving {
                    return Some(throbber_state);
                }
                if let LoadingState::Loading(ref mut throbber_state) =
                    state.recommendations_loading
                {
                    return Some(throbber_state);
                }
            }
            Screen::Logs(_) => {
                // Logs screen has no loading state
            }
        }
        None
    }

    /// Count down the active notice; drop it when it expires.
    pub fn tick_notice(&mut self) {
        if let Some(notice) = &mut self.notice {
            notice.ticks_remaining = notice.ticks_remaining.saturating_sub(1);
            if notice.ticks_remaining == 0 {
                self.notice = None;
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default, Debug, Clone)]
pub struct TripsState {
    pub trips: Vec<TripSummary>,
    pub trips_loading: LoadingState,
    pub selected_trip_index: usize,
}

#[derive(Default, Debug, Clone)]
pub struct TripState {
    pub trip: Option<TripDetails>,
    pub trip_loading: LoadingState,
    pub selected_day_index: usize,
}

#[derive(Default, Debug, Clone)]
pub struct TripDayState {
    pub day: Option<TripDayDetails>,
    pub day_loading: LoadingState,
    pub table_state: RefCell<TableState>,
}

impl TripDayState {
    /// Trip points of the day ordered by start time.
    pub fn sorted_points(&self) -> Vec<&TripPointDetails> {
        self.day
            .iter()
            .flat_map(|day| day.trip_points.iter())
            .sorted_by_key(|point| point.start_time)
            .collect()
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

/// State for the add-trip-point form screen.
#[derive(Debug, Clone)]
pub struct AddTripPointState {
    pub trip_id: TripId,
    pub day_id: TripDayId,
    pub day_date: NaiveDate,
    pub number_of_travelers: u32,
    pub currency_code: Option<String>,

    pub variant: FlowVariant,
    pub navigation: NavigationState,
    pub draft: TripPointDraft,
    pub current_field: Option<FormField>,

    // Place search
    pub search_query: String,
    pub search_results: Vec<PlaceSummary>,
    pub search_seq: u64,
    pub search_loading: bool,
    pub recommendations: Vec<PlaceSummary>,
    pub recommendations_loading: LoadingState,
    pub result_selection_index: usize,

    // Place resolution
    pub resolve_generation: u64,
    pub place_resolving: LoadingState,

    pub submitting: bool,
    pub validation_error: Option<String>,
}

impl AddTripPointState {
    pub fn new(
        trip: &TripDetails,
        day_id: TripDayId,
        day_date: NaiveDate,
        variant: FlowVariant,
    ) -> Self {
        Self {
            trip_id: trip.id,
            day_id,
            day_date,
            number_of_travelers: trip.number_of_travelers,
            currency_code: trip.currency_code.clone(),

            variant,
            navigation: NavigationState::for_variant(variant),
            draft: TripPointDraft::new(),
            current_field: None,

            search_query: String::new(),
            search_results: Vec::new(),
            search_seq: 0,
            search_loading: false,
            recommendations: Vec::new(),
            recommendations_loading: LoadingState::default(),
            result_selection_index: 0,

            resolve_generation: 0,
            place_resolving: LoadingState::default(),

            submitting: false,
            validation_error: None,
        }
    }

    /// Whether typed characters feed the place search box.
    pub fn search_active(&self) -> bool {
        match self.variant {
            FlowVariant::Wizard => self.navigation.current_step() == Some(WizardStep::Place),
            FlowVariant::Accordion => {
                self.current_field.is_none() && self.navigation.is_expanded(Section::Place)
            }
        }
    }

    /// The place list currently shown: search results while a query of
    /// usable length is present, recommendations otherwise.
    pub fn visible_places(&self) -> &[PlaceSummary] {
        if self.search_query.trim().len() >= autocomplete::MIN_QUERY_LEN {
            &self.search_results
        } else {
            &self.recommendations
        }
    }

    pub fn selected_place(&self) -> Option<&PlaceSummary> {
        self.visible_places().get(self.result_selection_index)
    }

    /// Fields reachable by Tab in the current navigation state.
    pub fn active_fields(&self) -> Vec<FormField> {
        match &self.navigation {
            NavigationState::Step(..) => self
                .navigation
                .current_step()
                .and_then(WizardStep::section)
                .map(|section| section_fields(section).to_vec())
                .unwrap_or_default(),
            NavigationState::Sections(..) => [
                Section::Basic,
                Section::Address,
                Section::Cost,
                Section::Notes,
            ]
            .into_iter()
            .filter(|section| self.navigation.is_expanded(*section))
            .flat_map(|section| section_fields(section).iter().copied())
            .collect(),
        }
    }

    pub fn focus_next_field(&mut self) {
        let fields = self.active_fields();
        if fields.is_empty() {
            return;
        }
        self.current_field = match self.current_field {
            None => fields.first().copied(),
            Some(current) => {
                let position = fields.iter().position(|field| *field == current);
                match position {
                    Some(index) if index + 1 < fields.len() => Some(fields[index + 1]),
                    // Wraps to the search box in the accordion variant
                    _ if self.variant == FlowVariant::Accordion
                        && self.navigation.is_expanded(Section::Place) =>
                    {
                        None
                    }
                    _ => fields.first().copied(),
                }
            }
        };
    }

    pub fn focus_prev_field(&mut self) {
        let fields = self.active_fields();
        if fields.is_empty() {
            return;
        }
        self.current_field = match self.current_field {
            None => fields.last().copied(),
            Some(current) => {
                let position = fields.iter().position(|field| *field == current);
                match position {
                    Some(0) | None
                        if self.variant == FlowVariant::Accordion
                            && self.navigation.is_expanded(Section::Place) =>
                    {
                        None
                    }
                    Some(0) | None => fields.last().copied(),
                    Some(index) => Some(fields[index - 1]),
                }
            }
        };
    }
}

pub trait Scrollable {
    fn num_items(&self) -> usize;
    fn table_state(&self) -> &RefCell<TableState>;

    fn select_prev(&mut self) {
        let mut table_state = self.table_state().borrow_mut();
        if self.num_items() > 0 {
            if table_state.selected().unwrap_or(0) == 0 {
                table_state.select_last();
            } else {
                table_state.scroll_up_by(1)
            }
        }
    }

    fn select_next(&mut self) {
        let num_items = self.num_items();
        let mut table_state = self.table_state().borrow_mut();
        if num_items > 0 {
            if table_state.selected().unwrap_or(num_items - 1) == num_items - 1 {
                table_state.select_first();
            } else {
                table_state.scroll_down_by(1)
            }
        }
    }
}

impl Scrollable for TripDayState {
    fn num_items(&self) -> usize {
        self.sorted_points().len()
    }

    fn table_state(&self) -> &RefCell<TableState> {
        &self.table_state
    }
}
