use traveler_api::endpoints::{
    categories::Category,
    places::{PlaceDetails, PlaceSummary},
    trip_days::TripDayDetails,
    trip_points::TripPointDetails,
    trips::{TripDetails, TripSummary},
    ProviderId, TripDayId, TripId,
};

use crate::state::navigation::Section;

/// Commands to execute (user actions → state changes and background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectNext,
    SelectPrevious,
    NavigateToTop,
    NavigateToBottom,

    // Navigation
    NavigateBack,
    NavigateToLogs,

    // Data loading
    LoadTrips,
    LoadTrip {
        trip_id: TripId,
    },
    LoadTripDay {
        trip_id: TripId,
        day_id: TripDayId,
    },
    LoadCategories,

    // Add-trip-point form lifecycle
    OpenAddTripPoint {
        /// Deep-link entry: pre-resolve this attraction into the draft.
        attraction_id: Option<ProviderId>,
    },
    CancelAddTripPoint,
    SubmitTripPoint,

    // Place search
    AppendSearchChar(char),
    DeleteSearchChar,
    ClearSearch,
    SelectResultNext,
    SelectResultPrevious,
    ConfirmPlaceSelection,
    ChooseManualEntry,
    SkipPlace,

    // Form navigation
    NextStep,
    PrevStep,
    ToggleSection(Section),
    FocusNextField,
    FocusPrevField,

    // Field editing
    AppendFieldChar(char),
    DeleteFieldChar,
    ClearField,
    CycleCategory {
        forward: bool,
    },
    ToggleCostType,
    AdjustTime {
        minutes: i32,
    },

    // Logs screen
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,

    // UI state
    ToggleHelp,
    DismissNotice,
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// Events from background data operations → state updates
#[derive(Debug, Clone, PartialEq)]
pub enum DataEvent {
    TripsLoaded {
        trips: Vec<TripSummary>,
    },
    TripLoaded {
        trip: Box<TripDetails>,
    },
    TripDayLoaded {
        day: Box<TripDayDetails>,
    },
    CategoriesLoaded {
        categories: Vec<Category>,
    },

    RecommendationsLoaded {
        places: Vec<PlaceSummary>,
    },
    RecommendationsLoadFailed {
        error: String,
    },

    /// Search responses carry the sequence number of the query they
    /// answer; stale responses are discarded by the reducer.
    SearchResultsLoaded {
        seq: u64,
        places: Vec<PlaceSummary>,
    },
    SearchFailed {
        seq: u64,
        error: String,
    },

    PlaceResolved {
        generation: u64,
        place: Box<PlaceDetails>,
    },
    PlaceResolveFailed {
        generation: u64,
        error: String,
    },

    TripPointCreated {
        trip_point: Box<TripPointDetails>,
    },
    TripPointCreateFailed {
        overlap: bool,
        error: String,
    },

    LoadError {
        error: String,
    },
}
