use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent};
use crate::input::{Key, KeyEvent};
use crate::settings::FlowVariant;
use crate::state::{AddTripPointState, AppState, TripDayState};
use crate::ui::screens::Screen;
use chrono::NaiveDate;
use traveler_api::endpoints::places::{PlaceDetails, PlaceSummary};
use traveler_api::endpoints::trips::{TripDaySummary, TripDetails};
use traveler_api::endpoints::{ProviderId, TripDayId, TripId};
use uuid::Uuid;

/// Mock data event handler for tests (no real async tasks)
///
/// This handler executes commands synchronously using execute_command_sync,
/// which updates state without spawning background tasks or making API calls.
pub struct MockDataHandler;

impl MockDataHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockDataHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        // Execute command synchronously without spawning tasks
        executor::execute_command_sync(command, state);
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
}

impl TestApp {
    /// Create a new test app with mock handler
    pub fn new() -> Self {
        Self {
            core: AppCore::new(MockDataHandler::new()),
        }
    }

    /// Create a test app already showing the add-trip-point form for a
    /// sample trip and day
    pub fn with_add_form(variant: FlowVariant) -> Self {
        let mut state = AppState::with_variant(variant);
        let trip = sample_trip();
        state.current_trip_id = Some(trip.id);
        state.current_day_id = Some(trip.days[0].id);
        state.current_trip = Some(trip);
        state.navigate_to(Screen::TripDay(TripDayState::default()));

        let mut app = Self {
            core: AppCore::with_state(state, MockDataHandler::new()),
        };
        app.send_command(AppCommand::OpenAddTripPoint {
            attraction_id: None,
        });
        app
    }

    /// Send a single key event
    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    /// Send multiple keys in sequence
    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type a string into whatever accepts characters right now
    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    /// Execute a command directly, bypassing key translation
    pub fn send_command(&mut self, command: AppCommand) {
        let mut handler = MockDataHandler::new();
        handler.execute_with_context(command, self.state_mut());
    }

    /// Inject a data event (simulate an API response)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    /// Get read-only access to current state
    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    /// Mutable state access for test setup
    pub fn state_mut(&mut self) -> &mut AppState {
        self.core.state_mut()
    }

    /// The add-trip-point state, panicking when not on that screen
    pub fn add_state(&self) -> &AddTripPointState {
        match self.state().current_screen() {
            Screen::AddTripPoint(add_state) => add_state,
            other => panic!(
                "Expected add trip point screen, got {:?}",
                std::mem::discriminant(other)
            ),
        }
    }

    /// Assert that the app is on a specific screen type
    ///
    /// Uses discriminant comparison to check screen type without
    /// requiring full equality of state.
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen"
        );
    }

    /// Assert that the app should quit
    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    /// Assert that the app should NOT quit
    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A trip with one day, stable across a test run
pub fn sample_trip() -> TripDetails {
    TripDetails {
        id: TripId::new(Uuid::from_u128(1)),
        name: "Paris in July".to_string(),
        number_of_travelers: 2,
        currency_code: Some("EUR".to_string()),
        days: vec![TripDaySummary {
            id: TripDayId::new(Uuid::from_u128(2)),
            date: NaiveDate::from_ymd_opt(2026, 7, 14),
        }],
    }
}

/// An add-trip-point screen for the sample trip
pub fn sample_add_state(variant: FlowVariant) -> AddTripPointState {
    let trip = sample_trip();
    AddTripPointState::new(
        &trip,
        trip.days[0].id,
        NaiveDate::from_ymd_opt(2026, 7, 14).expect("valid date"),
        variant,
    )
}

pub fn sample_place_summary(provider_id: &str, title: &str) -> PlaceSummary {
    PlaceSummary {
        provider_id: ProviderId::from(provider_id),
        title: Some(title.to_string()),
        subtitle: Some("Paris, France".to_string()),
    }
}

pub fn sample_place_details(provider_id: &str, title: &str) -> PlaceDetails {
    PlaceDetails {
        provider_id: ProviderId::from(provider_id),
        title: Some(title.to_string()),
        subtitle: Some("Paris, France".to_string()),
        country: Some("France".to_string()),
        state: None,
        city: Some("Paris".to_string()),
        street: Some("Rue de Rivoli".to_string()),
        house_number: Some("99".to_string()),
        latitude: Some(48.86),
        longitude: Some(2.33),
        super_category: None,
        attributes: vec![],
    }
}
