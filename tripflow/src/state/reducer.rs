use super::{autocomplete, AppState, LoadingState, Notice};
use crate::events::DataEvent;
use crate::refresh::RefreshTarget;
use crate::ui::screens::Screen;
use ratatui::widgets::TableState;
use std::cell::RefCell;
use traveler_api::endpoints::categories::is_allowed_category;

pub const OVERLAP_MESSAGE: &str = "This time overlaps another entry for this day";
pub const CREATE_FAILED_MESSAGE: &str = "Could not save trip point";
pub const CREATED_MESSAGE: &str = "Trip point added";

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::TripsLoaded { trips } => {
            if let Screen::Trips(trips_state) = state.current_screen_mut() {
                trips_state.trips = trips;
                trips_state.trips_loading = LoadingState::Loaded;
                trips_state.selected_trip_index = 0;
            }
        }

        DataEvent::TripLoaded { trip } => {
            state.current_trip = Some(*trip.clone());
            if let Screen::Trip(trip_state) = state.current_screen_mut() {
                trip_state.trip = Some(*trip);
                trip_state.trip_loading = LoadingState::Loaded;
                trip_state.selected_day_index = 0;
            }
        }

        DataEvent::TripDayLoaded { day } => {
            if let Screen::TripDay(day_state) = state.current_screen_mut() {
                day_state.day = Some(*day);
                day_state.day_loading = LoadingState::Loaded;
                day_state.table_state = RefCell::new(TableState::default().with_selected(0));
            }
        }

        // The backend catalog is much larger than what the form offers;
        // anything outside the app's category list is dropped here
        DataEvent::CategoriesLoaded { categories } => {
            state.categories = categories
                .into_iter()
                .filter(|category| is_allowed_category(&category.name))
                .collect();
        }

        DataEvent::RecommendationsLoaded { places } => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                add_state.recommendations = autocomplete::filter_usable_places(places);
                add_state.recommendations_loading = LoadingState::Loaded;
                add_state.result_selection_index = 0;
            }
        }

        // Recommendations are best effort; the form works without them
        DataEvent::RecommendationsLoadFailed { error } => {
            tracing::warn!("Failed to load recommendations: {}", error);
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                add_state.recommendations_loading = LoadingState::Loaded;
            }
        }

        DataEvent::SearchResultsLoaded { seq, places } => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                if seq != add_state.search_seq {
                    tracing::debug!(
                        "Discarding stale search response (seq {} != {})",
                        seq,
                        add_state.search_seq
                    );
                    return;
                }
                add_state.search_results = autocomplete::filter_usable_places(places);
                add_state.search_loading = false;
                add_state.result_selection_index = 0;
            }
        }

        // A failed search degrades to an empty result list
        DataEvent::SearchFailed { seq, error } => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                if seq != add_state.search_seq {
                    return;
                }
                tracing::warn!("Place search failed: {}", error);
                add_state.search_results.clear();
                add_state.search_loading = false;
                add_state.result_selection_index = 0;
            }
        }

        DataEvent::PlaceResolved { generation, place } => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                if generation != add_state.resolve_generation {
                    tracing::debug!(
                        "Discarding stale place resolution (generation {} != {})",
                        generation,
                        add_state.resolve_generation
                    );
                    return;
                }
                add_state.draft.apply_place(&place);
                add_state.place_resolving = LoadingState::Loaded;
            }
        }

        // Resolution failure is logged only; the draft keeps whatever
        // the user entered and the address stays editable
        DataEvent::PlaceResolveFailed { generation, error } => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                if generation != add_state.resolve_generation {
                    return;
                }
                tracing::warn!("Place resolution failed: {}", error);
                add_state.draft.clear_place_reference();
                add_state.place_resolving = LoadingState::Loaded;
            }
        }

        DataEvent::TripPointCreated { trip_point } => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                let day_id = add_state.day_id;
                tracing::info!("Created trip point '{}'", trip_point.name);
                state.refresh.mark(RefreshTarget::TripDay(day_id));
                state.navigate_back();
                state.notice = Some(Notice::success(CREATED_MESSAGE));
            }
        }

        DataEvent::TripPointCreateFailed { overlap, error } => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                add_state.submitting = false;
                tracing::error!("Trip point creation failed: {}", error);
                let message = if overlap {
                    OVERLAP_MESSAGE
                } else {
                    CREATE_FAILED_MESSAGE
                };
                state.notice = Some(Notice::error(message));
            }
        }

        DataEvent::LoadError { error } => {
            tracing::error!("Data load error: {}", error);
            match state.current_screen_mut() {
                Screen::Trips(trips_state) => {
                    trips_state.trips_loading = LoadingState::Error(error);
                }
                Screen::Trip(trip_state) => {
                    trip_state.trip_loading = LoadingState::Error(error);
                }
                Screen::TripDay(day_state) => {
                    day_state.day_loading = LoadingState::Error(error);
                }
                Screen::AddTripPoint(..) | Screen::Logs(..) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FlowVariant;
    use crate::state::navigation::NavigationState;
    use crate::state::{AddTripPointState, AppState, TripDayState, TripsState};
    use crate::testing::{sample_add_state, sample_place_details, sample_place_summary};
    use crate::ui::screens::Screen;
    use chrono::NaiveDate;
    use traveler_api::endpoints::categories::Category;
    use traveler_api::endpoints::trip_points::TripPointDetails;
    use traveler_api::endpoints::{Money, TripPointId};
    use traveler_api::OVERLAP_SENTINEL;

    fn state_with_add_screen(variant: FlowVariant) -> AppState {
        let mut state = AppState::with_variant(variant);
        state.navigate_to(Screen::TripDay(TripDayState::default()));
        state.navigate_to(Screen::AddTripPoint(Box::new(sample_add_state(variant))));
        state
    }

    fn add_state(state: &AppState) -> &AddTripPointState {
        match state.current_screen() {
            Screen::AddTripPoint(add_state) => add_state,
            other => panic!("expected add screen, got {:?}", std::mem::discriminant(other)),
        }
    }

    fn sample_trip_point() -> TripPointDetails {
        TripPointDetails {
            id: TripPointId::default(),
            name: "Louvre".to_string(),
            comment: None,
            category_name: Some("museum".to_string()),
            start_time: NaiveDate::from_ymd_opt(2026, 7, 14)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            end_time: NaiveDate::from_ymd_opt(2026, 7, 14)
                .unwrap()
                .and_hms_opt(11, 0, 0)
                .unwrap(),
            predicted_cost: Money::new(0.0),
            place: None,
        }
    }

    #[test]
    fn loaded_categories_are_restricted_to_known_names() {
        let mut state = AppState::new();
        let categories = vec![
            Category {
                id: "c-1".to_string(),
                name: "museum".to_string(),
            },
            Category {
                id: "c-2".to_string(),
                name: "nightclub".to_string(),
            },
            Category {
                id: "c-3".to_string(),
                name: "park".to_string(),
            },
        ];

        reduce_data_event(&mut state, DataEvent::CategoriesLoaded { categories });

        let names: Vec<&str> = state.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["museum", "park"]);
    }

    #[test]
    fn stale_search_results_are_discarded() {
        let mut state = state_with_add_screen(FlowVariant::Wizard);
        if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
            add_state.search_query = "louvre".to_string();
            add_state.search_seq = 5;
            add_state.search_loading = true;
        }

        reduce_data_event(
            &mut state,
            DataEvent::SearchResultsLoaded {
                seq: 3,
                places: vec![sample_place_summary("p-old", "Old result")],
            },
        );
        assert!(add_state(&state).search_results.is_empty());
        assert!(add_state(&state).search_loading);

        reduce_data_event(
            &mut state,
            DataEvent::SearchResultsLoaded {
                seq: 5,
                places: vec![sample_place_summary("p-new", "Louvre")],
            },
        );
        assert_eq!(add_state(&state).search_results.len(), 1);
        assert!(!add_state(&state).search_loading);
    }

    #[test]
    fn search_results_are_quality_filtered() {
        let mut state = state_with_add_screen(FlowVariant::Wizard);
        if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
            add_state.search_seq = 1;
        }

        let mut unusable = sample_place_summary("null", "Placeholder id");
        unusable.subtitle = Some("Somewhere".to_string());

        reduce_data_event(
            &mut state,
            DataEvent::SearchResultsLoaded {
                seq: 1,
                places: vec![unusable, sample_place_summary("p-1", "Louvre")],
            },
        );
        assert_eq!(add_state(&state).search_results.len(), 1);
        assert_eq!(add_state(&state).search_results[0].provider_id.as_str(), "p-1");
    }

    #[test]
    fn stale_place_resolution_is_discarded() {
        let mut state = state_with_add_screen(FlowVariant::Wizard);
        if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
            add_state.resolve_generation = 2;
        }

        reduce_data_event(
            &mut state,
            DataEvent::PlaceResolved {
                generation: 1,
                place: Box::new(sample_place_details("p-stale", "Stale place")),
            },
        );
        assert!(add_state(&state).draft.place.is_none());

        reduce_data_event(
            &mut state,
            DataEvent::PlaceResolved {
                generation: 2,
                place: Box::new(sample_place_details("p-live", "Louvre")),
            },
        );
        assert_eq!(add_state(&state).draft.name.value, "Louvre");
        assert!(add_state(&state).draft.place.is_some());
    }

    #[test]
    fn resolve_failure_keeps_form_usable() {
        let mut state = state_with_add_screen(FlowVariant::Wizard);
        if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
            add_state.resolve_generation = 1;
            add_state.draft.set_name("Typed by hand".to_string());
        }

        reduce_data_event(
            &mut state,
            DataEvent::PlaceResolveFailed {
                generation: 1,
                error: "catalog timeout".to_string(),
            },
        );
        let add = add_state(&state);
        assert_eq!(add.draft.name.value, "Typed by hand");
        assert!(add.draft.address_editable());
        assert_eq!(add.place_resolving, LoadingState::Loaded);
        assert!(state.notice.is_none());
    }

    #[test]
    fn created_trip_point_closes_form_and_marks_refresh() {
        let mut state = state_with_add_screen(FlowVariant::Wizard);
        let day_id = add_state(&state).day_id;

        reduce_data_event(
            &mut state,
            DataEvent::TripPointCreated {
                trip_point: Box::new(sample_trip_point()),
            },
        );

        assert!(matches!(state.current_screen(), Screen::TripDay(..)));
        assert!(state.refresh.is_marked(RefreshTarget::TripDay(day_id)));
        assert_eq!(state.notice.as_ref().map(|n| n.text.as_str()), Some(CREATED_MESSAGE));
    }

    #[test]
    fn overlap_failure_keeps_form_open_with_friendly_message() {
        let mut state = state_with_add_screen(FlowVariant::Wizard);
        if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
            add_state.submitting = true;
            add_state.draft.set_name("Louvre".to_string());
        }

        reduce_data_event(
            &mut state,
            DataEvent::TripPointCreateFailed {
                overlap: true,
                error: OVERLAP_SENTINEL.to_string(),
            },
        );

        let add = add_state(&state);
        assert!(!add.submitting);
        assert_eq!(add.draft.name.value, "Louvre");
        assert_eq!(state.notice.as_ref().map(|n| n.text.as_str()), Some(OVERLAP_MESSAGE));
    }

    #[test]
    fn add_screen_events_are_ignored_after_cancel() {
        let mut state = state_with_add_screen(FlowVariant::Wizard);
        let day_id = add_state(&state).day_id;
        state.navigate_back();

        reduce_data_event(
            &mut state,
            DataEvent::TripPointCreated {
                trip_point: Box::new(sample_trip_point()),
            },
        );

        assert!(matches!(state.current_screen(), Screen::TripDay(..)));
        assert!(state.notice.is_none());
        assert!(!state.refresh.take(RefreshTarget::TripDay(day_id)));
    }

    #[test]
    fn trips_loaded_only_updates_trips_screen() {
        let mut state = AppState::new();
        reduce_data_event(&mut state, DataEvent::TripsLoaded { trips: vec![] });
        if let Screen::Trips(TripsState { trips_loading, .. }) = state.current_screen() {
            assert_eq!(*trips_loading, LoadingState::Loaded);
        } else {
            panic!("expected trips screen");
        }
    }

    #[test]
    fn navigation_state_variants_start_correctly() {
        let wizard = sample_add_state(FlowVariant::Wizard);
        assert!(matches!(wizard.navigation, NavigationState::Step(0)));
        let accordion = sample_add_state(FlowVariant::Accordion);
        assert!(matches!(accordion.navigation, NavigationState::Sections(..)));
    }
}
