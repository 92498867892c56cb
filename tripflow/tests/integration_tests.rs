use chrono::NaiveTime;
use tripflow::events::DataEvent;
use tripflow::input::{Key, KeyEvent};
use tripflow::settings::FlowVariant;
use tripflow::state::form::TripPointDraft;
use tripflow::state::navigation::{NavigationState, Section, WizardStep};
use tripflow::state::reducer::{CREATED_MESSAGE, OVERLAP_MESSAGE};
use tripflow::state::{FormField, NoticeKind, TripDayState};
use tripflow::testing::{sample_place_details, sample_place_summary, sample_trip, TestApp};
use tripflow::ui::screens::Screen;
use traveler_api::endpoints::trips::TripSummary;

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn sample_trips(names: &[&str]) -> Vec<TripSummary> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| TripSummary {
            id: uuid::Uuid::from_u128(100 + i as u128).into(),
            name: name.to_string(),
            start_date: None,
            end_date: None,
            number_of_travelers: 2,
            currency_code: Some("EUR".to_string()),
        })
        .collect()
}

/// Pins the draft clock so time tests do not depend on when they run
fn set_draft_times(app: &mut TestApp, start: NaiveTime) {
    if let Screen::AddTripPoint(add_state) = app.state_mut().current_screen_mut() {
        add_state.draft = TripPointDraft::starting_at(start);
    }
}

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();
    app.assert_not_quit();
    app.send_key(Key::Char('q'));
    app.assert_should_quit();
}

#[test]
fn test_help_toggle() {
    let mut app = TestApp::new();
    assert!(!app.state().help_visible);

    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_multi_key_sequence_gg() {
    let mut app = TestApp::new();
    assert_eq!(app.state().pending_key, None);

    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));

    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, None);

    if let Screen::Trips(trips_state) = app.state().current_screen() {
        assert_eq!(trips_state.selected_trip_index, 0);
    }
}

#[test]
fn test_trip_list_navigation() {
    let mut app = TestApp::new();
    app.send_data_event(DataEvent::TripsLoaded {
        trips: sample_trips(&["Paris", "Rome", "Lisbon"]),
    });

    app.send_key(Key::Char('j'));
    app.send_key(Key::Char('j'));
    if let Screen::Trips(trips_state) = app.state().current_screen() {
        assert_eq!(trips_state.selected_trip_index, 2);
    } else {
        panic!("expected trips screen");
    }

    // Wraps around at the bottom
    app.send_key(Key::Char('j'));
    if let Screen::Trips(trips_state) = app.state().current_screen() {
        assert_eq!(trips_state.selected_trip_index, 0);
    }

    app.send_key(Key::Char('k'));
    if let Screen::Trips(trips_state) = app.state().current_screen() {
        assert_eq!(trips_state.selected_trip_index, 2);
    }
}

#[test]
fn test_n_opens_form_from_trip_day() {
    let mut app = TestApp::new();
    let trip = sample_trip();
    app.state_mut().current_trip_id = Some(trip.id);
    app.state_mut().current_day_id = Some(trip.days[0].id);
    app.state_mut().current_trip = Some(trip);
    app.state_mut()
        .navigate_to(Screen::TripDay(TripDayState::default()));

    app.send_key(Key::Char('n'));

    let add = app.add_state();
    assert!(add.search_active());
    assert_eq!(add.navigation.current_step(), Some(WizardStep::Place));
    assert_eq!(add.day_date.to_string(), "2026-07-14");
}

#[test]
fn test_short_query_does_not_search() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);

    app.type_str("lo");
    assert!(!app.add_state().search_loading);
    assert!(app.add_state().search_results.is_empty());

    // Third character crosses the minimum query length
    app.type_str("u");
    assert!(app.add_state().search_loading);
}

#[test]
fn test_stale_search_response_is_ignored() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.type_str("louvre");
    let seq = app.add_state().search_seq;

    app.send_data_event(DataEvent::SearchResultsLoaded {
        seq: seq - 1,
        places: vec![sample_place_summary("p-old", "Old result")],
    });
    assert!(app.add_state().search_results.is_empty());
    assert!(app.add_state().search_loading);

    app.send_data_event(DataEvent::SearchResultsLoaded {
        seq,
        places: vec![sample_place_summary("p-1", "Louvre")],
    });
    assert_eq!(app.add_state().search_results.len(), 1);
    assert!(!app.add_state().search_loading);
}

#[test]
fn test_shrinking_query_below_minimum_clears_results() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.type_str("louvre");
    let seq = app.add_state().search_seq;
    app.send_data_event(DataEvent::SearchResultsLoaded {
        seq,
        places: vec![sample_place_summary("p-1", "Louvre")],
    });
    assert_eq!(app.add_state().visible_places().len(), 1);

    app.send_keys(&[Key::Backspace, Key::Backspace, Key::Backspace, Key::Backspace]);
    assert_eq!(app.add_state().search_query, "lo");
    assert!(app.add_state().search_results.is_empty());
    assert!(!app.add_state().search_loading);
}

#[test]
fn test_recommendations_shown_without_query() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.send_data_event(DataEvent::RecommendationsLoaded {
        places: vec![
            sample_place_summary("p-1", "Louvre"),
            sample_place_summary("p-2", "Eiffel Tower"),
        ],
    });

    assert_eq!(app.add_state().visible_places().len(), 2);

    // A live search takes over the list, recommendations come back
    // when the query shrinks again
    app.type_str("mus");
    assert!(app.add_state().visible_places().is_empty());
    app.send_key(Key::Backspace);
    assert_eq!(app.add_state().visible_places().len(), 2);
}

#[test]
fn test_selecting_place_advances_and_locks_address() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.type_str("louvre");
    let seq = app.add_state().search_seq;
    app.send_data_event(DataEvent::SearchResultsLoaded {
        seq,
        places: vec![sample_place_summary("p-1", "Louvre")],
    });

    app.send_key(Key::Enter);

    let add = app.add_state();
    assert_eq!(add.navigation.current_step(), Some(WizardStep::Basic));
    assert!(add.draft.place.is_some());
    assert_eq!(add.current_field, Some(FormField::Name));
    let generation = add.resolve_generation;

    app.send_data_event(DataEvent::PlaceResolved {
        generation,
        place: Box::new(sample_place_details("p-1", "Louvre")),
    });

    let add = app.add_state();
    assert_eq!(add.draft.name.value, "Louvre");
    assert_eq!(add.draft.city.value, "Paris");
    assert!(!add.draft.address_editable());
}

#[test]
fn test_place_owned_address_rejects_edits() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.type_str("louvre");
    let seq = app.add_state().search_seq;
    app.send_data_event(DataEvent::SearchResultsLoaded {
        seq,
        places: vec![sample_place_summary("p-1", "Louvre")],
    });
    app.send_key(Key::Enter);
    let generation = app.add_state().resolve_generation;
    app.send_data_event(DataEvent::PlaceResolved {
        generation,
        place: Box::new(sample_place_details("p-1", "Louvre")),
    });

    // Walk to the address step and try to type into a field
    app.send_key(Key::Enter);
    assert_eq!(
        app.add_state().navigation.current_step(),
        Some(WizardStep::Address)
    );
    app.send_key(Key::Tab);
    assert_eq!(app.add_state().current_field, Some(FormField::StateRegion));
    let city_before = app.add_state().draft.city.value.clone();
    app.send_keys(&[Key::Char('x'), Key::Char('y')]);
    assert_eq!(app.add_state().draft.city.value, city_before);
    assert_eq!(app.add_state().draft.state_region.value, "");
}

#[test]
fn test_stale_place_resolution_is_ignored() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.type_str("louvre");
    let seq = app.add_state().search_seq;
    app.send_data_event(DataEvent::SearchResultsLoaded {
        seq,
        places: vec![
            sample_place_summary("p-1", "Louvre"),
            sample_place_summary("p-2", "Louvre Annex"),
        ],
    });
    app.send_key(Key::Enter);
    let stale_generation = app.add_state().resolve_generation;

    // Back to the place step, pick a different place before the first
    // resolution lands
    app.send_key(Key::Esc);
    app.type_str("louvre");
    let seq = app.add_state().search_seq;
    app.send_data_event(DataEvent::SearchResultsLoaded {
        seq,
        places: vec![
            sample_place_summary("p-1", "Louvre"),
            sample_place_summary("p-2", "Louvre Annex"),
        ],
    });
    app.send_key(Key::Down);
    app.send_key(Key::Enter);

    app.send_data_event(DataEvent::PlaceResolved {
        generation: stale_generation,
        place: Box::new(sample_place_details("p-1", "Louvre")),
    });

    let add = app.add_state();
    assert_eq!(
        add.draft.place.as_ref().map(|p| p.display_name.as_str()),
        Some("Louvre Annex")
    );
    // The stale payload must not have filled any fields
    assert_eq!(add.draft.city.value, "");
}

#[test]
fn test_resolve_failure_keeps_manual_entry_open() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.type_str("louvre");
    let seq = app.add_state().search_seq;
    app.send_data_event(DataEvent::SearchResultsLoaded {
        seq,
        places: vec![sample_place_summary("p-1", "Louvre")],
    });
    app.send_key(Key::Enter);
    let generation = app.add_state().resolve_generation;

    app.send_data_event(DataEvent::PlaceResolveFailed {
        generation,
        error: "catalog timeout".to_string(),
    });

    let add = app.add_state();
    assert!(add.draft.place.is_none());
    assert!(add.draft.address_editable());
    assert!(app.state().notice.is_none());

    // The form is still usable end to end
    app.type_str("Louvre");
    assert_eq!(app.add_state().draft.name.value, "Louvre");
}

#[test]
fn test_ctrl_m_switches_to_manual_entry() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('m')));

    let add = app.add_state();
    assert_eq!(add.navigation.current_step(), Some(WizardStep::Basic));
    assert_eq!(add.current_field, Some(FormField::Name));
    assert!(add.draft.address_editable());
}

#[test]
fn test_time_editing_is_asymmetric() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('s')));
    set_draft_times(&mut app, time(10, 0));

    // Name -> Category -> StartTime
    app.send_command(tripflow::events::AppCommand::FocusNextField);
    app.send_command(tripflow::events::AppCommand::FocusNextField);
    assert_eq!(app.add_state().current_field, Some(FormField::StartTime));

    // Moving the start past the end drags the end along
    for _ in 0..5 {
        app.send_key(Key::Up);
    }
    assert_eq!(app.add_state().draft.start_time, time(11, 15));
    assert_eq!(app.add_state().draft.end_time, time(11, 15));
    assert!(app.add_state().draft.time_error.is_none());

    // Moving the end before the start is flagged, never corrected
    app.send_key(Key::Tab);
    assert_eq!(app.add_state().current_field, Some(FormField::EndTime));
    app.send_key(Key::Down);
    assert_eq!(app.add_state().draft.end_time, time(11, 0));
    assert_eq!(app.add_state().draft.start_time, time(11, 15));
    assert!(app.add_state().draft.time_error.is_some());
}

#[test]
fn test_step_gate_blocks_advancing_without_name() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('s')));
    assert_eq!(
        app.add_state().navigation.current_step(),
        Some(WizardStep::Basic)
    );

    app.send_key(Key::Enter);
    let add = app.add_state();
    assert_eq!(add.navigation.current_step(), Some(WizardStep::Basic));
    assert_eq!(add.validation_error.as_deref(), Some("Name is required"));

    app.type_str("Louvre");
    app.send_key(Key::Enter);
    let add = app.add_state();
    assert_eq!(add.navigation.current_step(), Some(WizardStep::Address));
    assert_eq!(add.validation_error, None);
}

#[test]
fn test_submission_jumps_to_first_invalid_section() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('s')));
    app.type_str("Louvre");
    if let Screen::AddTripPoint(add_state) = app.state_mut().current_screen_mut() {
        add_state.draft.set_cost_input("abc".to_string());
    }

    app.send_command(tripflow::events::AppCommand::SubmitTripPoint);

    let add = app.add_state();
    assert!(!add.submitting);
    assert_eq!(add.navigation.current_step(), Some(WizardStep::Cost));
    assert_eq!(
        add.validation_error.as_deref(),
        Some("Cost must be a non-negative number")
    );
}

#[test]
fn test_successful_submission_closes_form() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    let day_id = app.add_state().day_id;
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('s')));
    app.type_str("Louvre");

    app.send_command(tripflow::events::AppCommand::SubmitTripPoint);
    assert!(app.add_state().submitting);

    let trip_point = traveler_api::endpoints::trip_points::TripPointDetails {
        id: Default::default(),
        name: "Louvre".to_string(),
        comment: None,
        category_name: Some("tourism".to_string()),
        start_time: chrono::NaiveDate::from_ymd_opt(2026, 7, 14)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
        end_time: chrono::NaiveDate::from_ymd_opt(2026, 7, 14)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap(),
        predicted_cost: Default::default(),
        place: None,
    };
    app.send_data_event(DataEvent::TripPointCreated {
        trip_point: Box::new(trip_point),
    });

    assert!(matches!(app.state().current_screen(), Screen::TripDay(..)));
    assert!(app
        .state()
        .refresh
        .is_marked(tripflow::refresh::RefreshTarget::TripDay(day_id)));
    let notice = app.state().notice.as_ref().expect("success notice");
    assert_eq!(notice.text, CREATED_MESSAGE);
    assert_eq!(notice.kind, NoticeKind::Success);
}

#[test]
fn test_overlap_failure_keeps_form_open() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('s')));
    app.type_str("Louvre");
    app.send_command(tripflow::events::AppCommand::SubmitTripPoint);
    assert!(app.add_state().submitting);

    app.send_data_event(DataEvent::TripPointCreateFailed {
        overlap: true,
        error: "trip point overlap".to_string(),
    });

    let add = app.add_state();
    assert!(!add.submitting);
    assert_eq!(add.draft.name.value, "Louvre");
    let notice = app.state().notice.as_ref().expect("error notice");
    assert_eq!(notice.text, OVERLAP_MESSAGE);
    assert_eq!(notice.kind, NoticeKind::Error);
}

#[test]
fn test_accordion_sections_and_field_focus() {
    let mut app = TestApp::with_add_form(FlowVariant::Accordion);
    assert!(matches!(
        app.add_state().navigation,
        NavigationState::Sections(..)
    ));
    assert!(app.add_state().search_active());

    // Typing with no field focused feeds the search box
    app.type_str("lou");
    assert_eq!(app.add_state().search_query, "lou");

    app.send_key_event(KeyEvent::with_alt(Key::Char('b')));
    assert!(app.add_state().navigation.is_expanded(Section::Basic));

    // Tab moves focus into the newly expanded section
    app.send_key(Key::Tab);
    assert_eq!(app.add_state().current_field, Some(FormField::Name));
    app.type_str("Louvre");
    assert_eq!(app.add_state().draft.name.value, "Louvre");
    assert_eq!(app.add_state().search_query, "lou");

    // Shift+Tab from the first field wraps back to the search box
    app.send_key(Key::BackTab);
    assert_eq!(app.add_state().current_field, None);
}

#[test]
fn test_accordion_submit_expands_offending_section() {
    let mut app = TestApp::with_add_form(FlowVariant::Accordion);
    assert!(!app.add_state().navigation.is_expanded(Section::Basic));

    app.send_command(tripflow::events::AppCommand::SubmitTripPoint);

    let add = app.add_state();
    assert!(!add.submitting);
    assert!(add.navigation.is_expanded(Section::Basic));
    assert_eq!(add.validation_error.as_deref(), Some("Name is required"));
}

#[test]
fn test_esc_cancels_form_and_returns_to_day() {
    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.send_key(Key::Esc);
    assert!(matches!(app.state().current_screen(), Screen::TripDay(..)));

    // Late responses for the dead form are dropped on the floor
    app.send_data_event(DataEvent::SearchResultsLoaded {
        seq: 1,
        places: vec![sample_place_summary("p-1", "Louvre")],
    });
    assert!(matches!(app.state().current_screen(), Screen::TripDay(..)));
}

#[test]
fn test_refresh_mark_is_one_shot() {
    let mut app = TestApp::new();
    let day_id = sample_trip().days[0].id;
    let target = tripflow::refresh::RefreshTarget::TripDay(day_id);

    app.state_mut().refresh.mark(target);
    assert!(app.state_mut().refresh.take(target));
    assert!(!app.state_mut().refresh.take(target));
}

#[test]
fn test_category_cycling_stays_within_known_names() {
    use traveler_api::endpoints::categories::{is_allowed_category, Category};

    let mut app = TestApp::with_add_form(FlowVariant::Wizard);
    app.send_data_event(DataEvent::CategoriesLoaded {
        categories: vec![
            Category {
                id: "c-1".to_string(),
                name: "museum".to_string(),
            },
            Category {
                id: "c-2".to_string(),
                name: "nightclub".to_string(),
            },
        ],
    });

    // Cycle far enough to visit every loaded category in both directions
    for _ in 0..4 {
        app.send_command(tripflow::events::AppCommand::CycleCategory { forward: true });
        assert!(is_allowed_category(&app.add_state().draft.category_name));
    }
    for _ in 0..4 {
        app.send_command(tripflow::events::AppCommand::CycleCategory { forward: false });
        assert!(is_allowed_category(&app.add_state().draft.category_name));
    }
}

#[test]
fn test_deep_linked_attraction_prefills_place() {
    let mut app = TestApp::new();
    {
        let state = app.state_mut();
        let trip = sample_trip();
        state.current_trip_id = Some(trip.id);
        state.current_day_id = Some(trip.days[0].id);
        state.current_trip = Some(trip);
        state.navigate_to(Screen::TripDay(TripDayState::default()));
    }

    app.send_command(tripflow::events::AppCommand::OpenAddTripPoint {
        attraction_id: Some("att-1".into()),
    });

    let add = app.add_state();
    assert_eq!(add.resolve_generation, 1);
    assert!(matches!(
        add.place_resolving,
        tripflow::state::LoadingState::Loading(..)
    ));

    app.send_data_event(DataEvent::PlaceResolved {
        generation: 1,
        place: Box::new(sample_place_details("att-1", "Eiffel Tower")),
    });

    let add = app.add_state();
    assert_eq!(add.draft.name.value, "Eiffel Tower");
    assert_eq!(add.draft.city.value, "Paris");
    assert!(!add.draft.address_editable());
}
