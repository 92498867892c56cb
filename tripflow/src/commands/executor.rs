use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::events::AppCommand;
use crate::refresh::RefreshTarget;
use crate::settings::FlowVariant;
use crate::state::autocomplete::MIN_QUERY_LEN;
use crate::state::navigation::{NavigationState, Section, WizardStep};
use crate::state::*;
use crate::ui::screens::Screen;
use crate::utils::time::shift_minutes;
use chrono::Local;
use throbber_widgets_tui::ThrobberState;
use traveler_api::endpoints::categories::CATEGORY_NAMES;
use traveler_api::endpoints::trip_points::NewTripPoint;
use traveler_api::endpoints::{TripDayId, TripId};

const SEARCH_TASK_ID: &str = "place-search";
const RESOLVE_TASK_ID: &str = "place-resolve";

/// Execute a command by updating state and spawning background tasks
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    match command {
        AppCommand::LoadTrips => {
            match state.current_screen_mut() {
                Screen::Trips(trips_state) => {
                    tracing::debug!("Refreshing trips screen");
                    trips_state.trips_loading = LoadingState::Loading(ThrobberState::default());
                }
                _ => {
                    tracing::debug!("Navigating to trips screen");
                    state.navigate_to(Screen::Trips(TripsState {
                        trips_loading: LoadingState::Loading(ThrobberState::default()),
                        ..Default::default()
                    }));
                }
            }

            let data_loader = data_loader.clone();
            task_manager.spawn_load_task("load_trips".to_string(), async move {
                data_loader.load_trips().await;
            });
        }

        AppCommand::LoadTrip { trip_id } => {
            state.current_trip_id = Some(trip_id);

            match state.current_screen_mut() {
                Screen::Trip(trip_state) => {
                    tracing::debug!("Refreshing trip screen");
                    trip_state.trip_loading = LoadingState::Loading(ThrobberState::default());
                }
                _ => {
                    state.navigate_to(Screen::Trip(TripState {
                        trip_loading: LoadingState::Loading(ThrobberState::default()),
                        ..Default::default()
                    }));
                }
            }

            let data_loader = data_loader.clone();
            task_manager.spawn_load_task("load_trip".to_string(), async move {
                data_loader.load_trip(trip_id).await;
            });
        }

        AppCommand::LoadTripDay { trip_id, day_id } => {
            state.current_day_id = Some(day_id);

            match state.current_screen_mut() {
                Screen::TripDay(day_state) => {
                    tracing::debug!("Refreshing trip day screen");
                    day_state.day_loading = LoadingState::Loading(ThrobberState::default());
                }
                _ => {
                    state.navigate_to(Screen::TripDay(TripDayState {
                        day_loading: LoadingState::Loading(ThrobberState::default()),
                        ..Default::default()
                    }));
                }
            }

            let data_loader = data_loader.clone();
            task_manager.spawn_load_task("load_trip_day".to_string(), async move {
                data_loader.load_trip_day(trip_id, day_id).await;
            });
        }

        AppCommand::LoadCategories => {
            let data_loader = data_loader.clone();
            task_manager.spawn_load_task("load_categories".to_string(), async move {
                data_loader.load_categories().await;
            });
        }

        AppCommand::OpenAddTripPoint { ref attraction_id } => {
            if !open_add_trip_point(state, attraction_id.is_some()) {
                return;
            }

            if let Screen::AddTripPoint(add_state) = state.current_screen() {
                let trip_id = add_state.trip_id;
                let loader = data_loader.clone();
                task_manager.spawn_load_task("load_recommendations".to_string(), async move {
                    loader.load_recommendations(trip_id).await;
                });

                if let Some(provider_id) = attraction_id.clone() {
                    let generation = add_state.resolve_generation;
                    let loader = data_loader.clone();
                    task_manager.spawn_load_task(RESOLVE_TASK_ID.to_string(), async move {
                        loader.resolve_attraction(provider_id, generation).await;
                    });
                }
            }

            if state.categories.is_empty() {
                let loader = data_loader.clone();
                task_manager.spawn_load_task("load_categories".to_string(), async move {
                    loader.load_categories().await;
                });
            }
        }

        AppCommand::AppendSearchChar(..)
        | AppCommand::DeleteSearchChar
        | AppCommand::ClearSearch => {
            execute_command_sync(command, state);
            schedule_search(state, task_manager, data_loader);
        }

        AppCommand::ConfirmPlaceSelection => {
            execute_command_sync(command, state);

            if let Screen::AddTripPoint(add_state) = state.current_screen() {
                if let (Some(reference), LoadingState::Loading(..)) =
                    (&add_state.draft.place, &add_state.place_resolving)
                {
                    let provider_id = reference.provider_id.clone();
                    let generation = add_state.resolve_generation;
                    let loader = data_loader.clone();
                    task_manager.spawn_load_task(RESOLVE_TASK_ID.to_string(), async move {
                        loader.resolve_place(provider_id, generation).await;
                    });
                }
            }
        }

        AppCommand::SubmitTripPoint => {
            if let Some((trip_id, day_id, trip_point)) = try_begin_submission(state) {
                let loader = data_loader.clone();
                task_manager.spawn_load_task("create_trip_point".to_string(), async move {
                    loader.create_trip_point(trip_id, day_id, trip_point).await;
                });
            }
        }

        // Everything else is a pure state change
        _ => execute_command_sync(command, state),
    }
}

/// Reload the day list after a trip point was created elsewhere.
/// Called from the main loop once per iteration.
pub fn consume_pending_refresh(
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    let Some(trip_id) = state.current_trip_id else {
        return;
    };
    let Some(day_id) = state.current_day_id else {
        return;
    };
    if !matches!(state.current_screen(), Screen::TripDay(..)) {
        return;
    }
    if !state.refresh.take(RefreshTarget::TripDay(day_id)) {
        return;
    }

    tracing::debug!("Reloading day {} after trip point change", day_id);
    if let Screen::TripDay(day_state) = state.current_screen_mut() {
        day_state.day_loading = LoadingState::Loading(ThrobberState::default());
    }
    let loader = data_loader.clone();
    task_manager.spawn_load_task("load_trip_day".to_string(), async move {
        loader.load_trip_day(trip_id, day_id).await;
    });
}

/// Open the add form once a deep-linked day has finished loading.
/// Called from the main loop once per iteration; the pending attraction
/// is dropped if the day failed to load or the user navigated away.
pub fn consume_pending_deep_link(
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    if state.pending_attraction.is_none() {
        return;
    }
    // The trip and the day load concurrently; wait for both
    if state.current_trip.is_none() {
        return;
    }

    match state.current_screen() {
        Screen::TripDay(day_state) => match &day_state.day_loading {
            LoadingState::Loaded => {}
            LoadingState::NotStarted | LoadingState::Loading(..) => return,
            LoadingState::Error(..) => {
                tracing::warn!("Dropping deep-link attraction, day failed to load");
                state.pending_attraction = None;
                return;
            }
        },
        _ => {
            state.pending_attraction = None;
            return;
        }
    }

    let attraction_id = state.pending_attraction.take();
    tracing::info!("Opening deep-linked add form for attraction {:?}", attraction_id);
    execute_command(
        AppCommand::OpenAddTripPoint { attraction_id },
        state,
        task_manager,
        data_loader,
    );
}

/// Pure state transitions, shared by the async executor and tests
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    match command {
        // Simple state updates
        AppCommand::Quit => state.should_quit = true,
        AppCommand::ToggleHelp => state.help_visible = !state.help_visible,
        AppCommand::SetPendingKey(c) => state.pending_key = Some(c),
        AppCommand::ClearPendingKey => state.pending_key = None,
        AppCommand::DismissNotice => state.notice = None,

        // Navigation
        AppCommand::NavigateBack => {
            state.navigate_back();
        }
        AppCommand::NavigateToTop => match state.current_screen_mut() {
            Screen::Trips(s) => s.selected_trip_index = 0,
            Screen::Trip(s) => s.selected_day_index = 0,
            Screen::TripDay(s) => s.table_state.borrow_mut().select(Some(0)),
            Screen::AddTripPoint(..) => {}
            Screen::Logs(s) => s.scroll_offset = s.total_entries.saturating_sub(1),
        },
        AppCommand::NavigateToBottom => match state.current_screen_mut() {
            Screen::Trips(s) => {
                if !s.trips.is_empty() {
                    s.selected_trip_index = s.trips.len() - 1;
                }
            }
            Screen::Trip(s) => {
                let len = s.trip.as_ref().map_or(0, |trip| trip.days.len());
                if len > 0 {
                    s.selected_day_index = len - 1;
                }
            }
            Screen::TripDay(s) => {
                let len = s.sorted_points().len();
                if len > 0 {
                    s.table_state.borrow_mut().select(Some(len - 1));
                }
            }
            Screen::AddTripPoint(..) => {}
            Screen::Logs(s) => s.scroll_offset = 0,
        },
        AppCommand::SelectNext => match state.current_screen_mut() {
            Screen::Trips(s) => {
                if !s.trips.is_empty() {
                    s.selected_trip_index = (s.selected_trip_index + 1) % s.trips.len();
                }
            }
            Screen::Trip(s) => {
                let len = s.trip.as_ref().map_or(0, |trip| trip.days.len());
                if len > 0 {
                    s.selected_day_index = (s.selected_day_index + 1) % len;
                }
            }
            Screen::TripDay(s) => s.select_next(),
            Screen::AddTripPoint(..) => {}
            Screen::Logs(_) => {} // Uses scroll commands instead
        },
        AppCommand::SelectPrevious => match state.current_screen_mut() {
            Screen::Trips(s) => {
                if !s.trips.is_empty() {
                    if s.selected_trip_index == 0 {
                        s.selected_trip_index = s.trips.len() - 1;
                    } else {
                        s.selected_trip_index -= 1;
                    }
                }
            }
            Screen::Trip(s) => {
                let len = s.trip.as_ref().map_or(0, |trip| trip.days.len());
                if len > 0 {
                    if s.selected_day_index == 0 {
                        s.selected_day_index = len - 1;
                    } else {
                        s.selected_day_index -= 1;
                    }
                }
            }
            Screen::TripDay(s) => s.select_prev(),
            Screen::AddTripPoint(..) => {}
            Screen::Logs(_) => {} // Uses scroll commands instead
        },

        // Add-trip-point form lifecycle
        AppCommand::OpenAddTripPoint { attraction_id } => {
            open_add_trip_point(state, attraction_id.is_some());
        }
        AppCommand::CancelAddTripPoint => {
            if matches!(state.current_screen(), Screen::AddTripPoint(..)) {
                tracing::debug!("Add trip point form cancelled");
                state.navigate_back();
            }
        }
        AppCommand::SubmitTripPoint => {
            try_begin_submission(state);
        }

        // Place search
        AppCommand::AppendSearchChar(c) => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                add_state.search_query.push(c);
                on_search_query_changed(add_state);
            }
        }
        AppCommand::DeleteSearchChar => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                add_state.search_query.pop();
                on_search_query_changed(add_state);
            }
        }
        AppCommand::ClearSearch => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                add_state.search_query.clear();
                on_search_query_changed(add_state);
            }
        }
        AppCommand::SelectResultNext => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                let len = add_state.visible_places().len();
                if len > 0 {
                    add_state.result_selection_index =
                        (add_state.result_selection_index + 1) % len;
                }
            }
        }
        AppCommand::SelectResultPrevious => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                let len = add_state.visible_places().len();
                if len > 0 {
                    add_state.result_selection_index = add_state
                        .result_selection_index
                        .checked_sub(1)
                        .unwrap_or(len - 1);
                }
            }
        }
        AppCommand::ConfirmPlaceSelection => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                let Some(selected) = add_state.selected_place().cloned() else {
                    return;
                };
                // Quality filtering should have removed these already
                if selected.provider_id.is_placeholder() {
                    tracing::warn!("Ignoring selection with placeholder provider id");
                    return;
                }

                add_state.draft.place = Some(crate::state::form::PlaceReference {
                    provider_id: selected.provider_id,
                    display_name: selected.title.unwrap_or_default(),
                });
                add_state.resolve_generation += 1;
                add_state.place_resolving = LoadingState::Loading(ThrobberState::default());

                add_state.search_query.clear();
                add_state.search_results.clear();
                add_state.search_seq += 1;
                add_state.search_loading = false;
                add_state.result_selection_index = 0;

                leave_place_section(add_state);
            }
        }
        AppCommand::ChooseManualEntry => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                add_state.draft.clear_place_reference();
                leave_place_section(add_state);
            }
        }
        AppCommand::SkipPlace => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                add_state.draft.reset_place();
                leave_place_section(add_state);
            }
        }

        // Form navigation
        AppCommand::NextStep => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                let NavigationState::Step(index) = add_state.navigation else {
                    return;
                };
                let Some(step) = add_state.navigation.current_step() else {
                    return;
                };
                match crate::state::navigation::step_gate(&add_state.draft, step) {
                    Err(message) => {
                        add_state.draft.name.touched = true;
                        add_state.validation_error = Some(message);
                    }
                    Ok(()) => {
                        let next = (index + 1).min(WizardStep::ALL.len() - 1);
                        add_state.navigation = NavigationState::Step(next);
                        add_state.validation_error = None;
                        add_state.current_field = add_state.active_fields().first().copied();
                    }
                }
            }
        }
        AppCommand::PrevStep => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                let NavigationState::Step(index) = add_state.navigation else {
                    return;
                };
                if index == 0 {
                    state.navigate_back();
                    return;
                }
                add_state.navigation = NavigationState::Step(index - 1);
                add_state.validation_error = None;
                add_state.current_field = add_state.active_fields().first().copied();
            }
        }
        AppCommand::ToggleSection(section) => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                if add_state.variant != FlowVariant::Accordion {
                    return;
                }
                add_state.navigation.toggle(section);
                if let Some(current) = add_state.current_field {
                    if !add_state.active_fields().contains(&current) {
                        add_state.current_field = None;
                    }
                }
            }
        }
        AppCommand::FocusNextField => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                add_state.focus_next_field();
            }
        }
        AppCommand::FocusPrevField => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                add_state.focus_prev_field();
            }
        }

        // Field editing
        AppCommand::AppendFieldChar(c) => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                edit_current_field(add_state, FieldEdit::Append(c));
            }
        }
        AppCommand::DeleteFieldChar => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                edit_current_field(add_state, FieldEdit::DeleteLast);
            }
        }
        AppCommand::ClearField => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                edit_current_field(add_state, FieldEdit::Clear);
            }
        }
        AppCommand::CycleCategory { forward } => {
            let names: Vec<String> = if state.categories.is_empty() {
                CATEGORY_NAMES.iter().map(|name| name.to_string()).collect()
            } else {
                state
                    .categories
                    .iter()
                    .map(|category| category.name.clone())
                    .collect()
            };
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                if names.is_empty() {
                    return;
                }
                let current = names
                    .iter()
                    .position(|name| *name == add_state.draft.category_name)
                    .unwrap_or(0);
                let next = if forward {
                    (current + 1) % names.len()
                } else {
                    current.checked_sub(1).unwrap_or(names.len() - 1)
                };
                add_state.draft.category_name = names[next].clone();
            }
        }
        AppCommand::ToggleCostType => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                add_state.draft.cost_type = add_state.draft.cost_type.toggle();
            }
        }
        AppCommand::AdjustTime { minutes } => {
            if let Screen::AddTripPoint(add_state) = state.current_screen_mut() {
                match add_state.current_field {
                    Some(FormField::StartTime) => {
                        let shifted = shift_minutes(add_state.draft.start_time, minutes);
                        add_state.draft.set_start_time(shifted);
                    }
                    Some(FormField::EndTime) => {
                        let shifted = shift_minutes(add_state.draft.end_time, minutes);
                        add_state.draft.set_end_time(shifted);
                    }
                    _ => {}
                }
            }
        }

        // Log screen commands
        AppCommand::NavigateToLogs => {
            state.navigate_to(Screen::Logs(LogsState::default()));
        }
        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                if s.scroll_offset < s.total_entries.saturating_sub(1) {
                    s.scroll_offset += 1;
                }
            }
        }
        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = (s.scroll_offset + 20).min(s.total_entries.saturating_sub(1));
            }
        }
        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(20);
            }
        }

        // Commands that require background tasks - skip in sync mode
        // Tests should inject DataEvents directly for these
        AppCommand::LoadTrips
        | AppCommand::LoadTrip { .. }
        | AppCommand::LoadTripDay { .. }
        | AppCommand::LoadCategories => {
            // Skip - tests will inject corresponding DataEvents
        }
    }

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }
}

enum FieldEdit {
    Append(char),
    DeleteLast,
    Clear,
}

fn edit_current_field(add_state: &mut AddTripPointState, edit: FieldEdit) {
    let Some(field) = add_state.current_field else {
        return;
    };

    let apply = |value: &str| -> String {
        match edit {
            FieldEdit::Append(c) => {
                let mut value = value.to_string();
                value.push(c);
                value
            }
            FieldEdit::DeleteLast => {
                let mut value = value.to_string();
                value.pop();
                value
            }
            FieldEdit::Clear => String::new(),
        }
    };

    let draft = &mut add_state.draft;
    match field {
        FormField::Name => {
            let next = apply(&draft.name.value);
            draft.set_name(next);
        }
        FormField::Cost => {
            let next = apply(&draft.cost_input.value);
            draft.set_cost_input(next);
        }
        FormField::Comment => {
            let next = apply(&draft.comment.value);
            draft.comment.set(next);
        }
        FormField::Country
        | FormField::StateRegion
        | FormField::City
        | FormField::Street
        | FormField::HouseNumber => {
            // Address is place-owned while a reference is attached
            if !draft.address_editable() {
                return;
            }
            let target = match field {
                FormField::Country => &mut draft.country,
                FormField::StateRegion => &mut draft.state_region,
                FormField::City => &mut draft.city,
                FormField::Street => &mut draft.street,
                FormField::HouseNumber => &mut draft.house_number,
                _ => unreachable!(),
            };
            let next = apply(&target.value);
            target.set(next);
        }
        // Edited via dedicated commands, not character input
        FormField::Category | FormField::StartTime | FormField::EndTime | FormField::CostKind => {}
    }
}

/// Recompute derived search state after the query string changed.
/// Every change bumps the sequence number so stale responses die.
fn on_search_query_changed(add_state: &mut AddTripPointState) {
    add_state.search_seq += 1;
    add_state.result_selection_index = 0;
    if add_state.search_query.trim().len() < MIN_QUERY_LEN {
        add_state.search_results.clear();
        add_state.search_loading = false;
    } else {
        add_state.search_loading = true;
    }
}

/// Spawn or cancel the debounced search task to match the query state.
fn schedule_search(
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    let Screen::AddTripPoint(add_state) = state.current_screen() else {
        return;
    };

    let query = add_state.search_query.trim().to_string();
    if query.len() < MIN_QUERY_LEN {
        task_manager.cancel_task(SEARCH_TASK_ID);
        return;
    }

    let seq = add_state.search_seq;
    let loader = data_loader.clone();
    task_manager.spawn_load_task(SEARCH_TASK_ID.to_string(), async move {
        loader.search_places(query, seq).await;
    });
}

/// Move focus out of the place section after a selection, skip, or
/// switch to manual entry.
fn leave_place_section(add_state: &mut AddTripPointState) {
    match add_state.variant {
        FlowVariant::Wizard => {
            add_state.navigation = NavigationState::Step(1);
        }
        FlowVariant::Accordion => {
            add_state.navigation.expand(Section::Basic);
        }
    }
    add_state.current_field = Some(FormField::Name);
    add_state.validation_error = None;
}

/// Build the add-trip-point screen from the current trip and day.
fn open_add_trip_point(state: &mut AppState, resolving_attraction: bool) -> bool {
    let Some(trip) = state.current_trip.clone() else {
        tracing::warn!("Cannot open add trip point form without a loaded trip");
        return false;
    };
    let Some(day_id) = state.current_day_id else {
        tracing::warn!("Cannot open add trip point form without a selected day");
        return false;
    };

    let day_date = match state.current_screen() {
        Screen::TripDay(day_state) => day_state.day.as_ref().and_then(|day| day.date),
        _ => None,
    }
    .or_else(|| {
        trip.days
            .iter()
            .find(|day| day.id == day_id)
            .and_then(|day| day.date)
    })
    .unwrap_or_else(|| Local::now().date_naive());

    let mut add_state = AddTripPointState::new(&trip, day_id, day_date, state.flow_variant);
    add_state.recommendations_loading = LoadingState::Loading(ThrobberState::default());
    if resolving_attraction {
        add_state.resolve_generation = 1;
        add_state.place_resolving = LoadingState::Loading(ThrobberState::default());
    }

    tracing::debug!("Opening add trip point form for day {}", day_id);
    state.navigate_to(Screen::AddTripPoint(Box::new(add_state)));
    true
}

/// Validate the draft and mark the form as submitting.
/// On failure the offending section is brought into view instead.
fn try_begin_submission(state: &mut AppState) -> Option<(TripId, TripDayId, NewTripPoint)> {
    let Screen::AddTripPoint(add_state) = state.current_screen_mut() else {
        return None;
    };
    if add_state.submitting {
        return None;
    }

    match crate::state::validators::build_trip_point(
        &add_state.draft,
        add_state.day_date,
        add_state.number_of_travelers,
    ) {
        Ok(trip_point) => {
            add_state.submitting = true;
            add_state.validation_error = None;
            Some((add_state.trip_id, add_state.day_id, trip_point))
        }
        Err((section, message)) => {
            tracing::debug!("Submission blocked: {}", message);
            add_state.draft.name.touched = true;
            add_state.validation_error = Some(message);
            add_state.navigation.expand(section);
            None
        }
    }
}
