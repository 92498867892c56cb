use crate::events::AppCommand;
use crate::input::{Key, KeyEvent};
use crate::settings::FlowVariant;
use crate::state::navigation::{Section, WizardStep};
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 1: Add-trip-point form captures nearly all keys
    if let Screen::AddTripPoint(add_state) = state.current_screen() {
        return handle_add_trip_point_keys(event, add_state);
    }

    // Priority 2: Check if we're currently showing the help popup
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            // 'g' followed by 't' -> go to trips
            ('g', Key::Char('t')) => Some(AppCommand::LoadTrips),
            // 'g' followed by 'l' -> go to logs
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            // 'g' followed by 'g' -> navigate to top of table
            ('g', Key::Char('g')) => Some(AppCommand::NavigateToTop),
            // Any other key clears the pending key
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        // Global help toggle
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),

        // Global quit command
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        // Multi-key sequence initiator: 'g' sets pending key
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),

        // Navigate to top: 'G' (Shift+g)
        (_, Key::Char('G')) => Some(AppCommand::NavigateToBottom),

        // Global back navigation (left/h)
        (_, Key::Left | Key::Char('h')) => Some(AppCommand::NavigateBack),

        // Trips screen
        (Screen::Trips(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Trips(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Trips(trips_state), Key::Enter | Key::Right | Key::Char('l')) => {
            if trips_state.trips.is_empty() {
                None
            } else {
                let trip = &trips_state.trips[trips_state.selected_trip_index];
                Some(AppCommand::LoadTrip { trip_id: trip.id })
            }
        }
        (Screen::Trips(..), Key::Char('r')) => Some(AppCommand::LoadTrips),

        // Trip screen (day list)
        (Screen::Trip(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::Trip(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::Trip(trip_state), Key::Enter | Key::Right | Key::Char('l')) => {
            let trip = trip_state.trip.as_ref()?;
            let day = trip.days.get(trip_state.selected_day_index)?;
            Some(AppCommand::LoadTripDay {
                trip_id: trip.id,
                day_id: day.id,
            })
        }
        (Screen::Trip(..), Key::Char('r')) => {
            state.current_trip_id.map(|trip_id| AppCommand::LoadTrip { trip_id })
        }

        // Trip day screen
        (Screen::TripDay(..), Key::Up | Key::Char('k')) => Some(AppCommand::SelectPrevious),
        (Screen::TripDay(..), Key::Down | Key::Char('j')) => Some(AppCommand::SelectNext),
        (Screen::TripDay(..), Key::Char('n')) => {
            Some(AppCommand::OpenAddTripPoint { attraction_id: None })
        }
        (Screen::TripDay(..), Key::Char('r')) => {
            let trip_id = state.current_trip_id?;
            let day_id = state.current_day_id?;
            Some(AppCommand::LoadTripDay { trip_id, day_id })
        }

        // Logs screen
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),

        // Ignore other keys
        _ => None,
    }
}

/// Handle keyboard input while the add-trip-point form is open
fn handle_add_trip_point_keys(
    event: KeyEvent,
    add_state: &AddTripPointState,
) -> Option<AppCommand> {
    let key = event.key;

    // Ctrl+L clears the focused field (or the search box)
    if event.modifiers.ctrl && matches!(key, Key::Char('l')) {
        if add_state.search_active() {
            return Some(AppCommand::ClearSearch);
        }
        return Some(AppCommand::ClearField);
    }

    // Ctrl+S skips the place step (wizard only)
    if event.modifiers.ctrl && matches!(key, Key::Char('s')) {
        if add_state.variant == FlowVariant::Wizard
            && add_state.navigation.current_step() == Some(WizardStep::Place)
        {
            return Some(AppCommand::SkipPlace);
        }
        return None;
    }

    // Ctrl+M switches to manual entry, keeping any resolved fields
    if event.modifiers.ctrl && matches!(key, Key::Char('m')) {
        return Some(AppCommand::ChooseManualEntry);
    }

    // Alt+letter toggles accordion sections
    if event.modifiers.alt {
        if let Key::Char(c) = key {
            let section = match c {
                'p' => Some(Section::Place),
                'b' => Some(Section::Basic),
                'a' => Some(Section::Address),
                'c' => Some(Section::Cost),
                'n' => Some(Section::Notes),
                _ => None,
            };
            if let Some(section) = section {
                if add_state.variant == FlowVariant::Accordion {
                    return Some(AppCommand::ToggleSection(section));
                }
            }
            return None;
        }
    }

    match key {
        // Escape steps back; on the first wizard step or in the
        // accordion it cancels the form
        Key::Esc => match add_state.variant {
            FlowVariant::Wizard if add_state.navigation.step_index() > Some(0) => {
                Some(AppCommand::PrevStep)
            }
            _ => Some(AppCommand::CancelAddTripPoint),
        },

        Key::Tab => Some(AppCommand::FocusNextField),
        Key::BackTab => Some(AppCommand::FocusPrevField),

        Key::Backspace => {
            if add_state.search_active() {
                Some(AppCommand::DeleteSearchChar)
            } else {
                Some(AppCommand::DeleteFieldChar)
            }
        }

        Key::Up | Key::Down => {
            let up = matches!(key, Key::Up);
            if add_state.search_active() {
                if add_state.visible_places().is_empty() {
                    None
                } else if up {
                    Some(AppCommand::SelectResultPrevious)
                } else {
                    Some(AppCommand::SelectResultNext)
                }
            } else {
                match add_state.current_field {
                    Some(FormField::StartTime) | Some(FormField::EndTime) => {
                        Some(AppCommand::AdjustTime {
                            minutes: if up { 15 } else { -15 },
                        })
                    }
                    Some(FormField::Category) => Some(AppCommand::CycleCategory { forward: !up }),
                    Some(FormField::CostKind) => Some(AppCommand::ToggleCostType),
                    _ => None,
                }
            }
        }

        Key::Enter => {
            if add_state.search_active() && !add_state.visible_places().is_empty() {
                return Some(AppCommand::ConfirmPlaceSelection);
            }
            match add_state.variant {
                FlowVariant::Wizard => {
                    if add_state.navigation.current_step() == Some(WizardStep::Summary) {
                        Some(AppCommand::SubmitTripPoint)
                    } else {
                        Some(AppCommand::NextStep)
                    }
                }
                FlowVariant::Accordion => Some(AppCommand::SubmitTripPoint),
            }
        }

        // Regular character input feeds either the search box or the
        // focused field
        Key::Char(c) => {
            if event.modifiers.ctrl {
                return None;
            }
            if add_state.search_active() {
                Some(AppCommand::AppendSearchChar(c))
            } else if add_state.current_field.is_some() {
                Some(AppCommand::AppendFieldChar(c))
            } else {
                None
            }
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_add_state;

    fn wizard_state() -> AddTripPointState {
        sample_add_state(FlowVariant::Wizard)
    }

    #[test]
    fn typed_chars_feed_search_on_place_step() {
        let add_state = wizard_state();
        let command = handle_add_trip_point_keys(KeyEvent::new(Key::Char('l')), &add_state);
        assert_eq!(command, Some(AppCommand::AppendSearchChar('l')));
    }

    #[test]
    fn ctrl_s_skips_place_only_on_place_step() {
        let mut add_state = wizard_state();
        let command = handle_add_trip_point_keys(KeyEvent::with_ctrl(Key::Char('s')), &add_state);
        assert_eq!(command, Some(AppCommand::SkipPlace));

        add_state.navigation = crate::state::navigation::NavigationState::Step(1);
        let command = handle_add_trip_point_keys(KeyEvent::with_ctrl(Key::Char('s')), &add_state);
        assert_eq!(command, None);
    }

    #[test]
    fn esc_cancels_on_first_step_and_steps_back_later() {
        let mut add_state = wizard_state();
        let command = handle_add_trip_point_keys(KeyEvent::new(Key::Esc), &add_state);
        assert_eq!(command, Some(AppCommand::CancelAddTripPoint));

        add_state.navigation = crate::state::navigation::NavigationState::Step(2);
        let command = handle_add_trip_point_keys(KeyEvent::new(Key::Esc), &add_state);
        assert_eq!(command, Some(AppCommand::PrevStep));
    }

    #[test]
    fn alt_toggles_sections_in_accordion_only() {
        let accordion = sample_add_state(FlowVariant::Accordion);
        let command = handle_add_trip_point_keys(KeyEvent::with_alt(Key::Char('c')), &accordion);
        assert_eq!(command, Some(AppCommand::ToggleSection(Section::Cost)));

        let wizard = wizard_state();
        let command = handle_add_trip_point_keys(KeyEvent::with_alt(Key::Char('c')), &wizard);
        assert_eq!(command, None);
    }

    #[test]
    fn up_adjusts_time_when_start_field_focused() {
        let mut add_state = wizard_state();
        add_state.navigation = crate::state::navigation::NavigationState::Step(1);
        add_state.current_field = Some(FormField::StartTime);
        let command = handle_add_trip_point_keys(KeyEvent::new(Key::Up), &add_state);
        assert_eq!(command, Some(AppCommand::AdjustTime { minutes: 15 }));
    }
}
