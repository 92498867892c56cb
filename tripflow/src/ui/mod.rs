pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;

use crate::log_buffer::LogBuffer;
use crate::state::AppState;
use ratatui::Frame;
use screens::*;

/// Pure render dispatcher - routes to appropriate screen renderer
/// This function is read-only and never mutates state
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    // Render the current screen
    match state.current_screen() {
        Screen::Trips(trips_state) => {
            trips_screen::render(f, trips_state);
        }
        Screen::Trip(trip_state) => {
            trip_screen::render(f, trip_state);
        }
        Screen::TripDay(day_state) => {
            trip_day_screen::render(f, day_state, state.current_trip.as_ref());
        }
        Screen::AddTripPoint(add_state) => {
            add_trip_point_screen::render(f, add_state);
        }
        Screen::Logs(logs_state) => {
            logs_screen::render(f, logs_state, log_buffer);
        }
    }

    // Transient status messages sit above the help bar
    if let Some(notice) = &state.notice {
        components::notice_bar::render_notice(f, notice);
    }

    // Render help popup on top if visible
    if state.help_visible {
        components::help_popup::render_help_popup(f, state.current_screen());
    }
}
