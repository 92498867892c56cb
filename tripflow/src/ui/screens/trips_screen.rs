use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};

use crate::state::{LoadingState, TripsState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme,
};
use traveler_api::endpoints::trips::TripSummary;

pub fn render(f: &mut Frame, state: &TripsState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, &state.trips_loading);
    render_content(f, content_area, state);
    help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_DEFAULT);
}

fn render_content(f: &mut Frame, area: Rect, state: &TripsState) {
    // Show loading message if currently loading and no cached data
    if matches!(state.trips_loading, LoadingState::Loading(..)) && state.trips.is_empty() {
        empty_state::render_loading_state(f, area, "Status", "Loading trips...");
        return;
    }

    if !state.trips.is_empty() {
        let items: Vec<ListItem> = state
            .trips
            .iter()
            .enumerate()
            .map(|(i, trip)| {
                let style = if i == state.selected_trip_index {
                    theme::selection_style()
                } else {
                    Style::default()
                };

                ListItem::new(trip_line(trip)).style(style)
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Trips"));

        f.render_widget(list, area);
    } else {
        empty_state::render_empty_state(
            f,
            area,
            "Trips",
            "No trips found",
            Some("Plan a trip at https://app.travelmate.app"),
        );
    }
}

fn trip_line(trip: &TripSummary) -> Line<'static> {
    let mut spans = vec![Span::from(trip.name.clone())];

    if let (Some(start), Some(end)) = (trip.start_date, trip.end_date) {
        spans.push(Span::styled(
            format!("  {} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")),
            theme::help_text_style(),
        ));
    }

    Line::from(spans)
}
