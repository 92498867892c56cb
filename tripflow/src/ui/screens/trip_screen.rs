use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};

use crate::state::{LoadingState, TripState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &TripState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, &state.trip_loading);
    render_title(f, title_area, state);
    render_content(f, content_area, state);
    help_bar::render_help_bar(f, help_area, help_bar::HELP_TEXT_DEFAULT);
}

fn render_title(f: &mut Frame, area: Rect, state: &TripState) {
    if let Some(trip) = &state.trip {
        let title = ratatui::widgets::Paragraph::new(trip.name.clone()).style(theme::title_style());
        f.render_widget(title, area);
    }
}

fn render_content(f: &mut Frame, area: Rect, state: &TripState) {
    let days = state.trip.as_ref().map(|trip| &trip.days);

    if matches!(state.trip_loading, LoadingState::Loading(..))
        && days.map(|days| days.is_empty()).unwrap_or(true)
    {
        empty_state::render_loading_state(f, area, "Status", "Loading trip...");
        return;
    }

    match days {
        Some(days) if !days.is_empty() => {
            let items: Vec<ListItem> = days
                .iter()
                .enumerate()
                .map(|(i, day)| {
                    let style = if i == state.selected_day_index {
                        theme::selection_style()
                    } else {
                        Style::default()
                    };

                    let label = match day.date {
                        Some(date) => format!("Day {}  {}", i + 1, date.format("%A, %B %-d")),
                        None => format!("Day {}", i + 1),
                    };

                    ListItem::new(label).style(style)
                })
                .collect();

            let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Days"));

            f.render_widget(list, area);
        }
        _ => {
            empty_state::render_empty_state(f, area, "Days", "No days in this trip", None);
        }
    }
}
