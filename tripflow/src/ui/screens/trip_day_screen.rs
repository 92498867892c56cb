use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::state::{LoadingState, TripDayState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme,
};
use traveler_api::endpoints::{trip_points::TripPointDetails, trips::TripDetails};

const HELP_TEXT: &str = "n: add trip point | r: refresh | Press ? for help";

pub fn render(f: &mut Frame, state: &TripDayState, trip: Option<&TripDetails>) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(f, title_area, &state.day_loading);
    render_title(f, title_area, state);
    render_content(f, content_area, state, trip);
    help_bar::render_help_bar(f, help_area, HELP_TEXT);
}

fn render_title(f: &mut Frame, area: Rect, state: &TripDayState) {
    let title = match state.day.as_ref().and_then(|day| day.date) {
        Some(date) => format!("Trip day, {}", date.format("%A, %B %-d")),
        None => "Trip day".to_string(),
    };

    let paragraph = ratatui::widgets::Paragraph::new(title).style(theme::title_style());
    f.render_widget(paragraph, area);
}

fn render_content(f: &mut Frame, area: Rect, state: &TripDayState, trip: Option<&TripDetails>) {
    let points = state.sorted_points();

    if matches!(state.day_loading, LoadingState::Loading(..)) && points.is_empty() {
        empty_state::render_loading_state(f, area, "Status", "Loading trip day...");
        return;
    }

    if points.is_empty() {
        empty_state::render_empty_state(
            f,
            area,
            "Trip points",
            "Nothing planned for this day",
            Some("Press n to add a trip point"),
        );
        return;
    }

    let currency = trip.and_then(|trip| trip.currency_code.as_deref());

    let header = Row::new(vec![
        Cell::from("Start"),
        Cell::from("End"),
        Cell::from("Name"),
        Cell::from("Category"),
        Cell::from(Text::from("Cost").right_aligned()),
    ])
    .style(theme::header_style())
    .underlined();

    let rows: Vec<Row> = points
        .iter()
        .map(|point| build_point_row(point, currency))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Percentage(45),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Trip points ({})", points.len())),
    )
    .column_spacing(theme::TABLE_COLUMN_SPACING)
    .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn build_point_row(point: &TripPointDetails, currency: Option<&str>) -> Row<'static> {
    let cost = match currency {
        Some(code) => format!("{} {}", point.predicted_cost, code),
        None => point.predicted_cost.to_string(),
    };

    let mut name_spans = vec![Span::from(point.name.clone())];
    if let Some(place_name) = point
        .place
        .as_ref()
        .and_then(|place| place.city.as_deref())
    {
        name_spans.push(Span::styled(
            format!("  {place_name}"),
            theme::help_text_style(),
        ));
    }

    Row::new(vec![
        Cell::from(point.start_time.format("%H:%M").to_string()),
        Cell::from(point.end_time.format("%H:%M").to_string()),
        Cell::from(Line::from(name_spans)),
        Cell::from(point.category_name.clone().unwrap_or_default()),
        Cell::from(Text::from(cost).right_aligned()),
    ])
}
