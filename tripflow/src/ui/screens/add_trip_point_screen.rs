use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::settings::FlowVariant;
use crate::state::navigation::{Section, WizardStep};
use crate::state::{section_fields, AddTripPointState, FormField, LoadingState};
use crate::ui::{
    components::{help_bar, screen_title},
    layouts, theme,
};
use crate::utils::time::format_hm;
use traveler_api::endpoints::places::PlaceSummary;

const HELP_TEXT_WIZARD: &str =
    "Tab: fields | Enter: next/select | Esc: back | Ctrl+S: skip place | ?: help";
const HELP_TEXT_ACCORDION: &str =
    "Tab: fields | Alt+p/b/a/c/n: sections | Enter: save | Esc: cancel | ?: help";

pub fn render(f: &mut Frame, state: &AddTripPointState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    render_title(f, title_area, state);
    render_content(f, content_area, state);

    let help_text = match state.variant {
        FlowVariant::Wizard => HELP_TEXT_WIZARD,
        FlowVariant::Accordion => HELP_TEXT_ACCORDION,
    };
    help_bar::render_help_bar(f, help_area, help_text);
}

fn render_title(f: &mut Frame, area: Rect, state: &AddTripPointState) {
    // Place resolution and recommendation loading share the spinner slot
    let loading = if matches!(state.place_resolving, LoadingState::Loading(..)) {
        &state.place_resolving
    } else {
        &state.recommendations_loading
    };
    screen_title::render_screen_title(f, area, loading);

    let title = format!("Add trip point, {}", state.day_date.format("%A, %B %-d"));
    let paragraph = Paragraph::new(title).style(theme::title_style());
    f.render_widget(paragraph, area);
}

fn render_content(f: &mut Frame, area: Rect, state: &AddTripPointState) {
    // One status line above the form body for validation and submission
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_status_line(f, chunks[0], state);

    match state.variant {
        FlowVariant::Wizard => render_wizard(f, chunks[1], state),
        FlowVariant::Accordion => render_accordion(f, chunks[1], state),
    }
}

fn render_status_line(f: &mut Frame, area: Rect, state: &AddTripPointState) {
    if state.submitting {
        let paragraph = Paragraph::new("Saving trip point...").style(theme::loading_style());
        f.render_widget(paragraph, area);
    } else if let Some(error) = &state.validation_error {
        let paragraph = Paragraph::new(error.as_str()).style(theme::error_style());
        f.render_widget(paragraph, area);
    }
}

// ---------------------------------------------------------------------------
// Wizard variant

fn render_wizard(f: &mut Frame, area: Rect, state: &AddTripPointState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_step_bar(f, chunks[0], state);

    match state.navigation.current_step() {
        Some(WizardStep::Place) => render_place_picker(f, chunks[1], state),
        Some(WizardStep::Summary) => render_summary(f, chunks[1], state),
        Some(step) => {
            if let Some(section) = step.section() {
                render_section_block(f, chunks[1], state, section);
            }
        }
        None => {}
    }
}

fn render_step_bar(f: &mut Frame, area: Rect, state: &AddTripPointState) {
    let current = state.navigation.step_index().unwrap_or(0);

    let mut spans = Vec::new();
    for (i, step) in WizardStep::ALL.iter().enumerate() {
        let style = if i == current {
            theme::header_style()
        } else {
            theme::help_text_style()
        };
        spans.push(Span::styled(format!("{} {}", i + 1, step.title()), style));
        if i + 1 < WizardStep::ALL.len() {
            spans.push(Span::styled("  ›  ", theme::help_text_style()));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_summary(f: &mut Frame, area: Rect, state: &AddTripPointState) {
    let draft = &state.draft;

    let place_line = match &draft.place {
        Some(place) => format!("Linked place: {}", place.display_name),
        None => "No linked place".to_string(),
    };

    let address = [
        draft.street.value.as_str(),
        draft.house_number.value.as_str(),
        draft.city.value.as_str(),
        draft.state_region.value.as_str(),
        draft.country.value.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(", ");

    let cost = if draft.cost_input.value.is_empty() {
        "none".to_string()
    } else {
        match &state.currency_code {
            Some(code) => format!("{} {} ({})", draft.cost_input.value, code, draft.cost_type.label()),
            None => format!("{} ({})", draft.cost_input.value, draft.cost_type.label()),
        }
    };

    let lines = vec![
        Line::from(""),
        summary_line("Name", &draft.name.value),
        summary_line("Category", &draft.category_name),
        summary_line(
            "Time",
            &format!(
                "{} to {}",
                format_hm(draft.start_time),
                format_hm(draft.end_time)
            ),
        ),
        summary_line("Place", &place_line),
        summary_line("Address", if address.is_empty() { "-" } else { &address }),
        summary_line("Cost", &cost),
        summary_line(
            "Notes",
            if draft.comment.value.is_empty() {
                "-"
            } else {
                &draft.comment.value
            },
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to save",
            theme::loading_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(paragraph, area);
}

fn summary_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:>10}: "), theme::header_style()),
        Span::from(value.to_string()),
    ])
}

// ---------------------------------------------------------------------------
// Accordion variant

fn render_accordion(f: &mut Frame, area: Rect, state: &AddTripPointState) {
    const SECTIONS: [Section; 5] = [
        Section::Place,
        Section::Basic,
        Section::Address,
        Section::Cost,
        Section::Notes,
    ];

    let constraints: Vec<Constraint> = SECTIONS
        .iter()
        .map(|section| {
            if !state.navigation.is_expanded(*section) {
                Constraint::Length(1)
            } else if *section == Section::Place {
                Constraint::Min(8)
            } else {
                Constraint::Length(section_fields(*section).len() as u16 + 2)
            }
        })
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (section, chunk) in SECTIONS.iter().zip(chunks.iter()) {
        if !state.navigation.is_expanded(*section) {
            render_collapsed_header(f, *chunk, *section);
        } else if *section == Section::Place {
            render_place_picker(f, *chunk, state);
        } else {
            render_section_block(f, *chunk, state, *section);
        }
    }
}

fn render_collapsed_header(f: &mut Frame, area: Rect, section: Section) {
    let key = match section {
        Section::Place => 'p',
        Section::Basic => 'b',
        Section::Address => 'a',
        Section::Cost => 'c',
        Section::Notes => 'n',
    };

    let line = Line::from(vec![
        Span::styled("▸ ", theme::help_text_style()),
        Span::styled(section.title(), theme::header_style()),
        Span::styled(format!("  (Alt+{key} to expand)"), theme::help_text_style()),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

// ---------------------------------------------------------------------------
// Shared pieces

fn render_place_picker(f: &mut Frame, area: Rect, state: &AddTripPointState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_search_box(f, chunks[0], state);
    render_place_list(f, chunks[1], state);
}

fn render_search_box(f: &mut Frame, area: Rect, state: &AddTripPointState) {
    let style = if state.search_active() {
        Style::default().fg(theme::COLOR_INPUT_FOCUSED)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Search places")
        .style(style);

    let text = if state.search_active() {
        format!("{}█", state.search_query)
    } else {
        state.search_query.clone()
    };

    f.render_widget(Paragraph::new(text).block(block), area);
}

fn render_place_list(f: &mut Frame, area: Rect, state: &AddTripPointState) {
    let searching = state.search_query.trim().len() >= crate::state::autocomplete::MIN_QUERY_LEN;
    let places = state.visible_places();

    let title = if let Some(place) = &state.draft.place {
        format!("Linked to {}", place.display_name)
    } else if searching {
        format!("Results ({})", places.len())
    } else {
        "Recommendations".to_string()
    };

    if places.is_empty() {
        let message = if state.search_loading {
            "Searching..."
        } else if searching {
            "No matching places"
        } else {
            "Type at least 3 characters to search"
        };

        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, theme::loading_style())),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = places
        .iter()
        .enumerate()
        .map(|(i, place)| {
            let style = if i == state.result_selection_index && state.search_active() {
                theme::selection_style()
            } else {
                Style::default()
            };

            ListItem::new(place_line(place)).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(list, area);
}

fn place_line(place: &PlaceSummary) -> Line<'static> {
    let mut spans = vec![Span::from(
        place.title.clone().unwrap_or_default(),
    )];

    if let Some(subtitle) = &place.subtitle {
        spans.push(Span::styled(
            format!("  {subtitle}"),
            theme::help_text_style(),
        ));
    }

    Line::from(spans)
}

fn render_section_block(f: &mut Frame, area: Rect, state: &AddTripPointState, section: Section) {
    let lines: Vec<Line> = section_fields(section)
        .iter()
        .map(|field| field_line(state, *field))
        .collect();

    let mut block = Block::default().borders(Borders::ALL).title(section.title());

    if section == Section::Address && !state.draft.address_editable() {
        block = block.title(
            Line::from("place-owned, Ctrl+M to unlink").right_aligned(),
        );
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line(state: &AddTripPointState, field: FormField) -> Line<'static> {
    let focused = state.current_field == Some(field);
    let value = field_value(state, field);

    let value_style = if focused {
        theme::form_field_focused_style()
    } else {
        theme::form_field_style()
    };

    let shown = if focused && is_text_field(field) {
        format!(" {value}█ ")
    } else {
        format!(" {value} ")
    };

    let mut spans = vec![
        Span::styled(format!("{:>14}: ", field.label()), theme::header_style()),
        Span::styled(shown, value_style),
    ];

    if let Some(hint) = field_hint(field) {
        if focused {
            spans.push(Span::styled(format!("  {hint}"), theme::help_text_style()));
        }
    }

    if let Some(error) = field_error(state, field) {
        spans.push(Span::styled(format!("  {error}"), theme::error_style()));
    }

    Line::from(spans)
}

fn is_text_field(field: FormField) -> bool {
    !matches!(
        field,
        FormField::Category | FormField::StartTime | FormField::EndTime | FormField::CostKind
    )
}

fn field_hint(field: FormField) -> Option<&'static str> {
    match field {
        FormField::Category => Some("↑/↓ to change"),
        FormField::StartTime | FormField::EndTime => Some("↑/↓ adjusts by 15 min"),
        FormField::CostKind => Some("↑/↓ to toggle"),
        _ => None,
    }
}

fn field_value(state: &AddTripPointState, field: FormField) -> String {
    let draft = &state.draft;
    match field {
        FormField::Name => draft.name.value.clone(),
        FormField::Category => draft.category_name.clone(),
        FormField::StartTime => format_hm(draft.start_time),
        FormField::EndTime => format_hm(draft.end_time),
        FormField::Country => draft.country.value.clone(),
        FormField::StateRegion => draft.state_region.value.clone(),
        FormField::City => draft.city.value.clone(),
        FormField::Street => draft.street.value.clone(),
        FormField::HouseNumber => draft.house_number.value.clone(),
        FormField::Cost => match &state.currency_code {
            Some(code) if !draft.cost_input.value.is_empty() => {
                format!("{} {}", draft.cost_input.value, code)
            }
            _ => draft.cost_input.value.clone(),
        },
        FormField::CostKind => draft.cost_type.label().to_string(),
        FormField::Comment => draft.comment.value.clone(),
    }
}

fn field_error(state: &AddTripPointState, field: FormField) -> Option<String> {
    let draft = &state.draft;
    match field {
        FormField::Name if draft.name.touched => draft.name.error.clone(),
        FormField::EndTime => draft.time_error.clone(),
        FormField::Cost => draft.cost_input.error.clone(),
        _ => None,
    }
}
