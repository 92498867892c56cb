use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use crate::settings::FlowVariant;
use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, screen: &Screen) {
    let help_items = get_help_items(screen);

    // Use shared popup frame
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        " Help (press ? or Esc to close) ",
        theme::accent_border_style(),
    );

    // Create the help list
    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

fn get_help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    // Screen-specific help
    match screen {
        Screen::Trips(..) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("Enter/→/l", "Open selected trip"));
            items.push(("r", "Refresh trips"));
        }
        Screen::Trip(..) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("Enter/→/l", "Open selected day"));
            items.push(("r", "Refresh trip"));
        }
        Screen::TripDay(..) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("n", "Add a trip point"));
            items.push(("r", "Refresh day"));
        }
        Screen::AddTripPoint(add_state) => {
            items.push(("Type", "Search places / edit focused field"));
            items.push(("↑/↓", "Select result, adjust time, cycle category"));
            items.push(("Enter", "Select place / next step / submit"));
            items.push(("Tab/Shift+Tab", "Move between fields"));
            items.push(("Ctrl+M", "Enter details manually"));
            match add_state.variant {
                FlowVariant::Wizard => {
                    items.push(("Ctrl+S", "Skip the place step"));
                    items.push(("Esc", "Previous step, cancel on first"));
                }
                FlowVariant::Accordion => {
                    items.push(("Alt+p/b/a/c/n", "Toggle form sections"));
                    items.push(("Esc", "Cancel the form"));
                }
            }
            items.push(("Ctrl+L", "Clear focused field"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("g then g", "Scroll to oldest logs"));
            items.push(("G", "Scroll to newest logs"));
        }
    }

    // Global help
    if !matches!(screen, Screen::AddTripPoint(..)) {
        items.push(("", ""));
        items.push(("--- Global ---", ""));
        items.push(("h/←", "Navigate back"));
        items.push(("g then t", "Go to trips"));
        items.push(("g then l", "Go to logs"));
        items.push(("g then g", "Navigate to top of list"));
        items.push(("G", "Navigate to bottom of list"));
        items.push(("?", "Toggle this help"));
        items.push(("q", "Quit application"));
    }

    items
}
