//! Transient status line for submission results and other one-shot
//! messages, rendered just above the help bar.

use ratatui::{
    layout::Alignment,
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::state::{Notice, NoticeKind};
use crate::ui::theme;

pub fn render_notice(f: &mut Frame, notice: &Notice) {
    let area = f.area();
    if area.height < theme::HELP_BAR_HEIGHT + theme::SCREEN_MARGIN + 1 {
        return;
    }

    let line = ratatui::layout::Rect::new(
        area.x + theme::SCREEN_MARGIN,
        area.y + area.height - theme::HELP_BAR_HEIGHT - theme::SCREEN_MARGIN - 1,
        area.width.saturating_sub(theme::SCREEN_MARGIN * 2),
        1,
    );

    let style = match notice.kind {
        NoticeKind::Success => theme::success_style(),
        NoticeKind::Error => theme::error_style(),
    };

    f.render_widget(Clear, line);
    let paragraph = Paragraph::new(notice.text.as_str())
        .style(style)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, line);
}
