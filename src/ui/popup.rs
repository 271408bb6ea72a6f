use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::Popup;

pub const HELP_TEXT: &str = "Look at the phrase in the top pane.\n\
Type it on the input line.\n\
Hit 'Enter'.\n\
Repeat.\n\
When the countdown ends, get your score.\n\
\n\
The countdown starts with your first keystroke.";

pub fn about_text() -> String {
    format!(
        "{} v{}\n{}\nMIT License",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION"),
    )
}

impl Popup {
    pub fn title(&self) -> &'static str {
        match self {
            Popup::Help => "Help",
            Popup::About => "About",
        }
    }

    pub fn body(&self) -> String {
        match self {
            Popup::Help => HELP_TEXT.to_string(),
            Popup::About => about_text(),
        }
    }
}

/// Rect of `percent_x` x `height` centred in `area`, clamped to fit
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_popup(popup: Popup, area: Rect, buf: &mut Buffer) {
    let body = popup.body();
    // borders, closing hint and room for one wrapped line
    let height = body.lines().count() as u16 + 6;
    let rect = centered_rect(70, height, area);

    Clear.render(rect, buf);
    Paragraph::new(format!("{body}\n\n(any key) close"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(popup.title())
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rect, buf);
}
