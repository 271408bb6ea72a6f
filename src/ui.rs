pub mod popup;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    round::{Feedback, Phase},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
pub const TITLE: &str = "CHECK/PRACTICE TYPING";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.round.state();
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let target_lines = if state.target.width() <= max_chars_per_line as usize {
            1
        } else {
            ((state.target.width() as f64 / max_chars_per_line as f64).ceil()) as u16
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),            // title
                Constraint::Length(2),            // countdown
                Constraint::Length(target_lines), // target / headline
                Constraint::Length(1),            // padding
                Constraint::Length(1),            // input
                Constraint::Length(1),            // padding
                Constraint::Length(2),            // feedback / detail
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(TITLE, bold_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let countdown = match state.phase {
            Phase::Finished => Span::styled("--", Style::default().fg(Color::DarkGray)),
            Phase::Idle | Phase::Running => {
                let style = match state.tint() {
                    Some(tint) => bold_style.fg(tint.color()),
                    None => bold_style,
                };
                Span::styled(format!("{:02}", state.remaining_secs), style)
            }
        };
        Paragraph::new(countdown)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        match (state.phase, state.summary) {
            (Phase::Finished, Some(summary)) => {
                Paragraph::new(Span::styled(summary.headline(), green_bold_style))
                    .alignment(Alignment::Center)
                    .render(chunks[2], buf);

                Paragraph::new(Text::styled(summary.detail(), green_bold_style))
                    .alignment(Alignment::Center)
                    .render(chunks[6], buf);
            }
            _ => {
                Paragraph::new(Span::styled(state.target.as_str(), bold_style))
                    .alignment(if target_lines == 1 {
                        Alignment::Center
                    } else {
                        Alignment::Left
                    })
                    .wrap(Wrap { trim: true })
                    .render(chunks[2], buf);

                let input = Line::from(vec![
                    Span::styled("> ", dim_style),
                    Span::raw(self.input.as_str()),
                    Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
                ]);
                Paragraph::new(input)
                    .alignment(Alignment::Center)
                    .render(chunks[4], buf);

                let feedback_style = match state.feedback {
                    Feedback::Prompt => Style::default(),
                    Feedback::Correct => green_bold_style,
                    Feedback::Incorrect => red_bold_style,
                };
                let mut lines = vec![Line::from(Span::styled(
                    state.feedback.text(),
                    feedback_style,
                ))];
                if state.counters.total_submissions > 0 {
                    lines.push(Line::from(Span::styled(
                        format!("{:.2}% entries correct", self.round.live_entry_accuracy()),
                        dim_style,
                    )));
                }
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .render(chunks[6], buf);
            }
        }

        let legend = if self.can_go_again() {
            "(enter) submit / (tab) go again / (f1) help / (f2) about / (esc) quit"
        } else {
            "(enter) submit / (f1) help / (f2) about / (esc) quit"
        };
        Paragraph::new(Span::styled(legend, italic_style)).render(chunks[8], buf);

        if let Some(popup) = self.popup {
            popup::render_popup(popup, area, buf);
        }
    }
}
