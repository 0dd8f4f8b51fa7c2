//! Layout components (form frame, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::SubmissionStatus;
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widest the form card gets
pub const FORM_WIDTH: u16 = 72;

/// Split the screen into the content area and the status bar line
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Center a box of at most `width` x `height` inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Submission status
    let status = &app.state.submission;
    let status_color = match status {
        SubmissionStatus::Idle => Color::Gray,
        SubmissionStatus::Validating | SubmissionStatus::Submitting => Color::Yellow,
        SubmissionStatus::Succeeded => Color::Green,
        SubmissionStatus::Failed(_) => Color::Red,
    };
    spans.push(Span::styled(
        format!(" ● {} ", status.label()),
        Style::default().fg(status_color),
    ));

    spans.push(Span::styled(
        format!("Tab/Shift+Tab:move  Enter:next  {SUBMIT_SHORTCUT}:submit  Esc:quit"),
        Style::default().fg(Color::Gray),
    ));

    // Transient message
    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
