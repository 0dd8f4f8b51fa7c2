//! Onboarding form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::FieldName;
use crate::ui::components::{banner_height, render_button, render_status_banner, BUTTON_HEIGHT};
use crate::ui::layout::{centered_rect, FORM_WIDTH};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

const CHECKING_HINT: &str = "Checking...";

/// Draw the onboarding form centered in `area`
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let banner = state.banner_message();

    // Inner width = card width minus borders and margin
    let inner_width = FORM_WIDTH.min(area.width).saturating_sub(4);
    let banner_rows = banner.map_or(0, |msg| banner_height(msg, inner_width));
    let height = (3 * FIELD_HEIGHT + BUTTON_HEIGHT + 4).saturating_add(banner_rows);
    let card = centered_rect(area, FORM_WIDTH, height);

    let block = Block::default()
        .title(" Onboarding ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),  // First / last name
            Constraint::Length(FIELD_HEIGHT),  // Phone
            Constraint::Length(FIELD_HEIGHT),  // Corporation number
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(banner_rows),   // Status banner
            Constraint::Min(0),
        ])
        .margin(1)
        .split(card);

    let names = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .spacing(1)
        .split(chunks[0]);

    draw_input(frame, names[0], app, FieldName::FirstName);
    draw_input(frame, names[1], app, FieldName::LastName);
    draw_input(frame, chunks[1], app, FieldName::Phone);
    draw_input(frame, chunks[2], app, FieldName::CorporationNumber);

    let label = if state.submission.is_busy() {
        state.submission.label()
    } else {
        "Submit"
    };
    render_button(
        frame,
        chunks[3],
        label,
        state.form.is_submit_active(),
        !state.submission.is_busy(),
    );

    if let Some(message) = banner {
        render_status_banner(frame, chunks[4], message);
    }
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App, name: FieldName) {
    let state = &app.state;
    let hint = (name == FieldName::CorporationNumber && state.corporation_check_pending)
        .then_some(CHECKING_HINT);
    draw_field(
        frame,
        area,
        state.form.field(name),
        state.form.is_active(name),
        state.field_error(name),
        hint,
    );
}
