use super::{fields, Frame};
use crate::state::{AuthField, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

/// Render the sign-in screen.
///
pub fn sign_in(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme().clone();
    let area = centered_column(size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Error banner
            Constraint::Length(3), // Title
            Constraint::Length(3), // Email
            Constraint::Length(1), // Email error
            Constraint::Length(3), // Password
            Constraint::Length(1), // Password error
            Constraint::Length(2), // Sign-up hint
            Constraint::Min(0),
        ])
        .split(area);

    // Generic dismissible banner for authentication failures; typing
    // dismisses it.
    if let Some(error) = state.get_auth_error() {
        let banner = Paragraph::new(format!("Error! {}", error))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.error.to_color())),
            )
            .style(
                Style::default()
                    .fg(theme.error.to_color())
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        frame.render_widget(banner, rows[0]);
    }

    let title = Paragraph::new("Welcome to login")
        .style(
            Style::default()
                .fg(theme.text.to_color())
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(title, rows[1]);

    let form = state.sign_in_form();
    let errors = state.get_auth_errors();
    fields::text_field(
        frame,
        rows[2],
        &theme,
        "Email",
        &form.email,
        state.auth_field() == AuthField::Email,
        false,
    );
    fields::error_line(frame, rows[3], &theme, errors.get("email"));
    fields::text_field(
        frame,
        rows[4],
        &theme,
        "Password",
        &form.password,
        state.auth_field() == AuthField::Password,
        true,
    );
    fields::error_line(frame, rows[5], &theme, errors.get("password"));

    let hint = Paragraph::new("Not signed up yet? Press Ctrl-n to sign up.")
        .style(styling::secondary_text_style(&theme))
        .alignment(Alignment::Center);
    frame.render_widget(hint, rows[6]);
}

/// Return a centered column for the authentication forms.
///
pub fn centered_column(size: Rect) -> Rect {
    let width = size.width.min(64);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(size);
    let height = size.height.min(24);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(size.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(columns[1])[1]
}
