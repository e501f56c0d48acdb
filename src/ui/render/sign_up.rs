use super::{fields, sign_in::centered_column, Frame};
use crate::state::{AuthField, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

/// Render the sign-up screen.
///
pub fn sign_up(frame: &mut Frame, size: Rect, state: &State) {
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
            Constraint::Length(3), // Confirm password
            Constraint::Length(1), // Confirm password error
            Constraint::Length(2), // Sign-in hint
            Constraint::Min(0),
        ])
        .split(area);

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

    let title = Paragraph::new("Sign up")
        .style(
            Style::default()
                .fg(theme.text.to_color())
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(title, rows[1]);

    let form = state.sign_up_form();
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
    fields::text_field(
        frame,
        rows[6],
        &theme,
        "Confirm password",
        &form.confirm_password,
        state.auth_field() == AuthField::ConfirmPassword,
        true,
    );
    fields::error_line(frame, rows[7], &theme, errors.get("confirm_password"));

    let hint = Paragraph::new("Already have an account? Press Esc to sign in.")
        .style(styling::secondary_text_style(&theme))
        .alignment(Alignment::Center);
    frame.render_widget(hint, rows[8]);
}
