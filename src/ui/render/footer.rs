use super::Frame;
use crate::state::{State, View, WizardStep};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render footer widget: a mode indicator with the keys available in the
/// current view, and the version on the right.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme().clone();
    let (label, hint, mode_color) = match state.current_view() {
        View::SignIn => (
            "AUTH:",
            " Type to edit, Tab: switch field, Enter: sign in, Ctrl-n: sign up, Ctrl-c: quit",
            theme.footer_auth.to_color(),
        ),
        View::SignUp => (
            "AUTH:",
            " Type to edit, Tab: switch field, Enter: sign up, Esc: back to sign in",
            theme.footer_auth.to_color(),
        ),
        View::Sessions => (
            "SESSIONS:",
            " j/k: navigate, Enter: open, n: new session, d: delete, r: refresh, Tab: settings, q: quit",
            theme.footer_sessions.to_color(),
        ),
        View::SessionDetail => (
            "SESSION:",
            " d: delete, Esc: back, q: quit",
            theme.footer_session.to_color(),
        ),
        View::SessionWizard => match state.wizard_step() {
            WizardStep::Details => (
                "WIZARD:",
                " Type to edit, Tab: switch field, Enter: next, Esc: close",
                theme.footer_wizard.to_color(),
            ),
            WizardStep::Exercises => (
                "WIZARD:",
                " Type to edit, Tab: move, Ctrl-a: add entry, Ctrl-r: reset, Enter: save, Esc: back",
                theme.footer_wizard.to_color(),
            ),
        },
        View::Settings => (
            "SETTINGS:",
            " t: toggle dark mode, s: sign out, Tab: sessions, q: quit",
            theme.footer_settings.to_color(),
        ),
    };

    let controls_content = Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(theme.highlight_fg.to_color())
                .bg(mode_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(hint, Style::default().fg(theme.text_secondary.to_color())),
    ]);
    let controls_widget = Paragraph::new(controls_content).alignment(Alignment::Left);

    let right_content = Line::from(vec![Span::styled(
        format!(" {}", env!("CARGO_PKG_VERSION")),
        Style::default().fg(theme.secondary.to_color()),
    )]);
    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}
