use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the settings screen: theme toggle and sign-out.
///
pub fn settings(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme().clone();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("Settings", styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(&theme));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(size.height.saturating_sub(8) / 2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    let dark_mode_on = theme.name == "dark";
    let switch = Line::from(vec![
        Span::styled(
            if dark_mode_on { "[x] " } else { "[ ] " },
            if dark_mode_on {
                Style::default()
                    .fg(theme.success.to_color())
                    .add_modifier(Modifier::BOLD)
            } else {
                styling::normal_text_style(&theme)
            },
        ),
        Span::styled("Dark mode", styling::normal_text_style(&theme)),
        Span::styled("  (t to toggle)", styling::secondary_text_style(&theme)),
    ]);
    frame.render_widget(Paragraph::new(switch).alignment(Alignment::Center), rows[1]);

    let sign_out = Line::from(vec![
        Span::styled(
            "Sign out",
            Style::default()
                .fg(theme.primary.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (s to sign out)", styling::secondary_text_style(&theme)),
    ]);
    frame.render_widget(
        Paragraph::new(sign_out).alignment(Alignment::Center),
        rows[2],
    );

    if let Some(user) = state.get_user() {
        let email = Paragraph::new(Span::styled(
            format!("Logged in as {}", user.email),
            styling::secondary_text_style(&theme),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(email, rows[3]);
    }
}
