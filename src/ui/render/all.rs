use super::{footer, main, Frame};
use crate::state::{State, Tab};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Tabs},
};
use tui_logger::TuiLoggerWidget;

/// Render the full application frame according to state. Signed-out users
/// see the authentication stack; signed-in users get the tabbed stack.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let theme = state.get_theme().clone();

    // Paint the themed background before any view content
    frame.render_widget(
        Block::default().style(
            Style::default()
                .bg(theme.background.to_color())
                .fg(theme.text.to_color()),
        ),
        size,
    );

    if state.get_user().is_some() {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(size);
        tab_bar(frame, rows[0], state, &theme);
        main(frame, rows[1], state);
        footer(frame, rows[2], state);
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(size);
        main(frame, rows[0], state);
        footer(frame, rows[1], state);
    }

    if state.is_log_visible() {
        log_overlay(frame, size, &theme);
    }
}

/// Render the tab bar of the signed-in stack.
///
fn tab_bar(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let selected = match state.active_tab() {
        Tab::Sessions => 0,
        Tab::Settings => 1,
    };
    let tabs = Tabs::new(vec![" Sessions ", " Settings "])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "gym-tui",
                    Style::default().fg(theme.accent.to_color()),
                ))
                .border_style(styling::normal_block_border_style(theme))
                .style(Style::default().bg(theme.surface.to_color())),
        )
        .style(styling::secondary_text_style(theme))
        .highlight_style(
            Style::default()
                .fg(theme.primary.to_color())
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, size);
}

/// Render the diagnostic log overlay on top of the current view.
///
fn log_overlay(frame: &mut Frame, size: Rect, theme: &Theme) {
    let popup_area = centered_rect(80, 60, size);
    frame.render_widget(Clear, popup_area);

    let widget = TuiLoggerWidget::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Log (Ctrl-l to close)")
                .border_style(styling::active_block_border_style(theme)),
        )
        .style_error(Style::default().fg(theme.error.to_color()))
        .style_warn(Style::default().fg(theme.warning.to_color()))
        .style_info(Style::default().fg(theme.info.to_color()))
        .style_debug(Style::default().fg(theme.text_muted.to_color()))
        .style_trace(Style::default().fg(theme.text_muted.to_color()));
    frame.render_widget(widget, popup_area);
}

/// Helper function to create a centered rectangle (ratatui modal pattern)
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
