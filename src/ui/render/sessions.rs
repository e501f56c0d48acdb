use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

const BLOCK_TITLE: &str = "My Programs";

/// Render the stored session listing.
///
pub fn sessions(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(BLOCK_TITLE, styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(&theme));

    let stored = match state.get_sessions() {
        Some(stored) => stored.to_vec(),
        None => {
            // Fetch outstanding
            frame.render_widget(spinner::widget(state, size.height).block(block), size);
            return;
        }
    };

    let email = state
        .get_user()
        .map(|user| user.email.clone())
        .unwrap_or_default();

    if stored.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Welcome to this new app",
                styling::normal_text_style(&theme).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Logged in as {}", email),
                styling::secondary_text_style(&theme),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "You don't have any active sessions. Press 'n' to register a training session.",
                styling::normal_text_style(&theme),
            )),
        ];
        let welcome = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        frame.render_widget(welcome, size);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(size);

    let logged_in = Paragraph::new(Span::styled(
        format!(" Logged in as {}", email),
        styling::secondary_text_style(&theme),
    ));
    frame.render_widget(logged_in, rows[0]);

    let items: Vec<ListItem> = stored
        .iter()
        .map(|stored| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    stored.session.category.clone(),
                    styling::current_list_item_style(&theme),
                ),
                Span::styled(
                    format!("  {}", stored.session.date.format("%Y-%m-%d")),
                    styling::secondary_text_style(&theme),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            block.title(Span::styled(
                format!("{} ({})", BLOCK_TITLE, stored.len()),
                styling::active_block_title_style(),
            )),
        )
        .style(styling::normal_text_style(&theme))
        .highlight_style(
            styling::active_list_item_style(&theme)
                .bg(theme.highlight_bg.to_color())
                .fg(theme.highlight_fg.to_color()),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, rows[1], state.sessions_list_state());
}
