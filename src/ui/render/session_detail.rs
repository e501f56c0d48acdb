use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Render one stored session with its exercises.
///
pub fn session_detail(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.get_theme().clone();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled("My Session", styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(&theme));

    let session = match state.get_session_detail() {
        Some(session) => session.clone(),
        None => {
            // Fetch outstanding
            frame.render_widget(spinner::widget(state, size.height).block(block), size);
            return;
        }
    };

    let inner = block.inner(size);
    frame.render_widget(block, size);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let subheader = Paragraph::new(Span::styled(
        format!(
            "{}, {}",
            session.category,
            session.date.format("%Y-%m-%d")
        ),
        styling::current_list_item_style(&theme),
    ));
    frame.render_widget(subheader, rows[0]);

    // Exercises read as entered: weight/reps x sets
    let items: Vec<ListItem> = session
        .exercises
        .iter()
        .map(|exercise| {
            let name = if exercise.name.is_empty() {
                "(unnamed exercise)".to_string()
            } else {
                exercise.name.clone()
            };
            ListItem::new(Line::from(vec![
                Span::styled(name, styling::normal_text_style(&theme)),
                Span::styled(
                    format!(
                        "  {}/{}x{}",
                        exercise.weight, exercise.reps, exercise.sets
                    ),
                    styling::secondary_text_style(&theme),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).style(styling::normal_text_style(&theme));
    frame.render_widget(list, rows[1]);
}
