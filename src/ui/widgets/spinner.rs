use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{layout::Alignment, text::Text, widgets::Paragraph};

/// Frames of the loading spinner animation.
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Return a paragraph widget showing the current spinner frame, roughly
/// centered vertically for the given height.
///
pub fn widget<'a>(state: &State, height: u16) -> Paragraph<'a> {
    let frame = FRAMES[*state.get_spinner_index() % FRAMES.len()];
    let mut lines = vec![String::new(); (height / 2).saturating_sub(1) as usize];
    lines.push(frame.to_string());
    Paragraph::new(Text::from(lines.join("\n")))
        .style(styling::secondary_text_style(state.get_theme()))
        .alignment(Alignment::Center)
}
