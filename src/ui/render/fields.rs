use super::Frame;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render a bordered single-line text field. Secret fields render a mask
/// instead of their value.
///
pub fn text_field(
    frame: &mut Frame,
    size: Rect,
    theme: &Theme,
    label: &str,
    value: &str,
    is_selected: bool,
    masked: bool,
) {
    let border_style = if is_selected {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(label.to_string())
        .border_style(border_style);

    let shown = if masked {
        "*".repeat(value.chars().count().min(50))
    } else {
        value.to_string()
    };

    let text = if is_selected {
        Line::from(vec![
            Span::styled(
                shown,
                Style::default()
                    .fg(theme.primary.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("█", Style::default().fg(theme.primary.to_color())),
        ])
    } else {
        Line::from(Span::styled(shown, styling::normal_text_style(theme)))
    };

    frame.render_widget(Paragraph::new(text).block(block), size);
}

/// Render an inline validation message, or nothing when the field is valid.
///
pub fn error_line(frame: &mut Frame, size: Rect, theme: &Theme, message: Option<&str>) {
    if let Some(message) = message {
        let line = Line::from(Span::styled(
            format!(" {}", message),
            styling::error_text_style(theme),
        ));
        frame.render_widget(Paragraph::new(line), size);
    }
}
