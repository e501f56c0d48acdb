use super::{fields, Frame};
use crate::state::{DetailsField, ExerciseField, State, WizardStep};
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

/// Render the two-step session creation wizard.
///
pub fn wizard(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme().clone();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Step instruction
            Constraint::Min(1),    // Step content
        ])
        .split(size);

    let title_block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(&theme));
    let title = Paragraph::new("Add Session")
        .block(title_block)
        .style(styling::active_block_title_style().fg(theme.text.to_color()))
        .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    let instruction = if state.is_submit_in_flight() {
        "Saving..."
    } else {
        match state.wizard_step() {
            WizardStep::Details => "Please fill in category and date.",
            WizardStep::Exercises => "Please fill in exercise details to submit.",
        }
    };
    let instruction = Paragraph::new(instruction)
        .style(Style::default().fg(theme.info.to_color()))
        .alignment(Alignment::Center);
    frame.render_widget(instruction, rows[1]);

    match state.wizard_step() {
        WizardStep::Details => details_step(frame, rows[2], state, &theme),
        WizardStep::Exercises => exercises_step(frame, rows[2], state, &theme),
    }
}

/// Render the category and date fields with their validation messages.
///
fn details_step(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let area = centered_column(size);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category
            Constraint::Length(1), // Category error
            Constraint::Length(3), // Date
            Constraint::Length(1), // Date error
            Constraint::Min(0),
        ])
        .split(area);

    let form = state.wizard_form();
    let errors = state.get_wizard_errors();
    fields::text_field(
        frame,
        rows[0],
        theme,
        "Category",
        &form.category,
        state.details_field() == DetailsField::Category,
        false,
    );
    fields::error_line(frame, rows[1], theme, errors.get("category"));
    fields::text_field(
        frame,
        rows[2],
        theme,
        "Date (YYYY-MM-DD)",
        &form.date,
        state.details_field() == DetailsField::Date,
        false,
    );
    fields::error_line(frame, rows[3], theme, errors.get("date"));
}

/// Render the editable exercise entries, windowed around the focused row.
///
fn exercises_step(frame: &mut Frame, size: Rect, state: &State, theme: &Theme) {
    let entries = state.wizard_form().exercises();
    let (focus_row, focus_field) = state.exercise_focus();

    let row_height = 3u16;
    let visible_rows = (size.height / row_height).max(1) as usize;
    let start = if focus_row >= visible_rows {
        focus_row + 1 - visible_rows
    } else {
        0
    };
    let end = (start + visible_rows).min(entries.len());

    let constraints: Vec<Constraint> = (start..end)
        .map(|_| Constraint::Length(row_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    for (chunk, index) in (start..end).enumerate() {
        let entry = &entries[index];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(25),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ])
            .split(rows[chunk]);

        let cells = [
            ("Exercise", ExerciseField::Name),
            ("KG", ExerciseField::Weight),
            ("Sets", ExerciseField::Sets),
            ("Reps", ExerciseField::Reps),
        ];
        for (column, (label, field)) in cells.into_iter().enumerate() {
            fields::text_field(
                frame,
                columns[column],
                theme,
                label,
                entry.field(field),
                index == focus_row && field == focus_field,
                false,
            );
        }
    }
}

/// Return a centered column for the details fields.
///
fn centered_column(size: Rect) -> Rect {
    let width = size.width.min(64);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(size)[1]
}
