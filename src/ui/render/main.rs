use super::{session_detail, sessions, settings, sign_in, sign_up, wizard, Frame};
use crate::state::{State, View};
use ratatui::layout::Rect;

/// Render main widget according to state.
///
pub fn main(frame: &mut Frame, size: Rect, state: &mut State) {
    match state.current_view() {
        View::SignIn => sign_in::sign_in(frame, size, state),
        View::SignUp => sign_up::sign_up(frame, size, state),
        View::Sessions => sessions::sessions(frame, size, state),
        View::SessionDetail => session_detail::session_detail(frame, size, state),
        View::SessionWizard => wizard::wizard(frame, size, state),
        View::Settings => settings::settings(frame, size, state),
    }
}
