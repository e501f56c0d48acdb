use crate::events::network::Event as NetworkEvent;
use crate::state::{DetailsField, State, View, WizardStep};
use anyhow::Result;
use chrono::Local;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

fn plain(key: &KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn control(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            if event::poll(tick_rate).unwrap() {
                if let CrosstermEvent::Key(key) = event::read().unwrap() {
                    tx_clone.send(Event::Input(key)).unwrap();
                }
            }
            tx_clone.send(Event::Tick).unwrap();
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => {
                // Repeats and releases only arrive from enhanced keyboard
                // reporting; act on presses alone.
                if key.kind != KeyEventKind::Press {
                    return Ok(true);
                }
                if key.code == KeyCode::Char('c') && control(&key) {
                    debug!("Processing exit terminal event '{:?}'...", key);
                    return Ok(false);
                }
                if key.code == KeyCode::Char('l') && control(&key) {
                    debug!("Processing toggle log overlay event '{:?}'...", key);
                    state.toggle_log();
                    return Ok(true);
                }
                let view = state.current_view().clone();
                match view {
                    View::SignIn => Self::handle_sign_in(key, state),
                    View::SignUp => Self::handle_sign_up(key, state),
                    View::Sessions => Self::handle_sessions(key, state),
                    View::SessionDetail => Self::handle_session_detail(key, state),
                    View::SessionWizard => Self::handle_wizard(key, state),
                    View::Settings => Self::handle_settings(key, state),
                }
            }
            Event::Tick => {
                state.advance_spinner_index();
                Ok(true)
            }
        }
    }

    /// Handle keys on the sign-in screen.
    ///
    fn handle_sign_in(key: KeyEvent, state: &mut State) -> Result<bool> {
        match key.code {
            KeyCode::Char('n') if control(&key) => {
                debug!("Processing open sign-up event '{:?}'...", key);
                state.open_sign_up();
            }
            KeyCode::Char(c) if plain(&key) => {
                state.auth_insert_char(c);
            }
            KeyCode::Backspace => {
                state.auth_backspace();
            }
            KeyCode::Tab | KeyCode::Down => {
                state.next_auth_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                state.previous_auth_field();
            }
            KeyCode::Enter => {
                if let Some((email, password)) = state.submit_sign_in() {
                    debug!("Submitting sign-in for {}...", email);
                    state.dispatch(NetworkEvent::SignIn { email, password });
                }
            }
            _ => debug!("Skipping processing of terminal event '{:?}'...", key),
        }
        Ok(true)
    }

    /// Handle keys on the sign-up screen.
    ///
    fn handle_sign_up(key: KeyEvent, state: &mut State) -> Result<bool> {
        match key.code {
            KeyCode::Esc => {
                debug!("Processing close sign-up event '{:?}'...", key);
                state.close_sign_up();
            }
            KeyCode::Char(c) if plain(&key) => {
                state.auth_insert_char(c);
            }
            KeyCode::Backspace => {
                state.auth_backspace();
            }
            KeyCode::Tab | KeyCode::Down => {
                state.next_auth_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                state.previous_auth_field();
            }
            KeyCode::Enter => {
                if let Some((email, password)) = state.submit_sign_up() {
                    debug!("Submitting sign-up for {}...", email);
                    state.dispatch(NetworkEvent::SignUp { email, password });
                }
            }
            _ => debug!("Skipping processing of terminal event '{:?}'...", key),
        }
        Ok(true)
    }

    /// Handle keys on the session listing.
    ///
    fn handle_sessions(key: KeyEvent, state: &mut State) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') if plain(&key) => {
                debug!("Processing exit terminal event '{:?}'...", key);
                return Ok(false);
            }
            KeyCode::Char('j') | KeyCode::Down if plain(&key) => {
                state.next_session_index();
            }
            KeyCode::Char('k') | KeyCode::Up if plain(&key) => {
                state.previous_session_index();
            }
            KeyCode::Enter => {
                let id = state.selected_session().map(|stored| stored.id.clone());
                if let Some(id) = id {
                    debug!("Processing open session event for document {}...", id);
                    state.open_session_detail(id.clone());
                    state.dispatch(NetworkEvent::GetSession { id });
                }
            }
            KeyCode::Char('n') if plain(&key) => {
                debug!("Processing new session event '{:?}'...", key);
                state.open_wizard(Local::now().date_naive());
            }
            KeyCode::Char('d') if plain(&key) => {
                let id = state.selected_session().map(|stored| stored.id.clone());
                if let Some(id) = id {
                    debug!("Processing delete session event for document {}...", id);
                    state.dispatch(NetworkEvent::DeleteSession { id });
                }
            }
            KeyCode::Char('r') if plain(&key) => {
                debug!("Processing refresh sessions event '{:?}'...", key);
                state.set_sessions_loading();
                state.dispatch(NetworkEvent::FetchSessions);
            }
            KeyCode::Tab => {
                state.switch_tab();
            }
            _ => debug!("Skipping processing of terminal event '{:?}'...", key),
        }
        Ok(true)
    }

    /// Handle keys on the session detail view.
    ///
    fn handle_session_detail(key: KeyEvent, state: &mut State) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') if plain(&key) => {
                debug!("Processing exit terminal event '{:?}'...", key);
                return Ok(false);
            }
            KeyCode::Esc => {
                debug!("Processing close session detail event '{:?}'...", key);
                state.close_session_detail();
            }
            KeyCode::Char('d') if plain(&key) => {
                let id = state.get_session_detail_id().map(str::to_owned);
                if let Some(id) = id {
                    debug!("Processing delete session event for document {}...", id);
                    state.close_session_detail();
                    state.dispatch(NetworkEvent::DeleteSession { id });
                }
            }
            _ => debug!("Skipping processing of terminal event '{:?}'...", key),
        }
        Ok(true)
    }

    /// Handle keys in the session wizard.
    ///
    fn handle_wizard(key: KeyEvent, state: &mut State) -> Result<bool> {
        let now = Local::now().naive_local();
        match key.code {
            KeyCode::Esc => match state.wizard_step() {
                WizardStep::Details => {
                    debug!("Processing close wizard event '{:?}'...", key);
                    state.cancel_wizard();
                }
                WizardStep::Exercises => {
                    debug!("Processing wizard back event '{:?}'...", key);
                    state.wizard_back();
                }
            },
            KeyCode::Char('a') if control(&key) => {
                if state.wizard_step() == WizardStep::Exercises {
                    debug!("Processing append exercise event '{:?}'...", key);
                    state.wizard_append_exercise();
                }
            }
            KeyCode::Char('r') if control(&key) => {
                if state.wizard_step() == WizardStep::Exercises {
                    debug!("Processing reset exercises event '{:?}'...", key);
                    state.wizard_reset();
                }
            }
            KeyCode::Char(c) if plain(&key) => {
                state.wizard_insert_char(c);
            }
            KeyCode::Backspace => {
                state.wizard_backspace();
            }
            KeyCode::Tab => {
                state.wizard_focus_next();
            }
            KeyCode::BackTab => {
                state.wizard_focus_previous();
            }
            KeyCode::Down => {
                state.wizard_focus_row_down();
            }
            KeyCode::Up => {
                state.wizard_focus_row_up();
            }
            KeyCode::Enter => match state.wizard_step() {
                WizardStep::Details => match state.details_field() {
                    DetailsField::Category => {
                        state.wizard_focus_next();
                    }
                    DetailsField::Date => {
                        debug!("Processing wizard next event '{:?}'...", key);
                        state.wizard_next(now);
                    }
                },
                WizardStep::Exercises => {
                    if let Some(session) = state.wizard_save(now) {
                        debug!("Submitting session '{}'...", session.category);
                        state.dispatch(NetworkEvent::CreateSession { session });
                    }
                }
            },
            _ => debug!("Skipping processing of terminal event '{:?}'...", key),
        }
        Ok(true)
    }

    /// Handle keys on the settings screen.
    ///
    fn handle_settings(key: KeyEvent, state: &mut State) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') if plain(&key) => {
                debug!("Processing exit terminal event '{:?}'...", key);
                return Ok(false);
            }
            KeyCode::Char('t') if plain(&key) => {
                debug!("Processing toggle dark mode event '{:?}'...", key);
                state.toggle_dark_mode();
            }
            KeyCode::Char('s') if plain(&key) => {
                debug!("Processing sign-out event '{:?}'...", key);
                state.dispatch(NetworkEvent::SignOut);
            }
            KeyCode::Tab => {
                state.switch_tab();
            }
            _ => debug!("Skipping processing of terminal event '{:?}'...", key),
        }
        Ok(true)
    }
}
