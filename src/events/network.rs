use crate::firebase::{Firebase, Session};
use crate::state::State;
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    SignUp {
        email: String,
        password: String,
    },
    SignIn {
        email: String,
        password: String,
    },
    SignOut,
    FetchSessions,
    GetSession {
        id: String,
    },
    CreateSession {
        session: Session,
    },
    DeleteSession {
        id: String,
    },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    firebase: &'a mut Firebase,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, firebase: &'a mut Firebase) -> Self {
        Handler { state, firebase }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::SignUp { email, password } => self.sign_up(email, password).await?,
            Event::SignIn { email, password } => self.sign_in(email, password).await?,
            Event::SignOut => self.sign_out().await,
            Event::FetchSessions => self.fetch_sessions().await?,
            Event::GetSession { id } => self.get_session(id).await?,
            Event::CreateSession { session } => self.create_session(session).await?,
            Event::DeleteSession { id } => self.delete_session(id).await?,
        }
        Ok(())
    }

    /// Create an account and, on success, enter the signed-in stack.
    /// Failures surface as a generic banner with no cause distinction.
    ///
    async fn sign_up(&mut self, email: String, password: String) -> Result<()> {
        info!("Creating account for {}...", email);
        match self.firebase.sign_up(&email, &password).await {
            Ok(user) => {
                info!("Account created, signed in as {}.", user.email);
                {
                    let mut state = self.state.lock().await;
                    state.set_user(user);
                }
                self.fetch_sessions().await?;
            }
            Err(e) => {
                error!("Failed to create account: {}", e);
                let mut state = self.state.lock().await;
                state.set_auth_error("Could not create user.".to_string());
            }
        }
        Ok(())
    }

    /// Sign in and, on success, enter the signed-in stack.
    ///
    async fn sign_in(&mut self, email: String, password: String) -> Result<()> {
        info!("Signing in as {}...", email);
        match self.firebase.sign_in(&email, &password).await {
            Ok(user) => {
                info!("Signed in as {}.", user.email);
                {
                    let mut state = self.state.lock().await;
                    state.set_user(user);
                }
                self.fetch_sessions().await?;
            }
            Err(e) => {
                error!("Failed to sign in: {}", e);
                let mut state = self.state.lock().await;
                state.set_auth_error("Could not sign in.".to_string());
            }
        }
        Ok(())
    }

    /// Discard the authenticated session and return to the sign-in stack.
    ///
    async fn sign_out(&mut self) {
        info!("Signing out...");
        self.firebase.sign_out();
        let mut state = self.state.lock().await;
        state.clear_user();
    }

    /// Update state with the stored sessions.
    ///
    async fn fetch_sessions(&mut self) -> Result<()> {
        info!("Fetching stored sessions...");
        match self.firebase.sessions().await {
            Ok(sessions) => {
                info!("Received {} stored sessions.", sessions.len());
                let mut state = self.state.lock().await;
                state.set_sessions(sessions);
            }
            // Document operations have no user-visible error surface; the
            // previous list (or the loading indicator) stays in place.
            Err(e) => error!("Failed to fetch stored sessions: {}", e),
        }
        Ok(())
    }

    /// Update state with one stored session's details.
    ///
    async fn get_session(&mut self, id: String) -> Result<()> {
        info!("Fetching session document {}...", id);
        match self.firebase.session(&id).await {
            Ok(session) => {
                let mut state = self.state.lock().await;
                state.set_session_detail(&id, session);
            }
            Err(e) => error!("Failed to fetch session document {}: {}", id, e),
        }
        Ok(())
    }

    /// Store a validated session record. On success the wizard resets and
    /// the listing refreshes; on failure the error is logged and the wizard
    /// stays where it is.
    ///
    async fn create_session(&mut self, session: Session) -> Result<()> {
        info!("Storing session '{}'...", session.category);
        match self.firebase.create_session(&session).await {
            Ok(id) => {
                info!("Session stored as document {}.", id);
                {
                    let mut state = self.state.lock().await;
                    state.finish_submission();
                }
                self.fetch_sessions().await?;
            }
            Err(e) => {
                error!("Failed to store session: {}", e);
                let mut state = self.state.lock().await;
                state.abort_submission();
            }
        }
        Ok(())
    }

    /// Delete a stored session and refresh the listing.
    ///
    async fn delete_session(&mut self, id: String) -> Result<()> {
        info!("Deleting session document {}...", id);
        match self.firebase.delete_session(&id).await {
            Ok(()) => {
                info!("Session document {} deleted.", id);
                self.fetch_sessions().await?;
            }
            Err(e) => error!("Failed to delete session document {}: {}", id, e),
        }
        Ok(())
    }
}
