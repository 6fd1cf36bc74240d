mod callback;

pub(crate) use callback::parse_callback_fragment;

use crate::models::User;
use crate::storage::{
    clear_session_storage, load_session_from_storage, save_session_to_storage, SessionStorage,
};
use leptos::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// An authenticated user: bearer token and identity always travel together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SessionState {
    pub session: Option<Session>,
    /// Set until the durable session has been read.
    pub loading: bool,
}

impl SessionState {
    fn loading() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GuardDecision {
    Pending,
    Admit,
    RedirectToLogin,
}

pub(crate) fn guard_decision(state: &SessionState) -> GuardDecision {
    if state.loading {
        GuardDecision::Pending
    } else if state.session.is_some() {
        GuardDecision::Admit
    } else {
        GuardDecision::RedirectToLogin
    }
}

/// Reactive session context shared by the route guard and the API client.
#[derive(Clone)]
pub(crate) struct SessionStore {
    state: RwSignal<SessionState>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Builds the store and restores any durable session before the
    /// loading flag clears, so guarded routes never flash the login page.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let store = Self {
            state: RwSignal::new(SessionState::loading()),
            storage,
        };
        store.restore();
        store
    }

    fn restore(&self) {
        let session = load_session_from_storage(self.storage.as_ref())
            .map(|(token, user)| Session { token, user });

        match &session {
            Some(s) => debug!(email = %s.user.email, "restored session from storage"),
            None => debug!("no stored session"),
        }

        self.state.set(SessionState {
            session,
            loading: false,
        });
    }

    pub fn login(&self, token: String, user: User) {
        save_session_to_storage(self.storage.as_ref(), &token, &user);
        info!(email = %user.email, "signed in");
        self.state.update(|s| {
            s.session = Some(Session { token, user });
            s.loading = false;
        });
    }

    pub fn logout(&self) {
        clear_session_storage(self.storage.as_ref());
        if self.state.with_untracked(|s| s.session.is_some()) {
            info!("signed out");
        }
        self.state.update(|s| s.session = None);
    }

    /// Signs in from an OAuth redirect fragment. A fragment without both
    /// `token` and `email` leaves the session untouched.
    pub fn complete_callback(&self, fragment: &str) -> bool {
        match parse_callback_fragment(fragment) {
            Some((token, user)) => {
                self.login(token, user);
                true
            }
            None => {
                warn!("auth callback without token or email");
                false
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn user(&self) -> Option<User> {
        self.state
            .with(|s| s.session.as_ref().map(|session| session.user.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.session.is_some())
    }

    /// Read by the request layer; never tracked.
    pub fn token_untracked(&self) -> Option<String> {
        self.state
            .with_untracked(|s| s.session.as_ref().map(|session| session.token.clone()))
    }
}
