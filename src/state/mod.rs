pub(crate) mod notes;
pub(crate) mod toast;

pub(crate) use notes::{NoteCollection, NoteError};
pub(crate) use toast::Toaster;

use crate::api::{ApiClient, ReqwestTransport};
use crate::config::EnvConfig;
use crate::models::{Note, NotePayload};
use crate::session::SessionStore;
use crate::storage::LocalStorage;
use crate::util::redirect_to_login;
use std::sync::Arc;
use strum::{EnumIter, IntoStaticStr};

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: EnvConfig,
    pub session: SessionStore,
    pub api_client: ApiClient<ReqwestTransport>,
    pub toaster: Toaster,
}

impl AppState {
    pub fn new(config: EnvConfig) -> Self {
        let session = SessionStore::new(Arc::new(LocalStorage));
        let api_client = ApiClient::new(
            config.api_url.clone(),
            ReqwestTransport,
            session.clone(),
            Arc::new(redirect_to_login),
        );

        Self {
            config,
            session,
            api_client,
            toaster: Toaster::new(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub(crate) enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum EditorState {
    #[default]
    Closed,
    Creating,
    Editing(String),
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            Self::Editing(id) => Some(id),
            _ => None,
        }
    }
}

/// Unsaved editor fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EditorDraft {
    pub title: String,
    pub content: String,
}

impl EditorDraft {
    pub fn from_note(note: Option<&Note>) -> Self {
        note.map(|n| Self {
            title: n.title.clone(),
            content: n.content.clone(),
        })
        .unwrap_or_default()
    }

    /// `None` when there is nothing to save; otherwise the trimmed payload
    /// with a blank title replaced by "Untitled".
    pub fn to_payload(&self) -> Option<NotePayload> {
        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() && content.is_empty() {
            return None;
        }

        Some(NotePayload {
            title: if title.is_empty() {
                "Untitled".to_string()
            } else {
                title.to_string()
            },
            content: content.to_string(),
        })
    }
}
