use serde::{Deserialize, Serialize};

/// A note as returned by the backend.
///
/// Timestamps are kept as the server's RFC3339 strings; the server is the
/// only writer of `created_at` / `modified_at`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Owner. The backend scopes notes by token and may omit this field.
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub modified_at: String,
}

impl Note {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

/// Request body shared by create (`POST /notes`) and update (`PUT /notes/{id}`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NotePayload {
    pub title: String,
    pub content: String,
}

/// Signed-in identity. The OAuth callback only carries an email.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct User {
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AskRequest {
    pub question: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct AskResponse {
    pub answer: String,
}
