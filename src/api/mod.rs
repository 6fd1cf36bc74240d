mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub(crate) use transport::{HttpRequest, ReqwestTransport, Transport};

use crate::models::{AskRequest, AskResponse, Note, NotePayload};
use crate::session::SessionStore;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request failed ({status}): {body}")]
    Http { status: u16, body: String },
    #[error("Invalid response: {0}")]
    Parse(String),
}

impl ApiError {
    pub(crate) fn network(e: impl std::fmt::Display) -> Self {
        Self::Network(e.to_string())
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Called after the session has been cleared because the backend answered 401.
pub(crate) type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Thin client for the notes backend.
///
/// Every request is signed with the current session's bearer token (if any).
/// A 401 from any endpoint logs the user out and fires `on_unauthorized`,
/// whichever call triggered it.
#[derive(Clone)]
pub(crate) struct ApiClient<T = ReqwestTransport> {
    base_url: String,
    transport: T,
    session: SessionStore,
    on_unauthorized: UnauthorizedHook,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(
        base_url: impl Into<String>,
        transport: T,
        session: SessionStore,
        on_unauthorized: UnauthorizedHook,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            session,
            on_unauthorized,
        }
    }

    pub async fn list_notes(&self) -> ApiResult<Vec<Note>> {
        self.request(Method::GET, "/notes", None::<&()>).await
    }

    pub async fn get_note(&self, id: &str) -> ApiResult<Note> {
        self.request(Method::GET, &note_path(id), None::<&()>).await
    }

    pub async fn create_note(&self, payload: &NotePayload) -> ApiResult<Note> {
        self.request(Method::POST, "/notes", Some(payload)).await
    }

    pub async fn update_note(&self, id: &str, payload: &NotePayload) -> ApiResult<Note> {
        self.request(Method::PUT, &note_path(id), Some(payload)).await
    }

    pub async fn delete_note(&self, id: &str) -> ApiResult<()> {
        self.send_checked(Method::DELETE, &note_path(id), None::<&()>)
            .await
            .map(|_| ())
    }

    pub async fn ask_question(&self, question: &str) -> ApiResult<String> {
        let resp: AskResponse = self
            .request(
                Method::POST,
                "/notes/ask",
                Some(&AskRequest {
                    question: question.to_string(),
                }),
            )
            .await?;
        Ok(resp.answer)
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<R> {
        let text = self.send_checked(method, path, body).await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!(path, error = %e, "unexpected response body");
            ApiError::parse(e)
        })
    }

    async fn send_checked(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> ApiResult<String> {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(ApiError::parse)?;

        debug!(%method, path, "api request");
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            bearer: self.session.token_untracked(),
            body,
        };

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(path, error = %e, "api request failed");
            e
        })?;

        if response.status == 401 {
            self.handle_unauthorized(path);
            return Err(ApiError::Unauthorized);
        }

        if !(200..300).contains(&response.status) {
            warn!(path, status = response.status, "api request rejected");
            return Err(ApiError::Http {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.body)
    }

    fn handle_unauthorized(&self, path: &str) {
        warn!(path, "backend rejected credentials, signing out");
        self.session.logout();
        (self.on_unauthorized)();
    }
}

fn note_path(id: &str) -> String {
    format!("/notes/{}", urlencoding::encode(id))
}
