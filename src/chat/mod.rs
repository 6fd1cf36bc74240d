use crate::api::{ApiClient, ApiError, Transport};
use chrono::{DateTime, Local};
use leptos::prelude::*;
use tracing::{debug, warn};

pub(crate) const GREETING: &str = "Hi! I'm here to help. What would you like to know?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ChatMessage {
    pub id: u64,
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Local>,
    /// Assistant message standing in for a failed answer.
    pub failed: bool,
}

/// Append-only Ask-AI conversation with at most one question in flight.
#[derive(Clone, Debug)]
pub(crate) struct Transcript {
    messages: Vec<ChatMessage>,
    pending: bool,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        let mut t = Self {
            messages: vec![],
            pending: false,
            next_id: 1,
        };
        t.push(ChatRole::Assistant, GREETING.to_string(), false);
        t
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Records the user's question and returns the text to send, or `None`
    /// when the input is blank or an answer is still outstanding.
    pub fn submit(&mut self, input: &str) -> Option<String> {
        let question = input.trim();
        if question.is_empty() || self.pending {
            return None;
        }

        self.push(ChatRole::User, question.to_string(), false);
        self.pending = true;
        Some(question.to_string())
    }

    pub fn receive(&mut self, result: Result<String, ApiError>) {
        match result {
            Ok(answer) => self.push(ChatRole::Assistant, answer, false),
            Err(e) => self.push(
                ChatRole::Assistant,
                format!("Sorry, I couldn't get an answer: {e}"),
                true,
            ),
        }
        self.pending = false;
    }

    fn push(&mut self, role: ChatRole, text: String, failed: bool) {
        self.messages.push(ChatMessage {
            id: self.next_id,
            role,
            text,
            sent_at: Local::now(),
            failed,
        });
        self.next_id += 1;
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one question through the transcript. Returns `false` if the input
/// was not accepted (blank, or another question is pending).
pub(crate) async fn ask<T: Transport>(
    transcript: RwSignal<Transcript>,
    api: &ApiClient<T>,
    input: &str,
) -> bool {
    let mut question = None;
    transcript.update(|t| question = t.submit(input));
    let Some(question) = question else {
        return false;
    };

    debug!(len = question.len(), "asking assistant");
    let result = api.ask_question(&question).await;
    if let Err(e) = &result {
        warn!(error = %e, "ask failed");
    }
    transcript.update(|t| t.receive(result));
    true
}

pub(crate) fn format_time(at: &DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::session::SessionStore;
    use crate::storage::memory::MemoryStorage;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn roles(t: &Transcript) -> Vec<ChatRole> {
        t.messages().iter().map(|m| m.role).collect()
    }

    #[test]
    fn test_starts_with_greeting() {
        let t = Transcript::new();
        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.messages()[0].role, ChatRole::Assistant);
        assert_eq!(t.messages()[0].text, GREETING);
        assert!(!t.is_pending());
    }

    #[test]
    fn test_submit_appends_trimmed_question_and_blocks_resubmit() {
        let mut t = Transcript::new();
        assert_eq!(t.submit("  what's new?  ").as_deref(), Some("what's new?"));
        assert!(t.is_pending());
        assert_eq!(t.messages()[1].text, "what's new?");

        assert!(t.submit("again").is_none());
        assert_eq!(t.messages().len(), 2);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut t = Transcript::new();
        assert!(t.submit("   \n").is_none());
        assert!(!t.is_pending());
        assert_eq!(t.messages().len(), 1);
    }

    #[test]
    fn test_receive_answer_and_error() {
        let mut t = Transcript::new();
        t.submit("q1");
        t.receive(Ok("a1".to_string()));
        assert!(!t.is_pending());

        t.submit("q2");
        t.receive(Err(ApiError::Http {
            status: 500,
            body: "down".to_string(),
        }));
        assert!(!t.is_pending());

        assert_eq!(
            roles(&t),
            vec![
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::Assistant,
            ]
        );
        let last = t.messages().last().expect("error message");
        assert!(last.failed);
        assert!(last.text.starts_with("Sorry, I couldn't get an answer"));

        let ids: Vec<u64> = t.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_format_time() {
        let at = Local
            .with_ymd_and_hms(2024, 5, 1, 9, 5, 0)
            .single()
            .expect("unambiguous local time");
        assert_eq!(format_time(&at), "09:05");
    }

    #[tokio::test]
    async fn test_ask_round_trip() {
        let session = SessionStore::new(Arc::new(MemoryStorage::default()));
        let transport = MockTransport::default();
        let api = ApiClient::new("http://api.local", transport.clone(), session, Arc::new(|| {}));
        let transcript = RwSignal::new(Transcript::new());

        transport.respond(200, r#"{"answer":"You have 3 notes."}"#);
        assert!(ask(transcript, &api, "How many notes?").await);
        assert!(!ask(transcript, &api, "  ").await);

        transcript.with_untracked(|t| {
            assert!(!t.is_pending());
            assert_eq!(t.messages().len(), 3);
            assert_eq!(t.messages()[2].text, "You have 3 notes.");
        });
        assert_eq!(transport.requests().len(), 1);
    }
}
