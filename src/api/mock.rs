use super::transport::{HttpRequest, HttpResponse, Transport};
use super::{ApiError, ApiResult};
use reqwest::Method;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Scripted backend: replies are consumed in order and every request is recorded.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    replies: Arc<Mutex<VecDeque<ApiResult<HttpResponse>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn respond(&self, status: u16, body: &str) {
        self.replies.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Network(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_string())))
    }
}

type Gate = oneshot::Sender<ApiResult<HttpResponse>>;

/// Backend whose replies are released by hand, so a test can settle
/// concurrent requests in any order.
#[derive(Clone, Default)]
pub(crate) struct GatedTransport {
    sent: Arc<Mutex<Vec<HttpRequest>>>,
    waiting: Arc<Mutex<Vec<(HttpRequest, Gate)>>>,
}

impl GatedTransport {
    /// Yields until `count` requests have been sent in total.
    pub async fn wait_for(&self, count: usize) {
        while self.sent.lock().unwrap().len() < count {
            tokio::task::yield_now().await;
        }
    }

    pub fn sent(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Answers the oldest waiting request for `method` + `url`.
    pub fn release(&self, method: Method, url: &str, status: u16, body: &str) {
        let gate = {
            let mut waiting = self.waiting.lock().unwrap();
            let idx = waiting
                .iter()
                .position(|(r, _)| r.method == method && r.url == url)
                .expect("no such request waiting");
            waiting.remove(idx).1
        };
        let _ = gate.send(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    /// Answers the most recently sent request still waiting.
    pub fn release_newest(&self, status: u16, body: &str) {
        let gate = self
            .waiting
            .lock()
            .unwrap()
            .pop()
            .expect("no request waiting")
            .1;
        let _ = gate.send(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }
}

impl Transport for GatedTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.sent.lock().unwrap().push(request.clone());
        self.waiting.lock().unwrap().push((request, tx));
        rx.await
            .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".to_string())))
    }
}

pub(crate) fn note_json(id: &str, title: &str, content: &str, modified_at: &str) -> String {
    serde_json::json!({
        "id": id,
        "title": title,
        "content": content,
        "user_id": "u1",
        "created_at": "2024-05-01T10:00:00Z",
        "modified_at": modified_at,
    })
    .to_string()
}
