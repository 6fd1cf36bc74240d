use super::{ApiError, ApiResult};
use reqwest::Method;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one HTTP exchange. Status codes are interpreted by the caller;
/// only transport failures are errors here.
pub(crate) trait Transport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

/// Browser `fetch` via reqwest's wasm backend.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ReqwestTransport;

impl ReqwestTransport {
    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        token: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let client = reqwest::Client::new();
        let mut req = client.request(request.method, request.url);
        req = Self::with_auth_headers(req, request.bearer);

        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status().as_u16();
        let body = res.text().await.map_err(ApiError::network)?;

        Ok(HttpResponse { status, body })
    }
}
