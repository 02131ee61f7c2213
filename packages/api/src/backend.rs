//! # Backend transport
//!
//! The vocabulary backend is an external HTTP service. [`Backend`] is the seam
//! the action wrappers talk to: one [`BackendCall`] in, the decoded JSON body
//! out. [`HttpBackend`] is the `reqwest` implementation used by the server.
//!
//! | Endpoint | Method | Path | Cookie |
//! |----------|--------|------|--------|
//! | [`Endpoint::Signin`] | POST | `/signin` | no |
//! | [`Endpoint::Signup`] | POST | `/signup` | no |
//! | [`Endpoint::Signout`] | POST | `/signout` | yes |
//! | [`Endpoint::SignedInCheck`] | GET | `/signed-in-check` | yes |
//! | [`Endpoint::RegisterWord`] | POST | `/word` | yes |
//! | [`Endpoint::GenerateWord`] | POST | `/word/generate` | yes |
//! | [`Endpoint::SuggestWords`] | POST | `/word/suggest` | yes |
//! | [`Endpoint::WordList`] | GET | `/words` | yes |
//! | [`Endpoint::WordDetail`] | POST | `/word/detail` | yes |
//! | [`Endpoint::DeleteWord`] | POST | `/word/delete` | yes |

use std::future::Future;

use serde_json::Value;

use crate::error::{server_message, ActionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Signin,
    Signup,
    Signout,
    SignedInCheck,
    RegisterWord,
    GenerateWord,
    SuggestWords,
    WordList,
    WordDetail,
    DeleteWord,
}

impl Endpoint {
    pub fn method(self) -> Method {
        match self {
            Self::SignedInCheck | Self::WordList => Method::Get,
            _ => Method::Post,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Signin => "/signin",
            Self::Signup => "/signup",
            Self::Signout => "/signout",
            Self::SignedInCheck => "/signed-in-check",
            Self::RegisterWord => "/word",
            Self::GenerateWord => "/word/generate",
            Self::SuggestWords => "/word/suggest",
            Self::WordList => "/words",
            Self::WordDetail => "/word/detail",
            Self::DeleteWord => "/word/delete",
        }
    }

    /// Whether the call requires the session cookie.
    pub fn authenticated(self) -> bool {
        !matches!(self, Self::Signin | Self::Signup)
    }
}

/// A request to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendCall {
    pub endpoint: Endpoint,
    /// Session token forwarded as `Cookie: access_token=<token>`.
    pub token: Option<String>,
    pub body: Option<Value>,
}

impl BackendCall {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            token: None,
            body: None,
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Something that can carry a [`BackendCall`] to the vocabulary service.
///
/// A non-2xx answer must come back as [`ActionError::Rejected`]; a call that
/// never got an answer as [`ActionError::Transport`].
pub trait Backend {
    fn send(&self, call: BackendCall) -> impl Future<Output = Result<Value, ActionError>> + Send;
}

/// What a non-2xx body has to say to the user.
///
/// JSON bodies go through [`server_message`] and `text/plain` bodies are taken
/// as they are. Anything else, such as a proxy's HTML error page, gives `None`
/// so the caller falls back to its own wording.
pub(crate) fn rejection_message(content_type: Option<&str>, body: &[u8]) -> Option<String> {
    if let Ok(json) = serde_json::from_slice::<Value>(body) {
        return server_message(&json);
    }
    let plain = content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("text/plain"));
    if !plain {
        return None;
    }
    let text = std::str::from_utf8(body).ok()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(feature = "server")]
mod http {
    use reqwest::header::{CONTENT_TYPE, COOKIE};
    use reqwest::Client;
    use serde_json::Value;

    use super::{rejection_message, Backend, BackendCall, Method};
    use crate::error::ActionError;
    use crate::session::SESSION_COOKIE;
    use crate::settings::Settings;

    /// `reqwest` client bound to the configured backend URL.
    #[derive(Debug, Clone)]
    pub struct HttpBackend {
        client: Client,
        base_url: String,
    }

    impl HttpBackend {
        pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
            let client = Client::builder()
                .timeout(settings.request_timeout())
                .build()?;
            Ok(Self {
                client,
                base_url: settings.service.url.trim_end_matches('/').to_string(),
            })
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }
    }

    impl Backend for HttpBackend {
        async fn send(&self, call: BackendCall) -> Result<Value, ActionError> {
            let url = self.url(call.endpoint.path());
            let mut request = match call.endpoint.method() {
                Method::Get => self.client.get(&url),
                Method::Post => self.client.post(&url),
            };
            if let Some(token) = &call.token {
                request = request.header(COOKIE, format!("{SESSION_COOKIE}={token}"));
            }
            if let Some(body) = &call.body {
                request = request.json(body);
            }

            tracing::debug!(endpoint = ?call.endpoint, %url, "calling backend");
            let response = request.send().await.map_err(|e| {
                tracing::warn!(endpoint = ?call.endpoint, error = %e, "backend unreachable");
                ActionError::Transport(e.to_string())
            })?;

            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ActionError::Transport(e.to_string()))?;

            if !status.is_success() {
                let message = rejection_message(content_type.as_deref(), &bytes);
                tracing::warn!(
                    endpoint = ?call.endpoint,
                    status = status.as_u16(),
                    message = message.as_deref().unwrap_or("-"),
                    "backend rejected request"
                );
                return Err(ActionError::Rejected {
                    status: status.as_u16(),
                    message,
                });
            }

            if bytes.is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())))
        }
    }
}

#[cfg(feature = "server")]
pub use http::HttpBackend;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_auth_entry_points_skip_cookie() {
        let all = [
            Endpoint::Signin,
            Endpoint::Signup,
            Endpoint::Signout,
            Endpoint::SignedInCheck,
            Endpoint::RegisterWord,
            Endpoint::GenerateWord,
            Endpoint::SuggestWords,
            Endpoint::WordList,
            Endpoint::WordDetail,
            Endpoint::DeleteWord,
        ];
        let open: Vec<_> = all.iter().filter(|e| !e.authenticated()).collect();
        assert_eq!(open, [&Endpoint::Signin, &Endpoint::Signup]);
    }

    #[test]
    fn test_read_endpoints_use_get() {
        assert_eq!(Endpoint::WordList.method(), Method::Get);
        assert_eq!(Endpoint::SignedInCheck.method(), Method::Get);
        assert_eq!(Endpoint::DeleteWord.method(), Method::Post);
        assert_eq!(Endpoint::DeleteWord.path(), "/word/delete");
    }

    #[test]
    fn test_call_builder() {
        let call = BackendCall::new(Endpoint::WordDetail)
            .with_token("tok")
            .with_body(serde_json::json!({"user_word_id": "w1"}));
        assert_eq!(call.token.as_deref(), Some("tok"));
        assert_eq!(call.body.unwrap()["user_word_id"], "w1");
    }

    const NGINX_502: &str =
        "<html><body><h1>502 Bad Gateway</h1><hr><center>nginx</center></body></html>";

    #[test]
    fn test_html_error_page_has_no_message() {
        assert_eq!(rejection_message(Some("text/html"), NGINX_502.as_bytes()), None);
        assert_eq!(rejection_message(None, NGINX_502.as_bytes()), None);
    }

    #[test]
    fn test_rejection_message_sources() {
        let json = br#"{"error": {"detail": "word already registered"}}"#;
        assert_eq!(
            rejection_message(Some("application/json"), json).as_deref(),
            Some("word already registered")
        );
        assert_eq!(
            rejection_message(Some("text/plain; charset=utf-8"), b" upstream down \n").as_deref(),
            Some("upstream down")
        );
        assert_eq!(rejection_message(Some("text/plain"), b"   "), None);
        assert_eq!(rejection_message(Some("application/json"), b""), None);
    }

    /// Answers a single request on a local port with a canned HTTP response.
    #[cfg(feature = "server")]
    async fn serve_once(response: String) -> std::net::SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            // Read the headers, then whatever body Content-Length announces
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        addr
    }

    #[cfg(feature = "server")]
    fn backend_at(addr: std::net::SocketAddr) -> HttpBackend {
        let settings =
            crate::settings::Settings::from_toml(&format!("[service]\nurl = \"http://{addr}\"")).unwrap();
        HttpBackend::new(&settings).unwrap()
    }

    #[cfg(feature = "server")]
    #[tokio::test]
    async fn test_proxy_error_page_falls_back_to_generic_message() {
        let response = format!(
            "HTTP/1.1 502 Bad Gateway\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            NGINX_502.len(),
            NGINX_502
        );
        let backend = backend_at(serve_once(response).await);

        let call = BackendCall::new(Endpoint::Signin)
            .with_body(serde_json::json!({"username_or_email": "alice", "password": "Passw0rd"}));
        let err = backend.send(call).await.unwrap_err();

        assert_eq!(
            err,
            ActionError::Rejected {
                status: 502,
                message: None
            }
        );
        assert_eq!(err.user_message("ログインに失敗しました"), "ログインに失敗しました");
    }

    #[cfg(feature = "server")]
    #[tokio::test]
    async fn test_json_rejection_keeps_server_detail() {
        let body = r#"{"detail": "invalid credentials"}"#;
        let response = format!(
            "HTTP/1.1 401 Unauthorized\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let backend = backend_at(serve_once(response).await);

        let err = backend
            .send(BackendCall::new(Endpoint::Signin).with_body(serde_json::json!({})))
            .await
            .unwrap_err();

        assert_eq!(err.user_message("ログインに失敗しました"), "invalid credentials");
    }
}
