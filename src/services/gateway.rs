//! Authenticated access to the ecrime.ch API.
//!
//! The client is the only place that knows the base URL and the auth header.
//! Each `call` performs exactly one request and folds the transport status
//! and the body's own `status` envelope into a single `Result`.

use crate::domain::constants::{API_KEY_HEADER, STATUS_UNAUTHORIZED};
use crate::domain::models::{Endpoint, Envelope};
use crate::services::config::ApiKey;
use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Which layer refused the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    Transport,
    Envelope,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::Transport => f.write_str("HTTP 403"),
            Denial::Envelope => f.write_str("403"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("error calling API: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{denial} - your account is unauthorized to make this request: {url}")]
    Unauthorized {
        denial: Denial,
        url: String,
        envelope: Option<Envelope>,
    },
    #[error("error converting response to json: {source}")]
    MalformedResponse {
        url: String,
        body: String,
        source: serde_json::Error,
    },
    #[error("likely error: response: {detail}")]
    Application {
        status: i64,
        detail: String,
        envelope: Envelope,
    },
    #[error("no {kind} found for ID: {id}")]
    NotFound { kind: &'static str, id: String },
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "NETWORK_ERROR",
            ApiError::Unauthorized { .. } => "UNAUTHORIZED",
            ApiError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            ApiError::Application { .. } => "APPLICATION_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
        }
    }

    /// Decoded body kept alongside the failure, when there was one.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            ApiError::Unauthorized { envelope, .. } => envelope.as_ref(),
            ApiError::Application { envelope, .. } => Some(envelope),
            _ => None,
        }
    }
}

/// Seam between command handlers and the network.
pub trait Gateway {
    fn call(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<&Value>,
    ) -> Result<Envelope, ApiError>;

    fn get(&self, endpoint: &Endpoint) -> Result<Envelope, ApiError> {
        self.call(Method::Get, endpoint, None)
    }
}

pub struct ApiClient {
    base_url: Url,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: &ApiKey) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid API base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry a path: {}", base_url);
        }

        let mut key = HeaderValue::from_str(api_key.expose())
            .context("API key contains characters not allowed in an HTTP header")?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_bytes(API_KEY_HEADER.as_bytes())?, key);

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("ecrime/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { base_url, http })
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(endpoint.segments())
                .push("");
        }
        url
    }
}

impl Gateway for ApiClient {
    fn call(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<&Value>,
    ) -> Result<Envelope, ApiError> {
        let url = self.url_for(endpoint);
        debug!(?method, %url, "calling API");

        let request = match (method, body) {
            (Method::Get, _) => self.http.get(url.clone()),
            (Method::Post, Some(body)) => self.http.post(url.clone()).json(body),
            (Method::Post, None) => self.http.post(url.clone()),
        };

        let response = request.send().map_err(|e| {
            warn!(%url, error = %e, "API request failed");
            ApiError::Network(e)
        })?;
        let status = response.status();
        let text = response.text()?;
        debug!(%url, %status, bytes = text.len(), "API response received");

        interpret(url.as_str(), status, &text)
    }
}

/// Maps a transport status plus raw body to the call outcome.
pub fn interpret(url: &str, status: StatusCode, body: &str) -> Result<Envelope, ApiError> {
    if status == StatusCode::FORBIDDEN {
        warn!(%url, "HTTP 403 from API");
        return Err(ApiError::Unauthorized {
            denial: Denial::Transport,
            url: url.to_string(),
            envelope: serde_json::from_str::<Value>(body).ok().map(Envelope::new),
        });
    }

    let value: Value =
        serde_json::from_str(body).map_err(|source| ApiError::MalformedResponse {
            url: url.to_string(),
            body: body.to_string(),
            source,
        })?;
    let envelope = Envelope::new(value);
    if envelope.is_ok() {
        return Ok(envelope);
    }

    match envelope.status() {
        STATUS_UNAUTHORIZED => {
            warn!(%url, "API envelope reported 403");
            Err(ApiError::Unauthorized {
                denial: Denial::Envelope,
                url: url.to_string(),
                envelope: Some(envelope),
            })
        }
        other => {
            debug!(%url, status = other, %envelope, "API envelope reported failure");
            let detail = envelope.message().unwrap_or_else(|| envelope.to_string());
            Err(ApiError::Application {
                status: other,
                detail,
                envelope,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TimeWindow;
    use chrono::NaiveDate;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_for(server: &Server, key: &str) -> ApiClient {
        ApiClient::new(&format!("{}/api/v1", server.url()), &ApiKey::new(key)).expect("client")
    }

    #[test]
    fn ok_envelope_is_returned_exactly() {
        let mut server = Server::new();
        let body = json!({"status": 200, "message": "ok", "data": [{"id": 1, "url": "x"}]});
        let mock = server
            .mock("GET", "/api/v1/leaksites/list/")
            .match_header("x-api-key", "key-one")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create();

        let envelope = client_for(&server, "key-one")
            .get(&Endpoint::LeaksiteList)
            .expect("success");
        assert_eq!(envelope, Envelope::new(body));
        mock.assert();
    }

    #[test]
    fn each_client_sends_its_own_credential() {
        let mut server = Server::new();
        let a = server
            .mock("GET", "/api/v1/login/")
            .match_header("x-api-key", "alpha")
            .with_body(r#"{"status": 200, "message": "hi alpha"}"#)
            .create();
        let b = server
            .mock("GET", "/api/v1/login/")
            .match_header("x-api-key", "beta")
            .with_body(r#"{"status": 200, "message": "hi beta"}"#)
            .create();

        let first = client_for(&server, "alpha").get(&Endpoint::Login).expect("alpha");
        let second = client_for(&server, "beta").get(&Endpoint::Login).expect("beta");
        assert_eq!(first.message().as_deref(), Some("hi alpha"));
        assert_eq!(second.message().as_deref(), Some("hi beta"));
        a.assert();
        b.assert();
    }

    #[test]
    fn transport_403_is_unauthorized_and_keeps_body() {
        let mut server = Server::new();
        server
            .mock("GET", "/api/v1/actors/list/")
            .with_status(403)
            .with_body(r#"{"message": "forbidden"}"#)
            .create();

        let err = client_for(&server, "k")
            .get(&Endpoint::ActorList)
            .expect_err("403");
        assert_eq!(err.kind(), "UNAUTHORIZED");
        match err {
            ApiError::Unauthorized {
                denial, envelope, ..
            } => {
                assert_eq!(denial, Denial::Transport);
                assert_eq!(
                    envelope.and_then(|e| e.message()).as_deref(),
                    Some("forbidden")
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn transport_403_with_html_body_is_still_unauthorized() {
        let err = interpret("u", StatusCode::FORBIDDEN, "<html>nope</html>").expect_err("403");
        assert!(matches!(
            err,
            ApiError::Unauthorized {
                denial: Denial::Transport,
                envelope: None,
                ..
            }
        ));
        assert!(err.to_string().starts_with("HTTP 403"));
    }

    #[test]
    fn envelope_403_is_unauthorized() {
        let err = interpret("u", StatusCode::OK, r#"{"status": 403}"#).expect_err("403");
        assert!(matches!(
            err,
            ApiError::Unauthorized {
                denial: Denial::Envelope,
                ..
            }
        ));
    }

    #[test]
    fn non_json_body_is_malformed_and_kept() {
        let err = interpret("u", StatusCode::OK, "gateway timeout").expect_err("malformed");
        match err {
            ApiError::MalformedResponse { body, .. } => assert_eq!(body, "gateway timeout"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn other_status_uses_message_when_present() {
        let err = interpret("u", StatusCode::OK, r#"{"status": 500, "message": "db down"}"#)
            .expect_err("app error");
        assert_eq!(err.kind(), "APPLICATION_ERROR");
        assert_eq!(err.to_string(), "likely error: response: db down");
        assert!(err.envelope().is_some());
    }

    #[test]
    fn missing_status_echoes_whole_envelope() {
        let err = interpret("u", StatusCode::OK, r#"{"data": []}"#).expect_err("app error");
        match &err {
            ApiError::Application { status, detail, .. } => {
                assert_eq!(*status, 0);
                assert_eq!(detail, r#"{"data":[]}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn envelope_status_wins_over_transport_status() {
        let env = interpret("u", StatusCode::INTERNAL_SERVER_ERROR, r#"{"status": 200}"#)
            .expect("envelope says ok");
        assert!(env.is_ok());
    }

    #[test]
    fn connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();
        drop(listener);

        let client = ApiClient::new(&format!("http://127.0.0.1:{port}/api/v1"), &ApiKey::new("k"))
            .expect("client");
        let err = client.get(&Endpoint::Login).expect_err("refused");
        assert_eq!(err.kind(), "NETWORK_ERROR");
    }

    #[test]
    fn post_sends_json_body() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/api/v1/login/")
            .match_body(Matcher::Json(json!({"probe": true})))
            .with_body(r#"{"status": 200}"#)
            .create();

        client_for(&server, "k")
            .call(Method::Post, &Endpoint::Login, Some(&json!({"probe": true})))
            .expect("post");
        mock.assert();
    }

    #[test]
    fn url_segments_are_encoded_and_slash_terminated() {
        let client =
            ApiClient::new("https://ecrime.example/api/v1/", &ApiKey::new("k")).expect("client");
        let url = client.url_for(&Endpoint::ActorSearch {
            text: "lock bit/x".into(),
        });
        assert_eq!(
            url.as_str(),
            "https://ecrime.example/api/v1/actors/search/lock%20bit%2Fx/"
        );

        let day = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date");
        let url = client.url_for(&Endpoint::EventList {
            window: TimeWindow {
                from: day("2024-01-01"),
                to: day("2024-01-31"),
            },
        });
        assert_eq!(
            url.as_str(),
            "https://ecrime.example/api/v1/events/list/from/2024-01-01/to/2024-01-31/"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(ApiClient::new("not a url", &ApiKey::new("k")).is_err());
        assert!(ApiClient::new("mailto:a@b.c", &ApiKey::new("k")).is_err());
    }
}
