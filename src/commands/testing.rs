//! In-memory `Gateway` for handler tests.

use crate::domain::models::{Endpoint, Envelope};
use crate::services::gateway::{interpret, ApiError, Gateway, Method};
use reqwest::StatusCode;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// Serves canned bodies keyed by endpoint path and records every path asked
/// for. Unknown paths answer with an application error.
#[derive(Default)]
pub struct StubGateway {
    bodies: HashMap<String, Value>,
    calls: RefCell<Vec<String>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, body: Value) -> Self {
        self.bodies.insert(path.to_string(), body);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Gateway for StubGateway {
    fn call(
        &self,
        _method: Method,
        endpoint: &Endpoint,
        _body: Option<&Value>,
    ) -> Result<Envelope, ApiError> {
        let path = endpoint.path();
        self.calls.borrow_mut().push(path.clone());
        let body = self
            .bodies
            .get(&path)
            .cloned()
            .unwrap_or_else(|| serde_json::json!({"status": 404, "message": "no such route"}));
        interpret(&path, StatusCode::OK, &body.to_string())
    }
}
