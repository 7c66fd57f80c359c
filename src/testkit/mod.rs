// SPDX-License-Identifier: MIT OR Apache-2.0

//! An in-memory Redfish service for tests.
//!
//! [`MockService`] implements [`Client`] over a map of URI to JSON document,
//! records every request it receives and can be told to fail specific URIs.
//! Clones share state, so a test can hand one clone to the code under test
//! and inspect the requests through another.
//!
//! ```
//! use redfish_api_rs::testkit::MockService;
//! use redfish_api_rs::resources::Chassis;
//!
//! # tokio_test::block_on(async {
//! let service = MockService::new();
//! service.insert("/redfish/v1/Chassis/1", r#"{"Id": "1", "AssetTag": "old"}"#);
//!
//! let mut chassis = Chassis::get(&service.shared(), "/redfish/v1/Chassis/1").await.unwrap();
//! chassis.asset_tag = Some("new".to_string());
//! chassis.update().await.unwrap();
//!
//! assert_eq!(service.patches()[0].json(), serde_json::json!({"AssetTag": "new"}));
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;
use http::header::IF_MATCH;
use http::{HeaderMap, Method, StatusCode};

use crate::client::{Client, Response, SharedClient};
use crate::error::{RedfishError, Result};

/// A request received by a [`MockService`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub body: Bytes,
    pub if_match: Option<String>,
}

impl RecordedRequest {
    /// The request body parsed as JSON (`Null` when empty).
    pub fn json(&self) -> serde_json::Value {
        if self.body.is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Default)]
struct State {
    documents: HashMap<String, Bytes>,
    failures: HashMap<String, StatusCode>,
    requests: Vec<RecordedRequest>,
}

#[derive(Debug, Clone, Default)]
pub struct MockService {
    state: Arc<Mutex<State>>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A panicking test poisons the lock; the data is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// This service as a transport handle.
    pub fn shared(&self) -> SharedClient {
        Arc::new(self.clone())
    }

    /// Serve `json` for GETs of `uri`.
    pub fn insert(&self, uri: &str, json: &str) {
        self.state()
            .documents
            .insert(uri.to_string(), Bytes::copy_from_slice(json.as_bytes()));
    }

    /// Serve a collection document listing `members`.
    pub fn insert_collection(&self, uri: &str, members: &[String]) {
        let members: Vec<serde_json::Value> = members
            .iter()
            .map(|m| serde_json::json!({ "@odata.id": m }))
            .collect();
        let document = serde_json::json!({
            "@odata.id": uri,
            "Name": "Collection",
            "Members@odata.count": members.len(),
            "Members": members,
        });
        self.insert(uri, &document.to_string());
    }

    /// Stop serving `uri`; requests for it get 404.
    pub fn remove(&self, uri: &str) {
        self.state().documents.remove(uri);
    }

    /// Answer every request for `uri` with `status`.
    pub fn fail_with(&self, uri: &str, status: StatusCode) {
        self.state().failures.insert(uri.to_string(), status);
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    /// The PATCH requests received so far, in order.
    pub fn patches(&self) -> Vec<RecordedRequest> {
        self.state()
            .requests
            .iter()
            .filter(|r| r.method == Method::PATCH)
            .cloned()
            .collect()
    }

    fn handle(&self, request: RecordedRequest) -> Result<Response> {
        let mut state = self.state();
        let method = request.method.clone();
        let uri = request.uri.clone();
        state.requests.push(request);

        let status_error = |status: StatusCode| RedfishError::Status {
            method: method.clone(),
            uri: uri.clone(),
            status,
            error: None,
        };

        if let Some(status) = state.failures.get(&uri) {
            return Err(status_error(*status));
        }
        let Some(document) = state.documents.get(&uri) else {
            return Err(status_error(StatusCode::NOT_FOUND));
        };

        if method == Method::PATCH {
            Ok(Response::new(StatusCode::NO_CONTENT, Bytes::new()))
        } else {
            Ok(Response::new(StatusCode::OK, document.clone()))
        }
    }
}

#[async_trait]
impl Client for MockService {
    async fn get(&self, uri: &str) -> Result<Response> {
        self.handle(RecordedRequest {
            method: Method::GET,
            uri: uri.to_string(),
            body: Bytes::new(),
            if_match: None,
        })
    }

    async fn patch_with_headers(
        &self,
        uri: &str,
        body: Bytes,
        headers: &HeaderMap,
    ) -> Result<Response> {
        let if_match = headers
            .get(IF_MATCH)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.handle(RecordedRequest {
            method: Method::PATCH,
            uri: uri.to_string(),
            body,
            if_match,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_and_records() {
        let service = MockService::new();
        service.insert("/redfish/v1", r#"{"Id":"RootService"}"#);
        let client = service.shared();

        let response = client.get("/redfish/v1").await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(&response.body[..], br#"{"Id":"RootService"}"#);

        client
            .patch("/redfish/v1", Bytes::from_static(br#"{"A":1}"#))
            .await
            .unwrap();

        assert_eq!(service.requests().len(), 2);
        assert_eq!(service.patches().len(), 1);
        assert_eq!(service.patches()[0].json(), serde_json::json!({"A": 1}));
    }

    #[tokio::test]
    async fn test_missing_and_failing_uris() {
        let service = MockService::new();
        service.insert("/redfish/v1/Chassis/1", "{}");
        service.fail_with("/redfish/v1/Chassis/1", StatusCode::FORBIDDEN);
        let client = service.shared();

        let err = client.get("/redfish/v1/Chassis/1").await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));

        let err = client.get("/redfish/v1/Chassis/2").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insert_collection() {
        let service = MockService::new();
        service.insert_collection(
            "/redfish/v1/Chassis",
            &["/redfish/v1/Chassis/1".to_string()],
        );
        let state = service.state();
        let document: serde_json::Value =
            serde_json::from_slice(&state.documents["/redfish/v1/Chassis"]).unwrap();
        assert_eq!(document["Members@odata.count"], 1);
        assert_eq!(
            document["Members"][0]["@odata.id"],
            "/redfish/v1/Chassis/1"
        );
    }
}
