// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fetching the members of a Redfish collection.
//!
//! A collection document lists member links. [`list_referenced`] fetches
//! every member in link order and keeps going when a member fails, so the
//! caller always learns both what was retrieved and what was not.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::client::SharedClient;
use crate::common::entity::decode;
use crate::common::{get_object, Entity, Link, Resource};
use crate::error::{RedfishError, Result};

/// A collection document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collection {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Members", default)]
    pub members: Vec<Link>,
    /// Advisory; iteration always follows `members`.
    #[serde(rename = "Members@odata.count", default)]
    pub members_count: Option<u64>,
    #[serde(rename = "Members@odata.nextLink", default)]
    pub next_link: Option<String>,
}

impl Collection {
    /// Member URIs in document order.
    pub fn member_uris(&self) -> Vec<String> {
        self.members.iter().map(|m| m.odata_id.clone()).collect()
    }
}

/// Fetch a collection document and return its member URIs in order.
///
/// Services that page large collections return `Members@odata.nextLink`;
/// the following pages are fetched and appended. A link back to a page
/// already fetched is a [`RedfishError::Validation`].
pub async fn get_collection(client: &SharedClient, uri: &str) -> Result<Vec<String>> {
    let mut uris = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(uri.to_string());

    while let Some(page_uri) = next.take() {
        visited.insert(page_uri.clone());
        let response = client.get(&page_uri).await?;
        let page: Collection = decode(&page_uri, &response.body)?;
        if let Some(count) = page.members_count {
            if count as usize != page.members.len() && page.next_link.is_none() {
                debug!(
                    uri = %page_uri,
                    count,
                    members = page.members.len(),
                    "member count annotation disagrees with member list"
                );
            }
        }
        uris.extend(page.member_uris());
        next = match page.next_link {
            Some(link) if link.is_empty() => None,
            Some(link) if visited.contains(&link) => {
                return Err(RedfishError::Validation(format!(
                    "Collection {uri} links back to page {link}"
                )));
            }
            link => link,
        };
    }

    Ok(uris)
}

/// Members that could not be retrieved, keyed by URI, in the order they
/// were attempted.
#[derive(Debug, Default)]
pub struct FailureReport {
    entries: Vec<(String, RedfishError)>,
}

impl FailureReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, uri: impl Into<String>, error: RedfishError) {
        self.entries.push((uri.into(), error));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Error recorded for `uri`.
    pub fn get(&self, uri: &str) -> Option<&RedfishError> {
        self.entries
            .iter()
            .find(|(failed, _)| failed == uri)
            .map(|(_, error)| error)
    }

    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(uri, _)| uri.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RedfishError)> {
        self.entries.iter().map(|(uri, error)| (uri.as_str(), error))
    }

    pub fn into_entries(self) -> Vec<(String, RedfishError)> {
        self.entries
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (uri, error)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{uri}: {error}")?;
        }
        Ok(())
    }
}

/// Members retrieved alongside the ones that failed.
#[derive(Debug)]
pub struct PartialFailure<T> {
    pub items: Vec<T>,
    pub failures: FailureReport,
}

/// Error from [`list_referenced`].
#[derive(Debug)]
pub enum ListError<T> {
    /// The collection document itself could not be fetched or decoded.
    Collection(RedfishError),
    /// Some members failed; the rest are in `items`.
    Partial(PartialFailure<T>),
}

impl<T> ListError<T> {
    /// Members that were retrieved before and after any failures.
    pub fn items(&self) -> &[T] {
        match self {
            ListError::Collection(_) => &[],
            ListError::Partial(partial) => &partial.items,
        }
    }

    pub fn failures(&self) -> Option<&FailureReport> {
        match self {
            ListError::Collection(_) => None,
            ListError::Partial(partial) => Some(&partial.failures),
        }
    }

    /// Split into retrieved members and failures. A collection-level error
    /// yields no members and a single failure.
    pub fn into_parts(self) -> (Vec<T>, FailureReport) {
        match self {
            ListError::Collection(error) => {
                let mut failures = FailureReport::new();
                failures.record(String::new(), error);
                (Vec::new(), failures)
            }
            ListError::Partial(partial) => (partial.items, partial.failures),
        }
    }
}

impl<T> fmt::Display for ListError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Collection(error) => write!(f, "Failed to fetch collection: {error}"),
            ListError::Partial(partial) => write!(
                f,
                "{} of {} members failed: {}",
                partial.failures.len(),
                partial.failures.len() + partial.items.len(),
                partial.failures
            ),
        }
    }
}

impl<T: fmt::Debug> std::error::Error for ListError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListError::Collection(error) => Some(error),
            ListError::Partial(_) => None,
        }
    }
}

pub type ListResult<T> = std::result::Result<Vec<T>, ListError<T>>;

/// Fetch every member of the collection at `link`.
///
/// An empty link yields an empty list without touching the network. Members
/// are fetched one at a time in link order; a failing member is recorded
/// and skipped, never retried.
pub async fn list_referenced<T: Resource>(client: &SharedClient, link: &str) -> ListResult<T> {
    if link.is_empty() {
        return Ok(Vec::new());
    }

    let uris = get_collection(client, link)
        .await
        .map_err(ListError::Collection)?;

    fetch_members(client, link, uris).await
}

/// Fetch every resource in a link array, such as `Links.ComputerSystems`.
///
/// Failures are isolated per member exactly as in [`list_referenced`].
pub async fn list_linked<T: Resource>(client: &SharedClient, links: &[Link]) -> ListResult<T> {
    let uris = links
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.odata_id.clone())
        .collect();
    fetch_members(client, "links", uris).await
}

impl Entity {
    /// [`list_referenced`] through the client this entity was fetched with.
    pub async fn list_referenced<T: Resource>(&self, link: &str) -> ListResult<T> {
        match self.client() {
            Ok(client) => list_referenced(client, link).await,
            Err(error) => Err(ListError::Collection(error)),
        }
    }

    /// [`list_linked`] through the client this entity was fetched with.
    pub async fn list_linked<T: Resource>(&self, links: &[Link]) -> ListResult<T> {
        match self.client() {
            Ok(client) => list_linked(client, links).await,
            Err(error) => Err(ListError::Collection(error)),
        }
    }
}

async fn fetch_members<T: Resource>(
    client: &SharedClient,
    source: &str,
    uris: Vec<String>,
) -> ListResult<T> {
    let mut items = Vec::with_capacity(uris.len());
    let mut failures = FailureReport::new();
    for uri in uris {
        match get_object::<T>(client, &uri).await {
            Ok(item) => items.push(item),
            Err(error) => {
                warn!(source = %source, member = %uri, error = %error, "failed to fetch member");
                failures.record(uri, error);
            }
        }
    }

    if failures.is_empty() {
        Ok(items)
    } else {
        Err(ListError::Partial(PartialFailure { items, failures }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::impl_resource;
    use crate::testkit::MockService;
    use http::StatusCode;

    #[derive(Debug, Deserialize)]
    struct Fan {
        #[serde(flatten)]
        entity: Entity,
        #[serde(rename = "Reading", default)]
        reading: u32,
    }

    impl_resource!(Fan);

    fn fans(service: &MockService, count: usize) -> Vec<String> {
        let uris: Vec<String> = (1..=count)
            .map(|i| format!("/redfish/v1/Fans/{i}"))
            .collect();
        service.insert_collection("/redfish/v1/Fans", &uris);
        for (i, uri) in uris.iter().enumerate() {
            service.insert(
                uri,
                &format!(r#"{{"@odata.id":"{uri}","Id":"{}","Reading":{}}}"#, i + 1, i * 100),
            );
        }
        uris
    }

    #[tokio::test]
    async fn test_empty_link_makes_no_request() {
        let service = MockService::new();
        let result: Vec<Fan> = list_referenced(&service.shared(), "").await.unwrap();
        assert!(result.is_empty());
        assert!(service.requests().is_empty());
    }

    #[tokio::test]
    async fn test_all_members_in_order() {
        let service = MockService::new();
        let uris = fans(&service, 5);

        let result: Vec<Fan> = list_referenced(&service.shared(), "/redfish/v1/Fans")
            .await
            .unwrap();
        let fetched: Vec<&str> = result.iter().map(|f| f.odata_id()).collect();
        assert_eq!(fetched, uris);
        assert_eq!(result[2].reading, 200);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_going() {
        let service = MockService::new();
        let uris = fans(&service, 9);
        service.remove(&uris[3]);
        service.fail_with(&uris[7], StatusCode::INTERNAL_SERVER_ERROR);

        let err = list_referenced::<Fan>(&service.shared(), "/redfish/v1/Fans")
            .await
            .unwrap_err();

        assert_eq!(err.items().len(), 7);
        let failures = err.failures().unwrap();
        assert_eq!(failures.len(), 2);
        assert!(failures.get(&uris[3]).unwrap().is_not_found());
        assert_eq!(
            failures.get(&uris[7]).unwrap().status(),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
        assert_eq!(failures.uris().collect::<Vec<_>>(), vec![&uris[3], &uris[7]]);

        let order: Vec<&str> = err.items().iter().map(|f| f.odata_id()).collect();
        let expected: Vec<&String> = uris
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 3 && *i != 7)
            .map(|(_, u)| u)
            .collect();
        assert_eq!(order, expected);
        assert!(err.to_string().starts_with("2 of 9 members failed"));

        // Every member was attempted exactly once.
        for uri in &uris {
            assert_eq!(service.requests().iter().filter(|r| r.uri == *uri).count(), 1);
        }
    }

    #[tokio::test]
    async fn test_decode_failure_is_per_member() {
        let service = MockService::new();
        let uris = fans(&service, 3);
        service.insert(&uris[1], r#"{"Reading": "fast"}"#);

        let (items, failures) = list_referenced::<Fan>(&service.shared(), "/redfish/v1/Fans")
            .await
            .unwrap_err()
            .into_parts();
        assert_eq!(items.len(), 2);
        assert!(matches!(
            failures.get(&uris[1]),
            Some(RedfishError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_collection_failure_is_fatal() {
        let service = MockService::new();
        fans(&service, 3);
        service.fail_with("/redfish/v1/Fans", StatusCode::SERVICE_UNAVAILABLE);

        let err = list_referenced::<Fan>(&service.shared(), "/redfish/v1/Fans")
            .await
            .unwrap_err();
        assert!(matches!(err, ListError::Collection(_)));
        assert!(err.items().is_empty());
        assert_eq!(service.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_collection_decode_failure_is_fatal() {
        let service = MockService::new();
        service.insert("/redfish/v1/Fans", r#"{"Members": "none"}"#);

        let err = list_referenced::<Fan>(&service.shared(), "/redfish/v1/Fans")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ListError::Collection(RedfishError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_count_annotation_is_advisory() {
        let service = MockService::new();
        service.insert(
            "/redfish/v1/Fans",
            r#"{"Members":[{"@odata.id":"/redfish/v1/Fans/1"}],"Members@odata.count":4}"#,
        );
        service.insert("/redfish/v1/Fans/1", r#"{"Id":"1"}"#);

        let result: Vec<Fan> = list_referenced(&service.shared(), "/redfish/v1/Fans")
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_list_linked() {
        let service = MockService::new();
        let uris = fans(&service, 3);
        service.remove(&uris[0]);
        let links = vec![
            Link::new(uris[0].clone()),
            Link::default(),
            Link::new(uris[2].clone()),
        ];

        let err = list_linked::<Fan>(&service.shared(), &links)
            .await
            .unwrap_err();
        assert_eq!(err.items().len(), 1);
        assert_eq!(err.items()[0].odata_id(), uris[2]);
        assert!(err.failures().unwrap().get(&uris[0]).is_some());

        let none: Vec<Fan> = list_linked(&service.shared(), &[]).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_next_link_pages_are_followed() {
        let service = MockService::new();
        service.insert(
            "/redfish/v1/Fans",
            r#"{"Members":[{"@odata.id":"/redfish/v1/Fans/1"}],"Members@odata.count":2,"Members@odata.nextLink":"/redfish/v1/Fans?$skip=1"}"#,
        );
        service.insert(
            "/redfish/v1/Fans?$skip=1",
            r#"{"Members":[{"@odata.id":"/redfish/v1/Fans/2"}],"Members@odata.count":2}"#,
        );

        let uris = get_collection(&service.shared(), "/redfish/v1/Fans")
            .await
            .unwrap();
        assert_eq!(uris, vec!["/redfish/v1/Fans/1", "/redfish/v1/Fans/2"]);
    }

    #[tokio::test]
    async fn test_next_link_cycle_is_rejected() {
        let service = MockService::new();
        service.insert(
            "/redfish/v1/Fans",
            r#"{"Members":[{"@odata.id":"/redfish/v1/Fans/1"}],"Members@odata.nextLink":"/redfish/v1/Fans?page=2"}"#,
        );
        service.insert(
            "/redfish/v1/Fans?page=2",
            r#"{"Members":[{"@odata.id":"/redfish/v1/Fans/2"}],"Members@odata.nextLink":"/redfish/v1/Fans"}"#,
        );

        let err = get_collection(&service.shared(), "/redfish/v1/Fans")
            .await
            .unwrap_err();
        assert!(matches!(err, RedfishError::Validation(_)));
        assert_eq!(service.requests().len(), 2);

        // A page linking to itself is a cycle too.
        service.insert(
            "/redfish/v1/Fans?page=2",
            r#"{"Members":[],"Members@odata.nextLink":"/redfish/v1/Fans?page=2"}"#,
        );
        let err = list_referenced::<Fan>(&service.shared(), "/redfish/v1/Fans")
            .await
            .unwrap_err();
        assert!(matches!(err, ListError::Collection(RedfishError::Validation(_))));
        assert_eq!(service.requests().len(), 4);
    }
}
