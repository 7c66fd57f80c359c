// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity shared by every Redfish resource.

use std::fmt;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::SharedClient;
use crate::error::{RedfishError, Result};

/// Identity and lifecycle data every resource embeds.
///
/// Besides the common OData properties, an `Entity` remembers the transport
/// it was fetched through and the exact bytes the service sent, which serve
/// as the baseline for partial updates.
#[derive(Clone, Default, Deserialize)]
pub struct Entity {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: String,
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    #[serde(rename = "@odata.etag", default)]
    pub etag: Option<String>,
    #[serde(rename = "Id", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,

    #[serde(skip)]
    client: Option<SharedClient>,
    #[serde(skip)]
    raw: Bytes,
    #[serde(skip)]
    etag_match_disabled: bool,
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("odata_id", &self.odata_id)
            .field("odata_type", &self.odata_type)
            .field("etag", &self.etag)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("attached", &self.client.is_some())
            .field("raw_len", &self.raw.len())
            .finish()
    }
}

impl Entity {
    /// Bind a freshly decoded entity to its transport and source bytes.
    pub(crate) fn attach(&mut self, client: SharedClient, uri: &str, raw: Bytes) {
        if self.odata_id.is_empty() {
            self.odata_id = uri.to_string();
        }
        self.client = Some(client);
        self.raw = raw;
    }

    /// Transport this entity was fetched through.
    #[allow(clippy::result_large_err)]
    pub fn client(&self) -> Result<&SharedClient> {
        self.client
            .as_ref()
            .ok_or_else(|| RedfishError::Detached(self.odata_id.clone()))
    }

    /// Bytes of the response this entity was decoded from.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Decode the last-fetched bytes again, yielding the state the service
    /// reported before any local edits.
    #[allow(clippy::result_large_err)]
    pub fn snapshot<T: DeserializeOwned>(&self) -> Result<T> {
        if self.raw.is_empty() {
            return Err(RedfishError::Detached(self.odata_id.clone()));
        }
        decode(&self.odata_id, &self.raw)
    }

    /// Control whether updates send `If-Match` with the fetched ETag.
    ///
    /// Some services return weak or unstable ETags and reject every
    /// conditional PATCH; turn matching off for those.
    pub fn set_etag_match(&mut self, enabled: bool) {
        self.etag_match_disabled = !enabled;
    }

    /// ETag to send as `If-Match`, if any.
    pub(crate) fn if_match(&self) -> Option<&str> {
        if self.etag_match_disabled {
            None
        } else {
            self.etag.as_deref()
        }
    }
}

/// A typed Redfish resource.
pub trait Resource: DeserializeOwned + Send + Sync {
    fn entity(&self) -> &Entity;

    fn entity_mut(&mut self) -> &mut Entity;

    /// The resource's `@odata.id`.
    fn odata_id(&self) -> &str {
        &self.entity().odata_id
    }
}

/// Implements [`Resource`] for a struct with an `entity: Entity` field.
macro_rules! impl_resource {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::common::Resource for $ty {
                fn entity(&self) -> &$crate::common::Entity {
                    &self.entity
                }

                fn entity_mut(&mut self) -> &mut $crate::common::Entity {
                    &mut self.entity
                }
            }
        )+
    };
}
pub(crate) use impl_resource;

#[allow(clippy::result_large_err)]
pub(crate) fn decode<T: DeserializeOwned>(uri: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| RedfishError::Decode {
        uri: uri.to_string(),
        source,
    })
}

/// Fetch `uri` and decode it as `T`, keeping the raw bytes for later updates.
pub async fn get_object<T: Resource>(client: &SharedClient, uri: &str) -> Result<T> {
    let response = client.get(uri).await?;
    let mut resource: T = decode(uri, &response.body)?;
    resource
        .entity_mut()
        .attach(client.clone(), uri, response.body);
    Ok(resource)
}
