// SPDX-License-Identifier: MIT OR Apache-2.0

//! Partial updates computed from the difference between a resource and the
//! bytes it was last fetched from.
//!
//! Each writable resource type declares the properties the service accepts
//! in a PATCH. [`update`] re-decodes the fetched bytes, compares only those
//! properties against the live value and sends the changed ones. Properties
//! outside the list are never inspected or sent, whatever their value.
//!
//! ```
//! use redfish_api_rs::common::{diff, Entity};
//! use redfish_api_rs::updatable_fields;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Fan {
//!     #[serde(flatten)]
//!     entity: Entity,
//!     #[serde(rename = "SpeedPercent")]
//!     speed_percent: u8,
//!     #[serde(rename = "Model")]
//!     model: String,
//! }
//!
//! updatable_fields!(Fan { "SpeedPercent" => speed_percent });
//! # impl redfish_api_rs::common::Resource for Fan {
//! #     fn entity(&self) -> &Entity { &self.entity }
//! #     fn entity_mut(&mut self) -> &mut Entity { &mut self.entity }
//! # }
//!
//! let fetched = r#"{"SpeedPercent": 40, "Model": "F1"}"#;
//! let original: Fan = serde_json::from_str(fetched).unwrap();
//! let mut current: Fan = serde_json::from_str(fetched).unwrap();
//! current.speed_percent = 80;
//! current.model = "F2".to_string();
//!
//! let delta = diff(&original, &current).unwrap();
//! assert_eq!(serde_json::Value::Object(delta), serde_json::json!({"SpeedPercent": 80}));
//! ```

use bytes::Bytes;
use http::header::IF_MATCH;
use http::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::common::Resource;
use crate::error::{RedfishError, Result};

/// One writable property of `T`.
pub struct UpdatableField<T> {
    /// Wire name of the property.
    pub name: &'static str,
    /// Whether the property differs between two values of `T`.
    pub changed: fn(&T, &T) -> bool,
    /// JSON value to send for the property, given the fetched and the
    /// current value of `T`.
    pub value: fn(&T, &T) -> serde_json::Result<Value>,
}

/// A resource with server-writable properties.
pub trait Updatable: Resource + 'static {
    /// The properties a PATCH may carry, in wire order.
    const UPDATABLE_FIELDS: &'static [UpdatableField<Self>];
}

/// Declares the writable properties of a resource type.
///
/// Expands to an [`Updatable`] implementation whose table compares and
/// serializes each listed field. At least one field is required. A changed
/// field is sent whole; one marked `as members` sends only the object
/// members that changed (see [`changed_members`]).
///
/// ```ignore
/// updatable_fields!(ComputerSystem {
///     "HostName" => host_name,
///     "Boot" => boot as members,
/// });
/// ```
#[macro_export]
macro_rules! updatable_fields {
    ($ty:ty { $($wire:literal => $field:ident $(as $mode:ident)?),+ $(,)? }) => {
        impl $crate::common::Updatable for $ty {
            const UPDATABLE_FIELDS: &'static [$crate::common::UpdatableField<Self>] = &[
                $(
                    $crate::common::UpdatableField {
                        name: $wire,
                        changed: |original: &$ty, current: &$ty| original.$field != current.$field,
                        value: $crate::__updatable_value!($ty, $field $(, $mode)?),
                    },
                )+
            ];
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __updatable_value {
    ($ty:ty, $field:ident) => {
        |_: &$ty, current: &$ty| $crate::__private::serde_json::to_value(&current.$field)
    };
    ($ty:ty, $field:ident, members) => {
        |original: &$ty, current: &$ty| {
            $crate::common::changed_members(&original.$field, &current.$field)
        }
    };
}

/// Members of an object-valued property that differ from the fetched value.
///
/// Members absent from `current` are not sent. A value that does not
/// serialize to an object on both sides is returned whole.
pub fn changed_members<V: Serialize>(original: &V, current: &V) -> serde_json::Result<Value> {
    let original = serde_json::to_value(original)?;
    let current = serde_json::to_value(current)?;
    match (original, current) {
        (Value::Object(original), Value::Object(current)) => Ok(Value::Object(
            current
                .into_iter()
                .filter(|(name, value)| original.get(name) != Some(value))
                .collect(),
        )),
        (_, current) => Ok(current),
    }
}

/// Compute the changed writable properties of `current` relative to `original`.
///
/// The result holds only properties from `T::UPDATABLE_FIELDS` whose values
/// differ, keyed by wire name.
#[allow(clippy::result_large_err)]
pub fn diff<T: Updatable>(original: &T, current: &T) -> Result<Map<String, Value>> {
    let mut patch = Map::new();
    for field in T::UPDATABLE_FIELDS {
        if (field.changed)(original, current) {
            let value = (field.value)(original, current).map_err(RedfishError::Encode)?;
            patch.insert(field.name.to_string(), value);
        }
    }
    Ok(patch)
}

/// Changes [`update`] would send for `current`, without sending them.
#[allow(clippy::result_large_err)]
pub fn pending_changes<T: Updatable>(current: &T) -> Result<Map<String, Value>> {
    ensure_updatable::<T>()?;
    let original: T = current.entity().snapshot()?;
    diff(&original, current)
}

#[allow(clippy::result_large_err)]
fn ensure_updatable<T: Updatable>() -> Result<()> {
    if T::UPDATABLE_FIELDS.is_empty() {
        return Err(RedfishError::NotUpdatable(std::any::type_name::<T>()));
    }
    Ok(())
}

/// Send the locally changed writable properties of `current` to the service.
///
/// The baseline is always decoded afresh from the bytes of the last fetch.
/// When nothing changed no request is made. The stored bytes are left as
/// they are; fetch the resource again for a new baseline.
pub async fn update<T: Updatable>(current: &T) -> Result<()> {
    let patch = pending_changes(current)?;
    let entity = current.entity();

    if patch.is_empty() {
        debug!(uri = %entity.odata_id, "no updatable properties changed, skipping PATCH");
        return Ok(());
    }

    let client = entity.client()?;
    let fields: Vec<&str> = patch.keys().map(String::as_str).collect();
    debug!(uri = %entity.odata_id, fields = ?fields, "patching resource");

    let body = serde_json::to_vec(&Value::Object(patch)).map_err(RedfishError::Encode)?;

    let mut headers = HeaderMap::new();
    if let Some(etag) = entity.if_match() {
        let value = HeaderValue::from_str(etag)
            .map_err(|e| RedfishError::Validation(format!("Invalid ETag {etag:?}: {e}")))?;
        headers.insert(IF_MATCH, value);
    }

    client
        .patch_with_headers(&entity.odata_id, Bytes::from(body), &headers)
        .await?;
    Ok(())
}
