// SPDX-License-Identifier: MIT OR Apache-2.0

//! Machinery shared by every resource type: identity, partial updates and
//! collection fetching.

mod collection;
mod entity;
mod types;
mod update;

pub use collection::{
    get_collection, list_linked, list_referenced, Collection, FailureReport, ListError, ListResult,
    PartialFailure,
};
pub(crate) use entity::impl_resource;
pub use entity::{get_object, Entity, Resource};
pub(crate) use types::link_uri;
pub use types::{Health, IndicatorLed, Link, PowerState, State, Status};
pub use update::{changed_members, diff, pending_changes, update, Updatable, UpdatableField};
