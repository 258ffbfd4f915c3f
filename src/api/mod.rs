//! HTTP handlers for the published documents and discovery

pub mod activitypub;
pub mod wellknown;

pub use activitypub::activitypub_router;
pub use wellknown::wellknown_router;
