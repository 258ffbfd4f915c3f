//! ActivityPub federation: outbound signing and delivery

pub mod delivery;
pub mod signature;

pub use delivery::ActivityDelivery;
pub use signature::{sign_string, signature_header, signing_string};
