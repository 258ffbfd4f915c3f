//! Domain model
//!
//! The single local identity and the one Create/Note pair it publishes.
//! Everything here is constructed once during startup and never mutated;
//! handlers and the delivery task only read through shared references.

use chrono::{DateTime, Utc};

use crate::keys::KeyPair;

/// Entity ID wrapper (ULID format, 26 characters)
///
/// Example: "01ARZ3NDEKTSV4RRFFQ69G5FAV"
///
/// Ids are used as the only valid lookup keys for the activity and the
/// note, so they must be stable for the process lifetime and must not
/// collide with each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(pub String);

impl EntityId {
    /// Generate a new ULID
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The single local actor
///
/// Built once from the generated keypair; shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct Identity {
    pub name: String,
    /// RSA public key (PEM format)
    pub public_key_pem: String,
    /// RSA private key (PEM format)
    pub private_key_pem: String,
}

impl Identity {
    pub fn new(name: String, keys: KeyPair) -> Self {
        Self {
            name,
            public_key_pem: keys.public_key_pem,
            private_key_pem: keys.private_key_pem,
        }
    }
}

/// Audience reference controlling visibility of an activity or object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Addressed to the ActivityStreams public collection
    Public,
}

impl Audience {
    pub fn as_uri(&self) -> &'static str {
        match self {
            Audience::Public => "https://www.w3.org/ns/activitystreams#Public",
        }
    }
}

/// A single Note object
#[derive(Debug, Clone)]
pub struct Note {
    pub id: EntityId,
    pub content: String,
    pub published: DateTime<Utc>,
    pub to: Audience,
}

/// A Create activity wrapping one Note
///
/// `actor_uri` always equals the local actor URI; `id` and `object.id`
/// are distinct.
#[derive(Debug, Clone)]
pub struct CreateActivity {
    pub id: EntityId,
    pub actor_uri: String,
    pub published: DateTime<Utc>,
    pub to: Audience,
    pub object: Note,
}

impl CreateActivity {
    /// Build the one activity this process publishes.
    pub fn new(actor_uri: String, content: String) -> Self {
        let now = Utc::now();

        Self {
            id: EntityId::new(),
            actor_uri,
            published: now,
            to: Audience::Public,
            object: Note {
                id: EntityId::new(),
                content,
                published: now,
                to: Audience::Public,
            },
        }
    }
}

/// In-memory store for the one published activity
///
/// There is no create/update/delete surface; the repository only answers
/// lookups by the two stable ids.
#[derive(Debug)]
pub struct ActivityRepository {
    activity: CreateActivity,
}

impl ActivityRepository {
    pub fn new(activity: CreateActivity) -> Self {
        Self { activity }
    }

    /// The stored activity, for the startup delivery.
    pub fn activity(&self) -> &CreateActivity {
        &self.activity
    }

    /// Look up the activity by id.
    pub fn activity_by_id(&self, id: &str) -> Option<&CreateActivity> {
        (self.activity.id.as_str() == id).then_some(&self.activity)
    }

    /// Look up the embedded note by id.
    pub fn note_by_id(&self, id: &str) -> Option<&Note> {
        (self.activity.object.id.as_str() == id).then_some(&self.activity.object)
    }
}
