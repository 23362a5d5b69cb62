//! # Concord Core
//!
//! Core types for the Concord chat-platform SDK.
//!
//! This crate provides the building blocks the interaction layer
//! (`concord-client`) is assembled from:
//!
//! - **Identity**: string snowflake ids ([`Id`])
//! - **Entity models**: serde views of raw attribute bags ([`entity`])
//! - **Entity cache**: process-wide keyed registries ([`Cache`], [`Registry`])
//! - **Permissions**: the table-driven bitwise codec ([`Permissions`])
//! - **Message building**: outbound payloads and attachments
//!   ([`MessageBuilder`])
//! - **REST seams**: the [`Transport`] trait, endpoint templating and
//!   multipart encoding ([`rest`])
//!
//! Concrete transports live in `concord-rest`; this crate only defines the
//! contracts the interaction layer depends on.

pub mod builder;
pub mod cache;
pub mod entity;
pub mod error;
pub mod id;
pub mod permissions;
pub mod rest;

pub use builder::{Attachment, EPHEMERAL_FLAG, MessageBuilder};
pub use cache::{Cache, Keyed, Registry};
pub use entity::{Channel, Guild, Member, Message, StageInstance, User, materialize};
pub use error::{EntityError, EntityResult, TransportError, TransportResult};
pub use id::Id;
pub use permissions::{
    ALL_PERMISSIONS, Bitwise, PermissionContext, PermissionTable, Permissions, ROLE_PERMISSIONS,
    TEXT_PERMISSIONS, VOICE_PERMISSIONS,
};
pub use rest::{Endpoint, Multipart, PAYLOAD_JSON, Part, RequestBody, RestConfig, Transport};
