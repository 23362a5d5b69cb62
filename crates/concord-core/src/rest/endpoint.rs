//! REST endpoint templating.
//!
//! Interaction endpoints are addressed by the continuation token rather than
//! by channel/message ids, so the request target is derived from identity
//! fields the interaction already carries. [`Endpoint`] renders the
//! documented path for each operation; everything above the path (base URL,
//! auth) is the transport's concern.

use std::fmt;

use crate::id::Id;

/// A fully parameterized REST request target, relative to the API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Primary response callback for an interaction.
    InteractionCallback {
        /// Interaction id.
        id: Id,
        /// Continuation token.
        token: String,
    },
    /// The original (primary) response message, addressed without an id.
    OriginalResponse {
        /// Application id.
        application_id: Id,
        /// Continuation token.
        token: String,
    },
    /// Follow-up message creation.
    FollowUps {
        /// Application id.
        application_id: Id,
        /// Continuation token.
        token: String,
    },
    /// An individual follow-up message.
    FollowUpMessage {
        /// Application id.
        application_id: Id,
        /// Continuation token.
        token: String,
        /// Follow-up message id.
        message_id: Id,
    },
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InteractionCallback { id, token } => {
                write!(f, "interactions/{id}/{token}/callback")
            }
            Self::OriginalResponse {
                application_id,
                token,
            } => write!(f, "webhooks/{application_id}/{token}/messages/@original"),
            Self::FollowUps {
                application_id,
                token,
            } => write!(f, "webhooks/{application_id}/{token}"),
            Self::FollowUpMessage {
                application_id,
                token,
                message_id,
            } => write!(f, "webhooks/{application_id}/{token}/messages/{message_id}"),
        }
    }
}
