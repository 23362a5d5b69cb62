//! The interaction response state machine.
//!
//! Every interaction accepts exactly one *primary response* (acknowledge,
//! message, deferred update or autocomplete result). Once responded, the
//! original response and any number of follow-up messages can be fetched,
//! edited and deleted through the continuation token.
//!
//! The responded flag transitions one way, `UNRESPONDED -> RESPONDED`, and
//! is claimed by compare-and-exchange *before* the outbound request is
//! dispatched: a second call can never race past the check, and a failed
//! dispatch leaves the flag set because this layer cannot tell whether the
//! platform registered the response. Type preconditions are checked before
//! the flag is touched, so protocol misuse never consumes the response.

use std::sync::atomic::Ordering;

use serde_json::{Value, json};
use tracing::debug;

use concord_core::{
    EPHEMERAL_FLAG, Endpoint, Id, Message, MessageBuilder, Multipart, RequestBody, materialize,
};

use crate::error::{InteractionError, InteractionResult, MAX_AUTOCOMPLETE_CHOICES};
use crate::interaction::Interaction;
use crate::types::{CommandChoice, InteractionType, ResponseType};

impl Interaction {
    // -------------------------------------------------------------------------
    // Primary responses (UNRESPONDED -> RESPONDED)
    // -------------------------------------------------------------------------

    /// Acknowledges the interaction without content.
    ///
    /// Application commands get a visible deferred placeholder (delegates to
    /// [`acknowledge_with_response`](Self::acknowledge_with_response));
    /// component interactions get a silent deferred update.
    pub async fn acknowledge(&self) -> InteractionResult<()> {
        match self.kind() {
            InteractionType::ApplicationCommand => self.acknowledge_with_response(false).await,
            InteractionType::MessageComponent => {
                self.respond(ResponseType::DeferredUpdateMessage, None, None)
                    .await
            }
            actual => Err(InteractionError::UnsupportedInteractionType {
                operation: "acknowledge",
                actual,
            }),
        }
    }

    /// Acknowledges with a placeholder message, editable later through
    /// [`update_original_response`](Self::update_original_response).
    pub async fn acknowledge_with_response(&self, ephemeral: bool) -> InteractionResult<()> {
        self.require_kind("acknowledge_with_response", RESPONDABLE)?;
        let data = ephemeral.then(|| json!({"flags": EPHEMERAL_FLAG}));
        self.respond(ResponseType::DeferredChannelMessageWithSource, data, None)
            .await
    }

    /// Responds with a message.
    pub async fn respond_with_message(
        &self,
        mut builder: MessageBuilder,
        ephemeral: bool,
    ) -> InteractionResult<()> {
        self.require_kind("respond_with_message", RESPONDABLE)?;
        if ephemeral {
            builder.add_flags(EPHEMERAL_FLAG);
        }
        let (data, multipart) = builder_payload(&builder)?;
        self.respond(ResponseType::ChannelMessageWithSource, Some(data), multipart)
            .await
    }

    /// Replaces the message the triggering component sits on.
    ///
    /// Only valid for message component interactions.
    pub async fn update_message(&self, builder: MessageBuilder) -> InteractionResult<()> {
        self.require_kind("update_message", &[InteractionType::MessageComponent])?;
        let (data, multipart) = builder_payload(&builder)?;
        self.respond(ResponseType::UpdateMessage, Some(data), multipart)
            .await
    }

    /// Responds with autocomplete suggestions (at most
    /// [`MAX_AUTOCOMPLETE_CHOICES`]).
    ///
    /// Only valid for autocomplete interactions.
    pub async fn autocomplete_result(&self, choices: &[CommandChoice]) -> InteractionResult<()> {
        self.require_kind(
            "autocomplete_result",
            &[InteractionType::ApplicationCommandAutocomplete],
        )?;
        if choices.len() > MAX_AUTOCOMPLETE_CHOICES {
            return Err(InteractionError::TooManyChoices {
                count: choices.len(),
            });
        }
        self.respond(
            ResponseType::ApplicationCommandAutocompleteResult,
            Some(json!({"choices": choices})),
            None,
        )
        .await
    }

    /// Sends the primary response envelope `{type, data?}`.
    ///
    /// Claims the responded flag before dispatching; see the module docs for
    /// the no-rollback rule. When a multipart envelope is supplied the same
    /// JSON that would have been the request body is attached as the
    /// `payload_json` part instead.
    async fn respond(
        &self,
        kind: ResponseType,
        data: Option<Value>,
        multipart: Option<Multipart>,
    ) -> InteractionResult<()> {
        if self
            .responded
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(InteractionError::AlreadyResponded);
        }

        let mut payload = json!({"type": u8::from(kind)});
        if let Some(data) = data {
            payload["data"] = data;
        }

        let endpoint = Endpoint::InteractionCallback {
            id: self.id().clone(),
            token: self.token().to_string(),
        };
        debug!(interaction_id = %self.id(), response_type = u8::from(kind), "dispatching primary response");

        let body = match multipart {
            Some(mut multipart) => {
                multipart.payload_json(&payload)?;
                RequestBody::Multipart(multipart)
            }
            None => RequestBody::Json(payload),
        };

        self.transport().post(endpoint, body).await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Original response (requires RESPONDED)
    // -------------------------------------------------------------------------

    /// Fetches the original interaction response.
    pub async fn get_original_response(&self) -> InteractionResult<Message> {
        self.require_responded()?;
        let response = self.transport().get(self.original_endpoint()).await?;
        Ok(materialize("message", response)?)
    }

    /// Edits the original interaction response.
    ///
    /// Edits cannot change visibility, so there is no ephemeral option.
    pub async fn update_original_response(
        &self,
        builder: MessageBuilder,
    ) -> InteractionResult<Message> {
        self.require_responded()?;
        let body = message_body(&builder)?;
        let response = self
            .transport()
            .patch(self.original_endpoint(), body)
            .await?;
        Ok(materialize("message", response)?)
    }

    /// Deletes the original interaction response.
    pub async fn delete_original_response(&self) -> InteractionResult<()> {
        self.require_responded()?;
        self.transport().delete(self.original_endpoint()).await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Follow-up messages (requires RESPONDED)
    // -------------------------------------------------------------------------

    /// Creates a follow-up message. Does not change response state.
    pub async fn send_follow_up_message(
        &self,
        mut builder: MessageBuilder,
        ephemeral: bool,
    ) -> InteractionResult<Message> {
        self.require_responded()?;
        if ephemeral {
            builder.add_flags(EPHEMERAL_FLAG);
        }
        let body = message_body(&builder)?;
        let endpoint = Endpoint::FollowUps {
            application_id: self.application_id().clone(),
            token: self.token().to_string(),
        };
        debug!(interaction_id = %self.id(), "creating follow-up message");
        let response = self.transport().post(endpoint, body).await?;
        Ok(materialize("message", response)?)
    }

    /// Fetches a follow-up message by id.
    pub async fn get_follow_up_message(&self, message_id: &Id) -> InteractionResult<Message> {
        self.require_responded()?;
        let response = self
            .transport()
            .get(self.follow_up_endpoint(message_id))
            .await?;
        Ok(materialize("message", response)?)
    }

    /// Edits a follow-up message.
    pub async fn update_follow_up_message(
        &self,
        message_id: &Id,
        builder: MessageBuilder,
    ) -> InteractionResult<Message> {
        self.require_responded()?;
        let body = message_body(&builder)?;
        let response = self
            .transport()
            .patch(self.follow_up_endpoint(message_id), body)
            .await?;
        Ok(materialize("message", response)?)
    }

    /// Deletes a follow-up message.
    pub async fn delete_follow_up_message(&self, message_id: &Id) -> InteractionResult<()> {
        self.require_responded()?;
        self.transport()
            .delete(self.follow_up_endpoint(message_id))
            .await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Preconditions & endpoints
    // -------------------------------------------------------------------------

    fn require_kind(
        &self,
        operation: &'static str,
        allowed: &[InteractionType],
    ) -> InteractionResult<()> {
        if allowed.contains(&self.kind()) {
            Ok(())
        } else {
            Err(InteractionError::UnsupportedInteractionType {
                operation,
                actual: self.kind(),
            })
        }
    }

    fn require_responded(&self) -> InteractionResult<()> {
        if self.responded() {
            Ok(())
        } else {
            Err(InteractionError::NotResponded)
        }
    }

    fn original_endpoint(&self) -> Endpoint {
        Endpoint::OriginalResponse {
            application_id: self.application_id().clone(),
            token: self.token().to_string(),
        }
    }

    fn follow_up_endpoint(&self, message_id: &Id) -> Endpoint {
        Endpoint::FollowUpMessage {
            application_id: self.application_id().clone(),
            token: self.token().to_string(),
            message_id: message_id.clone(),
        }
    }
}

/// Interaction types that accept message-style primary responses.
const RESPONDABLE: &[InteractionType] = &[
    InteractionType::ApplicationCommand,
    InteractionType::MessageComponent,
];

/// Serializes a builder for use inside a `{type, data}` envelope.
///
/// Returns the JSON value plus, when attachments are present, a multipart
/// envelope holding only the file parts; the caller attaches the full
/// envelope as `payload_json`.
fn builder_payload(builder: &MessageBuilder) -> InteractionResult<(Value, Option<Multipart>)> {
    let value = serde_json::to_value(builder)?;
    let multipart = builder
        .requires_multipart()
        .then(|| Multipart::from_builder(builder));
    Ok((value, multipart))
}

/// Serializes a builder as a standalone request body (follow-ups, edits).
///
/// With attachments, the builder JSON itself becomes the `payload_json`
/// part of the multipart body.
fn message_body(builder: &MessageBuilder) -> InteractionResult<RequestBody> {
    let value = serde_json::to_value(builder)?;
    if builder.requires_multipart() {
        let mut multipart = Multipart::from_builder(builder);
        multipart.payload_json(&value)?;
        Ok(RequestBody::Multipart(multipart))
    } else {
        Ok(RequestBody::Json(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockTransport, command_payload, component_payload, payload_of_type};
    use concord_core::{Cache, PAYLOAD_JSON};
    use std::sync::Arc;

    fn interaction(payload: Value) -> (Interaction, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let interaction = Interaction::from_value(
            payload,
            Arc::new(Cache::new()),
            Arc::clone(&transport) as Arc<dyn concord_core::Transport>,
        )
        .unwrap();
        (interaction, transport)
    }

    #[tokio::test]
    async fn test_acknowledge_command_sends_deferred_source() {
        let (interaction, transport) = interaction(command_payload("10", "20"));
        interaction.acknowledge().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].endpoint, "interactions/1/tok/callback");
        assert_eq!(requests[0].json()["type"], 5);
        assert!(interaction.responded());
    }

    #[tokio::test]
    async fn test_acknowledge_component_sends_deferred_update() {
        let (interaction, transport) = interaction(component_payload("10", "20"));
        interaction.acknowledge().await.unwrap();
        assert_eq!(transport.requests()[0].json()["type"], 6);
    }

    #[tokio::test]
    async fn test_acknowledge_rejects_other_types() {
        let (interaction, transport) = interaction(payload_of_type(5));
        let err = interaction.acknowledge().await.unwrap_err();
        assert!(err.is_protocol_misuse());
        assert!(transport.requests().is_empty());
        assert!(!interaction.responded());
    }

    #[tokio::test]
    async fn test_ephemeral_acknowledge_sets_flag_bit() {
        let (interaction, transport) = interaction(command_payload("10", "20"));
        interaction.acknowledge_with_response(true).await.unwrap();
        assert_eq!(transport.requests()[0].json()["data"]["flags"], 64);
    }

    #[tokio::test]
    async fn test_respond_with_message_payload_shape() {
        let (interaction, transport) = interaction(command_payload("10", "20"));
        interaction
            .respond_with_message(MessageBuilder::new().content("hello"), true)
            .await
            .unwrap();

        let body = transport.requests()[0].json();
        assert_eq!(body["type"], 4);
        assert_eq!(body["data"]["content"], "hello");
        assert_eq!(body["data"]["flags"], 64);
    }

    #[tokio::test]
    async fn test_second_primary_response_is_state_violation() {
        let (interaction, transport) = interaction(command_payload("10", "20"));
        interaction.acknowledge().await.unwrap();
        let err = interaction
            .respond_with_message(MessageBuilder::new().content("again"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, InteractionError::AlreadyResponded));
        assert!(err.is_state_violation());
        // Only the first call reached the wire.
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_dispatch_keeps_responded_set() {
        let (interaction, transport) = interaction(command_payload("10", "20"));
        transport.fail_next();
        let err = interaction.acknowledge().await.unwrap_err();
        assert!(matches!(err, InteractionError::Transport(_)));
        assert!(interaction.responded());
        // Documented no-rollback behavior: the next attempt is rejected.
        let err = interaction.acknowledge().await.unwrap_err();
        assert!(matches!(err, InteractionError::AlreadyResponded));
    }

    #[tokio::test]
    async fn test_update_message_on_command_is_protocol_misuse() {
        let (interaction, transport) = interaction(command_payload("10", "20"));
        let err = interaction
            .update_message(MessageBuilder::new().content("x"))
            .await
            .unwrap_err();
        assert!(err.is_protocol_misuse());
        assert!(transport.requests().is_empty());
        assert!(!interaction.responded());
    }

    #[tokio::test]
    async fn test_update_message_on_component() {
        let (interaction, transport) = interaction(component_payload("10", "20"));
        interaction
            .update_message(MessageBuilder::new().content("replaced"))
            .await
            .unwrap();
        let body = transport.requests()[0].json();
        assert_eq!(body["type"], 7);
        assert_eq!(body["data"]["content"], "replaced");
    }

    #[tokio::test]
    async fn test_autocomplete_accepts_full_choice_list() {
        let (interaction, transport) = interaction(payload_of_type(4));
        let choices: Vec<_> = (0..25)
            .map(|i| CommandChoice::new(format!("choice-{i}"), i))
            .collect();
        interaction.autocomplete_result(&choices).await.unwrap();

        let body = transport.requests()[0].json();
        assert_eq!(body["type"], 8);
        assert_eq!(body["data"]["choices"].as_array().unwrap().len(), 25);
    }

    #[tokio::test]
    async fn test_autocomplete_rejects_overflow() {
        let (interaction, transport) = interaction(payload_of_type(4));
        let choices: Vec<_> = (0..26)
            .map(|i| CommandChoice::new(format!("choice-{i}"), i))
            .collect();
        let err = interaction.autocomplete_result(&choices).await.unwrap_err();
        assert!(matches!(err, InteractionError::TooManyChoices { count: 26 }));
        assert!(transport.requests().is_empty());
        assert!(!interaction.responded());
    }

    #[tokio::test]
    async fn test_autocomplete_on_command_is_protocol_misuse() {
        let (interaction, _) = interaction(command_payload("10", "20"));
        let err = interaction
            .autocomplete_result(&[CommandChoice::new("a", 1)])
            .await
            .unwrap_err();
        assert!(err.is_protocol_misuse());
    }

    #[tokio::test]
    async fn test_original_response_requires_responded() {
        let (interaction, transport) = interaction(command_payload("10", "20"));
        let err = interaction.get_original_response().await.unwrap_err();
        assert!(matches!(err, InteractionError::NotResponded));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_original_response_round_trip() {
        let (interaction, transport) = interaction(command_payload("10", "20"));
        interaction.acknowledge().await.unwrap();

        let message = interaction.get_original_response().await.unwrap();
        assert_eq!(message.id, "900");

        interaction
            .update_original_response(MessageBuilder::new().content("edited"))
            .await
            .unwrap();
        interaction.delete_original_response().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[1].method, "GET");
        assert_eq!(requests[1].endpoint, "webhooks/2/tok/messages/@original");
        assert_eq!(requests[2].method, "PATCH");
        // Edits send the raw message payload, not a {type, data} envelope.
        assert_eq!(requests[2].json(), serde_json::json!({"content": "edited"}));
        assert_eq!(requests[3].method, "DELETE");
    }

    #[tokio::test]
    async fn test_follow_up_lifecycle() {
        let (interaction, transport) = interaction(command_payload("10", "20"));
        interaction.acknowledge().await.unwrap();

        let message = interaction
            .send_follow_up_message(MessageBuilder::new().content("follow"), true)
            .await
            .unwrap();
        interaction
            .get_follow_up_message(&message.id)
            .await
            .unwrap();
        interaction
            .update_follow_up_message(&message.id, MessageBuilder::new().content("edited"))
            .await
            .unwrap();
        interaction
            .delete_follow_up_message(&message.id)
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 5);
        assert_eq!(requests[1].method, "POST");
        assert_eq!(requests[1].endpoint, "webhooks/2/tok");
        assert_eq!(requests[1].json()["flags"], 64);
        assert_eq!(requests[4].method, "DELETE");
        assert_eq!(requests[4].endpoint, "webhooks/2/tok/messages/900");
        // Follow-ups never change primary response state.
        assert!(interaction.responded());
    }

    #[tokio::test]
    async fn test_follow_up_requires_responded() {
        let (interaction, transport) = interaction(command_payload("10", "20"));
        let err = interaction
            .send_follow_up_message(MessageBuilder::new().content("x"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, InteractionError::NotResponded));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_multipart_payload_json_matches_plain_body() {
        // First, the plain-body payload for an attachment-free builder.
        let (plain, plain_transport) = interaction(command_payload("10", "20"));
        plain
            .respond_with_message(MessageBuilder::new().content("same fields"), false)
            .await
            .unwrap();
        let expected = plain_transport.requests()[0].json();

        // Then the multipart path with identical JSON fields.
        let (multi, multi_transport) = interaction(command_payload("10", "20"));
        multi
            .respond_with_message(
                MessageBuilder::new()
                    .content("same fields")
                    .file("a.png", vec![1, 2, 3]),
                false,
            )
            .await
            .unwrap();

        let requests = multi_transport.requests();
        let multipart = requests[0].multipart().unwrap();
        let part = multipart.part(PAYLOAD_JSON).unwrap();
        assert_eq!(part.content_type.as_deref(), Some("application/json"));
        let embedded: Value = serde_json::from_slice(&part.body).unwrap();
        assert_eq!(embedded, expected);
        // File parts travel alongside.
        assert!(multipart.part("files[0]").is_some());
    }

    #[tokio::test]
    async fn test_follow_up_multipart_uses_builder_payload() {
        let (interaction, transport) = interaction(command_payload("10", "20"));
        interaction.acknowledge().await.unwrap();
        interaction
            .send_follow_up_message(
                MessageBuilder::new().content("hi").file("f.txt", vec![7]),
                false,
            )
            .await
            .unwrap();

        let requests = transport.requests();
        let multipart = requests[1].multipart().unwrap();
        let embedded: Value =
            serde_json::from_slice(&multipart.part(PAYLOAD_JSON).unwrap().body).unwrap();
        assert_eq!(embedded, serde_json::json!({"content": "hi"}));
    }
}
