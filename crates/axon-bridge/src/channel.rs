//! Bridge channel
//!
//! Synchronous request/response multiplexed over the guest's only
//! call-and-wait transport. A per-process random prefix is the sole
//! discriminator between bridge traffic and ordinary guest calls: messages
//! without it are handed back untouched, messages with it are always
//! answered here, whatever the validation outcome.

use url::Url;
use uuid::Uuid;

use crate::clipboard::ClipboardCommitter;
use crate::error::PayloadError;
use crate::trust::is_trusted_origin;

/// Hard cap on decoded payload size. Oversized prompt payloads must not
/// exhaust host memory.
pub const MAX_DECODED_PAYLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Outcome of a prefix-matched bridge request.
///
/// Guests must treat every value other than `Ok` as "not copied".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeResponse {
    /// Text validated and handed to the clipboard committer.
    Ok,
    /// Claimed origin failed trust validation.
    Rejected,
    /// Payload failed base64/UTF-8 decoding or exceeded the size ceiling.
    Invalid,
    /// Nothing followed the prefix.
    Empty,
    /// Payload decoded to whitespace only.
    EmptyText,
}

impl BridgeResponse {
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeResponse::Ok => "ok",
            BridgeResponse::Rejected => "rejected",
            BridgeResponse::Invalid => "invalid",
            BridgeResponse::Empty => "empty",
            BridgeResponse::EmptyText => "empty-text",
        }
    }
}

pub struct BridgeChannel {
    prefix: String,
    committer: ClipboardCommitter,
    max_decoded_bytes: usize,
}

impl BridgeChannel {
    /// Build the channel with a fresh per-process prefix.
    ///
    /// The prefix rotates on every process start so scripts injected by
    /// earlier page loads cannot forge requests after a restart.
    pub fn new(committer: ClipboardCommitter) -> Self {
        Self {
            prefix: format!("__AXON_CLIPBOARD__{}__", Uuid::new_v4()),
            committer,
            max_decoded_bytes: MAX_DECODED_PAYLOAD_BYTES,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Handle one guest call.
    ///
    /// `None` means the message is not bridge traffic and must flow to
    /// default guest-call handling unmodified. Prefix-matched messages are
    /// always answered with `Some`, never forwarded, so a failed request
    /// cannot fall through to a default path.
    pub fn dispatch(
        &self,
        claimed_origin: &str,
        current_page_host: &str,
        message: &str,
    ) -> Option<BridgeResponse> {
        let encoded = message.strip_prefix(self.prefix.as_str())?;

        let origin = Url::parse(claimed_origin).ok();
        if !is_trusted_origin(origin.as_ref(), current_page_host) {
            tracing::warn!(origin = %claimed_origin, "rejected clipboard bridge request");
            return Some(BridgeResponse::Rejected);
        }

        if encoded.is_empty() {
            return Some(BridgeResponse::Empty);
        }

        let text = match self.decode_payload(encoded) {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(%error, "invalid clipboard bridge payload");
                return Some(BridgeResponse::Invalid);
            }
        };

        if text.trim().is_empty() {
            return Some(BridgeResponse::EmptyText);
        }

        self.committer.commit(&text);
        Some(BridgeResponse::Ok)
    }

    fn decode_payload(&self, encoded: &str) -> Result<String, PayloadError> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;

        let bytes = STANDARD.decode(encoded)?;
        if bytes.len() > self.max_decoded_bytes {
            return Err(PayloadError::Oversized {
                size: bytes.len(),
                ceiling: self.max_decoded_bytes,
            });
        }

        Ok(String::from_utf8(bytes)?)
    }
}
