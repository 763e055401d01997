//! AXON Bridge
//!
//! The narrow channel letting guest content request privileged clipboard
//! writes from the host. One request shape, one response shape: a
//! per-process prefix gates the transport, an origin allow-list gates the
//! sender, and every failure resolves into a fixed wire response instead of
//! propagating upward.

mod channel;
mod clipboard;
mod error;
mod trust;

pub use channel::{BridgeChannel, BridgeResponse, MAX_DECODED_PAYLOAD_BYTES};
pub use clipboard::{ClipboardCommitter, ClipboardTarget, ClipboardWriter, REASSERT_DELAY};
pub use error::PayloadError;
pub use trust::{is_trusted_host, is_trusted_origin};
