//! Integration with the externally rendered conversational surface
//!
//! The surface owns its own transcript and streams answers token-by-token,
//! re-rendering as it goes. Everything here exists to absorb that noise:
//! result callbacks land in a [`tripline_core::StreamBuffer`], a periodic
//! scheduler forwards settled snapshots into the store, and a mutation
//! observer scrubs duplicate turn nodes out of the rendered transcript.

pub mod bridge;
pub mod scheduler;
pub mod transcript;

/// Element id of the transcript container the surface renders into.
pub const TRANSCRIPT_CONTAINER_ID: &str = "chat-transcript";
/// Element id of the surface's query input.
pub const CHAT_INPUT_ID: &str = "chat-input";
/// Element id of the surface's query form.
pub const CHAT_FORM_ID: &str = "chat-form";
/// Attribute carrying the turn role ("user" / "assistant") on turn nodes.
pub const TURN_ROLE_ATTR: &str = "data-role";
