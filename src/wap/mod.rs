// ABOUTME: WAP over SMS: WSP push headers, WDP port addressing and the push message content
// ABOUTME: Token tables for content types and application ids live alongside the encoders that use them

pub mod push;
pub mod tokens;
pub mod wdp;
pub mod wsp;

pub use push::{WapPushMessage, imsi_to_key};
pub use wdp::{ApplicationPorts, WdpBinaryMessage};
pub use wsp::SecurityMethod;
