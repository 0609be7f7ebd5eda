//! Capture stage: stage the payload read from stdin on disk.

mod capture;
mod path;

pub use capture::{capture, CapturedPayload};
pub use path::{remove_payload, resolve_payload_path};
