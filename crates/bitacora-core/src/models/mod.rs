//! Domain models for Bitacora
//!
//! The two operational record kinds, plus the shared timestamp format.

pub mod call;
pub mod movement;
pub mod timestamp;

pub use call::{CallDirection, CallRecord, CallStatus, AUTOMATED_AGENT};
pub use movement::{MovementRecord, MovementStatus};
