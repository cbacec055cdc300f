//! Data Transfer Objects (DTOs) for API requests and responses

pub mod call;
pub mod common;
pub mod dashboard;
pub mod log;
pub mod movement;
pub mod snapshot;
pub mod status;

pub use call::*;
pub use common::*;
pub use dashboard::*;
pub use log::*;
pub use movement::*;
pub use snapshot::*;
pub use status::*;
