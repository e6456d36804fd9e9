//! Error types for the ProjectRadar client.

mod types;
mod categories;
mod mapper;

pub use types::*;
pub use categories::*;
pub use mapper::*;
