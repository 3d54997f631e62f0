//! Request handlers.

pub mod health;
pub mod index;
pub mod videos;

pub use health::*;
pub use index::*;
pub use videos::*;
