/// Shared utilities used across every layer
pub mod error;
pub mod result;
pub mod retry;
pub mod security;

pub use result::Result;
