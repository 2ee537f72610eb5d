//! HTTP request and response models
//!
//! These types mirror Argo CD's plugin generator protocol and exist only in
//! the HTTP layer.

pub mod request;
pub mod response;

// Re-export commonly used types
pub use request::{PluginInput, PluginParameters};
pub use response::PluginResponse;
