/// HTTP handlers for the notification relay
pub mod notifications;

pub use notifications::*;
