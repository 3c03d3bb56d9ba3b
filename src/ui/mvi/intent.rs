//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are either user actions (change sort, change page, dismiss a
/// dialog) or effect results (a fetch completed, a vote was rejected).
pub trait Intent: Send + 'static {}
