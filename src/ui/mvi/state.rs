//! Base trait for view state.

/// Marker trait for view state objects.
///
/// States are replaced wholesale on every transition and carry everything
/// needed to render the view.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
