//! View layer for movie list screens.

pub mod controller;
pub mod list;
pub mod mvi;
pub mod pagination;
pub mod render;

pub use controller::ListController;
