mod intent;
mod reducer;
mod state;

pub use intent::ListIntent;
pub use reducer::ListReducer;
pub use state::{FetchStatus, ListViewState, PageInfo, FETCH_FAILED_MESSAGE};
