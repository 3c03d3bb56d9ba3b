use crate::ui::list::intent::ListIntent;
use crate::ui::list::state::{FetchStatus, ListViewState, PageInfo, FETCH_FAILED_MESSAGE};
use crate::ui::mvi::Reducer;

pub struct ListReducer;

impl Reducer for ListReducer {
    type State = ListViewState;
    type Intent = ListIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ListIntent::SetSortField(sort_field) => {
                let mut state = state;
                state.query.sort_field = sort_field;
                state
            }
            ListIntent::SetSortDirection(sort_direction) => {
                let mut state = state;
                state.query.sort_direction = sort_direction;
                state
            }
            ListIntent::SetPage(page) => {
                let mut state = state;
                let last = state.total_pages();
                let page = if last > 0 { page.min(last) } else { page };
                state.query.page = page.max(1);
                state
            }
            ListIntent::SetTitleFilter(title) => {
                let mut state = state;
                if state.query.title != title {
                    state.query.title = title;
                    state.query.page = 1;
                }
                state
            }
            ListIntent::ClearTitleFilter => Self::reduce(state, ListIntent::SetTitleFilter(String::new())),
            ListIntent::FetchStarted { generation } => ListViewState {
                status: FetchStatus::Pending,
                latest_generation: generation,
                ..state
            },
            ListIntent::FetchSucceeded { generation, page } => {
                if !state.accepts(generation) {
                    return state;
                }
                ListViewState {
                    status: FetchStatus::Succeeded,
                    page_info: Some(PageInfo {
                        page: page.page,
                        total_pages: page.total_pages,
                        total_elements: page.total_elements,
                    }),
                    movies: page.movies,
                    ..state
                }
            }
            ListIntent::FetchFailed { generation, detail } => {
                if !state.accepts(generation) {
                    return state;
                }
                // Movies and page metadata from the last success stay visible
                ListViewState {
                    status: FetchStatus::Failed {
                        message: FETCH_FAILED_MESSAGE.to_string(),
                        detail,
                    },
                    ..state
                }
            }
            ListIntent::CountsRefreshed { movie_id, counts } => {
                let mut state = state;
                for movie in state.movies.iter_mut().filter(|m| m.id == movie_id) {
                    movie.likes_count = counts.likes;
                    movie.hates_count = counts.hates;
                }
                state
            }
            ListIntent::VoteRejected { description } => ListViewState {
                error_modal: Some(description),
                ..state
            },
            ListIntent::DismissError => ListViewState {
                error_modal: None,
                ..state
            },
            ListIntent::Notice(message) => ListViewState {
                notice: Some(message),
                ..state
            },
            ListIntent::ClearNotice => ListViewState {
                notice: None,
                ..state
            },
        }
    }
}
