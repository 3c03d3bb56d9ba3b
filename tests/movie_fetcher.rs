mod common;

use common::mock_backend::{MockBackend, MockResponse};
use common::{api_for, movie_json, page_json};
use movierama_client::api::{SortDirection, SortField};
use movierama_client::config::ListingConfig;
use movierama_client::movies::{ListQuery, ListScope, MovieListFetcher};
use movierama_client::ui::list::{FetchStatus, FETCH_FAILED_MESSAGE};
use movierama_client::ui::pagination::PageControlKind;
use movierama_client::ui::ListController;
use serde_json::json;

fn one_page(ids: &[u64], number: u32, total_pages: u32) -> MockResponse {
    let movies = ids.iter().map(|id| movie_json(*id, "Film", 1, 0, 0)).collect();
    MockResponse::value(page_json(movies, number, total_pages, u64::from(total_pages) * 10))
}

#[tokio::test]
async fn first_fetch_uses_default_query() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(one_page(&[1, 2], 0, 1)).await;
    let api = api_for(&backend);

    let mut controller = ListController::new(ListScope::Global, &ListingConfig::default());
    controller.refresh(&api).await;

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/api/v1/public/movies");
    assert_eq!(req.query_param("sortField"), Some("CREATED"));
    assert_eq!(req.query_param("sortType"), Some("ASC"));
    assert_eq!(req.query_param("page"), Some("0"));
    assert_eq!(req.query_param("size"), Some("10"));
    assert_eq!(req.query_param("title"), None);
    assert!(req.header("x-request-id").is_some());
    assert!(req.header("authorization").is_none());

    assert_eq!(controller.state().status, FetchStatus::Succeeded);
    assert_eq!(controller.state().movies.len(), 2);
}

#[tokio::test]
async fn page_number_is_sent_zero_based() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(one_page(&[1], 0, 3)).await;
    backend.enqueue_response(one_page(&[21], 2, 3)).await;
    let api = api_for(&backend);

    let mut controller = ListController::new(ListScope::Global, &ListingConfig::default());
    controller.refresh(&api).await;
    controller.go_to_page(&api, 3).await;

    let requests = backend.captured_requests().await;
    assert_eq!(requests[1].query_param("page"), Some("2"));
    assert_eq!(controller.state().page_info.unwrap().page, 3);

    let controls = controller.pagination().unwrap();
    assert!(controls.is_disabled(PageControlKind::Next));
    assert!(controls.is_disabled(PageControlKind::Last));
    assert!(!controls.is_disabled(PageControlKind::Previous));
}

#[tokio::test]
async fn parameter_change_refetches_and_no_op_does_not() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(one_page(&[1], 0, 1)).await;
    backend.enqueue_response(one_page(&[2], 0, 1)).await;
    backend.enqueue_response(one_page(&[3], 0, 1)).await;
    let api = api_for(&backend);

    let mut controller = ListController::new(ListScope::Global, &ListingConfig::default());
    controller.refresh(&api).await;
    controller.set_sort_field(&api, SortField::Likes).await;
    controller.set_sort_field(&api, SortField::Likes).await;
    controller.set_sort_direction(&api, SortDirection::Desc).await;

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].query_param("sortField"), Some("LIKES"));
    assert_eq!(requests[2].query_param("sortType"), Some("DESC"));
    assert_eq!(controller.state().movies[0].id, 3);
}

#[tokio::test]
async fn title_filter_is_sent_for_global_scope() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(one_page(&[1], 0, 2)).await;
    backend.enqueue_response(one_page(&[2], 1, 2)).await;
    backend.enqueue_response(one_page(&[3], 0, 1)).await;
    backend.enqueue_response(one_page(&[4], 0, 2)).await;
    let api = api_for(&backend);

    let mut controller = ListController::new(ListScope::Global, &ListingConfig::default());
    controller.refresh(&api).await;
    controller.go_to_page(&api, 2).await;
    controller.set_title_filter(&api, "  heat ").await;
    controller.clear_title_filter(&api).await;

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[2].query_param("title"), Some("heat"));
    assert_eq!(requests[2].query_param("page"), Some("0"));
    assert_eq!(requests[3].query_param("title"), None);
}

#[tokio::test]
async fn owner_scope_uses_owner_route_without_title() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(one_page(&[5], 0, 1)).await;
    let api = api_for(&backend);

    let query = ListQuery {
        title: "heat".to_string(),
        ..ListQuery::default()
    };
    let mut controller = ListController::with_query(
        ListScope::Owner { owner_id: 7 },
        &ListingConfig::default(),
        query,
    );
    controller.refresh(&api).await;

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].path, "/api/v1/public/movies/owner/7");
    assert_eq!(requests[0].query_param("title"), None);
    assert_eq!(requests[0].query_param("sortField"), Some("CREATED"));
}

#[tokio::test]
async fn configured_page_size_and_sort_are_used() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(one_page(&[1], 0, 1)).await;
    let api = api_for(&backend);

    let listing = ListingConfig {
        page_size: 25,
        sort_field: SortField::Published,
        sort_direction: SortDirection::Desc,
        discard_stale_responses: true,
    };
    let mut controller = ListController::new(ListScope::Global, &listing);
    controller.refresh(&api).await;

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].query_param("size"), Some("25"));
    assert_eq!(requests[0].query_param("sortField"), Some("PUBLISHED"));
    assert_eq!(requests[0].query_param("sortType"), Some("DESC"));
}

#[tokio::test]
async fn failure_shows_message_and_retry_recovers() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(one_page(&[1, 2], 0, 1)).await;
    backend
        .enqueue_response(MockResponse::error(500, 500, "Internal error"))
        .await;
    backend.enqueue_response(one_page(&[3], 0, 1)).await;
    let api = api_for(&backend);

    let mut controller = ListController::new(ListScope::Global, &ListingConfig::default());
    controller.refresh(&api).await;
    controller.refresh(&api).await;

    match &controller.state().status {
        FetchStatus::Failed { message, .. } => assert_eq!(message, FETCH_FAILED_MESSAGE),
        other => panic!("expected Failed, got {:?}", other),
    }
    assert_eq!(controller.state().movies.len(), 2, "previous movies stay visible");

    controller.retry(&api).await;
    assert_eq!(controller.state().status, FetchStatus::Succeeded);
    assert_eq!(controller.state().movies[0].id, 3);
}

#[tokio::test]
async fn undecodable_page_is_a_failure() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::json("not json")).await;
    let api = api_for(&backend);

    let mut controller = ListController::new(ListScope::Global, &ListingConfig::default());
    controller.refresh(&api).await;
    assert!(controller.state().status.is_failed());
}

#[tokio::test]
async fn out_of_order_completion_is_discarded() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(one_page(&[10], 0, 1)).await;
    backend.enqueue_response(one_page(&[20], 0, 1)).await;
    let api = api_for(&backend);

    let mut controller = ListController::new(ListScope::Global, &ListingConfig::default());
    let older = controller.begin_fetch();
    let newer = controller.begin_fetch();
    assert!(newer.generation() > older.generation());

    let older = older.run(&api).await;
    let newer = newer.run(&api).await;

    controller.complete_fetch(newer);
    controller.complete_fetch(older);

    assert_eq!(controller.state().movies[0].id, 20);
    assert_eq!(controller.state().status, FetchStatus::Succeeded);
}

#[tokio::test]
async fn stale_guard_can_be_disabled() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(one_page(&[10], 0, 1)).await;
    backend.enqueue_response(one_page(&[20], 0, 1)).await;
    let api = api_for(&backend);

    let listing = ListingConfig {
        discard_stale_responses: false,
        ..ListingConfig::default()
    };
    let mut controller = ListController::new(ListScope::Global, &listing);
    let older = controller.begin_fetch();
    let newer = controller.begin_fetch();
    let older = older.run(&api).await;
    let newer = newer.run(&api).await;

    controller.complete_fetch(newer);
    controller.complete_fetch(older);

    assert_eq!(controller.state().movies[0].id, 10);
}

#[test]
fn fetcher_numbers_generations_monotonically() {
    let mut fetcher = MovieListFetcher::new(ListScope::Global, 10);
    let query = ListQuery {
        page: 2,
        ..ListQuery::default()
    };
    let first = fetcher.begin(&query);
    let second = fetcher.begin(&query);
    assert_eq!(second.generation(), first.generation() + 1);
    assert_eq!(fetcher.latest_generation(), second.generation());
    assert_eq!(first.request().page_index, 1);
    assert_eq!(first.request().size, 10);
}

#[tokio::test]
async fn nested_page_metadata_is_understood() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::value(json!({
            "content": [movie_json(1, "Heat", 1, 0, 0)],
            "page": {"number": 0, "size": 10, "totalElements": 11, "totalPages": 2}
        })))
        .await;
    let api = api_for(&backend);

    let mut controller = ListController::new(ListScope::Global, &ListingConfig::default());
    controller.refresh(&api).await;
    assert_eq!(controller.state().total_pages(), 2);
}
