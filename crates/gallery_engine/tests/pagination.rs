mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{init_logging, Gate, InMemoryFetcher};
use gallery_core::RecordField;
use gallery_engine::{FailureKind, PaginationController};
use pretty_assertions::assert_eq;

fn ids(controller: &PaginationController) -> Vec<u64> {
    controller.page().ids().collect()
}

#[tokio::test]
async fn go_to_page_replaces_page_and_total() {
    init_logging();
    let fetcher = Arc::new(InMemoryFetcher::sequential(30));
    let mut controller = PaginationController::new(fetcher.clone(), 12);

    controller.go_to_page(1, 12).await.unwrap();
    let page = controller.go_to_page(2, 12).await.unwrap();

    assert_eq!(page.page_number, 2);
    assert_eq!(page.total_records, 30);
    assert_eq!(page.records[0].title, "Artwork 13");
    assert_eq!(ids(&controller), (13..=24).collect::<Vec<_>>());
    assert_eq!(fetcher.requested_pages(), vec![1, 2]);
    assert!(fetcher
        .calls()
        .iter()
        .all(|call| call.fields == RecordField::ALL));
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn every_navigation_fetches_once() {
    init_logging();
    let fetcher = Arc::new(InMemoryFetcher::sequential(30));
    let mut controller = PaginationController::new(fetcher.clone(), 12);

    controller.go_to_page(1, 12).await.unwrap();
    controller.go_to_page(3, 12).await.unwrap();
    controller.go_to_page(1, 12).await.unwrap();
    controller.reload().await.unwrap();

    assert_eq!(fetcher.requested_pages(), vec![1, 3, 1, 1]);
    assert_eq!(ids(&controller), (1..=12).collect::<Vec<_>>());
}

#[tokio::test]
async fn failed_fetch_clears_page() {
    init_logging();
    let fetcher = Arc::new(InMemoryFetcher::sequential(30).failing_on(3));
    let mut controller = PaginationController::new(fetcher.clone(), 12);
    controller.go_to_page(2, 12).await.unwrap();

    let err = controller.go_to_page(3, 12).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert!(controller.page().is_empty());
    assert_eq!(controller.total_records(), 0);
    assert_eq!(controller.page_number(), 3);
    assert!(!controller.is_loading());

    fetcher.set_failing(3, false);
    controller.reload().await.unwrap();
    assert_eq!(ids(&controller), (25..=30).collect::<Vec<_>>());
}

#[tokio::test]
async fn page_size_change_restarts_at_page_one() {
    init_logging();
    let fetcher = Arc::new(InMemoryFetcher::sequential(30));
    let mut controller = PaginationController::new(fetcher.clone(), 12);
    controller.go_to_page(2, 12).await.unwrap();

    let page = controller.go_to_page(3, 5).await.unwrap();
    assert_eq!((page.page_number, page.page_size), (1, 5));

    controller.go_to_page(3, 5).await.unwrap();
    assert_eq!(controller.page_number(), 3);
    assert_eq!(ids(&controller), vec![11, 12, 13, 14, 15]);

    controller.change_page_size(10).await.unwrap();
    assert_eq!((controller.page_number(), controller.page_size()), (1, 10));
}

#[tokio::test]
async fn total_falls_back_to_loaded_rows() {
    init_logging();
    let fetcher = Arc::new(InMemoryFetcher::sequential(30).without_metadata());
    let mut controller = PaginationController::new(fetcher, 12);

    let page = controller.go_to_page(1, 12).await.unwrap();

    assert_eq!(page.total_records, 12);
}

#[tokio::test]
async fn zero_reported_total_falls_back_to_loaded_rows() {
    init_logging();
    let fetcher = Arc::new(InMemoryFetcher::sequential(30).reporting_total(0));
    let mut controller = PaginationController::new(fetcher, 12);

    let page = controller.go_to_page(1, 12).await.unwrap();

    assert_eq!(page.total_records, 12);
}

#[tokio::test]
async fn loading_is_set_while_fetch_is_outstanding() {
    init_logging();
    let gate = Gate {
        page: 2,
        ..Gate::default()
    };
    let fetcher = Arc::new(InMemoryFetcher::sequential(30).gated(gate.clone()));
    let mut controller = PaginationController::new(fetcher, 12);
    let indicator = controller.loading_indicator();
    assert!(!indicator.is_loading());

    let observe = async {
        gate.entered.notified().await;
        let during = indicator.is_loading();
        gate.release.notify_one();
        during
    };
    let (page, loading_during_fetch) = tokio::join!(controller.go_to_page(2, 12), observe);

    assert!(loading_during_fetch);
    assert_eq!(page.unwrap().page_number, 2);
    assert!(!indicator.is_loading());
}

#[tokio::test]
async fn abandoned_navigation_clears_loading_and_keeps_page() {
    init_logging();
    let gate = Gate {
        page: 2,
        ..Gate::default()
    };
    let fetcher = Arc::new(InMemoryFetcher::sequential(30).gated(gate));
    let mut controller = PaginationController::new(fetcher, 12);
    controller.go_to_page(1, 12).await.unwrap();

    let abandoned =
        tokio::time::timeout(Duration::from_millis(50), controller.go_to_page(2, 12)).await;
    assert!(abandoned.is_err());

    assert!(!controller.is_loading());
    assert_eq!(controller.page_number(), 1);
    assert_eq!(ids(&controller), (1..=12).collect::<Vec<_>>());
}
