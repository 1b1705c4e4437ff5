//! Route table, lazy views, and document title handling.

use phonetic_dict::router::{Route, Router, View, INDEX_TITLE};
use phonetic_dict::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

static LOADS: AtomicUsize = AtomicUsize::new(0);

struct Counted;

impl View for Counted {
    fn name(&self) -> &str {
        "Counted"
    }
}

fn load_counted() -> Arc<dyn View> {
    LOADS.fetch_add(1, Ordering::SeqCst);
    Arc::new(Counted)
}

#[test]
fn root_serves_index_and_sets_title() {
    let mut router = Router::new("./");
    let nav = router.navigate("/").unwrap();

    assert_eq!(nav.path, "/");
    assert_eq!(nav.title, INDEX_TITLE);
    assert_eq!(nav.view.name(), "Index");
    assert_eq!(router.document().title, "Phonetic Dictionary - AI 合成英文发音");
    assert_eq!(router.history().current(), Some("/"));
}

#[test]
fn view_is_loaded_once_across_navigations() {
    let mut router =
        Router::with_routes("/", vec![Route::new("/", "Counted page", load_counted)]);
    assert_eq!(LOADS.load(Ordering::SeqCst), 0);

    let first = router.navigate("/").unwrap();
    let second = router.navigate("/?q=again").unwrap();

    assert_eq!(LOADS.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first.view, &second.view));
    assert_eq!(router.history().len(), 2);
}

#[test]
fn unknown_path_fails_and_keeps_title() {
    let mut router = Router::default();
    router.navigate("/").unwrap();

    let err = router.navigate("/settings").unwrap_err();
    assert!(matches!(err, Error::RouteNotFound { ref path } if path == "/settings"));
    assert_eq!(router.document().title, INDEX_TITLE);
    assert_eq!(router.history().len(), 1);
}

#[test]
fn resolve_does_not_navigate() {
    let router = Router::default();
    let route = router.resolve("/").unwrap();
    assert_eq!(route.meta.title, INDEX_TITLE);
    assert!(!route.is_loaded());
    assert!(router.document().title.is_empty());
}
