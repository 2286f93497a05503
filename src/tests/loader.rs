use super::Loader;
use crate::controller::NavigationController;
use crate::location::Location;
use crate::source::MemorySource;
use crate::test_support::intro_document;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[test]
fn test_background_fetch_reaches_controller() {
    let source = MemorySource::new().with("X", intro_document());
    let mut nav = NavigationController::new(Arc::new(source));
    let loader = Loader::new();

    loader.spawn(nav.begin_load(Location::new("X").with_section("intro")));

    let deadline = Instant::now() + Duration::from_secs(5);
    let response = loop {
        if let Some(response) = loader.try_recv() {
            break response;
        }
        assert!(Instant::now() < deadline, "fetch never finished");
        std::thread::sleep(Duration::from_millis(5));
    };

    assert!(nav.finish_load(response));
    assert_eq!(nav.trail().len(), 3);
}
