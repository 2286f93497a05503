use super::{AppState, Task, View};
use crate::bookmarks::BookmarkStore;
use crate::controller::NavigationController;
use crate::filter::EmptyState;
use crate::location::Location;
use crate::source::MemorySource;
use crate::test_support::{colliding_document, essay_document, intro_document, labels};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn app() -> AppState {
    let source = MemorySource::new()
        .with("X", intro_document())
        .with("Book", colliding_document())
        .with("essays", essay_document());
    let controller = NavigationController::new(Arc::new(source));
    AppState::new(
        controller,
        vec!["Book".to_string(), "X".to_string(), "essays".to_string()],
        BookmarkStore::in_memory(),
    )
}

/// Runs any fetch synchronously, as the event loop would in the background.
fn run(app: &mut AppState, task: Option<Task>) {
    if let Some(Task::Load(request)) = task {
        app.finish_load(request.run());
    }
}

fn open(app: &mut AppState, location: Location) {
    let task = app.open(location);
    run(app, task);
}

fn section_path(app: &AppState) -> String {
    app.controller.location().section_path().to_string()
}

#[test]
fn test_open_loads_document_and_records_history() {
    let mut app = app();
    open(&mut app, Location::new("X"));

    assert_eq!(app.current_view, View::Document);
    assert_eq!(labels(&app.visible_sections()), vec!["Intro"]);
    assert_eq!(app.history.len(), 1);
}

#[test]
fn test_descend_pushes_history_and_back_steps_up() {
    let mut app = app();
    open(&mut app, Location::new("X"));

    assert!(app.descend_selected().is_none());
    assert_eq!(section_path(&app), "intro");
    assert!(app.descend_selected().is_none());
    assert_eq!(section_path(&app), "intro/origins");
    assert_eq!(app.history.len(), 3);
    assert_eq!(app.empty_state(), Some(EmptyState::NoSubsections));

    let task = app.back();
    run(&mut app, task);
    assert_eq!(section_path(&app), "intro");
    assert_eq!(labels(&app.visible_sections()), vec!["Origins"]);

    let task = app.back();
    run(&mut app, task);
    assert_eq!(section_path(&app), "");
    assert!(app.back().is_none());

    let task = app.forward();
    run(&mut app, task);
    assert_eq!(section_path(&app), "intro");
}

#[test]
fn test_back_across_documents_reloads() {
    let mut app = app();
    open(&mut app, Location::new("X").with_section("intro"));
    open(&mut app, Location::new("Book"));

    let task = app.back();
    assert!(matches!(task, Some(Task::Load(_))));
    run(&mut app, task);
    assert_eq!(app.controller.trail()[1].label, "X");
    assert_eq!(section_path(&app), "intro");
}

#[test]
fn test_external_card_opens_without_navigating() {
    let mut app = app();
    open(&mut app, Location::new("essays"));
    app.move_selection(2);

    let task = app.descend_selected();
    assert!(matches!(task, Some(Task::Open(ref url)) if url == "https://example.com/hp.html"));
    assert_eq!(section_path(&app), "");
    assert_eq!(app.history.len(), 1);
}

#[test]
fn test_breadcrumb_zero_returns_to_library() {
    let mut app = app();
    open(&mut app, Location::new("X").with_section("intro"));

    assert!(app.jump_to_breadcrumb(0).is_none());
    assert_eq!(app.current_view, View::Library);
    assert_eq!(section_path(&app), "intro");

    app.library_index = 0;
    let task = app.open_selected_title();
    run(&mut app, task);
    assert_eq!(app.controller.trail()[1].label, "Book");
}

#[test]
fn test_category_filter_never_touches_position() {
    let mut app = app();
    open(&mut app, Location::new("essays"));
    let trail_before = app.controller.trail().to_vec();
    let before = labels(&app.visible_sections());

    app.cycle_category(true);
    assert_eq!(app.category.as_deref(), Some("Starting Up"));
    assert_eq!(labels(&app.visible_sections()), vec!["How to Start", "Default Alive"]);

    app.cycle_category(false);
    assert_eq!(app.category, None);
    assert_eq!(labels(&app.visible_sections()), before);
    assert_eq!(app.controller.trail(), trail_before.as_slice());
    assert_eq!(section_path(&app), "");
}

#[test]
fn test_cycle_category_wraps_through_all() {
    let mut app = app();
    open(&mut app, Location::new("essays"));

    app.cycle_category(false);
    assert_eq!(app.category.as_deref(), Some("Programming & Tech"));
    app.cycle_category(true);
    assert_eq!(app.category, None);
}

#[test]
fn test_filtered_out_differs_from_leaf() {
    let mut app = app();
    open(&mut app, Location::new("essays"));
    app.category = Some("Silicon Valley Culture".to_string());

    assert!(app.visible_sections().is_empty());
    assert!(matches!(app.empty_state(), Some(EmptyState::FilteredOut { .. })));
    app.clear_category();
    assert_eq!(app.empty_state(), None);
}

#[test]
fn test_selection_is_clamped() {
    let mut app = app();
    open(&mut app, Location::new("essays"));

    app.move_selection(10);
    assert_eq!(app.selected, 3);
    app.move_selection(-10);
    assert_eq!(app.selected, 0);
}

#[test]
fn test_pill_descends_through_explicit_parent() {
    let mut app = app();
    open(&mut app, Location::new("Book"));
    app.move_selection(1);
    app.toggle_expanded();
    app.next_pill();
    assert_eq!(app.pill, Some(0));

    assert!(app.descend_selected().is_none());
    assert_eq!(section_path(&app), "part-two/background");
    assert_eq!(labels(&app.visible_sections()), vec!["Summary"]);
    assert!(app.expanded.is_empty());
}

#[test]
fn test_compact_mode_hides_expansion() {
    let mut app = app();
    open(&mut app, Location::new("Book"));
    app.toggle_expanded();
    let section = app.selected_section().unwrap();
    assert!(app.is_expanded(&section));

    app.toggle_compact();
    assert!(!app.is_expanded(&section));
    app.next_pill();
    assert_eq!(app.pill, None);
}

#[test]
fn test_bookmark_resolves_back_to_section() {
    let mut app = app();
    open(&mut app, Location::new("Book").with_section("part-two"));
    app.toggle_bookmark();
    let background = app.selected_section().unwrap();
    assert!(app.is_bookmarked(&background));

    open(&mut app, Location::new("X"));
    app.bookmark_index = 0;
    let task = app.open_selected_bookmark();
    run(&mut app, task);

    assert_eq!(section_path(&app), "part-two/background");
    assert_eq!(labels(&app.visible_sections()), vec!["Summary"]);
}

#[test]
fn test_remove_selected_bookmark_keeps_cursor_in_range() {
    let mut app = app();
    open(&mut app, Location::new("Book"));
    app.toggle_bookmark();
    app.move_selection(1);
    app.toggle_bookmark();
    assert_eq!(app.bookmarks.len(), 2);

    app.current_view = View::Bookmarks;
    app.move_bookmark_selection(5);
    assert_eq!(app.bookmark_index, 1);
    app.remove_selected_bookmark();
    assert_eq!(app.bookmarks.len(), 1);
    assert_eq!(app.bookmark_index, 0);

    app.close_bookmarks();
    assert_eq!(app.current_view, View::Document);
}

#[test]
fn test_bookmarks_are_per_document_and_parent() {
    let mut app = app();
    open(&mut app, Location::new("Book").with_section("part-one"));
    app.toggle_bookmark();

    open(&mut app, Location::new("Book").with_section("part-two"));
    let background = app.selected_section().unwrap();
    assert_eq!(background.label(), "Background");
    assert!(!app.is_bookmarked(&background));

    app.toggle_bookmark();
    assert_eq!(app.bookmarks.len(), 2);
    assert!(app.is_bookmarked(&background));

    open(&mut app, Location::new("X"));
    let intro = app.selected_section().unwrap();
    assert!(!app.is_bookmarked(&intro));
}

#[test]
fn test_category_counts_follow_the_current_level() {
    let mut app = app();
    open(&mut app, Location::new("essays"));

    assert_eq!(
        app.category_counts(),
        vec![
            ("Starting Up".to_string(), 2),
            ("Money & Growth".to_string(), 1),
            ("Programming & Tech".to_string(), 1),
        ]
    );

    app.category = Some("Starting Up".to_string());
    assert!(app.descend_selected().is_none());
    assert_eq!(app.category_counts(), Vec::<(String, usize)>::new());
}

#[test]
fn test_position_summary_tracks_the_current_section() {
    let source = MemorySource::new().with("X", {
        let mut document = intro_document();
        document.summary = vec!["A *short* ".to_string(), "history".to_string()];
        document
    })
    .with("Y", {
        let mut document = intro_document();
        document.long_summary = vec!["Told at length.".to_string()];
        document
    });
    let mut app = AppState::new(
        NavigationController::new(Arc::new(source)),
        vec!["X".to_string()],
        BookmarkStore::in_memory(),
    );
    open(&mut app, Location::new("X"));
    assert_eq!(app.position_summary(), "A short history");

    assert!(app.descend_selected().is_none());
    assert_eq!(app.position_summary(), "Where it starts");

    assert!(app.descend_selected().is_none());
    assert_eq!(app.position_summary(), "");

    open(&mut app, Location::new("Y"));
    assert_eq!(app.position_summary(), "Told at length.");
}
