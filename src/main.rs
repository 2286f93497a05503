//! quire: A progressive-disclosure browser for nested documents.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use quire::app_state::{AppState, Task, View};
use quire::bookmarks::BookmarkStore;
use quire::controller::NavigationController;
use quire::loader::Loader;
use quire::location::Location;
use quire::source::{validate_document, DocumentSource, LibrarySource};
use quire::{config, logging, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Progressive-disclosure browser for nested documents", long_about = None)]
struct Args {
    /// Document title, or a location such as "/essays?section=how-to-start"
    #[arg(value_name = "LOCATION")]
    location: Option<String>,

    /// Slash-separated section path within the document
    #[arg(long, short = 's', value_name = "PATH")]
    section: Option<String>,

    /// Directory holding the documents
    #[arg(long, short = 'l', value_name = "DIR")]
    library: Option<PathBuf>,

    /// Show headings only
    #[arg(long, short = 'c')]
    compact: bool,

    /// Resolve the location and print the navigation state as JSON instead of opening the UI
    #[arg(long)]
    dump: bool,

    /// Validate a tree-shaped document file and exit
    #[arg(long, value_name = "FILE")]
    check: Option<PathBuf>,
}

fn main() -> quire::Result<()> {
    let args = Args::parse();
    let mut cfg = config::Config::load()?;

    // Override config with command line args
    if let Some(library) = args.library {
        cfg.library_dir = library.display().to_string();
    }
    cfg.compact |= args.compact;

    let _guard = logging::init(Path::new(&cfg.log_file))?;

    if let Some(path) = &args.check {
        return check_document(path);
    }

    let mut location = match &args.location {
        Some(raw) => Location::parse(raw)?,
        None => Location::new(cfg.default_title.clone()),
    };
    if let Some(section) = args.section {
        location = location.with_section(section);
    }
    tracing::info!(%location, library = %cfg.library_dir, "starting");

    let source = Arc::new(LibrarySource::new(&cfg.library_dir, cfg.flat_titles.clone()));
    let mut controller = NavigationController::new(Arc::clone(&source) as Arc<dyn DocumentSource>);

    if args.dump {
        controller.load_document(location);
        let json = serde_json::to_string_pretty(&controller.snapshot())?;
        println!("{json}");
        return Ok(());
    }

    let library = source.titles().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not list library");
        Vec::new()
    });
    let bookmarks = BookmarkStore::load(&cfg.bookmarks_file)?;

    let mut app = AppState::new(controller, library, bookmarks);
    app.compact = cfg.compact;
    app.wrap_width = cfg.wrap_width;

    run_tui(app, location)
}

/// Validates a document file before it goes into the library.
fn check_document(path: &Path) -> quire::Result<()> {
    let contents = std::fs::read_to_string(path)?;
    match validate_document(&contents) {
        Ok(document) => {
            let sections = document.child_sections().len();
            println!(
                "{}: ok, \"{}\" with {sections} top-level sections",
                path.display(),
                document.label()
            );
            Ok(())
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "document failed validation");
            Err(e)
        }
    }
}

fn run_tui(mut app: AppState, start: Location) -> quire::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let loader = Loader::new();
    let task = app.open(start);
    run_task(&mut app, &loader, task);

    let result = run_app(&mut terminal, &mut app, &loader);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop failed");
        eprintln!("Error: {e}");
    }
    tracing::info!("exiting");
    Ok(())
}

/// Hands a task produced by the state to whoever carries it out.
fn run_task(app: &mut AppState, loader: &Loader, task: Option<Task>) {
    match task {
        Some(Task::Load(request)) => loader.spawn(request),
        Some(Task::Open(url)) => {
            if let Err(e) = webbrowser::open(&url) {
                tracing::warn!(url, error = %e, "could not open link");
                app.message = Some(format!("Could not open {url}: {e}"));
            }
        }
        None => {}
    }
}

#[allow(clippy::too_many_lines)]
fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    loader: &Loader,
) -> io::Result<()> {
    loop {
        while let Some(response) = loader.try_recv() {
            app.finish_load(response);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        app.message = None;

        let task = match app.current_view {
            View::Library => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Up | KeyCode::Char('k') => {
                    app.move_library_selection(-1);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    app.move_library_selection(1);
                    None
                }
                KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.open_selected_title(),
                KeyCode::Char('\'') => {
                    app.current_view = View::Bookmarks;
                    None
                }
                _ => None,
            },
            View::Bookmarks => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    app.close_bookmarks();
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    app.move_bookmark_selection(-1);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    app.move_bookmark_selection(1);
                    None
                }
                KeyCode::Char('m') => {
                    app.remove_selected_bookmark();
                    None
                }
                KeyCode::Enter => app.open_selected_bookmark(),
                _ => None,
            },
            View::Document => match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('H') => {
                    app.current_view = View::Library;
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    app.move_selection(-1);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    app.move_selection(1);
                    None
                }
                KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => app.descend_selected(),
                KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => app.ascend(),
                KeyCode::Char('<') => app.back(),
                KeyCode::Char('>') => app.forward(),
                KeyCode::Char(c) if c.is_ascii_digit() => c
                    .to_digit(10)
                    .and_then(|d| usize::try_from(d).ok())
                    .and_then(|index| app.jump_to_breadcrumb(index)),
                KeyCode::Char(' ') => {
                    app.toggle_expanded();
                    None
                }
                KeyCode::Tab => {
                    app.next_pill();
                    None
                }
                KeyCode::Char('c') => {
                    app.toggle_compact();
                    None
                }
                KeyCode::Char('f') => {
                    app.cycle_category(true);
                    None
                }
                KeyCode::Char('F') => {
                    app.cycle_category(false);
                    None
                }
                KeyCode::Char('a') => {
                    app.clear_category();
                    None
                }
                KeyCode::Char('m') => {
                    app.toggle_bookmark();
                    None
                }
                KeyCode::Char('\'') => {
                    app.current_view = View::Bookmarks;
                    None
                }
                _ => None,
            },
        };
        run_task(app, loader, task);
    }
}
