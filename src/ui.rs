//! The UI renders the application state into something visible.
//!
//! The draw function dispatches based on the current view (library, document or bookmarks).
//! The document view stacks the breadcrumb bar, the category tabs, the section cards and a
//! help line. Only the current level is ever drawn.

use crate::app_state::{AppState, View};
use crate::controller::LoadState;
use crate::section::Section;
use crate::text::{clean_markdown, join_fragments};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &AppState) {
    match app.current_view {
        View::Library => draw_library(f, app),
        View::Document => draw_document(f, app),
        View::Bookmarks => draw_bookmarks(f, app),
    }
}

fn selected_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect, help: &str) {
    let text = app.message.clone().unwrap_or_else(|| help.to_string());
    let widget = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_library(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let items: Vec<ListItem> = app
        .library
        .iter()
        .map(|title| ListItem::new(Line::from(format!("📄 {title}"))))
        .collect();
    let title = format!("Library ({} documents)", app.library.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(selected_style());
    let mut state = ListState::default().with_selected(Some(app.library_index));
    f.render_stateful_widget(list, chunks[0], &mut state);

    draw_help(f, app, chunks[1], "↑/↓: Navigate | Enter: Open | ': Bookmarks | q: Quit");
}

fn draw_bookmarks(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    if app.bookmarks.is_empty() {
        let empty = Paragraph::new("No bookmarks yet. Press m on a section to save it.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Bookmarks"));
        f.render_widget(empty, chunks[0]);
    } else {
        let items: Vec<ListItem> = app
            .bookmarks
            .iter()
            .map(|bookmark| {
                let mut lines = vec![Line::from(vec![
                    Span::styled(
                        format!("★ {}", bookmark.heading),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", bookmark.location()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])];
                if !bookmark.summary.is_empty() {
                    lines.push(Line::from(format!("  {}", bookmark.summary)));
                }
                ListItem::new(lines)
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Bookmarks"))
            .highlight_style(selected_style());
        let mut state = ListState::default().with_selected(Some(app.bookmark_index));
        f.render_stateful_widget(list, chunks[0], &mut state);
    }

    draw_help(f, app, chunks[1], "↑/↓: Navigate | Enter: Open | m: Remove | q: Back");
}

fn draw_document(f: &mut Frame, app: &AppState) {
    let categories = app.category_counts();
    let tabs_height = if categories.is_empty() { 0 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Breadcrumb
            Constraint::Length(tabs_height), // Categories
            Constraint::Min(0),              // Sections
            Constraint::Length(3),           // Help
        ])
        .split(f.area());

    draw_breadcrumbs(f, app, chunks[0]);
    if !categories.is_empty() {
        draw_categories(f, app, &categories, chunks[1]);
    }

    let title = app.controller.location().title.clone();
    match app.controller.state() {
        LoadState::Idle | LoadState::Loading(_) => {
            draw_notice(f, chunks[2], &title, &format!("Loading {title}…"));
        }
        LoadState::NotFound => {
            draw_notice(f, chunks[2], &title, &format!("No document called \"{title}\"."));
        }
        LoadState::Ready(_) => match app.empty_state() {
            Some(empty) => draw_notice(f, chunks[2], &title, &empty.message()),
            None => draw_sections(f, app, chunks[2]),
        },
    }

    draw_help(
        f,
        app,
        chunks[3],
        "↑/↓: Navigate | →: Open | ←: Up | 0-9: Breadcrumb | Space: Expand | Tab: Subsection | f: Category | c: Compact | m: Bookmark | q: Library",
    );
}

fn draw_breadcrumbs(f: &mut Frame, app: &AppState, area: Rect) {
    let trail = app.controller.trail();
    let mut spans = Vec::new();
    for (i, item) in trail.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(format!("{i}:"), Style::default().fg(Color::DarkGray)));
        let style = if i + 1 == trail.len() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        spans.push(Span::styled(item.label.clone(), style));
    }
    let widget = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Navigation"));
    f.render_widget(widget, area);
}

fn draw_categories(f: &mut Frame, app: &AppState, categories: &[(String, usize)], area: Rect) {
    let tab = |label: String, active: bool| {
        let style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        Span::styled(format!(" {label} "), style)
    };
    let total = app.controller.current_children().len();
    let mut spans = vec![tab(format!("All ({total})"), app.category.is_none())];
    for (category, count) in categories {
        spans.push(Span::raw(" "));
        spans.push(tab(
            format!("{category} ({count})"),
            app.category.as_ref() == Some(category),
        ));
    }
    let widget = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Categories"));
    f.render_widget(widget, area);
}

fn draw_notice(f: &mut Frame, area: Rect, title: &str, text: &str) {
    let widget = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(widget, area);
}

fn draw_sections(f: &mut Frame, app: &AppState, area: Rect) {
    let width = app
        .wrap_width
        .min(usize::from(area.width.saturating_sub(4)))
        .max(20);

    let summary = app.position_summary();
    let area = if app.compact || summary.is_empty() {
        area
    } else {
        let rows = textwrap::wrap(&summary, width);
        let height = u16::try_from(rows.len()).unwrap_or(u16::MAX).min(4);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(height.saturating_add(1)), Constraint::Min(0)])
            .split(area);
        let header = Paragraph::new(summary)
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(header, chunks[0]);
        chunks[1]
    };

    let visible = app.visible_sections();
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, section)| ListItem::new(card_lines(app, section, i == app.selected, width)))
        .collect();

    let title = match app.controller.current_section() {
        Some(section) => section.label(),
        None => app
            .controller
            .document()
            .map(|document| document.label())
            .unwrap_or_default(),
    };
    let title = if app.compact {
        format!("{title} ({} sections, compact)", visible.len())
    } else {
        format!("{title} ({} sections)", visible.len())
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

/// Lines of one section card: heading, then summary, then when expanded the details, the
/// illustration link and the subsection pills.
fn card_lines(app: &AppState, section: &Section, selected: bool, width: usize) -> Vec<Line<'static>> {
    let marker = if section.is_external() {
        "↗ "
    } else if section.is_leaf() {
        "  "
    } else if app.is_expanded(section) {
        "▾ "
    } else {
        "▸ "
    };
    let mut heading = vec![
        Span::raw(marker),
        Span::styled(section.label(), Style::default().add_modifier(Modifier::BOLD)),
    ];
    if app.is_bookmarked(section) {
        heading.push(Span::styled(" ★", Style::default().fg(Color::Yellow)));
    }
    let mut lines = vec![Line::from(heading)];
    if app.compact {
        return lines;
    }

    let dim = Style::default().fg(Color::Gray);
    let summary = join_fragments(&section.summary);
    for row in textwrap::wrap(&summary, width) {
        lines.push(Line::styled(format!("  {row}"), dim));
    }

    if app.is_expanded(section) {
        for paragraph in section.details() {
            lines.push(Line::raw(""));
            for row in textwrap::wrap(&clean_markdown(paragraph), width) {
                lines.push(Line::raw(format!("  {row}")));
            }
        }
        if let Some(image) = section.image_url.as_deref().filter(|url| !url.is_empty()) {
            lines.push(Line::styled(format!("  🖼 {image}"), dim));
        }
        let pills = section.child_sections();
        if !pills.is_empty() {
            let mut spans = vec![Span::raw("  ")];
            for (i, child) in pills.iter().enumerate() {
                let style = if selected && app.pill == Some(i) {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                spans.push(Span::styled(format!("[{}]", child.label()), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
    }
    lines
}
