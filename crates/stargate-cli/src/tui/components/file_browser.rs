//! In-terminal file picker.
//!
//! Opens when the portal asks for a file dialog. Enter on a file picks it,
//! Esc dismisses the browser and counts as a cancelled dialog.

use std::cmp::Ordering;
use std::path::Path;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::tui::state::{DirEntry, FileBrowserState};
use crate::tui::theme::Theme;

/// File picker widget. Keeps only the ratatui list state (selection and
/// scroll offset); entries live in [`FileBrowserState`].
pub struct FileBrowser {
    list_state: ListState,
}

impl FileBrowser {
    /// Create a new file browser.
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    /// Render the browser over `area`.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &FileBrowserState,
        theme: &Theme,
    ) {
        frame.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self::render_path_bar(frame, chunks[0], state, theme);
        self.render_entries(frame, chunks[1], state, theme);

        let hints = Paragraph::new(Line::from(Span::styled(
            " [j/k] Move  [Enter] Open/Pick  [Backspace] Up  [.] Hidden  [Esc] Cancel",
            Style::default().fg(theme.text_muted),
        )));
        frame.render_widget(hints, chunks[2]);
    }

    fn render_path_bar(frame: &mut Frame, area: Rect, state: &FileBrowserState, theme: &Theme) {
        let path = state.current_dir.display().to_string();
        let path = shorten_path(&path, area.width.saturating_sub(4) as usize);

        let block = Block::default()
            .title(" Pick a file to send ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused));

        let paragraph = Paragraph::new(Span::styled(path, Style::default().fg(theme.accent)))
            .block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_entries(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &FileBrowserState,
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));

        if state.entries.is_empty() {
            let empty = Paragraph::new(Span::styled(
                " (empty directory)",
                Style::default().fg(theme.text_muted),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let width = area.width.saturating_sub(6) as usize;
        let items: Vec<ListItem> = state
            .entries
            .iter()
            .map(|entry| entry_item(entry, theme, width))
            .collect();

        // ratatui scrolls the list to keep the selection visible
        self.list_state.select(Some(state.selected));

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Default for FileBrowser {
    fn default() -> Self {
        Self::new()
    }
}

fn entry_item(entry: &DirEntry, theme: &Theme, width: usize) -> ListItem<'static> {
    let name = entry
        .path
        .file_name()
        .map_or_else(|| "..".to_string(), |n| n.to_string_lossy().to_string());
    let name = if entry.is_dir { format!("{name}/") } else { name };

    let size = if entry.is_dir {
        String::new()
    } else {
        format_size(entry.size)
    };

    let name = truncate_name(&name, width.saturating_sub(size.len() + 1));
    let pad = width.saturating_sub(name.chars().count() + size.len());

    let style = if entry.is_dir {
        Style::default().fg(theme.accent)
    } else if entry.is_hidden {
        Style::default().fg(theme.text_muted)
    } else {
        Style::default().fg(theme.text_primary)
    };

    ListItem::new(Line::from(vec![
        Span::styled(name, style),
        Span::raw(" ".repeat(pad)),
        Span::styled(size, Style::default().fg(theme.text_secondary)),
    ]))
}

/// Read `path` into browser entries: a `..` link first when there is a
/// parent, then directories, then files, each alphabetically.
pub fn load_directory(path: &Path, show_hidden: bool) -> std::io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();

    if path.parent().is_some() {
        entries.push(DirEntry {
            path: path.join(".."),
            is_dir: true,
            size: 0,
            is_hidden: false,
        });
    }

    for result in std::fs::read_dir(path)? {
        let entry = result?;
        let entry_path = entry.path();
        let is_hidden = entry.file_name().to_string_lossy().starts_with('.');
        if is_hidden && !show_hidden {
            continue;
        }

        // Broken symlinks and permission errors just skip the entry.
        let Ok(metadata) = std::fs::metadata(&entry_path) else {
            continue;
        };
        let is_dir = metadata.is_dir();

        entries.push(DirEntry {
            path: entry_path,
            is_dir,
            size: if is_dir { 0 } else { metadata.len() },
            is_hidden,
        });
    }

    entries.sort_by(|a, b| match (a.is_parent_link(), b.is_parent_link()) {
        (true, _) => Ordering::Less,
        (_, true) => Ordering::Greater,
        _ => b.is_dir.cmp(&a.is_dir).then_with(|| {
            let a_name = a.path.file_name().map(|n| n.to_string_lossy().to_lowercase());
            let b_name = b.path.file_name().map(|n| n.to_string_lossy().to_lowercase());
            a_name.cmp(&b_name)
        }),
    });

    Ok(entries)
}

/// Browser state rooted at `start_dir`, or the working directory.
pub fn init_browser_state(
    start_dir: Option<&Path>,
    show_hidden: bool,
) -> std::io::Result<FileBrowserState> {
    let current_dir = match start_dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let entries = load_directory(&current_dir, show_hidden)?;

    Ok(FileBrowserState {
        current_dir,
        entries,
        selected: 0,
        show_hidden,
    })
}

/// Format file size for display.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        b if b >= GB => format!("{:.1}GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.1}MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1}KB", b as f64 / KB as f64),
        b => format!("{b}B"),
    }
}

/// Keep the tail of a path that does not fit.
fn shorten_path(path: &str, max_width: usize) -> String {
    let len = path.chars().count();
    if len <= max_width {
        return path.to_string();
    }
    if max_width <= 3 {
        return "...".to_string();
    }
    let tail: String = path.chars().skip(len - (max_width - 3)).collect();
    format!("...{tail}")
}

/// Keep the head of a name that does not fit.
fn truncate_name(name: &str, max_width: usize) -> String {
    if name.chars().count() <= max_width {
        return name.to_string();
    }
    if max_width <= 3 {
        return "...".to_string();
    }
    let head: String = name.chars().take(max_width - 3).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1536), "1.5KB");
        assert_eq!(format_size(1024 * 1024), "1.0MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0GB");
    }

    #[test]
    fn test_truncate_and_shorten() {
        assert_eq!(truncate_name("report.pdf", 20), "report.pdf");
        assert_eq!(truncate_name("quarterly-report.pdf", 10), "quarter...");
        assert_eq!(truncate_name("abcd", 3), "...");
        assert_eq!(shorten_path("/home/user/docs", 10), "...er/docs");
    }

    #[test]
    fn test_load_directory_orders_entries() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("A.txt"), "a").unwrap();
        std::fs::write(dir.path().join(".secret"), "s").unwrap();
        std::fs::create_dir(dir.path().join("zdir")).unwrap();

        let entries = load_directory(dir.path(), false).unwrap();
        let names: Vec<String> = entries
            .iter()
            .map(|e| {
                e.path
                    .file_name()
                    .map_or_else(|| "..".to_string(), |n| n.to_string_lossy().to_string())
            })
            .collect();
        assert_eq!(names, vec!["..", "zdir", "A.txt", "b.txt"]);

        let entries = load_directory(dir.path(), true).unwrap();
        assert!(entries.iter().any(|e| e.is_hidden));
    }

    #[test]
    fn test_init_browser_state() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("photo.jpg"), "x").unwrap();

        let state = init_browser_state(Some(dir.path()), false).unwrap();
        assert_eq!(state.current_dir, dir.path());
        assert_eq!(state.selected, 0);
        assert_eq!(state.entries.len(), 2);
    }
}
