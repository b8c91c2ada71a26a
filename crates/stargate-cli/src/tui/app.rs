//! TUI application main loop.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio::time::Instant;

use stargate_core::backend::CommandBackend;
use stargate_core::config::Config;
use stargate_core::portal::{SessionController, SessionState, StatusKind};
use stargate_core::Error;

use super::action::Action;
use super::components::{
    init_browser_state, load_directory, Controls, FileBrowser, HelpOverlay, PortalPanel,
    PortalView, SpinnerStyle, StatusBar, TargetInput,
};
use super::dialog::{DialogReply, TuiFileDialog};
use super::event::{map_key_event, map_paste, EventHandler};
use super::layout::{centered_rect, ComputedLayout, LayoutMode};
use super::state::{AppState, FileBrowserState, Focus, LogLevel, TargetInputState};
use super::theme::Theme;

/// TUI command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct TuiArgs {
    /// Theme name
    pub theme: Option<String>,
    /// Address to pre-fill into the target field
    pub target: Option<String>,
}

/// Main TUI application.
pub struct App {
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Front-end state
    state: AppState,
    /// The portal session
    portal: SessionController,
    /// Event handler
    events: EventHandler,
    /// Theme
    theme: Theme,
    /// File browser widget
    browser: FileBrowser,
    /// Dialog requests from the portal
    dialog_rx: mpsc::UnboundedReceiver<DialogReply>,
    /// Reply for the dialog currently shown as the file browser
    pending_dialog: Option<DialogReply>,
    /// Status text last copied into the log
    last_status: Option<String>,
    /// Selection last copied into the log
    last_selection: Option<String>,
    /// How long to wait for terminal input per frame
    tick_rate: Duration,
    /// Spinner frames the terminal can draw
    spinner_style: SpinnerStyle,
    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    /// Create a new TUI application.
    pub fn new(args: TuiArgs, config: &Config) -> Result<Self> {
        let backend = CommandBackend::from_config(&config.backend);
        let backend_configured = backend.is_configured();

        let (dialog, dialog_rx) = TuiFileDialog::new();
        let portal = SessionController::new(
            Arc::new(backend),
            Arc::new(dialog),
            config.portal.status_clear_delay,
        );

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableBracketedPaste)?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let mut state = AppState {
            target: TargetInputState::with_value(args.target.unwrap_or_default()),
            ..AppState::default()
        };
        if !backend_configured {
            state.push_log(
                LogLevel::Warn,
                "No transfer backend configured; set one with `stargate config set backend.program <cmd>`",
            );
            state.log_visible = true;
        }

        let theme = args
            .theme
            .as_deref()
            .map(Theme::from_name)
            .unwrap_or_default();

        let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);

        Ok(Self {
            terminal,
            state,
            portal,
            events: EventHandler::new(tick_rate),
            theme,
            browser: FileBrowser::new(),
            dialog_rx,
            pending_dialog: None,
            last_status: None,
            last_selection: None,
            tick_rate,
            spinner_style: SpinnerStyle::for_term(std::env::var("TERM").ok().as_deref()),
            should_quit: false,
        })
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        self.state.size = (size.width, size.height);

        loop {
            if self.portal.state() == SessionState::Processing {
                self.state.spinner.tick(self.spinner_style);
            } else {
                self.state.spinner.reset();
            }

            self.portal.poll();

            self.poll_dialog_requests();

            self.track_portal();

            self.draw()?;

            let wait = event_wait(self.portal.next_deadline(), Instant::now(), self.tick_rate);
            if let Ok(Some(event)) = tokio::time::timeout(wait, self.events.next()).await {
                self.handle_event(&event);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Open the file browser when the portal asks for a dialog.
    fn poll_dialog_requests(&mut self) {
        while let Ok(reply) = self.dialog_rx.try_recv() {
            if !self.portal.is_picking() {
                // a drop already won; dropping the reply cancels the pick
                tracing::debug!("Ignoring stale dialog request");
                continue;
            }

            match init_browser_state(None, false) {
                Ok(browser) => {
                    self.state.file_browser = Some(browser);
                    self.pending_dialog = Some(reply);
                }
                Err(e) => {
                    self.log_error(&format!("Cannot open file browser: {e}"));
                    let _ = reply.send(Err(Error::Dialog(e.to_string())));
                }
            }
        }
    }

    /// Copy portal status and selection changes into the log panel.
    fn track_portal(&mut self) {
        let status = self.portal.status().cloned();
        let status_text = status.as_ref().map(|s| s.text.clone());
        if status_text != self.last_status {
            if let Some(status) = status {
                let level = match status.kind {
                    StatusKind::Info | StatusKind::Success => LogLevel::Info,
                    StatusKind::Error => LogLevel::Error,
                };
                self.state.push_log(level, status.text);
            }
            self.last_status = status_text;
        }

        let selection = self.portal.selected_file().map(ToString::to_string);
        if selection != self.last_selection {
            if let Some(file) = &selection {
                if self.portal.state() != SessionState::Processing {
                    self.log_info(&format!("Selected {file}"));
                }
            }
            self.last_selection = selection;
        }
    }

    /// Draw the UI.
    fn draw(&mut self) -> Result<()> {
        let state = &self.state;
        let portal = &self.portal;
        let theme = &self.theme;
        let browser = &mut self.browser;
        let spinner_style = self.spinner_style;

        self.terminal.draw(|frame| {
            let size = frame.area();
            let layout = ComputedLayout::compute(size, state.log_visible);
            let browsing = state.file_browser.is_some();

            Self::render_header(frame, layout.header, theme);

            let view = PortalView {
                state: portal.state(),
                file: portal.selected_file(),
                target: portal.in_flight().map(|r| r.target().as_str()),
                focused: state.focus == Focus::Portal && !browsing,
                picking: portal.is_picking(),
                spinner_style,
            };
            PortalPanel::render(frame, layout.portal, &view, &state.spinner, theme);

            TargetInput::render(
                frame,
                layout.target,
                &state.target,
                state.focus == Focus::Target && !browsing && !state.help_visible,
                theme,
            );

            Controls::render(
                frame,
                layout.controls,
                portal.can_submit(),
                portal.status(),
                theme,
            );

            if let Some(log_area) = layout.log {
                Self::render_log(frame, log_area, state, theme);
            }

            StatusBar::render(frame, layout.status, portal.state(), layout.mode, theme);

            if let Some(files) = &state.file_browser {
                let area = match layout.mode {
                    LayoutMode::Full => centered_rect(80, 80, size),
                    LayoutMode::Compact => size,
                };
                browser.render(frame, area, files, theme);
            }

            if state.help_visible {
                HelpOverlay::render(frame, size, theme);
            }
        })?;

        Ok(())
    }

    /// Render the header bar.
    fn render_header(frame: &mut ratatui::Frame, area: Rect, theme: &Theme) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" Stargate v{} ", stargate_core::VERSION),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "drop a file, enter a peer, send",
                Style::default().fg(theme.text_muted),
            ),
        ]));

        frame.render_widget(header, area);
    }

    /// Render the log panel, newest entry first.
    fn render_log(frame: &mut ratatui::Frame, area: Rect, state: &AppState, theme: &Theme) {
        let block = Block::default()
            .title(" Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));

        let inner = block.inner(area);
        let max_width = inner.width.saturating_sub(2) as usize;

        let items: Vec<ListItem> = state
            .log
            .iter()
            .rev()
            .take(inner.height as usize)
            .map(|entry| {
                let style = match entry.level {
                    LogLevel::Info => Style::default().fg(theme.info),
                    LogLevel::Warn => Style::default().fg(theme.warning),
                    LogLevel::Error => Style::default().fg(theme.error),
                };

                let prefix = format!(
                    "{} [{}] ",
                    entry.timestamp.format("%H:%M:%S"),
                    entry.level.as_str()
                );
                let message =
                    truncate_str(&entry.message, max_width.saturating_sub(prefix.len()));

                ListItem::new(Span::styled(format!("{prefix}{message}"), style))
            })
            .collect();

        let list = if items.is_empty() {
            List::new(vec![ListItem::new(Span::styled(
                "No log entries",
                Style::default().fg(theme.text_muted),
            ))])
        } else {
            List::new(items)
        };

        frame.render_widget(list.block(block), area);
    }

    /// Handle a terminal event.
    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => {
                let action = map_key_event(*key, &self.state);
                self.handle_action(action);
            }
            Event::Paste(text) => {
                let action = map_paste(text, &self.state);
                self.handle_action(action);
            }
            Event::Resize(width, height) => self.handle_resize(*width, *height),
            _ => {}
        }
    }

    /// Track the terminal size and keep the browser cursor in range.
    fn handle_resize(&mut self, width: u16, height: u16) {
        let (old_width, old_height) = self.state.size;
        self.state.size = (width, height);

        if LayoutMode::from_size(old_width, old_height) != LayoutMode::from_size(width, height) {
            self.log_info(&format!(
                "Layout adjusted for terminal size ({width}x{height})"
            ));
        }

        if let Some(browser) = &mut self.state.file_browser {
            browser.selected = browser.selected.min(browser.entries.len().saturating_sub(1));
        }
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.events.cancel();
                self.close_browser();
                self.should_quit = true;
            }
            Action::ToggleHelp => self.state.help_visible = !self.state.help_visible,
            Action::ToggleLog => self.state.log_visible = !self.state.log_visible,
            Action::FocusNext => self.state.focus = self.state.focus.next(),
            Action::FocusPrev => self.state.focus = self.state.focus.prev(),

            Action::OpenFileDialog => {
                if !self.portal.request_file_pick() {
                    tracing::debug!("File dialog refused in state {}", self.portal.state());
                }
            }
            Action::DropFiles(paths) => {
                let count = paths.len();
                if self.portal.on_drop(paths) {
                    // the drop wins over an open dialog
                    self.close_browser();
                    if count > 1 {
                        self.log_warn(&format!(
                            "{count} files dropped; only the first one is used"
                        ));
                    }
                } else if self.portal.is_busy() {
                    self.log_warn("Transfer in progress; drop ignored");
                }
            }
            Action::Send => self.send(),

            Action::TargetInsert(c) => self.state.target.insert(c),
            Action::TargetPaste(text) => {
                if self.state.focus != Focus::Target {
                    self.log_warn("Pasted text is not a file; added it to the target field");
                    self.state.focus = Focus::Target;
                }
                self.state.target.insert_str(&text);
            }
            Action::TargetBackspace => {
                self.state.target.backspace();
            }
            Action::TargetDelete => {
                self.state.target.delete();
            }
            Action::TargetLeft => self.state.target.move_left(),
            Action::TargetRight => self.state.target.move_right(),
            Action::TargetHome => self.state.target.home(),
            Action::TargetEnd => self.state.target.end(),
            Action::TargetClear => self.state.target.clear(),

            Action::FileBrowserUp => self.with_browser(FileBrowserState::up),
            Action::FileBrowserDown => self.with_browser(FileBrowserState::down),
            Action::FileBrowserFirst => self.with_browser(FileBrowserState::first),
            Action::FileBrowserLast => self.with_browser(FileBrowserState::last),
            Action::FileBrowserBack => {
                let parent = self
                    .state
                    .file_browser
                    .as_ref()
                    .and_then(|b| b.current_dir.parent().map(PathBuf::from));
                if let Some(parent) = parent {
                    self.browse_to(parent);
                }
            }
            Action::FileBrowserEnter => self.browser_enter(),
            Action::FileBrowserToggleHidden => {
                if let Some(browser) = &mut self.state.file_browser {
                    browser.show_hidden = !browser.show_hidden;
                    let dir = browser.current_dir.clone();
                    self.browse_to(dir);
                }
            }
            Action::CloseFileBrowser => self.close_browser(),

            Action::None => {}
        }
    }

    /// Submit the selected file to the typed target. Every other outcome
    /// reaches the log through the status line.
    fn send(&mut self) {
        match self.portal.submit(&self.state.target.value) {
            Err(Error::Busy) => self.log_warn("A transfer is already in progress"),
            // the status line carries the message; move to what needs fixing
            Err(e) if e.is_validation() => {
                self.state.focus = match e {
                    Error::NoFileSelected => Focus::Portal,
                    _ => Focus::Target,
                };
            }
            _ => {}
        }
    }

    /// Enter the directory under the cursor, or pick the file.
    fn browser_enter(&mut self) {
        let Some(entry) = self
            .state
            .file_browser
            .as_ref()
            .and_then(|b| b.current().cloned())
        else {
            return;
        };

        if entry.is_parent_link() {
            self.handle_action(Action::FileBrowserBack);
        } else if entry.is_dir {
            self.browse_to(entry.path);
        } else {
            let path = entry.path.display().to_string();
            if let Some(reply) = self.pending_dialog.take() {
                let _ = reply.send(Ok(path));
            }
            self.state.file_browser = None;
        }
    }

    /// Reload the browser at `dir`.
    fn browse_to(&mut self, dir: PathBuf) {
        let Some(browser) = &mut self.state.file_browser else {
            return;
        };

        match load_directory(&dir, browser.show_hidden) {
            Ok(entries) => {
                browser.current_dir = dir;
                browser.entries = entries;
                browser.selected = 0;
            }
            Err(e) => self.log_error(&format!("Cannot open {}: {e}", dir.display())),
        }
    }

    fn with_browser(&mut self, f: impl FnOnce(&mut FileBrowserState)) {
        if let Some(browser) = &mut self.state.file_browser {
            f(browser);
        }
    }

    /// Hide the browser. An unanswered dialog counts as cancelled.
    fn close_browser(&mut self) {
        self.state.file_browser = None;
        self.pending_dialog = None;
    }

    fn log_info(&mut self, message: &str) {
        self.state.push_log(LogLevel::Info, message);
    }

    fn log_warn(&mut self, message: &str) {
        self.state.push_log(LogLevel::Warn, message);
    }

    fn log_error(&mut self, message: &str) {
        self.state.push_log(LogLevel::Error, message);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = self.terminal.backend_mut().execute(DisableBracketedPaste);
        let _ = self.terminal.backend_mut().execute(LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Time to wait for input: one tick, or less if the portal has a status
/// clear or reset due sooner.
fn event_wait(deadline: Option<Instant>, now: Instant, tick_rate: Duration) -> Duration {
    deadline.map_or(tick_rate, |at| {
        at.saturating_duration_since(now).min(tick_rate)
    })
}

/// Truncate a string to at most `max_len` characters, ending in "..." when
/// cut.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}
