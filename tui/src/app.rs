//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, paste, resize)
//! - ConductorClient for the correction lifecycle
//! - DisplayState for rendering
//!
//! The App:
//! 1. Converts terminal events to SurfaceEvents
//! 2. Sends events to the embedded Conductor via ConductorClient
//! 3. Receives ConductorMessages and updates DisplayState
//! 4. Renders based on DisplayState

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, StatefulWidget, Widget, Wrap};
use ratatui::Terminal;
use unicode_width::UnicodeWidthStr;

use clarify_conductor::{
    ConductorMessage, LifecycleStatus, LlmBackend, NotifyLevel, StatusKind, SurfaceEvent, Tone,
};

use crate::clipboard::Clipboard;
use crate::compositor::{Blend, Compositor, LayerId};
use crate::conductor_client::ConductorClient;
use crate::display::DisplayState;
use crate::theme;
use crate::widgets::{TextBlock, TextBlockState};

/// Header height (title + tagline)
const HEADER_HEIGHT: u16 = 2;

/// Smallest editor that still shows a line of text inside its border
const EDITOR_MIN_HEIGHT: u16 = 3;

/// Error banner height
const ERROR_BANNER_HEIGHT: u16 = 3;

/// Share of the screen given to the Before/After panes
const RESULTS_PERCENT: u16 = 45;

/// Z-index of the loading overlay
const OVERLAY_Z: i32 = 20;

/// Lines moved per PageUp/PageDown in the result panes
const RESULT_SCROLL_STEP: isize = 5;

/// Time for the scan line to move one row
const SCAN_STEP_MS: u128 = 90;

/// Minimum time between frames
const FRAME_BUDGET: Duration = Duration::from_millis(33);

/// Idle wake-up so timers and pending corrections are noticed
const TICK: Duration = Duration::from_millis(16);

const TAGLINE: &str = "Polish your words to perfection.";
const PLACEHOLDER: &str = "Type or paste your text here to begin...";

/// What a key press asks for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Append a character
    Insert(char),
    /// Append a line break
    Newline,
    /// Delete the last character
    Backspace,
    /// Append pasted text
    Paste(String),
    /// Ask for a correction
    Submit,
    /// Empty the editor
    Clear,
    /// Copy the corrected text
    Copy,
    /// Select the next tone
    NextTone,
    /// Select the previous tone
    PreviousTone,
    /// Select a specific tone
    SelectTone(Tone),
    /// Scroll the result panes
    ScrollResults(isize),
    /// Leave
    Quit,
}

/// Map a key press to an action
pub fn map_key(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter if ctrl || alt => Some(Action::Submit),
        KeyCode::Enter => Some(Action::Newline),
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            's' => Some(Action::Submit),
            'l' => Some(Action::Clear),
            'y' => Some(Action::Copy),
            'c' => Some(Action::Quit),
            _ => None,
        },
        KeyCode::Char(_) if alt => None,
        KeyCode::Char(c) => Some(Action::Insert(c)),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Tab => Some(Action::NextTone),
        KeyCode::BackTab => Some(Action::PreviousTone),
        KeyCode::F(n @ 1..=4) => Tone::ALL
            .get(usize::from(n - 1))
            .copied()
            .map(Action::SelectTone),
        KeyCode::PageUp => Some(Action::ScrollResults(-RESULT_SCROLL_STEP)),
        KeyCode::PageDown => Some(Action::ScrollResults(RESULT_SCROLL_STEP)),
        _ => None,
    }
}

/// Screen regions for one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Regions {
    /// Title and tagline
    pub header: Rect,
    /// Input editor
    pub editor: Rect,
    /// Tone bar and counter
    pub toolbar: Rect,
    /// Before/After panes or error banner (zero height otherwise)
    pub results: Rect,
    /// Status line
    pub status: Rect,
}

/// Split the screen for a lifecycle status
pub fn layout(area: Rect, kind: StatusKind) -> Regions {
    let results = match kind {
        StatusKind::Success => Constraint::Percentage(RESULTS_PERCENT),
        StatusKind::Error => Constraint::Length(ERROR_BANNER_HEIGHT),
        StatusKind::Idle | StatusKind::Loading => Constraint::Length(0),
    };
    let [header, editor, toolbar, results, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(EDITOR_MIN_HEIGHT),
        Constraint::Length(1),
        results,
        Constraint::Length(1),
    ])
    .areas(area);

    Regions {
        header,
        editor,
        toolbar,
        results,
        status,
    }
}

fn text_width(s: &str) -> u16 {
    u16::try_from(s.width()).unwrap_or(u16::MAX)
}

/// Layer IDs for UI regions
struct AppLayers {
    header: LayerId,
    editor: LayerId,
    overlay: LayerId,
    toolbar: LayerId,
    results: LayerId,
    status: LayerId,
}

/// Main application state
pub struct App<B: LlmBackend, C: Clipboard> {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Text to load into the editor once connected
    prefill: Option<String>,

    // === Conductor Integration ===
    /// Client for communicating with the embedded Conductor
    conductor: ConductorClient<B>,
    /// Display state derived from ConductorMessages
    display: DisplayState,
    /// Where copied text goes
    clipboard: C,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,
    /// Editor scroll, pinned to the end of the text
    editor_state: TextBlockState,
    /// Before pane scroll
    before_state: TextBlockState,
    /// After pane scroll
    after_state: TextBlockState,

    // === Misc State ===
    /// Time spent in Loading, drives the scan line
    scan_elapsed: Duration,
    /// Last frame time (for timers)
    last_frame: Instant,
}

impl<B: LlmBackend + 'static, C: Clipboard> App<B, C> {
    /// Create a new App for a terminal of the given size
    pub fn new(conductor: ConductorClient<B>, clipboard: C, size: (u16, u16)) -> Self {
        let area = Rect::new(0, 0, size.0, size.1);
        let regions = layout(area, StatusKind::Idle);

        let mut compositor = Compositor::new(area);
        let header = compositor.create_layer(regions.header, 0);
        let editor = compositor.create_layer(regions.editor, 0);
        let toolbar = compositor.create_layer(regions.toolbar, 0);
        let results = compositor.create_layer(regions.results, 0);
        let status = compositor.create_layer(regions.status, 0);

        // Scan line sits above the editor and lets the text show through
        let overlay = compositor.create_layer(regions.editor, OVERLAY_Z);
        compositor.set_blend(overlay, Blend::Transparent);
        compositor.set_visible(overlay, false);

        Self {
            running: true,
            prefill: None,
            conductor,
            display: DisplayState::new(),
            clipboard,
            compositor,
            layers: AppLayers {
                header,
                editor,
                overlay,
                toolbar,
                results,
                status,
            },
            editor_state: TextBlockState::following(),
            before_state: TextBlockState::default(),
            after_state: TextBlockState::default(),
            scan_elapsed: Duration::ZERO,
            last_frame: Instant::now(),
        }
    }

    /// Load text into the editor once the Conductor is connected
    #[must_use]
    pub fn with_prefill(mut self, text: Option<String>) -> Self {
        self.prefill = text.filter(|t| !t.is_empty());
        self
    }

    /// Whether the app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Display state as last applied
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Goodbye message sent by the Conductor on quit
    pub fn goodbye(&self) -> Option<&str> {
        self.display.goodbye.as_deref()
    }

    /// Start the Conductor, connect, and apply the prefill
    pub async fn startup(&mut self) {
        self.conductor.start().await;
        self.conductor.connect().await;
        if let Some(text) = self.prefill.take() {
            self.conductor
                .send_event(SurfaceEvent::InputChanged { text })
                .await;
        }
        self.sync().await;
    }

    /// Main event loop
    ///
    /// # Errors
    ///
    /// Returns an error if drawing to the terminal fails.
    pub async fn run<TB>(&mut self, terminal: &mut Terminal<TB>) -> anyhow::Result<()>
    where
        TB: Backend,
        TB::Error: Send + Sync + 'static,
    {
        let mut event_stream = EventStream::new();

        // Show the UI before the health check runs
        self.draw(terminal)?;
        self.startup().await;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_terminal_event(event).await,
                    Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                    None => {
                        tracing::warn!("Terminal event stream closed");
                        self.running = false;
                    }
                },

                () = tokio::time::sleep(TICK) => {}
            }

            self.sync().await;
            self.update();
            self.draw(terminal)?;

            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_BUDGET {
                tokio::time::sleep(FRAME_BUDGET - elapsed).await;
            }
        }

        Ok(())
    }

    /// Apply a finished correction and all pending Conductor messages
    pub async fn sync(&mut self) {
        self.conductor.poll_correction().await;
        self.process_conductor_messages();
    }

    /// Process all pending messages from the Conductor
    fn process_conductor_messages(&mut self) {
        for msg in self.conductor.recv_all() {
            if let ConductorMessage::Status {
                status: LifecycleStatus::Success(_),
            } = &msg
            {
                self.before_state.reset();
                self.after_state.reset();
            }
            self.display.apply_message(msg);
        }

        if self.display.take_focus_request() {
            self.editor_state = TextBlockState::following();
        }
        if self.display.quit {
            self.running = false;
        }
    }

    async fn handle_terminal_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            Event::Paste(text) => self.perform(Action::Paste(text)).await,
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = map_key(key) {
            self.perform(action).await;
        }
    }

    /// Carry out an action
    pub async fn perform(&mut self, action: Action) {
        match action {
            Action::Insert(c) => self.edit(|text| text.push(c)).await,
            Action::Newline => self.edit(|text| text.push('\n')).await,
            Action::Backspace => {
                self.edit(|text| {
                    text.pop();
                })
                .await;
            }
            Action::Paste(pasted) => {
                let pasted = pasted.replace("\r\n", "\n").replace('\r', "\n");
                self.edit(|text| text.push_str(&pasted)).await;
            }
            Action::Submit => {
                self.conductor
                    .send_event(SurfaceEvent::SubmitRequested)
                    .await;
            }
            Action::Clear => {
                self.conductor.send_event(SurfaceEvent::ClearRequested).await;
            }
            Action::Copy => self.copy_result().await,
            Action::NextTone => self.select_tone(self.conductor.tone().next()).await,
            Action::PreviousTone => self.select_tone(self.conductor.tone().previous()).await,
            Action::SelectTone(tone) => self.select_tone(tone).await,
            Action::ScrollResults(delta) => {
                self.before_state.scroll(delta);
                self.after_state.scroll(delta);
            }
            Action::Quit => {
                self.conductor.send_event(SurfaceEvent::QuitRequested).await;
            }
        }
    }

    /// Edit a copy of the buffer and hand it to the Conductor
    ///
    /// The editor is read-only while a correction is in flight.
    async fn edit(&mut self, apply: impl FnOnce(&mut String)) {
        if self.conductor.status().is_loading() {
            return;
        }
        let mut text = self.conductor.input().to_string();
        apply(&mut text);
        if text != self.conductor.input() {
            self.conductor
                .send_event(SurfaceEvent::InputChanged { text })
                .await;
        }
    }

    async fn select_tone(&mut self, tone: Tone) {
        self.conductor
            .send_event(SurfaceEvent::ToneSelected { tone })
            .await;
    }

    async fn copy_result(&mut self) {
        let Some(corrected) = self
            .conductor
            .status()
            .result()
            .map(|result| result.corrected.clone())
        else {
            return;
        };

        let ok = match self.clipboard.copy(&corrected) {
            Ok(()) => {
                self.display.mark_copied();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Clipboard write failed");
                false
            }
        };
        self.conductor
            .send_event(SurfaceEvent::CopyCompleted { ok })
            .await;
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.compositor.resize(Rect::new(0, 0, width, height));
        self.apply_layout();
    }

    /// Update timers
    fn update(&mut self) {
        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;

        self.display.update(delta);
        self.scan_elapsed = if self.display.is_loading() {
            self.scan_elapsed + delta
        } else {
            Duration::ZERO
        };
    }

    /// Place layers for the current status
    fn apply_layout(&mut self) {
        let regions = layout(self.compositor.area(), self.display.status.kind());

        self.compositor.set_bounds(self.layers.header, regions.header);
        self.compositor.set_bounds(self.layers.editor, regions.editor);
        self.compositor.set_bounds(self.layers.overlay, regions.editor);
        self.compositor.set_bounds(self.layers.toolbar, regions.toolbar);
        self.compositor.set_bounds(self.layers.results, regions.results);
        self.compositor.set_bounds(self.layers.status, regions.status);

        self.compositor
            .set_visible(self.layers.overlay, self.display.is_loading());
        self.compositor
            .set_visible(self.layers.results, regions.results.height > 0);
    }

    // ============================================
    // Rendering
    // ============================================

    /// Render the UI
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal backend fails.
    pub fn draw<TB>(&mut self, terminal: &mut Terminal<TB>) -> anyhow::Result<()>
    where
        TB: Backend,
        TB::Error: Send + Sync + 'static,
    {
        self.apply_layout();
        self.render_header();
        self.render_editor();
        self.render_overlay();
        self.render_toolbar();
        self.render_results();
        self.render_status();

        let cursor = self.cursor_position();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    if let (Some(src), Some(dst)) = (output.cell((x, y)), buf.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }

            if let Some(position) = cursor {
                frame.set_cursor_position(position);
            }
        })?;

        Ok(())
    }

    /// Caret position on screen, hidden while loading
    fn cursor_position(&self) -> Option<(u16, u16)> {
        if self.display.is_loading() {
            return None;
        }
        let bounds = self.compositor.layer(self.layers.editor)?.bounds;
        self.editor_state
            .end_position
            .map(|(x, y)| (bounds.x + x, bounds.y + y))
    }

    fn render_header(&mut self) {
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.header) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        if area.height < HEADER_HEIGHT || area.width == 0 {
            return;
        }

        let version = self
            .display
            .session
            .as_ref()
            .map_or(env!("CARGO_PKG_VERSION"), |s| s.version.as_str());
        let title = Line::from(vec![
            Span::styled(" Clarify", theme::title()),
            Span::styled(format!(" v{version}"), theme::dim()),
        ]);
        buf.set_line(0, 0, &title, area.width);
        buf.set_stringn(1, 1, TAGLINE, usize::from(area.width - 1), theme::dim());

        if let Some(session) = &self.display.session {
            let model = format!("{} ", session.model);
            let x = area.width.saturating_sub(text_width(&model));
            buf.set_string(x, 0, &model, theme::dim());
        }
    }

    fn render_editor(&mut self) {
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.editor) else {
            return;
        };
        buf.reset();
        let area = buf.area;

        let block = Block::bordered()
            .title(" Your text ")
            .border_style(theme::border(!self.display.is_loading()));
        let inner = block.inner(area);
        block.render(area, buf);

        TextBlock::new(&self.display.input)
            .style(theme::text())
            .placeholder(PLACEHOLDER, theme::dim())
            .render(inner, buf, &mut self.editor_state);
    }

    fn render_overlay(&mut self) {
        let loading = self.display.is_loading();
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.overlay) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        if !loading || area.height < 3 || area.width < 3 {
            return;
        }

        let inner_height = area.height - 2;
        let row = (self.scan_elapsed.as_millis() / SCAN_STEP_MS) % u128::from(inner_height);
        let y = 1 + u16::try_from(row).unwrap_or(0);
        buf.set_string(
            1,
            y,
            "━".repeat(usize::from(area.width - 2)),
            Style::default().fg(theme::BRAND_INDIGO_SOFT),
        );

        let label = "Refining...";
        let x = area.width.saturating_sub(text_width(label) + 2);
        buf.set_string(
            x,
            0,
            label,
            Style::default()
                .fg(theme::BRAND_INDIGO)
                .add_modifier(Modifier::BOLD),
        );
    }

    fn render_toolbar(&mut self) {
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.toolbar) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        if area.height == 0 {
            return;
        }

        let mut spans = vec![Span::raw(" ")];
        for tone in Tone::ALL {
            let style = if tone == self.display.tone {
                theme::tone_selected()
            } else {
                theme::dim()
            };
            spans.push(Span::styled(format!(" {} ", tone.label()), style));
            spans.push(Span::raw(" "));
        }
        buf.set_line(0, 0, &Line::from(spans), area.width);

        let counter = format!("{}/{} ", self.display.char_count(), self.display.max_len);
        let style = if self.display.near_limit() {
            Style::default().fg(theme::WARNING_AMBER)
        } else {
            theme::dim()
        };
        let x = area.width.saturating_sub(text_width(&counter));
        buf.set_string(x, 0, &counter, style);
    }

    fn render_results(&mut self) {
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.results) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        if area.height == 0 {
            return;
        }

        match &self.display.status {
            LifecycleStatus::Success(result) => {
                let [left, right] =
                    Layout::horizontal([Constraint::Percentage(50); 2]).areas(area);

                let before = Block::bordered()
                    .title(Line::styled(" Before ", theme::dim()))
                    .border_style(theme::border(false));
                let before_inner = before.inner(left);
                before.render(left, buf);
                TextBlock::new(&result.original)
                    .style(theme::before())
                    .render(before_inner, buf, &mut self.before_state);

                let (copy_label, copy_style) = if self.display.is_copied() {
                    (" ✓ Copied ", Style::default().fg(theme::SUCCESS_GREEN))
                } else {
                    (" Copy ^Y ", theme::dim())
                };
                let after = Block::bordered()
                    .title(Line::styled(" After ", theme::title()))
                    .title(Line::styled(copy_label, copy_style).right_aligned())
                    .border_style(theme::border(true));
                let after_inner = after.inner(right);
                after.render(right, buf);
                TextBlock::new(&result.corrected)
                    .style(theme::text())
                    .render(after_inner, buf, &mut self.after_state);
            }
            LifecycleStatus::Error { message } => {
                let error = Style::default().fg(theme::ERROR_RED);
                let block = Block::bordered().border_style(error);
                let inner = block.inner(area);
                block.render(area, buf);
                Paragraph::new(format!("⚠ {message}"))
                    .style(error.add_modifier(Modifier::BOLD))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .render(inner, buf);
            }
            LifecycleStatus::Idle | LifecycleStatus::Loading { .. } => {}
        }
    }

    fn render_status(&mut self) {
        let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) else {
            return;
        };
        buf.reset();
        let area = buf.area;
        if area.height == 0 {
            return;
        }

        let kind = self.display.status.kind();
        let hints = match kind {
            StatusKind::Loading => "Esc quit ",
            StatusKind::Success => "^Y copy  ^L clear  Esc quit ",
            StatusKind::Idle | StatusKind::Error => "^S refine  Tab tone  ^L clear  Esc quit ",
        };
        let hints_x = area.width.saturating_sub(text_width(hints));
        buf.set_string(hints_x, 0, hints, theme::dim());

        let (left, style) = match &self.display.notification {
            Some(notification) => {
                let color = match notification.level {
                    NotifyLevel::Info => theme::TEXT,
                    NotifyLevel::Warning => theme::WARNING_AMBER,
                    NotifyLevel::Error => theme::ERROR_RED,
                    NotifyLevel::Success => theme::SUCCESS_GREEN,
                };
                (
                    format!(" [{}] {}", notification.level.label(), notification.message),
                    Style::default().fg(color),
                )
            }
            None => {
                let style = match kind {
                    StatusKind::Error => Style::default().fg(theme::ERROR_RED),
                    StatusKind::Success => Style::default().fg(theme::SUCCESS_GREEN),
                    StatusKind::Loading => Style::default().fg(theme::BRAND_INDIGO_SOFT),
                    StatusKind::Idle => theme::dim(),
                };
                (format!(" {}", kind.description()), style)
            }
        };
        let room = usize::from(hints_x.saturating_sub(1));
        buf.set_stringn(0, 0, &left, room, style);
    }
}
