//! TextBlock Widget
//!
//! A borderless, wrapping, scrollable text region. Used for the editor and
//! for the Before/After panes.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// State for a scrollable text block
#[derive(Debug, Default)]
pub struct TextBlockState {
    /// Scroll offset (lines from top)
    pub scroll_offset: usize,
    /// Total wrapped lines at the last render
    pub total_lines: usize,
    /// Whether the view should stick to the last line
    pub follow_end: bool,
    /// Screen position just past the last character, if visible
    pub end_position: Option<(u16, u16)>,
}

impl TextBlockState {
    /// State that keeps the end of the text in view
    pub fn following() -> Self {
        Self {
            follow_end: true,
            ..Self::default()
        }
    }

    /// Scroll by delta (positive = down)
    pub fn scroll(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
        self.follow_end = false;
    }

    /// Scroll back to the first line
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
    }
}

/// A borderless, scrollable text block
pub struct TextBlock<'a> {
    content: &'a str,
    style: Style,
    placeholder: Option<(&'a str, Style)>,
}

impl<'a> TextBlock<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            style: Style::default(),
            placeholder: None,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Text shown instead of an empty content
    pub fn placeholder(mut self, text: &'a str, style: Style) -> Self {
        self.placeholder = Some((text, style));
        self
    }
}

/// Wrap text to a width, keeping blank lines and a trailing newline
fn wrap_lines(content: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines: Vec<String> = content
        .split('\n')
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                wrap(line, width)
                    .into_iter()
                    .map(|cow| cow.to_string())
                    .collect()
            }
        })
        .collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Display width of the whitespace ending the last line of `content`
fn trailing_whitespace_width(content: &str) -> usize {
    let last = content.rsplit('\n').next().unwrap_or_default();
    last[last.trim_end().len()..].width()
}

impl StatefulWidget for TextBlock<'_> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let (content, style) = match self.placeholder {
            Some(placeholder) if self.content.is_empty() => placeholder,
            _ => (self.content, self.style),
        };

        let wrapped = wrap_lines(content, area.width as usize);
        state.total_lines = wrapped.len();

        let height = area.height as usize;
        let max_scroll = state.total_lines.saturating_sub(height);
        state.scroll_offset = if state.follow_end {
            max_scroll
        } else {
            state.scroll_offset.min(max_scroll)
        };

        for (i, line) in wrapped
            .iter()
            .skip(state.scroll_offset)
            .take(height)
            .enumerate()
        {
            // i < area.height, so the cast cannot truncate
            #[allow(clippy::cast_possible_truncation)]
            let y = area.y + i as u16;
            buf.set_string(area.x, y, line, style);
        }

        state.end_position = if self.content.is_empty() {
            Some((area.x, area.y)).filter(|_| area.height > 0 && area.width > 0)
        } else {
            wrapped.last().and_then(|last| {
                let row = state.total_lines - 1;
                let visible = row >= state.scroll_offset && row < state.scroll_offset + height;
                // wrap() drops trailing spaces; the caret still sits after them
                let col = (last.width() + trailing_whitespace_width(content))
                    .min(area.width.saturating_sub(1) as usize);
                #[allow(clippy::cast_possible_truncation)]
                visible.then(|| (area.x + col as u16, area.y + (row - state.scroll_offset) as u16))
            })
        };
    }
}
