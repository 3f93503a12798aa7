//! Single-line input for the assistant panel

use crate::input::Action;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Single-line text editor with a disabled mode.
///
/// While disabled the box keeps its content, rejects every edit, and renders
/// dimmed with the disabled placeholder.
#[derive(Debug, Default)]
pub struct InputBox {
    content: String,
    /// Cursor position in chars
    cursor: usize,
    /// Horizontal scroll offset in display columns
    scroll: usize,
    /// Last known inner width
    width: usize,
    placeholder: String,
    disabled_placeholder: String,
    focused: bool,
    disabled: bool,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text shown when empty
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Text shown while disabled and empty
    pub fn with_disabled_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.disabled_placeholder = placeholder.into();
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content and move the cursor to the end
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.content.chars().count();
        self.update_scroll();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    fn cursor_column(&self) -> usize {
        self.content
            .chars()
            .take(self.cursor)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    /// Apply an editing action.
    ///
    /// Returns whether the content or cursor changed. Always false while disabled.
    pub fn handle_action(&mut self, action: &Action) -> bool {
        if self.disabled {
            return false;
        }

        let len = self.content.chars().count();
        let changed = match action {
            Action::Char(c) => {
                self.insert(*c);
                true
            }
            Action::Paste(text) => {
                // Newlines collapse to single spaces
                let mut last_space = self.content.ends_with(' ');
                for c in text.chars() {
                    let c = if c == '\n' || c == '\r' { ' ' } else { c };
                    if c == ' ' && last_space {
                        continue;
                    }
                    last_space = c == ' ';
                    self.insert(c);
                }
                true
            }
            Action::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_range(self.cursor, self.cursor + 1);
                true
            }
            Action::Delete if self.cursor < len => {
                self.remove_range(self.cursor, self.cursor + 1);
                true
            }
            Action::Left if self.cursor > 0 => {
                self.cursor -= 1;
                true
            }
            Action::Right if self.cursor < len => {
                self.cursor += 1;
                true
            }
            Action::Home => {
                self.cursor = 0;
                true
            }
            Action::End => {
                self.cursor = len;
                true
            }
            Action::ClearLine => {
                self.clear();
                true
            }
            Action::DeleteWord if self.cursor > 0 => {
                let chars: Vec<char> = self.content.chars().collect();
                let mut start = self.cursor;
                while start > 0 && chars[start - 1] == ' ' {
                    start -= 1;
                }
                while start > 0 && chars[start - 1] != ' ' {
                    start -= 1;
                }
                self.remove_range(start, self.cursor);
                self.cursor = start;
                true
            }
            _ => false,
        };

        if changed {
            self.update_scroll();
        }
        changed
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Remove chars in `[start, end)`
    fn remove_range(&mut self, start: usize, end: usize) {
        let from = self.byte_offset(start);
        let to = self.byte_offset(end);
        self.content.drain(from..to);
    }

    fn update_scroll(&mut self) {
        let visible = self.width;
        let column = self.cursor_column();
        if visible == 0 || column < visible {
            self.scroll = 0;
        } else if column < self.scroll {
            self.scroll = column;
        } else if column >= self.scroll + visible {
            self.scroll = column + 1 - visible;
        }
    }

    /// Visible slice of the content given the scroll offset
    fn visible_text(&self, width: usize) -> String {
        let mut skipped = 0;
        let mut used = 0;
        let mut out = String::new();
        for c in self.content.chars() {
            let w = c.width().unwrap_or(0);
            if skipped < self.scroll {
                skipped += w;
                continue;
            }
            if used + w > width {
                break;
            }
            out.push(c);
            used += w;
        }
        out
    }

    /// Render into `area`, remembering its width for scrolling
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.pane_border(self.focused && !self.disabled));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.width != inner.width as usize {
            self.width = inner.width as usize;
            self.update_scroll();
        }

        let (text, style) = if self.content.is_empty() {
            let placeholder = if self.disabled && !self.disabled_placeholder.is_empty() {
                &self.disabled_placeholder
            } else {
                &self.placeholder
            };
            (placeholder.clone(), theme.dim_style())
        } else if self.disabled {
            (
                self.visible_text(self.width),
                theme.dim_style().add_modifier(Modifier::DIM),
            )
        } else {
            (self.visible_text(self.width), theme.base_style())
        };
        Paragraph::new(text).style(style).render(inner, buf);

        if self.focused && !self.disabled && inner.width > 0 {
            let x = self.cursor_column().saturating_sub(self.scroll);
            if x < inner.width as usize {
                if let Some(cell) = buf.cell_mut((inner.x + x as u16, inner.y)) {
                    cell.set_style(Style::default().bg(theme.accent));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.handle_action(&Action::Char(c));
        }
        input
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = typed("P1.1?");
        assert_eq!(input.content(), "P1.1?");
        assert!(input.handle_action(&Action::Backspace));
        assert_eq!(input.content(), "P1.1");
    }

    #[test]
    fn test_disabled_rejects_edits() {
        let mut input = typed("hello");
        input.set_disabled(true);
        assert!(!input.handle_action(&Action::Char('!')));
        assert!(!input.handle_action(&Action::ClearLine));
        assert_eq!(input.content(), "hello");

        input.set_disabled(false);
        assert!(input.handle_action(&Action::Char('!')));
        assert_eq!(input.content(), "hello!");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = typed("héllo");
        input.handle_action(&Action::Home);
        input.handle_action(&Action::Right);
        input.handle_action(&Action::Delete);
        assert_eq!(input.content(), "hllo");
    }

    #[test]
    fn test_delete_word() {
        let mut input = typed("what is D2.3  ");
        input.handle_action(&Action::DeleteWord);
        assert_eq!(input.content(), "what is ");
    }

    #[test]
    fn test_paste_collapses_newlines() {
        let mut input = InputBox::new();
        input.handle_action(&Action::Paste("line one\r\nline two".into()));
        assert_eq!(input.content(), "line one line two");
    }

    #[test]
    fn test_render_disabled_placeholder() {
        let theme = Theme::dark();
        let mut input = InputBox::new()
            .with_placeholder("Ask about a task")
            .with_disabled_placeholder("Waiting");
        input.set_disabled(true);
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        input.render(area, &mut buf, &theme);
        let row: String = (1..8).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "Waiting");
    }
}
