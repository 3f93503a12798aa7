//! Checklist body: sections with their tasks

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// A task row (borrowed)
#[derive(Debug, Clone, Copy)]
pub struct ChecklistItem<'a> {
    pub id: &'a str,
    pub action: &'a str,
    pub requirement: &'a str,
    pub refs: &'a str,
    pub completed: bool,
}

/// A section heading and its tasks (borrowed)
#[derive(Debug, Clone)]
pub struct ChecklistSection<'a> {
    pub icon: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub items: Vec<ChecklistItem<'a>>,
}

/// Scrolling checklist with a task cursor.
///
/// `selected` indexes tasks across all sections in display order. The view
/// scrolls itself so the selected task stays visible.
pub struct ChecklistView<'a> {
    sections: &'a [ChecklistSection<'a>],
    theme: &'a Theme,
    selected: usize,
    focused: bool,
}

impl<'a> ChecklistView<'a> {
    pub fn new(sections: &'a [ChecklistSection<'a>], theme: &'a Theme) -> Self {
        Self {
            sections,
            theme,
            selected: 0,
            focused: false,
        }
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Rendered lines plus the line index of the selected task
    fn lines(&self, width: usize) -> (Vec<Line<'static>>, usize) {
        let theme = self.theme;
        let text_width = width.saturating_sub(8).max(1);
        let mut lines = Vec::new();
        let mut cursor_line = 0;
        let mut task = 0;

        for (s, section) in self.sections.iter().enumerate() {
            if s > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", section.icon)),
                Span::styled(section.title.to_string(), theme.accent_bold()),
            ]));
            for row in textwrap::wrap(section.description, width.max(1)) {
                lines.push(Line::from(Span::styled(row.into_owned(), theme.dim_style())));
            }
            lines.push(Line::default());

            for item in &section.items {
                let is_selected = task == self.selected;
                if is_selected {
                    cursor_line = lines.len();
                }

                let (mark, mark_style) = if item.completed {
                    ("[x]", theme.success_style())
                } else {
                    ("[ ]", theme.dim_style())
                };
                let action_style = if item.completed {
                    theme.done_style()
                } else {
                    theme.base_style().add_modifier(Modifier::BOLD)
                };
                let pointer = if is_selected && self.focused { "› " } else { "  " };

                let mut header = Line::from(vec![
                    Span::styled(pointer, theme.accent_style()),
                    Span::styled(format!("{} ", mark), mark_style),
                    Span::styled(format!("{:<5} ", item.id), theme.dim_style()),
                    Span::styled(item.action.to_string(), action_style),
                    Span::styled(format!("  ({})", item.refs), theme.dim_style()),
                ]);
                if is_selected {
                    header = header.style(theme.selected_style());
                }
                lines.push(header);

                for row in textwrap::wrap(item.requirement, text_width) {
                    lines.push(Line::from(Span::styled(
                        format!("        {}", row),
                        theme.dim_style(),
                    )));
                }
                task += 1;
            }
        }
        (lines, cursor_line)
    }
}

impl Widget for ChecklistView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Checklist ")
            .title_style(self.theme.accent_bold())
            .borders(Borders::ALL)
            .border_style(self.theme.pane_border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (lines, cursor) = self.lines(inner.width as usize);
        let height = inner.height as usize;
        let max_offset = lines.len().saturating_sub(height);
        let offset = cursor.saturating_sub(height / 3).min(max_offset);

        let visible: Vec<Line> = lines.into_iter().skip(offset).take(height).collect();
        Paragraph::new(visible).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<ChecklistSection<'static>> {
        vec![ChecklistSection {
            icon: "🔑",
            title: "1. Prerequisites",
            description: "Verify the environment.",
            items: vec![
                ChecklistItem {
                    id: "P1.1",
                    action: "Provision VPS",
                    requirement: "Ubuntu 22.04+",
                    refs: "Guide Step 1",
                    completed: true,
                },
                ChecklistItem {
                    id: "P1.2",
                    action: "Install Tools",
                    requirement: "Docker, Git, SSH",
                    refs: "Guide Step 1",
                    completed: false,
                },
            ],
        }]
    }

    fn row_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_marks_and_cursor_line() {
        let theme = Theme::dark();
        let sections = sections();
        let view = ChecklistView::new(&sections, &theme).selected(1).focused(true);
        let (lines, cursor) = view.lines(60);

        assert_eq!(row_text(&lines[3]).trim_end(), "  [x] P1.1  Provision VPS  (Guide Step 1)");
        assert!(row_text(&lines[cursor]).starts_with("› [ ] P1.2"));
    }

    #[test]
    fn test_render_keeps_selection_visible() {
        let theme = Theme::dark();
        let sections = sections();
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);
        ChecklistView::new(&sections, &theme)
            .selected(1)
            .focused(true)
            .render(area, &mut buf);

        let screen: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("P1.2"));
    }
}
