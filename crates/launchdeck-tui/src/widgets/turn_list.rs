//! Conversation view for the assistant panel

use crate::theme::Theme;
use crate::widgets::{markdown::render_markdown, spinner};
use launchdeck_assistant::ConversationTurn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::time::Instant;

/// Renders conversation turns top to bottom.
///
/// When `awaiting` is set the last model turn is treated as in progress: its
/// header carries a cursor, and while still empty it shows a typing indicator.
pub struct TurnList<'a> {
    turns: &'a [ConversationTurn],
    theme: &'a Theme,
    scroll: usize,
    awaiting: bool,
    animation_start: Option<Instant>,
}

impl<'a> TurnList<'a> {
    pub fn new(turns: &'a [ConversationTurn], theme: &'a Theme) -> Self {
        Self {
            turns,
            theme,
            scroll: 0,
            awaiting: false,
            animation_start: None,
        }
    }

    /// Lines to skip from the top
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Mark the last turn as still streaming
    pub fn awaiting(mut self, awaiting: bool) -> Self {
        self.awaiting = awaiting;
        self
    }

    pub fn animation_start(mut self, start: Instant) -> Self {
        self.animation_start = Some(start);
        self
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let frame = self
            .animation_start
            .map(|start| spinner::frame_at(start.elapsed()))
            .unwrap_or_else(|| spinner::frame_at(Default::default()));
        let last = self.turns.len().saturating_sub(1);
        self.turns
            .iter()
            .enumerate()
            .flat_map(|(i, turn)| {
                let in_progress = self.awaiting && i == last && !turn.is_user();
                turn_lines(turn, in_progress, self.theme, width, frame)
            })
            .collect()
    }
}

fn turn_lines(
    turn: &ConversationTurn,
    in_progress: bool,
    theme: &Theme,
    width: usize,
    frame: &str,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let content_width = width.saturating_sub(2).max(1);

    let (label, style) = if turn.is_user() {
        ("▶ You", theme.accent_bold())
    } else {
        ("◀ Assistant", theme.success_style().add_modifier(Modifier::BOLD))
    };
    let header = if in_progress {
        format!("{} ▌", label)
    } else {
        label.to_string()
    };
    lines.push(Line::from(Span::styled(header, style)));

    if turn.is_user() {
        for row in textwrap::wrap(&turn.text, content_width) {
            lines.push(Line::from(Span::styled(
                format!("  {}", row),
                theme.base_style(),
            )));
        }
    } else if turn.text.is_empty() && in_progress {
        lines.push(Line::from(Span::styled(
            format!("  {} thinking...", frame),
            Style::default().fg(theme.warning),
        )));
    } else {
        for line in render_markdown(&turn.text, theme, content_width) {
            let mut spans = vec![Span::raw("  ")];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::default());
    lines
}

impl Widget for TurnList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let visible: Vec<Line> = self
            .lines(area.width as usize)
            .into_iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .collect();
        // Lines are pre-wrapped so heights match calculate_height
        Paragraph::new(visible).render(area, buf);
    }
}

/// Total rendered height of `turns` at `width`
pub fn calculate_height(turns: &[ConversationTurn], width: usize, awaiting: bool) -> usize {
    let theme = Theme::default();
    TurnList::new(turns, &theme)
        .awaiting(awaiting)
        .lines(width)
        .len()
}

/// Scroll offset that shows the newest line at the bottom of a `height`-row view
pub fn bottom_scroll(turns: &[ConversationTurn], width: usize, height: usize, awaiting: bool) -> usize {
    calculate_height(turns, width, awaiting).saturating_sub(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(list: TurnList<'_>, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        list.render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_labels_and_content() {
        let theme = Theme::dark();
        let turns = vec![
            ConversationTurn::model("Hello!"),
            ConversationTurn::user("What is P1.1?"),
        ];
        let rows = rendered(TurnList::new(&turns, &theme), 30, 8);
        assert_eq!(rows[0], "◀ Assistant");
        assert_eq!(rows[1], "  Hello!");
        assert_eq!(rows[3], "▶ You");
        assert_eq!(rows[4], "  What is P1.1?");
    }

    #[test]
    fn test_empty_placeholder_shows_indicator() {
        let theme = Theme::dark();
        let turns = vec![ConversationTurn::user("hi"), ConversationTurn::model("")];
        let rows = rendered(TurnList::new(&turns, &theme).awaiting(true), 30, 8);
        assert_eq!(rows[3], "◀ Assistant ▌");
        assert!(rows[4].ends_with("thinking..."));
    }

    #[test]
    fn test_height_matches_render() {
        let turns = vec![
            ConversationTurn::model("Hello! I'm your AI Deployment Assistant."),
            ConversationTurn::user("How do I configure the origin certificate?"),
        ];
        let height = calculate_height(&turns, 20, false);
        let theme = Theme::dark();
        let rows = rendered(TurnList::new(&turns, &theme), 20, 40);
        let used = rows.iter().rposition(|r| !r.is_empty()).unwrap() + 1;
        // trailing separator line is blank
        assert_eq!(height, used + 1);
    }

    #[test]
    fn test_height_grows_with_streamed_text() {
        let short = vec![ConversationTurn::model("Hi")];
        let long = vec![ConversationTurn::model("Hi there, the plan has six sections")];
        assert!(calculate_height(&long, 16, true) > calculate_height(&short, 16, true));
        assert_eq!(bottom_scroll(&short, 16, 100, false), 0);
    }
}
