//! Markdown rendering for assistant replies

use crate::theme::Theme;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

/// Render markdown into styled lines no wider than `width` columns.
///
/// Words are never split; a single word wider than `width` overflows. Partial
/// markdown (an unterminated code fence mid-stream) renders as far as it parses.
pub fn render_markdown(text: &str, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut renderer = Renderer::new(theme, width.max(1));
    for event in Parser::new(text) {
        renderer.event(event);
    }
    renderer.finish()
}

struct Renderer<'t> {
    theme: &'t Theme,
    width: usize,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    /// Prefix for the first wrapped line of the current block
    lead: Option<Span<'static>>,
    styles: Vec<Style>,
    /// Next ordinal per open list, `None` for bullets
    lists: Vec<Option<u64>>,
    code: Option<String>,
}

impl<'t> Renderer<'t> {
    fn new(theme: &'t Theme, width: usize) -> Self {
        Self {
            theme,
            width,
            lines: Vec::new(),
            spans: Vec::new(),
            lead: None,
            styles: vec![theme.base_style()],
            lists: Vec::new(),
            code: None,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, f: impl FnOnce(Style) -> Style) {
        let next = f(self.style());
        self.styles.push(next);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn indent(&self) -> usize {
        self.lists.len() * 2
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => match self.code.as_mut() {
                Some(code) => code.push_str(&text),
                None => {
                    let style = self.style();
                    self.spans.push(Span::styled(text.into_string(), style));
                }
            },
            Event::Code(code) => {
                let style = self.theme.code_style().add_modifier(Modifier::BOLD);
                self.spans.push(Span::styled(format!("`{}`", code), style));
            }
            Event::SoftBreak => {
                let style = self.style();
                self.spans.push(Span::styled(" ", style));
            }
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                let rule = "─".repeat(self.width.min(40));
                self.lines.push(Line::from(Span::styled(rule, self.theme.dim_style())));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.blank();
                let heading = match level {
                    HeadingLevel::H1 => self
                        .theme
                        .accent_bold()
                        .add_modifier(Modifier::UNDERLINED),
                    HeadingLevel::H2 => self.theme.accent_bold(),
                    _ => self.theme.accent_style(),
                };
                self.styles.push(heading);
            }
            Tag::Paragraph => self.flush(),
            Tag::CodeBlock(_) => {
                self.flush();
                self.code = Some(String::new());
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.lead = Some(Span::styled(
                    format!("{}{}", "  ".repeat(depth), marker),
                    self.theme.dim_style(),
                ));
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.push_style(|s| s.add_modifier(Modifier::ITALIC));
            }
            Tag::Emphasis => self.push_style(|s| s.add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(|s| s.add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self.push_style(|s| s.add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { .. } => {
                let link = self.theme.link;
                self.push_style(|s| s.fg(link).add_modifier(Modifier::UNDERLINED));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.flush();
                self.pop_style();
            }
            TagEnd::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.lines.push(Line::default());
                }
            }
            TagEnd::CodeBlock => {
                let code = self.code.take().unwrap_or_default();
                let style = self.theme.code_style();
                let room = self.width.saturating_sub(2);
                for line in code.lines() {
                    self.lines.push(Line::from(Span::styled(
                        format!("  {}", truncate(line, room)),
                        style,
                    )));
                }
                self.lines.push(Line::default());
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.lines.push(Line::default());
                }
            }
            TagEnd::Item => self.flush(),
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.pop_style();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.pop_style();
            }
            _ => {}
        }
    }

    /// Wrap the pending spans into lines
    fn flush(&mut self) {
        if self.spans.is_empty() {
            if let Some(lead) = self.lead.take() {
                self.lines.push(Line::from(lead));
            }
            return;
        }

        let spans = std::mem::take(&mut self.spans);
        let lead = self.lead.take();
        let hang = match &lead {
            Some(lead) => lead.width(),
            None => self.indent(),
        };
        let room = self.width.saturating_sub(hang).max(1);

        let mut rows = wrap_spans(spans, room).into_iter();
        if let Some(first) = rows.next() {
            let mut line = vec![lead.unwrap_or_else(|| Span::raw(" ".repeat(hang)))];
            line.extend(first);
            self.lines.push(Line::from(line));
        }
        for row in rows {
            let mut line = vec![Span::raw(" ".repeat(hang))];
            line.extend(row);
            self.lines.push(Line::from(line));
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        if let Some(code) = self.code.take() {
            let style = self.theme.code_style();
            for line in code.lines() {
                self.lines
                    .push(Line::from(Span::styled(format!("  {}", line), style)));
            }
        }
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Greedy word wrap over styled spans
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Vec<Span<'static>>> {
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in spans {
        for word in span.content.split_inclusive(' ') {
            let visible = word.trim_end().width();
            if used > 0 && used + visible > width {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            if used == 0 && word.trim().is_empty() {
                continue;
            }
            used += word.width();
            row.push(Span::styled(word.to_string(), span.style));
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

fn truncate(line: &str, width: usize) -> String {
    if line.width() <= width {
        return line.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in line.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
