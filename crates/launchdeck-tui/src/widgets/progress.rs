//! Completion gauge and per-section chart

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

/// Overall completion with a bar
pub struct ProgressGauge<'a> {
    percentage: u16,
    completed: usize,
    total: usize,
    theme: &'a Theme,
}

impl<'a> ProgressGauge<'a> {
    pub fn new(percentage: u16, completed: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            percentage: percentage.min(100),
            completed,
            total,
            theme,
        }
    }
}

impl Widget for ProgressGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Overall Progress ")
            .title_style(self.theme.accent_bold())
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let [summary, bar] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
            .areas(inner);
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{}% ", self.percentage), self.theme.accent_bold()),
            Span::styled(
                format!("{} of {} tasks complete", self.completed, self.total),
                self.theme.dim_style(),
            ),
        ]))
        .render(summary, buf);

        Gauge::default()
            .gauge_style(self.theme.accent_style())
            .percent(self.percentage)
            .label("")
            .render(bar, buf);
    }
}

/// One bar in the section chart
#[derive(Debug, Clone, Copy)]
pub struct SectionBar<'a> {
    pub label: &'a str,
    pub completed: usize,
    pub total: usize,
}

/// Horizontal bars of completed tasks per section
pub struct SectionChart<'a> {
    bars: &'a [SectionBar<'a>],
    theme: &'a Theme,
}

impl<'a> SectionChart<'a> {
    pub fn new(bars: &'a [SectionBar<'a>], theme: &'a Theme) -> Self {
        Self { bars, theme }
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let label_width = self
            .bars
            .iter()
            .map(|b| short_label(b.label).chars().count())
            .max()
            .unwrap_or(0);
        // label, space, bar, space, "n/m"
        let bar_width = width.saturating_sub(label_width + 7).max(1);

        self.bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let filled = if bar.total == 0 {
                    0
                } else {
                    (bar.completed * bar_width / bar.total).min(bar_width)
                };
                Line::from(vec![
                    Span::styled(
                        format!("{:<w$} ", short_label(bar.label), w = label_width),
                        self.theme.dim_style(),
                    ),
                    Span::styled(
                        "█".repeat(filled),
                        self.theme.base_style().fg(self.theme.series_color(i)),
                    ),
                    Span::styled("░".repeat(bar_width - filled), self.theme.dim_style()),
                    Span::raw(format!(" {}/{}", bar.completed, bar.total)),
                ])
            })
            .collect()
    }
}

/// First word of a section title, e.g. "1." from "1. Prerequisites"
fn short_label(title: &str) -> &str {
    title.split_whitespace().next().unwrap_or(title)
}

impl Widget for SectionChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Completion by Category ")
            .title_style(self.theme.accent_bold())
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 {
            return;
        }
        Paragraph::new(self.lines(inner.width as usize)).render(inner, buf);
    }
}
