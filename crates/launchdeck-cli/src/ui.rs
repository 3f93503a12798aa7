//! Dashboard TUI

use futures::StreamExt;
use launchdeck_assistant::{AssistantEvent, SessionManager, SessionState};
use launchdeck_tui::{
    Action, TerminalGuard, Theme,
    terminal::actions,
    widgets::{
        ChecklistItem, ChecklistSection, ChecklistView, InputBox, ProgressGauge, SectionBar,
        SectionChart, Spinner, TurnList, turn_list,
    },
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};
use std::time::{Duration, Instant};
use tokio::sync::broadcast::error::RecvError;

use crate::checklist::{Checklist, Metrics, Plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Checklist,
    Assistant,
}

/// Dashboard state
pub struct TuiState {
    checklist: Checklist,
    metrics: Metrics,
    title: String,
    tagline: String,
    /// Selected task, in display order across sections
    selected: usize,
    focus: Focus,
    assistant: SessionManager,
    input: InputBox,
    /// Conversation scroll; `usize::MAX` follows the newest line
    chat_scroll: usize,
    status: String,
    theme: Theme,
    spinner_start: Instant,
}

impl TuiState {
    pub fn new(assistant: SessionManager, plan: Plan, theme: Theme) -> Self {
        let input = InputBox::new()
            .with_placeholder("Ask about a task, e.g. \"What does P1.3 need?\"")
            .with_disabled_placeholder("Please wait...");
        Self {
            checklist: Checklist::new(plan.sections),
            metrics: plan.metrics,
            title: plan.name,
            tagline: plan.tagline,
            selected: 0,
            focus: Focus::Checklist,
            assistant,
            input,
            chat_scroll: usize::MAX,
            status: String::new(),
            theme,
            spinner_start: Instant::now(),
        }
    }

    /// Section holding the selected task
    fn active_section(&self) -> Option<usize> {
        self.checklist.task_at(self.selected).map(|(s, _)| s)
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.input.set_focused(focus == Focus::Assistant);
    }

    fn scroll_to_bottom(&mut self) {
        // Resolved during render against the content height
        self.chat_scroll = usize::MAX;
    }

    /// Apply an assistant event
    pub fn handle_assistant_event(&mut self, event: AssistantEvent) {
        match event {
            AssistantEvent::StateChanged { to, .. } => {
                self.input.set_disabled(!to.accepts_input());
                if to.is_busy() {
                    self.spinner_start = Instant::now();
                }
                if to == SessionState::Ready {
                    self.status.clear();
                }
            }
            AssistantEvent::PendingInputChanged { text } => {
                if text != self.input.content() {
                    self.input.set_content(text);
                }
            }
            AssistantEvent::VisibilityChanged { visible } => {
                self.set_focus(if visible {
                    Focus::Assistant
                } else {
                    Focus::Checklist
                });
            }
            AssistantEvent::Error { message, .. } => {
                self.status = message;
            }
            event if event.moves_transcript() => self.scroll_to_bottom(),
            _ => {}
        }
    }

    /// Handle a key action; returns false to quit
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::ToggleAssistant => {
                let assistant = self.assistant.clone();
                tokio::spawn(async move {
                    assistant.toggle().await;
                });
                return true;
            }
            Action::Tab | Action::BackTab if self.assistant.is_visible() => {
                let next = match self.focus {
                    Focus::Checklist => Focus::Assistant,
                    Focus::Assistant => Focus::Checklist,
                };
                self.set_focus(next);
                return true;
            }
            _ => {}
        }

        match self.focus {
            Focus::Checklist => self.handle_checklist_action(action),
            Focus::Assistant => self.handle_assistant_action(action),
        }
        true
    }

    fn handle_checklist_action(&mut self, action: Action) {
        let last = self.checklist.task_count().saturating_sub(1);
        match action {
            Action::Up => self.selected = self.selected.saturating_sub(1),
            Action::Down => self.selected = (self.selected + 1).min(last),
            Action::PageUp => self.selected = self.selected.saturating_sub(5),
            Action::PageDown => self.selected = (self.selected + 5).min(last),
            Action::Home => self.selected = 0,
            Action::End => self.selected = last,
            Action::Char(' ') | Action::Submit => {
                self.checklist.toggle_at(self.selected);
            }
            _ => {}
        }
    }

    fn handle_assistant_action(&mut self, action: Action) {
        match action {
            Action::Submit => {
                if self.assistant.state().accepts_input()
                    && !self.input.content().trim().is_empty()
                {
                    let assistant = self.assistant.clone();
                    tokio::spawn(async move {
                        assistant.submit_pending().await;
                    });
                }
            }
            Action::Escape => self.assistant.close(),
            Action::Up => self.scroll_chat(-1),
            Action::Down => self.scroll_chat(1),
            Action::PageUp => self.scroll_chat(-10),
            Action::PageDown => self.scroll_chat(10),
            action => {
                if self.input.handle_action(&action) {
                    self.assistant.set_pending_input(self.input.content());
                }
            }
        }
    }

    fn scroll_chat(&mut self, delta: isize) {
        // Render clamps overshoot back to the bottom
        self.chat_scroll = self.chat_scroll.saturating_add_signed(delta);
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let [body, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
            .areas(frame.area());

        let columns = if self.assistant.is_visible() {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(34),
                    Constraint::Min(40),
                    Constraint::Percentage(38),
                ])
                .split(body)
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(34), Constraint::Min(40)])
                .split(body)
        };

        self.render_sidebar(frame, columns[0]);
        self.render_main(frame, columns[1]);
        if let Some(panel) = columns.get(2) {
            self.render_assistant(frame, *panel);
        }
        self.render_status(frame, status);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let active = self.active_section();
        let mut lines = vec![
            Line::from(Span::styled(self.title.clone(), self.theme.accent_bold())),
            Line::from(Span::styled(self.tagline.clone(), self.theme.dim_style())),
            Line::default(),
        ];
        for (i, section) in self.checklist.sections().iter().enumerate() {
            let style = if Some(i) == active {
                self.theme.selected_style().fg(self.theme.accent)
            } else {
                self.theme.base_style()
            };
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", section.icon)),
                Span::styled(section.title.clone(), style),
            ]));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn render_main(&self, frame: &mut Frame, area: Rect) {
        let [header, list] =
            Layout::vertical([Constraint::Length(8), Constraint::Min(3)]).areas(area);
        let [left, middle, right] = Layout::horizontal([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .areas(header);

        let stats = self.checklist.progress();
        let [gauge, architecture] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(left);
        frame.render_widget(
            ProgressGauge::new(
                stats.percentage,
                stats.completed_tasks,
                stats.total_tasks,
                &self.theme,
            ),
            gauge,
        );
        self.render_architecture(frame, architecture);
        self.render_metrics(frame, middle);

        let sections = self.checklist.sections();
        let bars: Vec<SectionBar> = sections
            .iter()
            .zip(&stats.completed_by_section)
            .map(|(section, completed)| SectionBar {
                label: &section.title,
                completed: *completed,
                total: section.tasks.len(),
            })
            .collect();
        frame.render_widget(SectionChart::new(&bars, &self.theme), right);

        let view_sections: Vec<ChecklistSection> = sections
            .iter()
            .map(|section| ChecklistSection {
                icon: &section.icon,
                title: &section.title,
                description: &section.description,
                items: section
                    .tasks
                    .iter()
                    .map(|task| ChecklistItem {
                        id: &task.id,
                        action: &task.action,
                        requirement: &task.requirement,
                        refs: &task.refs,
                        completed: task.completed,
                    })
                    .collect(),
            })
            .collect();
        frame.render_widget(
            ChecklistView::new(&view_sections, &self.theme)
                .selected(self.selected)
                .focused(self.focus == Focus::Checklist),
            list,
        );
    }

    fn render_metrics(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Key Metrics ")
            .title_style(self.theme.accent_bold())
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());
        let m = &self.metrics;
        let row = |label: &str, value: &str| {
            Line::from(vec![
                Span::styled(format!("{}: ", label), self.theme.dim_style()),
                Span::styled(value.to_string(), self.theme.base_style()),
            ])
        };
        let lines = vec![
            row("Revenue streams", &m.revenue_streams),
            row("Y1", &m.y1_projection),
            row("Y3", &m.y3_projection),
            row("Compliance", &m.compliance_status),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_architecture(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let lines: Vec<Line> = self
            .metrics
            .architecture
            .iter()
            .map(|a| {
                Line::from(vec![
                    Span::styled(format!(" {}: ", a.label), self.theme.dim_style()),
                    Span::raw(a.detail.clone()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_assistant(&mut self, frame: &mut Frame, area: Rect) {
        let state = self.assistant.state();
        let block = Block::default()
            .title(format!(" AI Deployment Assistant │ {} ", state))
            .title_style(self.theme.accent_bold())
            .borders(Borders::ALL)
            .border_style(self.theme.pane_border(self.focus == Focus::Assistant));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [transcript, input] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(inner);

        let turns = self.assistant.turns();
        let awaiting = state == SessionState::AwaitingReply;

        let width = transcript.width as usize;
        let height = transcript.height as usize;
        let bottom = turn_list::bottom_scroll(&turns, width, height, awaiting);
        // usize::MAX and any overshoot land on the bottom
        self.chat_scroll = self.chat_scroll.min(bottom);

        if turns.is_empty() && state == SessionState::Priming {
            frame.render_widget(
                Spinner::new("Connecting...", &self.theme).with_start_time(self.spinner_start),
                transcript,
            );
        } else {
            frame.render_widget(
                TurnList::new(&turns, &self.theme)
                    .scroll(self.chat_scroll)
                    .awaiting(awaiting)
                    .animation_start(self.spinner_start),
                transcript,
            );
        }

        if bottom > 0 {
            let mut scrollbar_state = ScrollbarState::new(bottom + height)
                .position(self.chat_scroll)
                .viewport_content_length(height);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None)
                    .track_symbol(Some("│"))
                    .thumb_symbol("█"),
                transcript,
                &mut scrollbar_state,
            );
        }

        self.input.render(input, frame.buffer_mut(), &self.theme);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let help = if self.assistant.is_visible() {
            "Ctrl+A: hide assistant │ Tab: focus │ Space: toggle │ Ctrl+Q: quit"
        } else {
            "Ctrl+A: assistant │ ↑↓: select │ Space: toggle │ Ctrl+Q: quit"
        };
        let left = if self.status.is_empty() {
            Span::styled(
                format!("assistant {}", self.assistant.state()),
                self.theme.dim_style(),
            )
        } else {
            Span::styled(self.status.clone(), self.theme.error_style())
        };

        let left_width = left.width();
        let right_width = help.chars().count();
        let available = area.width as usize;
        let line = if left_width + right_width + 2 <= available {
            Line::from(vec![
                left,
                Span::raw(" ".repeat(available - left_width - right_width)),
                Span::styled(help, self.theme.dim_style()),
            ])
        } else {
            Line::from(left)
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Run the dashboard until the user quits
pub async fn run_tui(assistant: SessionManager, plan: Plan, theme: Theme) -> anyhow::Result<()> {
    let mut assistant_rx = assistant.subscribe();
    let mut state = TuiState::new(assistant, plan, theme);

    let mut terminal = TerminalGuard::enter()?;
    let mut actions = std::pin::pin!(actions());
    let mut tick_interval = tokio::time::interval(Duration::from_millis(80));

    loop {
        terminal.draw(|frame| state.render(frame))?;

        tokio::select! {
            biased;

            event = assistant_rx.recv() => match event {
                Ok(event) => state.handle_assistant_event(event),
                Err(RecvError::Lagged(skipped)) => {
                    // Rendering reads turns from the manager; resync what events drive
                    tracing::debug!(skipped, "Assistant events lagged");
                    state.input.set_content(state.assistant.pending_input());
                    state.input.set_disabled(!state.assistant.state().accepts_input());
                    state.scroll_to_bottom();
                }
                Err(RecvError::Closed) => {}
            },

            action = actions.next() => match action {
                Some(Ok(action)) => {
                    if !state.handle_action(action) {
                        break;
                    }
                }
                Some(Err(e)) => return Err(anyhow::anyhow!("Event error: {}", e)),
                None => break,
            },

            _ = tick_interval.tick() => {}
        }
    }

    Ok(())
}
