//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws from
//! AppState but never modifies it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap};

use super::state::{AppState, ConfirmDialog, IntentField, ReflectionField, StuckOverlay};
use crate::domain::{StepKind, format_secs};
use crate::session::{STUCK_REASONS, Stage};

/// Status colors
mod colors {
    use ratatui::style::Color;

    pub const ACCENT: Color = Color::Rgb(99, 102, 241); // Indigo
    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const DIM: Color = Color::DarkGray;
    pub const DONE: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const EMERGENCY: Color = Color::Rgb(255, 215, 0); // Gold
    pub const DANGER: Color = Color::Rgb(220, 20, 60); // Crimson

    pub const PHYSICAL_RESET: Color = Color::Rgb(255, 165, 0); // Orange
    pub const PHYSIOLOGICAL_RESET: Color = Color::Rgb(64, 224, 208); // Teal
    pub const PHYSICAL_START: Color = Color::Rgb(123, 104, 238); // Indigo
    pub const ACTION: Color = Color::White;
}

/// Color for a step kind (mirrors the original card colors)
fn kind_color(kind: StepKind) -> Color {
    match kind {
        StepKind::PhysicalReset => colors::PHYSICAL_RESET,
        StepKind::PhysiologicalReset => colors::PHYSIOLOGICAL_RESET,
        StepKind::PhysicalStart => colors::PHYSICAL_START,
        StepKind::Action => colors::ACTION,
    }
}

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    match state.stage {
        Stage::Intent => render_intent(state, frame, chunks[1]),
        Stage::BreakdownLoading => render_loading(state, frame, chunks[1]),
        Stage::RoutePreview => render_preview(state, frame, chunks[1]),
        Stage::Execution => render_execution(state, frame, chunks[1]),
        Stage::Summary => render_summary(state, frame, chunks[1]),
        Stage::Reflection => render_reflection(state, frame, chunks[1]),
        Stage::Archive => render_archive(state, frame, chunks[1]),
    }

    render_footer(state, frame, chunks[2]);

    if let Some(stuck) = &state.stuck {
        render_stuck_overlay(stuck, frame, frame.area());
    }
    if let Some(dialog) = &state.confirm {
        render_confirm_dialog(dialog, frame, frame.area());
    }
}

/// Render header with app name and stage breadcrumb
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let stage_label = match state.stage {
        Stage::Intent => "意图",
        Stage::BreakdownLoading => "生成中",
        Stage::RoutePreview => "路线预览",
        Stage::Execution => "执行",
        Stage::Summary => "复盘",
        Stage::Reflection => "反思",
        Stage::Archive => "路线库",
    };

    let spans = vec![
        Span::raw(" "),
        Span::styled("滚雪球", Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD)),
        Span::styled(" snowball", Style::default().fg(colors::DIM)),
        Span::raw(" │ "),
        Span::styled(stage_label, Style::default().fg(colors::ACCENT)),
    ];

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Context-sensitive keybind footer
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let binds: &[(&str, &str)] = if state.confirm.is_some() {
        &[("←/→", "选择"), ("Enter", "确认"), ("Esc", "取消")]
    } else if state.stuck.is_some() {
        &[("↑/↓", "选择原因"), ("输入", "其他原因"), ("Enter", "调整计划"), ("Esc", "关闭")]
    } else {
        match state.stage {
            Stage::Intent => &[("Tab", "切换输入"), ("Enter", "开始滚动"), ("Ctrl+A", "路线库"), ("Ctrl+C", "退出")],
            Stage::BreakdownLoading => &[("", "请稍候...")],
            Stage::RoutePreview => &[("Enter", "冲！"), ("r", "换个思路"), ("Esc", "返回修改"), ("q", "退出")],
            Stage::Execution => &[("Enter/空格", "完成了"), ("s", "卡住了"), ("Esc", "放弃")],
            Stage::Summary => &[("Enter", "下一步")],
            Stage::Reflection => &[("↑/↓", "切换"), ("←/→", "调整"), ("Enter", "保存路线")],
            Stage::Archive => &[("↑/↓", "选择"), ("Enter", "一键复用"), ("d", "删除"), ("n", "新建"), ("q", "退出")],
        }
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (keybind, label)) in binds.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(colors::DIM)));
        }
        if !keybind.is_empty() {
            spans.push(Span::styled(*keybind, Style::default().fg(colors::KEYBIND)));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(*label, Style::default().fg(Color::Gray)));
    }

    if let Some(error) = &state.error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(error.clone(), Style::default().fg(colors::DANGER)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Intent form: the two text inputs
fn render_intent(state: &AppState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // title
            Constraint::Length(3), // current input
            Constraint::Length(3), // target input
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled("滚雪球", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled("动能始于微末。", Style::default().fg(colors::DIM))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let focus_style = Style::default().fg(colors::ACCENT);
    let blur_style = Style::default().fg(colors::DIM);

    let current_focused = state.intent.field == IntentField::Current;
    let current = Paragraph::new(input_line(&state.intent.current, "刷抖音，躺在床上发呆...", current_focused))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 我现在正在... ")
                .border_style(if current_focused { focus_style } else { blur_style }),
        );
    frame.render_widget(current, chunks[1]);

    let target_focused = state.intent.field == IntentField::Target;
    let target = Paragraph::new(input_line(&state.intent.target, "去健身房，写数学作业...", target_focused)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 但我想要... ")
            .border_style(if target_focused { focus_style } else { blur_style }),
    );
    frame.render_widget(target, chunks[2]);
}

/// An input line with placeholder and cursor marker
fn input_line(value: &str, placeholder: &str, focused: bool) -> Line<'static> {
    if value.is_empty() {
        Line::from(Span::styled(placeholder.to_string(), Style::default().fg(colors::DIM)))
    } else {
        let mut spans = vec![Span::raw(value.to_string())];
        if focused {
            spans.push(Span::styled("▌", Style::default().fg(colors::ACCENT)));
        }
        Line::from(spans)
    }
}

/// Loading screen with rotating tips
fn render_loading(state: &AppState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Percentage(40),
        ])
        .split(area);

    let tip = Paragraph::new(vec![
        Line::from(Span::styled("◌ ◍ ●", Style::default().fg(colors::ACCENT))),
        Line::from(Span::styled(state.current_tip(), Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(tip, chunks[1]);
}

/// Route preview: the numbered step timeline
fn render_preview(state: &AppState, frame: &mut Frame, area: Rect) {
    let Some(route) = &state.route else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .margin(1)
        .split(area);

    let heading = Paragraph::new(Line::from(vec![
        Span::styled("你的路线", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  滚雪球逻辑为你生成了 {} 个步骤。", route.steps.len()),
            Style::default().fg(colors::DIM),
        ),
    ]));
    frame.render_widget(heading, chunks[0]);

    let items: Vec<ListItem> = route
        .steps
        .iter()
        .enumerate()
        .skip(state.preview_scroll)
        .map(|(idx, step)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:>2}. ", idx + 1), Style::default().fg(colors::DIM)),
                Span::styled(step.kind.icon().to_string(), Style::default()),
                Span::raw(" "),
                Span::styled(step.instruction.clone(), Style::default().fg(kind_color(step.kind))),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    frame.render_widget(list, chunks[1]);
}

/// Execution: progress gauge plus the current step card
fn render_execution(state: &AppState, frame: &mut Frame, area: Rect) {
    let Some(walker) = &state.walker else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // progress
            Constraint::Min(7),    // step card
            Constraint::Length(2), // elapsed
        ])
        .margin(1)
        .split(area);

    let (completed, total) = walker.progress();
    let ratio = if total == 0 { 0.0 } else { completed as f64 / total as f64 };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(colors::ACCENT))
        .ratio(ratio)
        .label(format!("{} / {}", completed, total));
    frame.render_widget(gauge, chunks[0]);

    if let Some(step) = walker.current_step() {
        let mut lines = vec![
            Line::default(),
            Line::from(Span::raw(step.kind.icon().to_string())).alignment(Alignment::Center),
            Line::default(),
            Line::from(Span::styled(
                step.instruction.clone(),
                Style::default().fg(kind_color(step.kind)).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        ];
        if step.emergency {
            lines.push(Line::default());
            lines.push(
                Line::from(Span::styled("(调整后的步骤)", Style::default().fg(colors::EMERGENCY)))
                    .alignment(Alignment::Center),
            );
        }

        let card = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(kind_color(step.kind))));
        frame.render_widget(card, chunks[1]);
    }

    let elapsed = state.step_started.map(|t| t.elapsed().as_secs()).unwrap_or(0);
    let timer = Paragraph::new(Line::from(Span::styled(
        format!("本步已用时 {}", format_secs(elapsed)),
        Style::default().fg(colors::DIM),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(timer, chunks[2]);
}

/// Summary: total time and per-step seconds
fn render_summary(state: &AppState, frame: &mut Frame, area: Rect) {
    let Some(route) = &state.finished_route else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .margin(1)
        .split(area);

    let total = Paragraph::new(vec![
        Line::from(Span::styled("客观复盘", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled("启动总耗时 ", Style::default().fg(colors::DIM)),
            Span::styled(
                format_secs(route.total_time_secs()),
                Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(total, chunks[0]);

    let items: Vec<ListItem> = route
        .steps
        .iter()
        .map(|step| {
            let marker = if step.completed { "✓" } else { "⊘" };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", marker), Style::default().fg(colors::DONE)),
                Span::raw(step.instruction.clone()),
                Span::styled(
                    format!("  {}", format_secs(step.time_spent_secs)),
                    Style::default().fg(colors::DIM),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" 执行清单 "));
    frame.render_widget(list, chunks[1]);
}

/// Reflection: three sliders plus the self-talk input
fn render_reflection(state: &AppState, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(3), // focus
            Constraint::Length(3), // mood
            Constraint::Length(3), // energy
            Constraint::Length(3), // self talk
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let title = Paragraph::new(vec![Line::from(vec![
        Span::styled("任务完成", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  现在感觉如何？", Style::default().fg(colors::DIM)),
    ])]);
    frame.render_widget(title, chunks[0]);

    render_slider(frame, chunks[1], "大脑清醒", "昏沉", "清醒", state.reflection.focus,
        state.reflection.field == ReflectionField::Focus);
    render_slider(frame, chunks[2], "情绪状态", "糟糕", "愉快", state.reflection.mood,
        state.reflection.field == ReflectionField::Mood);
    render_slider(frame, chunks[3], "精力水平", "累了", "精神", state.reflection.energy,
        state.reflection.field == ReflectionField::Energy);

    let note_focused = state.reflection.field == ReflectionField::SelfTalk;
    let note = Paragraph::new(input_line(
        &state.reflection.self_talk,
        "开始动起来之后其实没那么难...",
        note_focused,
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 给自己的一句话 ")
            .border_style(if note_focused {
                Style::default().fg(colors::ACCENT)
            } else {
                Style::default().fg(colors::DIM)
            }),
    );
    frame.render_widget(note, chunks[4]);
}

/// A single 0-100 slider row
fn render_slider(frame: &mut Frame, area: Rect, label: &str, low: &str, high: &str, value: u8, focused: bool) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ({} → {}) ", label, low, high))
                .border_style(if focused {
                    Style::default().fg(colors::ACCENT)
                } else {
                    Style::default().fg(colors::DIM)
                }),
        )
        .gauge_style(Style::default().fg(if focused { colors::ACCENT } else { colors::DIM }))
        .percent(value as u16)
        .label(format!("{}", value));
    frame.render_widget(gauge, area);
}

/// Archive: saved routes, newest first
fn render_archive(state: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" 路线库 ");

    if state.archive.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "暂无保存的路线。按 n 新建。",
            Style::default().fg(colors::DIM),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .archive
        .routes()
        .iter()
        .enumerate()
        .map(|(idx, route)| {
            let selected = idx == state.archive_selected;
            let style = if selected {
                Style::default().bg(Color::Rgb(40, 40, 40))
            } else {
                Style::default()
            };

            let mut lines = vec![Line::from(vec![
                Span::styled(
                    route.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD).fg(if selected {
                        colors::ACCENT
                    } else {
                        Color::White
                    }),
                ),
                Span::styled(format!("  {} 步", route.steps.len()), Style::default().fg(colors::DONE)),
                Span::styled(
                    format!("  {}", format_secs(route.total_time_secs())),
                    Style::default().fg(colors::DIM),
                ),
            ])];
            lines.push(Line::from(Span::styled(
                format!("  状态: {}", route.current_status),
                Style::default().fg(colors::DIM),
            )));
            if let Some(reflection) = &route.reflection
                && !reflection.self_talk.is_empty()
            {
                lines.push(Line::from(Span::styled(
                    format!("  \"{}\"", reflection.self_talk),
                    Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
                )));
            }

            ListItem::new(lines).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Stuck overlay: preset reasons plus free text
fn render_stuck_overlay(stuck: &StuckOverlay, frame: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup);

    let mut lines = vec![Line::from(Span::styled(
        "遇到了什么困难？",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::default());

    for (idx, reason) in STUCK_REASONS.iter().enumerate() {
        let selected = stuck.custom.is_empty() && idx == stuck.selected;
        let marker = if selected { "●" } else { "○" };
        let style = if selected {
            Style::default().fg(colors::ACCENT)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(format!(" {} {}", marker, reason), style)));
    }

    lines.push(Line::default());
    let custom_display = if stuck.custom.is_empty() {
        Span::styled("或者输入其他原因...", Style::default().fg(colors::DIM))
    } else {
        Span::styled(format!("{}▌", stuck.custom), Style::default().fg(colors::ACCENT))
    };
    lines.push(Line::from(custom_display));

    if stuck.loading {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "调整计划中...",
            Style::default().fg(colors::EMERGENCY),
        )));
    }

    let popup_widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" 卡住了 / 做不到 "));
    frame.render_widget(popup_widget, popup);
}

/// Confirmation dialog overlay
fn render_confirm_dialog(dialog: &ConfirmDialog, frame: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup);

    let yes_style = if dialog.selected_yes {
        Style::default().fg(Color::Black).bg(colors::DANGER)
    } else {
        Style::default().fg(Color::Gray)
    };
    let no_style = if dialog.selected_yes {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::Black).bg(colors::ACCENT)
    };

    let lines = vec![
        Line::from(Span::raw(dialog.message.clone())),
        Line::default(),
        Line::from(vec![
            Span::styled("  否  ", no_style),
            Span::raw("   "),
            Span::styled("  是  ", yes_style),
        ])
        .alignment(Alignment::Center),
    ];

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" 确认 "));
    frame.render_widget(widget, popup);
}

/// Helper to create a centered rect using percentages of the available area
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &AppState) -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(state, f)).unwrap();
        terminal
    }

    #[test]
    fn test_render_intent_stage() {
        let state = AppState::new();
        let terminal = draw(&state);
        let buffer = terminal.backend().buffer().clone();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("滚雪球"));
        assert!(content.contains("我现在正在"));
    }

    #[test]
    fn test_render_all_stages_no_panic() {
        use crate::domain::{Route, Step, StepKind};
        use crate::session::Walker;

        let mut state = AppState::new();
        let route = Route::new("刷手机", "写报告", vec![Step::new("第一步", StepKind::Action)]);

        for stage in [
            Stage::Intent,
            Stage::BreakdownLoading,
            Stage::RoutePreview,
            Stage::Execution,
            Stage::Summary,
            Stage::Reflection,
            Stage::Archive,
        ] {
            state.stage = stage;
            state.route = Some(route.clone());
            state.walker = Some(Walker::new(route.clone()));
            state.finished_route = Some(route.clone());
            draw(&state);
        }
    }

    #[test]
    fn test_render_overlays_no_panic() {
        let mut state = AppState::new();
        state.stuck = Some(StuckOverlay::new());
        draw(&state);

        state.stuck = None;
        state.confirm = Some(ConfirmDialog::delete_route("id"));
        draw(&state);
    }

    #[test]
    fn test_centered_rect_within_bounds() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert!(popup.width <= 60);
        assert!(popup.x >= 20);
    }
}
