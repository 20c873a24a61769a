use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;

use elecdash_core::actions::HostAction;
use elecdash_core::actions::UserAction;
use elecdash_core::bus::BusEvent;
use elecdash_core::bus::CommandBus;
use elecdash_core::bus::CommandEvent;
use elecdash_core::bus::NavigationCommand;
use elecdash_core::dialogs::resolve_dialog;
use elecdash_core::hierarchy::breadcrumb;
use elecdash_core::hierarchy::depth_of;
use elecdash_core::hierarchy::parent_of;
use elecdash_core::hierarchy::DepthClass;
use elecdash_core::hierarchy::HUB_VIEWS;
use elecdash_core::loader::DialogMount;
use elecdash_core::loader::ViewSlot;
use elecdash_core::navigation::Transition;
use elecdash_core::state::DashboardState;
use elecdash_core::views::view_spec;
use elecdash_core::views::ViewId;
use elecdash_core::views::ALL_VIEWS;
use elecdash_core::views::ROOT_VIEW;
use elecdash_exec::coordinator::Coordinator;

const SLIDE_FRAMES: u16 = 4;
const SLIDE_STEP: u16 = 3;

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

pub fn run(mut coordinator: Coordinator, bus: CommandBus) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
    let _guard = TuiGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut coordinator, &bus);
    coordinator.teardown();
    result.map_err(|e| e.into())
}

/// Shell-local presentation state; the engine state lives in the coordinator.
struct ShellUi {
    sidebar: Vec<ViewId>,
    selected: usize,
    input: String,
    notice: Option<String>,
    slide: Option<(Transition, u16)>,
    seen_activity: Option<u64>,
}

impl ShellUi {
    fn new(current: ViewId) -> Self {
        let sidebar = sidebar_order();
        let selected = sidebar.iter().position(|view| *view == current).unwrap_or(0);
        Self {
            sidebar,
            selected,
            input: String::new(),
            notice: None,
            slide: None,
            seen_activity: None,
        }
    }

    fn selected_view(&self) -> ViewId {
        self.sidebar.get(self.selected).copied().unwrap_or(ROOT_VIEW)
    }

    /// Starts a slide whenever a new transition has been recorded.
    fn observe(&mut self, coordinator: &Coordinator) {
        let latest = coordinator.state().activity.last().map(|entry| entry.seq);
        if latest != self.seen_activity {
            self.seen_activity = latest;
            if let Some(transition) = coordinator.last_transition() {
                self.slide = Some((transition, SLIDE_FRAMES));
                if let Some(idx) = self.sidebar.iter().position(|view| *view == transition.to) {
                    self.selected = idx;
                }
            }
        }
    }

    fn tick_slide(&mut self) {
        self.slide = match self.slide.take() {
            Some((transition, frames)) if frames > 1 => Some((transition, frames - 1)),
            _ => None,
        };
    }
}

/// Root, then each hub followed by its leaves, then leaves hanging off the root.
fn sidebar_order() -> Vec<ViewId> {
    let mut order = vec![ROOT_VIEW];
    for hub in HUB_VIEWS {
        order.push(hub);
        order.extend(ALL_VIEWS.iter().copied().filter(|view| parent_of(*view) == hub));
    }
    order.extend(
        ALL_VIEWS
            .iter()
            .copied()
            .filter(|view| parent_of(*view) == ROOT_VIEW && depth_of(*view) == DepthClass::Leaf),
    );
    order
}

/// Reads a typed line the way the voice agent would phrase it.
fn parse_command(input: &str) -> Option<BusEvent> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('{') {
        return BusEvent::parse_line(trimmed).ok();
    }
    let lowered = trimmed.to_lowercase();
    let event = match lowered.as_str() {
        "back" | "go back" => NavigationCommand::Back.into(),
        "home" | "go home" => NavigationCommand::Home.into(),
        "refresh" | "reload" => NavigationCommand::Refresh.into(),
        "close" | "close all" | "closeall" | "close dialogs" => CommandEvent::CloseAll.into(),
        _ => match lowered.strip_prefix("open ") {
            Some(rest) if resolve_dialog(rest).is_some() => CommandEvent::open(rest).into(),
            _ => NavigationCommand::navigate(trimmed).into(),
        },
    };
    Some(event)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyHandlerResult {
    Continue,
    Quit,
}

fn handle_key_event(
    key: event::KeyEvent,
    shell: &mut ShellUi,
    coordinator: &mut Coordinator,
    bus: &CommandBus,
) -> KeyHandlerResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return KeyHandlerResult::Quit,
        KeyCode::Char('r') if ctrl => coordinator.dispatch(UserAction::RetryView),
        KeyCode::F(5) => coordinator.dispatch(UserAction::Refresh),
        KeyCode::Up => shell.selected = shell.selected.saturating_sub(1),
        KeyCode::Down => {
            shell.selected = (shell.selected + 1).min(shell.sidebar.len().saturating_sub(1));
        }
        KeyCode::Esc => {
            if let Some(dialog) = coordinator.state().open_dialogs().first().copied() {
                coordinator.dispatch(UserAction::DismissDialog(dialog));
            } else {
                shell.input.clear();
            }
        }
        KeyCode::Backspace if shell.input.is_empty() => coordinator.dispatch(HostAction::Back),
        KeyCode::Backspace => {
            shell.input.pop();
        }
        KeyCode::Enter if shell.input.trim().is_empty() => {
            coordinator.dispatch(UserAction::SelectView(shell.selected_view()));
        }
        KeyCode::Enter => {
            let line = std::mem::take(&mut shell.input);
            match parse_command(&line) {
                Some(event) => {
                    bus.emit(event);
                    shell.notice = None;
                }
                None => shell.notice = Some(format!("not a command: {line}")),
            }
        }
        KeyCode::Char(ch) if !ctrl => shell.input.push(ch),
        _ => {}
    }
    KeyHandlerResult::Continue
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    coordinator: &mut Coordinator,
    bus: &CommandBus,
) -> io::Result<()> {
    let mut shell = ShellUi::new(coordinator.state().current_view());

    loop {
        coordinator.pump();
        shell.observe(coordinator);
        terminal.draw(|f| ui(f, coordinator.state(), &shell))?;

        if event::poll(Duration::from_millis(80))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && handle_key_event(key, &mut shell, coordinator, bus) == KeyHandlerResult::Quit
                {
                    return Ok(());
                }
            }
        } else {
            // One acquisition per idle tick keeps the loading placeholder visible.
            coordinator.settle_next();
            shell.tick_slide();
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct UiPalette {
    accent: Color,
    muted: Color,
    border: Color,
    warning: Color,
    error: Color,
    panel_bg: Color,
}

const PALETTE: UiPalette = UiPalette {
    accent: Color::Rgb(250, 204, 21),
    muted: Color::Rgb(148, 163, 184),
    border: Color::Rgb(71, 85, 105),
    warning: Color::Rgb(251, 146, 60),
    error: Color::Rgb(248, 113, 113),
    panel_bg: Color::Rgb(15, 23, 42),
};

fn ui(f: &mut ratatui::Frame, state: &DashboardState, shell: &ShellUi) {
    let palette = PALETTE;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], state, palette);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Min(20),
            Constraint::Length(36),
        ])
        .split(chunks[1]);
    render_sidebar(f, columns[0], state, shell, palette);
    render_view_slot(f, columns[1], state, shell, palette);
    render_activity(f, columns[2], state, palette);

    let input_title = match &shell.notice {
        Some(notice) => format!("Command | {notice}"),
        None => "Command".to_string(),
    };
    let input = Paragraph::new(format!("> {}", shell.input)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(input_title),
    );
    f.render_widget(input, chunks[2]);

    let footer = Line::from(vec![
        Span::styled("↑↓", Style::default().fg(palette.accent)),
        Span::styled(" select  ", Style::default().fg(palette.muted)),
        Span::styled("Enter", Style::default().fg(palette.accent)),
        Span::styled(" go/send  ", Style::default().fg(palette.muted)),
        Span::styled("⌫", Style::default().fg(palette.accent)),
        Span::styled(" back  ", Style::default().fg(palette.muted)),
        Span::styled("F5", Style::default().fg(palette.accent)),
        Span::styled(" refresh  ", Style::default().fg(palette.muted)),
        Span::styled("^R", Style::default().fg(palette.accent)),
        Span::styled(" retry  ", Style::default().fg(palette.muted)),
        Span::styled("Esc", Style::default().fg(palette.accent)),
        Span::styled(" close form  ", Style::default().fg(palette.muted)),
        Span::styled("^C", Style::default().fg(palette.warning)),
        Span::styled(" quit", Style::default().fg(palette.muted)),
    ]);
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[3]);

    render_dialogs(f, state, palette);
}

fn render_header(f: &mut ratatui::Frame, area: Rect, state: &DashboardState, palette: UiPalette) {
    let trail: Vec<&str> = breadcrumb(state.current_view())
        .into_iter()
        .map(|view| view.label())
        .collect();
    let arrow = match state.nav.last_direction() {
        elecdash_core::navigation::Direction::Forward => "»",
        elecdash_core::navigation::Direction::Backward => "«",
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled("Elecdash ", Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{arrow} "), Style::default().fg(palette.muted)),
        Span::raw(trail.join(" / ")),
        Span::styled(format!("   {}", state.location()), Style::default().fg(palette.muted)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );
    f.render_widget(header, area);
}

fn render_sidebar(
    f: &mut ratatui::Frame,
    area: Rect,
    state: &DashboardState,
    shell: &ShellUi,
    palette: UiPalette,
) {
    let current = state.current_view();
    let items: Vec<ListItem> = shell
        .sidebar
        .iter()
        .map(|view| {
            let indent = "  ".repeat(usize::from(depth_of(*view).as_u8()));
            let style = if *view == current {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(format!("{indent}{}", view.label()), style)))
        })
        .collect();
    let mut list_state = ListState::default();
    list_state.select(Some(shell.selected));
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title("Sections"),
        )
        .highlight_style(Style::default().bg(palette.border));
    f.render_stateful_widget(list, area, &mut list_state);
}

/// Shifts the content toward the edge it enters from while a slide runs.
fn slide_area(area: Rect, slide: Option<(Transition, u16)>) -> Rect {
    let Some((transition, frames)) = slide else {
        return area;
    };
    let shift = (frames * SLIDE_STEP).min(area.width / 2);
    let enter_from = transition.direction.animation().enter_from;
    if enter_from.offset() > 0 {
        Rect {
            x: area.x + shift,
            width: area.width - shift,
            ..area
        }
    } else {
        Rect {
            width: area.width - shift,
            ..area
        }
    }
}

fn render_view_slot(
    f: &mut ratatui::Frame,
    area: Rect,
    state: &DashboardState,
    shell: &ShellUi,
    palette: UiPalette,
) {
    let spec = view_spec(state.current_view());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.panel_bg))
        .title(spec.title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = match &state.view_slot {
        ViewSlot::Empty => vec![Line::from("")],
        ViewSlot::Pending { .. } => vec![Line::styled(
            format!("Loading {}…", spec.title),
            Style::default().fg(palette.muted),
        )],
        ViewSlot::Ready { content, .. } => {
            let mut lines = vec![Line::styled(
                content.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            lines.push(Line::from(""));
            lines.extend(content.body.iter().map(|row| Line::from(row.clone())));
            lines
        }
        ViewSlot::Failed { reason, .. } => vec![
            Line::styled(
                format!("{} failed to load", spec.title),
                Style::default().fg(palette.error),
            ),
            Line::from(reason.clone()),
            Line::from(""),
            Line::styled(
                "Ctrl-R retries; other sections still work.",
                Style::default().fg(palette.muted),
            ),
        ],
    };
    let body = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(body, slide_area(inner, shell.slide));
}

fn render_activity(f: &mut ratatui::Frame, area: Rect, state: &DashboardState, palette: UiPalette) {
    let rows = usize::from(area.height.saturating_sub(2));
    let items: Vec<ListItem> = state
        .activity
        .iter()
        .rev()
        .take(rows)
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("#{:<3} ", entry.seq), Style::default().fg(palette.muted)),
                Span::raw(format!("{} → {}", entry.from, entry.to)),
                Span::styled(
                    format!(" {} {}", entry.direction.label(), entry.trigger.label()),
                    Style::default().fg(palette.muted),
                ),
            ]))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title("Activity"),
    );
    f.render_widget(list, area);
}

fn render_dialogs(f: &mut ratatui::Frame, state: &DashboardState, palette: UiPalette) {
    let open = state.open_dialogs();
    let Some(top) = open.first().copied() else {
        return;
    };
    let area = centered_rect(50, 40, f.area());
    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = match state.dialog_mounts.get(top) {
        DialogMount::Unmounted | DialogMount::Acquiring { .. } => {
            vec![Line::styled("Loading form…", Style::default().fg(palette.muted))]
        }
        DialogMount::Mounted { content, .. } => {
            content.body.iter().map(|row| Line::from(row.clone())).collect()
        }
        DialogMount::Failed { reason, .. } => vec![
            Line::styled("Form failed to load", Style::default().fg(palette.error)),
            Line::from(reason.clone()),
        ],
    };
    if open.len() > 1 {
        let others: Vec<String> = open[1..].iter().map(ToString::to_string).collect();
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("Also open: {}", others.join(", ")),
            Style::default().fg(palette.muted),
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled("[Esc] Close", Style::default().fg(palette.accent)));

    let block = Block::default()
        .title(top.title())
        .borders(Borders::ALL)
        .style(Style::default().bg(palette.panel_bg).fg(Color::White))
        .border_style(Style::default().fg(palette.accent));
    let text = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);
    f.render_widget(text, area);
}

fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    r: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
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
    use elecdash_core::navigation::Trigger;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sidebar_lists_every_view_once_under_its_hub() {
        let order = sidebar_order();
        assert_eq!(order.len(), ALL_VIEWS.len());
        for view in ALL_VIEWS {
            assert_eq!(order.iter().filter(|v| **v == view).count(), 1, "{view}");
        }
        let team = order.iter().position(|v| *v == ViewId::Team).unwrap();
        let people = order.iter().position(|v| *v == ViewId::PeopleHub).unwrap();
        let finance = order.iter().position(|v| *v == ViewId::FinanceHub).unwrap();
        assert!(people < team && team < finance);
        assert_eq!(order.last(), Some(&ViewId::Settings));
    }

    #[test]
    fn typed_lines_become_bus_events() {
        assert_eq!(parse_command("back"), Some(NavigationCommand::Back.into()));
        assert_eq!(parse_command("Close All"), Some(CommandEvent::CloseAll.into()));
        assert_eq!(
            parse_command("open create-invoice"),
            Some(CommandEvent::open("create-invoice").into())
        );
        assert_eq!(
            parse_command("open quotes"),
            Some(NavigationCommand::navigate("open quotes").into())
        );
        assert_eq!(
            parse_command(r#"{"event":"dialog","detail":{"kind":"closeAll"}}"#),
            Some(CommandEvent::CloseAll.into())
        );
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn slide_shifts_toward_entry_edge_and_settles() {
        let area = Rect::new(0, 0, 40, 10);
        let forward = Transition {
            from: ViewId::Overview,
            to: ViewId::Team,
            direction: elecdash_core::navigation::Direction::Forward,
            trigger: Trigger::User,
        };
        let backward = Transition {
            direction: elecdash_core::navigation::Direction::Backward,
            ..forward
        };
        let shifted_forward = slide_area(area, Some((forward, 2)));
        let shifted_backward = slide_area(area, Some((backward, 2)));
        assert_eq!(shifted_forward.width, 34);
        assert_eq!(shifted_backward.width, 34);
        assert_ne!(shifted_forward.x, shifted_backward.x);
        assert_eq!(slide_area(area, None), area);
    }
}
