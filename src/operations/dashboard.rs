use crate::config::Settings;
use crate::error::{Error, Result};
use crate::models::budget::MonthlyBudget;
use crate::models::category::Category;
use crate::models::expense::format_money;
use crate::operations::add::add_expense;
use crate::operations::budget::{current_budget, set_budget};
use crate::operations::history::{EMPTY_HISTORY, spending_history};
use crate::operations::remove::remove_last_expense;
use crate::operations::summary::{Summary, summarize};
use crate::store::Stores;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Modifier, Rect, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::io;
use tracing::debug;

const TOTAL_COLOR: Color = Color::Rgb(0xFF, 0xC0, 0xCB);
const REMAINING_COLOR: Color = Color::Rgb(0x90, 0xEE, 0x90);
const DAYS_COLOR: Color = Color::Rgb(0x5D, 0xAD, 0xE2);
const DAILY_COLOR: Color = Color::Rgb(0xFF, 0xCC, 0x99);

const BAR_PALETTE: [Color; 9] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightMagenta,
    Color::LightYellow,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Budget,
    Name,
    Amount,
    Category,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Budget => Focus::Name,
            Focus::Name => Focus::Amount,
            Focus::Amount => Focus::Category,
            Focus::Category => Focus::Budget,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Budget => Focus::Category,
            Focus::Name => Focus::Budget,
            Focus::Amount => Focus::Name,
            Focus::Category => Focus::Amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Success,
    Failure,
    Removal,
}

impl StatusKind {
    fn color(self) -> Color {
        match self {
            StatusKind::Success => Color::Green,
            StatusKind::Failure => Color::Red,
            StatusKind::Removal => Color::Yellow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Status {
    text: String,
    kind: StatusKind,
}

pub struct DashboardState {
    stores: Stores,
    history_limit: usize,
    clock: fn() -> NaiveDate,

    focus: Focus,
    budget_input: String,
    name_input: String,
    amount_input: String,
    category: Category,

    status: Option<Status>,
    budget: MonthlyBudget,
    history: Vec<String>,
    summary: Summary,

    should_quit: bool,
}

impl DashboardState {
    pub fn new(stores: Stores, settings: &Settings, clock: fn() -> NaiveDate) -> Result<Self> {
        let budget = current_budget(&stores.budget);
        let summary = summarize(&[], budget, clock())?;
        let mut state = Self {
            stores,
            history_limit: settings.history_limit,
            clock,
            focus: Focus::Name,
            budget_input: String::new(),
            name_input: String::new(),
            amount_input: String::new(),
            category: Category::default(),
            status: None,
            budget,
            history: Vec::new(),
            summary,
            should_quit: false,
        };
        state.refresh()?;
        Ok(state)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Re-reads both files and recomputes the summary.
    fn refresh(&mut self) -> Result<()> {
        self.budget = current_budget(&self.stores.budget);
        self.history = spending_history(&self.stores.expenses, self.history_limit)?;
        let expenses = self.stores.expenses.read_all()?;
        self.summary = summarize(&expenses, self.budget, (self.clock)())?;
        Ok(())
    }

    fn refresh_or_report(&mut self) {
        if let Err(e) = self.refresh() {
            self.fail(&e);
        }
    }

    fn succeed(&mut self, text: &str, kind: StatusKind) {
        self.status = Some(Status {
            text: text.to_string(),
            kind,
        });
    }

    fn fail(&mut self, error: &Error) {
        debug!(error = %error, "dashboard action failed");
        self.status = Some(Status {
            text: format!("❌ {}", error),
            kind: StatusKind::Failure,
        });
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => self.remove_last(),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Enter => match self.focus {
                Focus::Budget => self.submit_budget(),
                _ => self.submit_expense(),
            },
            KeyCode::Left if self.focus == Focus::Category => {
                self.category = self.category.previous()
            }
            KeyCode::Right if self.focus == Focus::Category => self.category = self.category.next(),
            KeyCode::Backspace => {
                if let Some(input) = self.focused_input() {
                    input.pop();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(input) = self.focused_input() {
                    input.push(c);
                }
            }
            _ => {}
        }
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Budget => Some(&mut self.budget_input),
            Focus::Name => Some(&mut self.name_input),
            Focus::Amount => Some(&mut self.amount_input),
            Focus::Category => None,
        }
    }

    fn submit_budget(&mut self) {
        if let Err(e) = self.stores.paths.ensure_base_dir() {
            self.fail(&e);
            return;
        }
        match set_budget(&self.stores.budget, &self.budget_input) {
            Ok(_) => {
                self.budget_input.clear();
                self.succeed("✅ Budget updated!", StatusKind::Success);
                self.refresh_or_report();
            }
            Err(e) => self.fail(&e),
        }
    }

    fn submit_expense(&mut self) {
        if let Err(e) = self.stores.paths.ensure_base_dir() {
            self.fail(&e);
            return;
        }
        match add_expense(
            &self.stores.expenses,
            &self.name_input,
            &self.amount_input,
            self.category,
        ) {
            Ok(_) => {
                self.name_input.clear();
                self.amount_input.clear();
                self.category = Category::default();
                self.succeed("✅ Expense added successfully!", StatusKind::Success);
                self.refresh_or_report();
            }
            Err(e) => self.fail(&e),
        }
    }

    fn remove_last(&mut self) {
        match remove_last_expense(&self.stores.expenses) {
            Ok(_) => {
                self.succeed("🗑️ Last expense removed.", StatusKind::Removal);
                self.refresh_or_report();
            }
            Err(e) => self.fail(&e),
        }
    }
}

/// Runs the interactive dashboard until the user exits.
pub fn run_dashboard(stores: Stores, settings: &Settings) -> Result<()> {
    stores.paths.ensure_base_dir()?;
    let mut state = DashboardState::new(stores, settings, || chrono::Local::now().date_naive())?;

    enable_raw_mode().map_err(|e| Error::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| Error::Terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let result = (|| -> Result<()> {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)
            .map_err(|e| Error::Terminal(format!("Failed to initialize terminal: {}", e)))?;

        while !state.should_quit() {
            terminal
                .draw(|frame| render(frame, &state))
                .map_err(|e| Error::Terminal(format!("Failed to draw terminal UI: {}", e)))?;

            if event::poll(std::time::Duration::from_millis(250))
                .map_err(|e| Error::Terminal(format!("Failed to poll input: {}", e)))?
            {
                match event::read()
                    .map_err(|e| Error::Terminal(format!("Failed to read input: {}", e)))?
                {
                    Event::Key(key) if key.kind == KeyEventKind::Press => state.handle_key(key),
                    _ => {}
                }
            }
        }

        Ok(())
    })();

    let raw_mode = disable_raw_mode()
        .map_err(|e| Error::Terminal(format!("Failed to disable raw mode: {}", e)));
    let screen = execute!(io::stdout(), LeaveAlternateScreen)
        .map_err(|e| Error::Terminal(format!("Failed to leave alternate screen: {}", e)));

    first_error(result, [raw_mode, screen])
}

/// The loop's own error wins, then the first failed restore step.
fn first_error(result: Result<()>, restores: [Result<()>; 2]) -> Result<()> {
    restores.into_iter().fold(result, |acc, step| acc.and(step))
}

fn render(frame: &mut ratatui::Frame, state: &DashboardState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(40)])
        .split(frame.area());

    render_sidebar(frame, columns[0], state);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(state.history_limit as u16 + 2),
            Constraint::Min(8),
        ])
        .split(columns[1]);

    render_status(frame, main[0], state);
    render_history(frame, main[1], state);

    let summary_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main[2]);
    let summary_left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(summary_area[0]);

    render_headline(frame, summary_left[0], &state.summary);
    render_category_totals(frame, summary_left[1], &state.summary);
    render_bar_chart(frame, summary_area[1], &state.summary);
}

fn field_line<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default().fg(Color::Black).bg(Color::LightBlue)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{:<9}", label), Style::default().fg(Color::Gray)),
        Span::styled(format!(" {} ", value), style),
    ])
}

fn render_sidebar(frame: &mut ratatui::Frame, area: Rect, state: &DashboardState) {
    let heading = Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Edit...", heading)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Monthly Budget: ${}", format_money(state.budget.amount)),
            bold,
        )),
        field_line("Budget", state.budget_input.clone(), state.focus == Focus::Budget),
        Line::from(""),
        Line::from(Span::styled("Add Expense:", bold)),
        field_line("Name", state.name_input.clone(), state.focus == Focus::Name),
        field_line("Amount", state.amount_input.clone(), state.focus == Focus::Amount),
        field_line(
            "Category",
            format!("< {} >", state.category),
            state.focus == Focus::Category,
        ),
        Line::from(""),
        Line::from(Span::styled("Tab      next field", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled("Enter    save / add", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled("←/→      category", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled("Ctrl+R   remove last", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled("Esc      exit", Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut ratatui::Frame, area: Rect, state: &DashboardState) {
    let line = match &state.status {
        Some(status) => Line::from(Span::styled(
            status.text.clone(),
            Style::default().fg(status.kind.color()),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_history(frame: &mut ratatui::Frame, area: Rect, state: &DashboardState) {
    let lines: Vec<Line> = if state.history.is_empty() {
        vec![Line::from(EMPTY_HISTORY)]
    } else {
        state.history.iter().map(|l| Line::from(l.as_str())).collect()
    };
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Spending History").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_headline(frame: &mut ratatui::Frame, area: Rect, summary: &Summary) {
    let colors = [TOTAL_COLOR, REMAINING_COLOR, DAYS_COLOR, DAILY_COLOR];
    let lines: Vec<Line> = summary
        .headline_lines()
        .into_iter()
        .zip(colors)
        .map(|(text, color)| Line::from(Span::styled(text, Style::default().fg(color))))
        .collect();
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_category_totals(frame: &mut ratatui::Frame, area: Rect, summary: &Summary) {
    let block = Block::default().title("By Category").borders(Borders::ALL);
    let lines: Vec<Line> = summary
        .category_lines()
        .into_iter()
        .map(Line::from)
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Length in cells of a bar for `amount`, scaled so `max` fills `width`.
fn bar_length(amount: Decimal, max: Decimal, width: usize) -> usize {
    if max <= Decimal::ZERO || amount <= Decimal::ZERO || width == 0 {
        return 0;
    }
    let ratio = (amount / max).to_f64().unwrap_or(0.0).clamp(0.0, 1.0);
    // any positive amount gets at least one cell
    ((ratio * width as f64).round() as usize).max(1)
}

fn render_bar_chart(frame: &mut ratatui::Frame, area: Rect, summary: &Summary) {
    let block = Block::default()
        .title("Expenses by Category")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if summary.by_category.is_empty() {
        let empty = Paragraph::new("No expenses recorded yet.").alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let label_width = summary
        .by_category
        .iter()
        .map(|(c, _)| c.label().len())
        .max()
        .unwrap_or(0);
    let max_amount = summary
        .by_category
        .iter()
        .map(|(_, amount)| *amount)
        .max()
        .unwrap_or(Decimal::ZERO);
    let value_width = format_money(max_amount).len() + 2;
    let bar_width = (inner.width as usize).saturating_sub(label_width + value_width + 2);

    let lines: Vec<Line> = summary
        .by_category
        .iter()
        .enumerate()
        .map(|(idx, (category, amount))| {
            let color = BAR_PALETTE[idx % BAR_PALETTE.len()];
            Line::from(vec![
                Span::raw(format!("{:>width$} ", category.label(), width = label_width)),
                Span::styled(
                    "█".repeat(bar_length(*amount, max_amount, bar_width)),
                    Style::default().fg(color),
                ),
                Span::raw(format!(" ${}", format_money(*amount))),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
