//! Ratatui-based terminal dashboard.
//!
//! One tab for the overview plus one per available breakdown axis. The
//! document is fetched on a background thread so the UI stays responsive;
//! every fetch carries a generation number and only the newest one is applied.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, warn};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::data::MarketDataClient;
use crate::data::catalog::Dashboard;
use crate::domain::{Axis, CrossTab, MarketData, Orientation, ReportConfig, SegmentData, UnitScale};
use crate::error::{AppError, EXIT_USAGE};
use crate::metrics::{cross_tab, segment_shares};
use crate::report::{DrillDown, Kpis, fmt_pct, related_axis};

mod plotters_chart;

use plotters_chart::{TrendChart, TrendLine, chart_bounds, series_color};

/// Start the TUI for `dashboard`.
pub fn run(dashboard: &'static Dashboard, source: Option<String>, config: ReportConfig) -> Result<(), AppError> {
    let client = MarketDataClient::from_env(source.as_deref())?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(dashboard, client, config);
    app.reload();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_USAGE, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// What the dashboard is currently showing.
#[derive(Debug)]
enum LoadState {
    Loading,
    Failed(String),
    Loaded(MarketData),
}

struct FetchResult {
    generation: u64,
    result: Result<MarketData, AppError>,
}

/// Runs fetches off the UI thread and hands back only the newest result.
///
/// Dropping the loader drops the receiver, so a fetch that finishes after the
/// dashboard closed has nowhere to deliver and is discarded.
struct Loader {
    generation: u64,
    tx: Sender<FetchResult>,
    rx: Receiver<FetchResult>,
}

impl Loader {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { generation: 0, tx, rx }
    }

    /// Start a fetch, superseding any fetch still in flight.
    fn start<F>(&mut self, job: F)
    where
        F: FnOnce() -> Result<MarketData, AppError> + Send + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = job();
            if tx.send(FetchResult { generation, result }).is_err() {
                debug!("fetch {generation} finished after the dashboard closed");
            }
        });
    }

    /// The newest fetch's result, if it has arrived. Stale results are dropped.
    fn poll(&mut self) -> Option<Result<MarketData, AppError>> {
        while let Ok(msg) = self.rx.try_recv() {
            if msg.generation == self.generation {
                return Some(msg.result);
            }
            debug!("discarding stale fetch {} (current {})", msg.generation, self.generation);
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Overview,
    Axis(Axis),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Chart,
    Table,
}

struct App {
    dashboard: &'static Dashboard,
    client: MarketDataClient,
    config: ReportConfig,
    state: LoadState,
    loader: Loader,
    tab: usize,
    view: View,
    selected: usize,
    cross_tab: usize,
    drill: Option<DrillDown>,
    status: String,
}

impl App {
    fn new(dashboard: &'static Dashboard, client: MarketDataClient, config: ReportConfig) -> Self {
        Self {
            dashboard,
            client,
            config,
            state: LoadState::Loading,
            loader: Loader::new(),
            tab: 0,
            view: View::Chart,
            selected: 0,
            cross_tab: 0,
            drill: None,
            status: String::new(),
        }
    }

    fn reload(&mut self) {
        self.state = LoadState::Loading;
        self.drill = None;
        self.status = format!("Loading {}...", self.dashboard.title);

        let client = self.client.clone();
        let dashboard = self.dashboard;
        self.loader.start(move || client.load_dashboard(dashboard));
    }

    /// Apply a finished fetch; returns true when the screen changed.
    fn poll_fetch(&mut self) -> bool {
        let Some(result) = self.loader.poll() else {
            return false;
        };
        match result {
            Ok(data) => {
                if let Some(first) = data.first_year() {
                    if !data.years.contains(&self.config.selected_year) {
                        warn!("year {} not in document, showing {first}", self.config.selected_year);
                        self.config.selected_year = first;
                    }
                }
                self.status = format!(
                    "Loaded {} years at {}",
                    data.years.len(),
                    chrono::Local::now().format("%H:%M:%S")
                );
                self.state = LoadState::Loaded(data);
                self.clamp_tab();
            }
            Err(err) => {
                self.status = "Press r to retry.".to_string();
                self.state = LoadState::Failed(err.message().to_string());
            }
        }
        true
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.poll_fetch() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_USAGE, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_USAGE, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_USAGE, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('r') => self.reload(),
            KeyCode::Esc => self.drill = None,
            _ => {}
        }

        let LoadState::Loaded(data) = &self.state else {
            return false;
        };
        let tab_count = tabs(data).len();

        match code {
            KeyCode::Tab => self.switch_tab((self.tab + 1) % tab_count),
            KeyCode::BackTab => self.switch_tab((self.tab + tab_count - 1) % tab_count),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if idx < tab_count {
                    self.switch_tab(idx);
                }
            }
            KeyCode::Left => self.step_year(-1),
            KeyCode::Right => self.step_year(1),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                let count = self.list_segments().map_or(0, |(_, s)| s.len());
                if self.selected + 1 < count {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => self.open_drill(),
            KeyCode::Char('v') => {
                self.view = match self.view {
                    View::Chart => View::Table,
                    View::Table => View::Chart,
                };
            }
            KeyCode::Char('c') => {
                let count = self.tables().len();
                if count > 0 {
                    self.cross_tab = (self.cross_tab + 1) % count;
                }
            }
            KeyCode::Char('u') => {
                self.config.unit = match self.config.unit {
                    UnitScale::Millions => UnitScale::Billions,
                    UnitScale::Billions => UnitScale::Millions,
                };
            }
            _ => {}
        }
        false
    }

    fn switch_tab(&mut self, idx: usize) {
        self.tab = idx;
        self.selected = 0;
        self.cross_tab = 0;
        self.drill = None;
    }

    fn clamp_tab(&mut self) {
        if let LoadState::Loaded(data) = &self.state {
            if self.tab >= tabs(data).len() {
                self.switch_tab(0);
            }
        }
    }

    fn step_year(&mut self, delta: i32) {
        let LoadState::Loaded(data) = &self.state else {
            return;
        };
        if let Some(year) = step_year(&data.years, self.config.selected_year, delta) {
            self.config.selected_year = year;
        }
    }

    fn current_tab(&self) -> Tab {
        match &self.state {
            LoadState::Loaded(data) => tabs(data).get(self.tab).copied().unwrap_or(Tab::Overview),
            _ => Tab::Overview,
        }
    }

    /// Axis whose segments fill the selection list on the current tab.
    fn list_axis(&self) -> Option<Axis> {
        let LoadState::Loaded(data) = &self.state else {
            return None;
        };
        match self.current_tab() {
            Tab::Axis(axis) => Some(axis),
            Tab::Overview => data.available_axes().first().copied(),
        }
    }

    fn list_segments(&self) -> Option<(Axis, &[SegmentData])> {
        let LoadState::Loaded(data) = &self.state else {
            return None;
        };
        let axis = self.list_axis()?;
        data.axis(axis).map(|segments| (axis, segments))
    }

    /// Cross-tabs shown under the current axis tab that exist in the document.
    fn tables(&self) -> Vec<CrossTab> {
        let (LoadState::Loaded(data), Tab::Axis(axis)) = (&self.state, self.current_tab()) else {
            return Vec::new();
        };
        CrossTab::for_axis(axis)
            .into_iter()
            .filter(|&t| data.cross_tab(t).is_some_and(|m| !m.is_empty()))
            .collect()
    }

    fn open_drill(&mut self) {
        let Some((_, segments)) = self.list_segments() else {
            return;
        };
        if let Some(segment) = segments.get(self.selected) {
            self.drill = Some(DrillDown::compute(&segment.name, &segment.data, &self.config));
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        match &self.state {
            LoadState::Loading => {
                let msg = Paragraph::new(format!("Loading {}...", self.dashboard.title))
                    .style(Style::default().fg(Color::Yellow))
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(msg, chunks[1]);
            }
            LoadState::Failed(message) => {
                let text = Text::from(vec![
                    Line::from(Span::styled(
                        message.as_str(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::raw(""),
                    Line::raw("Press r to retry or q to quit."),
                ]);
                let p = Paragraph::new(text)
                    .wrap(Wrap { trim: false })
                    .block(Block::default().title("Error").borders(Borders::ALL));
                frame.render_widget(p, chunks[1]);
            }
            LoadState::Loaded(data) => {
                self.draw_body(frame, chunks[1], data);
                if let Some(drill) = &self.drill {
                    self.draw_drill(frame, size, data, drill);
                }
            }
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let title = Line::from(vec![
            Span::styled("mdash", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | {}", self.dashboard.title)),
        ]);
        frame.render_widget(Paragraph::new(title), rows[0]);

        let LoadState::Loaded(data) = &self.state else {
            return;
        };

        let titles: Vec<Line> = tabs(data)
            .iter()
            .map(|tab| Line::from(self.tab_title(*tab)))
            .collect();
        let bar = Tabs::new(titles)
            .select(self.tab)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));
        frame.render_widget(bar, rows[1]);

        let kpis = Kpis::compute(data, &self.config);
        let unit = self.config.unit;
        let line = Line::from(vec![
            Span::styled(format!("< {} >", kpis.selected_year), Style::default().fg(Color::Yellow)),
            Span::raw(format!(
                "  market {}  |  CAGR {}-{} {}  |  {} forecast {}  |  {}",
                unit.format(kpis.market_size),
                kpis.base_year,
                kpis.forecast_year,
                fmt_pct(Some(kpis.cagr)),
                kpis.forecast_year,
                unit.format(kpis.forecast_value),
                unit.label(),
            )),
        ]);
        frame.render_widget(Paragraph::new(line), rows[2]);
    }

    fn tab_title(&self, tab: Tab) -> String {
        match tab {
            Tab::Overview => "Overview".to_string(),
            Tab::Axis(axis) => self.dashboard.label(axis).to_string(),
        }
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect, data: &MarketData) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(12)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(rows[0]);

        match self.view {
            View::Chart => self.draw_chart(frame, top[0], data),
            View::Table => self.draw_trend_table(frame, top[0], data),
        }
        self.draw_segments(frame, top[1], data);

        match self.current_tab() {
            Tab::Overview => self.draw_related(frame, rows[1], data),
            Tab::Axis(_) => self.draw_cross_tab(frame, rows[1], data),
        }
    }

    fn trend_lines(&self, data: &MarketData) -> Vec<TrendLine> {
        let unit = self.config.unit;
        let to_points = |series: &[crate::domain::YearlyData]| {
            series
                .iter()
                .map(|p| (f64::from(p.year), unit.scale(p.value)))
                .collect::<Vec<_>>()
        };
        match self.current_tab() {
            Tab::Overview => vec![TrendLine {
                name: "Total market".to_string(),
                points: to_points(&data.total_market),
            }],
            Tab::Axis(axis) => data
                .axis(axis)
                .unwrap_or_default()
                .iter()
                .map(|s| TrendLine { name: s.name.clone(), points: to_points(&s.data) })
                .collect(),
        }
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, data: &MarketData) {
        let block = Block::default().title("Trend").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let lines = self.trend_lines(data);
        if lines.iter().all(|l| l.points.is_empty()) {
            frame.render_widget(
                Paragraph::new("No data.").style(Style::default().fg(Color::Yellow)),
                inner,
            );
            return;
        }
        let (x_bounds, y_bounds) = chart_bounds(&lines);

        // Legend on the last row; the chart gets the rest.
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let highlight = match self.current_tab() {
            Tab::Axis(_) => Some(self.selected),
            Tab::Overview => None,
        };
        let (chart_rect, insets) = chart_layout(parts[0]);
        let widget = TrendChart {
            lines: &lines,
            highlight,
            x_bounds,
            y_bounds,
            y_label: self.config.unit.label(),
        };
        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, parts[0], chart_rect, insets, x_bounds, y_bounds, self.config.unit);
        }

        let legend: Vec<Span> = lines
            .iter()
            .enumerate()
            .flat_map(|(idx, line)| {
                let color = if Some(idx) == highlight { Color::White } else { series_color(idx) };
                [
                    Span::styled("■ ", Style::default().fg(color)),
                    Span::raw(format!("{}  ", line.name)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(legend)), parts[1]);
    }

    fn draw_trend_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect, data: &MarketData) {
        let unit = self.config.unit;
        let text = match self.current_tab() {
            Tab::Overview => crate::report::format_market_series(data, unit),
            Tab::Axis(axis) => {
                let segments = data.axis(axis).unwrap_or_default();
                let mut text = crate::report::format_trend(data, segments, unit);
                text.push('\n');
                text.push_str(&crate::report::format_comparison(
                    segments,
                    self.config.base_year,
                    self.config.forecast_year,
                    unit,
                ));
                text
            }
        };
        let p = Paragraph::new(text).block(Block::default().title("Table").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_segments(&self, frame: &mut ratatui::Frame<'_>, area: Rect, data: &MarketData) {
        let Some(axis) = self.list_axis() else {
            return;
        };
        let segments = data.axis(axis).unwrap_or_default();
        let unit = self.config.unit;

        let items: Vec<ListItem> = segment_shares(segments, self.config.selected_year)
            .into_iter()
            .enumerate()
            .map(|(idx, s)| {
                ListItem::new(Line::from(vec![
                    Span::styled("■ ", Style::default().fg(series_color(idx))),
                    Span::raw(format!("{:<20} {:>11} {:>6.1}%", s.name, unit.format(s.value), s.share)),
                ]))
            })
            .collect();

        let title = format!("{} ({})", self.dashboard.label(axis), self.config.selected_year);
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        if !segments.is_empty() {
            state.select(Some(self.selected.min(segments.len() - 1)));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_related(&self, frame: &mut ratatui::Frame<'_>, area: Rect, data: &MarketData) {
        let Some(list_axis) = self.list_axis() else {
            return;
        };
        let axis = related_axis(list_axis);
        let segments = data.axis(axis).unwrap_or_default();
        let text = crate::report::format_distribution(segments, self.config.selected_year, self.config.unit);
        let title = format!("{} ({})", self.dashboard.label(axis), self.config.selected_year);
        let p = Paragraph::new(text).block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_cross_tab(&self, frame: &mut ratatui::Frame<'_>, area: Rect, data: &MarketData) {
        let tables = self.tables();
        let Some(&table) = tables.get(self.cross_tab) else {
            let p = Paragraph::new("No cross-tabs for this breakdown.")
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().title("Cross-tab").borders(Borders::ALL));
            frame.render_widget(p, area);
            return;
        };

        let bars = cross_tab(data, table, Orientation::Stored, self.config.selected_year);
        let text = crate::report::format_cross_tab(self.dashboard, table, Orientation::Stored, &bars, &self.config);
        let title = format!("Cross-tab {}/{} (c to cycle)", self.cross_tab + 1, tables.len());
        let p = Paragraph::new(text).block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_drill(&self, frame: &mut ratatui::Frame<'_>, size: Rect, data: &MarketData, drill: &DrillDown) {
        let area = centered_rect(70, 80, size);
        let related = match self.current_tab() {
            Tab::Overview => self.list_axis().and_then(|axis| {
                let other = related_axis(axis);
                data.axis(other).map(|segments| (self.dashboard.label(other), segments))
            }),
            Tab::Axis(_) => None,
        };
        let text = crate::report::format_drill_down(drill, related, &self.config);

        frame.render_widget(Clear, area);
        let p = Paragraph::new(text)
            .block(Block::default().title("Drill-down (Esc to close)").borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab switch  ←/→ year  ↑/↓ select  Enter drill  v chart/table  c cross-tab  u unit  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Overview first, then one tab per axis that has segments.
fn tabs(data: &MarketData) -> Vec<Tab> {
    std::iter::once(Tab::Overview)
        .chain(data.available_axes().into_iter().map(Tab::Axis))
        .collect()
}

/// Neighbouring year on the document axis, clamped at both ends.
fn step_year(years: &[i32], current: i32, delta: i32) -> Option<i32> {
    if years.is_empty() {
        return None;
    }
    let idx = years.iter().position(|&y| y == current).unwrap_or(0) as i64;
    let next = (idx + i64::from(delta)).clamp(0, years.len() as i64 - 1);
    years.get(next as usize).copied()
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    unit: UnitScale,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = format!("{x_val:.0}");
        let label_len = label.len() as u16;
        let start = x.saturating_sub(label_len / 2);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect { x: start, y, width: label_len, height: 1 },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = format!("{y_val:.1}");
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect { x: start, y, width: label_len, height: 1 },
        );
    }

    let x_label = Paragraph::new("year")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(format!("US${}", unit.suffix()))
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
