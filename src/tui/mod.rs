//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel (maximum concentration, step size, decay rate,
//! time sweep) and renders the four assay charts. Every adjustment triggers one
//! full recomputation; exports write the run that is currently on screen.

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{SimulationRun, run_simulation};
use crate::domain::{
    AssayKind, CONCENTRATION_MAX_BOUNDS, CONCENTRATION_STEP_BOUNDS, DECAY_RATE_BOUNDS, ResponseDataset,
    SimConfig, TIME_MAX_BOUNDS,
};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::AssayChart;

/// Number of adjustable settings in the side panel.
const FIELD_COUNT: usize = 4;

/// Directory for Markdown reports written with `d`.
const REPORT_DIR: &str = "reports";

/// Start the TUI with an initial configuration.
pub fn run(config: SimConfig) -> Result<(), AppError> {
    // Fail before touching the terminal if the initial configuration is invalid.
    let mut app = App::new(config)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
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

/// Session state. The engine never sees anything but the `config` value.
struct App {
    config: SimConfig,
    initial: SimConfig,
    selected_field: usize,
    status: String,
    run: SimulationRun,
}

impl App {
    fn new(config: SimConfig) -> Result<Self, AppError> {
        let run = run_simulation(&config)?;
        Ok(Self {
            config,
            initial: config,
            selected_field: 0,
            status: "Ready.".to_string(),
            run,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
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

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FIELD_COUNT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('r') => {
                self.apply(self.initial);
                self.status = "Reset to initial settings.".to_string();
            }
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('d') => match crate::report::write_markdown_report(Path::new(REPORT_DIR), &self.run) {
                Ok(path) => {
                    self.status = format!("Wrote report: {}", path.display());
                }
                Err(err) => {
                    log::warn!("report failed: {err}");
                    self.status = format!("Report failed: {err}");
                }
            },
            _ => {}
        }

        false
    }

    fn adjust_field(&mut self, delta: i32) {
        let mut next = self.config;
        let label = match self.selected_field {
            0 => {
                next.max_concentration = step_value(next.max_concentration, 10.0, delta, CONCENTRATION_MAX_BOUNDS);
                format!("max concentration: {} µg/ml", next.max_concentration)
            }
            1 => {
                next.concentration_step = step_value(next.concentration_step, 1.0, delta, CONCENTRATION_STEP_BOUNDS);
                format!("step: {} µg/ml", next.concentration_step)
            }
            2 => {
                next.params.decay.rate = step_rate(next.params.decay.rate, delta);
                format!("decay rate: {:.2}", next.params.decay.rate)
            }
            3 => {
                next.time_max = step_value(next.time_max, 5.0, delta, TIME_MAX_BOUNDS);
                format!("time sweep: 0-{} min", next.time_max)
            }
            _ => return,
        };

        if next == self.config {
            self.status = format!("{label} (limit)");
            return;
        }
        if self.apply(next) {
            self.status = label;
        }
    }

    /// Recompute for `next`; on error keep the previous settings and report.
    fn apply(&mut self, next: SimConfig) -> bool {
        match run_simulation(&next) {
            Ok(run) => {
                self.config = next;
                self.run = run;
                true
            }
            Err(err) => {
                log::warn!("rejected settings: {err}");
                self.status = format!("{err} (kept previous settings)");
                false
            }
        }
    }

    fn export(&mut self) {
        match crate::app::export_to_dir(Path::new("."), &self.run, false) {
            Ok(()) => {
                self.status = format!(
                    "Exported {} and {}",
                    crate::io::APPLICATIONS_FILE_NAME,
                    crate::io::DEGRADATION_FILE_NAME
                );
            }
            Err(err) => {
                log::warn!("export failed: {err}");
                self.status = format!("Export failed: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("agnp", Style::default().fg(Color::Cyan)),
            Span::raw(" - Silver nanoparticle assay simulation"),
        ]));

        let mut parts = Vec::new();
        for peak in &self.run.summary.peaks {
            parts.push(format!(
                "max {}: {:.1}{} @ {:.0}",
                peak.kind.meta().y_label,
                peak.max_y,
                peak.kind.meta().unit_y,
                peak.at_x
            ));
        }
        if let Some(end) = &self.run.summary.degradation {
            parts.push(format!("degraded @ {:.0} min: {:.1}%", end.time, end.degraded_pct));
        }
        lines.push(Line::from(Span::styled(parts.join(" | "), Style::default().fg(Color::Gray))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(0)])
            .split(area);

        self.draw_settings(frame, cols[0]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(cols[1]);
        for (row, kinds) in rows.iter().zip([
            [AssayKind::Antibacterial, AssayKind::BiofilmInhibition],
            [AssayKind::Antioxidant, AssayKind::PhotocatalyticDegradation],
        ]) {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row);
            for (cell, kind) in cells.iter().zip(kinds) {
                self.draw_chart(frame, *cell, self.run.dataset(kind));
            }
        }
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, dataset: &ResponseDataset) {
        let block = Block::default()
            .title(dataset.kind().display_name())
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let series = dataset.pairs();
        let widget = AssayChart {
            series: &series,
            x_bounds: x_bounds(&series),
            y_bounds: y_bounds(dataset.kind()),
            x_label: dataset.meta.x_header(),
            y_label: dataset.meta.y_header(),
            color: chart_color(dataset.kind()),
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let config = &self.config;
        let conc_points = self.run.dataset(AssayKind::Antibacterial).len();
        let time_points = self.run.dataset(AssayKind::PhotocatalyticDegradation).len();

        let items = vec![
            ListItem::new(format!("Max conc: {} µg/ml", config.max_concentration)),
            ListItem::new(format!("Step: {} µg/ml", config.concentration_step)),
            ListItem::new(format!("Decay rate: {:.2}", config.params.decay.rate)),
            ListItem::new(format!("Time: 0-{} min", config.time_max)),
            ListItem::new(""),
            ListItem::new(format!("{conc_points} conc. points")),
            ListItem::new(format!("{time_points} time points (every {} min)", config.time_step)),
        ];

        let list = List::new(items)
            .block(Block::default().title("Parameters").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  e export CSV  d report  r reset  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Move `value` by `delta` increments of `inc`, clamped into `bounds`.
fn step_value(value: f64, inc: f64, delta: i32, (lo, hi): (f64, f64)) -> f64 {
    (value + inc * f64::from(delta)).clamp(lo, hi)
}

/// Move the decay rate by 0.01 per step, working in integer hundredths so the
/// value never drifts off the 0.01 grid.
fn step_rate(rate: f64, delta: i32) -> f64 {
    let (lo, hi) = DECAY_RATE_BOUNDS;
    let hundredths = (rate * 100.0).round() as i64 + i64::from(delta);
    let lo_h = (lo * 100.0).round() as i64;
    let hi_h = (hi * 100.0).round() as i64;
    hundredths.clamp(lo_h, hi_h) as f64 / 100.0
}

fn x_bounds(series: &[(f64, f64)]) -> [f64; 2] {
    let first = series.first().map(|p| p.0).unwrap_or(0.0);
    let last = series.last().map(|p| p.0).unwrap_or(1.0);
    if last > first { [first, last] } else { [first - 1.0, first + 1.0] }
}

fn y_bounds(kind: AssayKind) -> [f64; 2] {
    let (lo, hi) = kind.meta().bound;
    [lo, hi]
}

fn chart_color(kind: AssayKind) -> RGBColor {
    match kind {
        AssayKind::Antibacterial => RGBColor(0, 128, 255),
        AssayKind::BiofilmInhibition => RGBColor(0, 200, 0),
        AssayKind::Antioxidant => RGBColor(255, 165, 0),
        AssayKind::PhotocatalyticDegradation => RGBColor(255, 0, 0),
    }
}

fn fmt_axis(v: f64) -> String {
    format!("{v:.0}")
}
