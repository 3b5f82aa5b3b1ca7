use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::celebration::CelebrationTimer;
use crate::config::Config;
use crate::error::{CalendarError, parse_date};
use crate::state::{AppState, Effect, Event, update};
use crate::svg::{Theme, generate_svg};

/// Reads lines on a plain thread that is never joined, so a read blocked on
/// a terminal cannot hold up runtime shutdown.
pub fn spawn_line_reader<R>(reader: R) -> UnboundedReceiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        for line in reader.lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Owns the application state and the celebration timer, and renders every
/// state change to `out` (and to SVG files when enabled).
pub struct Controller<W: Write> {
    state: AppState,
    timer: CelebrationTimer,
    events: UnboundedReceiver<Event>,
    today: Option<NaiveDate>,
    svg_dir: Option<PathBuf>,
    json: bool,
    out: W,
}

impl<W: Write> Controller<W> {
    pub fn new(config: &Config, out: W) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            timer: CelebrationTimer::new(config.celebration_delay(), tx),
            events: rx,
            today: config.today,
            svg_dir: (!config.no_svg).then(|| config.out_dir.clone()),
            json: config.json,
            out,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Applies one event, drives the timer and re-renders.
    pub fn handle(&mut self, event: Event) -> Result<()> {
        let (next, effect) = update(self.state.clone(), event)?;
        debug!(?event, ?effect, "state updated");
        self.apply(next, effect)
    }

    fn apply(&mut self, next: AppState, effect: Effect) -> Result<()> {
        self.state = next;

        match effect {
            Effect::ScheduleHide => {
                info!("happy birthday, showing celebration");
                self.timer.schedule();
            }
            Effect::CancelHide => self.timer.cancel(),
            Effect::None => {}
        }

        self.render()
    }

    pub fn pick(&mut self, birth_date: NaiveDate) -> Result<()> {
        let today = self.today();
        self.handle(Event::DatePicked { birth_date, today })
    }

    /// Evaluates a single birth date and, on the birthday, waits for the
    /// celebration to be hidden again.
    pub async fn run_once(&mut self, birth_date: NaiveDate) -> Result<()> {
        self.pick(birth_date)?;

        while self.state.celebration_visible {
            tokio::select! {
                Some(event) = self.events.recv() => self.handle(event)?,
                _ = tokio::signal::ctrl_c() => {
                    info!(pending_hide = self.timer.is_pending(), "interrupted, cancelling celebration");
                    self.timer.cancel();
                    break;
                }
            }
        }
        Ok(())
    }

    /// Reads one birth date per line from `lines` until the sender closes,
    /// `quit` is entered or `interrupt` resolves.
    pub async fn run_interactive<F>(
        &mut self,
        mut lines: UnboundedReceiver<io::Result<String>>,
        interrupt: F,
    ) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.render()?;
        tokio::pin!(interrupt);

        loop {
            tokio::select! {
                line = lines.recv() => {
                    let Some(line) = line else {
                        break;
                    };
                    let line = line.context("Failed to read birth date from stdin")?;
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if matches!(line, "q" | "quit") {
                        break;
                    }
                    self.pick_line(line)?;
                }
                Some(event) = self.events.recv() => self.handle(event)?,
                _ = &mut interrupt => {
                    info!(pending_hide = self.timer.is_pending(), "interrupted");
                    break;
                }
            }
        }

        self.timer.cancel();
        Ok(())
    }

    /// Bad input is reported and leaves the current state untouched.
    fn pick_line(&mut self, line: &str) -> Result<()> {
        let today = self.today();
        let result = parse_date(line).and_then(|birth_date| {
            update(self.state.clone(), Event::DatePicked { birth_date, today })
        });

        match result {
            Ok((next, effect)) => self.apply(next, effect),
            Err(e) => self.report(&e),
        }
    }

    fn report(&mut self, err: &CalendarError) -> Result<()> {
        warn!("rejected input: {err}");
        writeln!(self.out, "error: {err}").context("Failed to write output")
    }

    fn render(&mut self) -> Result<()> {
        if self.json {
            // Nothing to report until a date has been picked
            if self.state.reading.is_some() {
                let line = serde_json::to_string(&self.state).context("Failed to serialize state")?;
                writeln!(self.out, "{line}").context("Failed to write output")?;
            }
        } else {
            writeln!(self.out, "{}\n", self.state).context("Failed to write output")?;
        }
        self.out.flush().context("Failed to flush output")?;

        if let Some(dir) = &self.svg_dir {
            for theme in Theme::ALL {
                let path = dir.join(theme.file_name());
                fs::write(&path, generate_svg(&self.state, theme))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            debug!(dir = %dir.display(), "wrote age cards");
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.out
    }
}
