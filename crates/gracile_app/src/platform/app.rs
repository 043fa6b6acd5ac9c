use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::Parser;
use gracile_core::{FieldName, Msg};
use gracile_logging::{gracile_info, gracile_warn};
use log::LevelFilter;

use super::cli::Cli;
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::page::constants::{ALERT_ERROR, ALERT_SUCCESS};
use super::page::{bind_form, layout, Document, FormController, SubmitEvent};

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(&cli);
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(config.log, level);
    gracile_info!(
        "Starting gracile form={} base_url={}",
        config.form_kind(),
        config.base_url
    );

    let runner = EffectRunner::new(config.submit_settings()).context("building http client")?;
    let mut session = Session::open(&config, runner)?;
    for (field, value) in cli.prefilled() {
        session.set_field(field, value)?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.submit {
        return submit_once(&mut session, wait_budget(&config), &mut out);
    }

    let stdin = io::stdin();
    run_session(&mut session, stdin.lock(), &mut out, wait_budget(&config))?;
    Ok(ExitCode::SUCCESS)
}

/// Submits the form once, waits for the reply and prints the regions.
/// Succeeds only when the reply arrived in time and the success region shows.
pub fn submit_once<W: Write>(
    session: &mut Session,
    budget: Duration,
    out: &mut W,
) -> anyhow::Result<ExitCode> {
    session.submit()?;
    let settled = session.wait_idle(budget)?;
    write_status(out, session.document())?;
    if !settled {
        writeln!(out, "no reply within {} ms", budget.as_millis())?;
        return Ok(ExitCode::FAILURE);
    }
    let accepted = session.document().alert(ALERT_SUCCESS)?.visible;
    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Upper bound for waiting on a reply: the request timeout plus slack.
fn wait_budget(config: &AppConfig) -> Duration {
    Duration::from_millis(config.connect_timeout_ms + config.request_timeout_ms + 1_000)
}

/// One loaded page with its bound form and the engine behind it.
pub struct Session {
    document: Document,
    controller: FormController,
    runner: EffectRunner,
}

impl Session {
    /// Builds the page for the configured form and runs page setup once.
    pub fn open(config: &AppConfig, runner: EffectRunner) -> anyhow::Result<Self> {
        let mut document = layout::subscription_page(config.form_kind());
        let controller = bind_form(&mut document, config.form_kind())?;
        Ok(Self {
            document,
            controller,
            runner,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    pub fn pending(&self) -> usize {
        self.runner.pending()
    }

    pub fn set_field(&mut self, field: FieldName, value: &str) -> anyhow::Result<()> {
        self.document.set_value(field.as_str(), value)?;
        Ok(())
    }

    /// Fires a native submit on the bound form and runs its effects.
    /// Returns the submit event so callers can inspect it.
    pub fn submit(&mut self) -> anyhow::Result<SubmitEvent> {
        let mut event = SubmitEvent::new(self.controller.form_handle());
        let effects = self.controller.on_submit(&mut self.document, &mut event)?;
        self.runner.enqueue(effects);
        Ok(event)
    }

    /// Applies every reply that has already arrived; returns how many.
    pub fn poll(&mut self) -> anyhow::Result<usize> {
        let mut applied = 0;
        while let Some(msg) = self.runner.try_recv() {
            self.apply(msg)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Blocks until no submission is in flight or `budget` runs out.
    /// Returns `Ok(false)` on timeout; a reply that cannot be rendered is an
    /// error.
    pub fn wait_idle(&mut self, budget: Duration) -> anyhow::Result<bool> {
        let deadline = Instant::now() + budget;
        while self.runner.pending() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                gracile_warn!("Gave up waiting on {} submission(s)", self.runner.pending());
                return Ok(false);
            }
            if let Some(msg) = self.runner.recv_timeout(remaining) {
                self.apply(msg).context("applying reply")?;
            }
        }
        Ok(true)
    }

    fn apply(&mut self, msg: Msg) -> anyhow::Result<()> {
        let effects = self.controller.dispatch(&mut self.document, msg)?;
        self.runner.enqueue(effects);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: FieldName, value: String },
    Submit,
    Show,
    Wait,
    Quit,
}

pub fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let command = match word {
        "set" => {
            let rest = rest.trim();
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let Some(field) = FieldName::parse(name) else {
                bail!("unknown field {name:?}; expected user_id, rss_url or daily_amount");
            };
            Command::Set {
                field,
                value: value.trim().to_string(),
            }
        }
        "submit" => Command::Submit,
        "show" => Command::Show,
        "wait" => Command::Wait,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {other:?}"),
    };
    Ok(Some(command))
}

/// Line-driven page session. Replies that have arrived are printed between
/// commands and `wait` blocks until nothing is in flight. Submissions still
/// in flight at end of input or `quit` are awaited and printed before return.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    wait_budget: Duration,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        match command {
            Command::Set { field, value } => session.set_field(field, &value)?,
            Command::Submit => {
                session.submit()?;
                writeln!(out, "submitted ({} in flight)", session.pending())?;
            }
            Command::Show => write_status(out, session.document())?,
            Command::Wait => {
                session.wait_idle(wait_budget)?;
                write_status(out, session.document())?;
                continue;
            }
            Command::Quit => break,
        }

        if session.poll()? > 0 {
            write_status(out, session.document())?;
        }
    }

    if session.pending() > 0 {
        session.wait_idle(wait_budget)?;
        write_status(out, session.document())?;
    }
    Ok(())
}

pub fn write_status<W: Write>(out: &mut W, document: &Document) -> anyhow::Result<()> {
    for id in [ALERT_ERROR, ALERT_SUCCESS] {
        let alert = document.alert(id)?;
        if alert.visible {
            writeln!(out, "{id}: {}", alert.text)?;
        } else {
            writeln!(out, "{id}: (hidden)")?;
        }
    }
    Ok(())
}
