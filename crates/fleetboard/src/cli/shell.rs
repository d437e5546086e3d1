//! Interactive dashboard session.
//!
//! Each input line is one operator action: change a filter, toggle the
//! ready-only view, open a card's editor, commit a status. The dashboard is
//! redrawn after every action that changes what is shown.

use std::io::Write;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::aircraft::AircraftStatus;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::render;
use crate::store::UpdateOutcome;
use crate::view::DashboardView;

const HELP: &str = "\
commands:
  tail [TEXT]            filter by tail number (no text clears)
  model [TEXT]           filter by model (no text clears)
  status all|STATUS      filter by status
  ready                  toggle ready-only view
  select TAIL            open the status editor on a card
  set STATUS             commit a status for the open editor
  set TAIL STATUS        change a status directly
  cancel                 close the editor
  reload                 reload the fleet from the backend
  show                   redraw the dashboard
  markers                list map markers
  help                   this text
  quit                   leave the session";

/// Problems parsing a shell line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellParseError {
    /// The first word is not a command.
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    /// A command is missing a required argument.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// A status word is not one of the known statuses.
    #[error("unknown status '{0}' (expected available, maintenance or aog)")]
    BadStatus(String),
}

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Set the tail filter.
    Tail(String),
    /// Set the model filter.
    Model(String),
    /// Set the status filter.
    Status(Option<AircraftStatus>),
    /// Toggle ready-only.
    Ready,
    /// Open the editor on a card.
    Select(String),
    /// Commit a status for the open editor.
    Commit(AircraftStatus),
    /// Update a tail number directly.
    Set(String, AircraftStatus),
    /// Close the editor.
    Cancel,
    /// Reload from the backend.
    Reload,
    /// Redraw.
    Show,
    /// Print markers.
    Markers,
    /// Print help.
    Help,
    /// End the session.
    Quit,
}

fn parse_status(word: &str) -> std::result::Result<AircraftStatus, ShellParseError> {
    word.parse()
        .map_err(|_| ShellParseError::BadStatus(word.to_string()))
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error describing what was wrong with the line.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, ShellParseError> {
        let line = line.trim();
        let Some((command, rest)) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .or_else(|| (!line.is_empty()).then_some((line, "")))
        else {
            return Ok(None);
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let cmd = match command.to_ascii_lowercase().as_str() {
            "tail" => Self::Tail(rest.to_string()),
            "model" => Self::Model(rest.to_string()),
            "status" => match args.as_slice() {
                ["all"] => Self::Status(None),
                [word] => Self::Status(Some(parse_status(word)?)),
                _ => return Err(ShellParseError::Usage("status all|STATUS")),
            },
            "ready" => Self::Ready,
            "select" => match args.as_slice() {
                [tail] => Self::Select((*tail).to_string()),
                _ => return Err(ShellParseError::Usage("select TAIL")),
            },
            "set" => match args.as_slice() {
                [status] => Self::Commit(parse_status(status)?),
                [tail, status] => Self::Set((*tail).to_string(), parse_status(status)?),
                _ => return Err(ShellParseError::Usage("set [TAIL] STATUS")),
            },
            "cancel" => Self::Cancel,
            "reload" => Self::Reload,
            "show" => Self::Show,
            "markers" => Self::Markers,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ShellParseError::UnknownCommand(other.to_string())),
        };
        Ok(Some(cmd))
    }
}

fn draw(view: &DashboardView, out: &mut impl Write) -> Result<()> {
    let text = render::dashboard(
        &view.visible(),
        view.readiness(),
        view.editing().tail_number(),
        OutputFormat::Plain,
    )?;
    writeln!(out, "{text}")?;
    Ok(())
}

fn report_update(
    tail_number: Option<&str>,
    result: Result<Option<UpdateOutcome>>,
    view: &DashboardView,
    out: &mut impl Write,
) -> Result<()> {
    match result {
        Ok(Some(UpdateOutcome::Updated(record))) => {
            writeln!(out, "{} is now {}", record.tail_number, record.status)?;
            draw(view, out)
        }
        Ok(Some(UpdateOutcome::NoSuchAircraft)) => {
            writeln!(
                out,
                "no aircraft with tail number {}",
                tail_number.unwrap_or_default()
            )?;
            Ok(())
        }
        Ok(None) => {
            writeln!(out, "no editor open; 'select TAIL' first")?;
            Ok(())
        }
        Err(e) => {
            writeln!(out, "!! {e}")?;
            writeln!(out, "!! the editor is still open; try again")?;
            Ok(())
        }
    }
}

/// Run an interactive session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run<R, W>(view: &mut DashboardView, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    draw(view, out)?;
    let mut lines = input.lines();

    loop {
        write!(out, "fleetboard> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let cmd = match ShellCommand::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match cmd {
            ShellCommand::Tail(text) => {
                view.set_tail_filter(text);
                draw(view, out)?;
            }
            ShellCommand::Model(text) => {
                view.set_model_filter(text);
                draw(view, out)?;
            }
            ShellCommand::Status(status) => {
                view.set_status_filter(status);
                draw(view, out)?;
            }
            ShellCommand::Ready => {
                view.toggle_ready_only();
                draw(view, out)?;
            }
            ShellCommand::Select(tail) => {
                if view.select(&tail) {
                    draw(view, out)?;
                } else {
                    writeln!(out, "no aircraft with tail number {tail}")?;
                }
            }
            ShellCommand::Commit(status) => {
                let tail = view.editing().tail_number().map(str::to_string);
                let result = view.commit_edit(status).await;
                report_update(tail.as_deref(), result, view, out)?;
            }
            ShellCommand::Set(tail, status) => {
                let result = view.update_status(&tail, status).await.map(Some);
                report_update(Some(&tail), result, view, out)?;
            }
            ShellCommand::Cancel => {
                view.cancel_edit();
                draw(view, out)?;
            }
            ShellCommand::Reload => {
                view.mount().await;
                draw(view, out)?;
            }
            ShellCommand::Show => draw(view, out)?,
            ShellCommand::Markers => {
                write!(out, "{}", render::markers(&view.markers(), false)?)?;
            }
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Quit => break,
        }
    }
    Ok(())
}
