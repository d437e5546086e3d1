//! Text rendering of the dashboard for the terminal front end.

use std::fmt::Write;

use serde_json::json;

use crate::aircraft::{AircraftRecord, AircraftStatus};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::map::{MapMarker, MapView};
use crate::view::Readiness;

/// Render the readiness badge line, e.g. `2 Ready / 5 Total`.
#[must_use]
pub fn readiness_line(readiness: Readiness) -> String {
    format!("{} Ready / {} Total", readiness.ready, readiness.total)
}

/// Render the visible aircraft with the readiness header.
///
/// `editing` marks the card whose status editor is open.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn dashboard(
    visible: &[AircraftRecord],
    readiness: Readiness,
    editing: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "readiness": readiness,
            "aircraft": visible,
        }))?),
        OutputFormat::Plain => Ok(cards(visible, readiness, editing)),
        OutputFormat::Table => Ok(table(visible, readiness, editing)),
    }
}

fn cards(visible: &[AircraftRecord], readiness: Readiness, editing: Option<&str>) -> String {
    let mut out = format!("Aircraft Dashboard  ({})\n", readiness_line(readiness));
    if visible.is_empty() {
        out.push_str("\nNo aircraft match the current filters.\n");
        return out;
    }
    for record in visible {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}  [{}]", record.tail_number, record.status);
        let _ = writeln!(out, "  Model:    {}", record.model);
        let _ = writeln!(
            out,
            "  Location: {:.4}, {:.4}",
            record.location.lat, record.location.lng
        );
        if editing == Some(record.tail_number.as_str()) {
            let _ = writeln!(out, "  Update Status: {}", status_choices(record.status));
        }
    }
    out
}

fn table(visible: &[AircraftRecord], readiness: Readiness, editing: Option<&str>) -> String {
    let tail_w = column_width("TAIL", visible.iter().map(|r| r.tail_number.len()));
    let model_w = column_width("MODEL", visible.iter().map(|r| r.model.len()));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<tail_w$}  {:<model_w$}  {:<11}  LOCATION",
        "TAIL", "MODEL", "STATUS"
    );
    for record in visible {
        let marker = if editing == Some(record.tail_number.as_str()) {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{marker} {:<tail_w$}  {:<model_w$}  {:<11}  {:.4}, {:.4}",
            record.tail_number,
            record.model,
            record.status.as_str(),
            record.location.lat,
            record.location.lng
        );
    }
    let _ = writeln!(out, "{}", readiness_line(readiness));
    out
}

fn column_width(header: &str, values: impl Iterator<Item = usize>) -> usize {
    values.fold(header.len(), usize::max)
}

fn status_choices(current: AircraftStatus) -> String {
    AircraftStatus::ALL
        .iter()
        .map(|s| {
            if *s == current {
                format!("({s})")
            } else {
                s.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Render map markers.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn markers(markers: &[MapMarker], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&json!({
            "view": MapView::default(),
            "markers": markers,
        }))?);
    }
    let mut out = String::new();
    for marker in markers {
        let _ = writeln!(
            out,
            "{:<8} {:>9.4} {:>10.4}  {} ({})",
            marker.tail_number, marker.lat, marker.lng, marker.model, marker.status
        );
    }
    Ok(out)
}
