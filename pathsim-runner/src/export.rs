//! Export — JSON envelopes and CSV bar tapes.
//!
//! - **JSON**: the full `SimulationResponse`, round-trippable
//! - **CSV**: one row per bar, for spreadsheets and charting tools

use std::path::Path;

use anyhow::{Context, Result};
use pathsim_core::timestamps::format_timestamp;
use pathsim_core::Bar;

use crate::runner::SimulationResponse;

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(response: &SimulationResponse) -> Result<String> {
    serde_json::to_string_pretty(response).context("failed to serialize SimulationResponse to JSON")
}

pub fn import_json(json: &str) -> Result<SimulationResponse> {
    serde_json::from_str(json).context("failed to deserialize SimulationResponse from JSON")
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export bars as CSV.
///
/// Columns: timestamp, symbol, company_name, open, high, low, close,
/// previous_close, change, change_percent, volume
pub fn export_bars_csv(bars: &[Bar]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "timestamp",
        "symbol",
        "company_name",
        "open",
        "high",
        "low",
        "close",
        "previous_close",
        "change",
        "change_percent",
        "volume",
    ])?;

    for b in bars {
        wtr.write_record([
            &format_timestamp(&b.timestamp),
            &b.symbol,
            &b.company_name,
            &format!("{:.2}", b.open),
            &format!("{:.2}", b.high),
            &format!("{:.2}", b.low),
            &format!("{:.2}", b.current_price),
            &format!("{:.2}", b.previous_close),
            &format!("{:.2}", b.change),
            &format!("{:.2}", b.change_percent),
            &b.volume.to_string(),
        ])?;
    }

    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

// ─── File output ────────────────────────────────────────────────────

/// Write `contents` to `path`, creating parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{run_simulation, Collaborators};
    use pathsim_core::SimulationConfig;

    fn response() -> SimulationResponse {
        let cfg = SimulationConfig {
            days: 4,
            ..Default::default()
        }
        .with_seed(3);
        run_simulation(&cfg, Collaborators::none()).unwrap()
    }

    #[test]
    fn json_round_trip() {
        let resp = response();
        let json = export_json(&resp).unwrap();
        assert!(json.contains("\"stock\": \"TIC\""));
        assert_eq!(import_json(&json).unwrap(), resp);
    }

    #[test]
    fn import_rejects_garbage() {
        assert!(import_json("{\"stock\": 1}").is_err());
    }

    #[test]
    fn csv_has_header_and_one_row_per_bar() {
        let resp = response();
        let csv = export_bars_csv(&resp.data).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("timestamp,symbol,company_name,open"));
        assert!(lines[1].starts_with("2023-01-01T00:00:00Z,TIC,Test Inc,"));
        assert!(lines[1].ends_with(&resp.data[0].volume.to_string()));
    }

    #[test]
    fn write_output_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/bars.csv");
        write_output(&path, "a,b\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n");
    }
}
