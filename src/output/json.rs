//! JSON output formatting

use crate::stats::SampleReport;
use anyhow::Result;
use std::io::Write;

/// Render a sample report as JSON
pub fn report_to_string(report: &SampleReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

/// Write a sample report as JSON, followed by a newline
pub fn write_report<W: Write>(mut writer: W, report: &SampleReport, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, report)?;
    } else {
        serde_json::to_writer(&mut writer, report)?;
    }
    writeln!(writer)?;
    Ok(())
}
