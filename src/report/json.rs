//! JSON report generation

use crate::report::{StreamReport, Summary};
use serde::Serialize;
use std::io::{self, Write};
use std::time::SystemTime;

#[derive(Serialize)]
struct JsonReport<'a> {
    /// Seconds since the Unix epoch
    generated: u64,
    summary: Summary,
    files: &'a [StreamReport],
}

pub fn write<W: Write>(writer: &mut W, reports: &[StreamReport]) -> io::Result<()> {
    let generated = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let report = JsonReport {
        generated,
        summary: Summary::from_reports(reports),
        files: reports,
    };

    let json = serde_json::to_string_pretty(&report)
        .map_err(io::Error::other)?;

    writer.write_all(json.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_reports;

    #[test]
    fn test_json_fields() {
        let mut out = Vec::new();
        write(&mut out, &sample_reports()).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let files = parsed["files"].as_array().unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(files[0]["status"], "OK");
        assert_eq!(files[0]["frame_count"], 2);
        assert_eq!(files[1]["status"], "CORRUPT");
        assert_eq!(files[2]["status"], "ERROR");
        assert!(files[0]["error"].is_null());
        assert_eq!(parsed["summary"]["corrupt"], 1);
    }
}
