pub mod csv;
pub mod json;

use crate::buffer::AudioBuffer;
use crate::error::Error;
use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::warn;

/// Scan result for a single file
#[derive(Debug, Clone, Serialize)]
pub struct StreamReport {
    pub file_path: String,
    pub file_name: String,
    pub status: Status,
    pub bytes: usize,
    pub sync_offset: usize,
    pub frame_count: usize,
    pub duration_secs: f64,
    pub avg_bitrate: u32,
    pub min_bitrate: u32,
    pub max_bitrate: u32,
    pub is_vbr: bool,
    pub has_trailer: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Corrupt,
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Corrupt => write!(f, "CORRUPT"),
            Status::Error => write!(f, "ERROR"),
        }
    }
}

impl StreamReport {
    /// Scan a file on disk; failures end up in `status` and `error`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let file_path = path.display().to_string();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.clone());

        match AudioBuffer::load(path) {
            Ok(buffer) => Self::from_buffer(file_path, file_name, &buffer),
            Err(e) => Self::empty(file_path, file_name, Status::Error, e),
        }
    }

    pub fn from_buffer(file_path: String, file_name: String, buffer: &AudioBuffer) -> Self {
        let has_trailer = buffer.probe_trailer().is_some();

        let stats = match buffer.stats() {
            Ok(stats) => stats,
            Err(e) => {
                warn!(file = %file_path, error = %e, "stream did not scan cleanly");
                let mut report = Self::empty(file_path, file_name, Status::Corrupt, e);
                report.bytes = buffer.len();
                report.sync_offset = buffer.sync_start();
                report.has_trailer = has_trailer;
                return report;
            }
        };

        StreamReport {
            file_path,
            file_name,
            status: Status::Ok,
            bytes: buffer.len(),
            sync_offset: stats.sync_offset,
            frame_count: stats.frame_count,
            duration_secs: stats.duration_secs,
            avg_bitrate: stats.avg_bitrate,
            min_bitrate: stats.min_bitrate,
            max_bitrate: stats.max_bitrate,
            is_vbr: stats.is_vbr,
            has_trailer,
            error: None,
        }
    }

    fn empty(file_path: String, file_name: String, status: Status, error: Error) -> Self {
        StreamReport {
            file_path,
            file_name,
            status,
            bytes: 0,
            sync_offset: 0,
            frame_count: 0,
            duration_secs: 0.0,
            avg_bitrate: 0,
            min_bitrate: 0,
            max_bitrate: 0,
            is_vbr: false,
            has_trailer: false,
            error: Some(error.to_string()),
        }
    }
}

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, reports: &[StreamReport]) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "json" => json::write(&mut file, reports),
        _ => csv::write(&mut file, reports),
    }
}

/// Summary statistics for a batch of reports
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub total: usize,
    pub ok: usize,
    pub corrupt: usize,
    pub error: usize,
    pub duration_secs: f64,
}

impl Summary {
    pub fn from_reports(reports: &[StreamReport]) -> Self {
        let mut summary = Self {
            total: reports.len(),
            ..Default::default()
        };

        for r in reports {
            match r.status {
                Status::Ok => summary.ok += 1,
                Status::Corrupt => summary.corrupt += 1,
                Status::Error => summary.error += 1,
            }
            summary.duration_secs += r.duration_secs;
        }

        summary
    }
}
