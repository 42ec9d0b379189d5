//! CSV report generation

use crate::report::StreamReport;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, reports: &[StreamReport]) -> io::Result<()> {
    // Header
    writeln!(
        writer,
        "status,filepath,bytes,frames,duration_secs,avg_bitrate_kbps,vbr,trailer,error"
    )?;

    // Rows
    for r in reports {
        let error = r.error.as_deref().unwrap_or("-");

        writeln!(
            writer,
            "{},{},{},{},{:.3},{},{},{},{}",
            r.status,
            escape_csv(&r.file_path),
            r.bytes,
            r.frame_count,
            r.duration_secs,
            r.avg_bitrate,
            r.is_vbr,
            r.has_trailer,
            escape_csv(error)
        )?;
    }

    Ok(())
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_reports;

    #[test]
    fn test_csv_rows() {
        let mut out = Vec::new();
        write(&mut out, &sample_reports()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "OK,a.mp3,939,2,0.052,144,true,false,-");
        assert!(lines[2].starts_with("CORRUPT,b.mp3,1239,0,0.000,"));
        assert!(lines[3].starts_with("ERROR,/definitely/not/here.mp3,0,"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
