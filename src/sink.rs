use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::data::model::PointValue;
use crate::error::{QueryError, Result};

// ---------------------------------------------------------------------------
// Result sink – one appended, flushed line per match
// ---------------------------------------------------------------------------

/// Render a matching record as `"%6.2f, %6.2f, %6.2f"`.
pub fn format_record(point: &PointValue) -> String {
    format!(
        "{:>6}, {:>6}, {:>6}",
        fixed2(point.x),
        fixed2(point.y),
        fixed2(point.value)
    )
}

/// Two decimal places, rounding half-up on the shortest decimal form of
/// `v` (so `2.675` gives `2.68`), not on its exact binary value.
fn fixed2(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let shortest = format!("{}", v.abs());
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));
    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.extend(frac_part.bytes().chain(std::iter::repeat(b'0')).take(2));

    if frac_part.as_bytes().get(2).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - 2;
    let sign = if v.is_sign_negative() { "-" } else { "" };
    format!(
        "{sign}{}.{}",
        String::from_utf8_lossy(&digits[..split]),
        String::from_utf8_lossy(&digits[split..])
    )
}

/// Owns the output artifact for the duration of a run.
#[derive(Debug)]
pub struct ResultSink {
    path: PathBuf,
    written: usize,
}

impl ResultSink {
    /// Reset the artifact at `path` and return a sink for it.
    ///
    /// Whatever is at `path` is removed and an empty file is created, so
    /// the artifact exists even if nothing is ever emitted. A failed reset
    /// is logged and the sink is still returned: the run goes on and every
    /// append that cannot land is reported on its own.
    pub fn create(path: &Path) -> Self {
        match fs::remove_file(path) {
            Ok(()) => info!("removed previous output {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => error!("could not remove output {}: {e}", path.display()),
        }
        if let Err(e) = File::create(path) {
            error!("could not create output {}: {e}", path.display());
        }

        ResultSink {
            path: path.to_path_buf(),
            written: 0,
        }
    }

    /// Append one record. The file is reopened and flushed per call so
    /// every line already emitted survives if the process dies mid-run.
    pub fn emit(&mut self, point: &PointValue) -> Result<()> {
        self.append_line(&format_record(point))
            .map_err(|source| QueryError::OutputWriteFailure {
                path: self.path.clone(),
                source,
            })?;
        self.written += 1;
        Ok(())
    }

    fn append_line(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        file.flush()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records successfully appended so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pv(x: f64, y: f64, value: f64) -> PointValue {
        PointValue { x, y, value }
    }

    #[test]
    fn formats_fixed_width_two_decimals() {
        assert_eq!(format_record(&pv(5.0, 5.0, 15.0)), "  5.00,   5.00,  15.00");
        assert_eq!(format_record(&pv(-1.5, 123.456, 0.004)), " -1.50, 123.46,   0.00");
        assert_eq!(
            format_record(&pv(12345.678, -9999.0, 1.0)),
            "12345.68, -9999.00,   1.00"
        );
    }

    #[test]
    fn rounds_half_up_on_decimal_form() {
        assert_eq!(format_record(&pv(0.125, 2.675, -0.001)), "  0.13,   2.68,  -0.00");
        assert_eq!(format_record(&pv(9.995, 99.999, -0.005)), " 10.00, 100.00,  -0.01");
        assert_eq!(format_record(&pv(0.0, -0.0, 1e-7)), "  0.00,  -0.00,   0.00");
        assert_eq!(
            format_record(&pv(f64::NAN, f64::INFINITY, f64::NEG_INFINITY)),
            "   NaN, Infinity, -Infinity"
        );
    }

    #[test]
    fn create_truncates_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale line\n").unwrap();

        let sink = ResultSink::create(&path);
        assert_eq!(sink.written(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn create_makes_empty_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.csv");

        ResultSink::create(&path);
        assert!(path.exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn emit_appends_one_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut sink = ResultSink::create(&path);

        sink.emit(&pv(5.0, 5.0, 15.0)).unwrap();
        sink.emit(&pv(10.0, 10.0, 25.0)).unwrap();

        assert_eq!(sink.written(), 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "  5.00,   5.00,  15.00\n 10.00,  10.00,  25.00\n"
        );
    }

    #[test]
    fn missing_parent_fails_per_record_not_at_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.csv");
        let mut sink = ResultSink::create(&path);
        assert!(!path.exists());

        for i in 0..3 {
            let err = sink.emit(&pv(i as f64, 1.0, 1.0)).unwrap_err();
            assert!(
                matches!(err, QueryError::OutputWriteFailure { .. }),
                "got {err:?}"
            );
        }
        assert_eq!(sink.written(), 0);
    }

    #[test]
    fn emit_failure_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut sink = ResultSink::create(&path);

        // Replace the artifact with a directory so the append cannot open it.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let err = sink.emit(&pv(1.0, 1.0, 1.0)).unwrap_err();
        assert!(err.is_recoverable(), "got {err:?}");
        assert_eq!(sink.written(), 0);
    }
}
