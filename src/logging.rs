//! JSON line-delimited operation logging.
//!
//! Each call appends one record `{ts, operation, payload}` to the file
//! named by the `HILBERT_LENS_LOG` environment variable. When the
//! variable is unset the call is a no-op, so library consumers pay
//! nothing unless they opt in.

use std::fs::OpenOptions;
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

#[derive(Serialize)]
struct LogRecord<'a, T: Serialize> {
    ts: u64,
    operation: &'a str,
    payload: &'a T,
}

/// Appends an operation record to the log file, if logging is enabled.
pub fn log_operation<T: Serialize>(operation: &str, payload: &T) -> std::io::Result<()> {
    let Some(path) = std::env::var_os("HILBERT_LENS_LOG") else {
        return Ok(());
    };

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let record = LogRecord {
        ts,
        operation,
        payload,
    };
    let line = serde_json::to_string(&record)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}
