//! Export module for the cash flow tracker
//!
//! An export is either a ledger table, written as CSV, or pre-rendered text
//! such as a summary, written as a plain text file. Exports never overwrite
//! an existing file: a numbered suffix is added instead.

pub mod csv;

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

pub use self::csv::{write_ledger_csv, LEDGER_CSV_HEADER};

static FILE_STEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// What can be exported
#[derive(Debug)]
pub enum ExportPayload<'a> {
    /// A ledger, written as `.csv`
    Table(&'a Ledger),
    /// Rendered text, written as `.txt`
    Text(String),
}

impl ExportPayload<'_> {
    /// File extension for this payload
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Table(_) => "csv",
            Self::Text(_) => "txt",
        }
    }

    fn write_to(&self, file: File) -> LedgerResult<()> {
        match self {
            Self::Table(ledger) => write_ledger_csv(ledger, file),
            Self::Text(text) => {
                let mut file = file;
                file.write_all(text.as_bytes())?;
                if !text.ends_with('\n') {
                    file.write_all(b"\n")?;
                }
                Ok(())
            }
        }
    }
}

/// Validate a requested file name and return its stem
///
/// The name may carry an extension, which must be the payload's own.
pub fn validate_file_name(name: &str, payload: &ExportPayload<'_>) -> LedgerResult<String> {
    let name = name.trim();
    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, extension)) => (stem, Some(extension)),
        None => (name, None),
    };

    if !FILE_STEM.is_match(stem) {
        return Err(LedgerError::InvalidFileName(name.to_string()));
    }

    if let Some(extension) = extension {
        if !extension.eq_ignore_ascii_case(payload.extension()) {
            return Err(LedgerError::UnsupportedExportType(extension.to_string()));
        }
    }

    Ok(stem.to_string())
}

/// Write the payload into `dir` under `name`
///
/// Returns the path actually written, which carries a `(N)` suffix when
/// `name` was already taken.
pub fn export(payload: &ExportPayload<'_>, name: &str, dir: &Path) -> LedgerResult<PathBuf> {
    let stem = validate_file_name(name, payload)?;
    std::fs::create_dir_all(dir)
        .map_err(|e| LedgerError::Io(format!("Failed to create export directory: {}", e)))?;

    let extension = payload.extension();
    let mut attempt = 0u32;
    loop {
        let file_name = if attempt == 0 {
            format!("{}.{}", stem, extension)
        } else {
            format!("{}({}).{}", stem, attempt, extension)
        };
        let path = dir.join(file_name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                fill_new_file(&path, file, |file| payload.write_to(file))?;
                info!(path = %path.display(), "exported");
                return Ok(path);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => {
                return Err(LedgerError::Io(format!(
                    "Failed to create {}: {}",
                    path.display(),
                    e
                )))
            }
        }
    }
}

/// Run `write` on a freshly created file, removing the file if it fails
fn fill_new_file<F>(path: &Path, file: File, write: F) -> LedgerResult<()>
where
    F: FnOnce(File) -> LedgerResult<()>,
{
    write(file).map_err(|e| {
        if let Err(remove_err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %remove_err, "could not remove partial export");
        }
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tests::sample_ledger;
    use tempfile::TempDir;

    #[test]
    fn test_export_table_writes_csv() {
        let temp_dir = TempDir::new().unwrap();
        let ledger = sample_ledger();

        let path = export(&ExportPayload::Table(&ledger), "test_export.csv", temp_dir.path()).unwrap();
        assert_eq!(path, temp_dir.path().join("test_export.csv"));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 6);
        assert!(contents.starts_with("Date,Category,Description,Value\n"));
    }

    #[test]
    fn test_export_text_writes_txt() {
        let temp_dir = TempDir::new().unwrap();
        let payload = ExportPayload::Text("Balance: $1229.50".into());

        let path = export(&payload, "summary", temp_dir.path()).unwrap();
        assert_eq!(path, temp_dir.path().join("summary.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Balance: $1229.50\n");
    }

    #[test]
    fn test_existing_files_are_never_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let ledger = sample_ledger();
        let payload = ExportPayload::Table(&ledger);

        let first = export(&payload, "march", temp_dir.path()).unwrap();
        let second = export(&payload, "march", temp_dir.path()).unwrap();
        let third = export(&payload, "march.csv", temp_dir.path()).unwrap();

        assert_eq!(first, temp_dir.path().join("march.csv"));
        assert_eq!(second, temp_dir.path().join("march(1).csv"));
        assert_eq!(third, temp_dir.path().join("march(2).csv"));
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("partial.csv");
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .unwrap();

        let err = fill_new_file(&path, file, |mut file| {
            file.write_all(b"Date,Category")?;
            Err(LedgerError::Io("disk full".into()))
        })
        .unwrap_err();

        assert!(matches!(err, LedgerError::Io(ref msg) if msg == "disk full"));
        assert!(!path.exists());

        let path = export(&ExportPayload::Text("ok".into()), "partial", temp_dir.path()).unwrap();
        assert_eq!(path, temp_dir.path().join("partial.txt"));
    }

    #[test]
    fn test_invalid_file_names() {
        let ledger = sample_ledger();
        let payload = ExportPayload::Table(&ledger);

        for name in ["test@export.csv", "", "../escape", "two words", "a.b.csv"] {
            let err = validate_file_name(name, &payload).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidFileName(_)), "{name}");
        }
    }

    #[test]
    fn test_extension_must_fit_payload() {
        let ledger = sample_ledger();
        let err = validate_file_name("report.txt", &ExportPayload::Table(&ledger)).unwrap_err();
        assert!(matches!(err, LedgerError::UnsupportedExportType(ref e) if e == "txt"));

        let err = validate_file_name("report.xlsx", &ExportPayload::Text(String::new())).unwrap_err();
        assert!(matches!(err, LedgerError::UnsupportedExportType(_)));

        assert_eq!(
            validate_file_name("Report_2024.CSV", &ExportPayload::Table(&ledger)).unwrap(),
            "Report_2024"
        );
    }
}
