//! Export and import of settings and bookmarks.
//!
//! Exports are pretty-printed [`ExportDocument`]s named
//! `startpage-export-YYYY-MM-DD.json`. Imports are parsed and validated in
//! full before the caller writes anything, so a bad file leaves storage
//! untouched.

use crate::domain::error::{Result, StartpageError};
use crate::domain::{Bookmark, Settings};
use crate::storage::json::write_atomic;
use crate::storage::models::{ExportDocument, ImportedData, StartpageData};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::path::{Path, PathBuf};

/// File name for an export made on `date`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use startpage::storage::export_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 7).expect("valid date");
/// assert_eq!(export_file_name(date), "startpage-export-2024-03-07.json");
/// ```
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("startpage-export-{}.json", date.format("%Y-%m-%d"))
}

/// Builds the export document for `data`, stamped with `now`.
///
/// The timestamp is RFC 3339 in UTC with millisecond precision
/// (`2024-03-07T10:15:00.123Z`).
#[must_use]
pub fn build_export(data: &StartpageData, now: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        config: data.settings.clone(),
        bookmarks: data.bookmarks.clone(),
        export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Writes an export of `data` into `dir` and returns the file path.
///
/// An existing export from the same day is replaced.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
pub fn write_export(dir: &Path, data: &StartpageData, now: DateTime<Utc>) -> Result<PathBuf> {
    let _span = tracing::debug_span!("write_export", dir = ?dir).entered();

    std::fs::create_dir_all(dir)?;

    let document = build_export(data, now);
    let path = dir.join(export_file_name(now.date_naive()));
    let json = serde_json::to_string_pretty(&document)?;
    write_atomic(&path, &json)?;

    tracing::debug!(path = ?path, bookmark_count = document.bookmarks.len(), "export written");
    Ok(path)
}

/// Parses and validates an import document.
///
/// The document must be a JSON object with a `config` object, a `bookmarks`
/// array, or both. A `null` member counts as absent. Extra members such as
/// `exportDate` are ignored.
///
/// # Errors
///
/// Returns [`StartpageError::Import`] if the text is not such a document.
///
/// # Examples
///
/// ```
/// use startpage::storage::parse_import;
///
/// let imported = parse_import(r#"{"bookmarks": []}"#)?;
/// assert!(imported.settings.is_none());
/// assert_eq!(imported.bookmarks, Some(vec![]));
///
/// assert!(parse_import("[]").is_err());
/// # Ok::<(), startpage::StartpageError>(())
/// ```
pub fn parse_import(contents: &str) -> Result<ImportedData> {
    let value: serde_json::Value = serde_json::from_str(contents)
        .map_err(|e| StartpageError::Import(format!("not valid JSON: {e}")))?;

    let serde_json::Value::Object(mut object) = value else {
        return Err(StartpageError::Import("expected a JSON object".to_string()));
    };

    let settings = match object.remove("config") {
        None | Some(serde_json::Value::Null) => None,
        Some(config) => Some(
            serde_json::from_value::<Settings>(config)
                .map_err(|e| StartpageError::Import(format!("invalid config: {e}")))?,
        ),
    };

    let bookmarks = match object.remove("bookmarks") {
        None | Some(serde_json::Value::Null) => None,
        Some(bookmarks) => Some(
            serde_json::from_value::<Vec<Bookmark>>(bookmarks)
                .map_err(|e| StartpageError::Import(format!("invalid bookmarks: {e}")))?,
        ),
    };

    if settings.is_none() && bookmarks.is_none() {
        return Err(StartpageError::Import(
            "neither config nor bookmarks present".to_string(),
        ));
    }

    Ok(ImportedData { settings, bookmarks })
}

/// Reads and validates an import file.
///
/// # Errors
///
/// Returns [`StartpageError::Io`] if the file cannot be read, or
/// [`StartpageError::Import`] if its contents are not a valid document.
pub fn read_import(path: &Path) -> Result<ImportedData> {
    let _span = tracing::debug_span!("read_import", path = ?path).entered();
    let contents = std::fs::read_to_string(path)?;
    parse_import(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::DataSource;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 7, 10, 15, 0).single().expect("valid time")
    }

    fn data() -> StartpageData {
        StartpageData {
            settings: Settings::default(),
            bookmarks: vec![Bookmark::new("GitHub", "https://github.com", ["dev"])],
            source: DataSource::Storage,
        }
    }

    #[test]
    fn export_date_has_millisecond_precision() {
        let document = build_export(&data(), fixed_now());
        assert_eq!(document.export_date, "2024-03-07T10:15:00.000Z");
    }

    #[test]
    fn export_then_import_restores_data() {
        let dir = TempDir::new().expect("tempdir");
        let path = write_export(dir.path(), &data(), fixed_now()).expect("export");
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("startpage-export-2024-03-07.json")
        );

        let imported = read_import(&path).expect("import");
        assert_eq!(imported.settings, Some(Settings::default()));
        assert_eq!(imported.bookmarks, Some(data().bookmarks));
    }

    #[test]
    fn rejects_documents_without_payload() {
        for contents in ["{}", r#"{"config": null, "bookmarks": null}"#, r#"{"exportDate": "x"}"#] {
            let err = parse_import(contents).expect_err(contents);
            assert!(matches!(err, StartpageError::Import(_)));
        }
    }

    #[test]
    fn rejects_wrong_shapes() {
        for contents in ["not json", "42", r#"{"bookmarks": {"name": "x"}}"#, r#"{"config": []}"#] {
            assert!(parse_import(contents).is_err(), "{contents} should be rejected");
        }
    }

    #[test]
    fn partial_config_is_accepted() {
        let imported = parse_import(r##"{"config": {"accentColor": "#a6e3a1"}}"##).expect("parse");
        let settings = imported.settings.expect("settings");
        assert_eq!(settings.accent_color, "#a6e3a1");
        assert!(imported.bookmarks.is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().expect("tempdir");
        let err = read_import(&dir.path().join("nope.json")).expect_err("missing");
        assert!(matches!(err, StartpageError::Io(_)));
    }
}
