//! CSV report output.

use crate::{catalog::ResultRecord,
            error::{Result, ScraperError}};
use chrono::NaiveDate;
use std::{fs,
          path::{Path, PathBuf}};

/// Header row of every report
pub const HEADERS: [&str; 3] = ["url", "featuredContentVisible", "scope"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Written in the scope column when a product has no scope
const NO_SCOPE: &str = "false";

/// Format a date as zero-padded `YYYY-MM-DD`
pub fn report_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_report_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|e| {
        ScraperError::InvalidArgument(format!("'{}' is not a YYYY-MM-DD date: {}", input, e))
    })
}

/// `<YYYY-MM-DD>-<locale>.csv`
pub fn report_file_name(date: NaiveDate, locale: &str) -> String {
    format!("{}-{}.csv", report_date(date), locale)
}

/// Write the report into `dir`, replacing any existing report for the same date and locale.
///
/// Returns the path written.
pub fn write_report(dir: &Path, date: NaiveDate, locale: &str, records: &[ResultRecord]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(date, locale));

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(&path)?;
    writer.write_record(HEADERS)?;

    for record in records {
        let visible = if record.featured_content_visible { "true" } else { "false" };
        let scope = record.scope.as_deref().unwrap_or(NO_SCOPE);
        writer.write_record([record.url.as_str(), visible, scope])?;
    }

    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_report_date_zero_padded() {
        assert_eq!(report_date(date(2024, 3, 7)), "2024-03-07");
        assert_eq!(report_date(date(1999, 12, 31)), "1999-12-31");
    }

    #[test]
    fn test_parse_report_date() {
        assert_eq!(parse_report_date("2024-03-07").unwrap(), date(2024, 3, 7));
        assert_eq!(parse_report_date(&report_date(date(2020, 2, 29))).unwrap(), date(2020, 2, 29));
    }

    #[test]
    fn test_parse_report_date_rejects_non_dates() {
        for input in ["", "yesterday", "2024-13-01", "2023-02-29", "07/03/2024"] {
            assert!(
                matches!(parse_report_date(input), Err(ScraperError::InvalidArgument(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name(date(2024, 1, 2), "de"), "2024-01-02-de.csv");
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(dir.path(), date(2024, 5, 1), "us", &[]).unwrap();

        assert_eq!(path, dir.path().join("2024-05-01-us.csv"));
        assert_eq!(fs::read_to_string(path).unwrap(), "url,featuredContentVisible,scope\n");
    }

    #[test]
    fn test_rows_and_scope_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            ResultRecord { url: "/a".to_string(), featured_content_visible: true, scope: Some("seasonal".to_string()) },
            ResultRecord::absent("/b"),
            ResultRecord { url: "/c,d".to_string(), featured_content_visible: true, scope: None },
        ];

        let path = write_report(dir.path(), date(2024, 5, 1), "us", &records).unwrap();
        let content = fs::read_to_string(path).unwrap();

        assert_eq!(
            content,
            "url,featuredContentVisible,scope\n/a,true,seasonal\n/b,false,false\n\"/c,d\",true,false\n"
        );
    }

    #[test]
    fn test_rerun_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        write_report(dir.path(), date(2024, 5, 1), "us", &[ResultRecord::absent("/old")]).unwrap();
        let path = write_report(dir.path(), date(2024, 5, 1), "us", &[]).unwrap();

        assert!(!fs::read_to_string(path).unwrap().contains("/old"));
    }
}
