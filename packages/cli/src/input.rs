//! Report input.
//!
//! Input is a JSON array of report documents, read from a file or from
//! stdin when the path is `-`.

use std::io::Read as _;
use std::path::Path;

use buurtkompas_report_models::{Report, municipality};

use crate::CliError;

/// Parses a JSON array of reports.
///
/// Reports with an unknown municipality are kept but logged.
///
/// # Errors
///
/// Returns [`CliError::Json`] if the text is not an array of reports, or a
/// location has non-finite coordinates.
pub fn parse_reports(text: &str) -> Result<Vec<Report>, CliError> {
    let reports: Vec<Report> = serde_json::from_str(text)?;

    for report in &reports {
        if let Some(id) = &report.municipality_id
            && !municipality::is_valid(id)
        {
            log::warn!("Report {} has unknown municipality '{id}'", report.id);
        }
    }

    let unlocated = reports.iter().filter(|r| r.location.is_none()).count();
    log::debug!(
        "Parsed {} reports ({unlocated} without location)",
        reports.len()
    );

    Ok(reports)
}

/// Reads reports from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// * If the input cannot be read
/// * If the input is not a valid report array
pub fn load_reports(path: &Path) -> Result<Vec<Report>, CliError> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        log::debug!("Reading reports from {}", path.display());
        std::fs::read_to_string(path)?
    };
    parse_reports(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documents_with_defaults() {
        let reports = parse_reports(
            r#"[
                {
                    "id": "r1",
                    "authorId": "u1",
                    "category": "verlichting",
                    "status": "in_progress",
                    "likes": 4,
                    "location": { "latitude": 51.44, "longitude": 5.47 },
                    "municipalityId": "eindhoven",
                    "createdAt": "2024-05-01T10:00:00Z"
                },
                { "id": "r2" }
            ]"#,
        )
        .unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].likes, 4);
        assert!(reports[0].created_at.is_some());
        let point = reports[0].to_point();
        assert!((point.weight - 5.0).abs() < f64::EPSILON);

        assert!(reports[1].location.is_none());
        assert_eq!(reports[1].status, "open");
        assert!(reports[1].is_anonymous);
    }

    #[test]
    fn rejects_non_array() {
        assert!(matches!(
            parse_reports(r#"{ "id": "r1" }"#),
            Err(CliError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_reports(Path::new("/nonexistent/buurtkompas/reports.json")),
            Err(CliError::Io(_))
        ));
    }
}
