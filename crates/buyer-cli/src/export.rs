//! `buyer report` command
//!
//! Loads a report dump, resolves the destination and hands the report to the
//! xlsx renderer. Persistence lives elsewhere; this command only sees the
//! JSON the data-assembly side produced.

use anyhow::{Context, Result};
use buyer_core::{ProcurementReport, ReportSection};
use buyer_render::XlsxRenderer;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Resolved arguments of the `report` command
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub sections: Vec<ReportSection>,
    pub title: Option<String>,
    pub no_summary: bool,
}

/// Export the report and return the absolute path written
pub fn run(options: &ExportOptions) -> Result<PathBuf> {
    let mut report = load_report(&options.input)?;
    if let Some(title) = &options.title {
        report.title.clone_from(title);
    }

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&report.generated_at));
    let output = absolute(&output)?;
    if !has_xlsx_extension(&output) {
        warn!(path = %output.display(), "output does not end in .xlsx");
    }

    let mut renderer = XlsxRenderer::new();
    if !options.sections.is_empty() {
        renderer = renderer.sections(options.sections.iter().copied());
    }
    if options.no_summary {
        renderer = renderer.no_summary();
    }

    info!(
        input = %options.input.display(),
        output = %output.display(),
        records = report.record_count(),
        "exporting report"
    );
    renderer
        .write_to_path(&report, &output)
        .context("Error exporting report to Excel")?;

    Ok(output)
}

fn load_report(path: &Path) -> Result<ProcurementReport> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report data: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid report data in {}", path.display()))
}

/// `procurement_report_YYYYMMDD_HHMMSS.xlsx` in the current directory
pub fn default_output_path(timestamp: &DateTime<Utc>) -> PathBuf {
    PathBuf::from(format!(
        "procurement_report_{}.xlsx",
        timestamp.format("%Y%m%d_%H%M%S")
    ))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    Ok(cwd.join(path))
}

fn has_xlsx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_output_path_uses_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap();
        assert_eq!(
            default_output_path(&at),
            PathBuf::from("procurement_report_20250307_140509.xlsx")
        );
    }

    #[test]
    fn xlsx_extension_check() {
        assert!(has_xlsx_extension(Path::new("out/report.xlsx")));
        assert!(has_xlsx_extension(Path::new("REPORT.XLSX")));
        assert!(!has_xlsx_extension(Path::new("report.csv")));
        assert!(!has_xlsx_extension(Path::new("report")));
    }

    #[test]
    fn absolute_keeps_absolute_paths() {
        let cwd = std::env::current_dir().unwrap();
        let abs = cwd.join("a.xlsx");
        assert_eq!(absolute(&abs).unwrap(), abs);
        assert_eq!(absolute(Path::new("a.xlsx")).unwrap(), abs);
    }

    #[test]
    fn missing_input_is_reported() {
        let options = ExportOptions {
            input: PathBuf::from("/definitely/not/here.json"),
            output: None,
            sections: Vec::new(),
            title: None,
            no_summary: false,
        };
        let err = run(&options).unwrap_err();
        assert!(err.to_string().contains("Failed to read report data"));
    }
}
