//! Command-line configuration.
//!
//! Every report field has its own flag. `--server`, `--output-dir` and `--catalog` fall
//! back to `REPORT_SERVER`, `REPORT_OUTPUT_DIR` and `REPORT_CATALOG`.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use clap::Parser;

use common::model::report::{DateTimeParts, ReportField};

#[derive(Parser, Debug, Clone)]
#[command(name = "report-cli")]
#[command(version, about = "Submit a measurement spreadsheet and download the generated report")]
pub struct Cli {
    /// Measurement spreadsheet (.xls or .xlsx)
    #[arg(long)]
    pub file: PathBuf,

    /// DOCX template; when given it is required to be valid and is uploaded with the data
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Attachment image, repeatable
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,

    /// Instrument row as NAME[,CERT_NO[,CERT_DATE]], repeatable
    #[arg(long = "measurement")]
    pub measurements: Vec<MeasurementArg>,

    #[arg(long)]
    pub report_no: Option<String>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub address_of_client: Option<String>,
    #[arg(long)]
    pub applicant: Option<String>,
    #[arg(long)]
    pub address_of_applicant: Option<String>,
    #[arg(long)]
    pub test_site: Option<String>,
    #[arg(long)]
    pub voltage: Option<String>,
    #[arg(long)]
    pub spot: Option<String>,

    /// Test start, "YYYY-MM-DD HH:MM" or "YYYY-MM-DD"
    #[arg(long, value_parser = parse_moment)]
    pub start: Option<DateTimeParts>,

    /// Test end, same format as --start
    #[arg(long, value_parser = parse_moment)]
    pub end: Option<DateTimeParts>,

    /// JSON instrument catalog replacing the built-in list
    #[arg(long, env = "REPORT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Directory the generated report is saved into
    #[arg(long, env = "REPORT_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Print the download URL instead of fetching the document
    #[arg(long)]
    pub no_download: bool,

    /// Base URL of the report service
    #[arg(long, env = "REPORT_SERVER", default_value = "http://127.0.0.1:8080")]
    pub server: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "120")]
    pub timeout_secs: u64,
}

impl Cli {
    /// Header fields given on the command line, paired with their form field.
    pub fn header_values(&self) -> Vec<(ReportField, &str)> {
        [
            (ReportField::ReportNo, &self.report_no),
            (ReportField::Client, &self.client),
            (ReportField::AddressOfClient, &self.address_of_client),
            (ReportField::Applicant, &self.applicant),
            (ReportField::AddressOfApplicant, &self.address_of_applicant),
            (ReportField::TestSite, &self.test_site),
            (ReportField::Voltage, &self.voltage),
            (ReportField::Spot, &self.spot),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

/// One `--measurement` value. Certificate parts, when given, override the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementArg {
    pub name: String,
    pub certificate_no: Option<String>,
    pub certificate_date: Option<String>,
}

impl FromStr for MeasurementArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ',').map(str::trim);
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err("measurement name must not be empty".to_string());
        }
        let mut optional = || parts.next().filter(|p| !p.is_empty()).map(str::to_string);
        let certificate_no = optional();
        let certificate_date = optional();

        Ok(Self {
            name: name.to_string(),
            certificate_no,
            certificate_date,
        })
    }
}

/// Parses a moment into the separately submitted components.
pub fn parse_moment(s: &str) -> Result<DateTimeParts, String> {
    let s = s.trim();
    let moment = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").ok())
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("expected \"YYYY-MM-DD HH:MM\" or \"YYYY-MM-DD\", got {s:?}"))?;

    Ok(DateTimeParts {
        year: moment.year().to_string(),
        month: moment.month().to_string(),
        day: moment.day().to_string(),
        hour: moment.hour().to_string(),
        minute: moment.minute().to_string(),
    })
}
