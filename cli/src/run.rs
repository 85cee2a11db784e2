//! One report, end to end.
//!
//! # Workflow
//!
//! 1. Load the instrument catalog (`--catalog` or the built-in list).
//! 2. Select the spreadsheet, template and images; each selection is validated.
//! 3. Fill the header fields, the start/end moments and the measurement rows.
//! 4. Submit. Ctrl-C while the upload is running abandons it.
//! 5. Download the generated document into `--output-dir`, unless `--no-download`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, anyhow};

use common::error::FormError;
use common::model::catalog::MeasurementCatalog;
use common::session::{FormSession, FormVariant, SubmitOutcome};

use crate::config::Cli;
use crate::endpoint::HttpEndpoint;
use crate::local_file;
use crate::presenter::DirectoryPresenter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// URL of the generated document as returned by the service.
    pub download_url: String,
    /// Where the document was saved; `None` with `--no-download`.
    pub saved_to: Option<PathBuf>,
}

pub async fn run(cli: Cli) -> anyhow::Result<RunReport> {
    let catalog = load_catalog(&cli).await?;
    let variant = if cli.template.is_some() {
        FormVariant::WithTemplate
    } else {
        FormVariant::SpreadsheetOnly
    };
    let mut session = FormSession::new(variant, catalog);

    fill_session(&mut session, &cli).await?;

    let endpoint = HttpEndpoint::new(&cli.server, Duration::from_secs(cli.timeout_secs))?;
    log::info!("submitting {} to {}", cli.file.display(), cli.server);

    let outcome = tokio::select! {
        outcome = session.submit(&endpoint) => outcome?,
        _ = tokio::signal::ctrl_c() => return Err(FormError::Cancelled.into()),
    };
    let download_url = match outcome {
        SubmitOutcome::Completed { download_url } => download_url,
        SubmitOutcome::Skipped => {
            let missing = session
                .missing_requirement()
                .unwrap_or(FormError::MissingFile("the input files"));
            return Err(missing.into());
        }
    };
    log::info!("{}", session.success().unwrap_or_default());

    if cli.no_download {
        return Ok(RunReport {
            download_url,
            saved_to: None,
        });
    }

    let presenter = DirectoryPresenter::new(&cli.output_dir);
    let filename = session
        .download(&endpoint, &presenter)
        .await?
        .ok_or_else(|| anyhow!("the service returned no document"))?;

    Ok(RunReport {
        download_url,
        saved_to: Some(presenter.target_path(&filename)),
    })
}

async fn load_catalog(cli: &Cli) -> anyhow::Result<MeasurementCatalog> {
    let Some(path) = &cli.catalog else {
        return Ok(MeasurementCatalog::builtin());
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read catalog {}", path.display()))?;
    let catalog = MeasurementCatalog::from_json(&text)
        .with_context(|| format!("malformed catalog {}", path.display()))?;
    log::info!("loaded {} instrument(s) from {}", catalog.len(), path.display());
    Ok(catalog)
}

async fn fill_session(session: &mut FormSession<PathBuf>, cli: &Cli) -> anyhow::Result<()> {
    let primary = local_file::open(&cli.file).await?;
    session
        .select_primary(Some(primary))
        .with_context(|| format!("rejected {}", cli.file.display()))?;

    if let Some(path) = &cli.template {
        let template = local_file::open(path).await?;
        session
            .select_template(Some(template))
            .with_context(|| format!("rejected {}", path.display()))?;
    }

    let mut images = Vec::with_capacity(cli.images.len());
    for path in &cli.images {
        images.push(local_file::open(path).await?);
    }
    if !images.is_empty() {
        session.select_images(images).context("rejected images")?;
    }

    for (field, value) in cli.header_values() {
        session.set_field(field, value);
    }
    if let Some(start) = &cli.start {
        session.set_start(start.clone());
    }
    if let Some(end) = &cli.end {
        session.set_end(end.clone());
    }

    for (position, arg) in cli.measurements.iter().enumerate() {
        let index = if position == 0 { 0 } else { session.add_row() };
        if !session.on_row_measurement_changed(index, arg.name.as_str())? {
            log::warn!("{:?} is not in the instrument catalog", arg.name);
        }
        if let Some(no) = &arg.certificate_no {
            session.set_row_certificate_no(index, no.as_str())?;
        }
        if let Some(date) = &arg.certificate_date {
            session.set_row_certificate_date(index, date.as_str())?;
        }
    }
    Ok(())
}
