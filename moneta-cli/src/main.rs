use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use moneta::{Moneta, MonetaError, Region};
use moneta_mock::{MockConnector, mock_catalog, mock_recession_source};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod output;

use cli::{Cli, Command};
use config::CliConfig;

/// Serve fixture data instead of hitting the statistical APIs.
const USE_MOCK_ENV: &str = "MONETA_USE_MOCK";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn use_mock() -> bool {
    std::env::var(USE_MOCK_ENV).is_ok_and(|v| !v.trim().is_empty())
}

fn build_moneta(cfg: &CliConfig) -> Result<Moneta, MonetaError> {
    let builder = Moneta::builder().config(cfg.moneta.clone());
    if use_mock() {
        tracing::info!("using mock connector");
        return builder
            .with_connector(Arc::new(MockConnector::new()))
            .with_regions(mock_catalog())
            .recession_source(mock_recession_source())
            .build();
    }
    moneta_sources::default_connectors(&cfg.sources)?
        .into_iter()
        .fold(builder, |b, c| b.with_connector(c))
        .with_regions(moneta_sources::default_catalog())
        .recession_source(moneta_sources::recession_source())
        .build()
}

/// Print each underlying failure on its own line; missing data is only a note.
fn report_warnings<'a>(region: Region, warnings: impl IntoIterator<Item = &'a MonetaError>) {
    for w in warnings.into_iter().cloned().flat_map(MonetaError::flatten) {
        let level = if w.is_actionable() { "warning" } else { "note" };
        eprintln!("{level}: {region}: {w}");
    }
}

async fn run(cli: Cli, moneta: &Moneta) -> Result<(), MonetaError> {
    match cli.command {
        Command::Frame {
            region,
            growth,
            since,
            out,
        } => {
            let report = moneta.region_frame(region).await?;
            report_warnings(region, &report.warnings);
            for attr in &report.attribution {
                for (connector, span) in &attr.spans {
                    tracing::debug!(series = %attr.series, %connector, start = %span.start, end = %span.end, "source span");
                }
            }
            let mut frame = if growth {
                moneta.growth(&report.frame)?
            } else {
                report.frame
            };
            if let Some(since) = since {
                frame = frame.since(since);
            }
            output::write_frame(&frame, output::open_output(out.as_deref())?)
        }
        Command::Recessions => {
            let periods = moneta.recession_periods().await?;
            output::write_periods(&periods, output::open_output(None)?)
        }
        Command::Download { regions, out_dir } => {
            let report = moneta.download(&regions).await?;
            for (region, err) in &report.warnings {
                report_warnings(*region, [err]);
            }
            if report.frames.is_empty() {
                return Err(MonetaError::AllProvidersFailed(
                    report.warnings.into_iter().map(|(_, e)| e).collect(),
                ));
            }
            for (region, fr) in &report.frames {
                let path = out_dir.join(format!("{}.csv", region.code()));
                output::write_frame(&fr.frame, output::open_output(Some(&path))?)?;
                tracing::info!(region = %region, path = %path.display(), rows = fr.frame.len(), "wrote frame");
            }
            Ok(())
        }
        Command::Indicators => {
            let list = moneta.indicators().await?;
            output::write_indicators(&list, output::open_output(None)?)
        }
    }
}

async fn try_main(cli: Cli) -> Result<(), MonetaError> {
    let mut cfg = CliConfig::load(cli.config.as_deref())?;
    cfg.apply_overrides(cli.data_dir.clone(), std::env::var("FRED_API_KEY").ok());
    let moneta = build_moneta(&cfg)?;
    run(cli, &moneta).await
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match try_main(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
