use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use moneta::{MonetaError, Region, month_start};

#[derive(Parser, Debug)]
#[command(
    name = "moneta",
    version,
    about = "Money supply, GDP, CPI and the velocity of money by region"
)]
pub struct Cli {
    /// TOML configuration file (sections `[moneta]` and `[sources]`)
    #[arg(long, global = true, env = "MONETA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the locally downloaded CSV files (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aligned monthly frame of one region as CSV
    Frame {
        /// Region code: us, eu, ch, uk or jp
        #[arg(long)]
        region: Region,

        /// Print year-over-year growth of m3, gdp and v instead of levels
        #[arg(long, default_value_t = false)]
        growth: bool,

        /// Drop rows before this month (YYYY-MM, or any day within it as YYYY-MM-DD)
        #[arg(long, value_parser = parse_month)]
        since: Option<NaiveDate>,

        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Recession periods, one `start,end` row per period
    Recessions,

    /// Build frames for several regions, one `<region>.csv` per region
    Download {
        /// Comma-separated region codes
        #[arg(long, value_delimiter = ',', default_values_t = Region::ALL)]
        regions: Vec<Region>,

        /// Output directory, created if missing
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
    },

    /// Indicator listing of the first catalog source as CSV
    Indicators,
}

fn parse_month(raw: &str) -> Result<NaiveDate, MonetaError> {
    moneta_sources::parse_period(raw, None).map(month_start)
}
