use std::sync::Arc;

use chrono::NaiveDate;
use moneta_core::{
    Indicator, MonetaConnector, MonetaError, Region, RegionSpec, SeriesRequest, SeriesSource,
    SourcesConfig,
};

use crate::adapter::{HttpFetch, RealAdapter};
use crate::parse::CsvLayout;
use crate::{
    BoeConnector, CsvFileConnector, EcbConnector, FredConnector, ImfConnector, SnbConnector,
};

/// FRED series flagging US recession months (NBER dating), shared by every region.
#[must_use]
pub fn recession_source() -> SeriesSource {
    SeriesSource::new(FredConnector::KEY, SeriesRequest::new("USREC"))
}

fn csv(id: &str) -> SeriesSource {
    SeriesSource::new(CsvFileConnector::KEY, SeriesRequest::new(id))
}

fn fred(id: &str) -> SeriesSource {
    SeriesSource::new(FredConnector::KEY, SeriesRequest::new(id))
}

fn ecb(flow: &str, key: &str) -> SeriesSource {
    SeriesSource::new(EcbConnector::KEY, SeriesRequest::new(format!("{flow}/{key}")))
}

fn snb(cube: &str, dims: &str) -> SeriesSource {
    let mut req = SeriesRequest::new(cube).with_param("dimSel", dims);
    if let Some(from) = NaiveDate::from_ymd_opt(1980, 1, 1) {
        req = req.starting(from);
    }
    SeriesSource::new(SnbConnector::KEY, req)
}

fn boe(code: &str) -> SeriesSource {
    SeriesSource::new(BoeConnector::KEY, SeriesRequest::new(code))
}

/// Source wiring for one region.
#[must_use]
pub fn region_spec(region: Region) -> RegionSpec {
    let spec = RegionSpec::new(region);
    match region {
        Region::Us => spec
            .with_source(Indicator::M3, csv("m3-us"))
            .with_source(Indicator::Gdp, fred("GDP"))
            .with_source(Indicator::Cpi, fred("CPIAUCSL")),
        Region::Eu => spec
            .with_source(Indicator::M3, ecb("BSI", "M.U2.N.V.M30.X.1.U2.2300.Z01.E"))
            .with_source(
                Indicator::Gdp,
                ecb("MNA", "Q.N.U2.W2.S1.S1.B.B1GQ._Z._Z._Z.EUR.V.N"),
            )
            .with_source(Indicator::Cpi, ecb("ICP", "M.U2.N.000000.4.INX")),
        Region::Ch => spec
            .with_source(Indicator::M3, snb("snbmonagg", "D0(B),D1(GM3)"))
            .with_source(Indicator::Gdp, snb("gdpap", "D0(WMF),D1(BBIPS)"))
            .with_source(Indicator::Cpi, snb("plkopr", "D0(LD2010100)")),
        // M4 excluding intermediate OFCs stands in for M3.
        Region::Uk => spec
            .with_source(Indicator::M3, boe("LPMAUYN"))
            .with_source(Indicator::Gdp, csv("gdp-gb"))
            .with_source(Indicator::Cpi, csv("cpi-gb")),
        Region::Jp => spec
            .with_source(Indicator::M3, csv("m3-jp"))
            .with_source(Indicator::Gdp, fred("JPNNGDP"))
            .with_source(Indicator::Cpi, csv("cpi-jp")),
    }
}

/// Source wiring for every supported region.
#[must_use]
pub fn default_catalog() -> Vec<RegionSpec> {
    Region::ALL.into_iter().map(region_spec).collect()
}

/// The local files the default catalog reads, registered against `data_dir`.
pub fn default_csv_files(data_dir: impl Into<std::path::PathBuf>) -> CsvFileConnector {
    CsvFileConnector::new(data_dir)
        .with_file(
            "m3-us",
            "m3-us.csv",
            CsvLayout::named("Date", "m3").delimiter(b';'),
        )
        .with_file("gdp-gb", "gdp-gb.csv", CsvLayout::positional().skip_rows(84))
        .with_file("cpi-gb", "cpi-gb.csv", CsvLayout::positional().skip_rows(190))
        .with_file(
            "m3-jp",
            "m3-jp.csv",
            CsvLayout::positional().skip_rows(3).date_format("%Y/%m"),
        )
        .with_file(
            "cpi-jp",
            "jp-cpi-e-stat.csv",
            CsvLayout::named("Date", "CPI (2020=100)"),
        )
}

/// Build every connector the default catalog refers to.
///
/// The FRED API key comes from the configuration, falling back to the
/// `FRED_API_KEY` environment variable.
///
/// # Errors
/// Returns an error if the HTTP client cannot be constructed.
pub fn default_connectors(
    cfg: &SourcesConfig,
) -> Result<Vec<Arc<dyn MonetaConnector>>, MonetaError> {
    let http: Arc<dyn HttpFetch> = Arc::new(RealAdapter::new(&cfg.user_agent)?);
    let fred_key = cfg
        .fred_api_key
        .clone()
        .or_else(|| std::env::var("FRED_API_KEY").ok())
        .filter(|k| !k.trim().is_empty());
    let ep = &cfg.endpoints;
    Ok(vec![
        Arc::new(default_csv_files(cfg.data_dir.clone())) as Arc<dyn MonetaConnector>,
        Arc::new(EcbConnector::new(Arc::clone(&http), ep.ecb.clone())),
        Arc::new(SnbConnector::new(Arc::clone(&http), ep.snb.clone())),
        Arc::new(BoeConnector::new(Arc::clone(&http), ep.boe.clone())),
        Arc::new(FredConnector::new(Arc::clone(&http), ep.fred.clone(), fred_key)),
        Arc::new(ImfConnector::new(http, ep.imf.clone())),
    ])
}
