use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use moneta::{Frame, IndicatorInfo, MonetaError, Span};

const DATE_FORMAT: &str = "%Y-%m-%d";
const INDICATOR_HEADER: [&str; 6] = ["id", "label", "description", "source", "unit", "dataset"];

/// Buffered writer to `path`, or stdout when `None`. Parent directories are created.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, MonetaError> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| MonetaError::io(parent.display().to_string(), e))?;
    }
    let file = File::create(path).map_err(|e| MonetaError::io(path.display().to_string(), e))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Frame as CSV: a `date` column followed by the frame columns; missing cells are empty.
pub fn write_frame<W: Write>(frame: &Frame, out: W) -> Result<(), MonetaError> {
    let mut w = csv::Writer::from_writer(out);
    let mut header = vec!["date"];
    header.extend(frame.columns().iter().map(String::as_str));
    w.write_record(&header)?;
    for row in frame.rows() {
        let mut record = Vec::with_capacity(row.values.len() + 1);
        record.push(row.date.format(DATE_FORMAT).to_string());
        record.extend(
            row.values
                .iter()
                .map(|v| v.map(|d| d.normalize().to_string()).unwrap_or_default()),
        );
        w.write_record(&record)?;
    }
    w.flush().map_err(|e| MonetaError::io("output", e))
}

/// Recession periods as `start,end` rows.
pub fn write_periods<W: Write>(periods: &[Span], out: W) -> Result<(), MonetaError> {
    let mut w = csv::Writer::from_writer(out);
    w.write_record(["start", "end"])?;
    for p in periods {
        w.write_record([
            p.start.format(DATE_FORMAT).to_string(),
            p.end.format(DATE_FORMAT).to_string(),
        ])?;
    }
    w.flush().map_err(|e| MonetaError::io("output", e))
}

/// Indicator listing with one column per `IndicatorInfo` field.
pub fn write_indicators<W: Write>(list: &[IndicatorInfo], out: W) -> Result<(), MonetaError> {
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    w.write_record(INDICATOR_HEADER)?;
    for info in list {
        w.serialize(info)?;
    }
    w.flush().map_err(|e| MonetaError::io("output", e))
}
