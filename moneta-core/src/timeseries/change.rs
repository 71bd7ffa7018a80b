use moneta_types::{Frame, FrameRow, MonetaError};

use super::resample::shift_months;

/// Relative change of each selected column against its value `months` earlier.
///
/// The comparison date is found on the calendar rather than by row position,
/// which is equivalent on a contiguous monthly index and stays correct when
/// the index has holes. A cell is `None` when either value is missing or the
/// base is zero. The output keeps every row of the input.
///
/// # Errors
/// Returns `InvalidArg` if a requested column does not exist.
pub fn pct_change(frame: &Frame, columns: &[&str], months: i32) -> Result<Frame, MonetaError> {
    let selected = frame.select(columns)?;
    let rows = selected
        .rows()
        .iter()
        .map(|r| {
            let base_date = shift_months(r.date, -months);
            let values = columns
                .iter()
                .zip(&r.values)
                .map(|(col, cur)| {
                    let base = base_date.and_then(|d| selected.value(d, col))?;
                    let cur = (*cur)?;
                    (cur - base).checked_div(base)
                })
                .collect();
            FrameRow {
                date: r.date,
                values,
            }
        })
        .collect();
    Frame::from_rows(selected.columns().to_vec(), rows)
}

/// Year-over-year change: [`pct_change`] over twelve months.
///
/// # Errors
/// Returns `InvalidArg` if a requested column does not exist.
pub fn year_over_year(frame: &Frame, columns: &[&str]) -> Result<Frame, MonetaError> {
    pct_change(frame, columns, 12)
}
