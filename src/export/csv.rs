use crate::errors::{AppError, AppResult};
use crate::export::model::{
    MISSION_HEADERS, MissionRow, PROGRESS_LESSON_HEADERS, PROGRESS_SUMMARY_HEADERS, ProgressReport,
};
use csv::Writer;

fn csv_error(e: impl std::fmt::Display) -> AppError {
    AppError::Export(format!("CSV write error: {e}"))
}

/// One header row plus its records, as CSV text.
fn section<H, R>(headers: &[H], records: R) -> AppResult<String>
where
    H: AsRef<[u8]>,
    R: IntoIterator<Item = Vec<String>>,
{
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(headers).map_err(csv_error)?;
    for r in records {
        wtr.write_record(&r).map_err(csv_error)?;
    }
    let bytes = wtr.into_inner().map_err(csv_error)?;
    String::from_utf8(bytes).map_err(csv_error)
}

/// Summary table, a blank line, then the per-lesson table.
pub(crate) fn progress_csv(report: &ProgressReport) -> AppResult<String> {
    let summary = section(&PROGRESS_SUMMARY_HEADERS, [report.summary_record()])?;
    let lessons = section(
        &PROGRESS_LESSON_HEADERS,
        report.lessons.iter().map(|l| l.record()),
    )?;
    Ok(format!("{summary}\n{lessons}"))
}

pub(crate) fn missions_csv(rows: &[MissionRow]) -> AppResult<String> {
    section(&MISSION_HEADERS, rows.iter().map(|r| r.record()))
}
