use crate::export::model::{
    MISSION_HEADERS, MissionRow, PROGRESS_LESSON_HEADERS, PROGRESS_SUMMARY_HEADERS, ProgressReport,
};

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn table(headers: &[&str], rows: impl IntoIterator<Item = Vec<String>>) -> String {
    let mut out = String::new();
    out.push_str(&format!("| {} |\n", headers.join(" | ")));
    out.push_str(&format!(
        "|{}|\n",
        headers.iter().map(|_| "---").collect::<Vec<_>>().join("|")
    ));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| escape(c)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

pub(crate) fn progress_markdown(report: &ProgressReport) -> String {
    format!(
        "# Student Progress: {}\n\n{}\n## Lessons\n\n{}",
        report.student,
        table(&PROGRESS_SUMMARY_HEADERS, [report.summary_record()]),
        table(
            &PROGRESS_LESSON_HEADERS,
            report.lessons.iter().map(|l| l.record())
        ),
    )
}

pub(crate) fn missions_markdown(rows: &[MissionRow]) -> String {
    format!(
        "# Missions\n\n{}",
        table(&MISSION_HEADERS, rows.iter().map(|r| r.record()))
    )
}
