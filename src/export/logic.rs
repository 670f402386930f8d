use crate::api::{MissionFilter, SchoolApi};
use crate::core::suggestions::enrollment_progress;
use crate::errors::{AppError, AppResult};
use crate::export::csv::{missions_csv, progress_csv};
use crate::export::fs_utils::ensure_writable;
use crate::export::json::to_json;
use crate::export::markdown::{missions_markdown, progress_markdown};
use crate::export::model::{MissionRow, ProgressReport};
use crate::export::{ExportFormat, ReportKind, notify_export_success};
use crate::models::mission::Mission;
use crate::ui::messages::{info, warning};
use crate::utils::date::{parse_range, today};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub report: ReportKind,
    pub format: ExportFormat,
    pub file: String,
    pub enrollment_id: Option<i64>,
    /// `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or `start:end`; `all` or none for everything.
    pub range: Option<String>,
    pub force: bool,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    pub fn export<A: SchoolApi + ?Sized>(api: &A, req: &ExportRequest) -> AppResult<()> {
        let path = Path::new(&req.file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {}",
                req.file
            )));
        }

        ensure_writable(path, req.force)?;

        let content = match req.report {
            ReportKind::Progress => {
                let id = req.enrollment_id.ok_or_else(|| {
                    AppError::Validation("The progress report needs --enrollment".into())
                })?;
                let report = Self::progress_report(api, id)?;
                match req.format {
                    ExportFormat::Csv => progress_csv(&report)?,
                    ExportFormat::Markdown => progress_markdown(&report),
                    ExportFormat::Json => to_json(&report)?,
                }
            }
            ReportKind::Missions => {
                let rows = Self::mission_rows(api, req.enrollment_id, req.range.as_deref())?;
                if rows.is_empty() {
                    warning("No missions found for the selected filters.");
                    return Ok(());
                }
                match req.format {
                    ExportFormat::Csv => missions_csv(&rows)?,
                    ExportFormat::Markdown => missions_markdown(&rows),
                    ExportFormat::Json => to_json(&rows)?,
                }
            }
        };

        info(format!(
            "Exporting to {}: {}",
            req.format.label(),
            path.display()
        ));
        fs::write(path, content)?;

        if let Err(e) = api.audit(
            "export",
            &path.display().to_string(),
            &format!("{:?} report as {}", req.report, req.format.as_str()),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        notify_export_success(req.format.label(), path);
        Ok(())
    }

    pub fn progress_report<A: SchoolApi + ?Sized>(
        api: &A,
        enrollment_id: i64,
    ) -> AppResult<ProgressReport> {
        let enrollment = api.enrollment(enrollment_id)?;
        let progress = enrollment_progress(api, enrollment_id)?;
        let lessons = api.enrollment_lessons(enrollment_id)?;
        let completed = api.completed_lesson_ids(enrollment_id)?;

        Ok(ProgressReport::build(
            &enrollment,
            &lessons,
            &completed,
            &progress,
            today(),
        ))
    }

    pub fn mission_rows<A: SchoolApi + ?Sized>(
        api: &A,
        enrollment_id: Option<i64>,
        range: Option<&str>,
    ) -> AppResult<Vec<MissionRow>> {
        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let filter = MissionFilter {
            enrollment_id,
            start_date: bounds.map(|b| b.0),
            end_date: bounds.map(|b| b.1),
            ..Default::default()
        };
        let missions = api.missions(&filter)?;

        let tails: HashMap<i64, String> = api
            .list_aircraft()?
            .into_iter()
            .map(|a| (a.id, a.tail_number))
            .collect();
        let students: HashMap<i64, String> = api
            .list_enrollments()?
            .into_iter()
            .map(|e| (e.id, e.student_name))
            .collect();

        let mut titles: HashMap<i64, String> = HashMap::new();
        let mut rows = Vec::with_capacity(missions.len());
        for m in &missions {
            let title = Self::mission_title(api, m, &mut titles)?;
            rows.push(MissionRow {
                mission_code: m.mission_code.clone(),
                date: m.date_str(),
                start_time: m.scheduled_start_time.clone().unwrap_or_default(),
                mission_type: m.mission_type.label().to_string(),
                status: m.status.to_db_str().to_string(),
                student: students.get(&m.enrollment_id).cloned().unwrap_or_default(),
                lesson_code: m.lesson_code.clone().unwrap_or_default(),
                title,
                aircraft: m
                    .aircraft_id
                    .and_then(|id| tails.get(&id).cloned())
                    .unwrap_or_default(),
                assessment: m
                    .assessment
                    .map(|a| a.to_db_str().to_string())
                    .unwrap_or_default(),
            });
        }
        Ok(rows)
    }

    fn mission_title<A: SchoolApi + ?Sized>(
        api: &A,
        m: &Mission,
        cache: &mut HashMap<i64, String>,
    ) -> AppResult<String> {
        if let Some(c) = &m.custom
            && !c.title.trim().is_empty()
        {
            return Ok(c.title.clone());
        }
        let Some(lesson_id) = m.lesson_id else {
            return Ok(String::new());
        };
        if let Some(t) = cache.get(&lesson_id) {
            return Ok(t.clone());
        }
        let title = api.lesson(lesson_id)?.title;
        cache.insert(lesson_id, title.clone());
        Ok(title)
    }
}
