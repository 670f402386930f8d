use crate::core::calculator::progress::LessonProgress;
use crate::models::enrollment::Enrollment;
use crate::models::lesson::Lesson;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

pub(crate) const PROGRESS_SUMMARY_HEADERS: [&str; 7] = [
    "Syllabus",
    "Start Date",
    "Instructor",
    "Progress %",
    "Total Lessons",
    "Completed Lessons",
    "Estimated Completion",
];

pub(crate) const PROGRESS_LESSON_HEADERS: [&str; 3] = ["Lesson", "Status", "Order"];

pub(crate) const MISSION_HEADERS: [&str; 10] = [
    "Mission Code",
    "Date",
    "Start Time",
    "Type",
    "Status",
    "Student",
    "Lesson Code",
    "Title",
    "Aircraft",
    "Assessment",
];

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LessonRow {
    pub lesson: String,
    pub status: String,
    pub order: i32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ProgressReport {
    pub syllabus: String,
    pub start_date: NaiveDate,
    pub instructor: String,
    pub student: String,
    pub progress_percent: f64,
    pub total_lessons: usize,
    pub completed_lessons: usize,
    pub estimated_completion: Option<NaiveDate>,
    pub lessons: Vec<LessonRow>,
}

/// Project the finish date from the pace so far. None before any progress,
/// after completion, or on the start day itself.
pub fn estimate_completion(start: NaiveDate, today: NaiveDate, percent: f64) -> Option<NaiveDate> {
    if percent <= 0.0 || percent >= 100.0 {
        return None;
    }
    let days_since_start = (today - start).num_days();
    if days_since_start <= 0 {
        return None;
    }
    let rate = percent / days_since_start as f64;
    let days_remaining = ((100.0 - percent) / rate).ceil() as i64;
    Some(today + Duration::days(days_remaining))
}

impl ProgressReport {
    pub fn build(
        enrollment: &Enrollment,
        lessons: &[Lesson],
        completed_ids: &HashSet<i64>,
        progress: &LessonProgress,
        today: NaiveDate,
    ) -> Self {
        let mut ordered: Vec<&Lesson> = lessons.iter().filter(|l| l.is_active).collect();
        ordered.sort_by_key(|l| l.order_index);

        // completed first, then pending, each in syllabus order
        let (done, pending): (Vec<&Lesson>, Vec<&Lesson>) = ordered
            .into_iter()
            .partition(|l| completed_ids.contains(&l.id));

        let row = |l: &Lesson, status: &str| LessonRow {
            lesson: l.title.clone(),
            status: status.to_string(),
            order: l.order_index,
        };

        let mut rows: Vec<LessonRow> = done.iter().map(|l| row(l, "Completed")).collect();
        rows.extend(pending.iter().map(|l| row(l, "Pending")));

        let percent = if progress.total_lessons == 0 {
            0.0
        } else {
            progress.completed_lessons as f64 / progress.total_lessons as f64 * 100.0
        };

        Self {
            syllabus: enrollment.syllabus.title.clone(),
            start_date: enrollment.start_date,
            instructor: enrollment.instructor_name.clone(),
            student: enrollment.student_name.clone(),
            progress_percent: percent,
            total_lessons: progress.total_lessons,
            completed_lessons: progress.completed_lessons,
            estimated_completion: estimate_completion(enrollment.start_date, today, percent),
            lessons: rows,
        }
    }

    pub(crate) fn summary_record(&self) -> Vec<String> {
        vec![
            self.syllabus.clone(),
            self.start_date.format("%Y-%m-%d").to_string(),
            self.instructor.clone(),
            format!("{:.1}", self.progress_percent),
            self.total_lessons.to_string(),
            self.completed_lessons.to_string(),
            self.estimated_completion
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        ]
    }
}

impl LessonRow {
    pub(crate) fn record(&self) -> Vec<String> {
        vec![
            self.lesson.clone(),
            self.status.clone(),
            self.order.to_string(),
        ]
    }
}

/// Flat mission line for the missions report.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MissionRow {
    pub mission_code: String,
    pub date: String,
    pub start_time: String,
    pub mission_type: String,
    pub status: String,
    pub student: String,
    pub lesson_code: String,
    pub title: String,
    pub aircraft: String,
    pub assessment: String,
}

impl MissionRow {
    pub(crate) fn record(&self) -> Vec<String> {
        vec![
            self.mission_code.clone(),
            self.date.clone(),
            self.start_time.clone(),
            self.mission_type.clone(),
            self.status.clone(),
            self.student.clone(),
            self.lesson_code.clone(),
            self.title.clone(),
            self.aircraft.clone(),
            self.assessment.clone(),
        ]
    }
}
