use crate::models::lesson::Lesson;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastCompletedMission {
    pub mission_id: i64,
    pub mission_code: String,
    pub scheduled_date: String,
    pub lesson_title: String,
}

/// Where an enrollment stands in its syllabus. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonProgress {
    /// Lowest-ordered lesson not yet completed.
    pub current: Option<Lesson>,
    /// First uncompleted lesson after `current`.
    pub next: Option<Lesson>,
    /// Highest-ordered completed lesson.
    pub previous: Option<Lesson>,
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub percent_complete: u32,
    pub last_completed_mission: Option<LastCompletedMission>,
}

/// Rounded percentage; an empty syllabus is 0%, not NaN.
pub fn percent_complete(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (completed.min(total) as f64 / total as f64 * 100.0).round();
    pct as u32
}

pub fn compute_progress(
    lessons: &[Lesson],
    completed_ids: &HashSet<i64>,
    last_completed_mission: Option<LastCompletedMission>,
) -> LessonProgress {
    let mut ordered: Vec<&Lesson> = lessons.iter().filter(|l| l.is_active).collect();
    ordered.sort_by_key(|l| l.order_index);

    let (done, pending): (Vec<&Lesson>, Vec<&Lesson>) = ordered
        .iter()
        .copied()
        .partition(|l| completed_ids.contains(&l.id));

    let current = pending.first().map(|l| (*l).clone());
    let next = pending.get(1).map(|l| (*l).clone());
    let previous = done.last().map(|l| (*l).clone());

    let completed_lessons = done.len();
    let total_lessons = ordered.len();

    LessonProgress {
        current,
        next,
        previous,
        completed_lessons,
        total_lessons,
        percent_complete: percent_complete(completed_lessons, total_lessons),
        last_completed_mission,
    }
}
