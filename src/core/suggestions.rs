use crate::api::SchoolApi;
use crate::core::calculator::progress::{LessonProgress, compute_progress};
use crate::errors::AppResult;
use crate::models::lesson::Lesson;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Next,
    Repeat,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub label: String,
    pub description: String,
    pub lesson: Option<Lesson>,
    /// 1 is offered first.
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionSet {
    pub progress: LessonProgress,
    pub suggestions: Vec<Suggestion>,
}

impl SuggestionSet {
    pub fn next_lesson(&self) -> Option<&Lesson> {
        self.suggestions
            .iter()
            .find(|s| s.kind == SuggestionKind::Next)
            .and_then(|s| s.lesson.as_ref())
    }
}

/// Next lesson, then a repeat of the last completed one, then the custom
/// fallback which is always offered.
pub fn build_suggestions(progress: &LessonProgress) -> Vec<Suggestion> {
    let mut out = Vec::with_capacity(3);

    if let Some(lesson) = &progress.current {
        out.push(Suggestion {
            kind: SuggestionKind::Next,
            label: "Next Lesson".into(),
            description: format!("Continue with {}", lesson.title),
            lesson: Some(lesson.clone()),
            priority: 1,
        });
    }

    if let Some(lesson) = &progress.previous {
        out.push(Suggestion {
            kind: SuggestionKind::Repeat,
            label: "Repeat Previous".into(),
            description: format!("Practice {} again", lesson.title),
            lesson: Some(lesson.clone()),
            priority: 2,
        });
    }

    out.push(Suggestion {
        kind: SuggestionKind::Custom,
        label: "Custom Mission".into(),
        description: "Create a custom training mission".into(),
        lesson: None,
        priority: 3,
    });

    out.sort_by_key(|s| s.priority);
    out
}

pub fn enrollment_progress<A: SchoolApi + ?Sized>(
    api: &A,
    enrollment_id: i64,
) -> AppResult<LessonProgress> {
    // fails with NotFound for unknown enrollments
    api.enrollment(enrollment_id)?;

    let lessons = api.enrollment_lessons(enrollment_id)?;
    let completed = api.completed_lesson_ids(enrollment_id)?;
    let last = api.last_completed_mission(enrollment_id)?;

    Ok(compute_progress(&lessons, &completed, last))
}

pub fn resolve_suggestions<A: SchoolApi + ?Sized>(
    api: &A,
    enrollment_id: i64,
) -> AppResult<SuggestionSet> {
    let progress = enrollment_progress(api, enrollment_id)?;
    let suggestions = build_suggestions(&progress);
    Ok(SuggestionSet {
        progress,
        suggestions,
    })
}
