//! Semester GPA aggregation.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::model::Semester;
use crate::subject::{SubjectGradeEngine, SubjectSummary};

/// Computed figures for one semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterSummary {
    pub id: u64,
    pub name: String,
    pub gpa: f64,
    /// Subjects whose GPA counted toward the semester GPA.
    pub graded_subjects: usize,
    pub subjects: Vec<SubjectSummary>,
}

/// Averages subject GPAs into a semester GPA.
#[derive(Debug, Clone, Copy)]
pub struct SemesterGradeEngine<'a> {
    semester: &'a Semester,
    config: &'a EngineConfig,
}

impl<'a> SemesterGradeEngine<'a> {
    pub fn new(semester: &'a Semester, config: &'a EngineConfig) -> Self {
        Self { semester, config }
    }

    /// Subject GPAs greater than zero. Subjects at exactly 0.0 (typically not
    /// yet graded) are left out so they do not drag a completed average down.
    fn graded_gpas(&self) -> Vec<f64> {
        self.semester
            .subjects
            .iter()
            .map(|s| SubjectGradeEngine::new(s, self.config).gpa())
            .filter(|&gpa| gpa > 0.0)
            .collect()
    }

    /// Mean GPA over graded subjects, 0 when none qualify.
    pub fn gpa(&self) -> f64 {
        let gpas = self.graded_gpas();
        if gpas.is_empty() {
            0.0
        } else {
            gpas.iter().sum::<f64>() / gpas.len() as f64
        }
    }

    pub fn summary(&self) -> SemesterSummary {
        SemesterSummary {
            id: self.semester.id,
            name: self.semester.name.clone(),
            gpa: self.gpa(),
            graded_subjects: self.graded_gpas().len(),
            subjects: self
                .semester
                .subjects
                .iter()
                .map(|s| SubjectGradeEngine::new(s, self.config).summary())
                .collect(),
        }
    }
}
