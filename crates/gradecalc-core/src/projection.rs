//! Cumulative GPA projection across a fixed-length program.
//!
//! Works from the GPAs of completed semesters and the program length to give
//! best/worst/realistic outlooks and the GPA needed in the remaining
//! semesters to finish at a target.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::model::{Gradebook, ProgramHistory};
use crate::semester::SemesterGradeEngine;

/// Highest GPA a semester can earn.
pub const MAX_GPA: f64 = 4.0;

/// Semester GPA assumed by the worst-case scenario.
pub const WORST_CASE_GPA: f64 = 2.0;

/// Above this required GPA the difficulty curve is compressed toward 1.0.
const HARD_THRESHOLD: f64 = 3.5;

/// Cumulative GPA scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpaProjections {
    pub current: f64,
    /// Straight 4.0s from here on.
    pub best: f64,
    /// Straight 2.0s from here on.
    pub worst: f64,
    /// Current pace held for the rest of the program.
    pub realistic: f64,
}

/// Program-level outlook handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSummary {
    pub completed_semesters: usize,
    pub total_semesters: u32,
    pub projections: GpaProjections,
    #[serde(default)]
    pub goal_gpa: Option<f64>,
    #[serde(default)]
    pub required_future_gpa: Option<f64>,
    #[serde(default)]
    pub difficulty: Option<f64>,
}

/// Projects cumulative GPA over the program.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramGpaProjector {
    completed: Vec<f64>,
    total_semesters: u32,
}

impl ProgramGpaProjector {
    /// Build from recorded history. Semesters with a GPA of 0 are treated as
    /// not completed.
    pub fn new(history: &ProgramHistory) -> Self {
        Self::from_gpas(&history.completed_gpas, history.total_semesters)
    }

    pub fn from_gpas(gpas: &[f64], total_semesters: u32) -> Self {
        Self {
            completed: gpas.iter().copied().filter(|&gpa| gpa > 0.0).collect(),
            total_semesters,
        }
    }

    pub fn completed_semesters(&self) -> usize {
        self.completed.len()
    }

    pub fn total_semesters(&self) -> u32 {
        self.total_semesters
    }

    /// Semesters left; negative when more were completed than planned.
    pub fn remaining_semesters(&self) -> i64 {
        i64::from(self.total_semesters) - self.completed.len() as i64
    }

    /// Mean of completed semester GPAs, 0 with none.
    pub fn current_gpa(&self) -> f64 {
        if self.completed.is_empty() {
            0.0
        } else {
            self.completed.iter().sum::<f64>() / self.completed.len() as f64
        }
    }

    /// Final cumulative GPA if every remaining semester earns `future_gpa`.
    pub fn projected_gpa(&self, future_gpa: f64) -> f64 {
        let remaining = self.remaining_semesters();
        if remaining <= 0 {
            return self.current_gpa();
        }
        let completed = self.completed.len() as f64;
        (self.current_gpa() * completed + future_gpa * remaining as f64)
            / f64::from(self.total_semesters)
    }

    pub fn projections(&self) -> GpaProjections {
        let current = self.current_gpa();
        if self.remaining_semesters() <= 0 {
            return GpaProjections {
                current,
                best: current,
                worst: current,
                realistic: current,
            };
        }
        GpaProjections {
            current,
            best: self.projected_gpa(MAX_GPA).min(MAX_GPA),
            worst: self.projected_gpa(WORST_CASE_GPA),
            realistic: self.projected_gpa(current),
        }
    }

    /// GPA needed in each remaining semester to finish at `goal_gpa`, clamped
    /// to 0.0–4.0.
    pub fn required_future_gpa(&self, goal_gpa: f64) -> f64 {
        required_future_gpa(
            self.current_gpa(),
            goal_gpa,
            self.completed.len() as u32,
            self.total_semesters,
        )
    }

    /// Difficulty (0.0–1.0) of finishing at `goal_gpa`.
    pub fn difficulty(&self, goal_gpa: f64) -> f64 {
        difficulty_rating(
            self.current_gpa(),
            goal_gpa,
            self.completed.len() as u32,
            self.total_semesters,
        )
    }

    pub fn summary(&self, goal_gpa: Option<f64>) -> ProgramSummary {
        ProgramSummary {
            completed_semesters: self.completed_semesters(),
            total_semesters: self.total_semesters,
            projections: self.projections(),
            goal_gpa,
            required_future_gpa: goal_gpa.map(|goal| self.required_future_gpa(goal)),
            difficulty: goal_gpa.map(|goal| self.difficulty(goal)),
        }
    }
}

/// Unclamped per-semester GPA needed to finish at `goal_gpa`.
fn raw_required_gpa(current_gpa: f64, goal_gpa: f64, completed: u32, total: u32) -> f64 {
    if completed == 0 {
        return goal_gpa;
    }
    let remaining = i64::from(total) - i64::from(completed);
    if remaining <= 0 {
        return current_gpa;
    }
    (goal_gpa * f64::from(total) - current_gpa * f64::from(completed)) / remaining as f64
}

/// GPA needed in each remaining semester to finish at `goal_gpa`.
///
/// With nothing completed the goal itself is returned; with nothing
/// remaining the current GPA is returned. Otherwise the result is clamped to
/// 0.0–4.0.
pub fn required_future_gpa(current_gpa: f64, goal_gpa: f64, completed: u32, total: u32) -> f64 {
    if completed == 0 {
        return goal_gpa;
    }
    if completed >= total {
        return current_gpa;
    }
    raw_required_gpa(current_gpa, goal_gpa, completed, total).clamp(0.0, MAX_GPA)
}

/// Rate how hard it is to reach `target_gpa`, from 0.0 (already secured)
/// to 1.0 (finished or out of reach).
///
/// Required GPAs up to 3.5 scale linearly over 4.0; above that the rating
/// starts at 0.8 and climbs to 1.0 at a required 4.0.
pub fn difficulty_rating(current_gpa: f64, target_gpa: f64, completed: u32, total: u32) -> f64 {
    if completed >= total {
        return 1.0;
    }
    let required = raw_required_gpa(current_gpa, target_gpa, completed, total);
    if required <= 0.0 {
        0.0
    } else if required > MAX_GPA {
        1.0
    } else if required > HARD_THRESHOLD {
        0.8 + (required - HARD_THRESHOLD) / 2.5
    } else {
        required / MAX_GPA
    }
}

impl Gradebook {
    /// Program history with the GPA of every graded semester in the
    /// gradebook appended to the recorded completed GPAs.
    pub fn program_history(&self, config: &EngineConfig) -> ProgramHistory {
        let mut completed_gpas = self.program.completed_gpas.clone();
        completed_gpas.extend(
            self.semesters
                .iter()
                .map(|s| SemesterGradeEngine::new(s, config).gpa())
                .filter(|&gpa| gpa > 0.0),
        );
        ProgramHistory {
            total_semesters: self.program.total_semesters,
            completed_gpas,
        }
    }
}
