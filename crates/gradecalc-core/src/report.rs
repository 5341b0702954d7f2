//! Grade report types with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::model::Gradebook;
use crate::projection::{ProgramGpaProjector, ProgramSummary};
use crate::semester::{SemesterGradeEngine, SemesterSummary};
use crate::subject::GoalOutcome;

/// A complete grade report for one gradebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Per-semester results, in gradebook order.
    pub semesters: Vec<SemesterSummary>,
    /// Cumulative outlook.
    pub program: ProgramSummary,
}

impl GradeReport {
    /// Grade every semester and project the program.
    pub fn build(book: &Gradebook, config: &EngineConfig, goal_gpa: Option<f64>) -> Self {
        let semesters = book
            .semesters
            .iter()
            .map(|s| SemesterGradeEngine::new(s, config).summary())
            .collect();
        let history = book.program_history(config);

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            semesters,
            program: ProgramGpaProjector::new(&history).summary(goal_gpa),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Grade report\n\n");
        md.push_str(&format!(
            "_Generated {}_\n\n",
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        for semester in &self.semesters {
            md.push_str(&format!(
                "## {} (GPA {:.2})\n\n",
                semester.name, semester.gpa
            ));
            if semester.subjects.is_empty() {
                md.push_str("No subjects.\n\n");
                continue;
            }
            md.push_str("| Subject | Percentage | Letter | GPA | Max possible | Goal |\n");
            md.push_str("|---------|------------|--------|-----|--------------|------|\n");
            for s in &semester.subjects {
                md.push_str(&format!(
                    "| {} | {:.1}% | {} | {:.1} | {:.1}% | {} |\n",
                    s.name,
                    s.percentage,
                    s.letter_grade,
                    s.gpa,
                    s.max_possible,
                    goal_cell(s.goal_percentage, &s.goal),
                ));
            }
            md.push('\n');
        }

        let p = &self.program;
        md.push_str("## Program outlook\n\n");
        md.push_str(&format!(
            "{} of {} semesters completed.\n\n",
            p.completed_semesters, p.total_semesters
        ));
        md.push_str("| Current | Best | Worst | Realistic |\n");
        md.push_str("|---------|------|-------|-----------|\n");
        md.push_str(&format!(
            "| {:.2} | {:.2} | {:.2} | {:.2} |\n",
            p.projections.current, p.projections.best, p.projections.worst, p.projections.realistic
        ));

        if let (Some(goal), Some(required), Some(difficulty)) =
            (p.goal_gpa, p.required_future_gpa, p.difficulty)
        {
            md.push_str(&format!(
                "\nTo finish at {goal:.2}: {required:.2} per remaining semester (difficulty {:.0}%).\n",
                difficulty * 100.0
            ));
        }

        md
    }
}

fn goal_cell(goal_percentage: f64, outcome: &GoalOutcome) -> String {
    match outcome {
        GoalOutcome::Achieved => format!("{goal_percentage:.0}% achieved"),
        GoalOutcome::Infeasible => format!("{goal_percentage:.0}% out of reach"),
        GoalOutcome::Required(scores) => {
            let parts: Vec<String> = scores
                .iter()
                .map(|(kind, score)| format!("{kind} {score:.1}%"))
                .collect();
            format!("{goal_percentage:.0}% needs {}", parts.join(", "))
        }
    }
}
