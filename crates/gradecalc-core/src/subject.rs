//! Subject-level grading and the required-score optimizer.
//!
//! [`SubjectGradeEngine`] turns one subject snapshot into a percentage,
//! letter grade and GPA, and answers "what do I still need?" by allocating
//! required average scores across the assessment types that still have
//! outstanding work.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::model::{AssessmentKind, AssessmentType, Subject};
use crate::scale::LetterGrade;

/// Tolerance for comparing accumulated weights.
const EPSILON: f64 = 1e-9;

/// Result of asking what a subject needs to reach a goal percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "required", rename_all = "snake_case")]
pub enum GoalOutcome {
    /// Finalized work already meets the goal.
    Achieved,
    /// Required average score per assessment kind with outstanding work.
    Required(BTreeMap<AssessmentKind, f64>),
    /// The goal would need more than 100% on the remaining work.
    Infeasible,
}

impl GoalOutcome {
    /// Whether the goal is met or still reachable.
    pub fn is_achievable(&self) -> bool {
        !matches!(self, GoalOutcome::Infeasible)
    }

    /// The required scores, if any remain to be earned.
    pub fn required(&self) -> Option<&BTreeMap<AssessmentKind, f64>> {
        match self {
            GoalOutcome::Required(scores) => Some(scores),
            _ => None,
        }
    }
}

/// Computed grade figures for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub id: u64,
    pub name: String,
    pub percentage: f64,
    pub letter_grade: LetterGrade,
    pub gpa: f64,
    /// Best percentage reachable with full marks on everything outstanding.
    pub max_possible: f64,
    pub goal_percentage: f64,
    pub goal: GoalOutcome,
}

/// Grades a single subject snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SubjectGradeEngine<'a> {
    subject: &'a Subject,
    config: &'a EngineConfig,
}

impl<'a> SubjectGradeEngine<'a> {
    pub fn new(subject: &'a Subject, config: &'a EngineConfig) -> Self {
        Self { subject, config }
    }

    pub fn subject(&self) -> &'a Subject {
        self.subject
    }

    /// Types that take part in grading (positive weight), in priority order.
    fn weighted_types(&self) -> impl Iterator<Item = &'a AssessmentType> + 'a {
        let subject: &'a Subject = self.subject;
        subject.types.values().filter(|t| t.weight > 0.0)
    }

    /// Sum of the weights of all weighted types.
    pub fn total_weight(&self) -> f64 {
        self.weighted_types().map(|t| t.weight).sum()
    }

    /// Overall percentage, normalized against the configured weight so a
    /// subject whose weights do not yet sum to 100 still reports 0–100.
    pub fn overall_percentage(&self) -> f64 {
        let (contribution, total_weight) = self
            .weighted_types()
            .fold((0.0, 0.0), |(contribution, weight), t| {
                (contribution + t.weighted_contribution(), weight + t.weight)
            });
        if total_weight > 0.0 {
            contribution / total_weight * 100.0
        } else {
            0.0
        }
    }

    pub fn letter_grade(&self) -> LetterGrade {
        self.config.scale.letter_for(self.overall_percentage())
    }

    pub fn gpa(&self) -> f64 {
        self.config.scale.points_for(self.letter_grade())
    }

    /// Points locked in by finalized records across all types.
    pub fn current_earned_points(&self) -> f64 {
        self.weighted_types().map(AssessmentType::earned_points).sum()
    }

    /// Weight still open across all types.
    pub fn total_remaining_weight(&self) -> f64 {
        self.weighted_types().map(AssessmentType::remaining_weight).sum()
    }

    /// Percentage reachable by scoring 100 on every outstanding item.
    pub fn max_possible_score(&self) -> f64 {
        let total_weight = self.total_weight();
        if total_weight <= 0.0 {
            return 0.0;
        }
        (self.current_earned_points() + self.total_remaining_weight()) / total_weight * 100.0
    }

    /// Allocate required average scores to reach `goal_percentage`.
    ///
    /// Types are worked in descending efficiency (weight per outstanding
    /// item), ties resolved by kind priority. Each type that cannot cover the
    /// outstanding need on its own is set to 100; the first type that can
    /// gets exactly the score it needs and every type after it is set to the
    /// configured floor.
    pub fn required_scores(&self, goal_percentage: f64) -> GoalOutcome {
        let total_weight = self.total_weight();
        if total_weight <= 0.0 {
            tracing::debug!(subject = %self.subject.name, "no weighted assessments, goal infeasible");
            return GoalOutcome::Infeasible;
        }

        let earned = self.current_earned_points();
        let remaining_weight = self.total_remaining_weight();
        let goal_points = goal_percentage / 100.0 * total_weight;
        let additional_needed = goal_points - earned;

        if additional_needed <= EPSILON {
            return GoalOutcome::Achieved;
        }
        if remaining_weight <= EPSILON || additional_needed > remaining_weight + EPSILON {
            tracing::debug!(
                subject = %self.subject.name,
                additional_needed,
                remaining_weight,
                "goal infeasible"
            );
            return GoalOutcome::Infeasible;
        }

        let mut open: Vec<&AssessmentType> = self
            .weighted_types()
            .filter(|t| t.remaining_weight() > 0.0)
            .collect();
        // stable sort keeps kind priority among equal efficiencies
        open.sort_by(|a, b| {
            b.efficiency()
                .partial_cmp(&a.efficiency())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let required = allocate(&open, additional_needed, self.config.minimum_floor_score);
        GoalOutcome::Required(required)
    }

    /// Goal outcome for the subject's own goal percentage.
    pub fn goal_outcome(&self) -> GoalOutcome {
        self.required_scores(self.subject.goal_percentage)
    }

    /// Whether the subject's own goal is met or still reachable.
    pub fn is_goal_achievable(&self) -> bool {
        self.goal_outcome().is_achievable()
    }

    pub fn summary(&self) -> SubjectSummary {
        SubjectSummary {
            id: self.subject.id,
            name: self.subject.name.clone(),
            percentage: self.overall_percentage(),
            letter_grade: self.letter_grade(),
            gpa: self.gpa(),
            max_possible: self.max_possible_score(),
            goal_percentage: self.subject.goal_percentage,
            goal: self.goal_outcome(),
        }
    }
}

/// Greedy allocation over `open`, already sorted by descending efficiency.
///
/// Types whose remaining weight the need still covers get 100; the first type
/// that can cover the rest gets exactly what it needs and every later type
/// gets `floor`. Need left over after every type is spread uniformly.
fn allocate(
    open: &[&AssessmentType],
    additional_needed: f64,
    floor: f64,
) -> BTreeMap<AssessmentKind, f64> {
    let mut required = BTreeMap::new();
    let mut still_needed = additional_needed;

    for (idx, t) in open.iter().enumerate() {
        let weight = t.remaining_weight();
        if weight <= still_needed + EPSILON {
            required.insert(t.kind(), 100.0);
            still_needed -= weight;
            continue;
        }
        required.insert(t.kind(), (still_needed / weight * 100.0).max(0.0));
        for rest in &open[idx + 1..] {
            required.insert(rest.kind(), floor);
        }
        still_needed = 0.0;
        break;
    }

    if still_needed > EPSILON {
        let open_weight: f64 = open.iter().map(|t| t.remaining_weight()).sum();
        tracing::debug!(
            still_needed,
            open_weight,
            "greedy pass left need unmet, using uniform allocation"
        );
        let uniform = additional_needed / open_weight * 100.0;
        required = open.iter().map(|t| (t.kind(), uniform)).collect();
    }

    required
}
