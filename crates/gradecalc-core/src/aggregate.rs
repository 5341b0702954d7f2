//! Per-category aggregation: averages, weighted contributions, and the
//! finalized/remaining split the optimizer works from.

use crate::model::AssessmentType;

impl AssessmentType {
    /// Mean score over every record, graded or not.
    ///
    /// Ungraded records keep their placeholder score (normally 0) and pull the
    /// average down until they are graded. Returns 0 with no records.
    pub fn average_score(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.records.iter().map(|r| r.score).sum::<f64>() / self.records.len() as f64
    }

    /// This type's share of the subject's weighted score.
    pub fn weighted_contribution(&self) -> f64 {
        self.weight * (self.average_score() / 100.0)
    }

    /// Weight carried by a single record.
    pub fn weight_per_record(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            self.weight / self.records.len() as f64
        }
    }

    /// Points already locked in by finalized records.
    pub fn earned_points(&self) -> f64 {
        let per_record = self.weight_per_record();
        self.records
            .iter()
            .filter(|r| r.is_final)
            .map(|r| r.score / 100.0 * per_record)
            .sum()
    }

    /// Whether no records exist yet. An unconfigured type with weight is
    /// treated as entirely open.
    pub fn is_unconfigured(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of outstanding items. Unconfigured types count their expected
    /// items (at least one).
    pub fn remaining_count(&self) -> usize {
        if self.is_unconfigured() {
            self.category.expected_count().max(1) as usize
        } else {
            self.records.iter().filter(|r| !r.is_final).count()
        }
    }

    /// Weight still open to be earned.
    pub fn remaining_weight(&self) -> f64 {
        if self.is_unconfigured() {
            self.weight
        } else {
            self.weight_per_record() * self.records.iter().filter(|r| !r.is_final).count() as f64
        }
    }

    /// Weight gained per outstanding item; 0 when nothing is outstanding.
    pub fn efficiency(&self) -> f64 {
        match self.remaining_count() {
            0 => 0.0,
            count => self.remaining_weight() / count as f64,
        }
    }
}
