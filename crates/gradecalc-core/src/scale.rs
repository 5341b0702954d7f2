//! Letter grades and the percentage → letter → grade-point scale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Letter grades from A down to F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    /// All grades, best first.
    pub const ALL: [LetterGrade; 12] = [
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::DPlus,
        LetterGrade::D,
        LetterGrade::DMinus,
        LetterGrade::F,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::DMinus => "D-",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        LetterGrade::ALL
            .into_iter()
            .find(|g| g.as_str() == wanted)
            .ok_or_else(|| format!("unknown letter grade: {s}"))
    }
}

/// One row of the grade scale: the minimum percentage for a letter and the
/// grade points it is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub letter: LetterGrade,
    pub min_percentage: f64,
    pub grade_points: f64,
}

/// Cutoff and grade-point table. Bands are ordered best first; the first band
/// whose `min_percentage` a score reaches wins, and anything below every band
/// is an F worth 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeScale {
    pub bands: Vec<GradeBand>,
}

const STANDARD_BANDS: [(LetterGrade, f64, f64); 11] = [
    (LetterGrade::A, 93.0, 4.0),
    (LetterGrade::AMinus, 90.0, 3.7),
    (LetterGrade::BPlus, 87.0, 3.3),
    (LetterGrade::B, 83.0, 3.0),
    (LetterGrade::BMinus, 80.0, 2.7),
    (LetterGrade::CPlus, 77.0, 2.3),
    (LetterGrade::C, 73.0, 2.0),
    (LetterGrade::CMinus, 70.0, 1.7),
    (LetterGrade::DPlus, 67.0, 1.3),
    (LetterGrade::D, 63.0, 1.0),
    (LetterGrade::DMinus, 60.0, 0.7),
];

impl Default for GradeScale {
    fn default() -> Self {
        Self::standard()
    }
}

impl GradeScale {
    /// The standard plus/minus scale (A ≥ 93 … D- ≥ 60, otherwise F).
    pub fn standard() -> Self {
        Self {
            bands: STANDARD_BANDS
                .iter()
                .map(|&(letter, min_percentage, grade_points)| GradeBand {
                    letter,
                    min_percentage,
                    grade_points,
                })
                .collect(),
        }
    }

    /// Map a percentage to its letter grade.
    pub fn letter_for(&self, percentage: f64) -> LetterGrade {
        self.bands
            .iter()
            .find(|band| percentage >= band.min_percentage)
            .map(|band| band.letter)
            .unwrap_or(LetterGrade::F)
    }

    /// Grade points for a letter. Letters absent from the scale are worth 0.0.
    pub fn points_for(&self, letter: LetterGrade) -> f64 {
        self.bands
            .iter()
            .find(|band| band.letter == letter)
            .map(|band| band.grade_points)
            .unwrap_or(0.0)
    }

    /// Grade points for a percentage.
    pub fn gpa_for(&self, percentage: f64) -> f64 {
        self.points_for(self.letter_for(percentage))
    }

    /// Check cutoffs strictly descend, points stay within 0–4 and never rise,
    /// and no letter appears twice.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bands.is_empty() {
            return Err(ValidationError::InvalidScale("no grade bands".into()));
        }
        for band in &self.bands {
            if !band.min_percentage.is_finite() || !band.grade_points.is_finite() {
                return Err(ValidationError::InvalidScale(format!(
                    "{} has a non-finite value",
                    band.letter
                )));
            }
            if !(0.0..=4.0).contains(&band.grade_points) {
                return Err(ValidationError::InvalidScale(format!(
                    "{} is worth {} points, expected 0.0-4.0",
                    band.letter, band.grade_points
                )));
            }
        }
        for pair in self.bands.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            if lower.min_percentage >= upper.min_percentage {
                return Err(ValidationError::InvalidScale(format!(
                    "cutoff for {} ({}) must be below {} ({})",
                    lower.letter, lower.min_percentage, upper.letter, upper.min_percentage
                )));
            }
            if lower.grade_points > upper.grade_points {
                return Err(ValidationError::InvalidScale(format!(
                    "{} is worth more than {}",
                    lower.letter, upper.letter
                )));
            }
        }
        let mut seen = std::collections::HashSet::new();
        for band in &self.bands {
            if !seen.insert(band.letter) {
                return Err(ValidationError::InvalidScale(format!(
                    "{} appears more than once",
                    band.letter
                )));
            }
        }
        Ok(())
    }
}
