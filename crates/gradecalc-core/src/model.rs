//! Core data model types for gradecalc.
//!
//! These are immutable value snapshots: assessment records, weighted
//! assessment types, subjects, semesters and the program history. The
//! engines borrow them for the duration of a single call and never keep them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ensure_finite, validate_goal_percentage, ValidationError};

/// The five assessment categories a subject can be graded on.
///
/// Declaration order is the fixed category priority used wherever ties must
/// resolve deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Assignment,
    Quiz,
    Midterm,
    FinalExam,
    FinalProject,
}

impl AssessmentKind {
    /// All kinds in priority order.
    pub const ALL: [AssessmentKind; 5] = [
        AssessmentKind::Assignment,
        AssessmentKind::Quiz,
        AssessmentKind::Midterm,
        AssessmentKind::FinalExam,
        AssessmentKind::FinalProject,
    ];

    /// Whether this kind holds a configurable number of records.
    pub fn is_counted(self) -> bool {
        matches!(self, AssessmentKind::Assignment | AssessmentKind::Quiz)
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentKind::Assignment => write!(f, "assignment"),
            AssessmentKind::Quiz => write!(f, "quiz"),
            AssessmentKind::Midterm => write!(f, "midterm"),
            AssessmentKind::FinalExam => write!(f, "final_exam"),
            AssessmentKind::FinalProject => write!(f, "final_project"),
        }
    }
}

impl FromStr for AssessmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "assignment" | "assignments" => Ok(AssessmentKind::Assignment),
            "quiz" | "quizzes" => Ok(AssessmentKind::Quiz),
            "midterm" => Ok(AssessmentKind::Midterm),
            "final_exam" | "final" => Ok(AssessmentKind::FinalExam),
            "final_project" | "project" => Ok(AssessmentKind::FinalProject),
            other => Err(format!("unknown assessment kind: {other}")),
        }
    }
}

/// An assessment category together with its kind-specific configuration.
///
/// Only assignments and quizzes carry an expected item count; the singleton
/// kinds always expect exactly one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Category {
    Assignment { expected_count: u32 },
    Quiz { expected_count: u32 },
    Midterm,
    FinalExam,
    FinalProject,
}

impl Category {
    /// Build a category for `kind`. `expected_count` is ignored for singleton kinds.
    pub fn new(kind: AssessmentKind, expected_count: u32) -> Self {
        match kind {
            AssessmentKind::Assignment => Category::Assignment { expected_count },
            AssessmentKind::Quiz => Category::Quiz { expected_count },
            AssessmentKind::Midterm => Category::Midterm,
            AssessmentKind::FinalExam => Category::FinalExam,
            AssessmentKind::FinalProject => Category::FinalProject,
        }
    }

    pub fn kind(&self) -> AssessmentKind {
        match self {
            Category::Assignment { .. } => AssessmentKind::Assignment,
            Category::Quiz { .. } => AssessmentKind::Quiz,
            Category::Midterm => AssessmentKind::Midterm,
            Category::FinalExam => AssessmentKind::FinalExam,
            Category::FinalProject => AssessmentKind::FinalProject,
        }
    }

    /// Number of items this category expects (1 for singleton kinds).
    pub fn expected_count(&self) -> u32 {
        match self {
            Category::Assignment { expected_count } | Category::Quiz { expected_count } => {
                *expected_count
            }
            _ => 1,
        }
    }
}

/// One gradable item within an assessment type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct AssessmentRecord {
    /// Unique identifier for this record.
    pub id: u64,
    /// Identifier of the owning assessment type.
    pub type_id: u64,
    /// Position of the item within its type (1-based).
    pub sequence_number: u32,
    /// Score in 0–100. Placeholder (usually 0) while not final.
    pub score: f64,
    /// Whether the score is authoritative and locked.
    pub is_final: bool,
}

impl AssessmentRecord {
    pub fn new(
        id: u64,
        type_id: u64,
        sequence_number: u32,
        score: f64,
        is_final: bool,
    ) -> Result<Self, ValidationError> {
        let record = Self {
            id,
            type_id,
            sequence_number,
            score,
            is_final,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_finite(self.score, "score")?;
        if !(0.0..=100.0).contains(&self.score) {
            return Err(ValidationError::ScoreOutOfRange { score: self.score });
        }
        Ok(())
    }
}

/// A weighted assessment category and its records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TypeFields")]
pub struct AssessmentType {
    /// Unique identifier for this assessment type.
    pub id: u64,
    /// Kind and kind-specific configuration.
    pub category: Category,
    /// Percent of the subject grade (0–100).
    pub weight: f64,
    /// Records in sequence order.
    pub records: Vec<AssessmentRecord>,
}

impl AssessmentType {
    pub fn new(
        id: u64,
        category: Category,
        weight: f64,
        records: Vec<AssessmentRecord>,
    ) -> Result<Self, ValidationError> {
        let assessment_type = Self {
            id,
            category,
            weight,
            records,
        };
        assessment_type.validate()?;
        Ok(assessment_type)
    }

    pub fn kind(&self) -> AssessmentKind {
        self.category.kind()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let kind = self.kind();
        ensure_finite(self.weight, "weight")?;
        if self.weight < 0.0 {
            return Err(ValidationError::NegativeWeight {
                kind,
                weight: self.weight,
            });
        }
        if self.weight > 100.0 {
            return Err(ValidationError::WeightTooLarge {
                kind,
                weight: self.weight,
            });
        }
        if !kind.is_counted() && self.records.len() > 1 {
            return Err(ValidationError::TooManyRecords {
                kind,
                count: self.records.len(),
            });
        }
        self.records.iter().try_for_each(AssessmentRecord::validate)
    }
}

/// A subject with its configured assessment types and goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SubjectFields")]
pub struct Subject {
    pub id: u64,
    pub name: String,
    /// Assessment types keyed by kind, iterated in priority order.
    pub types: BTreeMap<AssessmentKind, AssessmentType>,
    /// Target overall percentage.
    pub goal_percentage: f64,
}

impl Subject {
    /// Build a subject, rejecting duplicate kinds and invalid types or goal.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        goal_percentage: f64,
        types: Vec<AssessmentType>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let mut by_kind = BTreeMap::new();
        for assessment_type in types {
            let kind = assessment_type.kind();
            if by_kind.insert(kind, assessment_type).is_some() {
                return Err(ValidationError::DuplicateKind {
                    subject: name,
                    kind,
                });
            }
        }
        let subject = Self {
            id,
            name,
            types: by_kind,
            goal_percentage,
        };
        subject.validate()?;
        Ok(subject)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_goal_percentage(self.goal_percentage)?;
        for (kind, assessment_type) in &self.types {
            if assessment_type.kind() != *kind {
                return Err(ValidationError::KindMismatch {
                    subject: self.name.clone(),
                    key: *kind,
                    actual: assessment_type.kind(),
                });
            }
            assessment_type.validate()?;
        }
        Ok(())
    }

    /// Sum of all configured type weights.
    pub fn configured_weight(&self) -> f64 {
        self.types.values().map(|t| t.weight).sum()
    }
}

/// A semester and its subjects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SemesterFields")]
pub struct Semester {
    pub id: u64,
    pub name: String,
    pub subjects: Vec<Subject>,
}

impl Semester {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        subjects: Vec<Subject>,
    ) -> Result<Self, ValidationError> {
        let semester = Self {
            id,
            name: name.into(),
            subjects,
        };
        semester.validate()?;
        Ok(semester)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.subjects.iter().try_for_each(Subject::validate)
    }

    /// Find a subject by case-insensitive name.
    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

/// Completed-semester GPAs and the configured program length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProgramFields")]
pub struct ProgramHistory {
    /// Total number of semesters in the program.
    pub total_semesters: u32,
    /// GPAs of completed semesters, oldest first.
    pub completed_gpas: Vec<f64>,
}

impl ProgramHistory {
    pub fn new(total_semesters: u32, completed_gpas: Vec<f64>) -> Result<Self, ValidationError> {
        let history = Self {
            total_semesters,
            completed_gpas,
        };
        history.validate()?;
        Ok(history)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_semesters == 0 {
            return Err(ValidationError::InvalidProgramLength);
        }
        for &gpa in &self.completed_gpas {
            ensure_finite(gpa, "semester GPA")?;
            if !(0.0..=4.0).contains(&gpa) {
                return Err(ValidationError::GpaOutOfRange(gpa));
            }
        }
        Ok(())
    }
}

/// Everything a gradebook file describes: the program history and the
/// semesters with full assessment detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradebook {
    pub program: ProgramHistory,
    #[serde(default)]
    pub semesters: Vec<Semester>,
}

impl Gradebook {
    /// Find a semester by case-insensitive name.
    pub fn semester(&self, name: &str) -> Option<&Semester> {
        self.semesters
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

// Deserialization goes through the validating constructors.

#[derive(Deserialize)]
struct RecordFields {
    id: u64,
    type_id: u64,
    sequence_number: u32,
    score: f64,
    is_final: bool,
}

impl TryFrom<RecordFields> for AssessmentRecord {
    type Error = ValidationError;

    fn try_from(f: RecordFields) -> Result<Self, Self::Error> {
        Self::new(f.id, f.type_id, f.sequence_number, f.score, f.is_final)
    }
}

#[derive(Deserialize)]
struct TypeFields {
    id: u64,
    category: Category,
    weight: f64,
    #[serde(default)]
    records: Vec<AssessmentRecord>,
}

impl TryFrom<TypeFields> for AssessmentType {
    type Error = ValidationError;

    fn try_from(f: TypeFields) -> Result<Self, Self::Error> {
        Self::new(f.id, f.category, f.weight, f.records)
    }
}

#[derive(Deserialize)]
struct SubjectFields {
    id: u64,
    name: String,
    types: BTreeMap<AssessmentKind, AssessmentType>,
    goal_percentage: f64,
}

impl TryFrom<SubjectFields> for Subject {
    type Error = ValidationError;

    fn try_from(f: SubjectFields) -> Result<Self, Self::Error> {
        let subject = Self {
            id: f.id,
            name: f.name,
            types: f.types,
            goal_percentage: f.goal_percentage,
        };
        subject.validate()?;
        Ok(subject)
    }
}

#[derive(Deserialize)]
struct SemesterFields {
    id: u64,
    name: String,
    #[serde(default)]
    subjects: Vec<Subject>,
}

impl TryFrom<SemesterFields> for Semester {
    type Error = ValidationError;

    fn try_from(f: SemesterFields) -> Result<Self, Self::Error> {
        Self::new(f.id, f.name, f.subjects)
    }
}

#[derive(Deserialize)]
struct ProgramFields {
    total_semesters: u32,
    #[serde(default)]
    completed_gpas: Vec<f64>,
}

impl TryFrom<ProgramFields> for ProgramHistory {
    type Error = ValidationError;

    fn try_from(f: ProgramFields) -> Result<Self, Self::Error> {
        Self::new(f.total_semesters, f.completed_gpas)
    }
}
