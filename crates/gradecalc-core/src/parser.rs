//! TOML gradebook parser.
//!
//! Loads gradebooks from TOML files and directories and validates them.
//! Every snapshot passes through the validating constructors in
//! [`crate::model`] here, so malformed scores, weights or goals are rejected
//! before any engine sees them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::EngineConfig;
use crate::model::{
    AssessmentKind, AssessmentRecord, AssessmentType, Category, Gradebook, ProgramHistory,
    Semester, Subject,
};

/// Intermediate TOML structure for parsing gradebook files.
#[derive(Debug, Deserialize)]
struct TomlGradebook {
    #[serde(default)]
    program: Option<TomlProgram>,
    #[serde(default)]
    semesters: Vec<TomlSemester>,
}

#[derive(Debug, Deserialize)]
struct TomlProgram {
    #[serde(default)]
    total_semesters: Option<u32>,
    #[serde(default)]
    completed_gpas: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct TomlSemester {
    #[serde(default)]
    id: Option<u64>,
    name: String,
    #[serde(default)]
    subjects: Vec<TomlSubject>,
}

#[derive(Debug, Deserialize)]
struct TomlSubject {
    #[serde(default)]
    id: Option<u64>,
    name: String,
    #[serde(default = "default_goal")]
    goal_percentage: f64,
    #[serde(default)]
    types: Vec<TomlAssessmentType>,
}

fn default_goal() -> f64 {
    80.0
}

#[derive(Debug, Deserialize)]
struct TomlAssessmentType {
    kind: String,
    weight: f64,
    #[serde(default)]
    expected_count: Option<u32>,
    #[serde(default)]
    records: Vec<TomlRecord>,
}

#[derive(Debug, Deserialize)]
struct TomlRecord {
    #[serde(default)]
    sequence: Option<u32>,
    #[serde(default)]
    score: f64,
    #[serde(default, rename = "final")]
    is_final: bool,
}

/// Hands out ids in file order for entities the file leaves unnumbered.
/// Generated ids continue past the highest id seen so far.
#[derive(Debug, Default)]
struct IdSequence(u64);

impl IdSequence {
    fn next(&mut self, explicit: Option<u64>) -> u64 {
        let id = explicit.unwrap_or(self.0 + 1);
        self.0 = self.0.max(id);
        id
    }
}

/// Parse a single TOML file into a `Gradebook`.
pub fn parse_gradebook(path: &Path, config: &EngineConfig) -> Result<Gradebook> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read gradebook file: {}", path.display()))?;

    parse_gradebook_str(&content, path, config)
}

/// Parse a TOML string into a `Gradebook` (useful for testing).
pub fn parse_gradebook_str(
    content: &str,
    source_path: &Path,
    config: &EngineConfig,
) -> Result<Gradebook> {
    let parsed: TomlGradebook = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let program = match parsed.program {
        Some(p) => ProgramHistory::new(
            p.total_semesters.unwrap_or(config.total_semesters),
            p.completed_gpas,
        ),
        None => ProgramHistory::new(config.total_semesters, vec![]),
    }
    .with_context(|| format!("invalid program in {}", source_path.display()))?;

    let mut ids = Ids::default();
    let semesters = parsed
        .semesters
        .into_iter()
        .map(|s| build_semester(s, &mut ids))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid gradebook: {}", source_path.display()))?;

    Ok(Gradebook { program, semesters })
}

/// Id counters for each entity level.
#[derive(Debug, Default)]
struct Ids {
    semesters: IdSequence,
    subjects: IdSequence,
    types: IdSequence,
    records: IdSequence,
}

fn build_semester(s: TomlSemester, ids: &mut Ids) -> Result<Semester> {
    let name = s.name;
    let subjects = s
        .subjects
        .into_iter()
        .map(|subj| {
            let subject_name = subj.name.clone();
            build_subject(subj, ids).with_context(|| format!("in subject '{subject_name}'"))
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("in semester '{name}'"))?;

    Ok(Semester::new(ids.semesters.next(s.id), name, subjects)?)
}

fn build_subject(subj: TomlSubject, ids: &mut Ids) -> Result<Subject> {
    let types = subj
        .types
        .into_iter()
        .map(|t| build_type(t, ids))
        .collect::<Result<Vec<_>>>()?;

    Ok(Subject::new(
        ids.subjects.next(subj.id),
        subj.name,
        subj.goal_percentage,
        types,
    )?)
}

fn build_type(t: TomlAssessmentType, ids: &mut Ids) -> Result<AssessmentType> {
    let kind: AssessmentKind = t.kind.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let type_id = ids.types.next(None);

    let records = t
        .records
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            let sequence = r.sequence.unwrap_or(i as u32 + 1);
            AssessmentRecord::new(ids.records.next(None), type_id, sequence, r.score, r.is_final)
                .with_context(|| format!("{kind} #{sequence}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let expected_count = t.expected_count.unwrap_or(records.len() as u32).max(1);
    Ok(AssessmentType::new(
        type_id,
        Category::new(kind, expected_count),
        t.weight,
        records,
    )?)
}

/// Recursively load all `.toml` gradebook files from a directory.
pub fn load_gradebook_directory(dir: &Path, config: &EngineConfig) -> Result<Vec<Gradebook>> {
    let mut books = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            books.extend(load_gradebook_directory(&path, config)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_gradebook(&path, config) {
                Ok(book) => books.push(book),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(books)
}

/// A non-fatal finding from gradebook validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Where the issue was found (e.g. "Fall 2026 / Calculus").
    pub location: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check a gradebook for issues the engine tolerates but a user should fix.
pub fn validate_gradebook(book: &Gradebook) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let planned = book.program.completed_gpas.len() + book.semesters.len();
    if planned > book.program.total_semesters as usize {
        warnings.push(ValidationWarning {
            location: None,
            message: format!(
                "{planned} semesters recorded but the program has {}",
                book.program.total_semesters
            ),
        });
    }

    let mut semester_ids = HashSet::new();
    let mut subject_ids = HashSet::new();
    for semester in &book.semesters {
        if !semester_ids.insert(semester.id) {
            warnings.push(ValidationWarning {
                location: Some(semester.name.clone()),
                message: format!("duplicate semester id {}", semester.id),
            });
        }
        for subject in &semester.subjects {
            if !subject_ids.insert(subject.id) {
                warnings.push(ValidationWarning {
                    location: Some(format!("{} / {}", semester.name, subject.name)),
                    message: format!("duplicate subject id {}", subject.id),
                });
            }
        }
    }

    for semester in &book.semesters {
        if semester.subjects.is_empty() {
            warnings.push(ValidationWarning {
                location: Some(semester.name.clone()),
                message: "semester has no subjects".into(),
            });
        }

        let mut seen_names = HashSet::new();
        for subject in &semester.subjects {
            let location = format!("{} / {}", semester.name, subject.name);

            if !seen_names.insert(subject.name.to_lowercase()) {
                warnings.push(ValidationWarning {
                    location: Some(location.clone()),
                    message: format!("duplicate subject name: {}", subject.name),
                });
            }

            let weight = subject.configured_weight();
            if (weight - 100.0).abs() > 1e-6 {
                warnings.push(ValidationWarning {
                    location: Some(location.clone()),
                    message: format!("assessment weights sum to {weight}, expected 100"),
                });
            }

            for (kind, assessment_type) in &subject.types {
                let expected = assessment_type.category.expected_count() as usize;
                let actual = assessment_type.records.len();
                if actual != 0 && actual != expected {
                    warnings.push(ValidationWarning {
                        location: Some(location.clone()),
                        message: format!("{kind} expects {expected} records, found {actual}"),
                    });
                }

                let mut seen_sequences = HashSet::new();
                for record in &assessment_type.records {
                    if !seen_sequences.insert(record.sequence_number) {
                        warnings.push(ValidationWarning {
                            location: Some(location.clone()),
                            message: format!(
                                "{kind} has duplicate sequence number {}",
                                record.sequence_number
                            ),
                        });
                    }
                }
            }
        }
    }

    warnings
}
