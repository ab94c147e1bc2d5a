use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::dataset::Dataset;

/// Letter grade for a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn letter(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.letter())
    }
}

/// Grade per student name, in dataset order.
pub type GradeAssignment = Dataset<Grade>;

/// Number of students per grade. Every grade is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GradeDistribution {
    counts: BTreeMap<Grade, usize>,
}

impl Default for GradeDistribution {
    fn default() -> Self {
        Self {
            counts: Grade::ALL.iter().map(|g| (*g, 0)).collect(),
        }
    }
}

impl GradeDistribution {
    pub fn record(&mut self, grade: Grade) {
        *self.counts.entry(grade).or_default() += 1;
    }

    pub fn count(&self, grade: Grade) -> usize {
        self.counts.get(&grade).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(grade, count)` pairs from A to F.
    pub fn iter(&self) -> impl Iterator<Item = (Grade, usize)> + '_ {
        self.counts.iter().map(|(g, c)| (*g, *c))
    }
}

/// Converts a mark (0–100) into a letter grade.
///
/// | Range  | Grade |
/// |--------|-------|
/// | >= 90  | A     |
/// | >= 80  | B     |
/// | >= 70  | C     |
/// | >= 60  | D     |
/// | < 60   | F     |
pub fn assign_grade(score: u8) -> Grade {
    match score {
        s if s >= 90 => Grade::A,
        s if s >= 80 => Grade::B,
        s if s >= 70 => Grade::C,
        s if s >= 60 => Grade::D,
        _ => Grade::F,
    }
}

/// Grades every entry and tallies the distribution in one pass.
pub fn generate_grades(marks: &Dataset<u8>) -> (GradeAssignment, GradeDistribution) {
    let mut grades = GradeAssignment::new();
    let mut distribution = GradeDistribution::default();

    for entry in marks.iter() {
        let grade = assign_grade(entry.value);
        grades.insert(entry.name.clone(), grade);
        distribution.record(grade);
    }

    (grades, distribution)
}
