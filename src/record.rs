// src/record.rs

use serde::Serialize;
use std::fmt;

/// Arabic decimal separator, normalized to `.` before numeric checks.
pub const ARABIC_DECIMAL_SEPARATOR: char = '\u{066B}';

/// Token used for any score cell that is missing from the row.
pub const DEFAULT_SCORE: &str = "0";

/// The ten score columns of the sheet, in column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Arabic,
    English,
    SocialStudies,
    Algebra,
    Geometry,
    Science,
    Subtotal,
    Computer,
    Religion,
    Art,
}

impl Subject {
    pub const ALL: [Subject; 10] = [
        Subject::Arabic,
        Subject::English,
        Subject::SocialStudies,
        Subject::Algebra,
        Subject::Geometry,
        Subject::Science,
        Subject::Subtotal,
        Subject::Computer,
        Subject::Religion,
        Subject::Art,
    ];

    /// Subjects in the order the grades table lists them (subtotal is shown apart).
    pub const TABLE_ORDER: [Subject; 9] = [
        Subject::Arabic,
        Subject::English,
        Subject::SocialStudies,
        Subject::Algebra,
        Subject::Geometry,
        Subject::Science,
        Subject::Computer,
        Subject::Religion,
        Subject::Art,
    ];

    /// Zero-based CSV column holding this subject.
    pub fn column(self) -> usize {
        self.index() + 3
    }

    /// True for the three subjects that do not count towards the subtotal.
    pub fn is_non_additive(self) -> bool {
        matches!(self, Subject::Computer | Subject::Religion | Subject::Art)
    }

    fn index(self) -> usize {
        match self {
            Subject::Arabic => 0,
            Subject::English => 1,
            Subject::SocialStudies => 2,
            Subject::Algebra => 3,
            Subject::Geometry => 4,
            Subject::Science => 5,
            Subject::Subtotal => 6,
            Subject::Computer => 7,
            Subject::Religion => 8,
            Subject::Art => 9,
        }
    }
}

/// One score cell, kept as the trimmed source token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Score(String);

impl Score {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Numeric value after normalizing the Arabic decimal separator.
    pub fn value(&self) -> Option<f64> {
        parse_number(&self.0.replace(ARABIC_DECIMAL_SEPARATOR, "."))
    }

    pub fn is_non_numeric(&self) -> bool {
        self.value().is_none()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strict finite-float parse; no glyph normalization.
pub fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One matched data row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    seat: String,
    name: String,
    institution: String,
    scores: [Score; 10],
}

impl Record {
    pub fn new(seat: String, name: String, institution: String, scores: [Score; 10]) -> Self {
        Self {
            seat,
            name,
            institution,
            scores,
        }
    }

    pub fn seat(&self) -> &str {
        &self.seat
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn institution(&self) -> &str {
        &self.institution
    }

    pub fn score(&self, subject: Subject) -> &Score {
        &self.scores[subject.index()]
    }

    /// `(subject, score)` pairs in column order.
    pub fn scores(&self) -> impl Iterator<Item = (Subject, &Score)> {
        Subject::ALL.iter().copied().zip(self.scores.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_columns() {
        assert_eq!(Subject::Arabic.column(), 3);
        assert_eq!(Subject::Science.column(), 8);
        assert_eq!(Subject::Subtotal.column(), 9);
        assert_eq!(Subject::Art.column(), 12);
        let non_additive: Vec<_> = Subject::ALL
            .iter()
            .filter(|s| s.is_non_additive())
            .collect();
        assert_eq!(non_additive.len(), 3);
    }

    #[test]
    fn test_arabic_decimal_separator() {
        let token = "12\u{066B}5";
        assert_eq!(parse_number(token), None);

        let score = Score::new(token);
        assert_eq!(score.value(), Some(12.5));
        assert!(!score.is_non_numeric());
        assert_eq!(score.raw(), token);
    }

    #[test]
    fn test_non_numeric_tokens() {
        assert!(Score::new("غ").is_non_numeric());
        assert!(Score::new("absent").is_non_numeric());
        assert!(Score::new("NaN").is_non_numeric());
        assert!(!Score::new("0").is_non_numeric());
        assert!(!Score::new("97.5").is_non_numeric());
    }
}
