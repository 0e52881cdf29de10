//! Piecewise-linear anchor tables.
//!
//! Every raw metric (sentence length, passive rate, grade level, ...) is
//! mapped onto the 1.0–6.0 CEFR scale through an ordered table of
//! `(metric value, score)` pairs. Tables are sorted by metric value; the score
//! column may rise or fall.

/// An ordered table of `(metric value, score)` pairs, ascending by value.
pub type AnchorTable = [(f64, f64)];

/// Average sentence length (words per sentence).
pub static SENTENCE_LENGTH: [(f64, f64); 6] = [
    (6.0, 1.0),
    (9.0, 2.0),
    (13.0, 3.0),
    (18.0, 4.0),
    (23.0, 5.0),
    (28.0, 6.0),
];

/// Subordinating conjunctions and relative pronouns per sentence.
pub static SUBORDINATION: [(f64, f64); 6] = [
    (0.0, 1.0),
    (0.3, 2.0),
    (0.6, 3.0),
    (1.0, 4.0),
    (1.5, 5.0),
    (2.0, 6.0),
];

/// Passive constructions per sentence.
pub static PASSIVE_RATE: [(f64, f64); 6] = [
    (0.0, 1.0),
    (0.05, 2.0),
    (0.10, 3.0),
    (0.20, 4.0),
    (0.30, 5.0),
    (0.40, 6.0),
];

/// Distinct connector categories.
pub static CONNECTOR_DIVERSITY: [(f64, f64); 6] = [
    (2.0, 1.0),
    (5.0, 2.0),
    (10.0, 3.0),
    (15.0, 4.0),
    (20.0, 5.0),
    (25.0, 6.0),
];

/// US school grade (Flesch-Kincaid and Coleman-Liau).
pub static GRADE_LEVEL: [(f64, f64); 6] = [
    (1.5, 1.0),
    (3.5, 2.0),
    (6.0, 3.0),
    (9.0, 4.0),
    (12.0, 5.0),
    (14.0, 6.0),
];

/// Flesch Reading Ease. Higher ease means a lower score.
pub static READING_EASE: [(f64, f64); 6] = [
    (45.0, 6.0),
    (55.0, 5.0),
    (65.0, 4.0),
    (75.0, 3.0),
    (85.0, 2.0),
    (95.0, 1.0),
];

/// Maps `value` onto the score scale described by `table`.
///
/// Values at or below the first anchor take its score, values above the last
/// anchor take its score, and values in between are linearly interpolated
/// between the two bracketing anchors. An empty table yields 1.0.
pub fn interpolate(table: &AnchorTable, value: f64) -> f64 {
    let Some(&(first_x, first_y)) = table.first() else {
        return 1.0;
    };
    if value <= first_x {
        return first_y;
    }
    for pair in table.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if value <= x1 {
            return (value - x0) / (x1 - x0) * (y1 - y0) + y0;
        }
    }
    table.last().map_or(first_y, |&(_, y)| y)
}
