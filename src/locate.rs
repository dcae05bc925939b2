// src/locate.rs

use crate::locale::Placeholders;
use crate::record::{Record, Score, Subject, DEFAULT_SCORE};
use tracing::trace;

/// Find the first data row whose first cell equals `key`, using the default placeholders.
pub fn locate(csv_text: &str, key: &str) -> Option<Record> {
    locate_with(csv_text, key, Placeholders::default())
}

/// Row 0 is always treated as the header. Cells are split on bare commas; quoted
/// fields are not understood, so a comma inside a cell shifts every later column.
pub fn locate_with(csv_text: &str, key: &str, placeholders: Placeholders) -> Option<Record> {
    csv_text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .skip(1)
        .find_map(|(line_no, line)| {
            let cells: Vec<&str> = line.split(',').collect();
            if cells[0].trim() != key {
                return None;
            }
            trace!(line_no, cells = cells.len(), "seat key matched");
            Some(build_record(&cells, placeholders))
        })
}

fn build_record(cells: &[&str], placeholders: Placeholders) -> Record {
    let scores = Subject::ALL.map(|subject| {
        Score::new(cell(cells, subject.column()).unwrap_or(DEFAULT_SCORE))
    });
    Record::new(
        cells[0].trim().to_string(),
        cell(cells, 1).unwrap_or(placeholders.name).to_string(),
        cell(cells, 2).unwrap_or(placeholders.institution).to_string(),
        scores,
    )
}

/// Trimmed cell at `idx`, or `None` when it is absent or blank.
fn cell<'a>(cells: &[&'a str], idx: usize) -> Option<&'a str> {
    cells
        .get(idx)
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
}
