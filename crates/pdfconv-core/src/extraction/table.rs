//! Reconstruct tables from `pdftotext -layout` output.
//!
//! Layout mode keeps horizontal positions by padding with spaces, so a
//! table shows up as consecutive lines whose cells (separated by two or more
//! spaces) start at the same character columns.

use crate::error::ConvertError;
use crate::extraction::TableRegion;
use crate::model::Table;

/// Cell start positions closer than this many columns belong to one column.
const COLUMN_TOLERANCE: usize = 2;

const MIN_ROWS: usize = 2;
const MIN_COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    /// Character column where the cell text starts.
    start: usize,
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Column {
    min: usize,
    max: usize,
}

/// Split a layout line into cells. Runs of two or more whitespace characters
/// separate cells; a single space is kept inside the cell.
fn split_cells(line: &str) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut gap = 0;

    for (col, ch) in line.chars().enumerate() {
        if ch.is_whitespace() {
            gap += 1;
            continue;
        }

        if current.is_empty() {
            start = col;
        } else if gap >= 2 {
            cells.push(Cell {
                start,
                text: std::mem::take(&mut current),
            });
            start = col;
        } else if gap == 1 {
            current.push(' ');
        }

        gap = 0;
        current.push(ch);
    }

    if !current.is_empty() {
        cells.push(Cell {
            start,
            text: current,
        });
    }

    cells
}

/// Find the table region(s) within one page of layout text.
pub fn find_table_regions(page_number: usize, lines: &[&str]) -> Vec<TableRegion> {
    let mut regions = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        let multi_cell = split_cells(line).len() >= MIN_COLUMNS;
        match (multi_cell, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                if looks_like_table(&lines[start..i]) {
                    regions.push(TableRegion {
                        page_number,
                        start_line: start,
                        end_line: i,
                    });
                }
                run_start = None;
            }
            _ => {}
        }
    }

    // Table running to the bottom of the page
    if let Some(start) = run_start {
        if looks_like_table(&lines[start..]) {
            regions.push(TableRegion {
                page_number,
                start_line: start,
                end_line: lines.len(),
            });
        }
    }

    regions
}

/// Extract the cells of a located region as rows of equal width.
pub fn extract_table(region: &TableRegion, lines: &[&str]) -> Result<Table, ConvertError> {
    let source = lines
        .get(region.start_line..region.end_line)
        .ok_or_else(|| {
            ConvertError::Table(format!(
                "lines {}..{} out of range on page {}",
                region.start_line, region.end_line, region.page_number
            ))
        })?;

    let rows: Vec<Vec<Cell>> = source
        .iter()
        .map(|line| split_cells(line))
        .filter(|cells| !cells.is_empty())
        .collect();

    if rows.is_empty() {
        return Err(ConvertError::Table(format!(
            "region at line {} on page {} has no rows",
            region.start_line, region.page_number
        )));
    }

    let columns = column_anchors(&rows);
    let table = rows
        .into_iter()
        .map(|cells| {
            let mut row = vec![String::new(); columns.len()];
            for cell in cells {
                let slot = &mut row[column_index(&columns, cell.start)];
                if !slot.is_empty() {
                    slot.push(' ');
                }
                slot.push_str(&cell.text);
            }
            row
        })
        .collect();

    Ok(table)
}

fn looks_like_table(lines: &[&str]) -> bool {
    if lines.len() < MIN_ROWS {
        return false;
    }

    let rows: Vec<Vec<Cell>> = lines.iter().map(|line| split_cells(line)).collect();
    let columns = column_anchors(&rows);

    let mut hits = vec![0usize; columns.len()];
    for cells in &rows {
        let mut seen = vec![false; columns.len()];
        for cell in cells {
            seen[column_index(&columns, cell.start)] = true;
        }
        for (hit, seen) in hits.iter_mut().zip(seen) {
            if seen {
                *hit += 1;
            }
        }
    }

    hits.iter().filter(|&&n| n >= MIN_ROWS).count() >= MIN_COLUMNS
}

fn column_anchors(rows: &[Vec<Cell>]) -> Vec<Column> {
    let mut starts: Vec<usize> = rows.iter().flatten().map(|c| c.start).collect();
    starts.sort_unstable();
    starts.dedup();

    let mut columns: Vec<Column> = Vec::new();
    for start in starts {
        match columns.last_mut() {
            Some(col) if start <= col.max + COLUMN_TOLERANCE => col.max = start,
            _ => columns.push(Column {
                min: start,
                max: start,
            }),
        }
    }
    columns
}

fn column_index(columns: &[Column], start: usize) -> usize {
    columns
        .partition_point(|c| c.min <= start)
        .saturating_sub(1)
}
