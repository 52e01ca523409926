//! Attribute file loaders.
//!
//! All four attribute files share one shape: a whitespace-delimited header
//! row naming the columns, then one row per node in node-id order. Missing
//! data is the literal `NA` (any type), a negative id (categorical), or is
//! impossible (set cells use `none` for the empty set and `NA` for
//! missing). Set cells are comma-joined non-negative element ids.
//!
//! Loaders append columns into an existing [`AttributeTable`] so the four
//! files compose into one table; per-node length validation happens when
//! the table is attached to the graph.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bit_set::BitSet;

use crate::graph::{
    AttributeTable, BinaryAttribute, CategoricalAttribute, ContinuousAttribute, SetAttribute,
};
use crate::io::errors::{FileResult, NetworkFileError};

/// Load binary (0/1/NA) columns from `path` into `table`.
pub fn load_binary_attributes(table: &mut AttributeTable, path: &Path) -> FileResult<()> {
    let (names, rows) = read_rows(path)?;
    let mut columns: Vec<BinaryAttribute> =
        names.iter().map(|n| BinaryAttribute { name: n.clone(), values: Vec::new() }).collect();
    for (line_no, row) in rows {
        for (column, token) in columns.iter_mut().zip(row.iter()) {
            let value = match token.as_str() {
                "0" => Some(false),
                "1" => Some(true),
                _ if is_na(token) => None,
                _ => {
                    return Err(bad_token(path, line_no, &column.name, token, "0, 1, or NA"));
                }
            };
            column.values.push(value);
        }
    }
    table.binary.extend(columns);
    Ok(())
}

/// Load categorical columns from `path` into `table`; `NA` or a negative
/// id marks missing data.
pub fn load_categorical_attributes(table: &mut AttributeTable, path: &Path) -> FileResult<()> {
    let (names, rows) = read_rows(path)?;
    let mut columns: Vec<CategoricalAttribute> = names
        .iter()
        .map(|n| CategoricalAttribute { name: n.clone(), values: Vec::new() })
        .collect();
    for (line_no, row) in rows {
        for (column, token) in columns.iter_mut().zip(row.iter()) {
            let value = if is_na(token) {
                None
            } else {
                match token.parse::<i64>() {
                    Ok(id) if id < 0 => None,
                    Ok(id) => Some(id as u32),
                    Err(_) => {
                        return Err(bad_token(
                            path,
                            line_no,
                            &column.name,
                            token,
                            "an integer category id or NA",
                        ));
                    }
                }
            };
            column.values.push(value);
        }
    }
    table.categorical.extend(columns);
    Ok(())
}

/// Load continuous columns from `path` into `table`; `NA` becomes `NaN`.
pub fn load_continuous_attributes(table: &mut AttributeTable, path: &Path) -> FileResult<()> {
    let (names, rows) = read_rows(path)?;
    let mut columns: Vec<ContinuousAttribute> = names
        .iter()
        .map(|n| ContinuousAttribute { name: n.clone(), values: Vec::new() })
        .collect();
    for (line_no, row) in rows {
        for (column, token) in columns.iter_mut().zip(row.iter()) {
            let value = if is_na(token) {
                f64::NAN
            } else {
                token.parse::<f64>().map_err(|_| {
                    bad_token(path, line_no, &column.name, token, "a floating-point value or NA")
                })?
            };
            column.values.push(value);
        }
    }
    table.continuous.extend(columns);
    Ok(())
}

/// Load set-valued columns from `path` into `table`. Cells are
/// comma-joined non-negative ids, `none` for the empty set, `NA` for
/// missing.
pub fn load_set_attributes(table: &mut AttributeTable, path: &Path) -> FileResult<()> {
    let (names, rows) = read_rows(path)?;
    let mut columns: Vec<SetAttribute> =
        names.iter().map(|n| SetAttribute { name: n.clone(), values: Vec::new() }).collect();
    for (line_no, row) in rows {
        for (column, token) in columns.iter_mut().zip(row.iter()) {
            let value = if is_na(token) {
                None
            } else if token.eq_ignore_ascii_case("none") {
                Some(BitSet::new())
            } else {
                let mut set = BitSet::new();
                for element in token.split(',') {
                    let id: usize = element.trim().parse().map_err(|_| {
                        bad_token(
                            path,
                            line_no,
                            &column.name,
                            token,
                            "comma-joined element ids, 'none', or NA",
                        )
                    })?;
                    set.insert(id);
                }
                Some(set)
            };
            column.values.push(value);
        }
    }
    table.sets.extend(columns);
    Ok(())
}

/// Read the header names and the data rows, enforcing a constant cell
/// count per row.
fn read_rows(path: &Path) -> FileResult<(Vec<String>, Vec<(usize, Vec<String>)>)> {
    let file = File::open(path).map_err(|e| NetworkFileError::io(path, e))?;
    let reader = BufReader::new(file);
    let mut names: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| NetworkFileError::io(path, e))?;
        let line_no = idx + 1;
        let cells: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if cells.is_empty() {
            continue;
        }
        match &names {
            None => names = Some(cells),
            Some(header) => {
                if cells.len() != header.len() {
                    return Err(NetworkFileError::ColumnCountMismatch {
                        path: path.to_path_buf(),
                        line: line_no,
                        expected: header.len(),
                        actual: cells.len(),
                    });
                }
                rows.push((line_no, cells));
            }
        }
    }
    let names = names.ok_or(NetworkFileError::MissingHeader { path: path.to_path_buf() })?;
    Ok((names, rows))
}

fn is_na(token: &str) -> bool {
    token.eq_ignore_ascii_case("na")
}

fn bad_token(
    path: &Path, line: usize, column: &str, token: &str, expected: &'static str,
) -> NetworkFileError {
    NetworkFileError::BadToken {
        path: path.to_path_buf(),
        line,
        column: column.to_string(),
        token: token.to_string(),
        expected,
    }
}
