//! Snowball zone file loader.
//!
//! The zone file follows the attribute-file shape: a header row naming the
//! single `zone` column, then one non-negative wave index per node in
//! node-id order. Structural validation (contiguous waves, every outer-wave
//! node connected to its preceding wave) happens when the zones are
//! attached to the loaded graph.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::io::errors::{FileResult, NetworkFileError};

/// Load the per-node zone vector from `path`.
pub fn load_zones(path: &Path) -> FileResult<Vec<u32>> {
    let file = File::open(path).map_err(|e| NetworkFileError::io(path, e))?;
    let reader = BufReader::new(file);
    let mut header_seen = false;
    let mut column = String::from("zone");
    let mut zones = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| NetworkFileError::io(path, e))?;
        let line_no = idx + 1;
        let cells: Vec<&str> = line.split_whitespace().collect();
        if cells.is_empty() {
            continue;
        }
        if cells.len() != 1 {
            return Err(NetworkFileError::ColumnCountMismatch {
                path: path.to_path_buf(),
                line: line_no,
                expected: 1,
                actual: cells.len(),
            });
        }
        if !header_seen {
            header_seen = true;
            column = cells[0].to_string();
            continue;
        }
        let zone: u32 = cells[0].parse().map_err(|_| NetworkFileError::BadToken {
            path: path.to_path_buf(),
            line: line_no,
            column: column.clone(),
            token: cells[0].to_string(),
            expected: "a non-negative wave index",
        })?;
        zones.push(zone);
    }
    if !header_seen {
        return Err(NetworkFileError::MissingHeader { path: path.to_path_buf() });
    }
    Ok(zones)
}
