//! Pajek arc-list reading and writing.
//!
//! The dialect is the minimal directed form: a `*Vertices N` header,
//! optional vertex label lines (ignored), a `*Arcs` section marker, and
//! then one `i j` pair per line with 1-based node ids. Extra tokens after
//! the pair (arc weights) are ignored. Self-loops, duplicate arcs, and
//! out-of-range ids are format errors carrying the offending line.
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::graph::Digraph;
use crate::io::errors::{FileResult, NetworkFileError};

/// Load a directed graph from a Pajek arc-list file.
///
/// # Errors
/// [`NetworkFileError`] on I/O failure or any format violation; the graph
/// is discarded on error.
pub fn load_digraph(path: &Path) -> FileResult<Digraph> {
    let file = File::open(path).map_err(|e| NetworkFileError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut graph: Option<Digraph> = None;
    let mut in_arcs = false;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| NetworkFileError::io(path, e))?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if graph.is_none() {
            let mut tokens = trimmed.split_whitespace();
            let keyword = tokens.next().unwrap_or("");
            if !keyword.eq_ignore_ascii_case("*vertices") {
                return Err(NetworkFileError::MissingVerticesHeader {
                    path: path.to_path_buf(),
                    line: line_no,
                });
            }
            let token = tokens.next().unwrap_or("").to_string();
            let num_nodes: usize = token.parse().ok().filter(|&n| n > 0).ok_or_else(|| {
                NetworkFileError::BadVertexCount { path: path.to_path_buf(), line: line_no, token }
            })?;
            graph = Some(Digraph::new(num_nodes));
            continue;
        }

        if trimmed.starts_with('*') {
            let keyword = trimmed.split_whitespace().next().unwrap_or("");
            in_arcs = keyword.eq_ignore_ascii_case("*arcs");
            continue;
        }
        if !in_arcs {
            // Vertex label lines between *Vertices and *Arcs.
            continue;
        }

        let g = graph.as_mut().expect("graph created with the vertices header");
        let (i, j) = parse_arc_pair(trimmed, path, line_no, g.num_nodes())?;
        if i == j {
            return Err(NetworkFileError::SelfLoop {
                path: path.to_path_buf(),
                line: line_no,
                node: i,
            });
        }
        if g.is_arc(i, j) {
            return Err(NetworkFileError::DuplicateArc {
                path: path.to_path_buf(),
                line: line_no,
                from: i,
                to: j,
            });
        }
        g.insert_arc(i, j).expect("dyad validated against the header");
    }

    let graph = graph.ok_or(NetworkFileError::MissingVerticesHeader {
        path: path.to_path_buf(),
        line: 1,
    })?;
    if !in_arcs {
        return Err(NetworkFileError::MissingArcsHeader { path: path.to_path_buf() });
    }
    Ok(graph)
}

/// Write a graph as a Pajek arc list, arcs sorted for stable output.
///
/// # Errors
/// [`NetworkFileError::Io`] on any write failure.
pub fn write_digraph(path: &Path, g: &Digraph) -> FileResult<()> {
    let file = File::create(path).map_err(|e| NetworkFileError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut arcs = g.arcs().to_vec();
    arcs.sort_unstable();
    let io_err = |e| NetworkFileError::io(path, e);
    writeln!(writer, "*Vertices {}", g.num_nodes()).map_err(io_err)?;
    writeln!(writer, "*Arcs").map_err(io_err)?;
    for (i, j) in arcs {
        writeln!(writer, "{} {}", i + 1, j + 1).map_err(io_err)?;
    }
    writer.flush().map_err(io_err)
}

/// Parse a 1-based `i j` pair and convert to 0-based ids within range.
fn parse_arc_pair(
    line: &str, path: &Path, line_no: usize, num_nodes: usize,
) -> FileResult<(u32, u32)> {
    let mut tokens = line.split_whitespace();
    let (first, second) = match (tokens.next(), tokens.next()) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            return Err(NetworkFileError::BadArcLine {
                path: path.to_path_buf(),
                line: line_no,
                content: line.to_string(),
            });
        }
    };
    let mut convert = |token: &str| -> FileResult<u32> {
        let id: i64 = token.parse().map_err(|_| NetworkFileError::BadArcLine {
            path: path.to_path_buf(),
            line: line_no,
            content: line.to_string(),
        })?;
        if id < 1 || id > num_nodes as i64 {
            return Err(NetworkFileError::NodeOutOfRange {
                path: path.to_path_buf(),
                line: line_no,
                node: id,
                num_nodes,
            });
        }
        Ok((id - 1) as u32)
    };
    Ok((convert(first)?, convert(second)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("rust_ergm_pajek_{name}_{}", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_a_minimal_arc_list() {
        let path = write_temp("minimal", "*Vertices 4\n*Arcs\n1 2\n2 3\n4 1\n");
        let g = load_digraph(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_arcs(), 3);
        assert!(g.is_arc(0, 1));
        assert!(g.is_arc(1, 2));
        assert!(g.is_arc(3, 0));
    }

    #[test]
    fn skips_vertex_labels_and_ignores_arc_weights() {
        let path = write_temp(
            "labels",
            "*Vertices 3\n1 \"alpha\"\n2 \"beta\"\n3 \"gamma\"\n*Arcs\n1 3 2.5\n",
        );
        let g = load_digraph(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(g.num_arcs(), 1);
        assert!(g.is_arc(0, 2));
    }

    #[test]
    fn rejects_self_loops_duplicates_and_bad_ids() {
        let loop_path = write_temp("selfloop", "*Vertices 3\n*Arcs\n2 2\n");
        let err = load_digraph(&loop_path).unwrap_err();
        std::fs::remove_file(&loop_path).ok();
        assert!(matches!(err, NetworkFileError::SelfLoop { line: 3, node: 1, .. }));

        let dup_path = write_temp("duplicate", "*Vertices 3\n*Arcs\n1 2\n1 2\n");
        let err = load_digraph(&dup_path).unwrap_err();
        std::fs::remove_file(&dup_path).ok();
        assert!(matches!(err, NetworkFileError::DuplicateArc { line: 4, from: 0, to: 1, .. }));

        let range_path = write_temp("range", "*Vertices 3\n*Arcs\n1 9\n");
        let err = load_digraph(&range_path).unwrap_err();
        std::fs::remove_file(&range_path).ok();
        assert!(matches!(err, NetworkFileError::NodeOutOfRange { node: 9, num_nodes: 3, .. }));
    }

    #[test]
    fn rejects_files_without_the_expected_headers() {
        let no_vertices = write_temp("noverts", "3\n1 2\n");
        let err = load_digraph(&no_vertices).unwrap_err();
        std::fs::remove_file(&no_vertices).ok();
        assert!(matches!(err, NetworkFileError::MissingVerticesHeader { .. }));

        let no_arcs = write_temp("noarcs", "*Vertices 3\n");
        let err = load_digraph(&no_arcs).unwrap_err();
        std::fs::remove_file(&no_arcs).ok();
        assert!(matches!(err, NetworkFileError::MissingArcsHeader { .. }));
    }

    #[test]
    fn round_trips_through_write_and_load() {
        let mut g = Digraph::new(5);
        g.insert_arc(0, 4).unwrap();
        g.insert_arc(2, 1).unwrap();
        g.insert_arc(4, 0).unwrap();
        let path = std::env::temp_dir()
            .join(format!("rust_ergm_pajek_roundtrip_{}", std::process::id()));
        write_digraph(&path, &g).unwrap();
        let loaded = load_digraph(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.num_nodes(), 5);
        let mut expected = g.arcs().to_vec();
        expected.sort_unstable();
        let mut actual = loaded.arcs().to_vec();
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }
}
