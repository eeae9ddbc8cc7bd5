//! Comma-separated edge-list persistence.
//!
//! One edge per line, `a,b`. Isolated nodes are written as a self-loop
//! `x,x` so they survive a save/load round trip; the parser turns such lines
//! back into a bare node, so a loaded [`Graph`] never contains a self-loop.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::{Graph, GraphError, NodeLabel};

/// Parses an edge list from `reader`.
///
/// Blank lines are skipped; whitespace around ids is ignored.
pub fn parse_edgelist<R: BufRead>(reader: R) -> Result<Graph, GraphError> {
    let mut graph = Graph::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (a, b) = parse_line(trimmed).ok_or_else(|| GraphError::parse(lineno + 1, trimmed))?;
        graph.add_edge(a, b);
    }
    Ok(graph)
}

fn parse_line(line: &str) -> Option<(NodeLabel, NodeLabel)> {
    let (a, b) = line.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

/// Writes every edge once, then a self-loop line per isolated node.
pub fn write_edgelist<W: Write>(graph: &Graph, mut writer: W) -> Result<(), GraphError> {
    for (a, b) in graph.edges() {
        writeln!(writer, "{},{}", graph.label(a), graph.label(b))?;
    }
    for node in graph.isolated_nodes() {
        let label = graph.label(node);
        writeln!(writer, "{label},{label}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Loads an edge-list file.
pub fn read_edgelist(path: impl AsRef<Path>) -> Result<Graph, GraphError> {
    let path = path.as_ref();
    let graph = parse_edgelist(BufReader::new(File::open(path)?))?;
    debug!(
        "loaded {} ({} nodes, {} edges)",
        path.display(),
        graph.num_nodes(),
        graph.num_edges()
    );
    Ok(graph)
}

/// Saves `graph` to `path`, creating parent directories as needed.
pub fn save_edgelist(path: impl AsRef<Path>, graph: &Graph) -> Result<(), GraphError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    write_edgelist(graph, BufWriter::new(File::create(path)?))
}
