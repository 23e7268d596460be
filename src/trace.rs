//! Diagnostic search trace.
//!
//! One tab-separated record per scored node, appended to a file named after
//! the search start time. The trace is advisory: any I/O failure is logged
//! and the trace switches itself off, the search carries on.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::constants::TRACE_FILE_PREFIX;
use crate::node::BoardState;

/// Column header written at the top of every trace file.
pub const TRACE_HEADER: &str = "id\tparent\tposition\tside\tterminal\tscore\tdepth\tmove";

/// Append-only writer for one search.
pub struct SearchTrace {
    path: PathBuf,
    out: Option<BufWriter<File>>,
}

impl SearchTrace {
    /// Open a trace file in `dir` for a search started at `started`.
    ///
    /// Returns None (after logging) if the file cannot be created.
    pub fn open(dir: &Path, started: DateTime<Local>) -> Option<Self> {
        let path = dir.join(trace_file_name(started));
        let file = fs::create_dir_all(dir).and_then(|_| File::create(&path));
        match file {
            Ok(file) => {
                let mut trace = Self {
                    path,
                    out: Some(BufWriter::new(file)),
                };
                trace.write_line(TRACE_HEADER);
                tracing::debug!(path = %trace.path.display(), "search trace opened");
                Some(trace)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot open search trace");
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the record for a scored node.
    pub fn record<P: Display, M: Display>(&mut self, node: &BoardState<P, M>) {
        if self.out.is_none() {
            return;
        }
        let parent = node.parent.map(|p| p.to_string()).unwrap_or_default();
        let mv = node
            .move_made
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_default();
        let line = format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            node.id,
            parent,
            node.position,
            node.side_to_move,
            node.terminal,
            node.score,
            node.depth,
            mv
        );
        self.write_line(&line);
    }

    /// Flush buffered records. Called once the search finishes.
    pub fn finish(mut self) {
        if let Some(out) = self.out.as_mut() {
            if let Err(err) = out.flush() {
                tracing::warn!(path = %self.path.display(), error = %err, "cannot flush search trace");
            }
        }
    }

    fn write_line(&mut self, line: &str) {
        if let Some(out) = self.out.as_mut() {
            if let Err(err) = writeln!(out, "{line}") {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "search trace write failed, disabling trace"
                );
                self.out = None;
            }
        }
    }
}

/// File name for a trace started at `started`, e.g.
/// `search-20261018-142501.123456.tsv`.
pub fn trace_file_name(started: DateTime<Local>) -> String {
    format!(
        "{TRACE_FILE_PREFIX}{}.tsv",
        started.format("%Y%m%d-%H%M%S%.6f")
    )
}
