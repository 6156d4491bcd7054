#![warn(missing_docs)]
//! Headless testing surfaces: a recording host and newline-delimited JSON frame logs.

mod recording;

use anyhow::{Context, Result};
use hudkit_overlay::FrameStats;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use recording::*;

/// One frame as captured by a headless run.
#[derive(Debug, Serialize)]
pub struct FrameRecord<'a> {
    /// Frame number reported by the overlay.
    pub frame: u64,
    /// Billboards drawn.
    pub boxes: usize,
    /// Texts drawn.
    pub texts: usize,
    /// Scroll menus laid out.
    pub menus: usize,
    /// Every host call in emission order.
    pub calls: &'a [DrawCall],
}

impl<'a> FrameRecord<'a> {
    /// Pair overlay statistics with the calls recorded for the same frame.
    pub fn new(stats: FrameStats, calls: &'a [DrawCall]) -> Self {
        Self {
            frame: stats.frame,
            boxes: stats.boxes,
            texts: stats.texts,
            menus: stats.menus,
            calls,
        }
    }
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
    lines: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create frame log {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            lines: 0,
        })
    }

    /// Append one record to the log.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush buffered records to disk.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        tracing::debug!(lines = self.lines, "Flushed frame log");
        Ok(self.lines)
    }
}
