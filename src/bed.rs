//! Single-base BED output of emitted site pairs.
use crate::Result;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One labelled single-base BED interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedEntry {
    /// Sequence name
    pub chrom: String,
    /// 0-based start
    pub start: u64,
    /// 1-based end
    pub end: u64,
    /// Base or allele text of the site
    pub name: String,
}

impl BedEntry {
    /// Creates the interval covering the 1-based VCF position `pos`
    pub fn from_site<C: Into<String>, N: Into<String>>(chrom: C, pos: u64, name: N) -> Self {
        Self {
            chrom: chrom.into(),
            start: pos.saturating_sub(1),
            end: pos,
            name: name.into(),
        }
    }
}

impl fmt::Display for BedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.chrom, self.start, self.end, self.name)
    }
}

/// Two adjacent sites reported together, upstream first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedPair {
    /// Site at the lower position
    pub upstream: BedEntry,
    /// Site directly after `upstream`
    pub downstream: BedEntry,
}

/// Writes emitted pairs as BED rows. Rows are buffered until [`BedWriter::finish`].
#[derive(Debug)]
pub struct BedWriter<W: Write> {
    inner: BufWriter<W>,
    rows: usize,
}

impl BedWriter<File> {
    /// Creates or truncates the BED file at `path`
    pub fn to_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> BedWriter<W> {
    /// Wraps any writer
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            rows: 0,
        }
    }

    /// Writes the upstream row followed by the downstream row
    pub fn write_pair(&mut self, pair: &EmittedPair) -> Result<()> {
        writeln!(self.inner, "{}", pair.upstream)?;
        writeln!(self.inner, "{}", pair.downstream)?;
        self.rows += 2;
        Ok(())
    }

    /// Number of rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes all buffered rows and hands back the underlying writer
    pub fn finish(self) -> Result<W> {
        Ok(self.inner.into_inner().map_err(|e| e.into_error())?)
    }
}
