//! Two-record sliding window over a position sorted VCF stream.
//!
//! Every record is classified once when it enters the window. Whenever the window is full the
//! older record is tested as the first base of a dinucleotide and the younger one as the
//! second, provided the two are directly adjacent on the same sequence.
use crate::bed::{BedEntry, BedWriter, EmittedPair};
use crate::genomic::{a_or_g_polymorphic, c_or_g_fixed, c_or_t_polymorphic, Classification};
use crate::vcf::VariantRecord;
use crate::Result;
use log::debug;
use std::io::Write;

/// Fill level of a [`SlidingWindow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    /// Nothing pushed yet
    Empty,
    /// Only one item seen so far
    OneBuffered,
    /// Two items available for comparison
    TwoBuffered,
}

/// Holds at most the two most recently pushed items
#[derive(Debug, Clone)]
pub struct SlidingWindow<T> {
    older: Option<T>,
    younger: Option<T>,
}

impl<T> Default for SlidingWindow<T> {
    fn default() -> Self {
        Self {
            older: None,
            younger: None,
        }
    }
}

impl<T> SlidingWindow<T> {
    /// Creates an empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `item` as the youngest entry and returns the entry that fell out, if any
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = self.older.take();
        self.older = self.younger.replace(item);
        evicted
    }

    /// Current fill level
    pub fn state(&self) -> WindowState {
        match (&self.older, &self.younger) {
            (Some(_), Some(_)) => WindowState::TwoBuffered,
            (None, Some(_)) => WindowState::OneBuffered,
            _ => WindowState::Empty,
        }
    }

    /// Number of buffered entries
    pub fn len(&self) -> usize {
        match self.state() {
            WindowState::Empty => 0,
            WindowState::OneBuffered => 1,
            WindowState::TwoBuffered => 2,
        }
    }

    /// Checks if nothing has been pushed
    pub fn is_empty(&self) -> bool {
        self.state() == WindowState::Empty
    }

    /// Returns `(older, younger)` once two entries are buffered
    pub fn pair(&self) -> Option<(&T, &T)> {
        match (&self.older, &self.younger) {
            (Some(older), Some(younger)) => Some((older, younger)),
            _ => None,
        }
    }
}

/// A record together with the classifications it may be anchored on
#[derive(Debug, Clone)]
pub struct Site {
    /// Parsed VCF record
    pub record: VariantRecord,
    /// Fixed for `C` or `G`
    pub c_or_g: Classification,
    /// `C` and/or `T`
    pub c_or_t: Classification,
}

impl Site {
    /// Classifies `record` against the anchor rule sets
    pub fn new(record: VariantRecord) -> Self {
        Self {
            c_or_g: c_or_g_fixed(&record),
            c_or_t: c_or_t_polymorphic(&record),
            record,
        }
    }

    fn bed_entry(&self, classification: &Classification) -> Option<BedEntry> {
        classification
            .label()
            .map(|label| BedEntry::from_site(self.record.chrom.as_str(), self.record.pos, label))
    }
}

/// Which dinucleotide an emitted pair was found by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairKind {
    /// Fixed `C` followed by `A` and/or `G`
    CpgOrCpa,
    /// `C` and/or `T` followed by fixed `G`
    TpgOrCpg,
}

/// Counts collected over one scan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// Records pushed into the window
    pub records: usize,
    /// Windows with two records that were evaluated
    pub windows: usize,
    /// Pairs of [`PairKind::CpgOrCpa`]
    pub cpg_or_cpa: usize,
    /// Pairs of [`PairKind::TpgOrCpg`]
    pub tpg_or_cpg: usize,
}

impl ScanSummary {
    /// Total number of emitted pairs
    pub fn pairs(&self) -> usize {
        self.cpg_or_cpa + self.tpg_or_cpg
    }
}

/// Single pass scanner emitting adjacent site pairs
#[derive(Debug, Default)]
pub struct Scanner {
    window: SlidingWindow<Site>,
    summary: ScanSummary,
}

impl Scanner {
    /// Creates a scanner with an empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the window one record forward and returns the pair found in it, if any.
    /// Records must arrive sorted by sequence and position.
    pub fn push(&mut self, record: VariantRecord) -> Option<(PairKind, EmittedPair)> {
        self.window.push(Site::new(record));
        self.summary.records += 1;

        let (older, younger) = self.window.pair()?;
        self.summary.windows += 1;

        let found = match_sites(older, younger);
        match found {
            Some((PairKind::CpgOrCpa, _)) => self.summary.cpg_or_cpa += 1,
            Some((PairKind::TpgOrCpg, _)) => self.summary.tpg_or_cpg += 1,
            None => {}
        }
        found
    }

    /// Counts collected so far
    pub fn summary(&self) -> &ScanSummary {
        &self.summary
    }

    /// Ends the scan
    pub fn finish(self) -> ScanSummary {
        self.summary
    }
}

/// Tests the older site as the first and the younger as the second base of a CpG, CpA or TpG.
/// The C/T test is only consulted when the older site is not fixed for `C`.
fn match_sites(older: &Site, younger: &Site) -> Option<(PairKind, EmittedPair)> {
    let (kind, next) = if older.c_or_g.fixed_base() == Some("C") {
        if !younger.record.is_next_to(&older.record) {
            return None;
        }
        let next = a_or_g_polymorphic(&younger.record);
        (PairKind::CpgOrCpa, next)
    } else if older.c_or_t.is_match() {
        if !younger.record.is_next_to(&older.record) {
            return None;
        }
        if younger.c_or_g.fixed_base() != Some("G") {
            return None;
        }
        (PairKind::TpgOrCpg, younger.c_or_g.clone())
    } else {
        return None;
    };

    let anchor = match kind {
        PairKind::CpgOrCpa => &older.c_or_g,
        PairKind::TpgOrCpg => &older.c_or_t,
    };

    let pair = EmittedPair {
        upstream: older.bed_entry(anchor)?,
        downstream: younger.bed_entry(&next)?,
    };
    Some((kind, pair))
}

/// Runs the scanner over `records`, writing every pair as soon as it is found.
/// The first malformed record aborts the scan.
pub fn scan<I, W>(records: I, writer: &mut BedWriter<W>) -> Result<ScanSummary>
where
    I: IntoIterator<Item = Result<VariantRecord>>,
    W: Write,
{
    let mut scanner = Scanner::new();
    for record in records {
        if let Some((kind, pair)) = scanner.push(record?) {
            debug!(
                "{:?} pair at {}:{}-{}",
                kind, pair.upstream.chrom, pair.upstream.start, pair.downstream.end
            );
            writer.write_pair(&pair)?;
        }
    }
    Ok(scanner.finish())
}
