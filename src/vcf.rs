//! Line based VCF reading, keeping only the columns the site rules look at.
use crate::{error::Error, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Lines starting with this are VCF meta-information or the column header
pub const HEADER_MARKER: char = '#';
/// `CHROM` through `FORMAT` plus at least one sample column
pub const MIN_COLUMNS: usize = 10;
/// ALT value of a site with no alternate allele
pub const NO_ALT: &str = ".";
/// Genotype call with both alleles missing
pub const MISSING_GENOTYPE: &str = "./.";
/// INFO marker of a site where no sample carries the ALT allele
pub const AF_ZERO: &str = "AF=0.00";
/// INFO marker of a site where every called allele is ALT
pub const AF_ONE: &str = "AF=1.00";

/// A single VCF data line reduced to the columns used for CpG detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    /// Sequence name from the `CHROM` column
    pub chrom: String,
    /// 1-based position
    pub pos: u64,
    /// `REF` column
    pub reference: String,
    /// `ALT` column as written, e.g. `.`, `G` or `G,A`
    pub alternate: String,
    /// `INFO` column split on `;`
    pub info: Vec<String>,
    /// `GT` part of every sample column, e.g. `0/1` or `./.`
    pub genotypes: Vec<String>,
}

impl VariantRecord {
    /// Parses a non-header VCF line. `line_no` is only used for error reporting.
    pub fn from_line(line: &str, line_no: usize) -> Result<Self> {
        let cols = line.split_whitespace().collect::<Vec<&str>>();

        if cols.len() < MIN_COLUMNS {
            return Err(Error::MissingColumns {
                line: line_no,
                found: cols.len(),
            });
        }

        let pos = cols[1]
            .parse::<u64>()
            .ok()
            .filter(|pos| *pos > 0)
            .ok_or_else(|| Error::InvalidPosition {
                line: line_no,
                value: cols[1].to_string(),
            })?;

        let genotypes = cols[MIN_COLUMNS - 1..]
            .iter()
            .map(|sample| match sample.split_once(':') {
                Some((gt, _)) => gt.to_string(),
                None => sample.to_string(),
            })
            .collect();

        Ok(Self {
            chrom: cols[0].to_string(),
            pos,
            reference: cols[3].to_string(),
            alternate: cols[4].to_string(),
            info: cols[7].split(';').map(String::from).collect(),
            genotypes,
        })
    }

    /// Returns a description of the record in the form `chrom:pos`
    pub fn desc(&self) -> String {
        format!("{}:{}", self.chrom, self.pos)
    }

    /// Checks that every genotype is literally one of `calls` or `./.`.
    /// Vacuously true for a record without samples.
    pub fn all_genotypes_in(&self, calls: &[&str]) -> bool {
        self.genotypes
            .iter()
            .all(|gt| gt == MISSING_GENOTYPE || calls.contains(&gt.as_str()))
    }

    /// Checks if any genotype mentions allele `0`
    pub fn any_reference_call(&self) -> bool {
        self.genotypes.iter().any(|gt| gt.contains('0'))
    }

    /// Checks if any INFO entry contains `marker` as a substring
    pub fn has_info_marker(&self, marker: &str) -> bool {
        self.info.iter().any(|entry| entry.contains(marker))
    }

    /// Checks if `self` sits directly after `upstream` on the same sequence
    pub fn is_next_to(&self, upstream: &VariantRecord) -> bool {
        self.chrom == upstream.chrom && upstream.pos.checked_add(1) == Some(self.pos)
    }
}

/// Iterator over the data lines of a VCF, skipping header lines and
/// parsing everything else into [`VariantRecord`]s.
#[derive(Debug)]
pub struct VcfRecords<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> VcfRecords<R> {
    /// Wraps an already opened, decompressed reader
    pub fn new(rdr: R) -> Self {
        Self {
            lines: rdr.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for VcfRecords<R> {
    type Item = Result<VariantRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;

            if line.starts_with(HEADER_MARKER) {
                continue;
            }
            return Some(VariantRecord::from_line(&line, self.line_no));
        }
    }
}

/// Opens a plain or compressed VCF. Files too short to sniff a compression format
/// from are read as plain text.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<VcfRecords<BufReader<Box<dyn Read>>>> {
    let path = path.as_ref();
    let rdr: Box<dyn Read> = match niffler::get_reader(Box::new(File::open(path)?)) {
        Ok((rdr, format)) => {
            info!("Reading {} with compression {:?}", path.display(), format);
            rdr
        }
        Err(niffler::Error::FileTooShort) => {
            debug!(
                "{} is too short to detect compression, reading as plain text",
                path.display()
            );
            Box::new(File::open(path)?)
        }
        Err(e) => return Err(e.into()),
    };

    Ok(VcfRecords::new(BufReader::new(rdr)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    pub(crate) fn record(
        reference: &str,
        alternate: &str,
        info: &[&str],
        genotypes: &[&str],
    ) -> VariantRecord {
        VariantRecord {
            chrom: "chr1".to_string(),
            pos: 100,
            reference: reference.to_string(),
            alternate: alternate.to_string(),
            info: info.iter().map(|s| s.to_string()).collect(),
            genotypes: genotypes.iter().map(|s| s.to_string()).collect(),
        }
    }

    const LINE: &str =
        "scaffold_7\t4512\t.\tT\tG\t60.5\tPASS\tAC=4;AF=1.00;AN=4\tGT:AD:DP\t1/1:0,12:12\t./.:0,0:0";

    #[test]
    fn parse_columns() {
        let rec = VariantRecord::from_line(LINE, 1).unwrap();
        assert_eq!(rec.chrom, "scaffold_7");
        assert_eq!(rec.pos, 4512);
        assert_eq!(rec.reference, "T");
        assert_eq!(rec.alternate, "G");
        assert_eq!(rec.info, vec!["AC=4", "AF=1.00", "AN=4"]);
        assert_eq!(rec.genotypes, vec!["1/1", "./."]);
        assert_eq!(rec.desc(), "scaffold_7:4512");
    }

    #[test]
    fn parse_is_repeatable() {
        let first = VariantRecord::from_line(LINE, 3).unwrap();
        let second = VariantRecord::from_line(LINE, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn genotype_without_format_fields() {
        let rec = VariantRecord::from_line("c\t5\t.\tC\t.\t.\t.\tDP=3\tGT\t0/0", 1).unwrap();
        assert_eq!(rec.genotypes, vec!["0/0"]);
    }

    #[test]
    fn too_few_columns() {
        let err = VariantRecord::from_line("chr1\t10\t.\tC\t.\t.\t.\tDP=1\tGT", 7).unwrap_err();
        assert!(matches!(err, Error::MissingColumns { line: 7, found: 9 }));

        let err = VariantRecord::from_line("", 8).unwrap_err();
        assert!(matches!(err, Error::MissingColumns { line: 8, found: 0 }));
    }

    #[test]
    fn bad_position() {
        for pos in &["ten", "-1", "0", "1.5"] {
            let line = format!("chr1\t{}\t.\tC\t.\t.\t.\tDP=1\tGT\t0/0", pos);
            match VariantRecord::from_line(&line, 2) {
                Err(Error::InvalidPosition { line: 2, value }) => assert_eq!(&value, pos),
                other => panic!("Expected invalid position, got {:?}", other),
            }
        }
    }

    #[test]
    fn genotype_predicates() {
        let rec = record("C", "T", &["AF=0.00"], &["0/0", "./.", "0/0"]);
        assert!(rec.all_genotypes_in(&["0/0"]));
        assert!(!rec.all_genotypes_in(&["1/1"]));
        assert!(rec.any_reference_call());
        assert!(rec.has_info_marker(AF_ZERO));
        assert!(!rec.has_info_marker(AF_ONE));

        let phased = record("C", "T", &[], &["0|0"]);
        assert!(!phased.all_genotypes_in(&["0/0"]));

        let no_samples = record("C", "T", &[], &[]);
        assert!(no_samples.all_genotypes_in(&["1/1"]));
    }

    #[test]
    fn adjacency() {
        let upstream = record("C", ".", &[], &[]);
        let mut downstream = record("G", ".", &[], &[]);
        downstream.pos = 101;
        assert!(downstream.is_next_to(&upstream));
        assert!(!upstream.is_next_to(&downstream));

        downstream.pos = 102;
        assert!(!downstream.is_next_to(&upstream));

        downstream.pos = 101;
        downstream.chrom = "chr2".to_string();
        assert!(!downstream.is_next_to(&upstream));
    }

    #[test]
    fn records_skip_header_and_count_lines() {
        let vcf = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\ts1\n\
                   chr1\t1\t.\tA\t.\t.\t.\tDP=1\tGT\t0/0\n\
                   chr1\tx\t.\tA\t.\t.\t.\tDP=1\tGT\t0/0\n";
        let mut records = VcfRecords::new(Cursor::new(vcf));

        assert_eq!(records.next().unwrap().unwrap().pos, 1);
        assert!(matches!(
            records.next().unwrap(),
            Err(Error::InvalidPosition { line: 4, .. })
        ));
        assert!(records.next().is_none());
    }
}
