//! Per-site rules deciding which bases a VCF record is fixed or polymorphic for.
//!
//! A site only counts as fixed when the VCF says so explicitly (`ALT` is `.`) or when the
//! `AF` annotation and every genotype call agree. `ALT` text alone never makes a site fixed.
use crate::vcf::{VariantRecord, AF_ONE, AF_ZERO, NO_ALT};
use log::debug;

/// Genotypes of a site monomorphic for the reference allele
const REF_HOMOZYGOUS: [&str; 1] = ["0/0"];
/// Genotypes of a site monomorphic for the first alternate allele
const ALT_HOMOZYGOUS: [&str; 1] = ["1/1"];
/// Genotypes carrying only alternate alleles
const ALT_ONLY: [&str; 4] = ["1/1", "1/2", "2/1", "2/2"];

/// Outcome of testing a single site against one of the rule sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Site does not satisfy the rule set
    NoMatch,
    /// Site is fixed for its reference base
    FixedRef(String),
    /// Site is fixed for its alternate base
    FixedAlt(String),
    /// Site carries one or two of the tested bases
    PolymorphicPair {
        /// Base the pairing is anchored on
        primary: String,
        /// Allele text written to the output, e.g. `A,G`
        alleles: String,
    },
}

impl Classification {
    /// Checks if any rule matched
    pub fn is_match(&self) -> bool {
        !matches!(self, Classification::NoMatch)
    }

    /// Returns the base a fixed site is fixed for
    pub fn fixed_base(&self) -> Option<&str> {
        match self {
            Classification::FixedRef(base) | Classification::FixedAlt(base) => Some(base.as_str()),
            _ => None,
        }
    }

    /// Returns the label used in the BED name column
    pub fn label(&self) -> Option<&str> {
        match self {
            Classification::NoMatch => None,
            Classification::FixedRef(base) | Classification::FixedAlt(base) => Some(base.as_str()),
            Classification::PolymorphicPair { alleles, .. } => Some(alleles.as_str()),
        }
    }
}

/// Pair of single bases a rule set is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseSet(pub &'static str, pub &'static str);

/// Bases of the fixed CpG anchor
pub const C_OR_G: BaseSet = BaseSet("C", "G");
/// Bases following a C in a CpG or CpA
pub const A_OR_G: BaseSet = BaseSet("A", "G");
/// Bases preceding a G in a CpG or TpG
pub const C_OR_T: BaseSet = BaseSet("C", "T");

impl BaseSet {
    /// Checks if `allele` is one of the two bases
    pub fn contains(&self, allele: &str) -> bool {
        allele == self.0 || allele == self.1
    }

    /// Checks if an `ALT` value is one of the bases or both of them in either order
    pub fn contains_alt(&self, alt: &str) -> bool {
        match alt.split_once(',') {
            None => self.contains(alt),
            Some((first, second)) => {
                first != second && self.contains(first) && self.contains(second)
            }
        }
    }
}

fn fixed_for_ref(record: &VariantRecord) -> bool {
    record.alternate == NO_ALT
        || (record.all_genotypes_in(&REF_HOMOZYGOUS) && record.has_info_marker(AF_ZERO))
}

fn fixed_for_alt(record: &VariantRecord) -> bool {
    record.all_genotypes_in(&ALT_HOMOZYGOUS) && record.has_info_marker(AF_ONE)
}

/// Finds sites fixed for `C` or `G`, either on the reference or, when `AF=1.00` and all
/// calls are `1/1`, on the alternate allele.
pub fn c_or_g_fixed(record: &VariantRecord) -> Classification {
    if C_OR_G.contains(&record.reference) && fixed_for_ref(record) {
        Classification::FixedRef(record.reference.clone())
    } else if C_OR_G.contains(&record.alternate) && fixed_for_alt(record) {
        Classification::FixedAlt(record.alternate.clone())
    } else {
        Classification::NoMatch
    }
}

/// Finds sites with `A` and/or `G`, fixed or polymorphic
pub fn a_or_g_polymorphic(record: &VariantRecord) -> Classification {
    polymorphic(record, A_OR_G)
}

/// Finds sites with `C` and/or `T`, fixed or polymorphic
pub fn c_or_t_polymorphic(record: &VariantRecord) -> Classification {
    polymorphic(record, C_OR_T)
}

fn polymorphic(record: &VariantRecord, bases: BaseSet) -> Classification {
    if bases.contains(&record.reference) {
        if fixed_for_ref(record) {
            Classification::FixedRef(record.reference.clone())
        } else if bases.contains_alt(&record.alternate) {
            Classification::PolymorphicPair {
                primary: record.reference.clone(),
                alleles: format!("{},{}", record.reference, record.alternate),
            }
        } else {
            Classification::NoMatch
        }
    } else if bases.contains_alt(&record.alternate) {
        // REF is outside the base set so it must not show up among the calls
        if record.all_genotypes_in(&ALT_ONLY) {
            let primary = match record.alternate.split_once(',') {
                Some((first, _)) => first,
                None => record.alternate.as_str(),
            };
            Classification::PolymorphicPair {
                primary: primary.to_string(),
                alleles: record.alternate.clone(),
            }
        } else {
            if record.any_reference_call() {
                debug!(
                    "Record {} rejected as reference allele {} is called",
                    record.desc(),
                    record.reference
                );
            }
            Classification::NoMatch
        }
    } else {
        Classification::NoMatch
    }
}
