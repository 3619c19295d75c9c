#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]

//! Finds CpG, CpA and TpG site pairs, including CpG/CpA and TpG/CpG polymorphisms, in
//! resequencing VCFs that contain both variant and invariant sites.
//!
//! Two sites are only paired when they are directly adjacent on the same sequence. A site
//! counts as fixed for a base when `ALT` is `.` or when the `AF` annotation agrees with every
//! genotype call. Pairs are written as two single-base BED intervals.

pub mod bed;
pub mod cli;
pub mod error;
pub mod genomic;
pub mod vcf;
pub mod window;

/// Crate wide result
pub type Result<T> = std::result::Result<T, crate::error::Error>;
