//! Command line interface.
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "rustycpg",
    about = "Finds adjacent CpG, CpA and TpG sites and their polymorphisms in a VCF"
)]
#[allow(missing_docs)]
pub struct RustyCpg {
    #[structopt(
        help = "VCF with variant and invariant sites sorted by position, optionally gzipped",
        parse(from_os_str)
    )]
    pub vcf: PathBuf,
    #[structopt(help = "BED file the site pairs are written to", parse(from_os_str))]
    pub bed: PathBuf,
    #[structopt(
        short,
        long,
        parse(from_occurrences),
        help = "Logging verbosity, repeat for more detail"
    )]
    pub verbose: u8,
}

impl RustyCpg {
    /// Log level for the given verbosity, warnings only by default
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Starts the logger, `RUST_LOG` can still narrow down individual modules
    pub fn set_logging(&self) {
        env_logger::Builder::new()
            .filter_level(self.log_level())
            .parse_filters(&std::env::var("RUST_LOG").unwrap_or_default())
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_paths() {
        let opt = RustyCpg::from_iter(vec!["rustycpg", "in.vcf.gz", "out.bed"]);
        assert_eq!(opt.vcf, PathBuf::from("in.vcf.gz"));
        assert_eq!(opt.bed, PathBuf::from("out.bed"));
        assert_eq!(opt.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn verbosity() {
        let opt = RustyCpg::from_iter(vec!["rustycpg", "-vv", "in.vcf", "out.bed"]);
        assert_eq!(opt.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn both_paths_required() {
        assert!(RustyCpg::from_iter_safe(vec!["rustycpg", "in.vcf"]).is_err());
    }
}
