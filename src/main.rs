use log::info;
use rustycpg::{bed::BedWriter, cli, vcf, window, Result};
use structopt::StructOpt;

fn main() -> Result<()> {
    let opt = cli::RustyCpg::from_args();
    opt.set_logging();

    let records = vcf::from_path(&opt.vcf)?;
    let mut writer = BedWriter::to_path(&opt.bed)?;

    let summary = window::scan(records, &mut writer)?;
    writer.finish()?;

    info!(
        "Scanned {} records in {} windows, found {} CpG/CpA and {} TpG/CpG pairs",
        summary.records, summary.windows, summary.cpg_or_cpa, summary.tpg_or_cpg
    );

    Ok(())
}
