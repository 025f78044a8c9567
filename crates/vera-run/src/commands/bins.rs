use std::error::Error;
use std::io;

use clap::{Args, ValueEnum};
use vera_bins::{generate_bins_with, BinSpec, BinTable, StandardRelations};
use vera_core::to_canonical_json_bytes;

use super::options::ConfigArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BinsFormat {
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub struct BinsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Output format.
    #[arg(long, value_enum, default_value_t = BinsFormat::Table)]
    pub format: BinsFormat,
}

pub fn run(args: &BinsArgs) -> Result<(), Box<dyn Error>> {
    let config = args.config.resolve()?;
    let table = generate_bins_with(&BinSpec::from_config(&config), &StandardRelations)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    match args.format {
        BinsFormat::Table => print!("{}", render_table(&table)),
        BinsFormat::Json => {
            let bytes =
                to_canonical_json_bytes(&table).map_err(|err| Box::new(err) as Box<dyn Error>)?;
            print!("{}", String::from_utf8(bytes)?);
        }
        BinsFormat::Csv => write_csv(&table, io::stdout())?,
    }
    Ok(())
}

fn render_table(table: &BinTable) -> String {
    let mut out = format!(
        "{:>5}  {:>16}  {:>12}  {:>12}  {:>12}  {:>12}\n",
        "bin", "label", "M_star", "M_smbh", "M_nsc,early", "M_nsc,late"
    );
    for bin in table {
        out.push_str(&format!(
            "{:>5}  {:>16}  {:>12.4e}  {:>12.4e}  {:>12.4e}  {:>12.4e}\n",
            bin.index,
            bin.label,
            bin.stellar_mass,
            bin.smbh_mass,
            bin.early_cluster_mass,
            bin.late_cluster_mass
        ));
    }
    out
}

fn write_csv<W: io::Write>(table: &BinTable, sink: W) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_writer(sink);
    for bin in table {
        writer.serialize(bin)?;
    }
    writer.flush()?;
    Ok(())
}
