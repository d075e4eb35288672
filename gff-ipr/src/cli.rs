use clap::Parser;
use config::ArgCheck;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    about = "Add InterPro entry descriptions and types to the interpro attribute of CDS records"
)]
pub struct Args {
    #[arg(
        long = "ipr-entries",
        required = true,
        value_name = "PATH",
        help = "Path to the entries.list file from InterPro"
    )]
    pub ipr_entries: PathBuf,

    #[arg(
        short = 'i',
        long = "input",
        required = true,
        value_name = "PATH",
        help = "Path to the input GFF"
    )]
    pub input: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        required = true,
        value_name = "PATH",
        help = "Path to the output GFF"
    )]
    pub output: PathBuf,
}

impl ArgCheck for Args {
    fn get_annotation(&self) -> &PathBuf {
        &self.input
    }

    fn get_output(&self) -> &PathBuf {
        &self.output
    }

    fn get_tables(&self) -> Vec<&PathBuf> {
        vec![&self.ipr_entries]
    }
}

impl Args {
    pub fn from(args: Vec<String>) -> Self {
        let mut full_args = vec![env!("CARGO_PKG_NAME").to_string()];
        full_args.extend(args);

        Args::parse_from(full_args)
    }
}
