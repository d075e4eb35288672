use clap::Parser;
use config::{ArgCheck, DEFAULT_GENE_CALLER};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    about = "Replace hypothetical protein products with functions from UniFIRE, InterProScan and eggNOG"
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
        long = "ipr-hierarchy",
        required = true,
        value_name = "PATH",
        help = "Path to the ParentChildTreeFile.txt file from InterPro"
    )]
    pub ipr_hierarchy: PathBuf,

    #[arg(
        long = "ipr-output",
        required = true,
        value_name = "PATH",
        help = "Path to the InterProScan TSV output"
    )]
    pub ipr_output: PathBuf,

    #[arg(
        long = "eggnog-output",
        required = true,
        value_name = "PATH",
        help = "Path to the eggNOG-mapper annotations file"
    )]
    pub eggnog_output: PathBuf,

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

    #[arg(
        long = "gene-caller",
        required = false,
        value_name = "NAME",
        default_value = DEFAULT_GENE_CALLER,
        help = "Label used as product_source when no evidence is found"
    )]
    pub gene_caller: String,
}

impl ArgCheck for Args {
    fn get_annotation(&self) -> &PathBuf {
        &self.input
    }

    fn get_output(&self) -> &PathBuf {
        &self.output
    }

    fn get_tables(&self) -> Vec<&PathBuf> {
        vec![
            &self.ipr_entries,
            &self.ipr_hierarchy,
            &self.ipr_output,
            &self.eggnog_output,
        ]
    }
}

impl Args {
    pub fn from(args: Vec<String>) -> Self {
        let mut full_args = vec![env!("CARGO_PKG_NAME").to_string()];
        full_args.extend(args);

        Args::parse_from(full_args)
    }
}
