/// gfftools: post-processing of prokaryotic genome annotations
///
/// This is the entry point for the gfftools CLI.
/// It parses the CLI arguments and hands them to the
/// library entry point of the requested subcommand:
/// - gff-hypo
/// - gff-ipr
/// - run (gff-hypo followed by gff-ipr)
///
/// The 'config' and 'gff-pack' crates are hidden helpers: the
/// former holds the constants and argument checks shared by every
/// tool, the latter the GFF3 reader and writer.
///
/// To get help on the subcommands, you can run:
///
/// ```shell
/// gfftools gff-hypo -- --help
/// ```
///
use clap::{Args, Parser, Subcommand};
use gff_hypo::lib_gff_hypo;
use gff_ipr::lib_gff_ipr;
use gfftools::lib;
use log::{error, info, Level};
use simple_logger::init_with_level;

const HELP: &str = r#"
Usage: gfftools run --ipr-entries <PATH> --ipr-hierarchy <PATH> --ipr-output <PATH> --eggnog-output <PATH> -i <GFF> -o <GFF>

 Options:
  --ipr-entries <PATH>        Path to the entries.list file from InterPro
  --ipr-hierarchy <PATH>      Path to the ParentChildTreeFile.txt file from InterPro
  --ipr-output <PATH>         Path to the InterProScan TSV output
  --eggnog-output <PATH>      Path to the eggNOG-mapper annotations file
  -i, --input <GFF>           Path to the input GFF
  -o, --output <GFF>          Path to the output GFF
  --gene-caller <NAME>        Label used when no evidence is found [default: Prokka]
  -h, --help                  Print help
"#;

#[derive(Parser)]
#[command(name = "gfftools")]
#[command(about = "gfftools: post-processing of prokaryotic genome annotations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "gff-hypo")]
    Hypo(ToolArgs),
    #[command(name = "gff-ipr")]
    Ipr(ToolArgs),
    #[command(name = "run")]
    Run(ToolArgs),
}

#[derive(Args)]
struct ToolArgs {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, help = HELP)]
    args: Vec<String>,
}

fn main() {
    let start = std::time::Instant::now();
    init_with_level(Level::Info).unwrap();
    let cli = Cli::parse();

    init();

    let result = match cli.command {
        Commands::Hypo(args) => lib_gff_hypo(args.args),
        Commands::Ipr(args) => lib_gff_ipr(args.args),
        Commands::Run(args) => lib(args.args),
    };

    result.unwrap_or_else(|e| {
        error!("{:#}", e);
        std::process::exit(1);
    });

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}

fn init() {
    let message = format!(
        r#"

        gfftools: post-processing of prokaryotic genome annotations

        this is the entry point for the gfftools CLI
        and it is responsible for parsing the CLI arguments
        for each tool:

        - gff-hypo
        - gff-ipr
        - run

        > version: {}

        for any bug, please open an issue on the repository.

        * to get help on the subcommands, run:
            gfftools <SUBCOMMAND> -- --help

        "#,
        env!("CARGO_PKG_VERSION")
    );

    println!("{}", message);
}
