//! Core module for naming hypothetical proteins in an annotation file
//!
//! Gene callers such as Prokka label every CDS without a database
//! hit as `hypothetical protein`. This module looks for a better
//! name in, by priority, the UniFIRE full name already stored in
//! the record, InterProScan hits (Family, Domain, member databases,
//! structural superfamilies) and eggNOG-mapper descriptions. The
//! chosen text is tidied into a product name, or kept in `note`
//! when it reads like a sentence, and its origin is recorded in a
//! `product_source` attribute placed right after `product`.

use config::ArgCheck;

pub mod cli;
pub mod core;
pub mod utils;

pub fn lib_gff_hypo(args: Vec<String>) -> anyhow::Result<()> {
    let args = cli::Args::from(args);
    args.check()?;
    crate::core::add_hypothetical_descriptions(args)?;

    log::info!("SUCCESS: gff-hypo ran succesfully!");
    Ok(())
}
