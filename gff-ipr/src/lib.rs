//! Core module for describing InterPro terms in an annotation file
//!
//! This module expands the accessions listed in the `interpro`
//! attribute of every CDS record into a readable form, e.g.
//! `IPR000001: Kringle [D]`, using the `entries.list` table
//! distributed with each InterPro release. The one-letter code in
//! brackets gives the entry type (Domain, Family, Homologous
//! superfamily, Repeat, or S for any kind of site).

use config::ArgCheck;

pub mod cli;
pub mod core;
pub mod entries;

pub fn lib_gff_ipr(args: Vec<String>) -> anyhow::Result<()> {
    let args = cli::Args::from(args);
    args.check()?;
    crate::core::add_interpro_descriptions(args)?;

    log::info!("SUCCESS: gff-ipr ran succesfully!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lib_gff_ipr_rejects_empty_annotation() {
        let dir = tempfile::tempdir().unwrap();
        let entries = dir.path().join("entries.list");
        let input = dir.path().join("in.gff");
        std::fs::write(&entries, "IPR000001\tDomain\tKringle\n").unwrap();
        std::fs::write(&input, "").unwrap();

        let err = lib_gff_ipr(vec![
            "--ipr-entries".to_string(),
            entries.display().to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            dir.path().join("out.gff").display().to_string(),
        ])
        .unwrap_err();

        assert!(err.to_string().contains("is empty"));
    }
}
