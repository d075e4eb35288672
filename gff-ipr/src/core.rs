use config::{CDS, INTERPRO};
use gffpack::{escape_reserved_characters, rewrite_gff};
use log::info;

use crate::cli::Args;
use crate::entries::{load_entries, InterProEntries};

pub fn add_interpro_descriptions(args: Args) -> anyhow::Result<()> {
    let entries = load_entries(&args.ipr_entries)?;
    let mut described = 0;

    rewrite_gff(&args.input, &args.output, CDS, |record| {
        if let Some(key) = record.attributes.find_key_ignore_case(INTERPRO) {
            let key = key.to_string();
            let terms = record.attributes.get(&key).unwrap_or_default();
            let expanded = add_ipr_descriptions(terms, &entries);

            record.attributes.set(&key, expanded);
            described += 1;
        }
        Ok(())
    })?;

    info!("CDS records with InterPro terms described: {}", described);
    Ok(())
}

/// Expand each comma-separated accession to `IPR: description [T]`.
///
/// Descriptions are escaped so their own commas do not collide
/// with the list separator; unknown accessions are left as they are.
pub fn add_ipr_descriptions(terms: &str, entries: &InterProEntries) -> String {
    terms
        .split(',')
        .map(|term| match entries.get(term) {
            Some(entry) => format!(
                "{}: {} [{}]",
                term,
                escape_reserved_characters(&entry.description),
                entry.entry_type.short_code()
            ),
            None => term.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}
