//! GFF3 plumbing shared by every gfftools subcommand
//!
//! This crate reads annotation files produced by Prokka or Bakta,
//! splits their attribute column without breaking escaped delimiters
//! and writes edited records back in the same layout. Comment lines,
//! directives and everything after `##FASTA` are copied verbatim.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use config::{get_progress_bar, open_writer, reader, FASTA_DIRECTIVE, MIN_GFF_FIELDS};
use log::info;

pub mod escape;
pub mod record;

pub use escape::{escape_reserved_characters, replace_commas};
pub use record::{Attributes, GffError, GffRecord, Strand};

/// Rewrite `input` into `output`, handing every record of type
/// `feature` to `edit` before it is written back.
///
/// Records of any other type are only checked for their column
/// count and keep their exact original text. The output file is
/// created once every line went through, so a malformed record
/// leaves no partial GFF behind. Returns the number of edited records.
pub fn rewrite_gff<P, Q, F>(input: P, output: Q, feature: &str, mut edit: F) -> anyhow::Result<usize>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(&mut GffRecord) -> anyhow::Result<()>,
{
    let contents = reader(&input)
        .with_context(|| format!("ERROR: cannot read {}", input.as_ref().display()))?;

    let pb = get_progress_bar(contents.lines().count() as u64, "Rewriting GFF records");
    let mut rewritten = String::with_capacity(contents.len() + contents.len() / 10);
    let mut in_fasta = false;
    let mut edited = 0;

    for (idx, line) in contents.lines().enumerate() {
        pb.inc(1);

        if in_fasta || line.starts_with('#') || line.trim().is_empty() {
            in_fasta = in_fasta || line.starts_with(FASTA_DIRECTIVE);
            writeln!(rewritten, "{}", line)?;
            continue;
        }

        let malformed = || {
            format!(
                "ERROR: malformed record in {} at line {}",
                input.as_ref().display(),
                idx + 1
            )
        };

        let fields = line.trim_end_matches('\r').split('\t').count();
        if fields != MIN_GFF_FIELDS {
            return Err(GffError::FieldCount {
                expected: MIN_GFF_FIELDS,
                found: fields,
            })
            .with_context(malformed);
        }

        if line.split('\t').nth(2) != Some(feature) {
            writeln!(rewritten, "{}", line)?;
            continue;
        }

        let mut record = GffRecord::parse(line).with_context(malformed)?;

        edit(&mut record).with_context(|| {
            format!(
                "ERROR: cannot process record in {} at line {}",
                input.as_ref().display(),
                idx + 1
            )
        })?;

        writeln!(rewritten, "{}", record)?;
        edited += 1;
    }
    pb.finish_and_clear();

    let mut writer = open_writer(&output)
        .with_context(|| format!("ERROR: cannot create {}", output.as_ref().display()))?;
    writer.write_all(rewritten.as_bytes())?;
    writer.flush()?;

    info!("{} records rewritten into {}", edited, output.as_ref().display());

    Ok(edited)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GFF: &str = "##gff-version 3
##sequence-region contig_1 1 5000
contig_1\tProdigal:002006\tgene\t155\t1096\t.\t-\t.\tID=BU_00001_gene;locus_tag=BU_00001
contig_1\tProdigal:002006\tCDS\t155\t1096\t.\t-\t0\tID=BU_00001;product=hypothetical protein
##FASTA
>contig_1
contig_1\tnot\ta\trecord
";

    #[test]
    fn test_rewrite_gff_touches_only_requested_features() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gff");
        let output = dir.path().join("out.gff");
        std::fs::write(&input, GFF).unwrap();

        let edited = rewrite_gff(&input, &output, "CDS", |record| {
            record.attributes.insert_after("product", "product_source", "Prokka");
            Ok(())
        })
        .unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        let lines = written.lines().collect::<Vec<_>>();

        assert_eq!(edited, 1);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[2], GFF.lines().nth(2).unwrap());
        assert_eq!(
            lines[3],
            "contig_1\tProdigal:002006\tCDS\t155\t1096\t.\t-\t0\tID=BU_00001;product=hypothetical protein;product_source=Prokka"
        );
        assert_eq!(lines[6], "contig_1\tnot\ta\trecord");
    }

    #[test]
    fn test_rewrite_gff_reports_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gff");
        let output = dir.path().join("out.gff");
        std::fs::write(&input, "contig_1\tProdigal\tCDS\t1\n").unwrap();

        let err = rewrite_gff(&input, &output, "CDS", |_| Ok(())).unwrap_err();
        assert!(format!("{:#}", err).contains("line 1"));
    }

    #[test]
    fn test_rewrite_gff_leaves_no_output_on_malformed_record() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gff");
        let output = dir.path().join("out.gff");

        let mut gff = String::from("##gff-version 3\n");
        for idx in 0..5 {
            gff.push_str(&format!(
                "contig_1\tProdigal\tCDS\t{}\t{}\t.\t+\t0\tID=p{};product=hypothetical protein\n",
                idx * 100 + 1,
                idx * 100 + 90,
                idx
            ));
        }
        gff.push_str("contig_1\tProdigal\tCDS\t1\n");
        std::fs::write(&input, gff).unwrap();

        let err = rewrite_gff(&input, &output, "CDS", |_| Ok(())).unwrap_err();

        assert!(format!("{:#}", err).contains("line 7"));
        assert!(!output.exists());
    }

    #[test]
    fn test_rewrite_gff_checks_other_features() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.gff");
        let output = dir.path().join("out.gff");
        std::fs::write(&input, "contig_1\tProdigal\tgene\t1\n").unwrap();

        let err = rewrite_gff(&input, &output, "CDS", |_| Ok(())).unwrap_err();

        assert!(format!("{:#}", err).contains("expected 9 tab-separated fields, found 4"));
        assert!(!output.exists());
    }
}
