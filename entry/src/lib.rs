use anyhow::{bail, Context};
use config::HYPO_INTERMEDIATE;

use gff_hypo::lib_gff_hypo;
use gff_ipr::lib_gff_ipr;

use std::path::{Path, PathBuf};

const KEYS: [&str; 4] = [
    "--ipr-entries",
    "--ipr-hierarchy",
    "--ipr-output",
    "--eggnog-output",
];
const INPUT: [&str; 2] = ["-i", "--input"];
const OUTPUT: [&str; 2] = ["-o", "--output"];
const IPR_ENTRIES: &str = "--ipr-entries";

/// Run gff-hypo and then gff-ipr on its output
///
/// The hypothetical protein pass writes into an intermediate file
/// next to the final output, which is removed once the InterPro
/// descriptions are in place.
///
/// # Example
///
/// ```rust, no_run
/// use gfftools::lib;
///
/// let args = [
///     "--ipr-entries", "entries.list",
///     "--ipr-hierarchy", "ParentChildTreeFile.txt",
///     "--ipr-output", "ipr.tsv",
///     "--eggnog-output", "eggnog.annotations",
///     "-i", "annotation.gff",
///     "-o", "annotation.final.gff",
/// ]
/// .iter()
/// .map(|s| s.to_string())
/// .collect();
///
/// lib(args).unwrap();
/// ```
pub fn lib(args: Vec<String>) -> anyhow::Result<()> {
    __check_args(&args)?;

    let output = PathBuf::from(
        value_of(&args, &OUTPUT).context("ERROR: Missing output argument [-o/--output]")?,
    );
    let ipr_entries =
        value_of(&args, &[IPR_ENTRIES]).context("ERROR: Missing --ipr-entries value")?;
    let intermediate = intermediate_path(&output);

    let hypo_args = replace_value(&args, &OUTPUT, &intermediate.display().to_string());
    lib_gff_hypo(hypo_args).context("ERROR: Failed to describe hypothetical proteins")?;

    let ipr_args = vec![
        IPR_ENTRIES.to_string(),
        ipr_entries.to_string(),
        INPUT[0].to_string(),
        intermediate.display().to_string(),
        OUTPUT[0].to_string(),
        output.display().to_string(),
    ];
    let described = lib_gff_ipr(ipr_args).context("ERROR: Failed to describe InterPro terms");

    // the intermediate goes away whether or not gff-ipr succeeded
    let removed = std::fs::remove_file(&intermediate).with_context(|| {
        format!(
            "ERROR: Could not remove intermediate file {}",
            intermediate.display()
        )
    });

    described?;
    removed
}

/// Check if all required arguments are present
fn __check_args(args: &[String]) -> anyhow::Result<()> {
    for key in KEYS {
        if value_of(args, &[key]).is_none() {
            bail!("Missing required argument: {}", key);
        }
    }

    for keys in [INPUT, OUTPUT] {
        if value_of(args, &keys).is_none() {
            bail!("Missing required argument: {}", keys.join("/"));
        }
    }

    Ok(())
}

/// value after any of `keys`, as `--key value` or `--key=value`
fn value_of<'a>(args: &'a [String], keys: &[&str]) -> Option<&'a str> {
    for (idx, arg) in args.iter().enumerate() {
        for key in keys {
            if arg == key {
                return args.get(idx + 1).map(|v| v.as_str());
            }
            if let Some(value) = arg.strip_prefix(&format!("{}=", key)) {
                return Some(value);
            }
        }
    }

    None
}

fn replace_value(args: &[String], keys: &[&str], value: &str) -> Vec<String> {
    let mut replaced = Vec::with_capacity(args.len());
    let mut skip = false;

    for arg in args {
        if skip {
            skip = false;
            continue;
        }

        if keys.contains(&arg.as_str()) {
            replaced.push(arg.clone());
            replaced.push(value.to_string());
            skip = true;
        } else if let Some(key) = keys.iter().find(|k| arg.starts_with(&format!("{}=", k))) {
            replaced.push(format!("{}={}", key, value));
        } else {
            replaced.push(arg.clone());
        }
    }

    replaced
}

fn intermediate_path(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(HYPO_INTERMEDIATE),
        _ => PathBuf::from(HYPO_INTERMEDIATE),
    }
}
