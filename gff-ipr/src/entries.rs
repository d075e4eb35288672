use config::{open_reader, CliError};
use hashbrown::HashMap;
use log::{info, warn};
use thiserror::Error;

use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

const ACCESSION_PREFIX: &str = "IPR";
const ENTRY_FIELDS: usize = 3;

#[derive(Debug, Error)]
pub enum EntryError {
    #[error("{path}:{line}: expected 3 tab-separated fields, found {found}")]
    Malformed {
        path: String,
        line: usize,
        found: usize,
    },
    #[error("{0}")]
    Unreadable(#[from] CliError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// InterPro entry categories as written in `entries.list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    ActiveSite,
    BindingSite,
    ConservedSite,
    Domain,
    Family,
    HomologousSuperfamily,
    Ptm,
    Repeat,
}

impl EntryType {
    /// one-letter code used when describing terms inside a GFF
    pub fn short_code(&self) -> char {
        match self {
            EntryType::Domain => 'D',
            EntryType::Family => 'F',
            EntryType::HomologousSuperfamily => 'H',
            EntryType::Repeat => 'R',
            EntryType::ActiveSite
            | EntryType::BindingSite
            | EntryType::ConservedSite
            | EntryType::Ptm => 'S',
        }
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active_site" => Ok(EntryType::ActiveSite),
            "Binding_site" => Ok(EntryType::BindingSite),
            "Conserved_site" => Ok(EntryType::ConservedSite),
            "Domain" => Ok(EntryType::Domain),
            "Family" => Ok(EntryType::Family),
            "Homologous_superfamily" => Ok(EntryType::HomologousSuperfamily),
            "PTM" => Ok(EntryType::Ptm),
            "Repeat" => Ok(EntryType::Repeat),
            other => Err(format!("unknown InterPro entry type {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterProEntry {
    pub entry_type: EntryType,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct InterProEntries {
    entries: HashMap<String, InterProEntry>,
}

impl InterProEntries {
    pub fn get(&self, accession: &str) -> Option<&InterProEntry> {
        self.entries.get(accession)
    }

    pub fn entry_type(&self, accession: &str) -> Option<EntryType> {
        self.entries.get(accession).map(|entry| entry.entry_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, InterProEntry)> for InterProEntries {
    fn from_iter<I: IntoIterator<Item = (String, InterProEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Load `entries.list`: accession, type and name per line.
///
/// Only lines starting with an `IPR` accession are read, which
/// skips the header. Categories this crate does not know about
/// are dropped with a warning.
pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<InterProEntries, EntryError> {
    let mut entries = HashMap::new();

    for (idx, line) in open_reader(&path)?.lines().enumerate() {
        let line = line?;
        if !line.starts_with(ACCESSION_PREFIX) {
            continue;
        }

        let fields = line.trim_end().split('\t').collect::<Vec<_>>();
        if fields.len() != ENTRY_FIELDS {
            return Err(EntryError::Malformed {
                path: path.as_ref().display().to_string(),
                line: idx + 1,
                found: fields.len(),
            });
        }

        match fields[1].parse::<EntryType>() {
            Ok(entry_type) => {
                entries.insert(
                    fields[0].to_string(),
                    InterProEntry {
                        entry_type,
                        description: fields[2].to_string(),
                    },
                );
            }
            Err(e) => warn!("{} [{}], skipping", e, fields[0]),
        }
    }

    info!("InterPro entries loaded: {}", entries.len());
    Ok(InterProEntries { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_entries_skips_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "ENTRY_AC\tENTRY_TYPE\tENTRY_NAME\nIPR000001\tDomain\tKringle\nIPR000006\tFamily\tMetallothionein, vertebrate\nIPR000008\tDomain\tC2 domain\n"
        )
        .unwrap();

        let entries = load_entries(file.path()).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries.entry_type("IPR000006"), Some(EntryType::Family));
        assert_eq!(entries.get("IPR000008").unwrap().description, "C2 domain");
        assert_eq!(entries.get("ENTRY_AC"), None);
    }

    #[test]
    fn test_load_entries_rejects_short_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "IPR000001\tDomain\n").unwrap();

        let err = load_entries(file.path()).unwrap_err();
        assert!(matches!(err, EntryError::Malformed { line: 1, found: 2, .. }));
    }

    #[test]
    fn test_load_entries_skips_unknown_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "IPR000001\tUnknown_kind\tsomething\nIPR000002\tPTM\tSite\n").unwrap();

        let entries = load_entries(file.path()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.entry_type("IPR000002").unwrap().short_code(), 'S');
    }
}
