use config::{
    open_reader, CliError, EMPTY_FIELD, EXCLUDED_DATABASES, GENE3D, MAX_EVALUE,
    MAX_ORTHOLOG_ASE_WORDS, MIN_COVERAGE, MIN_EGGNOG_FIELDS, MIN_IPR_FIELDS, SUPERFAMILY,
};
use gff_ipr::entries::{EntryType, InterProEntries};
use hashbrown::{Equivalent, HashMap};
use log::{debug, info};
use regex::Regex;
use thiserror::Error;

use std::io::BufRead;
use std::path::Path;
use std::sync::OnceLock;

const IPR_FIELDS: usize = 13;
const ACCESSION_PREFIX: &str = "IPR";
const HIERARCHY_SEPARATOR: &str = "::";
const UNCHARACTERIZED: &str = "uncharacterized";
const BELONGS_TO: &str = "belongs to the";
const ASE_ACTIVITY: &str = "ase activity";
const ASE_LIKE: &str = "ase-like protein";
const UNINFORMATIVE: [&str; 4] = [
    "of unknown function",
    "non supervised orthologous group",
    "psort location",
    "may contain a frame shift",
];
const UNINFORMATIVE_EXACT: &str = "domain, protein";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{path}:{line}: {reason}")]
    Malformed {
        path: String,
        line: usize,
        reason: String,
    },
    #[error("{0}")]
    Unreadable(#[from] CliError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    fn malformed<P: AsRef<Path>>(path: P, line: usize, reason: String) -> Self {
        LoadError::Malformed {
            path: path.as_ref().display().to_string(),
            line,
            reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EvidenceType {
    Family,
    Domain,
    HomologousSuperfamily,
    NoType,
}

impl EvidenceType {
    pub fn from_entry_type(entry_type: EntryType) -> Option<Self> {
        match entry_type {
            EntryType::Family => Some(EvidenceType::Family),
            EntryType::Domain => Some(EvidenceType::Domain),
            EntryType::HomologousSuperfamily => Some(EvidenceType::HomologousSuperfamily),
            _ => None,
        }
    }

    /// types whose hits are ranked by hierarchy depth before coverage
    pub fn is_leveled(&self) -> bool {
        matches!(self, EvidenceType::Family | EvidenceType::Domain)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceHit {
    pub database: String,
    pub coverage: f64,
    pub entry_description: Option<String>,
    pub signature_description: Option<String>,
    pub level: Option<u32>,
}

impl EvidenceHit {
    pub fn has_description(&self) -> bool {
        self.entry_description.is_some() || self.signature_description.is_some()
    }

    /// SUPERFAMILY and Gene3D describe folds rather than functions
    pub fn is_structural(&self) -> bool {
        is_structural_database(&self.database)
    }

    fn supersedes(&self, stored: &EvidenceHit, evidence_type: EvidenceType) -> bool {
        if evidence_type.is_leveled() && self.level != stored.level {
            return self.level > stored.level;
        }
        self.coverage > stored.coverage
    }
}

pub fn is_structural_database(database: &str) -> bool {
    database.eq_ignore_ascii_case(SUPERFAMILY) || database.eq_ignore_ascii_case(GENE3D)
}

/// Hits of one protein and evidence type, one per database,
/// kept sorted by database name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceGroup {
    hits: Vec<EvidenceHit>,
}

impl EvidenceGroup {
    pub fn get(&self, database: &str) -> Option<&EvidenceHit> {
        self.hits
            .binary_search_by(|hit| hit.database.as_str().cmp(database))
            .ok()
            .map(|idx| &self.hits[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &EvidenceHit> {
        self.hits.iter()
    }

    fn merge(&mut self, hit: EvidenceHit, evidence_type: EvidenceType) {
        match self
            .hits
            .binary_search_by(|stored| stored.database.cmp(&hit.database))
        {
            Ok(idx) => {
                if hit.supersedes(&self.hits[idx], evidence_type) {
                    self.hits[idx] = hit;
                }
            }
            Err(idx) => self.hits.insert(idx, hit),
        }
    }
}

#[derive(Hash)]
struct GroupKey<'a>(&'a str, EvidenceType);

impl Equivalent<(String, EvidenceType)> for GroupKey<'_> {
    fn equivalent(&self, key: &(String, EvidenceType)) -> bool {
        self.0 == key.0 && self.1 == key.1
    }
}

/// Evidence keyed by (protein, evidence type); groups are never empty.
#[derive(Debug, Clone, Default)]
pub struct ProteinEvidence {
    groups: HashMap<(String, EvidenceType), EvidenceGroup>,
}

impl ProteinEvidence {
    pub fn group(&self, protein: &str, evidence_type: EvidenceType) -> Option<&EvidenceGroup> {
        self.groups.get(&GroupKey(protein, evidence_type))
    }

    /// store a hit, keeping the better one when the database is already present
    pub fn insert(&mut self, protein: &str, evidence_type: EvidenceType, hit: EvidenceHit) {
        match self.groups.get_mut(&GroupKey(protein, evidence_type)) {
            Some(group) => group.merge(hit, evidence_type),
            None => {
                let mut group = EvidenceGroup::default();
                group.merge(hit, evidence_type);
                self.groups.insert((protein.to_string(), evidence_type), group);
            }
        }
    }

    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// InterProScan hits split by whether they carry an InterPro accession
#[derive(Debug, Clone, Default)]
pub struct InterProEvidence {
    pub annotated: ProteinEvidence,
    pub member_db_only: ProteinEvidence,
}

#[derive(Debug, Clone)]
pub struct InterProFilter {
    pub excluded_databases: Vec<String>,
    pub permitted_types: Vec<EvidenceType>,
    pub max_evalue: f64,
    pub min_coverage: f64,
}

impl Default for InterProFilter {
    fn default() -> Self {
        Self {
            excluded_databases: EXCLUDED_DATABASES.iter().map(|db| db.to_string()).collect(),
            permitted_types: vec![
                EvidenceType::Family,
                EvidenceType::Domain,
                EvidenceType::HomologousSuperfamily,
            ],
            max_evalue: MAX_EVALUE,
            min_coverage: MIN_COVERAGE,
        }
    }
}

fn description(field: &str) -> Option<String> {
    if field.is_empty() || field == EMPTY_FIELD || field.eq_ignore_ascii_case(UNCHARACTERIZED) {
        None
    } else {
        Some(field.to_string())
    }
}

fn passes_evalue(field: &str, max_evalue: f64) -> bool {
    // "-" and NaN both fail the comparison
    field
        .parse::<f64>()
        .map_or(false, |evalue| evalue <= max_evalue)
}

fn coverage(length: &str, start: &str, end: &str) -> Option<f64> {
    let length = length.parse::<u64>().ok().filter(|l| *l > 0)?;
    let start = start.parse::<u64>().ok()?;
    let end = end.parse::<u64>().ok()?;

    Some((end.abs_diff(start) as f64 / length as f64).min(1.0))
}

/// Load an InterProScan TSV into ontology-backed and member-db-only evidence.
///
/// Columns read: 0 protein, 2 length, 3 database, 5 signature
/// description, 6 start, 7 end, 8 e-value, 11 InterPro accession,
/// 12 InterPro description. Rows missing the two trailing InterPro
/// columns are read as if both were `-`.
pub fn load_interpro_evidence<P: AsRef<Path>>(
    path: P,
    entries: &InterProEntries,
    levels: &HierarchyLevel,
    filter: &InterProFilter,
) -> Result<InterProEvidence, LoadError> {
    let mut evidence = InterProEvidence::default();
    let (mut kept, mut skipped, mut retired) = (0usize, 0usize, 0usize);

    for (idx, line) in open_reader(&path)?.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.trim_end_matches('\r').split('\t').collect::<Vec<_>>();
        if fields.len() < MIN_IPR_FIELDS {
            return Err(LoadError::malformed(
                &path,
                idx + 1,
                format!(
                    "expected at least {} tab-separated fields, found {}",
                    MIN_IPR_FIELDS,
                    fields.len()
                ),
            ));
        }
        if fields.len() < IPR_FIELDS {
            fields.resize(IPR_FIELDS, EMPTY_FIELD);
        }

        let (protein, length, database, sig_desc, start, end, evalue, ipr_acc, ipr_desc) = (
            fields[0], fields[2], fields[3], fields[5], fields[6], fields[7], fields[8],
            fields[11], fields[12],
        );

        if !passes_evalue(evalue, filter.max_evalue)
            || filter.excluded_databases.iter().any(|db| db == database)
        {
            skipped += 1;
            continue;
        }

        let entry_description = description(ipr_desc);
        let signature_description = description(sig_desc);
        if entry_description.is_none() && signature_description.is_none() {
            skipped += 1;
            continue;
        }

        let coverage = match coverage(length, start, end) {
            Some(coverage) if coverage >= filter.min_coverage => coverage,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let mut hit = EvidenceHit {
            database: database.to_string(),
            coverage,
            entry_description,
            signature_description,
            level: None,
        };

        if ipr_acc == EMPTY_FIELD {
            evidence
                .member_db_only
                .insert(protein, EvidenceType::NoType, hit);
            kept += 1;
            continue;
        }

        let evidence_type = match entries.entry_type(ipr_acc) {
            Some(entry_type) => EvidenceType::from_entry_type(entry_type),
            None => {
                debug!("{} is no longer an InterPro entry, skipping", ipr_acc);
                retired += 1;
                continue;
            }
        };

        match evidence_type.filter(|t| filter.permitted_types.contains(t)) {
            Some(evidence_type) => {
                hit.level = Some(levels.level(ipr_acc));
                evidence.annotated.insert(protein, evidence_type, hit);
                kept += 1;
            }
            None => skipped += 1,
        }
    }

    info!(
        "InterProScan hits kept: {}, filtered: {}, retired accessions: {}",
        kept, skipped, retired
    );
    info!(
        "Evidence groups: {} with InterPro entries, {} member database only",
        evidence.annotated.num_groups(),
        evidence.member_db_only.num_groups()
    );

    Ok(evidence)
}

#[derive(Debug, Clone, Default)]
pub struct OrthologyAnnotation {
    functions: HashMap<String, String>,
}

impl OrthologyAnnotation {
    pub fn get(&self, protein: &str) -> Option<&str> {
        self.functions.get(protein).map(|f| f.as_str())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OrthologyAnnotation {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            functions: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Load eggNOG-mapper annotations: protein (col 0), e-value (col 2)
/// and free-text description (col 7).
pub fn load_orthology<P: AsRef<Path>>(path: P) -> Result<OrthologyAnnotation, LoadError> {
    let mut functions = HashMap::new();

    for (idx, line) in open_reader(&path)?.lines().enumerate() {
        let line = line?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let fields = line.trim_end_matches('\r').split('\t').collect::<Vec<_>>();
        if fields.len() < MIN_EGGNOG_FIELDS {
            return Err(LoadError::malformed(
                &path,
                idx + 1,
                format!(
                    "expected at least {} tab-separated fields, found {}",
                    MIN_EGGNOG_FIELDS,
                    fields.len()
                ),
            ));
        }

        if !passes_evalue(fields[2], MAX_EVALUE) || !is_informative(fields[7]) {
            continue;
        }

        if let Some(function) = clean_up_orthology_function(fields[7]) {
            functions.insert(fields[0].to_string(), function);
        }
    }

    info!("eggNOG annotations loaded: {}", functions.len());
    Ok(OrthologyAnnotation { functions })
}

pub fn is_informative(description: &str) -> bool {
    let lower = description.to_lowercase();

    description != EMPTY_FIELD
        && lower != UNINFORMATIVE_EXACT
        && !UNINFORMATIVE.iter().any(|phrase| lower.contains(phrase))
}

fn quoted_phage() -> &'static Regex {
    static QUOTED_PHAGE: OnceLock<Regex> = OnceLock::new();
    QUOTED_PHAGE.get_or_init(|| {
        Regex::new(r#"(?i)["'“”‘’](phage)["'“”‘’]"#).expect("ERROR: invalid phage pattern")
    })
}

/// Tidy an eggNOG description; `None` when nothing is left.
pub fn clean_up_orthology_function(description: &str) -> Option<String> {
    let unquoted = quoted_phage().replace_all(description, "$1");
    let mut function = unquoted
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end()
        .to_string();

    if function.to_lowercase().starts_with(BELONGS_TO) {
        function = function.split_whitespace().skip(3).collect::<Vec<_>>().join(" ");
    }

    if function.ends_with(ASE_ACTIVITY)
        && function.split_whitespace().count() < MAX_ORTHOLOG_ASE_WORDS
    {
        function = format!(
            "{}{}",
            &function[..function.len() - ASE_ACTIVITY.len()],
            ASE_LIKE
        );
    }

    if function.is_empty() {
        None
    } else {
        Some(function)
    }
}

/// InterPro accession depth in the parent-child tree; unknown terms sit at 0
#[derive(Debug, Clone, Default)]
pub struct HierarchyLevel {
    levels: HashMap<String, u32>,
}

impl HierarchyLevel {
    pub fn level(&self, accession: &str) -> u32 {
        self.levels.get(accession).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for HierarchyLevel {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self {
            levels: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Load `ParentChildTreeFile.txt`, where every `--` prefix pair is
/// one level below the parent (`--IPR000001::Name::`).
pub fn load_hierarchy<P: AsRef<Path>>(path: P) -> Result<HierarchyLevel, LoadError> {
    let mut levels: HashMap<String, u32> = HashMap::new();

    for line in open_reader(&path)?.lines() {
        let line = line?;
        let term = line.trim_start_matches('-');
        let depth = ((line.len() - term.len()) / 2) as u32;

        let accession = term.split(HIERARCHY_SEPARATOR).next().unwrap_or_default();
        if !accession.starts_with(ACCESSION_PREFIX) {
            continue;
        }

        let level = levels.entry(accession.to_string()).or_insert(depth);
        *level = (*level).max(depth);
    }

    info!("InterPro hierarchy terms loaded: {}", levels.len());
    Ok(HierarchyLevel { levels })
}
