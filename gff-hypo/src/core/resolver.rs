use config::{
    EGGNOG, GENE3D, HYPOTHETICAL_PROTEIN, NCBIFAM, PFAM, PFAM_OVERRIDE_COVERAGE,
    PFAM_OVERRIDE_GAP, UNIFIRE, UNIFIRE_FULLNAME,
};
use gffpack::Attributes;

use std::fmt;

use super::loaders::{
    is_structural_database, EvidenceGroup, EvidenceHit, EvidenceType, InterProEvidence,
    OrthologyAnnotation,
};

/// Where a product name came from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionSource {
    UniFire,
    /// `from_entry` is set when the text is the InterPro entry
    /// description rather than the member signature description
    InterPro { database: String, from_entry: bool },
    EggNog,
    GeneCaller(String),
}

impl FunctionSource {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, FunctionSource::GeneCaller(_))
    }
}

impl fmt::Display for FunctionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionSource::UniFire => write!(f, "{}", UNIFIRE),
            FunctionSource::InterPro {
                database,
                from_entry: true,
            } => write!(f, "InterPro({})", database),
            FunctionSource::InterPro {
                database,
                from_entry: false,
            } => write!(f, "{}", database),
            FunctionSource::EggNog => write!(f, "{}", EGGNOG),
            FunctionSource::GeneCaller(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFunction {
    pub function: String,
    pub source: FunctionSource,
}

impl ResolvedFunction {
    pub fn placeholder(gene_caller: &str) -> Self {
        Self {
            function: HYPOTHETICAL_PROTEIN.to_string(),
            source: FunctionSource::GeneCaller(gene_caller.to_string()),
        }
    }

    /// (function, source label) as written into the GFF
    pub fn as_pair(&self) -> (String, String) {
        (self.function.clone(), self.source.to_string())
    }
}

/// Ranks every evidence source available for a protein.
pub struct Resolver<'a> {
    orthology: &'a OrthologyAnnotation,
    interpro: &'a InterProEvidence,
    gene_caller: &'a str,
}

impl<'a> Resolver<'a> {
    pub fn new(
        orthology: &'a OrthologyAnnotation,
        interpro: &'a InterProEvidence,
        gene_caller: &'a str,
    ) -> Self {
        Self {
            orthology,
            interpro,
            gene_caller,
        }
    }

    pub fn gene_caller(&self) -> &str {
        self.gene_caller
    }

    /// Pick one function for `protein`, falling back to the
    /// placeholder when nothing applies.
    pub fn resolve(&self, protein: &str, attributes: &Attributes) -> ResolvedFunction {
        if let Some(fullname) = attributes.get(UNIFIRE_FULLNAME) {
            return ResolvedFunction {
                function: fullname.to_string(),
                source: FunctionSource::UniFire,
            };
        }

        let annotated = &self.interpro.annotated;
        let member_db_only = &self.interpro.member_db_only;

        let functional = [
            annotated.group(protein, EvidenceType::Family),
            annotated.group(protein, EvidenceType::Domain),
            member_db_only.group(protein, EvidenceType::NoType),
        ];
        if let Some(resolved) = functional.into_iter().flatten().find_map(describe_group) {
            return resolved;
        }

        let structural = [
            annotated.group(protein, EvidenceType::HomologousSuperfamily),
            member_db_only.group(protein, EvidenceType::NoType),
        ];
        if let Some(resolved) = structural.into_iter().flatten().find_map(pick_structural) {
            return resolved;
        }

        if let Some(function) = self.orthology.get(protein) {
            return ResolvedFunction {
                function: function.to_string(),
                source: FunctionSource::EggNog,
            };
        }

        ResolvedFunction::placeholder(self.gene_caller)
    }
}

pub fn get_function(
    protein: &str,
    attributes: &Attributes,
    orthology: &OrthologyAnnotation,
    interpro: &InterProEvidence,
    gene_caller: &str,
) -> ResolvedFunction {
    Resolver::new(orthology, interpro, gene_caller).resolve(protein, attributes)
}

fn describe(hit: &EvidenceHit, entry_first: bool) -> Option<ResolvedFunction> {
    let (first, second) = if entry_first {
        (&hit.entry_description, &hit.signature_description)
    } else {
        (&hit.signature_description, &hit.entry_description)
    };

    let (function, first_won) = match (first, second) {
        (Some(text), _) => (text, true),
        (None, Some(text)) => (text, false),
        (None, None) => return None,
    };

    Some(ResolvedFunction {
        function: function.clone(),
        source: FunctionSource::InterPro {
            database: hit.database.clone(),
            from_entry: first_won == entry_first,
        },
    })
}

/// NCBIfam first (signature text first), else the best functional match
fn describe_group(group: &EvidenceGroup) -> Option<ResolvedFunction> {
    if let Some(ncbifam) = group
        .iter()
        .find(|hit| hit.database == NCBIFAM)
    {
        if let Some(resolved) = describe(ncbifam, false) {
            return Some(resolved);
        }
    }

    best_match(group).and_then(|hit| describe(hit, true))
}

/// Highest level, then coverage, then database name among
/// non-structural hits with a description. Pfam takes over a
/// close, well-covered winner at no shallower level.
pub fn best_match(group: &EvidenceGroup) -> Option<&EvidenceHit> {
    let winner = group
        .iter()
        .filter(|hit| !hit.is_structural() && hit.has_description())
        .reduce(|best, hit| {
            let better = hit.level > best.level
                || (hit.level == best.level && hit.coverage > best.coverage);
            // group order is by database name, so equal hits keep the smaller one
            if better {
                hit
            } else {
                best
            }
        })?;

    if winner.database == PFAM || winner.coverage <= PFAM_OVERRIDE_COVERAGE {
        return Some(winner);
    }

    match group.get(PFAM) {
        Some(pfam)
            if pfam.has_description()
                && winner.coverage - pfam.coverage < PFAM_OVERRIDE_GAP
                && pfam.level >= winner.level =>
        {
            Some(pfam)
        }
        _ => Some(winner),
    }
}

/// SUPERFAMILY or Gene3D; larger coverage wins, Gene3D on ties
fn pick_structural(group: &EvidenceGroup) -> Option<ResolvedFunction> {
    let hit = group
        .iter()
        .filter(|hit| is_structural_database(&hit.database) && hit.has_description())
        .reduce(|best, hit| {
            if hit.coverage > best.coverage
                || (hit.coverage == best.coverage && hit.database.eq_ignore_ascii_case(GENE3D))
            {
                hit
            } else {
                best
            }
        })?;

    describe(hit, true)
}
