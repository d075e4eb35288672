use config::{MAX_PRODUCT_WORDS, NOTE};
use gffpack::{escape_reserved_characters, Attributes};
use regex::Regex;

use std::sync::OnceLock;

use super::resolver::{FunctionSource, ResolvedFunction};

const DOMAIN_EXCLUSIONS: [&str; 7] = [
    "domain-containing",
    "domain contain",
    "domain protein",
    "domain-related",
    "domain related",
    "domain superfamily",
    "domain family",
];
const DOMAIN_CONTAINING: &str = "domain-containing protein";
const FAMILY: &str = "family";
const PROTEIN_SUFFIX: &str = " protein";
const MIN_SENTENCE_WORDS: usize = 3;

const SENTENCE_STARTERS: &[&str] = &[
    "a", "an", "the", "this", "these", "that", "those", "it", "its", "they", "there", "which",
    "belongs", "catalyzes", "catalyses", "involved", "required", "plays", "participates",
    "may", "might", "could", "can", "is", "are", "has", "have", "binds", "acts", "mediates",
    "probably", "possibly",
];
const SENTENCE_VERBS: &[&str] = &[
    "is", "are", "was", "were", "has", "have", "may", "might", "can", "could", "binds",
    "catalyzes", "catalyses", "belongs", "plays", "acts", "participates", "contains",
    "encodes", "involved", "required", "seems",
];

fn domain_word() -> &'static Regex {
    static DOMAIN: OnceLock<Regex> = OnceLock::new();
    DOMAIN.get_or_init(|| Regex::new(r"\bdomain\b").expect("ERROR: invalid domain pattern"))
}

fn protein_word() -> &'static Regex {
    static PROTEIN: OnceLock<Regex> = OnceLock::new();
    PROTEIN.get_or_init(|| Regex::new(r"\bprotein\b").expect("ERROR: invalid protein pattern"))
}

/// Turn a bare domain name into a product name:
/// `Kinase domain` becomes `Kinase domain-containing protein`.
///
/// Already rewritten text and names that carry `protein` are left
/// alone, so applying it twice changes nothing.
pub fn reformat_domain(function: &str) -> String {
    let lower = function.to_lowercase();

    if !lower.contains("domain")
        || DOMAIN_EXCLUSIONS.iter().any(|phrase| lower.contains(phrase))
        || protein_word().is_match(&lower)
    {
        return function.to_string();
    }

    domain_word()
        .replace_all(function, DOMAIN_CONTAINING)
        .into_owned()
}

pub fn clean_up_function(function: &str) -> String {
    let mut function = reformat_domain(function);
    let lower = function.to_lowercase();

    if lower.ends_with(FAMILY) && !lower.contains("protein") {
        function.push_str(PROTEIN_SUFFIX);
    }

    function
}

fn is_sentence_case(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            chars.all(|c| !c.is_alphabetic() || c.is_lowercase())
        }
        _ => false,
    }
}

/// Whether `function` reads like prose rather than a product name.
pub fn looks_like_sentence(function: &str) -> bool {
    let words = function.split_whitespace().collect::<Vec<_>>();

    let first = match words.first() {
        Some(word) if is_sentence_case(word) => word.to_lowercase(),
        _ => return false,
    };
    let second = words.get(1).map(|w| w.to_lowercase()).unwrap_or_default();

    SENTENCE_STARTERS.contains(&first.as_str())
        || SENTENCE_VERBS.contains(&second.as_str())
        || (function.trim_end().ends_with('.') && words.len() >= MIN_SENTENCE_WORDS)
        || words.len() > MAX_PRODUCT_WORDS
}

/// Keep `function` in the `note` attribute as `<label>:<function>`.
pub fn move_function_to_note(function: &str, source: &FunctionSource, attributes: &mut Attributes) {
    let entry = format!("{}:{}", source, escape_reserved_characters(function));

    let note = match attributes.get(NOTE) {
        Some(existing) if !existing.is_empty() => format!("{}, {}", existing, entry),
        _ => entry,
    };

    attributes.set(NOTE, note);
}

/// Keep a noun-phrase function; demote prose to the note and fall
/// back to the placeholder.
pub fn keep_or_move_to_note(
    resolved: ResolvedFunction,
    attributes: &mut Attributes,
    gene_caller: &str,
) -> ResolvedFunction {
    if looks_like_sentence(&resolved.function) {
        move_function_to_note(&resolved.function, &resolved.source, attributes);
        return ResolvedFunction::placeholder(gene_caller);
    }

    resolved
}

/// Gate, clean and escape a resolved function before it becomes a product.
pub fn normalize(
    resolved: ResolvedFunction,
    attributes: &mut Attributes,
    gene_caller: &str,
) -> ResolvedFunction {
    if matches!(resolved.source, FunctionSource::UniFire) || resolved.source.is_placeholder() {
        return resolved;
    }

    let kept = keep_or_move_to_note(resolved, attributes, gene_caller);
    if kept.source.is_placeholder() {
        return kept;
    }

    ResolvedFunction {
        function: escape_reserved_characters(&clean_up_function(&kept.function)),
        source: kept.source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attributes() -> Attributes {
        [("ID", "123"), ("locus_tag", "locus_tag")].into_iter().collect()
    }

    fn interpro(db: &str, from_entry: bool) -> FunctionSource {
        FunctionSource::InterPro {
            database: db.to_string(),
            from_entry,
        }
    }

    #[test]
    fn test_clean_up_function_domain() {
        assert_eq!(
            clean_up_function("ATPase, nucleotide binding domain"),
            "ATPase, nucleotide binding domain-containing protein"
        );
    }

    #[test]
    fn test_clean_up_function_no_change() {
        let function = "Ribosomal protein L23/L15e core domain superfamily";
        assert_eq!(clean_up_function(function), function);
    }

    #[test]
    fn test_clean_up_function_add_protein() {
        assert_eq!(
            clean_up_function("Ribosomal L23/L15e core domain superfamily"),
            "Ribosomal L23/L15e core domain superfamily protein"
        );
        assert_eq!(clean_up_function("NAAT Family"), "NAAT Family protein");
    }

    #[test]
    fn test_reformat_domain_is_idempotent() {
        for function in [
            "Kinase domain",
            "SH3 domain, C-terminal domain",
            "Domain of unknown function",
            "DUF1234 domain-containing protein",
            "Zinc finger domain protein",
        ] {
            let once = reformat_domain(function);
            assert_eq!(reformat_domain(&once), once);
        }

        assert_eq!(
            reformat_domain("SH3 domain, C-terminal domain"),
            "SH3 domain-containing protein, C-terminal domain-containing protein"
        );
        assert_eq!(reformat_domain("Multidomain transporter"), "Multidomain transporter");
    }

    #[test]
    fn test_looks_like_sentence() {
        assert!(looks_like_sentence("This is a protein"));
        assert!(looks_like_sentence("Belongs to the UPF0145 family"));
        assert!(looks_like_sentence("Transporter is involved in uptake"));
        assert!(looks_like_sentence("Catalyses the first step of the pathway."));
        assert!(!looks_like_sentence(
            "ABC-hydrolase interfering protein with extra large domain"
        ));
        assert!(!looks_like_sentence("Ribosomal protein L2"));
        assert!(!looks_like_sentence("hypothetical protein"));
        assert!(!looks_like_sentence(""));
    }

    #[test]
    fn test_keep_or_move_to_note_sentence() {
        let mut attributes = attributes();
        let resolved = ResolvedFunction {
            function: "This is a protein".to_string(),
            source: FunctionSource::EggNog,
        };

        let kept = keep_or_move_to_note(resolved, &mut attributes, "Prokka");

        assert_eq!(kept.as_pair(), ("hypothetical protein".to_string(), "Prokka".to_string()));
        assert_eq!(
            attributes.to_string(),
            "ID=123;locus_tag=locus_tag;note=eggNOG:This is a protein"
        );
    }

    #[test]
    fn test_keep_or_move_to_note_correct() {
        let mut attributes = attributes();
        let function = "ABC-hydrolase interfering protein with extra large domain";
        let resolved = ResolvedFunction {
            function: function.to_string(),
            source: FunctionSource::EggNog,
        };

        let kept = keep_or_move_to_note(resolved.clone(), &mut attributes, "Prokka");

        assert_eq!(kept, resolved);
        assert_eq!(attributes.to_string(), "ID=123;locus_tag=locus_tag");
    }

    #[test]
    fn test_move_function_to_note_with_existing_note() {
        let mut attributes = Attributes::parse(
            "ID=BU_ATCC8492_03165;locus_tag=BU_ATCC8492_03165;note=UPF0056 inner membrane protein YhgN;product=NAAT family transporter;product_source=NCBIfam;eggNOG=585543.HMPREF0969_01099",
        )
        .unwrap();

        move_function_to_note("some function", &FunctionSource::EggNog, &mut attributes);

        assert_eq!(
            attributes.get("note"),
            Some("UPF0056 inner membrane protein YhgN, eggNOG:some function")
        );
        assert_eq!(attributes.len(), 6);
    }

    #[test]
    fn test_move_function_to_note_without_note() {
        let mut attributes = attributes();
        move_function_to_note("Has a; weird=text", &interpro("Pfam", true), &mut attributes);

        assert_eq!(
            attributes.get("note"),
            Some(r"InterPro(Pfam):Has a\; weird\=text")
        );
    }

    #[test]
    fn test_normalize_escapes_kept_text() {
        let mut attributes = attributes();
        let resolved = ResolvedFunction {
            function: "Peptidase S24/S26A/S26B/S26C, 2,3-binding domain".to_string(),
            source: interpro("Pfam", true),
        };

        let normalized = normalize(resolved, &mut attributes, "Prokka");

        assert_eq!(
            normalized.function,
            "Peptidase S24/S26A/S26B/S26C/ 2%2C3-binding domain-containing protein"
        );
        assert_eq!(normalized.source.to_string(), "InterPro(Pfam)");
        assert!(attributes.get("note").is_none());
    }

    #[test]
    fn test_normalize_skips_trusted_and_placeholder() {
        let mut attributes = attributes();
        let unifire = ResolvedFunction {
            function: "Kinase domain; This is trusted".to_string(),
            source: FunctionSource::UniFire,
        };
        assert_eq!(normalize(unifire.clone(), &mut attributes, "Prokka"), unifire);

        let placeholder = ResolvedFunction::placeholder("Prokka");
        assert_eq!(normalize(placeholder.clone(), &mut attributes, "Prokka"), placeholder);
        assert_eq!(attributes.len(), 2);
    }

    #[test]
    fn test_normalize_demotes_sentences() {
        let mut attributes = attributes();
        let resolved = ResolvedFunction {
            function: "This domain binds DNA".to_string(),
            source: interpro("CDD", false),
        };

        let normalized = normalize(resolved, &mut attributes, "Bakta");

        assert_eq!(normalized, ResolvedFunction::placeholder("Bakta"));
        assert_eq!(
            attributes.get("note"),
            Some("CDD:This domain binds DNA")
        );
    }
}
