pub mod fns;

pub use fns::*;

// placeholders and labels
pub const HYPOTHETICAL_PROTEIN: &str = "hypothetical protein";
pub const DEFAULT_GENE_CALLER: &str = "Prokka";
pub const UNIFIRE: &str = "UniFIRE";
pub const EGGNOG: &str = "eggNOG";
pub const EMPTY_FIELD: &str = "-";

// gff attribute keys
pub const ID: &str = "ID";
pub const PRODUCT: &str = "product";
pub const PRODUCT_SOURCE: &str = "product_source";
pub const NOTE: &str = "note";
pub const UNIFIRE_FULLNAME: &str = "uf_prot_rec_fullname";
pub const INTERPRO: &str = "interpro";
pub const CDS: &str = "CDS";
pub const FASTA_DIRECTIVE: &str = "##FASTA";

// numeric values
pub const MIN_GFF_FIELDS: usize = 9;
pub const MIN_IPR_FIELDS: usize = 11;
pub const MIN_EGGNOG_FIELDS: usize = 8;
pub const MAX_EVALUE: f64 = 1e-10;
pub const MIN_COVERAGE: f64 = 0.10;
pub const PFAM_OVERRIDE_COVERAGE: f64 = 0.30;
pub const PFAM_OVERRIDE_GAP: f64 = 0.10;
pub const MAX_ORTHOLOG_ASE_WORDS: usize = 5;
pub const MAX_PRODUCT_WORDS: usize = 12;

// databases
pub const NCBIFAM: &str = "NCBIfam";
pub const PFAM: &str = "Pfam";
pub const GENE3D: &str = "Gene3D";
pub const SUPERFAMILY: &str = "SUPERFAMILY";
pub const EXCLUDED_DATABASES: [&str; 4] = ["ProSiteProfiles", "Coils", "MobiDBLite", "PRINTS"];

// file names
pub const HYPO_INTERMEDIATE: &str = "hypo.tmp.gff";
