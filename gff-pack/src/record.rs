use config::MIN_GFF_FIELDS;
use thiserror::Error;

use std::fmt;

#[derive(Debug, Error, PartialEq)]
pub enum GffError {
    #[error("expected {expected} tab-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("cannot parse {field} from {value:?}")]
    InvalidField { field: &'static str, value: String },
    #[error("attribute {0:?} has no key=value separator")]
    InvalidAttribute(String),
    #[error("record {seqid}:{start}-{end} lacks required attribute {key:?}")]
    MissingAttribute {
        seqid: String,
        start: u64,
        end: u64,
        key: String,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Strand {
    Forward,
    Reverse,
    Unknown,
    Unstranded,
}

impl Strand {
    fn parse(field: &str) -> Result<Self, GffError> {
        match field {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "?" => Ok(Strand::Unknown),
            "." => Ok(Strand::Unstranded),
            _ => Err(GffError::InvalidField {
                field: "strand",
                value: field.to_string(),
            }),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
            Strand::Unknown => "?",
            Strand::Unstranded => ".",
        };
        write!(f, "{}", symbol)
    }
}

/// A single GFF3 feature line.
///
/// Score and phase are kept verbatim since the tools never read them.
#[derive(Debug, PartialEq, Clone)]
pub struct GffRecord {
    pub seqid: String,
    pub source: String,
    pub feature: String,
    pub start: u64,
    pub end: u64,
    pub score: String,
    pub strand: Strand,
    pub phase: String,
    pub attributes: Attributes,
}

impl GffRecord {
    pub fn parse(line: &str) -> Result<Self, GffError> {
        let fields = line.trim_end_matches(['\n', '\r']).split('\t').collect::<Vec<_>>();

        if fields.len() != MIN_GFF_FIELDS {
            return Err(GffError::FieldCount {
                expected: MIN_GFF_FIELDS,
                found: fields.len(),
            });
        }

        let get = |field: &'static str, value: &str| {
            value.parse::<u64>().map_err(|_| GffError::InvalidField {
                field,
                value: value.to_string(),
            })
        };

        Ok(Self {
            seqid: fields[0].to_string(),
            source: fields[1].to_string(),
            feature: fields[2].to_string(),
            start: get("start", fields[3])?,
            end: get("end", fields[4])?,
            score: fields[5].to_string(),
            strand: Strand::parse(fields[6])?,
            phase: fields[7].to_string(),
            attributes: Attributes::parse(fields[8])?,
        })
    }

    /// value of an attribute that must be present
    pub fn require(&self, key: &str) -> Result<&str, GffError> {
        self.attributes
            .get(key)
            .ok_or_else(|| GffError::MissingAttribute {
                seqid: self.seqid.clone(),
                start: self.start,
                end: self.end,
                key: key.to_string(),
            })
    }
}

impl fmt::Display for GffRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.seqid,
            self.source,
            self.feature,
            self.start,
            self.end,
            self.score,
            self.strand,
            self.phase,
            self.attributes
        )
    }
}

/// Column 9 as an ordered key/value list.
///
/// Values keep their escapes (`\;`, `\=`) untouched, so writing
/// a parsed record back produces the same text.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn parse(field: &str) -> Result<Self, GffError> {
        if field.is_empty() || field == "." {
            return Ok(Self::default());
        }

        let mut entries = Vec::new();
        for item in split_unescaped(field, ';') {
            if item.is_empty() {
                continue;
            }

            match split_unescaped_once(item, '=') {
                Some((key, value)) => entries.push((key.to_string(), value.to_string())),
                None => return Err(GffError::InvalidAttribute(item.to_string())),
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// first key matching `key` regardless of case
    pub fn find_key_ignore_case(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(k, _)| k.as_str())
    }

    /// replace the value in place, or append a new key at the end
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// place `key` right after `anchor`; a previous `key` is moved
    pub fn insert_after(&mut self, anchor: &str, key: &str, value: impl Into<String>) {
        self.entries.retain(|(k, _)| k != key);

        let entry = (key.to_string(), value.into());
        match self.entries.iter().position(|(k, _)| k == anchor) {
            Some(idx) => self.entries.insert(idx + 1, entry),
            None => self.entries.push(entry),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (key, value)) in self.entries.iter().enumerate() {
            if idx > 0 {
                write!(f, ";")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// split on `delim` unless it is preceded by a backslash
pub fn split_unescaped(text: &str, delim: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut last = 0;
    let mut prev = None;

    for (idx, ch) in text.char_indices() {
        if ch == delim && prev != Some('\\') {
            parts.push(&text[last..idx]);
            last = idx + ch.len_utf8();
        }
        prev = Some(ch);
    }
    parts.push(&text[last..]);

    parts
}

fn split_unescaped_once(text: &str, delim: char) -> Option<(&str, &str)> {
    let mut prev = None;

    for (idx, ch) in text.char_indices() {
        if ch == delim && prev != Some('\\') {
            return Some((&text[..idx], &text[idx + ch.len_utf8()..]));
        }
        prev = Some(ch);
    }

    None
}
