//! TextRecordParser — turns loosely formatted generated prose into a `CharacterRecord`.
//!
//! Each line is handled on its own: `<label>:<value>`, label normalized and looked up
//! in the alias table, value cleaned of a trailing `(+N)` annotation. Anything that
//! does not fit is dropped. Parsing never fails.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::sheet::aliases::lookup_alias;
use crate::sheet::fields::CanonicalField;

/// Trailing modifier annotation, e.g. the ` (+3)` in `16 (+3)`.
static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([+\-−]?\d+\s*\)\s*$").expect("valid regex"));

/// Leading list bullet or markdown heading marker.
static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-•>]|#+)\s+").expect("valid regex"));

pub const DEFAULT_LABEL_WRAPPERS: &str = "*_~`";

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Normalized key/value record extracted from one block of generated text.
///
/// Keys are present only when a line was recognized; there are no placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterRecord {
    values: BTreeMap<CanonicalField, String>,
}

impl CharacterRecord {
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.values.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Last write wins.
    pub(crate) fn insert(&mut self, field: CanonicalField, value: String) {
        self.values.insert(field, value);
    }
}

impl FromIterator<(CanonicalField, String)> for CharacterRecord {
    fn from_iter<I: IntoIterator<Item = (CanonicalField, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Record plus the lines that looked like `label: value` but had an unknown label.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseOutcome {
    pub record: CharacterRecord,
    pub unrecognized: Vec<String>,
}

/// Characters treated as decoration around the line and its label (emphasis markers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTrim {
    wrappers: Vec<char>,
}

impl LabelTrim {
    pub fn new(wrappers: &str) -> Self {
        Self {
            wrappers: wrappers.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }

    /// Strips whitespace and wrapper characters from both ends.
    pub fn trim<'a>(&self, s: &'a str) -> &'a str {
        s.trim_matches(|c: char| c.is_whitespace() || self.wrappers.contains(&c))
    }
}

impl Default for LabelTrim {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_WRAPPERS)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parser
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct SheetParser {
    trim: LabelTrim,
    /// Ignore recognized lines whose value is empty instead of storing `""`.
    skip_empty_values: bool,
}

enum LineKind {
    Field(CanonicalField, String),
    UnknownLabel,
    Noise,
}

impl SheetParser {
    pub fn new(trim: LabelTrim) -> Self {
        Self {
            trim,
            skip_empty_values: false,
        }
    }

    /// Keeps an earlier value when a later line repeats the label with nothing after it.
    pub fn skip_empty_values(mut self, skip: bool) -> Self {
        self.skip_empty_values = skip;
        self
    }

    pub fn parse(&self, text: &str) -> CharacterRecord {
        self.parse_detailed(text).record
    }

    /// Same record as `parse`, also reporting lines dropped for an unknown label.
    pub fn parse_detailed(&self, text: &str) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();

        for line in text.lines() {
            match self.classify_line(line) {
                LineKind::Field(field, value) => outcome.record.insert(field, value),
                LineKind::UnknownLabel => outcome.unrecognized.push(line.trim().to_string()),
                LineKind::Noise => {}
            }
        }

        outcome
    }

    fn classify_line(&self, line: &str) -> LineKind {
        let line = LIST_MARKER_RE.replace(line.trim(), "");
        let line = self.trim.trim(&line);

        let Some((label, value)) = line.split_once(':') else {
            return LineKind::Noise;
        };

        let label = normalize_label(self.trim.trim(label));
        if label.is_empty() {
            return LineKind::Noise;
        }
        let Some(field) = lookup_alias(&label) else {
            return LineKind::UnknownLabel;
        };

        let value = strip_annotation(strip_label_closer(value, &self.trim)).trim();
        if value.is_empty() && self.skip_empty_values {
            return LineKind::Noise;
        }

        LineKind::Field(field, value.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Lower-cases and collapses internal whitespace runs.
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Drops a wrapper run glued to the colon, as in `**Nome:** Thalindra`.
/// Decoration separated from the colon by whitespace belongs to the value.
fn strip_label_closer<'a>(value: &'a str, trim: &LabelTrim) -> &'a str {
    let rest = value.trim_start_matches(|c: char| trim.wrappers.contains(&c));
    if rest.len() == value.len() || rest.starts_with(char::is_whitespace) || rest.is_empty() {
        rest
    } else {
        value
    }
}

fn strip_annotation(value: &str) -> &str {
    match ANNOTATION_RE.find(value) {
        Some(m) => &value[..m.start()],
        None => value,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
