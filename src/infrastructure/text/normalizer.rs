//! Domain-term normalization: abbreviation expansion and unit spellings

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Abbreviation table, applied in order. Every case-insensitive whole-word
/// occurrence is rewritten to `"{ABBREV} ({expansion})"` with the table's
/// canonical casing.
const ABBREVIATIONS: [(&str, &str); 21] = [
    ("MI", "myocardial infarction"),
    ("HTN", "hypertension"),
    ("DM", "diabetes mellitus"),
    ("CAD", "coronary artery disease"),
    ("COPD", "chronic obstructive pulmonary disease"),
    ("CHF", "congestive heart failure"),
    ("CVA", "cerebrovascular accident"),
    ("ICU", "intensive care unit"),
    ("ER", "emergency room"),
    ("OR", "operating room"),
    ("CT", "computed tomography"),
    ("MRI", "magnetic resonance imaging"),
    ("ECG", "electrocardiogram"),
    ("EKG", "electrocardiogram"),
    ("CBC", "complete blood count"),
    ("BUN", "blood urea nitrogen"),
    ("HIV", "human immunodeficiency virus"),
    ("AIDS", "acquired immunodeficiency syndrome"),
    ("COVID", "coronavirus disease"),
    ("SARS", "severe acute respiratory syndrome"),
    ("MERS", "Middle East respiratory syndrome"),
];

// Each pattern optionally captures an already-present parenthetical
// expansion, which makes the rewrite idempotent: an expanded occurrence
// matches with the suffix group set and is left untouched.
static ABBREV_RULES: Lazy<Vec<(Regex, &'static str, &'static str)>> = Lazy::new(|| {
    ABBREVIATIONS
        .iter()
        .map(|&(abbrev, expansion)| {
            let pattern = format!(
                r"(?i)\b{}\b(?P<expanded> \({}\))?",
                regex::escape(abbrev),
                regex::escape(expansion)
            );
            (Regex::new(&pattern).unwrap(), abbrev, expansion)
        })
        .collect()
});

static UNIT_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\bmg/dl\b", "mg/dL"),
        (r"(?i)\bmmhg\b", "mmHg"),
        (r"(?i)\bkg/m2\b", "kg/m²"),
    ]
    .iter()
    .map(|&(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Expand known abbreviations to `"{ABBREV} ({expansion})"`
pub fn expand_abbreviations(text: &str) -> String {
    let mut result = text.to_string();

    for (regex, abbrev, expansion) in ABBREV_RULES.iter() {
        result = regex
            .replace_all(&result, |caps: &Captures| {
                if caps.name("expanded").is_some() {
                    caps[0].to_string()
                } else {
                    format!("{abbrev} ({expansion})")
                }
            })
            .into_owned();
    }

    result
}

/// Canonicalize lab-value unit spellings
pub fn normalize_units(text: &str) -> String {
    let mut result = text.to_string();
    for (regex, replacement) in UNIT_RULES.iter() {
        result = regex.replace_all(&result, *replacement).into_owned();
    }
    result
}

/// Full term normalization: abbreviations first, then units
pub fn normalize(text: &str) -> String {
    normalize_units(&expand_abbreviations(text))
}
