//! Language utilities for ISO language code handling
//!
//! The dictionary service addresses languages by ISO 639-1 codes joined as
//! `src-dst`. Users may configure 639-1, 639-2/T or 639-2/B codes; everything
//! is normalized to 639-1 before it reaches the service.

use anyhow::{Result, anyhow};
use isolang::Language;

/// ISO 639-2/B codes that differ from their 639-2/T form
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Resolve a 2- or 3-letter code to a language
pub fn parse_language(code: &str) -> Result<Language> {
    let normalized_code = code.trim().to_lowercase();

    let language = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => {
            let part2t = PART2B_TO_PART2T.iter()
                .find(|(b, _)| *b == normalized_code)
                .map(|(_, t)| *t)
                .unwrap_or(normalized_code.as_str());
            Language::from_639_3(part2t)
        }
        _ => None,
    };

    language.ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-1 (2-letter) format
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let language = parse_language(code)?;
    language.to_639_1()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("Language '{}' has no ISO 639-1 code", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    Ok(parse_language(code)?.to_name().to_string())
}

/// Dictionary language pair, e.g. `en-ru`
pub fn dictionary_lang_pair(source: &str, target: &str) -> Result<String> {
    Ok(format!("{}-{}", normalize_to_part1(source)?, normalize_to_part1(target)?))
}
