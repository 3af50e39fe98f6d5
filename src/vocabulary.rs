/*!
 * Vocabulary input.
 *
 * Entries come from the vocabulary spreadsheet itself (first sheet) or from
 * a delimited text export of it: first column is the word, second the gloss
 * or example sentence. Any further columns are ignored.
 */

use std::io::Read;
use std::path::Path;
use calamine::{open_workbook_auto, Reader};
use log::debug;

use crate::errors::AppError;

/// One vocabulary row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// Word to translate and pronounce
    pub word: String,
    /// Gloss, used verbatim as the card's example
    pub gloss: String,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, gloss: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            gloss: gloss.into(),
        }
    }
}

/// Reader options for the vocabulary file
#[derive(Debug, Clone, Copy)]
pub struct VocabularyFormat {
    pub delimiter: u8,
    pub has_header: bool,
}

impl Default for VocabularyFormat {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: false,
        }
    }
}

/// File extensions read as spreadsheets rather than delimited text
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether `path` is read as a spreadsheet
pub fn is_spreadsheet<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.as_str()))
}

/// Read all entries from a vocabulary file
///
/// Spreadsheets are picked by extension; the delimiter only applies to text files.
pub fn read_entries<P: AsRef<Path>>(path: P, format: VocabularyFormat) -> Result<Vec<WordEntry>, AppError> {
    let path = path.as_ref();
    if is_spreadsheet(path) {
        return read_spreadsheet(path, format.has_header);
    }

    let file = std::fs::File::open(path)
        .map_err(|e| AppError::Input(format!("Failed to open vocabulary file {:?}: {}", path, e)))?;
    parse_entries(file, format)
}

/// Parse entries from any reader
///
/// Rows with fewer than two cells, or with a blank word or gloss, are skipped.
/// The word is trimmed; the gloss is kept as written.
pub fn parse_entries<R: Read>(reader: R, format: VocabularyFormat) -> Result<Vec<WordEntry>, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(format.has_header)
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        if let Some(entry) = entry_from_cells(index, record.get(0), record.get(1)) {
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// Read entries from the first sheet of a workbook
pub fn read_spreadsheet<P: AsRef<Path>>(path: P, has_header: bool) -> Result<Vec<WordEntry>, AppError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::Input(format!("Failed to open spreadsheet {:?}: {}", path, e)))?;

    let range = workbook.worksheet_range_at(0)
        .ok_or_else(|| AppError::Input(format!("No sheets found in {:?}", path)))?
        .map_err(|e| AppError::Input(format!("Failed to read first sheet of {:?}: {}", path, e)))?;

    let mut entries = Vec::new();
    for (index, row) in range.rows().enumerate().skip(usize::from(has_header)) {
        let word = row.first().map(|cell| cell.to_string());
        let gloss = row.get(1).map(|cell| cell.to_string());
        if let Some(entry) = entry_from_cells(index, word.as_deref(), gloss.as_deref()) {
            entries.push(entry);
        }
    }

    Ok(entries)
}

// A row needs a non-blank word and gloss; the word is trimmed, the gloss kept as written
fn entry_from_cells(index: usize, word: Option<&str>, gloss: Option<&str>) -> Option<WordEntry> {
    let word = word.map(str::trim).unwrap_or_default();
    let gloss = gloss.unwrap_or_default();

    if word.is_empty() || gloss.trim().is_empty() {
        debug!("Skipping vocabulary row {}: needs a word and a gloss", index + 1);
        return None;
    }

    Some(WordEntry::new(word, gloss))
}
