/*!
 * Flashcard deck output.
 *
 * Rows are written as delimited text ready for import into Anki: word,
 * example sentence, sound tag, translation.
 */

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::errors::AppError;
use crate::language_utils;
use crate::pipeline::OutputRow;

/// Column labels for a deck translating `source` into `target`
pub fn deck_header(source_language: &str, target_language: &str) -> [String; 4] {
    let source = language_utils::get_language_name(source_language)
        .unwrap_or_else(|_| source_language.to_string());
    let target = language_utils::get_language_name(target_language)
        .unwrap_or_else(|_| target_language.to_string());

    [
        format!("{} Word", source),
        "Example sentence".to_string(),
        "Sound".to_string(),
        format!("{} Translation", target),
    ]
}

/// Sequential writer for deck rows
pub struct DeckWriter<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl DeckWriter<File> {
    /// Create (or truncate) the deck file and write its header
    pub fn create<P: AsRef<Path>>(path: P, delimiter: u8, header: &[String]) -> Result<Self, AppError> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| AppError::File(format!("Failed to create output file {:?}: {}", path, e)))?;
        let mut deck = Self::from_writer(file, delimiter);
        deck.write_header(header)?;
        Ok(deck)
    }
}

impl<W: Write> DeckWriter<W> {
    pub fn from_writer(writer: W, delimiter: u8) -> Self {
        Self {
            writer: csv::WriterBuilder::new()
                .delimiter(delimiter)
                .flexible(false)
                .from_writer(writer),
            rows_written: 0,
        }
    }

    pub fn write_header(&mut self, header: &[String]) -> Result<(), AppError> {
        self.writer.write_record(header)?;
        Ok(())
    }

    /// Append one row
    pub fn write_row(&mut self, row: &OutputRow) -> Result<(), AppError> {
        self.writer.write_record([
            row.word.as_str(),
            row.example.as_str(),
            row.sound_reference.as_str(),
            row.translation.as_str(),
        ])?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush buffered rows and hand back the underlying writer
    pub fn finish(self) -> Result<W, AppError> {
        self.writer.into_inner()
            .map_err(|e| AppError::File(format!("Failed to flush output: {}", e.error())))
    }
}
