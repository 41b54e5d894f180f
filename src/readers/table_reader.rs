use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use crate::error::{ExplorerError, Result};
use crate::models::Record;

/// Reads a header-delimited comma-separated file into [`Record`]s
pub struct TableReader {
    use_mmap: bool,
}

impl TableReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read every data row of `path`, keyed by its header row
    pub fn read_records(&self, path: &Path) -> Result<Vec<Record>> {
        let text = if self.use_mmap {
            self.read_text_mmap(path)?
        } else {
            self.read_text_buffered(path)?
        };

        parse_records(path, &text)
    }

    fn read_text_buffered(&self, path: &Path) -> Result<String> {
        let file = open(path)?;
        let mut bytes = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut bytes)
            .map_err(|source| load_error(path, source))?;

        Ok(decode_text(&bytes))
    }

    fn read_text_mmap(&self, path: &Path) -> Result<String> {
        let file = open(path)?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(|source| load_error(path, source))?;

        Ok(decode_text(&mmap))
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| load_error(path, source))
}

fn load_error(path: &Path, source: std::io::Error) -> ExplorerError {
    ExplorerError::Load {
        path: path.to_path_buf(),
        source,
    }
}

/// Decode as UTF-8 (BOM stripped), falling back to Windows-1252 for legacy exports
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }

    tracing::debug!("Input is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text.into_owned()
}

/// Parse CSV text whose first row is the header
pub fn parse_records(path: &Path, text: &str) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Arc<[String]> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ExplorerError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = result?;
        let row_index = index + 1;

        // Column count must match the header exactly; no partial loads
        if row.len() != headers.len() {
            return Err(ExplorerError::MalformedRow {
                path: path.to_path_buf(),
                row: row_index,
                expected: headers.len(),
                found: row.len(),
            });
        }

        records.push(Record::new(
            row_index,
            Arc::clone(&headers),
            row.iter().map(str::to_string).collect(),
        ));
    }

    Ok(records)
}
