//! DOCX text extraction.
//!
//! A `.docx` is a ZIP container; the body lives in `word/document.xml`:
//! ```xml
//! <w:document>
//!   <w:body>
//!     <w:p>
//!       <w:r><w:t>Jane </w:t></w:r>
//!       <w:r><w:t>Doe</w:t><w:tab/><w:t>Engineer</w:t></w:r>
//!     </w:p>
//!   </w:body>
//! </w:document>
//! ```
//! Each paragraph contributes its runs' text followed by `\n`.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use super::{ExtractError, TextExtractor};

const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let text = read_docx(File::open(path)?)?;
        debug!(path = %path.display(), chars = text.len(), "Extracted DOCX text");
        Ok(text)
    }
}

/// Opens the container and collects the paragraph text of the main document part.
fn read_docx<R: Read + Seek>(source: R) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(source)?;
    let part = archive.by_name(DOCUMENT_PART)?;
    paragraphs_text(BufReader::new(part))
}

/// Walks `document.xml`, emitting run text and one `\n` per paragraph.
fn paragraphs_text<R: BufRead>(reader: R) -> Result<String, ExtractError> {
    let mut xml_reader = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut text = String::new();

    // Runs can nest through text boxes, so track depth rather than a flag.
    let mut run_depth: usize = 0;
    let mut in_text = false;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:r" => run_depth += 1,
                b"w:t" if run_depth > 0 => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" => text.push('\n'),
                b"w:tab" if run_depth > 0 => text.push('\t'),
                b"w:br" | b"w:cr" if run_depth > 0 => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text => text.push_str(&e.unescape()?),
            Event::CData(e) if in_text => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}
