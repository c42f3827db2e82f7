//! Document Text Adapter: turns an uploaded resume into plain text.
//!
//! Reader failures never escape: they become a placeholder string such as
//! `"PDF parsing error: <reason>"`, which then flows through fact extraction
//! like any other text. Unknown extensions are rejected earlier, by whoever
//! builds the `ResumeInput` (`DocumentKind::from_extension` returns `None`).

use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::facts::{extract, ResumeFacts};

const DOCX_BODY_PART: &str = "word/document.xml";

static DOCX_PARAGRAPH_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</w:p>").expect("valid paragraph regex"));

/// Run content in document order: a `<w:t>` text run, a run-level `<w:tab/>`
/// (tab stops in `<w:tabs>` always carry attributes and are not matched), or a
/// `<w:br/>` / `<w:cr/>` break.
static DOCX_RUN_CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>(?P<text>[^<]*)</w:t>|(?P<tab><w:tab\s*/>)|(?P<br><w:(?:br|cr)(?:\s[^>]*)?/>)")
        .expect("valid run content regex")
});

static XML_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#(?P<dec>[0-9]+)|#[xX](?P<hex>[0-9a-fA-F]+)|(?P<name>lt|gt|quot|apos|amp));")
        .expect("valid entity regex")
});

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("{0}")]
    Pdf(String),

    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("reader panicked: {0}")]
    Panicked(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::Txt),
            _ => None,
        }
    }

    /// Uses the text after the last `.`; a name without one has no kind.
    pub fn from_filename(name: &str) -> Option<Self> {
        name.rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
            DocumentKind::Txt => "TXT",
        }
    }

    fn read(self, bytes: &[u8]) -> Result<String, ReadError> {
        match self {
            DocumentKind::Pdf => read_pdf(bytes),
            DocumentKind::Docx => read_docx(bytes),
            DocumentKind::Txt => Ok(String::from_utf8(bytes.to_vec())?),
        }
    }
}

/// Resume input as handed over by the caller.
#[derive(Debug, Clone)]
pub enum ResumeInput {
    PlainText(String),
    NamedBinary { bytes: Vec<u8>, kind: DocumentKind },
}

/// Best-effort plain text. Never fails.
pub fn to_text(input: ResumeInput) -> String {
    match input {
        ResumeInput::PlainText(text) => text,
        ResumeInput::NamedBinary { bytes, kind } => match kind.read(&bytes) {
            Ok(text) => {
                debug!("Extracted {} chars from {} upload", text.len(), kind.label());
                text
            }
            Err(e) => {
                warn!("{} extraction failed: {e}", kind.label());
                format!("{} parsing error: {}", kind.label(), e)
            }
        },
    }
}

/// `to_text` followed by fact extraction.
pub fn parse_resume(input: ResumeInput) -> ResumeFacts {
    extract(&to_text(input))
}

fn read_pdf(bytes: &[u8]) -> Result<String, ReadError> {
    // pdf-extract panics on some malformed documents instead of returning Err.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ReadError::Pdf(e.to_string())),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ReadError::Panicked(reason))
        }
    }
}

fn read_docx(bytes: &[u8]) -> Result<String, ReadError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCX_BODY_PART)?.read_to_string(&mut xml)?;

    let paragraphs: Vec<String> = DOCX_PARAGRAPH_END
        .split(&xml)
        .map(|chunk| {
            let mut line = String::new();
            for caps in DOCX_RUN_CONTENT.captures_iter(chunk) {
                if let Some(text) = caps.name("text") {
                    line.push_str(&unescape_xml(text.as_str()));
                } else if caps.name("tab").is_some() {
                    line.push('\t');
                } else {
                    line.push('\n');
                }
            }
            line
        })
        .collect();

    // The chunk after the last paragraph is document trailer; drop trailing blanks.
    let end = paragraphs
        .iter()
        .rposition(|p| !p.is_empty())
        .map_or(0, |i| i + 1);

    Ok(paragraphs[..end].join("\n"))
}

/// Decodes the five predefined entities and numeric character references in
/// one pass. References to invalid code points are left as written.
fn unescape_xml(s: &str) -> String {
    XML_ENTITY
        .replace_all(s, |caps: &regex::Captures| {
            let decoded = if let Some(name) = caps.name("name") {
                match name.as_str() {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    _ => Some('&'),
                }
            } else if let Some(dec) = caps.name("dec") {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else {
                caps.name("hex")
                    .and_then(|hex| u32::from_str_radix(hex.as_str(), 16).ok())
                    .and_then(char::from_u32)
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCX_BODY_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(DocumentKind::from_extension("PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension(".docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_extension("txt"), Some(DocumentKind::Txt));
        assert_eq!(DocumentKind::from_extension("odt"), None);
    }

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(
            DocumentKind::from_filename("jane.resume.Pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(DocumentKind::from_filename("resume"), None);
        assert_eq!(DocumentKind::from_filename("resume.md"), None);
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = to_text(ResumeInput::PlainText("Jane Roe, Rust".to_string()));
        assert_eq!(text, "Jane Roe, Rust");
    }

    #[test]
    fn test_txt_upload_decoded() {
        let text = to_text(ResumeInput::NamedBinary {
            bytes: "Jane Roe\nSQL, 4 years".as_bytes().to_vec(),
            kind: DocumentKind::Txt,
        });
        assert_eq!(text, "Jane Roe\nSQL, 4 years");
    }

    #[test]
    fn test_invalid_utf8_becomes_placeholder() {
        let text = to_text(ResumeInput::NamedBinary {
            bytes: vec![0xff, 0xfe, 0xfd],
            kind: DocumentKind::Txt,
        });
        assert!(text.starts_with("TXT parsing error: "), "{text}");
    }

    #[test]
    fn test_corrupt_pdf_becomes_placeholder() {
        let text = to_text(ResumeInput::NamedBinary {
            bytes: b"this is not a pdf".to_vec(),
            kind: DocumentKind::Pdf,
        });
        assert!(text.starts_with("PDF parsing error: "), "{text}");
    }

    #[test]
    fn test_corrupt_docx_becomes_placeholder() {
        let text = to_text(ResumeInput::NamedBinary {
            bytes: b"PK but not really".to_vec(),
            kind: DocumentKind::Docx,
        });
        assert!(text.starts_with("DOCX parsing error: "), "{text}");
    }

    #[test]
    fn test_docx_without_body_part_becomes_placeholder() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<w:styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let text = to_text(ResumeInput::NamedBinary {
            bytes,
            kind: DocumentKind::Docx,
        });
        assert!(text.starts_with("DOCX parsing error: "), "{text}");
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document><w:body>
<w:p><w:r><w:t>Jane Roe</w:t></w:r></w:p>
<w:p><w:r><w:t xml:space="preserve">Python &amp; </w:t></w:r><w:r><w:t>SQL</w:t></w:r></w:p>
<w:p><w:r><w:t>6 years experience</w:t></w:r></w:p>
<w:sectPr/></w:body></w:document>"#;

        let text = to_text(ResumeInput::NamedBinary {
            bytes: build_docx(xml),
            kind: DocumentKind::Docx,
        });
        assert_eq!(text, "Jane Roe\nPython & SQL\n6 years experience");
    }

    #[test]
    fn test_docx_tabs_and_breaks_separate_words() {
        let xml = r#"<w:document><w:body>
<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="2880"/></w:tabs></w:pPr><w:r><w:t>Python</w:t><w:tab/><w:t>SQL</w:t><w:br/><w:t>Docker</w:t></w:r></w:p>
</w:body></w:document>"#;

        let facts = parse_resume(ResumeInput::NamedBinary {
            bytes: build_docx(xml),
            kind: DocumentKind::Docx,
        });
        assert_eq!(facts.raw_text, "Python\tSQL\nDocker");
        assert_eq!(facts.skills, vec!["python", "sql", "docker"]);
        assert_eq!(facts.word_count, 3);
    }

    #[test]
    fn test_docx_numeric_character_references_decoded() {
        let xml = r#"<w:document><w:body>
<w:p><w:r><w:t>Jane&#8217;s CV &#x2013; R&amp;D &amp;lt; &#xD800;</w:t></w:r></w:p>
</w:body></w:document>"#;

        let text = to_text(ResumeInput::NamedBinary {
            bytes: build_docx(xml),
            kind: DocumentKind::Docx,
        });
        assert_eq!(text, "Jane\u{2019}s CV \u{2013} R&D &lt; &#xD800;");
    }

    #[test]
    fn test_placeholder_flows_into_fact_extraction() {
        let facts = parse_resume(ResumeInput::NamedBinary {
            bytes: b"garbage".to_vec(),
            kind: DocumentKind::Pdf,
        });
        assert!(facts.raw_text.starts_with("PDF parsing error: "));
        assert!(facts.word_count >= 3);
        assert!(facts.skills.is_empty());
    }
}
