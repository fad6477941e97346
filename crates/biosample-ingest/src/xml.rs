//! Streaming `BioSampleSet` parser.
//!
//! Element names are matched case-insensitively on their local part. Each
//! `BioSample` element becomes one [`Record`]; records are returned in
//! document order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use biosample_model::{Attribute, Link, Record};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

const BIOSAMPLE: &str = "biosample";

pub fn parse_biosample_file(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_biosample_set(BufReader::new(file))?;
    info!(
        path = %path.display(),
        records = records.len(),
        "extracted BioSample records"
    );
    Ok(records)
}

pub fn parse_biosample_set<R: BufRead>(input: R) -> Result<Vec<Record>> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().expand_empty_elements = true;

    let mut parser = SetParser::default();
    let mut buf = Vec::new();
    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error(&reader, e))?;
        match event {
            Event::Start(start) => parser.start(&start).map_err(|e| xml_error(&reader, e))?,
            Event::End(_) => parser.end(),
            Event::Text(text) => parser.text(&text).map_err(|e| xml_error(&reader, e))?,
            Event::CData(data) => parser.text(&data).map_err(|e| xml_error(&reader, e))?,
            Event::GeneralRef(reference) => parser
                .reference(&reference)
                .map_err(|e| xml_error(&reader, e))?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    debug!(records = parser.records.len(), "finished BioSampleSet");
    Ok(parser.records)
}

fn xml_error<R>(reader: &Reader<R>, error: impl std::fmt::Display) -> IngestError {
    IngestError::Xml {
        position: reader.error_position(),
        message: error.to_string(),
    }
}

/// Element whose text content is being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    OrganismName,
    OwnerName,
    Model,
    Package,
    Attribute,
    Link,
}

#[derive(Debug, Default)]
struct PendingAttribute {
    submitted_name: String,
    harmonized_name: String,
    display_name: String,
}

#[derive(Debug, Default)]
struct PendingLink {
    link_type: String,
    target: String,
    label: String,
}

#[derive(Debug, Default)]
struct SetParser {
    records: Vec<Record>,
    stack: Vec<String>,
    /// Stack depth just inside the open `BioSample` element.
    record_depth: Option<usize>,
    current: Option<Record>,
    target: Option<(TextTarget, usize)>,
    text: String,
    attribute: PendingAttribute,
    link: PendingLink,
}

impl SetParser {
    fn start(&mut self, start: &BytesStart<'_>) -> std::result::Result<(), String> {
        let name = local_name(start)?;
        self.stack.push(name);
        let depth = self.stack.len();

        let Some(record_depth) = self.record_depth else {
            if self.stack[depth - 1] == BIOSAMPLE {
                self.open_record(start, depth)?;
            }
            return Ok(());
        };
        let Some(record) = self.current.as_mut() else {
            return Ok(());
        };

        let path: Vec<&str> = self.stack[record_depth..].iter().map(String::as_str).collect();
        let target = match path.as_slice() {
            ["description", "organism"] => {
                record.organism_taxonomy_id = attribute_value(start, "taxonomy_id")?;
                record.organism_taxonomy_name = attribute_value(start, "taxonomy_name")?;
                None
            }
            ["description", "organism", "organismname"] => Some(TextTarget::OrganismName),
            ["owner", "name"] => Some(TextTarget::OwnerName),
            ["models", "model"] => Some(TextTarget::Model),
            ["package"] => {
                record.package_display_name = attribute_value(start, "display_name")?;
                Some(TextTarget::Package)
            }
            ["status"] => {
                record.status = attribute_value(start, "status")?;
                record.status_date = attribute_value(start, "when")?;
                None
            }
            ["attributes", "attribute"] => {
                self.attribute = PendingAttribute {
                    submitted_name: attribute_value(start, "attribute_name")?,
                    harmonized_name: attribute_value(start, "harmonized_name")?,
                    display_name: attribute_value(start, "display_name")?,
                };
                Some(TextTarget::Attribute)
            }
            ["links", "link"] => {
                self.link = PendingLink {
                    link_type: attribute_value(start, "type")?,
                    target: attribute_value(start, "target")?,
                    label: attribute_value(start, "label")?,
                };
                Some(TextTarget::Link)
            }
            _ => None,
        };
        if let Some(target) = target {
            self.target = Some((target, depth));
            self.text.clear();
        }
        Ok(())
    }

    fn open_record(&mut self, start: &BytesStart<'_>, depth: usize) -> std::result::Result<(), String> {
        let record = Record {
            access: attribute_value(start, "access")?,
            publication_date: attribute_value(start, "publication_date")?,
            last_update: attribute_value(start, "last_update")?,
            submission_date: attribute_value(start, "submission_date")?,
            id: attribute_value(start, "id")?,
            accession: attribute_value(start, "accession")?,
            ..Record::default()
        };
        self.current = Some(record);
        self.record_depth = Some(depth);
        Ok(())
    }

    fn end(&mut self) {
        let depth = self.stack.len();
        if let Some((target, target_depth)) = self.target
            && target_depth == depth
        {
            self.finish_text(target);
            self.target = None;
        }
        if self.record_depth == Some(depth) {
            if let Some(record) = self.current.take() {
                self.records.push(record);
            }
            self.record_depth = None;
        }
        self.stack.pop();
    }

    fn text(&mut self, bytes: &[u8]) -> std::result::Result<(), String> {
        if self.target.is_some() {
            let text = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
            self.text.push_str(text);
        }
        Ok(())
    }

    fn reference(&mut self, reference: &BytesRef<'_>) -> std::result::Result<(), String> {
        if self.target.is_none() {
            return Ok(());
        }
        if let Some(ch) = reference.resolve_char_ref().map_err(|e| e.to_string())? {
            self.text.push(ch);
            return Ok(());
        }
        let name = std::str::from_utf8(reference).map_err(|e| e.to_string())?;
        let resolved =
            resolve_predefined_entity(name).ok_or_else(|| format!("unknown entity `&{name};`"))?;
        self.text.push_str(resolved);
        Ok(())
    }

    fn finish_text(&mut self, target: TextTarget) {
        let Some(record) = self.current.as_mut() else {
            return;
        };
        let text = self.text.trim().to_string();
        self.text.clear();
        match target {
            TextTarget::OrganismName => record.organism_name = text,
            TextTarget::OwnerName => record.owner_name = text,
            TextTarget::Model => record.model_name = text,
            TextTarget::Package => record.package_name = text,
            TextTarget::Attribute => {
                let pending = std::mem::take(&mut self.attribute);
                if pending.submitted_name.is_empty()
                    || pending.harmonized_name.is_empty()
                    || pending.display_name.is_empty()
                {
                    return;
                }
                record.insert_attribute(Attribute::new(
                    pending.harmonized_name,
                    pending.submitted_name,
                    pending.display_name,
                    text,
                ));
            }
            TextTarget::Link => {
                let pending = std::mem::take(&mut self.link);
                record.links.push(Link {
                    link_type: pending.link_type,
                    target: pending.target,
                    label: pending.label,
                    value: text,
                });
            }
        }
    }
}

fn local_name(start: &BytesStart<'_>) -> std::result::Result<String, String> {
    let local = start.local_name();
    std::str::from_utf8(local.as_ref())
        .map(str::to_lowercase)
        .map_err(|e| e.to_string())
}

/// Unescaped, trimmed value of an XML attribute; empty when absent.
fn attribute_value(start: &BytesStart<'_>, key: &str) -> std::result::Result<String, String> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.local_name().as_ref().eq_ignore_ascii_case(key.as_bytes()) {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(value.trim().to_string());
        }
    }
    Ok(String::new())
}
