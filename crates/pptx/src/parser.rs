//! PPTX file parser implementation.

use crate::shapes::{local_name, parse_shape_tree, Shape};
use quick_xml::events::Event;
use quick_xml::Reader;
use slidecheck_core::{Error, Presentation, Result, SlideRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Open and parse the deck at `path`.
    ///
    /// A path that does not exist, or that is a directory, yields
    /// [`Error::DocumentNotFound`].
    pub fn open(&self, path: &Path) -> Result<Presentation> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(Error::DocumentNotFound(path.to_path_buf())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::DocumentNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(Error::IoError(e)),
        }

        let file = File::open(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");

        self.parse(BufReader::new(file), filename)
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<Presentation> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut presentation = Presentation::new(filename);

        for slide_path in self.get_slide_order(&mut archive)? {
            let content = match read_file_from_archive(&mut archive, &slide_path) {
                Ok(content) => content,
                Err(Error::MissingPart(part)) => {
                    log::warn!("Slide part '{}' is referenced but missing, skipping", part);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let shapes = parse_shape_tree(&content).map_err(|e| match e {
                Error::XmlError(msg) => Error::XmlError(format!("{}: {}", slide_path, msg)),
                other => other,
            })?;

            let slide = presentation.push_slide();
            for shape in &shapes {
                log::trace!("Slide {}: {:?} shape '{}'", slide.slide_number, shape.kind, shape.name);
                record_shape(slide, shape);
            }

            if slide.is_blank() {
                log::debug!("Slide {} ({}) has no text or tables", slide.slide_number, slide_path);
            }

            log::debug!(
                "Slide {} ({}): {} shapes, {} paragraphs, {} tables",
                slide.slide_number,
                slide_path,
                shapes.len(),
                slide.text_content.len(),
                slide.table_content.len()
            );
        }

        Ok(presentation)
    }

    /// Get the ordered list of slide part paths.
    ///
    /// The slide id list in `presentation.xml` is authoritative. When it is
    /// absent the slide relationships are ordered by the number in their id
    /// or target.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let presentation_xml = read_file_from_archive(archive, PRESENTATION_PART)?;
        let rels_xml = read_file_from_archive(archive, PRESENTATION_RELS_PART)?;

        let relationships = parse_relationships(&rels_xml)?;
        let by_id: HashMap<&str, &Relationship> =
            relationships.iter().map(|r| (r.id.as_str(), r)).collect();

        let Some(slide_ids) = parse_slide_id_list(&presentation_xml)? else {
            log::debug!("No slide id list in presentation.xml, ordering by relationship");
            return Ok(fallback_slide_order(&relationships));
        };

        let mut paths = Vec::with_capacity(slide_ids.len());
        for r_id in &slide_ids {
            match by_id.get(r_id.as_str()) {
                Some(rel) if rel.is_slide() => paths.push(resolve_part_path("ppt", &rel.target)),
                Some(rel) => {
                    log::warn!("Slide id '{}' points at a non-slide part '{}'", r_id, rel.target);
                }
                None => log::warn!("Slide id '{}' has no relationship, skipping", r_id),
            }
        }

        Ok(paths)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy a shape's paragraphs and table into the slide record.
fn record_shape(slide: &mut SlideRecord, shape: &Shape) {
    if let Some(frame) = shape.as_text_carrier() {
        for paragraph in &frame.paragraphs {
            slide.add_text(&paragraph.text());
        }
    }

    if let Some(table) = shape.as_table_carrier() {
        let rows = table
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.trim().to_string()).collect())
            .collect();
        slide.add_table(rows);
    }
}

/// A package relationship from a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

impl Relationship {
    fn is_slide(&self) -> bool {
        self.rel_type.ends_with("/slide")
    }
}

/// Parse the relationships of a `.rels` part.
fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut relationships = Vec::new();
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut rel = Relationship {
                    id: String::new(),
                    rel_type: String::new(),
                    target: String::new(),
                };

                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        _ => {}
                    }
                }

                relationships.push(rel);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(relationships)
}

/// Relationship ids from `<p:sldIdLst>`, in order. `None` if the list is absent.
fn parse_slide_id_list(xml: &str) -> Result<Option<Vec<String>>> {
    let mut reader = Reader::from_str(xml);
    let mut ids: Option<Vec<String>> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"sldIdLst" => {
                        ids.get_or_insert_with(Vec::new);
                    }
                    b"sldId" => {
                        // The relationship id is the namespaced `r:id`; the bare `id` is numeric.
                        let r_id = e.attributes().flatten().find_map(|attr| {
                            let key = attr.key.as_ref();
                            (key != local_name(key) && local_name(key) == b"id")
                                .then(|| String::from_utf8_lossy(&attr.value).to_string())
                        });
                        if let (Some(list), Some(r_id)) = (ids.as_mut(), r_id) {
                            list.push(r_id);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) if local_name(e.name().as_ref()) == b"sldIdLst" => break,
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation.xml: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// Slide parts ordered by the number in their relationship id or target.
fn fallback_slide_order(relationships: &[Relationship]) -> Vec<String> {
    let mut slides: Vec<(String, Option<usize>)> = relationships
        .iter()
        .filter(|rel| rel.is_slide())
        .map(|rel| {
            let order_num = extract_slide_number(&rel.target).or_else(|| extract_slide_number(&rel.id));
            (resolve_part_path("ppt", &rel.target), order_num)
        })
        .collect();

    slides.sort_by(|a, b| match (a.1, b.1) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });

    slides.into_iter().map(|(path, _)| path).collect()
}

/// Resolve a relationship target against the directory of its source part.
fn resolve_part_path(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Read a file from the ZIP archive.
fn read_file_from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive.by_name(path).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => Error::MissingPart(path.to_string()),
        other => Error::ZipError(format!("Failed to open '{}': {}", path, other)),
    })?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
