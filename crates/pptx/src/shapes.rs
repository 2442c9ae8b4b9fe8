//! Shape model for a single slide part.
//!
//! Only the direct children of the slide's shape tree are shapes; anything
//! nested inside a group is part of the group and is not visited.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use slidecheck_core::{Error, Result};

/// The kind of element a shape was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Auto shape, text box or placeholder (`p:sp`).
    AutoShape,
    /// Graphic frame holding a table, chart or diagram (`p:graphicFrame`).
    GraphicFrame,
    /// Picture (`p:pic`).
    Picture,
    /// Connector line (`p:cxnSp`).
    Connector,
    /// Group of shapes (`p:grpSp`).
    Group,
    /// Embedded ink or content part (`p:contentPart`).
    ContentPart,
}

impl ShapeKind {
    /// Map a shape-tree child element to its kind.
    fn from_tag(local: &[u8]) -> Option<Self> {
        match local {
            b"sp" => Some(Self::AutoShape),
            b"graphicFrame" => Some(Self::GraphicFrame),
            b"pic" => Some(Self::Picture),
            b"cxnSp" => Some(Self::Connector),
            b"grpSp" => Some(Self::Group),
            b"contentPart" => Some(Self::ContentPart),
            _ => None,
        }
    }
}

/// A positioned element on a slide.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Element kind.
    pub kind: ShapeKind,

    /// Name from the shape's non-visual properties (e.g. "Title 1").
    pub name: String,

    text_frame: Option<TextFrame>,
    table: Option<TableGrid>,
}

impl Shape {
    fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            name: String::new(),
            text_frame: None,
            table: None,
        }
    }

    /// The shape's text frame, if it carries one.
    pub fn as_text_carrier(&self) -> Option<&TextFrame> {
        self.text_frame.as_ref()
    }

    /// The shape's table, if it carries one.
    pub fn as_table_carrier(&self) -> Option<&TableGrid> {
        self.table.as_ref()
    }
}

/// The text body of a shape.
#[derive(Debug, Clone, Default)]
pub struct TextFrame {
    /// Paragraphs in document order, including empty ones.
    pub paragraphs: Vec<Paragraph>,
}

/// A paragraph as the list of its runs' text.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    /// Text of each run. Fields and line breaks are not runs.
    pub runs: Vec<String>,
}

impl Paragraph {
    /// Run text concatenated without separators.
    pub fn text(&self) -> String {
        self.runs.concat()
    }
}

/// Raw table content, untrimmed.
#[derive(Debug, Clone, Default)]
pub struct TableGrid {
    /// Rows of cell text. Paragraphs inside a cell are joined with `\n`.
    pub rows: Vec<Vec<String>>,
}

/// Parse the shapes of a slide part, in document order.
pub fn parse_shape_tree(xml: &str) -> Result<Vec<Shape>> {
    let mut reader = Reader::from_str(xml);
    let mut builder = ShapeTreeBuilder::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => builder.start(e),
            Ok(Event::Empty(ref e)) => {
                builder.start(e);
                builder.end(local_name(e.name().as_ref()));
            }
            Ok(Event::End(ref e)) => builder.end(local_name(e.name().as_ref())),
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::XmlError(format!("Bad text content: {}", e)))?;
                builder.text(&text);
            }
            Ok(Event::CData(e)) => {
                builder.text(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(builder.shapes)
}

/// Walks slide XML events and collects top-level shapes.
#[derive(Default)]
struct ShapeTreeBuilder {
    depth: usize,
    tree_depth: Option<usize>,
    current: Option<ShapeState>,
    shapes: Vec<Shape>,
}

impl ShapeTreeBuilder {
    fn start(&mut self, e: &BytesStart<'_>) {
        self.depth += 1;
        let depth = self.depth;
        let name = e.name();
        let local = local_name(name.as_ref());

        if let Some(state) = self.current.as_mut() {
            state.start(local, e, depth);
            return;
        }

        match self.tree_depth {
            None if local == b"spTree" => self.tree_depth = Some(depth),
            Some(tree) if depth == tree + 1 => {
                if let Some(kind) = ShapeKind::from_tag(local) {
                    self.current = Some(ShapeState::new(kind, depth));
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, local: &[u8]) {
        let depth = self.depth;
        self.depth = self.depth.saturating_sub(1);

        if self.current.as_ref().is_some_and(|s| s.depth == depth) {
            if let Some(state) = self.current.take() {
                self.shapes.push(state.shape);
            }
        } else if let Some(state) = self.current.as_mut() {
            state.end(local, depth);
        } else if self.tree_depth == Some(depth) {
            self.tree_depth = None;
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(state) = self.current.as_mut() {
            state.text(text);
        }
    }
}

/// Parse state for the shape currently being read.
struct ShapeState {
    depth: usize,
    shape: Shape,
    in_text_body: bool,
    paragraph: Option<Paragraph>,
    in_run: bool,
    in_text: bool,
    table: Option<TableState>,
}

impl ShapeState {
    fn new(kind: ShapeKind, depth: usize) -> Self {
        Self {
            depth,
            shape: Shape::new(kind),
            in_text_body: false,
            paragraph: None,
            in_run: false,
            in_text: false,
            table: None,
        }
    }

    fn start(&mut self, local: &[u8], e: &BytesStart<'_>, depth: usize) {
        if local == b"cNvPr" && depth == self.depth + 2 {
            for attr in e.attributes().flatten() {
                if attr.key.as_ref() == b"name" {
                    self.shape.name = String::from_utf8_lossy(&attr.value).to_string();
                }
            }
            return;
        }

        if self.shape.kind == ShapeKind::Group {
            return;
        }

        if local == b"t" {
            self.in_text = true;
            return;
        }

        if let Some(table) = self.table.as_mut() {
            table.start(local);
            return;
        }

        match local {
            b"txBody" if depth == self.depth + 1 && self.shape.kind == ShapeKind::AutoShape => {
                self.in_text_body = true;
                self.shape.text_frame.get_or_insert_with(TextFrame::default);
            }
            b"p" if self.in_text_body => self.paragraph = Some(Paragraph::default()),
            b"r" => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    self.in_run = true;
                    paragraph.runs.push(String::new());
                }
            }
            b"tbl" if self.shape.kind == ShapeKind::GraphicFrame => {
                self.table = Some(TableState::default());
            }
            _ => {}
        }
    }

    fn end(&mut self, local: &[u8], depth: usize) {
        if local == b"t" {
            self.in_text = false;
            return;
        }

        if local == b"tbl" {
            if let Some(table) = self.table.take() {
                self.shape.table = Some(TableGrid { rows: table.rows });
            }
            return;
        }

        if let Some(table) = self.table.as_mut() {
            table.end(local);
            return;
        }

        match local {
            b"r" => self.in_run = false,
            b"p" => {
                if let (Some(paragraph), Some(frame)) =
                    (self.paragraph.take(), self.shape.text_frame.as_mut())
                {
                    frame.paragraphs.push(paragraph);
                }
            }
            b"txBody" if depth == self.depth + 1 => self.in_text_body = false,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if !self.in_text {
            return;
        }

        if let Some(table) = self.table.as_mut() {
            table.text(text);
            return;
        }

        if self.in_run {
            if let Some(run) = self.paragraph.as_mut().and_then(|p| p.runs.last_mut()) {
                run.push_str(text);
            }
        }
    }
}

/// Parse state for a table inside a graphic frame.
#[derive(Default)]
struct TableState {
    rows: Vec<Vec<String>>,
    row: Option<Vec<String>>,
    cell: Option<CellState>,
}

impl TableState {
    fn start(&mut self, local: &[u8]) {
        match local {
            b"tr" => self.row = Some(Vec::new()),
            b"tc" if self.row.is_some() => self.cell = Some(CellState::default()),
            b"p" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.current = Some(String::new());
                }
            }
            b"br" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.push_text("\n");
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, local: &[u8]) {
        match local {
            b"p" => {
                if let Some(cell) = self.cell.as_mut() {
                    cell.end_paragraph();
                }
            }
            b"tc" => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.push(cell.finish());
                }
            }
            b"tr" => {
                if let Some(row) = self.row.take() {
                    self.rows.push(row);
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.push_text(text);
        }
    }
}

/// Text of one table cell, paragraph by paragraph.
#[derive(Default)]
struct CellState {
    paragraphs: Vec<String>,
    current: Option<String>,
}

impl CellState {
    fn push_text(&mut self, text: &str) {
        self.current.get_or_insert_with(String::new).push_str(text);
    }

    fn end_paragraph(&mut self) {
        if let Some(paragraph) = self.current.take() {
            self.paragraphs.push(paragraph);
        }
    }

    fn finish(mut self) -> String {
        self.end_paragraph();
        self.paragraphs.join("\n")
    }
}

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
