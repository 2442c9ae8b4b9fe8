//! Builds small PPTX packages in memory for tests.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

const SLIDE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

/// A shape to place on a test slide.
pub enum TestShape {
    /// Text box; each inner vec is one paragraph's runs.
    Text(Vec<Vec<&'static str>>),
    /// Table; each inner vec is one row of cell text.
    Table(Vec<Vec<&'static str>>),
    /// Picture with no text.
    Picture,
}

#[derive(Default)]
pub struct DeckBuilder {
    slides: Vec<Vec<TestShape>>,
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slide(mut self, shapes: Vec<TestShape>) -> Self {
        self.slides.push(shapes);
        self
    }

    /// Package bytes. Slide parts are numbered in reverse of deck order so the
    /// slide id list, not the part name, has to decide the order.
    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        let count = self.slides.len();

        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        let mut ids = String::new();
        for (idx, shapes) in self.slides.iter().enumerate() {
            let part_number = count - idx;
            rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
                idx + 10,
                SLIDE_REL,
                part_number
            ));
            ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + idx, idx + 10));

            zip.start_file(format!("ppt/slides/slide{}.xml", part_number), options)
                .unwrap();
            zip.write_all(slide_xml(shapes).as_bytes()).unwrap();
        }
        rels.push_str("</Relationships>");

        zip.start_file("ppt/_rels/presentation.xml.rels", options).unwrap();
        zip.write_all(rels.as_bytes()).unwrap();

        zip.start_file("ppt/presentation.xml", options).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
                ids
            )
            .as_bytes(),
        )
        .unwrap();

        zip.finish().unwrap().into_inner()
    }
}

fn slide_xml(shapes: &[TestShape]) -> String {
    let mut tree = String::new();
    for shape in shapes {
        match shape {
            TestShape::Text(paragraphs) => {
                tree.push_str("<p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"TextBox\"/></p:nvSpPr><p:txBody><a:bodyPr/>");
                for runs in paragraphs {
                    tree.push_str("<a:p>");
                    for run in runs {
                        tree.push_str(&format!("<a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r>", run));
                    }
                    tree.push_str("</a:p>");
                }
                tree.push_str("</p:txBody></p:sp>");
            }
            TestShape::Table(rows) => {
                tree.push_str("<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id=\"3\" name=\"Table\"/></p:nvGraphicFramePr><a:graphic><a:graphicData><a:tbl>");
                for row in rows {
                    tree.push_str("<a:tr h=\"370840\">");
                    for cell in row {
                        tree.push_str(&format!(
                            "<a:tc><a:txBody><a:bodyPr/><a:p><a:r><a:t>{}</a:t></a:r></a:p></a:txBody><a:tcPr/></a:tc>",
                            cell
                        ));
                    }
                    tree.push_str("</a:tr>");
                }
                tree.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");
            }
            TestShape::Picture => {
                tree.push_str("<p:pic><p:nvPicPr><p:cNvPr id=\"4\" name=\"Picture\"/></p:nvPicPr></p:pic>");
            }
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld></p:sld>"#,
        tree
    )
}
