mod common;

use common::{DeckBuilder, TestShape};
use slidecheck_core::Error;
use slidecheck_pptx::PptxParser;
use std::io::{Cursor, Write};

fn parse(deck: &DeckBuilder) -> slidecheck_core::Presentation {
    PptxParser::new()
        .parse(Cursor::new(deck.build()), "deck.pptx")
        .unwrap()
}

#[test]
fn test_slides_numbered_in_deck_order() {
    let deck = DeckBuilder::new()
        .slide(vec![TestShape::Text(vec![vec!["First"]])])
        .slide(vec![TestShape::Text(vec![vec!["Second"]])])
        .slide(vec![TestShape::Text(vec![vec!["Third"]])]);
    let presentation = parse(&deck);

    assert_eq!(presentation.filename, "deck.pptx");
    assert_eq!(presentation.slide_count(), 3);
    for (idx, slide) in presentation.slides.iter().enumerate() {
        assert_eq!(slide.slide_number, idx + 1);
    }
    assert_eq!(presentation.slides[0].text_content, vec!["First"]);
    assert_eq!(presentation.slides[2].text_content, vec!["Third"]);
}

#[test]
fn test_paragraphs_concatenate_runs_and_skip_blanks() {
    let deck = DeckBuilder::new().slide(vec![
        TestShape::Text(vec![vec!["Revenue: ", "$2.1M"], vec!["   "], vec![]]),
        TestShape::Picture,
        TestShape::Text(vec![vec!["  Time saved ", "40%  "]]),
    ]);
    let presentation = parse(&deck);

    assert_eq!(
        presentation.slides[0].text_content,
        vec!["Revenue: $2.1M", "Time saved 40%"]
    );
    assert!(presentation.slides[0].table_content.is_empty());
}

#[test]
fn test_each_table_shape_is_one_entry() {
    let deck = DeckBuilder::new().slide(vec![
        TestShape::Table(vec![vec![" Metric ", "Value"], vec!["Users", " 1,200 "]]),
        TestShape::Text(vec![vec!["Between tables"]]),
        TestShape::Table(vec![vec!["A", "B", "C"], vec!["only one"]]),
    ]);
    let presentation = parse(&deck);
    let slide = &presentation.slides[0];

    assert_eq!(slide.table_content.len(), 2);
    assert_eq!(
        slide.table_content[0],
        vec![vec!["Metric", "Value"], vec!["Users", "1,200"]]
    );
    assert_eq!(slide.table_content[1][0].len(), 3);
    assert_eq!(slide.table_content[1][1], vec!["only one"]);
    assert_eq!(slide.text_content, vec!["Between tables"]);
}

#[test]
fn test_blank_slides_are_kept() {
    let deck = DeckBuilder::new()
        .slide(vec![TestShape::Picture])
        .slide(vec![TestShape::Text(vec![vec!["Content"]])]);
    let presentation = parse(&deck);

    assert_eq!(presentation.slide_count(), 2);
    assert!(presentation.slides[0].is_blank());
    assert_eq!(presentation.slides[1].slide_number, 2);
}

#[test]
fn test_zero_slides() {
    let presentation = parse(&DeckBuilder::new());
    assert!(presentation.is_empty());
}

#[test]
fn test_extraction_is_deterministic() {
    let deck = DeckBuilder::new()
        .slide(vec![TestShape::Text(vec![vec!["A"], vec!["B"]])])
        .slide(vec![TestShape::Table(vec![vec!["1", "2"]])]);

    assert_eq!(parse(&deck).slides, parse(&deck).slides);
}

#[test]
fn test_open_from_path() {
    let deck = DeckBuilder::new().slide(vec![TestShape::Text(vec![vec!["On disk"]])]);
    let mut file = tempfile::Builder::new().suffix(".pptx").tempfile().unwrap();
    file.write_all(&deck.build()).unwrap();

    let presentation = slidecheck_pptx::extract(file.path()).unwrap();
    assert_eq!(presentation.slides[0].text_content, vec!["On disk"]);
    assert!(presentation.filename.ends_with(".pptx"));
}

#[test]
fn test_missing_path_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.pptx");

    let err = slidecheck_pptx::extract(&missing).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("absent.pptx"));
}

#[test]
fn test_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = slidecheck_pptx::extract(dir.path()).unwrap_err();
    assert!(matches!(err, Error::DocumentNotFound(_)));
}

#[test]
fn test_not_a_zip_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"this is not a presentation").unwrap();

    let err = slidecheck_pptx::extract(file.path()).unwrap_err();
    assert!(matches!(err, Error::ZipError(_)));
}
