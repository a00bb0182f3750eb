#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

/// Content stream of page `n` in a test document
pub fn page_marker(n: usize) -> Vec<u8> {
    format!("BT /F1 12 Tf 72 720 Td (Page {}) Tj ET", n).into_bytes()
}

/// Build a letter-sized document whose pages can be told apart by content
pub fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for n in 1..=num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), page_marker(n)));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Two pages that define neither MediaBox nor Resources and share a font
/// through the `/Pages` node, plus the id of that font.
pub fn create_inheriting_pdf() -> (Document, lopdf::ObjectId) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let kids = (1..=2)
        .map(|n| {
            let content_id = doc.add_object(Stream::new(Dictionary::new(), page_marker(n)));
            let page_id = doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                ("Contents", Object::Reference(content_id)),
            ]));
            Object::Reference(page_id)
        })
        .collect();

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(2)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(300),
                Object::Integer(400),
            ]),
        ),
        (
            "Resources",
            Object::Dictionary(Dictionary::from_iter(vec![(
                "Font",
                Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
            )])),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    (doc, font_id)
}

/// A `num_pages` test document whose pages all point at one `/Resources` object
pub fn create_shared_resources_pdf(num_pages: usize) -> Document {
    let mut doc = create_test_pdf(num_pages);
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
    )]));

    let page_ids: Vec<_> = doc.get_pages().values().copied().collect();
    for page_id in page_ids {
        doc.get_dictionary_mut(page_id)
            .unwrap()
            .set("Resources", Object::Reference(resources_id));
    }
    doc
}

/// Write a `num_pages` test document to `dir/name`
pub fn write_test_pdf(dir: &Path, name: &str, num_pages: usize) -> PathBuf {
    let path = dir.join(name);
    let mut doc = create_test_pdf(num_pages);
    doc.save(&path).unwrap();
    path
}

/// Decoded content of every page of the PDF at `path`, in page order
pub fn page_contents(path: &Path) -> Vec<Vec<u8>> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| doc.get_page_content(id).unwrap())
        .collect()
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
