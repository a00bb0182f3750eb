//! Page content streams and resource dictionaries

use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// References to the content streams of a page, in drawing order.
///
/// `/Contents` may be a single stream reference, an array of references, or
/// a reference to such an array.
pub fn content_refs(doc: &Document, page_dict: &Dictionary) -> Vec<Object> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Vec::new(), // No content = blank page
    };

    match contents {
        Object::Reference(id) => match doc.get_object(*id) {
            Ok(Object::Array(arr)) => arr.clone(),
            Ok(_) => vec![Object::Reference(*id)],
            Err(_) => Vec::new(),
        },
        Object::Array(arr) => arr.clone(),
        _ => Vec::new(),
    }
}

/// Wrap a page's existing content in `prefix`/`suffix` streams.
///
/// The original streams are kept by reference and never rewritten, so a
/// `q`/`Q` pair around them isolates their graphics state from whatever the
/// suffix draws.
pub fn append_content(
    doc: &mut Document,
    page_id: ObjectId,
    prefix: &[u8],
    suffix: &[u8],
) -> Result<()> {
    let existing = content_refs(doc, doc.get_dictionary(page_id)?);

    let prefix_id = doc.add_object(Stream::new(Dictionary::new(), prefix.to_vec()));
    let suffix_id = doc.add_object(Stream::new(Dictionary::new(), suffix.to_vec()));

    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(prefix_id));
    contents.extend(existing);
    contents.push(Object::Reference(suffix_id));

    doc.get_dictionary_mut(page_id)?
        .set("Contents", Object::Array(contents));
    Ok(())
}

/// First name `{stem}{n}` not already used in the page's `category`
/// resources (e.g. `XObject`).
pub fn unused_resource_name(
    doc: &Document,
    page_id: ObjectId,
    category: &[u8],
    stem: &str,
) -> Result<String> {
    let resources = page_resources(doc, page_id)?;
    let used = resources
        .get(category)
        .ok()
        .and_then(|obj| resolve_dictionary(doc, obj));

    let name = (0..)
        .map(|n| format!("{}{}", stem, n))
        .find(|candidate| {
            used.as_ref()
                .is_none_or(|dict| !dict.has(candidate.as_bytes()))
        })
        .unwrap_or_else(|| stem.to_string());
    Ok(name)
}

/// Register `object_id` under `/Resources/{category}/{name}` on a page.
///
/// Resources shared through a reference are copied inline first, so other
/// pages pointing at the same dictionary stay untouched.
pub fn add_page_resource(
    doc: &mut Document,
    page_id: ObjectId,
    category: &[u8],
    name: &str,
    object_id: ObjectId,
) -> Result<()> {
    let mut resources = page_resources(doc, page_id)?;
    let mut entries = resources
        .get(category)
        .ok()
        .and_then(|obj| resolve_dictionary(doc, obj))
        .unwrap_or_else(Dictionary::new);

    entries.set(name.as_bytes(), Object::Reference(object_id));
    resources.set(category, Object::Dictionary(entries));

    doc.get_dictionary_mut(page_id)?
        .set("Resources", Object::Dictionary(resources));
    Ok(())
}

/// Owned copy of a page's resource dictionary (empty when absent)
fn page_resources(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let page_dict = doc.get_dictionary(page_id)?;
    Ok(page_dict
        .get(b"Resources")
        .ok()
        .and_then(|obj| resolve_dictionary(doc, obj))
        .unwrap_or_else(Dictionary::new))
}

fn resolve_dictionary(doc: &Document, obj: &Object) -> Option<Dictionary> {
    match obj {
        Object::Dictionary(dict) => Some(dict.clone()),
        Object::Reference(id) => doc.get_dictionary(*id).ok().cloned(),
        _ => None,
    }
}
