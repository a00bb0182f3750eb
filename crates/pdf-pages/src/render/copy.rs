//! Copying pages and their object graphs between documents

use crate::constants::REFERENCE_PAGE_DIMENSIONS;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Maps object ids in a source document to their copies in an output document.
///
/// One cache per (source, output) pair: sharing it across pages of the same
/// output keeps shared fonts and images from being duplicated.
pub type ObjectCache = HashMap<ObjectId, ObjectId>;

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Page trees are shallow in practice; this bounds malformed parent loops.
const MAX_TREE_DEPTH: usize = 64;

// =============================================================================
// Page Copy
// =============================================================================

/// Copy one page from `source` into `output` and return the new page's id.
///
/// Inherited attributes are resolved from the source page tree and written
/// onto the copy, so the page renders the same without its old ancestors.
/// The new page's `/Parent` is set to `parent_id`; the caller is responsible
/// for listing it in that node's `/Kids`.
pub fn copy_page(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    parent_id: ObjectId,
    cache: &mut ObjectCache,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;

    // Register the page first so annotations pointing back at it (/P)
    // resolve to the copy instead of being dropped.
    let new_page_id = output.new_object_id();
    cache.insert(page_id, new_page_id);

    let mut new_dict = Dictionary::new();
    for (key, value) in page_dict.iter() {
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }

    for key in INHERITABLE_KEYS {
        if new_dict.has(key) {
            continue;
        }
        if let Some(value) = inherited_attribute(source, page_dict, key) {
            new_dict.set(key, copy_object_deep(output, source, value, cache)?);
        }
    }

    if !new_dict.has(b"MediaBox") {
        new_dict.set("MediaBox", Object::Array(default_media_box()));
    }
    if !new_dict.has(b"Resources") {
        new_dict.set("Resources", Object::Dictionary(Dictionary::new()));
    }

    new_dict.set("Parent", Object::Reference(parent_id));
    output
        .objects
        .insert(new_page_id, Object::Dictionary(new_dict));

    Ok(new_page_id)
}

/// Look up an attribute on the ancestors of a page
fn inherited_attribute<'a>(
    doc: &'a Document,
    page: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = page;
    for _ in 0..MAX_TREE_DEPTH {
        let parent_id = current.get(b"Parent").and_then(Object::as_reference).ok()?;
        let parent = doc.get_dictionary(parent_id).ok()?;
        if let Ok(value) = parent.get(key) {
            return Some(value);
        }
        current = parent;
    }
    None
}

/// MediaBox of the reference page (US Letter)
pub fn default_media_box() -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(REFERENCE_PAGE_DIMENSIONS.0 as i64),
        Object::Integer(REFERENCE_PAGE_DIMENSIONS.1 as i64),
    ]
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Ids are reserved before descending, so reference cycles terminate.
/// References to pages that aren't being copied (e.g. link destinations) and
/// to page tree nodes become `null` rather than dragging in the whole tree.
/// Dangling references also become `null`.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut ObjectCache,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let referenced = match source.get_object(*id) {
                Ok(referenced) => referenced,
                Err(_) => return Ok(Object::Null),
            };
            if is_page_tree_node(referenced) {
                return Ok(Object::Null);
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut ObjectCache,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}

fn is_page_tree_node(obj: &Object) -> bool {
    match obj {
        Object::Dictionary(dict) => matches!(
            dict.get(b"Type"),
            Ok(Object::Name(name)) if name.as_slice() == b"Page" || name.as_slice() == b"Pages"
        ),
        _ => false,
    }
}
