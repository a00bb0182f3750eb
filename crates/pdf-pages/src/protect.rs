//! Password protection

use crate::constants::OUTPUT_PDF_VERSION;
use crate::document::SourceDocument;
use crate::options::PasswordOptions;
use crate::types::*;
use lopdf::encryption::crypt_filters::{Aes128CryptFilter, CryptFilter};
use lopdf::{Document, EncryptionState, EncryptionVersion, Object, StringFormat};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

const CRYPT_FILTER_NAME: &[u8] = b"StdCF";

/// Encrypt a copy of `source` with the standard security handler (AES-128).
///
/// Pages and metadata are kept as they are. Streams are compressed here,
/// before encryption; [`write_pdf`](crate::render::write_pdf) leaves
/// encrypted documents untouched.
pub fn protect_document(source: &SourceDocument, options: &PasswordOptions) -> Result<Document> {
    options.validate()?;

    let mut doc = source.document().clone();
    doc.version = OUTPUT_PDF_VERSION.to_string();
    ensure_file_id(&mut doc);
    doc.compress();

    let crypt_filter: Arc<dyn CryptFilter> = Arc::new(Aes128CryptFilter);
    let version = EncryptionVersion::V4 {
        document: &doc,
        encrypt_metadata: true,
        crypt_filters: BTreeMap::from([(CRYPT_FILTER_NAME.to_vec(), crypt_filter)]),
        stream_filter: CRYPT_FILTER_NAME.to_vec(),
        string_filter: CRYPT_FILTER_NAME.to_vec(),
        owner_password: options.effective_owner_password(),
        user_password: &options.user_password,
        permissions: options.permissions(),
    };
    let state = EncryptionState::try_from(version)?;
    doc.encrypt(&state)?;

    log::debug!(
        "Encrypted {} ({} pages)",
        source.path().display(),
        source.page_count()
    );

    Ok(doc)
}

/// The file key is derived from the first `/ID` entry, so one must exist
fn ensure_file_id(doc: &mut Document) {
    if doc.trailer.has(b"ID") {
        return;
    }
    let id = Uuid::new_v4().as_bytes().to_vec();
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(id.clone(), StringFormat::Hexadecimal),
            Object::String(id, StringFormat::Hexadecimal),
        ]),
    );
}
