mod common;

use common::*;
use lopdf::{Document, Object, Permissions};
use pdf_pages::*;
use std::path::Path;
use tempfile::tempdir;

fn permission_bits(doc: &Document) -> i64 {
    doc.get_encrypted()
        .unwrap()
        .get(b"P")
        .and_then(Object::as_i64)
        .unwrap()
}

fn decrypted_contents(path: &Path, password: &str) -> Vec<Vec<u8>> {
    let mut doc = Document::load(path).unwrap();
    doc.decrypt(password).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| doc.get_page_content(id).unwrap())
        .collect()
}

#[test]
fn test_protect_encrypts_output() {
    let dir = tempdir().unwrap();
    let source = write_test_pdf(dir.path(), "secret.pdf", 3);
    let output = dir.path().join("locked.pdf");

    let mut options = PasswordOptions::new("user1234").with_owner_password("owner5678");
    options.output_file = Some(output.clone());

    let result = PdfOperations::default().protect(&source, &options).unwrap();
    assert_eq!(result.message(), "PDF password protection applied");
    assert_eq!(result.output_files(), &[output.clone()]);

    let doc = Document::load(&output).unwrap();
    assert!(doc.is_encrypted());
    assert!(doc.authenticate_user_password("user1234").is_ok());
    assert!(doc.authenticate_owner_password("owner5678").is_ok());
    assert!(doc.authenticate_password("wrong-password").is_err());
}

#[test]
fn test_protect_preserves_pages() {
    let dir = tempdir().unwrap();
    let source = write_test_pdf(dir.path(), "report.pdf", 2);
    let output = dir.path().join("report-locked.pdf");

    let mut options = PasswordOptions::new("open-sesame");
    options.output_file = Some(output.clone());
    PdfOperations::default().protect(&source, &options).unwrap();

    let contents = decrypted_contents(&output, "open-sesame");
    assert_eq!(contents.len(), 2);
    assert_eq!(contents[0], page_marker(1));
    assert_eq!(contents[1], page_marker(2));
}

#[test]
fn test_protect_owner_defaults_to_user_password() {
    let dir = tempdir().unwrap();
    let source = write_test_pdf(dir.path(), "a.pdf", 1);
    let output = dir.path().join("a-locked.pdf");

    let mut options = PasswordOptions::new("samepass");
    options.output_file = Some(output.clone());
    PdfOperations::default().protect(&source, &options).unwrap();

    let doc = Document::load(&output).unwrap();
    assert!(doc.authenticate_owner_password("samepass").is_ok());
}

#[test]
fn test_protect_writes_permission_flags() {
    let dir = tempdir().unwrap();
    let source = write_test_pdf(dir.path(), "flags.pdf", 1);
    let output = dir.path().join("flags-locked.pdf");

    let mut options = PasswordOptions::new("user1234");
    options.allow_copying = false;
    options.allow_modification = false;
    options.output_file = Some(output.clone());

    let result = PdfOperations::default().protect(&source, &options).unwrap();
    assert_eq!(
        result.details(),
        Some("User password set, allowed operations: printing, annotation, form filling")
    );

    let p = permission_bits(&Document::load(&output).unwrap());
    assert_eq!(p & (1 << 4), 0, "copying should be denied");
    assert_eq!(p & (1 << 3), 0, "modification should be denied");
    assert_ne!(p & (1 << 2), 0, "printing should be allowed");
    assert_ne!(p & (1 << 5), 0, "annotation should be allowed");
}

#[test]
fn test_protect_default_output_name() {
    let dir = tempdir().unwrap();
    let source = write_test_pdf(dir.path(), "plain.pdf", 1);
    let temp = tempdir().unwrap();
    let settings = Settings::default().with_temp_dir(temp.path());

    let result = PdfOperations::new(settings)
        .protect(&source, &PasswordOptions::new("user1234"))
        .unwrap();

    let output = &result.output_files()[0];
    assert_eq!(output.parent(), Some(temp.path()));
    let name = output.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("protected_"), "unexpected name {}", name);
    assert!(name.ends_with(".pdf"));
    assert!(output.exists());
}

#[test]
fn test_protect_leaves_source_untouched() {
    let dir = tempdir().unwrap();
    let source = write_test_pdf(dir.path(), "original.pdf", 2);
    let before = std::fs::read(&source).unwrap();

    let mut options = PasswordOptions::new("user1234");
    options.output_file = Some(dir.path().join("copy.pdf"));
    PdfOperations::default().protect(&source, &options).unwrap();

    assert_eq!(std::fs::read(&source).unwrap(), before);
    assert!(!Document::load(&source).unwrap().is_encrypted());
}

#[test]
fn test_protect_short_password() {
    let dir = tempdir().unwrap();
    let source = write_test_pdf(dir.path(), "short.pdf", 1);
    let output = dir.path().join("never.pdf");

    let mut options = PasswordOptions::new("abc");
    options.output_file = Some(output.clone());

    match PdfOperations::default().protect(&source, &options) {
        Err(PdfToolError::Validation(msg)) => assert!(msg.contains("at least 4")),
        other => panic!("Expected validation error, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_protect_short_owner_password() {
    let options = PasswordOptions::new("user1234").with_owner_password(" ab ");
    match options.validate() {
        Err(PdfToolError::Validation(msg)) => assert!(msg.starts_with("owner password")),
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
fn test_protect_missing_source() {
    let result = PdfOperations::default()
        .protect("missing/file.pdf", &PasswordOptions::new("user1234"));
    assert!(matches!(result, Err(PdfToolError::NotFound(_))));
}

#[test]
fn test_password_permissions() {
    let options = PasswordOptions::new("user1234");
    assert_eq!(options.permissions(), expected_all());
    assert_eq!(
        options.describe_permissions(),
        "printing, copying, modification, annotation, form filling"
    );

    let locked = PasswordOptions {
        allow_printing: false,
        allow_degraded_printing: false,
        allow_modification: false,
        allow_copying: false,
        allow_annotation: false,
        allow_filling_forms: false,
        allow_screen_readers: false,
        allow_assembly: false,
        ..PasswordOptions::new("user1234")
    };
    assert!(locked.permissions().is_empty());
    assert_eq!(locked.describe_permissions(), "none");

    // Degraded printing alone leaves out the high quality bit
    let degraded = PasswordOptions {
        allow_printing: false,
        ..PasswordOptions::new("user1234")
    };
    assert!(degraded.permissions().contains(Permissions::PRINTABLE));
    assert!(!degraded.permissions().contains(Permissions::PRINTABLE_IN_HIGH_QUALITY));
}

fn expected_all() -> Permissions {
    Permissions::PRINTABLE
        | Permissions::MODIFIABLE
        | Permissions::COPYABLE
        | Permissions::ANNOTABLE
        | Permissions::FILLABLE
        | Permissions::COPYABLE_FOR_ACCESSIBILITY
        | Permissions::ASSEMBLABLE
        | Permissions::PRINTABLE_IN_HIGH_QUALITY
}

#[tokio::test]
async fn test_protect_pdf_async() {
    let dir = tempdir().unwrap();
    let source = write_test_pdf(dir.path(), "async.pdf", 2);
    let output = dir.path().join("async-locked.pdf");

    let mut options = PasswordOptions::new("user1234");
    options.output_file = Some(output.clone());

    let result = protect_pdf(Settings::default(), source, options).await.unwrap();
    assert!(result.is_success());
    assert!(Document::load(&output).unwrap().is_encrypted());
}

#[tokio::test]
async fn test_protect_pdf_async_rejects_short_password() {
    let result = protect_pdf(
        Settings::default(),
        "missing.pdf".into(),
        PasswordOptions::new("no"),
    )
    .await;
    assert!(matches!(result, Err(PdfToolError::Validation(_))));
}
