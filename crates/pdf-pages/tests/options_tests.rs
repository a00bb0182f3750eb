use pdf_pages::*;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::NamedTempFile;

// ============================================================================
// Page lists
// ============================================================================

#[test]
fn test_parse_page_list() {
    assert_eq!(parse_page_list("1,3,5-8").unwrap(), vec![1, 3, 5, 6, 7, 8]);
    assert_eq!(parse_page_list(" 4 , 2, 4 ").unwrap(), vec![2, 4]);
    assert_eq!(parse_page_list("3-3,").unwrap(), vec![3]);
}

#[test]
fn test_parse_page_list_errors() {
    for input in ["", " , ", "a", "1,x", "5-2", "1-", "-3"] {
        assert!(
            matches!(parse_page_list(input), Err(PdfToolError::Validation(_))),
            "accepted '{}'",
            input
        );
    }
}

#[test]
fn test_parse_page_list_caps_page_numbers() {
    // Would otherwise expand to four billion entries
    match parse_page_list("1-4000000000") {
        Err(PdfToolError::Validation(msg)) => assert!(msg.contains("exceeds the maximum")),
        other => panic!("Expected validation error, got {:?}", other),
    }
    assert!(matches!(
        parse_page_list("100001"),
        Err(PdfToolError::Validation(_))
    ));

    let edge = parse_page_list("99999-100000").unwrap();
    assert_eq!(edge, vec![99_999, pdf_pages::constants::MAX_PAGE_NUMBER]);
}

// ============================================================================
// Enums
// ============================================================================

#[test]
fn test_mode_parsing() {
    assert_eq!("all".parse::<PageSelectionMode>().unwrap(), PageSelectionMode::AllPages);
    assert_eq!("pages".parse::<PageSelectionMode>().unwrap(), PageSelectionMode::SpecificPages);
    assert_eq!("single_file".parse::<PageSelectionMode>().unwrap(), PageSelectionMode::SingleFile);
    assert!("odd".parse::<PageSelectionMode>().is_err());
    assert!(PageSelectionMode::SingleFile.requires_pages());
    assert!(!PageSelectionMode::AllPages.requires_pages());
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_watermark_defaults() {
    let options = WatermarkOptions::text("DRAFT");
    assert_eq!(options.position, WatermarkPosition::Center);
    assert_eq!(options.opacity, 0.5);
    assert_eq!(options.font_size_or_default(), 36.0);
    assert_eq!(options.fill_color().unwrap(), [0.0, 0.0, 0.0]);
    assert!(options.validate().is_ok());

    let image = WatermarkOptions::image("logo.png");
    assert_eq!(image.watermark_type, WatermarkType::Image);
    assert_eq!(image.image_scale_or_default(), 100.0);
}

#[test]
fn test_hex_colors() {
    assert_eq!(parse_hex_color("#FFFFFF").unwrap(), [1.0, 1.0, 1.0]);
    assert_eq!(parse_hex_color("ff0000").unwrap(), [1.0, 0.0, 0.0]);
    assert!(parse_hex_color("#FFF").is_err());
    assert!(parse_hex_color("#GG0000").is_err());
}

#[test]
fn test_opacity_bounds() {
    let mut options = WatermarkOptions::text("X");
    for ok in [0.01, 0.5, 1.0] {
        options.opacity = ok;
        assert!(options.validate().is_ok(), "rejected {}", ok);
    }
    for bad in [0.0, -0.5, 1.5, f32::NAN] {
        options.opacity = bad;
        assert!(options.validate().is_err(), "accepted {}", bad);
    }
}

#[test]
fn test_selection_options_validation() {
    assert!(PageSelectionOptions::default().validate().is_ok());
    assert!(
        PageSelectionOptions::new(PageSelectionMode::SpecificPages)
            .validate()
            .is_err()
    );
    assert!(
        PageSelectionOptions::new(PageSelectionMode::SingleFile)
            .with_pages(vec![1])
            .validate()
            .is_ok()
    );
}

#[tokio::test]
async fn test_options_save_load() {
    let temp = NamedTempFile::new().unwrap();

    let mut options = WatermarkOptions::text("CONFIDENTIAL");
    options.position = WatermarkPosition::BottomLeft;
    options.font_color = Some("#336699".to_string());
    options.page_selection = PageSelectionMode::SpecificPages;
    options.specific_pages = Some(vec![1, 4]);

    options.save(temp.path()).await.unwrap();
    let loaded = WatermarkOptions::load(temp.path()).await.unwrap();
    assert_eq!(loaded, options);

    let json = std::fs::read_to_string(temp.path()).unwrap();
    assert!(json.contains("\"bottom_left\""));
    assert!(json.contains("\"specific_pages\""));
}

#[tokio::test]
async fn test_partial_options_use_defaults() {
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), r#"{ "mode": "single_file", "pages": [2, 3] }"#).unwrap();

    let options = PageSelectionOptions::load(temp.path()).await.unwrap();
    assert_eq!(options.mode, PageSelectionMode::SingleFile);
    assert_eq!(options.pages, Some(vec![2, 3]));
    assert_eq!(options.output_format, "pdf");
}

#[tokio::test]
async fn test_partial_password_options_allow_everything() {
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(
        temp.path(),
        r#"{ "user_password": "letmein", "allow_copying": false }"#,
    )
    .unwrap();

    let options = PasswordOptions::load(temp.path()).await.unwrap();
    assert_eq!(options.effective_owner_password(), "letmein");
    assert!(!options.allow_copying);
    assert!(options.allow_printing);
    assert!(options.validate().is_ok());
}

#[tokio::test]
async fn test_load_invalid_options() {
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), "not json").unwrap();

    let result = PageSelectionOptions::load(temp.path()).await;
    match result {
        Err(PdfToolError::Validation(msg)) => assert!(msg.contains("Failed to parse options")),
        other => panic!("Expected validation error, got {:?}", other),
    }
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn test_settings_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.max_file_size, 100 * 1024 * 1024);
    assert!(settings.is_allowed_extension("a.pdf".as_ref()));
    assert!(settings.is_allowed_extension("A.PDF".as_ref()));
    assert!(!settings.is_allowed_extension("a.txt".as_ref()));
    assert!(!settings.is_allowed_extension("pdf".as_ref()));
}

#[test]
fn test_settings_overrides() {
    let vars: HashMap<&str, &str> =
        HashMap::from([(ENV_TEMP_DIR, "/var/tmp/pdf"), (ENV_MAX_FILE_SIZE, "2048")]);

    let settings = Settings::default()
        .with_overrides_from(|key| vars.get(key).map(|v| v.to_string()))
        .unwrap();
    assert_eq!(settings.temp_dir, PathBuf::from("/var/tmp/pdf"));
    assert_eq!(settings.max_file_size, 2048);
}

#[test]
fn test_settings_bad_size_override() {
    let result = Settings::default()
        .with_overrides_from(|key| (key == ENV_MAX_FILE_SIZE).then(|| "lots".to_string()));
    assert!(matches!(result, Err(PdfToolError::Validation(_))));
}

#[tokio::test]
async fn test_settings_save_load() {
    let temp = NamedTempFile::new().unwrap();
    let settings = Settings {
        max_file_size: 1024,
        allowed_extensions: vec![".pdf".to_string(), ".PDF".to_string()],
        ..Settings::default()
    }
    .with_temp_dir("/srv/pdf");

    settings.save(temp.path()).await.unwrap();
    let loaded = Settings::load(temp.path()).await.unwrap();
    assert_eq!(loaded, settings);
}

// ============================================================================
// Results
// ============================================================================

#[test]
fn test_operation_result() {
    let result = OperationResult::success("done", vec!["a.pdf".into(), "b.pdf".into()])
        .with_details("Pages: 1, 2");

    assert!(result.is_success());
    assert_eq!(result.message(), "done");
    assert_eq!(result.details(), Some("Pages: 1, 2"));
    assert!(result.has_multiple_outputs());
    assert_eq!(result.output_files().len(), 2);

    let single = OperationResult::success("done", vec!["a.pdf".into()]);
    assert!(!single.has_multiple_outputs());
}
