use crate::constants::{
    DEFAULT_FONT_SIZE, DEFAULT_IMAGE_SCALE, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, PDF_FORMAT,
};
use lopdf::Permissions;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page selection (split / extract) configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageSelectionOptions {
    pub mode: PageSelectionMode,

    /// 1-based pages, required by `SpecificPages` and `SingleFile`
    pub pages: Option<Vec<u32>>,

    // Output
    pub output_dir: Option<PathBuf>,
    pub filename_prefix: Option<String>,
    pub output_format: String,
}

impl Default for PageSelectionOptions {
    fn default() -> Self {
        Self {
            mode: PageSelectionMode::AllPages,
            pages: None,
            output_dir: None,
            filename_prefix: None,
            output_format: PDF_FORMAT.to_string(),
        }
    }
}

impl PageSelectionOptions {
    pub fn new(mode: PageSelectionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_pages(mut self, pages: impl Into<Vec<u32>>) -> Self {
        self.pages = Some(pages.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.filename_prefix = Some(prefix.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Validate the parts of the options that don't depend on the source document.
    /// Page ranges are checked by the resolver once the page count is known.
    pub fn validate(&self) -> Result<()> {
        if !self.output_format.eq_ignore_ascii_case(PDF_FORMAT) {
            return Err(PdfToolError::validation(format!(
                "unsupported output format: {}",
                self.output_format
            )));
        }

        if self.mode.requires_pages() && self.pages.as_ref().is_none_or(|p| p.is_empty()) {
            return Err(PdfToolError::validation(format!(
                "mode '{}' requires a page list",
                self.mode
            )));
        }

        Ok(())
    }
}

/// Watermark configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WatermarkOptions {
    pub watermark_type: WatermarkType,
    pub position: WatermarkPosition,
    /// Overlay alpha, in (0, 1]
    pub opacity: f32,

    // Text watermark
    pub text: Option<String>,
    pub font_size: Option<f32>,
    /// `#RRGGBB`
    pub font_color: Option<String>,

    // Image watermark
    pub image_path: Option<PathBuf>,
    /// Percent of the image's native size
    pub image_scale: Option<f32>,

    // Page selection (`AllPages` or `SpecificPages`)
    pub page_selection: PageSelectionMode,
    pub specific_pages: Option<Vec<u32>>,

    // Output
    pub output_file: Option<PathBuf>,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            watermark_type: WatermarkType::Text,
            position: WatermarkPosition::Center,
            opacity: 0.5,
            text: None,
            font_size: None,
            font_color: None,
            image_path: None,
            image_scale: None,
            page_selection: PageSelectionMode::AllPages,
            specific_pages: None,
            output_file: None,
        }
    }
}

impl WatermarkOptions {
    /// Text watermark with default styling
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            watermark_type: WatermarkType::Text,
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Image watermark at native size
    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self {
            watermark_type: WatermarkType::Image,
            image_path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn font_size_or_default(&self) -> f32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn image_scale_or_default(&self) -> f32 {
        self.image_scale.unwrap_or(DEFAULT_IMAGE_SCALE)
    }

    /// Fill colour as normalized RGB; black when no colour is set
    pub fn fill_color(&self) -> Result<[f32; 3]> {
        match self.font_color.as_deref() {
            Some(hex) => parse_hex_color(hex),
            None => Ok([0.0, 0.0, 0.0]),
        }
    }

    /// Validate the options. Touches the filesystem only to check that the
    /// watermark image exists.
    pub fn validate(&self) -> Result<()> {
        if !(self.opacity > 0.0 && self.opacity <= 1.0) {
            return Err(PdfToolError::validation(format!(
                "opacity must be in (0, 1], got {}",
                self.opacity
            )));
        }

        match self.watermark_type {
            WatermarkType::Text => {
                if self.text.as_deref().is_none_or(|t| t.trim().is_empty()) {
                    return Err(PdfToolError::validation(
                        "text watermark requires non-empty text",
                    ));
                }
                let size = self.font_size_or_default();
                if !(size.is_finite() && size > 0.0) {
                    return Err(PdfToolError::validation(format!(
                        "font size must be positive, got {}",
                        size
                    )));
                }
                self.fill_color()?;
            }
            WatermarkType::Image => {
                let path = self.image_path.as_ref().ok_or_else(|| {
                    PdfToolError::validation("image watermark requires an image file")
                })?;
                if !path.is_file() {
                    return Err(PdfToolError::NotFound(path.clone()));
                }
                let scale = self.image_scale_or_default();
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(PdfToolError::validation(format!(
                        "image scale must be positive, got {}",
                        scale
                    )));
                }
            }
        }

        match self.page_selection {
            PageSelectionMode::AllPages => {}
            PageSelectionMode::SpecificPages => {
                if self.specific_pages.as_ref().is_none_or(|p| p.is_empty()) {
                    return Err(PdfToolError::validation(
                        "specific page selection requires a page list",
                    ));
                }
            }
            PageSelectionMode::SingleFile => {
                return Err(PdfToolError::validation(
                    "watermark page selection must be 'all' or 'pages'",
                ));
            }
        }

        Ok(())
    }
}

/// Password protection configuration.
///
/// Every permission defaults to allowed; the owner password falls back to
/// the user password when not given.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PasswordOptions {
    pub user_password: String,
    pub owner_password: Option<String>,

    // Permissions
    pub allow_printing: bool,
    pub allow_degraded_printing: bool,
    pub allow_modification: bool,
    pub allow_copying: bool,
    pub allow_annotation: bool,
    pub allow_filling_forms: bool,
    pub allow_screen_readers: bool,
    pub allow_assembly: bool,

    pub output_file: Option<PathBuf>,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            user_password: String::new(),
            owner_password: None,
            allow_printing: true,
            allow_degraded_printing: true,
            allow_modification: true,
            allow_copying: true,
            allow_annotation: true,
            allow_filling_forms: true,
            allow_screen_readers: true,
            allow_assembly: true,
            output_file: None,
        }
    }
}

impl PasswordOptions {
    pub fn new(user_password: impl Into<String>) -> Self {
        Self {
            user_password: user_password.into(),
            ..Default::default()
        }
    }

    pub fn with_owner_password(mut self, password: impl Into<String>) -> Self {
        self.owner_password = Some(password.into());
        self
    }

    /// Owner password, or the user password when none was given
    pub fn effective_owner_password(&self) -> &str {
        self.owner_password
            .as_deref()
            .unwrap_or(&self.user_password)
    }

    /// Permission flags written into the encryption dictionary
    pub fn permissions(&self) -> Permissions {
        let mut permissions = Permissions::empty();
        let flags = [
            (self.allow_printing, Permissions::PRINTABLE | Permissions::PRINTABLE_IN_HIGH_QUALITY),
            (self.allow_degraded_printing, Permissions::PRINTABLE),
            (self.allow_modification, Permissions::MODIFIABLE),
            (self.allow_copying, Permissions::COPYABLE),
            (self.allow_annotation, Permissions::ANNOTABLE),
            (self.allow_filling_forms, Permissions::FILLABLE),
            (self.allow_screen_readers, Permissions::COPYABLE_FOR_ACCESSIBILITY),
            (self.allow_assembly, Permissions::ASSEMBLABLE),
        ];
        for (allowed, flag) in flags {
            if allowed {
                permissions |= flag;
            }
        }
        permissions
    }

    /// Human-readable list of the main allowed operations
    pub fn describe_permissions(&self) -> String {
        let allowed: Vec<&str> = [
            (self.allow_printing, "printing"),
            (self.allow_copying, "copying"),
            (self.allow_modification, "modification"),
            (self.allow_annotation, "annotation"),
            (self.allow_filling_forms, "form filling"),
        ]
        .into_iter()
        .filter_map(|(allowed, name)| allowed.then_some(name))
        .collect();

        if allowed.is_empty() {
            "none".to_string()
        } else {
            allowed.join(", ")
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_password("user", &self.user_password)?;
        if let Some(owner) = &self.owner_password {
            check_password("owner", owner)?;
        }
        Ok(())
    }
}

fn check_password(role: &str, password: &str) -> Result<()> {
    let len = password.trim().chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(PdfToolError::validation(format!(
            "{} password must be at least {} characters",
            role, MIN_PASSWORD_LEN
        )));
    }
    if password.chars().count() > MAX_PASSWORD_LEN {
        return Err(PdfToolError::validation(format!(
            "{} password must be at most {} characters",
            role, MAX_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Parse `#RRGGBB` (leading `#` optional) into normalized RGB channels
pub fn parse_hex_color(hex: &str) -> Result<[f32; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    let invalid = || PdfToolError::validation(format!("font color must be #RRGGBB, got '{}'", hex));

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| -> Result<f32> {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| invalid())
    };

    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

#[cfg(feature = "serde")]
macro_rules! json_file_io {
    ($ty:ty) => {
        impl $ty {
            /// Load options from JSON file
            pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
                let bytes = tokio::fs::read(path).await?;
                let options = serde_json::from_slice(&bytes).map_err(|e| {
                    PdfToolError::validation(format!("Failed to parse options: {}", e))
                })?;
                Ok(options)
            }

            /// Save options to JSON file
            pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
                let json = serde_json::to_string_pretty(self)?;
                tokio::fs::write(path, json).await?;
                Ok(())
            }
        }
    };
}

#[cfg(feature = "serde")]
json_file_io!(PageSelectionOptions);
#[cfg(feature = "serde")]
json_file_io!(WatermarkOptions);
#[cfg(feature = "serde")]
json_file_io!(PasswordOptions);
