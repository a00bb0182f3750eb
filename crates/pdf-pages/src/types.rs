use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfToolError {
    /// Input that breaks an operation's contract. Raised before any file is written.
    #[error("Validation error: {0}")]
    Validation(String),
    /// Unexpected failure while copying, drawing or writing.
    #[error("Processing error: {0}")]
    Processing(String),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Coarse error category, for collaborators mapping errors onto responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Processing,
    NotFound,
}

impl PdfToolError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Processing(_) => ErrorKind::Processing,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Prefix a processing failure with the operation it happened in.
    /// Validation and not-found errors pass through untouched.
    pub(crate) fn during(self, operation: &str) -> Self {
        match self {
            Self::Processing(msg) => Self::Processing(format!("Failed to {}: {}", operation, msg)),
            other => other,
        }
    }
}

impl From<lopdf::Error> for PdfToolError {
    fn from(err: lopdf::Error) -> Self {
        Self::Processing(format!("PDF error: {}", err))
    }
}

impl From<std::io::Error> for PdfToolError {
    fn from(err: std::io::Error) -> Self {
        Self::Processing(format!("IO error: {}", err))
    }
}

impl From<image::ImageError> for PdfToolError {
    fn from(err: image::ImageError) -> Self {
        Self::Processing(format!("Image error: {}", err))
    }
}

impl From<tokio::task::JoinError> for PdfToolError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Processing(format!("Task join error: {}", err))
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for PdfToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Processing(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, PdfToolError>;

/// How pages are selected and how the selection is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PageSelectionMode {
    /// Every page, one output file per page
    #[default]
    AllPages,
    /// An explicit page list, one output file per page
    SpecificPages,
    /// An explicit page list, merged into one output file
    SingleFile,
}

impl PageSelectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PageSelectionMode::AllPages => "all",
            PageSelectionMode::SpecificPages => "pages",
            PageSelectionMode::SingleFile => "single",
        }
    }

    /// Whether this mode needs an explicit page list
    pub fn requires_pages(self) -> bool {
        !matches!(self, PageSelectionMode::AllPages)
    }
}

impl FromStr for PageSelectionMode {
    type Err = PdfToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "all_pages" => Ok(PageSelectionMode::AllPages),
            "pages" | "specific_pages" => Ok(PageSelectionMode::SpecificPages),
            "single" | "single_file" => Ok(PageSelectionMode::SingleFile),
            other => Err(PdfToolError::validation(format!(
                "unsupported mode: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for PageSelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of overlay drawn by a watermark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WatermarkType {
    #[default]
    Text,
    Image,
}

impl WatermarkType {
    pub fn as_str(self) -> &'static str {
        match self {
            WatermarkType::Text => "text",
            WatermarkType::Image => "image",
        }
    }
}

impl fmt::Display for WatermarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal band of the 3×3 anchor grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Top,
    Center,
    Bottom,
}

/// Vertical band of the 3×3 anchor grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Center,
    Right,
}

/// Anchor position of a watermark, numbered 1-9 row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WatermarkPosition {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl WatermarkPosition {
    pub const ALL: [WatermarkPosition; 9] = [
        WatermarkPosition::TopLeft,
        WatermarkPosition::TopCenter,
        WatermarkPosition::TopRight,
        WatermarkPosition::CenterLeft,
        WatermarkPosition::Center,
        WatermarkPosition::CenterRight,
        WatermarkPosition::BottomLeft,
        WatermarkPosition::BottomCenter,
        WatermarkPosition::BottomRight,
    ];

    /// 1-based grid number (1 = top left, 9 = bottom right)
    pub fn index(self) -> u8 {
        match self {
            WatermarkPosition::TopLeft => 1,
            WatermarkPosition::TopCenter => 2,
            WatermarkPosition::TopRight => 3,
            WatermarkPosition::CenterLeft => 4,
            WatermarkPosition::Center => 5,
            WatermarkPosition::CenterRight => 6,
            WatermarkPosition::BottomLeft => 7,
            WatermarkPosition::BottomCenter => 8,
            WatermarkPosition::BottomRight => 9,
        }
    }

    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            1..=9 => Ok(Self::ALL[index as usize - 1]),
            _ => Err(PdfToolError::validation(format!(
                "watermark position must be between 1 and 9, got {}",
                index
            ))),
        }
    }

    pub fn row(self) -> Row {
        match self {
            WatermarkPosition::TopLeft
            | WatermarkPosition::TopCenter
            | WatermarkPosition::TopRight => Row::Top,
            WatermarkPosition::CenterLeft
            | WatermarkPosition::Center
            | WatermarkPosition::CenterRight => Row::Center,
            WatermarkPosition::BottomLeft
            | WatermarkPosition::BottomCenter
            | WatermarkPosition::BottomRight => Row::Bottom,
        }
    }

    pub fn column(self) -> Column {
        match self {
            WatermarkPosition::TopLeft
            | WatermarkPosition::CenterLeft
            | WatermarkPosition::BottomLeft => Column::Left,
            WatermarkPosition::TopCenter
            | WatermarkPosition::Center
            | WatermarkPosition::BottomCenter => Column::Center,
            WatermarkPosition::TopRight
            | WatermarkPosition::CenterRight
            | WatermarkPosition::BottomRight => Column::Right,
        }
    }
}

impl FromStr for WatermarkPosition {
    type Err = PdfToolError;

    /// Accepts the grid number ("5") or a kebab/snake name ("top-left", "center")
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<u8>() {
            return Self::from_index(index);
        }
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "top-left" => Ok(WatermarkPosition::TopLeft),
            "top-center" | "top" => Ok(WatermarkPosition::TopCenter),
            "top-right" => Ok(WatermarkPosition::TopRight),
            "center-left" | "left" => Ok(WatermarkPosition::CenterLeft),
            "center" => Ok(WatermarkPosition::Center),
            "center-right" | "right" => Ok(WatermarkPosition::CenterRight),
            "bottom-left" => Ok(WatermarkPosition::BottomLeft),
            "bottom-center" | "bottom" => Ok(WatermarkPosition::BottomCenter),
            "bottom-right" => Ok(WatermarkPosition::BottomRight),
            other => Err(PdfToolError::validation(format!(
                "unknown watermark position: {}",
                other
            ))),
        }
    }
}
