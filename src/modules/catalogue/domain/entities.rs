use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a stored CV.
///
/// Local storage mints its own ids, database-backed stores hand back the
/// generated UUID as text. Either way the value is opaque to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CvId(String);

impl CvId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interprets the id as a database UUID. Ids minted by local storage are
    /// not UUIDs and yield `None`.
    pub fn as_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.0).ok()
    }
}

impl fmt::Display for CvId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CvId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CvId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<Uuid> for CvId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Image,
}

impl FileType {
    /// `Pdf` iff the MIME type mentions "pdf".
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.to_ascii_lowercase().contains("pdf") {
            FileType::Pdf
        } else {
            FileType::Image
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Image => "image",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pdf" => Some(FileType::Pdf),
            "image" => Some(FileType::Image),
            _ => None,
        }
    }

    /// Extension used when a download has no usable file name.
    pub fn fallback_extension(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Image => "jpg",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the bytes of a CV live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FileContent {
    /// Encoded payload stored next to the metadata (a `data:` URL).
    Inline(String),
    /// Path of an object held in external object storage.
    Locator(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvRecord {
    pub id: CvId,
    pub name: String,
    pub age: u8,
    pub nationality: String,
    pub file_name: String,
    pub file_type: FileType,
    pub file_content: FileContent,
    pub upload_date: DateTime<Utc>,
}

impl CvRecord {
    /// Name offered to the browser when the CV is downloaded.
    pub fn suggested_file_name(&self) -> String {
        let file_name = self.file_name.trim();
        if !file_name.is_empty() {
            return file_name.to_string();
        }
        format!("{}_CV.{}", self.name, self.file_type.fallback_extension())
    }

    /// MIME type to serve the file with when the store did not keep one.
    pub fn served_mime_type(&self) -> &'static str {
        mime_for(self.file_type, &self.file_name)
    }
}

/// A file as handed over by the upload form.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}

impl UploadedFile {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }
}

// Payloads can be megabytes; never dump them into logs or panics.
impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .field("mime_type", &self.mime_type)
            .field("file_name", &self.file_name)
            .finish()
    }
}

/// Everything the operator supplies when adding a CV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvCandidate {
    pub name: String,
    pub age: i32,
    pub nationality: String,
    pub file: UploadedFile,
}

/// Bytes ready to be saved by the browser.
#[derive(Clone, PartialEq, Eq)]
pub struct DownloadableFile {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub suggested_file_name: String,
}

impl fmt::Debug for DownloadableFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadableFile")
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .field("mime_type", &self.mime_type)
            .field("suggested_file_name", &self.suggested_file_name)
            .finish()
    }
}

/// Best guess of a MIME type from the stored file type and name.
pub fn mime_for(file_type: FileType, file_name: &str) -> &'static str {
    if file_type == FileType::Pdf {
        return "application/pdf";
    }

    let ext = std::path::Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, file_name: &str, file_type: FileType) -> CvRecord {
        CvRecord {
            id: CvId::from("1"),
            name: name.to_string(),
            age: 30,
            nationality: "kenya".to_string(),
            file_name: file_name.to_string(),
            file_type,
            file_content: FileContent::Inline("data:application/pdf;base64,".to_string()),
            upload_date: Utc::now(),
        }
    }

    #[test]
    fn test_file_type_from_mime() {
        assert_eq!(FileType::from_mime("application/pdf"), FileType::Pdf);
        assert_eq!(FileType::from_mime("application/x-PDF"), FileType::Pdf);
        assert_eq!(FileType::from_mime("image/png"), FileType::Image);
        assert_eq!(FileType::from_mime(""), FileType::Image);
    }

    #[test]
    fn test_file_type_parse_matches_as_str() {
        for ft in [FileType::Pdf, FileType::Image] {
            assert_eq!(FileType::parse(ft.as_str()), Some(ft));
        }
        assert_eq!(FileType::parse("doc"), None);
    }

    #[test]
    fn test_file_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FileType::Pdf).unwrap(), "\"pdf\"");
        assert_eq!(serde_json::to_string(&FileType::Image).unwrap(), "\"image\"");
    }

    #[test]
    fn test_cv_id_as_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(CvId::from(uuid).as_uuid(), Some(uuid));
        assert_eq!(CvId::from("1718000000000abc123xyz").as_uuid(), None);
    }

    #[test]
    fn test_suggested_file_name_prefers_original_name() {
        let cv = record("Ahmed", "ahmed-cv.pdf", FileType::Pdf);
        assert_eq!(cv.suggested_file_name(), "ahmed-cv.pdf");
    }

    #[test]
    fn test_suggested_file_name_falls_back_to_worker_name() {
        let cv = record("Ahmed", "  ", FileType::Pdf);
        assert_eq!(cv.suggested_file_name(), "Ahmed_CV.pdf");

        let cv = record("Grace", "", FileType::Image);
        assert_eq!(cv.suggested_file_name(), "Grace_CV.jpg");
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(FileType::Pdf, "x.png"), "application/pdf");
        assert_eq!(mime_for(FileType::Image, "photo.JPG"), "image/jpeg");
        assert_eq!(mime_for(FileType::Image, "scan.png"), "image/png");
        assert_eq!(mime_for(FileType::Image, "noext"), "application/octet-stream");
    }

    #[test]
    fn test_uploaded_file_debug_hides_bytes() {
        let file = UploadedFile::new(vec![1, 2, 3], "image/png", "a.png");
        let rendered = format!("{:?}", file);
        assert!(rendered.contains("<3 bytes>"));
        assert!(!rendered.contains("[1, 2, 3]"));
    }
}
