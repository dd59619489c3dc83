use std::path::Path;

use crate::catalogue::domain::entities::{CvCandidate, FileType};
use crate::catalogue::domain::nationality::NationalityRegistry;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Worker name cannot be empty")]
    EmptyName,

    #[error("Age {age} is outside the accepted range {min}-{max}")]
    AgeOutOfRange { age: i32, min: u8, max: u8 },

    #[error("Unknown nationality: '{0}'")]
    UnknownNationality(String),

    #[error("Invalid file name: '{0}'")]
    InvalidFileName(String),

    #[error("File is declared as PDF but its content is not a PDF document")]
    NotAPdf,
}

/// Rules a CV must satisfy before any store is touched.
#[derive(Debug, Clone)]
pub struct AdmissionPolicy {
    pub min_age: u8,
    pub max_age: u8,
    pub max_file_name_len: usize,
    pub nationalities: NationalityRegistry,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            min_age: 18,
            max_age: 65,
            max_file_name_len: 255,
            nationalities: NationalityRegistry::default(),
        }
    }
}

impl AdmissionPolicy {
    pub fn with_nationalities(nationalities: NationalityRegistry) -> Self {
        Self {
            nationalities,
            ..Self::default()
        }
    }

    pub fn admit(&self, candidate: CvCandidate) -> Result<AdmittedCv, ValidationError> {
        let name = candidate.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let age = u8::try_from(candidate.age)
            .ok()
            .filter(|age| (self.min_age..=self.max_age).contains(age))
            .ok_or(ValidationError::AgeOutOfRange {
                age: candidate.age,
                min: self.min_age,
                max: self.max_age,
            })?;

        let nationality = self
            .nationalities
            .get(&candidate.nationality)
            .map(|n| n.code.clone())
            .ok_or_else(|| ValidationError::UnknownNationality(candidate.nationality.clone()))?;

        let file_name = sanitize_basename(&candidate.file.file_name, self.max_file_name_len)?;

        let file_type = FileType::from_mime(&candidate.file.mime_type);
        if file_type == FileType::Pdf && !candidate.file.bytes.starts_with(PDF_MAGIC) {
            return Err(ValidationError::NotAPdf);
        }

        Ok(AdmittedCv {
            name: name.to_string(),
            age,
            nationality,
            file_name,
            file_type,
            mime_type: candidate.file.mime_type,
            bytes: candidate.file.bytes,
        })
    }
}

fn sanitize_basename(file_name: &str, max_len: usize) -> Result<String, ValidationError> {
    let invalid = || ValidationError::InvalidFileName(file_name.to_string());

    let base = Path::new(file_name)
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(invalid)?;

    if base.is_empty() || base.len() > max_len {
        return Err(invalid());
    }

    // Path-like input
    if base != file_name {
        return Err(invalid());
    }

    if base.chars().any(|c| c.is_control()) {
        return Err(invalid());
    }

    Ok(base.to_string())
}

/// A candidate that passed [`AdmissionPolicy::admit`].
///
/// Record stores only accept this type, so none of them can be handed an
/// unchecked CV.
#[derive(Clone, PartialEq, Eq)]
pub struct AdmittedCv {
    name: String,
    age: u8,
    nationality: String,
    file_name: String,
    file_type: FileType,
    mime_type: String,
    bytes: Vec<u8>,
}

impl AdmittedCv {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    /// Normalized nationality code.
    pub fn nationality(&self) -> &str {
        &self.nationality
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Declared MIME type, possibly empty.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for AdmittedCv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmittedCv")
            .field("name", &self.name)
            .field("age", &self.age)
            .field("nationality", &self.nationality)
            .field("file_name", &self.file_name)
            .field("file_type", &self.file_type)
            .field("mime_type", &self.mime_type)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}
