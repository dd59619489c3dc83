use chrono::Utc;

use crate::catalogue::application::ports::incoming::AddCvCommand;
use crate::catalogue::domain::codec;
use crate::catalogue::domain::entities::{CvId, CvRecord, FileContent, FileType, UploadedFile};

/// A byte stream of exactly `len` bytes that passes the PDF magic check.
pub fn sample_pdf(len: usize) -> Vec<u8> {
    let mut bytes = b"%PDF-1.4\n".to_vec();
    bytes.resize(len.max(bytes.len()), b'x');
    bytes
}

pub fn command(name: &str, age: i32, nationality: &str) -> AddCvCommand {
    AddCvCommand {
        name: name.to_string(),
        age,
        nationality: nationality.to_string(),
        file: UploadedFile::new(
            sample_pdf(500),
            "application/pdf",
            format!("{}_cv.pdf", name.to_lowercase()),
        ),
    }
}

/// Ahmed, 30, Kenyan, with a 500-byte PDF.
pub fn ahmed_command() -> AddCvCommand {
    command("Ahmed", 30, "kenya")
}

pub fn sample_record(id: &str, nationality: &str) -> CvRecord {
    CvRecord {
        id: CvId::from(id),
        name: format!("Worker {}", id),
        age: 30,
        nationality: nationality.to_string(),
        file_name: format!("{}.pdf", id),
        file_type: FileType::Pdf,
        file_content: FileContent::Inline(codec::encode(&sample_pdf(32), "application/pdf")),
        upload_date: Utc::now(),
    }
}
