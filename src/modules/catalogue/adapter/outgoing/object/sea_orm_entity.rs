use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalogue::application::ports::outgoing::RecordStoreError;
use crate::catalogue::domain::entities::{CvId, CvRecord, FileContent, FileType};

// Metadata row; the file itself lives in the bucket at `file_path`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cvs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub age: i32,
    pub nationality: String,
    pub file_name: String,
    pub file_type: String,
    pub file_path: String,
    pub upload_date: DateTimeWithTimeZone,
}

impl Model {
    pub fn to_domain(&self) -> Result<CvRecord, RecordStoreError> {
        let age = u8::try_from(self.age).map_err(|_| {
            RecordStoreError::Decode(format!("row {} has invalid age {}", self.id, self.age))
        })?;
        let file_type = FileType::parse(&self.file_type).ok_or_else(|| {
            RecordStoreError::Decode(format!(
                "row {} has unknown file_type '{}'",
                self.id, self.file_type
            ))
        })?;

        Ok(CvRecord {
            id: CvId::from(self.id),
            name: self.name.clone(),
            age,
            nationality: self.nationality.clone(),
            file_name: self.file_name.clone(),
            file_type,
            file_content: FileContent::Locator(self.file_path.clone()),
            upload_date: self.upload_date.with_timezone(&chrono::Utc),
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
