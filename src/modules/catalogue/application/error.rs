use crate::catalogue::application::notice::{CatalogueAction, Notice};
use crate::catalogue::application::ports::outgoing::RecordStoreError;
use crate::catalogue::domain::entities::CvId;
use crate::catalogue::domain::policies::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to encode file: {0}")]
    Encode(String),

    #[error("Failed to decode stored file: {0}")]
    Decode(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("CV {id} was only partially deleted: {detail}")]
    PartialDelete { id: CvId, detail: String },
}

impl From<RecordStoreError> for CatalogueError {
    fn from(err: RecordStoreError) -> Self {
        match err {
            RecordStoreError::Encode(msg) => CatalogueError::Encode(msg),
            RecordStoreError::Decode(msg) => CatalogueError::Decode(msg),
            RecordStoreError::Unavailable(msg) => CatalogueError::StoreUnavailable(msg),
            RecordStoreError::PartialDelete { id, detail } => {
                CatalogueError::PartialDelete { id, detail }
            }
        }
    }
}

impl CatalogueError {
    /// The message shown to the operator when `action` failed with this error.
    pub fn notice(&self, action: CatalogueAction) -> Notice {
        match self {
            CatalogueError::Validation(ValidationError::AgeOutOfRange { min, max, .. }) => {
                Notice::age_out_of_range(*min, *max)
            }
            CatalogueError::Validation(
                ValidationError::InvalidFileName(_) | ValidationError::NotAPdf,
            ) => Notice::invalid_file(),
            CatalogueError::Validation(_) => Notice::missing_fields(),
            _ => Notice::action_failed(action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::application::notice::NoticeKind;

    #[test]
    fn test_record_store_errors_map_one_to_one() {
        assert_eq!(
            CatalogueError::from(RecordStoreError::Unavailable("down".into())),
            CatalogueError::StoreUnavailable("down".into())
        );
        assert_eq!(
            CatalogueError::from(RecordStoreError::Decode("bad".into())),
            CatalogueError::Decode("bad".into())
        );
        assert_eq!(
            CatalogueError::from(RecordStoreError::PartialDelete {
                id: CvId::from("x"),
                detail: "row".into()
            }),
            CatalogueError::PartialDelete {
                id: CvId::from("x"),
                detail: "row".into()
            }
        );
    }

    #[test]
    fn test_validation_notices() {
        let err = CatalogueError::from(ValidationError::AgeOutOfRange {
            age: 17,
            min: 18,
            max: 65,
        });
        assert_eq!(
            err.notice(CatalogueAction::Upload).description,
            "يجب أن يكون العمر بين 18 و 65 سنة"
        );

        let err = CatalogueError::from(ValidationError::EmptyName);
        assert_eq!(
            err.notice(CatalogueAction::Upload),
            Notice::missing_fields()
        );
    }

    #[test]
    fn test_store_failure_notice_depends_on_action() {
        let err = CatalogueError::StoreUnavailable("timeout".into());

        let notice = err.notice(CatalogueAction::Delete);
        assert_eq!(notice.kind, NoticeKind::Failure);
        assert_eq!(notice.description, "تعذر حذف السيفي");

        assert_eq!(
            err.notice(CatalogueAction::Load).description,
            "تعذر تحميل البيانات"
        );
    }
}
