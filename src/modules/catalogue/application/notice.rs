//! Operator-facing messages shown after each catalogue action.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogueAction {
    Load,
    Upload,
    Delete,
    Download,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

const ERROR_TITLE: &str = "خطأ";

impl Notice {
    fn new(kind: NoticeKind, title: &str, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.into(),
        }
    }

    pub fn failure(description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Failure, ERROR_TITLE, description)
    }

    /// `None` for actions that succeed silently.
    pub fn success(action: CatalogueAction) -> Option<Self> {
        match action {
            CatalogueAction::Upload => Some(Self::new(
                NoticeKind::Success,
                "تم بنجاح",
                "تم رفع السيفي بنجاح",
            )),
            CatalogueAction::Delete => Some(Self::new(
                NoticeKind::Success,
                "تم الحذف",
                "تم حذف السيفي بنجاح",
            )),
            CatalogueAction::Load | CatalogueAction::Download => None,
        }
    }

    /// Generic failure for an action.
    pub fn action_failed(action: CatalogueAction) -> Self {
        let description = match action {
            CatalogueAction::Load => "تعذر تحميل البيانات",
            CatalogueAction::Upload => "تعذر رفع السيفي",
            CatalogueAction::Delete => "تعذر حذف السيفي",
            CatalogueAction::Download => "تعذر تحميل الملف",
        };
        Self::failure(description)
    }

    pub fn missing_fields() -> Self {
        Self::failure("يرجى إدخال اسم العامل واختيار الجنسية وتحديد الملف")
    }

    pub fn age_out_of_range(min: u8, max: u8) -> Self {
        Self::failure(format!("يجب أن يكون العمر بين {} و {} سنة", min, max))
    }

    pub fn invalid_file() -> Self {
        Self::failure("يرجى اختيار ملف PDF أو صورة صالحة")
    }

    pub fn not_found() -> Self {
        Self::failure("السيفي غير موجود")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_notices() {
        let upload = Notice::success(CatalogueAction::Upload).unwrap();
        assert_eq!(upload.kind, NoticeKind::Success);
        assert_eq!(upload.title, "تم بنجاح");
        assert_eq!(upload.description, "تم رفع السيفي بنجاح");

        let delete = Notice::success(CatalogueAction::Delete).unwrap();
        assert_eq!(delete.title, "تم الحذف");

        assert!(Notice::success(CatalogueAction::Load).is_none());
    }

    #[test]
    fn test_failures_share_title() {
        for action in [
            CatalogueAction::Load,
            CatalogueAction::Upload,
            CatalogueAction::Delete,
            CatalogueAction::Download,
        ] {
            let notice = Notice::action_failed(action);
            assert_eq!(notice.kind, NoticeKind::Failure);
            assert_eq!(notice.title, "خطأ");
        }
    }

    #[test]
    fn test_age_notice_mentions_bounds() {
        let notice = Notice::age_out_of_range(18, 65);
        assert_eq!(notice.description, "يجب أن يكون العمر بين 18 و 65 سنة");
    }

    #[test]
    fn test_serializes_kind_lowercase() {
        let json = serde_json::to_value(Notice::not_found()).unwrap();
        assert_eq!(json["kind"], "failure");
    }
}
