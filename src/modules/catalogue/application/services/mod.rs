pub mod add_cv_service;
pub mod delete_cv_service;
pub mod download_cv_service;
pub mod list_cvs_service;

pub use add_cv_service::AddCvService;
pub use delete_cv_service::DeleteCvService;
pub use download_cv_service::DownloadCvService;
pub use list_cvs_service::ListCvsService;
