pub mod use_cases;
pub use use_cases::{AddCvCommand, AddCvUseCase, DeleteCvUseCase, DownloadCvUseCase, ListCvsUseCase};
