pub mod document;
pub mod local;
pub mod object;
