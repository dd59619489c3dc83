pub mod codec;
pub mod entities;
pub mod identity;
pub mod nationality;
pub mod policies;
