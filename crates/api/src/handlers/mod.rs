pub mod creation;
pub mod entities;
pub mod interests;
pub mod mutations;
pub mod preferences;
