pub mod files;
pub mod texts;
