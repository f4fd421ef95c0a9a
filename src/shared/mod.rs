pub mod constants;
pub mod test_helpers;
pub mod timestamp;
pub mod types;
pub mod validation;
