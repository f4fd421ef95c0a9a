mod text;

pub use text::TextRecord;
