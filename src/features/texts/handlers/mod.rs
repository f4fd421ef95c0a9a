mod text_handler;

pub use text_handler::*;
