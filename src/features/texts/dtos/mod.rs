mod text_dto;

pub use text_dto::*;
