//! Core layer - configuration, error mapping, extractors and HTTP middleware

pub mod config;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod openapi;
