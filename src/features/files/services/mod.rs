mod file_service;

pub use file_service::{file_too_large, DownloadedFile, FileService};
