/// File extensions accepted by the upload endpoint (compared case-insensitively)
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx", "zip", "rar", "jfif", "pptx",
    "xlsx", "json", "csv",
];

/// Default maximum upload request body (16 GiB)
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 16 * 1024 * 1024 * 1024;

/// Default maximum body for JSON routes (10 MiB)
pub const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Number of hex characters appended to stored file names
pub const FILE_SUFFIX_LEN: usize = 8;

/// Number of hex characters in a text record id
pub const TEXT_ID_LEN: usize = 12;

/// File extension of persisted text records
pub const TEXT_RECORD_EXTENSION: &str = "json";

/// Author stored when none is supplied
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Characters of content shown in text listings
pub const PREVIEW_LENGTH: usize = 100;

/// Appended to a preview when the content was cut
pub const PREVIEW_ELLIPSIS: &str = "...";
