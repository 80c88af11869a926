//! Input hardening: message sanitization, integrity and upload type checks.

pub mod file_types;
pub mod sanitizer;

pub use file_types::{validate_file_type, AllowedFileType, ALLOWED_FILE_TYPES};
pub use sanitizer::{sanitize, sanitize_text, validate_integrity, MAX_MESSAGE_LENGTH};
