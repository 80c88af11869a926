//! Upload type checks.
//!
//! Only a fixed allow-list of document and image types may be attached to a
//! session. The declared MIME type, the file extension and, when the bytes
//! are available, the content signature must all agree.

use std::path::Path;

use crate::error::AppError;
use crate::models::FileUpload;

/// An accepted MIME type and the extensions that may carry it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedFileType {
    pub mime_type: &'static str,
    pub extensions: &'static [&'static str],
}

pub const ALLOWED_FILE_TYPES: &[AllowedFileType] = &[
    AllowedFileType {
        mime_type: "image/jpeg",
        extensions: &["jpg", "jpeg"],
    },
    AllowedFileType {
        mime_type: "image/png",
        extensions: &["png"],
    },
    AllowedFileType {
        mime_type: "application/pdf",
        extensions: &["pdf"],
    },
];

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Checks an upload against the allow-list.
///
/// # Errors
///
/// `InvalidFileType` when the MIME type is not accepted, the extension does
/// not belong to it, or the content signature contradicts it.
pub fn validate_file_type(file: &FileUpload) -> Result<(), AppError> {
    let mime_type = file.mime_type.trim().to_lowercase();

    let allowed = ALLOWED_FILE_TYPES
        .iter()
        .find(|allowed| allowed.mime_type == mime_type)
        .ok_or_else(|| AppError::InvalidFileType(format!("{} is not an accepted type", mime_type)))?;

    let extension = extension_of(&file.name).unwrap_or_default();
    if !allowed.extensions.contains(&extension.as_str()) {
        return Err(AppError::InvalidFileType(format!(
            "extension {:?} does not match {}",
            extension, mime_type
        )));
    }

    if let Some(bytes) = file.bytes.as_deref().filter(|b| !b.is_empty()) {
        match infer::get(bytes) {
            Some(kind) if kind.mime_type() == allowed.mime_type => {}
            Some(kind) => {
                return Err(AppError::InvalidFileType(format!(
                    "content is {} but was declared as {}",
                    kind.mime_type(),
                    mime_type
                )))
            }
            None => {
                return Err(AppError::InvalidFileType(format!(
                    "content signature does not match {}",
                    mime_type
                )))
            }
        }
    }

    Ok(())
}
