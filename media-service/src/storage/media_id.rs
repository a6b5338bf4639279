//! Media identifier generation
//!
//! An identifier is a random UUID, optionally followed by the extension
//! of the uploaded file's name. It doubles as the blob's filename, so it
//! must never contain path separators.

use uuid::Uuid;

/// Generate a fresh identifier for an upload named `original_name`.
///
/// `"photo.png"` yields `"<uuid>.png"`, `"noext"` yields `"<uuid>"`.
pub fn generate_media_id(original_name: &str) -> String {
    let token = Uuid::new_v4();

    match extension_of(original_name) {
        Some(ext) => format!("{}.{}", token, ext),
        None => token.to_string(),
    }
}

/// Extension after the final `.` of the name's last path component.
///
/// Empty extensions and ones with characters outside `[A-Za-z0-9]` are
/// dropped.
fn extension_of(original_name: &str) -> Option<&str> {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);

    let (_, ext) = base.rsplit_once('.')?;

    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(ext)
}
