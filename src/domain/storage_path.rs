use std::fmt;

use super::TaskId;

/// Location of a staged upload, `<task-id>/<role>/<filename>`.
///
/// `role` names the form field the file arrived in, so two uploads with the
/// same filename never share a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn new(task_id: &TaskId, role: &str, filename: &str) -> Self {
        Self(format!(
            "{}/{}/{}",
            task_id.as_uuid(),
            sanitize_filename(role),
            sanitize_filename(filename)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keeps only the final path component and replaces anything outside a
/// conservative character set, so client filenames cannot escape the task dir.
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload.bin".to_string()
    } else {
        cleaned
    }
}
