use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::application::services::UploadedFile;

use super::envelope::ApiError;

#[derive(Debug, Clone)]
pub struct FormField {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// A fully buffered multipart body, fields grouped by name in arrival order.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, Vec<FormField>>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read multipart");
                    return Err(ApiError::new(e.status(), e.body_text()));
                }
            };

            let Some(name) = field.name().map(String::from) else {
                continue;
            };
            let filename = field.file_name().map(String::from);
            let content_type = field.content_type().map(String::from);
            let data = field.bytes().await.map_err(|e| {
                tracing::warn!(error = %e, field = %name, "Failed to read multipart field");
                ApiError::new(e.status(), e.body_text())
            })?;

            tracing::debug!(field = %name, bytes = data.len(), "Multipart field received");
            form.fields.entry(name).or_default().push(FormField {
                filename,
                content_type,
                data,
            });
        }

        Ok(form)
    }

    /// The last upload sent under `name`. Parts without a filename are named after the field.
    pub fn file(&self, name: &str) -> Option<UploadedFile> {
        let field = self.fields.get(name)?.last()?;
        Some(UploadedFile {
            filename: field
                .filename
                .clone()
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| name.to_string()),
            content_type: field.content_type.clone(),
            data: field.data.clone(),
        })
    }

    pub fn require_file(&self, name: &str) -> Result<UploadedFile, ApiError> {
        self.file(name)
            .ok_or_else(|| ApiError::bad_request(format!("Missing required field: {}", name)))
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.texts(name).pop()
    }

    pub fn texts(&self, name: &str) -> Vec<String> {
        self.fields
            .get(name)
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|f| std::str::from_utf8(&f.data).ok())
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
