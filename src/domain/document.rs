use serde::Serialize;

/// Metadata of the primary upload attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMeta {
    pub filename: String,
    pub size_bytes: u64,
    pub format: DocumentFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Markdown,
    Text,
    Word,
    Html,
    Archive,
}

impl DocumentFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            "text/markdown" | "text/x-markdown" => Some(Self::Markdown),
            "text/plain" => Some(Self::Text),
            "text/html" => Some(Self::Html),
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Word)
            }
            _ => None,
        }
    }

    pub fn from_extension(filename: &str) -> Option<Self> {
        let ext = filename.rsplit_once('.')?.1.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "md" | "markdown" => Some(Self::Markdown),
            "txt" | "rfc" => Some(Self::Text),
            "htm" | "html" => Some(Self::Html),
            "doc" | "docx" => Some(Self::Word),
            _ => None,
        }
    }

    /// MIME type wins; generic types such as `application/octet-stream` fall
    /// back to the filename extension.
    pub fn detect(mime: Option<&str>, filename: &str) -> Option<Self> {
        mime.and_then(Self::from_mime)
            .or_else(|| Self::from_extension(filename))
    }
}

/// Code bundle formats accepted for static analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
    TarGz,
}

impl ArchiveFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if lower.ends_with(".tar") {
            Some(Self::Tar)
        } else if lower.ends_with(".zip") {
            Some(Self::Zip)
        } else {
            None
        }
    }
}

impl DocumentMeta {
    pub fn new(filename: String, size_bytes: u64, format: DocumentFormat) -> Self {
        Self {
            filename,
            size_bytes,
            format,
        }
    }
}
