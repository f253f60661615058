use protocol_analysis::domain::{ArchiveFormat, DocumentFormat};

#[test]
fn given_pdf_mime_when_detecting_then_returns_pdf() {
    assert_eq!(
        DocumentFormat::detect(Some("application/pdf"), "spec.bin"),
        Some(DocumentFormat::Pdf)
    );
}

#[test]
fn given_octet_stream_when_detecting_then_falls_back_to_extension() {
    assert_eq!(
        DocumentFormat::detect(Some("application/octet-stream"), "snmp-v3.md"),
        Some(DocumentFormat::Markdown)
    );
}

#[test]
fn given_docx_without_mime_when_detecting_then_returns_word() {
    assert_eq!(
        DocumentFormat::detect(None, "TRDP.DOCX"),
        Some(DocumentFormat::Word)
    );
}

#[test]
fn given_unknown_mime_and_extension_when_detecting_then_returns_none() {
    assert_eq!(DocumentFormat::detect(Some("image/png"), "diagram.png"), None);
}

#[test]
fn given_filename_without_extension_when_detecting_then_returns_none() {
    assert_eq!(DocumentFormat::from_extension("README"), None);
}

#[test]
fn given_archive_names_when_parsing_then_recognizes_supported_formats() {
    assert_eq!(ArchiveFormat::from_filename("src.zip"), Some(ArchiveFormat::Zip));
    assert_eq!(ArchiveFormat::from_filename("src.tar"), Some(ArchiveFormat::Tar));
    assert_eq!(ArchiveFormat::from_filename("src.TAR.GZ"), Some(ArchiveFormat::TarGz));
    assert_eq!(ArchiveFormat::from_filename("src.tgz"), Some(ArchiveFormat::TarGz));
    assert_eq!(ArchiveFormat::from_filename("src.rar"), None);
}
