//! Export document generation and delivery

mod document;
mod download;

pub use document::generate;
pub use download::{
    ANONYMOUS_FILE_SEGMENT, DirDownloader, Downloader, EXPORT_EXTENSION, ExportArtifact, export_filename,
};
