//! Wedshots Processing Library
//!
//! Turns a freshly uploaded object into EXIF metadata:
//! - `download`: stream an object into a self-deleting temporary file
//! - `metadata`: read capture metadata and format it for the photo record

pub mod download;
pub mod metadata;

pub use download::{download_to_temp, DownloadError};
pub use metadata::{extract_exif, read_exif, read_exif_file, ExifData, ExifError};
