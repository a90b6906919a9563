//! Packaging of generated artifacts into downloadable archives

pub mod zip_packager;

pub use zip_packager::{PackagingError, ZipPackager};
