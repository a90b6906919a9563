//! Infrastructure layer - concrete implementations of domain ports

pub mod generation;
pub mod net;
pub mod output;
pub mod packaging;
pub mod runtime;
pub mod store;

pub use generation::{TemplateCodeGenerator, select_generator};
pub use output::{ArchiveStoreOutputService, FileSystemOutputService, ZipFileOutputService};
pub use packaging::ZipPackager;
pub use runtime::PythonMcpRuntime;
pub use store::ArchiveStore;
