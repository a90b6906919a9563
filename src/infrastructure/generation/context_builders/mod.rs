//! Context builders turning a server spec into template variables

pub mod python;

pub use python::PythonContextBuilder;
