//! Core traits, settings, and the module registry.

pub mod module;
pub mod registry;
pub mod settings;

pub use bookstore_db::{Migration, Store};
pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
