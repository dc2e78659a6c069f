//! Bookstore application library
//!
//! Entity modules (books, authors, categories) and the helpers they share.

pub mod modules;
pub mod utils;

use bookstore_kernel::ModuleRegistry;

/// Registry holding every entity module
pub fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);
    registry
}
