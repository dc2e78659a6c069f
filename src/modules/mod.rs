pub mod authors;
pub mod books;
pub mod categories;

use bookstore_kernel::ModuleRegistry;

/// Register all entity modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(authors::create_module());
    registry.register(categories::create_module());
    registry.register(books::create_module());
}
