mod in_memory;
mod prefixed;
mod revertible;
mod shared;

pub use in_memory::InMemoryStore;
pub use prefixed::PrefixedStore;
pub use revertible::RevertibleStore;
pub use shared::SharedStore;
