use std::sync::Arc;

use parking_lot::RwLock;

/// Bound for anything held across store handles and threads.
pub trait Async: Send + Sync + 'static {}

impl<A> Async for A where A: Send + Sync + 'static {}

pub type SharedRw<T> = Arc<RwLock<T>>;
