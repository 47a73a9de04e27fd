//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod clock;
mod id_allocator;
mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use id_allocator::{AtomicSequence, IdAllocator, MaxPlusOne};
pub use store::{keys, JsonStoreExt, KeyValueStore};
