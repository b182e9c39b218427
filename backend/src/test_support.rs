//! Test doubles shared by unit tests and the integration suites in `tests/`.
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.

mod clock;
mod in_memory_store;
mod seed;

pub use clock::SteppingClock;
pub use in_memory_store::InMemoryNewsStore;
pub use seed::{SEED_EPOCH, seeded_store};
