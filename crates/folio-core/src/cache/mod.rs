//! Offline cache: routing policy plus the manager that executes it against a
//! [`CacheBackend`].

mod manager;
mod policy;

pub use manager::*;
pub use policy::*;
