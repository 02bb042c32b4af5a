//! Platform-independent core of the folio performance layer.
//!
//! Nothing in this crate touches browser APIs; the page (`folio-web`) and the
//! service worker (`folio-sw`) feed it observations and act on its decisions.

pub mod cache;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod fps;
pub mod idle;
pub mod lazy;
pub mod quality;
pub mod scroll;
pub mod visibility;

pub use config::OptimizerConfig;
pub use device::*;
pub use error::*;
pub use fps::*;
pub use idle::*;
pub use lazy::*;
pub use quality::*;
pub use scroll::*;
pub use visibility::*;
