//! Item dataset
//!
//! This module provides the validated item dataset consumed by the optimizer and the
//! boundary that normalizes loosely-typed records into it.

pub mod item;
pub mod records;

pub mod prelude {
    pub use super::item::*;
    pub use super::records::*;
}
