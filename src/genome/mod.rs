//! Genome types
//!
//! Candidates are binary inclusion masks over the item dataset.

pub mod candidate;

pub mod prelude {
    pub use super::candidate::*;
}
