//! Candidate inclusion mask
//!
//! This module provides the fixed-length bit vector that encodes one proposed
//! selection of items.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed-length inclusion mask over an item dataset
///
/// Bit `i` set means item `i` is part of the selection. Candidates have no identity
/// beyond their bit pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    bits: Vec<bool>,
}

impl Candidate {
    /// Create a candidate with the given bits
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// The empty selection
    pub fn zeros(length: usize) -> Self {
        Self {
            bits: vec![false; length],
        }
    }

    /// Select every item
    pub fn ones(length: usize) -> Self {
        Self {
            bits: vec![true; length],
        }
    }

    /// Draw every bit independently and uniformly from {0, 1}
    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        let bits = (0..length).map(|_| rng.gen::<bool>()).collect();
        Self { bits }
    }

    /// Number of bits (the dataset size N)
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for a zero-length mask
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get a specific bit
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Set a specific bit
    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = value;
        }
    }

    /// Flip a specific bit
    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// The bits as a slice
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of selected items
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Indices of selected items, ascending
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
    }
}

impl std::ops::Index<usize> for Candidate {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl From<Vec<bool>> for Candidate {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl<const N: usize> From<[bool; N]> for Candidate {
    fn from(arr: [bool; N]) -> Self {
        Self { bits: arr.to_vec() }
    }
}

impl From<Candidate> for Vec<bool> {
    fn from(candidate: Candidate) -> Self {
        candidate.bits
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}
