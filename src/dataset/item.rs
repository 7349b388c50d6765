//! Item and validated item dataset

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// A single procurement line item
///
/// Values are per-item: `unit_price` contributes to total cost, `carbon_intensity`
/// (GWP per unit) times `quantity` contributes to total embodied carbon, and `eta`
/// contributes to the third objective.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Position of the item in its dataset
    #[serde(default)]
    pub id: usize,
    /// Human-readable item name
    pub name: String,
    /// Unit price
    pub unit_price: f64,
    /// Quantity
    pub quantity: f64,
    /// Carbon intensity (GWP) per unit
    pub carbon_intensity: f64,
    /// Auxiliary third metric
    #[serde(default)]
    pub eta: f64,
}

impl Item {
    /// Create a new item with `eta = 0`
    pub fn new(name: impl Into<String>, unit_price: f64, quantity: f64, carbon_intensity: f64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            unit_price,
            quantity,
            carbon_intensity,
            eta: 0.0,
        }
    }

    /// Set the eta metric
    pub fn with_eta(mut self, eta: f64) -> Self {
        self.eta = eta;
        self
    }

    /// Embodied carbon of this item (`carbon_intensity * quantity`)
    pub fn carbon(&self) -> f64 {
        self.carbon_intensity * self.quantity
    }

    fn check(&self, row: usize) -> Result<(), DatasetError> {
        let non_negative = [
            ("unit_price", self.unit_price),
            ("quantity", self.quantity),
            ("carbon_intensity", self.carbon_intensity),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(DatasetError::InvalidValue { row, field, value });
            }
        }
        if !self.eta.is_finite() {
            return Err(DatasetError::InvalidValue {
                row,
                field: "eta",
                value: self.eta,
            });
        }
        Ok(())
    }
}

/// Immutable, validated, ordered list of items
///
/// Item `i` of the dataset is addressed by bit `i` of every candidate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemDataset {
    items: Vec<Item>,
}

impl ItemDataset {
    /// Validate items and build a dataset
    ///
    /// Item ids are reassigned to their position. Rejects an empty list, negative or
    /// non-finite prices, quantities and carbon intensities, and non-finite eta.
    pub fn new(items: Vec<Item>) -> Result<Self, DatasetError> {
        if items.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut items = items;
        for (row, item) in items.iter_mut().enumerate() {
            item.check(row)?;
            item.id = row;
        }

        Ok(Self { items })
    }

    /// Number of items (the candidate length N)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a constructed dataset
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Get an item by index
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Iterate over items
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Unit price column
    pub fn unit_prices(&self) -> Vec<f64> {
        self.items.iter().map(|i| i.unit_price).collect()
    }

    /// Embodied carbon column (`carbon_intensity * quantity`)
    pub fn carbon(&self) -> Vec<f64> {
        self.items.iter().map(Item::carbon).collect()
    }

    /// Eta column
    pub fn etas(&self) -> Vec<f64> {
        self.items.iter().map(|i| i.eta).collect()
    }
}

impl std::ops::Index<usize> for ItemDataset {
    type Output = Item;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ItemDataset {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
