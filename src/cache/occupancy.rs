use crate::color::ColorClassId;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset recording which color classes have at least one candidate
///
/// Class ids outside the tracked range are reported as unoccupied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorClassOccupancy {
    bits: BitVec,
}

impl ColorClassOccupancy {
    /// Create an occupancy vector with every class empty
    pub fn new(total_classes: usize) -> Self {
        Self {
            bits: bitvec![0; total_classes],
        }
    }

    /// Derive occupancy from the class ids of a candidate set
    pub fn from_classes(total_classes: usize, classes: impl IntoIterator<Item = ColorClassId>) -> Self {
        let mut occupancy = Self::new(total_classes);
        for class in classes {
            occupancy.insert(class);
        }
        occupancy
    }

    /// Record that a class has a member
    pub fn insert(&mut self, class: ColorClassId) {
        if class.index() < self.bits.len() {
            self.bits.set(class.index(), true);
        }
    }

    /// Test whether a class has any member
    pub fn is_occupied(&self, class: ColorClassId) -> bool {
        self.bits.get(class.index()).as_deref() == Some(&true)
    }

    /// Number of classes tracked
    pub fn total_classes(&self) -> usize {
        self.bits.len()
    }

    /// Number of classes with at least one member
    pub fn occupied_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no class has a member
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// All occupied class ids in ascending order
    pub fn occupied_classes(&self) -> Vec<ColorClassId> {
        self.bits.iter_ones().map(ColorClassId::new).collect()
    }
}

impl fmt::Display for ColorClassOccupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ColorClassOccupancy({}/{} classes occupied)",
            self.occupied_count(),
            self.total_classes()
        )
    }
}
