//! Home slot registry

use super::collision::home_reached;
use super::state::HomeSlot;
use crate::consts::HOME_COLUMNS;

/// The five target slots on the home row
#[derive(Debug, Clone)]
pub struct HomeRegistry {
    homes: Vec<HomeSlot>,
}

impl Default for HomeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeRegistry {
    pub fn new() -> Self {
        Self {
            homes: create_homes(),
        }
    }

    /// Fill a slot; false for a bad index or an already filled slot
    pub fn fill_home(&mut self, index: usize) -> bool {
        match self.homes.get_mut(index) {
            Some(home) if !home.filled => {
                home.filled = true;
                true
            }
            _ => false,
        }
    }

    /// Invalid indices count as filled (nothing can land there)
    pub fn is_home_filled(&self, index: usize) -> bool {
        self.homes.get(index).is_none_or(|h| h.filled)
    }

    /// First open slot at `column`
    ///
    /// A filled slot and no slot at all look the same: both are bad landings.
    pub fn find_home_at_column(&self, column: i32) -> Option<usize> {
        home_reached(column, &self.homes)
    }

    pub fn all_homes_filled(&self) -> bool {
        self.homes.iter().all(|h| h.filled)
    }

    pub fn filled_count(&self) -> usize {
        self.homes.iter().filter(|h| h.filled).count()
    }

    pub fn reset(&mut self) {
        self.homes = create_homes();
    }

    /// Copy of the slots
    pub fn state(&self) -> Vec<HomeSlot> {
        self.homes.clone()
    }
}

fn create_homes() -> Vec<HomeSlot> {
    HOME_COLUMNS
        .iter()
        .map(|&column| HomeSlot {
            column,
            filled: false,
        })
        .collect()
}
