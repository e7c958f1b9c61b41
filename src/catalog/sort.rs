use std::cmp::Ordering;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::Card;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    Name,
    Cost,
    Speed,
}

impl SortField {
    /// Unknown keys give `None`, which leaves the order untouched.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortField::Name),
            "cost" => Some(SortField::Cost),
            "sp" => Some(SortField::Speed),
            _ => None,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Cost => "cost",
            SortField::Speed => "sp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: Option<SortField>, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn toggle_or_set(&mut self, field: SortField) {
        match self.field {
            Some(current) if current == field => {
                self.direction = self.direction.reversed();
            }
            _ => {
                self.field = Some(field);
                self.direction = SortDirection::Ascending;
            }
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self { field: Some(SortField::Name), direction: SortDirection::Ascending }
    }
}

fn compare_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}

pub fn compare(
    left: &Card,
    right: &Card,
    field: Option<SortField>,
    direction: SortDirection,
) -> Ordering {
    let ordering = match field {
        Some(SortField::Name) => compare_names(&left.display_name, &right.display_name),
        Some(SortField::Cost) => left.cost().cmp(&right.cost()),
        Some(SortField::Speed) => left.stats.sp().cmp(&right.stats.sp()),
        None => Ordering::Equal,
    };

    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Stable sort of `indices` into `cards`; ties keep their filtered order.
pub fn sort_indices(
    indices: &mut [usize],
    cards: &[Card],
    field: Option<SortField>,
    direction: SortDirection,
) {
    if field.is_none() {
        return;
    }
    indices.sort_by(|&lhs, &rhs| compare(&cards[lhs], &cards[rhs], field, direction));
}
