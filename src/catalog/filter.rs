use serde::{
    Deserialize,
    Serialize,
};

use super::{
    query::{
        ParsedQuery,
        QueryField,
    },
    search,
};
use crate::core::{
    Card,
    CardType,
};

pub const ALL: &str = "All";

pub const DEFAULT_COST_MIN: i64 = 0;
pub const DEFAULT_COST_MAX: i64 = 20;

/// A categorical filter value; `All` is the wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn accepts(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(value) => value,
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatMinimums {
    pub sp: i64,
    pub df: i64,
    pub wp: i64,
    pub sz: i64,
    pub hp: i64,
}

impl StatMinimums {
    /// A field with an exact override is already pinned, so its minimum is
    /// skipped.
    fn met_by(&self, card: &Card, exact: &ExactFilters) -> bool {
        let checks = [
            (self.sp, exact.sp, card.stats.sp()),
            (self.df, exact.df, card.stats.df()),
            (self.wp, exact.wp, card.stats.wp()),
            (self.sz, exact.sz, card.stats.sz()),
            (self.hp, exact.hp, card.health()),
        ];
        checks.iter().all(|(min, pinned, actual)| pinned.is_some() || actual >= min)
    }
}

/// Exact-match overrides. `None` means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactFilters {
    pub df: Option<i64>,
    pub sp: Option<i64>,
    pub wp: Option<i64>,
    pub sz: Option<i64>,
    pub hp: Option<i64>,
    pub base: Option<i64>,
    pub soulstone: Option<bool>,
}

impl ExactFilters {
    fn met_by(&self, card: &Card) -> bool {
        let checks = [
            (self.df, card.stats.df()),
            (self.sp, card.stats.sp()),
            (self.wp, card.stats.wp()),
            (self.sz, card.stats.sz()),
            (self.hp, card.health()),
            (self.base, card.base_mm()),
        ];
        if checks.iter().any(|(wanted, actual)| wanted.is_some_and(|w| w != *actual)) {
            return false;
        }

        match self.soulstone {
            Some(wanted) => i64::from(wanted) == i64::from(card.soulstone),
            None => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ExactFilters::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFilters {
    /// `None` is the "All" type.
    pub card_type: Option<CardType>,
    pub faction: Selection,
    pub subfaction: Selection,
    pub station: Selection,
    pub cost_min: i64,
    pub cost_max: i64,
    pub minimums: StatMinimums,
    pub base_size: Selection,
    pub tag: Selection,
    pub exact: ExactFilters,
}

impl Default for CardFilters {
    fn default() -> Self {
        Self {
            card_type: None,
            faction: Selection::All,
            subfaction: Selection::All,
            station: Selection::All,
            cost_min: DEFAULT_COST_MIN,
            cost_max: DEFAULT_COST_MAX,
            minimums: StatMinimums::default(),
            base_size: Selection::All,
            tag: Selection::All,
            exact: ExactFilters::default(),
        }
    }
}

fn query_field_value(card: &Card, field: QueryField) -> i64 {
    match field {
        QueryField::Cost => card.cost(),
        QueryField::Sp => card.stats.sp(),
        QueryField::Df => card.stats.df(),
        QueryField::Wp => card.stats.wp(),
        QueryField::Sz => card.stats.sz(),
        QueryField::Hp => card.health(),
    }
}

/// True if `card` passes every active filter. Checks run in a fixed order and
/// stop at the first failure.
pub fn matches(card: &Card, filters: &CardFilters, query: &ParsedQuery) -> bool {
    if let Some(card_type) = filters.card_type {
        if card.card_type != card_type {
            return false;
        }
    }

    if !filters.exact.met_by(card) {
        return false;
    }

    if query.constraints.iter().any(|(field, wanted)| query_field_value(card, *field) != *wanted) {
        return false;
    }

    if !search::matches_search(card, &query.text) {
        return false;
    }

    if !filters.faction.accepts(card.faction.as_deref())
        || !filters.subfaction.accepts(card.subfaction.as_deref())
        || !filters.station.accepts(card.station.as_deref())
    {
        return false;
    }

    if card.cost() < filters.cost_min || card.cost() > filters.cost_max {
        return false;
    }

    // Thresholds only make sense on statted models.
    if card.card_type == CardType::Model && !filters.minimums.met_by(card, &filters.exact) {
        return false;
    }

    if let Selection::Only(wanted) = &filters.base_size {
        if card.base.as_ref().map(|b| b.label()) != Some(wanted.as_str()) {
            return false;
        }
    }

    if let Selection::Only(wanted) = &filters.tag {
        if !card.tags.iter().any(|t| t == wanted) {
            return false;
        }
    }

    true
}
