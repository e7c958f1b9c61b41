//! Search box tokenizer.
//!
//! ```text
//! query      := (constraint | word)*
//! constraint := key (':' | '=')? digit+      (whole word)
//! key        := "cost" | "sp" | "df" | "wp" | "sz" | "hp"
//! ```
//!
//! Constraints become exact-match filters; everything else is the residual
//! text, matched as a substring. Input is lowercased first.

use std::{
    collections::BTreeMap,
    sync::LazyLock,
};

use regex::Regex;

static CONSTRAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)(cost|sp|df|wp|sz|hp)[:=]?([0-9]+)(?-u:\b)")
        .expect("constraint pattern is valid")
});

static SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QueryField {
    Cost,
    Sp,
    Df,
    Wp,
    Sz,
    Hp,
}

impl QueryField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "cost" => Some(QueryField::Cost),
            "sp" => Some(QueryField::Sp),
            "df" => Some(QueryField::Df),
            "wp" => Some(QueryField::Wp),
            "sz" => Some(QueryField::Sz),
            "hp" => Some(QueryField::Hp),
            _ => None,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            QueryField::Cost => "cost",
            QueryField::Sp => "sp",
            QueryField::Df => "df",
            QueryField::Wp => "wp",
            QueryField::Sz => "sz",
            QueryField::Hp => "hp",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Lowercased residual text.
    pub text: String,
    pub constraints: BTreeMap<QueryField, i64>,
}

impl ParsedQuery {
    pub fn constraint(&self, field: QueryField) -> Option<i64> {
        self.constraints.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.constraints.is_empty()
    }
}

pub fn parse_query(input: &str) -> ParsedQuery {
    let lowered = input.to_lowercase();
    let mut constraints = BTreeMap::new();

    for caps in CONSTRAINT_RE.captures_iter(&lowered) {
        let Some(field) = QueryField::from_key(&caps[1]) else {
            continue;
        };
        match caps[2].parse::<i64>() {
            Ok(value) => {
                constraints.insert(field, value);
            }
            Err(_) => log::debug!("Ignoring out of range constraint {}", &caps[0]),
        }
    }

    let residual = CONSTRAINT_RE.replace_all(&lowered, " ");
    let text = SPACE_RE.replace_all(residual.trim(), " ").into_owned();

    ParsedQuery { text, constraints }
}
