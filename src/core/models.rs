use std::fmt;

use serde::{
    Deserialize,
    Serialize,
    Serializer,
};
use serde_json::{
    Map,
    Value,
};

use super::names::normalize;

pub const DEFAULT_BASE_MM: i64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[default]
    Model,
    Crew,
    Upgrade,
}

impl CardType {
    /// Unknown or missing labels fall back to `Model`. Matching ignores case
    /// and surrounding whitespace.
    pub fn from_label(label: Option<&str>) -> Self {
        label.and_then(Self::parse).unwrap_or_default()
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "model" => Some(CardType::Model),
            "crew" => Some(CardType::Crew),
            "upgrade" => Some(CardType::Upgrade),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Model => "Model",
            CardType::Crew => "Crew",
            CardType::Upgrade => "Upgrade",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub df: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sz: Option<i64>,
}

impl Stats {
    pub fn sp(&self) -> i64 {
        self.sp.unwrap_or(0)
    }

    pub fn df(&self) -> i64 {
        self.df.unwrap_or(0)
    }

    pub fn wp(&self) -> i64 {
        self.wp.unwrap_or(0)
    }

    pub fn sz(&self) -> i64 {
        self.sz.unwrap_or(0)
    }
}

/// Base size as it appeared in the catalog. Kept as text so the categorical
/// filter can compare `30` and `"30"` alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseSize(String);

impl BaseSize {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn millimeters(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for BaseSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BaseSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.millimeters() {
            Some(mm) if mm.to_string() == self.0 => serializer.serialize_i64(mm),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subfaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    pub cost: i64,
    pub stats: Stats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<BaseSize>,
    pub soulstone: bool,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub characteristics: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub attacks: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Card {
    /// Builds a card from one untrusted catalog record. Never fails: fields of
    /// the wrong type are treated as absent and non-object records become an
    /// all-default card keyed by `index`.
    pub fn from_value(value: &Value, index: usize) -> Self {
        let empty = Map::new();
        let record = value.as_object().unwrap_or(&empty);

        let name = string_field(record, "name").unwrap_or_default();
        let stats = record.get("stats").and_then(Value::as_object).unwrap_or(&empty);

        Card {
            id: id_field(record).unwrap_or_else(|| index.to_string()),
            display_name: normalize(&name),
            name,
            title: string_field(record, "title"),
            card_type: CardType::from_label(record.get("type").and_then(Value::as_str)),
            faction: string_field(record, "faction"),
            subfaction: string_field(record, "subfaction"),
            station: string_field(record, "station"),
            cost: number_field(record, "cost").unwrap_or(0),
            stats: Stats {
                sp: number_field(stats, "sp"),
                df: number_field(stats, "df"),
                wp: number_field(stats, "wp"),
                sz: number_field(stats, "sz"),
            },
            health: number_field(record, "health"),
            base: base_field(record),
            soulstone: record.get("soulstone").and_then(Value::as_bool).unwrap_or(false),
            tags: list_field(record, "tags"),
            keywords: list_field(record, "keywords"),
            characteristics: list_field(record, "characteristics"),
            attacks: attacks_field(record),
            image_url: string_field(record, "imageUrl"),
        }
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn health(&self) -> i64 {
        self.health.unwrap_or(0)
    }

    pub fn base_mm(&self) -> i64 {
        self.base.as_ref().and_then(BaseSize::millimeters).unwrap_or(0)
    }
}

/// Converts a whole catalog payload. Anything other than an array is an empty
/// catalog.
pub fn cards_from_value(value: &Value) -> Vec<Card> {
    match value.as_array() {
        Some(items) => items.iter().enumerate().map(|(i, v)| Card::from_value(v, i)).collect(),
        None => Vec::new(),
    }
}

fn string_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

fn id_field(record: &Map<String, Value>) -> Option<String> {
    match record.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn coerce_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
}

fn number_field(record: &Map<String, Value>, key: &str) -> Option<i64> {
    record.get(key).and_then(coerce_number)
}

fn base_field(record: &Map<String, Value>) -> Option<BaseSize> {
    let value = record.get("base")?;
    if let Some(label) = value.as_str() {
        return (!label.trim().is_empty()).then(|| BaseSize::new(label));
    }

    let mm = coerce_number(value)?;
    let integral = value.as_f64().map(|f| f.fract() == 0.0).unwrap_or(true);
    if integral {
        Some(BaseSize::new(mm.to_string()))
    } else {
        Some(BaseSize::new(value.to_string()))
    }
}

fn list_field(record: &Map<String, Value>, key: &str) -> Vec<String> {
    match record.get(key) {
        Some(Value::Array(items)) => {
            items.iter().filter_map(Value::as_str).map(str::to_string).collect()
        }
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn attacks_field(record: &Map<String, Value>) -> String {
    match record.get("attacks") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => {
            items.iter().filter_map(Value::as_str).collect::<Vec<_>>().join("\n")
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_full_record() {
        let value = json!({
            "id": 12,
            "name": "M4E GUILD Sonnia Criid",
            "title": "Witch Hunter",
            "type": "Model",
            "faction": "Guild",
            "subfaction": "Witch Hunter",
            "station": "Master",
            "cost": 0,
            "stats": { "sp": 5, "df": 5, "wp": 6, "sz": 2 },
            "health": 12,
            "base": 30,
            "soulstone": true,
            "tags": ["Blast"],
            "keywords": ["Witch Hunter"],
            "characteristics": ["Living"],
            "attacks": "Unleash Flame",
            "imageUrl": "img/sonnia.pdf"
        });

        let card = Card::from_value(&value, 0);
        assert_eq!(card.id, "12");
        assert_eq!(card.display_name, "Sonnia Criid");
        assert_eq!(card.card_type, CardType::Model);
        assert_eq!(card.stats.df, Some(5));
        assert_eq!(card.health, Some(12));
        assert_eq!(card.base, Some(BaseSize::new("30")));
        assert!(card.soulstone);
        assert_eq!(card.image_url.as_deref(), Some("img/sonnia.pdf"));
    }

    #[test]
    fn test_malformed_record_defaults() {
        let value = json!({
            "name": 42,
            "type": "Spaceship",
            "cost": "seven",
            "stats": "fast",
            "soulstone": "yes",
            "tags": [1, "Armored", null],
            "base": {}
        });

        let card = Card::from_value(&value, 3);
        assert_eq!(card.id, "3");
        assert_eq!(card.name, "");
        assert_eq!(card.display_name, "Unknown Model");
        assert_eq!(card.card_type, CardType::Model);
        assert_eq!(card.cost(), 0);
        assert_eq!(card.stats, Stats::default());
        assert!(!card.soulstone);
        assert_eq!(card.tags, vec!["Armored".to_string()]);
        assert!(card.base.is_none());
        assert_eq!(card.base_mm(), 0);
    }

    #[test]
    fn test_type_labels_ignore_case() {
        assert_eq!(CardType::parse("crew"), Some(CardType::Crew));
        assert_eq!(CardType::parse("CREW"), Some(CardType::Crew));
        assert_eq!(CardType::parse(" Upgrade "), Some(CardType::Upgrade));
        assert_eq!(CardType::parse("Spaceship"), None);

        let cards = cards_from_value(&json!([
            {"type": "upgrade"},
            {"type": "Spaceship"},
            {"type": 3},
            {},
        ]));
        let types: Vec<CardType> = cards.iter().map(|c| c.card_type).collect();
        assert_eq!(
            types,
            vec![CardType::Upgrade, CardType::Model, CardType::Model, CardType::Model]
        );
    }

    #[test]
    fn test_non_object_records() {
        let cards = cards_from_value(&json!([null, "card", {"name": "Ok"}]));
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].id, "0");
        assert_eq!(cards[1].display_name, "Unknown Model");
        assert_eq!(cards[2].name, "Ok");

        assert!(cards_from_value(&json!({"cards": []})).is_empty());
    }

    #[test]
    fn test_number_coercion() {
        let card = Card::from_value(&json!({"cost": 4.9, "base": 40.0, "health": 0}), 0);
        assert_eq!(card.cost(), 4);
        assert_eq!(card.base.as_ref().map(BaseSize::label), Some("40"));
        assert_eq!(card.health, Some(0));

        let card = Card::from_value(&json!({"base": "50mm"}), 0);
        assert_eq!(card.base.as_ref().map(BaseSize::label), Some("50mm"));
        assert_eq!(card.base_mm(), 0);
    }

    #[test]
    fn test_serializes_with_catalog_field_names() {
        let card = Card::from_value(
            &json!({"id": "a", "name": "Rail Golem", "type": "crew", "base": 50, "imageUrl": "x.png"}),
            0,
        );
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["type"], json!("Crew"));
        assert_eq!(value["base"], json!(50));
        assert_eq!(value["imageUrl"], json!("x.png"));
        assert!(value.get("displayName").is_none());

        let again = Card::from_value(&value, 0);
        assert_eq!(again, card);
    }
}
