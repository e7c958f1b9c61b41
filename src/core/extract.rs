use std::{
    collections::HashSet,
    fs,
    path::Path,
    sync::LazyLock,
};

use regex::Regex;

use super::{
    models::{
        BaseSize,
        CardType,
        Stats,
        DEFAULT_BASE_MM,
    },
    names::normalize,
    Card,
    CardexError,
};

pub const KNOWN_FACTIONS: &[&str] = &[
    "Guild",
    "Resurrectionist",
    "Arcanist",
    "Neverborn",
    "Outcast",
    "Bayou",
    "Ten Thunders",
    "Explorer's Society",
];

pub const KNOWN_STATIONS: &[&str] = &["Master", "Henchman", "Enforcer", "Minion", "Peon"];

const COMMON_CHARACTERISTICS: &[&str] =
    &["Living", "Undead", "Construct", "Spirit", "Beast", "Human"];

const MASTER_PLACEHOLDER_COST: i64 = 15;
const FIRST_EXTRACTED_ID: u32 = 100;

/// Text phrase -> tag.
const TEXT_TAGS: &[(&str, &str)] = &[
    ("armor", "Armored"),
    ("terrifying", "Terrifying"),
    ("hard to kill", "Durable"),
    ("incorporeal", "Ghost"),
    ("heal", "Healer"),
    ("scheme marker", "Schemer"),
    ("blast", "AoE"),
    ("pulse", "AoE"),
    ("summon", "Summoner"),
];

/// `<stat>[:\s]*<digits>` anywhere in the text, case-insensitive.
fn stat_pattern(stat_name: &str) -> Regex {
    Regex::new(&format!(r"(?i){}[:\s]*([0-9]+)", regex::escape(stat_name)))
        .expect("stat pattern is valid")
}

static MV_RE: LazyLock<Regex> = LazyLock::new(|| stat_pattern("Mv"));
static DF_RE: LazyLock<Regex> = LazyLock::new(|| stat_pattern("Df"));
static WP_RE: LazyLock<Regex> = LazyLock::new(|| stat_pattern("Wp"));
static SZ_RE: LazyLock<Regex> = LazyLock::new(|| stat_pattern("Sz"));
static BASE_RE: LazyLock<Regex> = LazyLock::new(|| stat_pattern("Base"));
static COST_RE: LazyLock<Regex> = LazyLock::new(|| stat_pattern("Cost"));

fn extract_stat(text: &str, pattern: &Regex) -> Option<i64> {
    pattern.captures(text).and_then(|caps| caps[1].parse().ok())
}

/// Turns the plain text of one printed card into a catalog record. Returns
/// `None` when the text is blank.
pub fn parse_card_text(text: &str, id: u32) -> Option<Card> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let first_line = lines.first()?;

    let name = first_line.to_string();
    let faction = KNOWN_FACTIONS.iter().find(|f| text.contains(*f)).copied().unwrap_or("Unknown");
    let station = KNOWN_STATIONS.iter().find(|s| text.contains(*s)).copied().unwrap_or("Minion");

    let stats = Stats {
        sp: Some(extract_stat(text, &MV_RE).unwrap_or(0)),
        df: Some(extract_stat(text, &DF_RE).unwrap_or(0)),
        wp: Some(extract_stat(text, &WP_RE).unwrap_or(0)),
        sz: Some(extract_stat(text, &SZ_RE).unwrap_or(0)),
    };
    let base = extract_stat(text, &BASE_RE).filter(|mm| *mm != 0).unwrap_or(DEFAULT_BASE_MM);

    let mut cost = extract_stat(text, &COST_RE).unwrap_or(0);
    if station == "Master" && cost == 0 {
        cost = MASTER_PLACEHOLDER_COST;
    }

    let keywords = lines
        .get(1)
        .map(|line| {
            line.split(',')
                .filter(|k| k.chars().count() < 20)
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let characteristics = COMMON_CHARACTERISTICS
        .iter()
        .filter(|c| text.contains(*c))
        .map(|c| c.to_string())
        .collect();

    let mut card = Card {
        id: id.to_string(),
        display_name: normalize(&name),
        name,
        title: None,
        card_type: CardType::Model,
        faction: Some(faction.to_string()),
        subfaction: None,
        station: Some(station.to_string()),
        cost,
        stats,
        health: None,
        base: Some(BaseSize::new(base.to_string())),
        soulstone: false,
        tags: Vec::new(),
        keywords,
        characteristics,
        attacks: String::new(),
        image_url: None,
    };
    card.tags = auto_tags(&card, text);

    Some(card)
}

/// Filter tags derived from stats and card text, deduplicated in first-seen
/// order.
pub fn auto_tags(card: &Card, text: &str) -> Vec<String> {
    let mut tags = Vec::new();

    if card.stats.sp() >= 6 {
        tags.push("Fast");
    }
    if card.stats.df() >= 6 {
        tags.push("High Defense");
    }
    if card.stats.wp() >= 7 {
        tags.push("High Willpower");
    }
    if card.cost() <= 5 {
        tags.push("Cheap");
    }

    let lowered = text.to_lowercase();
    for (phrase, tag) in TEXT_TAGS {
        if lowered.contains(*phrase) {
            tags.push(*tag);
        }
    }

    let mut seen = HashSet::new();
    tags.into_iter().filter(|t| seen.insert(*t)).map(str::to_string).collect()
}

/// Reads every `.txt` file in `dir` (sorted by file name) and extracts one
/// card per file. Ids start at 100.
pub fn extract_directory(dir: &Path) -> Result<Vec<Card>, CardexError> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("txt"))
        })
        .collect();
    paths.sort();

    let mut cards = Vec::new();
    let mut next_id = FIRST_EXTRACTED_ID;

    for path in paths {
        log::info!("Processing: {}", path.display());
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                continue;
            }
        };

        match parse_card_text(&text, next_id) {
            Some(card) => {
                cards.push(card);
                next_id += 1;
            }
            None => log::warn!("No text found in {}", path.display()),
        }
    }

    log::info!("Extracted {} cards from {}", cards.len(), dir.display());
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SONNIA: &str = "Sonnia Criid\nWitch Hunter, Elite\nGuild Master\nLiving Human\nMv 5 Df: 5 Wp 7 Sz 2\nBase 30\nUnleash Flame: Blast the target.\nHard to Kill";

    #[test]
    fn test_parses_card_text() {
        let card = parse_card_text(SONNIA, 100).unwrap();
        assert_eq!(card.id, "100");
        assert_eq!(card.name, "Sonnia Criid");
        assert_eq!(card.faction.as_deref(), Some("Guild"));
        assert_eq!(card.station.as_deref(), Some("Master"));
        assert_eq!(card.stats.sp, Some(5));
        assert_eq!(card.stats.df, Some(5));
        assert_eq!(card.stats.wp, Some(7));
        assert_eq!(card.cost(), MASTER_PLACEHOLDER_COST);
        assert_eq!(card.base_mm(), 30);
        assert_eq!(card.keywords, vec!["Witch Hunter".to_string(), "Elite".to_string()]);
        assert_eq!(card.characteristics, vec!["Living".to_string(), "Human".to_string()]);
    }

    #[test]
    fn test_auto_tags() {
        let card = parse_card_text(SONNIA, 100).unwrap();
        assert_eq!(
            card.tags,
            vec!["High Willpower".to_string(), "Durable".to_string(), "AoE".to_string()]
        );

        let text = "Ghoul\nUndead\nMv 6 Df 6 Cost 4\nIncorporeal. Pulse and blast.";
        let card = parse_card_text(text, 1).unwrap();
        assert_eq!(card.station.as_deref(), Some("Minion"));
        assert_eq!(card.faction.as_deref(), Some("Unknown"));
        assert_eq!(card.tags, vec!["Fast", "High Defense", "Cheap", "Ghost", "AoE"]);
    }

    #[test]
    fn test_stat_patterns_are_reused_across_cards() {
        let first = parse_card_text("Rat\nmv:6 DF 3 wp4 sz1 base 40 COST: 2", 1).unwrap();
        let second = parse_card_text("Rat King\nMV 7 df:2", 2).unwrap();

        assert_eq!(first.stats.sp, Some(6));
        assert_eq!(first.stats.df, Some(3));
        assert_eq!(first.stats.wp, Some(4));
        assert_eq!(first.stats.sz, Some(1));
        assert_eq!(first.base_mm(), 40);
        assert_eq!(first.cost(), 2);

        assert_eq!(second.stats.sp, Some(7));
        assert_eq!(second.stats.df, Some(2));
        assert_eq!(second.stats.wp, Some(0));
        assert_eq!(second.base_mm(), DEFAULT_BASE_MM);
        assert_eq!(second.cost(), 0);
    }

    #[test]
    fn test_blank_text() {
        assert!(parse_card_text("  \n\n ", 1).is_none());
    }

    #[test]
    fn test_extract_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "Perdita Ortega\nFamily\nGuild Master").unwrap();
        fs::write(dir.path().join("a.txt"), "Francisco\nFamily\nGuild Henchman Cost 9").unwrap();
        fs::write(dir.path().join("empty.txt"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "Ignored").unwrap();

        let cards = extract_directory(dir.path()).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Francisco");
        assert_eq!(cards[0].id, "100");
        assert_eq!(cards[0].cost(), 9);
        assert_eq!(cards[1].id, "101");
    }
}
