use std::{
    collections::HashSet,
    sync::LazyLock,
};

pub const UNKNOWN_NAME: &str = "Unknown Model";

/// Words that end the prefix scan even when they double as catalog tokens.
const PROTECTED_WORDS: &[&str] = &[
    "BIG", "LADY", "LORD", "SIR", "MISS", "MOTHER", "FATHER", "DR", "MR", "MRS", "CAPTAIN", "THE",
];

/// Prefixes left behind by the catalog export: edition codes, faction codes,
/// card-type labels and keyword names.
const NOISE_TOKENS: &[&str] = &[
    // editions
    "M2E", "M3E", "M4E",
    // factions
    "GUILD", "GLD", "RESURRECTIONIST", "RESURRECTIONISTS", "RES", "ARCANIST", "ARCANISTS", "ARC",
    "NEVERBORN", "NVB", "OUTCAST", "OUTCASTS", "OUT", "BAYOU", "BAY", "TEN", "THUNDERS", "TT",
    "EXPLORERS", "EXS", "SOCIETY",
    // card types
    "MODEL", "CREW", "UPGRADE", "CARD", "STAT", "STATS", "FRONT", "BACK",
    // keywords
    "ACADEMIC", "AMALGAM", "APEX", "BIG", "HAT", "CHIMERA", "ELITE", "EVS", "FAMILY", "FOUNDRY",
    "FREIKORPS", "GUARD", "HONEYPOT", "INFAMOUS", "KIN", "MARSHAL", "MIMIC", "NIGHTMARE",
    "OBLITERATION", "QI", "GONG", "RETAINER", "REDCHAPEL", "SAVAGE", "WITNESS", "WIZZBANG",
];

static PROTECTED: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PROTECTED_WORDS.iter().copied().collect());

static NOISE: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NOISE_TOKENS.iter().copied().collect());

fn canonical(word: &str) -> String {
    word.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_uppercase).collect()
}

/// Strips leading catalog noise from a raw card name.
///
/// The scan is a greedy left-strip: it stops at the first protected word or
/// the first word that is not a noise token, so tokens in the middle of a name
/// survive. A name made only of noise comes back unchanged.
pub fn normalize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return UNKNOWN_NAME.to_string();
    }

    let words: Vec<&str> =
        raw.split(|c: char| c.is_whitespace() || c == '_').filter(|w| !w.is_empty()).collect();

    let mut cut = 0;
    for word in &words {
        let key = canonical(word);
        if PROTECTED.contains(key.as_str()) {
            break;
        }
        if !NOISE.contains(key.as_str()) {
            break;
        }
        cut += 1;
    }

    let cleaned = words[cut..].join(" ");
    if cleaned.is_empty() {
        raw.to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_noise() {
        assert_eq!(normalize("M4E GUILD Sonnia Criid"), "Sonnia Criid");
        assert_eq!(normalize("M4E_Guild_Model_Lady_Justice"), "Lady Justice");
        assert_eq!(normalize("Crew: Seamus"), "Seamus");
    }

    #[test]
    fn test_protected_words_are_kept() {
        assert_eq!(normalize("Big Jake"), "Big Jake");
        // BIG is also the Big Hat keyword, the protected check wins
        assert_eq!(normalize("M4E Big Jake"), "Big Jake");
        assert_eq!(normalize("GUILD The Judge"), "The Judge");
    }

    #[test]
    fn test_noise_mid_name_survives() {
        assert_eq!(normalize("Sonnia Guild Criid"), "Sonnia Guild Criid");
        assert_eq!(normalize("Death Marshal"), "Death Marshal");
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(normalize(""), UNKNOWN_NAME);
        assert_eq!(normalize("   "), UNKNOWN_NAME);
        assert_eq!(normalize("M4E GUILD"), "M4E GUILD");
        assert_eq!(normalize("Guild_Crew"), "Guild_Crew");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "M4E GUILD Sonnia Criid",
            "Big Jake",
            "M4E GUILD",
            "Guild_Crew",
            "",
            "  Arcanist   Mei  Feng ",
            "NVB_Lilith - Mother of Monsters",
            "M4E GUILD The Judge",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
