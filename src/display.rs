use std::fmt::Write;

use crate::{
    catalog::{
        CatalogView,
        OptionLists,
    },
    core::{
        models::DEFAULT_BASE_MM,
        utils::{
            resolve_image_url,
            truncate_for_display,
        },
        Card,
    },
};

const ATTACKS_PREVIEW_CHARS: usize = 40;
const IMAGE_PLACEHOLDER: &str = "[no image]";

/// Label/value pairs worth showing for a card. Stats hide at 0, health shows
/// whenever present, base only when larger than the default.
pub fn visible_stats(card: &Card) -> Vec<(&'static str, i64)> {
    let mut stats: Vec<(&'static str, i64)> = [
        ("Sp", card.stats.sp()),
        ("Df", card.stats.df()),
        ("Wp", card.stats.wp()),
        ("Sz", card.stats.sz()),
    ]
    .into_iter()
    .filter(|(_, value)| *value != 0)
    .collect();

    if let Some(health) = card.health {
        stats.push(("Hp", health));
    }
    if card.base_mm() > DEFAULT_BASE_MM {
        stats.push(("Base", card.base_mm()));
    }
    stats
}

fn stats_line(card: &Card) -> String {
    visible_stats(card)
        .iter()
        .map(|(label, value)| format!("{label} {value}"))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_row(card: &Card) -> String {
    format!(
        "{:<6} {:<28} {:<8} {:<16} {:>4}  {:<32} {}",
        card.id,
        truncate_for_display(&card.display_name, 28),
        card.card_type,
        card.faction.as_deref().unwrap_or("-"),
        card.cost(),
        stats_line(card),
        truncate_for_display(&card.attacks.replace('\n', " "), ATTACKS_PREVIEW_CHARS),
    )
}

pub fn render_grid(view: &CatalogView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<28} {:<8} {:<16} {:>4}  {:<32} {}",
        "ID", "NAME", "TYPE", "FACTION", "COST", "STATS", "ATTACKS"
    );
    for card in view.iter() {
        let _ = writeln!(out, "{}", render_row(card));
    }
    let _ = write!(out, "{} cards", view.len());
    out
}

pub fn render_detail(card: &Card) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", card.display_name);
    if let Some(title) = &card.title {
        let _ = writeln!(out, "  {title}");
    }
    let _ = writeln!(out, "Type:      {}", card.card_type);

    let fields = [
        ("Faction", card.faction.as_deref()),
        ("Keyword", card.subfaction.as_deref()),
        ("Station", card.station.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "{:<10} {}", format!("{label}:"), value);
        }
    }

    let _ = writeln!(out, "Cost:      {}", card.cost());
    let stats = stats_line(card);
    if !stats.is_empty() {
        let _ = writeln!(out, "Stats:     {stats}");
    }
    if card.soulstone {
        let _ = writeln!(out, "Soulstone: yes");
    }

    let lists = [
        ("Keywords", &card.keywords),
        ("Traits", &card.characteristics),
        ("Tags", &card.tags),
    ];
    for (label, values) in lists {
        if !values.is_empty() {
            let _ = writeln!(out, "{:<10} {}", format!("{label}:"), values.join(", "));
        }
    }

    if !card.attacks.is_empty() {
        let _ = writeln!(out, "Attacks:\n{}", card.attacks);
    }

    let image = resolve_image_url(card.image_url.as_deref());
    let _ = write!(out, "Image:     {}", image.as_deref().unwrap_or(IMAGE_PLACEHOLDER));
    out
}

pub fn render_options(options: &OptionLists) -> String {
    let sections = [
        ("Factions", &options.factions),
        ("Keywords", &options.subfactions),
        ("Stations", &options.stations),
        ("Tags", &options.tags),
        ("Base sizes", &options.base_sizes),
    ];
    sections
        .iter()
        .map(|(label, values)| format!("{label}: {}", values.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
