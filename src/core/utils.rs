/// File extensions the card art is published in that can't be shown inline.
/// Each has a rendered `.png` sibling next to it.
const NON_RASTER_EXTENSIONS: &[&str] = &["pdf"];

/// Case-insensitive substring test. `query` must already be lowercase.
pub fn text_matches_search(text: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    text.to_lowercase().contains(query)
}

/// Maps a stored image reference to something displayable. References with a
/// known non-raster extension are pointed at their `.png` rendering; query and
/// fragment are kept.
pub fn resolve_image_url(reference: Option<&str>) -> Option<String> {
    let reference = reference?.trim();
    if reference.is_empty() {
        return None;
    }

    let split_at = reference.find(['?', '#']).unwrap_or(reference.len());
    let (path, suffix) = reference.split_at(split_at);

    let Some((stem, extension)) = path.rsplit_once('.') else {
        return Some(reference.to_string());
    };

    if extension.contains('/') {
        return Some(reference.to_string());
    }

    if NON_RASTER_EXTENSIONS.iter().any(|ext| extension.eq_ignore_ascii_case(ext)) {
        Some(format!("{stem}.png{suffix}"))
    } else {
        Some(reference.to_string())
    }
}

/// Shortens text to `max_chars` characters, adding an ellipsis when cut.
pub fn truncate_for_display(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
