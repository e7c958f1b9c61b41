use crate::core::{
    utils::text_matches_search,
    Card,
};

/// `query` is the lowercased residual text from the search box.
pub fn matches_search(card: &Card, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    if text_matches_search(&card.display_name, query)
        || card.title.as_deref().is_some_and(|t| text_matches_search(t, query))
        || card.faction.as_deref().is_some_and(|f| text_matches_search(f, query))
        || card.subfaction.as_deref().is_some_and(|s| text_matches_search(s, query))
    {
        return true;
    }

    if card.keywords.iter().any(|k| text_matches_search(k, query)) {
        return true;
    }

    text_matches_search(&card.attacks, query)
}
