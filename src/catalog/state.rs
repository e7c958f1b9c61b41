use super::{
    filter::{
        self,
        CardFilters,
    },
    options::OptionLists,
    query::{
        parse_query,
        ParsedQuery,
    },
    sort::{
        self,
        SortField,
        SortState,
    },
};
use crate::core::{
    import::import_catalog,
    tasks::{
        CatalogResult,
        FetchTicket,
        TaskResult,
    },
    Card,
    CardexError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// One user action against the store.
#[derive(Debug, Clone)]
pub enum CatalogChange {
    SetFilters(CardFilters),
    ResetFilters,
    SetSearch(String),
    SetSort(SortState),
    ToggleSort(SortField),
    ClearSort,
    ReplaceCatalog(Vec<Card>),
}

/// Filtered and sorted cards, borrowed from the store.
#[derive(Debug, Clone, Copy)]
pub struct CatalogView<'a> {
    cards: &'a [Card],
    indices: &'a [usize],
}

impl<'a> CatalogView<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&'a Card> {
        self.indices.get(position).and_then(|&idx| self.cards.get(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Card> + 'a {
        let (cards, indices) = (self.cards, self.indices);
        indices.iter().filter_map(move |&idx| cards.get(idx))
    }

    pub fn indices(&self) -> &'a [usize] {
        self.indices
    }
}

/// Owns the catalog and the selected filter, search and sort state. The view
/// is derived lazily: every change marks it dirty and the next `view()`
/// rebuilds it in full.
pub struct CatalogStore {
    cards: Vec<Card>,
    filters: CardFilters,
    search: String,
    parsed_query: ParsedQuery,
    sort: SortState,
    visible_indices: Vec<usize>,
    dirty: bool,
    load_state: LoadState,
    latest_fetch: u64,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            filters: CardFilters::default(),
            search: String::new(),
            parsed_query: ParsedQuery::default(),
            sort: SortState::default(),
            visible_indices: Vec::new(),
            dirty: true,
            load_state: LoadState::Idle,
            latest_fetch: 0,
        }
    }
}

impl CatalogStore {
    pub fn new(cards: Vec<Card>) -> Self {
        let mut store = Self::default();
        store.replace_catalog(cards);
        store
    }

    pub fn apply_change(&mut self, change: CatalogChange) {
        match change {
            CatalogChange::SetFilters(filters) => {
                if self.filters != filters {
                    self.filters = filters;
                    self.mark_dirty();
                }
            }
            CatalogChange::ResetFilters => {
                self.filters = CardFilters::default();
                self.mark_dirty();
            }
            CatalogChange::SetSearch(search) => self.set_search(search),
            CatalogChange::SetSort(sort) => {
                if self.sort != sort {
                    self.sort = sort;
                    self.mark_dirty();
                }
            }
            CatalogChange::ToggleSort(field) => {
                self.sort.toggle_or_set(field);
                self.mark_dirty();
            }
            CatalogChange::ClearSort => {
                if self.sort.field.is_some() {
                    self.sort = SortState::new(None, self.sort.direction);
                    self.mark_dirty();
                }
            }
            CatalogChange::ReplaceCatalog(cards) => {
                self.supersede_fetches();
                self.replace_catalog(cards);
            }
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn set_search(&mut self, search: String) {
        if self.search != search {
            self.parsed_query = parse_query(&search);
            self.search = search;
            self.dirty = true;
        }
    }

    fn replace_catalog(&mut self, cards: Vec<Card>) {
        log::info!("Catalog replaced with {} cards", cards.len());
        self.cards = cards;
        self.load_state = LoadState::Loaded;
        self.dirty = true;
    }

    /// Makes every outstanding fetch ticket stale so a slower fetch can't
    /// overwrite a catalog supplied by hand.
    fn supersede_fetches(&mut self) {
        if self.load_state == LoadState::Loading {
            log::info!("Catalog supplied while fetch #{} was running", self.latest_fetch);
        }
        self.latest_fetch += 1;
    }

    pub fn view(&mut self) -> CatalogView<'_> {
        if self.dirty {
            self.recompute_indices();
        }
        CatalogView { cards: &self.cards, indices: &self.visible_indices }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: &str) -> Result<&Card, CardexError> {
        self.cards
            .iter()
            .find(|card| card.id == id)
            .ok_or_else(|| CardexError::UnknownCard(id.to_string()))
    }

    pub fn filters(&self) -> &CardFilters {
        &self.filters
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn parsed_query(&self) -> &ParsedQuery {
        &self.parsed_query
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn options(&self) -> OptionLists {
        OptionLists::from_cards(&self.cards)
    }

    /// Starts a fetch. Any fetch started earlier is superseded.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_fetch += 1;
        self.load_state = LoadState::Loading;
        FetchTicket(self.latest_fetch)
    }

    /// Applies a fetch result if `ticket` is the latest one issued. Returns
    /// whether the result was used. A failure keeps the current catalog.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: CatalogResult) -> bool {
        if ticket.0 != self.latest_fetch {
            log::warn!(
                "Dropping stale catalog fetch #{} (latest is #{})",
                ticket.0,
                self.latest_fetch
            );
            return false;
        }

        match result {
            Ok(cards) => self.replace_catalog(cards),
            Err(message) => {
                log::warn!("Catalog fetch failed: {}", message);
                self.load_state = LoadState::Failed(message);
            }
        }
        true
    }

    pub fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::CatalogFetched { ticket, result } => {
                self.finish_fetch(ticket, result);
            }
            TaskResult::LoadingMessage(message) => log::info!("{}", message),
        }
    }

    /// Replaces the catalog with a pasted JSON array. On error the catalog is
    /// left as it was.
    pub fn import_json(&mut self, text: &str) -> Result<usize, CardexError> {
        let cards = import_catalog(text)?;
        let count = cards.len();
        self.supersede_fetches();
        self.replace_catalog(cards);
        Ok(count)
    }

    fn recompute_indices(&mut self) {
        self.visible_indices.clear();

        for (idx, card) in self.cards.iter().enumerate() {
            if filter::matches(card, &self.filters, &self.parsed_query) {
                self.visible_indices.push(idx);
            }
        }

        sort::sort_indices(
            &mut self.visible_indices,
            &self.cards,
            self.sort.field,
            self.sort.direction,
        );

        log::debug!(
            "Recomputed view: {} of {} cards visible",
            self.visible_indices.len(),
            self.cards.len()
        );
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        catalog::sort::SortDirection,
        core::{
            models::cards_from_value,
            CardType,
        },
    };

    fn store() -> CatalogStore {
        CatalogStore::new(cards_from_value(&json!([
            {"id": "a", "name": "A", "cost": 4, "type": "Model"},
            {"id": "b", "name": "B", "cost": 10, "type": "Crew"},
        ])))
    }

    fn ids(store: &mut CatalogStore) -> Vec<String> {
        store.view().iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_filter_chaining() {
        let mut store = store();
        let filters = CardFilters {
            card_type: Some(CardType::Model),
            cost_min: 0,
            cost_max: 5,
            ..CardFilters::default()
        };
        store.apply_change(CatalogChange::SetFilters(filters));
        assert_eq!(ids(&mut store), vec!["a"]);

        store.apply_change(CatalogChange::ResetFilters);
        assert_eq!(ids(&mut store), vec!["a", "b"]);
    }

    #[test]
    fn test_search_and_sort_changes_rederive() {
        let mut store = store();
        store.apply_change(CatalogChange::ToggleSort(SortField::Name));
        assert_eq!(ids(&mut store), vec!["b", "a"]);

        store.apply_change(CatalogChange::SetSearch("cost:4".to_string()));
        assert_eq!(ids(&mut store), vec!["a"]);
        assert_eq!(store.search(), "cost:4");

        store.apply_change(CatalogChange::SetSearch(String::new()));
        store.apply_change(CatalogChange::SetSort(SortState::new(
            Some(SortField::Cost),
            SortDirection::Descending,
        )));
        assert_eq!(ids(&mut store), vec!["b", "a"]);
    }

    #[test]
    fn test_view_does_not_reorder_catalog() {
        let mut store = store();
        store.apply_change(CatalogChange::SetSort(SortState::new(
            Some(SortField::Cost),
            SortDirection::Descending,
        )));
        let _ = store.view();
        assert_eq!(store.cards()[0].id, "a");
    }

    #[test]
    fn test_stale_fetch_is_dropped() {
        let mut store = store();
        let first = store.begin_fetch();
        let second = store.begin_fetch();
        assert_eq!(store.load_state(), &LoadState::Loading);

        let fresh = cards_from_value(&json!([{"id": "new"}]));
        assert!(store.finish_fetch(second, Ok(fresh)));

        let stale = cards_from_value(&json!([{"id": "old"}]));
        assert!(!store.finish_fetch(first, Ok(stale)));

        assert_eq!(ids(&mut store), vec!["new"]);
        assert_eq!(store.load_state(), &LoadState::Loaded);
    }

    #[test]
    fn test_failed_fetch_keeps_catalog() {
        let mut store = store();
        let ticket = store.begin_fetch();
        store.handle_task_result(TaskResult::CatalogFetched {
            ticket,
            result: Err("HTTP error 500".to_string()),
        });
        assert_eq!(store.load_state(), &LoadState::Failed("HTTP error 500".to_string()));
        assert_eq!(store.cards().len(), 2);
    }

    #[test]
    fn test_import_json() {
        let mut store = store();
        assert!(store.import_json(r#"{"not": "an array"}"#).is_err());
        assert_eq!(store.cards().len(), 2);

        assert_eq!(store.import_json(r#"[{"id": "z", "name": "Zoraida"}]"#).unwrap(), 1);
        assert_eq!(ids(&mut store), vec!["z"]);
    }

    #[test]
    fn test_import_supersedes_running_fetch() {
        let mut store = store();
        let ticket = store.begin_fetch();

        assert_eq!(store.import_json(r#"[{"id": "imported"}]"#).unwrap(), 1);
        assert_eq!(store.load_state(), &LoadState::Loaded);

        let fetched = cards_from_value(&json!([{"id": "fetched"}]));
        assert!(!store.finish_fetch(ticket, Ok(fetched)));
        assert_eq!(ids(&mut store), vec!["imported"]);
        assert_eq!(store.load_state(), &LoadState::Loaded);
    }

    #[test]
    fn test_replace_catalog_supersedes_running_fetch() {
        let mut store = store();
        let ticket = store.begin_fetch();
        store.apply_change(CatalogChange::ReplaceCatalog(cards_from_value(&json!([
            {"id": "local"}
        ]))));

        assert!(!store.finish_fetch(ticket, Err("HTTP error 500".to_string())));
        assert_eq!(ids(&mut store), vec!["local"]);
        assert_eq!(store.load_state(), &LoadState::Loaded);
    }

    #[test]
    fn test_card_lookup() {
        let store = store();
        assert_eq!(store.card("b").unwrap().name, "B");
        assert!(matches!(store.card("nope"), Err(CardexError::UnknownCard(_))));
    }
}
