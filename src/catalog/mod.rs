pub mod filter;
pub mod options;
pub mod query;
pub mod search;
pub mod sort;
pub mod state;


pub use filter::{
    matches,
    CardFilters,
    ExactFilters,
    Selection,
    StatMinimums,
    ALL,
};
pub use options::OptionLists;
pub use query::{
    parse_query,
    ParsedQuery,
    QueryField,
};
pub use sort::{
    compare,
    SortDirection,
    SortField,
    SortState,
};
pub use state::{
    CatalogChange,
    CatalogStore,
    CatalogView,
    LoadState,
};
