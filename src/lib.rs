//! Card catalog browser: loads a JSON card catalog and answers filter, search
//! and sort queries over it.
//!
//! The search box accepts free text mixed with exact stat constraints such as
//! `sonnia df:6`. See [`catalog::query`] for the grammar.

pub mod catalog;
pub mod core;
pub mod display;
pub mod persistence;
pub mod settings;

pub use crate::{
    catalog::{
        CardFilters,
        CatalogChange,
        CatalogStore,
        CatalogView,
        LoadState,
        OptionLists,
        SortDirection,
        SortField,
        SortState,
    },
    core::{
        names::normalize,
        Card,
        CardType,
        CardexError,
    },
    settings::SettingsData,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
