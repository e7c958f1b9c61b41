pub mod errors;
pub mod extract;
pub mod http;
pub mod import;
pub mod models;
pub mod names;
pub mod tasks;
pub mod utils;

pub use errors::CardexError;
pub use models::{
    BaseSize,
    Card,
    CardType,
    Stats,
};
