use crate::core::Card;

pub type CatalogResult = Result<Vec<Card>, String>;

/// Identifies one catalog fetch. Issued by the store; only the latest ticket's
/// result is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(pub u64);

#[derive(Debug, Clone)]
pub enum TaskResult {
    CatalogFetched { ticket: FetchTicket, result: CatalogResult },
    LoadingMessage(String),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::CatalogFetched { .. } => "catalog_fetch",
            TaskResult::LoadingMessage(_) => "loading_message",
        }
    }
}
