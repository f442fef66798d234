use std::sync::Arc;

use vote_ledger_repository::VoteLedger;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn VoteLedger>,
    /// Expected `X-API-Key` value; `None` leaves the routes open.
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(ledger: Arc<dyn VoteLedger>, api_key: Option<String>) -> Self {
        Self {
            ledger,
            api_key: api_key.map(Arc::from),
        }
    }
}
