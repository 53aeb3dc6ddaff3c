use std::sync::Arc;

use crate::matcher::Matcher;
use crate::store::RecordStore;
use crate::vectorize::Vectorizer;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<Matcher>,
    pub vectorizer: Arc<Vectorizer>,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(
        matcher: Arc<Matcher>,
        vectorizer: Arc<Vectorizer>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            matcher,
            vectorizer,
            store,
        }
    }
}
