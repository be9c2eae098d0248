use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::store::NoteStore;

/// Application state containing shared resources. Cheap to clone; the inner
/// store and verifier are shared.
#[derive(Clone)]
pub struct AppState {
    notes: Arc<NoteStore>,
    verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self {
            notes: Arc::new(NoteStore::new()),
            verifier: Arc::new(verifier),
        }
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }
}
