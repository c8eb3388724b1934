//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Case;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Cases the signed-in user created or is the opposite party of
    pub cases: Vec<Case>,
    /// Every case, loaded for the admin overview only
    pub all_cases: Vec<Case>,
    /// A case list request is in flight
    pub loading: bool,
    /// Last load failure, shown above the case list
    pub load_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace a case in both lists by ID
pub fn store_update_case(store: &AppStore, updated: Case) {
    for list in [store.cases(), store.all_cases()] {
        if let Some(case) = list.write().iter_mut().find(|case| case.id == updated.id) {
            *case = updated.clone();
        }
    }
}

/// Set the overall status of a case after an admin update
pub fn store_set_case_status(store: &AppStore, case_id: i64, status: &str) {
    for list in [store.cases(), store.all_cases()] {
        if let Some(case) = list.write().iter_mut().find(|case| case.id == case_id) {
            case.status = status.to_string();
        }
    }
}

/// Newly registered case goes to the top of the user's list
pub fn store_add_case(store: &AppStore, case: Case) {
    store.cases().write().insert(0, case);
}
