//! UI Components
//!
//! Reusable Leptos components.

mod autocomplete_input;
mod case_status_tracker;
mod navbar;
mod notification_center;
mod toast;

pub use autocomplete_input::AutocompleteInput;
pub use case_status_tracker::CaseStatusTracker;
pub use navbar::Navbar;
pub use notification_center::NotificationCenter;
pub use toast::{use_toasts, ToastStack, Toasts};
