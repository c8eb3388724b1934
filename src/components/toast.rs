//! Toast Component
//!
//! Short-lived messages stacked in the corner. Each toast removes itself
//! after [`TOAST_MS`].

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::models::NotificationKind;

pub const TOAST_MS: u32 = 4_000;

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: u64,
    pub kind: NotificationKind,
    pub text: String,
}

/// Toast queue, provided via context
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<ToastMessage>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn push(&self, kind: NotificationKind, text: impl Into<String>) {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);
        self.items.update(|items| {
            items.push(ToastMessage {
                id,
                kind,
                text: text.into(),
            })
        });

        let items = self.items;
        Timeout::new(TOAST_MS, move || {
            items.try_update(|items| items.retain(|toast| toast.id != id));
        })
        .forget();
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NotificationKind::Success, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NotificationKind::Error, text);
    }

    fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|toast| toast.id != id));
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

/// Toast container, rendered once at the app root
#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.items.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("toast {}", toast.kind.css_class()) on:click=move |_| toasts.dismiss(id)>
                            <span class="toast-icon">{toast.kind.icon()}</span>
                            <span class="toast-text">{toast.text}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
