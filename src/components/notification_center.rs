//! Notification Center Component
//!
//! Bell button with an unread badge and a dropdown panel listing the
//! notifications held by the live channel.

use leptos::prelude::*;

use crate::models::{format_date_time, Notification};
use crate::notifications::{use_notifications, ConnectionState};

/// Badge text; nothing when all read, capped at "9+"
pub fn badge_label(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        1..=9 => Some(unread.to_string()),
        _ => Some("9+".to_string()),
    }
}

pub fn unread_summary(unread: usize) -> String {
    match unread {
        0 => "You're all caught up".to_string(),
        1 => "You have 1 unread notification".to_string(),
        n => format!("You have {} unread notifications", n),
    }
}

fn connection_label(state: ConnectionState) -> (&'static str, &'static str) {
    match state {
        ConnectionState::Open => ("connection-dot live", "Live updates on"),
        ConnectionState::Connecting => ("connection-dot pending", "Connecting..."),
        ConnectionState::Closed | ConnectionState::Disconnected => ("connection-dot off", "Live updates off"),
    }
}

#[component]
pub fn NotificationCenter() -> impl IntoView {
    let channel = use_notifications();
    let (open, set_open) = signal(false);

    view! {
        <div class="notification-center">
            <button
                class="notification-bell"
                title="Notifications"
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                "🔔"
                {move || badge_label(channel.unread_count()).map(|label| view! {
                    <span class="notification-badge">{label}</span>
                })}
            </button>

            <Show when=move || open.get()>
                <div class="notification-panel">
                    <div class="notification-panel-header">
                        <h3>"Notifications"</h3>
                        {move || {
                            let (class, title) = connection_label(channel.connection_state());
                            view! { <span class=class title=title></span> }
                        }}
                        <Show when=move || { channel.unread_count() > 0 }>
                            <button class="link-button" on:click=move |_| channel.mark_all_as_read()>
                                "Mark all read"
                            </button>
                        </Show>
                        <button class="icon-button" title="Close" on:click=move |_| set_open.set(false)>"✕"</button>
                    </div>
                    <p class="notification-summary">{move || unread_summary(channel.unread_count())}</p>

                    {move || {
                        let items = channel.notifications();
                        if items.is_empty() {
                            view! {
                                <div class="notification-empty">
                                    <span class="notification-empty-icon">"🔕"</span>
                                    <p>"No notifications yet"</p>
                                </div>
                            }.into_any()
                        } else {
                            view! {
                                <ul class="notification-list">
                                    {items.into_iter().map(|n| view! { <NotificationRow notification=n /> }).collect_view()}
                                </ul>
                            }.into_any()
                        }
                    }}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn NotificationRow(notification: Notification) -> impl IntoView {
    let channel = use_notifications();
    let id = StoredValue::new(notification.id.clone());
    let row_class = if notification.is_read {
        format!("notification-row {}", notification.kind.css_class())
    } else {
        format!("notification-row unread {}", notification.kind.css_class())
    };

    view! {
        <li class=row_class>
            <span class="notification-icon">{notification.kind.icon()}</span>
            <div class="notification-body">
                <p class="notification-title">{notification.title.clone()}</p>
                <p class="notification-message">{notification.message.clone()}</p>
                <p class="notification-time">{format_date_time(&notification.created_at)}</p>
            </div>
            <div class="notification-actions">
                {(!notification.is_read).then(|| view! {
                    <button
                        class="icon-button"
                        title="Mark as read"
                        on:click=move |_| id.with_value(|id| channel.mark_as_read(id))
                    >
                        "✓"
                    </button>
                })}
                <button
                    class="icon-button"
                    title="Dismiss"
                    on:click=move |_| id.with_value(|id| channel.dismiss(id))
                >
                    "✕"
                </button>
            </div>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_label() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(3).as_deref(), Some("3"));
        assert_eq!(badge_label(9).as_deref(), Some("9"));
        assert_eq!(badge_label(12).as_deref(), Some("9+"));
    }

    #[test]
    fn test_unread_summary() {
        assert_eq!(unread_summary(1), "You have 1 unread notification");
        assert_eq!(unread_summary(4), "You have 4 unread notifications");
        assert_eq!(unread_summary(0), "You're all caught up");
    }

    #[test]
    fn test_connection_label() {
        assert_eq!(connection_label(ConnectionState::Open).1, "Live updates on");
        assert_eq!(connection_label(ConnectionState::Closed).1, "Live updates off");
    }
}
