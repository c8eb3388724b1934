//! Navbar Component
//!
//! Brand, page links for the current role, the notification bell and the
//! user menu.

use leptos::prelude::*;

use crate::components::NotificationCenter;
use crate::context::{use_app_context, Page};
use crate::session::{self, use_session};

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_app_context();
    let session = use_session();
    let (menu_open, set_menu_open) = signal(false);

    let nav_link = move |page: Page, label: &'static str| {
        view! {
            <button
                class=move || if ctx.page.get() == page { "nav-link active" } else { "nav-link" }
                on:click=move |_| {
                    set_menu_open.set(false);
                    ctx.navigate(page);
                }
            >
                {label}
            </button>
        }
    };

    let on_logout = move |_| {
        set_menu_open.set(false);
        session::logout();
        ctx.navigate(Page::SignIn);
    };

    view! {
        <header class="navbar">
            <div class="navbar-brand">
                <span class="navbar-logo">"⚖"</span>
                <span class="navbar-title">"ResolveIt"</span>
            </div>

            <nav class="navbar-links">
                {move || {
                    let current = session.get();
                    match current.user {
                        None => view! {
                            {nav_link(Page::Help, "Help")}
                            {nav_link(Page::SignIn, "Sign In")}
                        }.into_any(),
                        Some(user) => {
                            let home = if user.is_admin() {
                                nav_link(Page::Admin, "Admin Dashboard")
                            } else {
                                nav_link(Page::Dashboard, "Dashboard")
                            };
                            let name = user.name.clone();
                            let email = user.email.clone().unwrap_or_default();
                            let initial = user.initial();
                            let title = user.name.clone();
                            view! {
                                {home}
                                {nav_link(Page::Help, "Help")}
                                <NotificationCenter />
                                <div class="user-menu">
                                    <button class="avatar" title=title on:click=move |_| set_menu_open.update(|o| *o = !*o)>
                                        {initial}
                                    </button>
                                    <Show when=move || menu_open.get()>
                                        <div class="user-menu-panel">
                                            <p class="user-menu-name">{name.clone()}</p>
                                            <p class="user-menu-email">{email.clone()}</p>
                                            <hr />
                                            <button
                                                class="user-menu-item"
                                                on:click=move |_| {
                                                    set_menu_open.set(false);
                                                    ctx.navigate(Page::Profile);
                                                }
                                            >
                                                "Profile"
                                            </button>
                                            <button class="user-menu-item" on:click=on_logout>"Log out"</button>
                                        </div>
                                    </Show>
                                </div>
                            }.into_any()
                        }
                    }
                }}
            </nav>
        </header>
    }
}
