//! ResolveIt Frontend App
//!
//! Provides config, session, toasts and the store, mounts the live
//! notification channel and switches between pages.

use leptos::prelude::*;

use crate::components::{Navbar, ToastStack, Toasts};
use crate::config::AppConfig;
use crate::context::{use_app_context, Access, AppContext, Page};
use crate::notifications::NotificationProvider;
use crate::pages::{AdminPage, CaseDetailPage, DashboardPage, HelpPage, NewCasePage, ProfilePage, SignInPage};
use crate::session::{Session, SessionSignal};
use crate::store::{AppState, AppStore};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let session: SessionSignal = RwSignal::new(Session::load());
    let initial = Page::home(&session.get_untracked());
    let (page, set_page) = signal(initial);
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    // Provide context to all children
    provide_context(config);
    provide_context(session);
    provide_context(Toasts::new());
    provide_context(AppStore::new(AppState::new()));
    provide_context(AppContext::new((page, set_page), (reload_trigger, set_reload_trigger)));

    Effect::new(move |_| {
        let title = format!("{} - ResolveIt", page.get().title());
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(&title);
        }
    });

    view! {
        <NotificationProvider>
            <div class="app-layout">
                <Navbar />
                <main class="main-content">
                    {move || {
                        let current = page.get();
                        match session.with(|s| current.access(s)) {
                            Access::SignInRequired => view! { <SignInNotice /> }.into_any(),
                            Access::Denied => view! { <AccessDenied /> }.into_any(),
                            Access::Granted => match current {
                                Page::Dashboard => view! { <DashboardPage /> }.into_any(),
                                Page::NewCase => view! { <NewCasePage /> }.into_any(),
                                Page::CaseDetail(id) => view! { <CaseDetailPage case_id=id /> }.into_any(),
                                Page::Admin => view! { <AdminPage /> }.into_any(),
                                Page::Profile => view! { <ProfilePage /> }.into_any(),
                                Page::Help => view! { <HelpPage /> }.into_any(),
                                Page::SignIn => view! { <SignInPage /> }.into_any(),
                            },
                        }
                    }}
                </main>
                <ToastStack />
            </div>
        </NotificationProvider>
    }
}

#[component]
fn SignInNotice() -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <div class="card notice">
            <h2>"Sign in required"</h2>
            <p class="muted">"Sign in to view and manage your cases."</p>
            <button class="primary" on:click=move |_| ctx.navigate(Page::SignIn)>"Sign In"</button>
        </div>
    }
}

#[component]
fn AccessDenied() -> impl IntoView {
    view! {
        <div class="card notice">
            <h2>"Access Denied"</h2>
            <p class="muted">"You don't have permission to access this page."</p>
        </div>
    }
}
