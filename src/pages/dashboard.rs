//! User Dashboard
//!
//! The signed-in user's cases with per-status counts, a status filter and
//! an expandable progress tracker per case.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::cases::{case_type_icon, filter_for_viewer, status_of, viewer_counts, CaseStatus, StatusFilter};
use crate::components::{use_toasts, CaseStatusTracker};
use crate::config::use_config;
use crate::context::{use_app_context, Page};
use crate::models::{format_date, Case};
use crate::session::use_session;
use crate::store::{store_update_case, use_app_store, AppStateStoreFields};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let session = use_session();
    let config = use_config();
    let toasts = use_toasts();
    let (filter, set_filter) = signal(StatusFilter::All);

    // Load cases when the session or reload trigger changes
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let current = session.get();
        if !current.is_authenticated() {
            return;
        }
        let config = config.clone();
        store.loading().set(true);
        spawn_local(async move {
            match api::list_user_cases(&config, &current).await {
                Ok(cases) => {
                    log::info!("loaded {} cases", cases.len());
                    store.cases().set(cases);
                    store.load_error().set(None);
                }
                Err(e) => {
                    log::error!("failed to load cases: {}", e);
                    store.load_error().set(Some(e.to_string()));
                    toasts.error("Failed to fetch cases. Please try again.");
                }
            }
            store.loading().set(false);
        });
    });

    let viewer = move || session.with(|s| s.user_id());
    let viewer_untracked = move || session.with_untracked(|s| s.user_id());
    let counts = move || store.cases().with(|cases| viewer_counts(cases, viewer()));
    let visible = move || store.cases().with(|cases| filter_for_viewer(cases, viewer(), filter.get()));

    view! {
        <div class="page dashboard">
            <div class="page-header">
                <div>
                    <h1>{move || format!("Welcome back, {}", session.with(|s| s.user.as_ref().map(|u| u.name.clone()).unwrap_or_default()))}</h1>
                    <p class="muted">"Manage your cases and track their progress"</p>
                </div>
                <button class="primary" on:click=move |_| ctx.navigate(Page::NewCase)>"+ Register New Case"</button>
            </div>

            <div class="stat-grid">
                <StatCard label="Total Cases" value=Signal::derive(move || counts().total) />
                <StatCard label="Pending" value=Signal::derive(move || counts().pending) />
                <StatCard label="In Progress" value=Signal::derive(move || counts().in_progress) />
                <StatCard label="Resolved" value=Signal::derive(move || counts().resolved) />
            </div>

            <div class="filter-row">
                <label for="status-filter">"Filter"</label>
                <select
                    id="status-filter"
                    on:change=move |ev| set_filter.set(StatusFilter::parse(&event_target_value(&ev)))
                >
                    <option value="all">"All Cases"</option>
                    <option value="pending">"Pending"</option>
                    <option value="in progress">"In Progress"</option>
                    <option value="resolved">"Resolved"</option>
                </select>
            </div>

            <Show when=move || store.load_error().with(Option::is_some)>
                <p class="error-banner">{move || store.load_error().get().unwrap_or_default()}</p>
            </Show>

            <Show
                when=move || !(store.loading().get() && store.cases().with(Vec::is_empty))
                fallback=|| view! { <div class="card loading-card">"Loading cases..."</div> }
            >
                <Show
                    when=move || !visible().is_empty()
                    fallback=move || {
                        let message = match filter.get() {
                            StatusFilter::All => "You haven't registered any cases yet.".to_string(),
                            StatusFilter::Only(status) => format!("No {} cases found.", status.as_str()),
                        };
                        view! {
                            <div class="card empty-state">
                                <h3>"No cases found"</h3>
                                <p class="muted">{message}</p>
                                <button class="primary" on:click=move |_| ctx.navigate(Page::NewCase)>"Register Your First Case"</button>
                            </div>
                        }
                    }
                >
                    <div class="case-grid">
                        <For
                            each=visible
                            key=|case| case.id
                            children=move |case| view! { <CaseCard case=case viewer=viewer_untracked() /> }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, #[prop(into)] value: Signal<usize>) -> impl IntoView {
    view! {
        <div class="card stat-card">
            <p class="stat-label">{label}</p>
            <p class="stat-value">{move || value.get()}</p>
        </div>
    }
}

#[component]
fn CaseCard(case: Case, viewer: Option<i64>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let session = use_session();
    let config = use_config();
    let (expanded, set_expanded) = signal(false);
    let case_id = case.id;

    // Status follows the store, so a refresh keeps the card (and its tracker) mounted
    let status = Memo::new(move |_| store.cases().with(|cases| status_of(cases, case_id, viewer)));

    // Opening the tracker refreshes the case so the timeline is current
    let on_toggle = move |_| {
        let opening = !expanded.get_untracked();
        set_expanded.set(opening);
        if !opening {
            return;
        }
        let config = config.clone();
        let current = session.get_untracked();
        spawn_local(async move {
            match api::get_case(&config, &current, case_id).await {
                Ok(fresh) => store_update_case(&store, fresh),
                Err(e) => log::warn!("could not refresh case #{}: {}", case_id, e),
            }
        });
    };
    let created = format_date(&case.created_at);
    let updated = case.updated_at.as_deref().map(format_date);
    let created_for_tracker = created.clone();

    view! {
        <article class="card case-card">
            <header class="case-card-header">
                <h3>
                    <span class="case-type-icon">{case_type_icon(&case.case_type)}</span>
                    " "
                    {case.case_type.clone()}
                </h3>
                <span class=move || format!("status-badge {}", CaseStatus::parse(&status.get()).css_class())>
                    {move || status.get()}
                </span>
            </header>
            <p class="muted">{format!("Case #{} • Created {}", case.id, created)}</p>
            <p class="case-label">"Description:"</p>
            <p class="case-description">{case.description.clone()}</p>
            <p class="case-label">"Opposite Party:"</p>
            <p>{case.opposite_party_name.clone()}</p>
            <div class="case-card-actions">
                <button class="secondary" on:click=on_toggle>
                    {move || if expanded.get() { "Hide Progress" } else { "View Progress" }}
                </button>
                <button class="secondary" on:click=move |_| ctx.navigate(Page::CaseDetail(case_id))>
                    "View Details"
                </button>
            </div>
            <Show when=move || expanded.get()>
                <CaseStatusTracker
                    status=status
                    created_at=created_for_tracker.clone()
                    updated_at=updated.clone().unwrap_or_else(|| "-".to_string())
                />
            </Show>
        </article>
    }
}
