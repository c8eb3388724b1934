//! Admin Overview
//!
//! Every case grouped by overall status, with type filter, per-type counts
//! and a status update control.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::case_form::CASE_TYPES;
use crate::cases::{case_type_icon, filter_overall, overall_counts, type_counts, CaseStatus, StatusFilter, STATUS_STEPS};
use crate::components::use_toasts;
use crate::config::use_config;
use crate::context::use_app_context;
use crate::models::{format_date, Case};
use crate::session::use_session;
use crate::store::{store_set_case_status, use_app_store, AppStateStoreFields};

const STATUS_TABS: &[(&str, &str)] = &[
    ("pending", "Pending"),
    ("in progress", "In Progress"),
    ("resolved", "Resolved"),
];

#[component]
pub fn AdminPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let session = use_session();
    let config = use_config();
    let toasts = use_toasts();
    let (tab, set_tab) = signal("pending");
    let (type_filter, set_type_filter) = signal("all".to_string());

    Effect::new({
        let config = config.clone();
        move |_| {
            let _ = ctx.reload_trigger.get();
            let current = session.get();
            if !current.is_admin() {
                return;
            }
            let config = config.clone();
            store.loading().set(true);
            spawn_local(async move {
                match api::list_all_cases(&config, &current).await {
                    Ok(cases) => {
                        log::info!("loaded {} cases for admin overview", cases.len());
                        store.all_cases().set(cases);
                    }
                    Err(e) => {
                        log::error!("failed to load all cases: {}", e);
                        toasts.error("Failed to fetch cases. Please try again.");
                    }
                }
                store.loading().set(false);
            });
        }
    });

    let update_status = Callback::new(move |(case_id, status): (i64, String)| {
        let config = config.clone();
        let current = session.get_untracked();
        spawn_local(async move {
            match api::update_case_status(&config, &current, case_id, &status).await {
                Ok(_) => {
                    store_set_case_status(&store, case_id, &status);
                    toasts.success(format!("Case #{} marked {}", case_id, status));
                }
                Err(e) => {
                    log::error!("status update for case #{} failed: {}", case_id, e);
                    toasts.error("Failed to update case status");
                }
            }
        });
    });

    let counts = move || store.all_cases().with(|cases| overall_counts(cases));

    view! {
        <div class="page admin">
            <div class="page-header">
                <div>
                    <h1>"Admin Dashboard"</h1>
                    <p class="muted">"Manage all cases and monitor system activity"</p>
                </div>
            </div>

            <div class="stat-grid">
                <div class="card stat-card"><p class="stat-label">"Total Cases"</p><p class="stat-value">{move || counts().total}</p></div>
                <div class="card stat-card"><p class="stat-label">"Pending"</p><p class="stat-value">{move || counts().pending}</p></div>
                <div class="card stat-card"><p class="stat-label">"In Progress"</p><p class="stat-value">{move || counts().in_progress}</p></div>
                <div class="card stat-card"><p class="stat-label">"Resolved"</p><p class="stat-value">{move || counts().resolved}</p></div>
            </div>

            <div class="card">
                <h3>"Cases by Type"</h3>
                <ul class="type-counts">
                    {move || {
                        let counts = store.all_cases().with(|cases| type_counts(cases, CASE_TYPES));
                        CASE_TYPES.iter().zip(counts).map(|(t, n)| view! {
                            <li>
                                <span>{case_type_icon(t)} " " {*t}</span>
                                <span class="type-count">{n}</span>
                            </li>
                        }).collect_view()
                    }}
                </ul>
            </div>

            <div class="card">
                <div class="card-header">
                    <h3>"Case Management"</h3>
                    <select on:change=move |ev| set_type_filter.set(event_target_value(&ev))>
                        <option value="all">"All Types"</option>
                        {CASE_TYPES.iter().map(|t| view! { <option value=t.to_lowercase()>{*t}</option> }).collect_view()}
                    </select>
                </div>

                <div class="tabs">
                    {STATUS_TABS.iter().map(|(value, label)| view! {
                        <button
                            class=move || if tab.get() == *value { "tab active" } else { "tab" }
                            on:click=move |_| set_tab.set(*value)
                        >
                            {*label}
                        </button>
                    }).collect_view()}
                </div>

                {move || {
                    let status = tab.get();
                    let cases = store.all_cases().with(|cases| {
                        filter_overall(cases, StatusFilter::parse(status), &type_filter.get())
                    });
                    if cases.is_empty() {
                        view! { <p class="empty-state">{format!("No {} cases found", status)}</p> }.into_any()
                    } else {
                        view! {
                            <div class="case-list">
                                {cases.into_iter().map(|case| view! { <AdminCaseRow case=case on_status=update_status /> }).collect_view()}
                            </div>
                        }.into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn AdminCaseRow(case: Case, on_status: Callback<(i64, String)>) -> impl IntoView {
    let case_id = case.id;
    let status = CaseStatus::parse(&case.status);

    view! {
        <article class="case-row">
            <div class="case-row-main">
                <h4>
                    <span class="case-type-icon">{case_type_icon(&case.case_type)}</span>
                    {format!(" Case #{} • {}", case.id, case.case_type)}
                </h4>
                <p class="case-description">{case.description.clone()}</p>
                <p class="muted">
                    {format!("Opposite party: {} • Created {}", case.opposite_party_name, format_date(&case.created_at))}
                </p>
            </div>
            <div class="case-row-actions">
                <span class=format!("status-badge {}", status.css_class())>{case.status.clone()}</span>
                <select
                    prop:value=status.as_str()
                    on:change=move |ev| on_status.run((case_id, event_target_value(&ev)))
                >
                    {STATUS_STEPS.iter().map(|(step, _)| view! {
                        <option value=step.as_str()>{step.as_str()}</option>
                    }).collect_view()}
                </select>
            </div>
        </article>
    }
}
