//! Case Detail Page
//!
//! Full record of one case: overview, opposite party, legal status,
//! evidence and the progress timeline.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::cases::{case_type_icon, viewer_status, CaseStatus};
use crate::components::{use_toasts, CaseStatusTracker};
use crate::config::use_config;
use crate::context::{use_app_context, Page};
use crate::models::{format_date, Case};
use crate::session::use_session;
use crate::store::{store_update_case, use_app_store};

#[derive(Debug, Clone, PartialEq)]
enum Load {
    Pending,
    Found(Case),
    Missing,
}

#[component]
pub fn CaseDetailPage(case_id: i64) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let session = use_session();
    let config = use_config();
    let toasts = use_toasts();
    let load = RwSignal::new(Load::Pending);

    {
        let current = session.get_untracked();
        spawn_local(async move {
            match api::get_case(&config, &current, case_id).await {
                Ok(case) => {
                    store_update_case(&store, case.clone());
                    load.try_set(Load::Found(case));
                }
                Err(e) => {
                    log::warn!("could not load case #{}: {}", case_id, e);
                    load.try_set(Load::Missing);
                    toasts.error("Failed to fetch case details. Please try again.");
                }
            }
        });
    }

    view! {
        <div class="page case-detail">
            <button class="link-button" on:click=move |_| ctx.navigate(Page::Dashboard)>"← Back to Dashboard"</button>
            {move || match load.get() {
                Load::Pending => view! { <div class="card loading-card">"Loading case..."</div> }.into_any(),
                Load::Missing => view! {
                    <div class="card empty-state">
                        <h3>"Case Not Found"</h3>
                        <p class="muted">"The requested case could not be found."</p>
                    </div>
                }.into_any(),
                Load::Found(case) => {
                    let viewer = session.with_untracked(|s| s.user_id());
                    view! { <CaseRecord case=case viewer=viewer /> }.into_any()
                }
            }}
        </div>
    }
}

#[component]
fn CaseRecord(case: Case, viewer: Option<i64>) -> impl IntoView {
    let status = viewer_status(&case, viewer).to_string();
    let badge_class = format!("status-badge {}", CaseStatus::parse(&status).css_class());
    let created = format_date(&case.created_at);
    let updated = case
        .updated_at
        .as_deref()
        .filter(|u| *u != case.created_at)
        .map(format_date);
    let legal = case.is_in_court.then(|| {
        let number = case.case_or_fir_number.clone().filter(|s| !s.is_empty());
        let court = case.court_or_police_name.clone().filter(|s| !s.is_empty());
        view! {
            <section class="card">
                <h3>"Legal Status"</h3>
                <p><span class="badge">"In Court"</span>" This case is currently in legal proceedings"</p>
                {number.map(|n| view! { <p class="case-label">"FIR/Case Number"</p><p>{n}</p> })}
                {court.map(|c| view! { <p class="case-label">"Court/Police Station"</p><p>{c}</p> })}
            </section>
        }
    });
    let evidence = case.proof_file.is_some().then(|| {
        let uploaded = created.clone();
        view! {
            <section class="card">
                <h3>"Supporting Evidence"</h3>
                <p>"Evidence File"</p>
                <p class="muted">{format!("Uploaded on {}", uploaded)}</p>
            </section>
        }
    });

    view! {
        <div class="case-detail-grid">
            <div class="case-detail-main">
                <header class="page-header">
                    <div>
                        <h1>"Case Details"</h1>
                        <p class="muted">{format!("Case #{}", case.id)}</p>
                    </div>
                    <span class=badge_class.clone()>{status.clone()}</span>
                </header>

                <section class="card">
                    <h2>
                        <span class="case-type-icon">{case_type_icon(&case.case_type)}</span>
                        {format!(" {} Case", case.case_type)}
                    </h2>
                    <p class="muted">{format!("Registered on {}", created)}</p>
                    <p class="case-label">"Case Description"</p>
                    <p class="case-description">{case.description.clone()}</p>
                </section>

                <section class="card">
                    <h3>"Opposite Party Information"</h3>
                    <p class="case-label">"Name"</p>
                    <p>{case.opposite_party_name.clone()}</p>
                    <p class="case-label">"Phone"</p>
                    <p>{case.opposite_party_phone.clone().unwrap_or_else(|| "-".to_string())}</p>
                    <p class="case-label">"Address"</p>
                    <p>{case.opposite_party_address.clone().unwrap_or_else(|| "-".to_string())}</p>
                </section>

                {legal}
                {evidence}
            </div>

            <aside class="case-detail-side">
                <CaseStatusTracker
                    status=status.clone()
                    created_at=created.clone()
                    updated_at=updated.clone().unwrap_or_else(|| "-".to_string())
                />
                <section class="card">
                    <h3>"Case Information"</h3>
                    <dl class="case-facts">
                        <dt>"Case ID"</dt><dd>{format!("#{}", case.id)}</dd>
                        <dt>"Type"</dt><dd>{case.case_type.clone()}</dd>
                        <dt>"Status"</dt><dd><span class=badge_class>{status}</span></dd>
                        <dt>"Created"</dt><dd>{created}</dd>
                        {updated.map(|u| view! { <dt>"Last Updated"</dt><dd>{u}</dd> })}
                    </dl>
                </section>
            </aside>
        </div>
    }
}
