//! Case Status Tracker Component
//!
//! Progress bar plus the four-step timeline for one case.

use leptos::prelude::*;

use crate::cases::{CaseStatus, STATUS_STEPS};

fn status_icon(status: CaseStatus) -> &'static str {
    match status {
        CaseStatus::UnderReview => "📄",
        CaseStatus::InProgress => "⚠",
        CaseStatus::Resolved => "✓",
        CaseStatus::Pending | CaseStatus::Unknown => "⏱",
    }
}

#[component]
pub fn CaseStatusTracker(
    #[prop(into)] status: Signal<String>,
    #[prop(into, optional)] created_at: Option<String>,
    #[prop(into, optional)] updated_at: Option<String>,
) -> impl IntoView {
    let parsed = move || status.with(|s| CaseStatus::parse(s));

    view! {
        <section class="card status-tracker">
            <header class="card-header">
                <h3>"Case Progress"</h3>
                <span class=move || format!("status-badge {}", parsed().css_class())>
                    {move || status_icon(parsed())}
                    " "
                    {move || status.get()}
                </span>
            </header>

            <div class="progress-row">
                <span>"Progress"</span>
                <span>{move || format!("{}%", parsed().progress())}</span>
            </div>
            <div class="progress-track">
                <div class="progress-fill" style=move || format!("width: {}%", parsed().progress())></div>
            </div>

            <ol class="status-steps">
                {STATUS_STEPS.iter().enumerate().map(|(index, (_, name))| {
                    let reached = move || parsed().step_index().is_some_and(|current| index <= current);
                    let current = move || parsed().step_index() == Some(index);
                    view! {
                        <li class=move || if current() { "status-step current" } else { "status-step" }>
                            <span class=move || if reached() { "step-dot reached" } else { "step-dot" }>
                                {move || if reached() { "✓".to_string() } else { (index + 1).to_string() }}
                            </span>
                            <div class="step-text">
                                <p class="step-name">{*name}</p>
                                <Show when=current>
                                    <p class="step-note">"Current status"</p>
                                </Show>
                            </div>
                        </li>
                    }
                }).collect_view()}
            </ol>

            <footer class="status-dates">
                {created_at.map(|at| view! { <p>"Submitted: " {at}</p> })}
                {updated_at.map(|at| view! { <p>"Last updated: " {at}</p> })}
            </footer>
        </section>
    }
}
