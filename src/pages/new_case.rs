//! New Case Page
//!
//! Case registration form. The opposite party's name field searches
//! registered users; picking one fills in their contact details.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::case_form::{check_proof_size, CaseForm, CASE_TYPES};
use crate::components::{use_toasts, AutocompleteInput};
use crate::config::use_config;
use crate::context::{use_app_context, Page};
use crate::models::User;
use crate::session::use_session;
use crate::store::{store_add_case, use_app_store};

#[component]
pub fn NewCasePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let session = use_session();
    let config = use_config();
    let toasts = use_toasts();

    let form = RwSignal::new(CaseForm::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);
    let proof = StoredValue::new_local(None::<web_sys::File>);
    let (proof_name, set_proof_name) = signal::<Option<String>>(None);
    let proof_ref = NodeRef::<html::Input>::new();

    let search = {
        let config = config.clone();
        move |query: String| {
            let config = config.clone();
            let session = session.get_untracked();
            async move { api::search_users(&config, &session, &query).await }
        }
    };

    let on_user_select = move |user: User| {
        form.update(|f| f.apply_user(&user));
        set_error.set(None);
        toasts.success(format!("{}'s information has been auto-filled.", user.name));
    };

    let on_proof_change = move |_| {
        let Some(input) = proof_ref.get_untracked() else { return };
        let file = input.files().and_then(|files| files.get(0));
        match file {
            Some(file) => match check_proof_size(file.size()) {
                Ok(()) => {
                    set_proof_name.set(Some(file.name()));
                    proof.set_value(Some(file));
                }
                Err(e) => {
                    input.set_value("");
                    set_proof_name.set(None);
                    proof.set_value(None);
                    toasts.error(e.to_string());
                }
            },
            None => {
                set_proof_name.set(None);
                proof.set_value(None);
            }
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        if let Err(e) = current.validate() {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_error.set(None);
        set_submitting.set(true);

        let payload = current.to_new_case();
        let file = proof.get_value();
        let config = config.clone();
        let session = session.get_untracked();
        spawn_local(async move {
            match api::create_case(&config, &session, &payload, file).await {
                Ok(case) => {
                    log::info!("registered case #{}", case.id);
                    store_add_case(&store, case);
                    toasts.success("Case registered successfully");
                    ctx.reload();
                    ctx.navigate(Page::Dashboard);
                }
                Err(e) => {
                    log::error!("case registration failed: {}", e);
                    set_error.set(Some(e.to_string()));
                    toasts.error("Registration failed");
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="page new-case">
            <button class="link-button" on:click=move |_| ctx.navigate(Page::Dashboard)>"← Back to Dashboard"</button>
            <h1>"Register New Case"</h1>
            <p class="muted">"Provide details about your dispute and the opposite party."</p>

            <form class="card case-form" on:submit=on_submit>
                <Show when=move || error.get().is_some()>
                    <p class="error-banner">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <h3>"Case Information"</h3>
                <label for="case-type">"Case Type *"</label>
                <select
                    id="case-type"
                    prop:value=move || form.with(|f| f.case_type.clone())
                    on:change=move |ev| form.update(|f| f.case_type = event_target_value(&ev))
                >
                    <option value="">"Select case type"</option>
                    {CASE_TYPES.iter().map(|t| view! { <option value=*t>{*t}</option> }).collect_view()}
                </select>

                <label for="description">"Description *"</label>
                <textarea
                    id="description"
                    rows="4"
                    placeholder="Describe the dispute"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>

                <h3>"Opposite Party Information"</h3>
                <label for="opposite-party-name">"Name *"</label>
                <AutocompleteInput
                    id="opposite-party-name"
                    value=Signal::derive(move || form.with(|f| f.opposite_party_name.clone()))
                    on_change=move |name: String| form.update(|f| f.opposite_party_name = name)
                    on_select=on_user_select
                    on_clear=move |_| form.update(|f| f.forget_user())
                    search=search
                    display_field="name"
                    placeholder="Start typing to search existing users or enter manually..."
                />
                <Show when=move || form.with(|f| !f.shows_email())>
                    <p class="info-banner">"Existing user selected - contact details auto-filled"</p>
                </Show>

                <label for="opposite-party-phone">"Phone Number *"</label>
                <input
                    id="opposite-party-phone"
                    type="tel"
                    placeholder="10-digit phone number"
                    prop:value=move || form.with(|f| f.opposite_party_phone.clone())
                    on:input=move |ev| form.update(|f| f.opposite_party_phone = event_target_value(&ev))
                />

                <Show when=move || form.with(CaseForm::shows_email)>
                    <label for="opposite-party-email">"Email"</label>
                    <input
                        id="opposite-party-email"
                        type="email"
                        placeholder="Optional"
                        prop:value=move || form.with(|f| f.opposite_party_email.clone())
                        on:input=move |ev| form.update(|f| f.opposite_party_email = event_target_value(&ev))
                    />
                </Show>

                <label for="opposite-party-address">"Address *"</label>
                <textarea
                    id="opposite-party-address"
                    rows="2"
                    prop:value=move || form.with(|f| f.opposite_party_address.clone())
                    on:input=move |ev| form.update(|f| f.opposite_party_address = event_target_value(&ev))
                ></textarea>

                <h3>"Legal Status"</h3>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.is_in_court)
                        on:change=move |ev| form.update(|f| f.is_in_court = event_target_checked(&ev))
                    />
                    " This case is already in court or registered with police"
                </label>
                <Show when=move || form.with(|f| f.is_in_court)>
                    <label for="case-number">"FIR/Case Number *"</label>
                    <input
                        id="case-number"
                        type="text"
                        prop:value=move || form.with(|f| f.case_or_fir_number.clone())
                        on:input=move |ev| form.update(|f| f.case_or_fir_number = event_target_value(&ev))
                    />
                    <label for="court-name">"Court/Police Station Name *"</label>
                    <input
                        id="court-name"
                        type="text"
                        prop:value=move || form.with(|f| f.court_or_police_name.clone())
                        on:input=move |ev| form.update(|f| f.court_or_police_name = event_target_value(&ev))
                    />
                </Show>

                <h3>"Supporting Documents"</h3>
                <label for="proof">"Proof (optional, max 10MB)"</label>
                <input id="proof" type="file" node_ref=proof_ref on:change=on_proof_change />
                {move || proof_name.get().map(|name| view! { <p class="muted">"Selected: " {name}</p> })}

                <div class="form-actions">
                    <button type="button" class="secondary" on:click=move |_| ctx.navigate(Page::Dashboard)>"Cancel"</button>
                    <button type="submit" class="primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Submitting..." } else { "Submit Case" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
