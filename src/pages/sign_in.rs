//! Sign In Page
//!
//! Sign-in form with a switch to account registration. A successful
//! sign-in stores the credential, which also reconnects the notification
//! channel for the new user.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::account::{check_photo_size, RegisterForm, SignInForm, GENDERS};
use crate::api;
use crate::components::use_toasts;
use crate::config::use_config;
use crate::context::{use_app_context, Page};
use crate::session::{self, use_session, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SignIn,
    Register,
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let (mode, set_mode) = signal(Mode::SignIn);
    let (email_hint, set_email_hint) = signal(String::new());

    let registered = Callback::new(move |email: String| {
        set_email_hint.set(email);
        set_mode.set(Mode::SignIn);
    });

    view! {
        <div class="page sign-in">
            <div class="card auth-card">
                <div class="auth-tabs">
                    <button
                        class=move || if mode.get() == Mode::SignIn { "auth-tab active" } else { "auth-tab" }
                        on:click=move |_| set_mode.set(Mode::SignIn)
                    >
                        "Sign In"
                    </button>
                    <button
                        class=move || if mode.get() == Mode::Register { "auth-tab active" } else { "auth-tab" }
                        on:click=move |_| set_mode.set(Mode::Register)
                    >
                        "Create Account"
                    </button>
                </div>
                {move || match mode.get() {
                    Mode::SignIn => view! { <SignInPanel email=email_hint.get_untracked() /> }.into_any(),
                    Mode::Register => view! { <RegisterPanel on_registered=registered /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn SignInPanel(email: String) -> impl IntoView {
    let ctx = use_app_context();
    let session = use_session();
    let config = use_config();
    let toasts = use_toasts();
    let form = RwSignal::new(SignInForm {
        email,
        ..Default::default()
    });
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

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
        let config = config.clone();
        spawn_local(async move {
            let result = api::login(&config, &current).await;
            set_submitting.try_set(false);
            match result {
                Ok(signed_in) => {
                    log::info!("signed in as user #{}", signed_in.user.id);
                    session::sign_in(&signed_in.access_token, &signed_in.user);
                    let next = Session::load();
                    let home = Page::home(&next);
                    session.set(next);
                    toasts.success(format!("Welcome back, {}", signed_in.user.name));
                    ctx.navigate(home);
                }
                Err(e) => {
                    log::warn!("sign in failed: {}", e);
                    set_error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h1>"Welcome back"</h1>
            <p class="muted">"Sign in to manage your cases"</p>
            <Show when=move || error.get().is_some()>
                <p class="error-banner">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <label for="sign-in-email">"Email *"</label>
            <input
                id="sign-in-email"
                type="email"
                autocomplete="username"
                prop:value=move || form.with(|f| f.email.clone())
                on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
            />
            <label for="sign-in-password">"Password *"</label>
            <input
                id="sign-in-password"
                type="password"
                autocomplete="current-password"
                prop:value=move || form.with(|f| f.password.clone())
                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
            />
            <button type="submit" class="primary" disabled=move || submitting.get()>
                {move || if submitting.get() { "Signing in..." } else { "Sign In" }}
            </button>
        </form>
    }
}

#[component]
fn RegisterPanel(on_registered: Callback<String>) -> impl IntoView {
    let config = use_config();
    let toasts = use_toasts();
    let form = RwSignal::new(RegisterForm::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);
    let photo = StoredValue::new_local(None::<web_sys::File>);
    let photo_ref = NodeRef::<html::Input>::new();

    let on_photo_change = move |_| {
        let Some(input) = photo_ref.get_untracked() else { return };
        let file = input.files().and_then(|files| files.get(0));
        match file.map(|f| check_photo_size(f.size()).map(|()| f)) {
            Some(Ok(file)) => photo.set_value(Some(file)),
            Some(Err(e)) => {
                input.set_value("");
                photo.set_value(None);
                toasts.error(e.to_string());
            }
            None => photo.set_value(None),
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
        let file = photo.get_value();
        let config = config.clone();
        spawn_local(async move {
            let result = api::register(&config, &current, file).await;
            set_submitting.try_set(false);
            match result {
                Ok(user) => {
                    log::info!("registered user #{}", user.id);
                    toasts.success("Account created. Please sign in.");
                    on_registered.run(current.profile.email.trim().to_string());
                }
                Err(e) => {
                    log::warn!("registration failed: {}", e);
                    set_error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    // Text inputs bound to one profile field each
    let text_field = move |id: &'static str, label: &'static str, kind: &'static str, get: fn(&RegisterForm) -> &String, set: fn(&mut RegisterForm) -> &mut String| {
        view! {
            <label for=id>{label}</label>
            <input
                id=id
                type=kind
                prop:value=move || form.with(|f| get(f).clone())
                on:input=move |ev| form.update(|f| *set(f) = event_target_value(&ev))
            />
        }
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h1>"Create your account"</h1>
            <Show when=move || error.get().is_some()>
                <p class="error-banner">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {text_field("register-name", "Full Name *", "text", |f| &f.profile.name, |f| &mut f.profile.name)}
            {text_field("register-age", "Age *", "number", |f| &f.profile.age, |f| &mut f.profile.age)}
            <label for="register-gender">"Gender *"</label>
            <select
                id="register-gender"
                prop:value=move || form.with(|f| f.profile.gender.clone())
                on:change=move |ev| form.update(|f| f.profile.gender = event_target_value(&ev))
            >
                <option value="">"Select your gender"</option>
                {GENDERS.iter().map(|(value, label)| view! { <option value=*value>{*label}</option> }).collect_view()}
            </select>
            {text_field("register-email", "Email *", "email", |f| &f.profile.email, |f| &mut f.profile.email)}
            {text_field("register-phone", "Phone Number *", "tel", |f| &f.profile.phone, |f| &mut f.profile.phone)}
            {text_field("register-street", "Street Address *", "text", |f| &f.profile.street, |f| &mut f.profile.street)}
            {text_field("register-city", "City *", "text", |f| &f.profile.city, |f| &mut f.profile.city)}
            {text_field("register-zip", "Zip Code *", "text", |f| &f.profile.zip_code, |f| &mut f.profile.zip_code)}
            {text_field("register-password", "Password *", "password", |f| &f.password, |f| &mut f.password)}
            {text_field("register-confirm", "Confirm Password *", "password", |f| &f.confirm_password, |f| &mut f.confirm_password)}
            <label for="register-photo">"Profile Photo (optional, max 5MB)"</label>
            <input id="register-photo" type="file" accept="image/*" node_ref=photo_ref on:change=on_photo_change />
            <button type="submit" class="primary" disabled=move || submitting.get()>
                {move || if submitting.get() { "Creating account..." } else { "Create Account" }}
            </button>
        </form>
    }
}
