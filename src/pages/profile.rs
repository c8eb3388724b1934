//! Profile Page
//!
//! Personal details, password change and account deletion for the
//! signed-in user.

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::account::{check_photo_size, PasswordForm, ProfileForm, GENDERS};
use crate::api;
use crate::components::use_toasts;
use crate::config::use_config;
use crate::context::{use_app_context, Page};
use crate::session::{self, use_session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Profile,
    Security,
    Account,
}

const TABS: &[(Tab, &str)] = &[
    (Tab::Profile, "Profile Information"),
    (Tab::Security, "Security"),
    (Tab::Account, "Account"),
];

#[component]
pub fn ProfilePage() -> impl IntoView {
    let (tab, set_tab) = signal(Tab::Profile);

    view! {
        <div class="page profile">
            <h1>"Profile Settings"</h1>
            <p class="muted">"Manage your account information and preferences"</p>
            <div class="tab-row">
                {TABS.iter().map(|(value, label)| {
                    let value = *value;
                    view! {
                        <button
                            class=move || if tab.get() == value { "tab active" } else { "tab" }
                            on:click=move |_| set_tab.set(value)
                        >
                            {*label}
                        </button>
                    }
                }).collect_view()}
            </div>
            {move || match tab.get() {
                Tab::Profile => view! { <ProfileDetails /> }.into_any(),
                Tab::Security => view! { <ChangePassword /> }.into_any(),
                Tab::Account => view! { <DeleteAccount /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ProfileDetails() -> impl IntoView {
    let session = use_session();
    let config = use_config();
    let toasts = use_toasts();
    let initial = session.with_untracked(|s| s.user.as_ref().map(ProfileForm::from_user).unwrap_or_default());
    let form = RwSignal::new(initial);
    let (photo_url, set_photo_url) = signal(session.with_untracked(|s| s.user.as_ref().and_then(|u| u.photo_url.clone())));
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let photo = StoredValue::new_local(None::<web_sys::File>);
    let photo_ref = NodeRef::<html::Input>::new();

    // Stored record may be stale; prefer the server copy when it arrives
    {
        let config = config.clone();
        let current = session.get_untracked();
        spawn_local(async move {
            match api::profile(&config, &current).await {
                Ok(user) => {
                    form.try_set(ProfileForm::from_user(&user));
                    set_photo_url.try_set(user.photo_url.clone());
                }
                Err(e) => log::warn!("could not load profile: {}", e),
            }
        });
    }

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
        if saving.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        if let Err(e) = current.validate() {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_error.set(None);
        set_saving.set(true);
        let file = photo.get_value();
        let config = config.clone();
        let signed_in = session.get_untracked();
        spawn_local(async move {
            let result = api::update_profile(&config, &signed_in, &current, file).await;
            set_saving.try_set(false);
            match result {
                Ok(user) => {
                    log::info!("profile of user #{} updated", user.id);
                    session::save_user(&user);
                    set_photo_url.try_set(user.photo_url.clone());
                    photo.try_set_value(None);
                    if let Some(input) = photo_ref.get_untracked() {
                        input.set_value("");
                    }
                    session.set(session::Session::load());
                    toasts.success("Your profile has been successfully updated.");
                }
                Err(e) => {
                    log::warn!("profile update failed: {}", e);
                    set_error.try_set(Some(e.to_string()));
                    toasts.error("Update failed");
                }
            }
        });
    };

    let text_field = move |id: &'static str, label: &'static str, kind: &'static str, get: fn(&ProfileForm) -> &String, set: fn(&mut ProfileForm) -> &mut String| {
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
        <form class="card profile-form" on:submit=on_submit>
            <Show when=move || error.get().is_some()>
                <p class="error-banner">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <div class="profile-photo">
                {move || match photo_url.get() {
                    Some(url) => view! { <img class="avatar large" src=url alt="Profile photo" /> }.into_any(),
                    None => {
                        let initial = form.with(|f| f.name.chars().next().map(|c| c.to_uppercase().collect::<String>()).unwrap_or_else(|| "U".to_string()));
                        view! { <span class="avatar large">{initial}</span> }.into_any()
                    }
                }}
                <label for="profile-photo">"Profile Photo (JPG, PNG, max 5MB)"</label>
                <input id="profile-photo" type="file" accept="image/*" node_ref=photo_ref on:change=on_photo_change />
            </div>

            <h3>"Personal Information"</h3>
            {text_field("profile-name", "Full Name *", "text", |f| &f.name, |f| &mut f.name)}
            {text_field("profile-age", "Age *", "number", |f| &f.age, |f| &mut f.age)}
            <label for="profile-gender">"Gender *"</label>
            <select
                id="profile-gender"
                prop:value=move || form.with(|f| f.gender.clone())
                on:change=move |ev| form.update(|f| f.gender = event_target_value(&ev))
            >
                <option value="">"Select your gender"</option>
                {GENDERS.iter().map(|(value, label)| view! { <option value=*value>{*label}</option> }).collect_view()}
            </select>

            <h3>"Contact Information"</h3>
            {text_field("profile-email", "Email Address *", "email", |f| &f.email, |f| &mut f.email)}
            {text_field("profile-phone", "Phone Number *", "tel", |f| &f.phone, |f| &mut f.phone)}
            {text_field("profile-street", "Street Address *", "text", |f| &f.street, |f| &mut f.street)}
            {text_field("profile-city", "City *", "text", |f| &f.city, |f| &mut f.city)}
            {text_field("profile-zip", "Zip Code *", "text", |f| &f.zip_code, |f| &mut f.zip_code)}

            <button type="submit" class="primary" disabled=move || saving.get()>
                {move || if saving.get() { "Saving..." } else { "Save Changes" }}
            </button>
        </form>
    }
}

#[component]
fn ChangePassword() -> impl IntoView {
    let session = use_session();
    let config = use_config();
    let toasts = use_toasts();
    let form = RwSignal::new(PasswordForm::default());
    let (visible, set_visible) = signal(false);
    let (saving, set_saving) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        if let Err(e) = current.validate() {
            toasts.error(e.to_string());
            return;
        }
        set_saving.set(true);
        let config = config.clone();
        let signed_in = session.get_untracked();
        spawn_local(async move {
            let result = api::change_password(&config, &signed_in, &current).await;
            set_saving.try_set(false);
            match result {
                Ok(()) => {
                    form.try_set(PasswordForm::default());
                    toasts.success("Your password has been successfully updated.");
                }
                Err(e) => {
                    log::warn!("password change failed: {}", e);
                    toasts.error(format!("Password change failed: {}", e));
                }
            }
        });
    };

    let kind = move || if visible.get() { "text" } else { "password" };

    view! {
        <form class="card password-form" on:submit=on_submit>
            <h3>"Change Password"</h3>
            <label for="current-password">"Current Password *"</label>
            <input
                id="current-password"
                type=kind
                prop:value=move || form.with(|f| f.current_password.clone())
                on:input=move |ev| form.update(|f| f.current_password = event_target_value(&ev))
            />
            <label for="new-password">"New Password *"</label>
            <input
                id="new-password"
                type=kind
                prop:value=move || form.with(|f| f.new_password.clone())
                on:input=move |ev| form.update(|f| f.new_password = event_target_value(&ev))
            />
            <label for="confirm-password">"Confirm New Password *"</label>
            <input
                id="confirm-password"
                type=kind
                prop:value=move || form.with(|f| f.confirm_password.clone())
                on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
            />
            <label class="checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || visible.get()
                    on:change=move |ev| set_visible.set(event_target_checked(&ev))
                />
                " Show passwords"
            </label>
            <p class="muted">"At least 8 characters long."</p>
            <button type="submit" class="primary" disabled=move || saving.get()>
                {move || if saving.get() { "Changing Password..." } else { "Change Password" }}
            </button>
        </form>
    }
}

#[component]
fn DeleteAccount() -> impl IntoView {
    let ctx = use_app_context();
    let session = use_session();
    let config = use_config();
    let toasts = use_toasts();
    let (confirming, set_confirming) = signal(false);
    let (deleting, set_deleting) = signal(false);

    let on_delete = move |_| {
        if deleting.get_untracked() {
            return;
        }
        set_deleting.set(true);
        let config = config.clone();
        let signed_in = session.get_untracked();
        spawn_local(async move {
            let result = api::delete_account(&config, &signed_in).await;
            set_deleting.try_set(false);
            match result {
                Ok(()) => {
                    log::info!("account deleted");
                    session::logout();
                    session.set(session::Session::default());
                    toasts.success("Your account has been deleted.");
                    ctx.navigate(Page::SignIn);
                }
                Err(e) => {
                    log::warn!("account deletion failed: {}", e);
                    toasts.error(format!("Failed to delete account: {}", e));
                }
            }
        });
    };

    view! {
        <section class="card danger-zone">
            <h3>"Delete Account"</h3>
            <p class="muted">"This permanently removes your account and signs you out."</p>
            <Show
                when=move || confirming.get()
                fallback=move || view! {
                    <button class="danger" on:click=move |_| set_confirming.set(true)>"Delete Account"</button>
                }
            >
                <p>"Are you sure? This cannot be undone."</p>
                <div class="form-actions">
                    <button class="secondary" on:click=move |_| set_confirming.set(false)>"Cancel"</button>
                    <button class="danger" disabled=move || deleting.get() on:click=on_delete.clone()>
                        {move || if deleting.get() { "Deleting..." } else { "Yes, delete" }}
                    </button>
                </div>
            </Show>
        </section>
    }
}
