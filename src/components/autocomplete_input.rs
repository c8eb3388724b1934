//! Autocomplete Input Component
//!
//! Controlled text input with a debounced suggestion lookup. The search
//! rules live in [`SearchState`]; this component only wires DOM events,
//! the debounce timer and the lookup future to it.

use std::fmt::Display;
use std::future::Future;

use gloo_timers::callback::Timeout;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::autocomplete::{KeyOutcome, NavKey, SearchState, Suggestion, DEBOUNCE_MS};

/// Text input offering suggestions from an async `search` function
///
/// Props:
/// - value / on_change: controlled text, forwarded on every keystroke
/// - on_select: the full suggestion, once committed
/// - on_clear: a committed selection was revoked
/// - display_field: suggestion field shown as the label
#[component]
pub fn AutocompleteInput<T, F, Fut, E>(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into)] on_select: Callback<T>,
    #[prop(into, optional)] on_clear: Option<Callback<()>>,
    search: F,
    #[prop(into, default = "name".to_string())] display_field: String,
    #[prop(into, default = "Start typing to search...".to_string())] placeholder: String,
    #[prop(optional)] disabled: bool,
    #[prop(into, optional)] id: Option<String>,
) -> impl IntoView
where
    T: Suggestion + Send + Sync,
    F: Fn(String) -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, E>> + 'static,
    E: Display + 'static,
{
    let state = RwSignal::new(SearchState::<T>::new());
    let search = StoredValue::new_local(search);
    let debounce = StoredValue::new_local(None::<Timeout>);
    let display_field = StoredValue::new(display_field);
    let input_ref = NodeRef::<html::Input>::new();
    let wrapper_ref = NodeRef::<html::Div>::new();

    let revoke = move || {
        if let Some(on_clear) = on_clear {
            on_clear.run(());
        }
    };

    let lookup = move |generation: u64| {
        let Some(Some(query)) = state.try_update(|s| s.fire(generation)) else {
            return;
        };
        let pending = search.with_value(|search| search(query));
        spawn_local(async move {
            let result = pending.await;
            state.try_update(|s| s.resolve(generation, result));
        });
    };

    let select = move |choice: T| {
        let label = display_field.with_value(|field| choice.label(field));
        state.update(|s| s.commit(&label));
        debounce.set_value(None);
        on_change.run(label);
        on_select.run(choice);
        if let Some(input) = input_ref.get_untracked() {
            let _ = input.blur();
        }
    };

    let on_input = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        on_change.run(text.clone());

        let Some(change) = state.try_update(|s| s.input(&text)) else { return };
        if change.revoked_selection {
            revoke();
        }

        // Replacing the pending timer drops, and so cancels, the old one
        let generation = change.generation;
        debounce.set_value(Some(Timeout::new(DEBOUNCE_MS, move || lookup(generation))));
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let Some(key) = NavKey::from_key(&ev.key()) else { return };
        match state.try_update(|s| s.key(key)) {
            None | Some(KeyOutcome::Ignored) => {}
            Some(KeyOutcome::Moved | KeyOutcome::Nothing) => ev.prevent_default(),
            Some(KeyOutcome::Select(choice)) => {
                ev.prevent_default();
                select(choice);
            }
            Some(KeyOutcome::Dismissed) => {
                if let Some(input) = input_ref.get_untracked() {
                    let _ = input.blur();
                }
            }
        }
    };

    let on_clear_click = move |_| {
        debounce.set_value(None);
        if state.try_update(|s| s.clear()).unwrap_or(false) {
            revoke();
        }
        on_change.run(String::new());
        if let Some(input) = input_ref.get_untracked() {
            let _ = input.focus();
        }
    };

    // Pointer presses outside the whole control close the panel
    let outside = StoredValue::new_local(None::<Closure<dyn FnMut(web_sys::MouseEvent)>>);
    if let Some(window) = web_sys::window() {
        let handler = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
            let Some(wrapper) = wrapper_ref.get_untracked() else { return };
            let target = ev.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
            if !wrapper.contains(target.as_ref()) && state.with_untracked(|s| s.is_open()) {
                state.update(|s| s.click_outside());
            }
        });
        match window.add_event_listener_with_callback("mousedown", handler.as_ref().unchecked_ref()) {
            Ok(()) => outside.set_value(Some(handler)),
            Err(e) => log::warn!("autocomplete could not watch outside clicks: {:?}", e),
        }
    }

    on_cleanup(move || {
        state.try_update_untracked(|s| s.cancel());
        debounce.try_update_value(|timer| timer.take());
        if let Some(Some(handler)) = outside.try_update_value(|handler| handler.take()) {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback("mousedown", handler.as_ref().unchecked_ref());
            }
        }
    });

    view! {
        <div class="autocomplete" node_ref=wrapper_ref>
            <div class="autocomplete-field">
                <input
                    type="text"
                    id=id
                    node_ref=input_ref
                    class=move || if state.with(|s| s.has_selection()) { "autocomplete-input has-selection" } else { "autocomplete-input" }
                    placeholder=placeholder
                    autocomplete="off"
                    disabled=disabled
                    prop:value=move || value.get()
                    on:input=on_input
                    on:keydown=on_keydown
                    on:focus=move |_| state.update(|s| s.focus())
                />
                <div class="autocomplete-adornments">
                    <Show when=move || state.with(|s| s.is_loading())>
                        <span class="autocomplete-spinner" aria-label="Searching"></span>
                    </Show>
                    <Show when=move || state.with(|s| s.has_selection())>
                        <button type="button" class="autocomplete-clear" title="Clear selection" on:click=on_clear_click>
                            "×"
                        </button>
                    </Show>
                </div>
            </div>

            <Show when=move || state.with(|s| s.is_open())>
                <ul class="autocomplete-panel" role="listbox">
                    <For
                        each=move || state.with(|s| s.suggestions().iter().cloned().enumerate().collect::<Vec<_>>())
                        key=|(i, suggestion)| (*i, suggestion.key())
                        children=move |(i, suggestion)| {
                            let label = display_field.with_value(|field| suggestion.label(field));
                            let details = suggestion.details();
                            let is_highlighted = move || state.with(|s| s.highlighted() == Some(i));
                            view! {
                                <li
                                    class=move || if is_highlighted() { "autocomplete-item highlighted" } else { "autocomplete-item" }
                                    role="option"
                                    aria-selected=move || is_highlighted().to_string()
                                    on:mouseenter=move |_| state.update(|s| s.hover(i))
                                    on:mousedown=|ev: web_sys::MouseEvent| ev.prevent_default()
                                    on:click=move |_| select(suggestion.clone())
                                >
                                    <span class="autocomplete-avatar">"👤"</span>
                                    <div class="autocomplete-text">
                                        <p class="autocomplete-label">{label}</p>
                                        {details.into_iter().map(|line| view! {
                                            <p class="autocomplete-detail">{line}</p>
                                        }).collect_view()}
                                    </div>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
