//! Help Center
//!
//! Searchable FAQ with markdown answers, plus contact options.

use leptos::prelude::*;

use crate::help::{categories, filter_faqs, CONTACT_OPTIONS, FAQS};
use crate::markdown::parse_markdown;

#[component]
pub fn HelpPage() -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let (expanded, set_expanded) = signal::<Option<&'static str>>(None);

    view! {
        <div class="page help">
            <div class="page-header centered">
                <h1>"Help Center"</h1>
                <p class="muted">"Find answers to common questions about mediation and ResolveIt."</p>
                <input
                    type="search"
                    class="help-search"
                    placeholder="Search for help..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
            </div>

            <div class="category-list">
                {categories(FAQS).into_iter().map(|category| view! {
                    <button class="category-chip" on:click=move |_| set_query.set(category.to_string())>{category}</button>
                }).collect_view()}
            </div>

            <section class="card faq-list">
                <h2>"Frequently Asked Questions"</h2>
                {move || {
                    let hits = query.with(|q| filter_faqs(FAQS, q));
                    if hits.is_empty() {
                        return view! {
                            <p class="empty-state">"No matching questions. Try a different search or contact support."</p>
                        }.into_any();
                    }
                    hits.into_iter().map(|faq| {
                        let id = faq.id;
                        let answer = parse_markdown(faq.answer);
                        view! {
                            <div class="faq-item">
                                <button
                                    class="faq-question"
                                    on:click=move |_| set_expanded.update(|open| {
                                        *open = if *open == Some(id) { None } else { Some(id) };
                                    })
                                >
                                    <span>{faq.question}</span>
                                    <span class="faq-category">{faq.category}</span>
                                </button>
                                <Show when=move || expanded.get() == Some(id)>
                                    <div class="faq-answer markdown" inner_html=answer.clone()></div>
                                </Show>
                            </div>
                        }
                    }).collect_view().into_any()
                }}
            </section>

            <section class="contact-grid">
                {CONTACT_OPTIONS.iter().map(|option| view! {
                    <div class="card contact-card">
                        <h3>{option.title}</h3>
                        <p class="muted">{option.description}</p>
                        <p class="contact-value">{option.contact}</p>
                        <p class="muted">{option.hours}</p>
                    </div>
                }).collect_view()}
            </section>
        </div>
    }
}
