//! Word registration form with AI generation and live suggestions.
//!
//! Typing in the word field schedules a suggestion lookup after
//! [`SUGGEST_DEBOUNCE`]; every keystroke takes a new ticket from the form's
//! [`RequestGeneration`], so only the lookup for the latest input is shown.
//! Picking a suggestion or a generated result fills all four fields and drops
//! any lookup still in flight.

use api::schema::{self, WordForm as WordFields};
use api::{settle, WordDraft};
use dioxus::prelude::*;

use crate::busy::busy;
use crate::field::{TextField, Touched};
use crate::messages::{
    GENERATE_FAILED, GENERATE_SUCCEEDED, WORD_REGISTERED, WORD_REGISTER_FAILED,
};
use crate::suggest::{latest, RequestGeneration, SuggestionList, BLUR_HIDE_DELAY, SUGGEST_DEBOUNCE};
use crate::timer;
use crate::toast::use_toast;

#[component]
pub fn RegisterWordForm(on_success: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut form = use_signal(WordFields::default);
    let mut touched = use_signal(Touched::default);
    let submitting = use_signal(|| false);
    let generating = use_signal(|| false);
    let errors = use_memo(move || schema::check(&*form.read()));
    let word_errors = use_memo(move || schema::check_word(&form.read().word));

    let generation = use_hook(RequestGeneration::new);
    let mut suggestions = use_signal(SuggestionList::<WordDraft>::default);

    let fill_generation = generation.clone();
    let fill = use_callback(move |draft: WordDraft| {
        fill_generation.cancel();
        suggestions.write().clear();
        form.set(draft.to_form());
        touched.write().mark_all(&WordFields::FIELDS);
    });

    let lookup_generation = generation.clone();
    let on_word_input = move |value: String| {
        form.write().word = value.clone();
        touched.write().mark("word");
        if value.trim().is_empty() {
            lookup_generation.cancel();
            suggestions.write().clear();
            return;
        }
        suggestions.write().searching();
        let generation = lookup_generation.clone();
        spawn(async move {
            let found = latest(&generation, SUGGEST_DEBOUNCE, || async move {
                settle(api::suggest_words(value).await)
            })
            .await;
            match found {
                None => {}
                Some(Ok(items)) => suggestions.write().land(items),
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "suggestion lookup failed");
                    suggestions.write().land(Vec::new());
                }
            }
        });
    };

    let blur_generation = generation.clone();
    let on_word_blur = move |_| {
        let generation = blur_generation.clone();
        spawn(async move {
            timer::sleep(BLUR_HIDE_DELAY).await;
            generation.cancel();
            suggestions.write().blur();
        });
    };

    let generate_generation = generation.clone();
    let generate = move |_| {
        let generation = generate_generation.clone();
        async move {
            let word = form.read().word.clone();
            if !word_errors.read().is_empty() {
                touched.write().mark("word");
                return;
            }
            generation.cancel();
            suggestions.write().clear();
            let _busy = busy(generating);
            match settle(api::generate_word_data(word).await) {
                Ok(draft) => {
                    fill.call(draft);
                    toast.success(GENERATE_SUCCEEDED);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "word generation failed");
                    toast.error(e.user_message(GENERATE_FAILED));
                }
            }
        }
    };

    let reset_generation = generation.clone();
    let reset = move |_| {
        reset_generation.cancel();
        form.set(WordFields::default());
        touched.write().clear();
        suggestions.write().clear();
    };

    let onsubmit = move |_| {
        let generation = generation.clone();
        async move {
            if !errors.read().is_empty() {
                touched.write().mark_all(&WordFields::FIELDS);
                return;
            }
            generation.cancel();
            suggestions.write().clear();
            let _busy = busy(submitting);
            match settle(api::register_word(form()).await) {
                Ok(()) => {
                    toast.success(WORD_REGISTERED);
                    form.set(WordFields::default());
                    touched.write().clear();
                    on_success.call(());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "word registration failed");
                    toast.error(e.user_message(WORD_REGISTER_FAILED));
                }
            }
        }
    };

    let error_for = move |field: &str| touched.read().visible_error(&errors.read(), field);
    let busy_now = submitting() || generating();

    rsx! {
        div {
            class: "form-card",
            h2 { "単語登録" }
            div {
                class: "word-field",
                TextField {
                    label: "単語",
                    name: "word",
                    value: form.read().word.clone(),
                    error: error_for("word"),
                    oninput: on_word_input,
                    onblur: on_word_blur,
                }
                if suggestions.read().is_loading() {
                    p { class: "suggestions-loading muted", "検索中..." }
                }
                if !suggestions.read().visible().is_empty() {
                    ul {
                        class: "suggestions",
                        for item in suggestions.read().visible().iter().cloned() {
                            li {
                                key: "{item.word}",
                                class: "suggestion",
                                onclick: {
                                    let item = item.clone();
                                    move |_| fill.call(item.clone())
                                },
                                span { class: "suggestion-word", "{item.word}" }
                                span { class: "suggestion-meaning", "{item.meaning}" }
                            }
                        }
                    }
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: busy_now || !word_errors.read().is_empty(),
                    onclick: generate,
                    if generating() { "生成中..." } else { "AIで生成" }
                }
            }
            TextField {
                label: "意味",
                name: "meaning",
                value: form.read().meaning.clone(),
                error: error_for("meaning"),
                oninput: move |value| {
                    form.write().meaning = value;
                    touched.write().mark("meaning");
                },
            }
            TextField {
                label: "例文",
                name: "example",
                multiline: true,
                value: form.read().example.clone(),
                error: error_for("example"),
                oninput: move |value| {
                    form.write().example = value;
                    touched.write().mark("example");
                },
            }
            TextField {
                label: "例文の日本語訳",
                name: "example_translation",
                multiline: true,
                value: form.read().example_translation.clone(),
                error: error_for("example_translation"),
                oninput: move |value| {
                    form.write().example_translation = value;
                    touched.write().mark("example_translation");
                },
            }
            div {
                class: "form-actions",
                button {
                    class: "btn",
                    r#type: "button",
                    disabled: busy_now,
                    onclick: reset,
                    "リセット"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy_now || !errors.read().is_empty(),
                    onclick: onsubmit,
                    if submitting() { "登録中..." } else { "登録する" }
                }
            }
        }
    }
}
