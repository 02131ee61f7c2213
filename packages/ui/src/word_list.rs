use api::{settle, WordEntry};
use dioxus::prelude::*;

use crate::messages::UNEXPECTED;
use crate::word_detail_modal::WordDetailModal;

/// The user's saved words as cards. A card opens its detail modal; deleting
/// from the modal reloads the list.
#[component]
pub fn WordList() -> Element {
    let mut words = use_resource(|| async { settle(api::get_word_list().await) });
    let mut selected = use_signal(|| None::<String>);

    let content = match &*words.read() {
        None => rsx! { p { class: "muted", "読み込み中..." } },
        Some(Err(e)) => {
            tracing::warn!(error = %e, "word list unavailable");
            let message = e.user_message(UNEXPECTED);
            rsx! { p { class: "field-error", "{message}" } }
        }
        Some(Ok(list)) if list.is_empty() => rsx! {
            p { class: "muted", "まだ単語が登録されていません" }
        },
        Some(Ok(list)) => rsx! {
            div {
                class: "word-grid",
                for word in list.iter().cloned() {
                    WordCard {
                        key: "{word.id}",
                        on_open: {
                            let id = word.id.clone();
                            move |_| selected.set(Some(id.clone()))
                        },
                        word: word.clone(),
                    }
                }
            }
        },
    };

    rsx! {
        div {
            class: "word-list",
            h2 { "単語一覧" }
            {content}
            if let Some(id) = selected() {
                WordDetailModal {
                    key: "{id}",
                    id: id.clone(),
                    on_close: move |_| selected.set(None),
                    on_deleted: move |_| {
                        selected.set(None);
                        words.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn WordCard(word: WordEntry, on_open: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: "word-card",
            r#type: "button",
            onclick: move |_| on_open.call(()),
            span { class: "word-spelling", "{word.spelling}" }
            if let Some(meaning) = &word.meaning {
                span { class: "word-meaning", "{meaning}" }
            }
        }
    }
}
