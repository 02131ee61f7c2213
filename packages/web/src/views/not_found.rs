use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    tracing::debug!(%path, "no such page");

    rsx! {
        div {
            class: "auth-page",
            h2 { "ページが見つかりません" }
            p { class: "muted", "{path}" }
            Link { to: Route::Root {}, "トップへ戻る" }
        }
    }
}
