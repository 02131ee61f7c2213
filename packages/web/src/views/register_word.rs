use dioxus::prelude::*;
use ui::RegisterWordForm;

use crate::Route;

#[component]
pub fn RegisterWord() -> Element {
    let nav = use_navigator();

    rsx! {
        RegisterWordForm {
            on_success: move |_| {
                nav.push(Route::WordList {});
            },
        }
    }
}
