use dioxus::prelude::*;

#[component]
pub fn WordList() -> Element {
    rsx! {
        ui::WordList {}
    }
}
