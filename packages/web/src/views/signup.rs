use dioxus::prelude::*;
use ui::{use_auth, ArrivalCheck, SignupForm};

use crate::Route;

#[component]
pub fn Signup() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    let mut arrival = use_signal(ArrivalCheck::default);
    use_effect(move || {
        let state = auth.state();
        if arrival.write().forward(state) {
            nav.replace(Route::RegisterWord {});
        }
    });

    rsx! {
        div {
            class: "auth-page",
            SignupForm {
                on_success: move |_| {
                    nav.push(Route::Login { next: String::new() });
                },
            }
            p {
                class: "muted",
                "アカウントをお持ちの方は "
                Link { to: Route::Login { next: String::new() }, "ログイン" }
            }
        }
    }
}
