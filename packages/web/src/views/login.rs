//! Login page view.

use api::guard;
use dioxus::prelude::*;
use ui::{use_auth, ArrivalCheck, LoginForm};

use crate::Route;

/// Login page. After success, goes to `next` when it is a local path.
#[component]
pub fn Login(next: String) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    // Already logged in on arrival: skip the form. After this form's own
    // login only `on_success` navigates.
    let mut arrival = use_signal(ArrivalCheck::default);
    use_effect(move || {
        let state = auth.state();
        if arrival.write().forward(state) {
            nav.replace(Route::RegisterWord {});
        }
    });

    let on_success = move |_| {
        let target = guard::return_target(&next);
        let route = target.parse::<Route>().unwrap_or(Route::RegisterWord {});
        nav.replace(route);
    };

    rsx! {
        div {
            class: "auth-page",
            LoginForm {
                on_success: on_success,
                on_submit: move |_| arrival.write().skip(),
            }
            p {
                class: "muted",
                "アカウントをお持ちでない方は "
                Link { to: Route::Signup {}, "新規登録" }
            }
        }
    }
}
