use dioxus::prelude::*;
use ui::{use_auth, Navbar};

use crate::Route;

/// Navbar above every page.
#[component]
pub fn Shell() -> Element {
    let nav = use_navigator();
    let auth = use_auth();

    rsx! {
        Navbar {
            on_logged_out: move |_| {
                nav.replace(Route::Login { next: String::new() });
            },
            if auth.is_logged_in() {
                Link { to: Route::RegisterWord {}, "単語登録" }
                Link { to: Route::WordList {}, "単語一覧" }
            } else {
                Link { to: Route::Login { next: String::new() }, "ログイン" }
                Link { to: Route::Signup {}, "新規登録" }
            }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}

/// Pages that need a session. The server middleware already turned away
/// requests without a cookie; this covers in-app navigation once the auth
/// check has settled logged out.
#[component]
pub fn Guarded() -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let route = use_route::<Route>();
    let state = auth.state();

    if state.is_loading {
        return rsx! {
            p { class: "muted", "確認中..." }
        };
    }

    if !state.is_logged_in {
        nav.replace(Route::Login {
            next: route.to_string(),
        });
        return rsx! {};
    }

    rsx! {
        Outlet::<Route> {}
    }
}
