use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::messages::{LOGOUT_FAILED, LOGOUT_SUCCEEDED, NOT_LOGGED_IN};
use crate::toast::use_toast;

/// Top bar with the app's links and a logout button.
/// `on_logged_out` fires after logout, or when there was no session to end.
#[component]
pub fn Navbar(on_logged_out: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "navbar",
            span { class: "navbar-brand", "BlackVocs" }
            div { class: "navbar-links", {children} }
            LogoutButton { on_logged_out: on_logged_out }
        }
    }
}

#[component]
pub fn LogoutButton(
    on_logged_out: EventHandler<()>,
    #[props(default = "ログアウト".to_string())] label: String,
) -> Element {
    let auth = use_auth();
    let toast = use_toast();

    let onclick = move |_| async move {
        if !auth.is_logged_in() {
            toast.warning(NOT_LOGGED_IN);
            on_logged_out.call(());
            return;
        }
        match auth.logout().await {
            Ok(()) => {
                toast.success(LOGOUT_SUCCEEDED);
                on_logged_out.call(());
            }
            Err(e) => {
                tracing::warn!(error = %e, "logout failed");
                toast.error(e.user_message(LOGOUT_FAILED));
            }
        }
    };

    rsx! {
        button {
            class: "btn navbar-logout",
            r#type: "button",
            disabled: auth.is_loading(),
            onclick: onclick,
            "{label}"
        }
    }
}
