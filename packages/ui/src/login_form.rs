use api::schema::{self, LoginForm as LoginFields};
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::busy::busy;
use crate::field::{TextField, Touched};
use crate::messages::{LOGIN_FAILED, LOGIN_SUCCEEDED};
use crate::toast::use_toast;

const FIELDS: &[&str] = &["user_name", "password"];

/// Username/password login. `on_submit` fires when a valid form goes out and
/// `on_success` once the session cookie is set.
#[component]
pub fn LoginForm(on_success: EventHandler<()>, #[props(default)] on_submit: EventHandler<()>) -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let mut form = use_signal(LoginFields::default);
    let mut touched = use_signal(Touched::default);
    let submitting = use_signal(|| false);
    let errors = use_memo(move || schema::check(&*form.read()));

    let onsubmit = move |_| async move {
        if !errors.read().is_empty() {
            touched.write().mark_all(FIELDS);
            return;
        }
        let _busy = busy(submitting);
        on_submit.call(());
        match auth.login(form()).await {
            Ok(()) => {
                toast.success(LOGIN_SUCCEEDED);
                on_success.call(());
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                toast.error(e.user_message(LOGIN_FAILED));
            }
        }
    };

    let user_name_error = touched.read().visible_error(&errors.read(), "user_name");
    let password_error = touched.read().visible_error(&errors.read(), "password");

    rsx! {
        div {
            class: "form-card",
            h2 { "ログイン" }
            TextField {
                label: "ユーザー名またはメールアドレス",
                name: "user_name",
                value: form.read().user_name.clone(),
                error: user_name_error,
                oninput: move |value| {
                    form.write().user_name = value;
                    touched.write().mark("user_name");
                },
            }
            TextField {
                label: "パスワード",
                name: "password",
                kind: "password",
                value: form.read().password.clone(),
                error: password_error,
                oninput: move |value| {
                    form.write().password = value;
                    touched.write().mark("password");
                },
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: submitting() || !errors.read().is_empty(),
                onclick: onsubmit,
                if submitting() { "ログイン中..." } else { "ログイン" }
            }
        }
    }
}
