use api::schema::{self, SignupForm as SignupFields};
use api::settle;
use dioxus::prelude::*;

use crate::busy::busy;
use crate::field::{TextField, Touched};
use crate::messages::{SIGNUP_FAILED, SIGNUP_SUCCEEDED};
use crate::toast::use_toast;

const FIELDS: &[&str] = &["user_name", "email", "password"];

/// Account creation. Does not log in; `on_success` should send the user to login.
#[component]
pub fn SignupForm(on_success: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut form = use_signal(SignupFields::default);
    let mut touched = use_signal(Touched::default);
    let submitting = use_signal(|| false);
    let errors = use_memo(move || schema::check(&*form.read()));

    let onsubmit = move |_| async move {
        if !errors.read().is_empty() {
            touched.write().mark_all(FIELDS);
            return;
        }
        let _busy = busy(submitting);
        match settle(api::signup(form()).await) {
            Ok(()) => {
                toast.success(SIGNUP_SUCCEEDED);
                on_success.call(());
            }
            Err(e) => {
                tracing::warn!(error = %e, "signup failed");
                toast.error(e.user_message(SIGNUP_FAILED));
            }
        }
    };

    let error_for = move |field: &str| touched.read().visible_error(&errors.read(), field);

    rsx! {
        div {
            class: "form-card",
            h2 { "新規登録" }
            TextField {
                label: "ユーザー名",
                name: "user_name",
                value: form.read().user_name.clone(),
                error: error_for("user_name"),
                oninput: move |value| {
                    form.write().user_name = value;
                    touched.write().mark("user_name");
                },
            }
            TextField {
                label: "メールアドレス",
                name: "email",
                kind: "email",
                value: form.read().email.clone(),
                error: error_for("email"),
                oninput: move |value| {
                    form.write().email = value;
                    touched.write().mark("email");
                },
            }
            TextField {
                label: "パスワード",
                name: "password",
                kind: "password",
                value: form.read().password.clone(),
                error: error_for("password"),
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
                if submitting() { "登録中..." } else { "登録する" }
            }
        }
    }
}
