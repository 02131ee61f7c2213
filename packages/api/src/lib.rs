//! # API crate — shared fullstack server functions for BlackVocs
//!
//! This crate sits between the BlackVocs UI and the external vocabulary backend.
//! It defines every Dioxus server function the web frontend calls, along with
//! the modules they are built from.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | `actions` | `server` | Action wrappers: session short-circuit, re-validation, backend call, cookie and cache side effects |
//! | `backend` | `server` | Backend endpoint table, the `Backend` seam, and the `reqwest` transport |
//! | `cache` | `server` | Per-session word-list view cache, dropped after register/delete |
//! | [`error`] | — | [`ActionError`] and the server-message extraction rules |
//! | [`guard`] | — | Which pages need a session and where to send visitors without one |
//! | [`models`] | — | Backend reply bodies and the word types the UI renders |
//! | [`schema`] | — | Form structs and their `validator` rules, shared by client and server |
//! | [`session`] | — | The `access_token` cookie accessor |
//! | `settings` | `server` | Layered configuration (`blackvocs.toml`, `BLACKVOCS__*`, `SERVICE_URI`) |
//! | `state` | `server` | Lazily built process-wide `Actions` |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once delegating to the
//! shared action wrappers with the request's cookie jar (behind
//! `#[cfg(feature = "server")]`) and once as a client stub.
//!
//! Each returns `Result<ActionResult<T>, ServerFnError>`: the outer error is a
//! failure to reach this server, the inner one the action's own outcome. Use
//! [`settle`] to flatten the two.
//!
//! - **Auth**: `signup`, `login`, `logout`, `signed_in_check`
//! - **Words**: `register_word`, `generate_word_data`, `suggest_words`,
//!   `get_word_list`, `get_word_detail`, `delete_word`

use dioxus::prelude::*;

#[cfg(any(feature = "server", test))]
pub mod actions;
#[cfg(any(feature = "server", test))]
pub mod backend;
#[cfg(any(feature = "server", test))]
pub mod cache;
pub mod error;
pub mod guard;
pub mod models;
pub mod schema;
pub mod session;
#[cfg(any(feature = "server", test))]
pub mod settings;
#[cfg(feature = "server")]
pub mod state;

pub use error::{settle, ActionError, ActionResult};
pub use models::{SignedInUser, WordDraft, WordEntry};
pub use schema::{FieldErrors, LoginForm, SignupForm, WordForm};

#[cfg(feature = "server")]
use crate::session::CookieSession;

#[cfg(feature = "server")]
async fn shared() -> Result<&'static actions::Actions<backend::HttpBackend>, ServerFnError> {
    state::get_actions().await.map_err(|e| {
        tracing::error!(error = %e, "action wrappers unavailable");
        ServerFnError::new(e.to_string())
    })
}

/// Create an account.
#[cfg(feature = "server")]
#[post("/api/auth/signup")]
pub async fn signup(form: SignupForm) -> Result<ActionResult<()>, ServerFnError> {
    Ok(shared().await?.signup(&form).await)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signup")]
pub async fn signup(form: SignupForm) -> Result<ActionResult<()>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign in; on success the response carries the `access_token` cookie.
#[cfg(feature = "server")]
#[post("/api/auth/login", cookies: tower_cookies::Cookies)]
pub async fn login(form: LoginForm) -> Result<ActionResult<()>, ServerFnError> {
    let session = CookieSession::new(cookies);
    Ok(shared().await?.login(&session, &form).await)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(form: LoginForm) -> Result<ActionResult<()>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign out and drop the session cookie.
#[cfg(feature = "server")]
#[post("/api/auth/logout", cookies: tower_cookies::Cookies)]
pub async fn logout() -> Result<ActionResult<()>, ServerFnError> {
    let session = CookieSession::new(cookies);
    Ok(shared().await?.logout(&session).await)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<ActionResult<()>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Ask the backend who the session belongs to.
#[cfg(feature = "server")]
#[get("/api/auth/me", cookies: tower_cookies::Cookies)]
pub async fn signed_in_check() -> Result<ActionResult<SignedInUser>, ServerFnError> {
    let session = CookieSession::new(cookies);
    Ok(shared().await?.signed_in_check(&session).await)
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn signed_in_check() -> Result<ActionResult<SignedInUser>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/words/register", cookies: tower_cookies::Cookies)]
pub async fn register_word(form: WordForm) -> Result<ActionResult<()>, ServerFnError> {
    let session = CookieSession::new(cookies);
    Ok(shared().await?.register_word(&session, &form).await)
}

#[cfg(not(feature = "server"))]
#[post("/api/words/register")]
pub async fn register_word(form: WordForm) -> Result<ActionResult<()>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// AI-generate meaning and examples for `word`.
#[cfg(feature = "server")]
#[post("/api/words/generate", cookies: tower_cookies::Cookies)]
pub async fn generate_word_data(word: String) -> Result<ActionResult<WordDraft>, ServerFnError> {
    let session = CookieSession::new(cookies);
    Ok(shared().await?.generate_word_data(&session, &word).await)
}

#[cfg(not(feature = "server"))]
#[post("/api/words/generate")]
pub async fn generate_word_data(word: String) -> Result<ActionResult<WordDraft>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/words/suggest", cookies: tower_cookies::Cookies)]
pub async fn suggest_words(input: String) -> Result<ActionResult<Vec<WordDraft>>, ServerFnError> {
    let session = CookieSession::new(cookies);
    Ok(shared().await?.suggest_words(&session, &input).await)
}

#[cfg(not(feature = "server"))]
#[post("/api/words/suggest")]
pub async fn suggest_words(input: String) -> Result<ActionResult<Vec<WordDraft>>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/words", cookies: tower_cookies::Cookies)]
pub async fn get_word_list() -> Result<ActionResult<Vec<WordEntry>>, ServerFnError> {
    let session = CookieSession::new(cookies);
    Ok(shared().await?.get_word_list(&session).await)
}

#[cfg(not(feature = "server"))]
#[get("/api/words")]
pub async fn get_word_list() -> Result<ActionResult<Vec<WordEntry>>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/words/detail", cookies: tower_cookies::Cookies)]
pub async fn get_word_detail(id: String) -> Result<ActionResult<WordEntry>, ServerFnError> {
    let session = CookieSession::new(cookies);
    Ok(shared().await?.get_word_detail(&session, &id).await)
}

#[cfg(not(feature = "server"))]
#[post("/api/words/detail")]
pub async fn get_word_detail(id: String) -> Result<ActionResult<WordEntry>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/words/delete", cookies: tower_cookies::Cookies)]
pub async fn delete_word(id: String) -> Result<ActionResult<()>, ServerFnError> {
    let session = CookieSession::new(cookies);
    Ok(shared().await?.delete_word(&session, &id).await)
}

#[cfg(not(feature = "server"))]
#[post("/api/words/delete")]
pub async fn delete_word(id: String) -> Result<ActionResult<()>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
