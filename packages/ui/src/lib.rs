//! This crate contains all shared UI for the workspace.

mod auth;
pub use auth::{use_auth, ArrivalCheck, AuthContext, AuthProvider, AuthState};

pub mod toast;
pub use toast::{use_toast, ToastHandle, ToastKind, ToastProvider};

mod busy;
pub use busy::{busy, OnExit};

pub mod suggest;
pub use suggest::RequestGeneration;

pub mod messages;
pub mod timer;

mod field;
pub use field::{TextField, Touched};

mod navbar;
pub use navbar::{LogoutButton, Navbar};

mod login_form;
pub use login_form::LoginForm;

mod signup_form;
pub use signup_form::SignupForm;

mod register_word_form;
pub use register_word_form::RegisterWordForm;

mod word_list;
pub use word_list::WordList;

mod word_detail_modal;
pub use word_detail_modal::{ModalOverlay, WordDetailModal};
