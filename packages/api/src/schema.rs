//! # Form schemas
//!
//! Declarative constraints for the login, signup and word-registration forms,
//! expressed with `validator` derives. The same structs travel to the server
//! functions, which re-check them before any backend call.
//!
//! `validator` allows one rule of each kind per field, so the second length
//! bound and the password character classes are custom functions that carry
//! their own message.
//!
//! Text fields are checked after trimming, which is also the form the server
//! sends on. Passwords are taken as typed.
//!
//! | Form | Field | Rule |
//! |------|-------|------|
//! | [`LoginForm`] / [`SignupForm`] | `user_name` | 3–25 chars |
//! | | `password` | 8–25 chars, at least one of `a-z`, `A-Z`, `0-9` |
//! | [`SignupForm`] | `email` | syntactically valid address |
//! | [`WordForm`] | `word`, `meaning` | 1–45 chars |
//! | | `example`, `example_translation` | 1–150 chars |

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

pub const USERNAME_MIN_MESSAGE: &str = "ユーザー名は3文字以上で入力してください";
pub const USERNAME_MAX_MESSAGE: &str = "ユーザー名は25文字以下で入力してください";
pub const PASSWORD_MIN_MESSAGE: &str = "パスワードは8文字以上で入力してください";
pub const PASSWORD_MAX_MESSAGE: &str = "パスワードは25文字以下で入力してください";
pub const PASSWORD_CLASSES_MESSAGE: &str =
    "パスワードは、大文字、小文字、数字をそれぞれ1つ以上含んでください。";
pub const EMAIL_MESSAGE: &str = "有効なメールアドレスを入力してください";
pub const WORD_REQUIRED_MESSAGE: &str = "単語は必須です";
pub const MEANING_REQUIRED_MESSAGE: &str = "意味は必須です";
pub const EXAMPLE_REQUIRED_MESSAGE: &str = "例文は必須です";
pub const TRANSLATION_REQUIRED_MESSAGE: &str = "例文の日本語訳は必須です";
pub const SHORT_FIELD_MAX_MESSAGE: &str = "45文字以内で入力してください";
pub const SENTENCE_FIELD_MAX_MESSAGE: &str = "150文字以内で入力してください";

const USERNAME_MIN: usize = 3;
const PASSWORD_MIN: usize = 8;

/// Login form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(
        length(max = 25, message = "ユーザー名は25文字以下で入力してください"),
        custom(function = "username_min_length")
    )]
    pub user_name: String,

    #[validate(
        length(max = 25, message = "パスワードは25文字以下で入力してください"),
        custom(function = "password_strength")
    )]
    pub password: String,
}

/// Signup form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(
        length(max = 25, message = "ユーザー名は25文字以下で入力してください"),
        custom(function = "username_min_length")
    )]
    pub user_name: String,

    #[validate(email(message = "有効なメールアドレスを入力してください"))]
    pub email: String,

    #[validate(
        length(max = 25, message = "パスワードは25文字以下で入力してください"),
        custom(function = "password_strength")
    )]
    pub password: String,
}

/// Word registration form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct WordForm {
    #[validate(
        length(max = 45, message = "45文字以内で入力してください"),
        custom(function = "word_required")
    )]
    pub word: String,

    #[validate(
        length(max = 45, message = "45文字以内で入力してください"),
        custom(function = "meaning_required")
    )]
    pub meaning: String,

    #[validate(
        length(max = 150, message = "150文字以内で入力してください"),
        custom(function = "example_required")
    )]
    pub example: String,

    #[validate(
        length(max = 150, message = "150文字以内で入力してください"),
        custom(function = "translation_required")
    )]
    pub example_translation: String,
}

impl WordForm {
    /// Field names in display order.
    pub const FIELDS: [&'static str; 4] = ["word", "meaning", "example", "example_translation"];
}

/// A form with a canonical, whitespace-trimmed shape.
pub trait Normalize: Validate + Sized {
    fn normalized(&self) -> Self;
}

impl Normalize for LoginForm {
    fn normalized(&self) -> Self {
        Self {
            user_name: self.user_name.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

impl Normalize for SignupForm {
    fn normalized(&self) -> Self {
        Self {
            user_name: self.user_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

impl Normalize for WordForm {
    fn normalized(&self) -> Self {
        Self {
            word: self.word.trim().to_string(),
            meaning: self.meaning.trim().to_string(),
            example: self.example.trim().to_string(),
            example_translation: self.example_translation.trim().to_string(),
        }
    }
}

/// Per-field violation messages. An empty map means the input is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// First message for a field, which is what the form shows inline.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, list) in errors.field_errors() {
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.push(&field.to_string(), message);
            }
        }
        out
    }
}

/// Run a schema against the normalized input and collect its violations.
pub fn check<T: Normalize>(input: &T) -> FieldErrors {
    match input.normalized().validate() {
        Ok(()) => FieldErrors::default(),
        Err(errors) => FieldErrors::from(&errors),
    }
}

/// Check only the `word` field, which gates the AI generate button.
pub fn check_word(word: &str) -> FieldErrors {
    let form = WordForm {
        word: word.to_string(),
        ..WordForm::default()
    };
    let mut errors = FieldErrors::default();
    for message in check(&form).get("word") {
        errors.push("word", message.clone());
    }
    errors
}

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn username_min_length(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < USERNAME_MIN {
        return Err(violation("username_min", USERNAME_MIN_MESSAGE));
    }
    Ok(())
}

fn password_strength(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < PASSWORD_MIN {
        return Err(violation("password_min", PASSWORD_MIN_MESSAGE));
    }
    let lower = value.chars().any(|c| c.is_ascii_lowercase());
    let upper = value.chars().any(|c| c.is_ascii_uppercase());
    let digit = value.chars().any(|c| c.is_ascii_digit());
    if !(lower && upper && digit) {
        return Err(violation("password_classes", PASSWORD_CLASSES_MESSAGE));
    }
    Ok(())
}

fn required(value: &str, code: &'static str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation(code, message));
    }
    Ok(())
}

fn word_required(value: &str) -> Result<(), ValidationError> {
    required(value, "word_required", WORD_REQUIRED_MESSAGE)
}

fn meaning_required(value: &str) -> Result<(), ValidationError> {
    required(value, "meaning_required", MEANING_REQUIRED_MESSAGE)
}

fn example_required(value: &str) -> Result<(), ValidationError> {
    required(value, "example_required", EXAMPLE_REQUIRED_MESSAGE)
}

fn translation_required(value: &str) -> Result<(), ValidationError> {
    required(value, "translation_required", TRANSLATION_REQUIRED_MESSAGE)
}
