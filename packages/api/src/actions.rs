//! # Action wrappers
//!
//! [`Actions`] performs each user-facing operation against the backend and
//! normalises the outcome into an [`ActionResult`]. The server functions in the
//! crate root are thin shims over these methods; tests drive them with an
//! in-memory [`Backend`] and [`MemoryTokenStore`](crate::session::MemoryTokenStore).
//!
//! Every authenticated method reads the session token first and returns
//! [`ActionError::NoSession`] before doing anything else. Methods that take a
//! form re-run its schema next and return [`ActionError::Invalid`] without a
//! network call.
//!
//! ## Side effects
//!
//! | Method | On success | On failure |
//! |--------|------------|------------|
//! | [`login`](Actions::login) | stores the token cookie | cookie untouched |
//! | [`logout`](Actions::logout) | clears the cookie and the cached word list | untouched |
//! | [`register_word`](Actions::register_word) | revalidates the word list | untouched |
//! | [`delete_word`](Actions::delete_word) | revalidates the word list | untouched |
//!
//! Nothing is retried.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use crate::backend::{Backend, BackendCall, Endpoint};
use crate::cache::WordListCache;
use crate::error::{ActionError, ActionResult};
use crate::models::{
    GenerateReply, SignedInUser, SigninReply, SuggestReply, WordDetailReply, WordDraft, WordEntry,
    WordListReply,
};
use crate::schema::{self, LoginForm, Normalize, SignupForm, WordForm};
use crate::session::TokenStore;
use crate::settings::Settings;

pub struct Actions<B> {
    backend: B,
    words: WordListCache,
    session_max_age: u64,
}

impl<B: Backend> Actions<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            words: WordListCache::new(settings.word_list_ttl()),
            session_max_age: settings.session.max_age_secs,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn word_cache(&self) -> &WordListCache {
        &self.words
    }

    /// Create an account. Does not sign in.
    pub async fn signup(&self, form: &SignupForm) -> ActionResult<()> {
        let form = validated(form)?;
        let body = json!({
            "username": form.user_name,
            "email": form.email,
            "password": form.password,
        });
        let result = self
            .backend
            .send(BackendCall::new(Endpoint::Signup).with_body(body))
            .await
            .map(drop);
        logged("signup", result)
    }

    /// Sign in and store the issued token in the session cookie.
    pub async fn login<S: TokenStore>(&self, session: &S, form: &LoginForm) -> ActionResult<()> {
        let form = validated(form)?;
        let body = json!({
            "username_or_email": form.user_name,
            "password": form.password,
        });
        let reply: SigninReply = logged(
            "login",
            self.call(BackendCall::new(Endpoint::Signin).with_body(body))
                .await,
        )?;
        if reply.access_token.is_empty() {
            return logged(
                "login",
                Err(ActionError::Unexpected("empty access token".into())),
            );
        }
        session.set(&reply.access_token, self.session_max_age);
        tracing::info!(user = %form.user_name, "signed in");
        Ok(())
    }

    /// Sign out and drop the session cookie.
    pub async fn logout<S: TokenStore>(&self, session: &S) -> ActionResult<()> {
        let token = require_session(session, "logout")?;
        let result = self
            .backend
            .send(BackendCall::new(Endpoint::Signout).with_token(&token))
            .await;
        logged("logout", result)?;
        session.clear();
        self.words.invalidate(&token);
        Ok(())
    }

    /// Ask the backend whether the session is still valid.
    pub async fn signed_in_check<S: TokenStore>(&self, session: &S) -> ActionResult<SignedInUser> {
        let token = require_session(session, "signed_in_check")?;
        let result = self
            .call(BackendCall::new(Endpoint::SignedInCheck).with_token(&token))
            .await;
        logged("signed_in_check", result)
    }

    pub async fn register_word<S: TokenStore>(&self, session: &S, form: &WordForm) -> ActionResult<()> {
        let token = require_session(session, "register_word")?;
        let form = validated(form)?;
        let body = json!({ "item": WordDraft::from(&form) });
        let result = self
            .backend
            .send(
                BackendCall::new(Endpoint::RegisterWord)
                    .with_token(&token)
                    .with_body(body),
            )
            .await
            .map(drop);
        logged("register_word", result)?;
        self.words.invalidate(&token);
        Ok(())
    }

    /// AI-generate meaning and example sentences for a word.
    pub async fn generate_word_data<S: TokenStore>(
        &self,
        session: &S,
        word: &str,
    ) -> ActionResult<WordDraft> {
        let token = require_session(session, "generate_word_data")?;
        let errors = schema::check_word(word);
        if !errors.is_empty() {
            return Err(ActionError::Invalid(errors));
        }
        let body = json!({ "word": word.trim() });
        let reply: GenerateReply = logged(
            "generate_word_data",
            self.call(
                BackendCall::new(Endpoint::GenerateWord)
                    .with_token(&token)
                    .with_body(body),
            )
            .await,
        )?;
        let mut draft = reply.item;
        if draft.word.trim().is_empty() {
            draft.word = word.trim().to_string();
        }
        Ok(draft)
    }

    /// Known words starting like `input`. Blank input yields nothing.
    pub async fn suggest_words<S: TokenStore>(
        &self,
        session: &S,
        input: &str,
    ) -> ActionResult<Vec<WordDraft>> {
        let token = require_session(session, "suggest_words")?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let reply: SuggestReply = logged(
            "suggest_words",
            self.call(
                BackendCall::new(Endpoint::SuggestWords)
                    .with_token(&token)
                    .with_body(json!({ "input": input })),
            )
            .await,
        )?;
        Ok(reply.items)
    }

    /// The user's words, served from the view cache while fresh.
    pub async fn get_word_list<S: TokenStore>(&self, session: &S) -> ActionResult<Vec<WordEntry>> {
        let token = require_session(session, "get_word_list")?;
        if let Some(words) = self.words.get(&token) {
            tracing::debug!(count = words.len(), "word list served from cache");
            return Ok(words);
        }
        let reply: WordListReply = logged(
            "get_word_list",
            self.call(BackendCall::new(Endpoint::WordList).with_token(&token))
                .await,
        )?;
        let words: Vec<WordEntry> = reply
            .word_list
            .into_iter()
            .map(WordEntry::from)
            .filter(|entry| {
                let keep = !entry.spelling.trim().is_empty();
                if !keep {
                    tracing::warn!(id = %entry.id, "dropping word without spelling");
                }
                keep
            })
            .collect();
        self.words.put(&token, words.clone());
        Ok(words)
    }

    pub async fn get_word_detail<S: TokenStore>(&self, session: &S, id: &str) -> ActionResult<WordEntry> {
        let token = require_session(session, "get_word_detail")?;
        let reply: WordDetailReply = logged(
            "get_word_detail",
            self.call(
                BackendCall::new(Endpoint::WordDetail)
                    .with_token(&token)
                    .with_body(json!({ "user_word_id": id })),
            )
            .await,
        )?;
        if reply.spelling.trim().is_empty() {
            return logged(
                "get_word_detail",
                Err(ActionError::Unexpected(format!("word {id} has no spelling"))),
            );
        }
        Ok(reply.into_entry(id.to_string()))
    }

    pub async fn delete_word<S: TokenStore>(&self, session: &S, id: &str) -> ActionResult<()> {
        let token = require_session(session, "delete_word")?;
        let result = self
            .backend
            .send(
                BackendCall::new(Endpoint::DeleteWord)
                    .with_token(&token)
                    .with_body(json!({ "user_word_id": id })),
            )
            .await
            .map(drop);
        logged("delete_word", result)?;
        self.words.invalidate(&token);
        Ok(())
    }

    async fn call<T: DeserializeOwned>(&self, call: BackendCall) -> ActionResult<T> {
        let endpoint = call.endpoint;
        let value: Value = self.backend.send(call).await?;
        serde_json::from_value(value)
            .map_err(|e| ActionError::Unexpected(format!("{}: {e}", endpoint.path())))
    }
}

fn require_session<S: TokenStore>(session: &S, action: &'static str) -> ActionResult<String> {
    session.get().ok_or_else(|| {
        tracing::debug!(action, "no session cookie, skipping backend call");
        ActionError::NoSession
    })
}

/// The normalized form, if it passes its schema.
fn validated<T: Normalize>(form: &T) -> ActionResult<T> {
    let errors = schema::check(form);
    if errors.is_empty() {
        Ok(form.normalized())
    } else {
        Err(ActionError::Invalid(errors))
    }
}

fn logged<T>(action: &'static str, result: ActionResult<T>) -> ActionResult<T> {
    if let Err(error) = &result {
        tracing::warn!(action, %error, "action failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::schema::USERNAME_MIN_MESSAGE;
    use crate::session::MemoryTokenStore;

    #[derive(Default)]
    struct FakeBackend {
        calls: Mutex<Vec<BackendCall>>,
        replies: Mutex<HashMap<Endpoint, Result<Value, ActionError>>>,
    }

    impl FakeBackend {
        fn reply(self, endpoint: Endpoint, result: Result<Value, ActionError>) -> Self {
            self.replies.lock().unwrap().insert(endpoint, result);
            self
        }

        fn calls(&self) -> Vec<BackendCall> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, endpoint: Endpoint) -> usize {
            self.calls()
                .iter()
                .filter(|c| c.endpoint == endpoint)
                .count()
        }
    }

    impl Backend for FakeBackend {
        async fn send(&self, call: BackendCall) -> Result<Value, ActionError> {
            let reply = self
                .replies
                .lock()
                .unwrap()
                .get(&call.endpoint)
                .cloned()
                .unwrap_or(Ok(Value::Null));
            self.calls.lock().unwrap().push(call);
            reply
        }
    }

    fn actions(backend: FakeBackend) -> Actions<FakeBackend> {
        Actions::new(backend, &Settings::from_toml("").unwrap())
    }

    fn rejected(status: u16, message: &str) -> ActionError {
        ActionError::Rejected {
            status,
            message: Some(message.into()),
        }
    }

    fn word_form() -> WordForm {
        WordForm {
            word: "pen".into(),
            meaning: "ペン".into(),
            example: "This is a pen.".into(),
            example_translation: "これはペンです。".into(),
        }
    }

    fn login_form(user_name: &str) -> LoginForm {
        LoginForm {
            user_name: user_name.into(),
            password: "Abcdef12".into(),
        }
    }

    #[tokio::test]
    async fn test_authenticated_actions_short_circuit_without_session() {
        let actions = actions(FakeBackend::default());
        let session = MemoryTokenStore::new();

        assert_eq!(actions.logout(&session).await, Err(ActionError::NoSession));
        assert_eq!(
            actions.signed_in_check(&session).await,
            Err(ActionError::NoSession)
        );
        assert_eq!(
            actions.register_word(&session, &word_form()).await,
            Err(ActionError::NoSession)
        );
        assert_eq!(
            actions.generate_word_data(&session, "pen").await,
            Err(ActionError::NoSession)
        );
        assert_eq!(
            actions.suggest_words(&session, "pe").await,
            Err(ActionError::NoSession)
        );
        assert_eq!(
            actions.get_word_list(&session).await,
            Err(ActionError::NoSession)
        );
        assert_eq!(
            actions.get_word_detail(&session, "w1").await,
            Err(ActionError::NoSession)
        );
        assert_eq!(
            actions.delete_word(&session, "w1").await,
            Err(ActionError::NoSession)
        );

        assert!(actions.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_login_success_sets_cookie() {
        let backend = FakeBackend::default().reply(
            Endpoint::Signin,
            Ok(json!({"access_token": "tok123", "token_type": "bearer"})),
        );
        let actions = actions(backend);
        let session = MemoryTokenStore::new();

        actions
            .login(&session, &login_form("validUser"))
            .await
            .unwrap();

        assert_eq!(session.get().as_deref(), Some("tok123"));
        assert_eq!(session.max_age(), Some(3600));

        let calls = actions.backend().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].token, None);
        let body = calls[0].body.as_ref().unwrap();
        assert_eq!(body["username_or_email"], "validUser");
        assert_eq!(body["password"], "Abcdef12");
    }

    #[tokio::test]
    async fn test_login_rejected_leaves_cookie_alone() {
        let backend = FakeBackend::default().reply(
            Endpoint::Signin,
            Err(rejected(401, "Incorrect username or password")),
        );
        let actions = actions(backend);
        let session = MemoryTokenStore::new();

        let err = actions
            .login(&session, &login_form("validUser"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message("fallback"), "Incorrect username or password");
        assert_eq!(session.get(), None);
    }

    #[tokio::test]
    async fn test_login_invalid_input_never_calls_backend() {
        let actions = actions(FakeBackend::default());
        let session = MemoryTokenStore::new();

        let err = actions
            .login(&session, &login_form("ab"))
            .await
            .unwrap_err();
        match err {
            ActionError::Invalid(errors) => {
                assert_eq!(errors.first("user_name"), Some(USERNAME_MIN_MESSAGE))
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert!(actions.backend().calls().is_empty());
        assert_eq!(session.get(), None);
    }

    #[tokio::test]
    async fn test_login_padded_short_username_is_invalid() {
        let actions = actions(FakeBackend::default());
        let session = MemoryTokenStore::new();

        let err = actions
            .login(&session, &login_form(" ab "))
            .await
            .unwrap_err();
        assert_eq!(err.user_message("fallback"), USERNAME_MIN_MESSAGE);
        assert_eq!(actions.backend().count(Endpoint::Signin), 0);
    }

    #[tokio::test]
    async fn test_signup_padded_short_username_is_invalid() {
        let actions = actions(FakeBackend::default());
        let form = SignupForm {
            user_name: "  ab  ".into(),
            email: " new@example.com ".into(),
            password: "Abcdef12".into(),
        };

        let err = actions.signup(&form).await.unwrap_err();
        assert!(matches!(err, ActionError::Invalid(_)));
        assert!(actions.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_login_malformed_reply_sets_nothing() {
        let backend = FakeBackend::default().reply(Endpoint::Signin, Ok(json!({"token": "x"})));
        let actions = actions(backend);
        let session = MemoryTokenStore::new();

        let err = actions
            .login(&session, &login_form("validUser"))
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::Unexpected(_)));
        assert_eq!(session.get(), None);
    }

    #[tokio::test]
    async fn test_signup_body() {
        let actions = actions(FakeBackend::default());
        let form = SignupForm {
            user_name: " newUser ".into(),
            email: "new@example.com".into(),
            password: "Abcdef12".into(),
        };
        actions.signup(&form).await.unwrap();

        let calls = actions.backend().calls();
        assert_eq!(calls[0].endpoint, Endpoint::Signup);
        assert_eq!(calls[0].body.as_ref().unwrap()["username"], "newUser");
    }

    #[tokio::test]
    async fn test_authenticated_calls_carry_token() {
        let backend = FakeBackend::default()
            .reply(Endpoint::SignedInCheck, Ok(json!({"user_id": "u1"})));
        let actions = actions(backend);
        let session = MemoryTokenStore::with_token("tok123");

        let user = actions.signed_in_check(&session).await.unwrap();
        assert_eq!(user.user_id, "u1");
        assert_eq!(
            actions.backend().calls()[0].token.as_deref(),
            Some("tok123")
        );
    }

    #[tokio::test]
    async fn test_logout_clears_session_on_success_only() {
        let session = MemoryTokenStore::with_token("tok123");
        let failing = actions(
            FakeBackend::default().reply(Endpoint::Signout, Err(rejected(500, "boom"))),
        );
        assert!(failing.logout(&session).await.is_err());
        assert_eq!(session.get().as_deref(), Some("tok123"));

        let working = actions(FakeBackend::default());
        working.logout(&session).await.unwrap();
        assert_eq!(session.get(), None);
    }

    fn list_reply() -> Value {
        json!({"word_list": [
            {"word_id": "w1", "word": "apple", "meaning": "りんご"},
            {"word_id": "w2", "word": "pen", "meaning": "ペン",
             "example_sentence": "This is a pen.", "example_sentence_translation": "これはペンです。"},
            {"word_id": "w3", "word": "  "}
        ]})
    }

    #[tokio::test]
    async fn test_word_list_is_cached_and_drops_blank_spellings() {
        let actions = actions(FakeBackend::default().reply(Endpoint::WordList, Ok(list_reply())));
        let session = MemoryTokenStore::with_token("tok123");

        let first = actions.get_word_list(&session).await.unwrap();
        let second = actions.get_word_list(&session).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[1].example_sentence.as_deref(), Some("This is a pen."));
        assert_eq!(actions.backend().count(Endpoint::WordList), 1);
    }

    #[tokio::test]
    async fn test_delete_success_revalidates_word_list() {
        let actions = actions(FakeBackend::default().reply(Endpoint::WordList, Ok(list_reply())));
        let session = MemoryTokenStore::with_token("tok123");

        actions.get_word_list(&session).await.unwrap();
        actions.delete_word(&session, "w1").await.unwrap();
        assert!(actions.word_cache().get("tok123").is_none());

        actions.get_word_list(&session).await.unwrap();
        assert_eq!(actions.backend().count(Endpoint::WordList), 2);

        let delete = actions
            .backend()
            .calls()
            .into_iter()
            .find(|c| c.endpoint == Endpoint::DeleteWord)
            .unwrap();
        assert_eq!(delete.body.unwrap()["user_word_id"], "w1");
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_word_list() {
        let backend = FakeBackend::default()
            .reply(Endpoint::WordList, Ok(list_reply()))
            .reply(Endpoint::DeleteWord, Err(rejected(404, "not found")));
        let actions = actions(backend);
        let session = MemoryTokenStore::with_token("tok123");

        let before = actions.get_word_list(&session).await.unwrap();
        let err = actions.delete_word(&session, "w1").await.unwrap_err();
        assert_eq!(err.user_message("削除に失敗しました"), "not found");

        assert_eq!(actions.word_cache().get("tok123"), Some(before));
        assert_eq!(actions.backend().count(Endpoint::WordList), 1);
    }

    #[tokio::test]
    async fn test_register_word_sends_item_and_revalidates() {
        let actions = actions(FakeBackend::default().reply(Endpoint::WordList, Ok(list_reply())));
        let session = MemoryTokenStore::with_token("tok123");
        actions.get_word_list(&session).await.unwrap();

        actions.register_word(&session, &word_form()).await.unwrap();

        let register = actions
            .backend()
            .calls()
            .into_iter()
            .find(|c| c.endpoint == Endpoint::RegisterWord)
            .unwrap();
        let item = &register.body.unwrap()["item"];
        assert_eq!(item["word"], "pen");
        assert_eq!(item["exampleSentenceTranslation"], "これはペンです。");
        assert!(actions.word_cache().get("tok123").is_none());
    }

    #[tokio::test]
    async fn test_register_word_rejects_invalid_form_locally() {
        let actions = actions(FakeBackend::default());
        let session = MemoryTokenStore::with_token("tok123");
        let form = WordForm {
            meaning: String::new(),
            ..word_form()
        };
        let err = actions.register_word(&session, &form).await.unwrap_err();
        assert!(matches!(err, ActionError::Invalid(_)));
        assert!(actions.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_generate_word_data() {
        let backend = FakeBackend::default().reply(
            Endpoint::GenerateWord,
            Ok(json!({"item": {
                "word": "pen",
                "meaning": "ペン",
                "exampleSentence": "This is a pen.",
                "exampleSentenceTranslation": "これはペンです。"
            }})),
        );
        let actions = actions(backend);
        let session = MemoryTokenStore::with_token("tok123");

        let draft = actions.generate_word_data(&session, " pen ").await.unwrap();
        assert_eq!(draft.meaning, "ペン");
        assert_eq!(
            actions.backend().calls()[0].body.as_ref().unwrap()["word"],
            "pen"
        );

        assert!(matches!(
            actions.generate_word_data(&session, "").await,
            Err(ActionError::Invalid(_))
        ));
        assert_eq!(actions.backend().count(Endpoint::GenerateWord), 1);
    }

    #[tokio::test]
    async fn test_suggest_words() {
        let backend = FakeBackend::default().reply(
            Endpoint::SuggestWords,
            Ok(json!({"items": [{"word": "cow", "meaning": "牛"}]})),
        );
        let actions = actions(backend);
        let session = MemoryTokenStore::with_token("tok123");

        assert!(actions.suggest_words(&session, "   ").await.unwrap().is_empty());
        assert_eq!(actions.backend().count(Endpoint::SuggestWords), 0);

        let items = actions.suggest_words(&session, "co").await.unwrap();
        assert_eq!(items[0].word, "cow");
        assert_eq!(
            actions.backend().calls()[0].body.as_ref().unwrap()["input"],
            "co"
        );
    }

    #[tokio::test]
    async fn test_word_detail() {
        let backend = FakeBackend::default().reply(
            Endpoint::WordDetail,
            Ok(json!({"spelling": "pen", "meaning": "ペン"})),
        );
        let actions = actions(backend);
        let session = MemoryTokenStore::with_token("tok123");

        let entry = actions.get_word_detail(&session, "w2").await.unwrap();
        assert_eq!(entry.id, "w2");
        assert_eq!(entry.spelling, "pen");
        assert_eq!(entry.example_sentence, None);
    }

    #[tokio::test]
    async fn test_word_detail_without_spelling_is_unexpected() {
        let backend =
            FakeBackend::default().reply(Endpoint::WordDetail, Ok(json!({"spelling": ""})));
        let actions = actions(backend);
        let session = MemoryTokenStore::with_token("tok123");

        assert!(matches!(
            actions.get_word_detail(&session, "w2").await,
            Err(ActionError::Unexpected(_))
        ));
    }
}
