//! Toast texts.

pub const LOGIN_SUCCEEDED: &str = "ログインしました";
pub const LOGIN_FAILED: &str = "ログインに失敗しました";
pub const SIGNUP_SUCCEEDED: &str = "登録に成功しました";
pub const SIGNUP_FAILED: &str = "登録に失敗しました";
pub const WORD_REGISTERED: &str = "登録に成功しました";
pub const WORD_REGISTER_FAILED: &str = "登録に失敗しました";
pub const GENERATE_SUCCEEDED: &str = "単語情報を生成しました";
pub const GENERATE_FAILED: &str = "単語情報の生成に失敗しました";
pub const DELETE_SUCCEEDED: &str = "単語を削除しました";
pub const DELETE_FAILED: &str = "削除に失敗しました";
pub const LOGOUT_SUCCEEDED: &str = "ログアウトしました";
pub const LOGOUT_FAILED: &str = "ログアウトに失敗しました";
pub const NOT_LOGGED_IN: &str = "まだログインしていません";
pub const UNEXPECTED: &str = "予期せぬエラーが発生しました";
