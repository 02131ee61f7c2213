//! Route guard decision.
//!
//! Pages under [`PROTECTED_PREFIXES`] need a session cookie. The check is
//! presence only; the token is not validated against the backend here.

use url::form_urlencoded;

pub const LOGIN_ROUTE: &str = "/login";
/// Query parameter carrying the page to return to after login.
pub const NEXT_PARAM: &str = "next";
/// Where a successful login lands when no `next` was given.
pub const DEFAULT_AFTER_LOGIN: &str = "/register-word";

pub const PROTECTED_PREFIXES: &[&str] = &["/word-list", "/register-word"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Send the visitor to this URL instead.
    Redirect(String),
}

/// Whether `path` is one of the protected pages or below one.
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

pub fn check(path: &str, has_session: bool) -> GuardDecision {
    if has_session || !is_protected(path) {
        return GuardDecision::Allow;
    }
    GuardDecision::Redirect(login_redirect(path))
}

/// `/login?next=<path>`.
pub fn login_redirect(path: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(NEXT_PARAM, path)
        .finish();
    format!("{LOGIN_ROUTE}?{query}")
}

/// Destination after login, from the `next` query value (raw or decoded).
/// Only same-site absolute paths are honoured.
pub fn return_target(next: &str) -> String {
    let query = format!("{NEXT_PARAM}={}", next.trim());
    let decoded = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| *key == NEXT_PARAM)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();
    let local =
        decoded.starts_with('/') && !decoded.starts_with("//") && !decoded.contains('\\');
    if local {
        decoded
    } else {
        DEFAULT_AFTER_LOGIN.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_paths() {
        assert!(is_protected("/word-list"));
        assert!(is_protected("/word-list/42"));
        assert!(is_protected("/register-word"));
        assert!(!is_protected("/word-listing"));
        assert!(!is_protected("/login"));
        assert!(!is_protected("/"));
    }

    #[test]
    fn test_redirect_without_session() {
        assert_eq!(
            check("/word-list", false),
            GuardDecision::Redirect("/login?next=%2Fword-list".into())
        );
        assert_eq!(check("/word-list", true), GuardDecision::Allow);
        assert_eq!(check("/signup", false), GuardDecision::Allow);
    }

    #[test]
    fn test_return_target() {
        assert_eq!(return_target(""), DEFAULT_AFTER_LOGIN);
        assert_eq!(return_target("/word-list"), "/word-list");
        assert_eq!(return_target("%2Fword-list"), "/word-list");
        assert_eq!(return_target("//evil.example"), DEFAULT_AFTER_LOGIN);
        assert_eq!(return_target("https://evil.example"), DEFAULT_AFTER_LOGIN);
        assert_eq!(return_target("/\\evil.example"), DEFAULT_AFTER_LOGIN);
    }
}
