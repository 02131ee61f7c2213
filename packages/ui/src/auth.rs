//! Authentication context and hooks for the UI.
//!
//! The session cookie is HTTP-only, so the browser cannot see it. Whether the
//! user is logged in is asked of the server on every page load and after each
//! login or logout; [`AuthState`] only mirrors the last answer.

use api::{settle, ActionResult, LoginForm};
use dioxus::prelude::*;

/// Authentication state for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthState {
    pub is_loading: bool,
    pub is_logged_in: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::checking()
    }
}

impl AuthState {
    /// Initial state, before the server has answered.
    pub fn checking() -> Self {
        Self {
            is_loading: true,
            is_logged_in: false,
        }
    }

    pub fn settled(is_logged_in: bool) -> Self {
        Self {
            is_loading: false,
            is_logged_in,
        }
    }

    /// A login or logout request went out.
    pub fn begin(self) -> Self {
        Self {
            is_loading: true,
            ..self
        }
    }

    /// Login finished; only a confirmed login changes `is_logged_in`.
    pub fn finish_login(self, confirmed: bool) -> Self {
        Self::settled(confirmed || self.is_logged_in)
    }

    /// Logout finished; only a confirmed logout changes `is_logged_in`.
    pub fn finish_logout(self, confirmed: bool) -> Self {
        Self::settled(!confirmed && self.is_logged_in)
    }
}

/// Decides once whether an auth page should send the visitor on because they
/// already had a session when they arrived.
///
/// The first settled state is the arrival answer. Later changes, including
/// the one the page's own form causes, never forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrivalCheck {
    decided: bool,
}

impl ArrivalCheck {
    pub fn forward(&mut self, state: AuthState) -> bool {
        if self.decided || state.is_loading {
            return false;
        }
        self.decided = true;
        state.is_logged_in
    }

    /// The page's own form went out before the arrival check settled.
    pub fn skip(&mut self) {
        self.decided = true;
    }
}

/// Handle to the auth state. Cheap to copy into event handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct AuthContext {
    state: Signal<AuthState>,
}

impl AuthContext {
    pub fn state(&self) -> AuthState {
        *self.state.read()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    pub fn is_logged_in(&self) -> bool {
        self.state().is_logged_in
    }

    pub async fn login(mut self, form: LoginForm) -> ActionResult<()> {
        self.state.with_mut(|state| *state = state.begin());
        let result = settle(api::login(form).await);
        let confirmed = result.is_ok();
        self.state
            .with_mut(|state| *state = state.finish_login(confirmed));
        result
    }

    pub async fn logout(mut self) -> ActionResult<()> {
        self.state.with_mut(|state| *state = state.begin());
        let result = settle(api::logout().await);
        let confirmed = result.is_ok();
        self.state
            .with_mut(|state| *state = state.finish_logout(confirmed));
        result
    }

    /// Re-derive the state from the server.
    pub async fn refresh(mut self) {
        let logged_in = match settle(api::signed_in_check().await) {
            Ok(user) => {
                tracing::debug!(user_id = %user.user_id, "session confirmed");
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "no confirmed session");
                false
            }
        };
        self.state.set(AuthState::settled(logged_in));
    }
}

/// Get the auth context provided by [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let state = use_signal(AuthState::default);
    let auth = use_context_provider(|| AuthContext { state });

    // Ask the server on mount
    let _ = use_resource(move || async move {
        auth.refresh().await;
    });

    rsx! {
        {children}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_checking() {
        let state = AuthState::default();
        assert!(state.is_loading);
        assert!(!state.is_logged_in);
    }

    #[test]
    fn test_login_transitions() {
        let out = AuthState::settled(false);
        let pending = out.begin();
        assert_eq!(
            pending,
            AuthState {
                is_loading: true,
                is_logged_in: false
            }
        );
        assert_eq!(pending.finish_login(true), AuthState::settled(true));
        assert_eq!(pending.finish_login(false), AuthState::settled(false));
    }

    #[test]
    fn test_logout_transitions() {
        let pending = AuthState::settled(true).begin();
        assert!(pending.is_logged_in);
        assert_eq!(pending.finish_logout(true), AuthState::settled(false));
        assert_eq!(pending.finish_logout(false), AuthState::settled(true));
    }

    #[test]
    fn test_arrival_with_session_forwards() {
        let mut arrival = ArrivalCheck::default();
        assert!(!arrival.forward(AuthState::checking()));
        assert!(arrival.forward(AuthState::settled(true)));
        assert!(!arrival.forward(AuthState::settled(true)));
    }

    #[test]
    fn test_own_login_does_not_forward() {
        let mut arrival = ArrivalCheck::default();
        let out = AuthState::settled(false);
        assert!(!arrival.forward(out));
        assert!(!arrival.forward(out.begin()));
        assert!(!arrival.forward(out.begin().finish_login(true)));
    }

    #[test]
    fn test_submit_during_initial_check_does_not_forward() {
        let mut arrival = ArrivalCheck::default();
        let checking = AuthState::checking();
        assert!(!arrival.forward(checking));
        arrival.skip();
        assert!(!arrival.forward(checking.finish_login(true)));
    }
}
