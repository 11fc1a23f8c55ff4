//! Capabilities the forms consume from their host.
//!
//! Authentication, dialogs and navigation are passed into forms by reference
//! instead of being resolved from ambient context. The host picks the
//! implementation: the CLI prints to the console, tests record what happened.

use crate::app::actions::{Modal, Route};
use crate::domain::error::Result;
use crate::storage::area::StorageArea;

/// Storage entry holding the login token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Knows whether a user is logged in.
pub trait AuthCapability {
    fn is_logged_in(&self) -> bool;

    /// Runs `action` if logged in; otherwise opens the login prompt.
    ///
    /// Returns the action's result, or `None` when the prompt was shown instead.
    fn require_auth<R>(
        &self,
        modal: &mut dyn ModalCapability,
        action: impl FnOnce() -> R,
    ) -> Option<R>
    where
        Self: Sized,
    {
        if self.is_logged_in() {
            Some(action())
        } else {
            tracing::debug!("action requires login, showing prompt");
            modal.open(Modal::LoginPrompt);
            None
        }
    }
}

/// Presents dialogs.
pub trait ModalCapability {
    fn open(&mut self, modal: Modal);
    fn close(&mut self);
}

/// Moves between views.
pub trait Navigator {
    fn navigate_to(&mut self, route: Route);
}

/// Login state stored as a token entry in a storage area.
#[derive(Debug, Clone)]
pub struct SessionAuth<A> {
    area: A,
}

impl<A: StorageArea> SessionAuth<A> {
    pub const fn new(area: A) -> Self {
        Self { area }
    }

    /// Stores the access token, logging the user in.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be written.
    pub fn login(&mut self, token: &str) -> Result<()> {
        self.area.set_item(ACCESS_TOKEN_KEY, token)?;
        tracing::info!("logged in");
        Ok(())
    }

    /// Removes the access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token entry cannot be removed.
    pub fn logout(&mut self) -> Result<()> {
        self.area.remove_item(ACCESS_TOKEN_KEY)?;
        tracing::info!("logged out");
        Ok(())
    }
}

impl<A: StorageArea> AuthCapability for SessionAuth<A> {
    fn is_logged_in(&self) -> bool {
        match self.area.get_item(ACCESS_TOKEN_KEY) {
            Ok(token) => token.is_some_and(|t| !t.trim().is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read access token");
                false
            }
        }
    }
}

/// Fixed login state, for hosts without sessions and for tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticAuth(pub bool);

impl AuthCapability for StaticAuth {
    fn is_logged_in(&self) -> bool {
        self.0
    }
}

/// Modal host that remembers what was shown.
#[derive(Debug, Clone, Default)]
pub struct RecordingModal {
    pub opened: Vec<Modal>,
    pub closed: usize,
}

impl RecordingModal {
    #[must_use]
    pub fn last(&self) -> Option<&Modal> {
        self.opened.last()
    }
}

impl ModalCapability for RecordingModal {
    fn open(&mut self, modal: Modal) {
        self.opened.push(modal);
    }

    fn close(&mut self) {
        self.closed += 1;
    }
}

/// Navigator that remembers every route visited.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<Route>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.visited.last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&mut self, route: Route) {
        self.visited.push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::area::MemoryArea;

    #[test]
    fn require_auth_runs_action_when_logged_in() {
        let mut modal = RecordingModal::default();
        let ran = StaticAuth(true).require_auth(&mut modal, || 7);
        assert_eq!(ran, Some(7));
        assert!(modal.opened.is_empty());
    }

    #[test]
    fn require_auth_prompts_when_logged_out() {
        let mut modal = RecordingModal::default();
        let mut called = false;
        let ran = StaticAuth(false).require_auth(&mut modal, || called = true);
        assert_eq!(ran, None);
        assert!(!called);
        assert_eq!(modal.last(), Some(&Modal::LoginPrompt));
    }

    #[test]
    fn session_auth_follows_token_entry() {
        let mut auth = SessionAuth::new(MemoryArea::default());
        assert!(!auth.is_logged_in());
        auth.login("token-123").unwrap();
        assert!(auth.is_logged_in());
        auth.logout().unwrap();
        assert!(!auth.is_logged_in());
    }

    #[test]
    fn blank_token_is_not_a_session() {
        let auth = SessionAuth::new(MemoryArea::with_item(ACCESS_TOKEN_KEY, "  "));
        assert!(!auth.is_logged_in());
    }
}
