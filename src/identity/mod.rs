//! Identity and session state
//!
//! An [`Identity`] is either registered (issued by the external auth
//! provider, progress lives on the backend) or a guest (generated locally,
//! progress lives in local storage only). The [`IdentitySession`] tracks the
//! active identity and hands out the bearer token for remote calls; it owns
//! no progress data.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Display name assigned to locally-generated guest identities
pub const GUEST_DISPLAY_NAME: &str = "Guest Adventurer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityKind {
    Registered,
    Guest,
}

/// The active user, registered or guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub kind: IdentityKind,
    pub display_name: String,
}

impl Identity {
    /// An identity issued by the external auth provider
    pub fn registered(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: IdentityKind::Registered,
            display_name: display_name.into(),
        }
    }

    /// A locally-generated guest identity with a timestamp-derived id
    ///
    /// Guest ids never reach the backend; they only key local state.
    pub fn guest() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self {
            id: format!("guest-{}", millis),
            kind: IdentityKind::Guest,
            display_name: GUEST_DISPLAY_NAME.into(),
        }
    }

    pub fn is_guest(&self) -> bool {
        self.kind == IdentityKind::Guest
    }
}

/// Tracks the active identity across sign-in, guest-start and sign-out
///
/// Every identity change bumps a generation counter. Async results computed
/// for an earlier generation must be discarded when they resolve late,
/// rather than applied to whoever is signed in now.
#[derive(Debug, Default)]
pub struct IdentitySession {
    identity: Option<Identity>,
    token: Option<String>,
    generation: u64,
}

impl IdentitySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a registered identity with its bearer token
    pub fn sign_in(&mut self, identity: Identity, token: impl Into<String>) -> u64 {
        self.identity = Some(identity);
        self.token = Some(token.into());
        self.bump()
    }

    /// Activate a fresh guest identity
    pub fn start_guest(&mut self) -> u64 {
        self.identity = Some(Identity::guest());
        self.token = None;
        self.bump()
    }

    /// Clear the active identity
    pub fn sign_out(&mut self) -> u64 {
        self.identity = None;
        self.token = None;
        self.bump()
    }

    fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Bearer token for remote calls; always `None` for guests
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a result computed at `generation` may still be applied
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// True when any identity (registered or guest) is active
    pub fn is_active(&self) -> bool {
        self.identity.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_id_is_timestamp_derived() {
        let guest = Identity::guest();
        assert!(guest.id.starts_with("guest-"));
        assert_eq!(guest.kind, IdentityKind::Guest);
        assert_eq!(guest.display_name, GUEST_DISPLAY_NAME);
    }

    #[test]
    fn test_sign_in_exposes_token() {
        let mut session = IdentitySession::new();
        session.sign_in(Identity::registered("uid-1", "Ada"), "tok-abc");
        assert_eq!(session.bearer_token(), Some("tok-abc"));
        assert!(session.is_active());
    }

    #[test]
    fn test_guest_has_no_token() {
        let mut session = IdentitySession::new();
        session.start_guest();
        assert!(session.bearer_token().is_none());
        assert!(session.identity().unwrap().is_guest());
    }

    #[test]
    fn test_identity_change_invalidates_generation() {
        let mut session = IdentitySession::new();
        let g1 = session.start_guest();
        assert!(session.is_current(g1));

        session.sign_out();
        // A fetch started under g1 resolves late: its result must be dropped
        assert!(!session.is_current(g1));
    }

    #[test]
    fn test_sign_out_clears_everything() {
        let mut session = IdentitySession::new();
        session.sign_in(Identity::registered("uid-1", "Ada"), "tok-abc");
        session.sign_out();
        assert!(!session.is_active());
        assert!(session.bearer_token().is_none());
    }
}
