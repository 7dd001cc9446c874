//! Progress persistence
//!
//! Registered identities sync against the backend with the session's bearer
//! token; guests get a fresh default snapshot and write to local storage.
//! Consistency is last-write-wins: the engine is always fed the most
//! recently loaded or saved snapshot from this client, and no cross-device
//! merge is attempted.

use crate::core::error::{QuestError, Result};
use crate::identity::{Identity, IdentityKind, IdentitySession};
use crate::progress::local::GuestStorage;
use crate::progress::snapshot::ProgressSnapshot;
use tokio::sync::Mutex;

/// Remote persistence seam for registered identities
///
/// Implemented by the HTTP client; tests substitute in-memory or failing
/// transports. The store is generic over the transport, so the futures
/// never need to be object-safe.
#[allow(async_fn_in_trait)]
pub trait ProgressTransport {
    async fn fetch_progress(&self, token: &str) -> Result<ProgressSnapshot>;
    async fn store_progress(&self, token: &str, snapshot: &ProgressSnapshot) -> Result<()>;
}

/// Loads and persists the snapshot for the active identity
pub struct ProgressStore<T> {
    transport: T,
    guest_storage: GuestStorage,
    // Serializes saves: a completion arriving while a save is in flight
    // queues behind it, so no save ever races a stale snapshot.
    save_guard: Mutex<()>,
}

impl<T: ProgressTransport> ProgressStore<T> {
    pub fn new(transport: T, guest_storage: GuestStorage) -> Self {
        Self {
            transport,
            guest_storage,
            save_guard: Mutex::new(()),
        }
    }

    /// Load the snapshot for the session's identity
    ///
    /// Guests always start from the default snapshot. Registered identities
    /// fetch from the backend; any transport or auth failure surfaces as
    /// `RemoteUnavailable`, as does a payload that violates the snapshot
    /// invariants. Malformed remote state never reaches the engine.
    pub async fn load(&self, session: &IdentitySession) -> Result<ProgressSnapshot> {
        let identity = self.active_identity(session)?;
        match identity.kind {
            IdentityKind::Guest => Ok(ProgressSnapshot::default()),
            IdentityKind::Registered => {
                let token = session.bearer_token().ok_or_else(|| {
                    QuestError::RemoteUnavailable("no auth token for registered identity".into())
                })?;
                let snapshot = self.transport.fetch_progress(token).await?;
                snapshot.validate().map_err(|reason| {
                    QuestError::RemoteUnavailable(format!("malformed remote snapshot: {}", reason))
                })?;
                Ok(snapshot)
            }
        }
    }

    /// Load, degrading to the default snapshot on failure
    ///
    /// The error comes back alongside the snapshot so the caller can show a
    /// non-blocking notification instead of stalling the session.
    pub async fn load_or_default(
        &self,
        session: &IdentitySession,
    ) -> (ProgressSnapshot, Option<QuestError>) {
        match self.load(session).await {
            Ok(snapshot) => (snapshot, None),
            Err(e) => {
                tracing::warn!("progress load failed, starting from default snapshot: {}", e);
                (ProgressSnapshot::default(), Some(e))
            }
        }
    }

    /// Read the guest blob cached on disk, if any
    ///
    /// Opt-in: a plain `load` for a guest always starts fresh, so two
    /// sequential guest sessions share nothing unless the caller asks for
    /// the cached blob explicitly.
    pub fn load_cached_guest(&self) -> Result<Option<ProgressSnapshot>> {
        self.guest_storage.read()
    }

    /// Persist a snapshot for the session's identity
    ///
    /// Registered saves retry exactly once, then surface `SyncFailed`; the
    /// caller keeps its optimistic in-memory snapshot either way. Guest
    /// saves write the local blob synchronously with no retry.
    pub async fn save(&self, session: &IdentitySession, snapshot: &ProgressSnapshot) -> Result<()> {
        let identity = self.active_identity(session)?;
        let _guard = self.save_guard.lock().await;

        match identity.kind {
            IdentityKind::Guest => self.guest_storage.write(snapshot),
            IdentityKind::Registered => {
                let token = session
                    .bearer_token()
                    .ok_or_else(|| QuestError::SyncFailed("no auth token".into()))?;

                match self.transport.store_progress(token, snapshot).await {
                    Ok(()) => Ok(()),
                    Err(first) => {
                        tracing::warn!("progress save failed, retrying once: {}", first);
                        self.transport
                            .store_progress(token, snapshot)
                            .await
                            .map_err(|e| QuestError::SyncFailed(e.to_string()))
                    }
                }
            }
        }
    }

    pub fn guest_storage(&self) -> &GuestStorage {
        &self.guest_storage
    }

    fn active_identity<'a>(&self, session: &'a IdentitySession) -> Result<&'a Identity> {
        session
            .identity()
            .ok_or_else(|| QuestError::InvalidArgument("no active session".into()))
    }
}
