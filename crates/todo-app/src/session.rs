use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use todo_core::{TodoError, TodoResult};
use todo_domain::User;
use tokio::sync::broadcast;

const AUTH_EVENT_CAPACITY: usize = 16;

/// External sign-in service.
///
/// Every sign-in/sign-out transition is published to subscribers as the
/// new current user (`None` after sign-out).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    fn subscribe(&self) -> broadcast::Receiver<Option<User>>;

    async fn sign_out(&self) -> TodoResult<()>;
}

/// Identity provider backed by a configured user, for local stores
pub struct LocalIdentityProvider {
    current: Mutex<Option<User>>,
    events: broadcast::Sender<Option<User>>,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self {
            current: Mutex::new(None),
            events,
        }
    }

    pub fn sign_in(&self, user: User) {
        tracing::info!("Signed in as {}", user.email);
        *self.lock() = Some(user.clone());
        self.publish(Some(user));
    }

    fn lock(&self) -> MutexGuard<'_, Option<User>> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, user: Option<User>) {
        // No subscribers is fine.
        let _ = self.events.send(user);
    }
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    fn current_user(&self) -> Option<User> {
        self.lock().clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<Option<User>> {
        self.events.subscribe()
    }

    async fn sign_out(&self) -> TodoResult<()> {
        let previous = self.lock().take();
        if let Some(user) = previous {
            tracing::info!("Signed out {}", user.email);
        }
        self.publish(None);
        Ok(())
    }
}

/// The signed-in user, sourced once from identity events and handed to
/// every repository call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> TodoResult<&User> {
        self.user.as_ref().ok_or_else(TodoError::no_session)
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}
