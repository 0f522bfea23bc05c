//! Shared self-identity tracking.
//!
//! The client's own [`User`] lives in one cell owned by the connection layer
//! and shared by handle with every parsed line, so a sender comparison made
//! long after parsing still judges against the nickname the server most
//! recently confirmed.
//!
//! Reads are copy-on-read snapshots: [`Identity::current`] always returns a
//! complete `User`, never a torn one. A read racing a rename may still see
//! the previous value; every read after the rename completes sees the new
//! one.

use crate::parse::user::User;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Atomically updated holder of the client's own [`User`].
#[derive(Debug)]
pub struct Identity {
    current: ArcSwap<User>,
}

/// Cloneable handle to an [`Identity`], shared between the connection and
/// every [`Line`](crate::parse::line::Line) it parses.
pub type IdentityHandle = Arc<Identity>;

impl Identity {
    /// Create an identity cell holding `user` and return the shared handle.
    pub fn new(user: User) -> IdentityHandle {
        Arc::new(Self {
            current: ArcSwap::from_pointee(user),
        })
    }

    /// Snapshot of the current value. The returned [`Arc`] keeps the
    /// snapshot alive independently of later updates.
    pub fn current(&self) -> Arc<User> {
        self.current.load_full()
    }

    /// Replace the whole identity, e.g. once registration reveals the full
    /// own mask.
    pub fn set(&self, user: User) {
        tracing::debug!("identity replaced: {:?}", user);
        self.current.store(Arc::new(user));
    }

    /// Apply a server-confirmed nickname change, keeping username and host.
    ///
    /// The connection layer is the only writer, so the load-modify-store
    /// sequence here does not race with other writes.
    pub fn set_nick(&self, nick: &str) {
        let mut user = (*self.current.load_full()).clone();
        tracing::debug!("nickname changed: {:?} -> {:?}", user.nick, nick);
        user.nick = nick.to_string();
        self.current.store(Arc::new(user));
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            current: ArcSwap::from_pointee(User::default()),
        }
    }
}
