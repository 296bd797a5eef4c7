use std::{collections::HashMap, sync::Mutex};

/// Per-identity conversational mode.
///
/// `AwaitingBroadcastContent` marks the operator between pressing the
/// broadcast button and submitting (or cancelling) the payload. The state
/// machine is responsible for only ever entering it for the operator
/// identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionMode {
    #[default]
    Idle,
    AwaitingBroadcastContent,
}

/// Transient session-mode registry, queried beside the user directory.
///
/// Plain `std::sync::Mutex` because every operation is a synchronous map
/// lookup, never held across an await point. Modes are not persisted: a
/// process restart drops any half-authored broadcast, which is the intended
/// behavior.
#[derive(Debug, Default)]
pub struct SessionModes {
    modes: Mutex<HashMap<i64, SessionMode>>,
}

impl SessionModes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self, user_id: i64) -> SessionMode {
        let modes = self.modes.lock().unwrap_or_else(|e| e.into_inner());
        modes.get(&user_id).copied().unwrap_or_default()
    }

    pub fn set_mode(&self, user_id: i64, mode: SessionMode) {
        let mut modes = self.modes.lock().unwrap_or_else(|e| e.into_inner());
        if mode == SessionMode::Idle {
            modes.remove(&user_id);
        } else {
            modes.insert(user_id, mode);
        }
    }

    /// Reset to `Idle`. Equivalent to `set_mode(user_id, SessionMode::Idle)`,
    /// kept as an explicit verb for the dispatch-completion path.
    pub fn clear(&self, user_id: i64) {
        self.set_mode(user_id, SessionMode::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_idle() {
        let modes = SessionModes::new();
        assert_eq!(modes.mode(7), SessionMode::Idle);
    }

    #[test]
    fn set_and_clear() {
        let modes = SessionModes::new();
        modes.set_mode(7, SessionMode::AwaitingBroadcastContent);
        assert_eq!(modes.mode(7), SessionMode::AwaitingBroadcastContent);
        assert_eq!(modes.mode(8), SessionMode::Idle, "modes are per identity");

        modes.clear(7);
        assert_eq!(modes.mode(7), SessionMode::Idle);
    }

    #[test]
    fn setting_idle_removes_entry() {
        let modes = SessionModes::new();
        modes.set_mode(7, SessionMode::AwaitingBroadcastContent);
        modes.set_mode(7, SessionMode::Idle);
        let inner = modes.modes.lock().unwrap_or_else(|e| e.into_inner());
        assert!(inner.is_empty());
    }
}
