use dashmap::DashSet;
use uuid::Uuid;

/// Per-session record of consumed hints, keyed by `(user, game)`.
///
/// Boolean semantics over an external key-value collaborator: the marker
/// is set at most once, setting it again is a no-op, and it lives for
/// the lifetime of the store so a retried request can never obtain a
/// second hint.
#[derive(Debug, Default)]
pub struct HintSessionStore {
    used: DashSet<(Uuid, Uuid)>,
}

impl HintSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hint_used(&self, user_id: Uuid, game_id: Uuid) -> bool {
        self.used.contains(&(user_id, game_id))
    }

    pub fn mark_used(&self, user_id: Uuid, game_id: Uuid) {
        self.used.insert((user_id, game_id));
    }
}
