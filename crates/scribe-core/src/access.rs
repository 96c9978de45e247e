//! Author-only mutation gate.
//!
//! Editing or deleting a post or comment is allowed only to its author.
//! A mismatch is never surfaced as an authorization error: the caller
//! answers with a silent redirect (posts) or a no-op render (comments),
//! so the decision here is a plain two-state verdict.

use uuid::Uuid;

/// Verdict of the author check on a mutation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    NotOwner,
}

impl AccessDecision {
    pub fn is_granted(self) -> bool {
        self == AccessDecision::Granted
    }
}

/// Compare the acting identity against the entity's author.
pub fn author_gate(author_id: Uuid, actor_id: Uuid) -> AccessDecision {
    if author_id == actor_id {
        AccessDecision::Granted
    } else {
        AccessDecision::NotOwner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_is_granted() {
        let id = Uuid::new_v4();
        assert_eq!(author_gate(id, id), AccessDecision::Granted);
        assert!(author_gate(id, id).is_granted());
    }

    #[test]
    fn anyone_else_is_not() {
        let decision = author_gate(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(decision, AccessDecision::NotOwner);
        assert!(!decision.is_granted());
    }
}
