use crate::stores::SessionStore;

/// Route guard lifecycle. Each guard instance checks on its own mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authenticated,
    Redirecting,
}

impl GuardState {
    /// Presence of a token is all that is checked
    pub fn evaluate(session: &dyn SessionStore) -> Self {
        if session.is_authenticated() {
            GuardState::Authenticated
        } else {
            GuardState::Redirecting
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MemorySessionStore;

    #[test]
    fn no_token_redirects() {
        assert_eq!(GuardState::evaluate(&MemorySessionStore::new()), GuardState::Redirecting);
        assert_eq!(GuardState::evaluate(&MemorySessionStore::with_token("")), GuardState::Redirecting);
    }

    #[test]
    fn any_token_is_accepted() {
        for token in ["x", "not-a-jwt", "eyJhbGciOiJIUzI1NiJ9.e30.sig"] {
            assert_eq!(GuardState::evaluate(&MemorySessionStore::with_token(token)), GuardState::Authenticated);
        }
    }
}
