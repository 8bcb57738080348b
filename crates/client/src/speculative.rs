//! Speculative state transitions with exact rollback.
//!
//! The cart and wishlist stores apply local mutations before the network
//! confirms them. The discipline is always the same: capture the current
//! state, apply the local guess, then either commit the server's
//! authoritative value or restore the captured state verbatim. Restoring
//! the capture (rather than recomputing an inverse) means a failed update
//! can never compound with other in-flight edits.

/// A captured pre-mutation state, consumed by [`Speculative::restore`].
#[derive(Debug)]
pub struct Checkpoint<T>(T);

/// State container supporting the capture / apply / commit-or-restore
/// cycle.
#[derive(Debug)]
pub struct Speculative<T: Clone> {
    state: T,
}

impl<T: Clone> Speculative<T> {
    /// Wrap an initial state.
    pub const fn new(state: T) -> Self {
        Self { state }
    }

    /// The current state.
    pub const fn get(&self) -> &T {
        &self.state
    }

    /// Capture the current state for a later rollback.
    pub fn checkpoint(&self) -> Checkpoint<T> {
        Checkpoint(self.state.clone())
    }

    /// Apply a local mutation ahead of network confirmation.
    pub fn apply(&mut self, mutate: impl FnOnce(&mut T)) {
        mutate(&mut self.state);
    }

    /// Replace the state with the server's authoritative value.
    pub fn commit(&mut self, authoritative: T) {
        self.state = authoritative;
    }

    /// Restore a captured state exactly.
    pub fn restore(&mut self, checkpoint: Checkpoint<T>) {
        self.state = checkpoint.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_replaces_state() {
        let mut state = Speculative::new(vec![1, 2]);
        state.apply(|items| items.push(3));
        assert_eq!(state.get(), &vec![1, 2, 3]);

        state.commit(vec![9]);
        assert_eq!(state.get(), &vec![9]);
    }

    #[test]
    fn test_restore_returns_captured_value_exactly() {
        let mut state = Speculative::new(vec![1, 2]);
        let checkpoint = state.checkpoint();

        state.apply(|items| items.push(3));
        state.apply(|items| items.clear());

        state.restore(checkpoint);
        assert_eq!(state.get(), &vec![1, 2]);
    }

    #[test]
    fn test_checkpoint_is_unaffected_by_later_mutations() {
        let mut state = Speculative::new(String::from("before"));
        let checkpoint = state.checkpoint();
        state.commit(String::from("after"));
        state.restore(checkpoint);
        assert_eq!(state.get(), "before");
    }
}
