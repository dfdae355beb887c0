use tokio::task::JoinHandle;

/// Debounce bookkeeping for one title input slot
///
/// `seq` is the cooperative cancellation token: bumping it invalidates both
/// the unfired debounce timer and any response still in flight. The timer
/// task is additionally aborted while it sleeps, which bounds live tasks to
/// one per slot; once a request has been dispatched it runs to completion
/// and is discarded on arrival if its token is stale.
#[derive(Debug, Default)]
pub(crate) struct SlotState {
    seq: u64,
    pub last_query: String,
    pub debounce: Option<JoinHandle<()>>,
    pub blur_hide: Option<JoinHandle<()>>,
}

impl SlotState {
    /// Cancel-then-schedule: invalidates whatever is pending and hands back
    /// the token for the next debounce cycle.
    pub fn supersede(&mut self) -> u64 {
        self.seq += 1;
        if let Some(task) = self.debounce.take() {
            task.abort();
        }
        self.seq
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.seq == token
    }

    /// Tears down every pending timer for this slot; used only by reset.
    pub fn clear_timers(&mut self) {
        self.seq += 1;
        if let Some(task) = self.debounce.take() {
            task.abort();
        }
        if let Some(task) = self.blur_hide.take() {
            task.abort();
        }
        self.last_query.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supersede_invalidates_previous_token() {
        let mut slot = SlotState::default();
        let first = slot.supersede();
        assert!(slot.is_current(first));

        let second = slot.supersede();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
    }

    #[test]
    fn test_clear_timers_invalidates_in_flight_responses() {
        let mut slot = SlotState::default();
        let token = slot.supersede();
        slot.last_query = "avengers".to_string();

        slot.clear_timers();
        assert!(!slot.is_current(token));
        assert!(slot.last_query.is_empty());
    }
}
