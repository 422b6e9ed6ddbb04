//! Shot lifecycle flags.
//!
//! Two deliberately independent flags: `pending_reset` says the next entry
//! into the shooting zone should start a fresh cycle; `editable` says the
//! most recent committed score is still live-patchable. They are set
//! together on commit and cleared together on shooting-zone re-entry, but a
//! user may visit several non-shooting zones while still inside the edit
//! window, which is why they are not one conflated flag.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotCycle {
    pending_reset: bool,
    editable: bool,
}

impl ShotCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A nonzero accumulated score was just committed.
    pub fn committed(&mut self) {
        self.pending_reset = true;
        self.editable = true;
    }

    /// Whether live score changes should patch the last committed score.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn needs_reset(&self) -> bool {
        self.pending_reset
    }

    /// The shooting zone was tapped. Returns true when a fresh cycle should
    /// start (accumulator back to zero); clears both flags together.
    pub fn shooting_zone_entered(&mut self) -> bool {
        let reset = self.pending_reset;
        self.pending_reset = false;
        self.editable = false;
        reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let cycle = ShotCycle::new();
        assert!(!cycle.is_editable());
        assert!(!cycle.needs_reset());
    }

    #[test]
    fn test_commit_opens_edit_window() {
        let mut cycle = ShotCycle::new();
        cycle.committed();
        assert!(cycle.is_editable());
        assert!(cycle.needs_reset());
    }

    #[test]
    fn test_edit_window_survives_non_shooting_zones() {
        // nothing but a shooting-zone tap closes the window
        let mut cycle = ShotCycle::new();
        cycle.committed();
        assert!(cycle.is_editable());
        assert!(cycle.is_editable(), "window stays open across reads");
    }

    #[test]
    fn test_shooting_zone_entry_clears_both() {
        let mut cycle = ShotCycle::new();
        cycle.committed();
        assert!(cycle.shooting_zone_entered(), "first re-entry requests a reset");
        assert!(!cycle.is_editable());
        assert!(!cycle.needs_reset());
        assert!(!cycle.shooting_zone_entered(), "idempotent once cleared");
    }
}
