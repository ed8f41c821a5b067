//! Hover tracking and the one-shot preview timer bookkeeping.
//!
//! The actual timer lives on the UI side; this state only hands out tickets
//! and decides whether a fired ticket still counts.

/// Identifies one armed hover timer.
pub type HoverTicket = u64;

#[derive(Debug, Default)]
pub struct HoverState {
    hovered: Option<usize>,
    /// Timer armed for this sector and not yet fired.
    pending: Option<(HoverTicket, usize)>,
    /// Timer fired; preview decode in flight for this sector.
    loading: Option<(HoverTicket, usize)>,
    next_ticket: HoverTicket,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records the sector under the pointer.
    ///
    /// Returns false if nothing changed. A change drops any armed timer and
    /// any preview still being decoded.
    pub fn set_hovered(&mut self, sector: Option<usize>) -> bool {
        if sector == self.hovered {
            return false;
        }
        self.cancel();
        self.hovered = sector;
        true
    }

    /// Arms a new timer for the hovered sector.
    pub fn arm(&mut self, sector: usize) -> HoverTicket {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.pending = Some((ticket, sector));
        self.loading = None;
        ticket
    }

    /// Drops the armed timer and any in-flight preview. Returns true if a
    /// timer was armed.
    pub fn cancel(&mut self) -> bool {
        self.loading = None;
        self.pending.take().is_some()
    }

    /// Consumes a fired timer. Returns the sector if the ticket is the armed
    /// one and the pointer is still on that sector.
    pub fn fire(&mut self, ticket: HoverTicket) -> Option<usize> {
        match self.pending {
            Some((armed, sector)) if armed == ticket => {
                self.pending = None;
                if self.hovered == Some(sector) {
                    self.loading = Some((ticket, sector));
                    Some(sector)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Consumes a finished preview decode. Returns the sector if it is still
    /// wanted.
    pub fn preview_ready(&mut self, ticket: HoverTicket) -> Option<usize> {
        match self.loading {
            Some((expected, sector)) if expected == ticket => {
                self.loading = None;
                (self.hovered == Some(sector)).then_some(sector)
            }
            _ => None,
        }
    }

    /// Forgets everything, including the hovered sector.
    pub fn reset(&mut self) {
        self.cancel();
        self.hovered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_after_steady_hover_yields_sector() {
        let mut hover = HoverState::new();
        assert!(hover.set_hovered(Some(2)));
        let ticket = hover.arm(2);
        assert_eq!(hover.fire(ticket), Some(2));
        assert_eq!(hover.preview_ready(ticket), Some(2));
    }

    #[test]
    fn sector_change_cancels_armed_timer() {
        let mut hover = HoverState::new();
        hover.set_hovered(Some(1));
        let ticket = hover.arm(1);
        assert!(hover.set_hovered(Some(3)));
        assert!(!hover.is_pending());
        assert_eq!(hover.fire(ticket), None);
    }

    #[test]
    fn leaving_and_returning_still_invalidates_old_ticket() {
        let mut hover = HoverState::new();
        hover.set_hovered(Some(1));
        let old = hover.arm(1);
        hover.set_hovered(None);
        hover.set_hovered(Some(1));
        let new = hover.arm(1);
        assert_ne!(old, new);
        assert_eq!(hover.fire(old), None);
        assert_eq!(hover.fire(new), Some(1));
    }

    #[test]
    fn same_sector_is_not_a_change() {
        let mut hover = HoverState::new();
        hover.set_hovered(Some(0));
        let ticket = hover.arm(0);
        assert!(!hover.set_hovered(Some(0)));
        assert!(hover.is_pending());
        assert_eq!(hover.fire(ticket), Some(0));
    }

    #[test]
    fn ticket_fires_once() {
        let mut hover = HoverState::new();
        hover.set_hovered(Some(4));
        let ticket = hover.arm(4);
        assert_eq!(hover.fire(ticket), Some(4));
        assert_eq!(hover.fire(ticket), None);
    }

    #[test]
    fn moving_away_while_preview_decodes_drops_it() {
        let mut hover = HoverState::new();
        hover.set_hovered(Some(2));
        let ticket = hover.arm(2);
        assert_eq!(hover.fire(ticket), Some(2));
        hover.set_hovered(Some(3));
        assert_eq!(hover.preview_ready(ticket), None);
    }
}
