//! Latest-Request Tracking
//!
//! Panels and the search bar fire requests whose answers may arrive after
//! the user has moved on. Each request takes a [`Ticket`]; an answer is
//! applied only while its ticket is still the newest one issued.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default, Clone)]
pub struct LatestOnly {
    issued: u64,
    live: Option<u64>,
}

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding any earlier one
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.live = Some(self.issued);
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.live == Some(ticket.0)
    }

    /// A request is outstanding and nothing has superseded it
    pub fn in_flight(&self) -> bool {
        self.live.is_some()
    }

    /// Mark `ticket` answered. Returns whether its answer should be applied.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.live = None;
        true
    }

    /// Drop every outstanding request; late answers are ignored
    pub fn invalidate(&mut self) {
        self.live = None;
    }
}
