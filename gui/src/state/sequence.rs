// Request sequencing so the view reflects the latest user action rather than
// whichever response happened to arrive last.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePolicy {
    /// Apply any response newer than the last applied one.
    LatestApplied,
    /// Apply only the response to the most recently issued request;
    /// earlier requests are superseded.
    LatestIssued,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestTracker {
    policy: SequencePolicy,
    last_issued: u64,
    last_applied: u64,
}

impl RequestTracker {
    pub fn new(policy: SequencePolicy) -> Self {
        Self { policy, last_issued: 0, last_applied: 0 }
    }

    pub fn issue(&mut self) -> Ticket {
        self.last_issued += 1;
        Ticket(self.last_issued)
    }

    pub fn accepts(&self, ticket: Ticket) -> bool {
        match self.policy {
            SequencePolicy::LatestApplied => ticket.0 > self.last_applied,
            SequencePolicy::LatestIssued => {
                ticket.0 == self.last_issued && ticket.0 > self.last_applied
            }
        }
    }

    /// Marks `ticket` applied if it is still acceptable.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.last_applied = ticket.0;
        true
    }

    pub fn in_flight(&self) -> bool {
        self.last_issued > self.last_applied
    }

    pub fn last_issued(&self) -> Ticket {
        Ticket(self.last_issued)
    }

    /// Invalidates every request issued so far, as if a newer one had
    /// already been applied.
    pub fn supersede(&mut self) {
        let ticket = self.issue();
        self.last_applied = ticket.0;
    }
}
