/// Request classes that are sequenced independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Generate,
    Compute,
    Analyze,
}

impl Operation {
    fn slot(self) -> usize {
        match self {
            Operation::Generate => 0,
            Operation::Compute => 1,
            Operation::Analyze => 2,
        }
    }
}

/// Proof of issue for one in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub op: Operation,
    pub serial: u64,
    /// Point-set epoch the request was built from
    pub epoch: u64,
}

/// Monotonic per-operation request counter
///
/// A response is applied only while its ticket is the newest one issued
/// for its operation. Compute and analyze tickets additionally go stale
/// once a new point set replaces the one they were computed against.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: [u64; 3],
}

impl RequestSequence {
    pub fn issue(&mut self, op: Operation, epoch: u64) -> Ticket {
        let slot = &mut self.latest[op.slot()];
        *slot += 1;
        Ticket {
            op,
            serial: *slot,
            epoch,
        }
    }

    pub fn is_current(&self, ticket: &Ticket, epoch: u64) -> bool {
        if self.latest[ticket.op.slot()] != ticket.serial {
            return false;
        }
        match ticket.op {
            Operation::Generate => true,
            Operation::Compute | Operation::Analyze => ticket.epoch == epoch,
        }
    }
}
