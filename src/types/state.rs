use serde::{Deserialize, Serialize};

/// Occupancy of the shared slice at one instant of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct State {
    /// URLLC units in service
    pub x1: u32,
    /// eMBB units in service
    pub x2: u32,
    /// eMBB units accepted but waiting for a slot
    pub x3: u64,
}

impl State {
    /// The empty system every trajectory starts from.
    pub const EMPTY: State = State { x1: 0, x2: 0, x3: 0 };

    pub fn new(x1: u32, x2: u32, x3: u64) -> Self {
        Self { x1, x2, x3 }
    }

    /// Units in service, both classes together.
    pub fn occupied(&self) -> u32 {
        self.x1 + self.x2
    }

    /// True when every capacity unit is busy.
    pub fn is_full(&self, capacity: u32) -> bool {
        self.occupied() == capacity
    }
}

/// The event that moved the chain from one state to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A URLLC unit leaves service: x1 -= 1
    UrllcDeparture,
    /// An eMBB unit completes and frees its slot: x2 -= 1
    EmbbDeparture,
    /// An eMBB unit completes and a waiting unit takes its slot: x3 -= 1
    EmbbPromotion,
    /// A URLLC unit is admitted: x1 += 1
    UrllcArrival,
    /// An eMBB unit is admitted directly into service: x2 += 1
    EmbbArrival,
    /// An eMBB unit arrives above the guard limit and waits: x3 += 1
    EmbbQueued,
}

impl EventKind {
    /// Applies this event's effect to `state`.
    pub fn apply(self, state: State) -> State {
        let State { x1, x2, x3 } = state;
        match self {
            EventKind::UrllcDeparture => State::new(x1 - 1, x2, x3),
            EventKind::EmbbDeparture => State::new(x1, x2 - 1, x3),
            EventKind::EmbbPromotion => State::new(x1, x2, x3 - 1),
            EventKind::UrllcArrival => State::new(x1 + 1, x2, x3),
            EventKind::EmbbArrival => State::new(x1, x2 + 1, x3),
            EventKind::EmbbQueued => State::new(x1, x2, x3 + 1),
        }
    }
}
