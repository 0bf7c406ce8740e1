//! One jump of the chain: holding time and next state.
//!
//! The enabled events are listed in a fixed order (URLLC departure, eMBB
//! completion, URLLC arrival, eMBB arrival) and the next event is chosen by
//! inverse-CDF over that order. Given the same pair of uniforms the result
//! is bit-for-bit reproducible.

use rand::distributions::Open01;
use rand::Rng;

use crate::types::{EventKind, ModelParams, State};

/// At most four events compete in any state.
pub const MAX_EVENTS: usize = 4;

/// One competing exponential clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub kind: EventKind,
    pub rate: f64,
    pub next: State,
}

/// Enabled events of a state, in selection order.
#[derive(Debug, Clone, Copy)]
pub struct EnabledEvents {
    events: [Candidate; MAX_EVENTS],
    len: usize,
}

const UNUSED: Candidate = Candidate { kind: EventKind::EmbbQueued, rate: 0.0, next: State::EMPTY };

impl EnabledEvents {
    fn new() -> Self {
        Self { events: [UNUSED; MAX_EVENTS], len: 0 }
    }

    fn push(&mut self, kind: EventKind, rate: f64, from: State) {
        self.events[self.len] = Candidate { kind, rate, next: kind.apply(from) };
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.events[..self.len].iter()
    }

    /// Last event in selection order; always one of the eMBB arrival branches.
    pub fn last(&self) -> Candidate {
        self.events[self.len.saturating_sub(1)]
    }

    pub fn total_rate(&self) -> f64 {
        self.iter().map(|c| c.rate).sum()
    }
}

/// Result of one sampled transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jump {
    pub holding_time: f64,
    pub event: EventKind,
    pub next: State,
}

/// Samples transitions of the URLLC/eMBB chain for a fixed parameter set.
#[derive(Debug, Clone, Copy)]
pub struct TransitionSampler {
    params: ModelParams,
}

impl TransitionSampler {
    pub fn new(params: ModelParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Lists the events enabled in `state`.
    ///
    /// Exactly one of the two eMBB arrival branches is always present, so
    /// the list is never empty.
    pub fn enabled_events(&self, state: State) -> EnabledEvents {
        let p = &self.params;
        let mut events = EnabledEvents::new();
        let occupied = state.occupied();

        if state.x1 > 0 {
            events.push(EventKind::UrllcDeparture, 2.0 * p.mu() * state.x1 as f64, state);
        }
        if state.x2 > 0 {
            // The freed slot goes to a waiting unit only below the eMBB limit.
            let kind = if occupied <= p.embb_limit() && state.x3 > 0 {
                EventKind::EmbbPromotion
            } else {
                EventKind::EmbbDeparture
            };
            events.push(kind, p.mu() * state.x2 as f64, state);
        }
        if occupied < p.capacity() {
            events.push(EventKind::UrllcArrival, p.lambda_u(), state);
        }
        if occupied < p.embb_limit() {
            events.push(EventKind::EmbbArrival, p.lambda_e(), state);
        } else {
            events.push(EventKind::EmbbQueued, p.lambda_e(), state);
        }
        events
    }

    /// Deterministic jump from two uniforms in (0, 1).
    ///
    /// `u1` drives the exponential holding time, `u2` selects the first event
    /// whose cumulative normalized rate reaches it.
    pub fn jump_from_uniforms(&self, state: State, u1: f64, u2: f64) -> Jump {
        let events = self.enabled_events(state);
        debug_assert!(!events.is_empty(), "no enabled event in {:?}", state);
        let total_rate = events.total_rate();
        let holding_time = -u1.ln() / total_rate;

        // Rounding can leave the final cumulative mass just under u2, in
        // which case the last event with positive rate wins.
        let mut chosen = events.last();
        let mut cumulative = 0.0;
        for candidate in events.iter() {
            if candidate.rate > 0.0 {
                chosen = *candidate;
            }
            cumulative += candidate.rate / total_rate;
            if u2 <= cumulative {
                chosen = *candidate;
                break;
            }
        }

        Jump { holding_time, event: chosen.kind, next: chosen.next }
    }

    /// Draws the two uniforms from `rng` and samples a jump.
    pub fn sample<R: Rng + ?Sized>(&self, state: State, rng: &mut R) -> Jump {
        let u1: f64 = rng.sample(Open01);
        let u2: f64 = rng.sample(Open01);
        self.jump_from_uniforms(state, u1, u2)
    }
}
