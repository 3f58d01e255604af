//! The funnel state machine.
//!
//! A session walks one user from loading, through two batches of match
//! predictions, into two yes/no gates that decide the terminal offer. All
//! state lives in [`FunnelSession`]; there are no ambient globals. Mutation
//! happens only through load completion, pick events, gate answers, `tick`
//! and `reset`, each resolved fully against the current state before the
//! next event is accepted.

use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

use crate::constants::funnel::{BATCH_ADVANCE_DELAY, BATCH_ONE_SIZE, GATE_ADVANCE_DELAY, MATCH_COUNT};
use crate::funnel::offers::OfferKind;
use crate::match_feed::models::Match;

/// A match outcome prediction. Absence of a pick stands for "none";
/// a pick only ever moves from absent to set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Home,
    Draw,
    Away,
}

impl Prediction {
    /// Coupon symbol for display: 1 / X / 2
    pub fn symbol(self) -> &'static str {
        match self {
            Prediction::Home => "1",
            Prediction::Draw => "X",
            Prediction::Away => "2",
        }
    }
}

/// Answer to a qualification gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAnswer {
    Yes,
    No,
}

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunnelState {
    Loading,
    CollectingBatchOne,
    CollectingBatchTwo,
    GateOne,
    GateTwo,
    Final(OfferKind),
}

/// Result of a pick event. Rejections are benign: the UI disables
/// non-active controls, so a rejected pick is expected input, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum PickOutcome {
    Accepted,
    Rejected,
}

/// Result of a gate answer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum AnswerOutcome {
    Applied,
    Ignored,
}

/// A scheduled state advance. While one is pending no second transition can
/// be scheduled, which keeps re-entrant pick events from double-advancing.
#[derive(Debug)]
struct PendingTransition {
    target: FunnelState,
    due_at: Instant,
}

/// One user's funnel session: match list, picks, state and any pending
/// transition. The match list is written once at load completion and
/// read-only afterwards.
#[derive(Debug)]
pub struct FunnelSession {
    state: FunnelState,
    matches: Vec<Match>,
    picks: HashMap<String, Prediction>,
    pending: Option<PendingTransition>,
}

impl FunnelSession {
    /// Creates a fresh session in the loading state.
    pub fn new() -> Self {
        Self {
            state: FunnelState::Loading,
            matches: Vec::new(),
            picks: HashMap::new(),
            pending: None,
        }
    }

    pub fn state(&self) -> FunnelState {
        self.state
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// The pick recorded for a match, if any.
    pub fn pick_for(&self, match_id: &str) -> Option<Prediction> {
        self.picks.get(match_id).copied()
    }

    /// Number of matches picked so far across both batches.
    pub fn picked_count(&self) -> usize {
        self.picks.len()
    }

    /// The offer bound at the terminal state, if reached.
    pub fn bound_offer(&self) -> Option<OfferKind> {
        match self.state {
            FunnelState::Final(kind) => Some(kind),
            _ => None,
        }
    }

    /// True while a transition delay is running.
    pub fn transition_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Completes the load phase with the given match list and enters the
    /// first collecting batch with a clean picks map. A failed load is
    /// expressed as an empty list: the session enters the picking flow in a
    /// degraded mode where no batch can ever complete. Ignored outside the
    /// loading state.
    pub fn complete_load(&mut self, mut matches: Vec<Match>) {
        if self.state != FunnelState::Loading {
            debug!("complete_load ignored outside loading state");
            return;
        }
        matches.truncate(MATCH_COUNT);
        info!("Session loaded with {} matches", matches.len());
        self.matches = matches;
        self.picks.clear();
        self.state = FunnelState::CollectingBatchOne;
    }

    /// The matches presented in the currently visible batch. Empty outside
    /// the collecting states.
    pub fn visible_batch(&self) -> &[Match] {
        match self.state {
            FunnelState::CollectingBatchOne => {
                &self.matches[..self.matches.len().min(BATCH_ONE_SIZE)]
            }
            FunnelState::CollectingBatchTwo => {
                &self.matches[BATCH_ONE_SIZE.min(self.matches.len())..]
            }
            _ => &[],
        }
    }

    /// The single match eligible to receive a pick: the first match of the
    /// visible batch without one. `None` outside the collecting states or
    /// while a transition is pending.
    pub fn active_match_id(&self) -> Option<&str> {
        if self.pending.is_some() {
            return None;
        }
        self.visible_batch()
            .iter()
            .find(|m| !self.picks.contains_key(&m.id))
            .map(|m| m.id.as_str())
    }

    /// Records a prediction for the active match.
    ///
    /// Enforces strictly sequential entry: picks for any match other than
    /// the active one, overwrites of an existing pick, and picks arriving
    /// while a transition is pending are all silently rejected with no state
    /// change. Completing the visible batch schedules the next transition
    /// against `now`.
    pub fn submit_pick(
        &mut self,
        match_id: &str,
        prediction: Prediction,
        now: Instant,
    ) -> PickOutcome {
        match self.active_match_id() {
            Some(active) if active == match_id => {}
            _ => {
                debug!("Rejected pick for {match_id}: not the active match");
                return PickOutcome::Rejected;
            }
        }

        self.picks.insert(match_id.to_string(), prediction);
        debug!(
            "Pick {} recorded for match {match_id} ({}/{} in batch)",
            prediction.symbol(),
            self.batch_picked_count(),
            self.visible_batch().len()
        );

        if self.batch_complete() {
            match self.state {
                FunnelState::CollectingBatchOne => {
                    self.schedule(FunnelState::CollectingBatchTwo, now + BATCH_ADVANCE_DELAY);
                }
                FunnelState::CollectingBatchTwo => {
                    self.schedule(FunnelState::GateOne, now + GATE_ADVANCE_DELAY);
                }
                _ => {}
            }
        }

        PickOutcome::Accepted
    }

    /// Answers the current gate. Gate one: "no" binds the Superbet offer,
    /// "yes" proceeds to gate two. Gate two: "no" binds Fortuna, "yes" binds
    /// the generic offer. Answers outside a gate state (including repeats
    /// after an offer is bound) are ignored.
    pub fn answer_gate(&mut self, answer: GateAnswer) -> AnswerOutcome {
        let next = match (self.state, answer) {
            (FunnelState::GateOne, GateAnswer::No) => FunnelState::Final(OfferKind::Superbet),
            (FunnelState::GateOne, GateAnswer::Yes) => FunnelState::GateTwo,
            (FunnelState::GateTwo, GateAnswer::No) => FunnelState::Final(OfferKind::Fortuna),
            (FunnelState::GateTwo, GateAnswer::Yes) => FunnelState::Final(OfferKind::Generic),
            _ => {
                debug!("Gate answer ignored in state {:?}", self.state);
                return AnswerOutcome::Ignored;
            }
        };

        if let FunnelState::Final(kind) = next {
            info!("Session terminated on offer {kind:?}");
        }
        self.state = next;
        AnswerOutcome::Applied
    }

    /// Applies a due pending transition. Returns the state entered, or
    /// `None` when nothing was due. Delays are lower bounds; a transition is
    /// never observed before its delay has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<FunnelState> {
        let due = matches!(&self.pending, Some(p) if now >= p.due_at);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        debug!("Advancing to {:?}", pending.target);
        self.state = pending.target;
        Some(pending.target)
    }

    /// Tears the session down to a fresh loading state. Any pending
    /// transition is dropped so a stale timer cannot fire into the new
    /// session.
    pub fn reset(&mut self) {
        info!("Session reset");
        self.state = FunnelState::Loading;
        self.matches.clear();
        self.picks.clear();
        self.pending = None;
    }

    fn batch_picked_count(&self) -> usize {
        self.visible_batch()
            .iter()
            .filter(|m| self.picks.contains_key(&m.id))
            .count()
    }

    fn batch_complete(&self) -> bool {
        let batch = self.visible_batch();
        !batch.is_empty() && batch.iter().all(|m| self.picks.contains_key(&m.id))
    }

    fn schedule(&mut self, target: FunnelState, due_at: Instant) {
        if self.pending.is_some() {
            debug!("Transition already pending, not scheduling {target:?}");
            return;
        }
        self.pending = Some(PendingTransition { target, due_at });
    }
}

impl Default for FunnelSession {
    fn default() -> Self {
        Self::new()
    }
}
