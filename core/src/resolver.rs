use core::time::Duration;

use crate::*;

/// Identifies one resolution cycle. Tickets are never reused by a resolver, so a completion that arrives after
/// the cycle was cancelled or already finished can be recognised and dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResolutionTicket(u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PendingResolution {
    pub first: CardId,
    pub second: CardId,
    pub verdict: Verdict,
    pub ticket: ResolutionTicket,
    /// Time left before the built-in timer completes this resolution.
    pub remaining: Duration,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolverState {
    Idle,
    OnePicked { first: CardId },
    Resolving(PendingResolution),
}

impl ResolverState {
    pub const fn phase(self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::OnePicked { .. } => Phase::OnePicked,
            Self::Resolving(_) => Phase::Resolving,
        }
    }
}

impl Default for ResolverState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Turn state machine: takes one pick at a time and decides match or mismatch once two cards are face up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionResolver {
    state: ResolverState,
    next_ticket: u32,
}

impl SelectionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_locked(&self) -> bool {
        self.phase().is_locked()
    }

    pub fn first_pick(&self) -> Option<CardId> {
        match self.state {
            ResolverState::Idle => None,
            ResolverState::OnePicked { first } => Some(first),
            ResolverState::Resolving(pending) => Some(pending.first),
        }
    }

    pub fn pending(&self) -> Option<PendingResolution> {
        match self.state {
            ResolverState::Resolving(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn select(
        &mut self,
        cards: &mut [Card],
        id: CardId,
        delays: &RevealDelays,
    ) -> SelectOutcome {
        use ResolverState::*;

        let index = usize::from(id);
        let Some(card) = cards.get(index) else {
            return SelectOutcome::NoChange;
        };
        if card.is_matched() {
            return SelectOutcome::NoChange;
        }

        match self.state {
            Resolving(_) => SelectOutcome::NoChange,
            OnePicked { first } if first == id => SelectOutcome::NoChange,
            OnePicked { first } => {
                let Some(first_card) = cards.get(usize::from(first)).copied() else {
                    log::warn!("First pick {} is not on the grid, starting over", first);
                    return self.pick_first(cards, id);
                };
                cards[index].flip_up();
                let verdict = if first_card.is_match(&cards[index]) {
                    Verdict::Match
                } else {
                    Verdict::Mismatch
                };
                let ticket = self.issue_ticket();
                self.state = Resolving(PendingResolution {
                    first,
                    second: id,
                    verdict,
                    ticket,
                    remaining: delays.for_verdict(verdict),
                });
                log::debug!("Picked {} and {}: {:?} ({:?})", first, id, verdict, ticket);
                SelectOutcome::Resolving {
                    first,
                    second: id,
                    verdict,
                }
            }
            Idle => self.pick_first(cards, id),
        }
    }

    /// Runs the built-in timer, returning the ticket once the pending resolution is due.
    pub fn advance(&mut self, elapsed: Duration) -> Option<ResolutionTicket> {
        let ResolverState::Resolving(pending) = &mut self.state else {
            return None;
        };
        pending.remaining = pending.remaining.saturating_sub(elapsed);
        pending.remaining.is_zero().then_some(pending.ticket)
    }

    pub fn complete(&mut self, cards: &mut [Card], ticket: ResolutionTicket) -> ResolveOutcome {
        let ResolverState::Resolving(pending) = self.state else {
            log::debug!("No resolution pending, ignoring {:?}", ticket);
            return ResolveOutcome::NoChange;
        };
        if pending.ticket != ticket {
            log::debug!(
                "Ignoring stale {:?}, pending is {:?}",
                ticket,
                pending.ticket
            );
            return ResolveOutcome::NoChange;
        }

        self.state = ResolverState::Idle;
        let PendingResolution { first, second, .. } = pending;
        match pending.verdict {
            Verdict::Match => {
                for id in [first, second] {
                    if let Some(card) = cards.get_mut(usize::from(id)) {
                        card.mark_matched();
                    }
                }
                ResolveOutcome::Removed { first, second }
            }
            Verdict::Mismatch => {
                for id in [first, second] {
                    if let Some(card) = cards.get_mut(usize::from(id)) {
                        card.flip_down();
                    }
                }
                ResolveOutcome::Hidden { first, second }
            }
        }
    }

    /// Drops any held pick and cancels the pending resolution; its ticket goes stale.
    pub fn reset(&mut self) {
        if let ResolverState::Resolving(pending) = self.state {
            log::debug!("Cancelled pending {:?}", pending.ticket);
        }
        self.state = ResolverState::Idle;
    }

    pub(crate) fn resume(&mut self, first: Option<CardId>) {
        self.reset();
        if let Some(first) = first {
            self.state = ResolverState::OnePicked { first };
        }
    }

    fn pick_first(&mut self, cards: &mut [Card], id: CardId) -> SelectOutcome {
        if let Some(card) = cards.get_mut(usize::from(id)) {
            card.flip_up();
            self.state = ResolverState::OnePicked { first: id };
            SelectOutcome::FirstPicked(id)
        } else {
            self.state = ResolverState::Idle;
            SelectOutcome::NoChange
        }
    }

    fn issue_ticket(&mut self) -> ResolutionTicket {
        let ticket = ResolutionTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        ticket
    }
}
