use alloc::vec::Vec;
use core::mem;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Notification for the presentation layer, drained with [`GameSession::take_events`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    CardChanged { id: CardId, face: CardFace },
    CountersChanged { matches: u32, turns: u32 },
    /// All cards were replaced; redraw the whole grid.
    GridReplaced { grid: GridSpec },
    /// The last pair was removed.
    Completed { turns: u32 },
}

/// Owns the cards and counters of one game and is the single entry point for presentation code.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    config: GameConfig,
    cards: Vec<Card>,
    resolver: SelectionResolver,
    match_count: u32,
    turns_count: u32,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Session with no cards yet; call [`GameSession::restart`] or [`GameSession::restore`] to fill it.
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            cards: Vec::new(),
            resolver: SelectionResolver::new(),
            match_count: 0,
            turns_count: 0,
            events: Vec::new(),
        }
    }

    pub fn with_new_game(config: GameConfig, seed: u64) -> Result<Self> {
        let mut session = Self::new(config);
        session.restart(seed)?;
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> GridSpec {
        self.config.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.config.palette
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(usize::from(id))
    }

    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    pub fn turns_count(&self) -> u32 {
        self.turns_count
    }

    pub fn phase(&self) -> Phase {
        self.resolver.phase()
    }

    pub fn is_input_locked(&self) -> bool {
        self.resolver.is_locked()
    }

    pub fn first_pick(&self) -> Option<CardId> {
        self.resolver.first_pick()
    }

    pub fn pairs_remaining(&self) -> usize {
        self.cards.iter().filter(|card| !card.is_matched()).count() / 2
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(Card::is_matched)
    }

    /// Replaces the grid with a freshly shuffled one. On error the current game is left untouched.
    pub fn new_game(&mut self, grid: GridSpec, palette: Palette, seed: u64) -> Result<()> {
        let grid = grid.validate()?;
        if palette.is_empty() {
            return Err(GameError::EmptyPalette);
        }

        let tokens = ShuffledPairGenerator::new(seed).generate(grid.pair_count(), &palette);
        let cards: Vec<Card> = (0..grid.total_cells())
            .zip(tokens)
            .map(|(id, token)| Card::new(id, token))
            .collect();
        log::info!(
            "New {}x{} game with {} pairs (seed {})",
            grid.rows,
            grid.columns,
            grid.pair_count(),
            seed
        );

        self.config.grid = grid;
        self.config.palette = palette;
        self.replace(cards, 0, 0, None);
        Ok(())
    }

    /// Starts over on the configured grid and palette.
    pub fn restart(&mut self, seed: u64) -> Result<()> {
        let grid = self.config.grid;
        let palette = self.config.palette.clone();
        self.new_game(grid, palette, seed)
    }

    pub fn select_card(&mut self, id: CardId) -> SelectOutcome {
        let outcome = self
            .resolver
            .select(&mut self.cards, id, &self.config.delays);

        match outcome {
            SelectOutcome::NoChange => {
                log::trace!("Selection of {} ignored ({:?})", id, self.phase());
            }
            SelectOutcome::FirstPicked(first) => self.push_card_changed(first),
            SelectOutcome::Resolving { second, verdict, .. } => {
                self.push_card_changed(second);
                self.turns_count = self.turns_count.saturating_add(1);
                if verdict == Verdict::Match {
                    self.match_count = self.match_count.saturating_add(1);
                }
                self.push_counters_changed();
            }
        }
        outcome
    }

    /// Resolution waiting for its grace delay, for hosts that run their own timer.
    pub fn pending_resolution(&self) -> Option<PendingResolution> {
        self.resolver.pending()
    }

    /// Advances the built-in resolution timer.
    pub fn tick(&mut self, elapsed: Duration) -> ResolveOutcome {
        match self.resolver.advance(elapsed) {
            Some(ticket) => self.complete_resolution(ticket),
            None => ResolveOutcome::NoChange,
        }
    }

    /// Applies the resolution identified by `ticket`. Tickets from a cancelled or finished cycle do nothing.
    pub fn complete_resolution(&mut self, ticket: ResolutionTicket) -> ResolveOutcome {
        let outcome = self.resolver.complete(&mut self.cards, ticket);
        match outcome {
            ResolveOutcome::NoChange => {}
            ResolveOutcome::Removed { first, second }
            | ResolveOutcome::Hidden { first, second } => {
                self.push_card_changed(first);
                self.push_card_changed(second);
            }
        }
        if matches!(outcome, ResolveOutcome::Removed { .. }) && self.is_complete() {
            log::info!("All pairs found in {} turns", self.turns_count);
            self.events.push(SessionEvent::Completed {
                turns: self.turns_count,
            });
        }
        outcome
    }

    /// Captures the session. A pending resolution is recorded as already settled.
    pub fn save(&self) -> SaveSnapshot {
        let mut cards: Vec<CardRecord> = self.cards.iter().map(CardRecord::from).collect();

        if let Some(pending) = self.resolver.pending() {
            for id in [pending.first, pending.second] {
                if let Some(record) = cards.get_mut(usize::from(id)) {
                    match pending.verdict {
                        Verdict::Match => record.is_matched = true,
                        Verdict::Mismatch => record.is_flipped = false,
                    }
                }
            }
        }

        SaveSnapshot {
            grid_rows: self.config.grid.rows,
            grid_columns: self.config.grid.columns,
            match_count: self.match_count,
            turns_count: self.turns_count,
            cards,
        }
    }

    /// Replaces cards and counters with the snapshot's. A rejected snapshot leaves the session untouched.
    pub fn restore(&mut self, snapshot: &SaveSnapshot) -> Result<Phase> {
        let mut cards = snapshot
            .to_cards(self.config.grid, &self.config.palette)
            .inspect_err(|err| log::warn!("Snapshot rejected: {}", err))?;

        let mut first_pick = None;
        for card in cards.iter_mut().filter(|card| card.is_pending()) {
            if first_pick.is_none() {
                first_pick = Some(card.id());
            } else {
                log::warn!("Extra face-up card {} in snapshot turned back down", card.id());
                card.flip_down();
            }
        }

        self.replace(cards, snapshot.match_count, snapshot.turns_count, first_pick);
        log::info!(
            "Restored game at {} matches, {} turns ({:?})",
            self.match_count,
            self.turns_count,
            self.phase()
        );
        Ok(self.phase())
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        mem::take(&mut self.events)
    }

    fn replace(&mut self, cards: Vec<Card>, matches: u32, turns: u32, first_pick: Option<CardId>) {
        self.cards = cards;
        self.match_count = matches;
        self.turns_count = turns;
        self.resolver.resume(first_pick);
        self.events.clear();
        self.events.push(SessionEvent::GridReplaced {
            grid: self.config.grid,
        });
        self.push_counters_changed();
    }

    fn push_card_changed(&mut self, id: CardId) {
        if let Some(card) = self.card(id) {
            let face = card.face();
            self.events.push(SessionEvent::CardChanged { id, face });
        }
    }

    fn push_counters_changed(&mut self) {
        self.events.push(SessionEvent::CountersChanged {
            matches: self.match_count,
            turns: self.turns_count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn two_by_two() -> GameSession {
        GameSession::with_new_game(
            GameConfig::new(GridSpec::new(2, 2), Palette::new(["A", "B"])),
            11,
        )
        .unwrap()
    }

    fn ids_of(session: &GameSession, token: TokenId) -> Vec<CardId> {
        session
            .cards()
            .iter()
            .filter(|card| card.token() == token)
            .map(Card::id)
            .collect()
    }

    #[test]
    fn new_game_builds_sequential_cards() {
        let session = two_by_two();

        assert_eq!(session.cards().len(), 4);
        for (index, card) in session.cards().iter().enumerate() {
            assert_eq!(usize::from(card.id()), index);
            assert_eq!(card.face(), CardFace::Hidden);
        }
        assert_eq!(ids_of(&session, TokenId(0)).len(), 2);
        assert_eq!(ids_of(&session, TokenId(1)).len(), 2);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn odd_grid_keeps_previous_game() {
        let mut session = two_by_two();
        let before = session.cards().to_vec();

        let err = session
            .new_game(GridSpec::new(3, 3), Palette::new(["A"]), 5)
            .unwrap_err();

        assert_eq!(
            err,
            GameError::InvalidGridShape {
                rows: 3,
                columns: 3
            }
        );
        assert_eq!(session.cards(), &before[..]);
        assert_eq!(session.grid(), GridSpec::new(2, 2));
    }

    #[test]
    fn empty_palette_is_rejected() {
        let mut session = GameSession::new(GameConfig::default());
        let result = session.new_game(GridSpec::new(2, 2), Palette::new(Vec::<&str>::new()), 0);

        assert_eq!(result, Err(GameError::EmptyPalette));
        assert!(session.cards().is_empty());
    }

    #[test]
    fn match_counts_turn_and_match() {
        let mut session = two_by_two();
        let pair = ids_of(&session, TokenId(0));

        session.select_card(pair[0]);
        session.select_card(pair[1]);
        assert_eq!(session.turns_count(), 1);
        assert_eq!(session.match_count(), 1);
        assert!(session.is_input_locked());

        let outcome = session.tick(Duration::from_millis(500));
        assert_eq!(
            outcome,
            ResolveOutcome::Removed {
                first: pair[0],
                second: pair[1]
            }
        );
        assert!(session.card(pair[0]).unwrap().is_matched());
        assert_eq!(session.pairs_remaining(), 1);
    }

    #[test]
    fn mismatch_hides_cards_again() {
        let mut session = two_by_two();
        let a = ids_of(&session, TokenId(0))[0];
        let b = ids_of(&session, TokenId(1))[0];

        session.select_card(a);
        session.select_card(b);
        assert_eq!(session.turns_count(), 1);
        assert_eq!(session.match_count(), 0);

        session.tick(Duration::from_millis(999));
        assert!(session.is_input_locked());
        session.tick(Duration::from_millis(1));

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.card(a).unwrap().face(), CardFace::Hidden);
        assert_eq!(session.card(b).unwrap().face(), CardFace::Hidden);
        assert_eq!(session.select_card(a), SelectOutcome::FirstPicked(a));
    }

    #[test]
    fn locked_and_out_of_range_selections_are_ignored() {
        let mut session = two_by_two();
        let a = ids_of(&session, TokenId(0))[0];
        let b = ids_of(&session, TokenId(1))[0];
        let c = ids_of(&session, TokenId(1))[1];

        assert_eq!(session.select_card(40), SelectOutcome::NoChange);
        session.select_card(a);
        session.select_card(b);
        session.take_events();

        assert_eq!(session.select_card(c), SelectOutcome::NoChange);
        assert!(!session.card(c).unwrap().is_flipped());
        assert_eq!(session.turns_count(), 1);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn finishing_last_pair_emits_completed() {
        let mut session = two_by_two();
        for token in [TokenId(0), TokenId(1)] {
            let pair = ids_of(&session, token);
            session.select_card(pair[0]);
            session.select_card(pair[1]);
            session.tick(Duration::from_secs(1));
        }

        assert!(session.is_complete());
        let events = session.take_events();
        assert_eq!(events.last(), Some(&SessionEvent::Completed { turns: 2 }));
    }

    #[test]
    fn selection_events_describe_faces_and_counters() {
        let mut session = two_by_two();
        session.take_events();
        let pair = ids_of(&session, TokenId(1));

        session.select_card(pair[0]);
        session.select_card(pair[1]);

        assert_eq!(
            session.take_events(),
            vec![
                SessionEvent::CardChanged {
                    id: pair[0],
                    face: CardFace::Revealed(TokenId(1))
                },
                SessionEvent::CardChanged {
                    id: pair[1],
                    face: CardFace::Revealed(TokenId(1))
                },
                SessionEvent::CountersChanged {
                    matches: 1,
                    turns: 1
                },
            ]
        );
    }

    #[test]
    fn restart_cancels_pending_resolution() {
        let mut session = two_by_two();
        let a = ids_of(&session, TokenId(0))[0];
        let b = ids_of(&session, TokenId(1))[0];
        session.select_card(a);
        session.select_card(b);
        let ticket = session.pending_resolution().unwrap().ticket;

        session.restart(12).unwrap();

        assert_eq!(session.complete_resolution(ticket), ResolveOutcome::NoChange);
        assert_eq!(session.turns_count(), 0);
        assert!(session.cards().iter().all(|card| card.face() == CardFace::Hidden));
    }

    #[test]
    fn save_settles_pending_match() {
        let mut session = two_by_two();
        let pair = ids_of(&session, TokenId(0));
        session.select_card(pair[0]);
        session.select_card(pair[1]);

        let snapshot = session.save();

        assert_eq!(snapshot.match_count, 1);
        for id in pair {
            assert!(snapshot.cards[usize::from(id)].is_matched);
        }
    }

    #[test]
    fn save_settles_pending_mismatch() {
        let mut session = two_by_two();
        let a = ids_of(&session, TokenId(0))[0];
        let b = ids_of(&session, TokenId(1))[0];
        session.select_card(a);
        session.select_card(b);

        let snapshot = session.save();

        assert!(snapshot.cards.iter().all(|record| !record.is_flipped));
        assert_eq!(snapshot.turns_count, 1);
    }

    #[test]
    fn restore_resumes_single_pick() {
        let mut session = two_by_two();
        let pair = ids_of(&session, TokenId(0));
        session.select_card(pair[0]);
        let snapshot = session.save();

        let mut resumed = two_by_two();
        resumed.restart(99).unwrap();
        let phase = resumed.restore(&snapshot).unwrap();

        assert_eq!(phase, Phase::OnePicked);
        assert_eq!(resumed.first_pick(), Some(pair[0]));
        resumed.select_card(pair[1]);
        assert_eq!(resumed.match_count(), 1);
        assert_eq!(resumed.turns_count(), 1);
    }

    #[test]
    fn restore_turns_down_extra_face_up_cards() {
        let mut session = two_by_two();
        let mut snapshot = session.save();
        for record in snapshot.cards.iter_mut().take(3) {
            record.is_flipped = true;
        }

        assert_eq!(session.restore(&snapshot), Ok(Phase::OnePicked));
        assert_eq!(session.first_pick(), Some(0));
        let face_up = session.cards().iter().filter(|card| card.is_pending()).count();
        assert_eq!(face_up, 1);
    }

    #[test]
    fn rejected_restore_changes_nothing() {
        let mut session = two_by_two();
        let pair = ids_of(&session, TokenId(0));
        session.select_card(pair[0]);
        let before = session.clone();

        let mut snapshot = session.save();
        snapshot.cards.pop();

        assert_eq!(
            session.restore(&snapshot),
            Err(GameError::SnapshotShapeMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn impossible_counters_are_not_restored() {
        let mut session = two_by_two();
        let before = session.clone();

        let mut snapshot = session.save();
        snapshot.match_count = u32::MAX;
        snapshot.turns_count = u32::MAX;

        assert_eq!(
            session.restore(&snapshot),
            Err(GameError::ImpossibleCounters {
                matches: u32::MAX,
                turns: u32::MAX
            })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn turn_counter_stops_at_its_maximum() {
        let mut session = two_by_two();
        let mut snapshot = session.save();
        snapshot.turns_count = u32::MAX;
        session.restore(&snapshot).unwrap();
        let pair = ids_of(&session, TokenId(0));

        session.select_card(pair[0]);
        session.select_card(pair[1]);

        assert_eq!(session.turns_count(), u32::MAX);
        assert_eq!(session.match_count(), 1);
    }

    #[test]
    fn custom_delays_drive_the_timer() {
        let delays = RevealDelays {
            matched: Duration::from_millis(10),
            mismatched: Duration::from_millis(20),
        };
        let config =
            GameConfig::new(GridSpec::new(2, 2), Palette::new(["A", "B"])).with_delays(delays);
        let mut session = GameSession::with_new_game(config, 11).unwrap();
        let a = ids_of(&session, TokenId(0))[0];
        let b = ids_of(&session, TokenId(1))[0];
        session.select_card(a);
        session.select_card(b);

        assert_eq!(session.tick(Duration::from_millis(10)), ResolveOutcome::NoChange);
        assert_eq!(
            session.tick(Duration::from_millis(10)),
            ResolveOutcome::Hidden {
                first: a,
                second: b
            }
        );
    }
}
