//! Memory game session state machine.
//!
//! A [`GameSession`] owns everything a single round needs (board, counters,
//! pending-pair buffer); the UI constructs a fresh one per start, so there is
//! no process-wide game state. Timing lives in the caller: when [`flip`]
//! reports [`FlipOutcome::PairPending`] the UI arms a fixed delay and calls
//! [`resolve_pending`] once it elapses. Dropping the session (restart/reset)
//! cancels any pending resolution by construction.
//!
//! [`flip`]: GameSession::flip
//! [`resolve_pending`]: GameSession::resolve_pending

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Fixed symbol alphabet; a board uses the first `pair_count` entries.
pub const SYMBOL_ALPHABET: [char; 12] = [
    '★', '♥', '♦', '♣', '♠', '☀', '☾', '♪', '⚑', '✿', '☂', '⚓',
];

/// Delay between the second flip and the pair comparison, long enough for
/// the player to see both symbols.
pub const RESOLVE_DELAY: Duration = Duration::from_millis(700);

/// Board size selector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    pub fn board_size(self) -> usize {
        match self {
            Difficulty::Easy => 12,
            Difficulty::Hard => 24,
        }
    }

    pub fn columns(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Hard => 6,
        }
    }

    pub fn pair_count(self) -> usize {
        self.board_size() / 2
    }

    pub fn cycle(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    Flipped,
    Matched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub symbol: char,
    pub state: CardState,
}

/// Result of a flip attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Guard tripped (already face-up/matched, two pending, bad index, won).
    Ignored,
    /// First card of a pair revealed.
    Revealed,
    /// Second card revealed; the move counted and a resolve is now due.
    PairPending,
}

/// Result of resolving the pending pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Matched,
    Mismatched,
}

/// One round of the memory game.
#[derive(Debug, Clone)]
pub struct GameSession {
    difficulty: Difficulty,
    cards: Vec<Card>,
    /// Pending-pair buffer: indices of the at-most-two face-up, unresolved cards.
    flipped: Vec<usize>,
    moves: u32,
    matches: u32,
}

impl GameSession {
    /// Deal a fresh board: `pair_count` unique symbols duplicated into pairs
    /// and uniformly shuffled.
    pub fn new(difficulty: Difficulty, rng: &mut impl Rng) -> Self {
        let mut symbols: Vec<char> = SYMBOL_ALPHABET
            .iter()
            .take(difficulty.pair_count())
            .flat_map(|&s| [s, s])
            .collect();
        symbols.shuffle(rng);

        Self {
            difficulty,
            cards: symbols
                .into_iter()
                .map(|symbol| Card {
                    symbol,
                    state: CardState::Hidden,
                })
                .collect(),
            flipped: Vec::with_capacity(2),
            moves: 0,
            matches: 0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn pending_pair(&self) -> &[usize] {
        &self.flipped
    }

    pub fn is_won(&self) -> bool {
        self.matches as usize == self.difficulty.pair_count()
    }

    /// Reveal the card at `index` and append it to the pending-pair buffer.
    ///
    /// Defensive no-op while two cards await comparison, on cards that are
    /// already face-up or matched, on out-of-range indices and after the win.
    /// The move counter increments the instant the second card flips, before
    /// the comparison runs.
    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.is_won() || self.flipped.len() == 2 {
            return FlipOutcome::Ignored;
        }
        let card = match self.cards.get_mut(index) {
            Some(card) if card.state == CardState::Hidden => card,
            _ => return FlipOutcome::Ignored,
        };

        card.state = CardState::Flipped;
        self.flipped.push(index);
        if self.flipped.len() == 2 {
            self.moves += 1;
            FlipOutcome::PairPending
        } else {
            FlipOutcome::Revealed
        }
    }

    /// Compare the two buffered cards: equal symbols are matched permanently,
    /// unequal ones flip back to hidden. Clears the buffer either way.
    /// Returns `None` unless exactly two cards were pending.
    pub fn resolve_pending(&mut self) -> Option<ResolveOutcome> {
        let (&a, &b) = match self.flipped.as_slice() {
            [a, b] => (a, b),
            _ => return None,
        };
        self.flipped.clear();

        let outcome = if self.cards[a].symbol == self.cards[b].symbol {
            self.cards[a].state = CardState::Matched;
            self.cards[b].state = CardState::Matched;
            self.matches += 1;
            ResolveOutcome::Matched
        } else {
            self.cards[a].state = CardState::Hidden;
            self.cards[b].state = CardState::Hidden;
            ResolveOutcome::Mismatched
        };
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn session(difficulty: Difficulty) -> GameSession {
        let mut rng = StdRng::seed_from_u64(7);
        GameSession::new(difficulty, &mut rng)
    }

    /// Indices of one matching pair and one guaranteed mismatch partner.
    fn pair_of(session: &GameSession) -> (usize, usize) {
        let mut seen: HashMap<char, usize> = HashMap::new();
        for (i, card) in session.cards().iter().enumerate() {
            if let Some(&j) = seen.get(&card.symbol) {
                return (j, i);
            }
            seen.insert(card.symbol, i);
        }
        unreachable!("every symbol appears twice");
    }

    #[test]
    fn easy_deal_is_twelve_cards_in_six_pairs() {
        let s = session(Difficulty::Easy);
        assert_eq!(s.cards().len(), 12);
        assert_eq!(Difficulty::Easy.columns(), 4);

        let mut counts: HashMap<char, usize> = HashMap::new();
        for card in s.cards() {
            *counts.entry(card.symbol).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn hard_deal_is_twenty_four_cards_in_twelve_pairs() {
        let s = session(Difficulty::Hard);
        assert_eq!(s.cards().len(), 24);
        assert_eq!(Difficulty::Hard.columns(), 6);

        let unique: std::collections::HashSet<char> =
            s.cards().iter().map(|c| c.symbol).collect();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn flip_guards_reject_repeats_out_of_range_and_third_cards() {
        let mut s = session(Difficulty::Easy);
        assert_eq!(s.flip(99), FlipOutcome::Ignored);

        assert_eq!(s.flip(0), FlipOutcome::Revealed);
        assert_eq!(s.flip(0), FlipOutcome::Ignored);
        assert_eq!(s.moves(), 0);

        assert_eq!(s.flip(1), FlipOutcome::PairPending);
        assert_eq!(s.moves(), 1);
        // two cards pending: a third flip must not go through
        assert_eq!(s.flip(2), FlipOutcome::Ignored);
        assert_eq!(s.pending_pair().len(), 2);
    }

    #[test]
    fn matching_pair_stays_matched_and_unclickable() {
        let mut s = session(Difficulty::Easy);
        let (a, b) = pair_of(&s);

        s.flip(a);
        s.flip(b);
        assert_eq!(s.resolve_pending(), Some(ResolveOutcome::Matched));
        assert_eq!(s.matches(), 1);
        assert_eq!(s.cards()[a].state, CardState::Matched);
        assert_eq!(s.cards()[b].state, CardState::Matched);
        assert!(s.pending_pair().is_empty());

        assert_eq!(s.flip(a), FlipOutcome::Ignored);
    }

    #[test]
    fn mismatched_pair_flips_back_to_hidden() {
        let mut s = session(Difficulty::Easy);
        let (a, b) = pair_of(&s);
        // partner of a mismatches everything except b
        let other = (0..s.cards().len())
            .find(|&i| i != a && i != b && s.cards()[i].symbol != s.cards()[a].symbol)
            .unwrap();

        s.flip(a);
        s.flip(other);
        assert_eq!(s.resolve_pending(), Some(ResolveOutcome::Mismatched));
        assert_eq!(s.matches(), 0);
        assert_eq!(s.cards()[a].state, CardState::Hidden);
        assert_eq!(s.cards()[other].state, CardState::Hidden);
        assert!(s.pending_pair().is_empty());
    }

    #[test]
    fn resolve_without_a_full_pair_is_a_no_op() {
        let mut s = session(Difficulty::Easy);
        assert_eq!(s.resolve_pending(), None);
        s.flip(0);
        assert_eq!(s.resolve_pending(), None);
        assert_eq!(s.cards()[0].state, CardState::Flipped);
    }

    #[test]
    fn win_is_declared_exactly_when_all_pairs_resolve() {
        let mut s = session(Difficulty::Easy);
        // resolve pair by pair: group indices by symbol
        let mut by_symbol: HashMap<char, Vec<usize>> = HashMap::new();
        for (i, card) in s.cards().iter().enumerate() {
            by_symbol.entry(card.symbol).or_default().push(i);
        }
        let groups: Vec<Vec<usize>> = by_symbol.into_values().collect();
        for (n, pair) in groups.iter().enumerate() {
            assert!(!s.is_won());
            s.flip(pair[0]);
            s.flip(pair[1]);
            assert_eq!(s.resolve_pending(), Some(ResolveOutcome::Matched));
            assert_eq!(s.matches() as usize, n + 1);
        }
        assert!(s.is_won());
        assert_eq!(s.matches(), 6);
        assert_eq!(s.moves(), 6);
        // a won round ignores further input
        assert_eq!(s.flip(0), FlipOutcome::Ignored);
    }
}
