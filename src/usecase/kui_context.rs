use std::collections::VecDeque;

use crate::domain::model::{MappingSet, MatchState};
use crate::domain::primitive::KeyCode;
use crate::interface_adapter::port::KeySource;
use crate::shared::error::KuiError;

/// Upper bound on the keys one match attempt may read ahead.
pub const LOOKAHEAD_MAX: usize = 1024;

/// Result of one match attempt: a key for the caller, a performed macro
/// expansion (the replacement sits in the pushback buffer, no key yet), or
/// an idle timeout with nothing read.
enum FindOutcome {
    Key(KeyCode),
    Expanded,
    Idle,
}

/// One input stage.
///
/// A context pulls raw keys from its source (the terminal descriptor, or
/// the previous stage), matches them against its mapping sets, and hands
/// single logical keys upward. Keys read beyond a match (the unavoidable
/// read-too-far of overlapping triggers) go to the pushback buffer and are
/// re-read before the source is touched again, so no input is ever lost.
pub struct KuiContext<S: KeySource> {
    source: S,
    timeout_ms: u32,
    map_sets: Vec<MappingSet>,
    pushback: VecDeque<KeyCode>,
}

impl<S: KeySource> KuiContext<S> {
    pub fn new(source: S, timeout_ms: u32) -> Self {
        Self {
            source,
            timeout_ms,
            map_sets: Vec::new(),
            pushback: VecDeque::new(),
        }
    }

    /// Append a mapping set. Later sets override earlier ones when several
    /// match the same input.
    pub fn add_map_set(&mut self, set: MappingSet) {
        self.map_sets.push(set);
    }

    pub fn map_sets(&self) -> &[MappingSet] {
        &self.map_sets
    }

    pub fn map_sets_mut(&mut self) -> &mut [MappingSet] {
        &mut self.map_sets
    }

    /// Whether a key can be delivered without touching the source. True
    /// exactly when the pushback buffer is non-empty; no speculative read.
    pub fn can_get_key(&self) -> bool {
        !self.pushback.is_empty()
    }

    /// Bounded readiness probe on the underlying source.
    pub fn data_ready(&mut self, timeout_ms: u32) -> Result<bool, KuiError> {
        self.source.data_ready(timeout_ms)
    }

    /// Deliver the next logical key, applying macro expansion until a plain
    /// key emerges. `Ok(None)` means the source went idle.
    pub fn get_key(&mut self) -> Result<Option<KeyCode>, KuiError> {
        loop {
            match self.find_key()? {
                FindOutcome::Expanded => continue,
                FindOutcome::Key(key) => return Ok(Some(key)),
                FindOutcome::Idle => return Ok(None),
            }
        }
    }

    /// Pushback first, then the source with the configured timeout.
    fn next_raw(&mut self) -> Result<Option<KeyCode>, KuiError> {
        if let Some(key) = self.pushback.pop_front() {
            return Ok(Some(key));
        }
        self.source.next_key(self.timeout_ms)
    }

    /// One match attempt over all mapping sets.
    ///
    /// Reads keys until every set has resolved (or the source goes idle),
    /// then settles: on a match, the keys beyond the winning trigger are
    /// pushed back and the replacement is queued in front of them; on no
    /// match, the first key read is the result and everything after it is
    /// pushed back.
    fn find_key(&mut self) -> Result<FindOutcome, KuiError> {
        for set in &mut self.map_sets {
            set.reset();
        }

        let mut lookahead: Vec<KeyCode> = Vec::new();
        loop {
            let Some(key) = self.next_raw()? else {
                break;
            };
            if lookahead.len() >= LOOKAHEAD_MAX {
                return Err(KuiError::LookaheadOverflow(LOOKAHEAD_MAX));
            }
            let position = lookahead.len();
            lookahead.push(key);

            for set in &mut self.map_sets {
                if set.state() == MatchState::StillLooking {
                    set.feed(key, position)?;
                }
            }
            if !self
                .map_sets
                .iter()
                .any(|set| set.state() == MatchState::StillLooking)
            {
                break;
            }
        }

        if lookahead.is_empty() {
            return Ok(FindOutcome::Idle);
        }

        for set in &mut self.map_sets {
            set.finalize();
        }

        // Ties between sets go to the one registered last.
        let winner = self.map_sets.iter().rev().find_map(|set| set.matched());
        match winner {
            Some(mapping) => {
                log::debug!(
                    "expanding {} -> {}",
                    mapping.trigger_text(),
                    mapping.replacement_text()
                );
                let consumed = mapping.trigger().len();
                for &key in lookahead[consumed..].iter().rev() {
                    self.pushback.push_front(key);
                }
                for &key in mapping.replacement().keys().iter().rev() {
                    self.pushback.push_front(key);
                }
                Ok(FindOutcome::Expanded)
            }
            None => {
                for &key in lookahead[1..].iter().rev() {
                    self.pushback.push_front(key);
                }
                Ok(FindOutcome::Key(lookahead[0]))
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Mapping;
    use crate::domain::primitive::KeySequence;

    // =========================================================================
    // Fakes
    // =========================================================================

    /// A scripted key source: yields its events in order, then stays idle.
    /// A `None` event injects an idle timeout mid-stream.
    struct ScriptSource {
        events: VecDeque<Option<KeyCode>>,
    }

    impl ScriptSource {
        fn from_events(events: Vec<Option<KeyCode>>) -> Self {
            Self {
                events: events.into(),
            }
        }

        fn from_bytes(bytes: &[u8]) -> Self {
            Self::from_events(
                bytes
                    .iter()
                    .map(|&b| Some(KeyCode::from_byte(b)))
                    .collect(),
            )
        }
    }

    impl KeySource for ScriptSource {
        fn next_key(&mut self, _timeout_ms: u32) -> Result<Option<KeyCode>, KuiError> {
            Ok(self.events.pop_front().flatten())
        }

        fn data_ready(&mut self, _timeout_ms: u32) -> Result<bool, KuiError> {
            Ok(self.events.front().is_some_and(|event| event.is_some()))
        }
    }

    /// A source that always fails, for error propagation tests.
    struct BrokenSource;

    impl KeySource for BrokenSource {
        fn next_key(&mut self, _timeout_ms: u32) -> Result<Option<KeyCode>, KuiError> {
            Err(KuiError::Io(std::io::Error::other("wire cut")))
        }

        fn data_ready(&mut self, _timeout_ms: u32) -> Result<bool, KuiError> {
            Err(KuiError::Io(std::io::Error::other("wire cut")))
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn seq(bytes: &[u8]) -> KeySequence {
        KeySequence::new(bytes.iter().map(|&b| KeyCode::from_byte(b)).collect()).unwrap()
    }

    fn set_of(pairs: &[(&[u8], &[u8])]) -> MappingSet {
        let mut set = MappingSet::new();
        for &(trigger, replacement) in pairs {
            set.register(Mapping::new(seq(trigger), seq(replacement)));
        }
        set
    }

    fn context_with(input: &[u8], sets: Vec<MappingSet>) -> KuiContext<ScriptSource> {
        let mut ctx = KuiContext::new(ScriptSource::from_bytes(input), 0);
        for set in sets {
            ctx.add_map_set(set);
        }
        ctx
    }

    /// Drain the context until idle, collecting delivered keys.
    fn drain(ctx: &mut KuiContext<ScriptSource>) -> Vec<KeyCode> {
        let mut keys = Vec::new();
        while let Some(key) = ctx.get_key().unwrap() {
            keys.push(key);
        }
        keys
    }

    fn bytes(data: &[u8]) -> Vec<KeyCode> {
        data.iter().map(|&b| KeyCode::from_byte(b)).collect()
    }

    // =========================================================================
    // Tests: pass-through and byte preservation
    // =========================================================================

    #[test]
    fn keys_pass_through_without_map_sets() {
        let mut ctx = context_with(b"ab", Vec::new());
        assert_eq!(drain(&mut ctx), bytes(b"ab"));
    }

    #[test]
    fn unmatched_input_is_delivered_in_order_without_loss() {
        let mut ctx = context_with(b"hello", vec![set_of(&[(b"zz", b"!")])]);
        assert_eq!(drain(&mut ctx), bytes(b"hello"));
    }

    #[test]
    fn idle_source_yields_none() {
        let mut ctx = context_with(b"", vec![set_of(&[(b"ab", b"x")])]);
        assert_eq!(ctx.get_key().unwrap(), None);
    }

    // =========================================================================
    // Tests: matching and longest match
    // =========================================================================

    #[test]
    fn overlapping_triggers_shorter_fires_on_divergence() {
        // ab -> X, abc -> Y; "abd" produces X then d.
        let sets = vec![set_of(&[(b"ab", b"X"), (b"abc", b"Y")])];
        let mut ctx = context_with(b"abd", sets);
        assert_eq!(drain(&mut ctx), bytes(b"Xd"));
    }

    #[test]
    fn overlapping_triggers_longer_fires_when_completed() {
        let sets = vec![set_of(&[(b"ab", b"X"), (b"abc", b"Y")])];
        let mut ctx = context_with(b"abcd", sets);
        assert_eq!(drain(&mut ctx), bytes(b"Yd"));
    }

    #[test]
    fn completed_trigger_fires() {
        let mut ctx = context_with(b"abc", vec![set_of(&[(b"abc", b"Y")])]);
        assert_eq!(drain(&mut ctx), bytes(b"Y"));
    }

    #[test]
    fn idle_cutoff_delivers_first_key_and_buffers_the_rest() {
        // abc -> Y, but the source goes idle after "ab": the partial prefix
        // is broken up, 'a' is delivered and 'b' waits in the pushback.
        let mut ctx = context_with(b"ab", vec![set_of(&[(b"abc", b"Y")])]);
        assert_eq!(ctx.get_key().unwrap(), Some(KeyCode::from_byte(b'a')));
        assert!(ctx.can_get_key());
        assert_eq!(ctx.get_key().unwrap(), Some(KeyCode::from_byte(b'b')));
        assert_eq!(ctx.get_key().unwrap(), None);
    }

    #[test]
    fn idle_cutoff_fires_the_shorter_completed_trigger() {
        // ab -> X fully matched when the idle hits mid-way through abc.
        let sets = vec![set_of(&[(b"ab", b"X"), (b"abc", b"Y")])];
        let mut ctx = context_with(b"ab", sets);
        assert_eq!(drain(&mut ctx), bytes(b"X"));
    }

    #[test]
    fn mid_stream_idle_splits_the_match() {
        // An idle between 'a' and 'b' cuts the attempt short both times.
        let events = vec![
            Some(KeyCode::from_byte(b'a')),
            None,
            Some(KeyCode::from_byte(b'b')),
        ];
        let mut ctx = KuiContext::new(ScriptSource::from_events(events), 0);
        ctx.add_map_set(set_of(&[(b"ab", b"X")]));
        assert_eq!(ctx.get_key().unwrap(), Some(KeyCode::from_byte(b'a')));
        assert_eq!(ctx.get_key().unwrap(), Some(KeyCode::from_byte(b'b')));
    }

    // =========================================================================
    // Tests: replacement and recursion
    // =========================================================================

    #[test]
    fn replacement_keys_arrive_in_order() {
        let mut ctx = context_with(b"ab", vec![set_of(&[(b"ab", b"xyz")])]);
        assert_eq!(drain(&mut ctx), bytes(b"xyz"));
    }

    #[test]
    fn unconsumed_lookahead_follows_the_replacement() {
        // ab -> xy with trailing input: replacement first, then the rest.
        let mut ctx = context_with(b"abcd", vec![set_of(&[(b"ab", b"xy")])]);
        assert_eq!(drain(&mut ctx), bytes(b"xycd"));
    }

    #[test]
    fn single_key_chains_expand_recursively() {
        // j -> k, k -> Z: the pushed-back replacement re-enters matching.
        let sets = vec![set_of(&[(b"j", b"k"), (b"k", b"Z")])];
        let mut ctx = context_with(b"j", sets);
        assert_eq!(drain(&mut ctx), bytes(b"Z"));
    }

    #[test]
    fn replacement_equal_to_another_trigger_expands_once_per_key() {
        // j -> k against input jj: each j expands independently; the second
        // j is still unread when the first k is delivered.
        let sets = vec![set_of(&[(b"j", b"k"), (b"kk", b"Z")])];
        let mut ctx = context_with(b"jj", sets);
        assert_eq!(drain(&mut ctx), bytes(b"kk"));
    }

    // =========================================================================
    // Tests: multiple sets and precedence
    // =========================================================================

    #[test]
    fn later_set_wins_ties() {
        let early = set_of(&[(b"ab", b"1")]);
        let late = set_of(&[(b"ab", b"2")]);
        let mut ctx = context_with(b"ab", vec![early, late]);
        assert_eq!(drain(&mut ctx), bytes(b"2"));
    }

    #[test]
    fn earlier_set_fires_when_later_does_not_match() {
        let early = set_of(&[(b"ab", b"1")]);
        let late = set_of(&[(b"zz", b"2")]);
        let mut ctx = context_with(b"ab", vec![early, late]);
        assert_eq!(drain(&mut ctx), bytes(b"1"));
    }

    #[test]
    fn one_set_matching_longer_keeps_the_attempt_alive() {
        // The early set finishes at "ab" while the late one still wants
        // "abcd"; the late set's longer trigger wins once completed.
        let early = set_of(&[(b"ab", b"1")]);
        let late = set_of(&[(b"abcd", b"2")]);
        let mut ctx = context_with(b"abcd", vec![early, late]);
        assert_eq!(drain(&mut ctx), bytes(b"2"));
    }

    #[test]
    fn map_set_added_between_reads_takes_effect() {
        let mut ctx = context_with(b"abab", vec![set_of(&[(b"ab", b"1")])]);
        assert_eq!(ctx.get_key().unwrap(), Some(KeyCode::from_byte(b'1')));
        ctx.add_map_set(set_of(&[(b"ab", b"2")]));
        assert_eq!(ctx.get_key().unwrap(), Some(KeyCode::from_byte(b'2')));
    }

    // =========================================================================
    // Tests: limits and errors
    // =========================================================================

    #[test]
    fn lookahead_overflow_is_a_hard_error() {
        // One trigger longer than the lookahead keeps the matcher looking
        // past the limit.
        let long_trigger: Vec<KeyCode> = std::iter::repeat(KeyCode::from_byte(b'a'))
            .take(LOOKAHEAD_MAX + 2)
            .collect();
        let mut set = MappingSet::new();
        set.register(Mapping::new(
            KeySequence::new(long_trigger).unwrap(),
            seq(b"x"),
        ));

        let input = vec![b'a'; LOOKAHEAD_MAX + 1];
        let mut ctx = KuiContext::new(ScriptSource::from_bytes(&input), 0);
        ctx.add_map_set(set);

        let err = ctx.get_key().unwrap_err();
        assert!(matches!(err, KuiError::LookaheadOverflow(LOOKAHEAD_MAX)));
    }

    #[test]
    fn source_errors_propagate() {
        let mut ctx = KuiContext::new(BrokenSource, 0);
        assert!(matches!(ctx.get_key(), Err(KuiError::Io(_))));
    }

    // =========================================================================
    // Tests: buffer probes
    // =========================================================================

    #[test]
    fn can_get_key_is_false_on_a_fresh_context() {
        let ctx = context_with(b"abc", Vec::new());
        assert!(!ctx.can_get_key());
    }

    #[test]
    fn can_get_key_never_reads_speculatively() {
        let mut ctx = context_with(b"ab", Vec::new());
        assert!(!ctx.can_get_key());
        // Reading one key leaves nothing buffered: no match was attempted
        // beyond the single key.
        assert_eq!(ctx.get_key().unwrap(), Some(KeyCode::from_byte(b'a')));
        assert!(!ctx.can_get_key());
    }

    #[test]
    fn pushback_from_a_failed_match_is_buffered() {
        let mut ctx = context_with(b"ax", vec![set_of(&[(b"ab", b"1")])]);
        assert_eq!(ctx.get_key().unwrap(), Some(KeyCode::from_byte(b'a')));
        assert!(ctx.can_get_key());
        assert_eq!(ctx.get_key().unwrap(), Some(KeyCode::from_byte(b'x')));
        assert!(!ctx.can_get_key());
    }
}
