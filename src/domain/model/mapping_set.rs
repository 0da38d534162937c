use crate::domain::model::Mapping;
use crate::domain::primitive::KeyCode;
use crate::shared::error::KuiError;

/// State of one incremental match run over a mapping set.
///
/// - `StillLooking`: at least one trigger extends the keys fed so far.
/// - `Found`: a trigger has been fully matched and no longer one can follow.
/// - `NotFound`: no trigger starts with the keys fed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    StillLooking,
    Found,
    NotFound,
}

/// An ordered collection of mappings with an embedded incremental matcher.
///
/// The container keeps its entries sorted by trigger (lexicographic on key
/// codes, so a prefix sorts directly before its extensions). The matcher
/// walks that order one key at a time: triggers compatible with the typed
/// prefix form a contiguous run, `cursor` tracks its lower bound, and
/// `best_found` remembers the longest fully matched trigger seen so far.
/// Those two pieces are what make maximal munch with bounded lookahead work.
///
/// The matcher state is transient: the driving context resets it before
/// every match attempt, and container mutation resets it as well.
#[derive(Debug, Default)]
pub struct MappingSet {
    entries: Vec<Mapping>,
    cursor: usize,
    state: MatchState,
    best_found: Option<usize>,
}

impl Default for MatchState {
    fn default() -> Self {
        MatchState::StillLooking
    }
}

impl MappingSet {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Container operations
    // =========================================================================

    /// Insert a mapping, keeping the entries sorted by trigger. A mapping
    /// with an equal trigger is replaced; the last registration wins.
    pub fn register(&mut self, mapping: Mapping) {
        log::debug!(
            "register mapping {} -> {}",
            mapping.trigger_text(),
            mapping.replacement_text()
        );
        match self.search(mapping.trigger().keys()) {
            Ok(index) => self.entries[index] = mapping,
            Err(index) => self.entries.insert(index, mapping),
        }
        self.reset();
    }

    /// Remove the mapping whose trigger equals `trigger`. Absence is the
    /// distinct `MappingNotFound` error.
    pub fn deregister(&mut self, trigger: &[KeyCode]) -> Result<(), KuiError> {
        match self.search(trigger) {
            Ok(index) => {
                self.entries.remove(index);
                self.reset();
                Ok(())
            }
            Err(_) => Err(KuiError::MappingNotFound(notation(trigger))),
        }
    }

    /// All mappings in trigger order.
    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a mapping by exact trigger.
    pub fn find(&self, trigger: &[KeyCode]) -> Option<&Mapping> {
        self.search(trigger).ok().map(|index| &self.entries[index])
    }

    fn search(&self, trigger: &[KeyCode]) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| entry.trigger().keys().cmp(trigger))
    }

    // =========================================================================
    // Matcher operations
    // =========================================================================

    /// Forget the current match run, as if no key had been fed yet.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.state = MatchState::StillLooking;
        self.best_found = None;
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Feed the key typed at `position` (0-based within the current run).
    ///
    /// Precondition: the state is `StillLooking` and the keys fed so far
    /// form a prefix of the cursor entry's trigger. On return the state
    /// reflects whether a trigger is fully matched (`Found`), some trigger
    /// still extends the input (`StillLooking`), or none does (`NotFound`).
    pub fn feed(&mut self, key: KeyCode, position: usize) -> Result<(), KuiError> {
        if self.state != MatchState::StillLooking {
            return Err(KuiError::MatcherNotLooking);
        }
        let Some(anchor) = self.entries.get(self.cursor) else {
            self.state = MatchState::NotFound;
            return Ok(());
        };
        if anchor.trigger().len() < position {
            return Err(KuiError::MatcherOutOfSync(position));
        }
        // Everything fed before this call, read back off the anchor entry.
        let prefix: Vec<KeyCode> = anchor.trigger().keys()[..position].to_vec();

        // Advance past entries that share the prefix but whose key at
        // `position` sorts below the typed key. A trigger that *equals* the
        // prefix was fully matched on an earlier feed and is passed over
        // here; `best_found` already remembers it.
        loop {
            let Some(entry) = self.entries.get(self.cursor) else {
                self.state = MatchState::NotFound;
                return Ok(());
            };
            if !entry.trigger().starts_with(&prefix) {
                self.state = MatchState::NotFound;
                return Ok(());
            }
            match entry.trigger().keys().get(position) {
                None => self.cursor += 1,
                Some(&k) if k < key => self.cursor += 1,
                Some(&k) if k == key => break,
                Some(_) => {
                    self.state = MatchState::NotFound;
                    return Ok(());
                }
            }
        }

        // The cursor entry extends the typed prefix by `key`. If it needs
        // more keys it stays the lower-bound candidate and we keep looking.
        let matched = self.entries[self.cursor].trigger();
        if matched.len() != position + 1 {
            return Ok(());
        }
        self.best_found = Some(self.cursor);

        // Fully matched. Only a following entry that extends the same
        // prefix can still produce a longer match.
        let extendable = self
            .entries
            .get(self.cursor + 1)
            .is_some_and(|next| next.trigger().starts_with(matched.keys()));
        if !extendable {
            self.state = MatchState::Found;
        }
        Ok(())
    }

    /// Conclude the match run: if any trigger was fully matched along the
    /// way, settle on the longest one.
    pub fn finalize(&mut self) {
        if let Some(found) = self.best_found {
            self.cursor = found;
            self.state = MatchState::Found;
        }
    }

    /// The winning mapping, once the state is `Found`.
    pub fn matched(&self) -> Option<&Mapping> {
        if self.state == MatchState::Found {
            self.entries.get(self.cursor)
        } else {
            None
        }
    }
}

fn notation(trigger: &[KeyCode]) -> String {
    trigger.iter().map(|key| key.to_string()).collect()
}

// =============================================================================
// Tests
// =============================================================================
