//! Contact dispatcher
//!
//! Turns raw begin/end contacts drained from the physics step into semantic
//! gameplay events by matching the unordered pair of participant archetypes
//! against registered rules. Contact-end pairs are accepted but have no
//! gameplay effect yet; the hook exists for future use (leaving the ground
//! without jumping, sensor overlaps).

use super::actor::ActorId;
use super::archetype::Archetype;
use super::physics::ContactPair;

/// Semantic gameplay events raised from physics contacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The runner touched the ground
    RunnerLanded,
}

/// Unordered archetype-pair rules mapping contacts to events
#[derive(Debug, Default)]
pub struct ContactRules {
    rules: Vec<(Archetype, Archetype, GameEvent)>,
}

impl ContactRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `{a, b} -> event`; matching is symmetric
    pub fn on_contact(mut self, a: Archetype, b: Archetype, event: GameEvent) -> Self {
        self.rules.push((a, b, event));
        self
    }

    /// Event for the pair, regardless of participant order
    pub fn match_pair(&self, a: Archetype, b: Archetype) -> Option<GameEvent> {
        self.rules
            .iter()
            .find(|(ra, rb, _)| (*ra == a && *rb == b) || (*ra == b && *rb == a))
            .map(|(_, _, event)| *event)
    }
}

/// Resolve each contact-begin pair to archetypes and emit matching events.
///
/// `resolve` maps a participant id to its archetype. A gameplay body that
/// cannot be resolved is an invariant violation (its metadata went missing
/// after setup), so this fails fast rather than fabricating a default.
pub fn dispatch(
    contacts: &[ContactPair],
    resolve: impl Fn(ActorId) -> Option<Archetype>,
    rules: &ContactRules,
    out: &mut Vec<GameEvent>,
) {
    for contact in contacts {
        if !contact.started {
            continue;
        }
        let a = resolve(contact.a)
            .unwrap_or_else(|| panic!("contact participant {:?} has no archetype", contact.a));
        let b = resolve(contact.b)
            .unwrap_or_else(|| panic!("contact participant {:?} has no archetype", contact.b));
        if let Some(event) = rules.match_pair(a, b) {
            out.push(event);
        }
    }
}
