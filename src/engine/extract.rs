//! Capture groups to entities.
//!
//! Only the first match is considered. For each group index `i` in `1..N`
//! that participated in the match, the entity name is chosen as:
//!
//! ```text
//! symbolic name in the pattern   (?<One>...)      -> "One"
//! else names[i - 1]              ["One", "Two"]   -> "One"
//! else the index itself                            -> "1"
//! ```
//!
//! Slot 0 (the whole match) never becomes an entity. Groups that did not
//! participate are skipped without shifting later indices. Surplus entries in
//! `names` are ignored.

use crate::{Entity, Groups};

pub(crate) fn extract_entities<S: AsRef<str>>(groups: &Groups<'_>, names: &[S]) -> Vec<Entity> {
    let mut entities = Vec::new();

    for index in 1..groups.len() {
        let Some(slot) = groups.slot(index) else { continue };
        let (Some((start, end)), Some(raw)) = (slot.span, groups.text(index)) else {
            continue;
        };

        let group_name = match (&slot.name, names.get(index - 1)) {
            (Some(symbolic), _) => symbolic.clone(),
            (None, Some(given)) => given.as_ref().to_string(),
            (None, None) => index.to_string(),
        };

        entities.push(Entity { group_name, raw_value: raw.to_string(), start, end });
    }

    entities
}
