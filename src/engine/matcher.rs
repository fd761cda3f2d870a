//! Single pattern, single input.

use super::extract::extract_entities;
use super::registry::Registration;
use crate::{Intent, Result, TextPattern};

/// Match one registration against `input`, using its stored group names.
pub(crate) fn match_registration(input: &str, reg: &Registration) -> Result<Option<Intent>> {
    match_pattern(input, &reg.name, &reg.pattern, &reg.group_names, reg.score)
}

/// Match `pattern` against `input` and build an intent from the first match.
///
/// ```text
/// pattern.first_captures(input) ─┬─ None          -> Ok(None)
///                                ├─ Some(groups)  -> Intent { name, score, entities }
///                                └─ engine error  -> Err(MatchEngine)
/// ```
pub(crate) fn match_pattern<P, S>(
    input: &str,
    name: &str,
    pattern: &P,
    group_names: &[S],
    score: f64,
) -> Result<Option<Intent>>
where
    P: TextPattern + ?Sized,
    S: AsRef<str>,
{
    let Some(groups) = pattern.first_captures(input)? else {
        return Ok(None);
    };

    Ok(Some(Intent { name: name.to_string(), score, entities: extract_entities(&groups, group_names) }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pattern, PatternFlags};

    fn registration(name: &str, source: &str, score: f64) -> Registration {
        Registration {
            name: name.to_string(),
            pattern: Pattern::compile(source, PatternFlags::IGNORE_CASE).unwrap(),
            score,
            order: 0,
            group_names: Vec::new(),
        }
    }

    #[test]
    fn no_match_yields_none() {
        let reg = registration("CancelIntent", "cancel", 1.0);
        assert_eq!(match_registration("tacos", &reg).unwrap(), None);
    }

    #[test]
    fn match_copies_name_and_score() {
        let reg = registration("HelpIntent", "help", 0.75);
        let intent = match_registration("Help me", &reg).unwrap().unwrap();
        assert_eq!(intent.name, "HelpIntent");
        assert_eq!(intent.score, 0.75);
        assert!(intent.entities.is_empty());
    }

    #[test]
    fn registration_group_names_are_applied() {
        let mut reg = registration("Range", r"from (\d+) to (\d+)", 1.0);
        reg.group_names = vec!["low".to_string(), "high".to_string()];
        let intent = match_registration("from 3 to 9", &reg).unwrap().unwrap();
        assert_eq!(intent.entity("low").unwrap().value_as::<u32>().unwrap(), 3);
        assert_eq!(intent.entity("high").unwrap().value_as::<u32>().unwrap(), 9);
    }

    #[test]
    fn works_with_plain_engine_regexes() {
        let re = fancy_regex::Regex::new(r"(?<word>\w+) \k<word>").unwrap();
        let intent = match_pattern::<_, &str>("say bye bye", "Echo", &re, &[], 1.0).unwrap().unwrap();
        assert_eq!(intent.entities[0].group_name, "word");
        assert_eq!(intent.entities[0].raw_value, "bye");
    }
}
