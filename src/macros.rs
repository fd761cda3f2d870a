/// Lazily compiled `&'static regex::Regex` for a literal pattern.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: $crate::__private::once_cell::sync::Lazy<$crate::__private::regex::Regex> =
            $crate::__private::once_cell::sync::Lazy::new(|| $crate::__private::regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __intent_score {
    () => {
        1.0
    };
    ($score:expr) => {
        $score
    };
}

/// Build a frozen [`Registry`](crate::Registry) from literal patterns.
///
/// Evaluates to `Result<Registry>`; the score defaults to `1.0`. Patterns are
/// compiled like [`RegistryBuilder::add_pattern`](crate::RegistryBuilder::add_pattern),
/// so an invalid pattern is an `Err` and back-references or look-around fall
/// back to the backtracking engine.
///
/// ```
/// use regexp_recognizer::intents;
///
/// let registry = intents! {
///     "HelpIntent" => "(?i)help",
///     "TacoIntent" => "(?i)taco" @ 0.5,
/// }
/// .unwrap();
/// assert_eq!(registry.len(), 2);
/// ```
#[macro_export]
macro_rules! intents {
    ( $( $name:literal => $pat:literal $(@ $score:expr)? ),* $(,)? ) => {{
        let build = || -> $crate::Result<$crate::Registry> {
            let builder = $crate::Registry::builder();
            $(
                let builder = builder.add_pattern(
                    $name,
                    $pat,
                    $crate::PatternFlags::empty(),
                    $crate::__intent_score!($($score)?),
                )?;
            )*
            Ok(builder.build())
        };
        build()
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Engine, Error};

    #[test]
    fn intents_reports_invalid_pattern() {
        let err = intents! { "Broken" => "(" }.unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "("));
    }

    #[test]
    fn intents_accepts_backreferences() {
        let registry = intents! { "Echo" => r"(\w+) \1" @ 0.8 }.unwrap();
        let echo = registry.get("Echo").unwrap();
        assert_eq!(echo.pattern.engine(), Engine::Backtracking);
        assert_eq!(crate::recognize_all(&registry, "bye bye").top().unwrap().name, "Echo");
        assert!(crate::recognize_all(&registry, "bye now").is_empty());
    }

    #[test]
    fn intents_reports_duplicate_names() {
        let err = intents! { "Help" => "help", "Help" => "assist" }.unwrap_err();
        assert!(matches!(err, Error::DuplicateName(ref name) if name == "Help"));
    }
}
