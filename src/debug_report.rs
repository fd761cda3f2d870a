use regexp_recognizer::{Intent, PatternMetrics, PatternOutcome, RecognitionRun};
use std::fmt::Write;
use std::time::Duration;

/// Roles a piece of report text can play; each maps to one ANSI escape.
#[derive(Debug, Clone, Copy)]
enum Style {
    Title,
    Section,
    Matched,
    Failed,
    Muted,
    Warning,
    Entity,
    Strong,
}

impl Style {
    fn escape(self) -> &'static str {
        match self {
            Style::Title => "\x1b[1;36m",
            Style::Section => "\x1b[90m",
            Style::Matched => "\x1b[32m",
            Style::Failed => "\x1b[31m",
            Style::Muted => "\x1b[2m",
            Style::Warning => "\x1b[33m",
            Style::Entity => "\x1b[36m",
            Style::Strong => "\x1b[1m",
        }
    }
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn apply(&self, style: Style, text: impl AsRef<str>) -> String {
        if self.enabled {
            format!("{}{}\x1b[0m", style.escape(), text.as_ref())
        } else {
            text.as_ref().to_string()
        }
    }
}

pub fn print_run(input: &str, run: &RecognitionRun, color: bool) {
    print!("{}", render_run(input, run, color));
}

/// Full report for one recognition run, ready to print.
pub fn render_run(input: &str, run: &RecognitionRun, color: bool) -> String {
    let palette = Palette { enabled: color };
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", palette.apply(Style::Title, format!("⚙  Recognizing: \"{input}\"")));

    let _ = writeln!(out, "\n{}", palette.apply(Style::Section, "━━━ Registrations ━━━"));
    for pattern in &run.metrics.patterns {
        let _ = writeln!(out, "{}", pattern_line(pattern, &palette));
    }

    let _ = writeln!(out, "\n{}", palette.apply(Style::Section, "━━━ Intents ━━━"));
    if run.result.is_empty() {
        let _ = writeln!(out, "{}", palette.apply(Style::Muted, "  No intents recognized"));
        let _ = writeln!(out, "\n{}", palette.apply(Style::Warning, "Possible reasons:"));
        let _ = writeln!(out, "  • No pattern matched the input (patterns are case-sensitive unless --ignore-case)");
        let _ = writeln!(out, "  • A pattern failed to evaluate (see the registrations above)");
        let _ = writeln!(out, "\n{}", palette.apply(Style::Muted, "  Tip: Set RUST_LOG=debug to see per-registration traces"));
    } else {
        for (rank, intent) in run.result.iter().enumerate() {
            write_intent(&mut out, rank + 1, intent, &palette);
        }
    }

    let summary = format!(
        "  {} matched, {} failed, {} registrations in {}",
        run.metrics.matched(),
        run.metrics.failed(),
        run.metrics.patterns.len(),
        format_duration(run.metrics.total)
    );
    let _ = writeln!(out, "\n{}", palette.apply(Style::Muted, summary));
    out
}

fn pattern_line(pattern: &PatternMetrics, palette: &Palette) -> String {
    let status = match &pattern.outcome {
        PatternOutcome::Matched { entities } => palette.apply(Style::Matched, format!("✓ matched ({entities} entities)")),
        PatternOutcome::NoMatch => palette.apply(Style::Muted, "· no match"),
        PatternOutcome::Failed { reason } => palette.apply(Style::Failed, format!("✗ failed: {reason}")),
    };
    format!("  {:>3}. {:<24} {:>10}  {}", pattern.order, pattern.name, format_duration(pattern.duration), status)
}

fn write_intent(out: &mut String, rank: usize, intent: &Intent, palette: &Palette) {
    let _ = writeln!(
        out,
        "  {rank}. {} {}",
        palette.apply(Style::Strong, &intent.name),
        palette.apply(Style::Muted, format!("(score {:.2})", intent.score))
    );
    for entity in &intent.entities {
        let _ = writeln!(
            out,
            "       {} = {:?} {}",
            palette.apply(Style::Entity, &entity.group_name),
            entity.raw_value,
            palette.apply(Style::Muted, format!("[{}..{}]", entity.start, entity.end))
        );
    }
}

fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros >= 1000 { format!("{:.2}ms", d.as_secs_f64() * 1000.0) } else { format!("{micros}µs") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regexp_recognizer::{intents, recognize_verbose};

    #[test]
    fn report_lists_registrations_and_entities() {
        let registry = intents! {
            "Greeting" => "(?i)hello (?<who>\\w+)",
            "Farewell" => "(?i)bye" @ 0.5,
        }
        .unwrap();
        let report = render_run("hello world", &recognize_verbose(&registry, "hello world"), false);

        assert!(report.contains("Recognizing: \"hello world\""));
        assert!(report.contains("✓ matched (1 entities)"));
        assert!(report.contains("· no match"));
        assert!(report.contains("1. Greeting (score 1.00)"));
        assert!(report.contains("who = \"world\" [6..11]"));
        assert!(report.contains("1 matched, 0 failed, 2 registrations"));
        assert!(!report.contains('\x1b'));
    }

    #[test]
    fn report_explains_empty_results() {
        let registry = intents! { "Help" => "help" }.unwrap();
        let report = render_run("HELP", &recognize_verbose(&registry, "HELP"), true);

        assert!(report.contains("No intents recognized"));
        assert!(report.contains("Possible reasons:"));
        assert!(report.contains("\x1b[0m"));
    }

    #[test]
    fn durations_switch_units_at_one_millisecond() {
        assert_eq!(format_duration(Duration::from_micros(999)), "999µs");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50ms");
    }
}
