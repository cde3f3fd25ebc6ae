use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// What a rule does with the text it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    /// Delete the first match.
    StripFirst,
    /// Rewrite every `Module <n>` heading to `Module NN: `.
    ModuleHeading,
    /// Replace every match with one space.
    Collapse,
    /// Replace every whitespace run with one space, then trim both ends.
    Whitespace,
}

#[derive(Debug)]
pub struct CleanupRule {
    pub name: &'static str,
    regex: Regex,
    rewrite: Rewrite,
}

impl CleanupRule {
    fn new(name: &'static str, pattern: &str, rewrite: Rewrite) -> Self {
        let regex = Regex::new(pattern).expect("cleanup rule pattern must compile");
        Self {
            name,
            regex,
            rewrite,
        }
    }

    pub fn apply(&self, input: &str) -> String {
        match self.rewrite {
            Rewrite::StripFirst => self.regex.replace(input, "").into_owned(),
            Rewrite::ModuleHeading => self
                .regex
                .replace_all(input, |caps: &Captures<'_>| {
                    format!("Module {}: ", pad_number(&caps[1]))
                })
                .into_owned(),
            Rewrite::Collapse => self.regex.replace_all(input, " ").into_owned(),
            Rewrite::Whitespace => self.regex.replace_all(input, " ").trim().to_owned(),
        }
    }
}

/// The cleanup pipeline, applied left to right.
///
/// The three strip rules all run; once the greedy course/SCA rule has
/// removed a prefix the later ones usually find nothing left to match.
/// [`clean_title`] repeats the whole list until the text settles.
pub fn cleanup_rules() -> &'static [CleanupRule] {
    static RULES: LazyLock<Vec<CleanupRule>> = LazyLock::new(|| {
        vec![
            CleanupRule::new(
                "strip-course-sca-prefix",
                r"(?i)^.*?\s*-\s*SCA-\d+\s*",
                Rewrite::StripFirst,
            ),
            CleanupRule::new(
                "strip-course-module-prefix",
                r"(?i)^.*?\s*-\s*Module\s*",
                Rewrite::StripFirst,
            ),
            CleanupRule::new("strip-bare-sca-code", r"(?i)^SCA-\d+\s*", Rewrite::StripFirst),
            CleanupRule::new(
                "module-heading",
                r"(?i)Module\s*(\d+)\s*[:-]?\s*",
                Rewrite::ModuleHeading,
            ),
            CleanupRule::new("drop-video-label", r"\s*Video\s*\d+:\s*", Rewrite::Collapse),
            CleanupRule::new("whitespace", r"\s+", Rewrite::Whitespace),
        ]
    });
    &RULES
}

/// Upper bound on pipeline passes; real titles settle in two or three.
const MAX_PASSES: usize = 8;

/// Runs the pipeline until a pass leaves the text unchanged, so the result
/// is itself clean. A nested `- Module` or `- SCA-<n>` fragment, or one
/// exposed by dropping a video label, is stripped now rather than on the
/// next batch run.
pub fn clean_title(input: &str) -> String {
    let mut text = clean_once(input);
    for _ in 1..MAX_PASSES {
        let next = clean_once(&text);
        if next == text {
            return text;
        }
        text = next;
    }
    tracing::warn!(title = %input, "title cleanup did not settle");
    text
}

fn clean_once(input: &str) -> String {
    cleanup_rules()
        .iter()
        .fold(input.to_owned(), |text, rule| {
            let out = rule.apply(&text);
            if out != text {
                tracing::trace!(rule = rule.name, before = %text, after = %out, "cleanup rule");
            }
            out
        })
}

/// Zero-pads a digit run to width two without going through an integer,
/// so arbitrarily long numbers cannot overflow.
fn pad_number(digits: &str) -> Cow<'_, str> {
    let significant = digits.trim_start_matches('0');
    match significant.chars().count() {
        0 => Cow::Borrowed("00"),
        1 => Cow::Owned(format!("0{significant}")),
        _ => Cow::Borrowed(significant),
    }
}
