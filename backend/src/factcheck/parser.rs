use shared::{FactCheckVerdict, Verdict};
use std::str::FromStr;

pub const UNABLE_TO_ANALYZE: &str = "Unable to analyze";

const VERDICT_MARKER: &str = "Verdict:";
const REASON_MARKER: &str = "Reason:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    SearchingForVerdict,
    AwaitingReason,
    AccumulatingReason,
}

/// Line-oriented reader for the provider's `Verdict:` / `Reason:` reply.
///
/// Only the first verdict line counts. Reason text starts at the first
/// `Reason:` line after it and keeps every following line, so multi-line
/// explanations are joined with single spaces. The markers are matched
/// case-sensitively anywhere in a line, which tolerates markdown such as
/// `**Verdict:** FALSE`.
#[derive(Debug)]
pub struct VerdictParser<'a> {
    state: ParseState,
    verdict: Option<&'a str>,
    reason: Vec<&'a str>,
}

impl<'a> VerdictParser<'a> {
    pub fn new() -> Self {
        Self {
            state: ParseState::SearchingForVerdict,
            verdict: None,
            reason: Vec::new(),
        }
    }

    pub fn feed(&mut self, line: &'a str) {
        self.state = match self.state {
            ParseState::SearchingForVerdict => match split_marker(line, VERDICT_MARKER) {
                Some(rest) => self.capture_verdict(rest),
                None => ParseState::SearchingForVerdict,
            },
            ParseState::AwaitingReason => {
                if line.contains(VERDICT_MARKER) {
                    ParseState::AwaitingReason
                } else if let Some(rest) = split_marker(line, REASON_MARKER) {
                    self.push_reason(rest);
                    ParseState::AccumulatingReason
                } else {
                    ParseState::AwaitingReason
                }
            }
            ParseState::AccumulatingReason => {
                if line.contains(VERDICT_MARKER) {
                    // a second verdict never overrides the first
                } else if let Some(rest) = split_marker(line, REASON_MARKER) {
                    self.push_reason(rest);
                } else {
                    self.push_reason(line);
                }
                ParseState::AccumulatingReason
            }
        };
    }

    // "Verdict: FALSE Reason: ..." on a single line starts the reason too.
    fn capture_verdict(&mut self, rest: &'a str) -> ParseState {
        match rest.split_once(REASON_MARKER) {
            Some((verdict, reason)) => {
                self.verdict = Some(verdict.trim());
                self.push_reason(reason.trim_start_matches('*'));
                ParseState::AccumulatingReason
            }
            None => {
                self.verdict = Some(rest.trim());
                ParseState::AwaitingReason
            }
        }
    }

    fn push_reason(&mut self, fragment: &'a str) {
        let fragment = fragment.trim();
        if !fragment.is_empty() {
            self.reason.push(fragment);
        }
    }

    pub fn finish(self) -> FactCheckVerdict {
        let verdict = match self.verdict {
            Some(raw) => map_verdict(raw).unwrap_or_else(|| {
                log::warn!("Unrecognized verdict '{}', treating as insufficient information", raw);
                Verdict::InsufficientInformation
            }),
            None => Verdict::InsufficientInformation,
        };
        let reason = if self.reason.is_empty() {
            UNABLE_TO_ANALYZE.to_string()
        } else {
            self.reason.join(" ")
        };
        FactCheckVerdict::new(verdict, reason)
    }
}

impl Default for VerdictParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a raw provider reply. Never fails: anything unreadable becomes
/// `INSUFFICIENT_INFORMATION` / "Unable to analyze".
pub fn parse_verdict(raw: &str) -> FactCheckVerdict {
    let mut parser = VerdictParser::new();
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .for_each(|line| parser.feed(line));
    parser.finish()
}

/// Maps a captured verdict token onto the enum. Case, surrounding brackets,
/// quotes, emphasis and spacing are ignored; anything else is `None`.
pub fn map_verdict(raw: &str) -> Option<Verdict> {
    let token = raw.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '[' | ']' | '(' | ')' | '*' | '_' | '"' | '\'' | '`' | '.' | '!')
    });
    let canonical = token
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    Verdict::from_str(&canonical).ok()
}

// Text after the marker, minus markdown bold closing the marker itself.
fn split_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.split_once(marker)
        .map(|(_, rest)| rest.trim_start_matches('*'))
}
