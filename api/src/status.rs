//! Maps provider status vocabulary onto [`EventStatus`].
//!
//! Every provider describes progress differently: ESPN sends a `completed`
//! flag, a `pre`/`in`/`post` state and several free-text names, 365scores a
//! numeric `statusId` plus short text. Adapters collect whatever they have into
//! a [`RawStatus`] and [`classify`] walks [`RULES`] in order; the first rule
//! that matches decides.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Scheduled,
    Live,
    Halftime,
    Finished,
    Postponed,
    Cancelled,
}

impl EventStatus {
    /// Postponed and cancelled fixtures never reach the catalog.
    pub fn is_removal(self) -> bool {
        matches!(self, EventStatus::Postponed | EventStatus::Cancelled)
    }

    /// Play has begun (or ended), so a score means something.
    pub fn has_started(self) -> bool {
        matches!(
            self,
            EventStatus::Live | EventStatus::Halftime | EventStatus::Finished
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Scheduled => "scheduled",
            EventStatus::Live => "live",
            EventStatus::Halftime => "halftime",
            EventStatus::Finished => "finished",
            EventStatus::Postponed => "postponed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Provider-neutral meaning of a numeric status code. Each adapter owns the
/// table from its own codes to these classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeClass {
    NotStarted,
    InPlay,
    Ended,
    Postponed,
    Cancelled,
    Announced,
}

/// Everything a provider said about progress, before interpretation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStatus {
    pub completed: Option<bool>,
    pub code: Option<CodeClass>,
    pub state: Option<String>,
    pub texts: Vec<String>,
}

impl RawStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self::new().with_text(Some(text))
    }

    pub fn with_completed(mut self, completed: Option<bool>) -> Self {
        self.completed = completed;
        self
    }

    pub fn with_code(mut self, code: Option<CodeClass>) -> Self {
        self.code = code;
        self
    }

    pub fn with_state(mut self, state: Option<&str>) -> Self {
        self.state = state
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        self
    }

    /// Blank or missing texts are ignored.
    pub fn with_text(mut self, text: Option<&str>) -> Self {
        if let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) {
            self.texts.push(text.to_owned());
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// One row of the ordered rule table.
pub struct Rule {
    pub name: &'static str,
    pub outcome: EventStatus,
    test: fn(&Signals) -> bool,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("outcome", &self.outcome)
            .finish()
    }
}

pub static RULES: [Rule; 7] = [
    Rule {
        name: "completed-flag",
        outcome: EventStatus::Finished,
        test: completed_flag,
    },
    Rule {
        name: "terminal-token",
        outcome: EventStatus::Finished,
        test: terminal_token,
    },
    Rule {
        name: "halftime-token",
        outcome: EventStatus::Halftime,
        test: halftime_token,
    },
    Rule {
        name: "in-play",
        outcome: EventStatus::Live,
        test: in_play,
    },
    Rule {
        name: "scheduled-token",
        outcome: EventStatus::Scheduled,
        test: scheduled_token,
    },
    Rule {
        name: "postponed-token",
        outcome: EventStatus::Postponed,
        test: postponed_token,
    },
    Rule {
        name: "cancelled-token",
        outcome: EventStatus::Cancelled,
        test: cancelled_token,
    },
];

/// Result of a classification, with the rule that produced it for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: EventStatus,
    pub rule: Option<&'static str>,
}

pub fn classify(raw: &RawStatus) -> Classification {
    let signals = Signals::new(raw);
    RULES
        .iter()
        .find(|rule| (rule.test)(&signals))
        .map(|rule| Classification {
            status: rule.outcome,
            rule: Some(rule.name),
        })
        .unwrap_or(Classification {
            status: EventStatus::Scheduled,
            rule: None,
        })
}

pub fn normalize(raw: &RawStatus) -> EventStatus {
    classify(raw).status
}

// ---------------------------------------------------------------------------
// Token vocabulary (phrases are in normalized form: lowercase words, single spaces)
// ---------------------------------------------------------------------------

const TERMINAL: &[&str] = &[
    "final",
    "ft",
    "ended",
    "full time",
    "fulltime",
    "aet",
    "after et",
    "after extra time",
    "after penalties",
    "ap",
    "finished",
    "complete",
    "completed",
    "finalizado",
    "terminado",
    "termine",
    "beendet",
];

const HALFTIME: &[&str] = &["ht", "half time", "halftime", "h t", "descanso"];

const IN_PLAY: &[&str] = &[
    "live",
    "in progress",
    "inprogress",
    "playing",
    "1st half",
    "2nd half",
    "first half",
    "second half",
    "q1",
    "q2",
    "q3",
    "q4",
    "overtime",
    "ot",
    "extra time",
    "et",
    "shootout",
    "penalties",
    "inning",
    "paused",
    "interrupted",
    "break",
    "en vivo",
];

const SCHEDULED: &[&str] = &[
    "scheduled",
    "tbd",
    "tba",
    "to be announced",
    "to be determined",
    "not started",
];

const POSTPONED: &[&str] = &["postponed", "pst", "suspended"];

const CANCELLED: &[&str] = &[
    "cancelled",
    "canceled",
    "abandoned",
    "aban",
    "walkover",
];

static MATCH_CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}'(\+\d{1,2}'?)?$|^\d{1,3}:\d{2}$").expect("clock pattern"));

static START_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}:\d{2} ?(am|pm)\b").expect("start time pattern"));

static PERIOD_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(top|bot|bottom|mid|middle|end) \d{1,2}(st|nd|rd|th)?\b|\b\d(st|nd|rd|th) (quarter|period|half|inning)\b",
    )
    .expect("period pattern")
});

/// Pre-normalized view of a [`RawStatus`], built once per classification.
struct Signals<'a> {
    raw: &'a RawStatus,
    /// Texts lowercased, punctuation/underscores turned into single spaces and
    /// padded with a leading/trailing space so phrase lookups are whole-word.
    padded: Vec<String>,
    trimmed: Vec<String>,
}

impl<'a> Signals<'a> {
    fn new(raw: &'a RawStatus) -> Self {
        let trimmed: Vec<String> = raw.texts.iter().map(|t| t.trim().to_lowercase()).collect();
        let padded = trimmed
            .iter()
            .map(|t| format!(" {} ", words(t)))
            .collect();
        Self {
            raw,
            padded,
            trimmed,
        }
    }

    fn has_phrase(&self, phrases: &[&str]) -> bool {
        self.padded.iter().any(|text| {
            phrases
                .iter()
                .any(|phrase| text.contains(&format!(" {phrase} ")))
        })
    }

    fn code_is(&self, class: CodeClass) -> bool {
        self.raw.code == Some(class)
    }

    fn state_is(&self, state: &str) -> bool {
        self.raw.state.as_deref() == Some(state)
    }

    fn has_clock(&self) -> bool {
        self.trimmed.iter().any(|t| MATCH_CLOCK.is_match(t))
    }

    /// A kick-off time of day ("7:00 PM ET") describes a fixture, not play.
    fn announces_start(&self) -> bool {
        self.trimmed.iter().any(|t| START_TIME.is_match(t))
    }

    fn has_period_marker(&self) -> bool {
        self.padded.iter().any(|t| PERIOD_MARKER.is_match(t))
    }

    fn mentions_removal(&self) -> bool {
        self.has_phrase(POSTPONED) || self.has_phrase(CANCELLED)
    }
}

fn words(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn completed_flag(s: &Signals) -> bool {
    s.raw.completed == Some(true) || s.code_is(CodeClass::Ended)
}

// An explicit pre/in state outranks terminal-sounding text ("Play Complete"
// between golf rounds). ESPN reports postponed and cancelled fixtures with
// state "post" too.
fn terminal_token(s: &Signals) -> bool {
    let open = s.state_is("pre") || s.state_is("in");
    (s.has_phrase(TERMINAL) && !open) || (s.state_is("post") && !s.mentions_removal())
}

fn halftime_token(s: &Signals) -> bool {
    s.has_phrase(HALFTIME)
}

// Text only counts without a "pre" state: "ET" and "OT" also end start-time
// details. 365scores shows a bare "-" while a game is running.
fn in_play(s: &Signals) -> bool {
    if s.code_is(CodeClass::InPlay) || s.state_is("in") {
        return true;
    }
    if s.state_is("pre") {
        return false;
    }
    s.trimmed.iter().any(|t| t == "-")
        || s.has_clock()
        || s.has_period_marker()
        || (s.has_phrase(IN_PLAY) && !s.announces_start())
}

fn scheduled_token(s: &Signals) -> bool {
    s.code_is(CodeClass::NotStarted)
        || s.code_is(CodeClass::Announced)
        || (s.state_is("pre") && !s.mentions_removal())
        || s.has_phrase(SCHEDULED)
}

fn postponed_token(s: &Signals) -> bool {
    s.code_is(CodeClass::Postponed) || s.has_phrase(POSTPONED)
}

fn cancelled_token(s: &Signals) -> bool {
    s.code_is(CodeClass::Cancelled) || s.has_phrase(CANCELLED)
}
