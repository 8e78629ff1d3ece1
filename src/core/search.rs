//! Search controller: debouncing, tickets, and supersession.
//!
//! Turns keystrokes into at most one request per user intent. The
//! controller itself never touches the network or a clock; callers pass in
//! the current time and dispatch the [`SearchRequest`]s it hands back. That
//! keeps every transition synchronous and testable.
//!
//! ```text
//! Idle --keystroke(len<3)--> Idle
//! Idle --keystroke(len>=3)--> Debouncing
//! Debouncing --keystroke--> Debouncing (timer reset)
//! Debouncing --timer fires--> InFlight (ticket N)
//! Idle|Debouncing --submit--> InFlight (ticket N)
//! InFlight --response N == latest--> Idle (apply)
//! InFlight --response N < latest--> (discard)
//! ```

use tokio::time::Instant;
use tracing::debug;

use crate::adapters::{FetchError, ResourceQuery};
use crate::config::SearchSettings;
use crate::domain::Resource;

/// Monotonic identifier of an issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Ticket(self.0 + 1)
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A search that should be sent now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: Ticket,
    pub term: String,
}

impl SearchRequest {
    pub fn query(&self) -> ResourceQuery {
        ResourceQuery::search(self.term.clone())
    }
}

/// The eventual result of a [`SearchRequest`]
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub ticket: Ticket,
    pub term: String,
    pub result: Result<Vec<Resource>, FetchError>,
}

/// What a keystroke did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Term too short; nothing scheduled, nothing cancelled
    Ignored,

    /// Debounce timer (re)armed
    Scheduled { deadline: Instant },
}

/// What to do with an arrived response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Latest request succeeded; replace the catalog
    Apply(Vec<Resource>),

    /// A newer request was issued after this one; drop it
    Superseded,

    /// Latest request failed; keep the catalog as it is
    Failed(FetchError),
}

/// Where the search path currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Debouncing,
    InFlight,
}

impl std::fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchPhase::Idle => write!(f, "idle"),
            SearchPhase::Debouncing => write!(f, "debouncing"),
            SearchPhase::InFlight => write!(f, "in flight"),
        }
    }
}

/// Armed trailing-edge debounce
#[derive(Debug, Clone)]
struct DebounceTimer {
    term: String,
    deadline: Instant,
}

/// Debounce and ordering state for free-text search
#[derive(Debug, Clone)]
pub struct SearchController {
    settings: SearchSettings,
    timer: Option<DebounceTimer>,
    last_issued: Option<Ticket>,
    /// Latest issued request has not settled yet
    awaiting: bool,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(SearchSettings::default())
    }
}

impl SearchController {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            timer: None,
            last_issued: None,
            awaiting: false,
        }
    }

    /// Handle a change of the search box contents.
    ///
    /// Terms shorter than the minimum are ignored outright; they do not
    /// cancel an already armed timer.
    pub fn on_input_change(&mut self, term: &str, now: Instant) -> InputOutcome {
        if term.chars().count() < self.settings.min_term_len {
            return InputOutcome::Ignored;
        }

        let deadline = now + self.settings.debounce;
        if self.timer.is_some() {
            debug!(term, "Debounce timer reset");
        } else {
            debug!(term, "Debounce timer armed");
        }

        self.timer = Some(DebounceTimer {
            term: term.to_string(),
            deadline,
        });

        InputOutcome::Scheduled { deadline }
    }

    /// Handle an explicit submit: cancel any pending debounce and search now,
    /// whatever the term length
    pub fn on_submit(&mut self, term: &str) -> SearchRequest {
        self.cancel_pending();
        self.issue(term.to_string())
    }

    /// Disarm the debounce timer. In-flight requests are unaffected.
    ///
    /// Returns whether a timer was armed.
    pub fn cancel_pending(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                debug!(term = %timer.term, "Debounce timer cancelled");
                true
            }
            None => false,
        }
    }

    /// When the armed timer will fire, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(|t| t.deadline)
    }

    /// Fire the debounce timer if its deadline has passed
    pub fn poll_timer(&mut self, now: Instant) -> Option<SearchRequest> {
        match self.timer.as_ref() {
            Some(timer) if timer.deadline <= now => {}
            _ => return None,
        }

        let timer = self.timer.take()?;
        Some(self.issue(timer.term))
    }

    /// Decide what an arrived response means for the catalog.
    ///
    /// Only the most recently issued ticket is ever applied, regardless of
    /// arrival order.
    pub fn accept(&mut self, response: SearchResponse) -> Resolution {
        if Some(response.ticket) != self.last_issued {
            debug!(
                ticket = %response.ticket,
                term = %response.term,
                "Discarding superseded response"
            );
            return Resolution::Superseded;
        }

        self.awaiting = false;
        match response.result {
            Ok(resources) => Resolution::Apply(resources),
            Err(err) => Resolution::Failed(err),
        }
    }

    pub fn phase(&self) -> SearchPhase {
        if self.timer.is_some() {
            SearchPhase::Debouncing
        } else if self.awaiting {
            SearchPhase::InFlight
        } else {
            SearchPhase::Idle
        }
    }

    fn issue(&mut self, term: String) -> SearchRequest {
        let ticket = self.last_issued.map(Ticket::next).unwrap_or(Ticket(1));
        self.last_issued = Some(ticket);
        self.awaiting = true;
        debug!(%ticket, term = %term, "Search issued");

        SearchRequest { ticket, term }
    }
}
