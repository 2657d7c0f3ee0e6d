use std::cell::RefCell;

use super::{
    Answer, Provider, RecordHandle, ResponseSnafu, Result, SearchHit, RECORD_KIND_A,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Search(String),
    Load {
        domain: String,
        kind: String,
        zone: String,
    },
    Update {
        domain: String,
        zone: String,
        kind: String,
        answers: Vec<Answer>,
    },
}

/// In-memory provider that records every call made against it.
///
/// Searches return every stored hit whose domain contains the query, which
/// is broader than what callers want, much like a real zone search.
#[derive(Default)]
pub(crate) struct FakeProvider {
    hits: Vec<SearchHit>,
    failing_searches: Vec<String>,
    reject_updates: bool,
    calls: RefCell<Vec<Call>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hit(mut self, domain: &str, zone: &str, kind: &str, answers: &[&str]) -> Self {
        self.hits.push(SearchHit {
            domain: domain.into(),
            zone: zone.into(),
            kind: kind.into(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        });
        self
    }

    pub fn with_a(self, domain: &str, zone: &str, answer: &str) -> Self {
        self.with_hit(domain, zone, RECORD_KIND_A, &[answer])
    }

    pub fn failing_search(mut self, query: &str) -> Self {
        self.failing_searches.push(query.into());
        self
    }

    pub fn rejecting_updates(mut self) -> Self {
        self.reject_updates = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn updates(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Update { .. }))
            .collect()
    }
}

impl Provider for FakeProvider {
    fn search_zone(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.calls.borrow_mut().push(Call::Search(query.into()));
        if self.failing_searches.iter().any(|q| q == query) {
            return ResponseSnafu {
                message: "search unavailable",
            }
            .fail();
        }
        Ok(self
            .hits
            .iter()
            .filter(|h| h.domain.contains(query))
            .cloned()
            .collect())
    }

    fn load_record(&self, domain: &str, kind: &str, zone: &str) -> Result<RecordHandle> {
        self.calls.borrow_mut().push(Call::Load {
            domain: domain.into(),
            kind: kind.into(),
            zone: zone.into(),
        });
        match self
            .hits
            .iter()
            .find(|h| h.domain == domain && h.kind == kind && h.zone == zone)
        {
            Some(hit) => Ok(RecordHandle {
                domain: hit.domain.clone(),
                zone: hit.zone.clone(),
                kind: hit.kind.clone(),
                answers: hit.answers.iter().map(|a| Answer::from(a.as_str())).collect(),
            }),
            None => ResponseSnafu {
                message: format!("record {domain} {kind} not found in zone {zone}"),
            }
            .fail(),
        }
    }

    fn update_record(&self, record: &RecordHandle, answers: Vec<Answer>) -> Result<()> {
        self.calls.borrow_mut().push(Call::Update {
            domain: record.domain.clone(),
            zone: record.zone.clone(),
            kind: record.kind.clone(),
            answers,
        });
        if self.reject_updates {
            return ResponseSnafu {
                message: "update rejected",
            }
            .fail();
        }
        Ok(())
    }
}
