use std::fmt;

pub const RECORD_KIND_A: &str = "A";
pub const RECORD_KIND_CNAME: &str = "CNAME";

/// Record kinds the locator reports on.
pub const LOCATABLE_KINDS: [&str; 2] = [RECORD_KIND_A, RECORD_KIND_CNAME];

/// One entry returned by a provider zone search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub domain: String,
    pub zone: String,
    pub kind: String,
    pub answers: Vec<String>,
}

/// A single answer of a record's answer set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub rdata: Vec<String>,
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self {
            rdata: vec![value.to_string()],
        }
    }
}

/// A record loaded from the provider, ready to have its answers replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordHandle {
    pub domain: String,
    pub zone: String,
    pub kind: String,
    pub answers: Vec<Answer>,
}

/// Live DNS state for one domain, as discovered by the locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRecord {
    pub domain: String,
    pub zone: String,
    pub kind: String,
    pub current_values: Vec<String>,
}

impl From<SearchHit> for ResolvedRecord {
    fn from(value: SearchHit) -> Self {
        Self {
            domain: value.domain,
            zone: value.zone,
            kind: value.kind,
            current_values: value.answers,
        }
    }
}

impl fmt::Display for ResolvedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FQDN: {}", self.domain)?;
        writeln!(f, "Zone: {}", self.zone)?;
        writeln!(f, "Record Type: {}", self.kind)?;
        write!(f, "Record Values: {}", self.current_values.join(", "))
    }
}

/// The three provider operations flips are built on.
pub trait Provider {
    fn search_zone(&self, query: &str) -> super::Result<Vec<SearchHit>>;
    fn load_record(&self, domain: &str, kind: &str, zone: &str) -> super::Result<RecordHandle>;
    fn update_record(&self, record: &RecordHandle, answers: Vec<Answer>) -> super::Result<()>;
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

pub fn is_same_domain(fqdn: &str, domain: &str) -> bool {
    normalize(fqdn) == normalize(domain)
}

/// True when `domain` is `fqdn` itself or lives underneath it.
pub fn is_same_or_subdomain(fqdn: &str, domain: &str) -> bool {
    let fqdn = normalize(fqdn);
    let domain = normalize(domain);
    domain == fqdn || domain.ends_with(&format!(".{fqdn}"))
}
