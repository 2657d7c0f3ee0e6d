use std::fmt;

use crate::common::{ResolvedRecord, Result};
use crate::definitions::{FlipRecord, Site};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipStatus {
    Applied,
    SkippedNoMatch,
    Error,
}

/// Result of flipping one declared record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipOutcome {
    pub fqdn: String,
    pub kind: String,
    pub status: FlipStatus,
    /// The value string sent for applied flips, otherwise the reason.
    pub detail: String,
}

impl FlipOutcome {
    pub(super) fn new(record: &FlipRecord, status: FlipStatus, detail: String) -> Self {
        Self {
            fqdn: record.fqdn.clone(),
            kind: record.kind.clone(),
            status,
            detail,
        }
    }
}

impl fmt::Display for FlipOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            FlipStatus::Applied => write!(f, "{} {} -> {}", self.fqdn, self.kind, self.detail),
            FlipStatus::SkippedNoMatch => write!(
                f,
                "{}: WARNING - No matching records found. Skipping flip.",
                self.fqdn
            ),
            FlipStatus::Error => write!(f, "{}: ERROR - {}", self.fqdn, self.detail),
        }
    }
}

/// Outcomes of a batch flip, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipReport {
    pub app: String,
    pub site: Site,
    pub outcomes: Vec<FlipOutcome>,
}

impl FlipReport {
    pub fn count(&self, status: FlipStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

impl fmt::Display for FlipReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Flipping records for application: {} (site: {})\n",
            self.app, self.site
        )?;
        writeln!(f, "Flip operation summary:")?;
        for outcome in &self.outcomes {
            writeln!(f, "  {outcome}")?;
        }
        writeln!(f)?;
        match self.count(FlipStatus::Error) {
            0 => write!(f, "Flip operation completed successfully."),
            errors => write!(f, "Flip operation completed with {errors} error(s)."),
        }
    }
}

/// An application and the FQDNs it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppListing {
    pub name: String,
    pub fqdns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationList(pub Vec<AppListing>);

impl fmt::Display for ApplicationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Available applications:")?;
        for app in &self.0 {
            write!(f, "\n  {}", app.name)?;
            for fqdn in &app.fqdns {
                write!(f, "\n    FQDN: {fqdn}")?;
            }
        }
        Ok(())
    }
}

/// A declared record alongside what a live lookup found for it.
#[derive(Debug)]
pub struct RecordDetail {
    pub record: FlipRecord,
    pub live: Result<Vec<ResolvedRecord>>,
}

#[derive(Debug)]
pub struct AppDetail {
    pub name: String,
    pub records: Vec<RecordDetail>,
}

impl fmt::Display for AppDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config for {}:", self.name)?;
        for detail in &self.records {
            let record = &detail.record;
            write!(f, "\nFQDN: {}", record.fqdn)?;
            write!(f, "\nPrimary: {}", record.primary)?;
            write!(f, "\nSecondary: {}", record.secondary)?;
            match &detail.live {
                Err(err) => write!(f, "\n{err}")?,
                Ok(live) if live.is_empty() => {
                    write!(f, "\nNo A or CNAME records found for {}", record.fqdn)?
                }
                Ok(live) => {
                    for resolved in live {
                        write!(f, "\n-- FQDN: {}", resolved.domain)?;
                        write!(f, "\n   Zone: {}", resolved.zone)?;
                        write!(f, "\n   Record Type: {}", resolved.kind)?;
                        write!(f, "\n   Record Values: {}", resolved.current_values.join(", "))?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(fqdn: &str, status: FlipStatus, detail: &str) -> FlipOutcome {
        FlipOutcome {
            fqdn: fqdn.into(),
            kind: "A".into(),
            status,
            detail: detail.into(),
        }
    }

    #[test]
    fn report_lists_every_outcome_and_error_count() {
        let report = FlipReport {
            app: "web".into(),
            site: Site::Secondary,
            outcomes: vec![
                outcome("a.example.com", FlipStatus::SkippedNoMatch, "none"),
                outcome("b.example.com", FlipStatus::Applied, "1.2.3.4,5.6.7.8"),
                outcome("c.example.com", FlipStatus::Error, "update rejected"),
            ],
        };

        assert_eq!(
            report.to_string(),
            "Flipping records for application: web (site: secondary)\n\
             \n\
             Flip operation summary:\n\
             \x20 a.example.com: WARNING - No matching records found. Skipping flip.\n\
             \x20 b.example.com A -> 1.2.3.4,5.6.7.8\n\
             \x20 c.example.com: ERROR - update rejected\n\
             \n\
             Flip operation completed with 1 error(s)."
        );
    }

    #[test]
    fn clean_report_completes_successfully() {
        let report = FlipReport {
            app: "web".into(),
            site: Site::Primary,
            outcomes: vec![outcome("b.example.com", FlipStatus::Applied, "1.2.3.4")],
        };
        let text = report.to_string();
        assert!(text.starts_with("Flipping records for application: web (site: primary)\n"));
        assert!(text.ends_with("Flip operation completed successfully."));
    }

    #[test]
    fn application_list_nests_fqdns() {
        let list = ApplicationList(vec![AppListing {
            name: "web".into(),
            fqdns: vec!["a.example.com".into()],
        }]);
        assert_eq!(
            list.to_string(),
            "Available applications:\n  web\n    FQDN: a.example.com"
        );
    }
}
