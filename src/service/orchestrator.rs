use snafu::OptionExt;

use crate::common::{
    is_same_domain, ApplicationNotFoundSnafu, Error, NoMatchingRecordSnafu, Provider,
    ResolvedRecord, Result,
};
use crate::definitions::{split_values, ConfigModel, FlipRecord, Site};

use super::executor::flip;
use super::locator::{locate, select_zone};
use super::models::{
    AppDetail, AppListing, ApplicationList, FlipOutcome, FlipReport, FlipStatus, RecordDetail,
};

/// Runs checks and flips against a DNS provider.
///
/// Records are processed one at a time. A failure on one record is captured
/// in its outcome and never stops the rest of a batch.
pub struct Flipper<P: Provider> {
    provider: P,
}

impl<P: Provider> Flipper<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Live records whose domain is exactly `fqdn`.
    pub fn check(&self, fqdn: &str) -> Result<Vec<ResolvedRecord>> {
        let records: Vec<ResolvedRecord> = locate(&self.provider, fqdn)?
            .into_iter()
            .filter(|r| is_same_domain(fqdn, &r.domain))
            .collect();

        tracing::info!(fqdn, matches = records.len(), "Check completed");
        Ok(records)
    }

    /// Flips one record in a zone the caller already knows.
    pub fn flip_one(&self, fqdn: &str, kind: &str, zone: &str, values: &[String]) -> Result<()> {
        flip(&self.provider, fqdn, zone, kind, values)
    }

    /// Flips every record declared for `app` to the values of `site`.
    pub fn flip_app(&self, model: &ConfigModel, app: &str, site: Site) -> Result<FlipReport> {
        let app_config = model.get(app).context(ApplicationNotFoundSnafu { app })?;

        tracing::info!(
            app,
            site = %site,
            records = app_config.records.len(),
            "Flipping records for application"
        );

        let outcomes: Vec<FlipOutcome> = app_config
            .records
            .iter()
            .map(|record| self.flip_declared(record, site))
            .collect();

        let report = FlipReport {
            app: app.to_string(),
            site,
            outcomes,
        };

        tracing::info!(
            app,
            applied = report.count(FlipStatus::Applied),
            skipped = report.count(FlipStatus::SkippedNoMatch),
            errors = report.count(FlipStatus::Error),
            "Flip operation finished"
        );
        Ok(report)
    }

    fn flip_declared(&self, record: &FlipRecord, site: Site) -> FlipOutcome {
        let value = record.value_for(site);
        tracing::info!(
            fqdn = record.fqdn.as_str(),
            kind = record.kind.as_str(),
            value,
            "Flipping record"
        );

        match self.flip_located(record, site) {
            Ok(zone) => {
                tracing::debug!(fqdn = record.fqdn.as_str(), zone = zone.as_str(), "Applied");
                FlipOutcome::new(record, FlipStatus::Applied, value.to_string())
            }
            Err(err @ Error::NoMatchingRecord { .. }) => {
                tracing::warn!(fqdn = record.fqdn.as_str(), "No matching records, skipping");
                FlipOutcome::new(record, FlipStatus::SkippedNoMatch, err.to_string())
            }
            Err(err) => {
                tracing::error!(
                    fqdn = record.fqdn.as_str(),
                    error = %err,
                    "Flip failed"
                );
                FlipOutcome::new(record, FlipStatus::Error, err.to_string())
            }
        }
    }

    /// Locates the record, flips it and returns the zone it was flipped in.
    fn flip_located(&self, record: &FlipRecord, site: Site) -> Result<String> {
        let resolved = locate(&self.provider, &record.fqdn)?;
        let zone = select_zone(&record.fqdn, &resolved)
            .context(NoMatchingRecordSnafu {
                fqdn: record.fqdn.as_str(),
            })?
            .to_string();

        flip(
            &self.provider,
            &record.fqdn,
            &zone,
            &record.kind,
            &split_values(record.value_for(site)),
        )?;
        Ok(zone)
    }

    /// Declared records of `app` with a live lookup for each FQDN.
    pub fn list_application_detail(&self, model: &ConfigModel, app: &str) -> Result<AppDetail> {
        let app_config = model.get(app).context(ApplicationNotFoundSnafu { app })?;

        let records = app_config
            .records
            .iter()
            .map(|record| RecordDetail {
                record: record.clone(),
                live: self.check(&record.fqdn),
            })
            .collect();

        Ok(AppDetail {
            name: app_config.name.clone(),
            records,
        })
    }
}

/// Application names and their declared FQDNs. Makes no lookups.
pub fn list_applications(model: &ConfigModel) -> ApplicationList {
    ApplicationList(
        model
            .apps()
            .map(|app| AppListing {
                name: app.name.clone(),
                fqdns: app.records.iter().map(|r| r.fqdn.clone()).collect(),
            })
            .collect(),
    )
}
