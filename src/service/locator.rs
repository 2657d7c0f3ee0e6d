use snafu::ResultExt;

use crate::common::{
    is_same_domain, is_same_or_subdomain, LookupFailureSnafu, Provider, ResolvedRecord, Result, LOCATABLE_KINDS,
};

/// Finds the live A and CNAME records at or below `fqdn`.
///
/// The provider search is broad, so hits outside of `fqdn` are discarded. An
/// empty result means nothing matched; a failed search is a `LookupFailure`.
pub fn locate<P: Provider + ?Sized>(provider: &P, fqdn: &str) -> Result<Vec<ResolvedRecord>> {
    let hits = provider
        .search_zone(fqdn)
        .context(LookupFailureSnafu { fqdn })?;

    let records: Vec<ResolvedRecord> = hits
        .into_iter()
        .filter(|hit| LOCATABLE_KINDS.contains(&hit.kind.as_str()))
        .filter(|hit| is_same_or_subdomain(fqdn, &hit.domain))
        .map(ResolvedRecord::from)
        .collect();

    tracing::debug!(fqdn, matches = records.len(), "Located records");
    Ok(records)
}

/// Picks the zone to flip `fqdn` in: an exact domain match wins over a
/// subdomain match, then the lowest zone name.
pub fn select_zone<'a>(fqdn: &str, records: &'a [ResolvedRecord]) -> Option<&'a str> {
    records
        .iter()
        .map(|r| (!is_same_domain(fqdn, &r.domain), r.zone.as_str()))
        .min()
        .map(|(_, zone)| zone)
}
