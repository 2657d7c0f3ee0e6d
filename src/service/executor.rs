use snafu::prelude::*;

use crate::common::{Answer, EmptyAnswerSetSnafu, FlipSnafu, Provider, Result};

/// Replaces the answer set of the `(fqdn, kind, zone)` record with `values`,
/// one answer per value, in order. Prior answers are discarded.
pub fn flip<P: Provider + ?Sized>(
    provider: &P,
    fqdn: &str,
    zone: &str,
    kind: &str,
    values: &[String],
) -> Result<()> {
    ensure!(!values.is_empty(), EmptyAnswerSetSnafu { fqdn });

    let record = provider
        .load_record(fqdn, kind, zone)
        .context(FlipSnafu { fqdn, kind })?;

    let answers: Vec<Answer> = values.iter().map(|v| Answer::from(v.as_str())).collect();

    tracing::info!(
        fqdn,
        zone,
        kind,
        previous = record.answers.len(),
        answers = answers.len(),
        "Replacing answers",
    );

    provider
        .update_record(&record, answers)
        .context(FlipSnafu { fqdn, kind })?;

    tracing::info!(fqdn, zone, kind, values = values.join(",").as_str(), "Flipped record");
    Ok(())
}
