//! Reproducible "which ids are in the experiment" reports.

use serde::Serialize;
use tagseek_core::ExperimentConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRow {
    pub id: String,
    pub bucket: u32,
    pub in_experiment: bool,
}

pub fn audit_ids<I, S>(experiment: &ExperimentConfig, ids: I) -> Vec<AuditRow>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .map(|id| id.as_ref().trim().to_string())
        .filter(|id| !id.is_empty())
        .map(|id| {
            let bucket = experiment.bucket(&id);
            AuditRow {
                in_experiment: experiment.contains_bucket(bucket),
                bucket,
                id,
            }
        })
        .collect()
}
