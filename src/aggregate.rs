pub mod actors;
pub mod cost;
pub mod drift;
pub mod new_resources;
pub mod security;

use crate::mappings::Mappings;

/// Whether a feature ran, and whether it produced anything to report.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    NotRun,
    RanEmpty,
    RanWithData(T),
}

impl<T> Outcome<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::RanWithData(data) => Some(data),
            Outcome::NotRun | Outcome::RanEmpty => None,
        }
    }

    pub fn has_run(&self) -> bool {
        !matches!(self, Outcome::NotRun)
    }
}

/// Every aggregator's result for one job.
#[derive(Debug, Clone, PartialEq)]
pub struct Summaries {
    pub security: Outcome<Vec<security::DivisionFindings>>,
    pub cost: Outcome<cost::CostSummary>,
    pub new_resources: Outcome<new_resources::ResourceBreakdown>,
    pub drift: Outcome<Vec<drift::DriftedResource>>,
    pub actors: Outcome<Vec<actors::ActorSummary>>,
}

impl Summaries {
    pub fn from_mappings(mappings: &Mappings) -> Self {
        let summaries = Self {
            security: security::aggregate(&mappings.security_scan),
            cost: cost::aggregate(&mappings.cost_estimates, &mappings.new_resources),
            new_resources: new_resources::aggregate(&mappings.new_resources),
            drift: drift::aggregate(&mappings.drift_differences),
            actors: actors::aggregate(&mappings.cloud_actions),
        };

        tracing::info!(
            security_ran = summaries.security.has_run(),
            cost_ran = summaries.cost.has_run(),
            new_resources = summaries.new_resources.data().map_or(0, |b| b.total),
            drifted_resources = summaries.drift.data().map_or(0, Vec::len),
            actors = summaries.actors.data().map_or(0, Vec::len),
            "aggregation complete"
        );

        summaries
    }
}
