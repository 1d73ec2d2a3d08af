use std::collections::{BTreeMap, HashSet};

use super::Outcome;
use crate::mappings::{ActionKind, ActorAction, Keyed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSummary {
    pub actor: String,
    pub created: usize,
    pub modified: usize,
}

impl ActorSummary {
    pub fn total(&self) -> usize {
        self.created + self.modified
    }
}

/// Counts out-of-band changes per cloud actor.
///
/// An (actor, resource, action) triple counts once no matter how often it
/// recurs. Actors are ordered by total changes, then by name.
pub fn aggregate(actions: &Keyed<Vec<ActorAction>>) -> Outcome<Vec<ActorSummary>> {
    let mut seen: HashSet<(&str, &str, ActionKind)> = HashSet::new();
    let mut per_actor: BTreeMap<&str, ActorSummary> = BTreeMap::new();

    for (resource, resource_actions) in actions.iter() {
        for action in resource_actions {
            if !seen.insert((action.actor.as_str(), resource, action.action)) {
                continue;
            }

            let summary = per_actor
                .entry(action.actor.as_str())
                .or_insert_with(|| ActorSummary {
                    actor: action.actor.clone(),
                    created: 0,
                    modified: 0,
                });
            match action.action {
                ActionKind::Creation => summary.created += 1,
                ActionKind::Modification => summary.modified += 1,
            }
        }
    }

    if per_actor.is_empty() {
        return Outcome::RanEmpty;
    }

    let mut summaries: Vec<ActorSummary> = per_actor.into_values().collect();
    summaries.sort_by(|a, b| {
        b.total()
            .cmp(&a.total())
            .then_with(|| a.actor.cmp(&b.actor))
    });

    tracing::debug!(actors = summaries.len(), "cloud actor actions counted");

    Outcome::RanWithData(summaries)
}
