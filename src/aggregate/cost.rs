use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::ops::{Add, AddAssign};

use super::Outcome;
use super::new_resources::unique_resources;
use crate::mappings::{CostEstimate, Divisions, ResourceRecord};

/// A monthly cost in USD.
///
/// `unpriced` marks a total that includes at least one resource whose cost
/// is usage based or missing, so the amount is a lower bound rather than a
/// confirmed figure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthlyCost {
    pub amount: f64,
    pub unpriced: bool,
}

impl MonthlyCost {
    pub const UNPRICED: MonthlyCost = MonthlyCost {
        amount: 0.0,
        unpriced: true,
    };

    pub fn priced(amount: f64) -> Self {
        Self {
            amount,
            unpriced: false,
        }
    }

    fn of(estimate: &CostEstimate) -> Self {
        estimate
            .known_cost()
            .map_or(MonthlyCost::UNPRICED, MonthlyCost::priced)
    }
}

impl Add for MonthlyCost {
    type Output = MonthlyCost;

    fn add(self, other: MonthlyCost) -> MonthlyCost {
        MonthlyCost {
            amount: self.amount + other.amount,
            unpriced: self.unpriced || other.unpriced,
        }
    }
}

impl AddAssign for MonthlyCost {
    fn add_assign(&mut self, other: MonthlyCost) {
        *self = *self + other;
    }
}

impl fmt::Display for MonthlyCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.amount)?;
        if self.unpriced {
            f.write_str("*")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeCost {
    pub resource_type: String,
    pub resources: usize,
    pub cost: MonthlyCost,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DivisionTypeCost {
    pub division: String,
    pub resource_type: String,
    pub resources: usize,
    pub cost: MonthlyCost,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostSummary {
    /// Every estimated resource, grouped by type, most expensive first.
    pub by_type: Vec<TypeCost>,
    pub total: MonthlyCost,
    /// Only resources outside Terraform control.
    pub uncontrolled: Vec<DivisionTypeCost>,
}

impl CostSummary {
    pub fn uncontrolled_cost(&self, division: &str, resource_type: &str) -> MonthlyCost {
        self.uncontrolled
            .iter()
            .find(|row| row.division == division && row.resource_type == resource_type)
            .map_or(MonthlyCost::UNPRICED, |row| row.cost)
    }
}

type EstimateKey<'a> = (&'a str, &'a str, &'a str);

pub fn aggregate(
    estimates: &Divisions<Vec<CostEstimate>>,
    new_resources: &Divisions<Vec<ResourceRecord>>,
) -> Outcome<CostSummary> {
    if estimates.is_empty() {
        return Outcome::NotRun;
    }

    let priced = unique_estimates(estimates);
    if priced.is_empty() {
        return Outcome::RanEmpty;
    }

    let mut per_type: BTreeMap<&str, (usize, MonthlyCost)> = BTreeMap::new();
    let mut total = MonthlyCost::default();
    for ((_, resource_type, _), cost) in &priced {
        let entry = per_type.entry(*resource_type).or_default();
        entry.0 += 1;
        entry.1 += *cost;
        total += *cost;
    }

    let mut by_type: Vec<TypeCost> = per_type
        .into_iter()
        .map(|(resource_type, (resources, cost))| TypeCost {
            resource_type: resource_type.to_string(),
            resources,
            cost,
        })
        .collect();
    by_type.sort_by(|a, b| {
        b.cost
            .amount
            .total_cmp(&a.cost.amount)
            .then_with(|| a.resource_type.cmp(&b.resource_type))
    });

    let lookup: HashMap<EstimateKey, MonthlyCost> = priced.into_iter().collect();
    let uncontrolled = uncontrolled_costs(new_resources, lookup);

    tracing::debug!(
        types = by_type.len(),
        uncontrolled_rows = uncontrolled.len(),
        total = total.amount,
        "cost aggregation complete"
    );

    Outcome::RanWithData(CostSummary {
        by_type,
        total,
        uncontrolled,
    })
}

// NOTE: First estimate for a (division, type, name) wins; repeats are ignored.
fn unique_estimates(
    estimates: &Divisions<Vec<CostEstimate>>,
) -> Vec<(EstimateKey<'_>, MonthlyCost)> {
    let mut seen: HashSet<EstimateKey> = HashSet::new();
    let mut unique = Vec::new();

    for (division, records) in estimates.iter() {
        for estimate in records {
            let key = (
                division,
                estimate.resource_type.as_str(),
                estimate.resource_name.as_str(),
            );
            if seen.insert(key) {
                unique.push((key, MonthlyCost::of(estimate)));
            }
        }
    }

    unique
}

// NOTE: Each estimate prices at most one resource. Estimates carry no region,
// so a second resource matching the same key is left unpriced.
fn uncontrolled_costs<'a>(
    new_resources: &'a Divisions<Vec<ResourceRecord>>,
    mut unclaimed: HashMap<EstimateKey<'a>, MonthlyCost>,
) -> Vec<DivisionTypeCost> {
    let mut per_division: Vec<(&str, BTreeMap<&str, (usize, MonthlyCost)>)> = new_resources
        .keys()
        .map(|division| (division, BTreeMap::new()))
        .collect();

    for (division, record) in unique_resources(new_resources) {
        let key = (division, record.resource_type.as_str(), record.name.as_str());
        let cost = unclaimed.remove(&key).unwrap_or(MonthlyCost::UNPRICED);

        if let Some((_, types)) = per_division.iter_mut().find(|(d, _)| *d == division) {
            let entry = types.entry(record.resource_type.as_str()).or_default();
            entry.0 += 1;
            entry.1 += cost;
        }
    }

    per_division
        .into_iter()
        .flat_map(|(division, types)| {
            types
                .into_iter()
                .map(move |(resource_type, (resources, cost))| DivisionTypeCost {
                    division: division.to_string(),
                    resource_type: resource_type.to_string(),
                    resources,
                    cost,
                })
        })
        .collect()
}
