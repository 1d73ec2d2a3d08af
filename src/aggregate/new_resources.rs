use std::collections::{BTreeMap, HashSet};

use super::Outcome;
use crate::mappings::{Divisions, ResourceRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionTypeCount {
    pub division: String,
    pub resource_type: String,
    pub count: usize,
}

/// Where the generated import code for one resource was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDocument {
    pub division: String,
    pub resource_type: String,
    pub name: String,
    pub document: String,
}

/// Counts of resources outside Terraform control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBreakdown {
    /// Every division in the extract, in source order, including empty ones.
    pub by_division: Vec<CountRow>,
    /// Sorted by count, most common first.
    pub by_type: Vec<CountRow>,
    pub by_division_and_type: Vec<DivisionTypeCount>,
    /// Resources that reference an import document, in source order.
    pub documents: Vec<ImportDocument>,
    pub total: usize,
}

/// Resources with duplicates across divisions removed.
///
/// A resource is identified by provider, type, name and region; the first
/// division it appears under owns it.
pub fn unique_resources(
    extract: &Divisions<Vec<ResourceRecord>>,
) -> Vec<(&str, &ResourceRecord)> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for (division, records) in extract.iter() {
        for record in records {
            let identity = (
                record.provider(),
                record.resource_type.as_str(),
                record.name.as_str(),
                record.region.as_deref(),
            );
            if seen.insert(identity) {
                unique.push((division, record));
            } else {
                tracing::debug!(
                    division,
                    resource_type = %record.resource_type,
                    name = %record.name,
                    "skipping resource already counted under another division"
                );
            }
        }
    }

    unique
}

pub fn aggregate(extract: &Divisions<Vec<ResourceRecord>>) -> Outcome<ResourceBreakdown> {
    let unique = unique_resources(extract);
    if unique.is_empty() {
        return Outcome::RanEmpty;
    }

    let mut per_division: Vec<(&str, BTreeMap<&str, usize>)> =
        extract.keys().map(|division| (division, BTreeMap::new())).collect();
    let mut per_type: BTreeMap<&str, usize> = BTreeMap::new();

    for (division, record) in &unique {
        if let Some((_, types)) = per_division.iter_mut().find(|(d, _)| d == division) {
            *types.entry(record.resource_type.as_str()).or_default() += 1;
        }
        *per_type.entry(record.resource_type.as_str()).or_default() += 1;
    }

    let by_division = per_division
        .iter()
        .map(|(division, types)| CountRow {
            key: division.to_string(),
            count: types.values().sum(),
        })
        .collect();

    let mut by_type: Vec<CountRow> = per_type
        .into_iter()
        .map(|(resource_type, count)| CountRow {
            key: resource_type.to_string(),
            count,
        })
        .collect();
    by_type.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));

    let by_division_and_type = per_division
        .iter()
        .flat_map(|(division, types)| {
            types.iter().map(move |(resource_type, count)| DivisionTypeCount {
                division: division.to_string(),
                resource_type: resource_type.to_string(),
                count: *count,
            })
        })
        .collect();

    let documents = unique
        .iter()
        .filter_map(|(division, record)| {
            record.document.as_ref().map(|document| ImportDocument {
                division: division.to_string(),
                resource_type: record.resource_type.clone(),
                name: record.name.clone(),
                document: document.clone(),
            })
        })
        .collect();

    Outcome::RanWithData(ResourceBreakdown {
        by_division,
        by_type,
        by_division_and_type,
        documents,
        total: unique.len(),
    })
}
