use chrono::{DateTime, Utc};

use super::{Block, Document, Section, Table};
use crate::aggregate::actors::ActorSummary;
use crate::aggregate::cost::{CostSummary, MonthlyCost};
use crate::aggregate::drift::DriftedResource;
use crate::aggregate::new_resources::{ImportDocument, ResourceBreakdown};
use crate::aggregate::security::DivisionFindings;
use crate::aggregate::{Outcome, Summaries};
use crate::config::JobInfo;

pub mod headings {
    pub const INTRODUCTION: &str = "How to Read this Report";
    pub const SECURITY: &str = "Identified Security Risks";
    pub const COSTS: &str = "Calculable Cloud Costs (Monthly)";
    pub const UNCONTROLLED: &str = "Resources Outside of Terraform Control";
    pub const BY_DIVISION: &str = "By Division";
    pub const BY_RESOURCE_TYPE: &str = "By Resource Type";
    pub const BY_DIVISION_AND_TYPE: &str = "By Division and Resource Type";
    pub const IMPORT_DOCUMENTS: &str = "Generated Import Documents";
    pub const DRIFT: &str = "Drifted Resources Managed By Terraform";
    pub const ROOT_CAUSES: &str = "Root Causes of Drift";
    pub const CLOUD_ACTORS: &str = "Cloud Actors Causing Changes";
    pub const DISCLAIMER: &str = "Disclaimer";
}

pub mod placeholders {
    pub const SECURITY_NOT_RUN: &str = "Security scan not run.";
    pub const COST_NOT_RUN: &str = "Cost estimation not run.";
    pub const COST_EMPTY: &str = "No calculable costs found.";
    pub const NO_NEW_RESOURCES: &str = "No new resources found!";
    pub const NO_IMPORT_DOCUMENTS: &str = "No import documents were referenced.";
    pub const NO_DRIFT: &str = "No controlled resources have drifted!";
    pub const NO_ACTORS: &str = "No identified Cloud Actor actions.";
}

const USAGE_COST_NOTE: &str = "*Indicates that a resource's cost is usage based or could not be \
    priced. Since usage is not inferred, these costs may be material although shown as $0.00 here.";

const COVERAGE_NOTE: &str = "This report presents the state of your cloud at a point in time, as \
    best as could be determined. Not every resource type is scanned for every cloud provider.";

/// Builds every section of the report in its fixed order.
///
/// Headings never depend on which inputs were present; a feature without
/// data gets a placeholder sentence in place of its table.
pub fn compose(job: &JobInfo, summaries: &Summaries, generated_at: DateTime<Utc>) -> Document {
    let mut sections = vec![introduction(job)];
    sections.extend(security(&summaries.security));
    sections.push(costs(&summaries.cost));
    sections.extend(uncontrolled(&summaries.new_resources, &summaries.cost));
    sections.extend(drift(&summaries.drift));
    sections.extend(root_causes(&summaries.actors));
    sections.push(disclaimer(generated_at));

    Document {
        title: job.report_title(),
        sections,
    }
}

fn introduction(job: &JobInfo) -> Section {
    Section::new(headings::INTRODUCTION, 1)
        .with(Block::Paragraph(format!(
            "Your job, titled {}, has run. Of the resources the job scans, at least one was \
             identified as drifted or outside of Terraform control. Terraform code and the \
             matching import statements needed to bring these resources under Terraform control \
             have been generated separately; below is a summary of the gaps identified in your \
             current IaC posture.",
            job.name
        )))
        .with(Block::Paragraph(format!("Job ID: `{}`", job.unique_id)))
}

fn security(outcome: &Outcome<Vec<DivisionFindings>>) -> Vec<Section> {
    let heading = Section::new(headings::SECURITY, 1);
    let divisions = match outcome {
        Outcome::RanWithData(divisions) => divisions,
        Outcome::NotRun | Outcome::RanEmpty => {
            return vec![heading.with(Block::Placeholder(
                placeholders::SECURITY_NOT_RUN.to_string(),
            ))];
        }
    };

    let mut sections = vec![heading];
    for division in divisions {
        let mut table = Table::new(["Severity", "Rule", "Resource", "Description", "Resolution"]);
        for finding in &division.findings {
            table.push_row(vec![
                finding.severity.to_string(),
                finding.rule_id.clone(),
                finding.resource.clone(),
                finding.description.clone(),
                finding.resolution.clone().unwrap_or_else(|| "-".to_string()),
            ]);
        }
        sections.push(Section::new(division.division.as_str(), 2).with(Block::Table(table)));
    }
    sections
}

fn costs(outcome: &Outcome<CostSummary>) -> Section {
    let heading = Section::new(headings::COSTS, 1);
    let summary = match outcome {
        Outcome::RanWithData(summary) => summary,
        Outcome::RanEmpty => {
            return heading.with(Block::Placeholder(placeholders::COST_EMPTY.to_string()));
        }
        Outcome::NotRun => {
            return heading.with(Block::Placeholder(placeholders::COST_NOT_RUN.to_string()));
        }
    };

    let mut table = Table::new(["Resource Type", "Resources", "Monthly Cost"]);
    for row in &summary.by_type {
        table.push_row(vec![
            row.resource_type.clone(),
            row.resources.to_string(),
            row.cost.to_string(),
        ]);
    }
    let resources: usize = summary.by_type.iter().map(|row| row.resources).sum();
    table.push_row(vec![
        "**Total**".to_string(),
        resources.to_string(),
        summary.total.to_string(),
    ]);

    heading.with(Block::Table(table))
}

fn uncontrolled(
    outcome: &Outcome<ResourceBreakdown>,
    cost: &Outcome<CostSummary>,
) -> Vec<Section> {
    let heading = Section::new(headings::UNCONTROLLED, 1);
    let breakdown = match outcome {
        Outcome::RanWithData(breakdown) => breakdown,
        Outcome::NotRun | Outcome::RanEmpty => {
            return vec![heading.with(Block::Placeholder(
                placeholders::NO_NEW_RESOURCES.to_string(),
            ))];
        }
    };

    // Cost columns only appear when cost estimation ran.
    let show_cost = cost.has_run();
    let pair_cost = |division: &str, resource_type: &str| -> MonthlyCost {
        match cost {
            Outcome::RanWithData(summary) => summary.uncontrolled_cost(division, resource_type),
            Outcome::NotRun | Outcome::RanEmpty => MonthlyCost::UNPRICED,
        }
    };
    let sum_where = |keep: &dyn Fn(&str, &str) -> bool| -> MonthlyCost {
        breakdown
            .by_division_and_type
            .iter()
            .filter(|row| keep(row.division.as_str(), row.resource_type.as_str()))
            .map(|row| pair_cost(row.division.as_str(), row.resource_type.as_str()))
            .fold(MonthlyCost::default(), |acc, cost| acc + cost)
    };
    let with_cost = |mut headers: Vec<&str>| {
        if show_cost {
            headers.push("Monthly Cost");
        }
        Table::new(headers)
    };

    let mut by_division = with_cost(vec!["Division", "Resources"]);
    for row in &breakdown.by_division {
        let mut cells = vec![row.key.clone(), row.count.to_string()];
        if show_cost {
            cells.push(sum_where(&|division, _| division == row.key).to_string());
        }
        by_division.push_row(cells);
    }

    let mut by_type = with_cost(vec!["Resource Type", "Resources"]);
    for row in &breakdown.by_type {
        let mut cells = vec![row.key.clone(), row.count.to_string()];
        if show_cost {
            cells.push(sum_where(&|_, resource_type| resource_type == row.key).to_string());
        }
        by_type.push_row(cells);
    }

    let mut by_division_and_type = with_cost(vec!["Division", "Resource Type", "Resources"]);
    for row in &breakdown.by_division_and_type {
        let mut cells = vec![
            row.division.clone(),
            row.resource_type.clone(),
            row.count.to_string(),
        ];
        if show_cost {
            cells.push(pair_cost(row.division.as_str(), row.resource_type.as_str()).to_string());
        }
        by_division_and_type.push_row(cells);
    }

    vec![
        heading.with(Block::Paragraph(format!(
            "{} resource(s) were found outside of Terraform control. Terraform code and import \
             statements have been generated for each of them.",
            breakdown.total
        ))),
        Section::new(headings::BY_DIVISION, 2).with(Block::Table(by_division)),
        Section::new(headings::BY_RESOURCE_TYPE, 2).with(Block::Table(by_type)),
        Section::new(headings::BY_DIVISION_AND_TYPE, 2).with(Block::Table(by_division_and_type)),
        import_documents(&breakdown.documents),
    ]
}

fn import_documents(documents: &[ImportDocument]) -> Section {
    let section = Section::new(headings::IMPORT_DOCUMENTS, 2);
    if documents.is_empty() {
        return section.with(Block::Placeholder(
            placeholders::NO_IMPORT_DOCUMENTS.to_string(),
        ));
    }

    let mut table = Table::new(["Division", "Resource Type", "Name", "Document"]);
    for entry in documents {
        table.push_row(vec![
            entry.division.clone(),
            entry.resource_type.clone(),
            entry.name.clone(),
            format!("[{0}]({0})", entry.document),
        ]);
    }
    section.with(Block::Table(table))
}

fn drift(outcome: &Outcome<Vec<DriftedResource>>) -> Vec<Section> {
    let heading = Section::new(headings::DRIFT, 1);
    let resources = match outcome {
        Outcome::RanWithData(resources) => resources,
        Outcome::NotRun | Outcome::RanEmpty => {
            return vec![heading.with(Block::Placeholder(placeholders::NO_DRIFT.to_string()))];
        }
    };

    let mut sections = vec![heading.with(Block::Paragraph(format!(
        "{} Terraform-managed resource(s) differ from their declared configuration.",
        resources.len()
    )))];

    for resource in resources {
        let mut section = Section::new(resource.path.as_str(), 2);
        if let Some(state_file) = &resource.state_file {
            section = section.with(Block::Paragraph(format!("State file: `{state_file}`")));
        }

        let mut table = Table::new([
            "Attribute",
            "Terraform Value",
            "Cloud Value",
            "Recent Actor",
            "Recent Action Timestamp",
        ]);
        for difference in &resource.differences {
            table.push_row(vec![
                difference.attribute.clone(),
                difference.terraform_value.clone(),
                difference.cloud_value.clone(),
                difference.recent_actor.clone().unwrap_or_else(|| "-".to_string()),
                difference
                    .recent_action_timestamp
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        sections.push(section.with(Block::Table(table)));
    }
    sections
}

fn root_causes(outcome: &Outcome<Vec<ActorSummary>>) -> Vec<Section> {
    let heading = Section::new(headings::ROOT_CAUSES, 1);
    let actors = Section::new(headings::CLOUD_ACTORS, 2);

    let actors = match outcome {
        Outcome::RanWithData(summaries) => {
            let mut table = Table::new([
                "Cloud Actor",
                "Resources Created",
                "Resources Modified",
                "Total",
            ]);
            for summary in summaries {
                table.push_row(vec![
                    summary.actor.clone(),
                    summary.created.to_string(),
                    summary.modified.to_string(),
                    summary.total().to_string(),
                ]);
            }
            actors.with(Block::Table(table))
        }
        Outcome::NotRun | Outcome::RanEmpty => {
            actors.with(Block::Placeholder(placeholders::NO_ACTORS.to_string()))
        }
    };

    vec![heading, actors]
}

fn disclaimer(generated_at: DateTime<Utc>) -> Section {
    Section::new(headings::DISCLAIMER, 4)
        .with(Block::Paragraph(USAGE_COST_NOTE.to_string()))
        .with(Block::Paragraph(COVERAGE_NOTE.to_string()))
        .with(Block::Paragraph(format!(
            "Created at {}",
            generated_at.format("%H:%M UTC on %Y-%m-%d")
        )))
}
