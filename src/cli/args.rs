use std::path::PathBuf;

use clap::Parser;

use cloud_report::config::DEFAULT_MAPPINGS_DIR;
use cloud_report::{JobInfo, MappingPaths};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Job name, used as the report title
    #[arg(short = 'j', long, env = "JOB_NAME")]
    pub job_name: String,

    #[arg(short = 'i', long, env = "JOB_UNIQUE_ID")]
    pub job_unique_id: String,

    /// Directory holding the five mapping extracts
    #[arg(long, env = "MAPPINGS_DIR", default_value = DEFAULT_MAPPINGS_DIR)]
    pub mappings_dir: PathBuf,

    /// Directory `report.md` is written to
    #[arg(long, env = "REPORT_OUTPUT_DIR", default_value = "state_of_cloud")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub overrides: MappingOverrides,
}

/// Per-extract paths that take precedence over `--mappings-dir`.
#[derive(clap::Args, Debug, Default)]
pub struct MappingOverrides {
    #[arg(long, value_name = "PATH")]
    pub new_resources: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub cloud_actions: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub cost_estimates: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub security_scan: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub drift_differences: Option<PathBuf>,
}

impl Cli {
    pub fn job(&self) -> JobInfo {
        JobInfo::new(&self.job_name, &self.job_unique_id)
    }

    pub fn mapping_paths(&self) -> MappingPaths {
        let defaults = MappingPaths::in_dir(&self.mappings_dir);
        let overrides = &self.overrides;
        MappingPaths {
            new_resources: overrides
                .new_resources
                .clone()
                .unwrap_or(defaults.new_resources),
            cloud_actions: overrides
                .cloud_actions
                .clone()
                .unwrap_or(defaults.cloud_actions),
            cost_estimates: overrides
                .cost_estimates
                .clone()
                .unwrap_or(defaults.cost_estimates),
            security_scan: overrides
                .security_scan
                .clone()
                .unwrap_or(defaults.security_scan),
            drift_differences: overrides
                .drift_differences
                .clone()
                .unwrap_or(defaults.drift_differences),
        }
    }
}
