mod cli;

use std::fs;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use cloud_report::MarkdownFile;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let job = cli.job();
    let paths = cli.mapping_paths();

    fs::create_dir_all(&cli.output_dir).wrap_err_with(|| {
        format!(
            "failed to create output directory {}",
            cli.output_dir.display()
        )
    })?;

    let sink = MarkdownFile::new(&cli.output_dir);
    cloud_report::generate_report(&job, &paths, &sink)
        .wrap_err_with(|| format!("failed to generate report for job `{}`", job.name))?;

    tracing::info!(path = %sink.path().display(), "state of cloud report complete");

    Ok(())
}
