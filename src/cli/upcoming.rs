use std::path::Path;

use anupalan::DeadlineSource;
use clap::Parser;
use tracing::instrument;

use super::{Workspace, display_date, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show the merged upcoming-deadline feed")]
pub struct Upcoming {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Upcoming {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root);
        let upcoming = workspace.registry.upcoming();

        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(upcoming)?);
            }
            OutputFormat::Table => {
                if upcoming.is_empty() {
                    println!("No upcoming deadlines. 🎉");
                    return Ok(());
                }

                for deadline in upcoming {
                    let kind = match deadline.source {
                        DeadlineSource::Compliance(_) => "compliance",
                        DeadlineSource::Loan(_) => "loan",
                        DeadlineSource::Vehicle(_) => "vehicle",
                    };
                    println!(
                        "{} — {} {}",
                        display_date(deadline.due_date, &workspace.config),
                        deadline.title,
                        format!("({kind})").dim()
                    );
                }
            }
        }

        Ok(())
    }
}
