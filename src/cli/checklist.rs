use std::path::Path;

use anupalan::{Status, classify};
use clap::Parser;
use tracing::instrument;

use super::{
    Workspace, display_date,
    terminal::{Colorize, badge, is_narrow},
};

#[derive(Debug, Parser)]
#[command(about = "List the statutory compliance checklist")]
pub struct Checklist {
    /// Only show items that are still pending
    #[arg(long)]
    pending: bool,

    /// Only show items in the given category
    #[arg(long, value_name = "CATEGORY")]
    category: Option<String>,

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

impl Checklist {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root);

        if workspace.registry.items().is_empty() {
            println!(
                "No compliance items to show. Complete onboarding with 'anu onboard' first."
            );
            return Ok(());
        }

        let items: Vec<_> = workspace
            .registry
            .items()
            .iter()
            .filter(|item| !self.pending || item.status == Status::Pending)
            .filter(|item| {
                self.category
                    .as_deref()
                    .is_none_or(|category| item.category.eq_ignore_ascii_case(category))
            })
            .collect();

        match self.output {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
            OutputFormat::Table => {
                if items.is_empty() {
                    println!("Nothing matches the given filters.");
                    return Ok(());
                }

                let narrow = is_narrow();
                for item in items {
                    let label = badge(item.status, classify(item.due_date, workspace.today));
                    let due = display_date(item.due_date, &workspace.config);
                    if narrow {
                        println!("[{label}] {}", item.title);
                        println!("    {} · due {due}", item.id.to_string().dim());
                    } else {
                        println!(
                            "[{label}] {:<35} {:<22} due {due}",
                            item.title,
                            item.id.to_string().dim()
                        );
                    }
                }
            }
        }

        Ok(())
    }
}
