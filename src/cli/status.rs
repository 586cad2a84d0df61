use std::{path::Path, process};

use anupalan::{Status as ItemStatus, Urgency, classify};
use clap::Parser;
use tracing::instrument;

use super::{
    Workspace, display_date,
    terminal::{Colorize, is_narrow},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show obligation counts and the next deadlines")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root);

        if !workspace.profiles.is_onboarding_complete() {
            println!("No business profile found yet. Set one up with 'anu onboard'.");
            return Ok(());
        }

        let today = workspace.today;
        let items = workspace.registry.items();

        let completed = items
            .iter()
            .filter(|item| item.status == ItemStatus::Completed)
            .count();
        let overdue = items
            .iter()
            .filter(|item| {
                item.status == ItemStatus::Pending
                    && classify(item.due_date, today) == Urgency::Overdue
            })
            .count();
        let due_today = items
            .iter()
            .filter(|item| {
                item.status == ItemStatus::Pending
                    && classify(item.due_date, today) == Urgency::DueToday
            })
            .count();

        match self.output {
            OutputFormat::Json => Self::output_json(&workspace, completed, overdue, due_today)?,
            OutputFormat::Table => {
                if self.quiet {
                    Self::output_quiet(items.len(), completed, overdue, due_today);
                } else {
                    Self::output_table(&workspace, completed, overdue, due_today);
                }
            }
        }

        // Exit with a non-zero code when the checklist needs attention.
        if overdue > 0 {
            process::exit(2);
        }

        Ok(())
    }

    fn output_json(
        workspace: &Workspace,
        completed: usize,
        overdue: usize,
        due_today: usize,
    ) -> anyhow::Result<()> {
        use serde_json::json;

        let output = json!({
            "business": workspace.profiles.profile().name,
            "items": {
                "total": workspace.registry.items().len(),
                "completed": completed,
                "overdue": overdue,
                "due_today": due_today,
            },
            "loans": workspace.registry.loans().len(),
            "vehicles": workspace.registry.vehicles().len(),
            "upcoming": workspace.registry.upcoming(),
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(total: usize, completed: usize, overdue: usize, due_today: usize) {
        println!("total={total} completed={completed} overdue={overdue} due_today={due_today}");
    }

    fn output_table(
        workspace: &Workspace,
        completed: usize,
        overdue: usize,
        due_today: usize,
    ) {
        let items = workspace.registry.items();

        println!("Compliance status for {}", workspace.profiles.profile().name);
        println!("{}", "────────────────────────────────".dim());

        if is_narrow() {
            println!("Items: {}", items.len());
            println!("Completed: {completed}");
            println!("Overdue: {overdue}");
            println!("Due today: {due_today}");
        } else {
            println!("{:<12} {:<10} {:<9} Due today", "Checklist", "Completed", "Overdue");
            println!("{:<12} {completed:<10} {overdue:<9} {due_today}", items.len());
        }

        println!();

        if overdue == 0 {
            println!("Overdue items: {} ✅", "0".success());
        } else {
            println!("Overdue items: {} ⚠️", overdue.to_string().danger());
            println!("{}", "Run 'anu checklist' to see what needs attention.".dim());
        }

        let upcoming = workspace.registry.upcoming();
        if !upcoming.is_empty() {
            println!();
            println!("Next deadlines:");
            for deadline in upcoming {
                println!(
                    "  • {} — {}",
                    deadline.title,
                    display_date(deadline.due_date, &workspace.config)
                );
            }
        }
    }
}
