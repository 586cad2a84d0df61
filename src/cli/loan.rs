use std::path::Path;

use anupalan::{Frequency, domain::loan::NewLoan};
use chrono::NaiveDate;
use clap::Parser;
use tracing::instrument;
use uuid::Uuid;

use super::{Workspace, display_date, terminal::Colorize};

#[derive(Debug, Parser)]
pub enum Loan {
    /// Add a loan repayment schedule
    Add(Add),

    /// List loan repayment schedules
    List(List),

    /// Remove a loan repayment schedule
    Remove(Remove),

    /// Record the current instalment as paid
    Paid(Paid),
}

impl Loan {
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Add(command) => command.run(root),
            Self::List(command) => command.run(root),
            Self::Remove(command) => command.run(root),
            Self::Paid(command) => command.run(root),
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Add a loan repayment schedule")]
pub struct Add {
    /// Name the loan is known by
    name: String,

    /// When the loan was taken out (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Instalment amount in rupees
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    amount: u64,

    /// Repayment cadence (monthly, quarterly, half-yearly, annually)
    #[arg(long)]
    frequency: Frequency,

    /// First due date; defaults to one period after the start
    #[arg(long, value_name = "DATE")]
    due: Option<NaiveDate>,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root);

        let id = workspace.registry.add_loan(
            NewLoan {
                loan_name: self.name.clone(),
                start_date: self.start,
                amount: self.amount,
                frequency: self.frequency,
                first_due_date: self.due,
            },
            workspace.today,
        )?;

        println!("{}", format!("✅ Added loan '{}' ({id})", self.name).success());
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "List loan repayment schedules")]
pub struct List {}

impl List {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root);
        let loans = workspace.registry.loans();

        if loans.is_empty() {
            println!("No loan repayment schedules yet. Add one with 'anu loan add'.");
            return Ok(());
        }

        for loan in loans {
            println!(
                "{} — NPR {} {} · next due {}",
                loan.loan_name,
                loan.amount,
                loan.frequency,
                display_date(loan.next_due_date, &workspace.config)
            );
            println!("    {}", loan.id.to_string().dim());
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "Remove a loan repayment schedule")]
pub struct Remove {
    /// The loan's id, as shown by 'anu loan list'
    id: Uuid,
}

impl Remove {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root);
        let known = workspace.registry.loans().iter().any(|loan| loan.id == self.id);
        workspace.registry.remove_loan(self.id, workspace.today)?;

        if known {
            println!("{}", "✅ Removed loan".success());
        } else {
            println!("No loan with id {}; nothing changed.", self.id);
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "Record the current instalment as paid")]
pub struct Paid {
    /// The loan's id, as shown by 'anu loan list'
    id: Uuid,
}

impl Paid {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root);
        workspace.registry.complete_loan(self.id, workspace.today)?;

        match workspace.registry.loans().iter().find(|loan| loan.id == self.id) {
            Some(loan) => println!(
                "{}",
                format!(
                    "✅ Instalment recorded; next due {}",
                    display_date(loan.next_due_date, &workspace.config)
                )
                .success()
            ),
            None => println!("No loan with id {}; nothing changed.", self.id),
        }
        Ok(())
    }
}
