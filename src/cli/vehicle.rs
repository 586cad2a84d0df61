use std::path::Path;

use anupalan::domain::vehicle::NewVehicle;
use chrono::NaiveDate;
use clap::Parser;
use tracing::instrument;
use uuid::Uuid;

use super::{Workspace, display_date, terminal::Colorize};

#[derive(Debug, Parser)]
pub enum Vehicle {
    /// Add a vehicle renewal schedule
    Add(Add),

    /// List vehicle renewal schedules
    List(List),

    /// Remove a vehicle renewal schedule
    Remove(Remove),

    /// Record a completed registration renewal
    Renewed(Renewed),
}

impl Vehicle {
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Add(command) => command.run(root),
            Self::List(command) => command.run(root),
            Self::Remove(command) => command.run(root),
            Self::Renewed(command) => command.run(root),
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Add a vehicle renewal schedule")]
pub struct Add {
    /// Name the vehicle is known by
    name: String,

    /// Plate or bluebook registration number
    #[arg(long)]
    number: String,

    /// When the registration was last renewed (YYYY-MM-DD)
    #[arg(long)]
    last_renewed: NaiveDate,

    /// Next renewal date; defaults to one year after the last renewal
    #[arg(long, value_name = "DATE")]
    next: Option<NaiveDate>,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root);

        let id = workspace.registry.add_vehicle(
            NewVehicle {
                vehicle_name: self.name.clone(),
                registration_number: self.number,
                last_renewal_date: self.last_renewed,
                next_renewal_date: self.next,
            },
            workspace.today,
        )?;

        println!("{}", format!("✅ Added vehicle '{}' ({id})", self.name).success());
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "List vehicle renewal schedules")]
pub struct List {}

impl List {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root);
        let vehicles = workspace.registry.vehicles();

        if vehicles.is_empty() {
            println!("No vehicle renewal schedules yet. Add one with 'anu vehicle add'.");
            return Ok(());
        }

        for vehicle in vehicles {
            println!(
                "{} ({}) · next renewal {}",
                vehicle.vehicle_name,
                vehicle.registration_number,
                display_date(vehicle.next_renewal_date, &workspace.config)
            );
            println!("    {}", vehicle.id.to_string().dim());
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "Remove a vehicle renewal schedule")]
pub struct Remove {
    /// The vehicle's id, as shown by 'anu vehicle list'
    id: Uuid,
}

impl Remove {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root);
        let known = workspace
            .registry
            .vehicles()
            .iter()
            .any(|vehicle| vehicle.id == self.id);
        workspace.registry.remove_vehicle(self.id, workspace.today)?;

        if known {
            println!("{}", "✅ Removed vehicle".success());
        } else {
            println!("No vehicle with id {}; nothing changed.", self.id);
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "Record a completed registration renewal")]
pub struct Renewed {
    /// The vehicle's id, as shown by 'anu vehicle list'
    id: Uuid,
}

impl Renewed {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root);
        workspace.registry.complete_vehicle(self.id, workspace.today)?;

        match workspace
            .registry
            .vehicles()
            .iter()
            .find(|vehicle| vehicle.id == self.id)
        {
            Some(vehicle) => println!(
                "{}",
                format!(
                    "✅ Renewal recorded; next due {}",
                    display_date(vehicle.next_renewal_date, &workspace.config)
                )
                .success()
            ),
            None => println!("No vehicle with id {}; nothing changed.", self.id),
        }
        Ok(())
    }
}
