use std::path::Path;

use anupalan::{
    BusinessType, calendar,
    domain::profile::{validate_email, validate_phone},
};
use chrono::NaiveDate;
use clap::Parser;
use tracing::instrument;

use super::{Workspace, display_date, terminal::Colorize};

#[derive(Debug, Parser)]
pub enum Profile {
    /// Show the business profile
    Show(Show),

    /// Change one profile field
    Set(Set),
}

impl Profile {
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Show(command) => command.run(root),
            Self::Set(command) => command.run(root),
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Show the business profile")]
pub struct Show {}

impl Show {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root);
        let profile = workspace.profiles.profile();

        if profile.name.is_empty() {
            println!("No business profile yet. Set one up with 'anu onboard'.");
            return Ok(());
        }

        println!("{}", profile.name);
        println!("{}", "────────────────────────────────".dim());
        println!("Type:         {}", profile.business_type);
        println!("Email:        {}", profile.email);
        println!("Phone:        {}", profile.phone);
        match profile.registration_date {
            Some(date) => {
                let rendered = display_date(date, &workspace.config);
                match calendar::to_bs(date) {
                    Ok(bs) => println!("Registered:   {}", bs.format_with_gregorian(date)),
                    Err(_) => println!("Registered:   {rendered}"),
                }
            }
            None => println!("Registered:   {}", "not set".dim()),
        }
        println!("Turnover:     NPR {}", profile.turnover);
        println!("VAT:          {}", if profile.has_vat { "registered" } else { "not registered" });
        Ok(())
    }
}

/// The profile fields that can be changed from the command line.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Field {
    /// Business name
    Name,
    /// Contact email
    Email,
    /// Contact phone number
    Phone,
    /// Business type
    Type,
    /// Company registration date (Gregorian, YYYY-MM-DD)
    RegistrationDate,
    /// Annual turnover in rupees
    Turnover,
    /// VAT registration status (true/false)
    Vat,
}

#[derive(Debug, Parser)]
#[command(about = "Change one profile field")]
pub struct Set {
    /// Which field to change
    field: Field,

    /// The new value
    value: String,
}

impl Set {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root);

        match self.field {
            Field::Name => {
                workspace.profiles.update(|profile| profile.name = self.value.clone())?;
            }
            Field::Email => {
                validate_email(&self.value)?;
                workspace.profiles.update(|profile| profile.email = self.value.clone())?;
            }
            Field::Phone => {
                validate_phone(&self.value)?;
                workspace.profiles.update(|profile| profile.phone = self.value.clone())?;
            }
            Field::Type => {
                let business_type: BusinessType = self.value.parse()?;
                workspace
                    .profiles
                    .update(|profile| profile.business_type = business_type)?;
            }
            Field::RegistrationDate => {
                let date: NaiveDate = self.value.parse()?;
                workspace
                    .profiles
                    .update(|profile| profile.registration_date = Some(date))?;
            }
            Field::Turnover => {
                let turnover: u64 = self.value.parse()?;
                workspace.profiles.update(|profile| profile.turnover = turnover)?;
            }
            Field::Vat => {
                let has_vat: bool = self.value.parse()?;
                workspace.profiles.update(|profile| profile.has_vat = has_vat)?;
            }
        }

        // Derived deadlines follow the profile immediately.
        workspace
            .registry
            .refresh(workspace.profiles.profile(), workspace.today);

        println!("{}", "✅ Profile updated".success());
        Ok(())
    }
}
