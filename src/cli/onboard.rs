use std::path::Path;

use anupalan::{
    BusinessProfile, BusinessType, calendar,
    calendar::BsDate,
    domain::{
        profile::{validate_email, validate_phone},
        rules::vat_registration_required,
    },
};
use chrono::NaiveDate;
use clap::Parser;
use dialoguer::{Confirm, Input, Select};
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Set up the business profile interactively")]
pub struct Onboard {}

impl Onboard {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut workspace = Workspace::open(root);

        if workspace.profiles.is_onboarding_complete() {
            let redo = Confirm::new()
                .with_prompt("A profile already exists. Start over?")
                .default(false)
                .interact()?;
            if !redo {
                println!("Keeping the existing profile.");
                return Ok(());
            }
        }

        println!("Business details");
        let name: String = Input::new()
            .with_prompt("Business name")
            .interact_text()?;
        let email: String = Input::new()
            .with_prompt("Contact email")
            .validate_with(|input: &String| validate_email(input).map_err(|e| e.to_string()))
            .interact_text()?;
        let phone: String = Input::new()
            .with_prompt("Contact phone")
            .validate_with(|input: &String| validate_phone(input).map_err(|e| e.to_string()))
            .interact_text()?;

        println!();
        println!("Registration details");
        let type_labels = ["Physical goods", "Service based", "Combined"];
        let type_index = Select::new()
            .with_prompt("Business type")
            .items(&type_labels)
            .default(0)
            .interact()?;
        let business_type = match type_index {
            0 => BusinessType::PhysicalGoods,
            1 => BusinessType::ServiceBased,
            _ => BusinessType::Combined,
        };
        let registration_date = Self::ask_registration_date()?;

        println!();
        println!("Tax details");
        let turnover: u64 = Input::new()
            .with_prompt("Estimated annual turnover (NPR)")
            .default(0)
            .interact_text()?;
        let has_vat = Confirm::new()
            .with_prompt("Is the business already VAT-registered?")
            .default(false)
            .interact()?;

        let profile = BusinessProfile {
            name,
            email,
            phone,
            business_type,
            registration_date: Some(registration_date),
            turnover,
            has_vat,
        };

        let vat_needed = vat_registration_required(&profile);
        workspace.profiles.replace(profile)?;
        workspace.profiles.complete_onboarding()?;
        workspace
            .registry
            .refresh(workspace.profiles.profile(), workspace.today);

        println!();
        println!(
            "{}",
            format!(
                "✅ Profile saved. {} compliance deadlines derived.",
                workspace.registry.items().len()
            )
            .success()
        );
        if vat_needed {
            println!(
                "{}",
                "Your turnover puts this business over the VAT registration threshold.".warning()
            );
        }
        println!("Run 'anu checklist' to see what is due.");

        Ok(())
    }

    fn ask_registration_date() -> anyhow::Result<NaiveDate> {
        let in_bs = Confirm::new()
            .with_prompt("Enter the registration date in Bikram Sambat?")
            .default(true)
            .interact()?;

        if in_bs {
            let raw: String = Input::new()
                .with_prompt("Registration date (BS, YYYY-MM-DD)")
                .validate_with(|input: &String| {
                    parse_bs_date(input).map(|_| ()).map_err(|e| e.to_string())
                })
                .interact_text()?;
            // The validator accepted it, but re-parse rather than unwrap.
            let bs = parse_bs_date(&raw).map_err(|e| anyhow::anyhow!(e))?;
            Ok(calendar::to_gregorian(bs)?)
        } else {
            let raw: String = Input::new()
                .with_prompt("Registration date (Gregorian, YYYY-MM-DD)")
                .validate_with(|input: &String| {
                    input
                        .parse::<NaiveDate>()
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()?;
            Ok(raw.parse()?)
        }
    }
}

fn parse_bs_date(input: &str) -> Result<BsDate, String> {
    let mut parts = input.splitn(3, '-');
    let year = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| "expected YYYY-MM-DD".to_string())?;
    let month = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| "expected YYYY-MM-DD".to_string())?;
    let day = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(|| "expected YYYY-MM-DD".to_string())?;
    BsDate::new(year, month, day).map_err(|e| e.to_string())
}
