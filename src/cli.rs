use std::path::{Path, PathBuf};

mod checklist;
mod complete;
mod convert;
mod loan;
mod onboard;
mod profile;
mod remind;
mod status;
mod terminal;
mod upcoming;
mod vehicle;

use anupalan::{
    Config, DisplayCalendar, FileStore, ObligationRegistry, ProfileStore, calendar,
};
use chrono::{Local, NaiveDate};
use clap::ArgAction;

use checklist::Checklist;
use complete::{Complete, Reopen};
use convert::Convert;
use loan::Loan;
use onboard::Onboard;
use profile::Profile;
use remind::Remind;
use status::Status;
use upcoming::Upcoming;
use vehicle::Vehicle;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the tracker's data directory
    #[arg(short, long, default_value = ".anupalan", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show compliance status (default)
    Status(Status),

    /// Set up the business profile interactively
    Onboard(Onboard),

    /// List the statutory compliance checklist
    Checklist(Checklist),

    /// Mark a compliance item as completed
    Complete(Complete),

    /// Mark a compliance item as pending again
    Reopen(Reopen),

    /// Manage loan repayment schedules
    #[command(subcommand)]
    Loan(Loan),

    /// Manage vehicle renewal schedules
    #[command(subcommand)]
    Vehicle(Vehicle),

    /// Show the merged upcoming-deadline feed
    Upcoming(Upcoming),

    /// Manage reminder settings and send stub reminders
    #[command(subcommand)]
    Remind(Remind),

    /// Show or modify the business profile
    #[command(subcommand)]
    Profile(Profile),

    /// Convert a date between Gregorian and Bikram Sambat
    Convert(Convert),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root)?,
            Self::Onboard(command) => command.run(root)?,
            Self::Checklist(command) => command.run(root)?,
            Self::Complete(command) => command.run(root)?,
            Self::Reopen(command) => command.run(root)?,
            Self::Loan(command) => command.run(root)?,
            Self::Vehicle(command) => command.run(root)?,
            Self::Upcoming(command) => command.run(root)?,
            Self::Remind(command) => command.run(root)?,
            Self::Profile(command) => command.run(root)?,
            Self::Convert(command) => command.run()?,
        }
        Ok(())
    }
}

/// Everything a subcommand needs: config, the profile store, the registry
/// and the current date.
pub(crate) struct Workspace {
    pub config: Config,
    pub profiles: ProfileStore<FileStore>,
    pub registry: ObligationRegistry<FileStore>,
    pub today: NaiveDate,
}

impl Workspace {
    /// Opens the data directory, loading config, profile and registry.
    pub fn open(root: &Path) -> Self {
        let config = load_config(root);
        let today = Local::now().date_naive();
        let profiles = ProfileStore::load(FileStore::new(root.to_path_buf()));
        let registry = ObligationRegistry::load(
            FileStore::new(root.to_path_buf()),
            profiles.profile(),
            today,
        )
        .with_window(config.upcoming_window());

        Self {
            config,
            profiles,
            registry,
            today,
        }
    }
}

fn load_config(root: &Path) -> Config {
    let path = root.join("config.toml");
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

/// Renders a date in the configured display calendar, degrading to
/// Gregorian when the date falls outside the Bikram Sambat tables.
pub(crate) fn display_date(date: NaiveDate, config: &Config) -> String {
    match config.display_calendar() {
        DisplayCalendar::Bs => {
            calendar::to_bs(date).map_or_else(|_| date.to_string(), |bs| bs.to_string())
        }
        DisplayCalendar::Gregorian => date.to_string(),
    }
}
