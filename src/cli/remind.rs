use std::path::Path;

use anupalan::{
    Channel, FileStore, ReminderService, ReminderSink,
    domain::profile::validate_phone,
};
use clap::Parser;
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, Parser)]
pub enum Remind {
    /// Enable SMS reminders to a Nepali mobile number
    EnableSms(EnableSms),

    /// Disable SMS reminders
    DisableSms(DisableSms),

    /// Send a test reminder through the configured channels
    Test(Test),

    /// Send one reminder per deadline due in the next 30 days
    Digest(Digest),
}

impl Remind {
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::EnableSms(command) => command.run(root),
            Self::DisableSms(command) => command.run(root),
            Self::Test(command) => command.run(root),
            Self::Digest(command) => command.run(root),
        }
    }
}

/// Prints each dispatched reminder as a confirmation line. Delivery itself
/// is out of scope; a real transport would replace this sink.
struct ConsoleSink;

impl ReminderSink for ConsoleSink {
    fn dispatch(&mut self, channel: Channel, recipient: &str, message: &str) {
        println!("{}", format!("✅ {channel} reminder sent to {recipient}: {message}").success());
    }
}

#[derive(Debug, Parser)]
#[command(about = "Enable SMS reminders to a Nepali mobile number")]
pub struct EnableSms {
    /// The number reminders go to, e.g. 98xxxxxxxx
    phone: String,
}

impl EnableSms {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        validate_phone(&self.phone)?;

        let mut service = ReminderService::load(FileStore::new(root.to_path_buf()));
        service.enable_sms(self.phone.clone())?;

        println!("{}", format!("✅ SMS reminders enabled for {}", self.phone).success());
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "Disable SMS reminders")]
pub struct DisableSms {}

impl DisableSms {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut service = ReminderService::load(FileStore::new(root.to_path_buf()));
        service.disable_sms()?;

        println!("SMS reminders disabled.");
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "Send a test reminder through the configured channels")]
pub struct Test {}

impl Test {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root);
        let service = ReminderService::load(FileStore::new(root.to_path_buf()));

        if workspace.profiles.profile().email.is_empty() && !service.sms_enabled() {
            println!("No reminder channels configured. Onboard first or enable SMS reminders.");
            return Ok(());
        }

        service.send_test(workspace.profiles.profile(), &mut ConsoleSink);
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(about = "Send one reminder per deadline due in the next 30 days")]
pub struct Digest {}

impl Digest {
    #[instrument(level = "debug", skip(self))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let workspace = Workspace::open(root);
        let service = ReminderService::load(FileStore::new(root.to_path_buf()));

        let upcoming = workspace.registry.upcoming();
        if upcoming.is_empty() {
            println!("No upcoming deadlines to remind about.");
            return Ok(());
        }

        service.send_digest(
            workspace.profiles.profile(),
            upcoming,
            workspace.today,
            &mut ConsoleSink,
        );
        Ok(())
    }
}
