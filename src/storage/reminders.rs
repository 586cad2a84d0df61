//! Reminder settings and the dispatch seam.
//!
//! The core never sends anything. Dispatch goes through [`ReminderSink`],
//! an injected dependency; the bundled CLI installs a sink that prints a
//! confirmation line, and a real transport can be substituted without
//! touching the registry or this service.

use std::fmt;

use chrono::{Days, NaiveDate};

use crate::domain::{BusinessProfile, Deadline};

use super::store::{Store, StoreError, keys};

/// How far ahead the reminder digest looks.
pub const DIGEST_WINDOW_DAYS: u64 = 30;

/// Delivery channel for a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Email to the profile's contact address.
    Email,
    /// SMS to the configured reminder number.
    Sms,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::Sms => f.write_str("SMS"),
        }
    }
}

/// Receiver of reminder dispatches.
pub trait ReminderSink {
    /// Delivers one reminder. Implementations decide what delivery means.
    fn dispatch(&mut self, channel: Channel, recipient: &str, message: &str);
}

/// A sink that drops every reminder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReminderSink for NullSink {
    fn dispatch(&mut self, _channel: Channel, _recipient: &str, _message: &str) {}
}

/// Reminder preferences and dispatch orchestration.
///
/// SMS settings are persisted as two flat flags; email reminders always go
/// to the profile's contact address.
#[derive(Debug)]
pub struct ReminderService<S> {
    store: S,
    sms_enabled: bool,
    phone_number: Option<String>,
}

impl<S: Store> ReminderService<S> {
    /// Loads reminder settings from the store.
    pub fn load(store: S) -> Self {
        let sms_enabled = store
            .get(keys::SMS_REMINDERS_ENABLED)
            .is_some_and(|raw| raw == "true");
        let phone_number = store.get(keys::REMINDER_PHONE_NUMBER);
        Self {
            store,
            sms_enabled,
            phone_number,
        }
    }

    /// Whether SMS reminders are switched on.
    #[must_use]
    pub const fn sms_enabled(&self) -> bool {
        self.sms_enabled
    }

    /// The configured SMS number, if any.
    #[must_use]
    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    /// Enables SMS reminders to the given number and persists both flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub fn enable_sms(&mut self, phone: String) -> Result<(), StoreError> {
        self.store.set(keys::SMS_REMINDERS_ENABLED, "true")?;
        self.store.set(keys::REMINDER_PHONE_NUMBER, &phone)?;
        self.sms_enabled = true;
        self.phone_number = Some(phone);
        Ok(())
    }

    /// Disables SMS reminders and clears the stored number.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be written.
    pub fn disable_sms(&mut self) -> Result<(), StoreError> {
        self.store.set(keys::SMS_REMINDERS_ENABLED, "false")?;
        self.store.remove(keys::REMINDER_PHONE_NUMBER)?;
        self.sms_enabled = false;
        self.phone_number = None;
        Ok(())
    }

    /// Sends a test reminder through every enabled channel.
    pub fn send_test(&self, profile: &BusinessProfile, sink: &mut dyn ReminderSink) {
        let message = format!("Test reminder for {}", profile.name);
        if !profile.email.is_empty() {
            sink.dispatch(Channel::Email, &profile.email, &message);
        }
        if self.sms_enabled {
            if let Some(phone) = &self.phone_number {
                sink.dispatch(Channel::Sms, phone, &message);
            }
        }
    }

    /// Dispatches one reminder per deadline falling due within the digest
    /// window.
    pub fn send_digest(
        &self,
        profile: &BusinessProfile,
        upcoming: &[Deadline],
        today: NaiveDate,
        sink: &mut dyn ReminderSink,
    ) {
        let horizon = today + Days::new(DIGEST_WINDOW_DAYS);
        for deadline in upcoming.iter().filter(|d| d.due_date <= horizon) {
            let message = format!("{} is due on {}", deadline.title, deadline.due_date);
            if !profile.email.is_empty() {
                sink.dispatch(Channel::Email, &profile.email, &message);
            }
            if self.sms_enabled {
                if let Some(phone) = &self.phone_number {
                    sink.dispatch(Channel::Sms, phone, &message);
                }
            }
        }
    }
}
