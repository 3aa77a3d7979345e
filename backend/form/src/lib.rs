//! # Profile Form
//!
//! Headless model of the profile page. Any front-end (the bundled CLI, a TUI, a web
//! front-end compiled from this crate) renders what [`ProfileForm`] exposes and forwards
//! user actions to it.
//!
//! ## States
//!
//! - **View** (initial): fields rendered but disabled, `Edit` switches to Editing
//! - **Editing**: fields enabled, every change and every blur validates that field
//!   - `Cancel`: clear errors, restore the last loaded/saved values, back to View
//!   - `Save`: validate every field, write only if all pass, back to View on success
//!
//! No terminal state, View and Editing alternate for as long as the form lives.
//!
//! ## Requests
//!
//! - One read on load. Success replaces the local record, failure is only logged
//! - One write per successful `Save`. Result shown as a toast that hides after 3 seconds
//! - No retries, no queueing, no cancellation
use shared::{PROFILE_ID, Profile, ProfileInput, WriteOutcome};
use thiserror::Error;
use tracing::{debug, error, info};

pub mod client;
pub mod models;
pub mod notification;
pub mod validation;

use client::{ClientError, ProfileApi};
use models::{Field, FieldErrors, Mode};
use notification::{Notification, Notifier, Severity};
use validation::validate_field;

pub const SAVE_SUCCESS: &str = "Profile successfully updated.";
pub const SAVE_FAILURE: &str = "Failed to update profile.";

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Fields are disabled, enter edit mode first")]
    Disabled,

    #[error("Some fields are invalid")]
    Invalid,

    #[error(transparent)]
    Request(#[from] ClientError),
}

#[derive(Debug, Default)]
pub struct ProfileForm {
    profile: Profile,
    saved: Profile,
    mode: Mode,
    errors: FieldErrors,
    notifier: Notifier,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn value(&self, field: Field) -> &str {
        field.get(&self.profile)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_disabled(&self) -> bool {
        self.mode == Mode::View
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifier.current()
    }

    pub fn dismiss_notification(&mut self) {
        self.notifier.dismiss();
    }

    pub async fn load<A: ProfileApi + ?Sized>(&mut self, api: &A) {
        match api.fetch_profile().await {
            Ok(profile) => {
                debug!("Loaded profile {:?}", profile.id);
                self.saved = profile.clone();
                self.profile = profile;
            }
            Err(e) => error!("Error fetching profile: {e}"),
        }
    }

    /// The single Edit/Cancel control.
    pub fn toggle_edit(&mut self) {
        match self.mode {
            Mode::View => self.edit(),
            Mode::Editing => self.cancel(),
        }
    }

    pub fn edit(&mut self) {
        self.mode = Mode::Editing;
    }

    pub fn cancel(&mut self) {
        if self.mode != Mode::Editing {
            return;
        }

        self.errors = FieldErrors::default();
        self.profile = self.saved.clone();
        self.mode = Mode::View;
    }

    pub fn change(&mut self, field: Field, value: impl Into<String>) -> Result<(), FormError> {
        if self.is_disabled() {
            return Err(FormError::Disabled);
        }

        field.set(&mut self.profile, value.into());
        self.revalidate(field);

        Ok(())
    }

    pub fn blur(&mut self, field: Field) -> Result<(), FormError> {
        if self.is_disabled() {
            return Err(FormError::Disabled);
        }

        self.revalidate(field);

        Ok(())
    }

    fn revalidate(&mut self, field: Field) {
        let error = validate_field(field, self.value(field)).err();
        self.errors.set(field, error);
    }

    /// Validates every field and replaces all inline errors, true when none failed.
    pub fn validate_all(&mut self) -> bool {
        for field in Field::ALL {
            self.revalidate(field);
        }

        self.errors.is_empty()
    }

    pub async fn save<A: ProfileApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<WriteOutcome, FormError> {
        if self.is_disabled() {
            return Err(FormError::Disabled);
        }

        if !self.validate_all() {
            return Err(FormError::Invalid);
        }

        match api.save_profile(&ProfileInput::from(&self.profile)).await {
            Ok(outcome) => {
                info!("{outcome}");
                self.profile.id = Some(PROFILE_ID);
                self.saved = self.profile.clone();
                self.mode = Mode::View;
                self.notifier.show(SAVE_SUCCESS, Severity::Success);

                Ok(outcome)
            }
            Err(e) => {
                error!("Error updating profile: {e}");
                self.notifier.show(SAVE_FAILURE, Severity::Error);

                Err(e.into())
            }
        }
    }
}
