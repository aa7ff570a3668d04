//! Client-side dashboard: the key list plus the modal, confirmation and
//! notification state around it.
//!
//! [`DashboardState`] is a plain state machine. Each mutating action is split
//! into `begin_*`, which validates and marks the action as in flight, and
//! `complete_*`, which applies the server's answer through [`reconcile`].
//! [`Dashboard`] wires those halves around a [`KeyApi`].

pub mod clipboard;
pub mod notification;
pub mod reconcile;

use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

use crate::client::KeyApi;
use crate::errors::{ClientError, ClipboardError, DashboardError};
use crate::models::ApiKey;

pub use clipboard::Clipboard;
pub use notification::{Notification, NotificationKind, NotificationSlot, NOTIFICATION_TTL};
pub use reconcile::{reconcile, KeyChange};

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load API keys";

/// How long a copied value is flagged as "copied".
pub const COPIED_TTL: Duration = Duration::from_secs(2);

const REDACTED_HEAD: usize = 12;
const REDACTED_TAIL: usize = 5;
const REDACTION_MASK_LEN: usize = 30;

/// Display form of a key value: first 12 and last 5 characters around a
/// fixed-width mask.
pub fn redact(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let head: String = chars.iter().take(REDACTED_HEAD).collect();
    let tail: String = chars[chars.len().saturating_sub(REDACTED_TAIL)..].iter().collect();
    format!("{head}{}{tail}", "•".repeat(REDACTION_MASK_LEN))
}

/// An in-flight request. Only an identical action is blocked while one is
/// pending; renaming one key never waits on deleting another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PendingAction {
    Load,
    Create,
    Rename(String),
    Delete(String),
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingAction::Load => write!(f, "Loading API keys"),
            PendingAction::Create => write!(f, "Creating an API key"),
            PendingAction::Rename(id) => write!(f, "Renaming API key {id}"),
            PendingAction::Delete(id) => write!(f, "Deleting API key {id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct DashboardState {
    keys: Vec<ApiKey>,
    load_error: Option<String>,
    pending: HashSet<PendingAction>,
    create_modal_open: bool,
    new_key_name: String,
    revealed_value: Option<String>,
    editing: Option<EditDraft>,
    delete_confirmation: Option<String>,
    copied: Option<(String, Instant)>,
    notifications: NotificationSlot,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[ApiKey] {
        &self.keys
    }

    /// The persistent banner shown when the initial load fails.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_pending(&self, action: &PendingAction) -> bool {
        self.pending.contains(action)
    }

    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn create_modal_open(&self) -> bool {
        self.create_modal_open
    }

    pub fn new_key_name(&self) -> &str {
        &self.new_key_name
    }

    /// Full value of the key created last, until dismissed.
    pub fn revealed_value(&self) -> Option<&str> {
        self.revealed_value.as_deref()
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn delete_confirmation(&self) -> Option<&str> {
        self.delete_confirmation.as_deref()
    }

    pub fn notification(&self, now: Instant) -> Option<&Notification> {
        self.notifications.current(now)
    }

    pub fn is_copied(&self, value: &str, now: Instant) -> bool {
        self.copied
            .as_ref()
            .is_some_and(|(copied, at)| copied == value && now.saturating_duration_since(*at) < COPIED_TTL)
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.notifications.show(message, kind, now);
    }

    pub fn close_notification(&mut self) {
        self.notifications.close();
    }

    /// Expires the notification and the copied flag.
    pub fn tick(&mut self, now: Instant) {
        self.notifications.tick(now);
        if self
            .copied
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= COPIED_TTL)
        {
            self.copied = None;
        }
    }

    fn start(&mut self, action: PendingAction) -> Result<(), DashboardError> {
        if self.pending.contains(&action) {
            return Err(DashboardError::Busy(action));
        }
        self.pending.insert(action);
        Ok(())
    }

    fn require_name(&mut self, name: &str, now: Instant) -> Result<(), DashboardError> {
        if name.trim().is_empty() {
            self.notify("Please enter a key name", NotificationKind::Error, now);
            return Err(DashboardError::EmptyName);
        }
        Ok(())
    }

    // Load

    pub fn begin_load(&mut self) -> Result<(), DashboardError> {
        self.start(PendingAction::Load)?;
        self.load_error = None;
        Ok(())
    }

    pub fn complete_load(&mut self, result: Result<Vec<ApiKey>, ClientError>) -> Result<(), DashboardError> {
        self.pending.remove(&PendingAction::Load);
        match result {
            Ok(keys) => {
                self.keys = reconcile(&self.keys, KeyChange::Loaded(keys));
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching API keys");
                self.keys.clear();
                self.load_error = Some(LOAD_ERROR_MESSAGE.to_string());
                Err(e.into())
            }
        }
    }

    // Create

    pub fn open_create_modal(&mut self) {
        self.create_modal_open = true;
    }

    pub fn close_create_modal(&mut self) {
        self.create_modal_open = false;
    }

    pub fn set_new_key_name(&mut self, name: impl Into<String>) {
        self.new_key_name = name.into();
    }

    /// Validates the draft name and returns it for the create request. The
    /// modal closes on submit whether or not the name passes.
    pub fn begin_create(&mut self, now: Instant) -> Result<String, DashboardError> {
        self.create_modal_open = false;
        let name = self.new_key_name.clone();
        self.require_name(&name, now)?;
        self.start(PendingAction::Create)?;
        self.load_error = None;
        Ok(name)
    }

    pub fn complete_create(
        &mut self,
        result: Result<ApiKey, ClientError>,
        now: Instant,
    ) -> Result<(), DashboardError> {
        self.pending.remove(&PendingAction::Create);
        match result {
            Ok(key) => {
                self.revealed_value = Some(key.value.clone());
                self.keys = reconcile(&self.keys, KeyChange::Created(key));
                self.new_key_name.clear();
                self.notify("API key created successfully", NotificationKind::Success, now);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error creating API key");
                self.notify("Failed to create API key", NotificationKind::Error, now);
                Err(e.into())
            }
        }
    }

    pub fn dismiss_revealed_value(&mut self) {
        self.revealed_value = None;
    }

    // Rename

    pub fn start_editing(&mut self, id: &str) -> Result<(), DashboardError> {
        let key = self
            .keys
            .iter()
            .find(|k| k.id == id)
            .ok_or_else(|| DashboardError::UnknownKey(id.to_string()))?;
        self.editing = Some(EditDraft {
            id: key.id.clone(),
            name: key.name.clone(),
        });
        Ok(())
    }

    pub fn set_edit_name(&mut self, name: impl Into<String>) -> Result<(), DashboardError> {
        let draft = self.editing.as_mut().ok_or(DashboardError::NotEditing)?;
        draft.name = name.into();
        Ok(())
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
    }

    /// Returns `(id, name)` for the rename request.
    pub fn begin_rename(&mut self, now: Instant) -> Result<(String, String), DashboardError> {
        let draft = self.editing.clone().ok_or(DashboardError::NotEditing)?;
        self.require_name(&draft.name, now)?;
        self.start(PendingAction::Rename(draft.id.clone()))?;
        self.load_error = None;
        Ok((draft.id, draft.name))
    }

    pub fn complete_rename(
        &mut self,
        id: &str,
        result: Result<ApiKey, ClientError>,
        now: Instant,
    ) -> Result<(), DashboardError> {
        self.pending.remove(&PendingAction::Rename(id.to_string()));
        match result {
            Ok(key) => {
                self.keys = reconcile(&self.keys, KeyChange::Renamed(key));
                if self.editing.as_ref().is_some_and(|d| d.id == id) {
                    self.editing = None;
                }
                self.notify("API key updated successfully", NotificationKind::Success, now);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, id, "Error updating API key");
                self.notify("Failed to update API key", NotificationKind::Error, now);
                Err(e.into())
            }
        }
    }

    // Delete

    /// Asks for confirmation; nothing is sent until [`Self::begin_delete`].
    pub fn request_delete(&mut self, id: &str) -> Result<(), DashboardError> {
        if !self.keys.iter().any(|k| k.id == id) {
            return Err(DashboardError::UnknownKey(id.to_string()));
        }
        self.delete_confirmation = Some(id.to_string());
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirmation = None;
    }

    /// Consumes the pending confirmation and returns the id to delete.
    pub fn begin_delete(&mut self) -> Result<String, DashboardError> {
        let id = self
            .delete_confirmation
            .clone()
            .ok_or(DashboardError::NoPendingConfirmation)?;
        // A busy refusal keeps the confirmation for a later retry.
        self.start(PendingAction::Delete(id.clone()))?;
        self.delete_confirmation = None;
        self.load_error = None;
        Ok(id)
    }

    pub fn complete_delete(
        &mut self,
        id: &str,
        result: Result<(), ClientError>,
        now: Instant,
    ) -> Result<(), DashboardError> {
        self.pending.remove(&PendingAction::Delete(id.to_string()));
        match result {
            Ok(()) => {
                self.keys = reconcile(&self.keys, KeyChange::Deleted(id.to_string()));
                self.notify("API key deleted successfully", NotificationKind::Success, now);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, id, "Error deleting API key");
                self.notify("Failed to delete API key", NotificationKind::Error, now);
                Err(e.into())
            }
        }
    }

    // Clipboard

    /// Best-effort copy. Key state is untouched either way.
    pub fn copy_value(
        &mut self,
        clipboard: &mut impl Clipboard,
        value: &str,
        now: Instant,
    ) -> Result<(), ClipboardError> {
        match clipboard.write_text(value) {
            Ok(()) => {
                self.copied = Some((value.to_string(), now));
                self.notify("API key copied to clipboard", NotificationKind::Success, now);
                Ok(())
            }
            Err(e) => {
                self.notify("Failed to copy to clipboard", NotificationKind::Error, now);
                Err(e)
            }
        }
    }
}

/// Drives a [`DashboardState`] against a [`KeyApi`], one request per action.
pub struct Dashboard<A: KeyApi> {
    api: A,
    state: DashboardState,
}

impl<A: KeyApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: DashboardState::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    /// Initial fetch of the key list.
    pub async fn mount(&mut self) -> Result<(), DashboardError> {
        self.state.begin_load()?;
        let result = self.api.list().await;
        self.state.complete_load(result)
    }

    pub async fn create(&mut self) -> Result<(), DashboardError> {
        let name = self.state.begin_create(Instant::now())?;
        let result = self.api.create(&name).await;
        self.state.complete_create(result, Instant::now())
    }

    pub async fn rename(&mut self) -> Result<(), DashboardError> {
        let (id, name) = self.state.begin_rename(Instant::now())?;
        let result = self.api.rename(&id, &name).await;
        self.state.complete_rename(&id, result, Instant::now())
    }

    /// Sends the delete the user confirmed via `request_delete`.
    pub async fn confirm_delete(&mut self) -> Result<(), DashboardError> {
        let id = self.state.begin_delete()?;
        let result = self.api.delete(&id).await;
        self.state.complete_delete(&id, result, Instant::now())
    }

    pub fn copy_value(&mut self, clipboard: &mut impl Clipboard, value: &str) -> Result<(), ClipboardError> {
        self.state.copy_value(clipboard, value, Instant::now())
    }
}
