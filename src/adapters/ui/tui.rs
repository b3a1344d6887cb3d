//! Implements InputPort. Inquire-based interactive menu.
//!
//! Login & Fetch, per-provider credential editing, login-form toggle, timeline view.

use crate::adapters::ui::progress::ProgressTracker;
use crate::adapters::ui::timeline::{print_notices, print_timeline};
use crate::domain::registry;
use crate::domain::{DomainError, FieldKind, FieldSpec, ProviderDescriptor};
use crate::ports::InputPort;
use crate::usecases::{CredentialStore, FetchService};
use async_trait::async_trait;
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    LoginAndFetch,
    EditCredentials,
    ToggleForm { shown: bool },
    ShowDeadlines,
    Quit,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::LoginAndFetch => write!(f, "Login & Fetch"),
            MenuAction::EditCredentials => write!(f, "Save credentials for one provider"),
            MenuAction::ToggleForm { shown: true } => write!(f, "Hide Login Form"),
            MenuAction::ToggleForm { shown: false } => write!(f, "Show Login Form"),
            MenuAction::ShowDeadlines => write!(f, "Show my DDLs"),
            MenuAction::Quit => write!(f, "Quit"),
        }
    }
}

/// Main menu entries. Overlap protection lives in `FetchService::run_fetch_cycle`.
fn menu_actions(shown: bool) -> Vec<MenuAction> {
    vec![
        MenuAction::LoginAndFetch,
        MenuAction::EditCredentials,
        MenuAction::ToggleForm { shown },
        MenuAction::ShowDeadlines,
        MenuAction::Quit,
    ]
}

/// `None` = user cancelled (Esc / Ctrl-C).
fn cancelled<T>(res: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Input(e.to_string())),
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    service: Arc<FetchService>,
    credentials: Arc<CredentialStore>,
}

impl TuiInputPort {
    pub fn new(service: Arc<FetchService>, credentials: Arc<CredentialStore>) -> Self {
        Self {
            service,
            credentials,
        }
    }

    /// Prompt one field. Returns the value to store, or `None` to keep the saved one.
    async fn prompt_field(
        &self,
        descriptor: &ProviderDescriptor,
        field: &FieldSpec,
    ) -> Result<Option<String>, DomainError> {
        let current = self.credentials.get(descriptor.name, field.name).await;
        let label = format!("{} {}:", descriptor.name, field.name.to_uppercase());

        let answer = match field.kind {
            FieldKind::Password => {
                let help = if current.is_some() {
                    "leave empty to keep the saved value"
                } else {
                    "not saved yet"
                };
                let entered = cancelled(
                    Password::new(&label)
                        .without_confirmation()
                        .with_display_mode(PasswordDisplayMode::Masked)
                        .with_help_message(help)
                        .prompt(),
                )?;
                entered.filter(|v| !(v.is_empty() && current.is_some()))
            }
            FieldKind::Text | FieldKind::Email => {
                let initial = current.unwrap_or_default();
                let placeholder = if field.kind == FieldKind::Email {
                    "name@example.com"
                } else {
                    ""
                };
                cancelled(
                    Text::new(&label)
                        .with_initial_value(&initial)
                        .with_placeholder(placeholder)
                        .prompt(),
                )?
            }
        };
        Ok(answer)
    }

    /// Prompt every field of one provider and save what was entered.
    async fn edit_provider(&self, descriptor: &ProviderDescriptor) -> Result<(), DomainError> {
        let mut values = Vec::with_capacity(descriptor.fields.len());
        for field in descriptor.fields {
            if let Some(value) = self.prompt_field(descriptor, field).await? {
                values.push((field.name, value));
            }
        }
        self.credentials.save_provider(descriptor, &values).await
    }

    async fn login_and_fetch(&self) -> Result<(), DomainError> {
        if self.credentials.show_form().await {
            for descriptor in self.service.registry() {
                println!("\nLogin into {} ({})", descriptor.name, descriptor.description);
                self.edit_provider(descriptor).await?;
            }
        }
        self.fetch_and_show().await
    }

    /// Run one cycle with spinners, then print notices and the new timeline.
    async fn fetch_and_show(&self) -> Result<(), DomainError> {
        let tracker = ProgressTracker::start(self.service.subscribe_state());
        let result = self.service.run_fetch_cycle().await;
        tracker.finish();

        match result {
            Ok(report) => {
                print_notices(&report.notices());
                print_timeline(&report.items);
                Ok(())
            }
            Err(DomainError::CycleInProgress) => {
                warn!("fetch already running, try again when it finishes");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn pick_provider_and_edit(&self) -> Result<(), DomainError> {
        let names: Vec<&str> = self.service.registry().iter().map(|d| d.name).collect();
        let Some(name) = cancelled(Select::new("Provider:", names).prompt())? else {
            return Ok(());
        };
        match registry::find(self.service.registry(), name) {
            Some(descriptor) => self.edit_provider(descriptor).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        // cached view first, then refresh with the saved credentials
        print_timeline(&self.service.deadlines());
        self.fetch_and_show().await?;

        loop {
            let actions = menu_actions(self.credentials.show_form().await);

            let Some(action) = cancelled(Select::new("Holly DDL", actions).prompt())? else {
                return Ok(());
            };

            match action {
                MenuAction::LoginAndFetch => self.login_and_fetch().await?,
                MenuAction::EditCredentials => self.pick_provider_and_edit().await?,
                MenuAction::ToggleForm { shown } => self.credentials.set_show_form(!shown).await,
                MenuAction::ShowDeadlines => print_timeline(&self.service.deadlines()),
                MenuAction::Quit => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_always_offers_fetch() {
        for shown in [true, false] {
            let actions = menu_actions(shown);
            assert_eq!(actions[0], MenuAction::LoginAndFetch);
            assert!(actions.contains(&MenuAction::ToggleForm { shown }));
        }
        assert_eq!(menu_actions(true)[2].to_string(), "Hide Login Form");
        assert_eq!(menu_actions(false)[2].to_string(), "Show Login Form");
    }
}
