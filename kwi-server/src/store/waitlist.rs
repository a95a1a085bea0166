//! Waitlist signups

use kwi_common::models::{NewWaitlistEntry, WaitlistEntry};
use kwi_common::{time, Error, Result};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct WaitlistTable {
    entries: Vec<WaitlistEntry>,
    last_id: u64,
}

/// In-memory waitlist; emails are unique after trimming
#[derive(Debug, Default)]
pub struct WaitlistStore {
    table: RwLock<WaitlistTable>,
}

impl WaitlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn find_by_email(&self, email: &str) -> Option<WaitlistEntry> {
        let email = email.trim();
        self.table
            .read()
            .await
            .entries
            .iter()
            .find(|entry| entry.email == email)
            .cloned()
    }

    /// Register a signup; `Conflict` when the email is already on the list
    pub async fn create(&self, new: NewWaitlistEntry) -> Result<WaitlistEntry> {
        let email = new.normalized_email();
        let mut table = self.table.write().await;
        if table.entries.iter().any(|entry| entry.email == email) {
            return Err(Error::Conflict(
                "Email already registered to waitlist".to_string(),
            ));
        }

        table.last_id += 1;
        let entry = WaitlistEntry {
            id: table.last_id,
            company: new.normalized_company(),
            name: new.name,
            email,
            timestamp: time::now(),
        };
        table.entries.push(entry.clone());
        Ok(entry)
    }
}
