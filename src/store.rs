//! Persistence collaborator interface.
//!
//! Decoding never touches storage itself. Update flows look the stored
//! record up through this trait, merge the decoded form over it and
//! hand the result back; persistence is attempted only after a fully
//! successful decode and merge.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::types::{Admin, BaseFolder, User};

/// Add/update/lookup for the decoded aggregates. Lookups distinguish a
/// missing record ([`StoreError::NotFound`]) from a backend failure.
pub trait ConfigStore {
    fn add_user(&mut self, user: User) -> Result<(), StoreError>;
    fn update_user(&mut self, user: User) -> Result<(), StoreError>;
    fn user_by_name(&self, username: &str) -> Result<User, StoreError>;

    fn add_admin(&mut self, admin: Admin) -> Result<(), StoreError>;
    fn update_admin(&mut self, admin: Admin) -> Result<(), StoreError>;
    fn admin_by_name(&self, username: &str) -> Result<Admin, StoreError>;

    fn add_folder(&mut self, folder: BaseFolder) -> Result<(), StoreError>;
}

/// In-memory store backing the crate's tests and the embedded provider.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: HashMap<String, User>,
    admins: HashMap<String, Admin>,
    folders: Vec<BaseFolder>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn folders(&self) -> &[BaseFolder] {
        &self.folders
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl ConfigStore for MemoryStore {
    fn add_user(&mut self, mut user: User) -> Result<(), StoreError> {
        if self.users.contains_key(&user.username) {
            return Err(StoreError::Provider(format!(
                "user \"{}\" already exists",
                user.username
            )));
        }
        user.id = self.allocate_id();
        self.users.insert(user.username.clone(), user);
        Ok(())
    }

    fn update_user(&mut self, user: User) -> Result<(), StoreError> {
        if !self.users.contains_key(&user.username) {
            return Err(StoreError::NotFound(user.username));
        }
        self.users.insert(user.username.clone(), user);
        Ok(())
    }

    fn user_by_name(&self, username: &str) -> Result<User, StoreError> {
        self.users
            .get(username)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(username.to_string()))
    }

    fn add_admin(&mut self, mut admin: Admin) -> Result<(), StoreError> {
        if self.admins.contains_key(&admin.username) {
            return Err(StoreError::Provider(format!(
                "admin \"{}\" already exists",
                admin.username
            )));
        }
        admin.id = self.allocate_id();
        self.admins.insert(admin.username.clone(), admin);
        Ok(())
    }

    fn update_admin(&mut self, admin: Admin) -> Result<(), StoreError> {
        if !self.admins.contains_key(&admin.username) {
            return Err(StoreError::NotFound(admin.username));
        }
        self.admins.insert(admin.username.clone(), admin);
        Ok(())
    }

    fn admin_by_name(&self, username: &str) -> Result<Admin, StoreError> {
        self.admins
            .get(username)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(username.to_string()))
    }

    fn add_folder(&mut self, mut folder: BaseFolder) -> Result<(), StoreError> {
        folder.id = self.allocate_id();
        self.folders.push(folder);
        Ok(())
    }
}
