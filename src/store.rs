//! In-memory storage facade. One mutex guards all tables, so any closure run
//! through [`MemoryStore::transaction`] executes as a single atomic unit;
//! that is what makes the reserve check-and-increment and the cancel+release
//! pair safe under concurrent requests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::models::{Class, ClassTemplate, Registration, User};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
pub(crate) struct Tables {
    pub(crate) templates: HashMap<u64, ClassTemplate>,
    pub(crate) classes: HashMap<u64, Class>,
    pub(crate) registrations: HashMap<u64, Registration>,
    pub(crate) users: HashMap<u64, User>,
    // Opaque session token -> user id.
    pub(crate) sessions: HashMap<String, u64>,
    next_registration_id: u64,
}

impl Tables {
    pub(crate) fn next_registration_id(&mut self) -> u64 {
        self.next_registration_id += 1;
        self.next_registration_id
    }

    pub(crate) fn reference_taken(&self, reference: &str) -> bool {
        self.registrations
            .values()
            .any(|r| r.payment_reference == reference)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.inner.lock().expect("store mutex poisoned")
    }

    /// Runs `f` while holding the store lock. Every multi-step transition in
    /// the booking service goes through here.
    pub(crate) fn transaction<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn insert_user(&self, user: User) {
        self.lock().users.insert(user.id, user);
    }

    pub fn insert_template(&self, template: ClassTemplate) {
        self.lock().templates.insert(template.id, template);
    }

    pub fn insert_class(&self, class: Class) {
        self.lock().classes.insert(class.id, class);
    }

    pub fn insert_session(&self, token: &str, user_id: u64) {
        self.lock().sessions.insert(token.to_string(), user_id);
    }

    pub fn user_for_session(&self, token: &str) -> Option<User> {
        let tables = self.lock();
        let user_id = tables.sessions.get(token)?;
        tables.users.get(user_id).cloned()
    }

    pub fn get_class(&self, id: u64) -> Option<Class> {
        self.lock().classes.get(&id).cloned()
    }

    pub fn get_registration(&self, id: u64) -> Option<Registration> {
        self.lock().registrations.get(&id).cloned()
    }
}
