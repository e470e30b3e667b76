//! The root aggregate and typed access to its collections.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Account, Department, Employee, EntityId, Request, Role};

/// Label shown when a weak reference no longer resolves.
pub const MISSING_REFERENCE_LABEL: &str = "Unknown";

/// The four collections of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Accounts,
    Departments,
    Employees,
    Requests,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Departments => "departments",
            Self::Employees => "employees",
            Self::Requests => "requests",
        }
    }

    /// Prefix used when drawing new ids for this collection.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Accounts => "acc",
            Self::Departments => "dept",
            Self::Employees => "emp",
            Self::Requests => "req",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An entity stored in one of the document's ordered collections.
pub trait Entity: Clone {
    const COLLECTION: Collection;

    fn id(&self) -> &EntityId;

    fn collection(doc: &Document) -> &Vec<Self>;

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self>;
}

macro_rules! impl_entity {
    ($ty:ty, $variant:ident, $field:ident) => {
        impl Entity for $ty {
            const COLLECTION: Collection = Collection::$variant;

            fn id(&self) -> &EntityId {
                &self.id
            }

            fn collection(doc: &Document) -> &Vec<Self> {
                &doc.$field
            }

            fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
                &mut doc.$field
            }
        }
    };
}

impl_entity!(Account, Accounts, accounts);
impl_entity!(Department, Departments, departments);
impl_entity!(Employee, Employees, employees);
impl_entity!(Request, Requests, requests);

/// All persisted application data.
///
/// Every collection is required when deserializing, so a blob missing one
/// of them is rejected rather than loaded half-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub accounts: Vec<Account>,
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
    pub requests: Vec<Request>,
}

impl Document {
    /// An empty document with no accounts.
    pub fn empty() -> Self {
        Self {
            accounts: Vec::new(),
            departments: Vec::new(),
            employees: Vec::new(),
            requests: Vec::new(),
        }
    }

    /// The document installed when storage is absent or unreadable:
    /// one verified admin and two departments.
    pub fn seed() -> Self {
        Self {
            accounts: vec![Account {
                id: EntityId::seeded("acc_1"),
                first_name: "Admin".to_string(),
                last_name: "User".to_string(),
                email: "admin@example.com".to_string(),
                password: "Password123!".to_string(),
                role: Role::Admin,
                verified: true,
            }],
            departments: vec![
                Department {
                    id: EntityId::seeded("dept_1"),
                    name: "Engineering".to_string(),
                    description: "Software team".to_string(),
                },
                Department {
                    id: EntityId::seeded("dept_2"),
                    name: "HR".to_string(),
                    description: "Human Resources".to_string(),
                },
            ],
            employees: Vec::new(),
            requests: Vec::new(),
        }
    }

    pub fn all<E: Entity>(&self) -> &[E] {
        E::collection(self)
    }

    pub fn len<E: Entity>(&self) -> usize {
        E::collection(self).len()
    }

    pub fn find<E: Entity>(&self, predicate: impl Fn(&E) -> bool) -> Option<&E> {
        E::collection(self).iter().find(|entity| predicate(entity))
    }

    pub fn filter<E: Entity>(&self, predicate: impl Fn(&E) -> bool) -> Vec<&E> {
        E::collection(self)
            .iter()
            .filter(|entity| predicate(entity))
            .collect()
    }

    pub fn get<E: Entity>(&self, id: &EntityId) -> Option<&E> {
        self.find(|entity: &E| entity.id() == id)
    }

    pub fn contains<E: Entity>(&self, id: &EntityId) -> bool {
        self.get::<E>(id).is_some()
    }

    /// Draw an id that is not yet used in `E`'s collection.
    pub fn next_id<E: Entity>(&self) -> EntityId {
        loop {
            let candidate = EntityId::generate(E::COLLECTION.id_prefix());
            if !self.contains::<E>(&candidate) {
                return candidate;
            }
        }
    }

    /// Append a new entity built around a freshly assigned id.
    pub fn insert<E: Entity>(&mut self, build: impl FnOnce(EntityId) -> E) -> &E {
        let id = self.next_id::<E>();
        let items = E::collection_mut(self);
        items.push(build(id));
        let last = items.len() - 1;
        &items[last]
    }

    /// Apply `patch` in place. Returns false when `id` does not exist.
    pub fn update<E: Entity>(&mut self, id: &EntityId, patch: impl FnOnce(&mut E)) -> bool {
        match E::collection_mut(self)
            .iter_mut()
            .find(|entity| entity.id() == id)
        {
            Some(entity) => {
                patch(entity);
                true
            }
            None => false,
        }
    }

    /// Drop every entity with `id`. Returns false when nothing matched.
    pub fn remove<E: Entity>(&mut self, id: &EntityId) -> bool {
        let items = E::collection_mut(self);
        let before = items.len();
        items.retain(|entity| entity.id() != id);
        items.len() != before
    }

    pub fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.find(|account: &Account| account.email == email)
    }

    /// Department name for an employee's `dept_id`, or the placeholder.
    pub fn department_name(&self, dept_id: Option<&EntityId>) -> &str {
        dept_id
            .and_then(|id| self.get::<Department>(id))
            .map_or(MISSING_REFERENCE_LABEL, |dept| dept.name.as_str())
    }

    pub fn requests_for(&self, email: &str) -> Vec<&Request> {
        self.filter(|request: &Request| request.employee_email == email)
    }
}
