//! Submitted field values for each operation.
//!
//! Forms carry raw user input. Trimming and required-field checks happen
//! here so every operation validates the same way before it touches the
//! document.

use orgdesk_model::{EntityId, RequestItem, Role};

use crate::error::ValidationError;

/// Minimum password length for registration, creation and resets.
pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::for_field(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters."),
        ));
    }
    Ok(())
}

/// Self-registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if [&self.first_name, &self.last_name, &self.email, &self.password]
            .into_iter()
            .any(|value| is_blank(value))
        {
            return Err(ValidationError::new("Please fill in all fields."));
        }
        check_password(&self.password)
    }
}

/// Account created or edited from the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Required on create; `None` on edit keeps the current password.
    pub password: Option<String>,
    pub role: Role,
    pub verified: bool,
}

impl AccountForm {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if [&self.first_name, &self.last_name, &self.email]
            .into_iter()
            .any(|value| is_blank(value))
        {
            return Err(ValidationError::new("Please fill in all required fields."));
        }
        match self.password.as_deref() {
            Some(password) if !password.is_empty() => check_password(password),
            _ => Ok(()),
        }
    }

    /// Password to store, treating an empty string as omitted.
    pub(crate) fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|password| !password.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentForm {
    pub name: String,
    pub description: String,
}

impl DepartmentForm {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::for_field(
                "name",
                "Please enter a department name.",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub employee_id: String,
    pub user_email: String,
    pub position: String,
    pub dept_id: Option<EntityId>,
    pub hire_date: String,
}

impl EmployeeForm {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if [&self.employee_id, &self.user_email, &self.position]
            .into_iter()
            .any(|value| is_blank(value))
        {
            return Err(ValidationError::new("Please fill in all required fields."));
        }
        Ok(())
    }
}

/// One item row of a request form. Quantity is raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
    pub qty: Option<String>,
}

impl ItemInput {
    pub fn new(name: impl Into<String>, qty: Option<&str>) -> Self {
        Self {
            name: name.into(),
            qty: qty.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestForm {
    pub kind: String,
    pub items: Vec<ItemInput>,
}

impl RequestForm {
    /// Items with a non-empty name, quantities normalised. Rows without a
    /// name are dropped.
    pub(crate) fn qualifying_items(&self) -> Result<Vec<RequestItem>, ValidationError> {
        let items: Vec<RequestItem> = self
            .items
            .iter()
            .filter(|input| !is_blank(&input.name))
            .map(|input| RequestItem::from_input(input.name.trim(), input.qty.as_deref()))
            .collect();
        if items.is_empty() {
            return Err(ValidationError::for_field(
                "items",
                "Please add at least one item.",
            ));
        }
        Ok(items)
    }
}
