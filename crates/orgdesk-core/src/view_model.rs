//! Data prepared for the active view.
//!
//! Preparation only reads the document; presentation is left to a
//! [`ViewRenderer`](crate::render::ViewRenderer).

use serde::Serialize;

use orgdesk_model::{Account, Department, Document, Employee, EntityId, Request, RequestStatus};

use crate::router::View;

/// Verification prompt target when no email is pending.
pub const NO_PENDING_EMAIL_LABEL: &str = "your email";

// =============================================================================
// ROWS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCard {
    pub full_name: String,
    pub email: String,
    pub role: String,
}

impl From<&Account> for ProfileCard {
    fn from(account: &Account) -> Self {
        Self {
            full_name: account.full_name(),
            email: account.email.clone(),
            role: account.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRow {
    pub id: EntityId,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub verified: bool,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            full_name: account.full_name(),
            email: account.email.clone(),
            role: account.role.as_str().to_string(),
            verified: account.verified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentRow {
    pub id: EntityId,
    pub name: String,
    pub description: String,
}

impl From<&Department> for DepartmentRow {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id.clone(),
            name: department.name.clone(),
            description: department.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRow {
    pub id: EntityId,
    pub employee_id: String,
    pub user_email: String,
    pub position: String,
    /// Department name, or the placeholder for a dangling reference.
    pub department: String,
    pub hire_date: String,
}

impl EmployeeRow {
    fn prepare(employee: &Employee, document: &Document) -> Self {
        Self {
            id: employee.id.clone(),
            employee_id: employee.employee_id.clone(),
            user_email: employee.user_email.clone(),
            position: employee.position.clone(),
            department: document
                .department_name(employee.dept_id.as_ref())
                .to_string(),
            hire_date: employee.hire_date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestRow {
    pub id: EntityId,
    pub date: String,
    pub kind: String,
    pub items: String,
    pub status: RequestStatus,
}

impl From<&Request> for RequestRow {
    fn from(request: &Request) -> Self {
        Self {
            id: request.id.clone(),
            date: request.date.clone(),
            kind: request.kind.clone(),
            items: request.item_summary(),
            status: request.status,
        }
    }
}

// =============================================================================
// VIEW MODEL
// =============================================================================

/// Everything a renderer needs for one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ViewModel {
    Home,
    Register,
    VerifyEmail {
        /// Address the verification prompt refers to.
        pending_email: Option<String>,
    },
    Login {
        /// One-shot message carried over from verification.
        flash: Option<String>,
    },
    Profile {
        card: Option<ProfileCard>,
    },
    Employees {
        rows: Vec<EmployeeRow>,
        /// Departments offered by the employee form.
        departments: Vec<DepartmentRow>,
    },
    Departments {
        rows: Vec<DepartmentRow>,
    },
    Accounts {
        rows: Vec<AccountRow>,
    },
    Requests {
        rows: Vec<RequestRow>,
    },
}

impl ViewModel {
    /// Build the model for `view` from the current state.
    pub fn prepare(
        view: View,
        document: &Document,
        principal: Option<&Account>,
        pending_email: Option<String>,
        login_flash: Option<String>,
    ) -> Self {
        match view {
            View::Home | View::NotFound => Self::Home,
            View::Register => Self::Register,
            View::VerifyEmail => Self::VerifyEmail { pending_email },
            View::Login => Self::Login { flash: login_flash },
            View::Profile => Self::Profile {
                card: principal.map(ProfileCard::from),
            },
            View::Employees => Self::Employees {
                rows: document
                    .employees
                    .iter()
                    .map(|employee| EmployeeRow::prepare(employee, document))
                    .collect(),
                departments: document.departments.iter().map(DepartmentRow::from).collect(),
            },
            View::Departments => Self::Departments {
                rows: document.departments.iter().map(DepartmentRow::from).collect(),
            },
            View::Accounts => Self::Accounts {
                rows: document.accounts.iter().map(AccountRow::from).collect(),
            },
            View::Requests => Self::Requests {
                rows: principal
                    .map(|account| {
                        document
                            .requests_for(&account.email)
                            .into_iter()
                            .map(RequestRow::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        }
    }

    /// Text of the verification prompt.
    pub fn verification_prompt(pending_email: Option<&str>) -> String {
        format!(
            "A verification link has been sent to {}",
            pending_email.unwrap_or(NO_PENDING_EMAIL_LABEL)
        )
    }

    /// True for list views with nothing to show.
    pub fn is_empty_list(&self) -> bool {
        match self {
            Self::Employees { rows, .. } => rows.is_empty(),
            Self::Departments { rows } => rows.is_empty(),
            Self::Accounts { rows } => rows.is_empty(),
            Self::Requests { rows } => rows.is_empty(),
            _ => false,
        }
    }
}
