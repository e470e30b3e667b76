//! Command execution against an [`App`].

use anyhow::{Context, Result};

use orgdesk_core::{
    AccountForm, App, CoreError, DepartmentForm, EmployeeForm, ItemInput, RegisterForm,
    RequestForm, ViewRenderer,
};
use orgdesk_model::EntityId;
use orgdesk_store::Storage;

use crate::cli::{
    AccountArgs, AccountCommand, Command, DepartmentArgs, DepartmentCommand, EmployeeArgs,
    EmployeeCommand, RequestArgs, RequestCommand,
};

/// How a command ended when storage itself did not fail.
#[derive(Debug)]
pub enum Outcome {
    Done,
    /// The operation was refused; nothing was changed.
    Refused(CoreError),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Done => 0,
            Self::Refused(_) => 1,
        }
    }
}

/// Run `command`, then hand notifications and the active view to
/// `renderer`. A refusal is reported to the renderer as a notification.
pub fn run_command<S: Storage>(
    app: &mut App<S>,
    command: &Command,
    renderer: &mut impl ViewRenderer,
) -> Result<Outcome> {
    let outcome = match execute(app, command)? {
        Ok(()) => Outcome::Done,
        Err(CoreError::Persistence(error)) => {
            return Err(error).context("failed to update the store");
        }
        Err(error) => {
            tracing::debug!(%error, "command refused");
            Outcome::Refused(error)
        }
    };
    app.present(renderer);
    if let Outcome::Refused(error) = &outcome {
        renderer.notify(&error.to_notification());
    }
    Ok(outcome)
}

/// Dispatch one command. The outer error is for arguments that could not
/// be turned into a request at all.
fn execute<S: Storage>(app: &mut App<S>, command: &Command) -> Result<orgdesk_core::Result<()>> {
    let result = match command {
        Command::Open { route } => match route {
            Some(route) => app.navigate(route).map(drop),
            None => app.refresh(),
        },
        Command::Register(args) => app
            .register(&RegisterForm {
                first_name: args.first_name.clone(),
                last_name: args.last_name.clone(),
                email: args.email.clone(),
                password: args.password.clone(),
            })
            .map(drop),
        Command::Verify => app.verify_email().map(drop),
        Command::Login(args) => app.login(&args.email, &args.password).map(drop),
        Command::Logout => app.logout(),
        Command::Account(command) => account(app, command)?,
        Command::Department(command) => department(app, command)?,
        Command::Employee(command) => employee(app, command)?,
        Command::Request(RequestCommand::Submit(args)) => {
            app.submit_request(&request_form(args)).map(drop)
        }
    };
    Ok(result)
}

fn account<S: Storage>(
    app: &mut App<S>,
    command: &AccountCommand,
) -> Result<orgdesk_core::Result<()>> {
    Ok(match command {
        AccountCommand::Add(args) => app.create_account(&account_form(args)).map(drop),
        AccountCommand::Edit { id, account } => app
            .update_account(&parse_id(id)?, &account_form(account))
            .map(drop),
        AccountCommand::ResetPassword { id, password } => {
            app.reset_password(&parse_id(id)?, password)
        }
        AccountCommand::Delete { id } => app.delete_account(&parse_id(id)?),
    })
}

fn department<S: Storage>(
    app: &mut App<S>,
    command: &DepartmentCommand,
) -> Result<orgdesk_core::Result<()>> {
    Ok(match command {
        DepartmentCommand::Add(args) => app.create_department(&department_form(args)).map(drop),
        DepartmentCommand::Edit { id, department } => app
            .update_department(&parse_id(id)?, &department_form(department))
            .map(drop),
        DepartmentCommand::Delete { id } => app.delete_department(&parse_id(id)?),
    })
}

fn employee<S: Storage>(
    app: &mut App<S>,
    command: &EmployeeCommand,
) -> Result<orgdesk_core::Result<()>> {
    Ok(match command {
        EmployeeCommand::Add(args) => app.create_employee(&employee_form(args)?).map(drop),
        EmployeeCommand::Edit { id, employee } => app
            .update_employee(&parse_id(id)?, &employee_form(employee)?)
            .map(drop),
        EmployeeCommand::Delete { id } => app.delete_employee(&parse_id(id)?),
    })
}

// =============================================================================
// FORM CONVERSION
// =============================================================================

fn parse_id(raw: &str) -> Result<EntityId> {
    EntityId::new(raw).with_context(|| format!("invalid id {raw:?}"))
}

fn account_form(args: &AccountArgs) -> AccountForm {
    AccountForm {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        role: args.role.into(),
        verified: args.verified,
    }
}

fn department_form(args: &DepartmentArgs) -> DepartmentForm {
    DepartmentForm {
        name: args.name.clone(),
        description: args.description.clone(),
    }
}

fn employee_form(args: &EmployeeArgs) -> Result<EmployeeForm> {
    let dept_id = match args.dept.as_deref() {
        Some(raw) if !raw.trim().is_empty() => Some(parse_id(raw)?),
        _ => None,
    };
    Ok(EmployeeForm {
        employee_id: args.employee_id.clone(),
        user_email: args.email.clone(),
        position: args.position.clone(),
        dept_id,
        hire_date: args.hire_date.clone(),
    })
}

fn request_form(args: &RequestArgs) -> RequestForm {
    RequestForm {
        kind: args.kind.clone(),
        items: args.items.iter().map(|raw| parse_item(raw)).collect(),
    }
}

/// Split `NAME[:QTY]` at the last colon.
pub fn parse_item(raw: &str) -> ItemInput {
    match raw.rsplit_once(':') {
        Some((name, qty)) => ItemInput::new(name, Some(qty)),
        None => ItemInput::new(raw, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("Laptop:2"), ItemInput::new("Laptop", Some("2")));
        assert_eq!(parse_item("Desk"), ItemInput::new("Desk", None));
        assert_eq!(
            parse_item("Cable: USB-C:3"),
            ItemInput::new("Cable: USB-C", Some("3"))
        );
    }

    #[test]
    fn test_blank_id_is_an_argument_error() {
        assert!(parse_id("  ").is_err());
        assert_eq!(parse_id("dept_1").unwrap().as_str(), "dept_1");
    }
}
