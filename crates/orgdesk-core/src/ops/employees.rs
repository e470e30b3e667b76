use orgdesk_model::{Collection, Employee, EntityId};
use orgdesk_store::Storage;

use super::reject;
use crate::app::App;
use crate::error::{CoreError, Result, ValidationError};
use crate::forms::EmployeeForm;
use crate::notify::Notification;
use crate::router::View;

impl<S: Storage> App<S> {
    /// Resolve the form's email to an account id, captured at write time.
    fn employee_account(&self, operation: &'static str, form: &EmployeeForm) -> Result<EntityId> {
        if let Err(error) = form.validate() {
            return reject(operation, error);
        }
        match self.document().account_by_email(form.user_email.trim()) {
            Some(account) => Ok(account.id.clone()),
            None => reject(
                operation,
                ValidationError::for_field("user_email", "No account found with that email."),
            ),
        }
    }

    pub fn create_employee(&mut self, form: &EmployeeForm) -> Result<Employee> {
        self.require_view(View::Employees)?;
        let user_id = self.employee_account("create_employee", form)?;

        let employee = self.store.transact(|doc| {
            Ok::<_, CoreError>(
                doc.insert(|id| Employee {
                    id,
                    employee_id: form.employee_id.trim().to_string(),
                    user_email: form.user_email.trim().to_string(),
                    user_id,
                    position: form.position.trim().to_string(),
                    dept_id: form.dept_id.clone(),
                    hire_date: form.hire_date.trim().to_string(),
                })
                .clone(),
            )
        })?;
        tracing::info!(employee = %employee.id, "created employee");

        self.notify(Notification::success("Employee added!"));
        self.refresh()?;
        Ok(employee)
    }

    pub fn update_employee(&mut self, id: &EntityId, form: &EmployeeForm) -> Result<Employee> {
        self.require_view(View::Employees)?;
        let user_id = self.employee_account("update_employee", form)?;

        let employee = self.store.transact(|doc| {
            let found = doc.update(id, |employee: &mut Employee| {
                employee.employee_id = form.employee_id.trim().to_string();
                employee.user_email = form.user_email.trim().to_string();
                employee.user_id = user_id;
                employee.position = form.position.trim().to_string();
                employee.dept_id.clone_from(&form.dept_id);
                employee.hire_date = form.hire_date.trim().to_string();
            });
            if !found {
                return Err(CoreError::not_found(Collection::Employees, id));
            }
            doc.get::<Employee>(id)
                .cloned()
                .ok_or_else(|| CoreError::not_found(Collection::Employees, id))
        })?;
        tracing::info!(employee = %employee.id, "updated employee");

        self.notify(Notification::success("Employee updated!"));
        self.refresh()?;
        Ok(employee)
    }

    pub fn delete_employee(&mut self, id: &EntityId) -> Result<()> {
        self.require_view(View::Employees)?;

        self.store.transact(|doc| {
            if doc.remove::<Employee>(id) {
                Ok(())
            } else {
                Err(CoreError::not_found(Collection::Employees, id))
            }
        })?;
        tracing::info!(employee = %id, "deleted employee");

        self.notify(Notification::info("Employee deleted."));
        self.refresh()?;
        Ok(())
    }
}
