use orgdesk_model::{Collection, Department, EntityId};
use orgdesk_store::Storage;

use super::reject;
use crate::app::App;
use crate::error::{CoreError, Result};
use crate::forms::DepartmentForm;
use crate::notify::Notification;
use crate::router::View;

impl<S: Storage> App<S> {
    pub fn create_department(&mut self, form: &DepartmentForm) -> Result<Department> {
        self.require_view(View::Departments)?;
        if let Err(error) = form.validate() {
            return reject("create_department", error);
        }

        let department = self.store.transact(|doc| {
            Ok::<_, CoreError>(
                doc.insert(|id| Department {
                    id,
                    name: form.name.trim().to_string(),
                    description: form.description.trim().to_string(),
                })
                .clone(),
            )
        })?;
        tracing::info!(department = %department.id, "created department");

        self.notify(Notification::success("Department added!"));
        self.refresh()?;
        Ok(department)
    }

    pub fn update_department(&mut self, id: &EntityId, form: &DepartmentForm) -> Result<Department> {
        self.require_view(View::Departments)?;
        if let Err(error) = form.validate() {
            return reject("update_department", error);
        }

        let department = self.store.transact(|doc| {
            let found = doc.update(id, |department: &mut Department| {
                department.name = form.name.trim().to_string();
                department.description = form.description.trim().to_string();
            });
            if !found {
                return Err(CoreError::not_found(Collection::Departments, id));
            }
            doc.get::<Department>(id)
                .cloned()
                .ok_or_else(|| CoreError::not_found(Collection::Departments, id))
        })?;
        tracing::info!(department = %department.id, "updated department");

        self.notify(Notification::success("Department updated!"));
        self.refresh()?;
        Ok(department)
    }

    /// Remove a department. Employees keep their dangling `dept_id`.
    pub fn delete_department(&mut self, id: &EntityId) -> Result<()> {
        self.require_view(View::Departments)?;

        self.store.transact(|doc| {
            if doc.remove::<Department>(id) {
                Ok(())
            } else {
                Err(CoreError::not_found(Collection::Departments, id))
            }
        })?;
        tracing::info!(department = %id, "deleted department");

        self.notify(Notification::info("Department deleted."));
        self.refresh()?;
        Ok(())
    }
}
