use chrono::Local;
use orgdesk_model::{Request, RequestStatus};
use orgdesk_store::Storage;

use super::reject;
use crate::app::App;
use crate::error::{CoreError, Result};
use crate::forms::RequestForm;
use crate::notify::Notification;
use crate::router::View;

/// Today's local date as stored on new requests.
fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

impl<S: Storage> App<S> {
    /// File a pending request on behalf of the signed-in account.
    pub fn submit_request(&mut self, form: &RequestForm) -> Result<Request> {
        self.require_view(View::Requests)?;
        let items = match form.qualifying_items() {
            Ok(items) => items,
            Err(error) => return reject("submit_request", error),
        };
        let Some(email) = self.current_account().map(|account| account.email.clone()) else {
            return Err(CoreError::Authorization {
                view: View::Requests,
            });
        };

        let request = self.store.transact(|doc| {
            Ok::<_, CoreError>(
                doc.insert(|id| Request {
                    id,
                    kind: form.kind.trim().to_string(),
                    items,
                    status: RequestStatus::Pending,
                    date: today(),
                    employee_email: email,
                })
                .clone(),
            )
        })?;
        tracing::info!(request = %request.id, items = request.items.len(), "submitted request");

        self.notify(Notification::success("Request submitted!"));
        self.refresh()?;
        Ok(request)
    }
}
