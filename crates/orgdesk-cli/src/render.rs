//! Terminal presentation of views and notifications.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use orgdesk_core::{
    AccountRow, DepartmentRow, EmployeeRow, Notification, ProfileCard, RequestRow, View, ViewModel,
    ViewRenderer,
};
use orgdesk_model::{Account, RequestStatus};

/// Whether tables carry ANSI styling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Styling {
    /// Style only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

/// Collects the rendered view and notification lines for printing.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    show_ids: bool,
    json: bool,
    styling: Styling,
    output: String,
    notices: Vec<Notification>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }

    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    #[must_use]
    pub fn with_styling(mut self, styling: Styling) -> Self {
        self.styling = styling;
        self
    }

    /// The rendered view.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn notices(&self) -> &[Notification] {
        &self.notices
    }

    /// Notification lines, one per notice.
    pub fn notice_lines(&self) -> String {
        self.notices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.output.push_str(text.as_ref());
        self.output.push('\n');
    }

    fn table(&mut self, table: &Table) {
        self.line(table.to_string());
    }

    fn new_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        apply_table_style(&mut table);
        match self.styling {
            Styling::Auto => {}
            Styling::Always => {
                table.enforce_styling();
            }
            Styling::Never => {
                table.force_no_tty();
            }
        }
        let mut cells = Vec::with_capacity(headers.len() + 1);
        if self.show_ids {
            cells.push(header_cell("ID"));
        }
        cells.extend(headers.iter().map(|label| header_cell(label)));
        table.set_header(cells);
        table
    }

    fn row(&self, id: &impl ToString, cells: Vec<Cell>) -> Vec<Cell> {
        let mut row = Vec::with_capacity(cells.len() + 1);
        if self.show_ids {
            row.push(dim_cell(id.to_string()));
        }
        row.extend(cells);
        row
    }

    fn render_profile(&mut self, card: Option<&ProfileCard>) {
        match card {
            Some(card) => {
                self.line(&card.full_name);
                self.line(format!("Email: {}", card.email));
                self.line(format!("Role: {}", card.role));
            }
            None => self.line("No profile to show."),
        }
    }

    fn render_accounts(&mut self, rows: &[AccountRow]) {
        let mut table = self.new_table(&["Name", "Email", "Role", "Verified"]);
        for account in rows {
            let verified = if account.verified { "yes" } else { "-" };
            table.add_row(self.row(
                &account.id,
                vec![
                    Cell::new(&account.full_name),
                    Cell::new(&account.email),
                    Cell::new(&account.role),
                    Cell::new(verified),
                ],
            ));
        }
        self.table(&table);
    }

    fn render_departments(&mut self, rows: &[DepartmentRow]) {
        if rows.is_empty() {
            self.line("No departments.");
            return;
        }
        let mut table = self.new_table(&["Name", "Description"]);
        for department in rows {
            table.add_row(self.row(
                &department.id,
                vec![
                    Cell::new(&department.name),
                    Cell::new(&department.description),
                ],
            ));
        }
        self.table(&table);
    }

    fn render_employees(&mut self, rows: &[EmployeeRow], departments: &[DepartmentRow]) {
        if rows.is_empty() {
            self.line("No employees.");
        } else {
            let mut table =
                self.new_table(&["Employee ID", "Email", "Position", "Department", "Hired"]);
            for employee in rows {
                table.add_row(self.row(
                    &employee.id,
                    vec![
                        Cell::new(&employee.employee_id),
                        Cell::new(&employee.user_email),
                        Cell::new(&employee.position),
                        Cell::new(&employee.department),
                        Cell::new(&employee.hire_date),
                    ],
                ));
            }
            self.table(&table);
        }
        if !departments.is_empty() {
            let choices = departments
                .iter()
                .map(|dept| format!("{} ({})", dept.name, dept.id))
                .collect::<Vec<_>>()
                .join(", ");
            self.line(format!("Departments: {choices}"));
        }
    }

    fn render_requests(&mut self, rows: &[RequestRow]) {
        if rows.is_empty() {
            self.line("You have no requests yet.");
            return;
        }
        let mut table = self.new_table(&["Date", "Type", "Items", "Status"]);
        for request in rows {
            table.add_row(self.row(
                &request.id,
                vec![
                    Cell::new(&request.date),
                    Cell::new(&request.kind),
                    Cell::new(&request.items),
                    status_cell(request.status),
                ],
            ));
        }
        self.table(&table);
    }
}

impl ViewRenderer for TerminalRenderer {
    fn render(&mut self, view: View, model: &ViewModel, principal: Option<&Account>) {
        if self.json {
            match serde_json::to_string_pretty(model) {
                Ok(json) => self.line(json),
                Err(error) => tracing::error!(%error, "failed to serialize view"),
            }
            return;
        }

        self.line(view.title());
        match principal {
            Some(account) => self.line(format!(
                "Signed in as {} <{}> ({})",
                account.full_name(),
                account.email,
                account.role.as_str()
            )),
            None => self.line("Not signed in"),
        }
        self.line("");

        match model {
            ViewModel::Home => {
                self.line("Welcome to orgdesk.");
                if principal.is_none() {
                    self.line("Run `orgdesk register` to create an account or `orgdesk login` to sign in.");
                }
            }
            ViewModel::Register => {
                self.line("Create an account with `orgdesk register --first-name <FIRST> --last-name <LAST> --email <EMAIL> --password <PASSWORD>`.");
            }
            ViewModel::VerifyEmail { pending_email } => {
                self.line(ViewModel::verification_prompt(pending_email.as_deref()));
                self.line("Run `orgdesk verify` to simulate following the link.");
            }
            ViewModel::Login { flash } => {
                if let Some(flash) = flash {
                    self.line(flash);
                }
                self.line("Sign in with `orgdesk login --email <EMAIL> --password <PASSWORD>`.");
            }
            ViewModel::Profile { card } => self.render_profile(card.as_ref()),
            ViewModel::Employees { rows, departments } => self.render_employees(rows, departments),
            ViewModel::Departments { rows } => self.render_departments(rows),
            ViewModel::Accounts { rows } => self.render_accounts(rows),
            ViewModel::Requests { rows } => self.render_requests(rows),
        }
    }

    fn notify(&mut self, notification: &Notification) {
        self.notices.push(notification.clone());
    }
}

// =============================================================================
// CELLS
// =============================================================================

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn status_cell(status: RequestStatus) -> Cell {
    let color = match status {
        RequestStatus::Pending => Color::Yellow,
        RequestStatus::Approved => Color::Green,
        RequestStatus::Rejected => Color::Red,
    };
    Cell::new(status.as_str()).fg(color)
}
