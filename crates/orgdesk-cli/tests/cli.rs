//! Commands driven end to end against in-memory and file-backed stores.

use clap::Parser;
use tempfile::tempdir;

use orgdesk_cli::cli::Cli;
use orgdesk_cli::commands::{Outcome, run_command};
use orgdesk_cli::render::{Styling, TerminalRenderer};
use orgdesk_core::{App, Severity, View};
use orgdesk_model::Document;
use orgdesk_store::{DOCUMENT_KEY, FileStorage, MemoryStorage, SESSION_TOKEN_KEY, Storage};

fn run(app: &mut App<impl Storage>, args: &[&str]) -> (Outcome, TerminalRenderer) {
    let mut argv = vec!["orgdesk"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut renderer = TerminalRenderer::new().with_styling(Styling::Never);
    let outcome = run_command(app, &cli.command, &mut renderer).unwrap();
    (outcome, renderer)
}

#[test]
fn test_register_verify_login_through_commands() {
    let mut app = App::start(MemoryStorage::new()).unwrap();

    let (outcome, renderer) = run(
        &mut app,
        &[
            "register",
            "--first-name",
            "Bob",
            "--last-name",
            "Stone",
            "--email",
            "bob@x.com",
            "--password",
            "secret1",
        ],
    );
    assert_eq!(outcome.exit_code(), 0);
    assert!(renderer
        .output()
        .contains("A verification link has been sent to bob@x.com"));

    let (outcome, renderer) = run(&mut app, &["login", "--email", "bob@x.com", "--password", "secret1"]);
    assert_eq!(outcome.exit_code(), 1);
    insta::assert_snapshot!(renderer.notice_lines(), @"[error] Invalid email, password, or account not verified.");

    let (_, renderer) = run(&mut app, &["verify"]);
    assert!(renderer.output().contains("Email verified! You may now log in."));

    let (outcome, renderer) = run(&mut app, &["login", "--email", "bob@x.com", "--password", "secret1"]);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(app.active_view(), View::Profile);
    insta::assert_snapshot!(renderer.output(), @r"
    Profile
    Signed in as Bob Stone <bob@x.com> (user)

    Bob Stone
    Email: bob@x.com
    Role: user
    ");
}

#[test]
fn test_non_admin_is_refused_department_changes() {
    let storage = MemoryStorage::new();
    let mut app = App::start(storage).unwrap();
    run(
        &mut app,
        &[
            "account", "add", "--first-name", "Ann", "--last-name", "Lee", "--email", "ann@x.com",
            "--password", "secret1",
        ],
    );
    // Not signed in yet, so the account command itself was sent to login.
    assert_eq!(app.document().accounts.len(), 1);

    let mut storage = app.into_storage();
    storage.set(SESSION_TOKEN_KEY, "admin@example.com").unwrap();
    let mut admin = App::start(storage).unwrap();
    let (outcome, _) = run(
        &mut admin,
        &[
            "account", "add", "--first-name", "Ann", "--last-name", "Lee", "--email", "ann@x.com",
            "--password", "secret1", "--verified",
        ],
    );
    assert_eq!(outcome.exit_code(), 0);
    run(&mut admin, &["logout"]);
    run(&mut admin, &["login", "--email", "ann@x.com", "--password", "secret1"]);

    let (outcome, renderer) = run(&mut admin, &["department", "add", "--name", "Shadow"]);
    assert!(matches!(outcome, Outcome::Refused(_)));
    assert_eq!(renderer.notices()[0].severity, Severity::Error);
    assert_eq!(renderer.notices()[0].message, "Access denied. Admins only.");
    assert_eq!(admin.active_view(), View::Home);
    assert_eq!(admin.document().departments.len(), 2);
}

#[test]
fn test_file_store_survives_restarts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    let mut app = App::start(FileStorage::open(&path).unwrap()).unwrap();
    run(&mut app, &["login", "--email", "admin@example.com", "--password", "Password123!"]);
    let (outcome, _) = run(&mut app, &["department", "add", "--name", "Sales", "--description", "Revenue"]);
    assert_eq!(outcome.exit_code(), 0);
    drop(app);

    let mut app = App::start(FileStorage::open(&path).unwrap()).unwrap();
    assert!(app.is_admin());
    assert_eq!(app.active_view(), View::Departments);
    let (_, renderer) = run(&mut app, &["open"]);
    assert!(renderer.output().contains("Sales"));
    assert!(renderer.output().contains("Revenue"));
}

#[test]
fn test_corrupt_store_file_is_reseeded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let mut app = App::start(FileStorage::open(&path).unwrap()).unwrap();
    assert!(app.load_origin().is_seeded());
    assert_eq!(app.document(), &Document::seed());
    assert_eq!(app.active_view(), View::Home);

    let (outcome, _) = run(
        &mut app,
        &["login", "--email", "admin@example.com", "--password", "Password123!"],
    );
    assert_eq!(outcome.exit_code(), 0);
    drop(app);

    let reopened = FileStorage::open(&path).unwrap();
    assert!(reopened.get(DOCUMENT_KEY).unwrap().is_some());
    assert_eq!(
        reopened.get(SESSION_TOKEN_KEY).unwrap().as_deref(),
        Some("admin@example.com")
    );
}

#[test]
fn test_request_items_parse_quantities() {
    let storage = MemoryStorage::new().with_entry(SESSION_TOKEN_KEY, "admin@example.com");
    let mut app = App::start(storage).unwrap();
    let (outcome, renderer) = run(
        &mut app,
        &["request", "submit", "--type", "Equipment", "--item", "Laptop:2", "--item", "Mouse"],
    );
    assert_eq!(outcome.exit_code(), 0);
    assert!(renderer.output().contains("Laptop (x2), Mouse (x1)"));
    assert!(renderer.output().contains("Pending"));
}

#[test]
fn test_empty_request_is_refused() {
    let storage = MemoryStorage::new().with_entry(SESSION_TOKEN_KEY, "admin@example.com");
    let mut app = App::start(storage).unwrap();
    let (outcome, renderer) = run(&mut app, &["request", "submit", "--item", " :3"]);
    assert_eq!(outcome.exit_code(), 1);
    insta::assert_snapshot!(renderer.notice_lines(), @"[error] Please add at least one item.");
    assert!(app.document().requests.is_empty());
}

#[test]
fn test_unknown_route_shows_home() {
    let mut app = App::start(MemoryStorage::new()).unwrap();
    let (outcome, renderer) = run(&mut app, &["open", "#/nowhere"]);
    assert_eq!(outcome.exit_code(), 0);
    assert!(renderer.output().starts_with("Home\n"));
    assert_eq!(app.location(), "#/nowhere");
}
