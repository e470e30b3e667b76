//! End-to-end flows through `App` against in-memory storage.

use orgdesk_core::{
    ACCESS_DENIED_MESSAGE, App, CoreError, DepartmentForm, ItemInput, Notification,
    RecordingRenderer, RegisterForm, RequestForm, Severity, View, ViewModel,
};
use orgdesk_model::{Account, Department, Document, Role};
use orgdesk_store::{DOCUMENT_KEY, MemoryStorage, SESSION_TOKEN_KEY, Storage, decode_document};

fn signed_in(email: &str) -> App<MemoryStorage> {
    let storage = MemoryStorage::new().with_entry(SESSION_TOKEN_KEY, email);
    App::start(storage).unwrap()
}

fn bob_form() -> RegisterForm {
    RegisterForm {
        first_name: "Bob".into(),
        last_name: "Stone".into(),
        email: "bob@x.com".into(),
        password: "secret1".into(),
    }
}

fn stored_document(app: &App<MemoryStorage>) -> Document {
    let blob = app.storage().get(DOCUMENT_KEY).unwrap().unwrap();
    decode_document(&blob).unwrap()
}

/// Register a user account, verify it, then start a new app signed in as it.
fn user_app() -> App<MemoryStorage> {
    let mut app = App::start(MemoryStorage::new()).unwrap();
    app.register(&bob_form()).unwrap();
    app.verify_email().unwrap();
    app.login("bob@x.com", "secret1").unwrap();
    App::start(app.into_storage()).unwrap()
}

#[test]
fn test_register_verify_login_flow() {
    let mut app = App::start(MemoryStorage::new()).unwrap();
    let admin = app.document().account_by_email("admin@example.com").unwrap();
    assert!(admin.verified);
    assert_eq!(admin.role, Role::Admin);

    let bob = app.register(&bob_form()).unwrap();
    assert!(!bob.verified);
    assert_eq!(bob.role, Role::User);
    assert_eq!(app.active_view(), View::VerifyEmail);

    let err = app.login("bob@x.com", "secret1").unwrap_err();
    assert!(err.is_validation());
    assert!(app.current_account().is_none());
    assert_eq!(app.storage().get(SESSION_TOKEN_KEY).unwrap(), None);

    let verified = app.verify_email().unwrap();
    assert!(verified.verified);
    assert!(app.current_account().is_none());

    app.login("bob@x.com", "secret1").unwrap();
    assert_eq!(app.current_account().unwrap().id, bob.id);
    assert_eq!(app.active_view(), View::Profile);
    assert!(matches!(
        app.view_model(),
        ViewModel::Profile { card: Some(card) } if card.full_name == "Bob Stone"
    ));
}

#[test]
fn test_admin_creates_department() {
    let mut app = App::start(MemoryStorage::new()).unwrap();
    app.login("admin@example.com", "Password123!").unwrap();
    app.navigate("#/departments").unwrap();
    assert_eq!(app.active_view(), View::Departments);

    let before = app.document().departments.clone();
    let sales = app
        .create_department(&DepartmentForm {
            name: "Sales".into(),
            description: String::new(),
        })
        .unwrap();

    let after = &app.document().departments;
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(sales.name, "Sales");
    assert!(before.iter().all(|dept| dept.id != sales.id));
    assert!(app.document().get::<Department>(&sales.id).is_some());
    assert_eq!(&stored_document(&app), app.document());
}

#[test]
fn test_user_is_turned_away_from_admin_view() {
    let mut app = user_app();
    app.take_notifications();
    let before = app.document().clone();

    let navigation = app.navigate("#/accounts").unwrap();
    assert_eq!(navigation.active, View::Home);
    assert_eq!(app.active_view(), View::Home);
    assert_eq!(
        app.take_notifications(),
        vec![Notification::error(ACCESS_DENIED_MESSAGE)]
    );
    assert_eq!(app.document(), &before);
}

#[test]
fn test_anonymous_visitor_is_sent_to_login_for_admin_views() {
    for route in ["#/employees", "#/departments", "#/accounts"] {
        let mut app = App::start(MemoryStorage::new()).unwrap();
        app.navigate(route).unwrap();
        assert_eq!(app.active_view(), View::Login, "route {route}");
        assert!(app.notifications().is_empty());
    }
}

#[test]
fn test_user_admin_operation_is_refused_without_mutation() {
    let mut app = user_app();
    let before = app.document().clone();

    let err = app
        .create_department(&DepartmentForm {
            name: "Shadow".into(),
            description: String::new(),
        })
        .unwrap_err();
    assert!(matches!(err, CoreError::Authorization { view: View::Departments }));
    assert_eq!(err.severity(), Severity::Warning);
    assert_eq!(app.active_view(), View::Home);
    assert_eq!(app.document(), &before);
}

#[test]
fn test_duplicate_registration_changes_nothing() {
    let mut app = App::start(MemoryStorage::new()).unwrap();
    app.register(&bob_form()).unwrap();
    let before = app.document().clone();
    let blob_before = app.storage().get(DOCUMENT_KEY).unwrap();

    let err = app.register(&bob_form()).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "An account with that email already exists.");
    assert_eq!(app.document(), &before);
    assert_eq!(app.storage().get(DOCUMENT_KEY).unwrap(), blob_before);
}

#[test]
fn test_admin_cannot_delete_itself() {
    let mut app = signed_in("admin@example.com");
    let admin_id = app.current_account().unwrap().id.clone();
    let before = app.document().clone();

    let err = app.delete_account(&admin_id).unwrap_err();
    assert_eq!(err.to_string(), "You cannot delete your own account!");
    assert_eq!(app.document(), &before);
    assert_eq!(app.session().principal_id(), Some(&admin_id));
    assert_eq!(
        app.storage().get(SESSION_TOKEN_KEY).unwrap().as_deref(),
        Some("admin@example.com")
    );
}

#[test]
fn test_request_without_named_items_is_not_created() {
    let mut app = user_app();
    let err = app
        .submit_request(&RequestForm {
            kind: "Equipment".into(),
            items: vec![ItemInput::new("   ", Some("4")), ItemInput::new("", None)],
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Please add at least one item.");
    assert!(app.document().requests.is_empty());

    app.submit_request(&RequestForm {
        kind: "Equipment".into(),
        items: vec![ItemInput::new("Keyboard", Some("abc"))],
    })
    .unwrap();
    let requests = &app.document().requests;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].items[0].qty.get(), 1);
}

#[test]
fn test_deleted_principal_loses_session_on_restart() {
    let mut admin = signed_in("admin@example.com");
    admin
        .create_account(&orgdesk_core::AccountForm {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@x.com".into(),
            password: Some("secret1".into()),
            role: Role::User,
            verified: true,
        })
        .unwrap();
    let ann_id = admin.document().account_by_email("ann@x.com").unwrap().id.clone();
    admin.delete_account(&ann_id).unwrap();

    let mut storage = admin.into_storage();
    storage.set(SESSION_TOKEN_KEY, "ann@x.com").unwrap();
    let app = App::start(storage).unwrap();
    assert!(app.current_account().is_none());
    assert_eq!(app.storage().get(SESSION_TOKEN_KEY).unwrap(), None);
    assert!(app.document().get::<Account>(&ann_id).is_none());
}

#[test]
fn test_renderer_receives_notices_then_view() {
    let mut app = user_app();
    app.take_notifications();
    app.navigate("#/employees").unwrap();

    let mut renderer = RecordingRenderer::default();
    app.present(&mut renderer);
    assert_eq!(renderer.notifications.len(), 1);
    assert_eq!(renderer.notifications[0].severity, Severity::Error);
    assert_eq!(renderer.rendered.len(), 1);
    assert_eq!(renderer.rendered[0].0, View::Home);
}

#[test]
fn test_departments_view_model_lists_seed_data() {
    let mut app = signed_in("admin@example.com");
    app.navigate("#/departments").unwrap();
    insta::assert_json_snapshot!(app.view_model(), @r#"
    {
      "view": "departments",
      "rows": [
        {
          "id": "dept_1",
          "name": "Engineering",
          "description": "Software team"
        },
        {
          "id": "dept_2",
          "name": "HR",
          "description": "Human Resources"
        }
      ]
    }
    "#);
}
