//! Repository integration tests.

use rowmap_tests::prelude::*;

#[test]
fn test_create_update_delete_cycle() {
    // GIVEN
    init_tracing();
    let fixture = Fixture::new();
    let repo = fixture.repository();

    // WHEN
    let created = repo
        .changeset("users", record! { "name" => "Jane", "age" => 30i64 })
        .unwrap()
        .commit()
        .unwrap();
    let updated = repo
        .update_changeset("users", 1i64, record! { "age" => 31i64 })
        .unwrap()
        .commit()
        .unwrap();
    let deleted = repo
        .delete_changeset(fixture.user(1))
        .unwrap()
        .commit()
        .unwrap();

    // THEN
    assert_eq!(
        created,
        Payload::One(record! { "id" => 1i64, "name" => "Jane", "age" => 30i64 })
    );
    assert_eq!(
        updated,
        Payload::One(record! { "id" => 1i64, "name" => "Jane", "age" => 31i64 })
    );
    assert_eq!(deleted.len(), 1);
    assert!(fixture.users().to_vec().unwrap().is_empty());
}

#[test]
fn test_changesets_use_the_repository_compiler() {
    // GIVEN
    let fixture = Fixture::new();
    let compiler = CountingCompiler::over(CommandRegistry::default());
    let repo = fixture.repository_with(compiler.clone());

    // WHEN
    repo.changeset("tasks", record! { "title" => "Write docs", "user_id" => 1i64 })
        .unwrap()
        .commit()
        .unwrap();
    let unchanged = repo
        .update_changeset("tasks", 1i64, record! { "title" => "Write docs" })
        .unwrap();

    // THEN
    assert!(!unchanged.has_changes());
    unchanged.commit().unwrap();
    assert_eq!(compiler.calls(), 1);
    assert_eq!(compiler.requests()[0].relation, RelationName::from("tasks"));
}

#[test]
fn test_custom_class_through_repository() {
    // GIVEN
    let fixture = Fixture::new();
    let mut builder = CommandRegistry::builder();
    builder
        .define("users", "create_super", CommandKind::Create)
        .with_trait("super")
        .done()
        .unwrap();
    let repo = fixture.repository_with(Arc::new(builder.build()));
    let class = ChangesetClass::create()
        .subclass("SuperCreate")
        .default_command_type("create_super")
        .build()
        .for_relation("users");

    // WHEN
    let result = repo
        .changeset_of(
            &class,
            fixture.users().clone(),
            ChangesetOptions::new().data(record! { "name" => "Jane" }),
        )
        .unwrap()
        .commit()
        .unwrap();

    // THEN
    assert_eq!(result, Payload::One(record! { "id" => 1i64, "name" => "Jane" }));
    assert!(repo
        .command("users", "create_super")
        .unwrap()
        .has_trait("super"));
}

#[test]
fn test_update_of_missing_record() {
    let fixture = Fixture::new();
    let repo = fixture.repository();

    let err = repo
        .update_changeset("users", 9i64, record! { "name" => "Ghost" })
        .unwrap_err();

    assert_eq!(
        err,
        RepositoryError::RecordNotFound {
            relation: "users".into(),
            key: Value::Int(9),
        }
    );
}

#[test]
fn test_primary_key_change_is_rejected_by_adapter() {
    let fixture = Fixture::new();
    fixture.seed_users(&["Jane"]);
    let repo = fixture.repository();

    let err = repo
        .update_changeset("users", 1i64, record! { "id" => 5i64 })
        .unwrap()
        .commit()
        .unwrap_err();

    assert!(matches!(
        err,
        ChangesetError::Command(CommandError::Relation(RelationError::PrimaryKeyChange { .. }))
    ));
}
