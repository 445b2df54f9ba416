//! Command integration tests.
//!
//! Commands compiled by the stock registry against the memory adapter.

use rowmap_tests::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

mod builtins {
    use super::*;

    #[test]
    fn test_create_single_record() {
        // GIVEN
        let fixture = Fixture::new();
        let registry = CommandRegistry::default();

        // WHEN
        let create = registry
            .compile(
                fixture.users(),
                &CommandType::CREATE,
                &CompileOptions::new(ResultShape::One),
            )
            .unwrap();
        let result = create.call(Some(record! { "name" => "Jane" }.into())).unwrap();

        // THEN
        assert_eq!(result, Payload::One(record! { "id" => 1i64, "name" => "Jane" }));
    }

    #[test]
    fn test_create_many_keeps_input_order() {
        let fixture = Fixture::new();
        let registry = CommandRegistry::default();

        let create = registry.command(fixture.users(), "create").unwrap();
        let result = create
            .call(Some(Payload::Many(vec![
                record! { "name" => "Jane" },
                record! { "name" => "Joe" },
            ])))
            .unwrap();

        let ids: Vec<_> = result
            .into_records()
            .into_iter()
            .map(|r| r["id"].clone())
            .collect();
        assert_eq!(ids, vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_one_result_rejects_multi_row_write() {
        // GIVEN
        let fixture = Fixture::new();
        fixture.seed_users(&["Jane", "Joe"]);
        let registry = CommandRegistry::default();

        // WHEN
        let delete = registry
            .compile(
                fixture.users(),
                &CommandType::DELETE,
                &CompileOptions::new(ResultShape::One),
            )
            .unwrap();
        let err = delete.call(None).unwrap_err();

        // THEN
        assert_eq!(
            err,
            CommandError::Shape(ShapeError::tuple_count_mismatch(ResultShape::One, 2))
        );
        assert_eq!(fixture.users().to_vec().unwrap().len(), 2);
    }

    #[test]
    fn test_one_result_update_leaves_rows_untouched_on_mismatch() {
        // GIVEN
        let fixture = Fixture::new();
        fixture.seed_users(&["Jane", "Joe"]);
        let update = CommandRegistry::default()
            .compile(
                fixture.users(),
                &CommandType::UPDATE,
                &CompileOptions::new(ResultShape::One),
            )
            .unwrap();

        // WHEN
        let err = update.call(Some(record! { "age" => 40i64 }.into())).unwrap_err();

        // THEN
        assert_eq!(
            err,
            CommandError::Shape(ShapeError::tuple_count_mismatch(ResultShape::One, 2))
        );
        let rows = fixture.users().to_vec().unwrap();
        assert!(rows.iter().all(|row| row.get("age").is_none()));
    }

    #[test]
    fn test_one_result_delete_of_nothing_fails_without_writing() {
        let fixture = Fixture::new();
        fixture.seed_users(&["Jane"]);
        let delete = CommandRegistry::default()
            .compile(
                &fixture.user(2),
                &CommandType::DELETE,
                &CompileOptions::new(ResultShape::One),
            )
            .unwrap();

        let err = delete.call(None).unwrap_err();

        assert_eq!(
            err,
            CommandError::Shape(ShapeError::tuple_count_mismatch(ResultShape::One, 0))
        );
        assert_eq!(fixture.users().to_vec().unwrap().len(), 1);
    }

    #[test]
    fn test_one_result_delete_of_single_row() {
        let fixture = Fixture::new();
        fixture.seed_users(&["Jane", "Joe"]);
        let delete = CommandRegistry::default()
            .compile(
                &fixture.user(1),
                &CommandType::DELETE,
                &CompileOptions::new(ResultShape::One),
            )
            .unwrap();

        let deleted = delete.call(None).unwrap();

        assert_eq!(deleted, Payload::One(record! { "id" => 1i64, "name" => "Jane" }));
        assert_eq!(fixture.users().to_vec().unwrap().len(), 1);
    }

    #[test]
    fn test_adapter_failure_keeps_its_kind() {
        let fixture = Fixture::new();
        let registry = CommandRegistry::default();
        let create = registry.command(fixture.users(), "create").unwrap();

        create
            .call(Some(record! { "id" => 7i64, "name" => "Jane" }.into()))
            .unwrap();
        let err = create
            .call(Some(record! { "id" => 7i64, "name" => "Copy" }.into()))
            .unwrap_err();

        assert!(matches!(
            err,
            CommandError::Relation(RelationError::DuplicateKey { .. })
        ));
    }
}

mod forwarding {
    use super::*;

    #[test]
    fn test_update_forwards_view_to_relation() {
        // GIVEN
        let fixture = Fixture::new();
        let registry = CommandRegistry::default();
        let update = registry.command(fixture.users(), "update").unwrap();

        // WHEN
        let restricted = update.forward("by_id", &[Value::Int(1)]).unwrap();

        // THEN
        assert_eq!(restricted.relation().signature(), fixture.user(1).signature());
        assert_eq!(restricted.command_type(), &CommandType::UPDATE);
        assert!(Arc::ptr_eq(restricted.class(), update.class()));
    }

    #[test]
    fn test_forwarded_update_touches_one_row() {
        let fixture = Fixture::new();
        fixture.seed_users(&["Jane", "Joe"]);
        let registry = CommandRegistry::default();

        let update = registry
            .compile(
                fixture.users(),
                &CommandType::UPDATE,
                &CompileOptions::new(ResultShape::One),
            )
            .unwrap()
            .forward("by_name", &[Value::from("Joe")])
            .unwrap();
        let result = update
            .call(Some(record! { "name" => "Joseph" }.into()))
            .unwrap();

        assert_eq!(result, Payload::One(record! { "id" => 2i64, "name" => "Joseph" }));
        assert_eq!(fixture.user(1).to_vec().unwrap()[0]["name"], Value::from("Jane"));
    }

    #[test]
    fn test_unknown_view_is_unsupported() {
        let fixture = Fixture::new();
        let registry = CommandRegistry::default();
        let update = registry.command(fixture.users(), "update").unwrap();

        let err = update.forward("map_with", &[]).unwrap_err();

        assert_eq!(
            err,
            CommandError::unsupported_operation("map_with", CommandType::UPDATE)
        );
    }

    #[test]
    fn test_create_is_not_restrictable() {
        let fixture = Fixture::new();
        let registry = CommandRegistry::default();
        let create = registry.command(fixture.users(), "create").unwrap();

        assert!(create.as_restrictable().is_none());
        assert!(matches!(
            create.forward("by_id", &[Value::Int(1)]),
            Err(CommandError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_delete_forwarding_narrows_the_delete() {
        let fixture = Fixture::new();
        fixture.seed_users(&["Jane", "Joe"]);
        let registry = CommandRegistry::default();

        let deleted = registry
            .command(fixture.users(), "delete")
            .unwrap()
            .forward("by_id", &[Value::Int(2)])
            .unwrap()
            .call(None)
            .unwrap();

        assert_eq!(deleted.len(), 1);
        assert_eq!(fixture.users().to_vec().unwrap().len(), 1);
    }
}

mod registry {
    use super::*;

    #[test]
    fn test_hooks_decorate_defined_and_generated_classes() {
        // GIVEN
        let fixture = Fixture::new();
        let hook_calls = Arc::new(AtomicUsize::new(0));
        let counter = hook_calls.clone();
        let mut builder = CommandRegistry::builder();
        builder
            .define("users", "create_super", CommandKind::Create)
            .done()
            .unwrap();
        builder.before_build(move |event, class| {
            counter.fetch_add(1, Ordering::SeqCst);
            if event.dataset == "users" {
                class.mark("audited");
            }
        });
        let registry = builder.build();

        // WHEN
        let defined = registry.command(fixture.users(), "create_super").unwrap();
        let generated = registry.command(fixture.users(), "delete").unwrap();
        let again = registry.command(fixture.users(), "delete").unwrap();
        let tasks = registry.command(fixture.tasks(), "delete").unwrap();

        // THEN
        assert!(defined.has_trait("audited"));
        assert!(generated.has_trait("audited"));
        assert!(Arc::ptr_eq(generated.class(), again.class()));
        assert!(!tasks.has_trait("audited"));
        assert_eq!(hook_calls.load(Ordering::SeqCst), 3);
        assert_eq!(registry.class_count(), 3);
    }

    #[test]
    fn test_defined_command_behaves_like_its_kind() {
        let fixture = Fixture::new();
        let mut builder = CommandRegistry::builder();
        builder
            .define("users", "create_super", CommandKind::Create)
            .done()
            .unwrap();
        let registry = builder.build();

        let result = registry
            .command(fixture.users(), "create_super")
            .unwrap()
            .call(Some(record! { "name" => "Jane" }.into()))
            .unwrap();

        assert_eq!(
            result,
            Payload::Many(vec![record! { "id" => 1i64, "name" => "Jane" }])
        );
    }

    #[test]
    fn test_unknown_command_name() {
        let fixture = Fixture::new();
        let registry = CommandRegistry::default();

        let err = registry.command(fixture.users(), "upsert").unwrap_err();

        assert!(matches!(err, CommandError::UnknownCommand { .. }));
    }
}
