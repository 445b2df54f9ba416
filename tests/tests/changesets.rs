//! Changeset integration tests.
//!
//! Changesets committed through a recording compiler over the stock registry.

use proptest::prelude::*;
use rowmap_tests::prelude::*;
use std::thread;

fn options(compiler: &Arc<CountingCompiler>) -> ChangesetOptions {
    ChangesetOptions::new().shared_compiler(compiler.clone())
}

mod specialization {
    use super::*;

    #[test]
    fn test_same_key_same_class() {
        let first = ChangesetClass::create().for_relation("users");
        let second = ChangesetClass::create().for_relation("users");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.relation(), Some(&RelationName::from("users")));
    }

    #[test]
    fn test_concurrent_first_access_has_one_winner() {
        // GIVEN
        let base = ChangesetClass::update().subclass("RacingUpdate").build();

        // WHEN
        let classes: Vec<_> = (0..16)
            .map(|_| {
                let base = base.clone();
                thread::spawn(move || base.for_relation("racing_users"))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        // THEN
        assert!(classes.iter().all(|class| Arc::ptr_eq(class, &classes[0])));
        assert!(classes[0].is_a(&base));
    }

    #[test]
    fn test_custom_subclass_specializes_with_its_default() {
        let new_tag = ChangesetClass::create()
            .subclass("NewTag")
            .default_command_type("upsert")
            .build();

        let tags = new_tag.for_relation("tags");

        assert_eq!(tags.default_command_type().as_str(), "upsert");
        assert!(!Arc::ptr_eq(&tags, &ChangesetClass::create().for_relation("tags")));
    }
}

mod create {
    use super::*;

    #[test]
    fn test_end_to_end_create() {
        // GIVEN
        init_tracing();
        let fixture = Fixture::new();
        let compiler = CountingCompiler::over(CommandRegistry::default());
        let changeset = ChangesetClass::create()
            .for_relation("users")
            .new_changeset(
                fixture.users().clone(),
                options(&compiler).data(record! { "name" => "Jane" }),
            )
            .unwrap();

        // WHEN
        let result = changeset.commit().unwrap();

        // THEN
        assert_eq!(result, Payload::One(record! { "id" => 1i64, "name" => "Jane" }));
        assert_eq!(
            compiler.requests(),
            vec![CompileRequest {
                relation: "users".into(),
                command_type: CommandType::CREATE,
                result: ResultShape::One,
            }]
        );
    }

    #[test]
    fn test_create_many_compiles_for_many() {
        let fixture = Fixture::new();
        let compiler = CountingCompiler::over(CommandRegistry::default());
        let changeset = ChangesetClass::create()
            .new_changeset(
                fixture.users().clone(),
                options(&compiler)
                    .data(vec![record! { "name" => "Jane" }, record! { "name" => "Joe" }]),
            )
            .unwrap();

        let result = changeset.commit().unwrap();

        assert_eq!(result.shape(), ResultShape::Many);
        assert_eq!(result.len(), 2);
        assert_eq!(compiler.requests()[0].result, ResultShape::Many);
    }

    #[test]
    fn test_missing_compiler_fails_at_commit_only() {
        let fixture = Fixture::new();

        let changeset = ChangesetClass::create()
            .for_relation("users")
            .new_changeset(
                fixture.users().clone(),
                ChangesetOptions::new().data(record! { "name" => "Jane" }),
            )
            .unwrap();

        assert_eq!(
            changeset.commit().unwrap_err(),
            ChangesetError::missing_command_compiler("users".into())
        );
        assert!(fixture.users().to_vec().unwrap().is_empty());
    }

    #[test]
    fn test_command_failure_propagates_with_kind() {
        let fixture = Fixture::new();
        let compiler = CountingCompiler::over(CommandRegistry::default());
        let changeset = ChangesetClass::create()
            .new_changeset(
                fixture.users().clone(),
                options(&compiler).command_type("upsert"),
            )
            .unwrap();

        let err = changeset.commit().unwrap_err();

        assert!(matches!(
            err,
            ChangesetError::Command(CommandError::UnknownCommand { .. })
        ));
    }
}

mod with {
    use super::*;

    #[test]
    fn test_with_returns_new_changeset_and_keeps_receiver() {
        // GIVEN
        let fixture = Fixture::new();
        let compiler = CountingCompiler::over(CommandRegistry::default());
        let base = ChangesetClass::create()
            .for_relation("users")
            .new_changeset(fixture.users().clone(), options(&compiler))
            .unwrap();

        // WHEN
        let derived = base.with_data(record! { "name" => "Jane" }).unwrap();

        // THEN
        assert!(base.data().is_none());
        assert_eq!(derived.data(), Some(&Payload::One(record! { "name" => "Jane" })));
        assert!(Arc::ptr_eq(derived.class(), base.class()));
        assert_eq!(derived.result(), ResultShape::One);
        assert_eq!(
            derived.commit().unwrap(),
            Payload::One(record! { "id" => 1i64, "name" => "Jane" })
        );
    }

    #[test]
    fn test_with_carries_custom_options() {
        let fixture = Fixture::new();
        let base = ChangesetClass::create()
            .for_relation("users")
            .new_changeset(
                fixture.users().clone(),
                ChangesetOptions::new().option("source", "import"),
            )
            .unwrap();

        let derived = base.with(ChangesetOptions::new().option("batch", 2i64)).unwrap();

        assert_eq!(derived.options().get("source"), Some(&Value::from("import")));
        assert_eq!(derived.options().get("batch"), Some(&Value::Int(2)));
        assert_eq!(base.options().get("batch"), None);
    }
}

mod update {
    use super::*;

    fn seeded() -> (Fixture, Record) {
        let fixture = Fixture::new();
        let original = fixture
            .users()
            .insert(vec![record! { "name" => "Jane", "age" => 30i64 }])
            .unwrap()
            .remove(0);
        (fixture, original)
    }

    #[test]
    fn test_update_writes_only_the_diff() {
        // GIVEN
        let (fixture, original) = seeded();
        let compiler = CountingCompiler::over(CommandRegistry::default());
        let changeset = ChangesetClass::update()
            .for_relation("users")
            .new_changeset(
                fixture.user(1),
                options(&compiler)
                    .original(original)
                    .data(record! { "name" => "Jane", "age" => 31i64 }),
            )
            .unwrap();

        // WHEN
        let diff = changeset.diff().cloned();
        let result = changeset.commit().unwrap();

        // THEN
        assert_eq!(diff, Some(record! { "age" => 31i64 }));
        assert_eq!(
            result,
            Payload::One(record! { "id" => 1i64, "name" => "Jane", "age" => 31i64 })
        );
        assert_eq!(compiler.requests()[0].command_type, CommandType::UPDATE);
        assert_eq!(compiler.inputs(), vec![Some(Payload::One(record! { "age" => 31i64 }))]);
    }

    #[test]
    fn test_unchanged_update_is_a_no_op() {
        // GIVEN
        let (fixture, original) = seeded();
        let compiler = CountingCompiler::over(CommandRegistry::default());
        let changeset = ChangesetClass::update()
            .for_relation("users")
            .new_changeset(
                fixture.user(1),
                options(&compiler)
                    .original(original.clone())
                    .data(record! { "age" => 30i64 }),
            )
            .unwrap();

        // WHEN
        let result = changeset.commit().unwrap();

        // THEN
        assert_eq!(result, Payload::One(original));
        assert_eq!(compiler.calls(), 0);
    }

    #[test]
    fn test_update_without_original_sends_full_data() {
        let (fixture, _) = seeded();
        let compiler = CountingCompiler::over(CommandRegistry::default());
        let changeset = ChangesetClass::update()
            .for_relation("users")
            .new_changeset(
                fixture.user(1),
                options(&compiler).data(record! { "name" => "Janet" }),
            )
            .unwrap();

        assert!(changeset.diff().is_none());
        assert_eq!(
            changeset.commit().unwrap(),
            Payload::One(record! { "id" => 1i64, "name" => "Janet", "age" => 30i64 })
        );
    }
}

mod delete {
    use super::*;

    #[test]
    fn test_delete_removes_restricted_rows_and_ignores_data() {
        // GIVEN
        let fixture = Fixture::new();
        fixture.seed_users(&["Jane", "Joe"]);
        let compiler = CountingCompiler::over(CommandRegistry::default());
        let changeset = ChangesetClass::delete()
            .for_relation("users")
            .new_changeset(
                fixture.user(2),
                options(&compiler).data(vec![record! { "ignored" => true }]),
            )
            .unwrap();

        // WHEN
        let deleted = changeset.commit().unwrap();

        // THEN
        assert_eq!(deleted, Payload::Many(vec![record! { "id" => 2i64, "name" => "Joe" }]));
        assert_eq!(fixture.users().to_vec().unwrap().len(), 1);
    }

    #[test]
    fn test_single_record_data_does_not_narrow_the_result() {
        // GIVEN
        let fixture = Fixture::new();
        fixture.seed_users(&["Jane", "Joe"]);
        let compiler = CountingCompiler::over(CommandRegistry::default());
        let changeset = ChangesetClass::delete()
            .for_relation("users")
            .new_changeset(
                fixture.users().clone(),
                options(&compiler).data(record! { "ignored" => true }),
            )
            .unwrap();

        // WHEN
        let deleted = changeset.commit().unwrap();

        // THEN
        assert_eq!(deleted.len(), 2);
        assert_eq!(compiler.requests()[0].result, ResultShape::Many);
        assert_eq!(compiler.inputs(), vec![None]);
        assert!(fixture.users().to_vec().unwrap().is_empty());
    }
}

mod forwarding {
    use super::*;

    #[test]
    fn test_changesets_do_not_forward_views() {
        let fixture = Fixture::new();
        let changeset = ChangesetClass::update()
            .new_changeset(fixture.users().clone(), ChangesetOptions::new())
            .unwrap();

        let err = changeset.forward("by_id", &[Value::Int(1)]).unwrap_err();

        assert!(matches!(err, ChangesetError::UnsupportedOperation { .. }));
        assert_eq!(changeset.to_string(), "<Changeset relation=users>");
    }
}

proptest! {
    #[test]
    fn result_shape_matches_data(batch in prop::option::of(0usize..5)) {
        let fixture = Fixture::new();
        let options = match batch {
            Some(n) => ChangesetOptions::new().data(
                (0..n).map(|i| record! { "n" => i as i64 }).collect::<Vec<_>>(),
            ),
            None => ChangesetOptions::new().data(record! { "n" => 0i64 }),
        };
        let changeset = ChangesetClass::create()
            .new_changeset(fixture.users().clone(), options)
            .unwrap();

        let expected = if batch.is_some() { ResultShape::Many } else { ResultShape::One };
        prop_assert_eq!(changeset.result(), expected);
    }

    #[test]
    fn replaying_the_original_never_writes(age in 0i64..120, name in "[A-Z][a-z]{0,6}") {
        let fixture = Fixture::new();
        let original = record! { "id" => 1i64, "name" => name.clone(), "age" => age };
        let compiler = CountingCompiler::over(CommandRegistry::default());
        let changeset = ChangesetClass::update()
            .new_changeset(
                fixture.users().clone(),
                options(&compiler)
                    .original(original.clone())
                    .data(record! { "name" => name, "age" => age }),
            )
            .unwrap();

        prop_assert_eq!(changeset.commit().unwrap(), Payload::One(original));
        prop_assert_eq!(compiler.calls(), 0);
    }
}
