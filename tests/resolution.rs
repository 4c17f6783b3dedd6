use decoy::{CallError, Label, Method, MethodSignature, Mocker};

fn checker() -> (Mocker, Method<(i32, String), bool>) {
    let mut mocker = Mocker::new("Checker");
    let check = mocker
        .method(
            MethodSignature::new("check")
                .param("n", "i32")
                .param("tag", "&str")
                .returns("bool"),
        )
        .unwrap();

    (mocker, check)
}

fn positive(n: &i32) -> Result<(), &'static str> {
    if *n > 0 {
        Ok(())
    } else {
        Err("not positive")
    }
}

#[test]
fn every_mismatch_is_explained() {
    let (mocker, check) = checker();

    let (mock, _) = mocker
        .describe()
        .method_labeled(&check, "positive")
        .takes_matching(positive)
        .and("a")
        .returns(true)
        .mock();

    let error = mock.try_call(&check, (-1, "b".to_string())).unwrap_err();
    assert_eq!(
        error.to_string(),
        "no matching candidate for call to mock for Checker.check with args:\n\
         \n\
         \t-1\n\
         \t\"b\"\n\
         \n\
         failing candidates:\n\
         \tcandidate described at positive:\n\
         \n\
         \t\tparameter #1 \"n\" custom matcher error: not positive\n\
         \t\tparameter #2 \"tag\" mismatch:\n\
         \t\t(-expected +actual)\n\
         \t\t- \"a\"\n\
         \t\t+ \"b\""
    );
}

#[test]
fn ambiguous_candidates_are_all_listed() {
    let (mocker, check) = checker();

    let (mock, _) = mocker
        .describe()
        .method_labeled(&check, "first")
        .takes(1)
        .and_any()
        .returns(true)
        .method_labeled(&check, "second")
        .takes_any()
        .and("a")
        .returns(false)
        .method_labeled(&check, "third")
        .takes(2)
        .and_any()
        .returns(false)
        .mock();

    let error = mock.try_call(&check, (1, "a".to_string())).unwrap_err();
    assert_eq!(
        error.to_string(),
        "more than one candidate for call to mock for Checker.check with args:\n\
         \n\
         \t1\n\
         \t\"a\"\n\
         \n\
         matching candidates:\n\
         \tcandidate described at first\n\
         \tcandidate described at second"
    );

    // unambiguous calls still resolve
    assert!(mock.call(&check, (1, "b".to_string())));
    assert!(!mock.call(&check, (7, "a".to_string())));
}

#[test]
fn ambiguity_ignores_declaration_order() {
    let (mocker, check) = checker();

    let (mock, _) = mocker
        .describe()
        .method_labeled(&check, "second")
        .takes_any()
        .and("a")
        .returns(false)
        .method_labeled(&check, "first")
        .takes(1)
        .and_any()
        .returns(true)
        .mock();

    match mock.try_call(&check, (1, "a".to_string())) {
        Err(CallError::AmbiguousMatch { candidates, .. }) => {
            assert_eq!(
                candidates.0,
                vec![
                    Label::Explicit("second".to_string()),
                    Label::Explicit("first".to_string())
                ]
            );
        }
        other => panic!("unexpected resolution: {:?}", other),
    }
}

#[test]
#[should_panic(expected = "more than one candidate for call to mock for Checker.check")]
fn ambiguous_call_panics() {
    let (mocker, check) = checker();

    let (mock, _) = mocker
        .describe()
        .method(&check)
        .takes_any()
        .and_any()
        .returns(true)
        .method(&check)
        .takes_any()
        .and_any()
        .returns(false)
        .mock();

    mock.call(&check, (1, "a".to_string()));
}

#[test]
fn every_failing_candidate_is_listed() {
    let (mocker, check) = checker();

    let (mock, _) = mocker
        .describe()
        .method_labeled(&check, "one")
        .takes(1)
        .and_any()
        .returns(true)
        .method_labeled(&check, "two")
        .takes(2)
        .and_any()
        .returns(true)
        .mock();

    match mock.try_call(&check, (3, "a".to_string())) {
        Err(CallError::NoMatchingCandidate {
            mock,
            method,
            args,
            candidates,
        }) => {
            assert_eq!(mock, "Checker");
            assert_eq!(method, "check");
            assert_eq!(args.0, vec!["3", "\"a\""]);
            let labels: Vec<_> = candidates.0.iter().map(|c| c.label.clone()).collect();
            assert_eq!(
                labels,
                vec![
                    Label::Explicit("one".to_string()),
                    Label::Explicit("two".to_string())
                ]
            );
            assert_eq!(candidates.0[0].reasons.len(), 1);
        }
        other => panic!("unexpected resolution: {:?}", other),
    }
}

#[test]
fn satisfied_candidates_stay_eligible() {
    let (mocker, check) = checker();

    let (mock, assert) = mocker
        .describe()
        .method(&check)
        .takes(1)
        .and("a")
        .returns(true)
        .times(1)
        .mock();

    assert!(mock.call(&check, (1, "a".to_string())));
    assert!(mock.call(&check, (1, "a".to_string())));

    let report = assert.report();
    assert_eq!(report.failures().len(), 1);
    assert_eq!(report.failures()[0].message(), "expected exactly 1 calls, got 2");
}

#[test]
fn no_arguments() {
    let mut mocker = Mocker::new("Clock");
    let now: Method<(), u64> = mocker
        .method(MethodSignature::new("now").returns("u64"))
        .unwrap();

    let (mock, _) = mocker.describe().method(&now).returns(1234).mock();
    assert_eq!(mock.call(&now, ()), 1234);
}

#[test]
fn no_arguments_ambiguity_renders_placeholder() {
    let mut mocker = Mocker::new("Clock");
    let now: Method<(), u64> = mocker
        .method(MethodSignature::new("now").returns("u64"))
        .unwrap();

    let (mock, _) = mocker
        .describe()
        .method_labeled(&now, "a")
        .returns(1)
        .method_labeled(&now, "b")
        .returns(2)
        .mock();

    assert!(mock
        .try_call(&now, ())
        .unwrap_err()
        .to_string()
        .contains("with args:\n\n\t<no arguments>\n\n"));
}

#[test]
#[should_panic(expected = "method check is not registered on mock for Other")]
fn describing_a_foreign_method_panics() {
    let (_, check) = checker();
    let _ = Mocker::new("Other").describe().method(&check);
}

#[test]
#[should_panic(expected = "method check is not registered on mock for Checker")]
fn calling_with_a_foreign_method_panics() {
    let (_, check) = checker();
    let (mocker, _) = checker();
    let (mock, _) = mocker.describe().mock();

    mock.call(&check, (1, "a".to_string()));
}

#[test]
fn description_spread_over_statements() {
    let (mocker, check) = checker();

    let mut describe = mocker.describe();
    for n in 0..3 {
        describe = describe
            .method(&check)
            .takes(n)
            .and_any()
            .returns(n % 2 == 0)
            .times(1);
    }
    let (mock, assert) = describe.mock();

    assert!(mock.call(&check, (0, "x".to_string())));
    assert!(!mock.call(&check, (1, "y".to_string())));
    assert!(mock.call(&check, (2, "z".to_string())));
    assert.check();
}
