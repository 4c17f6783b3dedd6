use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use decoy::{CallError, Method, MethodSignature, Mocker, SignatureError};

#[test]
fn implementations_answer_directly() {
    let mut mocker = Mocker::new("Math");
    let double: Method<(i32,), i32> = mocker
        .method(MethodSignature::new("double").param("n", "i32").returns("i32"))
        .unwrap();
    let halve: Method<(i32,), i32> = mocker
        .method(MethodSignature::new("halve").param("n", "i32").returns("i32"))
        .unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    mocker.implement(&double, move |(n,)| {
        counter.fetch_add(1, Ordering::SeqCst);
        n * 2
    });

    let mock = mocker.mock();
    assert_eq!(mock.call(&double, (4,)), 8);
    assert_eq!(mock.call(&double, (-1,)), -2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    assert!(matches!(
        mock.try_call(&halve, (4,)),
        Err(CallError::UnexpectedCall { .. })
    ));
}

#[test]
fn later_implementations_replace_earlier_ones() {
    let mut mocker = Mocker::new("Math");
    let double: Method<(i32,), i32> = mocker
        .method(MethodSignature::new("double").param("n", "i32").returns("i32"))
        .unwrap();

    mocker
        .implement(&double, |(n,)| n * 2)
        .implement(&double, |(n,)| n + n + 1);

    assert_eq!(mocker.mock().call(&double, (2,)), 5);
}

#[test]
fn clones_share_the_candidates() {
    let mut mocker = Mocker::new("Math");
    let double: Method<(i32,), i32> = mocker
        .method(MethodSignature::new("double").param("n", "i32").returns("i32"))
        .unwrap();

    let (mock, assert) = mocker
        .describe()
        .method(&double)
        .takes_any()
        .returns_from(|(n,)| n * 2)
        .times(2)
        .mock();

    let clone = mock.clone();
    assert_eq!(mock.call(&double, (1,)), 2);
    assert_eq!(clone.call(&double, (2,)), 4);
    assert.check();
}

#[test]
fn registration_checks_the_handle() {
    let mut mocker = Mocker::new("Math");

    let unit: Result<Method<(i32,), ()>, _> =
        mocker.method(MethodSignature::new("double").param("n", "i32").returns("i32"));
    assert_eq!(
        unit.unwrap_err().to_string(),
        "method double declares 1 return values but its return type is ()"
    );

    let missing: Result<Method<(i32,), i32>, _> =
        mocker.method(MethodSignature::new("double").param("n", "i32"));
    assert!(matches!(
        missing,
        Err(SignatureError::Returns { declared: 0, kind: "i32", .. })
    ));

    let variadic: Result<Method<(i32,), ()>, _> =
        mocker.method(MethodSignature::new("sum").param("n", "i32").variadic("rest", "i32"));
    assert_eq!(
        variadic.unwrap_err(),
        SignatureError::Arity {
            method: "sum".to_string(),
            declared: 2,
            actual: 1,
        }
    );

    // failed registrations leave the name free
    let double: Result<Method<(i32,), i32>, _> =
        mocker.method(MethodSignature::new("double").param("n", "i32").returns("i32"));
    assert!(double.is_ok());
}

#[test]
fn debug_lists_the_methods() {
    let mut mocker = Mocker::new("Math");
    let _: Method<(i32, Vec<i32>), i32> = mocker
        .method(
            MethodSignature::new("sum")
                .param("n", "i32")
                .variadic("rest", "i32")
                .returns("i32"),
        )
        .unwrap();

    assert_eq!(
        format!("{:?}", mocker.mock()),
        "Mock { name: \"Math\", methods: [\"sum(n: i32, rest: ...i32) -> i32\"] }"
    );
}
