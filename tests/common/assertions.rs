//! Custom assertion macros and utilities

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a result is an error, optionally of a given variant
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        assert!($result.is_err(), "Expected Err, got Ok");
    };
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => panic!("Expected different error variant, got: {:?}", e),
        }
    };
}

/// Assert the ids of a JSON message list, in order
#[macro_export]
macro_rules! assert_ids {
    ($messages:expr, $expected:expr) => {
        let ids: Vec<i64> = $messages
            .as_array()
            .expect("expected a JSON array of messages")
            .iter()
            .map(|m| m["id"].as_i64().expect("message without numeric id"))
            .collect();
        pretty_assertions::assert_eq!(ids, $expected);
    };
}
