#![allow(dead_code)]

use quill_sql::{Build, Error, Result};

pub fn sql(builder: impl Build) -> String {
    builder
        .build()
        .unwrap_or_else(|e| panic!("Failed to build statement: {e}"))
        .render()
}

pub fn state_err<T>(result: Result<T>) -> Error {
    match result {
        Ok(_) => panic!("Expected a construction-state error"),
        Err(err) => {
            assert!(err.is_construction_state(), "unexpected error: {err:?}");
            err
        }
    }
}

pub fn build_err(builder: impl Build) -> Error {
    state_err(builder.build())
}
