// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Error returned when a string names neither a boolean nor an edge.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown partial visibility mode `{input}`; expected `true`, `false`, `top`, `left`, `bottom` or `right`")]
pub struct ParseEdgeError {
    /// The rejected input.
    pub input: String,
}

impl ParseEdgeError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.into(),
        }
    }
}
