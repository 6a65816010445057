// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-call marshaling scope.

use crate::container::DataContainer;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::mapper::{Record, RfcMapper, SharedMapper};

/// Marshaling scope of one remote function call.
///
/// Binds the function name to the process-wide [`SharedMapper`] and,
/// optionally, to a call-scoped [`RfcMapper`]. Record types registered in
/// the call-scoped mapper override the shared ones; every other type still
/// resolves through the shared mapper.
///
/// The remote invocation itself happens between [`set_input`](Self::set_input)
/// and [`get_output`](Self::get_output) and is not part of this crate.
#[derive(Debug, Clone, Copy)]
pub struct FunctionCall<'a> {
    name: &'a str,
    shared: &'a SharedMapper,
    local: Option<&'a RfcMapper>,
}

impl<'a> FunctionCall<'a> {
    /// Scope for function `name` using the shared mapper only.
    pub fn new(name: &'a str, shared: &'a SharedMapper) -> Self {
        Self {
            name,
            shared,
            local: None,
        }
    }

    /// Use `mapper` ahead of the shared mapper for this call.
    pub fn with_mapper(mut self, mapper: &'a RfcMapper) -> Self {
        self.local = Some(mapper);
        self
    }

    /// Remote function name.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Encode the input parameters. `None` sends no parameters.
    pub fn set_input<T: Record>(&self, container: &dyn DataContainer, input: Option<&T>) -> Result<()> {
        log::debug!("[FunctionCall::set_input] {}", self.name);
        let shared = self.shared.read();
        Encoder::layered(&shared, self.local).encode(container, input)
    }

    /// Decode the output parameters.
    pub fn get_output<T: Record>(&self, container: &dyn DataContainer) -> Result<T> {
        log::debug!("[FunctionCall::get_output] {}", self.name);
        let shared = self.shared.read();
        Decoder::layered(&shared, self.local).decode(container)
    }
}
