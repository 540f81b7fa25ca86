// Copyright (c) Smolegends Developers
// SPDX-License-Identifier: Apache-2.0

//! This module provides functionalities for accessing the Smolegends contract
//! on an Ethereum node.

pub mod common;
pub mod contract;
pub mod session;

/// Helper types for tests.
pub mod test_utils;
