// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Warmlink cloud API client.
//!
//! The API is a handful of JSON POST endpoints behind an `x-token` session
//! header. [`CloudClient`] keeps that token as its only state; everything
//! else is a stateless request/response exchange.

mod auth;
mod client;

pub use client::CloudClient;
