// ABOUTME: Core domain crate for the PulseTrack fitness backend
// ABOUTME: Models, partial-update merge rules and the unified error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # PulseTrack Core
//!
//! Storage-agnostic types shared by the server: entity models, request
//! payloads with their validation, and [`errors::AppError`].

/// Unified error handling
pub mod errors;

/// Domain models
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
