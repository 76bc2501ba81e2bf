// ABOUTME: Service layer sitting between HTTP routes and the store
// ABOUTME: Services validate input and depend on injected repository traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Daily record creation, lookup and the partial-update merge resolver
pub mod daily_records;
/// Push notification relay and delivery history
pub mod notifications;

pub use daily_records::DailyRecordService;
pub use notifications::NotificationService;
