// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock connection provider for deterministic handler tests.
//!
//! `MockConnectionProvider` implements `ConnectionProvider` without touching
//! disk and counts every acquire, operation, and close so tests can assert
//! that connections are scoped correctly.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use herald_config::ConnectionConfig;
use herald_core::{HeraldError, Message};
use herald_storage::{AccessMode, ConnectionProvider, StoreConnection};

/// Where an injected failure fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// `acquire` fails with a connection error carrying this detail.
    Connect(String),
    /// `initialize_schema` fails with this detail.
    SchemaInit(String),
    /// `read_messages` fails with this detail.
    Read(String),
}

/// Call counters shared between the provider and its connections.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub acquired: AtomicUsize,
    pub closed: AtomicUsize,
    pub initialized: AtomicUsize,
    pub read: AtomicUsize,
    pub pinged: AtomicUsize,
}

impl CallCounts {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn initialized(&self) -> usize {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn read(&self) -> usize {
        self.read.load(Ordering::SeqCst)
    }

    pub fn pinged(&self) -> usize {
        self.pinged.load(Ordering::SeqCst)
    }
}

/// A provider that hands out in-memory connections.
#[derive(Debug, Clone, Default)]
pub struct MockConnectionProvider {
    counts: Arc<CallCounts>,
    messages: Vec<Message>,
    failure: Option<Failure>,
}

impl MockConnectionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned by `read_messages`, in the order given.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_failure(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Shared handle to the counters; stays valid after the provider moves.
    pub fn counts(&self) -> Arc<CallCounts> {
        self.counts.clone()
    }
}

#[async_trait]
impl ConnectionProvider for MockConnectionProvider {
    async fn acquire(
        &self,
        _config: &ConnectionConfig,
        _mode: AccessMode,
    ) -> Result<Box<dyn StoreConnection>, HeraldError> {
        self.counts.acquired.fetch_add(1, Ordering::SeqCst);
        if let Some(Failure::Connect(detail)) = &self.failure {
            return Err(HeraldError::connection(detail));
        }
        Ok(Box::new(MockConnection {
            counts: self.counts.clone(),
            messages: self.messages.clone(),
            failure: self.failure.clone(),
        }))
    }
}

/// Connection produced by [`MockConnectionProvider`].
pub struct MockConnection {
    counts: Arc<CallCounts>,
    messages: Vec<Message>,
    failure: Option<Failure>,
}

#[async_trait]
impl StoreConnection for MockConnection {
    async fn initialize_schema(&self) -> Result<(), HeraldError> {
        self.counts.initialized.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(Failure::SchemaInit(detail)) => Err(HeraldError::schema_init(detail)),
            _ => Ok(()),
        }
    }

    async fn read_messages(&self) -> Result<Vec<Message>, HeraldError> {
        self.counts.read.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(Failure::Read(detail)) => Err(HeraldError::read(detail)),
            _ => Ok(self.messages.clone()),
        }
    }

    async fn ping(&self) -> Result<(), HeraldError> {
        self.counts.pinged.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<(), HeraldError> {
        self.counts.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Build a [`Message`] from a `YYYY-MM-DD HH:MM:SS` timestamp.
///
/// Panics on a malformed timestamp; intended for test fixtures only.
pub fn message(id: i64, text: &str, created_at: &str) -> Message {
    let created_at = NaiveDateTime::parse_from_str(created_at, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|e| panic!("bad fixture timestamp {created_at:?}: {e}"));
    Message {
        id,
        message: text.to_string(),
        created_at,
    }
}
