//! AI features backed by the completion endpoint
//!
//! Every feature follows the same path: build a prompt, make one completion
//! call, read the reply leniently, and fall back to the static table on any
//! failure. [`Assistant::ask`] implements that cascade once.

pub mod client;
pub mod diet;
pub mod exercise;
pub mod health;
pub mod hospitals;
pub mod meal_plan;
pub mod medicine;
pub mod nutrition;

use std::sync::Arc;

pub use client::CompletionClient;
use nutri_core::{AssistError, Assisted, FallbackTable};

/// Completion client plus the fallback table, shared by all AI routes
#[derive(Clone)]
pub struct Assistant {
    client: CompletionClient,
    fallbacks: Arc<FallbackTable>,
}

impl Assistant {
    pub fn new(client: CompletionClient, fallbacks: FallbackTable) -> Self {
        Self {
            client,
            fallbacks: Arc::new(fallbacks),
        }
    }

    pub fn client(&self) -> &CompletionClient {
        &self.client
    }

    pub fn fallbacks(&self) -> &FallbackTable {
        &self.fallbacks
    }

    /// Run one completion and interpret the reply.
    ///
    /// `fallback` supplies the canned payload and its note; it is only called
    /// when the call or the interpretation fails. A reply that could not be
    /// interpreted is still returned as `raw`.
    pub async fn ask<T>(
        &self,
        feature: &'static str,
        prompt: &str,
        max_tokens: u32,
        interpret: impl FnOnce(&str) -> Result<T, AssistError>,
        fallback: impl FnOnce(&FallbackTable) -> (T, String),
    ) -> Assisted<T> {
        let text = match self.client.complete(prompt, max_tokens).await {
            Ok(text) => text,
            Err(err) => return self.degrade(feature, err, fallback),
        };

        match interpret(&text) {
            Ok(data) => {
                record(feature, "live");
                tracing::info!(feature, reply_len = text.len(), "Completion interpreted");
                Assisted::live(data, text)
            }
            Err(err) => self.degrade(feature, err, fallback).with_raw(Some(text)),
        }
    }

    /// Substitute the feature's fallback for a failed call.
    pub fn degrade<T>(
        &self,
        feature: &'static str,
        err: AssistError,
        fallback: impl FnOnce(&FallbackTable) -> (T, String),
    ) -> Assisted<T> {
        record(feature, err.kind());
        match &err {
            AssistError::NoCredential => {
                tracing::debug!(feature, "No completion credential, serving fallback")
            }
            _ => tracing::warn!(
                feature,
                kind = err.kind(),
                error = %err,
                "Completion failed, serving fallback"
            ),
        }
        let (data, note) = fallback(&self.fallbacks);
        Assisted::fallback(data, &note, &err)
    }
}

fn record(feature: &'static str, outcome: &'static str) {
    metrics::counter!(
        "completion_requests_total",
        "feature" => feature,
        "outcome" => outcome
    )
    .increment(1);
}
