// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock language model with scripted replies.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use memsearch_core::traits::{PluginAdapter, ProviderAdapter};
use memsearch_core::types::{AdapterType, HealthStatus};
use memsearch_core::MemsearchError;

/// A mock provider that replays a FIFO script.
///
/// Each entry is either a reply or a failure message (returned as
/// [`MemsearchError::Model`]). When the script runs out, every call answers
/// `"mock response"`. Every prompt is recorded with the stop sequences
/// it was sent with.
#[derive(Clone, Default)]
pub struct MockProvider {
    script: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    stops: Arc<Mutex<Vec<Option<Vec<String>>>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider pre-loaded with successful replies.
    pub fn with_responses<S: Into<String>>(responses: impl IntoIterator<Item = S>) -> Self {
        let script = responses.into_iter().map(|r| Ok(r.into())).collect();
        Self {
            script: Arc::new(Mutex::new(script)),
            ..Self::default()
        }
    }

    /// Hold every reply for `delay` after the prompt is recorded.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful reply.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.script.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.script.lock().await.push_back(Err(message.into()));
    }

    /// Every prompt received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    /// Stop sequences of every call, aligned with [`Self::prompts`].
    pub async fn stops(&self) -> Vec<Option<Vec<String>>> {
        self.stops.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.prompts.lock().await.len()
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, MemsearchError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn generate(
        &self,
        prompt: &str,
        stop: Option<&[String]>,
    ) -> Result<String, MemsearchError> {
        self.prompts.lock().await.push(prompt.to_string());
        self.stops.lock().await.push(stop.map(<[String]>::to_vec));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.script.lock().await.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(MemsearchError::model(message)),
            None => Ok("mock response".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_response_when_script_empty() {
        let provider = MockProvider::new();
        assert_eq!(provider.generate("p", None).await.unwrap(), "mock response");
    }

    #[tokio::test]
    async fn script_replays_in_order_with_failures() {
        let provider = MockProvider::with_responses(["first"]);
        provider.add_failure("runtime down").await;
        provider.add_response("third").await;

        assert_eq!(provider.generate("a", None).await.unwrap(), "first");
        let err = provider.generate("b", None).await.unwrap_err();
        assert!(matches!(err, MemsearchError::Model { .. }));
        assert_eq!(provider.generate("c", None).await.unwrap(), "third");
        assert_eq!(provider.generate("d", None).await.unwrap(), "mock response");
        assert_eq!(provider.prompts().await, ["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn stop_sequences_are_recorded_per_call() {
        let provider = MockProvider::new();
        let stop = ["\nHuman:".to_string()];

        provider.generate("decide", None).await.unwrap();
        provider.generate("answer", Some(&stop)).await.unwrap();

        assert_eq!(
            provider.stops().await,
            [None, Some(vec!["\nHuman:".to_string()])]
        );
    }

    #[tokio::test]
    async fn delayed_reply_is_recorded_before_it_returns() {
        let provider = MockProvider::with_responses(["slow"]).with_delay(Duration::from_millis(50));
        let pending = tokio::spawn({
            let provider = provider.clone();
            async move { provider.generate("p", None).await }
        });

        while provider.call_count().await == 0 {
            tokio::task::yield_now().await;
        }
        assert!(!pending.is_finished());
        assert_eq!(pending.await.unwrap().unwrap(), "slow");
    }
}
