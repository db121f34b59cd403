//! Provider Fallback Chain
//!
//! Ordered list of transcript providers: a primary followed by fallbacks.
//! The orchestrator walks [`FallbackProvider::attempt_order`] until one
//! provider produces a transcript.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::TranscriptProvider;

// == Status ==
/// Availability of one provider in the chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderState {
    pub name: &'static str,
    pub available: bool,
}

/// Serializable view of the chain, primary first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderStatus {
    pub primary: &'static str,
    pub fallbacks: Vec<&'static str>,
    pub providers: Vec<ProviderState>,
}

// == Fallback Provider ==
/// Non-empty, ordered chain of providers.
#[derive(Clone)]
pub struct FallbackProvider {
    providers: Vec<Arc<dyn TranscriptProvider>>,
}

impl FallbackProvider {
    pub fn new(primary: Arc<dyn TranscriptProvider>) -> Self {
        Self {
            providers: vec![primary],
        }
    }

    /// Appends a provider tried after every one already in the chain.
    pub fn with_fallback(mut self, provider: Arc<dyn TranscriptProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Providers to try for one request.
    ///
    /// A `preferred` name that matches a provider moves it to the front;
    /// an unknown name is ignored. Unavailable providers are skipped.
    pub fn attempt_order(&self, preferred: Option<&str>) -> Vec<Arc<dyn TranscriptProvider>> {
        let mut order: Vec<Arc<dyn TranscriptProvider>> = Vec::with_capacity(self.providers.len());

        if let Some(name) = preferred {
            match self.providers.iter().find(|p| p.name() == name) {
                Some(provider) => order.push(provider.clone()),
                None => warn!(backend = name, "Unknown transcript backend requested, using default order"),
            }
        }
        for provider in &self.providers {
            if !order.iter().any(|p| p.name() == provider.name()) {
                order.push(provider.clone());
            }
        }

        order.retain(|provider| {
            let available = provider.is_available();
            if !available {
                warn!(backend = provider.name(), "Transcript backend unavailable, skipping");
            }
            available
        });
        order
    }

    pub fn status(&self) -> ProviderStatus {
        ProviderStatus {
            primary: self.providers[0].name(),
            fallbacks: self.providers[1..].iter().map(|p| p.name()).collect(),
            providers: self
                .providers
                .iter()
                .map(|p| ProviderState {
                    name: p.name(),
                    available: p.is_available(),
                })
                .collect(),
        }
    }
}
