// TestDependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into ServerDeps for tests.
// Each mock records its calls and returns queued responses (or a default).

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{
    BaseAuthService, BaseEmailService, BaseExtractor, BaseMarketSearch, BaseObjectStorage,
    BaseValuationStore, MarketResearch, ServerDeps, UpstreamError,
};
use crate::domains::valuation::ValuationSettings;

// =============================================================================
// Mock Market Search
// =============================================================================

pub struct MockMarketSearch {
    responses: Arc<Mutex<Vec<Result<MarketResearch, UpstreamError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockMarketSearch {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_research(self, content: &str, citations: &[&str]) -> Self {
        self.responses.lock().unwrap().push(Ok(MarketResearch {
            content: content.to_string(),
            citations: citations.iter().map(|c| c.to_string()).collect(),
        }));
        self
    }

    pub fn with_error(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err(UpstreamError::new("market search", Some(status), body)));
        self
    }

    /// User prompts received, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseMarketSearch for MockMarketSearch {
    async fn research(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<MarketResearch, UpstreamError> {
        self.calls.lock().unwrap().push(user_prompt.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(MarketResearch::default());
        }
        responses.remove(0)
    }
}

// =============================================================================
// Mock Extractor
// =============================================================================

pub struct MockExtractor {
    responses: Arc<Mutex<Vec<Result<String, UpstreamError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, raw: &str) -> Self {
        self.responses.lock().unwrap().push(Ok(raw.to_string()));
        self
    }

    pub fn with_json(self, value: serde_json::Value) -> Self {
        self.with_response(&value.to_string())
    }

    pub fn with_error(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err(UpstreamError::new("extraction", Some(status), body)));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseExtractor for MockExtractor {
    async fn extract_json(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, UpstreamError> {
        self.calls.lock().unwrap().push(user_prompt.to_string());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(r#"{"comparables": []}"#.to_string());
        }
        responses.remove(0)
    }
}

// =============================================================================
// Mock Email Service
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

pub struct MockEmailService {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    failure: Option<UpstreamError>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            failure: Some(UpstreamError::new("email", Some(status), body)),
            ..Self::new()
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseEmailService for MockEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<String, UpstreamError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(format!("mock-email-{}", sent.len()))
    }
}

// =============================================================================
// Mock Object Storage
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct MockObjectStorage {
    objects: Arc<Mutex<Vec<StoredObject>>>,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseObjectStorage for MockObjectStorage {
    async fn upload(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UpstreamError> {
        self.objects.lock().unwrap().push(StoredObject {
            name: object_name.to_string(),
            content_type: content_type.to_string(),
            bytes,
        });
        Ok(format!("https://storage.test/public/{}", object_name))
    }
}

// =============================================================================
// Mock Auth Service
// =============================================================================

pub struct MockAuthService {
    /// (email, redirect_to) pairs
    links: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAuthService {
    pub fn new() -> Self {
        Self {
            links: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn links(&self) -> Vec<(String, String)> {
        self.links.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseAuthService for MockAuthService {
    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<(), UpstreamError> {
        self.links
            .lock()
            .unwrap()
            .push((email.to_string(), redirect_to.to_string()));
        Ok(())
    }
}

// =============================================================================
// Mock Valuation Store
// =============================================================================

pub struct MockValuationStore {
    records: Arc<Mutex<Vec<serde_json::Value>>>,
    failure: Option<UpstreamError>,
}

impl MockValuationStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            failure: Some(UpstreamError::new("valuation store", Some(status), body)),
            ..Self::new()
        }
    }

    pub fn records(&self) -> Vec<serde_json::Value> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseValuationStore for MockValuationStore {
    async fn insert_valuation(&self, record: &serde_json::Value) -> Result<(), UpstreamError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Every collaborator mocked. Keep the `Arc`s to inspect calls after the request.
pub struct TestDependencies {
    pub market_search: Arc<MockMarketSearch>,
    pub extractor: Arc<MockExtractor>,
    pub email: Arc<MockEmailService>,
    pub storage: Arc<MockObjectStorage>,
    pub auth: Arc<MockAuthService>,
    pub valuation_store: Arc<MockValuationStore>,
    pub valuation_settings: ValuationSettings,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            market_search: Arc::new(MockMarketSearch::new()),
            extractor: Arc::new(MockExtractor::new()),
            email: Arc::new(MockEmailService::new()),
            storage: Arc::new(MockObjectStorage::new()),
            auth: Arc::new(MockAuthService::new()),
            valuation_store: Arc::new(MockValuationStore::new()),
            valuation_settings: ValuationSettings::default(),
        }
    }

    pub fn mock_search(mut self, search: MockMarketSearch) -> Self {
        self.market_search = Arc::new(search);
        self
    }

    pub fn mock_extractor(mut self, extractor: MockExtractor) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    pub fn mock_email(mut self, email: MockEmailService) -> Self {
        self.email = Arc::new(email);
        self
    }

    pub fn mock_store(mut self, store: MockValuationStore) -> Self {
        self.valuation_store = Arc::new(store);
        self
    }

    pub fn settings(mut self, settings: ValuationSettings) -> Self {
        self.valuation_settings = settings;
        self
    }

    /// Convert into ServerDeps for a router or action under test
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps {
            market_search: Some(self.market_search.clone()),
            extractor: Some(self.extractor.clone()),
            email: Some(self.email.clone()),
            storage: Some(self.storage.clone()),
            auth: Some(self.auth.clone()),
            valuation_store: Some(self.valuation_store.clone()),
            valuation_settings: self.valuation_settings.clone(),
            magic_link_redirect: "https://app.test/auth/callback".to_string(),
        }
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
