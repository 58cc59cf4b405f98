//! Counting fakes for the async trait seams
//!
//! Each fake records how often it was called so tests can assert that no
//! external call happened.

use async_trait::async_trait;
use imagepay_rs::core::output::{ProviderOutput, UrlAccessor, UrlValue};
use imagepay_rs::core::payment::{PaymentError, PaymentProvider, PaymentRequest};
use imagepay_rs::core::providers::{ImageProvider, ProviderError};
use imagepay_rs::core::transform::ImageTransformer;
use imagepay_rs::core::types::{NormalizedResult, TransformRequest};
use imagepay_rs::utils::error::{GatewayError, Result};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type OutputFn = dyn Fn() -> std::result::Result<ProviderOutput, ProviderError> + Send + Sync;

/// Object whose only capability is a `url()` accessor
#[derive(Debug)]
pub struct TextAccessor(pub &'static str);

impl UrlAccessor for TextAccessor {
    fn url(&self) -> UrlValue {
        UrlValue::Text(self.0.to_string())
    }
}

/// Image provider returning a canned output
pub struct FakeProvider {
    output: Box<OutputFn>,
    calls: AtomicUsize,
    last_request: Mutex<Option<TransformRequest>>,
}

impl FakeProvider {
    pub fn with<F>(output: F) -> Arc<Self>
    where
        F: Fn() -> std::result::Result<ProviderOutput, ProviderError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            output: Box::new(output),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn returning_json(value: Value) -> Arc<Self> {
        Self::with(move || Ok(ProviderOutput::from_json(value.clone())))
    }

    pub fn failing(message: &'static str) -> Arc<Self> {
        Self::with(move || Err(ProviderError::network("fake", message)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<TransformRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn generate(
        &self,
        request: &TransformRequest,
    ) -> std::result::Result<ProviderOutput, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        (self.output)()
    }
}

/// Payment service with canned initiation and status results
pub struct FakePayments {
    initiation: std::result::Result<Value, String>,
    status: std::result::Result<String, String>,
    initiate_calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl FakePayments {
    pub fn new(
        initiation: std::result::Result<Value, String>,
        status: std::result::Result<String, String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            initiation,
            status,
            initiate_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
        })
    }

    /// Issues `id` and reports it as completed
    pub fn completed(id: &str) -> Arc<Self> {
        Self::new(Ok(Value::String(id.to_string())), Ok("completed".to_string()))
    }

    /// Reports every receipt with the given status
    pub fn with_status(status: &str) -> Arc<Self> {
        Self::new(Ok(Value::String("abc123".to_string())), Ok(status.to_string()))
    }

    /// Status lookups fail
    pub fn unreachable() -> Arc<Self> {
        Self::new(
            Err("connection refused".to_string()),
            Err("connection refused".to_string()),
        )
    }

    pub fn initiate_calls(&self) -> usize {
        self.initiate_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentProvider for FakePayments {
    async fn initiate(
        &self,
        _request: &PaymentRequest,
    ) -> std::result::Result<Value, PaymentError> {
        self.initiate_calls.fetch_add(1, Ordering::SeqCst);
        self.initiation.clone().map_err(PaymentError::Network)
    }

    async fn status(
        &self,
        _receipt_id: &str,
        _testnet: bool,
    ) -> std::result::Result<String, PaymentError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status.clone().map_err(PaymentError::Network)
    }
}

/// Transformer that succeeds with [`IMAGE_URL`](super::IMAGE_URL) or fails
pub struct FakeTransformer {
    fail_with: Option<&'static str>,
    calls: AtomicUsize,
    receipts: Mutex<Vec<Option<String>>>,
}

impl FakeTransformer {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            fail_with: None,
            calls: AtomicUsize::new(0),
            receipts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(message),
            calls: AtomicUsize::new(0),
            receipts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn receipts(&self) -> Vec<Option<String>> {
        self.receipts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageTransformer for FakeTransformer {
    async fn transform(&self, request: TransformRequest) -> Result<NormalizedResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.receipts.lock().unwrap().push(request.payment_receipt);
        match self.fail_with {
            Some(message) => Err(GatewayError::internal(message)),
            None => Ok(NormalizedResult {
                image_url: super::IMAGE_URL.to_string(),
            }),
        }
    }
}
