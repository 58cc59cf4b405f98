//! Payment gate tests
//!
//! Full pay-then-transform flows against fake payment and transformation
//! services.

use crate::common::{FakePayments, FakeTransformer, IMAGE_URL, RequestFactory};
use imagepay_rs::config::PaymentConfig;
use imagepay_rs::core::payment::{GateState, PaymentGate, ReceiptStatus};
use imagepay_rs::core::types::ImageUpload;
use imagepay_rs::utils::error::GatewayError;
use serde_json::{Value, json};
use std::sync::Arc;

fn gate(payments: Arc<FakePayments>, transformer: Arc<FakeTransformer>) -> PaymentGate {
    PaymentGate::new(payments, transformer, PaymentConfig::default())
}

fn gate_without_verification(
    payments: Arc<FakePayments>,
    transformer: Arc<FakeTransformer>,
) -> PaymentGate {
    let config = PaymentConfig {
        verify_before_transform: false,
        ..Default::default()
    };
    PaymentGate::new(payments, transformer, config)
}

#[tokio::test]
async fn test_paid_transformation_completes() {
    let payments = FakePayments::completed("abc123");
    let transformer = FakeTransformer::succeeding();
    let mut gate = gate(payments.clone(), transformer.clone());

    let state = gate
        .submit(Some(RequestFactory::image()), RequestFactory::prompt())
        .await
        .unwrap();

    match state {
        GateState::Complete { receipt, result } => {
            assert_eq!(receipt.id, "abc123");
            assert_eq!(receipt.status, ReceiptStatus::Completed);
            assert_eq!(result.image_url, IMAGE_URL);
        }
        other => panic!("unexpected state {:?}", other),
    }
    assert_eq!(payments.initiate_calls(), 1);
    assert_eq!(payments.status_calls(), 1);
    assert_eq!(transformer.receipts(), vec![Some("abc123".to_string())]);
}

#[tokio::test]
async fn test_empty_receipt_never_transforms() {
    let payments = FakePayments::new(Ok(json!("")), Ok("completed".to_string()));
    let transformer = FakeTransformer::succeeding();
    let mut gate = gate(payments, transformer.clone());

    let state = gate
        .submit(Some(RequestFactory::image()), RequestFactory::prompt())
        .await
        .unwrap();

    assert_eq!(state.name(), "error");
    assert!(state.receipt().is_none());
    assert_eq!(
        state.error_message(),
        Some("Payment was cancelled or failed")
    );
    assert_eq!(transformer.calls(), 0);
}

#[tokio::test]
async fn test_rejected_payment_never_transforms() {
    let payments = FakePayments::new(Err("User rejected the request".to_string()), Ok(String::new()));
    let transformer = FakeTransformer::succeeding();
    let mut gate = gate(payments.clone(), transformer.clone());

    let state = gate
        .submit(Some(RequestFactory::image()), RequestFactory::prompt())
        .await
        .unwrap();

    assert_eq!(state.name(), "error");
    assert!(state.error_message().unwrap().contains("User rejected the request"));
    assert_eq!(payments.status_calls(), 0);
    assert_eq!(transformer.calls(), 0);
}

#[tokio::test]
async fn test_unusable_initiation_results() {
    for result in [json!(true), json!({ "hash": "0x1" }), Value::Null] {
        let payments = FakePayments::new(Ok(result.clone()), Ok("completed".to_string()));
        let transformer = FakeTransformer::succeeding();
        let mut gate = gate(payments, transformer.clone());

        let state = gate
            .submit(Some(RequestFactory::image()), RequestFactory::prompt())
            .await
            .unwrap();

        assert_eq!(state.name(), "error", "result {}", result);
        assert_eq!(transformer.calls(), 0);
    }
}

#[tokio::test]
async fn test_object_receipt_with_numeric_id() {
    let payments = FakePayments::new(Ok(json!({ "id": 42 })), Ok("completed".to_string()));
    let transformer = FakeTransformer::succeeding();
    let mut gate = gate(payments, transformer.clone());

    let state = gate
        .submit(Some(RequestFactory::image()), RequestFactory::prompt())
        .await
        .unwrap();

    assert_eq!(state.name(), "complete");
    assert_eq!(transformer.receipts(), vec![Some("42".to_string())]);
}

#[tokio::test]
async fn test_failure_after_payment_names_receipt() {
    let payments = FakePayments::completed("abc123");
    let transformer = FakeTransformer::failing("provider exploded");
    let mut gate = gate(payments, transformer.clone());

    let state = gate
        .submit(Some(RequestFactory::image()), RequestFactory::prompt())
        .await
        .unwrap();

    assert_eq!(state.name(), "error");
    let message = state.error_message().unwrap();
    assert!(message.contains("abc123"), "{}", message);
    assert!(message.contains("contact support"), "{}", message);
    assert_eq!(state.receipt().map(|r| r.id.as_str()), Some("abc123"));
    assert_eq!(transformer.calls(), 1);
}

/// Fail-open is intentional: an unsettled receipt still proceeds
#[tokio::test]
async fn test_unsettled_receipt_still_transforms() {
    let payments = FakePayments::with_status("pending");
    let transformer = FakeTransformer::succeeding();
    let mut gate = gate(payments, transformer.clone());

    let state = gate
        .submit(Some(RequestFactory::image()), RequestFactory::prompt())
        .await
        .unwrap();

    assert_eq!(state.name(), "complete");
    assert_eq!(
        state.receipt().map(|r| r.status),
        Some(ReceiptStatus::Initiated)
    );
    assert_eq!(transformer.calls(), 1);
}

#[tokio::test]
async fn test_verification_can_be_skipped() {
    let payments = FakePayments::completed("abc123");
    let transformer = FakeTransformer::succeeding();
    let mut gate = gate_without_verification(payments.clone(), transformer);

    let state = gate
        .submit(Some(RequestFactory::image()), RequestFactory::prompt())
        .await
        .unwrap();

    assert_eq!(state.name(), "complete");
    assert_eq!(payments.status_calls(), 0);
}

#[tokio::test]
async fn test_missing_input_stays_idle() {
    let payments = FakePayments::completed("abc123");
    let transformer = FakeTransformer::succeeding();
    let mut gate = gate(payments.clone(), transformer.clone());

    let err = gate.submit(None, RequestFactory::prompt()).await.unwrap_err();
    assert!(matches!(err, GatewayError::MissingInput(_)));

    let err = gate
        .submit(Some(RequestFactory::image()), "  ")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::MissingInput(_)));

    let empty = ImageUpload::new(Vec::new(), "image/png", "empty.png");
    assert!(gate.submit(Some(empty), RequestFactory::prompt()).await.is_err());

    assert_eq!(gate.state(), &GateState::Idle);
    assert_eq!(payments.initiate_calls(), 0);
    assert_eq!(transformer.calls(), 0);
}

#[tokio::test]
async fn test_reset_allows_another_attempt() {
    let payments = FakePayments::completed("abc123");
    let transformer = FakeTransformer::succeeding();
    let mut gate = gate(payments.clone(), transformer.clone());

    gate.submit(Some(RequestFactory::image()), RequestFactory::prompt())
        .await
        .unwrap();

    let err = gate
        .submit(Some(RequestFactory::image()), RequestFactory::prompt())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::InvalidState(_)));

    gate.reset().unwrap();
    assert_eq!(gate.state(), &GateState::Idle);

    let state = gate
        .submit(Some(RequestFactory::image()), RequestFactory::prompt())
        .await
        .unwrap();
    assert_eq!(state.name(), "complete");
    assert_eq!(payments.initiate_calls(), 2);
    assert_eq!(transformer.calls(), 2);
}
