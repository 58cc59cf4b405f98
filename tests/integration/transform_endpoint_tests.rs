//! Transformation endpoint tests
//!
//! Drive `POST /api/transform` through the full actix application with fake
//! provider and payment services.

use crate::common::fakes::TextAccessor;
use crate::common::fixtures::test_config;
use crate::common::{FakePayments, FakeProvider, IMAGE_URL, MultipartBody};
use actix_web::http::{StatusCode, header};
use actix_web::{test, web};
use imagepay_rs::config::Config;
use imagepay_rs::core::output::ProviderOutput;
use imagepay_rs::core::transform::TransformService;
use imagepay_rs::server::{AppState, HttpServer};
use serde_json::{Value, json};
use std::sync::Arc;

fn state(provider: Arc<FakeProvider>, payments: Arc<FakePayments>, config: Config) -> AppState {
    let service = TransformService::new(provider, payments, config.payment().clone());
    AppState::new(config, Arc::new(service))
}

async fn post_form(state: AppState, form: MultipartBody) -> (StatusCode, Value) {
    let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;
    let (content_type, body) = form.build();
    let req = test::TestRequest::post()
        .uri("/api/transform")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();

    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

fn valid_form() -> MultipartBody {
    MultipartBody::new()
        .image()
        .text("prompt", "Transform into a watercolor painting")
}

// ==================== Output Shapes ====================

#[actix_web::test]
async fn test_bare_string_output() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::completed("abc123");

    let (status, body) = post_form(state(provider.clone(), payments, test_config()), valid_form()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "imageUrl": IMAGE_URL }));
    assert_eq!(provider.calls(), 1);
}

#[actix_web::test]
async fn test_accessor_output() {
    let provider = FakeProvider::with(|| Ok(ProviderOutput::Accessor(Arc::new(TextAccessor(IMAGE_URL)))));
    let payments = FakePayments::completed("abc123");

    let (status, body) = post_form(state(provider, payments, test_config()), valid_form()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], IMAGE_URL);
}

#[actix_web::test]
async fn test_single_element_list_output() {
    let provider = FakeProvider::returning_json(json!([IMAGE_URL]));
    let payments = FakePayments::completed("abc123");

    let (status, body) = post_form(state(provider, payments, test_config()), valid_form()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], IMAGE_URL);
}

#[actix_web::test]
async fn test_url_attribute_output() {
    let provider = FakeProvider::returning_json(json!({ "url": IMAGE_URL }));
    let payments = FakePayments::completed("abc123");

    let (status, body) = post_form(state(provider, payments, test_config()), valid_form()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], IMAGE_URL);
}

#[actix_web::test]
async fn test_numeric_output_is_unrecognized() {
    let provider = FakeProvider::returning_json(json!(42));
    let payments = FakePayments::completed("abc123");

    let (status, body) = post_form(state(provider, payments, test_config()), valid_form()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Unrecognized response format"), "{}", error);
}

#[actix_web::test]
async fn test_relative_url_is_invalid() {
    let provider = FakeProvider::returning_json(json!("/tmp/out.webp"));
    let payments = FakePayments::completed("abc123");

    let (status, body) = post_form(state(provider, payments, test_config()), valid_form()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Invalid image URL"));
}

#[actix_web::test]
async fn test_provider_failure() {
    let provider = FakeProvider::failing("connection reset");
    let payments = FakePayments::completed("abc123");

    let (status, body) = post_form(state(provider, payments, test_config()), valid_form()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to transform image");
}

// ==================== Input Validation ====================

#[actix_web::test]
async fn test_missing_prompt_is_rejected_before_external_calls() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::completed("abc123");
    let form = MultipartBody::new().image().text("paymentId", "abc123");

    let (status, body) = post_form(state(provider.clone(), payments.clone(), test_config()), form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Image and prompt are required" }));
    assert_eq!(provider.calls(), 0);
    assert_eq!(payments.status_calls(), 0);
}

#[actix_web::test]
async fn test_missing_image_is_rejected() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::completed("abc123");
    let form = MultipartBody::new().text("prompt", "Make it snow");

    let (status, body) = post_form(state(provider.clone(), payments, test_config()), form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Image and prompt are required");
    assert_eq!(provider.calls(), 0);
}

#[actix_web::test]
async fn test_blank_prompt_is_rejected() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::completed("abc123");
    let form = MultipartBody::new().image().text("prompt", "   ");

    let (status, _) = post_form(state(provider.clone(), payments, test_config()), form).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(provider.calls(), 0);
}

#[actix_web::test]
async fn test_oversized_image_is_rejected() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::completed("abc123");
    let form = MultipartBody::new()
        .file("image", "big.png", "image/png", &vec![0u8; 4096])
        .text("prompt", "Make it snow");

    let (status, body) = post_form(state(provider.clone(), payments, test_config()), form).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].as_str().unwrap().contains("too large"));
    assert_eq!(provider.calls(), 0);
}

#[actix_web::test]
async fn test_oversized_prompt_is_rejected() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::completed("abc123");
    let prompt = "snow ".repeat(200);
    let form = MultipartBody::new()
        .image()
        .text("prompt", &prompt)
        .text("paymentId", "abc123");

    let (status, body) =
        post_form(state(provider.clone(), payments.clone(), test_config()), form).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].as_str().unwrap().contains("'prompt' is too large"));
    assert_eq!(provider.calls(), 0);
    assert_eq!(payments.status_calls(), 0);
}

#[actix_web::test]
async fn test_non_multipart_body_is_rejected() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::completed("abc123");
    let app = test::init_service(HttpServer::create_app(web::Data::new(state(
        provider.clone(),
        payments,
        test_config(),
    ))))
    .await;

    let req = test::TestRequest::post()
        .uri("/api/transform")
        .set_json(json!({ "prompt": "hi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.calls(), 0);
}

#[actix_web::test]
async fn test_image_and_prompt_reach_provider() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::completed("abc123");

    post_form(state(provider.clone(), payments, test_config()), valid_form()).await;

    let request = provider.last_request().unwrap();
    assert_eq!(request.image.mime_type, "image/png");
    assert_eq!(request.image.filename, "cat.png");
    assert_eq!(request.prompt, "Transform into a watercolor painting");
    assert!(request.payment_receipt.is_none());
}

// ==================== Payment Verification ====================

#[actix_web::test]
async fn test_completed_receipt_is_verified() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::completed("abc123");
    let form = valid_form().text("paymentId", "abc123");

    let (status, _) = post_form(state(provider.clone(), payments.clone(), test_config()), form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments.status_calls(), 1);
    assert_eq!(
        provider.last_request().unwrap().payment_receipt.as_deref(),
        Some("abc123")
    );
}

/// Fail-open is intentional: an unsettled receipt still gets its image
#[actix_web::test]
async fn test_pending_receipt_still_transforms() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::with_status("pending");
    let form = valid_form().text("paymentId", "abc123");

    let (status, body) = post_form(state(provider.clone(), payments.clone(), test_config()), form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], IMAGE_URL);
    assert_eq!(payments.status_calls(), 1);
    assert_eq!(provider.calls(), 1);
}

/// Fail-open is intentional: a broken status lookup never blocks
#[actix_web::test]
async fn test_status_lookup_failure_still_transforms() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::unreachable();
    let form = valid_form().text("paymentId", "abc123");

    let (status, _) = post_form(state(provider.clone(), payments, test_config()), form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.calls(), 1);
}

#[actix_web::test]
async fn test_strict_mode_rejects_unsettled_receipt() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::with_status("failed");
    let mut config = test_config();
    config.gateway.payment.strict_verification = true;
    let form = valid_form().text("paymentId", "abc123");

    let (status, body) = post_form(state(provider.clone(), payments, config), form).await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body, json!({ "error": "Payment not completed" }));
    assert_eq!(provider.calls(), 0);
}

#[actix_web::test]
async fn test_blank_payment_id_skips_verification() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::completed("abc123");
    let form = valid_form().text("paymentId", "");

    let (status, _) = post_form(state(provider, payments.clone(), test_config()), form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments.status_calls(), 0);
}

// ==================== Health ====================

#[actix_web::test]
async fn test_health_check() {
    let provider = FakeProvider::returning_json(json!(IMAGE_URL));
    let payments = FakePayments::completed("abc123");
    let app = test::init_service(HttpServer::create_app(web::Data::new(state(
        provider,
        payments,
        test_config(),
    ))))
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("Server").and_then(|v| v.to_str().ok()),
        Some("ImagePay-RS")
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], imagepay_rs::VERSION);
}
