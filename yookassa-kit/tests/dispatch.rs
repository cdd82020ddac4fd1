use serde_json::json;
use wiremock::{
    Mock, MockServer, Request, ResponseTemplate,
    matchers::{basic_auth, body_partial_json, header, method, path, query_param},
};
use yookassa_kit::{
    client::Client,
    config::ClientConfig,
    confirmation::Confirmation,
    errors::ClientError,
    handler::PaymentHandler,
    payment::{Payment, PaymentListFilter, Status},
    payment_method::PaymentMethodType,
    types::Amount,
};

const PAYMENT_ID: &str = "2419a771-000f-5000-9000-1edaf29243f2";

fn client_for(server: &MockServer) -> Client {
    Client::from_config(
        ClientConfig::builder()
            .account_id("100001")
            .secret_key("test_secret")
            .base_url(format!("{}/v3/", server.uri()))
            .build(),
    )
}

fn payment_body(status: &str) -> serde_json::Value {
    json!({
        "id": PAYMENT_ID,
        "status": status,
        "paid": false,
        "amount": { "value": "100.00", "currency": "RUB" },
        "confirmation": {
            "type": "embedded",
            "confirmation_token": "ct-2419a771-000f-5000-9000-1edaf29243f2"
        },
        "created_at": "2018-07-10T14:27:54.691Z",
        "metadata": { "invoice_id": "inv-72" },
        "payment_method": { "type": "sbp", "id": PAYMENT_ID, "saved": false },
        "recipient": { "account_id": "100001", "gateway_id": "1000001" },
        "refundable": false,
        "test": true
    })
}

fn create_request() -> Payment {
    Payment::builder()
        .amount(Amount::rub("100.00"))
        .capture(true)
        .confirmation(Confirmation::embedded())
        .description("Order No. 72")
        .build()
}

fn idempotence_key(request: &Request) -> Option<String> {
    request
        .headers
        .get("idempotence-key")
        .map(|v| v.to_str().unwrap().to_owned())
}

async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap()
}

#[tokio::test]
async fn create_payment_generates_key_when_none_is_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/payments"))
        .and(basic_auth("100001", "test_secret"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_body("pending")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut handler = PaymentHandler::new(&client);
    let payment = handler.create_payment(&create_request()).await.unwrap();

    assert_eq!(payment.status, Some(Status::Pending));
    assert_eq!(
        payment.confirmation_token().unwrap(),
        "ct-2419a771-000f-5000-9000-1edaf29243f2"
    );

    let requests = received(&server).await;
    let key = idempotence_key(&requests[0]).unwrap();
    assert!(!key.is_empty());
    assert!(handler.idempotency_key().is_none());
}

#[tokio::test]
async fn supplied_key_is_used_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_body("pending")))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut handler = PaymentHandler::new(&client);
    let request = create_request();

    handler
        .set_idempotency_key("order-72")
        .create_payment(&request)
        .await
        .unwrap();
    assert!(handler.idempotency_key().is_none());

    handler.create_payment(&request).await.unwrap();

    let requests = received(&server).await;
    assert_eq!(idempotence_key(&requests[0]).as_deref(), Some("order-72"));
    let second = idempotence_key(&requests[1]).unwrap();
    assert_ne!(second, "order-72");
    assert!(!second.is_empty());
}

#[tokio::test]
async fn retry_with_same_key_resends_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_body("pending")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut handler = PaymentHandler::new(&client);
    let request = create_request();

    for _ in 0..2 {
        handler
            .set_idempotency_key("order-72")
            .create_payment(&request)
            .await
            .unwrap();
    }

    let keys: Vec<_> = received(&server)
        .await
        .iter()
        .map(idempotence_key)
        .collect();
    assert_eq!(
        keys,
        vec![Some("order-72".to_owned()), Some("order-72".to_owned())]
    );
}

#[tokio::test]
async fn find_payment_sends_no_key_and_clears_slot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v3/payments/{PAYMENT_ID}")))
        .and(basic_auth("100001", "test_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_body("succeeded")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut handler = PaymentHandler::new(&client);
    let payment = handler
        .set_idempotency_key("unused")
        .find_payment(PAYMENT_ID)
        .await
        .unwrap();

    assert_eq!(payment.status, Some(Status::Succeeded));
    assert_eq!(payment.invoice_id().unwrap(), "inv-72");
    assert_eq!(
        payment.sbp_payment_method().unwrap().base.method_type,
        PaymentMethodType::Sbp
    );

    let requests = received(&server).await;
    assert!(idempotence_key(&requests[0]).is_none());
    assert!(handler.idempotency_key().is_none());
}

#[tokio::test]
async fn capture_and_cancel_hit_their_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v3/payments/{PAYMENT_ID}/capture")))
        .and(body_partial_json(json!({ "amount": { "value": "50.00" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_body("succeeded")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/v3/payments/{PAYMENT_ID}/cancel")))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_body("canceled")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut handler = PaymentHandler::new(&client);

    let partial = Payment::builder().amount(Amount::rub("50.00")).build();
    let captured = handler.capture_payment(PAYMENT_ID, &partial).await.unwrap();
    assert_eq!(captured.status, Some(Status::Succeeded));

    let canceled = handler.cancel_payment(PAYMENT_ID).await.unwrap();
    assert_eq!(canceled.status, Some(Status::Canceled));

    for request in received(&server).await {
        assert!(idempotence_key(&request).is_some());
    }
}

#[tokio::test]
async fn list_payments_sends_filter_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/payments"))
        .and(query_param("status", "succeeded"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "list",
            "items": [payment_body("succeeded")],
            "next_cursor": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut handler = PaymentHandler::new(&client);
    let filter = PaymentListFilter::builder()
        .status(Status::Succeeded)
        .limit(10)
        .build();

    let list = handler.list_payments(&filter).await.unwrap();

    assert_eq!(list.items.len(), 1);
    assert_eq!(list.next_cursor.as_deref(), Some("page-2"));
}

#[tokio::test]
async fn error_status_is_decoded_into_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v3/payments"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "type": "error",
            "id": "ab5a11cd-13cc-4e33-af8b-75a74e18dd09",
            "code": "invalid_request",
            "description": "Idempotence key duplicated",
            "parameter": "Idempotence-Key"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut handler = PaymentHandler::new(&client);
    let err = handler
        .set_idempotency_key("order-72")
        .create_payment(&create_request())
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, error } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(error.code, "invalid_request");
            assert_eq!(error.parameter.as_deref(), Some("Idempotence-Key"));
        }
        other => panic!("expected an API error, got {other:?}"),
    }
    assert!(handler.idempotency_key().is_none());
}

#[tokio::test]
async fn non_json_error_body_is_kept_as_description() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v3/payments/{PAYMENT_ID}")))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = PaymentHandler::new(&client)
        .find_payment(PAYMENT_ID)
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, error } => {
            assert_eq!(status.as_u16(), 502);
            assert_eq!(error.description.as_deref(), Some("Bad Gateway"));
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_is_passed_through() {
    let client = Client::from_config(
        ClientConfig::builder()
            .account_id("100001")
            .secret_key("test_secret")
            .base_url("http://127.0.0.1:1/v3/")
            .build(),
    );
    let mut handler = PaymentHandler::new(&client);

    let err = handler
        .set_idempotency_key("order-72")
        .create_payment(&create_request())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(handler.idempotency_key().is_none());
}

#[tokio::test]
async fn invalid_key_is_rejected_without_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_body("pending")))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut handler = PaymentHandler::new(&client);
    let err = handler
        .set_idempotency_key("order\n72")
        .create_payment(&create_request())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidRequest(_)));
    assert!(handler.idempotency_key().is_none());
    assert!(received(&server).await.is_empty());
}
