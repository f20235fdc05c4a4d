use model_binding::mock::{create_mock_transport, expect_request, MockTransport};
use model_binding::{
    ApiClient, BindingError, CacheConfig, InstanceCache, ModelClient, TransportError, Verb,
};
use serde_json::json;
use std::sync::Arc;
use wl_sdk::business_config::BusinessConfigError;
use wl_sdk::clients::{BusinessConfigClient, ProfileEditClient, Registration};
use wl_sdk::profile_edit::ProfileEditError;

fn business_config_client(mock: &MockTransport) -> BusinessConfigClient {
    BusinessConfigClient::new(
        ModelClient::new(Arc::new(mock.clone())),
        InstanceCache::new(&CacheConfig::default()),
    )
}

fn profile_edit_client(mock: &MockTransport) -> ProfileEditClient {
    ProfileEditClient::new(
        ModelClient::new(Arc::new(mock.clone())),
        InstanceCache::new(&CacheConfig::default()),
    )
}

/// GET sends the business key and fills the policy from the response.
#[tokio::test]
async fn test_business_config_get_populates_policy() {
    let mock = MockTransport::new();
    mock.expect(Verb::Get)
        .on("Wl/Business/Config/BusinessConfig.json")
        .return_ok(json!({
            "a_business_policy": {
                "i_book_future": 30,
                "id_book_future": 2,
                "is_wait": "1",
                "k_currency": 1,
                "url_custom": "https://example.com/book",
                "is_new_flag": true
            },
            "is_location_select": 1,
            "k_business": "ignored"
        }));

    let client = business_config_client(&mock);
    let shared = client.load("abc123".into()).await.unwrap();
    let config = shared.lock().await;

    let request = mock.last_request().unwrap();
    assert_eq!(request.params.get("k_business"), Some(&json!("abc123")));
    assert_eq!(request.params.len(), 1);
    assert!(request.body.is_empty());

    // k_business is not a result field, so the response cannot overwrite it.
    assert_eq!(config.k_business, "abc123");
    assert_eq!(config.is_location_select, Some(true));
    let policy = config.a_business_policy.as_ref().unwrap();
    assert_eq!(policy.i_book_future, Some(30));
    assert_eq!(policy.id_book_future, Some(2));
    assert_eq!(policy.is_wait, Some(true));
    assert_eq!(policy.k_currency, Some(json!(1)));
    assert_eq!(policy.extra.get("is_new_flag"), Some(&json!(true)));
    assert!(!config.is_changed().unwrap());
    mock.verify();
}

#[tokio::test]
async fn test_policy_is_loaded_once() {
    let mock = MockTransport::new();
    mock.expect(Verb::Get)
        .return_ok(json!({ "a_business_policy": { "is_prevent_booking": 0 } }));

    let client = business_config_client(&mock);
    let first = client.policy("abc123".into()).await.unwrap();
    let second = client.policy("abc123".into()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.is_prevent_booking, Some(false));
    assert_eq!(mock.requests().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_policy_missing_and_empty_key() {
    let mock = MockTransport::new();
    mock.expect(Verb::Get)
        .return_ok(json!({ "a_business_policy": null }));

    let client = business_config_client(&mock);
    let err = client.policy("abc123".into()).await.unwrap_err();
    assert!(matches!(err, BusinessConfigError::PolicyMissing(ref k) if k == "abc123"));

    // Rejected before anything reaches the transport.
    let err = client.policy(String::new()).await.unwrap_err();
    assert!(matches!(
        err,
        BusinessConfigError::Binding(BindingError::EmptyKey { field: "k_business", .. })
    ));
    assert_eq!(mock.requests().len(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_instance_get_returns_shared_instance() {
    let mock = MockTransport::new();
    let client = profile_edit_client(&mock);

    let a = client
        .instance_get(("b1".into(), "u7".into(), false))
        .unwrap();
    let b = client
        .instance_get(("b1".into(), "u7".into(), false))
        .unwrap();
    let staff = client
        .instance_get(("b1".into(), "u7".into(), true))
        .unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &staff));

    a.lock().await.text_token = "tok".into();
    assert_eq!(b.lock().await.text_token, "tok");
    assert!(mock.requests().is_empty());
}

/// POST for a new user carries the changes and the password, never the result slots.
#[tokio::test]
async fn test_profile_edit_post_serializes_registration() {
    let mock = MockTransport::new();
    mock.expect(Verb::Post)
        .on("Wl/Profile/Edit/EditByToken.json")
        .return_ok(json!({ "uid": "1042", "status": "ok", "a_error": null }));

    let client = profile_edit_client(&mock);
    let registration = Registration {
        fields: json!({ "5": "New Value" }).as_object().cloned().unwrap(),
        password: "s3cret".into(),
        sign_in: true,
        source: 0,
    };
    let uid = client
        .register((String::new(), String::new(), false), registration)
        .await
        .unwrap();
    assert_eq!(uid, "1042");

    let request = mock.last_request().unwrap();
    assert_eq!(request.body["a_change"], json!({ "5": "New Value" }));
    assert_eq!(request.body["a_new"], json!({ "5": "New Value" }));
    assert_eq!(request.body["is_sing_in"], json!(true));
    assert_eq!(request.body["text_password"], json!("s3cret"));
    assert_eq!(request.params["uid"], json!(""));
    for result_only in ["a_error", "a_structure", "class", "code", "message", "status"] {
        assert!(!request.has_field(result_only), "{result_only} was sent");
    }
    mock.verify();
}

#[tokio::test]
async fn test_register_reports_rejections() {
    let mock = MockTransport::new();
    mock.expect(Verb::Post).return_ok(json!({
        "class": "Wl\\Profile\\Edit\\Exception",
        "code": "mail-exists",
        "message": "This email is already in use.",
        "status": "mail-exists"
    }));
    mock.expect(Verb::Post)
        .return_ok(json!({ "a_error": { "5": "Required field." }, "status": "ok" }));
    mock.expect(Verb::Post).return_ok(json!({ "status": "ok" }));

    let client = profile_edit_client(&mock);
    let key = (String::new(), String::new(), false);

    let err = client
        .register(key.clone(), Registration::default())
        .await
        .unwrap_err();
    match err {
        ProfileEditError::Rejected(fault) => assert_eq!(fault.code.as_deref(), Some("mail-exists")),
        other => panic!("Expected Rejected, got {other:?}"),
    }

    let err = client
        .register(key.clone(), Registration::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProfileEditError::InvalidFields(ref fields) if fields == &["5"]));

    let err = client.register(key, Registration::default()).await.unwrap_err();
    assert!(matches!(err, ProfileEditError::MissingUid));
    mock.verify();
}

#[tokio::test]
async fn test_update_sends_changes_with_put() {
    let mock = MockTransport::new();
    mock.expect(Verb::Put).return_ok(json!({}));

    let client = profile_edit_client(&mock);
    let key = ("b1".to_string(), "u7".to_string(), true);
    let changes = json!({ "5": "555-0100" }).as_object().cloned().unwrap();
    client.update(key.clone(), changes).await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.verb, Verb::Put);
    assert_eq!(request.key.to_string(), "b1,u7,1");
    assert_eq!(request.body.len(), 1);
    assert_eq!(request.body["a_change"], json!({ "5": "555-0100" }));

    let form = client.instance_get(key).unwrap();
    assert!(!form.lock().await.is_changed().unwrap());
    mock.verify();
}

#[tokio::test]
async fn test_transport_error_leaves_form_untouched() {
    let mock = MockTransport::new();
    mock.expect(Verb::Get).return_err(TransportError::Status {
        code: 503,
        message: "Service unavailable".into(),
    });

    let client = profile_edit_client(&mock);
    let key = ("b1".to_string(), String::new(), false);
    let err = client.load_form(key.clone(), "tok".into()).await.unwrap_err();
    assert!(matches!(
        err,
        ProfileEditError::Binding(BindingError::Transport(TransportError::Status { code: 503, .. }))
    ));

    let form = client.instance_get(key).unwrap();
    let form = form.lock().await;
    assert!(form.a_structure.is_none());
    // The token was set locally but never confirmed by a response.
    assert_eq!(form.changed_fields().unwrap(), vec!["text_token".to_string()]);
    mock.verify();
}

#[tokio::test]
async fn test_load_form_recovers_after_rejection() {
    let mock = MockTransport::new();
    mock.expect(Verb::Get).return_ok(json!({
        "class": "Wl\\Profile\\Edit\\Exception",
        "code": "token-invalid",
        "message": "The security token is not valid.",
        "a_error": { "5": "Denied" }
    }));
    mock.expect(Verb::Get).return_ok(json!({ "a_structure": {} }));

    let client = profile_edit_client(&mock);
    let key = ("b1".to_string(), String::new(), false);

    let err = client
        .load_form(key.clone(), "stale".into())
        .await
        .unwrap_err();
    assert!(matches!(err, ProfileEditError::Rejected(_)));

    let shared = client.load_form(key, "tok-1".into()).await.unwrap();
    let form = shared.lock().await;
    assert!(form.fault().is_none());
    assert!(form.field_errors().is_none());
    assert_eq!(form.a_structure, Some(Default::default()));
    mock.verify();
}

/// Inspect the request on the channel before answering it.
#[tokio::test]
async fn test_load_form_over_channel() {
    let (transport, mut rx) = create_mock_transport(4);
    let client = ProfileEditClient::new(
        ModelClient::new(Arc::new(transport)),
        InstanceCache::new(&CacheConfig::default()),
    );

    let backend = tokio::spawn(async move {
        let (request, respond_to) = expect_request(&mut rx).await.unwrap();
        assert_eq!(request.verb, Verb::Get);
        assert_eq!(request.params["text_token"], json!("tok-1"));
        assert_eq!(request.params["is_staff"], json!(false));
        let payload = json!({
            "a_structure": {
                "5": { "is_require": 1, "id_field_type": 2, "k_field": "5", "s_title": "Phone", "x_value": "" }
            },
            "is_short": 0,
            "class": null,
            "code": null,
            "message": null
        });
        respond_to
            .send(Ok(payload.as_object().cloned().unwrap()))
            .unwrap();
    });

    let shared = client
        .load_form(("b1".into(), String::new(), false), "tok-1".into())
        .await
        .unwrap();
    backend.await.unwrap();

    let form = shared.lock().await;
    assert_eq!(form.required_fields(), vec!["5"]);
    assert_eq!(form.field_title("5"), Some("Phone"));
    assert!(!form.is_short);
}
