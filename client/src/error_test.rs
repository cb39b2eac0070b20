use super::*;

// =============================================================
// Status classification
// =============================================================

#[test]
fn from_status_maps_known_statuses() {
    assert_eq!(ErrorClass::from_status(401), ErrorClass::Unauthorized);
    assert_eq!(ErrorClass::from_status(403), ErrorClass::Forbidden);
    assert_eq!(ErrorClass::from_status(404), ErrorClass::NotFound);
    assert_eq!(ErrorClass::from_status(500), ErrorClass::ServerError);
}

#[test]
fn from_status_leaves_other_statuses_unclassified() {
    for status in [400, 409, 422, 502, 503] {
        assert_eq!(ErrorClass::from_status(status), ErrorClass::Unclassified);
    }
}

// =============================================================
// ApiError construction
// =============================================================

#[test]
fn api_error_lifts_backend_message() {
    let err = ApiError::from_status(403, r#"{"message":"not your record"}"#);
    assert!(matches!(&err, ApiError::Forbidden { message: Some(m) } if m == "not your record"));
    assert_eq!(err.to_string(), "forbidden: not your record");
}

#[test]
fn api_error_tolerates_non_json_body() {
    let err = ApiError::from_status(500, "<html>oops</html>");
    assert!(matches!(err, ApiError::ServerError { message: None }));
    assert_eq!(err.to_string(), "server error: internal error");
}

#[test]
fn api_error_keeps_status_for_unclassified() {
    let err = ApiError::from_status(400, r#"{"message":"bad uuid"}"#);
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.class(), ErrorClass::Unclassified);
    assert_eq!(err.error_code(), "E_UNCLASSIFIED");
}

#[test]
fn empty_backend_message_is_dropped() {
    let err = ApiError::from_status(404, r#"{"message":""}"#);
    assert!(matches!(err, ApiError::NotFound { message: None }));
}

#[test]
fn network_error_has_no_status() {
    let err = ApiError::Network("connection refused".to_owned());
    assert_eq!(err.status(), None);
    assert_eq!(err.class(), ErrorClass::NetworkFailure);
    assert_eq!(err.error_code(), "E_NETWORK");
}

#[test]
fn local_failures_classify_as_invalid_request() {
    assert_eq!(ApiError::Encode("x".into()).class(), ErrorClass::InvalidRequest);
    assert_eq!(ApiError::HttpClientBuild("x".into()).class(), ErrorClass::InvalidRequest);
    assert_eq!(ApiError::Decode("x".into()).class(), ErrorClass::InvalidResponse);
}
