use axum::http::StatusCode;
use beautyton_api::middleware::error_handling::{map_error, AppError};
use beautyton_core::errors::{MarketError, SLOT_OVERLAP_MESSAGE};
use rstest::rstest;

#[rstest]
#[case(MarketError::not_found("user not found"), StatusCode::NOT_FOUND)]
#[case(MarketError::validation("username cannot be empty"), StatusCode::BAD_REQUEST)]
#[case(MarketError::SlotOverlap, StatusCode::BAD_REQUEST)]
#[case(MarketError::Conflict("city is still referenced".into()), StatusCode::CONFLICT)]
#[case(MarketError::Unauthorized, StatusCode::UNAUTHORIZED)]
#[case(MarketError::Database(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(MarketError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: MarketError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[test]
fn test_client_errors_carry_the_domain_message() {
    assert_eq!(
        AppError(MarketError::not_found("master profile not found")).message(),
        "master profile not found"
    );
    assert_eq!(AppError(MarketError::SlotOverlap).message(), SLOT_OVERLAP_MESSAGE);
}

#[test]
fn test_server_errors_hide_their_cause() {
    let error = AppError(MarketError::Database(eyre::eyre!("password authentication failed")));
    assert_eq!(error.message(), "internal server error");
}
