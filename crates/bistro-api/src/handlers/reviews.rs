// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Bistro Labs

//! Review handlers.

use axum::{extract::State, Json};

use bistro_core::{NewReview, Review};

use crate::error::{ApiError, ApiResult};
use crate::response::InsertResponse;
use crate::state::AppState;

/// GET /api/reviews
///
/// Lists all reviews. Public.
pub async fn list_reviews(State(state): State<AppState>) -> ApiResult<Json<Vec<Review>>> {
    let reviews = state.review_store.list().await?;
    Ok(Json(reviews))
}

/// POST /api/reviews
///
/// Submits a review.
pub async fn submit_review(
    State(state): State<AppState>,
    Json(review): Json<NewReview>,
) -> ApiResult<Json<InsertResponse>> {
    if !(0.0..=5.0).contains(&review.rating) {
        return Err(ApiError::bad_request("rating must be between 0 and 5"));
    }

    let id = state.review_store.insert(review).await?;
    Ok(Json(InsertResponse::created(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use crate::config::ApiConfig;

    fn state() -> AppState {
        AppState::builder()
            .config(ApiConfig::default().with_jwt(JwtConfig::new(
                "test-secret-key-that-is-long-enough",
            )))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_submit_and_list() {
        let state = state();

        submit_review(
            State(state.clone()),
            Json(NewReview {
                name: "Ada".to_string(),
                details: "Excellent pasta".to_string(),
                rating: 5.0,
            }),
        )
        .await
        .unwrap();

        let Json(reviews) = list_reviews(State(state)).await.unwrap();
        assert_eq!(reviews.len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_rating_rejected() {
        let result = submit_review(
            State(state()),
            Json(NewReview {
                name: "Ada".to_string(),
                details: String::new(),
                rating: 7.5,
            }),
        )
        .await;
        assert!(result.is_err());
    }
}
