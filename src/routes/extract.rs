// src/routes/extract.rs
//! `ValidatedJson<T>` works like `axum::Json<T>` but also runs
//! `validator::Validate::validate()`. Both JSON and rule failures become 400.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::post,
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1))]
        name: String,
    }

    async fn handler(ValidatedJson(body): ValidatedJson<Probe>) -> String {
        body.name
    }

    async fn status_for(body: &'static str) -> StatusCode {
        let app = Router::new().route("/probe", post(handler));
        let req = Request::builder()
            .method("POST")
            .uri("/probe")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        app.oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn valid_body_passes() {
        assert_eq!(status_for(r#"{"name":"ok"}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_and_invalid_bodies_are_400() {
        assert_eq!(status_for("not json").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for(r#"{}"#).await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for(r#"{"name":""}"#).await, StatusCode::BAD_REQUEST);
    }
}
