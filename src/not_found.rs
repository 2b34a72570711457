use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
