use rouille::Response;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(msg) =>
                Response::text(msg).with_status_code(404),

            ApiError::BadRequest(msg) =>
                Response::text(msg).with_status_code(400),

            ApiError::Internal(msg) =>
                Response::text(msg).with_status_code(500),
        }
    }
}
