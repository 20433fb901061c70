pub mod request {
    use bytes::Bytes;

    pub struct Payload {
        pub body: Bytes,
    }
}

pub mod response {
    use axum::{http::StatusCode, response::IntoResponse};

    pub enum Success {
        Acknowledged,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                // The gateway only checks the status; the body is
                // informational.
                Self::Acknowledged => (StatusCode::OK, "OK").into_response(),
            }
        }
    }

    pub enum Error {
        InvalidPayload,
        InvalidSignature,
        ServerError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidPayload => {
                    (StatusCode::BAD_REQUEST, "Invalid payload").into_response()
                }
                Self::InvalidSignature => {
                    (StatusCode::BAD_REQUEST, "Invalid signature").into_response()
                }
                Self::ServerError => (StatusCode::INTERNAL_SERVER_ERROR, "Error").into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
