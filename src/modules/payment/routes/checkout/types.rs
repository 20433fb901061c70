pub mod request {
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use std::borrow::Cow;
    use std::str::FromStr;
    use validator::{Validate, ValidationError};

    fn default_amount() -> String {
        "100.00".to_string()
    }

    fn default_name_first() -> String {
        "User".to_string()
    }

    fn default_email_address() -> String {
        "test@example.com".to_string()
    }

    fn validate_amount(amount: &str) -> Result<(), ValidationError> {
        let parsed = BigDecimal::from_str(amount).map_err(|_| {
            ValidationError::new("INVALID_AMOUNT")
                .with_message(Cow::from("Amount must be a decimal number"))
        })?;

        match parsed > BigDecimal::from(0) {
            true => Ok(()),
            false => Err(ValidationError::new("INVALID_AMOUNT")
                .with_message(Cow::from("Amount must be greater than zero"))),
        }
    }

    #[derive(Clone, Deserialize, Validate)]
    pub struct Payload {
        #[serde(default = "default_amount")]
        #[validate(custom(code = "INVALID_AMOUNT", function = "validate_amount"))]
        pub amount: String,
        #[serde(default = "default_name_first")]
        pub name_first: String,
        #[serde(default = "default_email_address")]
        #[validate(email(code = "INVALID_EMAIL_ADDRESS", message = "Invalid email address"))]
        pub email_address: String,
    }

    impl Default for Payload {
        fn default() -> Self {
            Self {
                amount: default_amount(),
                name_first: default_name_first(),
                email_address: default_email_address(),
            }
        }
    }
}

pub mod response {
    use axum::{
        http::StatusCode,
        response::{Html, IntoResponse},
        Json,
    };
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        RedirectForm(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RedirectForm(html) => (StatusCode::OK, Html(html)).into_response(),
            }
        }
    }

    #[derive(Debug)]
    pub enum Error {
        InvalidPayload,
        FailedToValidate(ValidationErrors),
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidPayload => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid payload" })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => {
                    (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
                }
                Self::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sorry an error occurred" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
