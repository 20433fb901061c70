use crate::{
    modules,
    types::{Config, Context, ToContext},
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors, trace};

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

impl App {
    pub fn new() -> Self {
        let ctx: Arc<Context> = Arc::new(Config::default().to_context());
        let router = Self::router(ctx.clone());

        Self { ctx, router }
    }

    pub fn router(ctx: Arc<Context>) -> Router {
        Router::new()
            .nest("/api", modules::get_router())
            .with_state(ctx)
            .layer(DefaultBodyLimit::max(64 * 1024))
            .layer(trace::TraceLayer::new_for_http())
            .layer(
                cors::CorsLayer::new()
                    .allow_methods([Method::OPTIONS, Method::GET, Method::POST])
                    .allow_headers([header::CONTENT_TYPE])
                    .allow_origin(cors::Any),
            )
    }

    pub async fn serve(self) {
        let listener = TcpListener::bind(format!("{}:{}", self.ctx.app.host, self.ctx.app.port))
            .await
            .unwrap();

        tracing::info!(
            "App is running on {}:{}",
            self.ctx.app.host,
            self.ctx.app.port
        );

        axum::serve(listener, self.router).await.unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::App;
    use crate::modules::payment::testing;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn post(uri: &str, content_type: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_check_responds() {
        let router = App::router(testing::context(None));
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn notify_rejects_non_post_methods() {
        let router = App::router(testing::context(None));
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/payments/notify")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn checkout_returns_html_redirect_form() {
        let router = App::router(testing::context(Some("shh")));
        let body = r#"{"amount":"49.99","name_first":"Thandi","email_address":"thandi@example.com"}"#;
        let response = router
            .oneshot(post("/api/payments/checkout", "application/json", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(r#"value="49.99""#));
        assert!(html.contains(r#"name="signature""#));
        assert!(!html.contains("merchant_key"));
    }

    #[tokio::test]
    async fn checkout_accepts_form_encoded_bodies() {
        let router = App::router(testing::context(None));
        let body = "amount=20&name_first=Sipho&email_address=sipho%40example.com";
        let response = router
            .oneshot(post(
                "/api/payments/checkout",
                "application/x-www-form-urlencoded",
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(r#"value="20.00""#));
    }

    #[tokio::test]
    async fn checkout_rejects_invalid_amount() {
        let router = App::router(testing::context(None));
        let response = router
            .oneshot(post(
                "/api/payments/checkout",
                "application/json",
                r#"{"amount":"-5"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn notify_rejects_tampered_payload() {
        use crate::modules::payment::{model::FieldSet, signature};

        let mut fields = FieldSet::new();
        fields.push("m_payment_id", "01");
        fields.push("payment_status", "COMPLETE");
        fields.push("amount_gross", "100.00");
        let signed = signature::sign(&fields, None);

        let body = format!(
            "m_payment_id=01&payment_status=COMPLETE&amount_gross=999.00&signature={}",
            signed
        );

        let router = App::router(testing::context(None));
        let response = router
            .oneshot(post(
                "/api/payments/notify",
                "application/x-www-form-urlencoded",
                &body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
