use super::types::{request, response};
use crate::{
    modules::payment::{model::FieldSet, signature},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let body = String::from_utf8(payload.body.to_vec()).map_err(|err| {
        tracing::warn!("Notification body is not valid UTF-8: {err}");
        response::Error::InvalidPayload
    })?;

    // The canonical string is rebuilt from the pairs in the order the
    // gateway sent them.
    let fields = FieldSet::from_form_body(&body).map_err(|err| {
        tracing::warn!("Failed to parse notification body: {err}");
        response::Error::InvalidPayload
    })?;

    let candidate = fields.get(signature::SIGNATURE_FIELD).ok_or_else(|| {
        tracing::warn!("Notification carried no signature field");
        response::Error::InvalidSignature
    })?;

    if !signature::verify(&fields, ctx.gateway.passphrase.as_deref(), candidate) {
        tracing::warn!("Notification signature mismatch");
        return Err(response::Error::InvalidSignature);
    }

    // Nothing is persisted here, so a repeated identical notification
    // verifies and acknowledges the same way.
    tracing::info!(
        "Payment notification verified, payment id {}",
        fields.get("pf_payment_id").unwrap_or("unknown")
    );

    Ok(response::Success::Acknowledged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::payment::testing;
    use bytes::Bytes;

    fn notification_body(amount: &str, passphrase: Option<&str>) -> String {
        let mut fields = FieldSet::new();
        fields.push("m_payment_id", "01");
        fields.push("pf_payment_id", "1089250");
        fields.push("payment_status", "COMPLETE");
        fields.push("amount_gross", amount);
        let signed = signature::sign(&fields, passphrase);

        format!(
            "m_payment_id=01&pf_payment_id=1089250&payment_status=COMPLETE&amount_gross={}&signature={}",
            amount, signed
        )
    }

    #[tokio::test]
    async fn valid_notification_is_acknowledged() {
        let body = notification_body("100.00", Some("shh"));

        let result = service(
            testing::context(Some("shh")),
            request::Payload {
                body: Bytes::from(body),
            },
        )
        .await;

        assert!(matches!(result, Ok(response::Success::Acknowledged)));
    }

    #[tokio::test]
    async fn verifies_without_a_passphrase() {
        let body = notification_body("100.00", None);

        let result = service(
            testing::context(None),
            request::Payload {
                body: Bytes::from(body),
            },
        )
        .await;

        assert!(matches!(result, Ok(response::Success::Acknowledged)));
    }

    #[tokio::test]
    async fn tampered_amount_is_rejected() {
        let body = notification_body("100.00", Some("shh"))
            .replace("amount_gross=100.00", "amount_gross=999.00");

        let result = service(
            testing::context(Some("shh")),
            request::Payload {
                body: Bytes::from(body),
            },
        )
        .await;

        assert!(matches!(result, Err(response::Error::InvalidSignature)));
    }

    #[tokio::test]
    async fn uppercase_signature_still_verifies() {
        let body = notification_body("100.00", None);
        let (prefix, signed) = body.rsplit_once("signature=").unwrap();
        let body = format!("{}signature={}", prefix, signed.to_uppercase());

        let result = service(
            testing::context(None),
            request::Payload {
                body: Bytes::from(body),
            },
        )
        .await;

        assert!(matches!(result, Ok(response::Success::Acknowledged)));
    }

    #[tokio::test]
    async fn missing_signature_is_rejected() {
        let result = service(
            testing::context(None),
            request::Payload {
                body: Bytes::from_static(b"m_payment_id=01&amount_gross=100.00"),
            },
        )
        .await;

        assert!(matches!(result, Err(response::Error::InvalidSignature)));
    }

    #[tokio::test]
    async fn invalid_utf8_body_is_rejected() {
        let result = service(
            testing::context(None),
            request::Payload {
                body: Bytes::from_static(&[0x80, 0xff]),
            },
        )
        .await;

        assert!(matches!(result, Err(response::Error::InvalidPayload)));
    }

    #[tokio::test]
    async fn wrong_passphrase_is_rejected() {
        let body = notification_body("100.00", Some("shh"));

        let result = service(
            testing::context(Some("hhs")),
            request::Payload {
                body: Bytes::from(body),
            },
        )
        .await;

        assert!(matches!(result, Err(response::Error::InvalidSignature)));
    }
}
