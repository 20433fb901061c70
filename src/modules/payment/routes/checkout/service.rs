use super::types::{request, response};
use crate::{
    modules::payment::{model::FieldSet, signature},
    types::Context,
};
use bigdecimal::BigDecimal;
use std::str::FromStr;
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let amount = BigDecimal::from_str(&payload.amount)
        .map_err(|_| response::Error::UnexpectedError)?
        .with_scale(2)
        .to_string();

    let fields = build_fields(&ctx, amount, payload.name_first, payload.email_address);

    tracing::debug!(
        "Redirecting checkout for {} to {}",
        fields.get("email_address").unwrap_or_default(),
        ctx.gateway.process_url
    );

    Ok(response::Success::RedirectForm(render_redirect_form(
        &ctx.gateway.process_url,
        &fields,
    )))
}

// The gateway's declared field order; the signature is computed over
// exactly this sequence.
fn build_fields(
    ctx: &Context,
    amount: String,
    name_first: String,
    email_address: String,
) -> FieldSet {
    let gateway = &ctx.gateway;

    let mut fields = FieldSet::new();
    fields.push("merchant_id", gateway.merchant_id.clone());
    fields.push("merchant_key", gateway.merchant_key.clone());
    fields.push("return_url", gateway.return_url.clone());
    fields.push("cancel_url", gateway.cancel_url.clone());
    fields.push("notify_url", gateway.notify_url.clone());
    fields.push("name_first", name_first);
    fields.push("email_address", email_address);
    fields.push("amount", amount);
    fields.push("item_name", gateway.item_name.clone());

    if let Some(passphrase) = gateway.passphrase.as_deref() {
        let signed = signature::sign(&fields, Some(passphrase));
        fields.push(signature::SIGNATURE_FIELD, signed);
    }

    fields
}

// merchant_key participates in the signature but is never posted
// through the browser.
fn render_redirect_form(process_url: &str, fields: &FieldSet) -> String {
    let inputs = fields
        .iter()
        .filter(|(name, _)| *name != "merchant_key")
        .map(|(name, value)| {
            format!(
                r#"<input type="hidden" name="{}" value="{}" />"#,
                name,
                escape_attribute(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <title>Redirecting to PayFast...</title>
  </head>
  <body onload="document.forms[0].submit()">
    <div style="text-align: center; padding: 50px;">
      <h2>Redirecting to PayFast...</h2>
      <p>Please wait...</p>
    </div>
    <form action="{}" method="POST">
      {}
    </form>
  </body>
</html>
"#,
        escape_attribute(process_url),
        inputs
    )
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
