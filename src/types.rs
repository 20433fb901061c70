use std::env;

#[derive(Clone)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct GatewayContext {
    pub process_url: String,
    pub merchant_id: String,
    pub merchant_key: String,
    pub passphrase: Option<String>,
    pub item_name: String,
    pub return_url: String,
    pub cancel_url: String,
    pub notify_url: String,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub gateway: GatewayContext,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct GatewayConfig {
    pub process_url: String,
    pub merchant_id: String,
    pub merchant_key: String,
    pub passphrase: Option<String>,
    pub item_name: String,
    pub return_url: String,
    pub cancel_url: String,
    pub notify_url: String,
}

#[derive(Clone)]
pub struct Config {
    pub app: AppConfig,
    pub gateway: GatewayConfig,
}

impl Default for Config {
    fn default() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));

        // Merchant credentials are deliberately required: shipping
        // hard-coded sandbox credentials is how payments silently end
        // up in the wrong account.
        let merchant_id = env::var("PAYFAST_MERCHANT_ID").expect("PAYFAST_MERCHANT_ID not set");
        let merchant_key = env::var("PAYFAST_MERCHANT_KEY").expect("PAYFAST_MERCHANT_KEY not set");
        let passphrase = env::var("PAYFAST_PASSPHRASE")
            .ok()
            .filter(|passphrase| !passphrase.is_empty());
        let process_url = env::var("PAYFAST_PROCESS_URL")
            .unwrap_or_else(|_| "https://sandbox.payfast.co.za/eng/process".to_string());
        let item_name =
            env::var("PAYFAST_ITEM_NAME").unwrap_or_else(|_| "Online Payment".to_string());
        let return_url = env::var("RETURN_URL").unwrap_or_else(|_| format!("{}/success", url));
        let cancel_url = env::var("CANCEL_URL").unwrap_or_else(|_| format!("{}/cancel", url));
        let notify_url =
            env::var("NOTIFY_URL").unwrap_or_else(|_| format!("{}/api/payments/notify", url));

        Self {
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            gateway: GatewayConfig {
                process_url,
                merchant_id,
                merchant_key,
                passphrase,
                item_name,
                return_url,
                cancel_url,
                notify_url,
            },
        }
    }
}

pub trait ToContext {
    fn to_context(self) -> Context;
}

impl ToContext for Config {
    fn to_context(self) -> Context {
        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            gateway: GatewayContext {
                process_url: self.gateway.process_url,
                merchant_id: self.gateway.merchant_id,
                merchant_key: self.gateway.merchant_key,
                passphrase: self.gateway.passphrase,
                item_name: self.gateway.item_name,
                return_url: self.gateway.return_url,
                cancel_url: self.gateway.cancel_url,
                notify_url: self.gateway.notify_url,
            },
        }
    }
}
