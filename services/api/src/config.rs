/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access and grant tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 8080). Env var: `API_PORT`.
    pub api_port: u16,
    /// SMS provider base URL; phone, code and template are appended as path segments.
    pub sms_gateway_url: String,
    /// Provider-side message template name (default `OTP1`).
    pub sms_template: String,
    /// Directory holding uploaded images (default `Images`).
    pub image_dir: String,
    /// Origin used to build image URLs (default `http://localhost:8080`).
    pub public_base_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            sms_gateway_url: std::env::var("SMS_GATEWAY_URL").expect("SMS_GATEWAY_URL"),
            sms_template: std::env::var("SMS_TEMPLATE").unwrap_or_else(|_| "OTP1".to_owned()),
            image_dir: std::env::var("IMAGE_DIR").unwrap_or_else(|_| "Images".to_owned()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_owned()),
        }
    }
}
