use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// This struct holds all the necessary configuration parameters
/// required to initialize and run the server.
/// It includes database connection details, JWT configuration,
/// server host and port, number of worker threads, CORS settings,
/// logging preferences, and the credentials for the external
/// AI-draft and email-delivery providers.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// Configuration for JWT (JSON Web Token) authentication.
    pub jwt_config: JwtConfig,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Base URL of the web application, used to build deep links in
    /// reminder emails.
    pub app_base_url: String,
    /// Shared secret guarding the sweep trigger endpoint. Empty means the
    /// check is skipped (trusted scheduler, not a public surface).
    pub sweep_secret: String,
    /// Configuration for the AI draft-generation provider.
    pub ai: AiConfig,
    /// Configuration for the transactional email provider.
    pub email: EmailConfig,
}

#[derive(Clone, Debug)]
/// Credentials and endpoint for the OpenAI-compatible completion API used
/// to generate follow-up drafts. An empty `api_key` disables drafting.
pub struct AiConfig {
    /// The API key for the completion provider.
    pub api_key: String,
    /// The model name to request.
    pub model: String,
    /// The base URL of the completion API.
    pub base_url: String,
}

#[derive(Clone, Debug)]
/// Credentials for the transactional email provider. An empty `api_key`
/// or `from_address` disables automated reminder emails.
pub struct EmailConfig {
    /// The API key for the email provider.
    pub api_key: String,
    /// The sender address reminder emails are dispatched from.
    pub from_address: String,
    /// The base URL of the email provider API.
    pub base_url: String,
}

#[derive(Clone, Debug)]
/// Configuration for JSON Web Token (JWT) authentication.
///
/// This struct contains the secret key used to verify JWTs issued by the
/// external identity provider and the expiration time in hours for tokens
/// generated locally (tests, tooling).
pub struct JwtConfig {
    /// The secret key used to sign and verify JWTs.
    pub secret: String,
    /// The expiration time for JWTs in hours.
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// Creates a new `JwtConfig` instance from environment variables.
    ///
    /// Reads the JWT configuration from environment variables:
    /// - `JWT_SECRET`: Required. The secret key for JWT verification.
    /// - `JWT_EXPIRATION_HOURS`: Optional. Defaults to 24 hours if not provided.
    ///
    /// # Panics
    ///
    /// This function will panic if:
    /// - `JWT_SECRET` environment variable is not set
    /// - `JWT_EXPIRATION_HOURS` is set but cannot be parsed as a valid number
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        JwtConfig {
            secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a valid number"),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// Loads all configuration values from environment variables with sensible
    /// defaults for most optional settings. Provider credentials (AI, email,
    /// sweep secret) default to empty strings; the components that need them
    /// degrade or refuse work individually rather than preventing boot.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`: "development" or "production"
    /// - `DATABASE_URL`: Connection string for the database
    /// - `JWT_SECRET`: Secret key for JWT verification (via `JwtConfig::from_env()`)
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `APP_BASE_URL`: Web app base URL for email deep links (default: "http://localhost:3000")
    /// - `SWEEP_SECRET`: Shared secret for the sweep trigger (default: empty, check skipped)
    /// - `AI_API_KEY`, `AI_MODEL`, `AI_BASE_URL`: Draft provider settings
    /// - `EMAIL_API_KEY`, `EMAIL_FROM`, `EMAIL_BASE_URL`: Email provider settings
    ///
    /// # Panics
    ///
    /// This function will panic if required environment variables are missing
    /// or if numeric values cannot be parsed correctly.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_config: JwtConfig::from_env(),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            sweep_secret: env::var("SWEEP_SECRET").unwrap_or_default(),
            ai: AiConfig {
                api_key: env::var("AI_API_KEY").unwrap_or_default(),
                model: env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                base_url: env::var("AI_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            },
            email: EmailConfig {
                api_key: env::var("EMAIL_API_KEY").unwrap_or_default(),
                from_address: env::var("EMAIL_FROM").unwrap_or_default(),
                base_url: env::var("EMAIL_BASE_URL")
                    .unwrap_or_else(|_| "https://api.resend.com".to_string()),
            },
        })
    }
}
