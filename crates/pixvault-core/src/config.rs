//! Configuration module
//!
//! Configuration is loaded once at startup from the environment (with `.env`
//! support) and passed explicitly into the storage client, repositories, and
//! server constructors. No component reads process-global mutable state after
//! startup.

use std::env;

use crate::error::AppError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 100 * 1024;
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 10;
const DEFAULT_THUMBNAIL_DIMENSION: u32 = 50;

/// Object storage configuration, passed into `S3Storage::new`.
#[derive(Clone, Debug)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Service configuration
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    database_url: String,
    db_max_connections: u32,
    db_timeout_seconds: u64,
    s3: S3Config,
    jwt_secret: String,
    auth_enabled: bool,
    max_file_size_bytes: usize,
    allowed_extensions: Vec<String>,
    thumbnail_width: u32,
    thumbnail_height: u32,
    upload_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, AppError> {
        // Missing .env is fine; real deployments set the environment directly.
        let _ = dotenvy::dotenv();

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            // Assemble the DSN from discrete DB_* variables
            Err(_) => format!(
                "postgres://{}:{}@{}:{}/{}?sslmode={}",
                env_or("DB_USER", "postgres"),
                env_or("DB_PASSWORD", "password"),
                env_or("DB_HOST", "localhost"),
                env_or("DB_PORT", "5432"),
                env_or("DB_NAME", "pixvault"),
                env_or("DB_SSL", "disable"),
            ),
        };

        let s3 = S3Config {
            bucket: env_or("AWS_S3_BUCKET_NAME", ""),
            region: env_or("AWS_REGION", ""),
            endpoint: env::var("AWS_S3_ENDPOINT").ok().filter(|v| !v.is_empty()),
            access_key_id: env::var("AWS_ACCESS_KEY_ID").ok().filter(|v| !v.is_empty()),
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
        };

        Ok(Config {
            server_port: parse_env("APP_PORT", DEFAULT_PORT)?,
            database_url,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_env("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS)?,
            s3,
            jwt_secret: env_or("JWT_SECRET", ""),
            auth_enabled: parse_env("AUTH_ENABLED", false)?,
            max_file_size_bytes: parse_env("MAX_FILE_SIZE_BYTES", DEFAULT_MAX_FILE_SIZE_BYTES)?,
            allowed_extensions: env_or("ALLOWED_EXTENSIONS", "jpeg,jpg,png")
                .split(',')
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
            thumbnail_width: parse_env("THUMBNAIL_WIDTH", DEFAULT_THUMBNAIL_DIMENSION)?,
            thumbnail_height: parse_env("THUMBNAIL_HEIGHT", DEFAULT_THUMBNAIL_DIMENSION)?,
            upload_timeout_seconds: parse_env(
                "UPLOAD_TIMEOUT_SECONDS",
                DEFAULT_UPLOAD_TIMEOUT_SECS,
            )?,
        })
    }

    /// Fail fast on configuration that cannot serve a single request.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.s3.bucket.is_empty() {
            return Err(AppError::Config(
                "AWS_S3_BUCKET_NAME is not configured".to_string(),
            ));
        }
        if self.s3.region.is_empty() && self.s3.endpoint.is_none() {
            return Err(AppError::Config(
                "AWS_REGION or AWS_S3_ENDPOINT must be configured".to_string(),
            ));
        }
        if self.auth_enabled && self.jwt_secret.is_empty() {
            return Err(AppError::Config(
                "JWT_SECRET must be set when AUTH_ENABLED=true".to_string(),
            ));
        }
        if self.max_file_size_bytes == 0 {
            return Err(AppError::Config(
                "MAX_FILE_SIZE_BYTES must be greater than zero".to_string(),
            ));
        }
        if self.thumbnail_width == 0 || self.thumbnail_height == 0 {
            return Err(AppError::Config(
                "thumbnail dimensions must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn s3(&self) -> &S3Config {
        &self.s3
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn auth_enabled(&self) -> bool {
        self.auth_enabled
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_bytes
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn thumbnail_width(&self) -> u32 {
        self.thumbnail_width
    }

    pub fn thumbnail_height(&self) -> u32 {
        self.thumbnail_height
    }

    pub fn upload_timeout_seconds(&self) -> u64 {
        self.upload_timeout_seconds
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", key, value))),
        Err(_) => Ok(default),
    }
}
