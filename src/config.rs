use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub upload_dir: PathBuf,
    /// Idle time after which a session record expires.
    pub session_ttl_secs: u64,
    /// Mark the session cookie `Secure`. Leave off when serving plain HTTP.
    pub secure_cookie: bool,
    pub max_upload_bytes: usize,
    /// Require a session for `/uploads/{filename}`. Off by default, which
    /// leaves raw files publicly readable by URL.
    pub protect_uploads: bool,
    pub bcrypt_cost: u32,
    pub doctor_password: String,
    pub student_password: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("upload_dir", &self.upload_dir)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("secure_cookie", &self.secure_cookie)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("protect_uploads", &self.protect_uploads)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("doctor_password", &"<redacted>")
            .field("student_password", &"<redacted>")
            .finish()
    }
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: parsed("PORT", 5000),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            upload_dir: env::var("UPLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            session_ttl_secs: parsed("SESSION_TTL_SECS", 24 * 60 * 60),
            secure_cookie: parsed("SESSION_COOKIE_SECURE", false),
            max_upload_bytes: parsed("MAX_UPLOAD_BYTES", 16 * 1024 * 1024),
            protect_uploads: parsed("PROTECT_UPLOADS", false),
            bcrypt_cost: parsed("BCRYPT_COST", bcrypt::DEFAULT_COST),
            doctor_password: env::var("DOCTOR_PASSWORD").unwrap_or_else(|_| "doctor123".to_string()),
            student_password: env::var("STUDENT_PASSWORD").unwrap_or_else(|_| "student123".to_string()),
        }
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
