use std::env;
use secrecy::SecretString;

const DEV_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub mongo_max_pool_size: u32,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    /// Educator sign-in is limited to these email domains; empty allows any.
    pub allowed_email_domains: Vec<String>,
    /// Percentage at or above which a submission is shown as passed.
    pub pass_threshold_percent: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "quizdesk-local".to_string()),
            mongo_max_pool_size: env::var("MONGO_MAX_POOL_SIZE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            allowed_email_domains: env::var("ALLOWED_EMAIL_DOMAINS")
                .map(|d| parse_domains(&d))
                .unwrap_or_default(),
            pass_threshold_percent: env::var("PASS_THRESHOLD_PERCENT")
                .ok()
                .and_then(|p| p.parse::<u32>().ok())
                .map(|p| p.min(100))
                .unwrap_or(75),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEV_JWT_SECRET {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if self.allowed_email_domains.is_empty() {
            log::warn!("ALLOWED_EMAIL_DOMAINS is empty; educators from any domain can sign in");
        }
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizdesk-test".to_string(),
            mongo_max_pool_size: 2,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            allowed_email_domains: vec!["school.edu".to_string()],
            pass_threshold_percent: 75,
        }
    }
}

fn parse_domains(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|d| d.trim().trim_start_matches('@').to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(config.pass_threshold_percent <= 100);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_db_name, "quizdesk-test");
        assert_eq!(config.pass_threshold_percent, 75);
        assert_eq!(config.allowed_email_domains, vec!["school.edu"]);
    }

    #[test]
    fn test_parse_domains() {
        assert_eq!(
            parse_domains(" School.edu, @district.org ,,"),
            vec!["school.edu", "district.org"]
        );
        assert!(parse_domains("").is_empty());
    }

    #[test]
    #[should_panic(expected = "JWT_SECRET is using default value")]
    fn test_production_rejects_dev_secret() {
        let mut config = Config::test_config();
        config.jwt_secret = SecretString::from(DEV_JWT_SECRET.to_string());
        config.validate_for_production();
    }
}
