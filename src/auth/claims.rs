use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Educator identity carried by the bearer token issued after OAuth sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (provider user id)
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(sub: &str, email: &str, name: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: sub.to_string(),
            email: email.trim().to_lowercase(),
            name: name.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    /// Lowercased part after the last `@`, or `None` for a malformed address.
    pub fn email_domain(&self) -> Option<&str> {
        self.email
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .filter(|d| !d.is_empty())
    }
}
