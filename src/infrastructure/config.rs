use std::env;

/// Bootstrap staff account created at start-up when both email and password are set
#[derive(Clone, Debug, PartialEq)]
pub struct StaffBootstrap {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub profile: String,
    pub jwt_secret: Option<String>,
    pub staff: Option<StaffBootstrap>,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (environment, test map)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = lookup("PROFILE").unwrap_or_else(|| "default".to_string());

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            if profile == "default" {
                "sqlite://bookstore.db?mode=rwc".to_string()
            } else {
                format!("sqlite://bookstore_{}.db?mode=rwc", profile)
            }
        });

        let staff = match (lookup("STAFF_EMAIL"), lookup("STAFF_PASSWORD")) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some(StaffBootstrap {
                    name: lookup("STAFF_NAME").unwrap_or_else(|| "Store Manager".to_string()),
                    email,
                    password,
                })
            }
            _ => None,
        };

        Self {
            database_url,
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            profile,
            jwt_secret: lookup("JWT_SECRET").filter(|s| !s.is_empty()),
            staff,
            seed_demo: lookup("SEED_DEMO")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(false),
        }
    }
}
