use anyhow::Context;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

/// Session cookie attributes. Name, path and max-age are fixed by the token lifetime.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "token".into(),
            secure: false,
        }
    }
}

/// Page classification used by the edge route gate.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    pub protected_prefix: String,
    pub auth_pages: Vec<String>,
    pub login_path: String,
    pub dashboard_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            protected_prefix: "/dashboard".into(),
            auth_pages: vec!["/login".into(), "/register".into()],
            login_path: "/login".into(),
            dashboard_path: "/dashboard".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
    pub guard: GuardConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }
        let jwt = JwtConfig {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "taskdesk".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "taskdesk-users".into()),
        };

        let cookie = CookieConfig {
            secure: std::env::var("COOKIE_SECURE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            ..CookieConfig::default()
        };

        let defaults = GuardConfig::default();
        let guard = GuardConfig {
            protected_prefix: std::env::var("PROTECTED_PATH_PREFIX")
                .unwrap_or(defaults.protected_prefix),
            auth_pages: std::env::var("AUTH_PAGES")
                .map(|v| parse_list(&v))
                .unwrap_or(defaults.auth_pages),
            login_path: std::env::var("LOGIN_PATH").unwrap_or(defaults.login_path),
            dashboard_path: std::env::var("DASHBOARD_PATH").unwrap_or(defaults.dashboard_path),
        };

        Ok(Self {
            database_url,
            db_max_connections,
            jwt,
            cookie,
            guard,
        })
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_list(v: &str) -> Vec<String> {
    v.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
