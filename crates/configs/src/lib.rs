use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub identifiers: IdentifierConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Sent as `_per_page` when fetching a whole collection. Best effort only.
    #[serde(default = "default_per_page_hint")]
    pub per_page_hint: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_secs: default_timeout(), per_page_hint: default_per_page_hint() }
    }
}

/// Constants shown or used by list screens.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_length")]
    pub page_length: u32,
    #[serde(default = "default_search_placeholder")]
    pub search_placeholder: String,
    #[serde(default = "default_empty_list_message")]
    pub empty_list_message: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_length: default_page_length(),
            search_placeholder: default_search_placeholder(),
            empty_list_message: default_empty_list_message(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct IdentifierConfig {
    #[serde(default)]
    pub policy: IdentifierPolicy,
}

/// Rule used to canonicalize raw backend identifiers.
///
/// The two policies are not interchangeable: one process must use a single
/// policy for every list/get/create/update/delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierPolicy {
    /// Keep the backend's native id shape (number or string).
    #[default]
    Preserving,
    /// Coerce every id into an integer.
    Numeric,
}

impl std::str::FromStr for IdentifierPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserving" => Ok(Self::Preserving),
            "numeric" => Ok(Self::Numeric),
            other => Err(anyhow!("identifiers.policy inválida: {other} (use preserving ou numeric)")),
        }
    }
}

fn default_base_url() -> String { "http://localhost:3001".into() }
fn default_timeout() -> u64 { 10 }
fn default_per_page_hint() -> u32 { 10_000 }
fn default_page_length() -> u32 { 7 }
fn default_search_placeholder() -> String { "Pesquisar...".into() }
fn default_empty_list_message() -> String { "Nenhum registro encontrado.".into() }
fn default_debounce_ms() -> u64 { 300 }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

impl AppConfig {
    /// Load `CONFIG_PATH` (or defaults when the file does not exist), apply
    /// environment overrides and validate.
    pub fn load() -> Result<Self> {
        Self::load_with(&config_path(), |key| std::env::var(key).ok())
    }

    fn load_with(path: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = if std::path::Path::new(path).exists() { load_from_file(path)? } else { AppConfig::default() };
        cfg.apply_overrides(lookup)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(len) = lookup("LISTING_PAGE_LENGTH") {
            self.listing.page_length = len
                .trim()
                .parse()
                .map_err(|_| anyhow!("LISTING_PAGE_LENGTH deve ser um inteiro positivo: {len}"))?;
        }
        if let Some(policy) = lookup("ID_POLICY") {
            self.identifiers.policy = policy.parse()?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.api.normalize()?;
        self.listing.validate()?;
        Ok(())
    }
}

impl ApiConfig {
    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.api_base_trimmed();
        if trimmed.is_empty() {
            return Err(anyhow!("api.base_url está vazio"));
        }
        let lower = trimmed.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url deve começar com http:// ou https://"));
        }
        self.base_url = trimmed;
        if self.timeout_secs == 0 {
            return Err(anyhow!("api.timeout_secs deve ser >= 1"));
        }
        if self.per_page_hint == 0 {
            return Err(anyhow!("api.per_page_hint deve ser >= 1"));
        }
        Ok(())
    }

    fn api_base_trimmed(&self) -> String {
        self.base_url.trim().trim_end_matches('/').to_string()
    }
}

impl ListingConfig {
    fn validate(&self) -> Result<()> {
        if self.page_length == 0 {
            return Err(anyhow!("listing.page_length deve ser >= 1"));
        }
        Ok(())
    }
}
