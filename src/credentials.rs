//! Credentials and endpoint configuration read from the environment.
//!
//! The uploader has no configuration file. Everything it needs to reach
//! CDF comes from a handful of environment variables that are read once at
//! start-up through a lookup function, so tests can inject their own values.

use std::fmt;

use tracing::{debug, trace};
use url::Url;

pub const ENV_PROJECT: &str = "CDF_PROJECT";
pub const ENV_CLUSTER: &str = "CDF_CLUSTER";
pub const ENV_BASE_URL: &str = "CDF_BASE_URL";
pub const ENV_TENANT_ID: &str = "IDP_TENANT_ID";
pub const ENV_CLIENT_ID: &str = "IDP_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "IDP_CLIENT_SECRET";
pub const ENV_TOKEN_URL: &str = "IDP_TOKEN_URL";
pub const ENV_SCOPES: &str = "IDP_SCOPES";

pub const DEFAULT_CLUSTER: &str = "api";
pub const PLATFORM_DOMAIN: &str = "cognitedata.com";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("missing credential: environment variable {name} is not set")]
    MissingVariable { name: &'static str },
    #[error("invalid cluster name {cluster:?}: {cause}")]
    InvalidCluster { cluster: String, cause: url::ParseError },
    #[error("invalid base URL {url:?}: {cause}")]
    InvalidBaseUrl { url: String, cause: url::ParseError },
    #[error("invalid token URL {url:?}: {cause}")]
    InvalidTokenUrl { url: String, cause: url::ParseError },
}

#[derive(Clone)]
pub struct Credentials {
    project: String,
    cluster: String,
    tenant_id: String,
    client_id: String,
    client_secret: String,
    base_url: Option<String>,
    token_url: Option<String>,
    scopes: Option<Vec<String>>,
}

impl Credentials {
    /// Read the credentials through `lookup`, which returns the value of a
    /// variable by name. Empty or whitespace-only values count as missing;
    /// any other value is kept exactly as read.
    pub fn from_lookup<F>(lookup: F) -> Result<Credentials, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| read(name).ok_or(CredentialError::MissingVariable { name });

        let project = required(ENV_PROJECT)?;
        let tenant_id = required(ENV_TENANT_ID)?;
        let client_id = required(ENV_CLIENT_ID)?;
        let client_secret = required(ENV_CLIENT_SECRET)?;
        let cluster = read(ENV_CLUSTER).unwrap_or_else(|| DEFAULT_CLUSTER.to_string());
        let base_url = read(ENV_BASE_URL);

        let token_url = read(ENV_TOKEN_URL);
        if let Some(url) = &token_url {
            Url::parse(url).map_err(|cause| CredentialError::InvalidTokenUrl {
                url: url.clone(),
                cause,
            })?;
        }

        let scopes = read(ENV_SCOPES).map(|raw| {
            raw.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        let credentials = Credentials {
            project,
            cluster,
            tenant_id,
            client_id,
            client_secret,
            base_url,
            token_url,
            scopes,
        };

        // The cluster is templated into a host name, so reject anything that does not form a URL
        credentials.base_url()?;

        debug!(
            "Loaded credentials for project {} on cluster {}",
            credentials.project, credentials.cluster
        );
        Ok(credentials)
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Base URL of the CDF cluster, e.g. `https://api.cognitedata.com/`.
    ///
    /// `CDF_BASE_URL` replaces the cluster-derived URL entirely, for proxies
    /// and local test servers.
    pub fn base_url(&self) -> Result<Url, CredentialError> {
        if let Some(raw) = &self.base_url {
            let with_slash = if raw.ends_with('/') {
                raw.clone()
            } else {
                format!("{}/", raw)
            };
            return Url::parse(&with_slash).map_err(|cause| CredentialError::InvalidBaseUrl {
                url: raw.clone(),
                cause,
            });
        }

        let raw = format!("https://{}.{}", self.cluster, PLATFORM_DOMAIN);
        trace!("Base URL: {}", raw);
        let url = Url::parse(&raw).map_err(|cause| CredentialError::InvalidCluster {
            cluster: self.cluster.clone(),
            cause,
        })?;
        match url.host_str() {
            Some(host) if host == format!("{}.{}", self.cluster, PLATFORM_DOMAIN) => Ok(url),
            _ => Err(CredentialError::InvalidCluster {
                cluster: self.cluster.clone(),
                cause: url::ParseError::InvalidDomainCharacter,
            }),
        }
    }

    /// OIDC token endpoint of the tenant, unless overridden by `IDP_TOKEN_URL`.
    pub fn token_url(&self) -> String {
        match &self.token_url {
            Some(url) => url.clone(),
            None => format!(
                "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
                self.tenant_id
            ),
        }
    }

    /// Scopes requested with the token, unless overridden by `IDP_SCOPES`.
    pub fn scopes(&self) -> Vec<String> {
        match &self.scopes {
            Some(scopes) => scopes.clone(),
            None => vec![format!("https://{}.{}/.default", self.cluster, PLATFORM_DOMAIN)],
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("project", &self.project)
            .field("cluster", &self.cluster)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("token_url", &self.token_url)
            .field("scopes", &self.scopes)
            .finish()
    }
}
