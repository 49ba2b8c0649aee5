// kiosk/src/config.rs

use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::assets::{AssetResolver, ExtensionRewrite};
use crate::error::{KioskError, KioskResult};
use crate::store::PricelessPolicy;

const DEFAULT_API_URL: &str = "http://localhost:3000/api/weblarek";
const DEFAULT_ASSET_URL: &str = "http://localhost:3000/content/weblarek";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct KioskConfig {
  pub api_base_url: String,
  pub asset_base_url: String,
  pub image_rewrite: Option<ExtensionRewrite>,
  /// Upper bound for every gateway request, order submission included.
  pub request_timeout: Duration,
  pub priceless_policy: PricelessPolicy,
}

impl Default for KioskConfig {
  fn default() -> Self {
    Self {
      api_base_url: DEFAULT_API_URL.to_string(),
      asset_base_url: DEFAULT_ASSET_URL.to_string(),
      image_rewrite: Some(ExtensionRewrite::new("svg", "png")),
      request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
      priceless_policy: PricelessPolicy::Reject,
    }
  }
}

impl KioskConfig {
  /// Reads the configuration from the environment, loading `.env` first if present.
  ///
  /// | variable | meaning |
  /// |---|---|
  /// | `KIOSK_API_URL` | storefront API base |
  /// | `KIOSK_ASSET_URL` | base prepended to image references |
  /// | `KIOSK_IMAGE_REWRITE` | `from:to` extension rewrite, or `none` |
  /// | `KIOSK_REQUEST_TIMEOUT_SECS` | gateway timeout in seconds |
  /// | `KIOSK_PRICELESS_POLICY` | `reject` or `zero` |
  ///
  /// Unset variables fall back to [`KioskConfig::default`].
  pub fn from_env() -> KioskResult<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Same as [`from_env`](Self::from_env) but reads variables through `lookup`.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> KioskResult<Self> {
    let defaults = Self::default();

    let api_base_url = lookup("KIOSK_API_URL").unwrap_or(defaults.api_base_url);
    let asset_base_url = lookup("KIOSK_ASSET_URL").unwrap_or(defaults.asset_base_url);

    let image_rewrite = match lookup("KIOSK_IMAGE_REWRITE") {
      None => defaults.image_rewrite,
      Some(raw) => parse_rewrite(&raw)?,
    };

    let request_timeout = match lookup("KIOSK_REQUEST_TIMEOUT_SECS") {
      None => defaults.request_timeout,
      Some(raw) => {
        let secs = raw.trim().parse::<u64>().map_err(|e| KioskError::Configuration {
          message: format!("Invalid KIOSK_REQUEST_TIMEOUT_SECS '{}': {}", raw, e),
        })?;
        Duration::from_secs(secs)
      }
    };

    let priceless_policy = match lookup("KIOSK_PRICELESS_POLICY") {
      None => defaults.priceless_policy,
      Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
        "reject" => PricelessPolicy::Reject,
        "zero" => PricelessPolicy::CountAsZero,
        other => {
          return Err(KioskError::Configuration {
            message: format!("Invalid KIOSK_PRICELESS_POLICY '{}': expected 'reject' or 'zero'", other),
          })
        }
      },
    };

    Ok(Self {
      api_base_url,
      asset_base_url,
      image_rewrite,
      request_timeout,
      priceless_policy,
    })
  }

  pub fn asset_resolver(&self) -> AssetResolver {
    AssetResolver::new(self.asset_base_url.clone(), self.image_rewrite.clone())
  }
}

fn parse_rewrite(raw: &str) -> KioskResult<Option<ExtensionRewrite>> {
  let raw = raw.trim();
  if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
    return Ok(None);
  }
  match raw.split_once(':') {
    Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
      Ok(Some(ExtensionRewrite::new(from.trim(), to.trim())))
    }
    _ => Err(KioskError::Configuration {
      message: format!("Invalid KIOSK_IMAGE_REWRITE '{}': expected 'from:to'", raw),
    }),
  }
}
