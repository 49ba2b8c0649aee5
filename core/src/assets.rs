// kiosk/src/assets.rs

//! Composes the relative image references sent by the catalog endpoint into
//! absolute asset URLs.

use crate::model::Item;

/// Rewrites one file extension into another, e.g. `.svg` into `.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionRewrite {
  from: String,
  to: String,
}

impl ExtensionRewrite {
  /// Leading dots are optional: `("svg", "png")` and `(".svg", ".png")` are equivalent.
  pub fn new(from: &str, to: &str) -> Self {
    Self {
      from: format!(".{}", from.trim_start_matches('.')),
      to: format!(".{}", to.trim_start_matches('.')),
    }
  }

  fn apply(&self, reference: &str) -> String {
    match reference.strip_suffix(self.from.as_str()) {
      Some(stem) => format!("{}{}", stem, self.to),
      None => reference.to_string(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetResolver {
  base: String,
  rewrite: Option<ExtensionRewrite>,
}

impl AssetResolver {
  pub fn new(base: impl Into<String>, rewrite: Option<ExtensionRewrite>) -> Self {
    Self {
      base: base.into(),
      rewrite,
    }
  }

  /// `base + reference`, with the extension rewrite applied when it matches.
  /// Absolute references are left alone apart from the rewrite.
  pub fn resolve(&self, reference: &str) -> String {
    let reference = match &self.rewrite {
      Some(rewrite) => rewrite.apply(reference),
      None => reference.to_string(),
    };
    if reference.is_empty() || reference.starts_with("http://") || reference.starts_with("https://") || self.base.is_empty() {
      return reference;
    }
    format!(
      "{}/{}",
      self.base.trim_end_matches('/'),
      reference.trim_start_matches('/')
    )
  }

  pub fn resolve_item(&self, mut item: Item) -> Item {
    item.image_ref = self.resolve(&item.image_ref);
    item
  }
}
