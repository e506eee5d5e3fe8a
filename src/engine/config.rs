//! Rendering configuration.

use super::types::BundleType;

/// Default width of the progress bar, in cells.
pub const DEFAULT_BAR_WIDTH: u16 = 20;

/// Widest progress bar the renderer will draw.
pub const MAX_BAR_WIDTH: u16 = 200;

/// Configuration for the terminal renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub bar_width: u16,
    pub color: bool,
    /// Overrides the bundle type carried by the snapshot
    pub bundle_type: Option<BundleType>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            color: true,
            bundle_type: None,
        }
    }
}

impl RenderConfig {
    /// Turns colored output on or off for the whole process.
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }

    /// The bundle type to report, preferring the override.
    #[must_use]
    pub fn resolve_type(&self, from_snapshot: &BundleType) -> BundleType {
        self.bundle_type
            .clone()
            .unwrap_or_else(|| from_snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.bar_width, DEFAULT_BAR_WIDTH);
        assert!(config.color);
        assert!(config.bundle_type.is_none());
    }

    #[test]
    fn test_override_wins() {
        let config = RenderConfig {
            bundle_type: Some(BundleType::MarketplaceInstallment),
            ..RenderConfig::default()
        };
        assert_eq!(
            config.resolve_type(&BundleType::MarketplaceOnetime),
            BundleType::MarketplaceInstallment
        );
        assert_eq!(
            RenderConfig::default().resolve_type(&BundleType::MarketplaceOnetime),
            BundleType::MarketplaceOnetime
        );
    }
}
