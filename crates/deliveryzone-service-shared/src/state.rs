//! Application state for HTTP microservices.
//!
//! Settings are read once at startup; handlers share the resulting resolver
//! through axum's `State` extractor.

use std::path::Path;
use std::sync::Arc;

use deliveryzone_lib::{DeliverySettings, DeliveryZoneResolver, Error as LibError};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The settings file does not exist.
    SettingsNotFound(String),

    /// The settings file exists but could not be parsed or validated.
    SettingsLoad(LibError),

    /// Settings parsed but the resolver rejected them.
    Resolver(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SettingsNotFound(path) => write!(f, "delivery settings not found: {}", path),
            Self::SettingsLoad(e) => write!(f, "failed to load delivery settings: {}", e),
            Self::Resolver(e) => write!(f, "failed to build zone resolver: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SettingsLoad(e) | Self::Resolver(e) => Some(e),
            Self::SettingsNotFound(_) => None,
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone (`Arc` inside).
///
/// ```ignore
/// use axum::{Router, routing::post, extract::State};
/// use deliveryzone_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let zones = state.resolver().active_zones();
/// }
///
/// let state = AppState::load("delivery_settings.json").unwrap();
/// let app = Router::new()
///     .route("/api/v1/delivery/quote", post(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    settings: DeliverySettings,
    resolver: DeliveryZoneResolver,
}

impl AppState {
    /// Load and validate the settings file, then build the resolver.
    pub fn load(settings_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let settings_path = settings_path.as_ref();

        if !settings_path.exists() {
            return Err(AppStateError::SettingsNotFound(
                settings_path.display().to_string(),
            ));
        }

        tracing::info!(path = %settings_path.display(), "loading delivery settings");
        let settings =
            DeliverySettings::from_path(settings_path).map_err(AppStateError::SettingsLoad)?;

        let state = Self::from_settings(settings)?;
        tracing::info!(
            active_zones = state.active_zone_count(),
            max_configured_distance_km = state.resolver().max_configured_distance(),
            "zone resolver ready"
        );
        Ok(state)
    }

    /// Build state from already-parsed settings (tests, embedded configs).
    pub fn from_settings(settings: DeliverySettings) -> Result<Self, AppStateError> {
        settings.validate().map_err(AppStateError::SettingsLoad)?;
        let resolver =
            DeliveryZoneResolver::from_settings(&settings).map_err(AppStateError::Resolver)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { settings, resolver }),
        })
    }

    pub fn settings(&self) -> &DeliverySettings {
        &self.inner.settings
    }

    pub fn resolver(&self) -> &DeliveryZoneResolver {
        &self.inner.resolver
    }

    /// Currency code used when rendering quotes.
    pub fn currency(&self) -> &str {
        &self.inner.settings.currency
    }

    pub fn active_zone_count(&self) -> usize {
        self.inner.resolver.active_zones().len()
    }

    /// Ready to quote: at least one active zone.
    pub fn is_ready(&self) -> bool {
        self.active_zone_count() > 0
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("restaurant", self.inner.resolver.restaurant())
            .field("active_zones", &self.active_zone_count())
            .field("currency", &self.inner.settings.currency)
            .finish()
    }
}
