//! Two-step lookup against ashrae-meteo.info: nearest station search, then
//! design parameters for that station.

use tracing::{debug, warn};

use crate::{
    decode::{decode_stations, extract_design_data},
    error::FetchError,
    model::{AshraeVersion, Coordinate, DesignData, MeteoStation, UnitSystem},
    transport::{HttpTransport, RawResponse, Transport},
};

pub const DEFAULT_BASE_URL: &str = "https://ashrae-meteo.info/v2.0";

/// Number of candidate stations requested from the place search.
pub const STATION_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub station_limit: u32,
    pub units: UnitSystem,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            station_limit: STATION_LIMIT,
            units: UnitSystem::Si,
        }
    }
}

impl ClientConfig {
    /// Point the client at another host (mirrors, local fixtures).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    fn places_url(&self) -> String {
        format!("{}/request_places.php", self.base_url)
    }

    fn parameters_url(&self) -> String {
        format!("{}/request_meteo_parametres.php", self.base_url)
    }
}

/// Client for the ASHRAE meteo station service.
///
/// Holds no mutable state; one instance can serve any number of lookups.
#[derive(Debug, Clone)]
pub struct AshraeClient<T: Transport = HttpTransport> {
    transport: T,
    config: ClientConfig,
}

impl AshraeClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(HttpTransport::new(), config)
    }
}

impl Default for AshraeClient<HttpTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> AshraeClient<T> {
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Find the station the service ranks first for `coord`.
    ///
    /// The service orders results nearest-first; that ordering is trusted
    /// without checking distances locally.
    pub async fn resolve_station(
        &self,
        coord: Coordinate,
        version: AshraeVersion,
    ) -> Result<MeteoStation, FetchError> {
        let form = [
            ("lat", coord.latitude.to_string()),
            ("long", coord.longitude.to_string()),
            ("number", self.config.station_limit.to_string()),
            ("ashrae_version", version.as_str().to_string()),
        ];

        let res = self.transport.post_form(&self.config.places_url(), &form).await?;
        let station = first_station(res)?;

        debug!(wmo = ?station.wmo, %version, "resolved nearest station");
        Ok(station)
    }

    /// Look up heating and cooling design temperatures for the station
    /// nearest to `coord`.
    ///
    /// Returns `Ok(None)` when the service hands back an empty station
    /// record from the place search.
    pub async fn fetch_design_data(
        &self,
        coord: Coordinate,
        version: AshraeVersion,
    ) -> Result<Option<DesignData>, FetchError> {
        let station = self.resolve_station(coord, version).await?;

        if station.is_empty() {
            warn!(?coord, %version, "place search returned an empty station record");
            return Ok(None);
        }

        let wmo = station.wmo.ok_or(FetchError::MissingField { field: "wmo" })?;

        let form = [
            ("wmo", wmo.clone()),
            ("ashrae_version", version.as_str().to_string()),
            ("si_ip", self.config.units.as_str().to_string()),
        ];

        let res = self.transport.post_form(&self.config.parameters_url(), &form).await?;
        let data = extract_design_data(&first_station(res)?)?;

        debug!(%wmo, ?data, units = %self.config.units, "fetched design data");
        Ok(Some(data))
    }
}

/// Check status, decode, and take the first entry of `meteo_stations`.
fn first_station(res: RawResponse) -> Result<MeteoStation, FetchError> {
    if !res.is_success() {
        return Err(FetchError::Status { status: res.status, body: res.body });
    }

    let stations = decode_stations::<MeteoStation>(&res.body).inspect_err(|e| {
        warn!(error = %e.message, "response body is not valid JSON");
    })?;

    stations.into_iter().next().ok_or_else(|| {
        warn!("service returned no stations");
        FetchError::NoStations
    })
}

/// [`AshraeClient::resolve_station`] on a default client.
pub async fn resolve_station(
    latitude: f64,
    longitude: f64,
    version: AshraeVersion,
) -> Result<MeteoStation, FetchError> {
    AshraeClient::<HttpTransport>::default()
        .resolve_station(Coordinate::new(latitude, longitude), version)
        .await
}

/// [`AshraeClient::fetch_design_data`] on a default client.
pub async fn fetch_design_data(
    latitude: f64,
    longitude: f64,
    version: AshraeVersion,
) -> Result<Option<DesignData>, FetchError> {
    AshraeClient::<HttpTransport>::default()
        .fetch_design_data(Coordinate::new(latitude, longitude), version)
        .await
}
