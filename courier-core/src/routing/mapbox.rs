use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use courier_model::{Coordinate, RouteInfo};

use super::{RouteFetchError, RouteProvider};

const DEFAULT_ENDPOINT: &str = "https://api.mapbox.com";
const DEFAULT_PROFILE: &str = "driving";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Client for the Mapbox Directions API. The access token travels as a
/// query parameter; requests carry an explicit timeout and get one
/// retry on transport failures and 5xx answers.
#[derive(Debug, Clone)]
pub struct MapboxDirections {
    client: Client,
    endpoint: Url,
    access_token: String,
    profile: String,
}

impl MapboxDirections {
    pub fn new(access_token: impl Into<String>) -> Result<Self, RouteFetchError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, access_token)
    }

    /// Point the client at a different host (staging, a local stub).
    pub fn with_endpoint(
        endpoint: &str,
        access_token: impl Into<String>,
    ) -> Result<Self, RouteFetchError> {
        let endpoint =
            Url::parse(endpoint).map_err(|err| RouteFetchError::Malformed(err.to_string()))?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            endpoint,
            access_token: access_token.into(),
            profile: DEFAULT_PROFILE.to_string(),
        })
    }

    /// Use a routing profile other than driving.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    fn request_url(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Url, RouteFetchError> {
        // Directions wants positions longitude-first.
        let path = format!(
            "directions/v5/mapbox/{}/{},{};{},{}",
            self.profile, origin.lng, origin.lat, destination.lng, destination.lat
        );
        let mut url = self
            .endpoint
            .join(&path)
            .map_err(|err| RouteFetchError::Malformed(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("geometries", "geojson")
            .append_pair("access_token", &self.access_token);
        Ok(url)
    }

    async fn fetch_once(&self, url: Url) -> Result<RouteInfo, RouteFetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RouteFetchError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        parse_directions(&body)
    }
}

#[async_trait]
impl RouteProvider for MapboxDirections {
    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteInfo, RouteFetchError> {
        let url = self.request_url(&origin, &destination)?;
        debug!(%url, "fetching directions");

        match self.fetch_once(url.clone()).await {
            Err(err) if is_retryable(&err) => {
                warn!("directions fetch failed, retrying once: {err}");
                tokio::time::sleep(RETRY_DELAY).await;
                self.fetch_once(url).await
            }
            other => other,
        }
    }
}

fn is_retryable(err: &RouteFetchError) -> bool {
    match err {
        RouteFetchError::Transport(_) => true,
        RouteFetchError::Status(code) => *code >= 500,
        RouteFetchError::Malformed(_) | RouteFetchError::NoRoute => false,
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    distance: f64,
    duration: f64,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

/// Extract the first candidate route. GeoJSON positions arrive
/// longitude-first; the path comes out latitude/longitude.
fn parse_directions(body: &str) -> Result<RouteInfo, RouteFetchError> {
    let parsed: DirectionsResponse =
        serde_json::from_str(body).map_err(|err| RouteFetchError::Malformed(err.to_string()))?;
    let route = parsed
        .routes
        .into_iter()
        .next()
        .ok_or(RouteFetchError::NoRoute)?;

    Ok(RouteInfo {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        path: route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| Coordinate::new(lat, lng))
            .collect(),
    })
}
