//! OpenStreetMap Nominatim client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::Error as _;
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use tracing::debug;
use url::Url;

use crate::domain::entities::{Location, ZipCoordinates};
use crate::domain::providers::{GeocodingError, GeocodingProvider};

/// Public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// One hit from `/search`. Nominatim encodes coordinates as strings.
#[serde_as]
#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    lat: f64,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    lon: f64,
}

/// Body of `/reverse`. Points that cannot be geocoded come back as
/// `{"error": "Unable to geocode"}` with no `address`.
#[derive(Debug, Deserialize)]
struct ReverseBody {
    address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    postcode: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    state_code: Option<String>,
    #[serde(rename = "ISO3166-2-lvl4")]
    iso_subdivision: Option<String>,
}

impl Address {
    fn into_location(self) -> Location {
        let state_code = self.state_code.or_else(|| {
            self.iso_subdivision
                .as_deref()
                .and_then(|code| code.strip_prefix("US-"))
                .map(str::to_string)
        });

        Location {
            zip: self.postcode,
            city: self.city.or(self.town).or(self.village),
            state: self.state,
            state_code,
        }
    }
}

/// HTTP client for the Nominatim search and reverse endpoints.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    search_url: Url,
    reverse_url: Url,
}

impl NominatimClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `base_url` is not an absolute URL.
    pub fn new(client: Client, base_url: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client,
            search_url: base.join("search")?,
            reverse_url: base.join("reverse")?,
        })
    }

    /// Builds the outbound HTTP client with identifying headers and a timeout.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the TLS backend fails to initialize.
    pub fn http_client(user_agent: &str, timeout: Duration) -> reqwest::Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    pub fn reverse_url(&self) -> &Url {
        &self.reverse_url
    }
}

#[async_trait]
impl GeocodingProvider for NominatimClient {
    async fn search_postcode(&self, zip: &str) -> Result<Option<ZipCoordinates>, GeocodingError> {
        debug!("Nominatim search postalcode={}", zip);

        let body = self
            .client
            .get(self.search_url.clone())
            .query(&[
                ("postalcode", zip),
                ("country", "US"),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_search_body(&body, zip)
    }

    async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<Location>, GeocodingError> {
        debug!("Nominatim reverse lat={} lon={}", lat, lng);

        let body = self
            .client
            .get(self.reverse_url.clone())
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_reverse_body(&body)
    }
}

/// Maps a `/search` body to the first hit's coordinates.
fn parse_search_body(body: &str, zip: &str) -> Result<Option<ZipCoordinates>, GeocodingError> {
    let hits: Vec<SearchHit> = serde_json::from_str(body)?;

    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };

    if !hit.lat.is_finite() || !hit.lon.is_finite() {
        return Err(GeocodingError::Parse(serde_json::Error::custom(
            "non-finite coordinate in search result",
        )));
    }

    Ok(Some(ZipCoordinates::new(zip, hit.lat, hit.lon)))
}

/// Maps a `/reverse` body to a location, or `None` when there is no address.
fn parse_reverse_body(body: &str) -> Result<Option<Location>, GeocodingError> {
    let parsed: ReverseBody = serde_json::from_str(body)?;
    Ok(parsed.address.map(Address::into_location))
}
