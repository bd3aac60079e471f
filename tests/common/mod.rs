#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use zip_coords::api::handlers::{health_handler, root_handler};
use zip_coords::api::routes::lookup_routes;
use zip_coords::domain::entities::{Location, ZipCoordinates};
use zip_coords::domain::providers::{GeocodingError, GeocodingProvider};
use zip_coords::infrastructure::cache::InMemoryCache;
use zip_coords::state::AppState;

/// Canned geocoding provider that counts calls.
#[derive(Default)]
pub struct StubProvider {
    zips: HashMap<String, (f64, f64)>,
    location: Option<Location>,
    failing: bool,
    search_calls: AtomicUsize,
    reverse_calls: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zip(mut self, zip: &str, latitude: f64, longitude: f64) -> Self {
        self.zips.insert(zip.to_string(), (latitude, longitude));
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }

    fn failure() -> GeocodingError {
        GeocodingError::Parse(serde_json::from_str::<Vec<u8>>("<html>").unwrap_err())
    }
}

#[async_trait]
impl GeocodingProvider for StubProvider {
    async fn search_postcode(&self, zip: &str) -> Result<Option<ZipCoordinates>, GeocodingError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(Self::failure());
        }

        Ok(self
            .zips
            .get(zip)
            .map(|(lat, lon)| ZipCoordinates::new(zip, *lat, *lon)))
    }

    async fn reverse(&self, _lat: f64, _lng: f64) -> Result<Option<Location>, GeocodingError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(Self::failure());
        }

        Ok(self.location.clone())
    }
}

pub fn new_york() -> Location {
    Location {
        zip: Some("10019".to_string()),
        city: Some("New York".to_string()),
        state: Some("New York".to_string()),
        state_code: Some("NY".to_string()),
    }
}

pub fn create_test_state(provider: Arc<StubProvider>) -> (AppState, Arc<InMemoryCache>) {
    let cache = Arc::new(InMemoryCache::default());
    let state = AppState::new(provider, cache.clone());
    (state, cache)
}

pub fn test_router(state: AppState) -> Router {
    lookup_routes()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

pub fn test_server(provider: Arc<StubProvider>) -> (TestServer, Arc<InMemoryCache>) {
    let (state, cache) = create_test_state(provider);
    let server = TestServer::new(test_router(state)).unwrap();
    (server, cache)
}
