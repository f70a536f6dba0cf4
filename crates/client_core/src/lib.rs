use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::protocol::{CatalogEnvelope, Category, Place};
use tokio::{
    sync::{broadcast, Mutex, RwLock},
    task::JoinHandle,
};
use tracing::{error, info};

pub mod category;
pub mod error;
pub mod image;
pub mod place_list;
pub mod selection;

pub use category::{CategoryChoice, CategoryController};
pub use error::{CatalogError, ImageLoadError};
pub use place_list::PlaceListController;
pub use selection::SelectionController;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Which remote resource a fetch outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogResource {
    Places,
    Categories,
    PlaceDetail,
}

/// Signals emitted by a [`BrowseSession`] as fetches settle.
///
/// Failures are surfaced here so callers and tests can observe them; the
/// rendered surface still degrades to an empty list rather than an error
/// screen.
#[derive(Debug, Clone)]
pub enum BrowseEvent {
    PlacesLoaded { count: usize },
    CategoriesLoaded { count: usize },
    DetailLoaded { place: Place },
    LoadFailed {
        resource: CatalogResource,
        message: String,
    },
}

/// HTTP client for the remote catalog service.
///
/// Every endpoint answers `{ "data": ... }`. Each call is a single attempt
/// with no retry, no deduplication, and no ordering dependency on any other
/// call.
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/places`: the full place collection, no pagination.
    pub async fn fetch_places(&self) -> Result<Vec<Place>, CatalogError> {
        self.get_envelope(&format!("{}/api/places", self.base_url))
            .await
    }

    /// `GET /api/categories`: the server's category list, verbatim. The
    /// synthetic "all" choice is the [`CategoryController`]'s concern.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.get_envelope(&format!("{}/api/categories", self.base_url))
            .await
    }

    /// `GET /api/places/{slug}`: single-item detail; `data` must be one
    /// object, not an array.
    pub async fn fetch_place_by_slug(&self, slug: &str) -> Result<Place, CatalogError> {
        self.get_envelope(&format!("{}/api/places/{slug}", self.base_url))
            .await
    }

    /// Fetches `url` and unwraps the `{ "data": ... }` envelope. Transport
    /// failures and non-2xx statuses are network errors; a 2xx body that
    /// does not deserialize to the expected envelope arity is a format
    /// error.
    async fn get_envelope<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let envelope: CatalogEnvelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.data)
    }
}

/// Owns the browse-screen state: the place list, the category filter, and
/// the detail selection, plus every catalog fetch in flight on their
/// behalf.
///
/// The original screens ran these fetches as mount effects with no way to
/// cancel them; here the owning lifecycle calls [`BrowseSession::load`]
/// explicitly and [`BrowseSession::shutdown`] on teardown, which aborts
/// anything still in flight so a late response cannot mutate discarded
/// state.
pub struct BrowseSession {
    client: CatalogClient,
    place_list: RwLock<PlaceListController>,
    category: RwLock<CategoryController>,
    selection: RwLock<SelectionController>,
    fetch_tasks: Mutex<Vec<JoinHandle<()>>>,
    events: broadcast::Sender<BrowseEvent>,
}

impl BrowseSession {
    pub fn new(client: CatalogClient) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            client,
            place_list: RwLock::new(PlaceListController::new()),
            category: RwLock::new(CategoryController::new()),
            selection: RwLock::new(SelectionController::new()),
            fetch_tasks: Mutex::new(Vec::new()),
            events,
        })
    }

    /// Starts the catalog load: one independent fetch per collection, no
    /// mutual ordering. Each task writes its own slice of state when it
    /// settles; a failure settles the same slice empty and emits
    /// [`BrowseEvent::LoadFailed`] instead of propagating.
    pub async fn load(self: &Arc<Self>) {
        let places_task = {
            let session = Arc::clone(self);
            tokio::spawn(async move { session.run_places_fetch().await })
        };
        let categories_task = {
            let session = Arc::clone(self);
            tokio::spawn(async move { session.run_categories_fetch().await })
        };

        let mut tasks = self.fetch_tasks.lock().await;
        tasks.push(places_task);
        tasks.push(categories_task);
    }

    async fn run_places_fetch(&self) {
        match self.client.fetch_places().await {
            Ok(places) => {
                let count = places.len();
                self.place_list.write().await.complete_load(places);
                info!(count, "catalog places loaded");
                let _ = self.events.send(BrowseEvent::PlacesLoaded { count });
            }
            Err(err) => {
                error!("error fetching places: {err}");
                self.place_list.write().await.complete_load(Vec::new());
                let _ = self.events.send(BrowseEvent::LoadFailed {
                    resource: CatalogResource::Places,
                    message: err.to_string(),
                });
            }
        }
    }

    async fn run_categories_fetch(&self) {
        match self.client.fetch_categories().await {
            Ok(categories) => {
                let count = categories.len();
                self.category.write().await.set_categories(categories);
                info!(count, "catalog categories loaded");
                let _ = self.events.send(BrowseEvent::CategoriesLoaded { count });
            }
            Err(err) => {
                error!("error fetching categories: {err}");
                let _ = self.events.send(BrowseEvent::LoadFailed {
                    resource: CatalogResource::Categories,
                    message: err.to_string(),
                });
            }
        }
    }

    /// Looks up a single place by slug and opens the detail overlay on it.
    /// Runs concurrently with any collection fetch; failure is logged and
    /// signaled, never fatal.
    pub async fn open_detail(self: &Arc<Self>, slug: &str) {
        let session = Arc::clone(self);
        let slug = slug.to_string();
        let task = tokio::spawn(async move {
            match session.client.fetch_place_by_slug(&slug).await {
                Ok(place) => {
                    session.selection.write().await.open(place.clone());
                    let _ = session.events.send(BrowseEvent::DetailLoaded { place });
                }
                Err(err) => {
                    error!(slug = %slug, "error fetching place: {err}");
                    let _ = session.events.send(BrowseEvent::LoadFailed {
                        resource: CatalogResource::PlaceDetail,
                        message: err.to_string(),
                    });
                }
            }
        });
        self.fetch_tasks.lock().await.push(task);
    }

    /// Aborts every fetch still in flight. Called on teardown so nothing
    /// writes into this session afterwards.
    pub async fn shutdown(&self) {
        let mut tasks = self.fetch_tasks.lock().await;
        for task in tasks.drain(..) {
            task.abort();
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.place_list.read().await.is_loading()
    }

    pub async fn set_search_text(&self, text: &str) {
        self.place_list.write().await.set_search_text(text);
    }

    pub async fn search_text(&self) -> String {
        self.place_list.read().await.search_text().to_string()
    }

    /// The filtered view under the current search text and category
    /// selection, in fetch order. Recomputed on every call.
    pub async fn filtered_places(&self) -> Vec<Place> {
        let selected = self
            .category
            .read()
            .await
            .selected()
            .map(str::to_string);
        self.place_list
            .read()
            .await
            .filtered_places(selected.as_deref())
    }

    pub async fn category_choices(&self) -> Vec<CategoryChoice> {
        self.category.read().await.choices()
    }

    pub async fn selected_category(&self) -> Option<String> {
        self.category.read().await.selected().map(str::to_string)
    }

    pub async fn choose_category(&self, choice: CategoryChoice) {
        self.category.write().await.choose(choice);
    }

    pub async fn open_category_picker(&self) {
        self.category.write().await.open_picker();
    }

    pub async fn close_category_picker(&self) {
        self.category.write().await.close_picker();
    }

    pub async fn is_category_picker_open(&self) -> bool {
        self.category.read().await.is_picker_open()
    }

    /// Opens the detail overlay on an already-fetched place, no lookup.
    pub async fn select_place(&self, place: Place) {
        self.selection.write().await.open(place);
    }

    pub async fn close_detail(&self) {
        self.selection.write().await.close();
    }

    pub async fn selected_place(&self) -> Option<Place> {
        self.selection.read().await.selected().cloned()
    }

    pub async fn is_detail_visible(&self) -> bool {
        self.selection.read().await.is_visible()
    }

    /// Resolves a place photo reference against this session's base URL.
    pub fn resolve_photo(&self, photo_ref: &str) -> String {
        image::resolve_photo_ref(photo_ref, &self.client.base_url)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<BrowseEvent> {
        self.events.subscribe()
    }
}

/// The seam the presentation layer consumes. Screens render from these
/// operations and never touch controller state directly, so every
/// near-duplicate screen variant shares the one canonical behavior.
#[async_trait]
pub trait BrowseHandle: Send + Sync {
    async fn load(&self);
    async fn shutdown(&self);
    async fn is_loading(&self) -> bool;
    async fn set_search_text(&self, text: &str);
    async fn filtered_places(&self) -> Vec<Place>;
    async fn category_choices(&self) -> Vec<CategoryChoice>;
    async fn choose_category(&self, choice: CategoryChoice);
    async fn open_category_picker(&self);
    async fn close_category_picker(&self);
    async fn select_place(&self, place: Place);
    async fn open_detail(&self, slug: &str);
    async fn close_detail(&self);
    async fn selected_place(&self) -> Option<Place>;
    async fn is_detail_visible(&self) -> bool;
    fn subscribe_events(&self) -> broadcast::Receiver<BrowseEvent>;
}

#[async_trait]
impl BrowseHandle for Arc<BrowseSession> {
    async fn load(&self) {
        BrowseSession::load(self).await;
    }

    async fn shutdown(&self) {
        BrowseSession::shutdown(self).await;
    }

    async fn is_loading(&self) -> bool {
        BrowseSession::is_loading(self).await
    }

    async fn set_search_text(&self, text: &str) {
        BrowseSession::set_search_text(self, text).await;
    }

    async fn filtered_places(&self) -> Vec<Place> {
        BrowseSession::filtered_places(self).await
    }

    async fn category_choices(&self) -> Vec<CategoryChoice> {
        BrowseSession::category_choices(self).await
    }

    async fn choose_category(&self, choice: CategoryChoice) {
        BrowseSession::choose_category(self, choice).await;
    }

    async fn open_category_picker(&self) {
        BrowseSession::open_category_picker(self).await;
    }

    async fn close_category_picker(&self) {
        BrowseSession::close_category_picker(self).await;
    }

    async fn select_place(&self, place: Place) {
        BrowseSession::select_place(self, place).await;
    }

    async fn open_detail(&self, slug: &str) {
        BrowseSession::open_detail(self, slug).await;
    }

    async fn close_detail(&self) {
        BrowseSession::close_detail(self).await;
    }

    async fn selected_place(&self) -> Option<Place> {
        BrowseSession::selected_place(self).await
    }

    async fn is_detail_visible(&self) -> bool {
        BrowseSession::is_detail_visible(self).await
    }

    fn subscribe_events(&self) -> broadcast::Receiver<BrowseEvent> {
        BrowseSession::subscribe_events(self)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
