//! Showroom JSON API.
//!
//! Endpoints:
//! - `GET  /api/v1/catalog`              — list bikes, `?q=&brand=&sort=`
//! - `GET  /api/v1/catalog/{slug}`       — one bike
//! - `GET  /api/v1/brands`               — brand names in catalog order
//! - `GET  /api/v1/locations`            — dealership branches
//! - `GET  /api/v1/compare`              — spec table, `?left=&right=`
//! - `POST /api/v1/nearest`              — nearest branch to coordinates
//! - `POST /api/v1/chat`                 — conversational assistant
//! - `GET  /api/v1/wishlist`             — saved bikes
//! - `POST /api/v1/wishlist`             — toggle a saved bike
//! - `POST /api/v1/viewed`               — record a bike view
//! - `GET  /api/v1/achievements`         — rules plus current progress
//! - `POST /api/v1/konami`               — easter-egg key press
//! - `GET  /api/v1/bookings`             — bookings, newest first
//! - `POST /api/v1/bookings`             — submit a booking
//! - `POST /api/v1/bookings/{id}/confirm`
//! - `POST /api/v1/bookings/{id}/cancel`
//! - `GET  /api/v1/onboarding`           — onboarding and session flags
//! - `POST /api/v1/onboarding`           — mark onboarding seen

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use bigbike_assistant::{Assistant, ChatReply};
use bigbike_core::{
    achievement_list, branches, filter_sort, nearest, Achievement, AchievementTracker,
    ApplicationError, Bike, BikeId, Booking, BookingDraft, BookingId, BrandFilter, Catalog,
    ComparisonTable, Coordinates, DomainError, InterfaceError, KeySequenceDetector, Location,
    SortKey,
};
use bigbike_store::{
    BookingStore, FlagStore, KvStore, StoreError, ViewedStore, WishlistStore,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Clone)]
pub struct ApiState {
    catalog: Arc<Catalog>,
    assistant: Arc<Assistant>,
    achievements: Arc<Vec<Achievement>>,
    wishlist: WishlistStore,
    viewed: ViewedStore,
    bookings: BookingStore,
    flags: FlagStore,
    tracker: Arc<Mutex<AchievementTracker>>,
    konami: Arc<Mutex<KeySequenceDetector>>,
}

impl ApiState {
    pub fn new(catalog: Catalog, assistant: Assistant, kv: Arc<dyn KvStore>) -> Self {
        let achievements = achievement_list(&catalog);
        Self {
            catalog: Arc::new(catalog),
            assistant: Arc::new(assistant),
            achievements: Arc::new(achievements),
            wishlist: WishlistStore::new(kv.clone()),
            viewed: ViewedStore::new(kv.clone()),
            bookings: BookingStore::new(kv.clone()),
            flags: FlagStore::new(kv),
            tracker: Arc::new(Mutex::new(AchievementTracker::new())),
            konami: Arc::new(Mutex::new(KeySequenceDetector::new())),
        }
    }

    /// Replays persisted viewing history into the tracker so achievements
    /// earned before a restart do not announce again.
    pub async fn restore(&self) -> Result<(), StoreError> {
        self.viewed.hydrate().await?;
        let viewed = self.viewed_set().await?;
        let mut tracker = self.tracker.lock().await;
        loop {
            let update = tracker.on_viewed_change(&self.achievements, &viewed, &self.catalog);
            if update.newly_unlocked.is_none() {
                break;
            }
        }
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn viewed(&self) -> &ViewedStore {
        &self.viewed
    }

    async fn viewed_set(&self) -> Result<BTreeSet<BikeId>, StoreError> {
        Ok(self.viewed.list().await?.into_iter().collect())
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/catalog", get(list_catalog))
        .route("/api/v1/catalog/{slug}", get(get_bike))
        .route("/api/v1/brands", get(list_brands))
        .route("/api/v1/locations", get(list_locations))
        .route("/api/v1/compare", get(compare_bikes))
        .route("/api/v1/nearest", post(nearest_location))
        .route("/api/v1/chat", post(chat))
        .route("/api/v1/wishlist", get(list_wishlist).post(toggle_wishlist))
        .route("/api/v1/viewed", post(record_view))
        .route("/api/v1/achievements", get(list_achievements))
        .route("/api/v1/konami", post(konami_press))
        .route("/api/v1/bookings", get(list_bookings).post(submit_booking))
        .route("/api/v1/bookings/{id}/confirm", post(confirm_booking))
        .route("/api/v1/bookings/{id}/cancel", post(cancel_booking))
        .route("/api/v1/onboarding", get(onboarding_status).post(complete_onboarding))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

type Failure = (StatusCode, Json<ApiError>);

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub q: Option<String>,
    pub brand: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub total: usize,
    pub bikes: Vec<Bike>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub left: Option<String>,
    pub right: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum CompareResponse {
    /// Fewer than two bikes selected; nothing to compare yet.
    AwaitingSelection,
    Ready { table: ComparisonTable },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum NearestResponse {
    /// Caller has no position fix; the client shows the full branch list.
    Unavailable { locations: Vec<Location> },
    #[serde(rename_all = "camelCase")]
    Ok {
        location: Location,
        distance_km: f64,
    },
}

/// Position fix from the client, if it has one. A denied or unsupported
/// geolocation request posts nulls.
#[derive(Debug, Default, Deserialize)]
pub struct NearestRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct WishlistToggleRequest {
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct WishlistToggleResponse {
    pub slug: String,
    pub wishlisted: bool,
}

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub items: Vec<BikeId>,
}

#[derive(Debug, Deserialize)]
pub struct ViewedRequest {
    pub slug: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewedResponse {
    pub first_view: bool,
    pub newly_unlocked: Option<Achievement>,
    pub satisfied: Vec<String>,
    pub progress: Progress,
}

#[derive(Debug, Serialize)]
pub struct Progress {
    pub viewed: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct AchievementsResponse {
    pub achievements: Vec<Achievement>,
    pub satisfied: Vec<String>,
    pub progress: Progress,
}

#[derive(Debug, Deserialize)]
pub struct KonamiRequest {
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct KonamiResponse {
    pub unlocked: bool,
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub phone: String,
    pub bike: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct BookingsResponse {
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub has_seen_onboarding: bool,
    pub has_loaded_in_session: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn list_catalog(
    State(state): State<ApiState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<CatalogResponse>, Failure> {
    let sort = match query.sort.as_deref() {
        Some(raw) => raw.parse::<SortKey>().map_err(bad_request)?,
        None => SortKey::default(),
    };
    let brand = match query.brand {
        Some(brand) => BrandFilter::Only(brand),
        None => BrandFilter::Any,
    };
    let bikes: Vec<Bike> =
        filter_sort(&state.catalog, query.q.as_deref().unwrap_or(""), &brand, sort)
            .into_iter()
            .cloned()
            .collect();
    Ok(Json(CatalogResponse { total: bikes.len(), bikes }))
}

pub async fn get_bike(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Result<Json<Bike>, Failure> {
    let id = BikeId::new(&slug);
    state
        .catalog
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(format!("unknown bike `{slug}`")))
}

pub async fn list_brands(State(state): State<ApiState>) -> Json<Vec<String>> {
    Json(state.catalog.brands())
}

pub async fn list_locations() -> Json<Vec<Location>> {
    Json(branches())
}

pub async fn compare_bikes(
    State(state): State<ApiState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<CompareResponse>, Failure> {
    let (Some(left), Some(right)) = (query.left, query.right) else {
        return Ok(Json(CompareResponse::AwaitingSelection));
    };

    let mut selected = Vec::with_capacity(2);
    for slug in [&left, &right] {
        let id = BikeId::new(slug);
        let bike = state
            .catalog
            .find(&id)
            .ok_or_else(|| not_found(format!("unknown bike `{slug}`")))?;
        selected.push(bike);
    }

    Ok(Json(CompareResponse::Ready { table: ComparisonTable::build(&selected) }))
}

pub async fn nearest_location(Json(request): Json<NearestRequest>) -> Json<NearestResponse> {
    let locations = branches();
    let (Some(latitude), Some(longitude)) = (request.latitude, request.longitude) else {
        return Json(NearestResponse::Unavailable { locations });
    };
    let origin = Coordinates::new(latitude, longitude);

    match nearest(origin, &locations) {
        Some((location, distance_km)) => {
            info!(
                event_name = "system.api.nearest_resolved",
                location_id = %location.id,
                distance_km,
                "nearest branch resolved"
            );
            Json(NearestResponse::Ok { location: location.clone(), distance_km })
        }
        None => Json(NearestResponse::Unavailable { locations }),
    }
}

pub async fn chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    Json(state.assistant.answer(&request.message))
}

pub async fn list_wishlist(
    State(state): State<ApiState>,
) -> Result<Json<WishlistResponse>, Failure> {
    let items = state.wishlist.list().await.map_err(store_failure)?;
    Ok(Json(WishlistResponse { items }))
}

pub async fn toggle_wishlist(
    State(state): State<ApiState>,
    Json(request): Json<WishlistToggleRequest>,
) -> Result<Json<WishlistToggleResponse>, Failure> {
    let id = BikeId::new(&request.slug);
    if state.catalog.find(&id).is_none() {
        return Err(not_found(format!("unknown bike `{}`", request.slug)));
    }
    let wishlisted = state.wishlist.toggle(&id).await.map_err(store_failure)?;
    Ok(Json(WishlistToggleResponse { slug: request.slug, wishlisted }))
}

pub async fn record_view(
    State(state): State<ApiState>,
    Json(request): Json<ViewedRequest>,
) -> Result<Json<ViewedResponse>, Failure> {
    let id = BikeId::new(&request.slug);
    if state.catalog.find(&id).is_none() {
        return Err(not_found(format!("unknown bike `{}`", request.slug)));
    }

    let first_view = state.viewed.record(&id).await.map_err(store_failure)?;
    let viewed = state.viewed_set().await.map_err(store_failure)?;

    let mut tracker = state.tracker.lock().await;
    let update = tracker.on_viewed_change(&state.achievements, &viewed, &state.catalog);

    if let Some(achievement) = &update.newly_unlocked {
        info!(
            event_name = "system.achievements.unlocked",
            achievement_id = %achievement.id,
            viewed = viewed.len(),
            "achievement unlocked"
        );
    }

    Ok(Json(ViewedResponse {
        first_view,
        newly_unlocked: update.newly_unlocked,
        satisfied: update.satisfied.into_iter().map(|entry| entry.id).collect(),
        progress: Progress { viewed: viewed.len(), total: state.catalog.len() },
    }))
}

pub async fn list_achievements(
    State(state): State<ApiState>,
) -> Result<Json<AchievementsResponse>, Failure> {
    let viewed = state.viewed_set().await.map_err(store_failure)?;
    let satisfied = bigbike_core::satisfied(&state.achievements, &viewed, &state.catalog)
        .into_iter()
        .map(|entry| entry.id.clone())
        .collect();
    Ok(Json(AchievementsResponse {
        achievements: state.achievements.as_ref().clone(),
        satisfied,
        progress: Progress { viewed: viewed.len(), total: state.catalog.len() },
    }))
}

pub async fn konami_press(
    State(state): State<ApiState>,
    Json(request): Json<KonamiRequest>,
) -> Json<KonamiResponse> {
    let mut detector = state.konami.lock().await;
    let unlocked = detector.press(&request.key);
    if unlocked {
        info!(event_name = "system.easteregg.unlocked", "konami sequence completed");
    }
    Json(KonamiResponse { unlocked })
}

pub async fn list_bookings(
    State(state): State<ApiState>,
) -> Result<Json<BookingsResponse>, Failure> {
    let bookings = state.bookings.list_recent_first().await.map_err(store_failure)?;
    Ok(Json(BookingsResponse { bookings }))
}

pub async fn submit_booking(
    State(state): State<ApiState>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), Failure> {
    let bike = BikeId::new(&request.bike);
    if state.catalog.find(&bike).is_none() {
        return Err(not_found(format!("unknown bike `{}`", request.bike)));
    }
    let kind = request.kind.parse().map_err(domain_failure)?;

    let draft = BookingDraft {
        name: request.name,
        phone: request.phone,
        bike,
        kind,
        date: request.date,
        time: request.time,
    };
    let booking = state.bookings.submit(draft).await.map_err(store_failure)?;
    info!(
        event_name = "system.bookings.submitted",
        booking_id = %booking.id,
        bike = %booking.bike,
        "booking submitted"
    );
    Ok((StatusCode::CREATED, Json(booking)))
}

pub async fn confirm_booking(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, Failure> {
    let booking =
        state.bookings.confirm(&BookingId(id)).await.map_err(store_failure)?;
    Ok(Json(booking))
}

pub async fn cancel_booking(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, Failure> {
    let booking = state.bookings.cancel(&BookingId(id)).await.map_err(store_failure)?;
    info!(
        event_name = "system.bookings.cancelled",
        booking_id = %booking.id,
        "booking cancelled"
    );
    Ok(Json(booking))
}

/// Reading the status also arms the per-process session flag, so the first
/// call after startup reports `hasLoadedInSession: false` and every later
/// call reports `true`.
pub async fn onboarding_status(
    State(state): State<ApiState>,
) -> Result<Json<OnboardingResponse>, Failure> {
    let has_seen_onboarding = state.flags.has_seen_onboarding().await.map_err(store_failure)?;
    let has_loaded_in_session = state.flags.check_and_mark_session_loaded();
    Ok(Json(OnboardingResponse { has_seen_onboarding, has_loaded_in_session }))
}

pub async fn complete_onboarding(
    State(state): State<ApiState>,
) -> Result<Json<OnboardingResponse>, Failure> {
    state.flags.mark_onboarding_seen().await.map_err(store_failure)?;
    Ok(Json(OnboardingResponse {
        has_seen_onboarding: true,
        has_loaded_in_session: state.flags.has_loaded_in_session(),
    }))
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn bad_request(message: impl Into<String>) -> Failure {
    (StatusCode::BAD_REQUEST, Json(ApiError { error: message.into() }))
}

fn not_found(message: impl Into<String>) -> Failure {
    (StatusCode::NOT_FOUND, Json(ApiError { error: message.into() }))
}

fn correlation_id() -> String {
    format!("req-{}", chrono::Utc::now().timestamp_millis())
}

/// Domain and persistence failures go through the core error taxonomy: the
/// log line keeps the precise cause, the response body only the user-safe
/// message.
fn app_failure(error: ApplicationError) -> Failure {
    let correlation_id = correlation_id();
    error!(
        event_name = "system.api.request_failed",
        correlation_id = %correlation_id,
        error = %error,
        "request failed"
    );

    let interface = error.into_interface(correlation_id);
    let status = match &interface {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiError { error: interface.user_message().to_string() }))
}

fn domain_failure(error: DomainError) -> Failure {
    app_failure(ApplicationError::Domain(error))
}

fn store_failure(error: StoreError) -> Failure {
    match error {
        StoreError::Domain(domain) => domain_failure(domain),
        other => app_failure(ApplicationError::Persistence(other.to_string())),
    }
}
