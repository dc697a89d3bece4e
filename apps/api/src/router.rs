use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use appointment_cell::services::draft::DraftService;
use auth_cell::router::auth_routes;
use doctor_cell::router::doctor_routes;
use doctor_cell::services::directory::DoctorDirectory;
use medication_cell::router::medication_routes;
use medication_cell::services::notifications::NotificationService;
use medication_cell::services::schedule::MedicationScheduleService;
use patient_cell::router::patient_routes;
use pharmacy_cell::router::pharmacy_routes;
use pharmacy_cell::services::catalog::PharmacyCatalog;
use pharmacy_cell::services::ordering::OrderingService;
use prescription_cell::router::prescription_routes;
use review_cell::router::review_routes;
use review_cell::services::review::ReviewService;
use shared_config::AppConfig;

/// Shared service state wired into the cell routers. Catalogs are seeded
/// once here; per-user session stores start empty.
pub struct AppServices {
    pub config: Arc<AppConfig>,
    pub directory: Arc<DoctorDirectory>,
    pub drafts: DraftService,
    pub ordering: OrderingService,
    pub schedules: MedicationScheduleService,
    pub notifications: NotificationService,
    pub reviews: Arc<ReviewService>,
}

impl AppServices {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            directory: Arc::new(DoctorDirectory::with_seed_catalog()),
            drafts: DraftService::new(),
            ordering: OrderingService::new(Arc::new(PharmacyCatalog::with_seed_catalog())),
            schedules: MedicationScheduleService::new(),
            notifications: NotificationService::new(),
            reviews: Arc::new(ReviewService::with_seed_reviews()),
        }
    }
}

pub fn create_router(services: AppServices) -> Router {
    let AppServices {
        config,
        directory,
        drafts,
        ordering,
        schedules,
        notifications,
        reviews,
    } = services;

    Router::new()
        .route("/", get(|| async { "Shifa Health API is running!" }))
        .nest("/auth", auth_routes(config.clone()))
        .nest("/doctors", doctor_routes(directory.clone()))
        .nest(
            "/appointments",
            appointment_routes(config.clone(), directory, drafts),
        )
        .nest("/pharmacies", pharmacy_routes(config.clone(), ordering))
        .nest(
            "/medications",
            medication_routes(config.clone(), schedules, notifications),
        )
        .nest("/reviews", review_routes(config.clone(), reviews))
        .nest("/prescriptions", prescription_routes(config.clone()))
        .nest("/patients", patient_routes(config))
}
