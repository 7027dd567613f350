use showings::{store::TourStore, tour::TourScheduler, travel::TravelTimeProvider};
use std::sync::Arc;

pub type SharedProvider = Arc<dyn TravelTimeProvider>;

pub struct AppState {
    pub scheduler: TourScheduler<SharedProvider>,
    pub store: Arc<dyn TourStore>,
}

impl AppState {
    pub fn new(provider: SharedProvider, store: Arc<dyn TourStore>) -> Self {
        Self {
            scheduler: TourScheduler::new(provider),
            store,
        }
    }
}
