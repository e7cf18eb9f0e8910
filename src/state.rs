use std::sync::Arc;

use crate::config::Config;
use crate::store::UserStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Config,
}
