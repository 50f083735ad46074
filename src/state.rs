// state.rs
use std::sync::Arc;

use tera::Tera;

use crate::clock::{Clock, SystemClock};
use crate::store::PollStore;
use crate::templates;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PollStore>,
    pub clock: Arc<dyn Clock>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(store: Arc<dyn PollStore>, clock: Arc<dyn Clock>) -> Result<Self, tera::Error> {
        Ok(Self {
            store,
            clock,
            templates: Arc::new(templates::engine()?),
        })
    }

    pub fn with_system_clock(store: Arc<dyn PollStore>) -> Result<Self, tera::Error> {
        Self::new(store, Arc::new(SystemClock))
    }
}
