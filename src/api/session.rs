use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::controller::Controller;
use crate::field::FieldState;
use crate::predict::HttpBackend;
use crate::session::{Response, SuggestSession};

use super::types::convert_to_events;
use super::{NwClickTarget, NwError, NwField, NwKey, NwResponse};

#[derive(uniffi::Object)]
pub struct NwSession {
    controller: Mutex<Controller>,
}

#[uniffi::export]
impl NwSession {
    /// Session configured from the global settings.
    #[uniffi::constructor]
    pub(super) fn new() -> Result<Arc<Self>, NwError> {
        let controller = Controller::from_settings(crate::settings::settings())
            .map_err(|e| NwError::Io { msg: e.to_string() })?;
        Ok(Arc::new(Self {
            controller: Mutex::new(controller),
        }))
    }

    /// Session against an explicit endpoint, other values from settings.
    #[uniffi::constructor]
    pub(super) fn with_endpoint(endpoint: String, requested_count: u32) -> Result<Arc<Self>, NwError> {
        if endpoint.is_empty() {
            return Err(NwError::InvalidData {
                msg: "endpoint must not be empty".into(),
            });
        }
        let settings = crate::settings::settings();
        let mut session = SuggestSession::from_settings(settings);
        session.set_requested_count(requested_count);
        let backend = HttpBackend::new(&endpoint, settings.request_timeout());
        let controller = Controller::new(session, Arc::new(backend))
            .map_err(|e| NwError::Io { msg: e.to_string() })?;
        Ok(Arc::new(Self {
            controller: Mutex::new(controller),
        }))
    }

    /// The field's text changed.
    fn handle_input(&self) -> NwResponse {
        let now = Instant::now();
        let mut ctl = self.lock();
        let resp = ctl.input(now);
        Self::respond(&ctl, now, vec![resp])
    }

    fn handle_key(&self, key: NwKey, field: NwField) -> NwResponse {
        let now = Instant::now();
        let mut field = FieldState::from(field);
        let mut ctl = self.lock();
        let resp = ctl.key(key.into(), &mut field);
        Self::respond(&ctl, now, vec![resp])
    }

    fn handle_click(&self, target: NwClickTarget, field: NwField) -> NwResponse {
        let now = Instant::now();
        let mut field = FieldState::from(field);
        let mut ctl = self.lock();
        let resp = ctl.click(target.into(), &mut field);
        Self::respond(&ctl, now, vec![resp])
    }

    fn focus_lost(&self) -> NwResponse {
        let now = Instant::now();
        let mut ctl = self.lock();
        let resp = ctl.focus_lost();
        Self::respond(&ctl, now, vec![resp])
    }

    /// Fire a due quiet period and apply finished predictions.
    fn poll(&self, field: NwField) -> NwResponse {
        let now = Instant::now();
        let field = FieldState::from(field);
        let mut ctl = self.lock();
        let responses = ctl.poll(now, &field);
        Self::respond(&ctl, now, responses)
    }

    fn set_requested_count(&self, count: u32) {
        self.lock().set_requested_count(count);
    }

    fn requested_count(&self) -> u32 {
        self.lock().session().requested_count()
    }

    fn is_showing(&self) -> bool {
        self.lock().session().is_showing()
    }
}

impl NwSession {
    fn lock(&self) -> MutexGuard<'_, Controller> {
        self.controller
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn respond(ctl: &Controller, now: Instant, responses: Vec<Response>) -> NwResponse {
        let next_poll = ctl.next_poll(now).map(|d| d.max(Duration::from_millis(1)));
        convert_to_events(responses, next_poll)
    }
}
