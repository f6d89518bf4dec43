//! Glue between the synchronous session and the background prediction
//! worker. Every request a handler produces goes to the worker; results come
//! back through `poll`.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::async_worker::PredictionWorker;
use crate::field::FieldState;
use crate::predict::{HttpBackend, PredictionBackend};
use crate::session::{ClickTarget, Key, Response, SuggestSession};
use crate::settings::Settings;

/// How often the host should poll while a request is in flight.
pub const RESULT_POLL_INTERVAL: Duration = Duration::from_millis(20);

pub struct Controller {
    session: SuggestSession,
    worker: PredictionWorker,
}

impl Controller {
    pub fn new(session: SuggestSession, backend: Arc<dyn PredictionBackend>) -> io::Result<Self> {
        Ok(Self {
            session,
            worker: PredictionWorker::new(backend)?,
        })
    }

    /// Session and HTTP backend configured from `settings`.
    pub fn from_settings(settings: &Settings) -> io::Result<Self> {
        Self::new(
            SuggestSession::from_settings(settings),
            Arc::new(HttpBackend::from_settings(settings)),
        )
    }

    pub fn session(&self) -> &SuggestSession {
        &self.session
    }

    pub fn set_requested_count(&mut self, count: u32) {
        self.session.set_requested_count(count);
    }

    pub fn input(&mut self, now: Instant) -> Response {
        let resp = self.session.handle_input(now);
        self.dispatch(&resp);
        resp
    }

    pub fn key(&mut self, key: Key, field: &mut FieldState) -> Response {
        let resp = self.session.handle_key(key, field);
        self.dispatch(&resp);
        resp
    }

    pub fn click(&mut self, target: ClickTarget, field: &mut FieldState) -> Response {
        let resp = self.session.handle_click(target, field);
        self.dispatch(&resp);
        resp
    }

    pub fn focus_lost(&mut self) -> Response {
        let resp = self.session.handle_focus_lost();
        self.dispatch(&resp);
        resp
    }

    /// Fire the quiet period if due, then apply every result the worker has
    /// finished. Stale results are dropped silently.
    pub fn poll(&mut self, now: Instant, field: &FieldState) -> Vec<Response> {
        let mut out = Vec::new();
        if let Some(resp) = self.session.tick(now, field) {
            self.dispatch(&resp);
            out.push(resp);
        }
        while let Some(result) = self.worker.try_recv() {
            if let Some(resp) = self
                .session
                .receive_predictions(result.generation, result.candidates)
            {
                out.push(resp);
            }
        }
        out
    }

    /// Block up to `timeout` for the current request's result.
    pub fn wait(&mut self, timeout: Duration) -> Option<Response> {
        if !self.session.has_request_in_flight() {
            return None;
        }
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let result = self.worker.recv_timeout(remaining)?;
            if let Some(resp) = self
                .session
                .receive_predictions(result.generation, result.candidates)
            {
                return Some(resp);
            }
        }
    }

    /// When the host should call `poll` next, if at all.
    pub fn next_poll(&self, now: Instant) -> Option<Duration> {
        match self.session.pending_deadline() {
            Some(deadline) => Some(deadline.saturating_duration_since(now)),
            None if self.session.has_request_in_flight() => Some(RESULT_POLL_INTERVAL),
            None => None,
        }
    }

    fn dispatch(&self, resp: &Response) {
        match &resp.request {
            Some(request) => self.worker.submit(request.clone()),
            None => self.worker.set_latest(self.session.generation()),
        }
    }
}
