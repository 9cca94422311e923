//! The collaborator form container.

use super::route::{FormRoute, FormState};
use super::sinks::{Navigator, Notifier, Route, CREATED_MESSAGE};
use crate::error::{FormError, FormResult, GENERIC_FAILURE_MESSAGE};
use crate::metrics::{FormEvent, Metrics};
use crate::models::{Collaborator, FormValues};
use crate::repositories::CollaboratorRepository;
use crate::validation::{
    into_new_collaborator, validate_field, FieldOutcome, FormField, ValidationReport,
};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const SUBMIT_LABEL: &str = "Cadastrar";
pub const SUBMITTING_LABEL: &str = "Carregando...";
pub const CANCEL_LABEL: &str = "Voltar";

#[derive(Debug)]
struct PageInner {
    state: FormState,
    values: FormValues,
    report: ValidationReport,
    touched: BTreeSet<FormField>,
}

impl PageInner {
    fn blank() -> Self {
        Self {
            state: FormState::New,
            values: FormValues::default(),
            report: ValidationReport::default(),
            touched: BTreeSet::new(),
        }
    }
}

/// Clears the in-flight flag on every exit path of a submit.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Form container for creating and viewing a collaborator.
///
/// Shared as `Arc<CollaboratorPage>` between the event handlers of a single
/// page instance. The form state lock is never held across an `.await`.
/// Once [`unmount`](Self::unmount) is called, results of calls still in
/// flight are discarded.
pub struct CollaboratorPage {
    repository: Arc<dyn CollaboratorRepository>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    metrics: Metrics,
    inner: Mutex<PageInner>,
    submitting: AtomicBool,
    mounted: AtomicBool,
}

impl CollaboratorPage {
    pub fn new(
        repository: Arc<dyn CollaboratorRepository>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            repository,
            notifier,
            navigator,
            metrics: Metrics::new(),
            inner: Mutex::new(PageInner::blank()),
            submitting: AtomicBool::new(false),
            mounted: AtomicBool::new(true),
        }
    }

    /// Count outcomes into a shared counter set.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn lock(&self) -> MutexGuard<'_, PageInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    fn transition(&self, inner: &mut PageInner, next: FormState) {
        tracing::info!(from = inner.state.name(), to = next.name(), "form state");
        inner.state = next;
    }

    /// Open the page for a route, fetching the record in view mode.
    ///
    /// # Errors
    ///
    /// `FormError::Fetch` if the record could not be loaded (the page moves
    /// to `Error`), `FormError::Detached` if the page was unmounted meanwhile.
    pub async fn open(&self, route: FormRoute) -> FormResult<()> {
        let id = match route {
            FormRoute::New => {
                let mut inner = self.lock();
                *inner = PageInner::blank();
                return Ok(());
            }
            FormRoute::View(id) => id,
        };

        {
            let mut inner = self.lock();
            self.transition(&mut inner, FormState::Loading);
        }

        let result = self.repository.get(id).await;

        if !self.is_mounted() {
            tracing::debug!("discarding fetch result for {}: page unmounted", id);
            return Err(FormError::Detached);
        }

        let mut inner = self.lock();
        match result {
            Ok(collaborator) => {
                self.metrics.record(FormEvent::Fetched);
                inner.values = FormValues::from_collaborator(&collaborator);
                inner.report = ValidationReport::default();
                inner.touched.clear();
                self.transition(&mut inner, FormState::View(collaborator));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load collaborator {}: {}", id, e);
                self.metrics.record(FormEvent::FetchFailed);
                self.transition(
                    &mut inner,
                    FormState::Error(GENERIC_FAILURE_MESSAGE.to_string()),
                );
                Err(FormError::Fetch(e))
            }
        }
    }

    /// Open the page from raw `id` / `mode` route parameters.
    ///
    /// Unusable parameters put the page in `Error`.
    pub async fn open_params(&self, id: Option<&str>, mode: Option<&str>) -> FormResult<()> {
        match FormRoute::from_params(id, mode) {
            Ok(route) => self.open(route).await,
            Err(e) => {
                let mut inner = self.lock();
                self.transition(
                    &mut inner,
                    FormState::Error(GENERIC_FAILURE_MESSAGE.to_string()),
                );
                Err(FormError::Route(e))
            }
        }
    }

    pub fn state(&self) -> FormState {
        self.lock().state.clone()
    }

    pub fn values(&self) -> FormValues {
        self.lock().values.clone()
    }

    pub fn value(&self, field: FormField) -> String {
        field.value_in(&self.lock().values).to_string()
    }

    /// Fields are disabled in every state but `New`.
    pub fn is_read_only(&self) -> bool {
        !self.lock().state.is_editable()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Whether a submit control should be shown at all.
    pub fn shows_submit(&self) -> bool {
        !self.is_read_only()
    }

    /// Whether the submit control is currently enabled.
    pub fn can_submit(&self) -> bool {
        self.shows_submit() && !self.is_submitting()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Store a keystroke's worth of input, masked for display.
    ///
    /// A touched field is re-validated immediately.
    pub fn set_field(&self, field: FormField, raw: &str) -> FormResult<String> {
        let mut display = match field.mask() {
            Some(mask) => mask.apply(raw),
            None => raw.to_string(),
        };
        if let Some(max) = field.input_max_len() {
            display = display.chars().take(max).collect();
        }

        let mut inner = self.lock();
        if !inner.state.is_editable() {
            return Err(FormError::ReadOnly);
        }

        *field.value_in_mut(&mut inner.values) = display.clone();
        if inner.touched.contains(&field) {
            let outcome = validate_field(field, &display);
            inner.report.set(field, outcome);
        }
        Ok(display)
    }

    /// Mark a field as touched and validate it.
    pub fn blur(&self, field: FormField) -> FormResult<FieldOutcome> {
        let mut inner = self.lock();
        if !inner.state.is_editable() {
            return Err(FormError::ReadOnly);
        }

        inner.touched.insert(field);
        let outcome = validate_field(field, field.value_in(&inner.values));
        inner.report.set(field, outcome.clone());
        Ok(outcome)
    }

    /// The inline error for a field, once the user has touched it.
    pub fn visible_error(&self, field: FormField) -> Option<String> {
        let inner = self.lock();
        if !inner.touched.contains(&field) {
            return None;
        }
        inner.report.error(field).map(str::to_string)
    }

    /// Validate everything and create the collaborator.
    ///
    /// The submit control stays disabled until the call resolves, on success
    /// and on failure alike. On success the user is notified and sent to the
    /// listing; on failure the API's message is shown and the form stays
    /// editable.
    ///
    /// # Errors
    ///
    /// - `FormError::ReadOnly` outside of `New`
    /// - `FormError::SubmitInProgress` while another submit is in flight
    /// - `FormError::Invalid` with every failing field
    /// - `FormError::Submit` when the API rejects the record
    /// - `FormError::Detached` if the page was unmounted mid-flight
    pub async fn submit(&self) -> FormResult<Collaborator> {
        if self.is_read_only() {
            return Err(FormError::ReadOnly);
        }

        let Some(_in_flight) = InFlight::acquire(&self.submitting) else {
            self.metrics.record(FormEvent::SubmitInProgress);
            return Err(FormError::SubmitInProgress);
        };

        let record = {
            let mut inner = self.lock();
            inner.touched.extend(FormField::ALL);
            match into_new_collaborator(&inner.values) {
                Ok(record) => {
                    inner.report = ValidationReport::default();
                    record
                }
                Err(report) => {
                    inner.report = report.clone();
                    self.metrics.record(FormEvent::SubmitBlocked);
                    tracing::debug!("submit blocked: {} invalid field(s)", report.errors().count());
                    return Err(FormError::Invalid(report));
                }
            }
        };

        tracing::info!("submitting collaborator {}", record.name);
        let result = self.repository.create(&record).await;

        if !self.is_mounted() {
            tracing::debug!("discarding create result: page unmounted");
            return Err(FormError::Detached);
        }

        match result {
            Ok(created) => {
                self.metrics.record(FormEvent::Created);
                self.notifier.success(CREATED_MESSAGE);
                self.navigator.navigate(Route::Listing);
                Ok(created)
            }
            Err(e) => {
                tracing::error!("Failed to create collaborator: {}", e);
                self.metrics.record(FormEvent::SubmitRejected);
                self.notifier.error(&e.user_message());
                Err(FormError::Submit(e))
            }
        }
    }

    /// Leave the form without saving.
    pub fn cancel(&self) {
        self.navigator.navigate(Route::Listing);
    }

    /// Tear the page down; in-flight results will be discarded.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }
}
