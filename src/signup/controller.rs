use super::draft::RegistrationDraft;
use crate::{
    auth::AuthClient,
    error::AuthError,
    geo::{locate_within, GeoProvider, GeolocationOptions},
    models::Coordinates,
    navigation::{Navigator, DASHBOARD_ROUTE, LOGIN_ROUTE},
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::{sync::Mutex, task::JoinHandle};

pub const CONFIRMATION_NOTICE: &str = "Check your email for the confirmation link.";

/// What the form shows around the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    /// A signup call is in flight; the submit control is disabled
    pub loading: bool,
    /// Last provider failure, verbatim
    pub error: Option<String>,
    /// Receiver tried to submit without naming a food bank
    pub popup_open: bool,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation stopped the submission and opened the food bank popup
    Blocked,
    /// Another submission is still in flight
    Busy,
    Succeeded,
    Failed(String),
    /// The form was torn down before the submission settled
    Abandoned,
}

/// Owns one signup form: the draft, its submission state and the background
/// work started when the form is shown.
///
/// Background tasks are aborted by [`SignupController::unmount`] or on drop,
/// and every late write checks that the form is still live.
pub struct SignupController {
    auth: Arc<dyn AuthClient>,
    navigator: Arc<dyn Navigator>,
    access_token: Option<String>,
    draft: Mutex<RegistrationDraft>,
    state: Mutex<SubmissionState>,
    location: Arc<Mutex<Option<Coordinates>>>,
    live: Arc<AtomicBool>,
    tasks: std::sync::Mutex<Vec<JoinHandle<()>>>,
}

/// Navigate to the dashboard if the access token belongs to a current user.
async fn probe_current_user(
    auth: &dyn AuthClient,
    navigator: &dyn Navigator,
    access_token: Option<&str>,
    live: &AtomicBool,
) -> Result<bool, AuthError> {
    let Some(token) = access_token else {
        return Ok(false);
    };

    match auth.current_user(token).await? {
        Some(user) if live.load(Ordering::SeqCst) => {
            tracing::info!("User {} already signed in, leaving signup", user.id);
            navigator.navigate(DASHBOARD_ROUTE);
            Ok(true)
        }
        _ => Ok(false),
    }
}

impl SignupController {
    /// `access_token` is the provider token from the browser session, if any.
    pub fn new(
        auth: Arc<dyn AuthClient>,
        navigator: Arc<dyn Navigator>,
        access_token: Option<String>,
    ) -> Self {
        Self {
            auth,
            navigator,
            access_token,
            draft: Mutex::new(RegistrationDraft::new()),
            state: Mutex::new(SubmissionState::default()),
            location: Arc::new(Mutex::new(None)),
            live: Arc::new(AtomicBool::new(true)),
            tasks: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Start the session probe and the geolocation request in the background.
    pub fn mount(&self, geo: Arc<dyn GeoProvider>, options: GeolocationOptions) {
        let auth = self.auth.clone();
        let navigator = self.navigator.clone();
        let access_token = self.access_token.clone();
        let live = self.live.clone();

        let probe = tokio::spawn(async move {
            if let Err(e) = probe_current_user(
                auth.as_ref(),
                navigator.as_ref(),
                access_token.as_deref(),
                &live,
            )
            .await
            {
                tracing::warn!("Session probe failed: {}", e);
            }
        });

        let location = self.location.clone();
        let live = self.live.clone();

        let locate = tokio::spawn(async move {
            let position = locate_within(geo.as_ref(), &options).await;
            if let Some(position) = position {
                if live.load(Ordering::SeqCst) {
                    *location.lock().await = Some(position);
                }
            }
        });

        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.push(probe);
        tasks.push(locate);
    }

    /// Run the session probe inline. Returns whether it navigated away.
    pub async fn probe_session(&self) -> Result<bool, AuthError> {
        probe_current_user(
            self.auth.as_ref(),
            self.navigator.as_ref(),
            self.access_token.as_deref(),
            &self.live,
        )
        .await
    }

    /// Ask `geo` for a position and keep it for the next submission.
    pub async fn resolve_location(
        &self,
        geo: &dyn GeoProvider,
        options: &GeolocationOptions,
    ) -> Option<Coordinates> {
        let position = locate_within(geo, options).await;
        if position.is_some() && self.is_live() {
            *self.location.lock().await = position;
        }
        *self.location.lock().await
    }

    pub async fn location(&self) -> Option<Coordinates> {
        *self.location.lock().await
    }

    pub async fn draft(&self) -> RegistrationDraft {
        self.draft.lock().await.clone()
    }

    /// Apply field changes to the draft.
    pub async fn edit<R>(&self, f: impl FnOnce(&mut RegistrationDraft) -> R) -> R {
        let mut draft = self.draft.lock().await;
        f(&mut draft)
    }

    pub async fn state(&self) -> SubmissionState {
        self.state.lock().await.clone()
    }

    pub async fn close_popup(&self) {
        self.state.lock().await.popup_open = false;
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Validate the draft and, unless blocked or busy, register the account.
    pub async fn submit(&self) -> SubmitOutcome {
        if !self.is_live() {
            return SubmitOutcome::Abandoned;
        }

        let draft = self.draft.lock().await.clone();

        {
            let mut state = self.state.lock().await;
            if state.loading {
                tracing::debug!("Signup already in flight, ignoring submit");
                return SubmitOutcome::Busy;
            }
            if draft.is_missing_food_bank() {
                tracing::debug!("Receiver signup without food bank, opening popup");
                state.popup_open = true;
                return SubmitOutcome::Blocked;
            }
            state.loading = true;
            state.error = None;
            state.popup_open = false;
        }

        let location = *self.location.lock().await;
        let request = draft.to_request(location);

        tracing::info!(
            "Submitting {} signup (location: {})",
            draft.role().as_str(),
            if location.is_some() { "yes" } else { "no" }
        );

        let result = self.auth.sign_up(&request).await;

        if !self.is_live() {
            tracing::debug!("Signup settled after the form was closed");
            return SubmitOutcome::Abandoned;
        }

        let mut state = self.state.lock().await;
        state.loading = false;

        match result {
            Ok(()) => {
                state.notice = Some(CONFIRMATION_NOTICE.to_string());
                drop(state);
                tracing::info!("Signup accepted, confirmation email pending");
                self.navigator.navigate(LOGIN_ROUTE);
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!("Signup rejected: {}", message);
                state.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Tear the form down: background work is aborted and no further state
    /// updates or navigation happen.
    pub fn unmount(&self) {
        self.live.store(false, Ordering::SeqCst);
        self.abort_tasks();
    }

    fn abort_tasks(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        for task in tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for SignupController {
    fn drop(&mut self) {
        self.live.store(false, Ordering::SeqCst);
        self.abort_tasks();
    }
}
