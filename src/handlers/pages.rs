use crate::{
    auth::{
        clear_access_token, set_notice, store_access_token, take_notice, LoginRequest,
        MaybeSignedIn, SignedIn,
    },
    geo::PostedPosition,
    handlers::AppState,
    models::Role,
    navigation::{RecordingNavigator, LOGIN_ROUTE, SIGNUP_ROUTE},
    signup::{FormRegistry, FormSession, RegistrationDraft, SignupController, SubmitOutcome},
    templates::{self, SignupView},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

#[derive(Deserialize)]
pub struct ErrorQuery {
    error: Option<String>,
}

/// Fields posted by the signup form.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub form_token: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub food_bank_title: String,
    #[serde(default)]
    pub food_bank_address: String,
    #[serde(default)]
    pub food_bank_website: String,
    #[serde(default)]
    pub food_bank_description: String,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

impl SignupForm {
    /// Copy every posted field into the draft through its setter.
    pub fn apply_to(&self, draft: &mut RegistrationDraft) {
        draft.set_email(self.email.as_str());
        draft.set_password(self.password.as_str());
        draft.set_first_name(self.first_name.as_str());
        draft.set_last_name(self.last_name.as_str());
        draft.set_role(self.role);
        draft.set_food_bank_title(self.food_bank_title.as_str());
        draft.set_food_bank_address(self.food_bank_address.as_str());
        draft.set_food_bank_website(self.food_bank_website.as_str());
        draft.set_food_bank_description(self.food_bank_description.as_str());
    }

    pub fn position(&self) -> PostedPosition {
        PostedPosition::from_fields(self.latitude.as_deref(), self.longitude.as_deref())
    }
}

fn new_form(state: &AppState, access_token: Option<String>) -> FormSession {
    let navigator = Arc::new(RecordingNavigator::new());
    let controller = Arc::new(SignupController::new(
        state.auth.clone(),
        navigator.clone(),
        access_token,
    ));
    FormSession {
        controller,
        navigator,
    }
}

async fn render_signup(state: &AppState, token: String, form: &FormSession) -> Html<String> {
    let view = SignupView {
        token,
        draft: form.controller.draft().await,
        state: form.controller.state().await,
        geolocation: state.geolocation,
    };
    let page = templates::base("Create Your Account", templates::signup(&view));
    Html(page.into_string())
}

/// Check for a current user before a new form is shown or submitted.
/// Returns the redirect when the browser is already signed in.
async fn leave_if_signed_in(form: &FormSession) -> Option<Response> {
    if let Err(e) = form.controller.probe_session().await {
        tracing::warn!("Session probe failed: {}", e);
    }
    let target = form.navigator.take()?;
    form.controller.unmount();
    Some(Redirect::to(&target).into_response())
}

pub async fn index() -> Redirect {
    Redirect::to(SIGNUP_ROUTE)
}

pub async fn signup_page(
    State(state): State<Arc<AppState>>,
    signed_in: MaybeSignedIn,
) -> Response {
    let form = new_form(&state, signed_in.access_token);

    if let Some(redirect) = leave_if_signed_in(&form).await {
        return redirect;
    }

    let token = FormRegistry::new_token();
    state.forms.insert(token.clone(), form.clone()).await;

    render_signup(&state, token, &form).await.into_response()
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    signed_in: MaybeSignedIn,
    session: Session,
    Form(posted): Form<SignupForm>,
) -> Response {
    let (token, form) = match state.forms.get(&posted.form_token).await {
        Some(form) => (posted.form_token.clone(), form),
        None => {
            tracing::debug!("Unknown or expired signup form, starting a new one");
            let token = FormRegistry::new_token();
            let form = new_form(&state, signed_in.access_token);
            if let Some(redirect) = leave_if_signed_in(&form).await {
                return redirect;
            }
            state.forms.insert(token.clone(), form.clone()).await;
            (token, form)
        }
    };

    let controller = &form.controller;
    controller.edit(|draft| posted.apply_to(draft)).await;
    controller
        .resolve_location(&posted.position(), &state.geolocation)
        .await;

    match controller.submit().await {
        SubmitOutcome::Succeeded => {
            if let Some(notice) = controller.state().await.notice {
                if let Err(e) = set_notice(&session, &notice).await {
                    tracing::error!("Failed to store signup notice: {}", e);
                }
            }
            let target = form
                .navigator
                .take()
                .unwrap_or_else(|| LOGIN_ROUTE.to_string());
            state.forms.remove(&token).await;
            Redirect::to(&target).into_response()
        }
        SubmitOutcome::Busy => (
            StatusCode::CONFLICT,
            render_signup(&state, token, &form).await,
        )
            .into_response(),
        SubmitOutcome::Abandoned => Redirect::to(SIGNUP_ROUTE).into_response(),
        SubmitOutcome::Blocked | SubmitOutcome::Failed(_) => {
            render_signup(&state, token, &form).await.into_response()
        }
    }
}

pub async fn login_page(session: Session, Query(params): Query<ErrorQuery>) -> Html<String> {
    let notice = take_notice(&session).await.unwrap_or_else(|e| {
        tracing::error!("Failed to read notice from session: {}", e);
        None
    });

    let content = templates::login(notice.as_deref(), params.error.as_deref());
    let page = templates::base("Sign In", content);
    Html(page.into_string())
}

fn login_error(message: &str) -> Response {
    Redirect::to(&format!("/login?error={}", urlencoding::encode(message))).into_response()
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(login_req): Form<LoginRequest>,
) -> Response {
    let auth_session = match state
        .auth
        .sign_in_with_password(&login_req.email, &login_req.password)
        .await
    {
        Ok(auth_session) => auth_session,
        Err(e) => {
            tracing::warn!("Failed sign-in attempt: {}", e);
            return login_error(&e.to_string());
        }
    };

    if let Err(e) = store_access_token(&session, &auth_session.access_token).await {
        tracing::error!("Failed to create session: {}", e);
        return login_error("An error occurred. Please try again.");
    }

    tracing::info!("User {} signed in", auth_session.user.id);
    Redirect::to("/dashboard").into_response()
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    signed_in: MaybeSignedIn,
    session: Session,
) -> Response {
    if let Some(token) = signed_in.access_token {
        // Revocation is best-effort; the local session is cleared regardless
        if let Err(e) = state.auth.sign_out(&token).await {
            tracing::warn!("Auth provider sign-out failed: {}", e);
        }
    }

    if let Err(e) = clear_access_token(&session).await {
        tracing::error!("Failed to logout: {}", e);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    Redirect::to(LOGIN_ROUTE).into_response()
}

pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    signed_in: SignedIn,
    session: Session,
) -> Response {
    let user = match state.auth.current_user(&signed_in.access_token).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!("Stale access token in session, redirecting to login");
            if let Err(e) = clear_access_token(&session).await {
                tracing::error!("Failed to clear stale access token: {}", e);
            }
            return Redirect::to(LOGIN_ROUTE).into_response();
        }
        Err(e) => {
            tracing::error!("Failed to get current user: {}", e);
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };

    let content = templates::dashboard(&user);
    let page = templates::base("Dashboard", content);
    Html(page.into_string()).into_response()
}
