//! Screen-to-screen state machine of the account flow.
//!
//! The rendering side shows `route()`, collects a form and calls one of the
//! `submit_*` operations. Each returns an [`Outcome`]: either the flow moved
//! to a new route, or it stayed and there is a message to show. Store and
//! I/O failures never escape; they become transient notices here.
//!
//! ```text
//! Splash ─┬─> Home (session)            Login ──> Home
//!         └─> Login <──> SignUp               └─> ForgotPassword ─> OtpValidation
//!                                                   ─> ResetPassword ─> Login (new root)
//! Home/Store/Profile: tabs, Profile ─ logout ─> Login (new root)
//! ```

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::forms::{FieldErrors, ForgotPasswordForm, Form, LoginForm, OtpForm};
use crate::core::forms::{ResetPasswordForm, SignUpForm};
use crate::core::navigation::NavStack;
use crate::core::otp::{Channel, CodeIssuer, codes_match};
use crate::core::scope::{ScreenHandle, ScreenScope};
use crate::core::session::SessionStore;
use crate::core::user_store::UserStore;
use crate::errors::{AppError, ErrorKind};
use crate::models::route::{Route, Tab};

pub const DEFAULT_SPLASH_DELAY: Duration = Duration::from_millis(2000);

pub const MSG_LOGIN_OK: &str = "Login Successful!";
pub const MSG_LOGIN_FAILED: &str = "Invalid email or password!";
pub const MSG_REGISTERED: &str = "Registration Successful!";
pub const MSG_INCOMPLETE_CODE: &str = "Please enter complete code!";
pub const MSG_WRONG_CODE: &str = "Wrong code!";
pub const MSG_RESET_OK: &str = "Password Reset Successful!";
pub const MSG_LOGGED_OUT: &str = "Logged out successfully";

/// Result of a flow operation, used by the renderer to pick what to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The flow moved; `to` is the now visible route.
    Moved { to: Route, notice: Option<String> },
    /// Still on the same screen; `notice` is a transient message and
    /// `fields` marks the invalid inputs, when validation was the cause.
    Stayed {
        notice: String,
        fields: Option<FieldErrors>,
    },
    /// The screen was dismissed while the operation ran; nothing changed.
    Discarded,
}

impl Outcome {
    fn stayed(notice: impl Into<String>) -> Self {
        Outcome::Stayed {
            notice: notice.into(),
            fields: None,
        }
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            Outcome::Moved { to, .. } => Some(to),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            Outcome::Moved { notice, .. } => notice.as_deref(),
            Outcome::Stayed { notice, .. } => Some(notice),
            Outcome::Discarded => None,
        }
    }

    pub fn fields(&self) -> Option<&FieldErrors> {
        match self {
            Outcome::Stayed { fields, .. } => fields.as_ref(),
            _ => None,
        }
    }

    pub fn is_moved(&self) -> bool {
        matches!(self, Outcome::Moved { .. })
    }
}

/// What the profile tab displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
}

impl ProfileView {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { "User" } else { &self.name }
    }

    pub fn display_email(&self) -> &str {
        if self.email.is_empty() { "No email" } else { &self.email }
    }
}

pub struct AuthFlow {
    users: UserStore,
    session: SessionStore,
    issuer: Arc<dyn CodeIssuer>,
    nav: NavStack,
    scope: ScreenScope,
    splash_delay: Duration,
    // email verified on the forgot-password screen, until the reset completes
    recovery_email: Option<String>,
}

impl AuthFlow {
    pub fn new(users: UserStore, session: SessionStore, issuer: impl CodeIssuer + 'static) -> Self {
        Self {
            users,
            session,
            issuer: Arc::new(issuer),
            nav: NavStack::new(Route::Splash),
            scope: ScreenScope::new(),
            splash_delay: DEFAULT_SPLASH_DELAY,
            recovery_email: None,
        }
    }

    pub fn with_splash_delay(mut self, delay: Duration) -> Self {
        self.splash_delay = delay;
        self
    }

    pub fn route(&self) -> &Route {
        self.nav.current()
    }

    pub fn history(&self) -> &[Route] {
        self.nav.entries()
    }

    /// Handle to dismiss the current screen from another task.
    pub fn screen_handle(&self) -> ScreenHandle {
        self.scope.handle()
    }

    // ---------------------------
    // Internal helpers
    // ---------------------------

    fn on_screen(&self, name: &str, action: &str) -> Option<Outcome> {
        let current = self.nav.current();
        if current.name() == name {
            return None;
        }
        warn!(action, route = current.name(), "action not available on this screen");
        Some(Outcome::stayed(format!(
            "{} is not available on {}",
            action, current
        )))
    }

    /// Apply a navigation change and start the new screen's lifetime.
    fn go(&mut self, notice: Option<&str>, change: impl FnOnce(&mut NavStack)) -> Outcome {
        let from = self.nav.current().name();
        change(&mut self.nav);
        self.scope.renew();

        let to = self.nav.current().clone();
        debug!(from, to = to.name(), depth = self.nav.depth(), "navigated");
        Outcome::Moved {
            to,
            notice: notice.map(str::to_string),
        }
    }

    fn reject(&self, fields: FieldErrors) -> Outcome {
        debug!(route = self.nav.current().name(), invalid = fields.len(), "submit rejected");
        Outcome::Stayed {
            notice: fields.summary().to_string(),
            fields: Some(fields),
        }
    }

    /// Screen boundary: every failure becomes a transient notice.
    fn fail(&self, err: AppError) -> Outcome {
        match err.kind() {
            ErrorKind::Storage => warn!(error = %err, "operation failed"),
            _ => debug!(error = %err, "operation refused"),
        }
        match err {
            AppError::Validation(fields) => self.reject(fields),
            other => Outcome::stayed(other.notice()),
        }
    }

    // ---------------------------
    // Splash
    // ---------------------------

    /// Show the splash for the configured delay, then land on Home when a
    /// session exists, Login otherwise (including when it cannot be read).
    pub async fn launch(&mut self) -> Outcome {
        if let Some(o) = self.on_screen("splash", "Launch") {
            return o;
        }

        if self
            .scope
            .run(tokio::time::sleep(self.splash_delay))
            .await
            .is_none()
        {
            return Outcome::Discarded;
        }

        let target = match self.session.is_logged_in() {
            Ok(true) => Route::Home,
            Ok(false) => Route::Login,
            Err(e) => {
                warn!(error = %e, "cannot read session, falling back to login");
                Route::Login
            }
        };

        self.go(None, |nav| nav.push_popping_up_to(target, "splash", true))
    }

    // ---------------------------
    // Login
    // ---------------------------

    pub fn open_sign_up(&mut self) -> Outcome {
        if let Some(o) = self.on_screen("login", "Sign up") {
            return o;
        }
        self.go(None, |nav| nav.push(Route::SignUp))
    }

    pub fn open_forgot_password(&mut self) -> Outcome {
        if let Some(o) = self.on_screen("login", "Forgot password") {
            return o;
        }
        self.go(None, |nav| nav.push(Route::ForgotPassword))
    }

    pub async fn submit_login(&mut self, form: &LoginForm) -> Outcome {
        if let Some(o) = self.on_screen("login", "Login") {
            return o;
        }
        if self.scope.is_dismissed() {
            return Outcome::Discarded;
        }
        if let Err(fields) = form.validate() {
            return self.reject(fields);
        }

        let found = match self
            .scope
            .run(self.users.login(&form.email, &form.password))
            .await
        {
            None => return Outcome::Discarded,
            Some(Ok(found)) => found,
            Some(Err(e)) => return self.fail(e),
        };

        let Some(user) = found else {
            self.users
                .audit("login_failed", &form.email, "Invalid email or password")
                .await;
            return Outcome::stayed(MSG_LOGIN_FAILED);
        };

        if let Err(e) = self.session.save_session(&user.email, &user.display_name()) {
            return self.fail(e);
        }
        self.users.audit("login", &user.email, "Login successful").await;
        info!(email = %user.email, "logged in");

        self.go(Some(MSG_LOGIN_OK), |nav| {
            nav.push_popping_up_to(Route::Home, "login", true)
        })
    }

    // ---------------------------
    // Sign up
    // ---------------------------

    pub async fn submit_sign_up(&mut self, form: &SignUpForm) -> Outcome {
        if let Some(o) = self.on_screen("signup", "Sign up") {
            return o;
        }
        if self.scope.is_dismissed() {
            return Outcome::Discarded;
        }
        if let Err(fields) = form.validate() {
            return self.reject(fields);
        }

        let res = self.scope.run(self.users.insert(form.to_new_user())).await;
        match res {
            None => Outcome::Discarded,
            Some(Err(e)) => self.fail(e),
            Some(Ok(id)) => {
                self.users
                    .audit("signup", &form.email, &format!("Account {} created", id))
                    .await;
                self.go(Some(MSG_REGISTERED), |nav| {
                    if nav.pop().is_none() {
                        nav.reset(Route::Login);
                    }
                })
            }
        }
    }

    // ---------------------------
    // Password recovery
    // ---------------------------

    pub async fn submit_forgot_password(
        &mut self,
        form: &ForgotPasswordForm,
        channel: Channel,
    ) -> Outcome {
        if let Some(o) = self.on_screen("forgot_password", "Password recovery") {
            return o;
        }
        if self.scope.is_dismissed() {
            return Outcome::Discarded;
        }
        if let Err(fields) = form.validate() {
            return self.reject(fields);
        }

        let found = match self
            .scope
            .run(self.users.find_by_email(&form.identifier))
            .await
        {
            None => return Outcome::Discarded,
            Some(Ok(found)) => found,
            Some(Err(e)) => return self.fail(e),
        };

        let Some(user) = found else {
            return self.fail(AppError::NotFound(form.identifier.clone()));
        };

        let code = self.issuer.issue(channel, &user.email);
        debug!(email = %user.email, ?channel, "verification code issued");
        self.recovery_email = Some(user.email);

        self.go(None, |nav| nav.push(Route::OtpValidation { code }))
    }

    /// Check the four entered digits. A wrong code empties every cell.
    pub fn submit_otp(&mut self, form: &mut OtpForm) -> Outcome {
        let expected = match self.nav.current() {
            Route::OtpValidation { code } => code.clone(),
            _ => {
                return self
                    .on_screen("otp_validation", "Code verification")
                    .unwrap_or(Outcome::Discarded);
            }
        };
        if self.scope.is_dismissed() {
            return Outcome::Discarded;
        }

        if !form.is_complete() {
            return Outcome::stayed(MSG_INCOMPLETE_CODE);
        }

        if !codes_match(&form.code(), &expected) {
            form.clear();
            return Outcome::stayed(MSG_WRONG_CODE);
        }

        let Some(email) = self.recovery_email.clone() else {
            return self.fail(AppError::Other("no account is being recovered".into()));
        };

        self.go(None, |nav| {
            nav.push_popping_up_to(Route::ResetPassword { email }, "forgot_password", true)
        })
    }

    pub async fn submit_reset_password(&mut self, form: &ResetPasswordForm) -> Outcome {
        let email = match self.nav.current() {
            Route::ResetPassword { email } => email.clone(),
            _ => {
                return self
                    .on_screen("reset_password", "Password reset")
                    .unwrap_or(Outcome::Discarded);
            }
        };
        if self.scope.is_dismissed() {
            return Outcome::Discarded;
        }
        if let Err(fields) = form.validate() {
            return self.reject(fields);
        }

        let res = self
            .scope
            .run(self.users.update_password(&email, &form.password))
            .await;
        match res {
            None => Outcome::Discarded,
            Some(Err(e)) => self.fail(e),
            Some(Ok(())) => {
                self.users
                    .audit("password_reset", &email, "Password reset")
                    .await;
                self.recovery_email = None;
                self.go(Some(MSG_RESET_OK), |nav| nav.reset(Route::Login))
            }
        }
    }

    // ---------------------------
    // Main screen tabs
    // ---------------------------

    /// Switch tab in place: no history entry, no new screen lifetime.
    pub fn select_tab(&mut self, tab: Tab) -> Outcome {
        if !self.nav.current().is_main_tab() {
            return Outcome::stayed(format!(
                "Tabs are not available on {}",
                self.nav.current()
            ));
        }
        self.nav.replace_top(tab.into());
        Outcome::Moved {
            to: self.nav.current().clone(),
            notice: None,
        }
    }

    /// Name and email for the profile tab.
    ///
    /// Best effort: the stored account refines the session username, but a
    /// failed lookup is only logged and the session values are shown.
    pub async fn refresh_profile(&self) -> ProfileView {
        let state = match self.session.load() {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "cannot read session for profile");
                return ProfileView::default();
            }
        };

        let mut view = ProfileView {
            name: state.username,
            email: state.email,
        };
        if view.email.is_empty() {
            return view;
        }

        match self.users.find_by_email(&view.email).await {
            Ok(Some(user)) => view.name = user.display_name(),
            Ok(None) => debug!(email = %view.email, "profile: no stored account"),
            Err(e) => warn!(error = %e, "profile refresh failed"),
        }
        view
    }

    pub async fn logout(&mut self) -> Outcome {
        if let Some(o) = self.on_screen("profile", "Logout") {
            return o;
        }

        let email = self.session.email().unwrap_or_default();
        if let Err(e) = self.session.clear() {
            return self.fail(e);
        }
        self.users.audit("logout", &email, "Logged out").await;
        info!(%email, "logged out");

        self.go(Some(MSG_LOGGED_OUT), |nav| nav.reset(Route::Login))
    }

    // ---------------------------
    // Back navigation
    // ---------------------------

    /// Leave the current screen. Returns the route now visible, or `None`
    /// when already at the root.
    pub fn back(&mut self) -> Option<Route> {
        let route = self.nav.pop()?.clone();
        self.scope.renew();
        debug!(to = route.name(), "back");
        Some(route)
    }
}
