use std::fmt;

/// A screen of the account flow, with the payload captured when navigating to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Splash,
    Login,
    SignUp,
    ForgotPassword,
    OtpValidation { code: String },
    ResetPassword { email: String },
    Home,
    Store,
    Profile,
}

/// Tabs of the composite main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Store,
    Profile,
}

impl Route {
    /// Route name without payload, used for history matching.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Splash => "splash",
            Route::Login => "login",
            Route::SignUp => "signup",
            Route::ForgotPassword => "forgot_password",
            Route::OtpValidation { .. } => "otp_validation",
            Route::ResetPassword { .. } => "reset_password",
            Route::Home => "home",
            Route::Store => "store",
            Route::Profile => "profile",
        }
    }

    pub fn is_main_tab(&self) -> bool {
        self.tab().is_some()
    }

    pub fn tab(&self) -> Option<Tab> {
        match self {
            Route::Home => Some(Tab::Home),
            Route::Store => Some(Tab::Store),
            Route::Profile => Some(Tab::Profile),
            _ => None,
        }
    }
}

impl From<Tab> for Route {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Home => Route::Home,
            Tab::Store => Route::Store,
            Tab::Profile => Route::Profile,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::OtpValidation { .. } => write!(f, "OTP Validation"),
            Route::ResetPassword { email } => write!(f, "Reset Password ({})", email),
            Route::Splash => write!(f, "Splash"),
            Route::Login => write!(f, "Login"),
            Route::SignUp => write!(f, "Sign Up"),
            Route::ForgotPassword => write!(f, "Forgot Password"),
            Route::Home => write!(f, "Home"),
            Route::Store => write!(f, "Store"),
            Route::Profile => write!(f, "Profile"),
        }
    }
}
