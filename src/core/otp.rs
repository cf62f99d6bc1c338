//! Verification code issuance for the password-recovery flow.
//!
//! Nothing is delivered yet: [`FixedCodeIssuer`] hands out one fixed code
//! per channel. A real sender only has to implement [`CodeIssuer`].

use subtle::ConstantTimeEq;

use crate::config::Config;

pub const CODE_LEN: usize = 4;

/// How the user asked to receive the code on the forgot-password screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Email,
    Sms,
}

pub trait CodeIssuer: Send + Sync {
    /// Produce (and, for real implementations, deliver) a code for `email`.
    fn issue(&self, channel: Channel, email: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct FixedCodeIssuer {
    email_code: String,
    sms_code: String,
}

impl FixedCodeIssuer {
    pub fn new(email_code: impl Into<String>, sms_code: impl Into<String>) -> Self {
        Self {
            email_code: email_code.into(),
            sms_code: sms_code.into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.otp_email_code.clone(), cfg.otp_sms_code.clone())
    }
}

impl Default for FixedCodeIssuer {
    fn default() -> Self {
        Self::new("1234", "6789")
    }
}

impl CodeIssuer for FixedCodeIssuer {
    fn issue(&self, channel: Channel, _email: &str) -> String {
        match channel {
            Channel::Email => self.email_code.clone(),
            Channel::Sms => self.sms_code.clone(),
        }
    }
}

/// Constant-time comparison of the entered code with the issued one.
pub fn codes_match(entered: &str, expected: &str) -> bool {
    entered.len() == expected.len() && bool::from(entered.as_bytes().ct_eq(expected.as_bytes()))
}
