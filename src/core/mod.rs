pub mod flow;
pub mod forms;
pub mod navigation;
pub mod otp;
pub mod password;
pub mod prefs;
pub mod scope;
pub mod session;
pub mod user_store;
pub mod validator;
