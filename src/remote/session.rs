//! One authenticated HTTP session against the remote timesheet system.
//!
//! The remote side is a classic cookie-tracked ASP application: an
//! unauthenticated fetch hands out a tracking cookie, a form login binds it
//! to the account, and every later request just replays the cookie. There
//! is no logout and no expiry signal; a token is valid until dropped.

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::redirect::Policy;

use crate::errors::{AppError, AppResult};
use crate::models::settings::Settings;

const ROOT_PATH: &str = "/atrweb/";
const LOGIN_PATH: &str = "/atrweb/Default.asp?Action=Login";

/// Cookie attributes the login form expects to see blanked out alongside
/// the tracking cookie. Fixed by protocol inspection.
const COOKIE_SUFFIX: &str = "; Language=; Languages=; Remember%5Fme=; Password=; Login=;";

/// Opaque session cookie. Threaded explicitly through every authenticated
/// call; holding two of these at once buys nothing since the remote only
/// honors the most recent login.
#[derive(Debug, Clone)]
pub struct SessionToken(String);

impl SessionToken {
    fn as_str(&self) -> &str {
        &self.0
    }
}

pub struct SessionClient {
    http: Client,
    base: String,
    settings: Settings,
}

impl SessionClient {
    pub fn new(settings: Settings) -> AppResult<Self> {
        // The ASP endpoints answer logins with redirects that would drop
        // the set-cookie we need, so redirects are never followed.
        let http = Client::builder().redirect(Policy::none()).build()?;
        let scheme = if settings.use_tls { "https" } else { "http" };
        let base = format!("{}://{}", scheme, settings.host);
        Ok(Self {
            http,
            base,
            settings,
        })
    }

    pub fn employee_id(&self) -> i64 {
        self.settings.employee_id
    }

    /// Obtain a tracking cookie and bind it to the account with the login
    /// form. Transport failures and a missing set-cookie header are both
    /// fatal to the current operation; callers must not retry silently.
    pub fn acquire_session(&self) -> AppResult<SessionToken> {
        let resp = self
            .http
            .get(format!("{}{}", self.base, ROOT_PATH))
            .send()
            .map_err(|e| AppError::Auth(format!("cannot reach {}: {}", self.base, e)))?;

        let raw_cookie = resp
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Auth("remote did not hand out a session cookie".to_string())
            })?;

        // Keep only the name=value pair; the attributes after the first
        // ';' are directives for a browser, not part of the session.
        let pair = raw_cookie.split(';').next().unwrap_or(raw_cookie);
        let token = SessionToken(format!("{}{}", pair, COOKIE_SUFFIX));

        self.post_form(
            &token,
            LOGIN_PATH,
            &[
                ("Login", self.settings.username.clone()),
                ("Password", self.settings.password.clone()),
                ("Language", "0".to_string()),
                ("Type", "0".to_string()),
            ],
        )
        .map_err(|e| AppError::Auth(format!("login failed: {}", e)))?;

        Ok(token)
    }

    /// Authenticated GET; returns the raw response body.
    pub fn get(&self, token: &SessionToken, path: &str) -> AppResult<String> {
        let resp = self
            .http
            .get(format!("{}{}", self.base, path))
            .header(COOKIE, token.as_str())
            .send()?;
        Ok(resp.text()?)
    }

    /// Authenticated POST of a form-encoded body; returns the raw
    /// response body.
    pub fn post_form(
        &self,
        token: &SessionToken,
        path: &str,
        fields: &[(&str, String)],
    ) -> AppResult<String> {
        let body = encode_form(fields);
        let resp = self
            .http
            .post(format!("{}{}", self.base, path))
            .header(COOKIE, token.as_str())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()?;
        Ok(resp.text()?)
    }
}

fn encode_form(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
