//! Application state for the Astral Pips terminal landing page.
//!
//! The `App` owns the session store for the lifetime of the process, watches
//! it to decide which navigation affordances to show, and carries the UI
//! state (current section, sign-in form, rotating facts).

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use astral_core::models::FOREX_FACTS;
use astral_core::{AuthState, AuthStore, Config, GoTrueClient};

// ============================================================================
// Constants
// ============================================================================

/// How long each "Did You Know?" fact stays on screen
pub const FACT_ROTATION_INTERVAL: Duration = Duration::from_secs(5);

/// RFC 5321 caps an address at 254 characters.
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// UI State Types
// ============================================================================

/// Page sections. `Dashboard` is only reachable while signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Courses,
    Forum,
    Markets,
    Dashboard,
}

impl Tab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Courses => "Courses",
            Tab::Forum => "Forum",
            Tab::Markets => "Markets",
            Tab::Dashboard => "Dashboard",
        }
    }

    /// Next public section (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Home => Tab::Courses,
            Tab::Courses => Tab::Forum,
            Tab::Forum => Tab::Markets,
            Tab::Markets => Tab::Home,
            Tab::Dashboard => Tab::Home,
        }
    }

    /// Previous public section (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Home => Tab::Markets,
            Tab::Courses => Tab::Home,
            Tab::Forum => Tab::Courses,
            Tab::Markets => Tab::Forum,
            Tab::Dashboard => Tab::Markets,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    LoggingIn,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
}

/// Whether the overlay signs in to an existing account or creates one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    SignIn,
    SignUp,
}

impl LoginMode {
    pub fn title(&self) -> &'static str {
        match self {
            LoginMode::SignIn => "Sign In",
            LoginMode::SignUp => "Sign Up",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        }
    }
}

/// Cycles through the forex facts on a fixed interval
#[derive(Debug, Clone)]
pub struct FactRotator {
    index: usize,
    last_rotated: Instant,
    interval: Duration,
}

impl FactRotator {
    pub fn new(now: Instant, interval: Duration) -> Self {
        Self {
            index: 0,
            last_rotated: now,
            interval,
        }
    }

    pub fn current(&self) -> &'static str {
        FOREX_FACTS[self.index]
    }

    /// Advance at most one fact if the interval has elapsed. Returns true if it moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_rotated) < self.interval {
            return false;
        }
        self.index = (self.index + 1) % FOREX_FACTS.len();
        self.last_rotated = now;
        true
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    pub store: Arc<AuthStore>,
    auth_rx: watch::Receiver<AuthState>,
    /// Mirror of the store's session presence, refreshed by `sync_auth_state`
    pub signed_in: bool,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,
    pub facts: FactRotator,

    // Login form state
    pub login_mode: LoginMode,
    pub login_email: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create the application against the identity provider named in `config`
    pub fn new(config: &Config) -> Result<Self> {
        let (url, key) = config.identity_endpoint()?;
        debug!(url, "Identity provider configured");
        let provider = GoTrueClient::new(url, key)?;
        Ok(Self::with_store(Arc::new(AuthStore::new(Arc::new(provider)))))
    }

    /// Create the application around an existing store
    pub fn with_store(store: Arc<AuthStore>) -> Self {
        let auth_rx = store.subscribe();
        let signed_in = store.is_signed_in();

        Self {
            store,
            auth_rx,
            signed_in,

            state: AppState::Normal,
            current_tab: Tab::Home,
            facts: FactRotator::new(Instant::now(), FACT_ROTATION_INTERVAL),

            login_mode: LoginMode::SignIn,
            login_email: std::env::var("ASTRAL_EMAIL").unwrap_or_default(),
            login_password: String::new(),
            login_focus: LoginFocus::Email,
            login_error: None,

            status_message: None,
        }
    }

    // =========================================================================
    // Session observation
    // =========================================================================

    /// Pick up store changes, leaving the dashboard if the session went away.
    pub fn sync_auth_state(&mut self) {
        if !self.auth_rx.has_changed().unwrap_or(false) {
            return;
        }
        self.signed_in = self.auth_rx.borrow_and_update().is_signed_in();
        debug!(signed_in = self.signed_in, "Session changed");
        if !self.signed_in && self.current_tab == Tab::Dashboard {
            self.current_tab = Tab::Home;
        }
    }

    /// Label of the right-most navigation affordance
    pub fn nav_action_label(&self) -> &'static str {
        if self.signed_in {
            "Dashboard"
        } else {
            "Sign In"
        }
    }

    /// Called once per frame
    pub fn on_tick(&mut self) {
        self.sync_auth_state();
        self.facts.tick(Instant::now());
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn select_tab(&mut self, tab: Tab) {
        if tab == Tab::Dashboard && !self.signed_in {
            self.start_login(LoginMode::SignIn);
            return;
        }
        self.current_tab = tab;
    }

    /// The nav bar's right-hand action: dashboard when signed in, sign-in otherwise
    pub fn nav_action(&mut self) {
        self.select_tab(Tab::Dashboard);
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Show the sign-in overlay
    pub fn start_login(&mut self, mode: LoginMode) {
        self.state = AppState::LoggingIn;
        self.login_mode = mode;
        self.login_focus = if self.login_email.is_empty() {
            LoginFocus::Email
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    pub fn cancel_login(&mut self) {
        self.login_password.clear();
        self.login_error = None;
        self.state = AppState::Normal;
    }

    /// Submit the form in the current mode
    pub async fn attempt_login(&mut self) -> Result<()> {
        let email = self.login_email.trim().to_string();
        let password = self.login_password.clone();

        if email.is_empty() || password.is_empty() {
            self.login_error = Some("Email and password required".to_string());
            return Err(anyhow::anyhow!("Email and password required"));
        }

        self.login_error = None;

        let result = match self.login_mode {
            LoginMode::SignIn => self.store.sign_in(&email, &password).await,
            LoginMode::SignUp => self.store.sign_up(&email, &password).await,
        };

        match result {
            Ok(identity) => {
                self.login_password.clear();
                self.state = AppState::Normal;
                self.sync_auth_state();
                self.current_tab = Tab::Dashboard;
                self.status_message = Some(
                    if self.login_mode == LoginMode::SignUp && !identity.is_confirmed() {
                        format!("Check {} to confirm your account", email)
                    } else {
                        format!("Welcome, {}", identity.display_name())
                    },
                );
                info!(mode = self.login_mode.title(), "Authentication succeeded");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, status = ?e.status(), mode = self.login_mode.title(), "Authentication failed");
                // Shown as the provider phrased it
                self.login_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn sign_out(&mut self) {
        self.store.sign_out().await;
        self.sync_auth_state();
        self.current_tab = Tab::Home;
        self.status_message = Some("Signed out".to_string());
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if an email character should be accepted
pub fn can_add_email_char(current_len: usize, c: char) -> bool {
    current_len < MAX_EMAIL_LENGTH && is_valid_input_char(c) && !c.is_whitespace()
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
