//! Settings types for the workbench.
//!
//! This module defines all user-configurable settings:
//! - Backend address and Python session id
//! - Initial panel sizes and their clamp limits
//! - Variable polling interval
//! - Script execution mode (backend or simulated SQL)
//! - Grid preview limit and default stats column
//! - Demo content seeding

mod persistence;

pub use persistence::{load_settings, load_settings_from, save_settings, save_settings_to, settings_path};

use std::time::Duration;

use dsw_gateway::GatewayConfig;
use dsw_state::layout::{DEFAULT_BOTTOM_HEIGHT, DEFAULT_LEFT_WIDTH, DEFAULT_RIGHT_WIDTH};
use dsw_state::{LayoutState, PanelLimits};
use serde::{Deserialize, Serialize};

/// Lower bound for the polling interval.
pub const MIN_POLL_INTERVAL_MS: u64 = 250;

// ============================================================================
// Main Settings Struct
// ============================================================================

/// Workbench settings (persisted to disk as TOML).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: GatewayConfig,
    pub layout: LayoutSettings,
    pub polling: PollingSettings,
    pub scripts: ScriptSettings,
    pub grid: GridSettings,
    pub stats: StatsSettings,
    pub demo: DemoSettings,
}

// ============================================================================
// Layout
// ============================================================================

/// Initial panel sizes and the limits every resize is clamped into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub left_width: f64,
    pub right_width: f64,
    pub bottom_height: f64,
    pub limits: PanelLimits,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            left_width: DEFAULT_LEFT_WIDTH,
            right_width: DEFAULT_RIGHT_WIDTH,
            bottom_height: DEFAULT_BOTTOM_HEIGHT,
            limits: PanelLimits::default(),
        }
    }
}

impl LayoutSettings {
    /// Layout the workbench opens with: all panels visible, configured sizes.
    pub fn initial_state(&self) -> LayoutState {
        LayoutState {
            left_width: self.left_width,
            right_width: self.right_width,
            bottom_height: self.bottom_height,
            ..LayoutState::default()
        }
    }
}

// ============================================================================
// Polling
// ============================================================================

/// Background refresh settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    /// How often the variable explorer asks the kernel for its variables.
    pub variables_interval_ms: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            variables_interval_ms: 2000,
        }
    }
}

impl PollingSettings {
    /// Poll period, never shorter than [`MIN_POLL_INTERVAL_MS`].
    pub fn variables_interval(&self) -> Duration {
        Duration::from_millis(self.variables_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

// ============================================================================
// Scripts
// ============================================================================

/// How SQL scripts are executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlExecution {
    /// Round trip through `/api/query/run`.
    #[default]
    Backend,
    /// Fabricate a result table locally, without contacting the backend.
    Simulated,
}

/// Script Lab settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    pub sql_execution: SqlExecution,
    /// Delay before a simulated SQL run completes.
    pub simulated_latency_ms: u64,
    /// Row limit sent with backend SQL runs.
    pub sql_row_limit: u32,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            sql_execution: SqlExecution::Backend,
            simulated_latency_ms: 800,
            sql_row_limit: 1000,
        }
    }
}

impl ScriptSettings {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

// ============================================================================
// Grid / Stats / Demo
// ============================================================================

/// Data preview settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Rows requested per preview.
    pub preview_limit: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self { preview_limit: 100 }
    }
}

/// Statistics dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSettings {
    /// Column probed when the user has not picked one.
    pub default_column: String,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            default_column: "loan_amount".to_string(),
        }
    }
}

/// Demo content settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Seed a sample script, session table and grid tab on startup.
    pub seed_demo_content: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            seed_demo_content: true,
        }
    }
}
