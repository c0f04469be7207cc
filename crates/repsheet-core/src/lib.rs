//! # repsheet-core
//!
//! Core domain model for the repsheet progression plan generator.
//!
//! This crate provides:
//! - Domain types: `Exercise`, `ProgressionPlan`, `Session`, `SessionKind`
//! - The week-by-week intensity table and session templates
//! - Row layout computation (`PlanLayout`) shared by all output backends
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use repsheet_core::{Exercise, ProgressionPlan};
//!
//! let plan = ProgressionPlan::new("Progression")
//!     .exercise(Exercise::new("Pull-Up").max_pr(10))
//!     .exercise(Exercise::new("Push-Up").max_pr(25));
//! assert_eq!(plan.exercises.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod layout;

pub use layout::{BlockTotalRow, DayRow, PlanLayout, PlanRow, WeeklyTotalRow};

// ============================================================================
// Plan Constants
// ============================================================================

/// Length of the plan in weeks
pub const WEEKS: u32 = 12;

/// Training days per week
pub const SESSIONS_PER_WEEK: usize = 4;

/// Weeks per training block
pub const BLOCK_WEEKS: u32 = 4;

/// First 1-indexed workbook row below the header
pub const FIRST_DATA_ROW: u32 = 2;

/// Intensity factors per week (blocks: weeks 1-4, 5-8, 9-12)
pub const FACTORS: [f64; WEEKS as usize] = [
    0.55, 0.65, 0.75, 0.70, // block 1
    0.60, 0.70, 0.80, 0.75, // block 2
    0.65, 0.75, 0.85, 1.00, // block 3
];

/// Intensity factor applied to the max PR for the given week.
///
/// Returns `None` for weeks outside 1..=[`WEEKS`].
pub fn week_factor(week: u32) -> Option<f64> {
    if (1..=WEEKS).contains(&week) {
        Some(FACTORS[(week - 1) as usize])
    } else {
        None
    }
}

// ============================================================================
// Sessions
// ============================================================================

/// The kind of training day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    Standard,
    VolumeLow,
    VolumeHigh,
    Light,
    VeryLight,
    Test,
}

impl SessionKind {
    /// The label written to the Session Type column
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::VolumeLow => "Volume Low",
            Self::VolumeHigh => "Volume High",
            Self::Light => "Light",
            Self::VeryLight => "Very Light",
            Self::Test => "Test Day",
        }
    }

    /// Test days carry no rep targets, only the "Test" prompt
    pub fn is_test(&self) -> bool {
        matches!(self, Self::Test)
    }
}

/// One training day: session kind, set count, and deload adjustment.
///
/// The deload is a signed fraction of the max PR; the adjustment term is
/// floored before it is applied, matching the spreadsheet `INT` function.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub kind: SessionKind,
    pub sets: u32,
    pub deload: f64,
}

impl Session {
    pub const fn new(kind: SessionKind, sets: u32, deload: f64) -> Self {
        Self { kind, sets, deload }
    }

    /// Target reps per set for a given max PR and weekly factor.
    ///
    /// Evaluates `INT(pr*factor ± INT(pr*|deload|))` with floor semantics,
    /// the same arithmetic the generated reps formula performs.
    pub fn target_reps(&self, pr: u32, factor: f64) -> i64 {
        let pr = f64::from(pr);
        let trim = (pr * self.deload.abs()).floor();
        let adjusted = if self.deload < 0.0 {
            pr * factor - trim
        } else {
            pr * factor + trim
        };
        adjusted.floor() as i64
    }

    /// Session volume: sets times target reps
    pub fn volume(&self, pr: u32, factor: f64) -> i64 {
        i64::from(self.sets) * self.target_reps(pr, factor)
    }
}

/// Session template for weeks 1-11, tuned to work between 4-7 reps with
/// higher set counts on the volume days.
const DEFAULT_WEEK: [Session; SESSIONS_PER_WEEK] = [
    Session::new(SessionKind::Standard, 4, 0.0),
    Session::new(SessionKind::VolumeLow, 6, -0.2),
    Session::new(SessionKind::Standard, 4, 0.0),
    Session::new(SessionKind::VolumeHigh, 5, -0.1),
];

/// Session template for the final week: taper into a max test.
const FINAL_WEEK: [Session; SESSIONS_PER_WEEK] = [
    Session::new(SessionKind::Standard, 4, 0.0),
    Session::new(SessionKind::Light, 4, -0.2),
    Session::new(SessionKind::VeryLight, 4, -0.3),
    Session::new(SessionKind::Test, 1, 0.0),
];

/// The four sessions scheduled for the given week.
pub fn sessions_for_week(week: u32) -> &'static [Session; SESSIONS_PER_WEEK] {
    if week == WEEKS {
        &FINAL_WEEK
    } else {
        &DEFAULT_WEEK
    }
}

// ============================================================================
// Exercises
// ============================================================================

/// An exercise tracked by the workbook, with its editable max-PR default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Display name, e.g. "Pull-Up"
    pub name: String,
    /// Worksheet name for this exercise's progression sheet
    pub sheet_name: String,
    /// Default max PR written to the Settings sheet
    pub max_pr: u32,
}

impl Exercise {
    /// Create an exercise; the sheet name is derived from the display name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let sheet_name = format!("{} Progression", name.replace('-', ""));
        Self {
            name,
            sheet_name,
            max_pr: 10,
        }
    }

    /// Override the progression sheet name
    pub fn sheet(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    /// Set the default max PR
    pub fn max_pr(mut self, pr: u32) -> Self {
        self.max_pr = pr;
        self
    }

    /// Pull-up exercise with the stock default PR
    pub fn pull_up() -> Self {
        Self::new("Pull-Up")
    }

    /// Push-up exercise with the stock default PR
    pub fn push_up() -> Self {
        Self::new("Push-Up").max_pr(25)
    }
}

/// A complete workbook definition: one progression sheet per exercise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionPlan {
    /// Workbook title, also the default output file stem
    pub title: String,
    /// Exercises in sheet order; exercise order fixes the Settings rows
    pub exercises: Vec<Exercise>,
}

impl ProgressionPlan {
    /// Create an empty plan with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            exercises: Vec::new(),
        }
    }

    /// Add an exercise
    pub fn exercise(mut self, exercise: Exercise) -> Self {
        self.exercises.push(exercise);
        self
    }
}

impl Default for ProgressionPlan {
    fn default() -> Self {
        Self::new("Progression")
            .exercise(Exercise::pull_up())
            .exercise(Exercise::push_up())
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a progression plan to the output format
    fn render(&self, plan: &ProgressionPlan) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
