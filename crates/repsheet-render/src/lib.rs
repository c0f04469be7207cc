//! # repsheet-render
//!
//! Output backends for repsheet progression plans.
//!
//! This crate provides:
//! - Excel workbook output (the deliverable spreadsheet)
//! - Text output for console inspection
//!
//! ## Example
//!
//! ```rust,ignore
//! use repsheet_core::{ProgressionPlan, Renderer};
//! use repsheet_render::{ExcelRenderer, TextRenderer};
//!
//! let plan = ProgressionPlan::default();
//!
//! // Excel workbook
//! let xlsx_bytes = ExcelRenderer::new().render(&plan)?;
//! std::fs::write("Progression.xlsx", xlsx_bytes)?;
//!
//! // Console table
//! let text = TextRenderer::new().render(&plan)?;
//! println!("{text}");
//! ```

pub mod excel;

pub use excel::ExcelRenderer;

use std::fmt::Write;

use repsheet_core::{PlanLayout, PlanRow, ProgressionPlan, RenderError, Renderer};

/// Plain text renderer for console output.
///
/// Rep and volume columns are evaluated at each exercise's configured max
/// PR, so the printout matches what the workbook formulas compute before
/// the user edits the Settings sheet.
#[derive(Clone, Debug, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_exercise(
        &self,
        out: &mut String,
        exercise: &repsheet_core::Exercise,
        layout: &PlanLayout,
    ) {
        let _ = writeln!(out, "{} (Max PR: {})", exercise.sheet_name, exercise.max_pr);
        let _ = writeln!(
            out,
            "{:>4}  {:<6}{:<13}{:>4}{:>8}{:>6}{:>8}",
            "Week", "Day", "Session Type", "Sets", "Factor", "Reps", "Volume"
        );

        for plan_row in &layout.rows {
            match plan_row {
                PlanRow::Day(day) => {
                    let session = &day.session;
                    let label = format!("Day {}", day.day);
                    let (reps, volume) = if session.kind.is_test() {
                        ("Test".to_string(), String::new())
                    } else {
                        (
                            session.target_reps(exercise.max_pr, day.factor).to_string(),
                            session.volume(exercise.max_pr, day.factor).to_string(),
                        )
                    };
                    let _ = writeln!(
                        out,
                        "{:>4}  {:<6}{:<13}{:>4}{:>8}{:>6}{:>8}",
                        day.week,
                        label,
                        session.kind.label(),
                        session.sets,
                        day.factor,
                        reps,
                        volume
                    );
                }
                PlanRow::WeeklyTotal(weekly) => {
                    let total = layout.week_volume(exercise.max_pr, weekly.week);
                    let _ = writeln!(out, "      Week {} Total Volume: {}", weekly.week, total);
                }
                PlanRow::BlockTotal(block) => {
                    let total = layout.block_volume(exercise.max_pr, block);
                    let _ = writeln!(out, "      Block {} Total Volume: {}", block.block, total);
                }
                PlanRow::Spacer { .. } => {
                    let _ = writeln!(out);
                }
            }
        }
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, plan: &ProgressionPlan) -> Result<String, RenderError> {
        if plan.exercises.is_empty() {
            return Err(RenderError::InvalidData("no exercises to render".into()));
        }

        let layout = PlanLayout::build();
        let mut out = String::new();
        for exercise in &plan.exercises {
            self.render_exercise(&mut out, exercise, &layout);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repsheet_core::Exercise;

    fn pull_up_plan() -> ProgressionPlan {
        ProgressionPlan::new("Progression").exercise(Exercise::pull_up())
    }

    #[test]
    fn text_render_lists_every_week() {
        let text = TextRenderer::new().render(&pull_up_plan()).unwrap();
        for week in 1..=12 {
            assert!(
                text.contains(&format!("Week {} Total Volume", week)),
                "missing week {week}"
            );
        }
        for block in 1..=3 {
            assert!(text.contains(&format!("Block {} Total Volume", block)));
        }
    }

    #[test]
    fn text_render_marks_the_test_day() {
        let text = TextRenderer::new().render(&pull_up_plan()).unwrap();
        assert!(text.contains("Test Day"));
        assert!(text.contains("Test"));
    }

    #[test]
    fn text_render_week_one_numbers() {
        // PR 10, factor 0.55: Standard 4x5=20, Volume Low 6x3=18,
        // Standard 4x5=20, Volume High 5x4=20
        let text = TextRenderer::new().render(&pull_up_plan()).unwrap();
        assert!(text.contains("Week 1 Total Volume: 78"));
    }

    #[test]
    fn text_render_empty_plan_fails() {
        let plan = ProgressionPlan::new("Empty");
        assert!(TextRenderer::new().render(&plan).is_err());
    }
}
