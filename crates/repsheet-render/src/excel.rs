//! Excel workbook renderer
//!
//! Generates the progression workbook:
//! - Settings: one editable max-PR cell per exercise
//! - One progression sheet per exercise, with reps/volume driven by
//!   formulas referencing the Settings cell
//!
//! ## Output Structure
//!
//! ```text
//! Sheet: Settings
//! | Pull-Up Progression Settings          |        |    |
//! | Enter your Max Pull-Up PR in cell C2  | Max PR | 10 |
//!
//! Sheet: PullUp Progression
//! | Week | Day   | Session Type | Sets | Factor | Reps per Set | Volume |
//! | 1    | Day 1 | Standard     | 4    | 0.55   | =INT(...)    | =D2*F2 |
//! | ...  |       |              |      |        |              |        |
//! | Week 1 Total Volume                                   | =SUM(G2:G5) |
//! ```
//!
//! All reps formulas resolve against the absolute Settings reference
//! (`'Settings'!$C$2`), so editing the max PR recomputes the whole sheet.
//! The factor column feeds the formulas and is hidden from view.

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use repsheet_core::{
    Exercise, PlanLayout, PlanRow, ProgressionPlan, RenderError, Renderer,
};

/// Progression sheet columns: Week, Day, Session Type, Sets, Factor,
/// Reps per Set, Volume.
const COLUMNS: u16 = 7;

const COL_WEEK: u16 = 0;
const COL_DAY: u16 = 1;
const COL_SESSION: u16 = 2;
const COL_SETS: u16 = 3;
const COL_FACTOR: u16 = 4;
const COL_REPS: u16 = 5;
const COL_VOLUME: u16 = 6;

const HEADERS: [&str; COLUMNS as usize] = [
    "Week",
    "Day",
    "Session Type",
    "Sets",
    "Factor",
    "Reps per Set",
    "Volume",
];

/// Excel workbook renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Whether to write formulas (vs precomputed values)
    pub use_formulas: bool,
    /// Whether to hide the factor column on progression sheets
    pub hide_factor_column: bool,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            use_formulas: true,
            hide_factor_column: true,
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write precomputed values instead of formulas.
    ///
    /// Values are evaluated at each exercise's configured max PR; the
    /// workbook no longer recomputes when Settings cells are edited.
    pub fn static_values(mut self) -> Self {
        self.use_formulas = false;
        self
    }

    /// Keep the factor column visible
    pub fn show_factor_column(mut self) -> Self {
        self.hide_factor_column = false;
        self
    }

    /// Generate workbook bytes
    pub fn render_to_bytes(&self, plan: &ProgressionPlan) -> Result<Vec<u8>, RenderError> {
        if plan.exercises.is_empty() {
            return Err(RenderError::InvalidData("no exercises to render".into()));
        }

        let mut workbook = Workbook::new();
        let formats = ExcelFormats::new();

        self.add_settings_sheet(&mut workbook, plan)?;

        let layout = PlanLayout::build();
        for (index, exercise) in plan.exercises.iter().enumerate() {
            let settings_cell = settings_ref(index);
            self.add_progression_sheet(&mut workbook, exercise, &settings_cell, &layout, &formats)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    /// Render and write the workbook file, overwriting any existing file.
    pub fn save(&self, plan: &ProgressionPlan, path: &std::path::Path) -> Result<(), RenderError> {
        let bytes = self.render_to_bytes(plan)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Add the Settings sheet with one editable max-PR cell per exercise.
    ///
    /// Exercise `i` occupies a title row and an input row; the input row is
    /// `2*i + 2`, putting the first two exercises at C2 and C4.
    fn add_settings_sheet(
        &self,
        workbook: &mut Workbook,
        plan: &ProgressionPlan,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name("Settings")
            .map_err(|e| RenderError::Format(e.to_string()))?;

        for (index, exercise) in plan.exercises.iter().enumerate() {
            let title_row = 2 * index as u32; // 0-indexed
            let input_row = title_row + 1;
            let input_cell = format!("C{}", input_row + 1);

            sheet
                .write(title_row, 0, format!("{} Progression Settings", exercise.name))
                .map_err(|e| RenderError::Format(e.to_string()))?;
            sheet
                .write(
                    input_row,
                    0,
                    format!(
                        "Enter your Max {} PR in cell {}",
                        exercise.name, input_cell
                    ),
                )
                .map_err(|e| RenderError::Format(e.to_string()))?;
            sheet
                .write(input_row, 1, "Max PR")
                .map_err(|e| RenderError::Format(e.to_string()))?;
            sheet
                .write(input_row, 2, exercise.max_pr)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }

        Ok(())
    }

    /// Add one progression sheet driven by the given Settings reference.
    fn add_progression_sheet(
        &self,
        workbook: &mut Workbook,
        exercise: &Exercise,
        settings_cell: &str,
        layout: &PlanLayout,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(exercise.sheet_name.as_str())
            .map_err(|e| RenderError::Format(e.to_string()))?;

        let mut widths = ColumnWidths::new();

        for (col, header) in HEADERS.iter().enumerate() {
            widths.note(col as u16, header);
            sheet
                .write_with_format(0, col as u16, *header, &formats.header)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }

        for plan_row in &layout.rows {
            match plan_row {
                PlanRow::Day(day) => {
                    self.write_day_row(sheet, exercise, settings_cell, day, &mut widths)?;
                }
                PlanRow::WeeklyTotal(weekly) => {
                    let label = format!("Week {} Total Volume", weekly.week);
                    let volume = if self.use_formulas {
                        CellValue::Formula(weekly_total_formula(
                            weekly.first_day_row,
                            weekly.last_day_row,
                        ))
                    } else {
                        CellValue::Number(layout.week_volume(exercise.max_pr, weekly.week))
                    };
                    self.write_summary_row(sheet, weekly.row, &label, volume, None, &mut widths)?;
                }
                PlanRow::BlockTotal(block) => {
                    let label = format!("Block {} Total Volume", block.block);
                    let volume = if self.use_formulas {
                        CellValue::Formula(block_total_formula(&block.weekly_rows))
                    } else {
                        CellValue::Number(layout.block_volume(exercise.max_pr, block))
                    };
                    self.write_summary_row(
                        sheet,
                        block.row,
                        &label,
                        volume,
                        Some(&formats.block_total),
                        &mut widths,
                    )?;
                }
                PlanRow::Spacer { row } => {
                    for col in 0..COLUMNS {
                        self.write_text(sheet, *row, col, "", None, &mut widths)?;
                    }
                }
            }
        }

        if self.hide_factor_column {
            sheet.set_column_hidden(COL_FACTOR).ok();
        }
        widths.apply(sheet);
        sheet.set_freeze_panes(1, 0).ok();

        Ok(())
    }

    /// Write one training day row
    fn write_day_row(
        &self,
        sheet: &mut Worksheet,
        exercise: &Exercise,
        settings_cell: &str,
        day: &repsheet_core::DayRow,
        widths: &mut ColumnWidths,
    ) -> Result<(), RenderError> {
        let session = &day.session;

        self.write_number(sheet, day.row, COL_WEEK, f64::from(day.week), widths)?;
        self.write_text(sheet, day.row, COL_DAY, &format!("Day {}", day.day), None, widths)?;
        self.write_text(sheet, day.row, COL_SESSION, session.kind.label(), None, widths)?;
        self.write_number(sheet, day.row, COL_SETS, f64::from(session.sets), widths)?;
        self.write_number(sheet, day.row, COL_FACTOR, day.factor, widths)?;

        if session.kind.is_test() {
            // Test day: a prompt instead of a target, and no volume
            self.write_text(sheet, day.row, COL_REPS, "Test", None, widths)?;
            self.write_text(sheet, day.row, COL_VOLUME, "", None, widths)?;
        } else if self.use_formulas {
            self.write_formula(
                sheet,
                day.row,
                COL_REPS,
                &reps_formula(settings_cell, day.row, session.deload),
                widths,
            )?;
            self.write_formula(sheet, day.row, COL_VOLUME, &volume_formula(day.row), widths)?;
        } else {
            let reps = session.target_reps(exercise.max_pr, day.factor);
            let volume = session.volume(exercise.max_pr, day.factor);
            self.write_number(sheet, day.row, COL_REPS, reps as f64, widths)?;
            self.write_number(sheet, day.row, COL_VOLUME, volume as f64, widths)?;
        }

        Ok(())
    }

    /// Write a weekly or block total row: label in column A, total volume
    /// in column G, everything else blank.
    fn write_summary_row(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        label: &str,
        volume: CellValue,
        format: Option<&Format>,
        widths: &mut ColumnWidths,
    ) -> Result<(), RenderError> {
        self.write_text(sheet, row, COL_WEEK, label, format, widths)?;
        for col in COL_DAY..COL_VOLUME {
            self.write_text(sheet, row, col, "", format, widths)?;
        }
        match volume {
            CellValue::Formula(formula) => {
                widths.note(COL_VOLUME, &formula);
                let sheet_row = row - 1;
                match format {
                    Some(f) => sheet
                        .write_formula_with_format(sheet_row, COL_VOLUME, formula.as_str(), f)
                        .map_err(|e| RenderError::Format(e.to_string()))?,
                    None => sheet
                        .write_formula(sheet_row, COL_VOLUME, formula.as_str())
                        .map_err(|e| RenderError::Format(e.to_string()))?,
                };
            }
            CellValue::Number(n) => {
                widths.note(COL_VOLUME, &n.to_string());
                let sheet_row = row - 1;
                match format {
                    Some(f) => sheet
                        .write_with_format(sheet_row, COL_VOLUME, n as f64, f)
                        .map_err(|e| RenderError::Format(e.to_string()))?,
                    None => sheet
                        .write(sheet_row, COL_VOLUME, n as f64)
                        .map_err(|e| RenderError::Format(e.to_string()))?,
                };
            }
        }
        Ok(())
    }

    fn write_text(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &str,
        format: Option<&Format>,
        widths: &mut ColumnWidths,
    ) -> Result<(), RenderError> {
        widths.note(col, value);
        let sheet_row = row - 1;
        match format {
            Some(f) => sheet
                .write_with_format(sheet_row, col, value, f)
                .map_err(|e| RenderError::Format(e.to_string()))?,
            None => sheet
                .write(sheet_row, col, value)
                .map_err(|e| RenderError::Format(e.to_string()))?,
        };
        Ok(())
    }

    fn write_number(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: f64,
        widths: &mut ColumnWidths,
    ) -> Result<(), RenderError> {
        widths.note(col, &value.to_string());
        sheet
            .write(row - 1, col, value)
            .map_err(|e| RenderError::Format(e.to_string()))?;
        Ok(())
    }

    fn write_formula(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        col: u16,
        formula: &str,
        widths: &mut ColumnWidths,
    ) -> Result<(), RenderError> {
        widths.note(col, formula);
        sheet
            .write_formula(row - 1, col, formula)
            .map_err(|e| RenderError::Format(e.to_string()))?;
        Ok(())
    }
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, plan: &ProgressionPlan) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(plan)
    }
}

/// A summary cell: formula in formula mode, precomputed number otherwise
enum CellValue {
    Formula(String),
    Number(i64),
}

/// Reusable cell formats
struct ExcelFormats {
    header: Format,
    block_total: Format,
}

impl ExcelFormats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            block_total: Format::new().set_background_color(0xDDDDDD),
        }
    }
}

/// Per-column width tracker.
///
/// Columns are sized to the longest stringified value written to them plus
/// one; formula cells count as their formula text.
struct ColumnWidths([usize; COLUMNS as usize]);

impl ColumnWidths {
    fn new() -> Self {
        Self([0; COLUMNS as usize])
    }

    fn note(&mut self, col: u16, value: &str) {
        let slot = &mut self.0[col as usize];
        *slot = (*slot).max(value.len());
    }

    fn apply(&self, sheet: &mut Worksheet) {
        for (col, max_len) in self.0.iter().enumerate() {
            sheet.set_column_width(col as u16, (max_len + 1) as f64).ok();
        }
    }
}

/// Absolute Settings reference for exercise `index`: `$C$2`, `$C$4`, ...
fn settings_ref(index: usize) -> String {
    format!("$C${}", 2 * index + 2)
}

/// Reps-per-set formula for one day row.
///
/// `=INT('Settings'!$C$2*E{row})`, with the floored deload term added or
/// subtracted inside the outer `INT` when the adjustment is non-zero.
fn reps_formula(settings_cell: &str, row: u32, deload: f64) -> String {
    let mut formula = format!("=INT('Settings'!{settings_cell}*E{row}");
    if deload > 0.0 {
        formula.push_str(&format!(" + INT('Settings'!{settings_cell}*{deload})"));
    } else if deload < 0.0 {
        formula.push_str(&format!(
            " - INT('Settings'!{settings_cell}*{})",
            deload.abs()
        ));
    }
    formula.push(')');
    formula
}

/// Volume formula: sets times reps per set
fn volume_formula(row: u32) -> String {
    format!("=D{row}*F{row}")
}

/// Weekly total: sum over the week's contiguous day rows
fn weekly_total_formula(first_day_row: u32, last_day_row: u32) -> String {
    format!("=SUM(G{first_day_row}:G{last_day_row})")
}

/// Block total: sum over the block's weekly-total cells
fn block_total_formula(weekly_rows: &[u32]) -> String {
    let refs: Vec<String> = weekly_rows.iter().map(|r| format!("G{r}")).collect();
    format!("=SUM({})", refs.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn settings_refs_follow_exercise_order() {
        assert_eq!(settings_ref(0), "$C$2");
        assert_eq!(settings_ref(1), "$C$4");
        assert_eq!(settings_ref(2), "$C$6");
    }

    #[test]
    fn reps_formula_without_deload() {
        assert_eq!(
            reps_formula("$C$2", 2, 0.0),
            "=INT('Settings'!$C$2*E2)"
        );
    }

    #[test]
    fn reps_formula_with_deload() {
        assert_eq!(
            reps_formula("$C$2", 3, -0.2),
            "=INT('Settings'!$C$2*E3 - INT('Settings'!$C$2*0.2))"
        );
        assert_eq!(
            reps_formula("$C$4", 63, -0.3),
            "=INT('Settings'!$C$4*E63 - INT('Settings'!$C$4*0.3))"
        );
    }

    #[test]
    fn reps_formula_with_positive_adjustment() {
        assert_eq!(
            reps_formula("$C$2", 5, 0.1),
            "=INT('Settings'!$C$2*E5 + INT('Settings'!$C$2*0.1))"
        );
    }

    #[test]
    fn volume_formula_multiplies_sets_by_reps() {
        assert_eq!(volume_formula(5), "=D5*F5");
    }

    #[test]
    fn weekly_total_spans_the_day_rows() {
        assert_eq!(weekly_total_formula(2, 5), "=SUM(G2:G5)");
    }

    #[test]
    fn block_total_references_the_weekly_cells() {
        assert_eq!(
            block_total_formula(&[6, 11, 16, 21]),
            "=SUM(G6,G11,G16,G21)"
        );
    }

    #[test]
    fn first_day_row_formula_uses_the_pull_up_setting() {
        // End-to-end shape of the first data row: row 2, factor 0.55,
        // Standard session with no deload term
        let layout = PlanLayout::build();
        let first = layout.day_rows().next().unwrap();
        assert_eq!(first.row, 2);
        assert_eq!(first.factor, 0.55);
        assert_eq!(
            reps_formula(&settings_ref(0), first.row, first.session.deload),
            "=INT('Settings'!$C$2*E2)"
        );
    }

    #[test]
    fn column_widths_track_longest_value() {
        let mut widths = ColumnWidths::new();
        widths.note(0, "Week");
        widths.note(0, "Week 12 Total Volume");
        widths.note(0, "1");
        assert_eq!(widths.0[0], "Week 12 Total Volume".len());
    }
}
