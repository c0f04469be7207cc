//! Row layout for a progression sheet.
//!
//! Every output backend writes the same sequence of rows: four day rows per
//! week, a weekly total, and after each block a block total plus a blank
//! spacer. Row indices are assigned strictly sequentially here, and the
//! formulas a backend emits must reference these exact indices, so the
//! layout is computed once in this module instead of inline in each
//! renderer.
//!
//! ```rust
//! use repsheet_core::PlanLayout;
//!
//! let layout = PlanLayout::build();
//! assert_eq!(layout.day_rows().count(), 48);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    sessions_for_week, week_factor, Session, BLOCK_WEEKS, FIRST_DATA_ROW, WEEKS,
};

/// One training day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayRow {
    /// 1-indexed workbook row
    pub row: u32,
    pub week: u32,
    /// Day number within the week, 1..=4
    pub day: u32,
    pub session: Session,
    pub factor: f64,
}

/// Total-volume row for one week
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTotalRow {
    /// 1-indexed workbook row
    pub row: u32,
    pub week: u32,
    /// First day row of the week (inclusive)
    pub first_day_row: u32,
    /// Last day row of the week (inclusive)
    pub last_day_row: u32,
}

/// Total-volume row for one 4-week block
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTotalRow {
    /// 1-indexed workbook row
    pub row: u32,
    pub block: u32,
    /// Rows of the weekly totals belonging to this block
    pub weekly_rows: Vec<u32>,
}

/// One emitted sheet row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlanRow {
    Day(DayRow),
    WeeklyTotal(WeeklyTotalRow),
    BlockTotal(BlockTotalRow),
    /// Blank separator after a block total
    Spacer { row: u32 },
}

impl PlanRow {
    /// The 1-indexed workbook row this entry occupies
    pub fn row(&self) -> u32 {
        match self {
            Self::Day(d) => d.row,
            Self::WeeklyTotal(w) => w.row,
            Self::BlockTotal(b) => b.row,
            Self::Spacer { row } => *row,
        }
    }
}

/// The full row sequence of a progression sheet.
///
/// The layout is identical for every exercise; only the settings cell the
/// formulas point at differs between sheets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanLayout {
    pub rows: Vec<PlanRow>,
}

impl PlanLayout {
    /// Assign rows for all 12 weeks, starting below the header row.
    pub fn build() -> Self {
        let mut rows = Vec::new();
        let mut row = FIRST_DATA_ROW;
        let mut block_weekly_rows = Vec::new();
        let mut block = 1;

        for week in 1..=WEEKS {
            let factor = week_factor(week).unwrap_or(1.0);
            let week_start = row;

            for (i, session) in sessions_for_week(week).iter().enumerate() {
                rows.push(PlanRow::Day(DayRow {
                    row,
                    week,
                    day: i as u32 + 1,
                    session: *session,
                    factor,
                }));
                row += 1;
            }

            rows.push(PlanRow::WeeklyTotal(WeeklyTotalRow {
                row,
                week,
                first_day_row: week_start,
                last_day_row: row - 1,
            }));
            block_weekly_rows.push(row);
            row += 1;

            if week % BLOCK_WEEKS == 0 || week == WEEKS {
                rows.push(PlanRow::BlockTotal(BlockTotalRow {
                    row,
                    block,
                    weekly_rows: std::mem::take(&mut block_weekly_rows),
                }));
                row += 1;
                rows.push(PlanRow::Spacer { row });
                row += 1;
                block += 1;
            }
        }

        Self { rows }
    }

    /// All training day rows in sheet order
    pub fn day_rows(&self) -> impl Iterator<Item = &DayRow> {
        self.rows.iter().filter_map(|r| match r {
            PlanRow::Day(d) => Some(d),
            _ => None,
        })
    }

    /// All weekly total rows in sheet order
    pub fn weekly_totals(&self) -> impl Iterator<Item = &WeeklyTotalRow> {
        self.rows.iter().filter_map(|r| match r {
            PlanRow::WeeklyTotal(w) => Some(w),
            _ => None,
        })
    }

    /// All block total rows in sheet order
    pub fn block_totals(&self) -> impl Iterator<Item = &BlockTotalRow> {
        self.rows.iter().filter_map(|r| match r {
            PlanRow::BlockTotal(b) => Some(b),
            _ => None,
        })
    }

    /// The last occupied 1-indexed row
    pub fn last_row(&self) -> u32 {
        self.rows.last().map(PlanRow::row).unwrap_or(FIRST_DATA_ROW)
    }

    /// Total volume of one week evaluated at the given max PR.
    ///
    /// Test days carry no volume and contribute nothing, matching a `SUM`
    /// over a range with an empty cell.
    pub fn week_volume(&self, pr: u32, week: u32) -> i64 {
        self.day_rows()
            .filter(|d| d.week == week && !d.session.kind.is_test())
            .map(|d| d.session.volume(pr, d.factor))
            .sum()
    }

    /// Total volume of one block evaluated at the given max PR
    pub fn block_volume(&self, pr: u32, block: &BlockTotalRow) -> i64 {
        self.weekly_totals()
            .filter(|w| block.weekly_rows.contains(&w.row))
            .map(|w| self.week_volume(pr, w.week))
            .sum()
    }
}
