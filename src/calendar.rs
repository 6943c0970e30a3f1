use chrono::{Datelike, Duration as ChronoDuration, Months, NaiveDate};

/// 6 weeks x 7 days, the fixed month-view shape.
pub const GRID_LEN: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
}

/// Computes the 42-cell display grid for the month containing `reference`:
/// starts on the most recent Sunday at or before the first of the month and
/// runs 6 contiguous weeks, spilling into the adjacent months as needed.
pub fn month_grid(reference: NaiveDate) -> Vec<GridCell> {
    let month_start =
        NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1).unwrap_or(reference);
    let back = month_start.weekday().num_days_from_sunday() as i64;
    let grid_start = month_start - ChronoDuration::days(back);
    (0..GRID_LEN as i64)
        .filter_map(|offset| grid_start.checked_add_signed(ChronoDuration::days(offset)))
        .map(|date| GridCell {
            date,
            in_current_month: date.year() == reference.year()
                && date.month() == reference.month(),
            day_of_week: date.weekday().num_days_from_sunday() as u8,
        })
        .collect()
}

/// Holds the currently selected date and the date-picker overlay flag.
#[derive(Debug, Clone, Copy)]
pub struct Navigator {
    selected: NaiveDate,
    picker_open: bool,
}

impl Navigator {
    pub fn new(start: NaiveDate) -> Self {
        Navigator {
            selected: start,
            picker_open: false,
        }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    /// Shifts by one month, clamping the day-of-month to the target month's
    /// last valid day (Jan 31 -> Feb 28/29).
    pub fn next_month(&mut self) {
        if let Some(date) = self.selected.checked_add_months(Months::new(1)) {
            self.selected = date;
        }
    }

    pub fn previous_month(&mut self) {
        if let Some(date) = self.selected.checked_sub_months(Months::new(1)) {
            self.selected = date;
        }
    }

    pub fn open_picker(&mut self) {
        self.picker_open = true;
    }

    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    pub fn confirm_picker(&mut self, date: NaiveDate) {
        self.select_date(date);
        self.close_picker();
    }
}
