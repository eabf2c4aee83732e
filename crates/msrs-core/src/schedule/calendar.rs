//! Grouping scheduled cards by local calendar day and month

use chrono::{Datelike, NaiveDate, TimeZone};
use serde::Serialize;

use super::pipeline::ScheduleRun;

/// Due cards sharing one local calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    /// Indices into `ScheduleRun::cards`, ascending by due instant
    pub cards: Vec<usize>,
}

/// Due cards sharing one local calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    pub cards: Vec<usize>,
}

impl MonthGroup {
    /// `YYYY-MM`
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Schedule grouped for presentation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Calendar {
    pub new_cards: Vec<usize>,
    pub days: Vec<DayGroup>,
    pub months: Vec<MonthGroup>,
}

impl Calendar {
    /// Group a run's due cards by day and month in `tz`, keeping schedule order
    pub fn build<Tz: TimeZone>(run: &ScheduleRun, tz: &Tz) -> Self {
        let mut calendar = Calendar::default();

        for &index in &run.order {
            let Some(due) = run.cards[index].due else {
                calendar.new_cards.push(index);
                continue;
            };
            let date = due.with_timezone(tz).date_naive();

            match calendar.days.last_mut() {
                Some(group) if group.date == date => group.cards.push(index),
                _ => calendar.days.push(DayGroup {
                    date,
                    cards: vec![index],
                }),
            }

            match calendar.months.last_mut() {
                Some(group) if group.year == date.year() && group.month == date.month() => {
                    group.cards.push(index)
                }
                _ => calendar.months.push(MonthGroup {
                    year: date.year(),
                    month: date.month(),
                    cards: vec![index],
                }),
            }
        }

        calendar
    }

    /// Whether `index` is the first due card of its month
    pub fn is_first_of_month(&self, index: usize) -> bool {
        self.months.iter().any(|m| m.cards.first() == Some(&index))
    }
}
