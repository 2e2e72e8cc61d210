use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    EnumString,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealPlanType {
    Daily,
    Weekly,
}

/// Inclusive span of days a shopping list is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_single_day() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} - {}", self.start, self.end)
        }
    }
}

impl MealPlanType {
    /// Daily plans cover their own date. Weekly plans cover the Sunday to
    /// Saturday week containing it.
    pub fn date_range(&self, date: NaiveDate) -> DateRange {
        match self {
            MealPlanType::Daily => DateRange {
                start: date,
                end: date,
            },
            MealPlanType::Weekly => {
                let offset = Days::new(date.weekday().num_days_from_sunday().into());
                let start = date.checked_sub_days(offset).unwrap_or(NaiveDate::MIN);
                let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);

                DateRange { start, end }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_range_is_the_date() {
        let range = MealPlanType::Daily.date_range(date(2024, 1, 17));
        assert_eq!(range.start, date(2024, 1, 17));
        assert_eq!(range.end, date(2024, 1, 17));
        assert_eq!(range.to_string(), "2024-01-17");
    }

    #[test]
    fn test_weekly_range_starts_on_sunday() {
        let range = MealPlanType::Weekly.date_range(date(2024, 1, 17));
        assert_eq!(range.start, date(2024, 1, 14));
        assert_eq!(range.end, date(2024, 1, 20));
        assert_eq!(range.to_string(), "2024-01-14 - 2024-01-20");

        let sunday = MealPlanType::Weekly.date_range(date(2024, 1, 14));
        assert_eq!(sunday, range);

        let saturday = MealPlanType::Weekly.date_range(date(2024, 1, 20));
        assert_eq!(saturday, range);
    }

    #[test]
    fn test_weekly_range_crosses_month_and_year() {
        let range = MealPlanType::Weekly.date_range(date(2024, 1, 2));
        assert_eq!(range.start, date(2023, 12, 31));
        assert_eq!(range.end, date(2024, 1, 6));

        let range = MealPlanType::Weekly.date_range(date(2024, 2, 29));
        assert_eq!(range.start, date(2024, 2, 25));
        assert_eq!(range.end, date(2024, 3, 2));
    }

    #[test]
    fn test_plan_type_wire_format() {
        assert_eq!(MealPlanType::Daily.to_string(), "DAILY");
        assert_eq!("WEEKLY".parse::<MealPlanType>().unwrap(), MealPlanType::Weekly);
    }
}
