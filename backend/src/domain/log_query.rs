//! Filters applied when reading a user's exercise log.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};

use super::{DateInput, DateParseError, Exercise};

/// Date window and size cap for an exercise log read.
///
/// Bounds are inclusive. A calendar-day `to` covers the whole day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExerciseLogFilter {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    limit: Option<NonZeroU32>,
}

impl ExerciseLogFilter {
    /// Build a filter from resolved bounds.
    pub fn new(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        limit: Option<NonZeroU32>,
    ) -> Self {
        Self { from, to, limit }
    }

    /// Build a filter from raw query-string values.
    ///
    /// Blank dates are ignored. Limits follow [`parse_limit`].
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::ExerciseLogFilter;
    ///
    /// let filter = ExerciseLogFilter::from_params(Some("2023-01-01"), Some(""), Some("2"))
    ///     .expect("valid filter");
    /// assert!(filter.from().is_some());
    /// assert!(filter.to().is_none());
    /// assert_eq!(filter.limit().map(|limit| limit.get()), Some(2));
    /// ```
    pub fn from_params(
        from: Option<&str>,
        to: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, DateParseError> {
        let from = parse_bound(from)?.map(|input| input.start());
        let to = parse_bound(to)?.map(|input| input.end_inclusive());
        Ok(Self::new(from, to, limit.and_then(parse_limit)))
    }

    /// Earliest date included.
    pub fn from(&self) -> Option<DateTime<Utc>> {
        self.from
    }

    /// Latest date included.
    pub fn to(&self) -> Option<DateTime<Utc>> {
        self.to
    }

    /// Maximum number of entries to return.
    pub fn limit(&self) -> Option<NonZeroU32> {
        self.limit
    }

    /// Whether the exercise date falls inside the window.
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let date = exercise.date();
        self.from.is_none_or(|from| *date >= from) && self.to.is_none_or(|to| *date <= to)
    }

    /// Apply the window and limit to exercises already in storage order.
    pub fn apply<I>(&self, exercises: I) -> Vec<Exercise>
    where
        I: IntoIterator<Item = Exercise>,
    {
        let cap = self
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit.get()).unwrap_or(usize::MAX));
        exercises
            .into_iter()
            .filter(|exercise| self.matches(exercise))
            .take(cap)
            .collect()
    }
}

fn parse_bound(raw: Option<&str>) -> Result<Option<DateInput>, DateParseError> {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => DateInput::parse(text).map(Some),
        _ => Ok(None),
    }
}

/// Read a log limit the lenient way browsers' query forms expect.
///
/// Leading whitespace and an optional sign are accepted, then digits up to
/// the first non-digit. Anything that does not yield a positive count means
/// "no limit".
///
/// # Examples
/// ```
/// use exercise_tracker::domain::parse_limit;
///
/// assert_eq!(parse_limit("3").map(|limit| limit.get()), Some(3));
/// assert_eq!(parse_limit("5abc").map(|limit| limit.get()), Some(5));
/// assert!(parse_limit("0").is_none());
/// assert!(parse_limit("ten").is_none());
/// ```
pub fn parse_limit(raw: &str) -> Option<NonZeroU32> {
    let text = raw.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if negative || digits.is_empty() {
        return None;
    }
    digits.parse::<u32>().ok().and_then(NonZeroU32::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Description, ExerciseDuration, ExerciseId, UserId};
    use chrono::TimeZone;
    use rstest::rstest;

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn exercise_on(date: DateTime<Utc>) -> Exercise {
        Exercise::new(
            ExerciseId::random(),
            UserId::random(),
            Description::new("walk").expect("description"),
            ExerciseDuration::new(10.0).expect("duration"),
            date,
        )
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case("  12", Some(12))]
    #[case("+4", Some(4))]
    #[case("7days", Some(7))]
    #[case("0", None)]
    #[case("-2", None)]
    #[case("", None)]
    #[case("abc", None)]
    #[case("99999999999", None)]
    fn parse_limit_reads_leading_digits(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_limit(raw).map(NonZeroU32::get), expected);
    }

    #[rstest]
    fn from_params_treats_blank_bounds_as_absent() {
        let filter = ExerciseLogFilter::from_params(Some(" "), None, None).expect("filter");
        assert_eq!(filter, ExerciseLogFilter::default());
    }

    #[rstest]
    fn from_params_rejects_unparseable_bounds() {
        let err = ExerciseLogFilter::from_params(None, Some("soon"), None).expect_err("bad date");
        assert_eq!(err.value(), "soon");
    }

    #[rstest]
    fn calendar_day_to_includes_the_whole_day() {
        let filter =
            ExerciseLogFilter::from_params(Some("2023-05-10"), Some("2023-05-10"), None)
                .expect("filter");

        assert!(filter.matches(&exercise_on(utc(2023, 5, 10, 0))));
        assert!(filter.matches(&exercise_on(utc(2023, 5, 10, 18))));
        assert!(!filter.matches(&exercise_on(utc(2023, 5, 9, 23))));
        assert!(!filter.matches(&exercise_on(utc(2023, 5, 11, 0))));
    }

    #[rstest]
    fn apply_filters_then_limits_in_order() {
        let dates = [
            utc(2023, 1, 1, 0),
            utc(2023, 2, 1, 0),
            utc(2023, 3, 1, 0),
            utc(2023, 4, 1, 0),
        ];
        let exercises: Vec<Exercise> = dates.into_iter().map(exercise_on).collect();
        let filter = ExerciseLogFilter::new(Some(utc(2023, 2, 1, 0)), None, NonZeroU32::new(2));

        let selected = filter.apply(exercises);

        let selected_dates: Vec<_> = selected.iter().map(|exercise| *exercise.date()).collect();
        assert_eq!(selected_dates, vec![dates[1], dates[2]]);
    }
}
