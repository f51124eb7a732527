//! Business-day calendar logic for the payer rotation.
//!
//! A business day is any Monday through Friday. The rotation walks business
//! days starting at a fixed anchor date; this module answers how far a
//! reference date is from the anchor in business-day steps and which calendar
//! date a given step lands on. Day and month names are produced in the group's
//! locale (pt-BR) so they match what the queue displays.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::errors::QueueError;

/// Whether `date` falls on Monday..Friday
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Ordered iterator over the business days of an inclusive date range
#[derive(Debug, Clone)]
pub struct BusinessDays {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl BusinessDays {
    /// Business days in `[start, end]`; empty when `end < start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: Some(start),
            end,
        }
    }
}

impl Iterator for BusinessDays {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while let Some(date) = self.next {
            if date > self.end {
                self.next = None;
                return None;
            }
            self.next = date.succ_opt();
            if is_business_day(date) {
                return Some(date);
            }
        }
        None
    }
}

/// Business days between `anchor` and `reference`, both inclusive.
///
/// Fails with `InvalidRange` when the reference precedes the anchor.
pub fn business_days(anchor: NaiveDate, reference: NaiveDate) -> Result<BusinessDays, QueueError> {
    ensure_range(anchor, reference)?;
    Ok(BusinessDays::new(anchor, reference))
}

/// Number of business days in `[anchor, reference]`
pub fn count_business_days(anchor: NaiveDate, reference: NaiveDate) -> Result<u64, QueueError> {
    ensure_range(anchor, reference)?;

    let span = (reference - anchor).num_days() as u64 + 1;
    let full_weeks = span / 7;
    // Leftover days share their weekdays with the first days of the range
    let leftover = (0..span % 7)
        .filter_map(|offset| anchor.checked_add_days(Days::new(offset)))
        .filter(|date| is_business_day(*date))
        .count() as u64;

    Ok(full_weeks * 5 + leftover)
}

/// Zero-based index of the last business day in `[anchor, reference]`.
///
/// This is the number of business-day steps walked from the first business
/// day on or after the anchor up to the reference. Returns `None` when the
/// range contains no business day at all.
pub fn business_day_count(
    anchor: NaiveDate,
    reference: NaiveDate,
) -> Result<Option<u64>, QueueError> {
    let total = count_business_days(anchor, reference)?;
    Ok(total.checked_sub(1))
}

/// First business day on or after `date`
pub fn next_business_day_on_or_after(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.checked_add_days(Days::new(2)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => Some(date),
    }
}

/// The `index`-th (zero-based) business day on or after `anchor`
pub fn nth_business_day(anchor: NaiveDate, index: u64) -> Option<NaiveDate> {
    let first = next_business_day_on_or_after(anchor)?;

    // Seven calendar days always hold exactly five business days
    let mut date = first.checked_add_days(Days::new(index / 5 * 7))?;
    for _ in 0..index % 5 {
        date = next_business_day_on_or_after(date.succ_opt()?)?;
    }
    Some(date)
}

/// Day name in the group's locale
pub fn locale_day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Month name in the group's locale
pub fn locale_month_name(month: u32) -> &'static str {
    match month {
        1 => "janeiro",
        2 => "fevereiro",
        3 => "março",
        4 => "abril",
        5 => "maio",
        6 => "junho",
        7 => "julho",
        8 => "agosto",
        9 => "setembro",
        10 => "outubro",
        11 => "novembro",
        12 => "dezembro",
        _ => "mês inválido",
    }
}

/// Format a date for display, e.g. "segunda-feira, 02 de outubro"
pub fn format_date_long(date: NaiveDate) -> String {
    format!(
        "{}, {:02} de {}",
        locale_day_name(date.weekday()),
        date.day(),
        locale_month_name(date.month())
    )
}

fn ensure_range(anchor: NaiveDate, reference: NaiveDate) -> Result<(), QueueError> {
    if reference < anchor {
        return Err(QueueError::InvalidRange { anchor, reference });
    }
    Ok(())
}
