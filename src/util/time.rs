use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// The current time in the studio's local time zone. Dates written on pieces
/// and reports are the local calendar day, not the UTC one.
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// The DD/MM/YYYY form the studio writes dates in, as a calendar day in
/// `time`'s own zone.
pub fn format_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String
    where Tz::Offset: Display
{
    time.format("%d/%m/%Y").to_string()
}

/// YYYY-MM-DD, for file names.
pub fn format_file_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String
    where Tz::Offset: Display
{
    time.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
pub(crate) fn from_ymd(year: i32, month: u32, day: u32) -> DateTime<chrono::Utc> {
    chrono::Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// A wall-clock time at a fixed offset from UTC, ie `-3` for Brasília.
#[cfg(test)]
pub(crate) fn at_offset(offset_hours: i32, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<chrono::FixedOffset> {
    chrono::FixedOffset::east_opt(offset_hours * 3600).unwrap()
        .with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}
