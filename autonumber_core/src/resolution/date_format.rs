//! Date format strings (invariant culture)
//!
//! Custom patterns are runs of `y M d H h m s f F t`, quoted literals and `\`
//! escapes; every other character is copied through. A single-letter format
//! is a standard pattern (`d`, `D`, `t`, `T`, `s`, `u`, `g`, `G`, `f`, `F`,
//! `M`, `Y`); `%x` forces a single-letter custom pattern.

use chrono::{Datelike, NaiveDateTime, Timelike};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn standard_pattern(specifier: char) -> Option<&'static str> {
    let pattern = match specifier {
        'd' => "MM/dd/yyyy",
        'D' => "dddd, dd MMMM yyyy",
        't' => "HH:mm",
        'T' => "HH:mm:ss",
        'g' => "MM/dd/yyyy HH:mm",
        'G' => "MM/dd/yyyy HH:mm:ss",
        'f' => "dddd, dd MMMM yyyy HH:mm",
        'F' => "dddd, dd MMMM yyyy HH:mm:ss",
        's' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss",
        'u' => "yyyy'-'MM'-'dd HH':'mm':'ss'Z'",
        'M' | 'm' => "MMMM dd",
        'Y' | 'y' => "yyyy MMMM",
        _ => return None,
    };
    Some(pattern)
}

/// Format a date-time with a host format string; empty means general form
pub fn format_datetime(value: &NaiveDateTime, format: &str) -> String {
    if format.is_empty() {
        return render(value, "MM/dd/yyyy HH:mm:ss");
    }

    let mut chars = format.chars();
    if let (Some(single), None) = (chars.next(), chars.next()) {
        if let Some(pattern) = standard_pattern(single) {
            return render(value, pattern);
        }
    }

    match format.strip_prefix('%') {
        Some(custom) if custom.chars().count() == 1 => render(value, custom),
        _ => render(value, format),
    }
}

fn padded(value: u32, width: usize) -> String {
    format!("{:0width$}", value, width = width)
}

fn render(value: &NaiveDateTime, pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut output = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&next| next == c).count();

        match c {
            'y' => {
                let year = value.year().unsigned_abs();
                match run {
                    1 => output.push_str(&(year % 100).to_string()),
                    2 => output.push_str(&padded(year % 100, 2)),
                    _ => output.push_str(&padded(year, run)),
                }
            }
            'M' => match run {
                1 => output.push_str(&value.month().to_string()),
                2 => output.push_str(&padded(value.month(), 2)),
                3 => output.push_str(&MONTHS[value.month0() as usize][..3]),
                _ => output.push_str(MONTHS[value.month0() as usize]),
            },
            'd' => {
                let weekday = DAYS[value.weekday().num_days_from_monday() as usize];
                match run {
                    1 => output.push_str(&value.day().to_string()),
                    2 => output.push_str(&padded(value.day(), 2)),
                    3 => output.push_str(&weekday[..3]),
                    _ => output.push_str(weekday),
                }
            }
            'H' => output.push_str(&padded(value.hour(), run.min(2))),
            'h' => {
                let hour = match value.hour() % 12 {
                    0 => 12,
                    hour => hour,
                };
                output.push_str(&padded(hour, run.min(2)));
            }
            'm' => output.push_str(&padded(value.minute(), run.min(2))),
            's' => output.push_str(&padded(value.second(), run.min(2))),
            'f' | 'F' => {
                let digits = run.min(7);
                let fraction = format!("{:09}", value.nanosecond() % 1_000_000_000);
                let mut text = fraction[..digits].to_string();
                if c == 'F' {
                    while text.ends_with('0') {
                        text.pop();
                    }
                }
                output.push_str(&text);
            }
            't' => {
                let designator = if value.hour() < 12 { "AM" } else { "PM" };
                if run == 1 {
                    output.push_str(&designator[..1]);
                } else {
                    output.push_str(designator);
                }
            }
            '\'' | '"' => {
                let literal: String = chars[i + 1..].iter().take_while(|&&q| q != c).collect();
                // Skip the literal and both quotes
                i += literal.chars().count() + 2;
                output.push_str(&literal);
                continue;
            }
            '\\' => {
                if let Some(escaped) = chars.get(i + 1) {
                    output.push(*escaped);
                }
                i += 2;
                continue;
            }
            other => {
                output.push(other);
                i += 1;
                continue;
            }
        }

        i += run;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 3, 9)
            .unwrap()
            .and_hms_milli_opt(14, 5, 7, 120)
            .unwrap()
    }

    #[test]
    fn test_year_month_day_tokens() {
        let date = sample();
        assert_eq!(format_datetime(&date, "yyyy"), "2015");
        assert_eq!(format_datetime(&date, "yy"), "15");
        assert_eq!(format_datetime(&date, "yyyyMMdd"), "20150309");
        assert_eq!(format_datetime(&date, "MMM"), "Mar");
        assert_eq!(format_datetime(&date, "MMMM"), "March");
        assert_eq!(format_datetime(&date, "ddd"), "Mon");
        assert_eq!(format_datetime(&date, "dddd"), "Monday");
        assert_eq!(format_datetime(&date, "%d"), "9");
        assert_eq!(format_datetime(&date, "%M"), "3");
    }

    #[test]
    fn test_time_tokens() {
        let date = sample();
        assert_eq!(format_datetime(&date, "HH:mm:ss"), "14:05:07");
        assert_eq!(format_datetime(&date, "hh tt"), "02 PM");
        assert_eq!(format_datetime(&date, "h t"), "2 P");
        assert_eq!(format_datetime(&date, "ss.fff"), "07.120");
        assert_eq!(format_datetime(&date, "ss.FFF"), "07.12");
    }

    #[test]
    fn test_standard_patterns() {
        let date = sample();
        assert_eq!(format_datetime(&date, "d"), "03/09/2015");
        assert_eq!(format_datetime(&date, "D"), "Monday, 09 March 2015");
        assert_eq!(format_datetime(&date, "t"), "14:05");
        assert_eq!(format_datetime(&date, "s"), "2015-03-09T14:05:07");
        assert_eq!(format_datetime(&date, "u"), "2015-03-09 14:05:07Z");
        assert_eq!(format_datetime(&date, "G"), "03/09/2015 14:05:07");
        assert_eq!(format_datetime(&date, ""), "03/09/2015 14:05:07");
    }

    #[test]
    fn test_literals() {
        let date = sample();
        assert_eq!(format_datetime(&date, "'Q'yyyy"), "Q2015");
        assert_eq!(format_datetime(&date, "\\d\\a\\y d"), "day 9");
        assert_eq!(format_datetime(&date, "yyyy-MM"), "2015-03");
    }
}
