use chrono::{Datelike, NaiveDate};

use crate::dates::parse_instant;

/// Format a float as whole pesos with `.` thousands separators: $ 1.235
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let whole = format!("{:.0}", val.abs());

    let mut grouped = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if negative && grouped != "0" {
        format!("-$ {grouped}")
    } else {
        format!("$ {grouped}")
    }
}

/// Signed percentage with one decimal: +12.5%
pub fn percent(val: f64) -> String {
    format!("{val:+.1}%")
}

/// `15 Jan 2024`; unparseable input is echoed back unchanged.
pub fn long_date(raw: &str) -> String {
    match parse_instant(raw) {
        Some(dt) => dt.format("%-d %b %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Time since `hire_date` in whole years, else whole months, else `New`.
pub fn seniority(hire_date: &str, today: NaiveDate) -> String {
    let Some(hired) = parse_instant(hire_date).map(|dt| dt.date()) else {
        return "Unknown".to_string();
    };
    let mut months = (today.year() - hired.year()) * 12 + today.month() as i32 - hired.month() as i32;
    if today.day() < hired.day() {
        months -= 1;
    }
    let years = months / 12;
    if years > 0 {
        format!("{years} {}", if years == 1 { "year" } else { "years" })
    } else if months > 0 {
        format!("{months} {}", if months == 1 { "month" } else { "months" })
    } else {
        "New".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "$ 1.235");
        assert_eq!(money(-500.00), "-$ 500");
        assert_eq!(money(0.0), "$ 0");
        assert_eq!(money(1000000.4), "$ 1.000.000");
        assert_eq!(money(45.0), "$ 45");
        assert_eq!(money(-0.2), "$ 0");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(12.345), "+12.3%");
        assert_eq!(percent(-50.0), "-50.0%");
        assert_eq!(percent(0.0), "+0.0%");
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date("2024-01-15"), "15 Jan 2024");
        assert_eq!(long_date("garbage"), "garbage");
    }

    #[test]
    fn test_seniority() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert_eq!(seniority("2020-01-15", today), "4 years");
        assert_eq!(seniority("2022-12-21", today), "1 year");
        assert_eq!(seniority("2023-12-21", today), "New");
        assert_eq!(seniority("2023-10-20", today), "3 months");
        assert_eq!(seniority("2023-12-20", today), "1 month");
        assert_eq!(seniority("soon", today), "Unknown");
    }
}
