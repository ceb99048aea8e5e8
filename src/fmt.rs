/// Format a whole-đồng amount the vi-VN way: 1.234.567 ₫
pub fn money(val: f64) -> String {
    let negative = val < 0.0 && val.round() != 0.0;
    let whole = format!("{:.0}", val.abs());

    let mut with_dots = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_dots.push('.');
        }
        with_dots.push(c);
    }
    let with_dots: String = with_dots.chars().rev().collect();

    if negative {
        format!("-{with_dots} \u{20AB}")
    } else {
        format!("{with_dots} \u{20AB}")
    }
}

/// `YYYY-MM-DD` to `DD/MM/YYYY`; anything unparseable is returned as is.
pub fn date(iso: &str) -> String {
    chrono::NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

pub fn percent(val: f64) -> String {
    format!("{val:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234567.0), "1.234.567 \u{20AB}");
        assert_eq!(money(-50000.0), "-50.000 \u{20AB}");
        assert_eq!(money(0.0), "0 \u{20AB}");
        assert_eq!(money(999.0), "999 \u{20AB}");
        assert_eq!(money(35000.4), "35.000 \u{20AB}");
    }

    #[test]
    fn test_date_formatting() {
        assert_eq!(date("2025-03-09"), "09/03/2025");
        assert_eq!(date("yesterday"), "yesterday");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(12.345), "12.3%");
    }
}
