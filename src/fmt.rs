/// Render a float the way a spreadsheet shows it: integral values without a
/// decimal part, everything else in shortest round-trip form.
pub fn number(val: f64) -> String {
    if val.is_finite() && val.fract() == 0.0 && val.abs() < 1e15 {
        format!("{}", val as i64)
    } else {
        format!("{val}")
    }
}

/// Floor area with two decimals, e.g. `54.20`.
pub fn area(val: f64) -> String {
    format!("{val:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(1990.0), "1990");
        assert_eq!(number(-12.0), "-12");
        assert_eq!(number(12.5), "12.5");
        assert_eq!(number(0.1), "0.1");
        assert_eq!(number(0.0), "0");
    }

    #[test]
    fn test_number_non_finite() {
        assert_eq!(number(f64::NAN), "NaN");
        assert_eq!(number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_area_formatting() {
        assert_eq!(area(54.2), "54.20");
        assert_eq!(area(0.0), "0.00");
    }
}
