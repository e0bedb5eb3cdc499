use std::time::Duration;

use crate::{FlagError, FlagResult};

/// Parse a duration flag value.
///
/// Accepts a bare number of seconds (`30`) or a sequence of `<number><unit>` parts with units
/// `ms`, `s`, `m`, `h` (`250ms`, `1m30s`, `1.5h`). Used as a clap value parser.
pub fn parse_duration(s: &str) -> FlagResult<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(invalid("empty duration".to_string()));
    }
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = s;

    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_len == 0 {
            return Err(invalid(format!("{s:?}: expected a number")));
        }
        let (num, tail) = rest.split_at(num_len);
        let value: f64 = num
            .parse()
            .map_err(|_| invalid(format!("invalid number {num:?} in {s:?}")))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);

        let secs = match unit {
            "ms" => value / 1000.0,
            "s" => value,
            "m" => value * 60.0,
            "h" => value * 3600.0,
            "" => return Err(invalid(format!("missing unit in {s:?}"))),
            other => {
                return Err(invalid(format!(
                    "unknown unit {other:?} in {s:?}. Use ms, s, m or h."
                )));
            }
        };

        let part = Duration::try_from_secs_f64(secs)
            .map_err(|e| invalid(format!("{s:?} out of range: {e}")))?;
        total = total
            .checked_add(part)
            .ok_or_else(|| invalid(format!("{s:?} out of range")))?;
        rest = next;
    }

    Ok(total)
}

fn invalid(reason: String) -> FlagError {
    FlagError::InvalidDuration(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_is_seconds() {
        assert_eq!(parse_duration("30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn single_units() {
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
    }

    #[test]
    fn compound_and_fractional() {
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("1h2m3s").unwrap(), Duration::from_secs(3723));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "  ", "s", "5x", "5 s", "-5s", "1.2.3s", "10d"] {
            assert!(parse_duration(bad).is_err(), "expected error for {bad:?}");
        }
    }

    #[test]
    fn error_names_the_input() {
        let err = parse_duration("10d").unwrap_err();
        assert!(matches!(err, FlagError::InvalidDuration(ref r) if r.contains("10d")));
    }
}
