/// Formats a tracker readout as `"{short_title} : {value}{unit}"`.
///
/// The value is truncated toward zero; non-finite values render as `-`.
#[must_use]
pub fn format_readout(short_title: &str, value: f64, unit: &str) -> String {
    if !value.is_finite() {
        return format!("{short_title} : -{unit}");
    }
    let whole = value.trunc() as i64;
    format!("{short_title} : {whole}{unit}")
}

#[cfg(test)]
mod tests {
    use super::format_readout;

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(format_readout("Alt", 796.9, "m"), "Alt : 796m");
        assert_eq!(format_readout("Alt", -3.7, "m"), "Alt : -3m");
    }

    #[test]
    fn non_finite_values_render_placeholder() {
        assert_eq!(format_readout("Dist", f64::NAN, "km"), "Dist : -km");
    }
}
