/// Rounds to the nearest integer with halves toward positive infinity.
///
/// `x + 0.5` is not exact for values just below a half, so the tie is
/// detected on the result of `f64::round` instead.
fn round_half_up(x: f64) -> f64 {
    let rounded = x.round();
    if x - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}

/// Converts one normalized channel to its hex digits.
///
/// Halves round up (`0.5 * 255 = 127.5 -> 80`). Values outside `[0, 1]` are
/// not clamped and yield out-of-range digits such as `100` or `-1`.
fn channel_to_hex(channel: f64) -> String {
    let value = round_half_up(channel * 255.0) as i64;
    let digits = if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{:x}", value)
    };
    format!("{:0>2}", digits)
}

/// Figma returns colors as normalized RGB; tokens use `#rrggbb`.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    format!(
        "#{}{}{}",
        channel_to_hex(r),
        channel_to_hex(g),
        channel_to_hex(b)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex_color(s: &str) -> bool {
        s.len() == 7
            && s.starts_with('#')
            && s[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn primary_colors() {
        assert_eq!(rgb_to_hex(1.0, 0.0, 0.0), "#ff0000");
        assert_eq!(rgb_to_hex(0.0, 0.0, 0.0), "#000000");
        assert_eq!(rgb_to_hex(1.0, 1.0, 1.0), "#ffffff");
    }

    #[test]
    fn half_rounds_up() {
        assert_eq!(rgb_to_hex(0.5, 0.5, 0.5), "#808080");
    }

    #[test]
    fn round_half_up_ties_and_near_ties() {
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(127.5), 128.0);
        assert_eq!(round_half_up(2.4), 2.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }

    #[test]
    fn small_values_are_zero_padded() {
        assert_eq!(rgb_to_hex(1.0 / 255.0, 0.0, 15.0 / 255.0), "#01000f");
    }

    #[test]
    fn normalized_inputs_stay_in_range_and_round_trip() {
        let steps = [0.0, 0.001, 0.1, 0.25, 0.333, 0.5, 0.666, 0.75, 0.9, 0.999, 1.0];
        for &r in &steps {
            for &g in &steps {
                let b = 1.0 - r;
                let hex = rgb_to_hex(r, g, b);
                assert!(is_hex_color(&hex), "{} is not a hex color", hex);

                for (i, input) in [r, g, b].iter().enumerate() {
                    let start = 1 + i * 2;
                    let parsed = u8::from_str_radix(&hex[start..start + 2], 16).unwrap();
                    let back = parsed as f64 / 255.0;
                    assert!(
                        (back - input).abs() <= 1.0 / 255.0,
                        "{} does not round trip through {}",
                        input,
                        hex
                    );
                }
            }
        }
    }

    #[test]
    fn out_of_range_is_not_clamped() {
        assert_eq!(rgb_to_hex(2.0, 0.0, 0.0), "#1fe0000");
        assert_eq!(channel_to_hex(-1.0 / 255.0), "-1");
    }
}
