//! Sexagesimal coordinate normalization.
//!
//! Survey sheets record positions as degrees/minutes/seconds strings such
//! as `40°26'46"N 74°00'21"W`. [`normalize`] converts them to signed
//! decimal degrees; anything that does not match the expected shape is
//! returned unchanged rather than treated as an error, because the survey
//! legitimately contains free-form coordinate notes.

use crate::survey::LatLon;

/// Outcome of normalizing a recorded coordinate string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalized<'a> {
    /// The string was a well-formed sexagesimal pair.
    Parsed(LatLon),
    /// The string was not sexagesimal; the original is handed back.
    Unchanged(&'a str),
}

impl<'a> Normalized<'a> {
    pub fn parsed(&self) -> Option<LatLon> {
        match self {
            Normalized::Parsed(value) => Some(*value),
            Normalized::Unchanged(_) => None,
        }
    }
}

/// Convert a `D°M'S"H D°M'S"H` coordinate string to decimal degrees.
///
/// The first token must carry an N/S hemisphere, the second E/W. Decimal
/// value is `D + M/60 + S/3600`, negated for S and W. Any malformation
/// yields [`Normalized::Unchanged`].
pub fn normalize(input: &str) -> Normalized<'_> {
    let mut tokens = input.split_whitespace();
    let (Some(first), Some(second), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Normalized::Unchanged(input);
    };

    let (Some(lat), Some(lon)) = (
        parse_token(first, ['N', 'S']),
        parse_token(second, ['E', 'W']),
    ) else {
        return Normalized::Unchanged(input);
    };

    Normalized::Parsed(LatLon::new(lat, lon))
}

/// Parse one `D°M'S"H` token, returning the signed decimal value.
fn parse_token(token: &str, hemispheres: [char; 2]) -> Option<f64> {
    let (degrees, rest) = token.split_once('°')?;
    let (minutes, rest) = rest.split_once('\'')?;
    let (seconds, hemisphere) = rest.split_once('"')?;

    let degrees: u32 = degrees.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;

    let mut hemisphere_chars = hemisphere.chars();
    let hemisphere = hemisphere_chars.next()?;
    if hemisphere_chars.next().is_some() || !hemispheres.contains(&hemisphere) {
        return None;
    }

    let mut value = f64::from(degrees) + f64::from(minutes) / 60.0 + f64::from(seconds) / 3600.0;
    if hemisphere == 'S' || hemisphere == 'W' {
        value = -value;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn northern_western_pair_parses() {
        let Normalized::Parsed(latlon) = normalize("40°26'46\"N 74°00'21\"W") else {
            panic!("expected a parsed coordinate");
        };
        assert_close(latlon.lat, 40.0 + 26.0 / 60.0 + 46.0 / 3600.0);
        assert_close(latlon.lon, -(74.0 + 0.0 / 60.0 + 21.0 / 3600.0));
    }

    #[test]
    fn southern_eastern_pair_negates_latitude_only() {
        let Normalized::Parsed(latlon) = normalize("12°30'00\"S 45°15'30\"E") else {
            panic!("expected a parsed coordinate");
        };
        assert_close(latlon.lat, -12.5);
        assert_close(latlon.lon, 45.0 + 15.0 / 60.0 + 30.0 / 3600.0);
    }

    #[test]
    fn malformed_strings_pass_through() {
        for input in [
            "not-a-coord",
            "40°26'46\"N",
            "40°26'46\"N 74°00'21\"W extra",
            "40°26'46\"X 74°00'21\"W",
            "40°26'46\"E 74°00'21\"W",
            "4o°26'46\"N 74°00'21\"W",
            "",
        ] {
            assert_eq!(normalize(input), Normalized::Unchanged(input), "{input:?}");
        }
    }

    #[test]
    fn parsed_accessor_exposes_the_pair() {
        assert!(normalize("40°26'46\"N 74°00'21\"W").parsed().is_some());
        assert!(normalize("garbage").parsed().is_none());
    }
}
