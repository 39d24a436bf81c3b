//! Compass labels for wind bearings.

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Map a wind bearing in degrees to one of 16 compass labels.
///
/// Bearings outside `[0, 360)` are wrapped first; the sector midpoint rounds
/// up, so `22.5` is "NNE" and `348.75` wraps back to "N".
pub fn wind_direction(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return COMPASS_POINTS[0];
    }
    let normalized = degrees.rem_euclid(360.0);
    let index = (normalized / 22.5).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_points() {
        assert_eq!(wind_direction(0.0), "N");
        assert_eq!(wind_direction(90.0), "E");
        assert_eq!(wind_direction(180.0), "S");
        assert_eq!(wind_direction(270.0), "W");
    }

    #[test]
    fn test_full_circle_wraps_to_north() {
        assert_eq!(wind_direction(360.0), "N");
        assert_eq!(wind_direction(720.0), "N");
        assert_eq!(wind_direction(348.75), "N");
    }

    #[test]
    fn test_midpoint_rounds_up() {
        assert_eq!(wind_direction(22.5), "NNE");
        assert_eq!(wind_direction(11.25), "NNE");
        assert_eq!(wind_direction(11.0), "N");
    }

    #[test]
    fn test_negative_bearing() {
        assert_eq!(wind_direction(-22.5), "NNW");
        assert_eq!(wind_direction(-90.0), "W");
    }

    #[test]
    fn test_non_finite_is_north() {
        assert_eq!(wind_direction(f64::NAN), "N");
    }
}
