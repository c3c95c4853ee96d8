//! Orbit class label normalization.

const LEO_WITH_SPACE: &str = "LEO ";

/// Collapse every `"LEO "` to `"LEO"`.
///
/// Repeats until no `"LEO "` is left, so `"LEO  Polar"` ends as `"LEOPolar"`
/// and a second call never changes the result.
///
/// # Examples
///
/// ```
/// use satlife_transform::normalize_orbit_label;
///
/// assert_eq!(normalize_orbit_label("LEO Polar"), "LEOPolar");
/// assert_eq!(normalize_orbit_label("GEO"), "GEO");
/// ```
pub fn normalize_orbit_label(value: &str) -> String {
    let mut label = value.to_string();
    while label.contains(LEO_WITH_SPACE) {
        label = label.replace(LEO_WITH_SPACE, "LEO");
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_trailing_space() {
        assert_eq!(normalize_orbit_label("LEO "), "LEO");
        assert_eq!(normalize_orbit_label("LEO Polar"), "LEOPolar");
        assert_eq!(normalize_orbit_label("Sun-Sync LEO Orbit"), "Sun-Sync LEOOrbit");
    }

    #[test]
    fn test_other_labels_untouched() {
        assert_eq!(normalize_orbit_label("GEO"), "GEO");
        assert_eq!(normalize_orbit_label("Elliptical"), "Elliptical");
        assert_eq!(normalize_orbit_label(" LEO"), " LEO");
        assert_eq!(normalize_orbit_label("leo "), "leo ");
    }

    #[test]
    fn test_idempotent_with_repeated_spaces() {
        let once = normalize_orbit_label("LEO  Polar");
        assert_eq!(once, "LEOPolar");
        assert_eq!(normalize_orbit_label(&once), once);
    }
}
