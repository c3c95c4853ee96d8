//! Column names of the active-satellite database.

/// Textual expected lifetime, possibly a range such as `"5-10 yrs."`.
pub const EXPECTED_LIFETIME: &str = "Expected Lifetime (Years)";

/// Launch mass, numeric-as-string.
pub const LAUNCH_MASS: &str = "Launch Mass (Kilograms)";

/// Orbit class label (GEO, LEO, MEO, Elliptical).
pub const CLASS_OF_ORBIT: &str = "Class of Orbit";

pub const PERIGEE: &str = "Perigee (Kilometers)";
pub const APOGEE: &str = "Apogee (Kilometers)";
pub const INCLINATION: &str = "Inclination (Degrees)";

/// Columns that must exist in the input file.
pub const REQUIRED_COLUMNS: &[&str] = &[
    EXPECTED_LIFETIME,
    LAUNCH_MASS,
    CLASS_OF_ORBIT,
    PERIGEE,
    APOGEE,
    INCLINATION,
];

/// Regression predictors used when none are given on the command line.
pub const DEFAULT_PREDICTORS: &[&str] = &[PERIGEE, APOGEE, LAUNCH_MASS, INCLINATION];
