//! Unit conversions.
//!
//! Every conversion rejects NaN and infinite inputs with
//! [`Error::InvalidInput`](crate::Error::InvalidInput) naming the conversion.
//! Factors are the rounded values commonly used for field work, not exact
//! definitions, so a round trip agrees to about six significant figures.
use crate::error::finite;
use crate::Result;

/// Kilometres per degree of latitude used for small-offset approximations.
pub const KM_PER_DEGREE: f64 = 111.0;

macro_rules! conversion {
    ($(#[$doc:meta])* $name:ident, |$x:ident| $body:expr) => {
        $(#[$doc])*
        #[inline]
        pub fn $name($x: f64) -> Result<f64> {
            let $x = finite($x, concat!(stringify!($name), " expects a valid finite number"))?;
            Ok($body)
        }
    };
}

// Length
conversion!(kilometers_to_miles, |km| km * 0.621371);
conversion!(miles_to_kilometers, |mi| mi * 1.60934);
conversion!(meters_to_feet, |m| m * 3.28084);
conversion!(feet_to_meters, |ft| ft / 3.28084);

// Speed
conversion!(mph_to_kph, |mph| mph * 1.60934);
conversion!(kph_to_mph, |kph| kph * 0.621371);
conversion!(
    /// International knot, 1.852 km/h exactly
    knots_to_kph,
    |kn| kn * 1.852
);
conversion!(kph_to_knots, |kph| kph / 1.852);
conversion!(mph_to_knots, |mph| mph * 0.868976);
conversion!(knots_to_mph, |kn| kn * 1.15078);

// Temperature
conversion!(fahrenheit_to_celsius, |f| (f - 32.0) * 5.0 / 9.0);
conversion!(celsius_to_fahrenheit, |c| c * 9.0 / 5.0 + 32.0);
conversion!(celsius_to_kelvin, |c| c + 273.15);
conversion!(kelvin_to_celsius, |k| k - 273.15);
conversion!(fahrenheit_to_kelvin, |f| (f - 32.0) * 5.0 / 9.0 + 273.15);
conversion!(kelvin_to_fahrenheit, |k| (k - 273.15) * 9.0 / 5.0 + 32.0);

// Mass
conversion!(kg_to_lbs, |kg| kg * 2.20462);
conversion!(lbs_to_kg, |lb| lb / 2.20462);

// Area
conversion!(square_meters_to_square_feet, |m2| m2 * 10.7639);
conversion!(square_feet_to_square_meters, |ft2| ft2 / 10.7639);

// Volume
conversion!(
    /// US liquid gallons
    liters_to_gallons,
    |l| l * 0.264172
);
conversion!(gallons_to_liters, |gal| gal / 0.264172);

// Angle
conversion!(degrees_to_radians, |deg| deg.to_radians());
conversion!(radians_to_degrees, |rad| rad.to_degrees());

/// Angular size of a distance, in degrees of latitude and of longitude.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeOffset {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

/// Convert a distance in kilometres to degree offsets at latitude `lat`,
/// using 111 km per degree of latitude and shrinking degrees of longitude
/// by `cos(lat)`.
///
/// At the poles the longitude offset is infinite.
pub fn kilometers_to_degrees(lat: f64, distance_km: f64) -> Result<DegreeOffset> {
    let lat = finite(lat, "kilometers_to_degrees expects a valid finite latitude")?;
    let distance_km = finite(
        distance_km,
        "kilometers_to_degrees expects a valid finite distance",
    )?;

    Ok(DegreeOffset {
        lat_deg: distance_km / KM_PER_DEGREE,
        lon_deg: distance_km / (KM_PER_DEGREE * lat.to_radians().cos()),
    })
}
