use num_traits::Float;
use crate::errors::{Result, RouteError};


/// Equatorial earth radius in meters, used by the mercator projection
const EARTH_RADIUS: f64 = 6_378_137.0;


/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}


/// 2D Point in normalized map units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}


/// Geographic bounding box of the source map, in degrees
///
/// Maps lat/lon into the normalized space the road graph works in. Both axes
/// are divided by the same metric scale (the shorter side of the box in
/// meters), so distances stay isotropic and the shorter side spans [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapBounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl MapBounds {

    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Result<Self> {
        let bounds = Self { min_lat, min_lon, max_lat, max_lon };
        let finite = [min_lat, min_lon, max_lat, max_lon].iter().all(|v| v.is_finite());
        if !finite || max_lat <= min_lat || max_lon <= min_lon {
            return Err(RouteError::InvalidBounds);
        }
        // poles project to infinity
        if min_lat <= -90.0 || max_lat >= 90.0 {
            return Err(RouteError::InvalidBounds);
        }
        Ok(bounds)
    }

    /// Meters per normalized unit
    pub fn metric_scale(&self) -> f64 {
        let dx = lon_to_meters(self.max_lon) - lon_to_meters(self.min_lon);
        let dy = lat_to_meters(self.max_lat) - lat_to_meters(self.min_lat);
        dx.min(dy)
    }

    /// Project a lat/lon pair into normalized map units
    pub fn project(&self, lat: f64, lon: f64) -> Point {
        let scale = self.metric_scale();
        Point {
            x: (lon_to_meters(lon) - lon_to_meters(self.min_lon)) / scale,
            y: (lat_to_meters(lat) - lat_to_meters(self.min_lat)) / scale,
        }
    }
}


/// Spherical mercator easting
fn lon_to_meters(lon: f64) -> f64 {
    lon.to_radians() * EARTH_RADIUS
}

/// Spherical mercator northing
fn lat_to_meters(lat: f64) -> f64 {
    (lat.to_radians() / 2.0 + std::f64::consts::FRAC_PI_4).tan().ln() * EARTH_RADIUS
}



#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean() {
        assert_eq!(euclidean(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(Point::new(1.0, 1.0).distance(&Point::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_bounds_rejects_inverted_box() {
        assert_eq!(MapBounds::new(1.0, 0.0, 0.0, 1.0), Err(RouteError::InvalidBounds));
        assert_eq!(MapBounds::new(0.0, 0.0, 0.0, 1.0), Err(RouteError::InvalidBounds));
        assert_eq!(MapBounds::new(0.0, f64::NAN, 1.0, 1.0), Err(RouteError::InvalidBounds));
    }

    #[test]
    fn test_bounds_projection() {
        // About 1.1km on each side, 10 degrees north
        let bounds = MapBounds::new(10.0, 20.0, 10.01, 20.01).unwrap();
        let scale = bounds.metric_scale();

        // 0.01 degree of longitude at the equator radius is ~1113m
        assert!((scale - 1113.19).abs() < 1.0, "scale was {scale}");

        let origin = bounds.project(10.0, 20.0);
        assert!(origin.x.abs() < 1e-9 && origin.y.abs() < 1e-9);

        // longitude is the shorter side in mercator meters here, so it spans exactly 1
        let corner = bounds.project(10.01, 20.01);
        assert!((corner.x - 1.0).abs() < 1e-9);
        assert!(corner.y >= 1.0);
    }
}
