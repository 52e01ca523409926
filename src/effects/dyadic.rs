//! Dyadic-covariate change statistics.
//!
//! These effects derive a fixed per-dyad covariate from continuous node
//! attributes: great-circle distance from latitude/longitude columns, or
//! Euclidean distance from x/y/z coordinate columns. Because the covariate
//! does not depend on the graph, the change statistic for adding `i -> j`
//! is simply the covariate value; missing coordinates contribute zero.
use crate::graph::Digraph;

/// Mean Earth radius in kilometres, for the great-circle distance.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (haversine) distance in kilometres between the endpoints'
/// latitude/longitude, read from two continuous columns in decimal degrees.
pub fn change_geo_distance(g: &Digraph, i: u32, j: u32, lat_column: usize, lon_column: usize) -> f64 {
    let lat = &g.attributes().continuous[lat_column].values;
    let lon = &g.attributes().continuous[lon_column].values;
    let (lat_i, lon_i) = (lat[i as usize], lon[i as usize]);
    let (lat_j, lon_j) = (lat[j as usize], lon[j as usize]);
    if lat_i.is_nan() || lon_i.is_nan() || lat_j.is_nan() || lon_j.is_nan() {
        return 0.0;
    }
    let phi_i = lat_i.to_radians();
    let phi_j = lat_j.to_radians();
    let d_phi = (lat_j - lat_i).to_radians();
    let d_lambda = (lon_j - lon_i).to_radians();
    let a = (d_phi / 2.0).sin().powi(2)
        + phi_i.cos() * phi_j.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Euclidean distance between the endpoints' (x, y, z) coordinates, read
/// from three continuous columns.
pub fn change_euclidean_distance(
    g: &Digraph, i: u32, j: u32, x_column: usize, y_column: usize, z_column: usize,
) -> f64 {
    let table = g.attributes();
    let mut sum_sq = 0.0;
    for &column in &[x_column, y_column, z_column] {
        let values = &table.continuous[column].values;
        let (a, b) = (values[i as usize], values[j as usize]);
        if a.is_nan() || b.is_nan() {
            return 0.0;
        }
        sum_sq += (a - b) * (a - b);
    }
    sum_sq.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AttributeTable, ContinuousAttribute};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn graph_with_coordinates() -> Digraph {
        let mut g = Digraph::new(3);
        let table = AttributeTable {
            continuous: vec![
                ContinuousAttribute {
                    name: "lat".to_string(),
                    values: vec![0.0, 0.0, f64::NAN],
                },
                ContinuousAttribute {
                    name: "lon".to_string(),
                    values: vec![0.0, 90.0, 10.0],
                },
                ContinuousAttribute { name: "x".to_string(), values: vec![0.0, 3.0, 1.0] },
                ContinuousAttribute { name: "y".to_string(), values: vec![0.0, 4.0, 1.0] },
                ContinuousAttribute { name: "z".to_string(), values: vec![0.0, 0.0, f64::NAN] },
            ],
            ..AttributeTable::new()
        };
        g.attach_attributes(table).unwrap();
        g
    }

    #[test]
    fn geo_distance_matches_quarter_circumference_on_the_equator() {
        let g = graph_with_coordinates();
        // (0, 0) to (0, 90 E) is a quarter of the great circle.
        let expected = std::f64::consts::FRAC_PI_2 * EARTH_RADIUS_KM;
        assert_relative_eq!(change_geo_distance(&g, 0, 1, 0, 1), expected, max_relative = 1e-12);
        // Symmetric in the endpoints.
        assert_relative_eq!(
            change_geo_distance(&g, 1, 0, 0, 1),
            change_geo_distance(&g, 0, 1, 0, 1),
            max_relative = 1e-12
        );
    }

    #[test]
    fn missing_coordinates_contribute_zero() {
        let g = graph_with_coordinates();
        assert_abs_diff_eq!(change_geo_distance(&g, 0, 2, 0, 1), 0.0);
        assert_abs_diff_eq!(change_euclidean_distance(&g, 0, 2, 2, 3, 4), 0.0);
    }

    #[test]
    fn euclidean_distance_matches_pythagoras() {
        let g = graph_with_coordinates();
        assert_abs_diff_eq!(change_euclidean_distance(&g, 0, 1, 2, 3, 4), 5.0, epsilon = 1e-12);
    }
}
