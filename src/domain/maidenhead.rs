//! Maidenhead grid locator decoding.
//!
//! Locators pair longitude and latitude characters at increasing precision:
//! field (`A`-`R`), square (`0`-`9`), subsquare (`A`-`X`) and extended square
//! (`0`-`9`).

/// Longitude/latitude extent of each locator pair, in degrees.
const STEPS: [(f64, f64); 4] = [
    (20.0, 10.0),
    (2.0, 1.0),
    (2.0 / 24.0, 1.0 / 24.0),
    (2.0 / 240.0, 1.0 / 240.0),
];

fn pair_index(level: usize, c: u8) -> Option<u8> {
    match level {
        0 => {
            let c = c.to_ascii_uppercase();
            (b'A'..=b'R').contains(&c).then(|| c - b'A')
        }
        2 => {
            let c = c.to_ascii_uppercase();
            (b'A'..=b'X').contains(&c).then(|| c - b'A')
        }
        _ => c.is_ascii_digit().then(|| c - b'0'),
    }
}

/// Returns the centre `(latitude, longitude)` of the square named by `locator`.
///
/// Accepts 2, 4, 6 or 8 characters, case-insensitive. Anything else yields
/// `None`.
pub fn grid_to_lat_lon(locator: &str) -> Option<(f64, f64)> {
    let bytes = locator.trim().as_bytes();
    if bytes.is_empty() || bytes.len() % 2 != 0 || bytes.len() > 8 {
        return None;
    }

    let mut lon = -180.0;
    let mut lat = -90.0;
    let mut last_step = STEPS[0];

    for (level, pair) in bytes.chunks(2).enumerate() {
        let lon_idx = pair_index(level, pair[0])?;
        let lat_idx = pair_index(level, pair[1])?;
        let (lon_step, lat_step) = STEPS[level];
        lon += f64::from(lon_idx) * lon_step;
        lat += f64::from(lat_idx) * lat_step;
        last_step = STEPS[level];
    }

    Some((lat + last_step.1 / 2.0, lon + last_step.0 / 2.0))
}
