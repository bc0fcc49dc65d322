//! Pure output-size calculation.

/// Fit `(width, height)` inside the optional bounds.
///
/// Scaling is uniform, never enlarges, and keeps each side at least 1 px.
/// A missing or zero bound does not constrain its axis.
///
/// ```
/// use refract_core::pipeline::fit_within;
///
/// assert_eq!(fit_within(3000, 2000, Some(1000), Some(1000)), (1000, 667));
/// assert_eq!(fit_within(800, 600, Some(1000), None), (800, 600));
/// ```
pub fn fit_within(
    width: u32,
    height: u32,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> (u32, u32) {
    let max_width = max_width.filter(|&w| w > 0);
    let max_height = max_height.filter(|&h| h > 0);
    if width == 0 || height == 0 {
        return (width, height);
    }

    let scale = [
        max_width.map(|m| f64::from(m) / f64::from(width)),
        max_height.map(|m| f64::from(m) / f64::from(height)),
    ]
    .into_iter()
    .flatten()
    .fold(f64::INFINITY, f64::min);

    if scale >= 1.0 {
        return (width, height);
    }

    let scaled = |side: u32, bound: Option<u32>| -> u32 {
        let value = (f64::from(side) * scale).round().max(1.0) as u32;
        bound.map_or(value, |b| value.min(b))
    };
    (scaled(width, max_width), scaled(height, max_height))
}
