//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a step message (for multi-step operations)
    pub fn step(step: usize, total: usize, message: &str) {
        println!("{} {}", format!("[{}/{}]", step, total).dimmed(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a key/value line, aligned for short keys
    pub fn field(key: &str, value: &str) {
        println!("  {:<10} {}", format!("{}:", key).dimmed(), value);
    }
}

/// Format a latitude/longitude pair with hemisphere letters
///
/// Six decimals is roughly 10 cm, finer than any map marker.
pub fn format_coordinate(latitude: f64, longitude: f64) -> String {
    let ns = if latitude < 0.0 { 'S' } else { 'N' };
    let ew = if longitude < 0.0 { 'W' } else { 'E' };
    format!("{:.6}°{} {:.6}°{}", latitude.abs(), ns, longitude.abs(), ew)
}

/// Format a zoom level, dropping the fraction when it is whole
pub fn format_zoom(zoom: f64) -> String {
    if zoom.fract() == 0.0 {
        format!("z{}", zoom as i64)
    } else {
        format!("z{:.2}", zoom)
    }
}

/// Format a pixel size as `WIDTHxHEIGHT`
pub fn format_viewport(width: u32, height: u32) -> String {
    format!("{}x{}", width, height)
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        format!("{}µs", duration.as_micros())
    } else if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else {
        format!("{:.1}s", secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_coordinate_hemispheres() {
        assert_eq!(format_coordinate(58.3, -134.4), "58.300000°N 134.400000°W");
        assert_eq!(format_coordinate(-33.8688, 151.2093), "33.868800°S 151.209300°E");
    }

    #[test]
    fn test_format_zoom() {
        assert_eq!(format_zoom(11.0), "z11");
        assert_eq!(format_zoom(9.5), "z9.50");
    }

    #[test]
    fn test_format_viewport() {
        assert_eq!(format_viewport(1280, 800), "1280x800");
    }

    #[test]
    fn test_format_duration_micros() {
        assert_eq!(format_duration(Duration::from_micros(42)), "42µs");
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        assert_eq!(format_duration(Duration::from_millis(5500)), "5.5s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "step", "steps"), "1 step");
        assert_eq!(format_count(5, "step", "steps"), "5 steps");
    }
}
