use std::{fs, io, path::Path};

use regex::Regex;

const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

/// Parses sizes like `10`, `1.5kB`, `3 MB` or `2GiB` with decimal multipliers.
pub fn parse_human_size(size: &str) -> Option<u64> {
    let regex = Regex::new(r"^(\d+(?:\.\d+)?) ?([kKmMgGtTpP])?[iI]?[bB]?$").ok()?;
    let captures = regex.captures(size.trim())?;

    let value = captures.get(1)?.as_str().parse::<f64>().ok()?;
    let multiplier = match captures.get(2).map(|unit| unit.as_str().to_ascii_lowercase()) {
        None => 1_f64,
        Some(unit) => match unit.as_str() {
            "k" => 1e3,
            "m" => 1e6,
            "g" => 1e9,
            "t" => 1e12,
            "p" => 1e15,
            _ => return None,
        },
    };

    Some((value * multiplier) as u64)
}

pub fn format_size(size: u64) -> String {
    if size < 10 {
        return format!("{} B", size);
    }

    let exponent = ((size as f64).ln() / 1000_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = size as f64 / 1000_f64.powi(exponent as i32);

    if value < 10.0 {
        format!("{:.1} {}", value, UNITS[exponent])
    } else {
        format!("{:.0} {}", value, UNITS[exponent])
    }
}

/// Size of a file, or the summed size of all non-directory entries below a directory.
pub fn disk_usage(path: &Path) -> io::Result<u64> {
    let metadata = fs::symlink_metadata(path)?;
    if !metadata.is_dir() {
        return Ok(metadata.len());
    }

    let mut size = 0;
    for entry in fs::read_dir(path)? {
        size += disk_usage(&entry?.path())?;
    }

    Ok(size)
}
