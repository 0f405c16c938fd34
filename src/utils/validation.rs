use crate::utils::error::{LayoffsError, Result};
use std::collections::HashSet;
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> LayoffsError {
    LayoffsError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_file_extensions<'a, I>(
    field_name: &str,
    files: I,
    allowed_extensions: &[&str],
) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match Path::new(file).extension().and_then(|ext| ext.to_str()) {
            Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => {}
            Some(extension) => {
                return Err(invalid(
                    field_name,
                    file,
                    format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                ));
            }
            None => {
                return Err(invalid(
                    field_name,
                    file,
                    "File has no extension or invalid filename",
                ));
            }
        }
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("scraper.url", "https://esd.wa.gov/warn").is_ok());
        assert!(validate_url("scraper.url", "http://example.com").is_ok());
        assert!(validate_url("scraper.url", "").is_err());
        assert!(validate_url("scraper.url", "invalid-url").is_err());
        assert!(validate_url("scraper.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data.base_dir", "../data").is_ok());
        assert!(validate_path("data.base_dir", "").is_err());
        assert!(validate_path("data.base_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("scraper.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("scraper.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = ["tech_layoffs_ca_cleaned.csv", "tech_layoffs_ny_cleaned.CSV"];
        assert!(validate_file_extensions("data.files", files, &["csv"]).is_ok());

        assert!(validate_file_extensions("data.files", ["layoffs.txt"], &["csv"]).is_err());
        assert!(validate_file_extensions("data.files", ["layoffs"], &["csv"]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("dashboard.top_n", 20, 5, 50).is_ok());
        assert!(validate_range("dashboard.top_n", 55, 5, 50).is_err());
        assert!(validate_range("dashboard.top_n", 0, 5, 50).is_err());
    }
}
