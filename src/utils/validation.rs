use crate::utils::error::{Result, TranslateError};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 非空白字串
pub fn validate_string_exists(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TranslateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    validate_string_exists(field_name, path)?;

    if path.contains('\0') {
        return Err(TranslateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 檢查路徑副檔名是否在允許清單中（不分大小寫）
pub fn validate_path_extension(field_name: &str, path: &str, allowed_extensions: &[&str]) -> Result<()> {
    validate_path(field_name, path)?;

    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| TranslateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        })?;

    if !allowed_extensions
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    {
        return Err(TranslateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        });
    }

    Ok(())
}

pub fn validate_pdf_path(field_name: &str, path: &str) -> Result<()> {
    validate_path_extension(field_name, path, &["pdf"])
}

pub fn validate_template_path(field_name: &str, path: &str) -> Result<()> {
    validate_path_extension(field_name, path, &["twig"])
}
