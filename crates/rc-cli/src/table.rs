use std::fs;
use std::path::Path;

use rc_compiler::{parse_redirect_list, parse_table, InputFormat};
use rc_core::{Redirect, RedirectTable};

pub fn read_redirects(path: &Path, format: Option<InputFormat>) -> Result<Vec<Redirect>, String> {
    let text = read_text(path)?;
    let format = format.unwrap_or_else(|| InputFormat::detect(path, &text));
    parse_redirect_list(&text, format)
        .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))
}

pub fn read_table(path: &Path) -> Result<RedirectTable, String> {
    let text = read_text(path)?;
    parse_table(&text).map_err(|e| format!("Invalid table '{}': {}", path.display(), e))
}

pub fn write_text(path: &Path, text: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }
    fs::write(path, text)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}

fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))
}
