//! Build script: validates config/models.json at compile time.

use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let catalog_path: PathBuf = [&manifest_dir, "config", "models.json"].iter().collect();
    let json = std::fs::read_to_string(&catalog_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. models.json must exist and be valid.",
            catalog_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct ModelEntry {
        id: String,
        name: String,
        provider: String,
        description: String,
        max_tokens: Option<u32>,
        context_window: Option<String>,
        parameters: Option<String>,
        active_parameters: Option<String>,
        features: Option<Vec<String>>,
    }
    let entries: Vec<ModelEntry> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "models.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
    if entries.is_empty() {
        panic!("models.json must contain at least one model entry.");
    }
    println!("cargo:rerun-if-changed=config/models.json");
}
