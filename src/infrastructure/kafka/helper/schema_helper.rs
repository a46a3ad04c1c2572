use anyhow::{anyhow, Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Locates Avro schemas on disk, one directory per schema type:
/// `<schema_dir>/<schema_type>/schema.json` (or any `.avsc` file in it)
pub struct SchemaHelper {
    schema_dir: PathBuf,
}

impl SchemaHelper {
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        SchemaHelper { schema_dir: schema_dir.into() }
    }

    /// Find the schema file for a given schema type
    pub fn find_schema(&self, schema_type: &str) -> Result<PathBuf> {
        let dir = self.schema_dir.join(schema_type);
        if !dir.is_dir() {
            return Err(anyhow!("Schema directory not found: {}", dir.display()));
        }

        let schema_json = dir.join("schema.json");
        if schema_json.is_file() {
            info!("Found schema.json for {}: {}", schema_type, schema_json.display());
            return Ok(schema_json);
        }

        // Fall back to the first .avsc file, by name, so the pick is stable
        let mut candidates: Vec<PathBuf> = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read schema directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && Self::is_avsc(path))
            .collect();
        candidates.sort();

        candidates.into_iter().next()
            .ok_or_else(|| anyhow!("Could not find a schema file for {}", schema_type))
    }

    /// Get the schema content for a given schema type
    pub fn get_schema_content(&self, schema_type: &str) -> Result<String> {
        let path = self.find_schema(schema_type)?;
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read schema file {}", path.display()))
    }

    fn is_avsc(path: &Path) -> bool {
        path.extension().map_or(false, |ext| ext == "avsc")
    }
}
