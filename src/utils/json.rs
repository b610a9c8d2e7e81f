//! JSON 工具

use anyhow::{Context, Result};
use serde::Serialize;

use crate::utils::write_file;

/// 以 orchestrator 的格式写入 JSON 文件（格式化）
pub fn write_json<T>(path: &std::path::Path, data: &T) -> Result<()>
where
    T: Serialize,
{
    let json = serde_json::to_string_pretty(data).context("Failed to serialize to JSON")?;

    write_file(path, &json).with_context(|| format!("Failed to write JSON file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_write_json_pretty() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("out/test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        write_json(&file_path, &data).unwrap();

        let content = std::fs::read_to_string(&file_path).unwrap();
        assert!(content.contains("\n"));
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["value"], 42);
    }
}
