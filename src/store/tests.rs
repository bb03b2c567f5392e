#[cfg(test)]
mod tests {
    use crate::params::RagParameters;
    use crate::presets::PresetKind;
    use crate::store::{PresetStore, SavedPreset};
    use tempfile::TempDir;
    use uuid::Uuid;

    fn sample_preset(name: &str) -> SavedPreset {
        SavedPreset::new(Uuid::new_v4(), name, PresetKind::Comprehensive.parameters())
    }

    #[test]
    fn test_saved_preset_new_maps_fields() {
        let user_id = Uuid::new_v4();
        let parameters = RagParameters {
            similarity_threshold: 0.8,
            top_k: 3,
            chunk_size: 256,
            overlap: 10,
        };

        let preset = SavedPreset::new(user_id, "precision tuning", parameters);

        assert_eq!(preset.user_id, user_id);
        assert_eq!(preset.name, "precision tuning");
        assert_eq!(preset.parameters(), parameters);
        assert!(!preset.is_default);
        assert_eq!(preset.created_at, preset.updated_at);
    }

    #[test]
    fn test_check_domains_accepts_valid_row() {
        assert!(sample_preset("valid").check_domains().is_ok());
    }

    #[test]
    fn test_check_domains_rejects_out_of_range_row() {
        let mut preset = sample_preset("broken");
        preset.top_k = 999;

        let error = preset.check_domains().unwrap_err();
        assert!(error.to_string().contains("Top K"));
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = PresetStore::new(temp_dir.path().join("saved_presets.json"));

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = PresetStore::new(temp_dir.path().join("nested/saved_presets.json"));

        let first = sample_preset("first");
        let second = sample_preset("second");
        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], first);
        assert_eq!(loaded[1], second);
    }

    #[test]
    fn test_append_rejects_out_of_range_row() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("saved_presets.json");
        let store = PresetStore::new(&path);

        let mut preset = sample_preset("broken");
        preset.chunk_size = 5000;

        assert!(store.append(preset).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_load_rejects_tampered_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("saved_presets.json");
        let store = PresetStore::new(&path);

        store.append(sample_preset("legit")).unwrap();

        // 绕过存储边界直接把文件改坏
        let tampered = std::fs::read_to_string(&path)
            .unwrap()
            .replace("\"top_k\": 10", "\"top_k\": 999");
        std::fs::write(&path, tampered).unwrap();

        assert!(store.load().is_err());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("saved_presets.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(PresetStore::new(&path).load().is_err());
    }
}
