#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::presets::PresetKind;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("ragtune-rs").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_args_yields_default_config() {
        let config = parse(&[]).into_config();

        assert_eq!(config.preset, PresetKind::Default);
        assert!(config.overrides.is_empty());
        assert!(!config.list_presets);
        assert!(!config.emit_schema);
        assert!(!config.validate_only);
        assert!(!config.verbose);
    }

    #[test]
    fn test_preset_flag() {
        let config = parse(&["--preset", "comprehensive"]).into_config();
        assert_eq!(config.preset, PresetKind::Comprehensive);
    }

    #[test]
    fn test_unknown_preset_flag_keeps_config_preset() {
        let config = parse(&["--preset", "turbo"]).into_config();
        assert_eq!(config.preset, PresetKind::Default);
    }

    #[test]
    fn test_parameter_flags_become_overrides() {
        let config = parse(&[
            "--similarity-threshold",
            "0.8",
            "--top-k",
            "7",
            "--chunk-size",
            "1024",
            "--overlap",
            "25",
        ])
        .into_config();

        assert_eq!(config.overrides.similarity_threshold, Some(0.8));
        assert_eq!(config.overrides.top_k, Some(7));
        assert_eq!(config.overrides.chunk_size, Some(1024));
        assert_eq!(config.overrides.overlap, Some(25));
    }

    #[test]
    fn test_out_of_range_flag_is_kept_for_later_validation() {
        // CLI不做取值范围检查，校验统一发生在会话启动时
        let config = parse(&["--top-k", "100"]).into_config();
        assert_eq!(config.overrides.top_k, Some(100));
    }

    #[test]
    fn test_session_name_flag() {
        let config = parse(&["--name", "quarterly-report"]).into_config();
        assert_eq!(config.session_name, Some("quarterly-report".to_string()));
    }

    #[test]
    fn test_preset_store_flag() {
        let config = parse(&["--preset-store", "data/presets.json"]).into_config();
        assert_eq!(config.preset_store_path, PathBuf::from("data/presets.json"));
    }

    #[test]
    fn test_mode_flags() {
        assert!(parse(&["--list-presets"]).into_config().list_presets);
        assert!(parse(&["--schema"]).into_config().emit_schema);
        assert!(parse(&["--validate-only"]).into_config().validate_only);
        assert!(parse(&["--verbose"]).into_config().verbose);
    }

    #[test]
    fn test_config_file_with_cli_override() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("ragtune.toml");
        std::fs::write(
            &config_path,
            "preset = \"fast\"\n\n[overrides]\ntop_k = 2\n",
        )
        .unwrap();

        let config = parse(&[
            "--config",
            config_path.to_str().unwrap(),
            "--preset",
            "high_precision",
            "--overlap",
            "5",
        ])
        .into_config();

        // CLI参数覆盖配置文件，未覆盖的字段保持文件中的值
        assert_eq!(config.preset, PresetKind::HighPrecision);
        assert_eq!(config.overrides.top_k, Some(2));
        assert_eq!(config.overrides.overlap, Some(5));
    }

    #[test]
    fn test_invalid_flag_value_fails_to_parse() {
        assert!(
            Args::try_parse_from(["ragtune-rs", "--top-k", "not-a-number"]).is_err()
        );
    }
}
