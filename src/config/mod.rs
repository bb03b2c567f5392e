use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::params::PartialRagParameters;
use crate::presets::PresetKind;

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 会话名称
    pub session_name: Option<String>,

    /// 启动时应用的预设
    pub preset: PresetKind,

    /// 启动时在预设之上叠加的参数覆盖项
    pub overrides: PartialRagParameters,

    /// 用户自定义预设的存储文件路径
    pub preset_store_path: PathBuf,

    /// 列出预设目录后退出
    pub list_presets: bool,

    /// 输出参数JSON Schema后退出
    pub emit_schema: bool,

    /// 只校验参数覆盖项，不输出最终配置
    pub validate_only: bool,

    /// 是否启用详细日志
    pub verbose: bool,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// 获取会话名称，未配置或为空时使用默认名
    pub fn get_session_name(&self) -> String {
        if let Some(ref name) = self.session_name
            && !name.trim().is_empty()
        {
            return name.clone();
        }

        "ragtune".to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_name: None,
            preset: PresetKind::Default,
            overrides: PartialRagParameters::default(),
            preset_store_path: PathBuf::from(".ragtune/saved_presets.json"),
            list_presets: false,
            emit_schema: false,
            validate_only: false,
            verbose: false,
        }
    }
}
