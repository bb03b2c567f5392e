use crate::config::Config;
use crate::presets::PresetKind;
use clap::Parser;
use std::path::PathBuf;

/// Ragtune-RS - 报告起草管线的RAG检索调优引擎
#[derive(Parser, Debug)]
#[command(name = "ragtune-rs")]
#[command(
    about = "Retrieval tuning engine for an AI report drafting pipeline. Validates and resolves the RAG retrieval configuration (similarity threshold, top-k, chunk size, overlap) from presets, config files and command line overrides."
)]
#[command(version)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 会话名称
    #[arg(short, long)]
    pub name: Option<String>,

    /// 启动时应用的预设 (default, high_precision, comprehensive, fast)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// 相似度阈值 (0.0-1.0)
    #[arg(long)]
    pub similarity_threshold: Option<f64>,

    /// 检索返回的分块数量 (1-50)
    #[arg(long)]
    pub top_k: Option<u32>,

    /// 分块大小，单位为token (100-2000)
    #[arg(long)]
    pub chunk_size: Option<u32>,

    /// 分块重叠百分比 (0-50)
    #[arg(long)]
    pub overlap: Option<u32>,

    /// 用户自定义预设的存储文件路径
    #[arg(long)]
    pub preset_store: Option<PathBuf>,

    /// 列出预设目录后退出
    #[arg(long)]
    pub list_presets: bool,

    /// 输出参数的JSON Schema后退出
    #[arg(long)]
    pub schema: bool,

    /// 只校验参数，不输出最终配置
    #[arg(long)]
    pub validate_only: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(self) -> Config {
        let mut config = if let Some(config_path) = &self.config {
            // 如果显式指定了配置文件路径，从该路径加载
            Config::from_file(config_path)
                .unwrap_or_else(|_| panic!("⚠️ 警告: 无法读取配置文件 {:?}", config_path))
        } else {
            // 如果没有显式指定配置文件，尝试从默认位置加载
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("ragtune.toml");

            if default_config_path.exists() {
                Config::from_file(&default_config_path).unwrap_or_else(|_| {
                    panic!("⚠️ 警告: 无法读取默认配置文件 {:?}", default_config_path)
                })
            } else {
                // 默认配置文件不存在，使用默认值
                Config::default()
            }
        };

        // 会话名称处理：CLI参数优先级最高
        if let Some(name) = self.name {
            config.session_name = Some(name);
        }

        // 预设处理
        if let Some(preset_str) = self.preset {
            if let Ok(preset) = preset_str.parse::<PresetKind>() {
                config.preset = preset;
            } else {
                eprintln!("⚠️ 警告: 未知的预设: {}，使用配置中的预设", preset_str);
            }
        }

        // 覆盖单项参数
        if let Some(similarity_threshold) = self.similarity_threshold {
            config.overrides.similarity_threshold = Some(similarity_threshold);
        }
        if let Some(top_k) = self.top_k {
            config.overrides.top_k = Some(top_k);
        }
        if let Some(chunk_size) = self.chunk_size {
            config.overrides.chunk_size = Some(chunk_size);
        }
        if let Some(overlap) = self.overlap {
            config.overrides.overlap = Some(overlap);
        }

        // 预设存储路径
        if let Some(preset_store) = self.preset_store {
            config.preset_store_path = preset_store;
        }

        // 运行模式
        if self.list_presets {
            config.list_presets = true;
        }
        if self.schema {
            config.emit_schema = true;
        }
        if self.validate_only {
            config.validate_only = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }
}

// Include tests
#[cfg(test)]
mod tests;
