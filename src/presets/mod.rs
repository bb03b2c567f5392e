use serde::{Deserialize, Serialize};

use crate::params::RagParameters;

/// 预设类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresetKind {
    #[serde(rename = "default")]
    #[default]
    Default,
    #[serde(rename = "high_precision")]
    HighPrecision,
    #[serde(rename = "comprehensive")]
    Comprehensive,
    #[serde(rename = "fast")]
    Fast,
}

impl std::fmt::Display for PresetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresetKind::Default => write!(f, "default"),
            PresetKind::HighPrecision => write!(f, "high_precision"),
            PresetKind::Comprehensive => write!(f, "comprehensive"),
            PresetKind::Fast => write!(f, "fast"),
        }
    }
}

impl std::str::FromStr for PresetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(PresetKind::Default),
            "high_precision" => Ok(PresetKind::HighPrecision),
            "comprehensive" => Ok(PresetKind::Comprehensive),
            "fast" => Ok(PresetKind::Fast),
            _ => Err(format!("Unknown preset: {}", s)),
        }
    }
}

impl PresetKind {
    /// 目录中的全部预设，按展示顺序排列
    pub fn all() -> [PresetKind; 4] {
        [
            PresetKind::Default,
            PresetKind::HighPrecision,
            PresetKind::Comprehensive,
            PresetKind::Fast,
        ]
    }

    /// 预设对应的完整参数集
    pub fn parameters(self) -> RagParameters {
        match self {
            PresetKind::Default => RagParameters {
                similarity_threshold: 0.6,
                top_k: 5,
                chunk_size: 512,
                overlap: 15,
            },
            PresetKind::HighPrecision => RagParameters {
                similarity_threshold: 0.8,
                top_k: 3,
                chunk_size: 256,
                overlap: 10,
            },
            PresetKind::Comprehensive => RagParameters {
                similarity_threshold: 0.5,
                top_k: 10,
                chunk_size: 1024,
                overlap: 20,
            },
            PresetKind::Fast => RagParameters {
                similarity_threshold: 0.7,
                top_k: 3,
                chunk_size: 256,
                overlap: 10,
            },
        }
    }

    /// 展示名
    pub fn display_name(self) -> &'static str {
        match self {
            PresetKind::Default => "Default",
            PresetKind::HighPrecision => "High Precision",
            PresetKind::Comprehensive => "Comprehensive",
            PresetKind::Fast => "Fast",
        }
    }

    /// 面向用户的一句话描述
    pub fn description(self) -> &'static str {
        match self {
            PresetKind::Default => "Balanced retrieval settings for general documents",
            PresetKind::HighPrecision => "Strict matching for accuracy-critical reports",
            PresetKind::Comprehensive => "Broad context retrieval for thorough coverage",
            PresetKind::Fast => "Lightweight retrieval for quick drafts",
        }
    }
}

/// 命名预设：展示名、描述与一组完整且不可变的参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub kind: PresetKind,
    pub display_name: String,
    pub description: String,
    pub parameters: RagParameters,
}

/// 构建完整的预设目录，构造后不再变化
pub fn catalog() -> Vec<Preset> {
    PresetKind::all()
        .iter()
        .map(|kind| Preset {
            kind: *kind,
            display_name: kind.display_name().to_string(),
            description: kind.description().to_string(),
            parameters: kind.parameters(),
        })
        .collect()
}
