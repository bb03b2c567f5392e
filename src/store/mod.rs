use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::params::{self, PartialRagParameters, RagParameters};

/// 用户保存的预设，与持久化行结构一一对应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPreset {
    pub id: Uuid,
    /// 所属用户
    pub user_id: Uuid,
    pub name: String,
    pub similarity_threshold: f64,
    pub top_k: u32,
    pub chunk_size: u32,
    pub overlap: u32,
    /// 是否为该用户的默认预设
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedPreset {
    /// 由一组参数构建新的保存记录
    #[allow(dead_code)]
    pub fn new(user_id: Uuid, name: &str, parameters: RagParameters) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            similarity_threshold: parameters.similarity_threshold,
            top_k: parameters.top_k,
            chunk_size: parameters.chunk_size,
            overlap: parameters.overlap,
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// 记录中的参数部分
    pub fn parameters(&self) -> RagParameters {
        RagParameters {
            similarity_threshold: self.similarity_threshold,
            top_k: self.top_k,
            chunk_size: self.chunk_size,
            overlap: self.overlap,
        }
    }

    /// 存储边界上的取值范围检查，与内存侧的校验保持一致
    pub fn check_domains(&self) -> Result<()> {
        let report = params::validate(&PartialRagParameters::from(self.parameters()));
        if report.is_valid {
            Ok(())
        } else {
            anyhow::bail!(
                "Saved preset {:?} violates parameter domains: {}",
                self.name,
                report.errors.join("; ")
            )
        }
    }
}

/// 基于JSON文件的用户预设存储
///
/// 读取-追加-写回的整文件模式；读写两侧都重新检查取值范围。
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 读取全部已保存的预设，文件不存在时返回空列表
    pub fn load(&self) -> Result<Vec<SavedPreset>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .context(format!("Failed to read preset store: {:?}", self.path))?;
        let presets: Vec<SavedPreset> =
            serde_json::from_str(&content).context("Failed to parse preset store")?;

        for preset in &presets {
            preset.check_domains()?;
        }

        Ok(presets)
    }

    /// 追加一条预设并写回
    #[allow(dead_code)]
    pub fn append(&self, preset: SavedPreset) -> Result<()> {
        preset.check_domains()?;

        let mut presets = self.load()?;
        presets.push(preset);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create preset store directory: {:?}", parent))?;
        }

        let content =
            serde_json::to_string_pretty(&presets).context("Failed to serialize preset store")?;
        std::fs::write(&self.path, content)
            .context(format!("Failed to write preset store: {:?}", self.path))?;
        Ok(())
    }
}

// Include tests
#[cfg(test)]
mod tests;
