use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// 相似度阈值的取值范围
pub const SIMILARITY_THRESHOLD_RANGE: (f64, f64) = (0.0, 1.0);

/// Top K的取值范围
pub const TOP_K_RANGE: (u32, u32) = (1, 50);

/// 分块大小的取值范围（token数）
pub const CHUNK_SIZE_RANGE: (u32, u32) = (100, 2000);

/// 分块重叠百分比的取值范围
pub const OVERLAP_RANGE: (u32, u32) = (0, 50);

/// 检索界面提供的分块大小档位
pub const SUPPORTED_CHUNK_SIZES: [u32; 3] = [256, 512, 1024];

/// RAG检索参数集
///
/// 管理器"当前"槽位中的实例始终满足全部取值范围，不会存储部分合法的状态。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RagParameters {
    /// 纳入检索结果所需的最小相关性得分 (0.0-1.0)
    pub similarity_threshold: f64,

    /// 相似度检索返回的最高排名分块数量 (1-50)
    pub top_k: u32,

    /// 检索分块的大小，单位为token (100-2000)
    pub chunk_size: u32,

    /// 相邻分块之间的重叠百分比，用于上下文连续性 (0-50)
    pub overlap: u32,
}

impl Default for RagParameters {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            top_k: 5,
            chunk_size: 512,
            overlap: 15,
        }
    }
}

impl RagParameters {
    /// 在自身之上合并部分参数，未给出的字段保持原值
    pub fn merged_with(&self, partial: &PartialRagParameters) -> Self {
        Self {
            similarity_threshold: partial
                .similarity_threshold
                .unwrap_or(self.similarity_threshold),
            top_k: partial.top_k.unwrap_or(self.top_k),
            chunk_size: partial.chunk_size.unwrap_or(self.chunk_size),
            overlap: partial.overlap.unwrap_or(self.overlap),
        }
    }

    /// 检查自身是否满足全部取值范围
    #[allow(dead_code)]
    pub fn is_within_domains(&self) -> bool {
        validate(&PartialRagParameters::from(*self)).is_valid
    }
}

/// 部分RAG参数，每个字段均可独立缺省
///
/// 与完整的[`RagParameters`]相对：合并式更新使用部分参数，预设与当前配置
/// 使用完整参数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PartialRagParameters {
    /// 最小相关性得分 (0.0-1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<f64>,

    /// 检索返回的分块数量 (1-50)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    /// 分块大小，单位为token (100-2000)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<u32>,

    /// 分块重叠百分比 (0-50)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap: Option<u32>,
}

impl From<RagParameters> for PartialRagParameters {
    fn from(parameters: RagParameters) -> Self {
        Self {
            similarity_threshold: Some(parameters.similarity_threshold),
            top_k: Some(parameters.top_k),
            chunk_size: Some(parameters.chunk_size),
            overlap: Some(parameters.overlap),
        }
    }
}

impl PartialRagParameters {
    /// 是否没有给出任何字段
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.similarity_threshold.is_none()
            && self.top_k.is_none()
            && self.chunk_size.is_none()
            && self.overlap.is_none()
    }
}

/// 参数校验结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    /// 按字段顺序排列的错误信息，每个非法字段一条
    pub errors: Vec<String>,
}

/// 校验部分参数，缺省的字段不参与校验
///
/// 总是返回结果，不会失败，也不修改任何状态。
pub fn validate(partial: &PartialRagParameters) -> ValidationReport {
    let mut errors = Vec::new();

    if let Some(value) = partial.similarity_threshold
        && !(SIMILARITY_THRESHOLD_RANGE.0..=SIMILARITY_THRESHOLD_RANGE.1).contains(&value)
    {
        errors.push("Similarity threshold must be between 0.0 and 1.0".to_string());
    }
    if let Some(value) = partial.top_k
        && !(TOP_K_RANGE.0..=TOP_K_RANGE.1).contains(&value)
    {
        errors.push("Top K must be between 1 and 50".to_string());
    }
    if let Some(value) = partial.chunk_size
        && !(CHUNK_SIZE_RANGE.0..=CHUNK_SIZE_RANGE.1).contains(&value)
    {
        errors.push("Chunk size must be between 100 and 2000".to_string());
    }
    if let Some(value) = partial.overlap
        && !(OVERLAP_RANGE.0..=OVERLAP_RANGE.1).contains(&value)
    {
        errors.push("Overlap must be between 0 and 50".to_string());
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 将任意分块大小吸附到界面提供的最近档位
///
/// 管理器自身按取值范围校验，该函数只用于表单边界。
#[allow(dead_code)]
pub fn nearest_supported_chunk_size(size: u32) -> u32 {
    SUPPORTED_CHUNK_SIZES
        .iter()
        .copied()
        .min_by_key(|candidate| candidate.abs_diff(size))
        .unwrap_or(SUPPORTED_CHUNK_SIZES[0])
}
