use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use uuid::Uuid;

use crate::params::RagParameters;

/// 历史记录的容量上限，超出后按先进先出淘汰
pub const HISTORY_CAPACITY: usize = 50;

/// 一次生成运行的记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// 本次运行的文档标识
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// 本次运行实际使用的参数快照
    pub parameters: RagParameters,
    /// 运行结果摘要，内容由调用方决定
    pub result: Value,
}

/// 有界的生成历史
///
/// 只追加不回改，超出[`HISTORY_CAPACITY`]时淘汰最旧的记录。
#[derive(Debug, Clone, Default)]
pub struct GenerationHistory {
    entries: VecDeque<GenerationRecord>,
}

impl GenerationHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// 追加一条记录并返回其标识
    pub fn push(&mut self, parameters: RagParameters, result: Value) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push_back(GenerationRecord {
            id,
            timestamp: Utc::now(),
            parameters,
            result,
        });
        while self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        id
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按时间顺序复制全部记录
    pub fn snapshot(&self) -> Vec<GenerationRecord> {
        self.entries.iter().cloned().collect()
    }
}
