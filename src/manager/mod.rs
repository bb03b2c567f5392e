use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::history::{GenerationHistory, GenerationRecord};
use crate::params::{self, PartialRagParameters, RagParameters, ValidationReport};
use crate::presets::{self, Preset, PresetKind};

/// 参数操作错误，两类错误均可恢复，失败时状态保持不变
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    /// 一个或多个字段超出取值范围，携带按字段顺序排列的错误信息
    #[error("invalid rag parameters: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },
    /// 预设名不在目录中
    #[error("unknown preset: {name}")]
    UnknownPreset { name: String },
}

/// 状态快照，全部字段均为防御性拷贝，调用方修改快照不影响管理器
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub current_parameters: RagParameters,
    pub presets: Vec<Preset>,
    pub is_generating: bool,
    pub last_used_parameters: Option<RagParameters>,
    pub generation_history: Vec<GenerationRecord>,
}

/// 状态变更观察者
///
/// 每次成功的变更操作都会按注册顺序同步收到一份完整快照。
pub trait ParameterObserver: Send + Sync {
    fn on_state_changed(&self, state: &StateSnapshot);
}

/// RAG参数管理器
///
/// 一次生成会话中"当前"检索配置的唯一持有者：校验全部变更，向消费方
/// 暴露只读快照，并在每次接受变更后同步通知观察者。
pub struct RagParameterManager {
    current: RagParameters,
    presets: Vec<Preset>,
    is_generating: bool,
    last_used: Option<RagParameters>,
    history: GenerationHistory,
    observers: Vec<Arc<dyn ParameterObserver>>,
}

impl Default for RagParameterManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RagParameterManager {
    /// 创建以默认参数为当前配置的管理器
    pub fn new() -> Self {
        Self {
            current: RagParameters::default(),
            presets: presets::catalog(),
            is_generating: false,
            last_used: None,
            history: GenerationHistory::new(),
            observers: Vec::new(),
        }
    }

    /// 固定的默认参数 (0.6, 5, 512, 15)，无副作用
    #[allow(dead_code)]
    pub fn default_parameters() -> RagParameters {
        RagParameters::default()
    }

    /// 校验部分参数，不修改任何状态，总是返回结果
    #[allow(dead_code)]
    pub fn validate_parameters(&self, partial: &PartialRagParameters) -> ValidationReport {
        params::validate(partial)
    }

    /// 合并式更新当前参数
    ///
    /// 逐字段浅覆盖，未给出的字段保持原值。任一字段非法则整体拒绝，
    /// 当前参数不变。成功后触发通知。
    pub fn set_parameters(&mut self, partial: &PartialRagParameters) -> Result<(), ParameterError> {
        let report = params::validate(partial);
        if !report.is_valid {
            return Err(ParameterError::Validation {
                errors: report.errors,
            });
        }
        self.current = self.current.merged_with(partial);
        self.notify();
        Ok(())
    }

    /// 应用命名预设，整体替换当前参数（与合并式更新相对）
    pub fn apply_preset(&mut self, name: &str) -> Result<(), ParameterError> {
        let kind: PresetKind = name.parse().map_err(|_| ParameterError::UnknownPreset {
            name: name.to_string(),
        })?;
        self.current = kind.parameters();
        self.notify();
        Ok(())
    }

    /// 恢复默认参数，总是成功
    pub fn reset_to_defaults(&mut self) {
        self.current = RagParameters::default();
        self.notify();
    }

    /// 设置生成中标志，不影响当前参数
    pub fn set_generating(&mut self, flag: bool) {
        self.is_generating = flag;
        self.notify();
    }

    /// 记录一次生成运行并返回其标识
    ///
    /// 参数由调用方保证已经过校验；不修改当前参数，不触发通知。
    pub fn record_generation(&mut self, parameters: RagParameters, result: Value) -> Uuid {
        self.last_used = Some(parameters);
        self.history.push(parameters, result)
    }

    /// 注册观察者，追加到有序列表末尾，允许重复注册
    pub fn subscribe(&mut self, observer: Arc<dyn ParameterObserver>) {
        self.observers.push(observer);
    }

    /// 注销观察者，移除所有匹配的注册项
    #[allow(dead_code)]
    pub fn unsubscribe(&mut self, observer: &Arc<dyn ParameterObserver>) {
        self.observers.retain(|registered| !Arc::ptr_eq(registered, observer));
    }

    /// 当前状态的防御性快照
    pub fn state(&self) -> StateSnapshot {
        StateSnapshot {
            current_parameters: self.current,
            presets: self.presets.clone(),
            is_generating: self.is_generating,
            last_used_parameters: self.last_used,
            generation_history: self.history.snapshot(),
        }
    }

    /// 按注册顺序同步通知全部观察者
    ///
    /// 同一轮通知共享同一份快照；单个观察者的panic被隔离，不影响
    /// 后续观察者，也不影响管理器状态。
    fn notify(&self) {
        let snapshot = self.state();
        for observer in &self.observers {
            let outcome = catch_unwind(AssertUnwindSafe(|| observer.on_state_changed(&snapshot)));
            if outcome.is_err() {
                eprintln!("⚠️ 观察者回调发生panic，已跳过该观察者");
            }
        }
    }
}
