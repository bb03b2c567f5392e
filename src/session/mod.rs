use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::manager::{
    ParameterError, ParameterObserver, RagParameterManager, StateSnapshot,
};
use crate::params::{self, PartialRagParameters, RagParameters};
use crate::presets;
use crate::store::PresetStore;

/// 会话上下文
///
/// 管理器的每个操作都在锁内整体完成，并发调用方看不到半应用的变更。
#[derive(Clone)]
pub struct SessionContext {
    /// 配置
    pub config: Config,
    /// 参数管理器
    pub manager: Arc<RwLock<RagParameterManager>>,
}

impl SessionContext {
    /// 创建新的会话上下文
    pub fn new(config: Config) -> Self {
        Self {
            config,
            manager: Arc::new(RwLock::new(RagParameterManager::new())),
        }
    }

    /// 应用命名预设
    pub async fn apply_preset(&self, name: &str) -> Result<(), ParameterError> {
        let mut manager = self.manager.write().await;
        manager.apply_preset(name)
    }

    /// 合并式更新参数
    pub async fn set_parameters(&self, partial: &PartialRagParameters) -> Result<(), ParameterError> {
        let mut manager = self.manager.write().await;
        manager.set_parameters(partial)
    }

    /// 恢复默认参数
    #[allow(dead_code)]
    pub async fn reset_to_defaults(&self) {
        let mut manager = self.manager.write().await;
        manager.reset_to_defaults();
    }

    /// 设置生成中标志
    #[allow(dead_code)]
    pub async fn set_generating(&self, flag: bool) {
        let mut manager = self.manager.write().await;
        manager.set_generating(flag);
    }

    /// 以当前参数记录一次生成运行，返回其标识
    #[allow(dead_code)]
    pub async fn record_generation(&self, result: Value) -> Uuid {
        let mut manager = self.manager.write().await;
        let parameters = manager.state().current_parameters;
        manager.record_generation(parameters, result)
    }

    /// 注册观察者
    pub async fn subscribe(&self, observer: Arc<dyn ParameterObserver>) {
        let mut manager = self.manager.write().await;
        manager.subscribe(observer);
    }

    /// 当前状态快照
    pub async fn snapshot(&self) -> StateSnapshot {
        let manager = self.manager.read().await;
        manager.state()
    }
}

/// 详细日志观察者，把每次状态变更打印到标准输出
struct LoggingObserver;

impl ParameterObserver for LoggingObserver {
    fn on_state_changed(&self, state: &StateSnapshot) {
        println!(
            "🔄 检索参数已更新: threshold={}, top_k={}, chunk_size={}, overlap={}",
            state.current_parameters.similarity_threshold,
            state.current_parameters.top_k,
            state.current_parameters.chunk_size,
            state.current_parameters.overlap,
        );
    }
}

/// 启动参数配置会话
///
/// 解析顺序：预设 → 配置文件/CLI覆盖项。最终生效的参数以JSON输出，
/// 供外部的生成管线消费。
pub async fn launch(config: &Config) -> Result<()> {
    if config.emit_schema {
        let schema = schemars::schema_for!(RagParameters);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    if config.list_presets {
        for preset in presets::catalog() {
            println!(
                "{} ({}): {} [threshold={}, top_k={}, chunk_size={}, overlap={}]",
                preset.display_name,
                preset.kind,
                preset.description,
                preset.parameters.similarity_threshold,
                preset.parameters.top_k,
                preset.parameters.chunk_size,
                preset.parameters.overlap,
            );
        }
        return Ok(());
    }

    // 先把覆盖项整体校验一遍，失败时逐条报告
    let report = params::validate(&config.overrides);
    if !report.is_valid {
        for error in &report.errors {
            eprintln!("❌ {}", error);
        }
        anyhow::bail!("invalid parameter overrides");
    }

    if config.validate_only {
        println!("✅ 参数校验通过");
        return Ok(());
    }

    let context = SessionContext::new(config.clone());

    if config.verbose {
        println!("🔄 正在初始化会话: {}", config.get_session_name());
        context.subscribe(Arc::new(LoggingObserver)).await;
    }

    // 先应用预设，再叠加覆盖项
    context.apply_preset(&config.preset.to_string()).await?;
    context.set_parameters(&config.overrides).await?;

    // 用户自定义预设只做加载提示，应用与否由上层界面决定
    let store = PresetStore::new(&config.preset_store_path);
    match store.load() {
        Ok(saved) if !saved.is_empty() => {
            println!("📦 已加载 {} 个用户自定义预设", saved.len());
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("⚠️ 读取用户预设失败: {}", e);
        }
    }

    let snapshot = context.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot.current_parameters)?);

    Ok(())
}
