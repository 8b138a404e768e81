use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // 提前加载 .env，使得 RUST_LOG / LOG_FORMAT 等环境变量生效
    dotenv().ok();
    // 复用公共日志初始化工具；LOG_FORMAT=json 切换为结构化 JSON 输出
    common::utils::logging::init_logging_from_env();
    info!(service = "relay", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    // 基础服务上下文（不含敏感信息）
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic 钩子：捕获异常并输出错误日志，便于排查问题
    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "relay",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    // 读取线程配置（优先 config.toml，其次环境变量 TOKIO_WORKER_THREADS）
    let worker_threads = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()),
    };

    // 构建 Tokio 运行时（允许根据配置调整线程数）
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "relay", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    // 服务启动事件
    info!(
        service = "relay",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "relay service starting"
    );

    // 运行服务，并监听 Ctrl+C 优雅停机
    rt.block_on(async move {
        tokio::select! {
            res = server::run() => {
                match res {
                    Ok(()) => {
                        info!(service = "relay", event = "stop", %service_id, pid, "relay stopped normally");
                        std::process::ExitCode::SUCCESS
                    }
                    Err(e) => {
                        error!(service = "relay", event = "run_failed", error = %e, "server::run returned error");
                        std::process::ExitCode::FAILURE
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(service = "relay", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                // 当前 server::run 不支持外部优雅停机信号，这里直接退出进程
                // 如需更优雅的停机，应在服务内部支持 with_graceful_shutdown。
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
