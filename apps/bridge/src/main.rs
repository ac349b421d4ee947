//! 流处理引擎桥接服务。
//!
//! MQTT 写请求 → 写命令总线；总线产生的点位值 → MQTT 遥测；附带状态接口。
//! 接收循环停止时进程以错误退出，由外部进程管理器负责重启。

mod handlers;
mod routes;

use bridge_config::BridgeConfig;
use bridge_control::{InMemoryCommandBus, WriteDispatcher};
use bridge_ingest::{InboundReceiveLoop, IngestError};
use bridge_publish::OutboundPublisher;
use bridge_telemetry::{BridgeMetrics, init_tracing};
use bridge_transport::{BridgeContext, MqttTransport, MqttTransportConfig};
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) ctx: BridgeContext,
    pub(crate) metrics: Arc<BridgeMetrics>,
}

type AppResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> AppResult {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = BridgeConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    // MQTT 通道：订阅写请求 topic，向遥测 topic 发布
    let (transport, eventloop) = MqttTransport::connect(MqttTransportConfig {
        host: config.mqtt_host.clone(),
        port: config.mqtt_port,
        username: config.mqtt_username.clone(),
        password: config.mqtt_password.clone(),
        write_topic: config.mqtt_write_topic.clone(),
        telemetry_topic: config.mqtt_telemetry_topic.clone(),
        qos: config.mqtt_qos,
        capacity: config.mqtt_capacity,
    })
    .await?;
    let metrics = Arc::new(BridgeMetrics::new());
    let ctx = BridgeContext::new(Arc::new(transport), metrics.clone());

    // 命令总线回环：写入后的点位值作为遥测发回
    let (telemetry_tx, telemetry_rx) = tokio::sync::mpsc::unbounded_channel();
    let bus = Arc::new(InMemoryCommandBus::new().with_telemetry(telemetry_tx));
    let publisher = OutboundPublisher::new(&ctx).spawn_drain(telemetry_rx);
    let receive_loop = InboundReceiveLoop::new(ctx.clone(), WriteDispatcher::new(bus)).spawn();

    info!(
        target: "bridge.app",
        mqtt_host = %config.mqtt_host,
        mqtt_port = config.mqtt_port,
        write_topic = %config.mqtt_write_topic,
        telemetry_topic = %config.mqtt_telemetry_topic,
        "bridge_started"
    );

    let result: AppResult = if config.status_enabled {
        let app = routes::create_router(AppState { ctx, metrics });
        let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
        info!(target: "bridge.app", http_addr = %config.http_addr, "status_server_listening");
        tokio::select! {
            joined = receive_loop => loop_finished(joined),
            served = axum::serve(listener, app).into_future() => served.map_err(Into::into),
        }
    } else {
        loop_finished(receive_loop.await)
    };

    shutdown(&[&publisher, &eventloop]);
    result
}

fn loop_finished(joined: Result<Result<(), IngestError>, JoinError>) -> AppResult {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => {
            error!(target: "bridge.app", error = %err, "receive_loop_stopped");
            Err(err.into())
        }
        Err(err) => {
            error!(target: "bridge.app", error = %err, "receive_loop_panicked");
            Err(err.into())
        }
    }
}

fn shutdown(tasks: &[&JoinHandle<()>]) {
    for task in tasks {
        task.abort();
    }
}
