//! MQTT 通道实现。
//!
//! 事件循环在独立任务中轮询，收到写请求 topic 上的报文后转入接收缓冲；
//! 转入不等待接收方，处理缓慢时事件循环仍持续轮询（心跳与出站发布不受影响）。
//! 入站积压由 broker 侧流控约束。
//! 事件循环出错时把错误作为一次接收失败交给接收方，随后停止转发（不自动重连）。

use crate::{Transport, TransportError};
use async_trait::async_trait;
use bytes::Bytes;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, warn};

/// MQTT 通道配置。
#[derive(Debug, Clone)]
pub struct MqttTransportConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub write_topic: String,
    pub telemetry_topic: String,
    pub qos: u8,
    /// 客户端请求缓冲容量，满时 `try_send` 立即失败。
    pub capacity: usize,
}

/// MQTT 通道。
pub struct MqttTransport {
    client: AsyncClient,
    telemetry_topic: String,
    qos: QoS,
    inbound: Mutex<mpsc::UnboundedReceiver<Result<Bytes, TransportError>>>,
}

impl MqttTransport {
    pub async fn connect(
        config: MqttTransportConfig,
    ) -> Result<(Self, tokio::task::JoinHandle<()>), TransportError> {
        let client_id = format!("bridge-{}", uuid::Uuid::new_v4());
        let mut options = MqttOptions::new(client_id, config.host, config.port);
        options.set_keep_alive(Duration::from_secs(30));
        if let (Some(username), Some(password)) = (config.username, config.password) {
            options.set_credentials(username, password);
        }
        let capacity = config.capacity.max(1);
        let qos = qos_from_u8(config.qos);
        let (client, mut eventloop) = AsyncClient::new(options, capacity);
        client
            .subscribe(config.write_topic.clone(), qos)
            .await
            .map_err(|err| TransportError::Receive(err.to_string()))?;
        info!(
            target: "bridge.transport",
            write_topic = %config.write_topic,
            telemetry_topic = %config.telemetry_topic,
            "mqtt_transport_subscribed"
        );

        let (sender, receiver) = mpsc::unbounded_channel();
        let write_topic = config.write_topic;
        let handle = tokio::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(event) => {
                        if !forward_event(event, &write_topic, &sender) {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(target: "bridge.transport", "mqtt eventloop error: {}", err);
                        let _ = sender.send(Err(TransportError::Receive(err.to_string())));
                        break;
                    }
                }
            }
        });

        Ok((
            Self {
                client,
                telemetry_topic: config.telemetry_topic,
                qos,
                inbound: Mutex::new(receiver),
            },
            handle,
        ))
    }
}

#[async_trait]
impl Transport for MqttTransport {
    async fn recv(&self) -> Result<Bytes, TransportError> {
        let mut inbound = self.inbound.lock().await;
        match inbound.recv().await {
            Some(result) => result,
            None => Err(TransportError::Closed),
        }
    }

    fn try_send(&self, message: Bytes) -> Result<(), TransportError> {
        self.client
            .try_publish(self.telemetry_topic.clone(), self.qos, false, message.to_vec())
            .map_err(|err| TransportError::Send(err.to_string()))
    }
}

/// 把写请求 topic 上的报文转入接收缓冲；接收方已关闭时返回 false。
fn forward_event(
    event: Event,
    write_topic: &str,
    sender: &UnboundedSender<Result<Bytes, TransportError>>,
) -> bool {
    match event {
        Event::Incoming(Packet::Publish(publish)) if publish.topic == write_topic => {
            sender.send(Ok(publish.payload)).is_ok()
        }
        _ => true,
    }
}

fn qos_from_u8(value: u8) -> QoS {
    match value {
        0 => QoS::AtMostOnce,
        1 => QoS::AtLeastOnce,
        2 => QoS::ExactlyOnce,
        _ => QoS::AtMostOnce,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qos_maps_known_levels() {
        assert_eq!(qos_from_u8(0), QoS::AtMostOnce);
        assert_eq!(qos_from_u8(1), QoS::AtLeastOnce);
        assert_eq!(qos_from_u8(2), QoS::ExactlyOnce);
        assert_eq!(qos_from_u8(9), QoS::AtMostOnce);
    }

    fn publish(topic: &str, payload: &[u8]) -> Event {
        Event::Incoming(Packet::Publish(rumqttc::Publish::new(
            topic,
            QoS::AtMostOnce,
            payload.to_vec(),
        )))
    }

    #[test]
    fn forwarding_never_waits_for_a_slow_receiver() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        for index in 0..1000u32 {
            let payload = index.to_be_bytes();
            assert!(forward_event(publish("bridge/write", &payload), "bridge/write", &sender));
        }
        for index in 0..1000u32 {
            let message = receiver.try_recv().expect("buffered").expect("payload");
            assert_eq!(message.as_ref(), index.to_be_bytes().as_slice());
        }
    }

    #[test]
    fn forwarding_skips_other_topics_and_stops_after_receiver_drop() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        assert!(forward_event(publish("bridge/telemetry", b"x"), "bridge/write", &sender));
        assert!(forward_event(Event::Incoming(Packet::PingResp), "bridge/write", &sender));
        assert!(receiver.try_recv().is_err());

        drop(receiver);
        assert!(!forward_event(publish("bridge/write", b"x"), "bridge/write", &sender));
    }
}
