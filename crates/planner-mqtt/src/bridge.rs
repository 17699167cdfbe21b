use crate::error::{BridgeError, Result};
use crate::handler::PathHandler;
use crate::publisher::{qos_from_level, MqttPublisher, Publisher};
use planner_config::MqttConfig;
use planner_core::PathBuilder;
use rumqttc::{
    AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS,
    SubscribeReasonCode,
};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Requests buffered between the client handle and the event loop.
const CLIENT_CAPACITY: usize = 10;

/// Pause before polling again after a connection error.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Upper bound on the first CONNACK plus SUBACK exchange.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

/// How long to wait for the DISCONNECT packet to go out on shutdown.
const DISCONNECT_GRACE: Duration = Duration::from_secs(1);

/// A message received on the items topic.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub topic: String,
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop after the first successfully published path
    pub once: bool,
    /// Stop after this long regardless of traffic
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub published: usize,
    pub failed: usize,
}

/// A configured, not-yet-running bridge.
pub struct Bridge {
    client: AsyncClient,
    eventloop: EventLoop,
    items_topic: String,
    qos: QoS,
    handler: PathHandler<MqttPublisher>,
}

impl Bridge {
    pub fn new(config: &MqttConfig, builder: PathBuilder) -> Result<Self> {
        let qos = qos_from_level(config.qos)?;

        let client_id = format!("{}_planner", config.client_id);
        let mut options = MqttOptions::new(client_id, config.broker.clone(), config.port);
        options.set_keep_alive(Duration::from_secs(config.keepalive_secs));
        if let Some(username) = &config.username {
            options.set_credentials(
                username.clone(),
                config.password.clone().unwrap_or_default(),
            );
        }

        let (client, eventloop) = AsyncClient::new(options, CLIENT_CAPACITY);
        let handler = PathHandler::new(
            builder,
            MqttPublisher::new(client.clone(), qos),
            config.topics.global_path.clone(),
        );

        info!(
            "bridge configured for {}:{} ({} -> {})",
            config.broker, config.port, config.topics.items, config.topics.global_path
        );

        Ok(Self {
            client,
            eventloop,
            items_topic: config.topics.items.clone(),
            qos,
            handler,
        })
    }

    /// Connect, subscribe, then run until shutdown, timeout or (with `once`)
    /// the first published path.
    ///
    /// A failure of the first connection or subscription is returned as an
    /// error. Once subscribed, connection errors are logged and retried.
    pub async fn run(
        self,
        shutdown: watch::Receiver<bool>,
        options: RunOptions,
    ) -> Result<RunSummary> {
        let Bridge {
            client,
            mut eventloop,
            items_topic,
            qos,
            handler,
        } = self;

        let (inbound_tx, mut inbound_rx) = mpsc::unbounded_channel();
        let startup =
            connect_and_subscribe(&mut eventloop, &client, &items_topic, qos, &inbound_tx);
        match tokio::time::timeout(STARTUP_TIMEOUT, startup).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(BridgeError::Subscribe {
                    topic: items_topic.clone(),
                    reason: format!("no SUBACK within {:?}", STARTUP_TIMEOUT),
                })
            }
        }

        let connection = tokio::spawn(drive_connection(
            eventloop,
            client.clone(),
            items_topic,
            qos,
            inbound_tx,
        ));

        let summary = serve(&handler, &mut inbound_rx, shutdown, options).await;

        disconnect(&client, connection).await;
        info!(
            published = summary.published,
            failed = summary.failed,
            "bridge stopped"
        );
        Ok(summary)
    }
}

/// Handle inbound messages one at a time until told to stop.
///
/// Stops when `shutdown` becomes `true` (or its sender is dropped), when the
/// timeout in `options` elapses, when `inbound` closes, or after the first
/// published path if `options.once` is set.
pub async fn serve<P: Publisher>(
    handler: &PathHandler<P>,
    inbound: &mut mpsc::UnboundedReceiver<Inbound>,
    mut shutdown: watch::Receiver<bool>,
    options: RunOptions,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let deadline = options.timeout.map(|t| Instant::now() + t);

    if *shutdown.borrow() {
        return summary;
    }

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    info!("shutdown requested");
                    break;
                }
            }
            _ = sleep_until(deadline) => {
                info!("run timeout reached");
                break;
            }
            message = inbound.recv() => {
                let Some(message) = message else {
                    warn!("connection task ended");
                    break;
                };
                debug!(topic = %message.topic, bytes = message.payload.len(), "inbound message");
                match handler.handle(&message.payload).await {
                    Ok(_) => {
                        summary.published += 1;
                        if options.once {
                            break;
                        }
                    }
                    Err(e) => {
                        summary.failed += 1;
                        error!("failed to handle message: {}", e);
                    }
                }
            }
        }
    }

    summary
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Poll until the broker has accepted the connection and the items subscription.
async fn connect_and_subscribe(
    eventloop: &mut EventLoop,
    client: &AsyncClient,
    items_topic: &str,
    qos: QoS,
    inbound: &mpsc::UnboundedSender<Inbound>,
) -> Result<()> {
    loop {
        match eventloop.poll().await? {
            Event::Incoming(Packet::ConnAck(ack)) => {
                if ack.code != ConnectReturnCode::Success {
                    return Err(rumqttc::ConnectionError::ConnectionRefused(ack.code).into());
                }
                info!("connected; subscribing to {}", items_topic);
                client.try_subscribe(items_topic, qos)?;
            }
            Event::Incoming(Packet::SubAck(ack)) => {
                if ack
                    .return_codes
                    .iter()
                    .any(|code| matches!(code, SubscribeReasonCode::Failure))
                {
                    return Err(BridgeError::Subscribe {
                        topic: items_topic.to_string(),
                        reason: "rejected by broker".to_string(),
                    });
                }
                info!("subscribed {}", items_topic);
                return Ok(());
            }
            Event::Incoming(Packet::Publish(publish)) => {
                let _ = inbound.send(Inbound {
                    topic: publish.topic,
                    payload: publish.payload.to_vec(),
                });
            }
            _ => {}
        }
    }
}

/// Poll the MQTT event loop, (re)subscribing on every CONNACK and forwarding
/// publishes to the serving loop.
async fn drive_connection(
    mut eventloop: EventLoop,
    client: AsyncClient,
    items_topic: String,
    qos: QoS,
    inbound: mpsc::UnboundedSender<Inbound>,
) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                if ack.code != ConnectReturnCode::Success {
                    warn!("broker refused connection: {:?}", ack.code);
                    continue;
                }
                info!("connected; subscribing to {}", items_topic);
                if let Err(e) = client.try_subscribe(items_topic.clone(), qos) {
                    error!("subscribe to {} failed: {}", items_topic, e);
                }
            }
            Ok(Event::Incoming(Packet::SubAck(_))) => {
                info!("subscribed {}", items_topic);
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                let message = Inbound {
                    topic: publish.topic,
                    payload: publish.payload.to_vec(),
                };
                if inbound.send(message).is_err() {
                    break;
                }
            }
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                debug!("disconnect sent");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("connection error: {}, retrying...", e);
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

async fn disconnect(client: &AsyncClient, connection: JoinHandle<()>) {
    if let Err(e) = client.try_disconnect() {
        debug!("disconnect not queued: {}", e);
    }
    let abort = connection.abort_handle();
    if tokio::time::timeout(DISCONNECT_GRACE, connection).await.is_err() {
        abort.abort();
    }
}
