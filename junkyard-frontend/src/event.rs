use futures::{FutureExt, StreamExt};
use junkyard_inventory::File;
use junkyard_keymap::{
    conversion,
    key::Key,
    message::{KeySequence, KeymapMessage},
};
use tokio::{
    select,
    sync::{
        mpsc::{self, Receiver},
        oneshot,
    },
};

use crate::{
    error::AppError,
    preview::Preview,
    task::{Task, TaskManager},
};

#[derive(Debug)]
pub struct Envelope {
    pub messages: Vec<Message>,
    pub sequence: KeySequence,
    pub source: MessageSource,
}

impl Envelope {
    pub fn from_task(messages: Vec<Message>) -> Self {
        Self {
            messages,
            sequence: KeySequence::None,
            source: MessageSource::Task,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageSource {
    Task,
    Terminal,
    User,
}

#[derive(PartialEq)]
pub enum Message {
    Key(Key),
    Keymap(KeymapMessage),
    InventoryLoaded(Vec<File>),
    LoadFailed(String),
    PreviewLoaded(Preview, Option<u64>),
    Resize(u16, u16),
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::Key(key) => write!(f, "Key({})", key),
            Message::Keymap(msg) => write!(f, "Keymap({:?})", msg),
            Message::InventoryLoaded(files) => write!(f, "InventoryLoaded({} files)", files.len()),
            Message::LoadFailed(error) => write!(f, "LoadFailed({:?})", error),
            Message::PreviewLoaded(preview, size) => {
                write!(f, "PreviewLoaded({:?}, {:?})", preview.path(), size)
            }
            Message::Resize(x, y) => write!(f, "Resize({}, {})", x, y),
        }
    }
}

pub struct Emitter {
    cancellation: Option<oneshot::Sender<oneshot::Sender<bool>>>,
    tasks: TaskManager,
    pub receiver: Receiver<Envelope>,
}

impl Emitter {
    pub fn start() -> Self {
        let (sender, receiver) = mpsc::channel(1);
        let tasks = TaskManager::new(sender.clone());

        let (cancellation, cancellation_receiver) = oneshot::channel();
        start_crossterm_listener(cancellation_receiver, sender);

        Self {
            cancellation: Some(cancellation),
            tasks,
            receiver,
        }
    }

    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        if let Some(cancellation) = self.cancellation.take() {
            let (sender, receiver) = oneshot::channel();
            if let Err(error) = cancellation.send(sender) {
                tracing::error!("sending cancellation failed: {:?}", error);
            } else if let Err(error) = receiver.await {
                tracing::warn!("crossterm listener did not acknowledge shutdown: {:?}", error);
            }
        }

        self.tasks.finishing().await
    }

    pub fn run(&mut self, task: Task) {
        self.tasks.run(task);
    }
}

/// Keys are forwarded unresolved. The model resolves them once it is ready
/// for input, so the keymap mode always matches the state they are applied to.
fn start_crossterm_listener(
    mut cancellation_receiver: oneshot::Receiver<oneshot::Sender<bool>>,
    sender: mpsc::Sender<Envelope>,
) {
    tokio::spawn(async move {
        let mut reader = crossterm::event::EventStream::new();

        loop {
            let crossterm_event = reader.next().fuse();

            select! {
                cancellation = &mut cancellation_receiver => {
                    if let Ok(acknowledge) = cancellation {
                        let _ = acknowledge.send(true);
                    }
                    break
                }
                Some(Ok(event)) = crossterm_event => {
                    let envelope = match handle_crossterm_event(event) {
                        Some(it) => it,
                        None => continue,
                    };

                    if !forward(envelope, &sender, &mut cancellation_receiver).await {
                        break;
                    }
                }
                else => break,
            }
        }
    });
}

/// Sends `envelope` unless a shutdown arrives first. Nobody drains the channel
/// once the app loop stopped, so the send alone could wait forever. Returns
/// false once the listener has to stop.
async fn forward(
    envelope: Envelope,
    sender: &mpsc::Sender<Envelope>,
    cancellation_receiver: &mut oneshot::Receiver<oneshot::Sender<bool>>,
) -> bool {
    select! {
        cancellation = cancellation_receiver => {
            if let Ok(acknowledge) = cancellation {
                let _ = acknowledge.send(true);
            }
            false
        }
        result = sender.send(envelope) => result.is_ok(),
    }
}

fn handle_crossterm_event(event: crossterm::event::Event) -> Option<Envelope> {
    match event {
        crossterm::event::Event::Key(key) => Some(Envelope {
            messages: vec![Message::Key(conversion::to_key(&key)?)],
            sequence: KeySequence::None,
            source: MessageSource::User,
        }),
        crossterm::event::Event::Resize(x, y) => Some(Envelope {
            messages: vec![Message::Resize(x, y)],
            sequence: KeySequence::None,
            source: MessageSource::Terminal,
        }),
        crossterm::event::Event::FocusLost
        | crossterm::event::Event::FocusGained
        | crossterm::event::Event::Paste(_)
        | crossterm::event::Event::Mouse(_) => None,
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use tokio::sync::{mpsc, oneshot};

    use super::{forward, Envelope, Message};

    #[tokio::test]
    async fn forward_delivers_when_channel_has_room() {
        let (sender, mut receiver) = mpsc::channel(1);
        let (_cancellation, mut cancellation_receiver) = oneshot::channel();

        let envelope = Envelope::from_task(vec![Message::Resize(1, 2)]);
        assert!(forward(envelope, &sender, &mut cancellation_receiver).await);

        let received = receiver.recv().await.unwrap();
        assert_eq!(vec![Message::Resize(1, 2)], received.messages);
    }

    #[tokio::test]
    async fn forward_acknowledges_shutdown_while_channel_is_full() {
        let (sender, _receiver) = mpsc::channel(1);
        sender.send(Envelope::from_task(Vec::new())).await.unwrap();

        let (cancellation, mut cancellation_receiver) = oneshot::channel();
        let forwarding = tokio::spawn(async move {
            forward(
                Envelope::from_task(Vec::new()),
                &sender,
                &mut cancellation_receiver,
            )
            .await
        });

        let (acknowledge, acknowledged) = oneshot::channel();
        cancellation.send(acknowledge).unwrap();

        let acknowledged = tokio::time::timeout(Duration::from_secs(1), acknowledged).await;
        assert!(matches!(acknowledged, Ok(Ok(true))));
        assert!(!forwarding.await.unwrap());
    }
}
