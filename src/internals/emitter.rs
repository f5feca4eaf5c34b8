use async_trait::async_trait;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::Interval,
};
use tokio_util::sync::CancellationToken;

/// Something that, once spawned, emits [`Self::Emitted`] values via an [`mpsc::channel`].
///
/// The emitter keeps running until the given [`CancellationToken`] is cancelled.
#[async_trait]
pub trait Emitter {
    type Emitted: Send;

    /// Spawn the emitter task: returns the [`mpsc::Receiver`] of the emitted values,
    /// and the [`JoinHandle`] of the task.
    fn spawn(
        &self,
        shutdown_token: CancellationToken,
    ) -> (mpsc::Receiver<Self::Emitted>, JoinHandle<()>);

    /// Emit a value, waiting for the channel to have capacity for it.
    async fn emit(
        sender: &mpsc::Sender<Self::Emitted>,
        emitted: Self::Emitted,
    ) -> Result<(), mpsc::error::SendError<Self::Emitted>> {
        sender.send(emitted).await
    }

    /// Emit a value, then wait for the next `interval` tick.
    async fn emit_with_interval(
        sender: &mpsc::Sender<Self::Emitted>,
        emitted: Self::Emitted,
        interval: &mut Interval,
    ) -> Result<(), mpsc::error::SendError<Self::Emitted>> {
        Self::emit(sender, emitted).await?;
        interval.tick().await;
        Ok(())
    }
}
