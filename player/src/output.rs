//! Output device handling.
//!
//! `cpal::Stream` is not `Send`, so the stream lives on a dedicated thread
//! that owns it for its whole life; everyone else talks to that thread over
//! a command channel and writes voices through the shared mixer.

use std::sync::{Arc, Mutex};
use std::thread;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use crossbeam_channel::{unbounded, Receiver, Sender};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, error};

use crate::mixer::Mixer;

/// Error opening or driving the output device.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("no output device available")]
    NoDevice,

    #[error("unsupported sample format {0:?}")]
    Format(SampleFormat),

    #[error("output config error: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("stream build error: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("stream start error: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("audio thread failed to start: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("audio thread is gone")]
    ThreadGone,
}

enum Command {
    Resume {
        reply: oneshot::Sender<Result<(), OutputError>>,
    },
    Shutdown,
}

/// A live connection to the default output device.
///
/// Dropping the output shuts the device thread down, which drops the stream
/// and abandons any scheduled voices mid-flight.
pub struct DeviceOutput {
    mixer: Arc<Mutex<Mixer>>,
    commands: Sender<Command>,
    join: Option<thread::JoinHandle<()>>,
}

impl DeviceOutput {
    /// Opens the default output device on a dedicated thread and starts the
    /// stream. Blocks until the device reports ready or failed.
    pub fn open() -> Result<Self, OutputError> {
        let (cmd_tx, cmd_rx) = unbounded();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel();

        let join = thread::Builder::new()
            .name("shadowsong-audio".into())
            .spawn(move || run_device_thread(cmd_rx, ready_tx))?;

        match ready_rx.recv() {
            Ok(Ok(mixer)) => Ok(Self {
                mixer,
                commands: cmd_tx,
                join: Some(join),
            }),
            Ok(Err(err)) => {
                let _ = join.join();
                Err(err)
            }
            Err(_) => Err(OutputError::ThreadGone),
        }
    }

    /// Returns a cheap handle for scheduling voices and resuming the stream.
    pub fn handle(&self) -> OutputHandle {
        OutputHandle {
            mixer: Arc::clone(&self.mixer),
            commands: self.commands.clone(),
        }
    }

    /// Sample rate of the open stream.
    pub fn sample_rate(&self) -> u32 {
        lock_mixer(&self.mixer).sample_rate()
    }
}

impl Drop for DeviceOutput {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Cheap cloneable handle onto an open device output.
#[derive(Clone)]
pub struct OutputHandle {
    mixer: Arc<Mutex<Mixer>>,
    commands: Sender<Command>,
}

impl OutputHandle {
    /// Asks the device thread to (re)start the stream and waits for the ack.
    /// Platforms may pause streams behind the program's back; a `play` on an
    /// already-running stream is a no-op.
    pub async fn resume(&self) -> Result<(), OutputError> {
        let (reply, ack) = oneshot::channel();
        self.commands
            .send(Command::Resume { reply })
            .map_err(|_| OutputError::ThreadGone)?;
        ack.await.map_err(|_| OutputError::ThreadGone)?
    }

    /// Starts a voice at the device clock's current position.
    pub fn spawn_voice(&self, frequency: f64, duration: f64) {
        lock_mixer(&self.mixer).spawn(frequency, duration);
    }
}

fn lock_mixer(mixer: &Mutex<Mixer>) -> std::sync::MutexGuard<'_, Mixer> {
    mixer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

type Ready = Result<Arc<Mutex<Mixer>>, OutputError>;

fn run_device_thread(commands: Receiver<Command>, ready: std::sync::mpsc::Sender<Ready>) {
    let (stream, mixer) = match open_stream() {
        Ok(pair) => pair,
        Err(err) => {
            let _ = ready.send(Err(err));
            return;
        }
    };
    let _ = ready.send(Ok(mixer));

    while let Ok(command) = commands.recv() {
        match command {
            Command::Resume { reply } => {
                let _ = reply.send(stream.play().map_err(OutputError::from));
            }
            Command::Shutdown => break,
        }
    }
    // The stream drops here, cutting off anything still scheduled.
}

fn open_stream() -> Result<(cpal::Stream, Arc<Mutex<Mixer>>), OutputError> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(OutputError::NoDevice)?;

    let config = device.default_output_config()?;
    if config.sample_format() != SampleFormat::F32 {
        return Err(OutputError::Format(config.sample_format()));
    }
    let channels = config.channels() as usize;
    let sample_rate = config.sample_rate().0;
    let stream_config: StreamConfig = config.into();

    let mixer = Arc::new(Mutex::new(Mixer::new(sample_rate)));
    let callback_mixer = Arc::clone(&mixer);

    let stream = device.build_output_stream(
        &stream_config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            lock_mixer(&callback_mixer).fill(data, channels);
        },
        |err| error!(error = %err, "audio output error"),
        None,
    )?;
    stream.play()?;

    debug!(sample_rate, channels, "output device opened");
    Ok((stream, mixer))
}
