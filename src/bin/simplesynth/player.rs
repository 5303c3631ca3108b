//! One-shot playback of a rendered buffer on the default output device.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, RingBuffer};

/// About 0.75 s at 44.1 kHz; refilled from the UI loop every frame.
const RING_CAPACITY: usize = 32_768;

/// Audio output fed through a lock-free ring buffer.
///
/// The audio callback only pops samples; the UI thread pushes as many as fit
/// whenever it gets a chance. An empty ring plays silence.
pub struct Player {
    _stream: cpal::Stream,
    producer: Producer<f32>,
    played: Arc<AtomicUsize>,
    sample_rate: u32,
}

impl Player {
    /// Open the default output device, optionally at a requested rate.
    pub fn open(requested_rate: Option<u32>) -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let supported = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let channels = supported.channels() as usize;
        let mut config: cpal::StreamConfig = supported.into();
        if let Some(rate) = requested_rate {
            config.sample_rate = cpal::SampleRate(rate);
        }
        let sample_rate = config.sample_rate.0;

        let (producer, mut consumer) = RingBuffer::<f32>::new(RING_CAPACITY);
        let played = Arc::new(AtomicUsize::new(0));
        let played_in_callback = played.clone();

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _| {
                    let mut popped = 0;
                    // Mono to all channels
                    for frame in data.chunks_mut(channels) {
                        let sample = match consumer.pop() {
                            Ok(sample) => {
                                popped += 1;
                                sample
                            }
                            Err(_) => 0.0,
                        };
                        frame.fill(sample);
                    }
                    played_in_callback.fetch_add(popped, Ordering::Relaxed);
                },
                |err| tracing::error!("audio stream error: {err}"),
                None,
            )
            .wrap_err_with(|| format!("failed to open output stream at {sample_rate} Hz"))?;
        stream.play().wrap_err("failed to start output stream")?;

        tracing::info!(sample_rate, channels, "audio output ready");

        Ok(Self {
            _stream: stream,
            producer,
            played,
            sample_rate,
        })
    }

    /// Rate of the device stream.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Push as much of `samples` as the ring has room for; returns how many
    /// were queued.
    pub fn feed(&mut self, samples: &[f32]) -> usize {
        let room = self.producer.slots().min(samples.len());
        for (queued, &sample) in samples[..room].iter().enumerate() {
            if self.producer.push(sample).is_err() {
                return queued;
            }
        }
        room
    }

    /// Samples the device has consumed since the last [`Player::reset_position`].
    pub fn position(&self) -> usize {
        self.played.load(Ordering::Relaxed)
    }

    pub fn reset_position(&self) {
        self.played.store(0, Ordering::Relaxed);
    }
}
