//! Offline processing of 16-bit PCM WAV files.
//!
//! Mono files are processed as is, stereo files are averaged to mono and the
//! reverb output is written to both channels. The output has the same format as
//! the input.

use std::io::{Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::{AudioNode, Controls, Error, ReverbConfig, SchroederReverb};

#[derive(Debug, thiserror::Error)]
pub enum WavError {
    #[error("bad wav file: {0}")]
    Wav(#[from] hound::Error),

    #[error("unsupported WAV format {format:?} {bits}-bit, only 16-bit PCM is supported")]
    UnsupportedFormat { format: SampleFormat, bits: u16 },

    #[error("unsupported channel count {0}, expected 1 or 2")]
    UnsupportedChannels(u16),

    #[error("reverb setup failed: {0}")]
    Engine(#[from] Error),
}

/// What came out of a processing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub spec: WavSpec,
    pub frames: usize,
}

/// Process the file at `input` into a new file at `output`.
pub fn process_file<P, Q>(input: P, output: Q, controls: Controls) -> Result<Summary, WavError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let reader = WavReader::open(input)?;
    let spec = check_spec(reader.spec())?;
    let writer = WavWriter::create(output, spec)?;

    process(reader, writer, controls)
}

/// Process WAV data from `input`, writing WAV data to `output`.
pub fn process_wav<R, W>(input: R, output: W, controls: Controls) -> Result<Summary, WavError>
where
    R: Read,
    W: Write + Seek,
{
    let reader = WavReader::new(input)?;
    let spec = check_spec(reader.spec())?;
    let writer = WavWriter::new(output, spec)?;

    process(reader, writer, controls)
}

fn check_spec(spec: WavSpec) -> Result<WavSpec, WavError> {
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(WavError::UnsupportedFormat {
            format: spec.sample_format,
            bits: spec.bits_per_sample,
        });
    }

    if spec.channels != 1 && spec.channels != 2 {
        return Err(WavError::UnsupportedChannels(spec.channels));
    }

    Ok(spec)
}

fn process<R, W>(
    mut reader: WavReader<R>,
    mut writer: WavWriter<W>,
    controls: Controls,
) -> Result<Summary, WavError>
where
    R: Read,
    W: Write + Seek,
{
    let spec = reader.spec();
    let channels = spec.channels as usize;

    log::info!(
        "Input: {} ch, {} Hz, {}-bit, {} frames",
        channels,
        spec.sample_rate,
        spec.bits_per_sample,
        reader.len() as usize / channels
    );

    let config = ReverbConfig::for_sample_rate(spec.sample_rate)
        .with_dry_wet(controls.dry_wet)
        .with_room_size(controls.room_size);

    let mut reverb: SchroederReverb = SchroederReverb::new(&config)?;

    log::info!(
        "Using dry/wet {}%, room size {:?}, delay lengths {:?}",
        reverb.dry_wet() * 100.0,
        reverb.room_size().map(|r| r * 100.0),
        reverb.lengths()
    );

    let mut frame = [0_i16; 2];
    let mut filled = 0;
    let mut frames = 0;

    for sample in reader.samples::<i16>() {
        frame[filled] = sample?;
        filled += 1;

        if filled < channels {
            continue;
        }
        filled = 0;

        let (l, r) = if channels == 1 {
            (frame[0], frame[0])
        } else {
            (frame[0], frame[1])
        };

        let [out, _] = reverb.process([l as f32, r as f32]);

        // Truncates toward zero, the reverb output is already clipped to range.
        let out = out as i16;

        for _ in 0..channels {
            writer.write_sample(out)?;
        }

        frames += 1;
    }

    if filled != 0 {
        log::warn!("Dropping incomplete trailing frame");
    }

    writer.finalize()?;
    reverb.release();

    log::info!("Written {} frames", frames);

    Ok(Summary { spec, frames })
}
