//! WAV file writer
//!
//! Writes canonical 44-byte-header PCM WAV files: a RIFF descriptor, a
//! 16-byte `fmt ` chunk and a `data` chunk. Samples are floats where 1.0 is
//! full scale; anything louder saturates at the integer bounds.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::WavError;

/// Size of the RIFF, `fmt ` and `data` headers together
pub const HEADER_SIZE: usize = 44;

/// Linear PCM format tag
const FORMAT_PCM: u16 = 1;

/// PCM container parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Mono format at the given rate and depth
    pub fn mono(sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample,
        }
    }

    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Bytes per sample frame (all channels)
    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Bytes per second of audio
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// Check that the format can be written
    pub fn validate(&self) -> Result<(), WavError> {
        if !matches!(self.bits_per_sample, 8 | 16 | 24 | 32) {
            return Err(WavError::UnsupportedBitDepth(self.bits_per_sample));
        }
        if self.channels == 0 {
            return Err(WavError::InvalidChannelCount(self.channels));
        }
        if self.sample_rate == 0 {
            return Err(WavError::InvalidSampleRate(self.sample_rate));
        }
        // byte_rate must fit its u32 field
        if self.sample_rate as u64 * self.block_align() as u64 > u32::MAX as u64 {
            return Err(WavError::InvalidSampleRate(self.sample_rate));
        }
        Ok(())
    }

    /// Size of the data chunk for `frames` sample frames
    pub fn data_size(&self, frames: usize) -> Result<u32, WavError> {
        let bytes = frames as u64 * self.block_align() as u64;
        // RIFF size (36 + data + pad byte) must fit in a u32 as well
        if bytes > (u32::MAX - 37) as u64 {
            return Err(WavError::DataTooLarge { bytes });
        }
        Ok(bytes as u32)
    }

    /// Total encoded file size for `frames` sample frames
    pub fn file_size(&self, frames: usize) -> Result<usize, WavError> {
        let data_size = self.data_size(frames)?;
        Ok(HEADER_SIZE + data_size as usize + pad_len(data_size))
    }
}

/// Chunks are padded to an even length
fn pad_len(data_size: u32) -> usize {
    (data_size & 1) as usize
}

/// Quantize a float sample to a signed integer of `bits` width
///
/// Scales by 2^(bits-1) and saturates, so +1.0 lands on the maximum code and
/// anything beyond either bound clips instead of wrapping. NaN becomes 0.
///
/// # Example
/// ```
/// use wav_maker::wav::quantize;
///
/// assert_eq!(quantize(0.5, 16), 16384);
/// assert_eq!(quantize(3.0, 16), i16::MAX as i32);
/// assert_eq!(quantize(-3.0, 16), i16::MIN as i32);
/// ```
pub fn quantize(sample: f64, bits: u16) -> i32 {
    let full_scale = (1i64 << (bits.clamp(1, 32) - 1)) as f64;
    let max = full_scale - 1.0;
    let min = -full_scale;
    let value = (sample * full_scale).round();
    if value.is_nan() {
        0
    } else {
        value.clamp(min, max) as i32
    }
}

/// Little-endian PCM code for one sample
///
/// Only the first `bits / 8` bytes are meaningful. 8-bit WAV is unsigned
/// with a 128 midpoint.
fn encode_sample(sample: f64, bits: u16) -> [u8; 4] {
    let code = quantize(sample, bits);
    if bits == 8 {
        [(code + 128) as u8, 0, 0, 0]
    } else {
        code.to_le_bytes()
    }
}

fn write_header<W: Write>(writer: &mut W, format: &WavFormat, data_size: u32) -> io::Result<()> {
    // Everything after the RIFF size field, including the pad byte
    let riff_size = 36 + data_size + pad_len(data_size) as u32;

    // RIFF chunk
    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt subchunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Subchunk size
    writer.write_all(&FORMAT_PCM.to_le_bytes())?;
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data subchunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())
}

/// Write a complete WAV file to a writer
///
/// Samples are quantized straight into `writer`, each one copied to every
/// channel of the format, so unbuffered sinks should be wrapped in a
/// `BufWriter`. The format and size are checked before anything is written.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `samples` - Mono audio samples (1.0 = full scale)
pub fn write_wav<W: Write>(
    writer: &mut W,
    format: &WavFormat,
    samples: &[f64],
) -> Result<(), WavError> {
    format.validate()?;
    let data_size = format.data_size(samples.len())?;

    write_header(writer, format, data_size)?;

    let width = format.bytes_per_sample() as usize;
    for &sample in samples {
        let le = encode_sample(sample, format.bits_per_sample);
        for _ in 0..format.channels {
            writer.write_all(&le[..width])?;
        }
    }

    if pad_len(data_size) == 1 {
        writer.write_all(&[0])?;
    }

    Ok(())
}

/// Encode a complete WAV file in memory
pub fn wav_bytes(samples: &[f64], format: &WavFormat) -> Result<Vec<u8>, WavError> {
    format.validate()?;
    let mut buffer = Vec::with_capacity(format.file_size(samples.len())?);
    write_wav(&mut buffer, format, samples)?;
    Ok(buffer)
}

/// Write a WAV file to disk
///
/// A format or size error is reported before the file is created.
pub fn write_wav_file(
    path: impl AsRef<Path>,
    format: &WavFormat,
    samples: &[f64],
) -> Result<(), WavError> {
    format.validate()?;
    format.data_size(samples.len())?;

    let mut file = BufWriter::new(File::create(path)?);
    write_wav(&mut file, format, samples)?;
    file.flush()?;
    Ok(())
}

/// Locate the `data` chunk payload in WAV bytes
///
/// Walks the chunk list after the RIFF/WAVE descriptor. Returns `None` if
/// the bytes are not a RIFF/WAVE file or have no complete data chunk.
pub fn extract_data_chunk(wav: &[u8]) -> Option<&[u8]> {
    if wav.len() < 12 || &wav[0..4] != b"RIFF" || &wav[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav.len() {
        let id = &wav[pos..pos + 4];
        let size = u32::from_le_bytes([wav[pos + 4], wav[pos + 5], wav[pos + 6], wav[pos + 7]])
            as usize;
        let body = pos + 8;

        if id == b"data" {
            return wav.get(body..body.checked_add(size)?);
        }

        // Chunks are padded to even sizes
        pos = body + size + (size & 1);
    }

    None
}
