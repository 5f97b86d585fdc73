//! Raw frame file I/O.
//!
//! The CLI reads headerless packed frame dumps (the kind `ffmpeg
//! -f rawvideo` produces): a flat concatenation of frames whose
//! geometry and pixel format the caller supplies on the command line.
//! Timestamps are synthesized from the nominal frame rate since a raw
//! dump carries none of its own.

use clap::ValueEnum;
use framecheck_core::{Error, Frame, FrameRate, FrameSink, FrameSource, PixelFormat, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Pixel formats accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RawFormat {
    /// 8-bit grayscale.
    Gray8,
    /// Packed 24-bit RGB.
    Rgb24,
    /// Packed 24-bit BGR.
    Bgr24,
}

impl RawFormat {
    pub fn pixel_format(self) -> PixelFormat {
        match self {
            Self::Gray8 => PixelFormat::Gray8,
            Self::Rgb24 => PixelFormat::Rgb24,
            Self::Bgr24 => PixelFormat::Bgr24,
        }
    }
}

/// Frame source reading packed frames from a raw byte stream.
#[derive(Debug)]
pub struct RawFrameSource<R> {
    reader: R,
    width: u32,
    height: u32,
    format: PixelFormat,
    rate: FrameRate,
    frame_size: usize,
    frames_total: u64,
    next_index: u64,
}

impl RawFrameSource<BufReader<File>> {
    /// Open a raw frame file.
    ///
    /// Returns [`Error::EmptyInput`] when the file holds less than one
    /// full frame.
    pub fn open<P: AsRef<Path>>(
        path: P,
        width: u32,
        height: u32,
        format: PixelFormat,
        rate: FrameRate,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        let source = Self::from_reader(BufReader::new(file), len, width, height, format, rate)?;
        debug!(
            path = %path.display(),
            frames = source.frames_total,
            "opened raw frame file"
        );
        Ok(source)
    }
}

impl<R: Read> RawFrameSource<R> {
    /// Build a source over an arbitrary reader of known byte length.
    pub fn from_reader(
        reader: R,
        byte_len: u64,
        width: u32,
        height: u32,
        format: PixelFormat,
        rate: FrameRate,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_parameter(format!(
                "frame dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        let frame_size = format.frame_size(width, height);
        let frames_total = byte_len / frame_size as u64;
        if frames_total == 0 {
            return Err(Error::EmptyInput);
        }
        let remainder = byte_len % frame_size as u64;
        if remainder != 0 {
            warn!(
                remainder,
                frame_size, "input ends with a partial frame, it will be ignored"
            );
        }
        Ok(Self {
            reader,
            width,
            height,
            format,
            rate,
            frame_size,
            frames_total,
            next_index: 0,
        })
    }
}

impl<R: Read> FrameSource for RawFrameSource<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.next_index >= self.frames_total {
            return Ok(None);
        }
        let mut data = vec![0u8; self.frame_size];
        self.reader
            .read_exact(&mut data)
            .map_err(|e| Error::decode(format!("short read at frame {}: {}", self.next_index, e)))?;

        let pts_ms = self.next_index as f64 * self.rate.frame_interval_ms();
        self.next_index += 1;
        Ok(Some(
            Frame::from_data(data, self.width, self.height, self.format).with_pts_ms(pts_ms),
        ))
    }

    fn frame_rate(&self) -> FrameRate {
        self.rate
    }

    fn frame_count(&self) -> Option<u64> {
        Some(self.frames_total)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Frame sink appending packed frames to a raw byte stream.
pub struct RawFrameSink<W: Write> {
    writer: W,
}

impl RawFrameSink<BufWriter<File>> {
    /// Create (or truncate) a raw frame file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RawFrameSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> FrameSink for RawFrameSink<W> {
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        frame.validate()?;
        self.writer
            .write_all(frame.data())
            .map_err(|e| Error::encode(format!("failed to write frame: {}", e)))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::encode(format!("failed to flush output: {}", e)))?;
        Ok(())
    }
}
