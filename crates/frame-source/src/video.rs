//! GStreamer-backed frame source.
//!
//! Decodes a match video through `filesrc ! decodebin ! videoconvert` into
//! an RGBA appsink held in Paused state. Seeks are flushing accurate seeks;
//! "frame ready" is the appsink preroll, pulled with the watchdog as the
//! wait bound so a stalled seek returns [`SeekStatus::TimedOut`] instead of
//! hanging the run.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use async_trait::async_trait;
use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;

use roundscope_analysis_core::gauge::PixelRegion;
use roundscope_common::error::{RoundscopeError, RoundscopeResult};
use roundscope_common::timecode::TimestampMs;
use roundscope_match_model::BarRect;

use crate::source::{FrameSource, SeekStatus};

static GST_INIT: OnceLock<Result<(), String>> = OnceLock::new();

fn init_gstreamer() -> RoundscopeResult<()> {
    GST_INIT
        .get_or_init(|| gst::init().map_err(|e| e.to_string()))
        .clone()
        .map_err(|e| RoundscopeError::source(format!("GStreamer init failed: {e}")))
}

/// Report the GStreamer runtime version (capability checks).
pub fn probe_gstreamer() -> RoundscopeResult<String> {
    init_gstreamer()?;
    Ok(gst::version_string().to_string())
}

/// One decoded RGBA frame.
struct DecodedFrame {
    width: u32,
    height: u32,
    /// Row stride in bytes. RGBA rows are naturally 4-byte aligned, so the
    /// buffer is tightly packed and stride is derived from the buffer size.
    stride: usize,
    data: Vec<u8>,
}

/// A seekable decoded-video source.
pub struct VideoFrameSource {
    path: PathBuf,
    pipeline: gst::Pipeline,
    appsink: gst_app::AppSink,
    duration_ms: TimestampMs,
    width: u32,
    height: u32,
    seek_timeout: gst::ClockTime,
    current: Option<DecodedFrame>,
}

impl VideoFrameSource {
    /// Open a video file and preroll the first frame.
    ///
    /// Terminal failures: missing file, pipeline refusing to build or
    /// preroll, unknown or zero duration.
    pub fn open(path: impl AsRef<Path>, seek_timeout_ms: u64) -> RoundscopeResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(RoundscopeError::FileNotFound { path });
        }

        init_gstreamer()?;

        let launch = format!(
            "filesrc location=\"{}\" ! decodebin ! videoconvert ! \
             video/x-raw,format=RGBA ! appsink name=sink sync=false max-buffers=1",
            path.display()
        );

        let element = gst::parse::launch(&launch).map_err(|e| {
            RoundscopeError::source(format!("Failed to build decode pipeline: {e}"))
        })?;
        let pipeline = element
            .dynamic_cast::<gst::Pipeline>()
            .map_err(|_| RoundscopeError::source("Launch string did not produce a pipeline"))?;

        let appsink = pipeline
            .by_name("sink")
            .and_then(|e| e.dynamic_cast::<gst_app::AppSink>().ok())
            .ok_or_else(|| RoundscopeError::source("Pipeline is missing the appsink"))?;

        pipeline.set_state(gst::State::Paused).map_err(|e| {
            RoundscopeError::source(format!("Failed to pause pipeline for preroll: {e:?}"))
        })?;

        // State changes are async; wait for the preroll so duration and
        // caps queries answer.
        match pipeline.state(gst::ClockTime::from_seconds(10)) {
            (Ok(_), gst::State::Paused, _) => {}
            (Ok(_), state, _) => {
                tracing::warn!(?state, "Pipeline did not reach Paused within timeout");
            }
            (Err(e), _, _) => {
                let _ = pipeline.set_state(gst::State::Null);
                return Err(RoundscopeError::source(format!(
                    "Pipeline failed to preroll: {e:?}"
                )));
            }
        }

        let duration_ms = pipeline
            .query_duration::<gst::ClockTime>()
            .map(|d| d.mseconds())
            .unwrap_or(0);
        if duration_ms == 0 {
            let _ = pipeline.set_state(gst::State::Null);
            return Err(RoundscopeError::source(format!(
                "Video has zero or unknown duration: {}",
                path.display()
            )));
        }

        let seek_timeout = gst::ClockTime::from_mseconds(seek_timeout_ms);
        let mut source = Self {
            path,
            pipeline,
            appsink,
            duration_ms,
            width: 0,
            height: 0,
            seek_timeout,
            current: None,
        };

        let frame = source
            .pull_frame()?
            .ok_or_else(|| RoundscopeError::source("First frame did not preroll"))?;
        source.width = frame.width;
        source.height = frame.height;
        source.current = Some(frame);

        tracing::info!(
            path = %source.path.display(),
            width = source.width,
            height = source.height,
            duration_ms = source.duration_ms,
            "Opened video source"
        );

        Ok(source)
    }

    /// Pull the prerolled sample, bounded by the seek watchdog.
    fn pull_frame(&self) -> RoundscopeResult<Option<DecodedFrame>> {
        let Some(sample) = self.appsink.try_pull_preroll(self.seek_timeout) else {
            return Ok(None);
        };

        let caps = sample
            .caps()
            .ok_or_else(|| RoundscopeError::source("Prerolled sample has no caps"))?;
        let structure = caps
            .structure(0)
            .ok_or_else(|| RoundscopeError::source("Prerolled caps are empty"))?;
        let width = structure
            .get::<i32>("width")
            .map_err(|e| RoundscopeError::source(format!("Caps missing width: {e}")))?
            as u32;
        let height = structure
            .get::<i32>("height")
            .map_err(|e| RoundscopeError::source(format!("Caps missing height: {e}")))?
            as u32;

        let buffer = sample
            .buffer()
            .ok_or_else(|| RoundscopeError::source("Prerolled sample has no buffer"))?;
        let map = buffer
            .map_readable()
            .map_err(|e| RoundscopeError::source(format!("Frame buffer is unreadable: {e}")))?;
        let data = map.as_slice().to_vec();

        if height == 0 || data.len() < (width * height * 4) as usize {
            return Err(RoundscopeError::source("Decoded frame is truncated"));
        }

        Ok(Some(DecodedFrame {
            width,
            height,
            stride: data.len() / height as usize,
            data,
        }))
    }
}

#[async_trait]
impl FrameSource for VideoFrameSource {
    fn duration_ms(&self) -> TimestampMs {
        self.duration_ms
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    async fn seek(&mut self, timestamp_ms: TimestampMs) -> RoundscopeResult<SeekStatus> {
        self.current = None;

        let position = gst::ClockTime::from_mseconds(timestamp_ms);
        if let Err(e) = self
            .pipeline
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE, position)
        {
            // An individual unseekable position is skipped, not fatal.
            tracing::warn!(timestamp_ms, error = %e, "Seek rejected");
            return Ok(SeekStatus::TimedOut);
        }

        match self.pull_frame()? {
            Some(frame) => {
                self.current = Some(frame);
                Ok(SeekStatus::Ready)
            }
            None => Ok(SeekStatus::TimedOut),
        }
    }

    fn capture_region(&self, rect: &BarRect) -> RoundscopeResult<PixelRegion> {
        let frame = self
            .current
            .as_ref()
            .ok_or_else(|| RoundscopeError::source("No frame is ready"))?;

        let rect = rect.clipped_to(frame.width, frame.height);
        let width = rect.width();
        let height = rect.height();
        if width == 0 || height == 0 {
            return Ok(PixelRegion::empty());
        }

        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in rect.y1..rect.y2 {
            let row_start = y as usize * frame.stride + rect.x1 as usize * 4;
            data.extend_from_slice(&frame.data[row_start..row_start + width as usize * 4]);
        }

        Ok(PixelRegion::new(width, height, data))
    }
}

impl Drop for VideoFrameSource {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}
