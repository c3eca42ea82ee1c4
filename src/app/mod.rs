use opencv::core::Mat;

mod error;

pub use error::PipCountError;

use crate::{
    displays::{self, CountedObject, RenderSink},
    tally::{self, TallyState},
    vision::{self, FrameSource, LocatorSettings, PipSettings, PreprocessSettings},
};

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub device: i32,
    /// Off for headless runs, where nothing is drawn and no key can quit.
    pub show_windows: bool,
    pub preprocess: PreprocessSettings,
    pub locator: LocatorSettings,
    pub pips: PipSettings,
}

impl Config {
    pub const DEFAULT_DEVICE: i32 = 0;

    pub fn new(device: i32) -> Self {
        Self {
            device,
            show_windows: true,
            preprocess: PreprocessSettings::DEFAULT,
            locator: LocatorSettings::DEFAULT,
            pips: PipSettings::DEFAULT,
        }
    }

    pub fn info(&self) -> String {
        format!(
            "device {}, windows {}, area {}..{}, separation {}, canonical face {}px",
            self.device,
            if self.show_windows { "on" } else { "off" },
            self.locator.min_area,
            self.locator.max_area,
            self.locator.min_separation,
            self.pips.canonical_size
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEVICE)
    }
}

/// Everything the pipeline worked out for one frame.
#[derive(Debug)]
pub struct FrameReport {
    pub objects: Vec<CountedObject>,
    pub frame_sum: i64,
    pub tally: TallyState,
    /// The binary image the locator searched.
    pub binary: Mat,
}

impl FrameReport {
    pub fn total(&self) -> i64 {
        self.tally.total()
    }

    fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "dice": self
                .objects
                .iter()
                .map(|o| {
                    let region = &o.object.region;
                    serde_json::json!({
                        "center": [region.center.x, region.center.y],
                        "angle": region.angle,
                        "pips": o.pips,
                    })
                })
                .collect::<Vec<_>>(),
            "frame_sum": self.frame_sum,
            "tally": self.tally,
            "phase": self.tally.phase().to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    QuitKey,
}

pub struct PipCounter {
    config: Config,
    tally: TallyState,
}

impl PipCounter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tally: TallyState::INITIAL,
        }
    }

    pub fn tally(&self) -> TallyState {
        self.tally
    }

    /// Locate, count, then fold the frame sum into the running total.
    pub fn process_frame(&mut self, frame: &Mat) -> Result<FrameReport, PipCountError> {
        let binary = vision::preprocess(frame, &self.config.preprocess)?;
        let located = vision::locate(&binary, &self.config.locator)?;

        let mut objects = Vec::with_capacity(located.len());
        for object in located {
            let pips = vision::pips::count_pips_in(frame, object.bounds, &self.config.pips)?;
            objects.push(CountedObject { object, pips });
        }

        let frame_sum = objects.iter().map(|o| o.pips as i64).sum();
        self.tally = tally::advance(self.tally, frame_sum);

        let report = FrameReport {
            objects,
            frame_sum,
            tally: self.tally,
            binary,
        };
        log::debug!(
            "{} dice, frame sum {}, total {}",
            report.objects.len(),
            report.frame_sum,
            report.total()
        );
        log::trace!("{}", report.summary());

        Ok(report)
    }

    /// Runs until the source runs dry or a quit key is pressed.
    pub fn run(
        &mut self,
        source: &mut impl FrameSource,
        sink: &mut impl RenderSink,
    ) -> Result<StopReason, PipCountError> {
        let mut frames: u64 = 0;

        let reason = loop {
            let Some(frame) = source.next_frame() else {
                log::info!("End of stream after {} frames", frames);
                break StopReason::EndOfStream;
            };

            let report = self.process_frame(&frame)?;
            let annotated = displays::annotate(&frame, &report.objects, report.total())?;
            sink.render(&annotated, &report.binary)
                .map_err(PipCountError::Display)?;
            frames += 1;

            if let Some(key) = sink.poll_key().map_err(PipCountError::Display)? {
                if displays::is_quit_key(key) {
                    log::info!("Quit requested after {} frames", frames);
                    break StopReason::QuitKey;
                }
            }
        };

        Ok(reason)
    }
}
