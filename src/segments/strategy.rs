use tracing::{debug, info};

use crate::segments::{
    ConfigError, GenomicRecord, ParentSegment, SlidingPositionWindow, SplitConfig, SubSegment,
};

/// Emit at info level when verbose, at debug level otherwise.
macro_rules! diagnostic {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            info!($($arg)+);
        } else {
            debug!($($arg)+);
        }
    };
}

/// Policy partitioning a parent segment into sub-segments.
pub trait SplitStrategy {
    /// Split `segment`, returning windows in the order their anchors were seen.
    fn apply<'a>(&self, segment: &'a ParentSegment) -> Vec<SubSegment<'a>>;
}

/// Opens one window around each candidate indel that does not directly follow
/// the previous one.
///
/// The strategy only holds configuration. Streaming state lives in a
/// [`SplitContext`] created per segment, so one strategy can split many
/// segments concurrently.
#[derive(Debug, Clone)]
pub struct SingleCandidateIndelSplitStrategy {
    config: SplitConfig,
}

impl SingleCandidateIndelSplitStrategy {
    /// Create a strategy from a configuration.
    pub fn new(config: SplitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a strategy from its three recognised options.
    pub fn with_parameters(
        window_size: u32,
        candidate_indel_threshold: u32,
        verbose: bool,
    ) -> Result<Self, ConfigError> {
        Self::new(SplitConfig::new(window_size, candidate_indel_threshold)?.with_verbose(verbose))
    }

    /// Configuration in use.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Start a streaming split of `segment`.
    pub fn context<'a>(&self, segment: &'a ParentSegment) -> SplitContext<'a> {
        SplitContext::new(segment, self.config.clone())
    }
}

impl SplitStrategy for SingleCandidateIndelSplitStrategy {
    fn apply<'a>(&self, segment: &'a ParentSegment) -> Vec<SubSegment<'a>> {
        let mut context = self.context(segment);
        for record in segment.all_records() {
            context.push(record);
        }
        context.finish()
    }
}

/// Mutable state of one segmentation task.
///
/// Owns the sliding window of recent positions, the previous-indel cursor and
/// the windows opened so far. Every update takes `&mut self`.
///
/// A window is closed as soon as a record lies more than `window_size` past
/// its anchor. Anchors only grow, so closed windows always form a prefix of
/// `sub_segments` and only the suffix from `first_open` is fed.
#[derive(Debug)]
pub struct SplitContext<'a> {
    parent: &'a ParentSegment,
    config: SplitConfig,
    window: SlidingPositionWindow,
    previous_indel_position: Option<u32>,
    sub_segments: Vec<SubSegment<'a>>,
    first_open: usize,
    records_seen: usize,
}

impl<'a> SplitContext<'a> {
    fn new(parent: &'a ParentSegment, config: SplitConfig) -> Self {
        Self {
            parent,
            window: SlidingPositionWindow::new(config.window_size),
            config,
            previous_indel_position: None,
            sub_segments: Vec::new(),
            first_open: 0,
            records_seen: 0,
        }
    }

    /// Consume the next record of the parent's view.
    pub fn push(&mut self, record: &GenomicRecord) {
        debug_assert_eq!(record.reference_id, *self.parent.reference_id());
        self.records_seen += 1;
        self.window.push(record.position);

        self.close_passed(record.position);
        for sub_segment in &mut self.sub_segments[self.first_open..] {
            if sub_segment.is_open() {
                sub_segment.add(record);
            }
        }

        if !record.is_indel_site(self.config.candidate_indel_threshold) {
            return;
        }

        let adjacent = self
            .previous_indel_position
            .is_some_and(|previous| record.position.checked_sub(previous) == Some(1));
        if !adjacent {
            let sub_segment =
                SubSegment::new(&self.window, self.parent, record, self.config.window_size);
            self.sub_segments.push(sub_segment);
        } else if self.config.reanchor_adjacent_indels {
            if let Some(current) = self.sub_segments.last_mut() {
                if current.is_open() {
                    current.new_indel(record.position);
                }
            }
        }
        self.previous_indel_position = Some(record.position);
    }

    /// Close the leading windows that `position` has moved past.
    fn close_passed(&mut self, position: u32) {
        let window_size = self.config.window_size;
        while let Some(sub_segment) = self.sub_segments.get_mut(self.first_open) {
            if position <= sub_segment.indel_position().saturating_add(window_size) {
                break;
            }
            sub_segment.force_close();
            self.first_open += 1;
        }
    }

    /// Windows opened so far.
    pub fn sub_segments(&self) -> &[SubSegment<'a>] {
        &self.sub_segments
    }

    /// Number of records pushed.
    pub fn records_seen(&self) -> usize {
        self.records_seen
    }

    /// Position of the most recent candidate indel.
    pub fn previous_indel_position(&self) -> Option<u32> {
        self.previous_indel_position
    }

    /// Close every window and return them in anchor order.
    pub fn finish(mut self) -> Vec<SubSegment<'a>> {
        for sub_segment in self.sub_segments.iter_mut() {
            sub_segment.force_close();
        }
        self.report();
        self.sub_segments
    }

    fn report(&self) {
        let verbose = self.config.verbose;
        if self.sub_segments.is_empty() {
            diagnostic!(
                verbose,
                "No candidate indel found in this segment {}-{}",
                self.parent.first_position(),
                self.parent.last_position()
            );
        }
        for sub_segment in &self.sub_segments {
            diagnostic!(
                verbose,
                "New subsegment around candidate indel at {} ({}-{})",
                sub_segment.indel_position(),
                sub_segment.first_position(),
                sub_segment.last_position()
            );
        }
        diagnostic!(verbose, "Subsegments found {}", self.sub_segments.len());
    }
}
