//! gateguard-replay - count entries and exits from a recorded track stream
//!
//! Input is JSON lines, one frame per line:
//!
//! ```text
//! {"frame": 3, "tracks": [{"id": 1, "x": 800, "y": 400}, {"id": 2, "bbox": [891, 405, 931, 525]}]}
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use gateguard::{BoundingBox, CrossingStateMachine, GateConfig, Observation, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gateguard-replay", author, version, about)]
struct Args {
    /// Gate config (TOML). Uses the built-in gate when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Frame stream (JSON lines). Reads stdin when omitted.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Process every N-th frame record (1 = every record)
    #[arg(long, default_value_t = 1)]
    stride: u64,
    /// Print counters after every processed frame
    #[arg(long)]
    per_frame: bool,
    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Deserialize)]
struct FrameRecord {
    frame: u64,
    #[serde(default)]
    tracks: Vec<TrackRecord>,
}

#[derive(Debug, Deserialize)]
struct TrackRecord {
    id: u64,
    #[serde(flatten)]
    position: Position,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Position {
    Point { x: i32, y: i32 },
    Bbox { bbox: [i32; 4] },
}

impl TrackRecord {
    fn observation(&self) -> Observation {
        let point = match self.position {
            Position::Point { x, y } => Point::new(x, y),
            Position::Bbox {
                bbox: [x1, y1, x2, y2],
            } => BoundingBox::from_tlbr(x1, y1, x2, y2).center(),
        };
        Observation::new(self.id, point)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ReplayStats {
    /// Frame records read, skipped or not
    records: u64,
    /// Frame records fed to the counter
    processed: u64,
}

/// Feed every `stride`-th frame record from `reader` into `counter`.
fn replay(
    reader: impl BufRead,
    counter: &mut CrossingStateMachine,
    stride: u64,
    per_frame: bool,
) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.context("failed to read frame stream")?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FrameRecord = serde_json::from_str(&line)
            .with_context(|| format!("invalid frame record on line {}", lineno + 1))?;
        stats.records += 1;
        if stats.records % stride != 0 {
            continue;
        }
        stats.processed += 1;

        let observations: Vec<Observation> =
            record.tracks.iter().map(TrackRecord::observation).collect();
        let events = counter.observe_frame(&observations);
        debug!(
            frame = record.frame,
            tracks = observations.len(),
            events = events.len(),
            "frame processed"
        );

        if per_frame {
            let occ = counter.occupancy();
            println!(
                "frame {}: Entered: {} Exited: {} Inside: {}",
                record.frame, occ.entered, occ.exited, occ.inside
            );
        }
    }
    Ok(stats)
}

#[derive(Debug, Serialize)]
struct Summary {
    frames: u64,
    entered: usize,
    exited: usize,
    inside: i64,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gateguard=info,gateguard_replay=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.stride == 0 {
        bail!("--stride must be at least 1");
    }

    let gate = match &args.config {
        Some(path) => GateConfig::load(path)?,
        None => GateConfig::default(),
    };
    let mut counter = CrossingStateMachine::new(gate);

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let stats = replay(reader, &mut counter, args.stride, args.per_frame)?;

    let occ = counter.occupancy();
    info!(
        records = stats.records,
        processed = stats.processed,
        "replay finished"
    );
    if args.json {
        let summary = Summary {
            frames: stats.processed,
            entered: occ.entered,
            exited: occ.exited,
            inside: occ.inside,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Entered: {}", occ.entered);
        println!("Exited: {}", occ.exited);
        println!("Inside: {}", occ.inside);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Entry along x = 0, exit along x = 50, both spanning y in [0, 100].
    fn counter() -> CrossingStateMachine {
        let gate = GateConfig::from_points(((0, 0), (0, 100)), ((50, 0), (50, 100)), 3.0).unwrap();
        CrossingStateMachine::new(gate)
    }

    #[test]
    fn test_point_record() {
        let track: TrackRecord = serde_json::from_str(r#"{"id": 7, "x": 800, "y": 400}"#).unwrap();
        assert_eq!(track.observation(), Observation::new(7, Point::new(800, 400)));
    }

    #[test]
    fn test_bbox_record_uses_centroid() {
        let track: TrackRecord =
            serde_json::from_str(r#"{"id": 2, "bbox": [891, 405, 931, 526]}"#).unwrap();
        assert_eq!(track.observation(), Observation::new(2, Point::new(911, 465)));
    }

    #[test]
    fn test_incomplete_position_rejected() {
        let err = serde_json::from_str::<TrackRecord>(r#"{"id": 3, "x": 1}"#).unwrap_err();
        assert!(
            err.to_string()
                .contains("did not match any variant of untagged enum Position")
        );
    }

    #[test]
    fn test_frame_without_tracks() {
        let record: FrameRecord = serde_json::from_str(r#"{"frame": 4}"#).unwrap();
        assert_eq!(record.frame, 4);
        assert!(record.tracks.is_empty());
    }

    #[test]
    fn test_replay_with_stride() {
        // Records 1 and 3 are skipped with a stride of 2.
        let stream = concat!(
            r#"{"frame": 1, "tracks": [{"id": 1, "x": 0, "y": 50}]}"#,
            "\n",
            r#"{"frame": 2, "tracks": [{"id": 2, "bbox": [45, 40, 55, 60]}]}"#,
            "\n\n",
            r#"{"frame": 3, "tracks": [{"id": 3, "x": 1, "y": 20}]}"#,
            "\n",
            r#"{"frame": 4, "tracks": [{"id": 1, "x": 1, "y": 50}, {"id": 2, "x": 0, "y": 50}]}"#,
            "\n",
        );
        let mut counter = counter();
        let stats = replay(Cursor::new(stream), &mut counter, 2, false).unwrap();

        assert_eq!(
            stats,
            ReplayStats {
                records: 4,
                processed: 2
            }
        );
        assert_eq!(counter.entered_count(), 1);
        assert_eq!(counter.exited_count(), 1);
        assert_eq!(counter.inside_count(), 0);
        assert!(!counter.is_classified(3));
    }

    #[test]
    fn test_replay_reports_bad_line() {
        let stream = "{\"frame\": 1, \"tracks\": []}\nnot json\n";
        let err = replay(Cursor::new(stream), &mut counter(), 1, false).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
