use parking_lot::RwLock;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use striker_control::MotionCommand;
use striker_geometry::{Point2D, RobotPose};

/// Most recent faults kept on the board.
const MAX_FAULTS: usize = 10;

#[derive(Clone, Debug, Default)]
pub struct State {
    pub pose: Option<RobotPose>,
    pub target: Option<Point2D>,
    pub last_command: Option<MotionCommand>,
    pub last_cmd_ts: Option<Instant>,
    pub frames_processed: u64,
    pub faults: Vec<String>,
}

impl State {
    /// Time since the last command went out, if any did.
    pub fn command_age(&self) -> Option<Duration> {
        self.last_cmd_ts.map(|ts| ts.elapsed())
    }
}

pub type Blackboard = Arc<RwLock<State>>;

pub fn snapshot(bb: &Blackboard) -> State {
    (*bb.read()).clone()
}

/// Records what was seen in the latest frame.
pub fn record_frame(bb: &Blackboard, pose: Option<RobotPose>, target: Option<Point2D>) {
    let mut g = bb.write();
    g.pose = pose;
    g.target = target;
    g.frames_processed += 1;
}

pub fn touch_cmd(bb: &Blackboard, command: MotionCommand) {
    let mut g = bb.write();
    g.last_command = Some(command);
    g.last_cmd_ts = Some(Instant::now());
}

pub fn raise_fault(bb: &Blackboard, msg: &str) {
    let mut g = bb.write();
    if !g.faults.iter().any(|s| s == msg) {
        if g.faults.len() >= MAX_FAULTS {
            g.faults.remove(0);
        }
        g.faults.push(msg.to_string());
    }
}
