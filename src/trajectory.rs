//! Joint-space trajectory hand-off for the external path player.
//!
//! The planner prints solved paths to its console output as whitespace
//! separated joint configurations. This module extracts those waypoints and
//! writes them in a tabular form the visualization side can consume. The
//! only contract toward that collaborator is well-formed vectors of
//! consistent dimensionality; simulation and rendering live elsewhere.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{FileAccessError, NoDataError};

/// Console lines starting with these tokens are planner chatter, not waypoints.
const CHATTER_PREFIXES: &[&str] = &["problem", "idx", "kernel", "cost", "failed"];

/// Supported articulated-robot families, identified by joint count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RobotFamily {
    Panda,
    Fetch,
    Baxter,
}

impl RobotFamily {
    pub fn from_dof(dof: usize) -> Option<Self> {
        match dof {
            7 => Some(RobotFamily::Panda),
            8 => Some(RobotFamily::Fetch),
            14 => Some(RobotFamily::Baxter),
            _ => None,
        }
    }

    pub fn dof(self) -> usize {
        match self {
            RobotFamily::Panda => 7,
            RobotFamily::Fetch => 8,
            RobotFamily::Baxter => 14,
        }
    }
}

/// An ordered sequence of joint configurations for one robot family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JointPath {
    pub robot: RobotFamily,
    pub waypoints: Vec<Vec<f64>>,
}

impl JointPath {
    pub fn dof(&self) -> usize {
        self.robot.dof()
    }
}

/// Extracts joint configurations from planner console output.
///
/// Blank lines, chatter lines, and lines that are not all-numeric are
/// skipped. The first numeric row with a supported arity fixes the robot
/// family; later numeric rows of a different arity are skipped with a
/// warning so the emitted path stays dimensionally consistent. Returns
/// `None` when no waypoint was found.
pub fn parse_waypoints(text: &str) -> Option<JointPath> {
    let mut robot: Option<RobotFamily> = None;
    let mut waypoints: Vec<Vec<f64>> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || CHATTER_PREFIXES.iter().any(|p| line.starts_with(p)) {
            continue;
        }

        let values: Vec<f64> = match line.split_whitespace().map(str::parse).collect() {
            Ok(values) => values,
            Err(_) => continue,
        };

        let Some(family) = RobotFamily::from_dof(values.len()) else {
            continue;
        };

        match robot {
            None => {
                robot = Some(family);
                waypoints.push(values);
            }
            Some(current) if current == family => waypoints.push(values),
            Some(current) => {
                warn!(
                    expected = current.dof(),
                    got = values.len(),
                    "waypoint arity mismatch, line skipped"
                );
            }
        }
    }

    robot.map(|robot| JointPath { robot, waypoints })
}

/// Loads a joint path from a planner console-output file.
pub fn load_waypoints(path: &Path) -> Result<JointPath> {
    let text = fs::read_to_string(path).map_err(|e| FileAccessError::new(path, e))?;

    let joint_path = parse_waypoints(&text)
        .ok_or_else(|| NoDataError::new(path.display().to_string(), "waypoints"))?;

    debug!(
        path = %path.display(),
        robot = ?joint_path.robot,
        waypoints = joint_path.waypoints.len(),
        "Joint path loaded"
    );
    Ok(joint_path)
}

/// Writes the waypoints as CSV (`j0..jN` header, one row per configuration)
/// for the external trajectory player.
pub fn write_waypoints_csv(path: &Path, joint_path: &JointPath) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let header: Vec<String> = (0..joint_path.dof()).map(|i| format!("j{i}")).collect();
    writer.write_record(&header)?;

    for waypoint in &joint_path.waypoints {
        writer.write_record(waypoint.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;

    Ok(())
}
