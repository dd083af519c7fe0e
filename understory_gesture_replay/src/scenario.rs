// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted frame sequences loaded from TOML.

use std::path::{Path, PathBuf};

use kurbo::Point;
use serde::Deserialize;
use understory_gesture::source::{PointerSource, TouchSource};
use understory_gesture::{
    ConfigError, Contact, ContactId, GestureConfig, PointerState, TouchPhase,
};

/// A scenario file that could not be used.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ScenarioError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid thresholds in {}: {source}", .path.display())]
    Config { path: PathBuf, source: ConfigError },
    #[error("{} contains no frames", .path.display())]
    Empty { path: PathBuf },
}

fn default_true() -> bool {
    true
}

/// Which devices the scripted platform exposes.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct Devices {
    pub(crate) touch: bool,
    pub(crate) pointer: bool,
}

impl Default for Devices {
    fn default() -> Self {
        Self {
            touch: true,
            pointer: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum PhaseSpec {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl From<PhaseSpec> for TouchPhase {
    fn from(phase: PhaseSpec) -> Self {
        match phase {
            PhaseSpec::Began => Self::Began,
            PhaseSpec::Moved => Self::Moved,
            PhaseSpec::Stationary => Self::Stationary,
            PhaseSpec::Ended => Self::Ended,
            PhaseSpec::Canceled => Self::Canceled,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct ContactSpec {
    #[serde(default)]
    id: u64,
    x: f64,
    y: f64,
    phase: PhaseSpec,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct PointerSpec {
    x: f64,
    y: f64,
    left: bool,
    right: bool,
    wheel: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct FrameSpec {
    #[serde(default = "default_true")]
    touch_enabled: bool,
    #[serde(default)]
    contacts: Vec<ContactSpec>,
    pointer: Option<PointerSpec>,
}

/// One scripted frame, exposed to the classifier through the device traits.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ScriptedFrame {
    touch_enabled: bool,
    contacts: Vec<Contact>,
    pointer: Option<PointerState>,
}

impl From<&FrameSpec> for ScriptedFrame {
    fn from(spec: &FrameSpec) -> Self {
        Self {
            touch_enabled: spec.touch_enabled,
            contacts: spec
                .contacts
                .iter()
                .map(|c| Contact::new(ContactId(c.id), Point::new(c.x, c.y), c.phase.into()))
                .collect(),
            pointer: spec.pointer.as_ref().map(|p| PointerState {
                position: Point::new(p.x, p.y),
                left_pressed: p.left,
                right_pressed: p.right,
                wheel_delta_y: p.wheel,
            }),
        }
    }
}

impl TouchSource for ScriptedFrame {
    fn touch_enabled(&self) -> bool {
        self.touch_enabled
    }

    fn contacts(&self) -> &[Contact] {
        &self.contacts
    }
}

impl PointerSource for ScriptedFrame {
    fn pointer(&self) -> Option<PointerState> {
        self.pointer
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct ScenarioFile {
    #[serde(default)]
    devices: Devices,
    #[serde(default)]
    config: GestureConfig,
    #[serde(default)]
    frames: Vec<FrameSpec>,
}

/// A parsed scenario: device availability, thresholds and frames.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Scenario {
    pub(crate) devices: Devices,
    pub(crate) config: GestureConfig,
    pub(crate) frames: Vec<ScriptedFrame>,
}

impl Scenario {
    pub(crate) fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let file: ScenarioFile = toml::from_str(text)?;
        Ok(Self {
            devices: file.devices,
            config: file.config,
            frames: file.frames.iter().map(ScriptedFrame::from).collect(),
        })
    }

    /// Reads and checks a scenario file.
    pub(crate) fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = read(path)?;
        let scenario = Self::from_toml_str(&text).map_err(|source| ScenarioError::Parse {
            path: path.to_owned(),
            source,
        })?;
        scenario
            .config
            .validate()
            .map_err(|source| ScenarioError::Config {
                path: path.to_owned(),
                source,
            })?;
        if scenario.frames.is_empty() {
            return Err(ScenarioError::Empty {
                path: path.to_owned(),
            });
        }
        Ok(scenario)
    }
}

/// Reads a standalone threshold file.
pub(crate) fn load_config(path: &Path) -> Result<GestureConfig, ScenarioError> {
    let text = read(path)?;
    let config: GestureConfig = toml::from_str(&text).map_err(|source| ScenarioError::Parse {
        path: path.to_owned(),
        source,
    })?;
    config.validate().map_err(|source| ScenarioError::Config {
        path: path.to_owned(),
        source,
    })?;
    Ok(config)
}

fn read(path: &Path) -> Result<String, ScenarioError> {
    std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_owned(),
        source,
    })
}
