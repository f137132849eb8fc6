// ABOUTME: Typed per-call parameter bag rendered against a command descriptor
// ABOUTME: Values stay in native types here; stringification happens at build time

use crate::datatypes::ParamKey;
use crate::macros::param_setters;

/// Parameters supplied by one client call.
///
/// Each command method fills exactly the fields its descriptor lists; the
/// frame builder then pulls them out by [`ParamKey`] in descriptor order.
/// An unset field the descriptor requires surfaces as a missing-parameter
/// error before any I/O happens.
#[derive(Clone, Debug, Default)]
pub(crate) struct CommandParams {
    address: Option<String>,
    group: Option<u16>,
    block: Option<u8>,
    scene: Option<u8>,
    fade: Option<u32>,
    level: Option<u8>,
    force: Option<bool>,
    time: Option<u64>,
    offset: Option<i64>,
    daylight: Option<bool>,
}

impl CommandParams {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    param_setters! {
        address: String,
        group: u16,
        block: u8,
        scene: u8,
        fade: u32,
        level: u8,
        force: bool,
        time: u64,
        offset: i64,
        daylight: bool,
    }

    /// Returns the stringified value for `key`, if this call supplied one.
    pub(crate) fn value_for(&self, key: ParamKey) -> Option<String> {
        match key {
            ParamKey::Address => self.address.clone(),
            ParamKey::Group => self.group.map(|v| v.to_string()),
            ParamKey::Block => self.block.map(|v| v.to_string()),
            ParamKey::Scene => self.scene.map(|v| v.to_string()),
            ParamKey::FadeTime => self.fade.map(|v| v.to_string()),
            ParamKey::Level => self.level.map(|v| v.to_string()),
            ParamKey::ForceStore => self.force.map(flag),
            ParamKey::Time => self.time.map(|v| v.to_string()),
            ParamKey::TimeZone => self.offset.map(|v| v.to_string()),
            ParamKey::Daylight => self.daylight.map(flag),
            // Version and Command belong to the frame builder; the rest are
            // reply vocabulary no request ever carries.
            ParamKey::Version
            | ParamKey::Command
            | ParamKey::Proportion
            | ParamKey::Display
            | ParamKey::Latitude
            | ParamKey::Longitude
            | ParamKey::ConstantLight => None,
        }
    }
}

/// Wire spelling for boolean-valued parameters.
fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}
