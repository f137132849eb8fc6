use std::fmt;

/// Single-letter parameter keys understood by the router.
///
/// Every request parameter is rendered on the wire as `<letter>:<value>`.
/// A few keys (`P`, `D`, `N`, `E`, `K`) are part of the protocol vocabulary
/// but are emitted by no command in the current table; they are kept here so
/// the vocabulary matches the router documentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// `V` - protocol version, always the first parameter.
    Version,
    /// `C` - command code, always the second parameter.
    Command,
    /// `@` - device address (`cluster.member.subnet.device`), or a bare
    /// cluster number for cluster-addressed queries.
    Address,
    /// `G` - group identifier.
    Group,
    /// `S` - scene number within a block.
    Scene,
    /// `B` - scene block number.
    Block,
    /// `F` - fade time in hundredths of a second.
    FadeTime,
    /// `L` - light level percentage (0-100).
    Level,
    /// `P` - proportional level offset. Never emitted.
    Proportion,
    /// `D` - display screen selector. Never emitted.
    Display,
    /// `T` - time as Unix epoch seconds.
    Time,
    /// `N` - latitude in decimal degrees. Never emitted.
    Latitude,
    /// `E` - longitude in decimal degrees. Never emitted.
    Longitude,
    /// `Z` - timezone offset from UTC in signed seconds.
    TimeZone,
    /// `Y` - daylight-saving flag, `"1"` or `"0"`.
    Daylight,
    /// `K` - constant-light-scene flag. Never emitted; router-side
    /// semantics are not asserted by this crate.
    ConstantLight,
    /// `O` - force-store flag, overrides scene write protection when `"1"`.
    ForceStore,
}

impl ParamKey {
    /// The wire letter for this key.
    pub const fn letter(self) -> char {
        match self {
            ParamKey::Version => 'V',
            ParamKey::Command => 'C',
            ParamKey::Address => '@',
            ParamKey::Group => 'G',
            ParamKey::Scene => 'S',
            ParamKey::Block => 'B',
            ParamKey::FadeTime => 'F',
            ParamKey::Level => 'L',
            ParamKey::Proportion => 'P',
            ParamKey::Display => 'D',
            ParamKey::Time => 'T',
            ParamKey::Latitude => 'N',
            ParamKey::Longitude => 'E',
            ParamKey::TimeZone => 'Z',
            ParamKey::Daylight => 'Y',
            ParamKey::ConstantLight => 'K',
            ParamKey::ForceStore => 'O',
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One ordered request parameter: a key and its already-stringified value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub key: ParamKey,
    pub value: String,
}

impl Parameter {
    pub fn new(key: ParamKey, value: impl Into<String>) -> Self {
        Parameter {
            key,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_unique() {
        let keys = [
            ParamKey::Version,
            ParamKey::Command,
            ParamKey::Address,
            ParamKey::Group,
            ParamKey::Scene,
            ParamKey::Block,
            ParamKey::FadeTime,
            ParamKey::Level,
            ParamKey::Proportion,
            ParamKey::Display,
            ParamKey::Time,
            ParamKey::Latitude,
            ParamKey::Longitude,
            ParamKey::TimeZone,
            ParamKey::Daylight,
            ParamKey::ConstantLight,
            ParamKey::ForceStore,
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a.letter(), b.letter(), "{a:?} and {b:?} collide");
            }
        }
    }

    #[test]
    fn test_display_matches_letter() {
        assert_eq!(ParamKey::Address.to_string(), "@");
        assert_eq!(ParamKey::Version.to_string(), "V");
        assert_eq!(ParamKey::ForceStore.to_string(), "O");
    }
}
