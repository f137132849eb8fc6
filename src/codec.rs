// HelvarNet wire codec - renders request frames and decodes reply payloads
//
// The wire format is ASCII text. A request is a frame-type marker, a
// comma-joined sequence of `key:value` parameter tokens, and a terminator.
// Replies are not tokenized: the payload is everything between the first `=`
// and the first `#` after it, because list payloads contain commas with no
// escaping. Only that boundary window is structural.

use crate::datatypes::{ParamKey, Parameter};
use thiserror::Error;

/// Marker opening an outbound command frame.
pub const COMMAND_MARKER: char = '>';
/// Marker opening a router reply frame.
pub const REPLY_MARKER: char = '?';
/// Marker opening a router-to-router internal frame. Never sent by clients.
pub const INTERNAL_MARKER: char = '<';
/// Marker opening an error/diagnostic frame. Never sent by clients.
pub const DIAGNOSTIC_MARKER: char = '!';
/// Closes every frame.
pub const TERMINATOR: char = '#';
/// Joins parameter tokens.
pub const DELIMITER: char = ',';
/// Separates a parameter key from its value.
pub const SEPARATOR: char = ':';
/// Separates a reply's routing echo from its payload.
pub const ANSWER: char = '=';

/// Wire value of the `V` parameter. The routers speak protocol version 1.
pub const PROTOCOL_VERSION: &str = "1";

/// The frame-type marker vocabulary. Clients only ever emit [`Command`]
/// frames; the remaining markers are recognized so captures and logs can be
/// classified.
///
/// [`Command`]: FrameType::Command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameType {
    Command,
    InternalCommand,
    Reply,
    Diagnostic,
}

impl FrameType {
    pub const fn marker(self) -> char {
        match self {
            FrameType::Command => COMMAND_MARKER,
            FrameType::InternalCommand => INTERNAL_MARKER,
            FrameType::Reply => REPLY_MARKER,
            FrameType::Diagnostic => DIAGNOSTIC_MARKER,
        }
    }
}

/// How a command's reply payload is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyShape {
    /// No reply is read. Action commands are fire-and-forget.
    None,
    /// The payload is returned as-is.
    Scalar,
    /// The payload must be exactly `"1"` or `"0"`.
    Boolean,
    /// The payload is a comma-delimited list; empty segments are preserved.
    List,
}

/// A decoded reply payload, one variant per [`ReplyShape`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyValue {
    None,
    Scalar(String),
    Boolean(bool),
    List(Vec<String>),
}

/// Request rendering failures. The codec rejects unsafe values outright
/// rather than emitting a frame the router would misparse.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("value {value:?} for parameter '{key}' contains reserved character '{found}'")]
    ReservedCharacter {
        key: ParamKey,
        value: String,
        found: char,
    },
}

/// Reply decoding failures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// No `=`-to-`#` bounded payload exists in the reply.
    #[error("malformed reply {raw:?}")]
    Malformed { raw: String },

    /// A boolean-shaped payload held something other than `"0"` or `"1"`.
    #[error("invalid boolean payload {payload:?}")]
    InvalidBoolean { payload: String },
}

/// Renders an ordered parameter sequence into a complete wire frame.
///
/// Parameters are emitted exactly in slice order; the caller controls
/// ordering and must already have stringified every value. Values containing
/// the delimiter, separator, or terminator are rejected.
///
/// # Example
///
/// ```
/// use helvarnet::codec::{self, FrameType};
/// use helvarnet::{ParamKey, Parameter};
///
/// let frame = codec::encode_request(
///     FrameType::Command,
///     &[
///         Parameter::new(ParamKey::Version, "1"),
///         Parameter::new(ParamKey::Command, "101"),
///     ],
/// )
/// .unwrap();
/// assert_eq!(frame, ">V:1,C:101#");
/// ```
pub fn encode_request(frame_type: FrameType, params: &[Parameter]) -> Result<String, EncodeError> {
    let capacity: usize = 2 + params.iter().map(|p| p.value.len() + 3).sum::<usize>();
    let mut frame = String::with_capacity(capacity);
    frame.push(frame_type.marker());

    for (i, param) in params.iter().enumerate() {
        check_wire_safe(param)?;
        if i > 0 {
            frame.push(DELIMITER);
        }
        frame.push(param.key.letter());
        frame.push(SEPARATOR);
        frame.push_str(&param.value);
    }

    frame.push(TERMINATOR);
    Ok(frame)
}

fn check_wire_safe(param: &Parameter) -> Result<(), EncodeError> {
    for reserved in [DELIMITER, SEPARATOR, TERMINATOR] {
        if param.value.contains(reserved) {
            return Err(EncodeError::ReservedCharacter {
                key: param.key,
                value: param.value.clone(),
                found: reserved,
            });
        }
    }
    Ok(())
}

/// Decodes raw reply bytes against the expected shape.
///
/// The payload window runs from just after the first `=` to just before the
/// first `#` that follows it; anything outside the window (the echoed
/// version/command tokens, trailing bytes) is ignored. A reply with no such
/// window is malformed, as is one whose payload is not text.
///
/// Shape [`ReplyShape::None`] decodes to [`ReplyValue::None`] without
/// inspecting the input; action replies are never consumed.
pub fn decode_reply(raw: &[u8], shape: ReplyShape) -> Result<ReplyValue, DecodeError> {
    match shape {
        ReplyShape::None => Ok(ReplyValue::None),
        ReplyShape::Scalar => Ok(ReplyValue::Scalar(extract_payload(raw)?.to_owned())),
        ReplyShape::Boolean => match extract_payload(raw)? {
            "1" => Ok(ReplyValue::Boolean(true)),
            "0" => Ok(ReplyValue::Boolean(false)),
            other => Err(DecodeError::InvalidBoolean {
                payload: other.to_owned(),
            }),
        },
        ReplyShape::List => Ok(ReplyValue::List(
            extract_payload(raw)?
                .split(DELIMITER)
                .map(str::to_owned)
                .collect(),
        )),
    }
}

fn extract_payload(raw: &[u8]) -> Result<&str, DecodeError> {
    let malformed = || DecodeError::Malformed {
        raw: String::from_utf8_lossy(raw).into_owned(),
    };

    let start = raw
        .iter()
        .position(|&b| b == ANSWER as u8)
        .ok_or_else(malformed)?;
    let rest = &raw[start + 1..];
    let len = rest
        .iter()
        .position(|&b| b == TERMINATOR as u8)
        .ok_or_else(malformed)?;

    std::str::from_utf8(&rest[..len]).map_err(|_| malformed())
}
