//! Structural mapping and stream framing.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::WireError;

/// Map one serde type onto another by field name.
///
/// The input is serialized to an intermediate JSON tree and deserialized as
/// the output type. Fields present on both sides carry over; fields missing
/// from the input fall back to the output's defaults (if it has them);
/// a field whose shape differs is a decode error.
pub fn transcode<A, B>(input: &A) -> Result<B, WireError>
where
    A: Serialize + ?Sized,
    B: DeserializeOwned,
{
    let tree = serde_json::to_value(input).map_err(WireError::encode::<A, _>)?;
    serde_json::from_value(tree).map_err(WireError::decode::<B, _>)
}

/// Encode a message as one frame for a side-channel connection.
pub fn encode_frame<T: Serialize + ?Sized>(message: &T) -> Result<Bytes, WireError> {
    serde_json::to_vec(message)
        .map(Bytes::from)
        .map_err(WireError::encode::<T, _>)
}

/// Decode one frame received on a side-channel connection.
pub fn decode_frame<T: DeserializeOwned>(frame: &Bytes) -> Result<T, WireError> {
    serde_json::from_slice(frame).map_err(WireError::decode::<T, _>)
}
