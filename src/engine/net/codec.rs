// JSON wire codec

use super::NetError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize a message into a wire payload
pub fn encode<M: Serialize>(message: &M) -> Result<Vec<u8>, NetError> {
    serde_json::to_vec(message).map_err(NetError::Encode)
}

/// Deserialize a wire payload
pub fn decode<M: DeserializeOwned>(payload: &[u8]) -> Result<M, NetError> {
    serde_json::from_slice(payload).map_err(NetError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "kind")]
    enum Ping {
        Hello { name: String },
        Bye,
    }

    #[test]
    fn test_encode_is_tagged_json() {
        let payload = encode(&Ping::Hello {
            name: "Adder".to_string(),
        })
        .unwrap();
        assert_eq!(
            std::str::from_utf8(&payload).unwrap(),
            r#"{"kind":"Hello","name":"Adder"}"#
        );
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode::<Ping>(b"\xff not json").unwrap_err();
        assert!(matches!(err, NetError::Decode(_)));
    }

    #[test]
    fn test_decode_unknown_kind_fails() {
        assert!(decode::<Ping>(br#"{"kind":"Shout"}"#).is_err());
        assert_eq!(decode::<Ping>(br#"{"kind":"Bye"}"#).unwrap(), Ping::Bye);
    }
}
